use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth_routes())
        .nest("/listings", listing_routes())
        .nest("/testimonials", testimonial_routes())
        .nest("/submissions", submission_routes())
        .nest("/pricing", pricing_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(handlers::auth::login))
        .route("/session", get(handlers::auth::session))
}

fn listing_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::listing::list_listings).post(handlers::listing::create_listing),
        )
        .route(
            "/{id}",
            get(handlers::listing::get_listing)
                .put(handlers::listing::update_listing)
                .delete(handlers::listing::delete_listing),
        )
        .layer(handlers::listing::image_upload_body_limit())
}

fn testimonial_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::testimonial::list_testimonials)
                .post(handlers::testimonial::create_testimonial),
        )
        .route(
            "/{id}",
            put(handlers::testimonial::update_testimonial)
                .delete(handlers::testimonial::delete_testimonial),
        )
        .layer(handlers::listing::image_upload_body_limit())
}

fn submission_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::submission::list_submissions)
                .post(handlers::submission::create_submission),
        )
        .route("/{id}", delete(handlers::submission::delete_submission))
        .route(
            "/{id}/approve",
            post(handlers::submission::approve_submission),
        )
        .layer(handlers::listing::image_upload_body_limit())
}

fn pricing_routes() -> Router<AppState> {
    Router::new().route("/suggest", post(handlers::pricing::suggest_price))
}
