pub mod cache;
pub mod config;
pub mod database;
pub mod entity;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod images;
pub mod models;
pub mod pricing;
pub mod routes;
pub mod state;
pub mod utils;

use std::time::Duration;

use axum::http::HeaderValue;
use tower_http::cors::{Any, CorsLayer};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_scalar::{Scalar, Servable as ScalarServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::config::CorsConfig;
use crate::state::AppState;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Motomart Marketplace API",
        version = "1.0.0",
        description = "API for the Motomart motorcycle marketplace"
    ),
    paths(
        handlers::auth::login,
        handlers::auth::session,
        handlers::listing::list_listings,
        handlers::listing::get_listing,
        handlers::listing::create_listing,
        handlers::listing::update_listing,
        handlers::listing::delete_listing,
        handlers::testimonial::list_testimonials,
        handlers::testimonial::create_testimonial,
        handlers::testimonial::update_testimonial,
        handlers::testimonial::delete_testimonial,
        handlers::submission::create_submission,
        handlers::submission::list_submissions,
        handlers::submission::approve_submission,
        handlers::submission::delete_submission,
        handlers::pricing::suggest_price,
    ),
    components(schemas(
        common::Condition,
        error::ErrorBody,
        models::auth::LoginRequest,
        models::auth::LoginResponse,
        models::auth::SessionResponse,
        models::listing::ListingResponse,
        models::pricing::PriceQuote,
        models::pricing::PriceQuoteRequest,
        models::submission::SubmissionCreatedResponse,
        models::submission::SubmissionResponse,
        models::testimonial::TestimonialResponse,
    )),
    tags(
        (name = "Auth", description = "Admin session management"),
        (name = "Listings", description = "Public storefront and admin listing CRUD"),
        (name = "Testimonials", description = "Customer testimonials"),
        (name = "Submissions", description = "Seller leads and moderation"),
        (name = "Pricing", description = "AI price suggestion"),
    ),
    modifiers(&SecurityAddon),
)]
struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_default();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .allow_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(Any)
        .allow_headers(Any)
        .max_age(Duration::from_secs(config.max_age))
}

/// Build the application router.
pub fn build_router(state: AppState) -> axum::Router {
    let cors = cors_layer(&state.config.server.cors);
    let api = ApiDoc::openapi();

    axum::Router::new()
        .nest("/api", routes::api_routes())
        .route(
            "/media/{bucket}/{filename}",
            axum::routing::get(handlers::media::serve_object),
        )
        .layer(cors)
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", api.clone()))
        .merge(Scalar::with_url("/scalar", api))
}
