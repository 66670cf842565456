use axum::extract::{DefaultBodyLimit, Multipart, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, ExprTrait, QueryFilter, QueryOrder, Set};
use tracing::instrument;

use crate::cache::views;
use crate::entity::listing;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminSession;
use crate::images::{self, LISTING_IMAGES_BUCKET};
use crate::models::listing::{
    ListingForm, ListingListQuery, ListingResponse, escape_like, validate_listing_form,
};
use crate::state::AppState;

/// Body limit layer for image-bearing form routes (32 MB).
pub fn image_upload_body_limit() -> DefaultBodyLimit {
    DefaultBodyLimit::max(32 * 1024 * 1024)
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Listings",
    operation_id = "listListings",
    summary = "Browse live listings",
    description = "Returns all live listings, newest first, with optional storefront \
        filters: substring search over make and model, exact make, condition, and a \
        price range.",
    params(ListingListQuery),
    responses(
        (status = 200, description = "Matching listings", body = Vec<ListingResponse>),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_listings(
    State(state): State<AppState>,
    Query(query): Query<ListingListQuery>,
) -> Result<Json<Vec<ListingResponse>>, AppError> {
    let mut select = listing::Entity::find();

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            let pattern = format!("%{}%", term.to_lowercase());
            select = select.filter(
                sea_orm::Condition::any()
                    .add(
                        Expr::expr(Func::lower(Expr::col(listing::Column::Make)))
                            .like(LikeExpr::new(pattern.clone()).escape('\\')),
                    )
                    .add(
                        Expr::expr(Func::lower(Expr::col(listing::Column::Model)))
                            .like(LikeExpr::new(pattern).escape('\\')),
                    ),
            );
        }
    }

    if let Some(ref make) = query.make {
        let make = make.trim();
        if !make.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(listing::Column::Make)))
                    .eq(make.to_lowercase()),
            );
        }
    }

    if let Some(condition) = query.condition {
        select = select.filter(listing::Column::Condition.eq(condition));
    }
    if let Some(min_price) = query.min_price {
        select = select.filter(listing::Column::Price.gte(min_price));
    }
    if let Some(max_price) = query.max_price {
        select = select.filter(listing::Column::Price.lte(max_price));
    }

    let rows = select
        .order_by_desc(listing::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(ListingResponse::from).collect()))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Listings",
    operation_id = "getListing",
    summary = "Get a listing by ID",
    params(("id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 200, description = "Listing details", body = ListingResponse),
        (status = 404, description = "Listing not found (NOT_FOUND)", body = ErrorBody),
    ),
)]
#[instrument(skip(state), fields(id))]
pub async fn get_listing(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<ListingResponse>, AppError> {
    let model = find_listing(&state.db, id).await?;
    Ok(Json(model.into()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Listings",
    operation_id = "createListing",
    summary = "Create a listing",
    description = "Creates a live listing from a multipart form. Repeated `images` \
        file fields are uploaded in form order and become the listing's image set. \
        Validation failures reject the request before any upload.",
    request_body(content_type = "multipart/form-data", description = "Listing fields plus image files"),
    responses(
        (status = 201, description = "Listing created", body = ListingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "Image upload failed (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state, multipart))]
pub async fn create_listing(
    _admin: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = ListingForm::from_multipart(&mut multipart).await?;
    validate_listing_form(&form)?;

    let uploaded =
        images::upload_images(&*state.blob_store, LISTING_IMAGES_BUCKET, &form.images).await?;
    let plan = images::reconcile(&[], &[], uploaded);

    let new_listing = listing::ActiveModel {
        make: Set(form.make),
        model: Set(form.model),
        year: Set(form.year),
        price: Set(form.price),
        km_driven: Set(form.km_driven),
        engine_displacement: Set(form.engine_displacement),
        registration: Set(form.registration),
        condition: Set(form.condition),
        description: Set(form.description),
        images: Set(plan.final_urls),
        ..Default::default()
    };
    let model = new_listing.insert(&state.db).await?;

    state.views.invalidate(views::INDEX);
    state.views.invalidate(views::ADMIN);

    Ok((StatusCode::CREATED, Json(ListingResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Listings",
    operation_id = "updateListing",
    summary = "Update a listing",
    description = "Replaces a listing's attributes and reconciles its image set: \
        `existing_images` names the kept URLs (comma-separated and/or repeated), \
        `images` file fields are uploaded and appended. Images the listing no longer \
        references are deleted from storage after the row update commits; a failed \
        deletion is logged and does not fail the request.",
    params(("id" = i32, Path, description = "Listing ID")),
    request_body(content_type = "multipart/form-data", description = "Listing fields, kept URLs, and new image files"),
    responses(
        (status = 200, description = "Listing updated", body = ListingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Listing not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Image upload failed (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state, multipart), fields(id))]
pub async fn update_listing(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<ListingResponse>, AppError> {
    let form = ListingForm::from_multipart(&mut multipart).await?;
    validate_listing_form(&form)?;

    // The row is the authority on which images existed before this mutation;
    // the client only gets to choose which of them to keep.
    let existing = find_listing(&state.db, id).await?;
    let original_urls = existing.images.clone();

    let uploaded =
        images::upload_images(&*state.blob_store, LISTING_IMAGES_BUCKET, &form.images).await?;
    let plan = images::reconcile(&original_urls, &form.existing_images, uploaded);

    let mut active: listing::ActiveModel = existing.into();
    active.make = Set(form.make);
    active.model = Set(form.model);
    active.year = Set(form.year);
    active.price = Set(form.price);
    active.km_driven = Set(form.km_driven);
    active.engine_displacement = Set(form.engine_displacement);
    active.registration = Set(form.registration);
    active.condition = Set(form.condition);
    active.description = Set(form.description);
    active.images = Set(plan.final_urls);
    let model = active.update(&state.db).await?;

    images::delete_images(&*state.blob_store, LISTING_IMAGES_BUCKET, &plan.orphaned_urls).await;

    state.views.invalidate(views::INDEX);
    state.views.invalidate(&views::listing_detail(id));
    state.views.invalidate(views::ADMIN);

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Listings",
    operation_id = "deleteListing",
    summary = "Delete a listing",
    description = "Deletes the listing row, then best-effort deletes its images from \
        storage.",
    params(("id" = i32, Path, description = "Listing ID")),
    responses(
        (status = 204, description = "Listing deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Listing not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state), fields(id))]
pub async fn delete_listing(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_listing(&state.db, id).await?;

    listing::Entity::delete_by_id(id).exec(&state.db).await?;

    images::delete_images(&*state.blob_store, LISTING_IMAGES_BUCKET, &existing.images).await;

    state.views.invalidate(views::INDEX);
    state.views.invalidate(views::ADMIN);

    Ok(StatusCode::NO_CONTENT)
}

async fn find_listing<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<listing::Model, AppError> {
    listing::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Listing not found".into()))
}
