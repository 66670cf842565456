use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use tracing::instrument;

use crate::cache::views;
use crate::entity::testimonial;
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminSession;
use crate::images::{self, ImageUpload, TESTIMONIAL_IMAGES_BUCKET};
use crate::models::testimonial::{
    TestimonialForm, TestimonialResponse, validate_testimonial_form,
};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/",
    tag = "Testimonials",
    operation_id = "listTestimonials",
    summary = "List testimonials",
    description = "Returns all testimonials, newest first.",
    responses(
        (status = 200, description = "Testimonials", body = Vec<TestimonialResponse>),
    ),
)]
#[instrument(skip(state))]
pub async fn list_testimonials(
    State(state): State<AppState>,
) -> Result<Json<Vec<TestimonialResponse>>, AppError> {
    let rows = testimonial::Entity::find()
        .order_by_desc(testimonial::Column::Id)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(TestimonialResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/",
    tag = "Testimonials",
    operation_id = "createTestimonial",
    summary = "Create a testimonial",
    description = "Creates a testimonial from a multipart form with an optional single \
        `image` file. The rating is validated before any storage call.",
    request_body(content_type = "multipart/form-data", description = "Testimonial fields plus an optional photo"),
    responses(
        (status = 201, description = "Testimonial created", body = TestimonialResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 502, description = "Image upload failed (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state, multipart))]
pub async fn create_testimonial(
    _admin: AdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = TestimonialForm::from_multipart(&mut multipart).await?;
    validate_testimonial_form(&form)?;

    let image_url = upload_single_image(&state, form.image.as_ref()).await?;

    let new_testimonial = testimonial::ActiveModel {
        name: Set(form.name),
        location: Set(form.location),
        review: Set(form.review),
        rating: Set(form.rating),
        image: Set(image_url),
        ..Default::default()
    };
    let model = new_testimonial.insert(&state.db).await?;

    state.views.invalidate(views::INDEX);
    state.views.invalidate(views::ADMIN);

    Ok((StatusCode::CREATED, Json(TestimonialResponse::from(model))))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Testimonials",
    operation_id = "updateTestimonial",
    summary = "Update a testimonial",
    description = "Replaces a testimonial's fields and reconciles its single optional \
        image: a new `image` file supersedes the stored one, an empty `existing_image` \
        clears it. The superseded image is deleted from storage after the row update \
        commits; a failed deletion is logged and does not fail the request.",
    params(("id" = i32, Path, description = "Testimonial ID")),
    request_body(content_type = "multipart/form-data", description = "Testimonial fields, kept URL, and an optional replacement photo"),
    responses(
        (status = 200, description = "Testimonial updated", body = TestimonialResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
        (status = 502, description = "Image upload failed (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state, multipart), fields(id))]
pub async fn update_testimonial(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<TestimonialResponse>, AppError> {
    let form = TestimonialForm::from_multipart(&mut multipart).await?;
    validate_testimonial_form(&form)?;

    let existing = find_testimonial(&state.db, id).await?;
    let original_image = existing.image.clone();

    let uploaded = upload_single_image(&state, form.image.as_ref()).await?;
    let plan = images::reconcile_single(
        original_image.as_deref(),
        form.existing_image.as_deref(),
        uploaded,
    );

    let mut active: testimonial::ActiveModel = existing.into();
    active.name = Set(form.name);
    active.location = Set(form.location);
    active.review = Set(form.review);
    active.rating = Set(form.rating);
    active.image = Set(plan.final_url.clone());
    let model = active.update(&state.db).await?;

    images::delete_images(&*state.blob_store, TESTIMONIAL_IMAGES_BUCKET, &plan.orphaned_urls)
        .await;

    state.views.invalidate(views::INDEX);
    state.views.invalidate(views::ADMIN);

    Ok(Json(model.into()))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Testimonials",
    operation_id = "deleteTestimonial",
    summary = "Delete a testimonial",
    params(("id" = i32, Path, description = "Testimonial ID")),
    responses(
        (status = 204, description = "Testimonial deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Testimonial not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state), fields(id))]
pub async fn delete_testimonial(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let existing = find_testimonial(&state.db, id).await?;

    testimonial::Entity::delete_by_id(id).exec(&state.db).await?;

    if let Some(ref url) = existing.image {
        images::delete_images(
            &*state.blob_store,
            TESTIMONIAL_IMAGES_BUCKET,
            std::slice::from_ref(url),
        )
        .await;
    }

    state.views.invalidate(views::INDEX);
    state.views.invalidate(views::ADMIN);

    Ok(StatusCode::NO_CONTENT)
}

/// Upload the form's single optional photo, returning its public URL.
async fn upload_single_image(
    state: &AppState,
    file: Option<&ImageUpload>,
) -> Result<Option<String>, AppError> {
    let Some(file) = file else {
        return Ok(None);
    };

    let uploaded = images::upload_images(
        &*state.blob_store,
        TESTIMONIAL_IMAGES_BUCKET,
        std::slice::from_ref(file),
    )
    .await?;

    Ok(uploaded.into_iter().next())
}

async fn find_testimonial<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<testimonial::Model, AppError> {
    testimonial::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Testimonial not found".into()))
}
