use axum::Json;
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, QueryOrder, Set};
use tracing::instrument;

use crate::cache::views;
use crate::entity::{listing, submission};
use crate::error::{AppError, ErrorBody};
use crate::extractors::auth::AdminSession;
use crate::images::{self, LISTING_IMAGES_BUCKET};
use crate::models::listing::{ListingForm, ListingResponse, validate_listing_form};
use crate::models::submission::{
    SellForm, SubmissionCreatedResponse, SubmissionResponse, validate_sell_form,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Submissions",
    operation_id = "createSubmission",
    summary = "Submit a bike for sale",
    description = "Public sell form. Attached `images` files are uploaded and stored \
        with the submission; there is nothing pre-existing to reconcile against. The \
        submission stays private until an admin approves or rejects it.",
    request_body(content_type = "multipart/form-data", description = "Seller contact, bike details, and photos"),
    responses(
        (status = 201, description = "Submission received", body = SubmissionCreatedResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Image upload failed (UPLOAD_FAILED)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, multipart))]
pub async fn create_submission(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = SellForm::from_multipart(&mut multipart).await?;
    validate_sell_form(&form)?;

    let uploaded =
        images::upload_images(&*state.blob_store, LISTING_IMAGES_BUCKET, &form.images).await?;
    let image_urls = if uploaded.is_empty() {
        None
    } else {
        Some(uploaded)
    };

    let new_submission = submission::ActiveModel {
        name: Set(form.name),
        phone: Set(form.phone),
        location: Set(form.location),
        make: Set(form.make),
        model: Set(form.model),
        year: Set(form.year),
        price: Set(form.price),
        km_driven: Set(form.km_driven),
        engine_displacement: Set(form.engine_displacement),
        registration: Set(form.registration),
        condition: Set(form.condition),
        description: Set(form.description),
        images: Set(image_urls),
        submitted_at: Set(chrono::Utc::now()),
        ..Default::default()
    };
    let model = new_submission.insert(&state.db).await?;

    state.views.invalidate(views::ADMIN);

    Ok((
        StatusCode::CREATED,
        Json(SubmissionCreatedResponse {
            id: model.id,
            submitted_at: model.submitted_at,
        }),
    ))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Submissions",
    operation_id = "listSubmissions",
    summary = "List pending submissions",
    description = "Returns all unmoderated submissions, newest first.",
    responses(
        (status = 200, description = "Pending submissions", body = Vec<SubmissionResponse>),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state))]
pub async fn list_submissions(
    _admin: AdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<SubmissionResponse>>, AppError> {
    let rows = submission::Entity::find()
        .order_by_desc(submission::Column::SubmittedAt)
        .all(&state.db)
        .await?;

    Ok(Json(rows.into_iter().map(SubmissionResponse::from).collect()))
}

#[utoipa::path(
    post,
    path = "/{id}/approve",
    tag = "Submissions",
    operation_id = "approveSubmission",
    summary = "Approve a submission into a live listing",
    description = "Promotes a submission: the (possibly admin-edited) listing fields \
        are validated, new files are uploaded, and the image set is reconciled against \
        the submission's images. The listing row is inserted before the submission row \
        is deleted, so a failed insert leaves the submission intact for retry. If the \
        delete fails after a successful insert, the error is surfaced for manual \
        cleanup (APPROVAL_INCOMPLETE). Dropped images are deleted best-effort last.",
    params(("id" = i32, Path, description = "Submission ID")),
    request_body(content_type = "multipart/form-data", description = "Listing fields, kept URLs, and new image files"),
    responses(
        (status = 201, description = "Listing created from submission", body = ListingResponse),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
        (status = 500, description = "Listing created but submission not removed (APPROVAL_INCOMPLETE)", body = ErrorBody),
        (status = 502, description = "Image upload failed (UPLOAD_FAILED)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state, multipart), fields(id))]
pub async fn approve_submission(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = ListingForm::from_multipart(&mut multipart).await?;
    validate_listing_form(&form)?;

    let source = find_submission(&state.db, id).await?;
    let original_urls = source.images.clone().unwrap_or_default();

    let uploaded =
        images::upload_images(&*state.blob_store, LISTING_IMAGES_BUCKET, &form.images).await?;
    let plan = images::reconcile(&original_urls, &form.existing_images, uploaded);

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

    // No multi-row transaction: the listing now exists, so a failed delete
    // leaves both rows behind and needs manual cleanup by the admin.
    if let Err(e) = submission::Entity::delete_by_id(id).exec(&state.db).await {
        tracing::error!(
            submission_id = id,
            listing_id = model.id,
            error = %e,
            "listing created but submission row could not be deleted"
        );
        return Err(AppError::ApprovalIncomplete(format!(
            "Listing {} was created, but submission {} could not be removed and needs manual cleanup",
            model.id, id
        )));
    }

    images::delete_images(&*state.blob_store, LISTING_IMAGES_BUCKET, &plan.orphaned_urls).await;

    state.views.invalidate(views::INDEX);
    state.views.invalidate(views::ADMIN);

    Ok((StatusCode::CREATED, Json(ListingResponse::from(model))))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Submissions",
    operation_id = "deleteSubmission",
    summary = "Reject and delete a submission",
    description = "Best-effort deletes the submission's images, then removes the row. \
        Submissions are never publicly visible, so only the admin view is invalidated.",
    params(("id" = i32, Path, description = "Submission ID")),
    responses(
        (status = 204, description = "Submission deleted"),
        (status = 401, description = "Unauthorized (TOKEN_MISSING, TOKEN_INVALID)", body = ErrorBody),
        (status = 404, description = "Submission not found (NOT_FOUND)", body = ErrorBody),
    ),
    security(("jwt" = [])),
)]
#[instrument(skip(_admin, state), fields(id))]
pub async fn delete_submission(
    _admin: AdminSession,
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let source = find_submission(&state.db, id).await?;

    if let Some(ref urls) = source.images {
        images::delete_images(&*state.blob_store, LISTING_IMAGES_BUCKET, urls).await;
    }

    submission::Entity::delete_by_id(id).exec(&state.db).await?;

    state.views.invalidate(views::ADMIN);

    Ok(StatusCode::NO_CONTENT)
}

async fn find_submission<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<submission::Model, AppError> {
    submission::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Submission not found".into()))
}
