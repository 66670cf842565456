use axum::extract::Multipart;
use common::Condition;
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::images::ImageUpload;

pub use super::shared::escape_like;
use super::shared::{MultipartForm, validate_min_chars};

#[derive(Serialize, utoipa::ToSchema)]
pub struct ListingResponse {
    pub id: i32,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
    pub km_driven: i32,
    pub engine_displacement: i32,
    pub registration: String,
    pub condition: Condition,
    pub description: String,
    /// Public image URLs in display order.
    pub images: Vec<String>,
}

impl From<crate::entity::listing::Model> for ListingResponse {
    fn from(m: crate::entity::listing::Model) -> Self {
        Self {
            id: m.id,
            make: m.make,
            model: m.model,
            year: m.year,
            price: m.price,
            km_driven: m.km_driven,
            engine_displacement: m.engine_displacement,
            registration: m.registration,
            condition: m.condition,
            description: m.description,
            images: m.images,
        }
    }
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct ListingListQuery {
    /// Case-insensitive substring match on make and model.
    pub search: Option<String>,
    /// Exact make (case-insensitive).
    pub make: Option<String>,
    pub condition: Option<Condition>,
    pub min_price: Option<i32>,
    pub max_price: Option<i32>,
}

/// Fields of the admin listing form (multipart), used by the create, update,
/// and approve flows.
pub struct ListingForm {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
    pub km_driven: i32,
    pub engine_displacement: i32,
    pub registration: String,
    pub condition: Condition,
    pub description: String,
    /// URLs of pre-existing images the admin chose to keep, in display order.
    pub existing_images: Vec<String>,
    /// Freshly attached files, in form order.
    pub images: Vec<ImageUpload>,
}

impl ListingForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::collect(multipart).await?;
        Ok(Self {
            make: form.take_text("make")?,
            model: form.take_text("model")?,
            year: form.take_i32("year")?,
            price: form.take_i32("price")?,
            km_driven: form.take_i32("km_driven")?,
            engine_displacement: form.take_i32("engine_displacement")?,
            registration: form.take_text("registration")?,
            condition: form.take_condition()?,
            description: form.take_text("description")?,
            existing_images: form.existing_images,
            images: form.images,
        })
    }
}

pub fn validate_listing_form(form: &ListingForm) -> Result<(), AppError> {
    validate_min_chars(&form.make, 2, "Make")?;
    validate_min_chars(&form.model, 1, "Model")?;
    if form.year < 1900 {
        return Err(AppError::Validation("Year must be 1900 or later".into()));
    }
    if form.price < 1 {
        return Err(AppError::Validation("Price must be at least 1".into()));
    }
    if form.km_driven < 0 {
        return Err(AppError::Validation(
            "Distance driven must not be negative".into(),
        ));
    }
    if form.engine_displacement < 1 {
        return Err(AppError::Validation(
            "Engine displacement must be positive".into(),
        ));
    }
    validate_min_chars(&form.registration, 2, "Registration")?;
    validate_min_chars(&form.description, 10, "Description")?;
    Ok(())
}
