use axum::extract::Multipart;
use chrono::{DateTime, Utc};
use common::Condition;
use serde::Serialize;

use crate::error::AppError;
use crate::images::ImageUpload;

use super::shared::{MultipartForm, validate_min_chars};

#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionResponse {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub location: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
    pub km_driven: i32,
    pub engine_displacement: i32,
    pub registration: String,
    pub condition: Condition,
    pub description: String,
    pub images: Option<Vec<String>>,
    pub submitted_at: DateTime<Utc>,
}

impl From<crate::entity::submission::Model> for SubmissionResponse {
    fn from(m: crate::entity::submission::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            phone: m.phone,
            location: m.location,
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
            submitted_at: m.submitted_at,
        }
    }
}

/// Acknowledgement returned to the public sell form.
#[derive(Serialize, utoipa::ToSchema)]
pub struct SubmissionCreatedResponse {
    pub id: i32,
    pub submitted_at: DateTime<Utc>,
}

/// Fields of the public "sell my bike" form (multipart).
pub struct SellForm {
    pub name: String,
    pub phone: String,
    pub location: String,
    pub make: String,
    pub model: String,
    pub year: i32,
    pub price: i32,
    pub km_driven: i32,
    pub engine_displacement: i32,
    pub registration: String,
    pub condition: Condition,
    pub description: String,
    /// Attached photos, in form order.
    pub images: Vec<ImageUpload>,
}

impl SellForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::collect(multipart).await?;
        Ok(Self {
            name: form.take_text("name")?,
            phone: form.take_text("phone")?,
            location: form.take_text("location")?,
            make: form.take_text("make")?,
            model: form.take_text("model")?,
            year: form.take_i32("year")?,
            price: form.take_i32("price")?,
            km_driven: form.take_i32("km_driven")?,
            engine_displacement: form.take_i32("engine_displacement")?,
            registration: form.take_text("registration")?,
            condition: form.take_condition()?,
            description: form.take_text("description")?,
            images: form.images,
        })
    }
}

pub fn validate_sell_form(form: &SellForm) -> Result<(), AppError> {
    validate_min_chars(&form.name, 2, "Name")?;
    validate_min_chars(&form.phone, 10, "Phone")?;
    validate_min_chars(&form.location, 2, "Location")?;
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
    // The public form asks for a fuller description than the admin form.
    validate_min_chars(&form.description, 20, "Description")?;
    Ok(())
}
