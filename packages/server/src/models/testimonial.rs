use axum::extract::Multipart;
use serde::Serialize;

use crate::error::AppError;
use crate::images::ImageUpload;

use super::shared::{MultipartForm, validate_min_chars};

#[derive(Serialize, utoipa::ToSchema)]
pub struct TestimonialResponse {
    pub id: i32,
    pub name: String,
    pub location: String,
    pub review: String,
    pub rating: i32,
    pub image: Option<String>,
}

impl From<crate::entity::testimonial::Model> for TestimonialResponse {
    fn from(m: crate::entity::testimonial::Model) -> Self {
        Self {
            id: m.id,
            name: m.name,
            location: m.location,
            review: m.review,
            rating: m.rating,
            image: m.image,
        }
    }
}

/// Fields of the admin testimonial form (multipart).
pub struct TestimonialForm {
    pub name: String,
    pub location: String,
    pub review: String,
    pub rating: i32,
    /// URL of the stored image the admin kept; `None` clears it.
    pub existing_image: Option<String>,
    /// Replacement photo, at most one.
    pub image: Option<ImageUpload>,
}

impl TestimonialForm {
    pub async fn from_multipart(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = MultipartForm::collect(multipart).await?;
        Ok(Self {
            name: form.take_text("name")?,
            location: form.take_text("location")?,
            review: form.take_text("review")?,
            rating: form.take_i32("rating")?,
            existing_image: form
                .existing_image
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty()),
            image: form.image,
        })
    }
}

pub fn validate_testimonial_form(form: &TestimonialForm) -> Result<(), AppError> {
    validate_min_chars(&form.name, 2, "Name")?;
    validate_min_chars(&form.location, 2, "Location")?;
    validate_min_chars(&form.review, 10, "Review")?;
    if !(1..=5).contains(&form.rating) {
        return Err(AppError::Validation(
            "Rating must be between 1 and 5".into(),
        ));
    }
    Ok(())
}
