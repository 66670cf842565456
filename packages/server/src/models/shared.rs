use std::collections::HashMap;

use axum::extract::Multipart;
use axum::extract::multipart::Field;
use common::Condition;
use common::condition::ParseConditionError;

use crate::error::AppError;
use crate::images::ImageUpload;

/// Escape LIKE wildcard characters in a search string.
pub fn escape_like(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Validate a trimmed field against a minimum character count.
pub fn validate_min_chars(value: &str, min: usize, field: &str) -> Result<(), AppError> {
    if value.trim().chars().count() < min {
        return Err(AppError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    Ok(())
}

/// Raw fields collected from one multipart request body.
///
/// The well-known image fields are separated out during collection; every
/// other field lands in the text map and is consumed by the typed form
/// builders via the `take_*` accessors.
#[derive(Default)]
pub struct MultipartForm {
    texts: HashMap<String, String>,
    /// Files from repeated `images` fields, in form order.
    pub images: Vec<ImageUpload>,
    /// Kept URLs from `existing_images` (repeated and/or comma-separated).
    pub existing_images: Vec<String>,
    /// Single-file `image` field.
    pub image: Option<ImageUpload>,
    /// Kept URL from `existing_image`; an empty string means "cleared".
    pub existing_image: Option<String>,
}

impl MultipartForm {
    pub async fn collect(multipart: &mut Multipart) -> Result<Self, AppError> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
        {
            match field.name() {
                Some("images") => form.images.push(read_file(field).await?),
                Some("image") => form.image = Some(read_file(field).await?),
                Some("existing_images") => {
                    let text = read_text(field).await?;
                    form.existing_images.extend(
                        text.split(',')
                            .map(str::trim)
                            .filter(|s| !s.is_empty())
                            .map(String::from),
                    );
                }
                Some("existing_image") => form.existing_image = Some(read_text(field).await?),
                Some(name) => {
                    let name = name.to_string();
                    let value = read_text(field).await?;
                    form.texts.insert(name, value);
                }
                None => {} // Ignore unnamed fields.
            }
        }

        Ok(form)
    }

    pub fn take_text(&mut self, name: &str) -> Result<String, AppError> {
        self.texts
            .remove(name)
            .map(|v| v.trim().to_string())
            .ok_or_else(|| AppError::Validation(format!("Missing '{name}' field")))
    }

    pub fn take_i32(&mut self, name: &str) -> Result<i32, AppError> {
        self.take_text(name)?
            .parse()
            .map_err(|_| AppError::Validation(format!("'{name}' must be an integer")))
    }

    pub fn take_condition(&mut self) -> Result<Condition, AppError> {
        self.take_text("condition")?
            .parse()
            .map_err(|e: ParseConditionError| AppError::Validation(e.to_string()))
    }
}

async fn read_file(field: Field<'_>) -> Result<ImageUpload, AppError> {
    let filename = field.file_name().unwrap_or("upload").to_string();
    let bytes = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read uploaded file: {e}")))?;
    Ok(ImageUpload {
        filename,
        bytes: bytes.to_vec(),
    })
}

async fn read_text(field: Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read form field: {e}")))
}
