use chrono::{Datelike, Utc};
use common::Condition;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::shared::validate_min_chars;

/// Structured input to the valuation provider.
#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct PriceQuoteRequest {
    pub make: String,
    pub model: String,
    pub year: i32,
    pub condition: Condition,
    pub km_driven: i32,
}

/// Suggested price with the provider's reasoning.
#[derive(Debug, Clone, Serialize, Deserialize, utoipa::ToSchema)]
pub struct PriceQuote {
    pub suggested_price: i64,
    pub reasoning: String,
}

pub fn validate_price_quote_request(req: &PriceQuoteRequest) -> Result<(), AppError> {
    validate_min_chars(&req.make, 2, "Make")?;
    validate_min_chars(&req.model, 1, "Model")?;
    let max_year = Utc::now().year() + 1;
    if req.year < 1900 || req.year > max_year {
        return Err(AppError::Validation(format!(
            "Year must be between 1900 and {max_year}"
        )));
    }
    if req.km_driven < 0 {
        return Err(AppError::Validation(
            "Distance driven must not be negative".into(),
        ));
    }
    Ok(())
}
