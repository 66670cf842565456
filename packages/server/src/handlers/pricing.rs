use axum::Json;
use axum::extract::State;
use tracing::instrument;

use crate::error::{AppError, ErrorBody};
use crate::extractors::json::AppJson;
use crate::models::pricing::{PriceQuote, PriceQuoteRequest, validate_price_quote_request};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/suggest",
    tag = "Pricing",
    operation_id = "suggestPrice",
    summary = "Suggest a listing price",
    description = "Asks the valuation provider for a fair price from structured bike \
        attributes. Provider failures are surfaced verbatim with no retry.",
    request_body = PriceQuoteRequest,
    responses(
        (status = 200, description = "Suggested price", body = PriceQuote),
        (status = 400, description = "Validation error (VALIDATION_ERROR)", body = ErrorBody),
        (status = 502, description = "Provider failure (UPSTREAM_ERROR)", body = ErrorBody),
    ),
)]
#[instrument(skip(state, payload), fields(make = %payload.make, model = %payload.model))]
pub async fn suggest_price(
    State(state): State<AppState>,
    AppJson(payload): AppJson<PriceQuoteRequest>,
) -> Result<Json<PriceQuote>, AppError> {
    validate_price_quote_request(&payload)?;

    let quote = state
        .pricing
        .suggest(&payload)
        .await
        .map_err(|e| AppError::Upstream(e.to_string()))?;

    Ok(Json(quote))
}
