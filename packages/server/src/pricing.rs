//! Price suggestion gateway backed by an OpenAI-compatible completion API.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

use crate::config::PricingConfig;
use crate::models::pricing::{PriceQuote, PriceQuoteRequest};

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("price suggestion request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("price suggestion provider error: {0}")]
    Provider(String),
    #[error("malformed price suggestion response: {0}")]
    Malformed(String),
}

/// Opaque valuation collaborator. Failures are surfaced to the caller
/// verbatim, with no retry.
#[async_trait]
pub trait PriceSuggester: Send + Sync {
    async fn suggest(&self, input: &PriceQuoteRequest) -> Result<PriceQuote, SuggestError>;
}

pub struct HttpPriceSuggester {
    client: reqwest::Client,
    config: PricingConfig,
}

impl HttpPriceSuggester {
    pub fn new(config: PricingConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    fn prompt(input: &PriceQuoteRequest) -> String {
        format!(
            "You are an expert in motorcycle valuation. Based on the make, model, \
             year, condition, and mileage of the motorcycle, suggest a fair listing \
             price and briefly explain your reasoning. Respond with a JSON object \
             with the integer field \"suggested_price\" and the string field \
             \"reasoning\".\n\n\
             Make: {}\nModel: {}\nYear: {}\nCondition: {}\nMileage: {} km",
            input.make, input.model, input.year, input.condition, input.km_driven
        )
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
}

#[derive(Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Parse the provider's JSON reply into a quote.
fn parse_quote(content: &str) -> Result<PriceQuote, SuggestError> {
    serde_json::from_str(content)
        .map_err(|e| SuggestError::Malformed(format!("{e} in: {content}")))
}

#[async_trait]
impl PriceSuggester for HttpPriceSuggester {
    async fn suggest(&self, input: &PriceQuoteRequest) -> Result<PriceQuote, SuggestError> {
        let body = json!({
            "model": self.config.model,
            "messages": [{ "role": "user", "content": Self::prompt(input) }],
            "response_format": { "type": "json_object" },
        });

        let response = self
            .client
            .post(&self.config.endpoint)
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(SuggestError::Provider(format!("{status}: {detail}")));
        }

        let completion: CompletionResponse = response.json().await?;
        let content = completion
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| SuggestError::Malformed("response contained no choices".into()))?;

        parse_quote(content)
    }
}
