use std::sync::Arc;
use thiserror::Error;
use validator::Validate;

use crate::core::prompt::build_prompt;
use crate::core::response::{parse_search_response, ResponseError};
use crate::core::form::{ADULTS_REQUIRED_MESSAGE, MISSING_FIELDS_MESSAGE};
use crate::models::{FlightSearchQuery, SearchRequest, SearchResponse};
use crate::services::gemini::{GeminiError, GenerativeModel};

/// Message shown for any failure during or after the external call
pub const GENERIC_FAILURE_MESSAGE: &str =
    "Não conseguimos realizar a varredura global agora. Por favor, tente novamente em instantes.";

/// Errors surfaced by a flight search
#[derive(Debug, Error)]
pub enum SearchError {
    #[error("Validation failed: {details}")]
    Validation { message: &'static str, details: String },

    #[error("Search failed: {0}")]
    Failed(#[from] GeminiError),

    #[error("Malformed model response: {0}")]
    MalformedResponse(#[from] ResponseError),
}

impl SearchError {
    /// Text shown to the user
    pub fn user_message(&self) -> &'static str {
        match self {
            SearchError::Validation { message, .. } => *message,
            SearchError::Failed(_) | SearchError::MalformedResponse(_) => GENERIC_FAILURE_MESSAGE,
        }
    }

    /// Machine-readable error kind
    pub fn code(&self) -> &'static str {
        match self {
            SearchError::Validation { .. } => "validation_failed",
            SearchError::Failed(_) => "search_failed",
            SearchError::MalformedResponse(_) => "malformed_response",
        }
    }
}

/// Runs one flight search against a generative model
///
/// Validates the query, builds the prompt, makes exactly one model call and
/// validates the reply. Nothing is retried or cached.
#[derive(Clone)]
pub struct FlightSearchService {
    model: Arc<dyn GenerativeModel>,
}

impl FlightSearchService {
    pub fn new(model: Arc<dyn GenerativeModel>) -> Self {
        Self { model }
    }

    pub fn model_name(&self) -> &str {
        self.model.model_name()
    }

    pub async fn search(&self, query: &FlightSearchQuery) -> Result<SearchResponse, SearchError> {
        let request = SearchRequest::from(query);
        request
            .validate()
            .map_err(|errors| {
                let fields = errors.field_errors();
                let message = if fields.len() == 1 && fields.contains_key("adults") {
                    ADULTS_REQUIRED_MESSAGE
                } else {
                    MISSING_FIELDS_MESSAGE
                };
                SearchError::Validation { message, details: errors.to_string() }
            })?;
        let query = request.to_query();

        let search_id = uuid::Uuid::new_v4();
        tracing::info!(
            %search_id,
            origin = %query.origin,
            destination = %query.destination,
            passengers = query.total_passengers(),
            "Starting flight search"
        );

        let prompt = build_prompt(&query);

        let output = self.model.generate(&prompt).await.map_err(|e| {
            tracing::error!(%search_id, "Flight search failed: {}", e);
            SearchError::Failed(e)
        })?;

        let response = parse_search_response(&output.text, output.grounding_chunks).map_err(|e| {
            tracing::warn!(%search_id, "Model returned a malformed response: {}", e);
            SearchError::MalformedResponse(e)
        })?;

        tracing::info!(
            %search_id,
            deals = response.deals.len(),
            sources = response.sources().count(),
            "Flight search completed"
        );

        Ok(response)
    }
}
