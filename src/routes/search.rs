use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::content::{faq_entries, LegalDoc};
use crate::models::{ErrorResponse, HealthResponse, SearchRequest};
use crate::routes::AppState;
use crate::services::SearchError;

/// Configure the JSON API routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/search", web::post().to(search_flights))
        .route("/faq", web::get().to(list_faq))
        .route("/legal/{doc}", web::get().to(legal_document));
}

/// Health check endpoint
///
/// Reports `degraded` while no Gemini API key is configured.
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let status = if state.api_key_configured { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        model: state.search.model_name().to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Search flight deals
///
/// POST /api/v1/search
///
/// Request body:
/// ```json
/// {
///   "origin": "GRU",
///   "destination": "LIS",
///   "departureDate": "2025-06-01",
///   "returnDate": "",
///   "adults": 2,
///   "children": 0,
///   "infants": 1
/// }
/// ```
async fn search_flights(
    state: web::Data<AppState>,
    req: web::Json<SearchRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "validation_failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    match state.search.search(&req.to_query()).await {
        Ok(response) => HttpResponse::Ok().json(response),
        Err(e) => error_response(&e),
    }
}

/// Map a search failure to its JSON error body
pub fn error_response(e: &SearchError) -> HttpResponse {
    let status = match e {
        SearchError::Validation { .. } => StatusCode::BAD_REQUEST,
        SearchError::Failed(_) | SearchError::MalformedResponse(_) => StatusCode::BAD_GATEWAY,
    };

    HttpResponse::build(status).json(ErrorResponse {
        error: e.code().to_string(),
        message: e.user_message().to_string(),
        status_code: status.as_u16(),
    })
}

/// FAQ entries shown on the page
async fn list_faq() -> impl Responder {
    HttpResponse::Ok().json(faq_entries())
}

/// Legal document by slug (`privacy` or `terms`)
async fn legal_document(path: web::Path<String>) -> impl Responder {
    match LegalDoc::parse(&path) {
        Some(doc) => HttpResponse::Ok().json(doc.to_response()),
        None => HttpResponse::NotFound().json(ErrorResponse {
            error: "not_found".to_string(),
            message: format!("Unknown legal document: {}", path.as_str()),
            status_code: 404,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::response::ResponseError;
    use crate::services::GENERIC_FAILURE_MESSAGE;

    #[test]
    fn test_health_check_response() {
        let response = HealthResponse {
            status: "healthy".to_string(),
            version: "0.1.0".to_string(),
            model: "gemini-3-flash-preview".to_string(),
            timestamp: chrono::Utc::now(),
        };

        assert_eq!(response.status, "healthy");
    }

    #[test]
    fn test_error_status_mapping() {
        let malformed = SearchError::MalformedResponse(ResponseError::Schema("no deals".into()));
        assert_eq!(error_response(&malformed).status(), StatusCode::BAD_GATEWAY);

        let invalid = SearchError::Validation {
            message: crate::core::form::MISSING_FIELDS_MESSAGE,
            details: "origin is required".into(),
        };
        assert_eq!(error_response(&invalid).status(), StatusCode::BAD_REQUEST);

        assert_eq!(malformed.user_message(), GENERIC_FAILURE_MESSAGE);
    }
}
