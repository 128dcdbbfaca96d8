use serde::{Deserialize, Serialize};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub model: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// One FAQ entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

/// Legal document as returned by the API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalResponse {
    pub title: String,
    pub intro: String,
    pub sections: Vec<LegalSectionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegalSectionResponse {
    pub heading: String,
    pub body: String,
}
