// Service exports
pub mod gemini;
pub mod search;

pub use gemini::{GeminiClient, GeminiError, GenerativeModel, ModelOutput};
pub use search::{FlightSearchService, SearchError, GENERIC_FAILURE_MESSAGE};
