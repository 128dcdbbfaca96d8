//! FlyAgente - AI-assisted flight deal search
//!
//! Builds a grounded prompt from the user's search, asks a generative model
//! for three deals (cheapest cash, cheapest miles, premium cabin), validates
//! the reply and renders it as a web page or JSON.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{build_prompt, parse_search_response, ViewState, SearchForm};
pub use models::{FlightSearchQuery, FlightDeal, DealType, SearchResponse, SearchRequest};
pub use services::{FlightSearchService, GeminiClient, SearchError};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let prompt = build_prompt(&SearchForm::default().query);
        assert!(prompt.contains("FlyAgente"));
    }
}
