// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{FlightSearchQuery, FlightDeal, DealType, PassengerKind, GroundingChunk, WebSource, SearchResponse};
pub use requests::{SearchRequest, PageForm, PageQuery};
pub use responses::{HealthResponse, ErrorResponse, FaqEntry, LegalResponse, LegalSectionResponse};
