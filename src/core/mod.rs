// Core logic exports
pub mod content;
pub mod form;
pub mod prompt;
pub mod response;
pub mod view;

pub use content::{LegalDoc, FAQS, faq_entries, badge};
pub use form::{SearchForm, FormAction, FormError, ADULTS_REQUIRED_MESSAGE, MISSING_FIELDS_MESSAGE};
pub use prompt::build_prompt;
pub use response::{parse_search_response, extract_json_payload, ResponseError};
pub use view::{ViewState, Phase, SearchTicket};
