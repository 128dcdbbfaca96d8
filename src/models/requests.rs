use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::FlightSearchQuery;

/// Request to search flight deals
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, message = "origin is required"))]
    pub origin: String,
    #[validate(length(min = 1, message = "destination is required"))]
    pub destination: String,
    #[validate(length(min = 1, message = "departureDate is required"))]
    #[serde(alias = "departure_date", rename = "departureDate")]
    pub departure_date: String,
    #[serde(default)]
    #[serde(alias = "return_date", rename = "returnDate")]
    pub return_date: String,
    #[validate(range(min = 1, message = "at least one adult is required"))]
    #[serde(default = "default_adults")]
    pub adults: u8,
    #[serde(default)]
    pub children: u8,
    #[serde(default)]
    pub infants: u8,
}

fn default_adults() -> u8 {
    1
}

impl SearchRequest {
    /// Trimmed copy of the request as a search query
    pub fn to_query(&self) -> FlightSearchQuery {
        FlightSearchQuery {
            origin: self.origin.trim().to_string(),
            destination: self.destination.trim().to_string(),
            departure_date: self.departure_date.trim().to_string(),
            return_date: self.return_date.trim().to_string(),
            adults: self.adults,
            children: self.children,
            infants: self.infants,
        }
    }
}

impl From<&FlightSearchQuery> for SearchRequest {
    fn from(query: &FlightSearchQuery) -> Self {
        Self {
            origin: query.origin.trim().to_string(),
            destination: query.destination.trim().to_string(),
            departure_date: query.departure_date.trim().to_string(),
            return_date: query.return_date.clone(),
            adults: query.adults,
            children: query.children,
            infants: query.infants,
        }
    }
}

/// Form submitted by the HTML page
///
/// `action` names the button that was pressed: `search`, `inc:<kind>` or
/// `dec:<kind>`. `faq` carries the open FAQ entry across posts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageForm {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default, rename = "departureDate")]
    pub departure_date: String,
    #[serde(default, rename = "returnDate")]
    pub return_date: String,
    // Wider than the query so oversized counts reach the stepper clamp
    #[serde(default = "default_page_adults")]
    pub adults: u16,
    #[serde(default)]
    pub children: u16,
    #[serde(default)]
    pub infants: u16,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub faq: Option<usize>,
}

fn default_page_adults() -> u16 {
    1
}

impl PageForm {
    /// Query carried by the form, with counts saturated to `u8`
    pub fn to_query(&self) -> FlightSearchQuery {
        let saturate = |count: u16| u8::try_from(count).unwrap_or(u8::MAX);
        FlightSearchQuery {
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            departure_date: self.departure_date.clone(),
            return_date: self.return_date.clone(),
            adults: saturate(self.adults),
            children: saturate(self.children),
            infants: saturate(self.infants),
        }
    }
}

/// Toggle state carried in the page URL
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageQuery {
    pub faq: Option<usize>,
    pub legal: Option<String>,
}
