use serde::{Deserialize, Serialize};

/// Flight search parameters collected from the search form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightSearchQuery {
    pub origin: String,
    pub destination: String,
    #[serde(rename = "departureDate")]
    pub departure_date: String,
    /// Empty for one-way trips
    #[serde(rename = "returnDate", default)]
    pub return_date: String,
    pub adults: u8,
    #[serde(default)]
    pub children: u8,
    /// Lap infants, under 2 years
    #[serde(default)]
    pub infants: u8,
}

impl FlightSearchQuery {
    pub fn is_one_way(&self) -> bool {
        self.return_date.trim().is_empty()
    }

    pub fn total_passengers(&self) -> u16 {
        self.adults as u16 + self.children as u16 + self.infants as u16
    }
}

/// Passenger categories controlled by the form steppers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PassengerKind {
    Adults,
    Children,
    Infants,
}

impl PassengerKind {
    pub const ALL: [PassengerKind; 3] = [Self::Adults, Self::Children, Self::Infants];

    /// Lowest count a stepper may reach
    pub fn minimum(self) -> u8 {
        match self {
            Self::Adults => 1,
            Self::Children | Self::Infants => 0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Adults => "adults",
            Self::Children => "children",
            Self::Infants => "infants",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.to_lowercase().as_str() {
            "adults" => Some(Self::Adults),
            "children" => Some(Self::Children),
            "infants" => Some(Self::Infants),
            _ => None,
        }
    }
}

/// Category of a deal returned by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DealType {
    CheapestCash,
    CheapestMiles,
    MostExpensive,
}

impl DealType {
    /// Display order of the result cards
    pub const ALL: [DealType; 3] = [Self::CheapestCash, Self::CheapestMiles, Self::MostExpensive];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::CheapestCash => "cheapest_cash",
            Self::CheapestMiles => "cheapest_miles",
            Self::MostExpensive => "most_expensive",
        }
    }
}

/// One candidate flight offer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightDeal {
    #[serde(rename = "type")]
    pub deal_type: DealType,
    pub airline: String,
    pub price: String,
    #[serde(default)]
    pub currency: String,
    pub description: String,
    #[serde(rename = "howToBuy")]
    pub how_to_buy: String,
    pub link: String,
    #[serde(rename = "isTotalWithTaxes")]
    pub is_total_with_taxes: bool,
}

/// Web page the model cited while grounding its answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GroundingChunk {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web: Option<WebSource>,
}

/// Parsed and validated search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub deals: Vec<FlightDeal>,
    pub summary: String,
    #[serde(rename = "groundingChunks", default, skip_serializing_if = "Option::is_none")]
    pub grounding_chunks: Option<Vec<GroundingChunk>>,
}

impl SearchResponse {
    pub fn deal(&self, deal_type: DealType) -> Option<&FlightDeal> {
        self.deals.iter().find(|d| d.deal_type == deal_type)
    }

    /// Cited web pages that carry a URI
    pub fn sources(&self) -> impl Iterator<Item = &WebSource> {
        self.grounding_chunks
            .iter()
            .flatten()
            .filter_map(|chunk| chunk.web.as_ref())
            .filter(|web| !web.uri.is_empty())
    }
}
