use thiserror::Error;
use validator::Validate;

use crate::models::{FlightSearchQuery, PassengerKind, SearchRequest};

/// Message shown when a required field is missing
pub const MISSING_FIELDS_MESSAGE: &str = "Por favor, informe a Origem, o Destino e a Data de Ida.";

/// Message shown when a search carries no adult
pub const ADULTS_REQUIRED_MESSAGE: &str = "Informe ao menos um passageiro adulto.";

/// Upper bound for any single passenger stepper
pub const DEFAULT_MAX_PER_KIND: u8 = 9;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FormError {
    #[error("Por favor, informe a Origem, o Destino e a Data de Ida.")]
    MissingFields,

    #[error("unknown form action: {0}")]
    UnknownAction(String),
}

/// Search form contents as edited by the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchForm {
    pub query: FlightSearchQuery,
}

impl Default for SearchForm {
    fn default() -> Self {
        Self {
            query: FlightSearchQuery {
                origin: String::new(),
                destination: String::new(),
                departure_date: String::new(),
                return_date: String::new(),
                adults: PassengerKind::Adults.minimum(),
                children: PassengerKind::Children.minimum(),
                infants: PassengerKind::Infants.minimum(),
            },
        }
    }
}

impl SearchForm {
    pub fn new(query: FlightSearchQuery) -> Self {
        // Submitted counts go through the same clamp as the steppers
        let mut form = Self { query };
        for kind in PassengerKind::ALL {
            form = form.update_passenger(kind, 0, u8::MAX);
        }
        form
    }

    pub fn count(&self, kind: PassengerKind) -> u8 {
        match kind {
            PassengerKind::Adults => self.query.adults,
            PassengerKind::Children => self.query.children,
            PassengerKind::Infants => self.query.infants,
        }
    }

    /// Apply a stepper click, clamping to `[kind.minimum(), max]`
    pub fn update_passenger(&self, kind: PassengerKind, delta: i16, max: u8) -> Self {
        let max = max.max(kind.minimum());
        let next = (self.count(kind) as i16)
            .saturating_add(delta)
            .clamp(kind.minimum() as i16, max as i16) as u8;

        let mut query = self.query.clone();
        match kind {
            PassengerKind::Adults => query.adults = next,
            PassengerKind::Children => query.children = next,
            PassengerKind::Infants => query.infants = next,
        }
        Self { query }
    }

    /// Check the required fields and produce the query to submit
    pub fn validate(&self) -> Result<FlightSearchQuery, FormError> {
        let request = SearchRequest::from(&self.query);
        request.validate().map_err(|errors| {
            tracing::debug!("Search form rejected: {}", errors);
            FormError::MissingFields
        })?;
        Ok(request.to_query())
    }
}

/// Button pressed on the page form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    Search,
    Increment(PassengerKind),
    Decrement(PassengerKind),
}

impl FormAction {
    /// Parse `search`, `inc:<kind>` or `dec:<kind>`; an empty action is a search
    pub fn parse(value: &str) -> Result<Self, FormError> {
        let value = value.trim();
        if value.is_empty() || value == "search" {
            return Ok(Self::Search);
        }

        let unknown = || FormError::UnknownAction(value.to_string());
        let (op, kind) = value.split_once(':').ok_or_else(unknown)?;
        let kind = PassengerKind::parse(kind).ok_or_else(unknown)?;

        match op {
            "inc" => Ok(Self::Increment(kind)),
            "dec" => Ok(Self::Decrement(kind)),
            _ => Err(unknown()),
        }
    }
}
