use crate::core::content::{LegalDoc, FAQS};
use crate::core::form::{FormAction, SearchForm, DEFAULT_MAX_PER_KIND};
use crate::models::{FlightSearchQuery, PassengerKind, SearchResponse};
use crate::services::search::SearchError;

/// Identifies one submission; only the latest one may resolve the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket(u64);

/// Search lifecycle: `Idle -> Submitting -> {Success, Failure}`
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Submitting { ticket: SearchTicket },
    Success(SearchResponse),
    Failure(String),
}

/// Immutable page state; every transition returns a new value
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    pub form: SearchForm,
    pub phase: Phase,
    pub open_faq: Option<usize>,
    pub legal: Option<LegalDoc>,
    generation: u64,
    max_per_kind: u8,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new(SearchForm::default(), DEFAULT_MAX_PER_KIND)
    }
}

impl ViewState {
    pub fn new(form: SearchForm, max_per_kind: u8) -> Self {
        Self {
            form,
            phase: Phase::Idle,
            open_faq: None,
            legal: None,
            generation: 0,
            max_per_kind,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.phase, Phase::Submitting { .. })
    }

    pub fn results(&self) -> Option<&SearchResponse> {
        match &self.phase {
            Phase::Success(response) => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failure(message) => Some(message),
            _ => None,
        }
    }

    pub fn edit(self, form: SearchForm) -> Self {
        Self { form, ..self }
    }

    pub fn adjust_passenger(self, kind: PassengerKind, delta: i16) -> Self {
        let form = self.form.update_passenger(kind, delta, self.max_per_kind);
        Self { form, ..self }
    }

    /// Open entry `index`, or collapse it when it is already open
    pub fn toggle_faq(self, index: usize) -> Self {
        if index >= FAQS.len() {
            return self;
        }
        let open_faq = if self.open_faq == Some(index) { None } else { Some(index) };
        Self { open_faq, ..self }
    }

    pub fn open_legal(self, doc: LegalDoc) -> Self {
        Self { legal: Some(doc), ..self }
    }

    pub fn close_legal(self) -> Self {
        Self { legal: None, ..self }
    }

    /// Start a search
    ///
    /// A form missing its required fields moves to `Failure` and yields no
    /// ticket. A new submission supersedes any search still in flight.
    pub fn submit(self) -> (Self, Option<(SearchTicket, FlightSearchQuery)>) {
        match self.form.validate() {
            Err(e) => {
                let state = Self { phase: Phase::Failure(e.to_string()), ..self };
                (state, None)
            }
            Ok(query) => {
                let generation = self.generation + 1;
                let ticket = SearchTicket(generation);
                let state = Self {
                    phase: Phase::Submitting { ticket },
                    generation,
                    ..self
                };
                (state, Some((ticket, query)))
            }
        }
    }

    /// Apply the outcome of the search identified by `ticket`
    ///
    /// Outcomes of superseded searches are dropped.
    pub fn resolve(self, ticket: SearchTicket, outcome: Result<SearchResponse, SearchError>) -> Self {
        if self.phase != (Phase::Submitting { ticket }) {
            tracing::debug!("Discarding stale search result for ticket {:?}", ticket);
            return self;
        }

        let phase = match outcome {
            Ok(response) => Phase::Success(response),
            Err(e) => Phase::Failure(e.user_message().to_string()),
        };
        Self { phase, ..self }
    }

    /// Apply a stepper click; searches are driven through [`Self::submit`]
    pub fn apply_action(self, action: FormAction) -> Self {
        match action {
            FormAction::Increment(kind) => self.adjust_passenger(kind, 1),
            FormAction::Decrement(kind) => self.adjust_passenger(kind, -1),
            FormAction::Search => self,
        }
    }
}
