//! Per-view fetch state.
//!
//! A view is fetched once when it becomes active. Its result lands in a
//! [`FetchSlot`], which only accepts the result of the most recent fetch and
//! nothing at all once the view has been closed.

use crate::patient::Patient;
use crate::record::MedicalRecord;
use crate::workflow::PatientWorkflow;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FetchState<T> {
    Loading,
    Error {
        message: String,
    },
    Ready {
        data: T,
    },
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        FetchState::Loading
    }
}

impl<T> FetchState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            FetchState::Ready { data } => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Error { message } => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> FetchState<U> {
        match self {
            FetchState::Loading => FetchState::Loading,
            FetchState::Error { message } => FetchState::Error { message },
            FetchState::Ready { data } => FetchState::Ready { data: f(data) },
        }
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for FetchState<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => FetchState::Ready { data },
            Err(e) => FetchState::Error {
                message: e.to_string(),
            },
        }
    }
}

/// Handle for one in-flight fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket {
    generation: u64,
}

#[derive(Debug, Clone)]
pub struct FetchSlot<T> {
    state: FetchState<T>,
    generation: u64,
    live: bool,
}

impl<T> Default for FetchSlot<T> {
    fn default() -> Self {
        Self {
            state: FetchState::Loading,
            generation: 0,
            live: true,
        }
    }
}

impl<T> FetchSlot<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FetchState<T> {
        &self.state
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    /// Start a fetch. Any ticket handed out earlier is now stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = FetchState::Loading;
        Ticket {
            generation: self.generation,
        }
    }

    /// Store a fetch result. Returns false (and drops the result) when the
    /// ticket is stale or the slot has been closed.
    pub fn resolve<E: std::fmt::Display>(&mut self, ticket: Ticket, result: Result<T, E>) -> bool {
        if !self.live || ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                current = self.generation,
                live = self.live,
                "dropping late fetch result"
            );
            return false;
        }
        if let Err(e) = &result {
            tracing::warn!(error = %e, "fetch failed");
        }
        self.state = FetchState::from(result);
        true
    }

    /// Tear the view down; later results are ignored.
    pub fn close(&mut self) {
        self.live = false;
    }
}

// ---------------------------------------------------------------------------
// DashboardViews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Patients,
    Records,
    Workflows,
}

impl ViewKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ViewKind::Patients => "patients",
            ViewKind::Records => "medical records",
            ViewKind::Workflows => "workflows",
        }
    }
}

/// Fetch slots for the fetched dashboard views.
#[derive(Debug, Clone, Default)]
pub struct DashboardViews {
    pub patients: FetchSlot<Vec<Patient>>,
    pub records: FetchSlot<Vec<MedicalRecord>>,
    pub workflows: FetchSlot<Vec<PatientWorkflow>>,
}

impl DashboardViews {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close_all(&mut self) {
        self.patients.close();
        self.records.close();
        self.workflows.close();
    }
}
