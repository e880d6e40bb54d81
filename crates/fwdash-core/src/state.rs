//! Dashboard state and its update functions.
//!
//! The state is a plain value: callers take a [`Ticket`] before starting a
//! request and hand the completion back through [`DashboardState::apply`],
//! which returns the next state. A completion only lands if its ticket is
//! still the newest one of its kind, so a slow response to an old search
//! cannot overwrite the results of a newer one.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::aggregate::DashboardStats;
use crate::filters::{filter_by_experience, ExperienceFilter};
use crate::postings::JobPosting;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestKind {
    /// Total-match count for the current filters.
    Count,
    /// Full paginated posting fetch.
    Fetch,
}

/// Identifies one issued request. Generations increase per kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Ticket {
    pub kind: RequestKind,
    pub generation: u64,
}

/// Completion of a request started with [`DashboardState::issue`].
#[derive(Debug)]
pub enum StateUpdate {
    CountLoaded {
        ticket: Ticket,
        total: u64,
    },
    PostingsLoaded {
        ticket: Ticket,
        postings: Vec<JobPosting>,
        fetched_at: DateTime<Utc>,
    },
    FetchFailed {
        ticket: Ticket,
        message: String,
    },
}

impl StateUpdate {
    #[must_use]
    pub fn ticket(&self) -> Ticket {
        match self {
            StateUpdate::CountLoaded { ticket, .. }
            | StateUpdate::PostingsLoaded { ticket, .. }
            | StateUpdate::FetchFailed { ticket, .. } => *ticket,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    postings: Vec<JobPosting>,
    stats: DashboardStats,
    mission_count: Option<u64>,
    fetched_at: Option<DateTime<Utc>>,
    last_error: Option<String>,
    count_generation: u64,
    fetch_generation: u64,
}

impl DashboardState {
    /// Registers a new request and returns its ticket. Any ticket of the
    /// same kind issued earlier becomes stale.
    #[must_use]
    pub fn issue(mut self, kind: RequestKind) -> (Self, Ticket) {
        let generation = match kind {
            RequestKind::Count => {
                self.count_generation += 1;
                self.count_generation
            }
            RequestKind::Fetch => {
                self.fetch_generation += 1;
                self.fetch_generation
            }
        };
        (self, Ticket { kind, generation })
    }

    /// Whether `ticket` is the newest issued ticket of its kind.
    #[must_use]
    pub fn is_current(&self, ticket: Ticket) -> bool {
        let latest = match ticket.kind {
            RequestKind::Count => self.count_generation,
            RequestKind::Fetch => self.fetch_generation,
        };
        ticket.generation == latest
    }

    /// Applies a completion. Stale completions leave the state untouched.
    ///
    /// A successful fetch swaps in the new postings and recomputes every
    /// chart series. A failed fetch keeps the previous postings and stats
    /// and records the error message.
    #[must_use]
    pub fn apply(mut self, update: StateUpdate) -> Self {
        let ticket = update.ticket();
        if !self.is_current(ticket) {
            tracing::debug!(
                kind = ?ticket.kind,
                generation = ticket.generation,
                "dropping stale completion"
            );
            return self;
        }

        match update {
            StateUpdate::CountLoaded { total, .. } => {
                self.mission_count = Some(total);
            }
            StateUpdate::PostingsLoaded {
                postings,
                fetched_at,
                ..
            } => {
                self.stats = DashboardStats::compute(&postings);
                self.postings = postings;
                self.fetched_at = Some(fetched_at);
                self.last_error = None;
            }
            StateUpdate::FetchFailed { message, .. } => {
                self.last_error = Some(message);
            }
        }
        self
    }

    #[must_use]
    pub fn postings(&self) -> &[JobPosting] {
        &self.postings
    }

    /// Postings passing the experience checkboxes, in fetch order.
    #[must_use]
    pub fn visible_postings(&self, flags: &ExperienceFilter) -> Vec<&JobPosting> {
        filter_by_experience(&self.postings, flags)
    }

    #[must_use]
    pub fn stats(&self) -> &DashboardStats {
        &self.stats
    }

    #[must_use]
    pub fn mission_count(&self) -> Option<u64> {
        self.mission_count
    }

    #[must_use]
    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    #[must_use]
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }
}
