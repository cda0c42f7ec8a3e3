//! Form state and the guard that keeps stale responses off the display.

use crate::core::query::{SearchCriteria, SearchField};
use crate::error::ValidationError;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};

pub const SAMPLE_AUTHOR: &str = "shakespeare";
pub const SAMPLE_TITLE: &str = "Sonnet";
pub const SAMPLE_LINES: &str = "turn'd";

/// The three free-text search fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchForm {
    pub author: String,
    pub title: String,
    pub lines: String,
}

impl SearchForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sample() -> Self {
        let mut form = Self::new();
        form.fill_sample();
        form
    }

    pub fn fill_sample(&mut self) {
        self.author = SAMPLE_AUTHOR.to_string();
        self.title = SAMPLE_TITLE.to_string();
        self.lines = SAMPLE_LINES.to_string();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        [&self.author, &self.title, &self.lines]
            .iter()
            .all(|value| value.trim().is_empty())
    }

    /// Only author, title and lines are form fields.
    pub fn set(&mut self, field: SearchField, value: &str) -> Result<(), ValidationError> {
        let slot = match field {
            SearchField::Author => &mut self.author,
            SearchField::Title => &mut self.title,
            SearchField::Lines => &mut self.lines,
            other => {
                return Err(ValidationError::UnknownField {
                    name: other.to_string(),
                });
            }
        };
        *slot = value.to_string();
        Ok(())
    }

    pub fn criteria(&self) -> SearchCriteria {
        SearchCriteria::from_form(&self.author, &self.title, &self.lines)
    }
}

/// Identifies one issued action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Monotonic request counter. A result may be shown only while its ticket is
/// the latest one issued.
#[derive(Debug, Default)]
pub struct ActionTracker {
    latest: AtomicU64,
}

impl ActionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self) -> Ticket {
        Ticket(self.latest.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: Ticket) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket.0
    }

    /// Pass `value` through if `ticket` is still current, drop it otherwise.
    pub fn commit<T>(&self, ticket: Ticket, value: T) -> Option<T> {
        if self.is_current(ticket) {
            Some(value)
        } else {
            tracing::debug!(
                ticket = ticket.0,
                latest = self.latest.load(Ordering::SeqCst),
                "dropping stale result"
            );
            None
        }
    }
}
