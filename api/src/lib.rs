pub mod catalog;
pub mod draft;
pub mod ingest;
pub mod status;
pub mod timeline;
pub mod wire;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub use status::{ColorTag, StatusIcon, StatusInfo, format_duration, resolve_status};

// ---------------------------------------------------------------------------
// Domain types: clean model, independent of the events API wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Tournament {
    pub id: u64,
    pub name: String,
    pub description: Option<String>,
    pub organizer: String,
    pub icon_path: Option<String>,
    pub tags: Vec<String>,
    /// Tag-driven flag; recommended events are shown in the featured strip.
    pub recommended: bool,
    pub registrations: Vec<Registration>,
    pub schedule: Schedule,
}

impl Tournament {
    pub fn description_or_default(&self) -> &str {
        self.description
            .as_deref()
            .filter(|d| !d.trim().is_empty())
            .unwrap_or("No description provided")
    }

    pub fn status(&self, now: DateTime<Utc>) -> StatusInfo {
        resolve_status(&self.schedule, now)
    }
}

/// Everything the status resolver needs about an event's timing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub phases: Vec<Phase>,
    /// Only the first window is consulted, and only when there are no phases.
    pub registration_windows: Vec<RegistrationWindow>,
}

impl Schedule {
    pub fn new(phases: Vec<Phase>, registration_windows: Vec<RegistrationWindow>) -> Self {
        Self { phases, registration_windows }
    }

    pub fn is_empty(&self) -> bool {
        self.phases.is_empty() && self.registration_windows.is_empty()
    }

    /// Phases ordered by start time. Stable, so equal starts keep input order.
    pub fn sorted_phases(&self) -> Vec<&Phase> {
        let mut sorted: Vec<&Phase> = self.phases.iter().collect();
        sorted.sort_by_key(|p| p.start_time);
        sorted
    }
}

/// One stage of a tournament (qualifiers, playoffs, finals...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    pub name: String,
    pub start_time: DateTime<Utc>,
    /// None = open-ended phase.
    pub end_time: Option<DateTime<Utc>>,
}

impl Phase {
    pub fn new(
        name: impl Into<String>,
        start_time: DateTime<Utc>,
        end_time: Option<DateTime<Utc>>,
    ) -> Self {
        Self { name: name.into(), start_time, end_time }
    }

    /// Closed on both ends; an open-ended phase contains everything after its start.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && self.end_time.is_none_or(|end| now <= end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationWindow {
    pub start_date: DateTime<Utc>,
    pub registration_deadline: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registration {
    pub participant: Option<String>,
    pub registered_at: Option<DateTime<Utc>>,
}

impl Registration {
    pub fn display_name(&self, index: usize) -> String {
        self.participant
            .clone()
            .unwrap_or_else(|| format!("Participant {}", index + 1))
    }
}
