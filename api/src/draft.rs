use crate::wire::{NewEventPayload, NewEventState};
use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    MissingName,
    PhaseOutOfRange(usize),
}

impl fmt::Display for DraftError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftError::MissingName => write!(f, "Event name is required"),
            DraftError::PhaseOutOfRange(index) => write!(f, "No phase at position {index}"),
        }
    }
}

impl std::error::Error for DraftError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftPhase {
    pub name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
}

/// Form state for a tournament that has not been created yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventDraft {
    pub name: String,
    pub description: String,
    pub icon_path: Option<String>,
    pub organizer: String,
    pub tags: Vec<String>,
    pub phases: Vec<DraftPhase>,
}

impl Default for EventDraft {
    fn default() -> Self {
        Self {
            name: "New Tournament".to_string(),
            description: "Describe your tournament here...".to_string(),
            icon_path: None,
            organizer: "You".to_string(),
            tags: Vec::new(),
            phases: Vec::new(),
        }
    }
}

impl EventDraft {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_phase(&mut self, name: impl Into<String>) -> usize {
        self.phases.push(DraftPhase { name: name.into(), start_time: None, end_time: None });
        self.phases.len() - 1
    }

    pub fn remove_phase(&mut self, index: usize) -> Result<DraftPhase, DraftError> {
        if index >= self.phases.len() {
            return Err(DraftError::PhaseOutOfRange(index));
        }
        Ok(self.phases.remove(index))
    }

    pub fn set_phase_start(
        &mut self,
        index: usize,
        start: Option<DateTime<Utc>>,
    ) -> Result<(), DraftError> {
        self.phase_mut(index)?.start_time = start;
        Ok(())
    }

    pub fn set_phase_end(
        &mut self,
        index: usize,
        end: Option<DateTime<Utc>>,
    ) -> Result<(), DraftError> {
        self.phase_mut(index)?.end_time = end;
        Ok(())
    }

    fn phase_mut(&mut self, index: usize) -> Result<&mut DraftPhase, DraftError> {
        self.phases
            .get_mut(index)
            .ok_or(DraftError::PhaseOutOfRange(index))
    }

    pub fn validate(&self) -> Result<(), DraftError> {
        if self.name.trim().is_empty() {
            return Err(DraftError::MissingName);
        }
        Ok(())
    }

    /// Build the create payload. Only the name is mandatory; unscheduled
    /// phases are sent with empty times.
    pub fn to_payload(&self) -> Result<NewEventPayload, DraftError> {
        self.validate()?;

        let stamp = |t: Option<DateTime<Utc>>| {
            t.map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
                .unwrap_or_default()
        };

        Ok(NewEventPayload {
            event_name: self.name.clone(),
            event_description: self.description.clone(),
            icon_path: self.icon_path.clone().unwrap_or_default(),
            organizer_name: self.organizer.clone(),
            event_tags: self.tags.clone(),
            event_states: self
                .phases
                .iter()
                .map(|p| NewEventState {
                    event_state_name: p.name.clone(),
                    start_time: stamp(p.start_time),
                    end_time: stamp(p.end_time),
                })
                .collect(),
        })
    }
}
