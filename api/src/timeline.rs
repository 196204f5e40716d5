use crate::Schedule;
use chrono::{DateTime, TimeZone, Utc};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhaseState {
    Past,
    Current,
    Upcoming,
}

impl PhaseState {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseState::Past => "done",
            PhaseState::Current => "NOW",
            PhaseState::Upcoming => "",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    pub name: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub state: PhaseState,
}

/// Phases in start order, each tagged relative to `now`.
///
/// A phase is past only once its end is strictly behind `now`; an open-ended
/// phase that has started stays current forever.
pub fn timeline(schedule: &Schedule, now: DateTime<Utc>) -> Vec<TimelineEntry> {
    schedule
        .sorted_phases()
        .into_iter()
        .map(|phase| {
            let is_past = phase.end_time.is_some_and(|end| end < now);
            let state = if is_past {
                PhaseState::Past
            } else if phase.start_time <= now {
                PhaseState::Current
            } else {
                PhaseState::Upcoming
            };
            TimelineEntry {
                name: phase.name.clone(),
                start_time: phase.start_time,
                end_time: phase.end_time,
                state,
            }
        })
        .collect()
}

/// "dd.mm.yyyy, HH:MM" in the viewer's zone.
pub fn format_full_date<Tz>(instant: DateTime<Utc>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.with_timezone(tz).format("%d.%m.%Y, %H:%M").to_string()
}

pub fn format_full_date_opt<Tz>(instant: Option<DateTime<Utc>>, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    instant.map_or_else(|| "...".to_string(), |i| format_full_date(i, tz))
}
