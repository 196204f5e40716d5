//! Status badge resolution: turns a schedule plus a caller-supplied "now"
//! into the short label shown next to every tournament.
//!
//! Nothing here reads a clock. Callers snapshot `now` once per refresh and
//! pass the same instant for every row so countdowns stay consistent.

use crate::{Phase, Schedule};
use chrono::{DateTime, Duration, Utc};

const MS_PER_MINUTE: i64 = 1000 * 60;
const MS_PER_HOUR: i64 = MS_PER_MINUTE * 60;
const MS_PER_DAY: i64 = MS_PER_HOUR * 24;

/// A deadline closer than this is flagged urgent.
pub const URGENT_WINDOW: Duration = Duration::milliseconds(MS_PER_DAY);

/// Semantic colour of a badge. Mapping to real colours is the renderer's job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorTag {
    Blue,
    Green,
    Orange,
    Yellow,
    Grey,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusIcon {
    Finished,
    Urgent,
    Clock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub text: String,
    pub color: ColorTag,
    pub urgent: bool,
    pub finished: bool,
}

impl StatusInfo {
    fn new(text: impl Into<String>, color: ColorTag) -> Self {
        Self { text: text.into(), color, urgent: false, finished: false }
    }

    fn urgent(mut self, urgent: bool) -> Self {
        self.urgent = urgent;
        self
    }

    /// Finished wins over urgent; everything else gets the clock.
    pub fn icon(&self) -> StatusIcon {
        if self.finished {
            StatusIcon::Finished
        } else if self.urgent {
            StatusIcon::Urgent
        } else {
            StatusIcon::Clock
        }
    }
}

/// Countdown from `now` to `target`: "2d 4h", "3h 12m", "45m". Past targets give "0m".
pub fn format_duration(now: DateTime<Utc>, target: DateTime<Utc>) -> String {
    if target <= now {
        return "0m".to_string();
    }

    let diff = (target - now).num_milliseconds();
    let days = diff / MS_PER_DAY;
    let hours = (diff % MS_PER_DAY) / MS_PER_HOUR;
    let minutes = (diff % MS_PER_HOUR) / MS_PER_MINUTE;

    if days > 0 {
        format!("{days}d {hours}h")
    } else if hours > 0 {
        format!("{hours}h {minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn within_urgent_window(now: DateTime<Utc>, deadline: DateTime<Utc>) -> bool {
    deadline - now < URGENT_WINDOW
}

/// Resolve the badge for a schedule at `now`.
///
/// Priority:
///   1. no phases, registration window open or upcoming → "Reg in" / "Reg ends"
///   2. no phases otherwise → "Date TBA"
///   3. before the first phase → "Starts in"
///   4. after the last phase's end → "Finished"
///   5. inside a phase → "Ends in" / "Ongoing"
///   6. between phases → "Next:"
pub fn resolve_status(schedule: &Schedule, now: DateTime<Utc>) -> StatusInfo {
    if schedule.phases.is_empty() {
        return resolve_registration(schedule, now)
            .unwrap_or_else(|| StatusInfo::new("Date TBA", ColorTag::Grey));
    }

    let sorted = schedule.sorted_phases();
    let (Some(first), Some(last)) = (sorted.first(), sorted.last()) else {
        return StatusInfo::new("Date TBA", ColorTag::Grey);
    };

    if now < first.start_time {
        return StatusInfo::new(
            format!("Starts in {}", format_duration(now, first.start_time)),
            ColorTag::Blue,
        );
    }

    if let Some(last_end) = last.end_time
        && now > last_end
    {
        let mut info = StatusInfo::new("Finished", ColorTag::Grey);
        info.finished = true;
        return info;
    }

    if let Some(active) = sorted.iter().find(|p| p.contains(now)) {
        return resolve_active(active, now);
    }

    if let Some(next) = sorted.iter().find(|p| p.start_time > now) {
        return StatusInfo::new(
            format!("Next: {}", format_duration(now, next.start_time)),
            ColorTag::Yellow,
        );
    }

    StatusInfo::new("Ongoing", ColorTag::Green)
}

fn resolve_registration(schedule: &Schedule, now: DateTime<Utc>) -> Option<StatusInfo> {
    let window = schedule.registration_windows.first()?;

    if now < window.start_date {
        return Some(StatusInfo::new(
            format!("Reg in {}", format_duration(now, window.start_date)),
            ColorTag::Blue,
        ));
    }

    if now < window.registration_deadline {
        let info = StatusInfo::new(
            format!("Reg ends {}", format_duration(now, window.registration_deadline)),
            ColorTag::Green,
        );
        return Some(info.urgent(within_urgent_window(now, window.registration_deadline)));
    }

    // Deadline passed: the window no longer governs the badge.
    None
}

fn resolve_active(active: &Phase, now: DateTime<Utc>) -> StatusInfo {
    let Some(end) = active.end_time else {
        return StatusInfo::new("Ongoing", ColorTag::Green);
    };

    let urgent = within_urgent_window(now, end);
    let color = if urgent { ColorTag::Orange } else { ColorTag::Green };
    StatusInfo::new(format!("Ends in {}", format_duration(now, end)), color).urgent(urgent)
}
