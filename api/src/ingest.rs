use crate::wire::{RawEvent, RawInstant, RawRegistration, RawState, RawTag};
use crate::{Phase, Registration, RegistrationWindow, Schedule, Tournament};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde_json::Value;
use std::fmt;

const DEFAULT_PHASE_NAME: &str = "Stage";
const DEFAULT_ORGANIZER: &str = "Unknown";
const DEFAULT_EVENT_NAME: &str = "Untitled";

/// Why an event was refused at the boundary. Carries enough context to log
/// and to show in the UI's rejected count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestError {
    /// Event name if present, otherwise `#id`, otherwise `<unnamed>`.
    pub event: String,
    pub kind: IngestErrorKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestErrorKind {
    MissingId,
    DuplicateId(u64),
    MissingStart { field: String },
    InvalidTimestamp { field: String, value: String },
    /// The item does not have the shape of an event at all.
    Malformed { reason: String },
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IngestErrorKind::MissingId => write!(f, "event {} has no id", self.event),
            IngestErrorKind::DuplicateId(id) => {
                write!(f, "event {}: id #{id} already used", self.event)
            }
            IngestErrorKind::MissingStart { field } => {
                write!(f, "event {}: {field} is required", self.event)
            }
            IngestErrorKind::InvalidTimestamp { field, value } => {
                write!(f, "event {}: {field} is not a timestamp: {value}", self.event)
            }
            IngestErrorKind::Malformed { reason } => {
                write!(f, "event {} is malformed: {reason}", self.event)
            }
        }
    }
}

impl std::error::Error for IngestError {}

/// Parse an API timestamp.
///
/// Accepted: RFC 3339 (`2026-03-14T12:00:00Z`, `...+02:00`), naive
/// `YYYY-MM-DDTHH:MM[:SS[.fff]]` (also with a space separator) and bare
/// `YYYY-MM-DD`. Naive values are taken as UTC.
pub fn parse_instant(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    const NAIVE_FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];
    if let Some(naive) = NAIVE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
    {
        return Some(naive.and_utc());
    }

    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Display name of a phase. The only place that knows about the legacy keys.
///
/// Order: `eventStateName`, `stateName`, `name`, `status` (as strings), then
/// `eventStateName.{eventStateName,name,stateName}` and
/// `eventStates.{eventStateName,name}` when those are objects.
pub fn phase_name(state: &RawState) -> String {
    fn text(value: Option<&Value>) -> Option<&str> {
        value.and_then(Value::as_str).filter(|s| !s.trim().is_empty())
    }

    fn nested<'a>(value: Option<&'a Value>, keys: &[&str]) -> Option<&'a str> {
        let obj = value?.as_object()?;
        keys.iter().find_map(|k| text(obj.get(*k)))
    }

    text(state.event_state_name.as_ref())
        .or_else(|| text(state.state_name.as_ref()))
        .or_else(|| text(state.name.as_ref()))
        .or_else(|| text(state.status.as_ref()))
        .or_else(|| {
            nested(
                state.event_state_name.as_ref(),
                &["eventStateName", "name", "stateName"],
            )
        })
        .or_else(|| nested(state.event_states.as_ref(), &["eventStateName", "name"]))
        .unwrap_or(DEFAULT_PHASE_NAME)
        .to_string()
}

/// Type one item of the listing. A shape error names the event when it can.
pub fn decode_event(value: Value) -> Result<RawEvent, IngestError> {
    let label = value_label(&value);
    serde_json::from_value(value).map_err(|e| IngestError {
        event: label,
        kind: IngestErrorKind::Malformed { reason: e.to_string() },
    })
}

/// `decode_event` followed by `map_event`.
pub fn ingest_event(value: Value) -> Result<Tournament, IngestError> {
    map_event(decode_event(value)?)
}

/// Same labelling as a typed event, read straight off the JSON.
pub fn value_label(value: &Value) -> String {
    fn field<'a>(value: &'a Value, keys: [&str; 2]) -> Option<&'a Value> {
        keys.iter().find_map(|k| value.get(*k).filter(|v| !v.is_null()))
    }

    if let Some(name) = field(value, ["eventName", "name"])
        .and_then(Value::as_str)
        .filter(|n| !n.trim().is_empty())
    {
        return name.to_string();
    }
    match field(value, ["eventId", "id"]) {
        Some(Value::String(id)) => format!("#{id}"),
        Some(id) => format!("#{id}"),
        None => "<unnamed>".to_string(),
    }
}

/// Map a raw API event into the canonical `Tournament`.
///
/// Timestamps are all-or-nothing: one unreadable value rejects the event
/// rather than letting it resolve against a half-empty schedule.
pub fn map_event(raw: RawEvent) -> Result<Tournament, IngestError> {
    let label = event_label(&raw);
    let fail = |kind: IngestErrorKind| IngestError { event: label.clone(), kind };

    let id = raw.event_id.ok_or_else(|| fail(IngestErrorKind::MissingId))?;

    let phases = raw
        .event_states
        .unwrap_or_default()
        .iter()
        .enumerate()
        .map(|(i, state)| map_state(i, state).map_err(&fail))
        .collect::<Result<Vec<_>, _>>()?;

    let mut registrations = Vec::new();
    let mut registration_windows = Vec::new();
    for (i, reg) in raw.event_registration.unwrap_or_default().iter().enumerate() {
        let (registration, window) = map_registration(i, reg).map_err(&fail)?;
        registrations.push(registration);
        registration_windows.extend(window);
    }

    let organizer = raw
        .organizer
        .and_then(|o| o.nickname)
        .filter(|n| !n.trim().is_empty())
        .or(raw.organizer_name.filter(|n| !n.trim().is_empty()))
        .unwrap_or_else(|| DEFAULT_ORGANIZER.to_string());

    let tags = raw
        .event_tags
        .unwrap_or_default()
        .into_iter()
        .filter_map(map_tag)
        .collect();

    Ok(Tournament {
        id,
        name: raw
            .event_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_EVENT_NAME.to_string()),
        description: raw.event_description,
        organizer,
        icon_path: raw.icon_path.filter(|p| !p.is_empty()),
        tags,
        recommended: raw.recommended,
        registrations,
        schedule: Schedule::new(phases, registration_windows),
    })
}

fn event_label(raw: &RawEvent) -> String {
    match (&raw.event_name, raw.event_id) {
        (Some(name), _) if !name.trim().is_empty() => name.clone(),
        (_, Some(id)) => format!("#{id}"),
        _ => "<unnamed>".to_string(),
    }
}

fn map_tag(tag: RawTag) -> Option<String> {
    let name = match tag {
        RawTag::Name(name) => Some(name),
        RawTag::Object { event_tag_name, name } => event_tag_name.or(name),
    };
    name.filter(|t| !t.trim().is_empty())
}

fn map_state(index: usize, state: &RawState) -> Result<Phase, IngestErrorKind> {
    let start_field = format!("eventStates[{index}].startTime");
    let start_time = read_instant(state.start_time.as_ref(), &start_field)?
        .ok_or(IngestErrorKind::MissingStart { field: start_field })?;
    let end_time = read_instant(
        state.end_time.as_ref(),
        &format!("eventStates[{index}].endTime"),
    )?;

    Ok(Phase { name: phase_name(state), start_time, end_time })
}

fn map_registration(
    index: usize,
    reg: &RawRegistration,
) -> Result<(Registration, Option<RegistrationWindow>), IngestErrorKind> {
    let field = |name: &str| format!("eventRegistration[{index}].{name}");

    let start_date = read_instant(reg.start_date.as_ref(), &field("startDate"))?;
    let deadline = read_instant(reg.registration_deadline.as_ref(), &field("registrationDeadline"))?;
    let registered_at = read_instant(reg.registration_date.as_ref(), &field("registrationDate"))?;

    let window = match (start_date, deadline) {
        (Some(start_date), Some(registration_deadline)) => {
            Some(RegistrationWindow { start_date, registration_deadline })
        }
        _ => None,
    };

    let participant = reg
        .participant_name
        .clone()
        .or_else(|| reg.team_name.clone())
        .filter(|n| !n.trim().is_empty());

    Ok((Registration { participant, registered_at }, window))
}

/// `Ok(None)` for a missing or blank value, `Err` for anything unreadable.
fn read_instant(
    raw: Option<&RawInstant>,
    field: &str,
) -> Result<Option<DateTime<Utc>>, IngestErrorKind> {
    let invalid = |value: &RawInstant| IngestErrorKind::InvalidTimestamp {
        field: field.to_string(),
        value: value.to_string(),
    };

    let Some(value) = raw else {
        return Ok(None);
    };
    let parsed = match value {
        RawInstant::Text(s) if s.trim().is_empty() => return Ok(None),
        RawInstant::Text(s) => parse_instant(s),
        RawInstant::Millis(ms) => DateTime::from_timestamp_millis(*ms),
        RawInstant::Other(_) => None,
    };
    parsed.map(Some).ok_or_else(|| invalid(value))
}
