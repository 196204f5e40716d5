/// Events API raw wire types: serde shapes for the `/api/events` JSON.
/// These map to the clean domain types via `ingest::map_event`.
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Event listing
// ---------------------------------------------------------------------------

/// The listing endpoint returns either a bare array or a Spring-style page.
///
/// Items stay untyped here so one malformed event cannot sink the whole
/// listing; `ingest::decode_event` types them one by one.
#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum EventsPayload {
    List(Vec<Value>),
    Page {
        #[serde(default)]
        content: Vec<Value>,
    },
}

impl EventsPayload {
    pub fn into_events(self) -> Vec<Value> {
        match self {
            EventsPayload::List(events) => events,
            EventsPayload::Page { content } => content,
        }
    }
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    #[serde(alias = "id")]
    pub event_id: Option<u64>,
    #[serde(alias = "name")]
    pub event_name: Option<String>,
    pub event_description: Option<String>,
    #[serde(rename = "IconPath")]
    pub icon_path: Option<String>,
    pub organizer: Option<RawOrganizer>,
    pub organizer_name: Option<String>,
    pub event_tags: Option<Vec<RawTag>>,
    pub event_states: Option<Vec<RawState>>,
    pub event_registration: Option<Vec<RawRegistration>>,
    #[serde(default)]
    pub recommended: bool,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RawOrganizer {
    pub nickname: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(untagged)]
pub enum RawTag {
    Name(String),
    Object {
        #[serde(rename = "eventTagName")]
        event_tag_name: Option<String>,
        name: Option<String>,
    },
}

/// A schedule phase. The backend has shipped the display name under several
/// keys over time, so those stay loosely typed until `ingest::phase_name`.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawState {
    pub start_time: Option<RawInstant>,
    pub end_time: Option<RawInstant>,
    pub event_state_name: Option<Value>,
    pub state_name: Option<Value>,
    pub name: Option<Value>,
    pub status: Option<Value>,
    pub event_states: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawRegistration {
    pub start_date: Option<RawInstant>,
    pub registration_deadline: Option<RawInstant>,
    pub registration_date: Option<RawInstant>,
    pub participant_name: Option<String>,
    pub team_name: Option<String>,
}

/// Timestamps arrive as ISO strings, occasionally as epoch milliseconds.
/// Anything else lands in `Other` and is rejected during ingestion.
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(untagged)]
pub enum RawInstant {
    Text(String),
    Millis(i64),
    Other(Value),
}

impl std::fmt::Display for RawInstant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RawInstant::Text(s) => write!(f, "{s:?}"),
            RawInstant::Millis(ms) => write!(f, "{ms}"),
            RawInstant::Other(value) => write!(f, "{value}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Event creation  (POST /api/events)
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEventPayload {
    pub event_name: String,
    pub event_description: String,
    #[serde(rename = "IconPath")]
    pub icon_path: String,
    pub organizer_name: String,
    pub event_tags: Vec<String>,
    pub event_states: Vec<NewEventState>,
}

/// Unset times go out as empty strings; the backend treats "" as "not scheduled".
#[derive(Debug, Serialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewEventState {
    pub event_state_name: String,
    pub start_time: String,
    pub end_time: String,
}
