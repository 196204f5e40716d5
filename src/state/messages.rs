use crate::state::loader::LoadingState;
use chrono::{DateTime, Utc};
use crossterm::event::KeyEvent;
use events_api::catalog::Catalog;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRequest {
    Load { path: PathBuf },
}

#[derive(Debug)]
pub enum CatalogResponse {
    LoadingStateChanged { loading_state: LoadingState },
    CatalogLoaded { catalog: Catalog },
    Error { message: String },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Resize,
    AppStarted,
    /// Fresh wall-clock snapshot; every badge on screen is resolved against it.
    ClockTick { now: DateTime<Utc> },
}
