use crate::state::app_settings::AppSettings;
use crate::state::app_state::{AppState, next_seed};
use crate::state::messages::CatalogRequest;
use chrono::{DateTime, Utc};
use events_api::catalog::Catalog;
use log::{debug, warn};

#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub enum MenuItem {
    #[default]
    Dashboard,
    Detail,
    Help,
}

pub struct App {
    pub settings: AppSettings,
    pub state: AppState,
}

impl App {
    pub fn new(settings: AppSettings, now: DateTime<Utc>) -> Self {
        let state = AppState::new(now, settings.seed, settings.events_path.clone());
        let app = Self { settings, state };

        if let Some(level) = app.settings.log_level {
            log::set_max_level(level);
            tui_logger::set_default_level(level);
        }

        app
    }

    // -----------------------------------------------------------------------
    // Worker / clock handlers, called from main_ui_loop
    // -----------------------------------------------------------------------

    pub fn on_catalog_loaded(&mut self, catalog: Catalog) {
        for rejected in catalog.rejected() {
            warn!("rejected at ingestion: {rejected}");
        }
        self.state.last_error = None;
        self.state.dashboard.load(catalog);
    }

    pub fn on_clock_tick(&mut self, now: DateTime<Utc>) {
        debug!("clock tick {now}");
        self.state.now = now;
    }

    pub fn on_error(&mut self, message: String) {
        self.state.last_error = Some(message);
    }

    /// Request for (re)loading the snapshot, if a source is configured.
    pub fn load_request(&mut self) -> Option<CatalogRequest> {
        match self.state.source.clone() {
            Some(path) => Some(CatalogRequest::Load { path }),
            None => {
                self.state.last_error = Some(
                    "No events snapshot configured. Pass a path or set EVENTBOARD_EVENTS_JSON."
                        .to_string(),
                );
                None
            }
        }
    }

    // -----------------------------------------------------------------------
    // Tab management
    // -----------------------------------------------------------------------

    pub fn update_tab(&mut self, next: MenuItem) {
        if self.state.active_tab == next {
            return;
        }
        self.state.previous_tab = self.state.active_tab;
        self.state.active_tab = next;
        if next == MenuItem::Detail {
            self.state.dashboard.detail_scroll = 0;
        }
    }

    pub fn exit_help(&mut self) {
        if self.state.active_tab == MenuItem::Help {
            self.state.active_tab = self.state.previous_tab;
        }
    }

    pub fn toggle_show_logs(&mut self) {
        self.state.show_logs = !self.state.show_logs;
    }

    pub fn toggle_full_screen(&mut self) {
        self.settings.full_screen = !self.settings.full_screen;
    }

    // -----------------------------------------------------------------------
    // Dashboard navigation (delegated to DashboardState)
    // -----------------------------------------------------------------------

    pub fn select_next(&mut self) {
        self.state.dashboard.select_next();
    }

    pub fn select_prev(&mut self) {
        self.state.dashboard.select_prev();
    }

    /// Open the detail tab for the highlighted row. Returns false on an empty list.
    pub fn open_detail(&mut self) -> bool {
        let Some(id) = self.state.dashboard.selected_id() else {
            return false;
        };
        self.state.dashboard.detail_id = Some(id);
        self.update_tab(MenuItem::Detail);
        true
    }

    pub fn close_detail(&mut self) {
        self.update_tab(MenuItem::Dashboard);
    }

    pub fn scroll_detail(&mut self, down: bool) {
        let scroll = &mut self.state.dashboard.detail_scroll;
        *scroll = if down { scroll.saturating_add(1) } else { scroll.saturating_sub(1) };
    }

    pub fn reshuffle(&mut self) {
        let seed = next_seed(self.state.dashboard.seed);
        self.state.dashboard.reshuffle(seed);
        self.settings.seed = seed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use serde_json::json;
    use std::path::PathBuf;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap()
    }

    fn app_with(source: Option<&str>) -> App {
        let settings = AppSettings {
            events_path: source.map(PathBuf::from),
            seed: 4,
            ..AppSettings::default()
        };
        App::new(settings, now())
    }

    fn sample_catalog() -> Catalog {
        let payload = json!([
            { "eventId": 1, "eventName": "Open", "eventStates": [{ "startTime": (now() + Duration::hours(3)).to_rfc3339() }] },
            { "eventId": 2, "eventName": "Closed", "eventStates": [{ "startTime": "bad" }] },
            { "eventId": 3, "eventName": "Later" }
        ]);
        Catalog::from_json(&payload.to_string()).unwrap()
    }

    #[test]
    fn load_request_needs_a_source() {
        let mut app = app_with(None);
        assert_eq!(app.load_request(), None);
        assert!(app.state.last_error.is_some());

        let mut app = app_with(Some("events.json"));
        assert_eq!(
            app.load_request(),
            Some(CatalogRequest::Load { path: PathBuf::from("events.json") })
        );
    }

    #[test]
    fn catalog_load_clears_error() {
        let mut app = app_with(Some("events.json"));
        app.on_error("boom".into());
        app.on_catalog_loaded(sample_catalog());
        assert_eq!(app.state.last_error, None);
        assert_eq!(app.state.dashboard.row_count(), 2);
    }

    #[test]
    fn clock_tick_moves_status_without_reload() {
        let mut app = app_with(Some("events.json"));
        app.on_catalog_loaded(sample_catalog());
        let catalog = app.state.dashboard.catalog.as_ref().unwrap();
        assert_eq!(catalog.statuses(app.state.now)[&1].text, "Starts in 3h 0m");

        app.on_clock_tick(now() + Duration::hours(1));
        let catalog = app.state.dashboard.catalog.as_ref().unwrap();
        assert_eq!(catalog.statuses(app.state.now)[&1].text, "Starts in 2h 0m");
    }

    #[test]
    fn detail_opens_on_selected_row_and_help_returns() {
        let mut app = app_with(Some("events.json"));
        assert!(!app.open_detail(), "nothing to open before load");

        app.on_catalog_loaded(sample_catalog());
        assert!(app.open_detail());
        assert_eq!(app.state.active_tab, MenuItem::Detail);
        assert_eq!(app.state.dashboard.detail_id, app.state.dashboard.selected_id());

        app.update_tab(MenuItem::Help);
        app.exit_help();
        assert_eq!(app.state.active_tab, MenuItem::Detail);

        app.close_detail();
        assert_eq!(app.state.active_tab, MenuItem::Dashboard);
    }

    #[test]
    fn detail_scroll_saturates() {
        let mut app = app_with(None);
        app.scroll_detail(false);
        assert_eq!(app.state.dashboard.detail_scroll, 0);
        app.scroll_detail(true);
        assert_eq!(app.state.dashboard.detail_scroll, 1);
    }

    #[test]
    fn reshuffle_updates_seed() {
        let mut app = app_with(None);
        app.reshuffle();
        assert_eq!(app.state.dashboard.seed, next_seed(4));
        assert_eq!(app.settings.seed, next_seed(4));
    }
}
