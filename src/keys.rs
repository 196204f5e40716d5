use crate::app::{App, MenuItem};
use crate::state::messages::CatalogRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};

/// What a key press asks of the outside world after the app state is updated.
#[derive(Debug, PartialEq)]
pub enum KeyOutcome {
    Handled,
    Reload(CatalogRequest),
    Quit,
}

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    catalog_requests: &mpsc::Sender<CatalogRequest>,
) {
    let outcome = {
        let mut guard = app.lock().await;
        apply_key(&mut guard, key_event)
    };

    match outcome {
        KeyOutcome::Handled => {}
        KeyOutcome::Reload(request) => {
            let _ = catalog_requests.send(request).await;
        }
        KeyOutcome::Quit => {
            crate::cleanup_terminal();
            std::process::exit(0);
        }
    }
}

pub fn apply_key(app: &mut App, key_event: KeyEvent) -> KeyOutcome {
    match (app.state.active_tab, key_event.code, key_event.modifiers) {
        // Quit
        (_, Char('q'), _) | (_, Char('c'), KeyModifiers::CONTROL) => return KeyOutcome::Quit,

        // Tab switching
        (_, Char('1'), _) => app.update_tab(MenuItem::Dashboard),
        (_, Char('2'), _) => app.update_tab(MenuItem::Detail),
        (_, Char('?'), _) => app.update_tab(MenuItem::Help),
        (MenuItem::Help, KeyCode::Esc, _) => app.exit_help(),

        // Dashboard navigation
        (MenuItem::Dashboard, Char('j') | KeyCode::Down, _) => app.select_next(),
        (MenuItem::Dashboard, Char('k') | KeyCode::Up, _) => app.select_prev(),
        (MenuItem::Dashboard, KeyCode::Enter, _) => {
            app.open_detail();
        }
        (MenuItem::Dashboard, Char('s'), _) => app.reshuffle(),

        // Detail navigation
        (MenuItem::Detail, Char('j') | KeyCode::Down, _) => app.scroll_detail(true),
        (MenuItem::Detail, Char('k') | KeyCode::Up, _) => app.scroll_detail(false),
        (MenuItem::Detail, KeyCode::Esc, _) => app.close_detail(),

        // Global
        (_, Char('r'), _) => {
            if let Some(request) = app.load_request() {
                return KeyOutcome::Reload(request);
            }
        }
        (_, Char('f'), _) => app.toggle_full_screen(),
        (_, Char('"'), _) => app.toggle_show_logs(),

        _ => {}
    }
    KeyOutcome::Handled
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::app_settings::AppSettings;
    use chrono::{TimeZone, Utc};
    use events_api::catalog::Catalog;
    use serde_json::json;
    use std::path::PathBuf;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn app() -> App {
        let settings = AppSettings {
            events_path: Some(PathBuf::from("events.json")),
            ..AppSettings::default()
        };
        let now = Utc.with_ymd_and_hms(2026, 3, 14, 12, 0, 0).unwrap();
        let mut app = App::new(settings, now);
        let payload = json!([{ "eventId": 1 }, { "eventId": 2 }]);
        app.on_catalog_loaded(Catalog::from_json(&payload.to_string()).unwrap());
        app
    }

    #[test]
    fn quit_keys() {
        let mut app = app();
        assert_eq!(apply_key(&mut app, key(Char('q'))), KeyOutcome::Quit);
        let ctrl_c = KeyEvent::new(Char('c'), KeyModifiers::CONTROL);
        assert_eq!(apply_key(&mut app, ctrl_c), KeyOutcome::Quit);
    }

    #[test]
    fn enter_opens_detail_and_esc_returns() {
        let mut app = app();
        apply_key(&mut app, key(KeyCode::Down));
        apply_key(&mut app, key(KeyCode::Enter));
        assert_eq!(app.state.active_tab, MenuItem::Detail);

        apply_key(&mut app, key(Char('j')));
        assert_eq!(app.state.dashboard.detail_scroll, 1);

        apply_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.state.active_tab, MenuItem::Dashboard);
        assert_eq!(app.state.dashboard.selected, 1);
    }

    #[test]
    fn reload_sends_configured_source() {
        let mut app = app();
        assert_eq!(
            apply_key(&mut app, key(Char('r'))),
            KeyOutcome::Reload(CatalogRequest::Load { path: PathBuf::from("events.json") })
        );
    }

    #[test]
    fn help_toggles_back() {
        let mut app = app();
        apply_key(&mut app, key(Char('?')));
        assert_eq!(app.state.active_tab, MenuItem::Help);
        apply_key(&mut app, key(KeyCode::Esc));
        assert_eq!(app.state.active_tab, MenuItem::Dashboard);
    }
}
