use crate::app::MenuItem;
use chrono::{DateTime, Utc};
use events_api::catalog::{Catalog, Listing};
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// Dashboard / listing state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DashboardState {
    pub catalog: Option<Catalog>,
    /// Row index across featured + others.
    pub selected: usize,
    /// Seed for the order of the non-featured rows.
    pub seed: u64,
    /// Tournament shown on the detail tab.
    pub detail_id: Option<u64>,
    pub detail_scroll: u16,
}

impl DashboardState {
    pub fn new(seed: u64) -> Self {
        Self { seed, ..Self::default() }
    }

    /// Store a freshly loaded catalog, keeping the cursor on the same
    /// tournament when it survived the reload.
    pub fn load(&mut self, catalog: Catalog) {
        let previous = self.selected_id();
        self.catalog = Some(catalog);
        self.selected = previous
            .and_then(|id| self.position_of(id))
            .unwrap_or(0)
            .min(self.row_count().saturating_sub(1));
    }

    pub fn listing(&self) -> Option<Listing<'_>> {
        self.catalog.as_ref().map(|c| c.listing(self.seed))
    }

    pub fn row_count(&self) -> usize {
        self.listing().map(|l| l.len()).unwrap_or(0)
    }

    pub fn select_next(&mut self) {
        let max = self.row_count().saturating_sub(1);
        if self.selected < max {
            self.selected += 1;
        }
    }

    pub fn select_prev(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn selected_id(&self) -> Option<u64> {
        self.listing()?.get(self.selected).map(|t| t.id)
    }

    /// Reorder the non-featured rows, following the selected tournament.
    pub fn reshuffle(&mut self, seed: u64) {
        let previous = self.selected_id();
        self.seed = seed;
        if let Some(pos) = previous.and_then(|id| self.position_of(id)) {
            self.selected = pos;
        }
    }

    fn position_of(&self, id: u64) -> Option<usize> {
        let listing = self.listing()?;
        listing
            .featured
            .iter()
            .chain(listing.others.iter())
            .position(|t| t.id == id)
    }
}

/// Deterministic seed step for the reshuffle key.
pub fn next_seed(seed: u64) -> u64 {
    seed.wrapping_mul(6_364_136_223_846_793_005)
        .wrapping_add(1_442_695_040_888_963_407)
}

// ---------------------------------------------------------------------------
// Top-level app state
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct AppState {
    pub active_tab: MenuItem,
    pub previous_tab: MenuItem,
    pub dashboard: DashboardState,
    /// Snapshot of the wall clock, replaced on every clock tick.
    pub now: DateTime<Utc>,
    pub source: Option<PathBuf>,
    pub last_error: Option<String>,
    pub show_logs: bool,
}

impl AppState {
    pub fn new(now: DateTime<Utc>, seed: u64, source: Option<PathBuf>) -> Self {
        Self {
            active_tab: MenuItem::default(),
            previous_tab: MenuItem::default(),
            dashboard: DashboardState::new(seed),
            now,
            source,
            last_error: None,
            show_logs: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn catalog(recommended: &[bool]) -> Catalog {
        let items: Vec<_> = recommended
            .iter()
            .enumerate()
            .map(|(i, r)| json!({ "eventId": i + 1, "eventName": format!("Cup {}", i + 1), "recommended": r }))
            .collect();
        Catalog::from_json(&serde_json::Value::Array(items).to_string()).unwrap()
    }

    #[test]
    fn navigation_is_clamped() {
        let mut dash = DashboardState::new(3);
        dash.select_next();
        assert_eq!(dash.selected, 0, "no catalog means no rows");

        dash.load(catalog(&[true, false, false]));
        dash.select_prev();
        assert_eq!(dash.selected, 0);
        dash.select_next();
        dash.select_next();
        dash.select_next();
        assert_eq!(dash.selected, 2);
    }

    #[test]
    fn featured_rows_come_first() {
        let mut dash = DashboardState::new(11);
        dash.load(catalog(&[false, false, true]));
        assert_eq!(dash.selected_id(), Some(3));
    }

    #[test]
    fn reload_keeps_cursor_on_same_tournament() {
        let mut dash = DashboardState::new(5);
        dash.load(catalog(&[false, false, false, false]));
        dash.select_next();
        dash.select_next();
        let id = dash.selected_id();

        dash.load(catalog(&[false, false, false, false]));
        assert_eq!(dash.selected_id(), id);
    }

    #[test]
    fn reload_with_fewer_rows_clamps_cursor() {
        let mut dash = DashboardState::new(5);
        dash.load(catalog(&[false; 6]));
        for _ in 0..5 {
            dash.select_next();
        }
        // Whichever id was selected, keep it if present, otherwise clamp.
        dash.load(catalog(&[false; 2]));
        assert!(dash.selected < 2);
    }

    #[test]
    fn reshuffle_follows_selection() {
        let mut dash = DashboardState::new(1);
        dash.load(catalog(&[false; 8]));
        dash.select_next();
        let id = dash.selected_id();

        dash.reshuffle(next_seed(1));
        assert_eq!(dash.seed, next_seed(1));
        assert_eq!(dash.selected_id(), id);
    }

    #[test]
    fn next_seed_is_deterministic_and_moves() {
        assert_eq!(next_seed(9), next_seed(9));
        assert_ne!(next_seed(9), 9);
    }
}
