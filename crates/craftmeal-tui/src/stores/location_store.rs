/// LocationStore manages the month calendar of the user's work locations.
///
/// Month annotations arrive one day at a time. Every month switch bumps a
/// generation counter and responses stamped with an older generation are
/// dropped, so a slow fetch for a month the user already left can never
/// overwrite the visible one.
use crate::actions::Action;
use crate::common::calendar::{DayAnnotation, GridCursor, MonthGrid};
use chrono::{Datelike, NaiveDate};
use craftmeal_core::models::{SpecialDayKind, WfhPeriod, date_key, parse_date_key};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Internal state for the my-location page
#[derive(Debug, Clone)]
pub struct LocationState {
    pub grid: MonthGrid,
    pub cursor: GridCursor,
    pub today: NaiveDate,

    /// Per-day annotations for the visible month, keyed by date key
    pub annotations: HashMap<String, DayAnnotation>,

    /// Company-wide WFH periods, not month-scoped
    pub wfh_periods: Vec<WfhPeriod>,

    /// Stamp of the fetch whose responses are still welcome
    pub generation: u64,

    /// Days of the visible month still awaiting their annotation
    pub pending_days: u32,

    /// Location picker for the date under the cursor
    pub modal_open: bool,

    /// Screen area the calendar was last rendered into, for mouse
    /// hit-testing
    pub calendar_area: Option<ratatui::layout::Rect>,

    pub error: Option<String>,
}

impl LocationState {
    fn new(today: NaiveDate) -> Self {
        Self {
            grid: MonthGrid::containing(today),
            cursor: GridCursor::new(today),
            today,
            annotations: HashMap::new(),
            wfh_periods: Vec::new(),
            generation: 0,
            pending_days: 0,
            modal_open: false,
            calendar_area: None,
            error: None,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.pending_days > 0
    }

    /// Annotations for every day of the visible month, with WFH period
    /// membership folded in
    pub fn month_annotations(&self) -> HashMap<String, DayAnnotation> {
        let mut merged = HashMap::new();
        for day in 1..=self.grid.days_in_month() {
            let Some(date) = self.grid.date(day) else {
                continue;
            };
            let key = date_key(date);
            let mut annotation = self.annotations.get(&key).cloned().unwrap_or_default();
            annotation.in_wfh_period = self.wfh_periods.iter().any(|p| p.contains(&key));
            merged.insert(key, annotation);
        }
        merged
    }

    /// Weekends and closed days cannot take a location choice
    pub fn disabled_keys(&self) -> HashSet<String> {
        let mut disabled = HashSet::new();
        for day in 1..=self.grid.days_in_month() {
            let Some(date) = self.grid.date(day) else {
                continue;
            };
            let key = date_key(date);
            let weekend = matches!(date.weekday().num_days_from_sunday(), 0 | 6);
            let closed = self
                .annotations
                .get(&key)
                .map(|a| a.special == Some(SpecialDayKind::Closed))
                .unwrap_or(false);
            if weekend || closed {
                disabled.insert(key);
            }
        }
        disabled
    }
}

/// Store that holds the location calendar state
#[derive(Clone)]
pub struct LocationStore {
    state: Arc<RwLock<LocationState>>,
}

impl LocationStore {
    pub fn new() -> Self {
        Self::starting_at(chrono::Local::now().date_naive())
    }

    pub fn starting_at(today: NaiveDate) -> Self {
        Self {
            state: Arc::new(RwLock::new(LocationState::new(today))),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> LocationState {
        self.state.read().unwrap().clone()
    }

    pub fn generation(&self) -> u64 {
        self.state.read().unwrap().generation
    }

    /// (grid, generation) pair the month-load effect should fetch for
    pub fn fetch_target(&self) -> (MonthGrid, u64) {
        let state = self.state.read().unwrap();
        (state.grid, state.generation)
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::LoadVisibleMonth => {
                state.pending_days = state.grid.days_in_month();
                state.error = None;
            }

            Action::MonthDayLoaded {
                generation,
                date,
                location,
                check,
            } => {
                // Stale month: a newer fetch owns the view now
                if *generation != state.generation {
                    return;
                }
                let annotation = DayAnnotation {
                    location: Some(*location),
                    special: check.kind,
                    note: check.note.clone(),
                    in_wfh_period: false,
                };
                state.annotations.insert(date.clone(), annotation);
                state.pending_days = state.pending_days.saturating_sub(1);
            }

            Action::WfhPeriodsLoaded(periods) => {
                state.wfh_periods = periods.clone();
            }

            Action::MonthLoadFailed(error) => {
                state.error = Some(error.clone());
                // The per-day fetch aborts on first failure, stop the
                // spinner
                state.pending_days = 0;
            }

            // The periods task is separate from the per-day fetch, so a
            // failure here leaves the day spinner alone
            Action::WfhPeriodsLoadFailed(error) => {
                state.error = Some(error.clone());
            }

            Action::LocationUpdated(record) => {
                state.modal_open = false;
                if let Some(date) = parse_date_key(&record.date) {
                    if state.grid.contains(date) {
                        state
                            .annotations
                            .entry(record.date.clone())
                            .or_default()
                            .location = Some(record.location);
                    }
                }
            }

            Action::LocationUpdateFailed(_) => {
                state.modal_open = false;
            }

            Action::Logout | Action::SessionExpired => {
                *state = LocationState::new(state.today);
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    /// Show a different month. Bumps the generation so in-flight fetches
    /// for the old month are dropped. Returns true when the view changed,
    /// the caller then dispatches LoadVisibleMonth.
    pub fn show_month(&self, grid: MonthGrid) -> bool {
        let mut state = self.state.write().unwrap();
        if state.grid == grid {
            return false;
        }
        state.grid = grid;
        state.generation += 1;
        state.annotations.clear();
        state.pending_days = 0;
        state.modal_open = false;
        // Keep the cursor inside the new month
        if !grid.contains(state.cursor.date) {
            let day = state.cursor.date.day().min(grid.days_in_month());
            if let Some(date) = grid.date(day) {
                state.cursor = GridCursor::new(date);
            }
        }
        true
    }

    pub fn next_month(&self) -> bool {
        let grid = self.state.read().unwrap().grid.next();
        self.show_month(grid)
    }

    pub fn prev_month(&self) -> bool {
        let grid = self.state.read().unwrap().grid.prev();
        self.show_month(grid)
    }

    /// Move the cursor by days. Crossing a month boundary switches the
    /// view; returns true when it did.
    pub fn move_cursor(&self, days: i64) -> bool {
        let new_grid = {
            let mut state = self.state.write().unwrap();
            state.cursor.step_days(days);
            if state.grid.contains(state.cursor.date) {
                return false;
            }
            MonthGrid::containing(state.cursor.date)
        };
        // show_month would clamp the cursor; it is already in new_grid
        let mut state = self.state.write().unwrap();
        state.grid = new_grid;
        state.generation += 1;
        state.annotations.clear();
        state.pending_days = 0;
        state.modal_open = false;
        true
    }

    pub fn set_cursor(&self, date: NaiveDate) {
        let mut state = self.state.write().unwrap();
        if state.grid.contains(date) {
            state.cursor = GridCursor::new(date);
        }
    }

    /// Open the location picker for the cursor date. Disabled dates are a
    /// no-op. Returns the date it opened for.
    pub fn open_modal(&self) -> Option<NaiveDate> {
        let mut state = self.state.write().unwrap();
        let date = state.cursor.date;
        if !state.grid.contains(date) {
            return None;
        }
        let key = date_key(date);
        let weekend = matches!(date.weekday().num_days_from_sunday(), 0 | 6);
        let closed = state
            .annotations
            .get(&key)
            .map(|a| a.special == Some(SpecialDayKind::Closed))
            .unwrap_or(false);
        if weekend || closed {
            return None;
        }
        state.modal_open = true;
        Some(date)
    }

    pub fn close_modal(&self) {
        self.state.write().unwrap().modal_open = false;
    }

    /// Recorded during rendering, read back by mouse handling
    pub fn set_calendar_area(&self, area: ratatui::layout::Rect) {
        self.state.write().unwrap().calendar_area = Some(area);
    }

    pub fn modal_date(&self) -> Option<NaiveDate> {
        let state = self.state.read().unwrap();
        state.modal_open.then_some(state.cursor.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use craftmeal_core::models::{SpecialDayCheck, WorkLocation, WorkLocationRecord};

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn day_loaded(generation: u64, date: &str, location: WorkLocation) -> Action {
        Action::MonthDayLoaded {
            generation,
            date: date.to_string(),
            location,
            check: SpecialDayCheck {
                date: date.to_string(),
                is_closed: false,
                kind: None,
                note: None,
            },
        }
    }

    #[test]
    fn test_stale_generation_is_dropped() {
        let store = LocationStore::starting_at(d(2026, 2, 10));
        assert!(store.next_month());
        let stale = store.generation() - 1;

        // Response from the February fetch arriving after the switch
        store.reduce(&day_loaded(stale, "2026-02-03", WorkLocation::Wfh));
        assert!(store.get_state().annotations.is_empty());

        // Current-generation response lands
        store.reduce(&day_loaded(store.generation(), "2026-03-03", WorkLocation::Wfh));
        assert_eq!(store.get_state().annotations.len(), 1);
    }

    #[test]
    fn test_month_switch_clears_annotations() {
        let store = LocationStore::starting_at(d(2026, 2, 10));
        store.reduce(&day_loaded(0, "2026-02-03", WorkLocation::Office));
        assert_eq!(store.get_state().annotations.len(), 1);

        store.next_month();
        let state = store.get_state();
        assert!(state.annotations.is_empty());
        assert_eq!(state.generation, 1);
        assert_eq!(state.grid, MonthGrid::new(2026, 3));
    }

    #[test]
    fn test_show_same_month_is_no_op() {
        let store = LocationStore::starting_at(d(2026, 2, 10));
        assert!(!store.show_month(MonthGrid::new(2026, 2)));
        assert_eq!(store.generation(), 0);
    }

    #[test]
    fn test_cursor_crossing_boundary_switches_month() {
        let store = LocationStore::starting_at(d(2026, 2, 28));
        assert!(store.move_cursor(1));
        let state = store.get_state();
        assert_eq!(state.grid, MonthGrid::new(2026, 3));
        assert_eq!(state.cursor.date, d(2026, 3, 1));
        assert_eq!(state.generation, 1);
    }

    #[test]
    fn test_pending_days_track_loading() {
        let store = LocationStore::starting_at(d(2026, 2, 10));
        store.reduce(&Action::LoadVisibleMonth);
        assert!(store.get_state().is_loading());
        assert_eq!(store.get_state().pending_days, 28);

        store.reduce(&day_loaded(0, "2026-02-01", WorkLocation::Office));
        assert_eq!(store.get_state().pending_days, 27);
    }

    #[test]
    fn test_month_load_failure_stops_loading() {
        let store = LocationStore::starting_at(d(2026, 2, 10));
        store.reduce(&Action::LoadVisibleMonth);
        assert!(store.get_state().is_loading());

        store.reduce(&Action::MonthLoadFailed("connection refused".to_string()));
        let state = store.get_state();
        assert!(!state.is_loading());
        assert_eq!(state.error.as_deref(), Some("connection refused"));
    }

    #[test]
    fn test_periods_failure_leaves_day_spinner_alone() {
        let store = LocationStore::starting_at(d(2026, 2, 10));
        store.reduce(&Action::LoadVisibleMonth);
        store.reduce(&Action::WfhPeriodsLoadFailed("connection refused".to_string()));
        assert!(store.get_state().is_loading());
    }

    #[test]
    fn test_modal_refuses_weekend() {
        // 2026-02-08 is a Sunday
        let store = LocationStore::starting_at(d(2026, 2, 8));
        assert_eq!(store.open_modal(), None);
        assert!(store.modal_date().is_none());

        store.set_cursor(d(2026, 2, 9));
        assert_eq!(store.open_modal(), Some(d(2026, 2, 9)));
        assert_eq!(store.modal_date(), Some(d(2026, 2, 9)));
    }

    #[test]
    fn test_modal_refuses_closed_day() {
        let store = LocationStore::starting_at(d(2026, 2, 10));
        store.reduce(&Action::MonthDayLoaded {
            generation: 0,
            date: "2026-02-10".to_string(),
            location: WorkLocation::Office,
            check: SpecialDayCheck {
                date: "2026-02-10".to_string(),
                is_closed: true,
                kind: Some(SpecialDayKind::Closed),
                note: Some("Public holiday".to_string()),
            },
        });
        assert_eq!(store.open_modal(), None);
        assert!(store.get_state().disabled_keys().contains("2026-02-10"));
    }

    #[test]
    fn test_location_update_lands_in_annotations() {
        let store = LocationStore::starting_at(d(2026, 2, 10));
        store.set_cursor(d(2026, 2, 9));
        store.open_modal();
        store.reduce(&Action::LocationUpdated(WorkLocationRecord {
            user_id: 1,
            date: "2026-02-09".to_string(),
            location: WorkLocation::Wfh,
        }));

        let state = store.get_state();
        assert!(!state.modal_open);
        assert_eq!(
            state.annotations["2026-02-09"].location,
            Some(WorkLocation::Wfh)
        );
    }

    #[test]
    fn test_wfh_period_membership_folds_into_annotations() {
        let store = LocationStore::starting_at(d(2026, 1, 15));
        store.reduce(&Action::WfhPeriodsLoaded(vec![WfhPeriod {
            id: 1,
            start_date: "2026-01-05".to_string(),
            end_date: "2026-01-10".to_string(),
        }]));

        let merged = store.get_state().month_annotations();
        assert!(merged["2026-01-07"].in_wfh_period);
        assert!(!merged["2026-01-12"].in_wfh_period);
    }
}
