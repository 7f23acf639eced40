/// CalendarAdminStore manages the admin calendar page: company-wide WFH
/// periods and special days.
///
/// WFH periods are created with the two-click range gesture on the month
/// grid; special days are created for the date under the cursor.
use crate::actions::Action;
use crate::common::calendar::{
    DayAnnotation, GridCursor, GridSelection, MonthGrid, SelectionEvent, SelectionMode,
};
use crate::common::input::InputBox;
use chrono::NaiveDate;
use craftmeal_core::models::{
    SpecialDay, SpecialDayCreate, SpecialDayKind, WfhPeriod, WfhPeriodCreate, date_key,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

/// Which pane of the admin page has keyboard focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPane {
    Calendar,
    Periods,
    SpecialDays,
}

/// Internal state for the calendar admin page
#[derive(Debug, Clone)]
pub struct CalendarAdminState {
    pub grid: MonthGrid,
    pub cursor: GridCursor,
    pub selection: GridSelection,

    pub wfh_periods: Vec<WfhPeriod>,
    pub special_days: Vec<SpecialDay>,

    pub pane: AdminPane,
    pub period_index: usize,
    pub special_index: usize,

    /// Special-day form for the cursor date
    pub form_open: bool,
    pub form_kind: usize,
    pub form_note: InputBox,

    /// Screen area the calendar was last rendered into, for mouse
    /// hit-testing
    pub calendar_area: Option<ratatui::layout::Rect>,

    pub is_loading: bool,
    pub is_saving: bool,
    pub error: Option<String>,
}

impl CalendarAdminState {
    fn new(today: NaiveDate) -> Self {
        Self {
            grid: MonthGrid::containing(today),
            cursor: GridCursor::new(today),
            selection: GridSelection::new(),
            wfh_periods: Vec::new(),
            special_days: Vec::new(),
            pane: AdminPane::Calendar,
            period_index: 0,
            special_index: 0,
            form_open: false,
            form_kind: 0,
            form_note: InputBox::new("Note"),
            calendar_area: None,
            is_loading: false,
            is_saving: false,
            error: None,
        }
    }

    /// Annotations for the month grid: special days plus period membership
    pub fn month_annotations(&self) -> HashMap<String, DayAnnotation> {
        let mut merged: HashMap<String, DayAnnotation> = HashMap::new();
        for day in &self.special_days {
            merged.insert(
                day.date.clone(),
                DayAnnotation {
                    special: Some(day.kind),
                    note: day.note.clone(),
                    ..Default::default()
                },
            );
        }
        for day in 1..=self.grid.days_in_month() {
            let Some(date) = self.grid.date(day) else {
                continue;
            };
            let key = date_key(date);
            if self.wfh_periods.iter().any(|p| p.contains(&key)) {
                merged.entry(key).or_default().in_wfh_period = true;
            }
        }
        merged
    }
}

/// Store that holds calendar administration state
#[derive(Clone)]
pub struct CalendarAdminStore {
    state: Arc<RwLock<CalendarAdminState>>,
}

impl CalendarAdminStore {
    pub fn new() -> Self {
        Self::starting_at(chrono::Local::now().date_naive())
    }

    pub fn starting_at(today: NaiveDate) -> Self {
        Self {
            state: Arc::new(RwLock::new(CalendarAdminState::new(today))),
        }
    }

    /// Get a read-only snapshot of the current state
    pub fn get_state(&self) -> CalendarAdminState {
        self.state.read().unwrap().clone()
    }

    /// Reducer: handle an action and update state accordingly
    pub fn reduce(&self, action: &Action) {
        let mut state = self.state.write().unwrap();

        match action {
            Action::LoadCalendarAdmin => {
                state.is_loading = true;
                state.error = None;
            }

            Action::SpecialDaysLoaded(days) => {
                state.special_days = days.clone();
                state.special_days.sort_by(|a, b| a.date.cmp(&b.date));
                state.is_loading = false;
            }

            Action::SpecialDaysLoadFailed(error) => {
                state.is_loading = false;
                state.error = Some(error.clone());
            }

            Action::WfhPeriodsLoaded(periods) => {
                state.wfh_periods = periods.clone();
                state
                    .wfh_periods
                    .sort_by(|a, b| a.start_date.cmp(&b.start_date));
            }

            Action::CreateWfhPeriod(_) | Action::SubmitSpecialDay(_) => {
                state.is_saving = true;
            }

            Action::WfhPeriodCreated(period) => {
                state.wfh_periods.push(period.clone());
                state
                    .wfh_periods
                    .sort_by(|a, b| a.start_date.cmp(&b.start_date));
                state.selection.clear();
                state.is_saving = false;
            }

            Action::WfhPeriodDeleted(id) => {
                state.wfh_periods.retain(|p| p.id != *id);
                state.period_index = state
                    .period_index
                    .min(state.wfh_periods.len().saturating_sub(1));
            }

            Action::SpecialDayCreated(day) => {
                state.special_days.push(day.clone());
                state.special_days.sort_by(|a, b| a.date.cmp(&b.date));
                state.form_open = false;
                state.form_note.clear();
                state.is_saving = false;
            }

            Action::SpecialDayDeleted(id) => {
                state.special_days.retain(|d| d.id != *id);
                state.special_index = state
                    .special_index
                    .min(state.special_days.len().saturating_sub(1));
            }

            Action::WfhPeriodCreateFailed(error)
            | Action::SpecialDayCreateFailed(error)
            | Action::WfhPeriodDeleteFailed(error)
            | Action::SpecialDayDeleteFailed(error) => {
                state.is_saving = false;
                state.error = Some(error.clone());
            }

            Action::Logout | Action::SessionExpired => {
                let today = state.cursor.date;
                *state = CalendarAdminState::new(today);
            }

            _ => {
                // Ignore actions not relevant to this store
            }
        }
    }

    pub fn next_pane(&self) {
        let mut state = self.state.write().unwrap();
        state.pane = match state.pane {
            AdminPane::Calendar => AdminPane::Periods,
            AdminPane::Periods => AdminPane::SpecialDays,
            AdminPane::SpecialDays => AdminPane::Calendar,
        };
    }

    pub fn next_month(&self) {
        let mut state = self.state.write().unwrap();
        let grid = state.grid.next();
        state.grid = grid;
        if !grid.contains(state.cursor.date) {
            if let Some(date) = grid.date(1) {
                state.cursor = GridCursor::new(date);
            }
        }
    }

    pub fn prev_month(&self) {
        let mut state = self.state.write().unwrap();
        let grid = state.grid.prev();
        state.grid = grid;
        if !grid.contains(state.cursor.date) {
            if let Some(date) = grid.date(1) {
                state.cursor = GridCursor::new(date);
            }
        }
    }

    pub fn move_cursor(&self, days: i64) {
        let mut state = self.state.write().unwrap();
        state.cursor.step_days(days);
        if !state.grid.contains(state.cursor.date) {
            state.grid = MonthGrid::containing(state.cursor.date);
        }
        if state.selection.is_selecting() {
            let date = state.cursor.date;
            state.selection.extend(date);
        }
    }

    pub fn set_cursor(&self, date: NaiveDate) {
        let mut state = self.state.write().unwrap();
        state.cursor = GridCursor::new(date);
        if !state.grid.contains(date) {
            state.grid = MonthGrid::containing(date);
        }
        if state.selection.is_selecting() {
            state.selection.extend(date);
        }
    }

    /// Range press on the cursor date. Admins can select any date, so the
    /// disabled set is empty here.
    pub fn press(&self) -> Option<SelectionEvent> {
        let mut state = self.state.write().unwrap();
        let date = state.cursor.date;
        state.selection.press(date, SelectionMode::Range, &HashSet::new())
    }

    pub fn clear_selection(&self) {
        self.state.write().unwrap().selection.clear();
    }

    pub fn release(&self) {
        self.state.write().unwrap().selection.release();
    }

    /// Recorded during rendering, read back by mouse handling
    pub fn set_calendar_area(&self, area: ratatui::layout::Rect) {
        self.state.write().unwrap().calendar_area = Some(area);
    }

    /// Payload for creating a WFH period from the completed selection.
    /// Marks the store saving so a repeated submit is swallowed.
    pub fn period_payload(&self) -> Option<WfhPeriodCreate> {
        let mut state = self.state.write().unwrap();
        if state.is_saving || state.selection.is_selecting() {
            return None;
        }
        let range = state.selection.range()?;
        state.is_saving = true;
        Some(WfhPeriodCreate {
            start_date: date_key(range.start),
            end_date: date_key(range.end),
        })
    }

    pub fn list_up(&self) {
        let mut state = self.state.write().unwrap();
        match state.pane {
            AdminPane::Periods => state.period_index = state.period_index.saturating_sub(1),
            AdminPane::SpecialDays => state.special_index = state.special_index.saturating_sub(1),
            AdminPane::Calendar => {}
        }
    }

    pub fn list_down(&self) {
        let mut state = self.state.write().unwrap();
        match state.pane {
            AdminPane::Periods => {
                if state.period_index + 1 < state.wfh_periods.len() {
                    state.period_index += 1;
                }
            }
            AdminPane::SpecialDays => {
                if state.special_index + 1 < state.special_days.len() {
                    state.special_index += 1;
                }
            }
            AdminPane::Calendar => {}
        }
    }

    /// Id of the WFH period under the list cursor
    pub fn selected_period_id(&self) -> Option<i64> {
        let state = self.state.read().unwrap();
        state.wfh_periods.get(state.period_index).map(|p| p.id)
    }

    /// Id of the special day under the list cursor
    pub fn selected_special_id(&self) -> Option<i64> {
        let state = self.state.read().unwrap();
        state.special_days.get(state.special_index).map(|d| d.id)
    }

    pub fn open_form(&self) {
        let mut state = self.state.write().unwrap();
        state.form_open = true;
        state.form_kind = 0;
        state.form_note.clear();
    }

    pub fn close_form(&self) {
        self.state.write().unwrap().form_open = false;
    }

    pub fn form_is_open(&self) -> bool {
        self.state.read().unwrap().form_open
    }

    pub fn cycle_form_kind(&self) {
        let mut state = self.state.write().unwrap();
        state.form_kind = (state.form_kind + 1) % SpecialDayKind::ALL.len();
    }

    pub fn edit_form_note(&self, edit: impl FnOnce(&mut InputBox)) {
        let mut state = self.state.write().unwrap();
        edit(&mut state.form_note);
    }

    /// Payload for creating a special day on the cursor date. Marks the
    /// store saving so a repeated submit is swallowed.
    pub fn special_day_payload(&self) -> Option<SpecialDayCreate> {
        let mut state = self.state.write().unwrap();
        if state.is_saving || !state.form_open {
            return None;
        }
        let note = state.form_note.value().trim().to_string();
        state.is_saving = true;
        Some(SpecialDayCreate {
            date: date_key(state.cursor.date),
            kind: SpecialDayKind::ALL[state.form_kind],
            note: (!note.is_empty()).then_some(note),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn period(id: i64, start: &str, end: &str) -> WfhPeriod {
        WfhPeriod {
            id,
            start_date: start.to_string(),
            end_date: end.to_string(),
        }
    }

    #[test]
    fn test_range_gesture_builds_period_payload() {
        let store = CalendarAdminStore::starting_at(d(2026, 1, 10));
        store.press();
        // Moving the cursor backwards extends the live selection
        store.set_cursor(d(2026, 1, 5));
        store.press();

        let payload = store.period_payload().unwrap();
        assert_eq!(payload.start_date, "2026-01-05");
        assert_eq!(payload.end_date, "2026-01-10");
    }

    #[test]
    fn test_no_payload_mid_selection() {
        let store = CalendarAdminStore::starting_at(d(2026, 1, 10));
        store.press();
        assert!(store.period_payload().is_none());
    }

    #[test]
    fn test_created_period_clears_selection() {
        let store = CalendarAdminStore::starting_at(d(2026, 1, 10));
        store.press();
        store.press();
        let payload = store.period_payload().unwrap();
        store.reduce(&Action::CreateWfhPeriod(payload));
        store.reduce(&Action::WfhPeriodCreated(period(4, "2026-01-10", "2026-01-10")));

        let state = store.get_state();
        assert!(state.selection.range().is_none());
        assert_eq!(state.wfh_periods.len(), 1);
        assert!(!state.is_saving);
    }

    #[test]
    fn test_periods_sorted_by_start() {
        let store = CalendarAdminStore::starting_at(d(2026, 1, 10));
        store.reduce(&Action::WfhPeriodsLoaded(vec![
            period(2, "2026-03-01", "2026-03-05"),
            period(1, "2026-01-05", "2026-01-10"),
        ]));
        let state = store.get_state();
        assert_eq!(state.wfh_periods[0].id, 1);
    }

    #[test]
    fn test_delete_clamps_list_cursor() {
        let store = CalendarAdminStore::starting_at(d(2026, 1, 10));
        store.reduce(&Action::WfhPeriodsLoaded(vec![
            period(1, "2026-01-05", "2026-01-10"),
            period(2, "2026-03-01", "2026-03-05"),
        ]));
        store.next_pane();
        store.list_down();
        assert_eq!(store.selected_period_id(), Some(2));

        store.reduce(&Action::WfhPeriodDeleted(2));
        assert_eq!(store.selected_period_id(), Some(1));
    }

    #[test]
    fn test_special_day_form_payload() {
        let store = CalendarAdminStore::starting_at(d(2026, 2, 10));
        assert!(store.special_day_payload().is_none());

        store.open_form();
        store.cycle_form_kind();
        for c in "Eid".chars() {
            store.edit_form_note(|f| f.enter_char(c));
        }
        let payload = store.special_day_payload().unwrap();
        assert_eq!(payload.date, "2026-02-10");
        assert_eq!(payload.kind, SpecialDayKind::Holiday);
        assert_eq!(payload.note.as_deref(), Some("Eid"));
    }

    #[test]
    fn test_special_day_created_closes_form() {
        let store = CalendarAdminStore::starting_at(d(2026, 2, 10));
        store.open_form();
        let payload = store.special_day_payload().unwrap();
        store.reduce(&Action::SubmitSpecialDay(payload));
        store.reduce(&Action::SpecialDayCreated(SpecialDay {
            id: 3,
            date: "2026-02-10".to_string(),
            kind: SpecialDayKind::Holiday,
            note: None,
        }));

        let state = store.get_state();
        assert!(!state.form_open);
        assert_eq!(state.special_days.len(), 1);
    }

    #[test]
    fn test_annotations_merge_specials_and_periods() {
        let store = CalendarAdminStore::starting_at(d(2026, 1, 15));
        store.reduce(&Action::WfhPeriodsLoaded(vec![period(
            1,
            "2026-01-05",
            "2026-01-10",
        )]));
        store.reduce(&Action::SpecialDaysLoaded(vec![SpecialDay {
            id: 1,
            date: "2026-01-07".to_string(),
            kind: SpecialDayKind::Closed,
            note: None,
        }]));

        let merged = store.get_state().month_annotations();
        assert_eq!(merged["2026-01-07"].special, Some(SpecialDayKind::Closed));
        assert!(merged["2026-01-07"].in_wfh_period);
        assert!(merged["2026-01-06"].in_wfh_period);
    }
}
