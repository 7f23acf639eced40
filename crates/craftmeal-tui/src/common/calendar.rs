/// Month-grid calendar with annotation-aware day cells and a two-step
/// range-selection gesture. Pure state; rendering lives at the bottom.
use chrono::{Datelike, Days, NaiveDate};
use craftmeal_core::models::{SpecialDayKind, WorkLocation, date_key};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use std::collections::{HashMap, HashSet};

/// The month being displayed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthGrid {
    pub year: i32,
    pub month: u32,
}

impl MonthGrid {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    pub fn containing(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn first_day(&self) -> NaiveDate {
        // month is validated on construction
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap()
    }

    /// Weekday index of day 1, 0 = Sunday
    pub fn leading_blanks(&self) -> u32 {
        self.first_day().weekday().num_days_from_sunday()
    }

    pub fn days_in_month(&self) -> u32 {
        let next = self.next().first_day();
        next.pred_opt().unwrap().day()
    }

    /// Leading blank cells followed by one cell per day of month
    pub fn cell_count(&self) -> u32 {
        self.leading_blanks() + self.days_in_month()
    }

    pub fn date(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }

    pub fn name(&self) -> String {
        const MONTHS: [&str; 12] = [
            "January", "February", "March", "April", "May", "June", "July", "August",
            "September", "October", "November", "December",
        ];
        format!("{} {}", MONTHS[(self.month - 1) as usize], self.year)
    }
}

/// Optional per-date metadata driving the cell's presentation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayAnnotation {
    pub location: Option<WorkLocation>,
    pub special: Option<SpecialDayKind>,
    pub note: Option<String>,
    pub in_wfh_period: bool,
}

/// Presentation state of a day cell, derived by priority:
/// closed > selected > WFH > office > default
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellState {
    Closed,
    Selected,
    Wfh,
    Office,
    Default,
}

pub fn cell_state(annotation: Option<&DayAnnotation>, selected: bool, weekend: bool) -> CellState {
    let closed = weekend
        || annotation
            .map(|a| a.special == Some(SpecialDayKind::Closed))
            .unwrap_or(false);
    if closed {
        return CellState::Closed;
    }
    if selected {
        return CellState::Selected;
    }
    if let Some(a) = annotation {
        if a.location == Some(WorkLocation::Wfh) || (a.location.is_none() && a.in_wfh_period) {
            return CellState::Wfh;
        }
        if a.location == Some(WorkLocation::Office) {
            return CellState::Office;
        }
    }
    CellState::Default
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionMode {
    Single,
    Range,
}

/// Ordered inclusive pair of dates; start never exceeds end
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl SelectionRange {
    /// Build from two endpoints in either order
    pub fn between(a: NaiveDate, b: NaiveDate) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Event emitted by the selection gesture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionEvent {
    Clicked(NaiveDate),
    RangeChanged(SelectionRange),
}

/// Two-step selection gesture over the grid.
///
/// Press on an enabled date anchors both endpoints and enters the
/// selecting state. Extending over another date recomputes (start, end)
/// as the min/max of anchor and hovered date. Release, or a second
/// press, leaves the selecting state. Disabled dates are a strict no-op.
#[derive(Debug, Clone, Default)]
pub struct GridSelection {
    range: Option<SelectionRange>,
    anchor: Option<NaiveDate>,
    selecting: bool,
}

impl GridSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn range(&self) -> Option<SelectionRange> {
        self.range
    }

    pub fn is_selecting(&self) -> bool {
        self.selecting
    }

    /// Clear any selection (callers do this after a successful submit)
    pub fn clear(&mut self) {
        self.range = None;
        self.anchor = None;
        self.selecting = false;
    }

    /// Press gesture (mouse down / Enter). Returns the emitted event, or
    /// None when the date is disabled.
    pub fn press(
        &mut self,
        date: NaiveDate,
        mode: SelectionMode,
        disabled: &HashSet<String>,
    ) -> Option<SelectionEvent> {
        if disabled.contains(&date_key(date)) {
            return None;
        }
        match mode {
            SelectionMode::Single => Some(SelectionEvent::Clicked(date)),
            SelectionMode::Range => {
                if !self.selecting || self.anchor.is_none() {
                    self.anchor = Some(date);
                    self.range = Some(SelectionRange::between(date, date));
                    self.selecting = true;
                } else {
                    let anchor = self.anchor.unwrap();
                    self.range = Some(SelectionRange::between(anchor, date));
                    self.selecting = false;
                }
                self.range.map(SelectionEvent::RangeChanged)
            }
        }
    }

    /// Extend gesture (mouse drag / cursor move while selecting)
    pub fn extend(&mut self, date: NaiveDate) -> Option<SelectionEvent> {
        if !self.selecting {
            return None;
        }
        let anchor = self.anchor?;
        self.range = Some(SelectionRange::between(anchor, date));
        self.range.map(SelectionEvent::RangeChanged)
    }

    /// Release gesture (mouse up) ends the selecting state
    pub fn release(&mut self) {
        self.selecting = false;
    }
}

/// Keyboard cursor over the grid; wraps month boundaries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridCursor {
    pub date: NaiveDate,
}

impl GridCursor {
    pub fn new(date: NaiveDate) -> Self {
        Self { date }
    }

    pub fn step_days(&mut self, days: i64) {
        let moved = if days >= 0 {
            self.date.checked_add_days(Days::new(days as u64))
        } else {
            self.date.checked_sub_days(Days::new((-days) as u64))
        };
        if let Some(d) = moved {
            self.date = d;
        }
    }
}

// Rendering

const CELL_WIDTH: u16 = 3;
const HEADER_ROWS: u16 = 2; // month name + weekday header

/// Calendar widget rendering a month of annotated day cells
pub struct CalendarWidget<'a> {
    grid: MonthGrid,
    annotations: &'a HashMap<String, DayAnnotation>,
    disabled: &'a HashSet<String>,
    selection: Option<SelectionRange>,
    cursor: Option<NaiveDate>,
    today: Option<NaiveDate>,
    title: String,
}

impl<'a> CalendarWidget<'a> {
    pub fn new(
        grid: MonthGrid,
        annotations: &'a HashMap<String, DayAnnotation>,
        disabled: &'a HashSet<String>,
    ) -> Self {
        Self {
            grid,
            annotations,
            disabled,
            selection: None,
            cursor: None,
            today: None,
            title: " Calendar ".to_string(),
        }
    }

    pub fn selection(mut self, selection: Option<SelectionRange>) -> Self {
        self.selection = selection;
        self
    }

    pub fn cursor(mut self, cursor: Option<NaiveDate>) -> Self {
        self.cursor = cursor;
        self
    }

    pub fn today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    fn day_style(&self, date: NaiveDate) -> Style {
        let key = date_key(date);
        let weekend = matches!(date.weekday().num_days_from_sunday(), 0 | 6);
        let selected = self
            .selection
            .map(|range| range.contains(date))
            .unwrap_or(false);
        let state = cell_state(self.annotations.get(&key), selected, weekend);

        let mut style = match state {
            CellState::Closed => Style::default().fg(Color::Red),
            CellState::Selected => Style::default().fg(Color::Black).bg(Color::Blue),
            CellState::Wfh => Style::default().fg(Color::Green),
            CellState::Office => Style::default().fg(Color::Cyan),
            CellState::Default => Style::default().fg(Color::White),
        };
        if self.disabled.contains(&key) {
            style = style.add_modifier(Modifier::DIM);
        }
        if self.today == Some(date) {
            style = style.add_modifier(Modifier::UNDERLINED);
        }
        if self.cursor == Some(date) {
            style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
        }
        style
    }
}

impl Widget for CalendarWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .title(self.title.clone())
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![
            Line::from(Span::styled(
                self.grid.name(),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Su Mo Tu We Th Fr Sa",
                Style::default().fg(Color::Yellow),
            )),
        ];

        let mut row: Vec<Span> = Vec::new();
        for _ in 0..self.grid.leading_blanks() {
            row.push(Span::raw("   "));
        }
        for day in 1..=self.grid.days_in_month() {
            // day is always in range for this grid
            let date = self.grid.date(day).unwrap();
            row.push(Span::styled(format!("{:>2} ", day), self.day_style(date)));
            if (self.grid.leading_blanks() + day) % 7 == 0 {
                lines.push(Line::from(std::mem::take(&mut row)));
            }
        }
        if !row.is_empty() {
            lines.push(Line::from(row));
        }

        Paragraph::new(lines).render(inner, buf);
    }
}

/// Map a terminal coordinate inside the widget's area back to the date
/// it renders, for mouse gestures. Returns None on blanks and borders.
pub fn hit_test(area: Rect, grid: MonthGrid, column: u16, row: u16) -> Option<NaiveDate> {
    // Mirror of the render layout: 1-cell border, two header rows, then
    // 7 cells of CELL_WIDTH per line.
    let inner_x = area.x.checked_add(1)?;
    let inner_y = area.y.checked_add(1)?;
    if column < inner_x || row < inner_y + HEADER_ROWS {
        return None;
    }
    let col_index = (column - inner_x) / CELL_WIDTH;
    if col_index > 6 {
        return None;
    }
    let row_index = row - inner_y - HEADER_ROWS;
    let cell = row_index as u32 * 7 + col_index as u32;
    if cell < grid.leading_blanks() {
        return None;
    }
    let day = cell - grid.leading_blanks() + 1;
    if day > grid.days_in_month() {
        return None;
    }
    grid.date(day)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_cell_count_is_blanks_plus_days() {
        // Exhaustive over a few years: the invariant must hold for any month
        for year in [2024, 2025, 2026] {
            for month in 1..=12 {
                let grid = MonthGrid::new(year, month);
                assert_eq!(
                    grid.cell_count(),
                    grid.leading_blanks() + grid.days_in_month(),
                    "{year}-{month}"
                );
                assert_eq!(
                    grid.leading_blanks(),
                    grid.first_day().weekday().num_days_from_sunday()
                );
            }
        }
    }

    #[test]
    fn test_known_month_layout() {
        // January 2026 starts on a Thursday and has 31 days
        let grid = MonthGrid::new(2026, 1);
        assert_eq!(grid.leading_blanks(), 4);
        assert_eq!(grid.days_in_month(), 31);
        assert_eq!(grid.cell_count(), 35);
    }

    #[test]
    fn test_february_leap_years() {
        assert_eq!(MonthGrid::new(2024, 2).days_in_month(), 29);
        assert_eq!(MonthGrid::new(2026, 2).days_in_month(), 28);
    }

    #[test]
    fn test_month_navigation_wraps_year() {
        assert_eq!(MonthGrid::new(2026, 1).prev(), MonthGrid::new(2025, 12));
        assert_eq!(MonthGrid::new(2025, 12).next(), MonthGrid::new(2026, 1));
    }

    #[test]
    fn test_range_order_is_normalized() {
        let mut selection = GridSelection::new();
        let disabled = HashSet::new();

        // Click Jan 10 then drag to Jan 5: reported range is (Jan 5, Jan 10)
        selection.press(d(2026, 1, 10), SelectionMode::Range, &disabled);
        let event = selection.extend(d(2026, 1, 5)).unwrap();
        assert_eq!(
            event,
            SelectionEvent::RangeChanged(SelectionRange {
                start: d(2026, 1, 5),
                end: d(2026, 1, 10),
            })
        );
        selection.release();
        assert!(!selection.is_selecting());
        let range = selection.range().unwrap();
        assert!(range.start <= range.end);
    }

    #[test]
    fn test_second_press_finishes_range() {
        let mut selection = GridSelection::new();
        let disabled = HashSet::new();

        selection.press(d(2026, 1, 3), SelectionMode::Range, &disabled);
        assert!(selection.is_selecting());
        let event = selection
            .press(d(2026, 1, 8), SelectionMode::Range, &disabled)
            .unwrap();
        assert!(!selection.is_selecting());
        assert_eq!(
            event,
            SelectionEvent::RangeChanged(SelectionRange {
                start: d(2026, 1, 3),
                end: d(2026, 1, 8),
            })
        );
    }

    #[test]
    fn test_forward_and_backward_clicks_agree() {
        let disabled = HashSet::new();
        for (a, b) in [(d(2026, 3, 2), d(2026, 3, 20)), (d(2026, 3, 20), d(2026, 3, 2))] {
            let mut selection = GridSelection::new();
            selection.press(a, SelectionMode::Range, &disabled);
            selection.press(b, SelectionMode::Range, &disabled);
            let range = selection.range().unwrap();
            assert_eq!(range.start, d(2026, 3, 2));
            assert_eq!(range.end, d(2026, 3, 20));
        }
    }

    #[test]
    fn test_disabled_date_is_a_no_op() {
        let mut selection = GridSelection::new();
        let mut disabled = HashSet::new();
        disabled.insert("2026-01-10".to_string());

        assert_eq!(
            selection.press(d(2026, 1, 10), SelectionMode::Range, &disabled),
            None
        );
        assert_eq!(selection.range(), None);
        assert!(!selection.is_selecting());

        assert_eq!(
            selection.press(d(2026, 1, 10), SelectionMode::Single, &disabled),
            None
        );
    }

    #[test]
    fn test_single_mode_emits_click() {
        let mut selection = GridSelection::new();
        let disabled = HashSet::new();
        assert_eq!(
            selection.press(d(2026, 1, 7), SelectionMode::Single, &disabled),
            Some(SelectionEvent::Clicked(d(2026, 1, 7)))
        );
        // Single mode never records a range
        assert_eq!(selection.range(), None);
    }

    #[test]
    fn test_extend_without_press_does_nothing() {
        let mut selection = GridSelection::new();
        assert_eq!(selection.extend(d(2026, 1, 7)), None);
    }

    #[test]
    fn test_cell_state_priority() {
        let closed = DayAnnotation {
            special: Some(SpecialDayKind::Closed),
            location: Some(WorkLocation::Wfh),
            ..Default::default()
        };
        // Closed wins over everything, selection included
        assert_eq!(cell_state(Some(&closed), true, false), CellState::Closed);

        let wfh = DayAnnotation {
            location: Some(WorkLocation::Wfh),
            ..Default::default()
        };
        assert_eq!(cell_state(Some(&wfh), true, false), CellState::Selected);
        assert_eq!(cell_state(Some(&wfh), false, false), CellState::Wfh);

        // Period membership only applies without an explicit choice
        let period_member = DayAnnotation {
            in_wfh_period: true,
            ..Default::default()
        };
        assert_eq!(cell_state(Some(&period_member), false, false), CellState::Wfh);
        let office_in_period = DayAnnotation {
            location: Some(WorkLocation::Office),
            in_wfh_period: true,
            ..Default::default()
        };
        assert_eq!(
            cell_state(Some(&office_in_period), false, false),
            CellState::Office
        );

        assert_eq!(cell_state(None, false, false), CellState::Default);
        assert_eq!(cell_state(None, false, true), CellState::Closed);
    }

    #[test]
    fn test_hit_test_round_trip() {
        let grid = MonthGrid::new(2026, 1);
        let area = Rect::new(5, 3, 26, 12);
        // First cell row starts after border (1) + header rows (2)
        let first_row = 3 + 1 + 2;
        // Jan 1 2026 sits at column index 4 (Thursday)
        let jan1_x = 5 + 1 + 4 * 3;
        assert_eq!(hit_test(area, grid, jan1_x, first_row), Some(d(2026, 1, 1)));
        // Blank cell before it maps to nothing
        assert_eq!(hit_test(area, grid, 5 + 1, first_row), None);
        // Second row, first column is Jan 4 (Sunday)
        assert_eq!(hit_test(area, grid, 5 + 1, first_row + 1), Some(d(2026, 1, 4)));
        // 4 blanks + 31 days fill the 35-cell grid, so the last cell is
        // Jan 31
        assert_eq!(
            hit_test(area, grid, 5 + 1 + 6 * 3, first_row + 4),
            Some(d(2026, 1, 31))
        );
    }

    #[test]
    fn test_hit_test_trailing_blanks_map_to_nothing() {
        // March 2026 starts on a Sunday and ends mid-row
        let grid = MonthGrid::new(2026, 3);
        let area = Rect::new(5, 3, 26, 12);
        let first_row = 3 + 1 + 2;
        assert_eq!(
            hit_test(area, grid, 5 + 1, first_row + 4),
            Some(d(2026, 3, 29))
        );
        assert_eq!(hit_test(area, grid, 5 + 1 + 6 * 3, first_row + 4), None);
    }

    #[test]
    fn test_cursor_steps() {
        let mut cursor = GridCursor::new(d(2026, 1, 31));
        cursor.step_days(1);
        assert_eq!(cursor.date, d(2026, 2, 1));
        cursor.step_days(-7);
        assert_eq!(cursor.date, d(2026, 1, 25));
    }
}
