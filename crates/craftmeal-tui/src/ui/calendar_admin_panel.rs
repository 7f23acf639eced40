/// Calendar administration page: WFH periods and special days
use crate::common::calendar::CalendarWidget;
use crate::stores::Stores;
use crate::stores::calendar_admin_store::AdminPane;
use crate::ui::layout::centered_rect;
use craftmeal_core::models::SpecialDayKind;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget,
    },
};

pub fn render(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.calendar_admin.get_state();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(1)])
        .split(area);

    stores.calendar_admin.set_calendar_area(chunks[0]);

    let annotations = state.month_annotations();
    let disabled = std::collections::HashSet::new();
    let mut title = " Company calendar ".to_string();
    if state.is_loading {
        title = " Company calendar (loading...) ".to_string();
    } else if state.is_saving {
        title = " Company calendar (saving...) ".to_string();
    }
    let mut widget = CalendarWidget::new(state.grid, &annotations, &disabled)
        .selection(state.selection.range())
        .today(chrono::Local::now().date_naive())
        .title(title);
    if state.pane == AdminPane::Calendar {
        widget = widget.cursor(Some(state.cursor.date));
    }
    widget.render(chunks[0], frame.buffer_mut());

    let lists = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[1]);

    render_periods(frame, lists[0], &state);
    render_special_days(frame, lists[1], &state);

    if state.form_open {
        render_special_day_form(frame, area, &state);
    }
}

fn pane_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_periods(
    frame: &mut Frame,
    area: Rect,
    state: &crate::stores::calendar_admin_store::CalendarAdminState,
) {
    let items: Vec<ListItem> = state
        .wfh_periods
        .iter()
        .map(|p| ListItem::new(format!(" {} to {}", p.start_date, p.end_date)))
        .collect();
    let empty = items.is_empty();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" WFH periods ")
                .border_style(pane_border(state.pane == AdminPane::Periods)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !empty && state.pane == AdminPane::Periods {
        list_state.select(Some(state.period_index));
    }
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut list_state);
}

fn render_special_days(
    frame: &mut Frame,
    area: Rect,
    state: &crate::stores::calendar_admin_store::CalendarAdminState,
) {
    let items: Vec<ListItem> = state
        .special_days
        .iter()
        .map(|day| {
            let color = match day.kind {
                SpecialDayKind::Closed => Color::Red,
                SpecialDayKind::Holiday => Color::Yellow,
                SpecialDayKind::Celebration => Color::Magenta,
            };
            let mut spans = vec![
                Span::raw(format!(" {} ", day.date)),
                Span::styled(day.kind.to_string(), Style::default().fg(color)),
            ];
            if let Some(note) = &day.note {
                spans.push(Span::styled(
                    format!("  {note}"),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();
    let empty = items.is_empty();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Special days ")
                .border_style(pane_border(state.pane == AdminPane::SpecialDays)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !empty && state.pane == AdminPane::SpecialDays {
        list_state.select(Some(state.special_index));
    }
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut list_state);
}

fn render_special_day_form(
    frame: &mut Frame,
    area: Rect,
    state: &crate::stores::calendar_admin_store::CalendarAdminState,
) {
    let rect = centered_rect(area, 44, 10);
    Clear.render(rect, frame.buffer_mut());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" New special day ")
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(rect);
    block.render(rect, frame.buffer_mut());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    let kind = SpecialDayKind::ALL[state.form_kind];
    Paragraph::new(Line::from(format!(
        "Date: {}",
        craftmeal_core::models::date_key(state.cursor.date)
    )))
    .render(chunks[0], frame.buffer_mut());
    Paragraph::new(Line::from(vec![
        Span::raw("Type: "),
        Span::styled(kind.to_string(), Style::default().fg(Color::Cyan)),
        Span::styled("  (Tab to change)", Style::default().fg(Color::DarkGray)),
    ]))
    .render(chunks[1], frame.buffer_mut());

    state.form_note.render(chunks[2], frame.buffer_mut(), true);

    Paragraph::new(Span::styled(
        "Enter: Create   Esc: Cancel",
        Style::default().fg(Color::DarkGray),
    ))
    .render(chunks[3], frame.buffer_mut());
}
