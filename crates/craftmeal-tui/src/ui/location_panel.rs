/// My-location page: month calendar of work locations plus the
/// location picker modal
use crate::common::calendar::CalendarWidget;
use crate::stores::Stores;
use craftmeal_core::models::date_key;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

pub fn render(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.location.get_state();

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(30), Constraint::Min(1)])
        .split(area);

    // The keyboard/mouse layer reads this back for hit-testing
    stores.location.set_calendar_area(chunks[0]);

    let annotations = state.month_annotations();
    let disabled = state.disabled_keys();
    let title = if state.is_loading() {
        " My location (loading...) ".to_string()
    } else {
        " My location ".to_string()
    };
    CalendarWidget::new(state.grid, &annotations, &disabled)
        .cursor(Some(state.cursor.date))
        .today(state.today)
        .title(title)
        .render(chunks[0], frame.buffer_mut());

    render_details(frame, chunks[1], stores);

    if let Some(date) = stores.location.modal_date() {
        render_modal(frame, area, &date_key(date));
    }
}

fn render_details(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.location.get_state();
    let key = date_key(state.cursor.date);
    let annotation = state.month_annotations().get(&key).cloned();

    let mut lines = vec![
        Line::from(Span::styled(
            key.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    match &annotation {
        Some(a) => {
            if let Some(kind) = a.special {
                lines.push(Line::from(Span::styled(
                    format!("Special day: {kind}"),
                    Style::default().fg(Color::Red),
                )));
                if let Some(note) = &a.note {
                    lines.push(Line::from(note.as_str()));
                }
                lines.push(Line::from(""));
            }
            let location = match a.location {
                Some(loc) => loc.label().to_string(),
                None if a.in_wfh_period => "WFH (company-wide period)".to_string(),
                None => "Not set".to_string(),
            };
            lines.push(Line::from(format!("Location: {location}")));
        }
        None => lines.push(Line::from("No data for this day")),
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Legend: green WFH, cyan office, red closed",
        Style::default().fg(Color::DarkGray),
    )));
    if let Some(error) = &state.error {
        lines.push(Line::from(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        )));
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Day details "),
        )
        .render(area, frame.buffer_mut());
}

fn render_modal(frame: &mut Frame, area: Rect, date: &str) {
    let rect = crate::ui::layout::centered_rect(area, 40, 7);
    Clear.render(rect, frame.buffer_mut());
    Paragraph::new(vec![
        Line::from(format!("Where are you working on {date}?")),
        Line::from(""),
        Line::from(vec![
            Span::styled("o", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
            Span::raw(": Office   "),
            Span::styled("w", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(": WFH   "),
            Span::styled("Esc", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(": Cancel"),
        ]),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Set location ")
            .border_style(Style::default().fg(Color::Yellow)),
    )
    .render(rect, frame.buffer_mut());
}
