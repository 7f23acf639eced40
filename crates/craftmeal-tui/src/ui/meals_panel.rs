/// Today's meal participation page
use crate::stores::Stores;
use craftmeal_core::models::MealType;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

pub fn render(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.meals.get_state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let status = if state.is_loading {
        Span::styled("Loading...", Style::default().fg(Color::Yellow))
    } else if state.is_saving {
        Span::styled("Saving...", Style::default().fg(Color::Yellow))
    } else if let Some(error) = &state.error {
        Span::styled(error.as_str(), Style::default().fg(Color::Red))
    } else if state.is_dirty() {
        Span::styled(
            "Unsaved changes, press s to save",
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled("Up to date", Style::default().fg(Color::Green))
    };
    let date = state
        .record
        .as_ref()
        .map(|r| r.date.clone())
        .unwrap_or_default();
    Paragraph::new(Line::from(vec![
        Span::raw(format!(" {date} | ")),
        status,
    ]))
    .block(Block::default().borders(Borders::ALL))
    .render(chunks[0], frame.buffer_mut());

    let items: Vec<ListItem> = MealType::ALL
        .iter()
        .map(|meal| {
            let opted_in = state.edits.get(meal).copied().unwrap_or(false);
            let mark = if opted_in { "[x]" } else { "[ ]" };
            let style = if opted_in {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            ListItem::new(Line::from(Span::styled(
                format!(" {mark} {}", meal.label()),
                style,
            )))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Today's meals ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    list_state.select(Some(state.cursor));
    StatefulWidget::render(list, chunks[1], frame.buffer_mut(), &mut list_state);
}
