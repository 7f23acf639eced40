/// User administration page: pending registrations and the full user list
use crate::stores::Stores;
use crate::stores::users_store::UsersTab;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget},
};

pub fn render(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.users.get_state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(area);

    let status = if state.is_loading {
        Span::styled("Loading...", Style::default().fg(Color::Yellow))
    } else if let Some(error) = &state.error {
        Span::styled(error.as_str(), Style::default().fg(Color::Red))
    } else {
        Span::raw(format!(
            "{} pending, {} active",
            state.pending.len(),
            state.users.len()
        ))
    };
    Paragraph::new(Line::from(vec![Span::raw(" "), status]))
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[0], frame.buffer_mut());

    let lists = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(chunks[1]);

    render_pending(frame, lists[0], &state);
    render_all(frame, lists[1], &state);
}

fn tab_border(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    }
}

fn render_pending(
    frame: &mut Frame,
    area: Rect,
    state: &crate::stores::users_store::UsersState,
) {
    let items: Vec<ListItem> = state
        .pending
        .iter()
        .map(|user| {
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {}", user.name)),
                Span::styled(
                    format!("  <{}>", user.email),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let empty = items.is_empty();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Pending approval ")
                .border_style(tab_border(state.tab == UsersTab::Pending)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !empty && state.tab == UsersTab::Pending {
        list_state.select(Some(state.pending_index));
    }
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut list_state);
}

fn render_all(frame: &mut Frame, area: Rect, state: &crate::stores::users_store::UsersState) {
    let items: Vec<ListItem> = state
        .users
        .iter()
        .map(|user| {
            let team = user
                .team_id
                .map(|id| format!("team {id}"))
                .unwrap_or_else(|| "no team".to_string());
            ListItem::new(Line::from(vec![
                Span::raw(format!(" {}", user.name)),
                Span::styled(
                    format!("  {}", user.role),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!("  {team}"),
                    Style::default().fg(Color::DarkGray),
                ),
            ]))
        })
        .collect();
    let empty = items.is_empty();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" All users ")
                .border_style(tab_border(state.tab == UsersTab::All)),
        )
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut list_state = ListState::default();
    if !empty && state.tab == UsersTab::All {
        list_state.select(Some(state.users_index));
    }
    StatefulWidget::render(list, area, frame.buffer_mut(), &mut list_state);
}
