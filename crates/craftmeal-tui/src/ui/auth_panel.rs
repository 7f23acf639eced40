/// Sign-in and registration forms
use crate::actions::Route;
use crate::stores::Stores;
use crate::ui::layout::centered_rect;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub fn render(frame: &mut Frame, area: Rect, stores: &Stores) {
    match stores.ui.get_state().route {
        Route::Register => render_register(frame, area, stores),
        _ => render_login(frame, area, stores),
    }
}

fn render_login(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.auth.get_state();
    let rect = centered_rect(area, 48, 14);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Sign in to CraftMeal ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(rect);
    block.render(rect, frame.buffer_mut());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // status line
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    if let Some(error) = &state.server_error {
        Paragraph::new(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))
        .render(chunks[0], frame.buffer_mut());
    } else if let Some(info) = &state.info_message {
        Paragraph::new(Span::styled(
            info.as_str(),
            Style::default().fg(Color::Green),
        ))
        .render(chunks[0], frame.buffer_mut());
    }

    state
        .username
        .render(chunks[1], frame.buffer_mut(), state.focus == 0);
    state
        .password
        .render(chunks[2], frame.buffer_mut(), state.focus == 1);

    let hint = if state.busy {
        "Signing in..."
    } else {
        "No account yet? Press F2 to register"
    };
    Paragraph::new(Line::from(Span::styled(
        hint,
        Style::default().fg(Color::DarkGray),
    )))
    .render(chunks[3], frame.buffer_mut());
}

fn render_register(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.auth.get_state();
    let rect = centered_rect(area, 52, 24);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Register ")
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(rect);
    block.render(rect, frame.buffer_mut());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status line
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(inner);

    if let Some(error) = &state.server_error {
        Paragraph::new(Span::styled(
            error.as_str(),
            Style::default().fg(Color::Red),
        ))
        .render(chunks[0], frame.buffer_mut());
    }

    let fields = [
        &state.reg_username,
        &state.reg_email,
        &state.reg_name,
        &state.reg_password,
        &state.reg_confirm,
        &state.reg_team_id,
    ];
    for (i, field) in fields.iter().enumerate() {
        field.render(chunks[i + 1], frame.buffer_mut(), state.focus == i);
    }

    let hint = if state.busy {
        "Submitting..."
    } else {
        "New accounts need admin approval before signing in"
    };
    Paragraph::new(Span::styled(
        hint,
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    ))
    .render(chunks[7], frame.buffer_mut());
}
