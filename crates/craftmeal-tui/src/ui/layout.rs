/// Layout manager for the TUI application
use crate::actions::{Route, ToastLevel};
use crate::stores::Stores;
use crate::ui::{
    auth_panel, calendar_admin_panel, headcount_panel, location_panel, meals_panel,
    participation_panel, users_panel,
};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget, Wrap},
};

/// Render the complete application layout
pub fn render_layout(frame: &mut Frame, stores: &Stores) {
    let area = frame.area();

    // Main layout: Header | Content | Footer
    let vertical_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(area);

    render_header(frame, vertical_chunks[0], stores);

    let route = stores.ui.get_state().route;
    match route {
        Route::Login | Route::Register => auth_panel::render(frame, vertical_chunks[1], stores),
        Route::Meals => meals_panel::render(frame, vertical_chunks[1], stores),
        Route::MyLocation => location_panel::render(frame, vertical_chunks[1], stores),
        Route::CalendarAdmin => {
            calendar_admin_panel::render(frame, vertical_chunks[1], stores)
        }
        Route::Headcount => headcount_panel::render(frame, vertical_chunks[1], stores),
        Route::Participation => participation_panel::render(frame, vertical_chunks[1], stores),
        Route::Users => users_panel::render(frame, vertical_chunks[1], stores),
    }

    render_footer(frame, vertical_chunks[2], route);
    render_toasts(frame, area, stores);

    if stores.ui.get_state().show_help {
        render_help(frame, area, stores);
    }
}

fn render_header(frame: &mut Frame, area: Rect, stores: &Stores) {
    let route = stores.ui.get_state().route;
    let mut spans = vec![
        Span::styled(
            " CraftMeal ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("| "),
        Span::styled(route.title(), Style::default().add_modifier(Modifier::BOLD)),
    ];
    if let Some(session) = stores.session.get_state() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("{} ({})", session.user().name, session.role()),
            Style::default().fg(Color::Green),
        ));
    }

    Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
}

fn render_footer(frame: &mut Frame, area: Rect, route: Route) {
    let help_text = match route {
        Route::Login => "Enter:Sign in | Tab:Next field | F2:Register | Esc:Quit",
        Route::Register => "Enter:Submit | Tab:Next field | Esc:Back to login",
        Route::Meals => "Space:Toggle | s:Save | j/k:Move | r:Refresh | 1-6:Pages | q:Quit",
        Route::MyLocation => {
            "Arrows:Move | Enter:Set location | PgUp/PgDn:Month | r:Refresh | q:Quit"
        }
        Route::CalendarAdmin => {
            "Enter:Select range | p:Create period | n:Special day | d:Delete | Tab:Pane | q:Quit"
        }
        Route::Headcount => "j/k:Move | Enter:Expand meal | r:Refresh | q:Quit",
        Route::Participation => "j/k:Move | Enter:Edit | r:Refresh | q:Quit",
        Route::Users => "Tab:Lists | a:Approve | x:Reject | c:Cycle role | d:Delete | q:Quit",
    };

    Paragraph::new(Line::from(vec![Span::raw(" "), Span::raw(help_text)]))
        .style(Style::default().fg(Color::DarkGray))
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
}

/// Toasts stack bottom-up in the bottom-right corner
fn render_toasts(frame: &mut Frame, area: Rect, stores: &Stores) {
    let toasts = stores.ui.get_state().toasts;
    if toasts.is_empty() {
        return;
    }

    let width = 44.min(area.width);
    for (i, toast) in toasts.iter().rev().take(5).enumerate() {
        let height = 3;
        let y = area
            .height
            .saturating_sub(4 + (i as u16 + 1) * height);
        let rect = Rect::new(area.width.saturating_sub(width + 1), y, width, height);

        let (color, title) = match toast.level {
            ToastLevel::Success => (Color::Green, " OK "),
            ToastLevel::Warning => (Color::Yellow, " Warning "),
            ToastLevel::Error => (Color::Red, " Error "),
        };
        Clear.render(rect, frame.buffer_mut());
        Paragraph::new(toast.message.as_str())
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(title)
                    .border_style(Style::default().fg(color)),
            )
            .render(rect, frame.buffer_mut());
    }
}

fn render_help(frame: &mut Frame, area: Rect, stores: &Stores) {
    let rect = centered_rect(area, 60, 16);
    let mut lines = vec![
        Line::from("1: My meals        2: My location"),
        Line::from(""),
    ];
    if let Some(session) = stores.session.get_state() {
        if session.can_view_roster() {
            lines.push(Line::from("3: Headcount       5: Participation"));
        }
        if session.can_manage_calendar() {
            lines.push(Line::from("4: Calendar admin"));
        }
        if session.is_admin() {
            lines.push(Line::from("6: Users"));
        }
    }
    lines.extend([
        Line::from(""),
        Line::from("L: Log out         q: Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ]);

    Clear.render(rect, frame.buffer_mut());
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(Color::Cyan)),
        )
        .render(rect, frame.buffer_mut());
}

/// Fixed-size rect centered inside the given area
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
