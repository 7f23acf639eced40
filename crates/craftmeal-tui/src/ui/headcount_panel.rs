/// Headcount page: aggregate meal counts with expandable user lists
use crate::stores::Stores;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Row, StatefulWidget, Table, Widget},
};

pub fn render(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.headcount.get_state();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(8),
            Constraint::Percentage(40),
        ])
        .split(area);

    let status = if state.is_loading {
        Span::styled("Loading...", Style::default().fg(Color::Yellow))
    } else if let Some(error) = &state.error {
        Span::styled(error.as_str(), Style::default().fg(Color::Red))
    } else if let Some(summary) = &state.summary {
        Span::raw(format!(
            "{} | {} employees",
            summary.date, summary.total_employees
        ))
    } else {
        Span::styled("No data", Style::default().fg(Color::DarkGray))
    };
    Paragraph::new(Line::from(vec![Span::raw(" "), status]))
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[0], frame.buffer_mut());

    render_summary_table(frame, chunks[1], &state);
    render_user_list(frame, chunks[2], &state);
}

fn render_summary_table(
    frame: &mut Frame,
    area: Rect,
    state: &crate::stores::headcount_store::HeadcountState,
) {
    let rows: Vec<Row> = state
        .summary
        .iter()
        .flat_map(|s| s.meal_counts.iter())
        .enumerate()
        .map(|(i, count)| {
            let style = if i == state.cursor {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let marker = if state.expanded.as_deref() == Some(count.meal_type.as_str()) {
                "v"
            } else {
                ">"
            };
            Row::new(vec![
                format!("{marker} {}", count.meal_type),
                count.opted_in.to_string(),
                count.opted_out.to_string(),
                format!("{:.0}%", count.opted_in_percentage),
            ])
            .style(style)
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Min(16),
            Constraint::Length(8),
            Constraint::Length(8),
            Constraint::Length(8),
        ],
    )
    .header(
        Row::new(vec!["Meal", "In", "Out", "In %"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Today's headcount ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    Widget::render(table, area, frame.buffer_mut());
}

fn render_user_list(
    frame: &mut Frame,
    area: Rect,
    state: &crate::stores::headcount_store::HeadcountState,
) {
    let Some(meal_type) = state.expanded.as_deref() else {
        Paragraph::new(Span::styled(
            " Press Enter on a meal to see who opted in",
            Style::default().fg(Color::DarkGray),
        ))
        .block(Block::default().borders(Borders::ALL))
        .render(area, frame.buffer_mut());
        return;
    };

    let title = format!(" {meal_type} ");
    match state.user_lists.get(meal_type) {
        Some(list) => {
            let items: Vec<ListItem> = list
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
                            format!("  ({team})"),
                            Style::default().fg(Color::DarkGray),
                        ),
                    ]))
                })
                .collect();
            let list_widget = List::new(items).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!("{title}({} opted in) ", list.opted_in_count)),
            );
            let mut list_state = ListState::default();
            StatefulWidget::render(list_widget, area, frame.buffer_mut(), &mut list_state);
        }
        None => {
            Paragraph::new(Span::styled(
                " Loading...",
                Style::default().fg(Color::Yellow),
            ))
            .block(Block::default().borders(Borders::ALL).title(title))
            .render(area, frame.buffer_mut());
        }
    }
}
