/// Cross-user participation page: admin table plus the inline meal editor
use crate::stores::Stores;
use crate::ui::layout::centered_rect;
use craftmeal_core::models::MealType;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, Widget},
};

pub fn render(frame: &mut Frame, area: Rect, stores: &Stores) {
    let state = stores.participation.get_state();

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
    } else {
        Span::raw(format!("{} users", state.rows.len()))
    };
    Paragraph::new(Line::from(vec![Span::raw(" "), status]))
        .block(Block::default().borders(Borders::ALL))
        .render(chunks[0], frame.buffer_mut());

    let rows: Vec<Row> = state
        .rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let style = if i == state.cursor {
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            let mut cells = vec![row.name.clone(), row.role.to_string()];
            for meal in MealType::ALL {
                let opted_in = row.meals.get(&meal).copied().unwrap_or(false);
                cells.push(if opted_in { "x".to_string() } else { "-".to_string() });
            }
            Row::new(cells).style(style)
        })
        .collect();

    let mut widths = vec![Constraint::Min(20), Constraint::Length(10)];
    widths.extend(MealType::ALL.iter().map(|_| Constraint::Length(8)));

    let mut header = vec!["Name".to_string(), "Role".to_string()];
    header.extend(MealType::ALL.iter().map(|m| m.label().to_string()));

    let table = Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Participation ")
                .border_style(Style::default().fg(Color::Cyan)),
        );
    Widget::render(table, chunks[1], frame.buffer_mut());

    if let Some(editor) = &state.editor {
        render_editor(frame, area, editor);
    }
}

fn render_editor(
    frame: &mut Frame,
    area: Rect,
    editor: &crate::stores::participation_store::EditorState,
) {
    let rect = centered_rect(area, 40, 5 + MealType::ALL.len() as u16);
    Clear.render(rect, frame.buffer_mut());

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Meals for {} ", editor.name))
        .border_style(Style::default().fg(Color::Yellow));
    let inner = block.inner(rect);
    block.render(rect, frame.buffer_mut());

    let mut lines: Vec<Line> = MealType::ALL
        .iter()
        .enumerate()
        .map(|(i, meal)| {
            let opted_in = editor.meals.get(meal).copied().unwrap_or(false);
            let mark = if opted_in { "[x]" } else { "[ ]" };
            let mut style = if opted_in {
                Style::default().fg(Color::Green)
            } else {
                Style::default()
            };
            if i == editor.meal_cursor {
                style = style.bg(Color::DarkGray).add_modifier(Modifier::BOLD);
            }
            Line::from(Span::styled(format!(" {mark} {}", meal.label()), style))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        " Space: Toggle   Enter: Save   Esc: Cancel",
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).render(inner, frame.buffer_mut());
}
