//! Form rendering for login, signup and contact

use crate::app::App;
use crate::forms::{FieldSpec, FieldValue};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Height of a single-line field box
const FIELD_HEIGHT: u16 = 3;
/// Height of a multiline field box
const MULTILINE_HEIGHT: u16 = 6;

/// Draw a form field
fn draw_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
    has_error: bool,
) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let border_style = if has_error {
        Style::default().fg(Color::Red)
    } else if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .lines()
            .map(|l| Line::from(l.to_string()))
            .collect();
        if is_active {
            // A trailing newline means the cursor sits on a fresh line
            if value.ends_with('\n') {
                lines.push(Line::default());
            }
            if let Some(last) = lines.last_mut() {
                last.spans
                    .push(Span::styled(cursor, Style::default().fg(Color::Cyan)));
            } else {
                lines.push(Line::from(Span::styled(
                    cursor,
                    Style::default().fg(Color::Cyan),
                )));
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value.to_string(), style),
            Span::styled(cursor, Style::default().fg(Color::Cyan)),
        ]))
    };

    let block = Block::default()
        .title(format!(" {} ", label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(content.wrap(Wrap { trim: false }).block(block), area);
}

/// Text shown in a field box
fn field_display(spec: &FieldSpec, value: Option<&FieldValue>, file_path: &str) -> String {
    if spec.is_file() {
        return match value.and_then(FieldValue::as_file) {
            Some(file) if file_path.is_empty() => FieldValue::File(Some(file.clone())).display_value(),
            _ => file_path.to_string(),
        };
    }
    let text = value.map(FieldValue::as_text).unwrap_or("");
    if spec.is_secret() {
        "•".repeat(text.chars().count())
    } else {
        text.to_string()
    }
}

/// Draw the form currently on screen
pub fn draw_current_form(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.state.current();
    let kind = session.kind();
    let values = session.values();
    let specs = kind.fields();
    let error_field = session.error().and_then(|e| e.field());

    let block = Block::default()
        .title(format!(" {} ", kind.title()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints: Vec<Constraint> = specs
        .iter()
        .map(|spec| {
            if spec.is_multiline() {
                Constraint::Length(MULTILINE_HEIGHT)
            } else {
                Constraint::Length(FIELD_HEIGHT)
            }
        })
        .collect();
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (idx, spec) in specs.iter().enumerate() {
        let display = field_display(spec, values.get(spec.name), &app.state.college_id_path);
        draw_field(
            frame,
            chunks[idx],
            spec.label,
            &display,
            values.active_field() == idx,
            spec.is_multiline(),
            error_field == Some(spec.name),
        );
    }
}
