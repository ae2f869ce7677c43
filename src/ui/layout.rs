//! Layout components (tabs, banner, countdown, status bar)

use crate::app::App;
use crate::forms::FormKind;
use crate::shortcuts::{CLEAR_SHORTCUT, DISMISS_SHORTCUT, SUBMIT_SHORTCUT};
use crate::submission::SubmissionStatus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

/// Regions of the screen
pub struct ScreenAreas {
    pub banner: Option<Rect>,
    pub header: Rect,
    pub body: Rect,
    pub status: Rect,
}

/// Split the screen; the banner row only exists while it is visible
pub fn create_layout(area: Rect, show_banner: bool) -> ScreenAreas {
    let banner_height = if show_banner { 1 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Banner
            Constraint::Length(3),             // Tabs + countdown
            Constraint::Min(0),                // Form
            Constraint::Length(1),             // Status bar
        ])
        .split(area);

    ScreenAreas {
        banner: show_banner.then_some(chunks[0]),
        header: chunks[1],
        body: chunks[2],
        status: chunks[3],
    }
}

pub fn draw_banner(frame: &mut Frame, area: Rect, app: &App) {
    let line = Line::from(vec![
        Span::styled(
            format!(" {} ", app.banner.message()),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {DISMISS_SHORTCUT}:dismiss "),
            Style::default().fg(Color::Gray),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(line).style(Style::default().bg(Color::Magenta)),
        area,
    );
}

/// Form tabs on the left, countdown on the right
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    let titles: Vec<Line> = FormKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| Line::from(format!("F{} {}", i + 1, kind.title())))
        .collect();
    let selected = FormKind::ALL
        .iter()
        .position(|k| *k == app.state.current_form)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(" FinFest "))
        .highlight_style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, chunks[0]);

    let left = app.countdown.time_left();
    let text = if app.countdown.has_ended() || left.is_zero() {
        "Happening now!".to_string()
    } else {
        format!(
            "{}d {:02}h {:02}m {:02}s",
            left.days, left.hours, left.minutes, left.seconds
        )
    };
    let countdown = Paragraph::new(Span::styled(text, Style::default().fg(Color::Yellow)))
        .block(Block::default().borders(Borders::ALL).title(" Countdown "));
    frame.render_widget(countdown, chunks[1]);
}

/// Draw the status bar with the current form's result
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let session = app.state.current();
    let mut spans = vec![Span::styled(
        format!(" {} ", get_form_hints()),
        Style::default().fg(Color::Gray),
    )];

    match session.status() {
        SubmissionStatus::Idle => {}
        SubmissionStatus::Submitting => {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                "Sending...",
                Style::default().fg(Color::Yellow),
            ));
        }
        SubmissionStatus::Success => {
            if let Some(msg) = session.success_message() {
                spans.push(Span::raw(" | "));
                spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
            }
        }
        SubmissionStatus::Error => {
            if let Some(err) = session.error() {
                // Input problems point at a field; backend failures do not
                let color = if err.is_validation() {
                    Color::LightRed
                } else {
                    Color::Red
                };
                spans.push(Span::raw(" | "));
                spans.push(Span::styled(
                    err.message().to_string(),
                    Style::default().fg(color),
                ));
            }
        }
    }

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg.clone(), Style::default().fg(Color::Blue)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Keyboard hints shown on every form
fn get_form_hints() -> String {
    format!("Tab:next  Enter:next/submit  {SUBMIT_SHORTCUT}:submit  {CLEAR_SHORTCUT}:clear  F1-F3:form  Esc:quit")
}
