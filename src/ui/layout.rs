//! Layout components (sidebar, status bar)

use super::components::{render_sidebar_button, ButtonState, BUTTON_HEIGHT};
use crate::app::App;
use crate::platform::{SAVE_SHORTCUT, SUBMIT_SHORTCUT};
use crate::state::View;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Sidebar items
const SIDEBAR_ITEMS: &[&str] = &["Forms", "Builder", "Preview", "Responses"];

/// Create the main layout with sidebar
pub fn create_layout(area: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(20), // Sidebar
            Constraint::Min(0),     // Main content
        ])
        .split(area);

    // Reserve bottom line for status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[1]);

    let sidebar_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(chunks[0]);

    (sidebar_chunks[0], main_chunks[0])
}

/// Sidebar slot highlighted for a view
fn sidebar_index(view: View) -> usize {
    match view {
        View::FormList | View::FormCreate => 0,
        View::Builder | View::FieldEditor => 1,
        View::Preview => 2,
        View::Responses => 3,
    }
}

/// Draw the sidebar with boxed buttons
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                // Top padding (flex)
            Constraint::Length(BUTTON_HEIGHT), // Forms
            Constraint::Length(BUTTON_HEIGHT), // Builder
            Constraint::Length(BUTTON_HEIGHT), // Preview
            Constraint::Length(BUTTON_HEIGHT), // Responses
            Constraint::Min(0),                // Bottom padding (flex)
        ])
        .split(area);

    let selected = sidebar_index(app.state.current_view);
    // Views other than the list need a form to be open
    let enabled = [
        true,
        app.state.draft.is_some(),
        app.state.preview.is_some(),
        app.state.responses_form.is_some(),
    ];
    let badges = [
        Some(app.state.forms.len()),
        app.state.draft.as_ref().map(|d| d.fields.len()),
        None,
        app.state
            .responses_form
            .as_ref()
            .map(|_| app.state.responses.len()),
    ];

    for (idx, label) in SIDEBAR_ITEMS.iter().enumerate() {
        let state = ButtonState::new(idx == selected, enabled[idx]);
        render_sidebar_button(frame, chunks[idx + 1], label, badges[idx], state);
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let status_area = Rect {
        x: 0,
        y: area.height.saturating_sub(1),
        width: area.width,
        height: 1,
    };

    let mut spans = vec![Span::raw(" ")];

    let hints = get_view_hints(app.state.current_view);
    spans.push(Span::styled(hints, Style::default().fg(Color::Gray)));

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    if !app.data_location.is_empty() {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(
            format!("📁 {}", app.data_location),
            Style::default().fg(Color::Blue),
        ));
    }

    let quit_hint = " ^C:quit ";

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, status_area);

    let quit_area = Rect {
        x: area.width.saturating_sub(quit_hint.len() as u16),
        y: area.height.saturating_sub(1),
        width: (quit_hint.len() as u16).min(area.width),
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

/// Get keyboard hints for the current view
fn get_view_hints(view: View) -> String {
    match view {
        View::FormList => {
            "j/k:nav  n:new  Enter:edit  p:preview  r:responses  d:delete  q:quit".to_string()
        }
        View::FormCreate => "Enter:create  Esc:cancel".to_string(),
        View::Builder => format!(
            "a:add  Enter:edit  d:delete  J/K:move  {SAVE_SHORTCUT}:save  Esc:discard"
        ),
        View::FieldEditor => format!("Tab:next  ←/→:type  {SAVE_SHORTCUT}:save  Esc:cancel"),
        View::Preview => format!("Tab:next  ←/→:choose  Space:check  {SUBMIT_SHORTCUT}:submit  Esc:back"),
        View::Responses => "j/k:nav  y:copy  Esc:back".to_string(),
    }
}
