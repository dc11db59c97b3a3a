//! New form dialog

use super::field_renderer::{draw_field_with_value, draw_help_text};
use crate::app::App;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the form name prompt
pub fn draw_form_create(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .title(" Create New Form ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Name
            Constraint::Length(1), // Help
            Constraint::Min(0),
        ])
        .margin(1)
        .split(inner);

    let name = &app.state.form_name;
    draw_field_with_value(frame, chunks[0], &name.label, name.as_text(), true, false);
    draw_help_text(frame, chunks[1], &[("Enter", "create"), ("Esc", "cancel")]);
}
