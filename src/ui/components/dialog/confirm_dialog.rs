//! Confirmation dialog for deleting a form

use super::base::{centered_area, render_dialog_box};
use crate::state::PendingDeleteAction;
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

const DIALOG_WIDTH: u16 = 50;
const DIALOG_HEIGHT: u16 = 12;

/// Render a confirmation dialog for deleting a form and its responses
pub fn render_confirm_dialog(frame: &mut Frame, action: &PendingDeleteAction) {
    let dialog_area = centered_area(frame.area(), DIALOG_WIDTH, DIALOG_HEIGHT);

    let max_display_len = (DIALOG_WIDTH - 6) as usize;
    let display_name = truncate_string(&action.form_name, max_display_len);

    let responses_note = match action.response_count {
        0 => "It has no responses.".to_string(),
        1 => "Its 1 response will also be deleted.".to_string(),
        n => format!("Its {n} responses will also be deleted."),
    };

    let mut content = vec![
        Line::from(Span::styled(
            "Confirm Delete",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Are you sure you want to delete"),
        Line::from(vec![
            Span::styled(display_name, Style::default().fg(Color::Cyan)),
            Span::raw("?"),
        ]),
        Line::from(Span::styled(
            responses_note,
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
    ];

    // Cancel first, so Enter on the default selection is harmless
    for (is_delete, label, color) in [(false, "Cancel", Color::White), (true, "Delete", Color::Red)] {
        let is_selected = action.selected_option == is_delete;
        let prefix = if is_selected { "▸ " } else { "  " };
        let style = if is_selected {
            Style::default().fg(color).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        content.push(Line::from(Span::styled(format!("{prefix}{label}"), style)));
    }

    content.push(Line::from(""));
    content.push(Line::from(vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ]));

    render_dialog_box(frame, dialog_area, content, Color::Red);
}

/// Truncate a string to a maximum number of characters with ellipsis
fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
