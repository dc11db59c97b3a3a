//! Add/edit field form

use super::field_renderer::{
    draw_choice_field, draw_field_with_value, draw_help_text, draw_toggle_field,
};
use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::{EditorRow, FieldEditorForm};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders},
    Frame,
};

/// Draw the field editor for the field being added or edited
pub fn draw_field_editor(frame: &mut Frame, area: Rect, app: &App) {
    let Some(editor) = app.state.field_editor.as_ref() else {
        return;
    };

    let form_name = app.state.draft.as_ref().map_or("", |d| d.name.as_str());
    let block = Block::default()
        .title(format!(" {} - {} ", editor.title(), form_name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let mut constraints = vec![
        Constraint::Length(3), // Type
        Constraint::Length(3), // Label
        Constraint::Length(3), // Required
    ];
    if editor.shows_options() {
        constraints.push(Constraint::Length(3)); // Options
    }
    constraints.push(Constraint::Length(1)); // Help
    constraints.push(Constraint::Min(0));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .margin(1)
        .split(inner);

    draw_rows(frame, &chunks, editor);
}

fn draw_rows(frame: &mut Frame, chunks: &[Rect], editor: &FieldEditorForm) {
    let active = editor.active_row();

    draw_choice_field(
        frame,
        chunks[0],
        "Type",
        Some(editor.field_type.label()),
        active == EditorRow::Type,
    );
    draw_field_with_value(
        frame,
        chunks[1],
        &editor.label.label,
        editor.label.as_text(),
        active == EditorRow::Label,
        false,
    );
    draw_toggle_field(
        frame,
        chunks[2],
        "Required",
        editor.required,
        active == EditorRow::Required,
    );

    let help_index = if editor.shows_options() {
        draw_field_with_value(
            frame,
            chunks[3],
            &editor.options.label,
            editor.options.as_text(),
            active == EditorRow::Options,
            false,
        );
        4
    } else {
        3
    };

    draw_help_text(
        frame,
        chunks[help_index],
        &[
            ("Tab", "next"),
            ("←/→", "type"),
            ("Space", "toggle"),
            (SAVE_SHORTCUT, "save"),
            ("Esc", "cancel"),
        ],
    );
}
