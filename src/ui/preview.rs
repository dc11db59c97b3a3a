//! Form preview: fill in and submit a form

use super::forms::{draw_choice_field, draw_field_with_value, draw_help_text, draw_option_list};
use super::widgets::visible_window;
use crate::app::App;
use crate::model::{FieldType, FormField};
use crate::platform::SUBMIT_SHORTCUT;
use crate::state::{PreviewForm, PreviewInput};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

const TEXTAREA_HEIGHT: u16 = 6;

fn field_height(field: &FormField) -> u16 {
    match field.field_type {
        FieldType::Textarea => TEXTAREA_HEIGHT,
        FieldType::Radio | FieldType::Checkbox => field.options().len() as u16 + 2,
        FieldType::Text | FieldType::Select | FieldType::Date => 3,
    }
}

fn field_title(field: &FormField) -> String {
    let mut title = field.label.clone();
    if field.required {
        title.push_str(" *");
    }
    if field.field_type == FieldType::Date {
        title.push_str(" (YYYY-MM-DD)");
    }
    title
}

/// Draw the preview of the form being filled in
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(preview) = app.state.preview.as_ref() else {
        return;
    };

    let block = Block::default()
        .title(format!(" Preview - {} ", preview.form.name))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(inner);

    draw_help_text(
        frame,
        chunks[1],
        &[
            ("Tab", "next"),
            ("←/→", "choose"),
            ("Space", "check"),
            (SUBMIT_SHORTCUT, "submit"),
            ("Esc", "back"),
        ],
    );

    if preview.form.fields.is_empty() {
        frame.render_widget(
            Paragraph::new("This form has no fields yet.")
                .style(Style::default().fg(Color::DarkGray)),
            chunks[0],
        );
        return;
    }

    draw_fields(frame, chunks[0], preview);
}

fn draw_fields(frame: &mut Frame, area: Rect, preview: &PreviewForm) {
    let heights: Vec<u16> = preview.form.fields.iter().map(field_height).collect();
    let (start, end) = visible_window(&heights, preview.active_field_index, area.height);

    let mut constraints: Vec<Constraint> = heights[start..end]
        .iter()
        .map(|h| Constraint::Length(*h))
        .collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let visible = preview.form.fields[start..end]
        .iter()
        .zip(&preview.inputs[start..end]);
    for (offset, (field, input)) in visible.enumerate() {
        let is_active = start + offset == preview.active_field_index;
        draw_input(frame, rows[offset], field, input, is_active);
    }
}

fn draw_input(
    frame: &mut Frame,
    area: Rect,
    field: &FormField,
    input: &PreviewInput,
    is_active: bool,
) {
    let title = field_title(field);
    match input {
        PreviewInput::Text(text) => draw_field_with_value(
            frame,
            area,
            &title,
            text.as_text(),
            is_active,
            text.is_multiline,
        ),
        PreviewInput::Choice { selected } if field.field_type == FieldType::Select => {
            let value = selected
                .and_then(|i| field.options().get(i))
                .map(String::as_str);
            draw_choice_field(frame, area, &title, value, is_active);
        }
        PreviewInput::Choice { selected } => {
            let options: Vec<(&str, bool)> = field
                .options()
                .iter()
                .enumerate()
                .map(|(i, o)| (o.as_str(), *selected == Some(i)))
                .collect();
            draw_option_list(frame, area, &title, &options, *selected, is_active, false);
        }
        PreviewInput::Multi { cursor, checked } => {
            let options: Vec<(&str, bool)> = field
                .options()
                .iter()
                .zip(checked)
                .map(|(o, c)| (o.as_str(), *c))
                .collect();
            draw_option_list(frame, area, &title, &options, Some(*cursor), is_active, true);
        }
    }
}
