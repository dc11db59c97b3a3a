//! Responses table for one form

use crate::app::App;
use crate::model::{Form, FormResponse};
use chrono::Local;
use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

const SUBMITTED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Draw every response to the form, one row each, oldest first
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.responses_form.as_ref() else {
        return;
    };
    let responses = &app.state.responses;

    let block = Block::default()
        .title(format!(
            " Responses - {} ({}) ",
            form.name,
            responses.len()
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if responses.is_empty() {
        frame.render_widget(
            Paragraph::new("No responses yet.")
                .style(Style::default().fg(Color::DarkGray))
                .block(block),
            area,
        );
        return;
    }

    let header_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);
    let header = Row::new(
        std::iter::once("Submitted")
            .chain(form.fields.iter().map(|f| f.label.as_str()))
            .map(|label| Cell::from(label.to_string())),
    )
    .style(header_style);

    let rows: Vec<Row> = responses.iter().map(|r| response_row(form, r)).collect();

    let mut widths = vec![Constraint::Length(SUBMITTED_FORMAT.len() as u16 + 2)];
    widths.extend(form.fields.iter().map(|_| Constraint::Fill(1)));

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▸ ");

    let mut state = TableState::default().with_selected(Some(app.state.selected_response_index));
    frame.render_stateful_widget(table, area, &mut state);
}

fn response_row(form: &Form, response: &FormResponse) -> Row<'static> {
    let submitted = response
        .submitted_at
        .map(|t| t.with_timezone(&Local).format(SUBMITTED_FORMAT).to_string())
        .unwrap_or_else(|| "-".to_string());

    let cells = std::iter::once(Cell::from(submitted)).chain(form.fields.iter().map(|field| {
        let value = response
            .value(&field.id)
            .map(|v| v.display())
            .unwrap_or_default();
        Cell::from(Line::from(value))
    }));
    Row::new(cells)
}
