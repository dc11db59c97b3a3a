//! Form list view

use super::widgets::render_scrollable_list;
use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("1 {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Draw all saved forms with their field and response counts
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let forms = &app.state.forms;
    let block = Block::default()
        .title(format!(" Forms ({}) ", forms.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if forms.is_empty() {
        let content = Paragraph::new("No forms yet.\nPress 'n' to create a new form.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, area);
        return;
    }

    let items: Vec<ListItem> = forms
        .iter()
        .enumerate()
        .map(|(idx, form)| {
            let is_selected = idx == app.state.selected_index;
            let prefix = if is_selected { "▸ " } else { "  " };

            let name_style = if is_selected {
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };

            let line = Line::from(vec![
                Span::styled(prefix, name_style),
                Span::styled(&form.name, name_style),
                Span::styled(
                    format!(
                        "  {} · {}",
                        plural(form.fields.len(), "field"),
                        plural(app.state.response_count(&form.id), "response")
                    ),
                    Style::default().fg(Color::DarkGray),
                ),
            ]);

            ListItem::new(line)
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray));

    render_scrollable_list(frame, area, list, app.state.selected_index);
}
