//! Form builder view

use super::widgets::render_scrollable_list;
use crate::app::App;
use crate::model::FormField;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

/// Draw the draft form's fields in order
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let Some(draft) = app.state.draft.as_ref() else {
        let content = Paragraph::new("No form open.\nSelect a form and press Enter to edit it.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title(" Builder ").borders(Borders::ALL));
        frame.render_widget(content, area);
        return;
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let mut header = vec![Span::styled(
        &draft.name,
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD),
    )];
    if app.state.draft_dirty {
        header.push(Span::styled(
            "  (unsaved changes)",
            Style::default().fg(Color::Yellow),
        ));
    }
    frame.render_widget(
        Paragraph::new(Line::from(header)).block(
            Block::default()
                .title(" Editing Form ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        ),
        chunks[0],
    );

    let block = Block::default()
        .title(format!(" Fields ({}) ", draft.fields.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if draft.fields.is_empty() {
        let content = Paragraph::new("No fields yet.\nPress 'a' to add a field.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(content, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = draft
        .fields
        .iter()
        .enumerate()
        .map(|(idx, field)| field_item(idx, field, idx == app.state.selected_field_index))
        .collect();

    render_scrollable_list(
        frame,
        chunks[1],
        List::new(items).block(block),
        app.state.selected_field_index,
    );
}

fn field_item(idx: usize, field: &FormField, is_selected: bool) -> ListItem<'_> {
    let prefix = if is_selected { "▸ " } else { "  " };
    let label_style = if is_selected {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let mut spans = vec![
        Span::styled(format!("{prefix}{}. ", idx + 1), label_style),
        Span::styled(&field.label, label_style),
    ];
    if field.required {
        spans.push(Span::styled(" *", Style::default().fg(Color::Red)));
    }
    spans.push(Span::styled(
        format!("  [{}]", field.field_type.label()),
        Style::default().fg(Color::Magenta),
    ));

    let mut lines = vec![Line::from(spans)];
    if !field.options().is_empty() {
        lines.push(Line::from(Span::styled(
            format!("      Options: {}", field.options().join(", ")),
            Style::default().fg(Color::DarkGray),
        )));
    }

    ListItem::new(lines)
}
