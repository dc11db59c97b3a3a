//! Field rendering utilities for forms

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn focus_style(is_active: bool) -> Style {
    if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn field_block(label: &str, is_active: bool) -> Block<'static> {
    Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(focus_style(is_active))
}

/// Draw a text input with a cursor when active and a placeholder when empty
pub fn draw_field_with_value(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    is_active: bool,
    is_multiline: bool,
) {
    let style = focus_style(is_active);

    let display_value = if value.is_empty() && !is_active {
        "(empty)"
    } else {
        value
    };

    let cursor = if is_active { "▌" } else { "" };
    let cursor_style = Style::default().fg(Color::Cyan);

    let content = if is_multiline {
        let mut lines: Vec<Line> = display_value
            .split('\n')
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if is_active {
            match lines.last_mut() {
                Some(last) => last.spans.push(Span::styled(cursor, cursor_style)),
                None => lines.push(Line::from(Span::styled(cursor, cursor_style))),
            }
        }
        Paragraph::new(lines)
    } else {
        Paragraph::new(Line::from(vec![
            Span::styled(display_value, style),
            Span::styled(cursor, cursor_style),
        ]))
    };

    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(field_block(label, is_active)),
        area,
    );
}

/// Draw a single-choice picker as `◂ value ▸`
pub fn draw_choice_field(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: Option<&str>,
    is_active: bool,
) {
    let arrow_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let value_span = match value {
        Some(v) => Span::styled(
            v.to_string(),
            focus_style(is_active).add_modifier(Modifier::BOLD),
        ),
        None => Span::styled("(none)", Style::default().fg(Color::DarkGray)),
    };

    let line = Line::from(vec![
        Span::styled("◂ ", arrow_style),
        value_span,
        Span::styled(" ▸", arrow_style),
    ]);

    frame.render_widget(
        Paragraph::new(line).block(field_block(label, is_active)),
        area,
    );
}

/// Draw one option per line with a radio or checkbox marker
///
/// `cursor` highlights an option while the field is active.
pub fn draw_option_list(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    options: &[(&str, bool)],
    cursor: Option<usize>,
    is_active: bool,
    multi: bool,
) {
    let lines: Vec<Line> = options
        .iter()
        .enumerate()
        .map(|(idx, (option, marked))| {
            let marker = match (multi, *marked) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(•)",
                (false, false) => "( )",
            };
            let under_cursor = is_active && cursor == Some(idx);
            let prefix = if under_cursor { "▸ " } else { "  " };
            let style = if under_cursor {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else if *marked {
                Style::default().fg(Color::White)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("{prefix}{marker} {option}"), style))
        })
        .collect();

    frame.render_widget(
        Paragraph::new(lines).block(field_block(label, is_active)),
        area,
    );
}

/// Draw a boolean toggle as a checkbox line
pub fn draw_toggle_field(frame: &mut Frame, area: Rect, label: &str, value: bool, is_active: bool) {
    let marker = if value { "[x]" } else { "[ ]" };
    let line = Line::from(Span::styled(
        format!("{marker} {label}"),
        focus_style(is_active),
    ));
    frame.render_widget(
        Paragraph::new(line).block(field_block(label, is_active)),
        area,
    );
}

/// Draw a one-line key hint under a form
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(key.to_string(), Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
