//! Sidebar buttons

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// How a sidebar button is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonState {
    /// The area currently shown
    Active,
    Enabled,
    /// Nothing to show yet (no form open)
    Disabled,
}

impl ButtonState {
    pub fn new(is_active: bool, is_enabled: bool) -> Self {
        match (is_active, is_enabled) {
            (true, _) => ButtonState::Active,
            (false, true) => ButtonState::Enabled,
            (false, false) => ButtonState::Disabled,
        }
    }

    fn border_style(self) -> Style {
        match self {
            ButtonState::Active => Style::default().fg(Color::Cyan),
            _ => Style::default().fg(Color::DarkGray),
        }
    }

    fn label_style(self) -> Style {
        match self {
            ButtonState::Active => Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            ButtonState::Enabled => Style::default(),
            ButtonState::Disabled => Style::default().fg(Color::DarkGray),
        }
    }
}

/// Render a boxed sidebar button with an optional count badge after the label
pub fn render_sidebar_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    badge: Option<usize>,
    state: ButtonState,
) {
    let mut spans = vec![Span::styled(format!(" {label}"), state.label_style())];
    if let Some(count) = badge {
        spans.push(Span::styled(
            format!(" {count}"),
            Style::default().fg(Color::Magenta),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(state.border_style());

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    #[test]
    fn test_state_from_flags() {
        assert_eq!(ButtonState::new(true, false), ButtonState::Active);
        assert_eq!(ButtonState::new(false, true), ButtonState::Enabled);
        assert_eq!(ButtonState::new(false, false), ButtonState::Disabled);
    }

    #[test]
    fn test_badge_follows_label() {
        let mut terminal = Terminal::new(TestBackend::new(20, BUTTON_HEIGHT)).unwrap();
        terminal
            .draw(|frame| {
                render_sidebar_button(
                    frame,
                    frame.area(),
                    "Responses",
                    Some(4),
                    ButtonState::Enabled,
                )
            })
            .unwrap();

        let buffer = terminal.backend().buffer();
        let middle: String = (0..buffer.area.width)
            .map(|x| buffer[(x, 1)].symbol())
            .collect();
        assert!(middle.contains(" Responses 4"));
    }
}
