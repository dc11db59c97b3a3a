//! Reusable UI widget helpers

use ratatui::{
    layout::Rect,
    widgets::{List, ListState},
    Frame,
};

/// Render a scrollable list that automatically keeps the selected item visible.
///
/// Wraps `render_stateful_widget` with a `ListState`, so the list scrolls to
/// keep the selected item in view.
///
/// # Example
/// ```ignore
/// let list = List::new(items).block(block);
/// render_scrollable_list(frame, area, list, app.state.selected_index);
/// ```
pub fn render_scrollable_list(frame: &mut Frame, area: Rect, list: List, selected_index: usize) {
    let mut list_state = ListState::default().with_selected(Some(selected_index));
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// First and one-past-last index of the items to show so that `active`
/// stays visible, given each item's height and the rows available.
pub fn visible_window(heights: &[u16], active: usize, available: u16) -> (usize, usize) {
    if heights.is_empty() {
        return (0, 0);
    }
    let active = active.min(heights.len() - 1);

    let mut start = 0;
    while start < active && heights[start..=active].iter().sum::<u16>() > available {
        start += 1;
    }

    let mut end = start;
    let mut used = 0u16;
    while end < heights.len() && (end <= active || used + heights[end] <= available) {
        used = used.saturating_add(heights[end]);
        end += 1;
    }
    (start, end)
}
