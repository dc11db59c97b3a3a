//! UI module for rendering the TUI

mod builder;
mod components;
mod form_list;
mod forms;
mod layout;
mod preview;
mod responses;
mod widgets;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Draw the main layout with sidebar
    let (sidebar_area, main_area) = layout::create_layout(area);

    layout::draw_sidebar(frame, sidebar_area, app);

    // Draw main content based on current view
    match app.state.current_view {
        View::FormList => form_list::draw(frame, main_area, app),
        View::FormCreate => forms::draw_form_create(frame, main_area, app),
        View::Builder => builder::draw(frame, main_area, app),
        View::FieldEditor => forms::draw_field_editor(frame, main_area, app),
        View::Preview => preview::draw(frame, main_area, app),
        View::Responses => responses::draw(frame, main_area, app),
    }

    layout::draw_status_bar(frame, app);

    // Overlays, errors on top
    if let Some(action) = &app.state.pending_delete {
        render_confirm_dialog(frame, action);
    }
    if let Some(message) = app.state.current_error() {
        render_error_dialog(frame, message, app.state.errors.len() - 1);
    }
}
