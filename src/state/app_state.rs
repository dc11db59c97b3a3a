//! Application state definitions

use super::{FieldEditorForm, InputField, PreviewForm};
use crate::model::{Form, FormResponse};
use std::collections::HashMap;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    FormList,
    FormCreate,
    Builder,
    FieldEditor,
    Preview,
    Responses,
}

impl View {
    /// Transient input views that `go_back` skips over
    pub fn is_form_view(&self) -> bool {
        matches!(self, View::FormCreate | View::FieldEditor)
    }
}

/// A form deletion waiting for confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeleteAction {
    pub form_id: String,
    pub form_name: String,
    pub response_count: usize,
    /// `true` when "Delete" is highlighted, `false` for "Cancel"
    pub selected_option: bool,
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,

    // Data
    pub forms: Vec<Form>,
    pub response_counts: HashMap<String, usize>,

    // Selection
    pub selected_index: usize,
    pub selected_field_index: usize,
    pub selected_response_index: usize,

    // Builder: the form being edited, detached from `forms` until saved
    pub draft: Option<Form>,
    pub draft_dirty: bool,

    // Editable views
    pub form_name: InputField,
    pub field_editor: Option<FieldEditorForm>,
    pub preview: Option<PreviewForm>,

    // Responses view
    pub responses_form: Option<Form>,
    pub responses: Vec<FormResponse>,

    // Dialogs
    pub pending_delete: Option<PendingDeleteAction>,
    pub errors: Vec<String>,
}

impl AppState {
    /// Move selection down
    pub fn move_selection_down(&mut self, max: usize) {
        if max > 0 && self.selected_index < max - 1 {
            self.selected_index += 1;
        }
    }

    /// Move selection up
    pub fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    /// Keep a selection index inside a list of `len` items
    pub fn clamp_index(index: usize, len: usize) -> usize {
        index.min(len.saturating_sub(1))
    }

    pub fn selected_form(&self) -> Option<&Form> {
        self.forms.get(self.selected_index)
    }

    pub fn response_count(&self, form_id: &str) -> usize {
        self.response_counts.get(form_id).copied().unwrap_or(0)
    }

    pub fn selected_draft_field_id(&self) -> Option<String> {
        self.draft
            .as_ref()
            .and_then(|d| d.fields.get(self.selected_field_index))
            .map(|f| f.id.clone())
    }

    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.errors.push(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.errors.first().map(String::as_str)
    }

    /// Dismiss the error currently shown
    pub fn dismiss_error(&mut self) {
        if !self.errors.is_empty() {
            self.errors.remove(0);
        }
    }

    /// Reset the new-form name input
    pub fn clear_form_name(&mut self) {
        self.form_name = InputField::text("Form Name", false);
    }
}
