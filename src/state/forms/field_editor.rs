//! State for the add/edit field dialog

use super::{FieldFocus, InputField};
use crate::model::{FieldType, FormField, ModelError};

/// Rows of the field editor, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorRow {
    Type,
    Label,
    Required,
    Options,
}

/// Add/edit field form
///
/// The options row only exists while the selected type is a choice type.
#[derive(Debug, Clone)]
pub struct FieldEditorForm {
    /// Id of the field being edited; `None` when adding
    pub editing_field_id: Option<String>,
    pub field_type: FieldType,
    pub label: InputField,
    pub required: bool,
    pub options: InputField,
    pub active_field_index: usize,
}

impl FieldEditorForm {
    pub fn new() -> Self {
        Self {
            editing_field_id: None,
            field_type: FieldType::default(),
            label: InputField::text("Label", false),
            required: false,
            options: InputField::text("Options (comma-separated)", false),
            active_field_index: 0,
        }
    }

    /// Load an existing field for editing
    pub fn from_field(field: &FormField) -> Self {
        Self {
            editing_field_id: Some(field.id.clone()),
            field_type: field.field_type,
            label: InputField::text_with_value("Label", field.label.clone(), false),
            required: field.required,
            options: InputField::text_with_value(
                "Options (comma-separated)",
                field.options().join(", "),
                false,
            ),
            active_field_index: 0,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing_field_id.is_some()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit Field"
        } else {
            "Add New Field"
        }
    }

    pub fn shows_options(&self) -> bool {
        self.field_type.requires_options()
    }

    pub fn active_row(&self) -> EditorRow {
        match self.active_field_index {
            0 => EditorRow::Type,
            1 => EditorRow::Label,
            2 => EditorRow::Required,
            _ => EditorRow::Options,
        }
    }

    pub fn next_type(&mut self) {
        self.field_type = self.field_type.next();
        self.clamp_active();
    }

    pub fn prev_type(&mut self) {
        self.field_type = self.field_type.prev();
        self.clamp_active();
    }

    pub fn toggle_required(&mut self) {
        self.required = !self.required;
    }

    /// Route a typed character to the focused row
    pub fn input_char(&mut self, c: char) {
        match self.active_row() {
            EditorRow::Label => self.label.push_char(c),
            EditorRow::Options => self.options.push_char(c),
            EditorRow::Required if c == ' ' => self.toggle_required(),
            EditorRow::Type if c == ' ' => self.next_type(),
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.active_row() {
            EditorRow::Label => self.label.pop_char(),
            EditorRow::Options => self.options.pop_char(),
            _ => {}
        }
    }

    /// Build the field this editor describes
    pub fn to_field(&self) -> Result<FormField, ModelError> {
        let options = if self.shows_options() {
            FormField::split_options(self.options.as_text())
        } else {
            Vec::new()
        };
        let label = self.label.as_text();

        match &self.editing_field_id {
            Some(id) => {
                FormField::with_id(id.clone(), self.field_type, label, self.required, options)
            }
            None => FormField::new(self.field_type, label, self.required, options),
        }
    }

    fn clamp_active(&mut self) {
        let max = self.field_count() - 1;
        self.active_field_index = self.active_field_index.min(max);
    }
}

impl Default for FieldEditorForm {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldFocus for FieldEditorForm {
    fn field_count(&self) -> usize {
        if self.shows_options() {
            4
        } else {
            3
        }
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.field_count() - 1);
    }
}
