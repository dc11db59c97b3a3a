//! State for filling in a form in the preview

use super::{FieldFocus, InputField};
use crate::model::{FieldType, Form, FormField, FormResponse, RawInput, ResponseValue};
use chrono::NaiveDate;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Input state of one previewed field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewInput {
    /// text, textarea and date fields
    Text(InputField),
    /// radio and select fields: index into the options
    Choice { selected: Option<usize> },
    /// checkbox fields: cursor over the options and their checked flags
    Multi { cursor: usize, checked: Vec<bool> },
}

impl PreviewInput {
    fn for_field(field: &FormField, previous: Option<&ResponseValue>) -> Self {
        match field.field_type {
            FieldType::Text | FieldType::Textarea | FieldType::Date => {
                let value = previous
                    .map(|v| v.as_single().map(str::to_string).unwrap_or_else(|| v.display()))
                    .unwrap_or_default();
                PreviewInput::Text(InputField::text_with_value(
                    &field.label,
                    value,
                    field.field_type == FieldType::Textarea,
                ))
            }
            FieldType::Radio | FieldType::Select => PreviewInput::Choice {
                selected: previous
                    .and_then(ResponseValue::as_single)
                    .and_then(|v| field.options().iter().position(|o| o == v)),
            },
            FieldType::Checkbox => PreviewInput::Multi {
                cursor: 0,
                checked: field
                    .options()
                    .iter()
                    .map(|o| previous.is_some_and(|v| v.contains(o)))
                    .collect(),
            },
        }
    }

    fn is_empty(&self) -> bool {
        match self {
            PreviewInput::Text(input) => input.is_blank(),
            PreviewInput::Choice { selected } => selected.is_none(),
            PreviewInput::Multi { checked, .. } => !checked.iter().any(|c| *c),
        }
    }
}

/// A form being filled in
#[derive(Debug, Clone)]
pub struct PreviewForm {
    pub form: Form,
    pub inputs: Vec<PreviewInput>,
    pub active_field_index: usize,
}

impl PreviewForm {
    /// Start a blank preview, or one prefilled from a previous response
    pub fn from_form(form: Form, previous: Option<&FormResponse>) -> Self {
        let inputs = form
            .fields
            .iter()
            .map(|field| PreviewInput::for_field(field, previous.and_then(|r| r.value(&field.id))))
            .collect();
        Self {
            form,
            inputs,
            active_field_index: 0,
        }
    }

    pub fn active_field_def(&self) -> Option<&FormField> {
        self.form.fields.get(self.active_field_index)
    }

    fn active_input_mut(&mut self) -> Option<&mut PreviewInput> {
        self.inputs.get_mut(self.active_field_index)
    }

    pub fn is_active_field_multiline(&self) -> bool {
        matches!(
            self.inputs.get(self.active_field_index),
            Some(PreviewInput::Text(input)) if input.is_multiline
        )
    }

    /// Type a character into the active text input; Space toggles a checkbox
    pub fn input_char(&mut self, c: char) {
        match self.active_input_mut() {
            Some(PreviewInput::Text(input)) => input.push_char(c),
            Some(PreviewInput::Multi { cursor, checked }) if c == ' ' => {
                if let Some(flag) = checked.get_mut(*cursor) {
                    *flag = !*flag;
                }
            }
            _ => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Some(PreviewInput::Text(input)) = self.active_input_mut() {
            input.pop_char();
        }
    }

    pub fn newline(&mut self) {
        if let Some(PreviewInput::Text(input)) = self.active_input_mut() {
            input.push_newline();
        }
    }

    /// Move the choice (or checkbox cursor) of the active field
    pub fn cycle(&mut self, forward: bool) {
        let Some(field) = self.active_field_def() else {
            return;
        };
        let option_count = field.options().len();
        // select fields can go back to "no selection"; radio buttons cannot
        let allows_none = field.field_type == FieldType::Select;
        if option_count == 0 {
            return;
        }

        match self.active_input_mut() {
            Some(PreviewInput::Choice { selected }) => {
                *selected = cycle_choice(*selected, option_count, allows_none, forward);
            }
            Some(PreviewInput::Multi { cursor, .. }) => {
                *cursor = if forward {
                    (*cursor + 1) % option_count
                } else {
                    (*cursor + option_count - 1) % option_count
                };
            }
            _ => {}
        }
    }

    /// Check required fields and date formats
    pub fn validate(&self) -> Result<(), String> {
        let missing: Vec<&str> = self
            .form
            .fields
            .iter()
            .zip(&self.inputs)
            .filter(|(field, input)| field.required && input.is_empty())
            .map(|(field, _)| field.label.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(format!("Please fill in required fields: {}", missing.join(", ")));
        }

        for (field, input) in self.form.fields.iter().zip(&self.inputs) {
            if let (FieldType::Date, PreviewInput::Text(text)) = (field.field_type, input) {
                let value = text.as_text().trim();
                if !value.is_empty() && NaiveDate::parse_from_str(value, DATE_FORMAT).is_err() {
                    return Err(format!(
                        "{} must be a date in YYYY-MM-DD format",
                        field.label
                    ));
                }
            }
        }

        Ok(())
    }

    /// Collect the current inputs the way a browser posts a form
    pub fn to_raw_input(&self) -> RawInput {
        let mut raw = RawInput::new();
        for (field, input) in self.form.fields.iter().zip(&self.inputs) {
            match input {
                PreviewInput::Text(text) => {
                    let value = if field.field_type == FieldType::Date {
                        text.as_text().trim()
                    } else {
                        text.as_text()
                    };
                    raw.append(field.id.clone(), value);
                }
                PreviewInput::Choice { selected } => {
                    if let Some(option) = selected.and_then(|i| field.options().get(i)) {
                        raw.append(field.id.clone(), option.clone());
                    }
                }
                PreviewInput::Multi { checked, .. } => {
                    for (option, _) in field.options().iter().zip(checked).filter(|(_, c)| **c) {
                        raw.append(field.id.clone(), option.clone());
                    }
                }
            }
        }
        raw
    }
}

fn cycle_choice(
    selected: Option<usize>,
    count: usize,
    allows_none: bool,
    forward: bool,
) -> Option<usize> {
    match (selected, forward) {
        (None, true) => Some(0),
        (None, false) => Some(count - 1),
        (Some(i), true) if i + 1 < count => Some(i + 1),
        (Some(_), true) => {
            if allows_none {
                None
            } else {
                Some(0)
            }
        }
        (Some(0), false) => {
            if allows_none {
                None
            } else {
                Some(count - 1)
            }
        }
        (Some(i), false) => Some(i - 1),
    }
}

impl FieldFocus for PreviewForm {
    fn field_count(&self) -> usize {
        self.inputs.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.inputs.len().saturating_sub(1));
    }
}
