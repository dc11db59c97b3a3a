//! Forms and their typed fields

use super::{new_id, ModelError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Input type of a form field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Date,
}

impl FieldType {
    /// All field types in selector order
    pub const ALL: [FieldType; 6] = [
        Self::Text,
        Self::Textarea,
        Self::Radio,
        Self::Checkbox,
        Self::Select,
        Self::Date,
    ];

    /// Whether fields of this type carry a list of options
    pub fn requires_options(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Select)
    }

    /// Wire name, as stored in the `type` key
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Date => "date",
        }
    }

    /// Human-readable name for the type selector
    pub fn label(&self) -> &'static str {
        match self {
            Self::Text => "Text",
            Self::Textarea => "Text Area",
            Self::Radio => "Radio Buttons",
            Self::Checkbox => "Checkboxes",
            Self::Select => "Dropdown",
            Self::Date => "Date",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Self::Text => Self::Textarea,
            Self::Textarea => Self::Radio,
            Self::Radio => Self::Checkbox,
            Self::Checkbox => Self::Select,
            Self::Select => Self::Date,
            Self::Date => Self::Text,
        }
    }

    pub fn prev(&self) -> Self {
        match self {
            Self::Text => Self::Date,
            Self::Textarea => Self::Text,
            Self::Radio => Self::Textarea,
            Self::Checkbox => Self::Radio,
            Self::Select => Self::Checkbox,
            Self::Date => Self::Select,
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed input definition within a form
///
/// `options` is `Some` and non-empty exactly when the type is a choice type
/// (radio, checkbox, select). Use [`FormField::new`] or
/// [`FormField::with_id`] to get that guarantee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
}

impl FormField {
    /// Create a field with a freshly issued id
    pub fn new(
        field_type: FieldType,
        label: &str,
        required: bool,
        options: Vec<String>,
    ) -> Result<Self, ModelError> {
        Self::with_id(new_id(), field_type, label, required, options)
    }

    /// Create a field that keeps an existing id (used when editing)
    pub fn with_id(
        id: String,
        field_type: FieldType,
        label: &str,
        required: bool,
        options: Vec<String>,
    ) -> Result<Self, ModelError> {
        let label = label.trim();
        if label.is_empty() {
            return Err(ModelError::EmptyLabel);
        }

        let options = if field_type.requires_options() {
            let options: Vec<String> = options
                .into_iter()
                .map(|o| o.trim().to_string())
                .filter(|o| !o.is_empty())
                .collect();
            if options.is_empty() {
                return Err(ModelError::MissingOptions(field_type));
            }
            Some(options)
        } else {
            None
        };

        Ok(Self {
            id,
            field_type,
            label: label.to_string(),
            required,
            options,
        })
    }

    /// Split a comma-separated option list, dropping blank entries
    pub fn split_options(input: &str) -> Vec<String> {
        input
            .split(',')
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Options as a slice (empty for non-choice fields)
    pub fn options(&self) -> &[String] {
        self.options.as_deref().unwrap_or(&[])
    }
}

/// Direction for reordering a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// A named, ordered collection of fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Form {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl Form {
    /// Create an empty form. The name is trimmed and must not be blank.
    pub fn new(name: &str) -> Result<Self, ModelError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ModelError::EmptyFormName);
        }
        Ok(Self {
            id: new_id(),
            name: name.to_string(),
            fields: Vec::new(),
        })
    }

    /// Look up a field by id
    pub fn field(&self, field_id: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.id == field_id)
    }

    fn position(&self, field_id: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.id == field_id)
    }

    /// Append a field to the end of the form
    pub fn add_field(&mut self, field: FormField) {
        self.fields.push(field);
    }

    /// Replace the field with `field_id` in place. Unknown ids are ignored.
    pub fn edit_field(&mut self, field_id: &str, new_field: FormField) -> bool {
        match self.position(field_id) {
            Some(index) => {
                self.fields[index] = new_field;
                true
            }
            None => false,
        }
    }

    /// Remove the first field with `field_id`. Unknown ids are ignored.
    pub fn delete_field(&mut self, field_id: &str) -> bool {
        match self.position(field_id) {
            Some(index) => {
                self.fields.remove(index);
                true
            }
            None => false,
        }
    }

    /// Swap a field with its neighbour. No-op at either end of the list.
    pub fn move_field(&mut self, field_id: &str, direction: Direction) -> bool {
        let Some(index) = self.position(field_id) else {
            return false;
        };

        match direction {
            Direction::Up if index > 0 => {
                self.fields.swap(index - 1, index);
                true
            }
            Direction::Down if index + 1 < self.fields.len() => {
                self.fields.swap(index, index + 1);
                true
            }
            _ => false,
        }
    }

    /// Replace the form with the same id in `forms`, or append it
    pub fn save_into(self, forms: &mut Vec<Form>) {
        match forms.iter_mut().find(|f| f.id == self.id) {
            Some(existing) => *existing = self,
            None => forms.push(self),
        }
    }
}
