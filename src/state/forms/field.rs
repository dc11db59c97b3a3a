//! Text input value object

/// A single editable text input with its label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputField {
    pub label: String,
    pub value: String,
    pub is_multiline: bool,
}

impl InputField {
    /// Create an empty text input
    pub fn text(label: &str, is_multiline: bool) -> Self {
        Self::text_with_value(label, String::new(), is_multiline)
    }

    /// Create a text input with an initial value
    pub fn text_with_value(label: &str, value: String, is_multiline: bool) -> Self {
        Self {
            label: label.to_string(),
            value,
            is_multiline,
        }
    }

    pub fn as_text(&self) -> &str {
        &self.value
    }

    /// Push a character to the value
    pub fn push_char(&mut self, c: char) {
        self.value.push(c);
    }

    /// Insert a line break; ignored for single-line inputs
    pub fn push_newline(&mut self) {
        if self.is_multiline {
            self.value.push('\n');
        }
    }

    /// Remove the last character from the value
    pub fn pop_char(&mut self) {
        self.value.pop();
    }

    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }
}
