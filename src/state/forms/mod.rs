//! Editable form state for the create, field editor, and preview views

mod field;
mod field_editor;
mod preview;

pub use field::InputField;
pub use field_editor::{EditorRow, FieldEditorForm};
pub use preview::{PreviewForm, PreviewInput};

/// Focus cycling shared by the editable views
pub trait FieldFocus {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}
