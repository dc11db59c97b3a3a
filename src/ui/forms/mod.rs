//! Form rendering module
//!
//! - `field_renderer`: Field rendering utilities
//! - `form_name`: New form dialog
//! - `field_editor`: Add/edit field form

mod field_editor;
mod field_renderer;
mod form_name;

pub use field_editor::draw_field_editor;
pub use field_renderer::{
    draw_choice_field, draw_field_with_value, draw_help_text, draw_option_list,
};
pub use form_name::draw_form_create;
