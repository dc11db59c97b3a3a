//! Form domain model
//!
//! Forms, their typed fields, and the responses collected for them. Every
//! mutation here is synchronous and in-memory; persisting the result is the
//! caller's job (see [`crate::store::FormStore`]).

mod error;
mod form;
mod response;

pub use error::ModelError;
pub use form::{Direction, FieldType, Form, FormField};
pub use response::{build_response, FormResponse, RawInput, ResponseValue};

use uuid::Uuid;

/// Issue a fresh opaque id (UUIDv7, so ids sort by creation time)
pub fn new_id() -> String {
    Uuid::now_v7().to_string()
}
