//! Errors raised while constructing domain values

use super::FieldType;
use thiserror::Error;

/// Rejected input when building a form or field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("form name cannot be empty")]
    EmptyFormName,

    #[error("field label cannot be empty")]
    EmptyLabel,

    #[error("a {0} field needs at least one option")]
    MissingOptions(FieldType),
}
