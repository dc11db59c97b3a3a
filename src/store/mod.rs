//! Persistence for forms and responses
//!
//! Two collections, each a JSON array stored under a fixed key of a
//! key-value backend. Reads are fail-soft: missing or corrupt blobs load as
//! empty collections.

mod backend;
mod error;
mod form_store;

pub use backend::{FileBackend, KeyValueBackend, MemoryBackend};
pub use error::StoreError;
pub use form_store::{FormStore, FORMS_KEY, RESPONSES_KEY};

#[cfg(test)]
pub use backend::{MockKeyValueBackend, RejectingBackend};
