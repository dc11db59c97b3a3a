//! Form and response collections on top of a key-value backend

use super::{KeyValueBackend, StoreError};
use crate::model::{Form, FormResponse};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, info, warn};

/// Key holding the JSON array of all forms
pub const FORMS_KEY: &str = "form_builder_forms";
/// Key holding the JSON array of all responses, across forms
pub const RESPONSES_KEY: &str = "form_builder_responses";

/// Sole persistence authority for forms and responses
///
/// Every write is a read-modify-write of a whole collection. Within one
/// process `&mut self` serializes writes; across processes the last writer
/// wins and earlier updates can be lost.
pub struct FormStore {
    backend: Box<dyn KeyValueBackend>,
}

impl FormStore {
    pub fn new(backend: Box<dyn KeyValueBackend>) -> Self {
        Self { backend }
    }

    /// All persisted forms in insertion order, or empty if none or unreadable
    pub fn load_forms(&self) -> Vec<Form> {
        self.read_collection(FORMS_KEY)
    }

    /// Replace the whole forms collection
    pub fn save_forms(&mut self, forms: &[Form]) -> Result<(), StoreError> {
        self.write_collection(FORMS_KEY, forms)?;
        debug!(count = forms.len(), "Saved forms");
        Ok(())
    }

    /// Remove a form and every response that belongs to it
    ///
    /// Responses go first: if the forms write then fails, the form is still
    /// listed and deleting it again finishes the job.
    pub fn delete_form(&mut self, form_id: &str) -> Result<(), StoreError> {
        self.delete_responses(form_id)?;
        let forms: Vec<Form> = self
            .load_forms()
            .into_iter()
            .filter(|f| f.id != form_id)
            .collect();
        self.save_forms(&forms)?;
        info!(form_id, "Deleted form and its responses");
        Ok(())
    }

    /// Responses for one form, oldest first
    pub fn load_responses(&self, form_id: &str) -> Vec<FormResponse> {
        self.all_responses()
            .into_iter()
            .filter(|r| r.form_id == form_id)
            .collect()
    }

    /// Append a response to the persisted collection
    pub fn save_response(&mut self, response: &FormResponse) -> Result<(), StoreError> {
        let mut responses = self.all_responses();
        responses.push(response.clone());
        self.write_collection(RESPONSES_KEY, &responses)?;
        debug!(form_id = %response.form_id, response_id = %response.id, "Saved response");
        Ok(())
    }

    /// The most recently appended response for a form
    pub fn last_response(&self, form_id: &str) -> Option<FormResponse> {
        self.load_responses(form_id).pop()
    }

    fn all_responses(&self) -> Vec<FormResponse> {
        self.read_collection(RESPONSES_KEY)
    }

    fn delete_responses(&mut self, form_id: &str) -> Result<(), StoreError> {
        let responses: Vec<FormResponse> = self
            .all_responses()
            .into_iter()
            .filter(|r| r.form_id != form_id)
            .collect();
        self.write_collection(RESPONSES_KEY, &responses)
    }

    fn read_collection<T: DeserializeOwned>(&self, key: &'static str) -> Vec<T> {
        let raw = match self.backend.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(key, error = %e, "Failed to read collection, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(items) => items,
            Err(e) => {
                warn!(key, error = %e, "Stored collection is malformed, treating as empty");
                Vec::new()
            }
        }
    }

    fn write_collection<T: Serialize>(
        &mut self,
        key: &'static str,
        items: &[T],
    ) -> Result<(), StoreError> {
        let raw =
            serde_json::to_string(items).map_err(|source| StoreError::Serialize { key, source })?;
        self.backend.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{build_response, FieldType, FormField, RawInput, ResponseValue};
    use crate::store::{MemoryBackend, MockKeyValueBackend, RejectingBackend};
    use pretty_assertions::assert_eq;

    fn memory_store() -> FormStore {
        FormStore::new(Box::new(MemoryBackend::new()))
    }

    fn sample_form(name: &str) -> Form {
        let mut form = Form::new(name).unwrap();
        form.add_field(FormField::new(FieldType::Text, "Name", true, vec![]).unwrap());
        form.add_field(
            FormField::new(
                FieldType::Checkbox,
                "Colors",
                false,
                vec!["Red".into(), "Blue".into()],
            )
            .unwrap(),
        );
        form
    }

    fn submit(store: &mut FormStore, form: &Form, name: &str) -> FormResponse {
        let name_id = form.fields[0].id.clone();
        let input: RawInput = [(name_id, name.to_string())].into_iter().collect();
        let response = build_response(form, &input);
        store.save_response(&response).unwrap();
        response
    }

    mod forms {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_load_forms_empty_when_nothing_saved() {
            let store = memory_store();
            assert!(store.load_forms().is_empty());
        }

        #[test]
        fn test_save_then_load_roundtrip() {
            let mut store = memory_store();
            let forms = vec![sample_form("First"), sample_form("Second"), Form::new("Third").unwrap()];
            store.save_forms(&forms).unwrap();
            assert_eq!(store.load_forms(), forms);
        }

        #[test]
        fn test_save_forms_replaces_collection() {
            let mut store = memory_store();
            store
                .save_forms(&[sample_form("A"), sample_form("B")])
                .unwrap();
            let only = vec![sample_form("C")];
            store.save_forms(&only).unwrap();
            assert_eq!(store.load_forms(), only);
        }

        #[test]
        fn test_delete_form_removes_only_that_form() {
            let mut store = memory_store();
            let a = sample_form("A");
            let b = sample_form("B");
            store.save_forms(&[a.clone(), b.clone()]).unwrap();

            store.delete_form(&a.id).unwrap();
            assert_eq!(store.load_forms(), vec![b]);
        }

        #[test]
        fn test_delete_unknown_form_keeps_everything() {
            let mut store = memory_store();
            let a = sample_form("A");
            store.save_forms(&[a.clone()]).unwrap();
            submit(&mut store, &a, "Ada");

            store.delete_form("missing").unwrap();
            assert_eq!(store.load_forms(), vec![a.clone()]);
            assert_eq!(store.load_responses(&a.id).len(), 1);
        }
    }

    mod responses {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_load_responses_filters_by_form() {
            let mut store = memory_store();
            let a = sample_form("A");
            let b = sample_form("B");
            let first = submit(&mut store, &a, "one");
            submit(&mut store, &b, "other");
            let second = submit(&mut store, &a, "two");

            assert_eq!(store.load_responses(&a.id), vec![first, second]);
            assert_eq!(store.load_responses(&b.id).len(), 1);
        }

        #[test]
        fn test_last_response_is_most_recent() {
            let mut store = memory_store();
            let a = sample_form("A");
            submit(&mut store, &a, "one");
            let latest = submit(&mut store, &a, "two");
            submit(&mut store, &sample_form("B"), "noise");

            assert_eq!(store.last_response(&a.id), Some(latest));
        }

        #[test]
        fn test_last_response_absent_without_submissions() {
            let store = memory_store();
            assert!(store.last_response("nope").is_none());
        }

        #[test]
        fn test_delete_form_cascades_to_responses() {
            let mut store = memory_store();
            let a = sample_form("A");
            let b = sample_form("B");
            store.save_forms(&[a.clone(), b.clone()]).unwrap();
            submit(&mut store, &a, "one");
            submit(&mut store, &a, "two");
            let kept = submit(&mut store, &b, "keep");

            store.delete_form(&a.id).unwrap();

            assert!(store.load_responses(&a.id).is_empty());
            assert!(store.last_response(&a.id).is_none());
            assert_eq!(store.load_responses(&b.id), vec![kept]);
        }

        #[test]
        fn test_unchecked_checkbox_persists_as_empty_list() {
            let mut store = memory_store();
            let form = sample_form("A");
            let response = submit(&mut store, &form, "Ada");

            let loaded = store.last_response(&form.id).unwrap();
            assert_eq!(
                loaded.value(&form.fields[1].id),
                Some(&ResponseValue::Multiple(vec![]))
            );
            assert_eq!(loaded, response);
        }
    }

    mod fail_soft {
        use super::*;
        use pretty_assertions::assert_eq;

        fn seeded(rejected_key: &'static str, forms: &[Form], responses: &[FormResponse]) -> FormStore {
            let mut inner = MemoryBackend::new();
            inner.set(FORMS_KEY, &serde_json::to_string(forms).unwrap()).unwrap();
            inner
                .set(RESPONSES_KEY, &serde_json::to_string(responses).unwrap())
                .unwrap();
            FormStore::new(Box::new(RejectingBackend { inner, rejected_key }))
        }

        #[test]
        fn test_failed_response_cleanup_keeps_form() {
            let a = sample_form("A");
            let mut scratch = memory_store();
            let response = submit(&mut scratch, &a, "one");
            let mut store = seeded(RESPONSES_KEY, &[a.clone()], &[response.clone()]);

            assert!(store.delete_form(&a.id).is_err());
            assert_eq!(store.load_forms(), vec![a.clone()]);
            assert_eq!(store.load_responses(&a.id), vec![response]);
        }

        #[test]
        fn test_failed_forms_write_leaves_no_orphans() {
            let a = sample_form("A");
            let mut scratch = memory_store();
            let response = submit(&mut scratch, &a, "one");
            let mut store = seeded(FORMS_KEY, &[a.clone()], &[response]);

            assert!(store.delete_form(&a.id).is_err());
            assert_eq!(store.load_forms(), vec![a.clone()]);
            assert!(store.load_responses(&a.id).is_empty());
        }

        #[test]
        fn test_malformed_forms_blob_loads_empty() {
            let mut backend = MemoryBackend::new();
            backend.set(FORMS_KEY, "{not json").unwrap();
            let store = FormStore::new(Box::new(backend));
            assert!(store.load_forms().is_empty());
        }

        #[test]
        fn test_wrong_shape_loads_empty() {
            let mut backend = MemoryBackend::new();
            backend.set(RESPONSES_KEY, r#"{"id":"not an array"}"#).unwrap();
            let store = FormStore::new(Box::new(backend));
            assert!(store.load_responses("x").is_empty());
        }

        #[test]
        fn test_save_response_over_corrupt_blob_starts_fresh() {
            let mut backend = MemoryBackend::new();
            backend.set(RESPONSES_KEY, "garbage").unwrap();
            let mut store = FormStore::new(Box::new(backend));
            let form = sample_form("A");

            let response = submit(&mut store, &form, "Ada");
            assert_eq!(store.load_responses(&form.id), vec![response]);
        }

        #[test]
        fn test_backend_read_error_loads_empty() {
            let mut mock = MockKeyValueBackend::new();
            mock.expect_get()
                .returning(|_| Err(StoreError::Backend("disk on fire".into())));
            let store = FormStore::new(Box::new(mock));

            assert!(store.load_forms().is_empty());
            assert!(store.last_response("any").is_none());
        }

        #[test]
        fn test_backend_write_error_is_returned() {
            let mut mock = MockKeyValueBackend::new();
            mock.expect_set()
                .withf(|key, _| key == FORMS_KEY)
                .times(1)
                .returning(|_, _| Err(StoreError::Backend("quota exceeded".into())));
            let mut store = FormStore::new(Box::new(mock));

            let err = store.save_forms(&[sample_form("A")]).unwrap_err();
            assert!(matches!(err, StoreError::Backend(msg) if msg == "quota exceeded"));
        }

        #[test]
        fn test_delete_form_stops_when_responses_write_fails() {
            let mut mock = MockKeyValueBackend::new();
            mock.expect_get().returning(|_| Ok(None));
            mock.expect_set()
                .withf(|key, _| key == RESPONSES_KEY)
                .times(1)
                .returning(|_, _| Err(StoreError::Backend("read-only".into())));
            mock.expect_set()
                .withf(|key, _| key == FORMS_KEY)
                .never();
            let mut store = FormStore::new(Box::new(mock));

            assert!(store.delete_form("1").is_err());
        }

        #[test]
        fn test_save_forms_writes_json_array() {
            let mut mock = MockKeyValueBackend::new();
            mock.expect_set()
                .withf(|key, value| key == FORMS_KEY && value.starts_with('[') && value.contains("\"Survey\""))
                .times(1)
                .returning(|_, _| Ok(()));
            let mut store = FormStore::new(Box::new(mock));

            store.save_forms(&[Form::new("Survey").unwrap()]).unwrap();
        }
    }
}
