//! Application state and core logic

use crate::config::AppConfig;
use crate::model::{build_response, Direction, Form};
use crate::state::{
    AppState, FieldEditorForm, FieldFocus, PendingDeleteAction, PreviewForm, View,
};
use crate::store::{FileBackend, FormStore, KeyValueBackend, MemoryBackend};
use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;
use tracing::{info, warn};

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Persistence for forms and responses
    pub store: FormStore,
    /// User configuration
    pub config: AppConfig,
    /// Whether the app should quit
    quit: bool,
    /// Transient feedback shown in the status bar
    pub status_message: Option<String>,
    /// Where forms are stored, for display
    pub data_location: String,
}

impl App {
    /// Create a new App backed by the configured data directory
    pub fn new(config: AppConfig) -> Self {
        let (backend, data_location): (Box<dyn KeyValueBackend>, String) =
            match config.resolve_data_dir() {
                Some(dir) => {
                    info!(data_dir = %dir.display(), "Using file storage");
                    let location = dir.display().to_string();
                    (Box::new(FileBackend::new(dir)), location)
                }
                None => {
                    warn!("No data directory available, forms will not be persisted");
                    (Box::new(MemoryBackend::new()), "(memory)".to_string())
                }
            };

        let mut app = Self::with_store(FormStore::new(backend), config);
        app.data_location = data_location;
        app
    }

    /// Create an App over an existing store
    pub fn with_store(store: FormStore, config: AppConfig) -> Self {
        let state = AppState {
            forms: store.load_forms(),
            ..Default::default()
        };
        info!(count = state.forms.len(), "Loaded forms");

        let mut app = Self {
            state,
            store,
            config,
            quit: false,
            status_message: None,
            data_location: String::new(),
        };
        app.refresh_response_counts();
        app
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    fn refresh_response_counts(&mut self) {
        self.state.response_counts = self
            .state
            .forms
            .iter()
            .map(|f| (f.id.clone(), self.store.load_responses(&f.id).len()))
            .collect::<HashMap<_, _>>();
    }

    /// Handle a key event
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Handle delete confirmation (modal)
        if self.state.pending_delete.is_some() {
            self.handle_confirm_delete_key(key)?;
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        match self.state.current_view {
            View::FormList => self.handle_form_list_key(key)?,
            View::FormCreate => self.handle_form_create_key(key)?,
            View::Builder => self.handle_builder_key(key)?,
            View::FieldEditor => self.handle_field_editor_key(key)?,
            View::Preview => self.handle_preview_key(key)?,
            View::Responses => self.handle_responses_key(key)?,
        }

        Ok(())
    }

    /// Navigate to a new view
    pub fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.state.current_view = view;
    }

    /// Go back to previous view
    pub fn go_back(&mut self) {
        // Skip form views in history to go back to the last non-form view
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            self.state.current_view = view;
            return;
        }
        self.state.current_view = View::FormList;
    }

    fn is_save_key(key: &KeyEvent) -> bool {
        match key.code {
            KeyCode::Char('s') => key.modifiers.contains(KeyModifiers::CONTROL),
            KeyCode::Char('w') => key.modifiers.contains(crate::platform::COPY_MODIFIER),
            _ => false,
        }
    }

    // === Form list ===

    fn handle_form_list_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.move_selection_down(self.state.forms.len());
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.move_selection_up(),
            KeyCode::Char('n') => {
                self.state.clear_form_name();
                self.navigate(View::FormCreate);
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                if let Some(form) = self.state.selected_form().cloned() {
                    self.open_builder(form);
                }
            }
            KeyCode::Char('p') => {
                if let Some(form) = self.state.selected_form().cloned() {
                    self.open_preview(form);
                }
            }
            KeyCode::Char('r') => {
                if let Some(form) = self.state.selected_form().cloned() {
                    self.open_responses(form);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => self.request_delete_selected_form()?,
            _ => {}
        }
        Ok(())
    }

    fn request_delete_selected_form(&mut self) -> Result<()> {
        let Some(form) = self.state.selected_form() else {
            return Ok(());
        };
        let action = PendingDeleteAction {
            form_id: form.id.clone(),
            form_name: form.name.clone(),
            response_count: self.state.response_count(&form.id),
            selected_option: false,
        };

        if self.config.confirm_deletes() {
            self.state.pending_delete = Some(action);
        } else {
            self.delete_form(&action.form_id);
        }
        Ok(())
    }

    fn handle_confirm_delete_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(action) = self.state.pending_delete.as_mut() else {
            return Ok(());
        };

        match key.code {
            KeyCode::Up | KeyCode::Down | KeyCode::Tab | KeyCode::Char('j' | 'k') => {
                action.selected_option = !action.selected_option;
            }
            KeyCode::Char('y') => {
                let form_id = action.form_id.clone();
                self.state.pending_delete = None;
                self.delete_form(&form_id);
            }
            KeyCode::Enter => {
                let confirmed = action.selected_option;
                let form_id = action.form_id.clone();
                self.state.pending_delete = None;
                if confirmed {
                    self.delete_form(&form_id);
                }
            }
            KeyCode::Esc | KeyCode::Char('n') => self.state.pending_delete = None,
            _ => {}
        }
        Ok(())
    }

    /// Delete a form and its responses, in storage first and then in memory
    fn delete_form(&mut self, form_id: &str) {
        match self.store.delete_form(form_id) {
            Ok(()) => {
                self.state.forms.retain(|f| f.id != form_id);
                self.state.response_counts.remove(form_id);
                self.status_message = Some("Form deleted".to_string());
            }
            Err(e) => {
                // A partial delete may have removed responses; resync with storage
                warn!(form_id, error = %e, "Form delete failed, reloading from storage");
                self.push_error(format!("Failed to delete form: {e}"));
                self.state.forms = self.store.load_forms();
                self.refresh_response_counts();
            }
        }
        self.state.selected_index =
            AppState::clamp_index(self.state.selected_index, self.state.forms.len());
    }

    // === New form ===

    fn handle_form_create_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Esc => {
                self.state.clear_form_name();
                self.go_back();
            }
            KeyCode::Enter => self.create_form(),
            _ if Self::is_save_key(&key) => self.create_form(),
            KeyCode::Char(c) => self.state.form_name.push_char(c),
            KeyCode::Backspace => self.state.form_name.pop_char(),
            _ => {}
        }
        Ok(())
    }

    fn create_form(&mut self) {
        // Blank names are ignored; the dialog stays open
        let Ok(form) = Form::new(self.state.form_name.as_text()) else {
            return;
        };

        let mut forms = self.state.forms.clone();
        forms.push(form.clone());
        if let Err(e) = self.store.save_forms(&forms) {
            self.push_error(format!("Failed to save forms: {e}"));
            return;
        }
        self.state.forms = forms;
        self.state.response_counts.insert(form.id.clone(), 0);
        self.state.selected_index = self.state.forms.len() - 1;
        info!(form_id = %form.id, name = %form.name, "Created form");

        self.state.clear_form_name();
        self.open_builder(form);
    }

    // === Builder ===

    fn open_builder(&mut self, form: Form) {
        self.state.draft = Some(form);
        self.state.draft_dirty = false;
        self.state.selected_field_index = 0;
        self.navigate(View::Builder);
    }

    fn handle_builder_key(&mut self, key: KeyEvent) -> Result<()> {
        let field_count = self.state.draft.as_ref().map_or(0, |d| d.fields.len());
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);

        match key.code {
            _ if Self::is_save_key(&key) => self.save_draft(),
            KeyCode::Esc => {
                if self.state.draft_dirty {
                    self.status_message = Some("Unsaved changes discarded".to_string());
                }
                self.state.draft = None;
                self.state.draft_dirty = false;
                self.go_back();
            }
            KeyCode::Char('K') => self.move_selected_field(Direction::Up),
            KeyCode::Char('J') => self.move_selected_field(Direction::Down),
            KeyCode::Up if shift => self.move_selected_field(Direction::Up),
            KeyCode::Down if shift => self.move_selected_field(Direction::Down),
            KeyCode::Char('j') | KeyCode::Down => {
                if field_count > 0 && self.state.selected_field_index < field_count - 1 {
                    self.state.selected_field_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.selected_field_index = self.state.selected_field_index.saturating_sub(1);
            }
            KeyCode::Char('a') => {
                self.state.field_editor = Some(FieldEditorForm::new());
                self.navigate(View::FieldEditor);
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                let field = self
                    .state
                    .draft
                    .as_ref()
                    .and_then(|d| d.fields.get(self.state.selected_field_index));
                if let Some(field) = field {
                    self.state.field_editor = Some(FieldEditorForm::from_field(field));
                    self.navigate(View::FieldEditor);
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let (Some(id), Some(draft)) = (
                    self.state.selected_draft_field_id(),
                    self.state.draft.as_mut(),
                ) {
                    if draft.delete_field(&id) {
                        self.state.draft_dirty = true;
                        self.state.selected_field_index = AppState::clamp_index(
                            self.state.selected_field_index,
                            draft.fields.len(),
                        );
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn move_selected_field(&mut self, direction: Direction) {
        let Some(id) = self.state.selected_draft_field_id() else {
            return;
        };
        let Some(draft) = self.state.draft.as_mut() else {
            return;
        };
        if draft.move_field(&id, direction) {
            self.state.draft_dirty = true;
            self.state.selected_field_index = match direction {
                Direction::Up => self.state.selected_field_index - 1,
                Direction::Down => self.state.selected_field_index + 1,
            };
        }
    }

    /// Commit the draft into the form list and persist it
    fn save_draft(&mut self) {
        let Some(draft) = self.state.draft.as_ref() else {
            return;
        };
        let form_id = draft.id.clone();
        let mut forms = self.state.forms.clone();
        draft.clone().save_into(&mut forms);

        // Memory only changes once storage has accepted the write
        if let Err(e) = self.store.save_forms(&forms) {
            self.push_error(format!("Failed to save form: {e}"));
            return;
        }

        self.state.forms = forms;
        self.state.draft = None;
        self.state.draft_dirty = false;
        if let Some(index) = self.state.forms.iter().position(|f| f.id == form_id) {
            self.state.selected_index = index;
        }
        info!(form_id = %form_id, "Saved form");
        self.status_message = Some("Form saved successfully!".to_string());
        self.go_back();
    }

    // === Field editor ===

    fn handle_field_editor_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::is_save_key(&key) {
            self.commit_field_editor();
            return Ok(());
        }

        let Some(editor) = self.state.field_editor.as_mut() else {
            self.go_back();
            return Ok(());
        };

        match key.code {
            KeyCode::Esc => {
                self.state.field_editor = None;
                self.go_back();
            }
            KeyCode::Tab | KeyCode::Down => editor.next_field(),
            KeyCode::BackTab | KeyCode::Up => editor.prev_field(),
            KeyCode::Right if editor.active_field_index == 0 => editor.next_type(),
            KeyCode::Left if editor.active_field_index == 0 => editor.prev_type(),
            KeyCode::Enter => match editor.active_field_index {
                0 => editor.next_type(),
                2 => editor.toggle_required(),
                _ => editor.next_field(),
            },
            KeyCode::Char(c) => editor.input_char(c),
            KeyCode::Backspace => editor.backspace(),
            _ => {}
        }
        Ok(())
    }

    fn commit_field_editor(&mut self) {
        let Some(editor) = self.state.field_editor.as_ref() else {
            return;
        };
        let field = match editor.to_field() {
            Ok(field) => field,
            Err(e) => {
                self.push_error(e.to_string());
                return;
            }
        };
        let Some(draft) = self.state.draft.as_mut() else {
            return;
        };

        match editor.editing_field_id.as_deref() {
            Some(id) => {
                draft.edit_field(id, field);
            }
            None => {
                draft.add_field(field);
                self.state.selected_field_index = draft.fields.len() - 1;
            }
        }

        self.state.draft_dirty = true;
        self.state.field_editor = None;
        self.go_back();
    }

    // === Preview ===

    fn open_preview(&mut self, form: Form) {
        let last = if self.config.prefill_last_response() {
            self.store.last_response(&form.id)
        } else {
            None
        };
        self.state.preview = Some(PreviewForm::from_form(form, last.as_ref()));
        self.navigate(View::Preview);
    }

    fn handle_preview_key(&mut self, key: KeyEvent) -> Result<()> {
        if Self::is_save_key(&key) {
            self.submit_preview();
            return Ok(());
        }

        let Some(preview) = self.state.preview.as_mut() else {
            self.go_back();
            return Ok(());
        };

        match key.code {
            KeyCode::Esc => {
                self.state.preview = None;
                self.go_back();
            }
            KeyCode::Tab | KeyCode::Down => preview.next_field(),
            KeyCode::BackTab | KeyCode::Up => preview.prev_field(),
            KeyCode::Left => preview.cycle(false),
            KeyCode::Right => preview.cycle(true),
            KeyCode::Enter => {
                if preview.is_active_field_multiline() {
                    preview.newline();
                } else {
                    preview.next_field();
                }
            }
            KeyCode::Char(c) => preview.input_char(c),
            KeyCode::Backspace => preview.backspace(),
            _ => {}
        }
        Ok(())
    }

    fn submit_preview(&mut self) {
        let Some(preview) = self.state.preview.as_ref() else {
            return;
        };
        if let Err(message) = preview.validate() {
            self.push_error(message);
            return;
        }

        let response = build_response(&preview.form, &preview.to_raw_input());
        if let Err(e) = self.store.save_response(&response) {
            self.push_error(format!("Failed to save response: {e}"));
            return;
        }
        info!(form_id = %response.form_id, response_id = %response.id, "Form submitted");

        *self
            .state
            .response_counts
            .entry(response.form_id.clone())
            .or_insert(0) += 1;

        // Refresh the preview, prefilled with what was just submitted
        let form = preview.form.clone();
        let previous = self.config.prefill_last_response().then_some(&response);
        self.state.preview = Some(PreviewForm::from_form(form, previous));
        self.status_message = Some("Form submitted successfully!".to_string());
    }

    // === Responses ===

    fn open_responses(&mut self, form: Form) {
        self.state.responses = self.store.load_responses(&form.id);
        self.state.responses_form = Some(form);
        self.state.selected_response_index = 0;
        self.navigate(View::Responses);
    }

    fn handle_responses_key(&mut self, key: KeyEvent) -> Result<()> {
        let count = self.state.responses.len();
        match key.code {
            KeyCode::Esc => {
                self.state.responses.clear();
                self.state.responses_form = None;
                self.go_back();
            }
            KeyCode::Char('j') | KeyCode::Down => {
                if count > 0 && self.state.selected_response_index < count - 1 {
                    self.state.selected_response_index += 1;
                }
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.selected_response_index =
                    self.state.selected_response_index.saturating_sub(1);
            }
            KeyCode::Char('y') => {
                if let Err(e) = self.copy_selected_response() {
                    self.push_error(format!("Failed to copy: {e:#}"));
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn copy_selected_response(&mut self) -> Result<()> {
        let Some(response) = self
            .state
            .responses
            .get(self.state.selected_response_index)
        else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(response)?;
        let mut clipboard = arboard::Clipboard::new().context("clipboard unavailable")?;
        clipboard.set_text(json)?;
        self.status_message = Some("Response copied to clipboard".to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FieldType, FormField, FormResponse, RawInput, ResponseValue};
    use crate::store::{
        MockKeyValueBackend, RejectingBackend, StoreError, FORMS_KEY, RESPONSES_KEY,
    };
    use pretty_assertions::assert_eq;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(key(code)).unwrap();
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    fn memory_app() -> App {
        App::with_store(
            FormStore::new(Box::new(MemoryBackend::new())),
            AppConfig::default(),
        )
    }

    fn app_with_forms(forms: Vec<Form>) -> App {
        let mut store = FormStore::new(Box::new(MemoryBackend::new()));
        store.save_forms(&forms).unwrap();
        App::with_store(store, AppConfig::default())
    }

    fn checkbox_form() -> Form {
        let mut form = Form::new("Survey").unwrap();
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

    fn draft_labels(app: &App) -> Vec<String> {
        app.state
            .draft
            .as_ref()
            .unwrap()
            .fields
            .iter()
            .map(|f| f.label.clone())
            .collect()
    }

    /// Add a text field with `label` from the builder
    fn add_text_field(app: &mut App, label: &str) {
        press(app, KeyCode::Char('a'));
        press(app, KeyCode::Tab);
        type_text(app, label);
        app.handle_key(ctrl('s')).unwrap();
    }

    mod navigation {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_should_quit_initially_false() {
            let app = memory_app();
            assert!(!app.should_quit());
        }

        #[test]
        fn test_q_quits_from_list() {
            let mut app = memory_app();
            press(&mut app, KeyCode::Char('q'));
            assert!(app.should_quit());
        }

        #[test]
        fn test_navigate_saves_history() {
            let mut app = memory_app();
            app.navigate(View::Builder);
            assert_eq!(app.state.current_view, View::Builder);
            assert_eq!(app.state.view_history, vec![View::FormList]);
        }

        #[test]
        fn test_go_back_skips_form_views() {
            let mut app = memory_app();
            app.navigate(View::FormCreate);
            app.navigate(View::Builder);
            app.go_back();
            assert_eq!(app.state.current_view, View::FormList);
        }

        #[test]
        fn test_go_back_empty_history_lands_on_list() {
            let mut app = memory_app();
            app.state.current_view = View::Responses;
            app.go_back();
            assert_eq!(app.state.current_view, View::FormList);
        }

        #[test]
        fn test_error_dialog_is_modal() {
            let mut app = memory_app();
            app.push_error("boom");
            press(&mut app, KeyCode::Char('n'));
            assert_eq!(app.state.current_view, View::FormList);
            press(&mut app, KeyCode::Enter);
            assert!(!app.state.has_errors());
        }
    }

    mod create_form {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_create_form_persists_and_opens_builder() {
            let mut app = memory_app();
            press(&mut app, KeyCode::Char('n'));
            assert_eq!(app.state.current_view, View::FormCreate);
            type_text(&mut app, "Survey");
            press(&mut app, KeyCode::Enter);

            assert_eq!(app.state.current_view, View::Builder);
            assert_eq!(app.state.forms.len(), 1);
            assert_eq!(app.state.forms[0].name, "Survey");
            assert_eq!(app.store.load_forms(), app.state.forms);
            assert_eq!(app.state.draft.as_ref().unwrap().id, app.state.forms[0].id);
        }

        #[test]
        fn test_blank_name_is_ignored() {
            let mut app = memory_app();
            press(&mut app, KeyCode::Char('n'));
            type_text(&mut app, "   ");
            press(&mut app, KeyCode::Enter);

            assert_eq!(app.state.current_view, View::FormCreate);
            assert!(app.state.forms.is_empty());
            assert!(app.store.load_forms().is_empty());
        }

        #[test]
        fn test_escape_cancels() {
            let mut app = memory_app();
            press(&mut app, KeyCode::Char('n'));
            type_text(&mut app, "Draft");
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::FormList);
            assert!(app.state.forms.is_empty());
            assert_eq!(app.state.form_name.as_text(), "");
        }

        #[test]
        fn test_builder_back_returns_to_list_not_create() {
            let mut app = memory_app();
            press(&mut app, KeyCode::Char('n'));
            type_text(&mut app, "Survey");
            press(&mut app, KeyCode::Enter);
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::FormList);
        }
    }

    mod builder {
        use super::*;
        use pretty_assertions::assert_eq;

        fn builder_app() -> App {
            let mut app = app_with_forms(vec![Form::new("Survey").unwrap()]);
            press(&mut app, KeyCode::Enter);
            app
        }

        #[test]
        fn test_add_field_appends_to_draft() {
            let mut app = builder_app();
            add_text_field(&mut app, "Name");
            add_text_field(&mut app, "Email");

            assert_eq!(app.state.current_view, View::Builder);
            assert_eq!(draft_labels(&app), vec!["Name", "Email"]);
            assert_eq!(app.state.selected_field_index, 1);
            assert!(app.state.draft_dirty);
            // Not persisted until saved
            assert!(app.store.load_forms()[0].fields.is_empty());
        }

        #[test]
        fn test_invalid_field_shows_error_and_stays_open() {
            let mut app = builder_app();
            press(&mut app, KeyCode::Char('a'));
            press(&mut app, KeyCode::Right); // textarea
            press(&mut app, KeyCode::Right); // radio
            press(&mut app, KeyCode::Tab);
            type_text(&mut app, "Pick one");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.state.current_view, View::FieldEditor);
            assert_eq!(
                app.state.current_error(),
                Some("a radio field needs at least one option")
            );
        }

        #[test]
        fn test_add_choice_field_with_options() {
            let mut app = builder_app();
            press(&mut app, KeyCode::Char('a'));
            for _ in 0..3 {
                press(&mut app, KeyCode::Right); // checkbox
            }
            press(&mut app, KeyCode::Tab);
            type_text(&mut app, "Colors");
            press(&mut app, KeyCode::Tab);
            press(&mut app, KeyCode::Enter); // required
            press(&mut app, KeyCode::Tab);
            type_text(&mut app, "Red, Blue");
            app.handle_key(ctrl('s')).unwrap();

            let field = &app.state.draft.as_ref().unwrap().fields[0];
            assert_eq!(field.field_type, FieldType::Checkbox);
            assert!(field.required);
            assert_eq!(field.options(), ["Red", "Blue"]);
        }

        #[test]
        fn test_edit_field_keeps_position_and_id() {
            let mut app = builder_app();
            add_text_field(&mut app, "One");
            add_text_field(&mut app, "Two");
            add_text_field(&mut app, "Three");
            let original_id = app.state.draft.as_ref().unwrap().fields[1].id.clone();

            app.state.selected_field_index = 1;
            press(&mut app, KeyCode::Char('e'));
            press(&mut app, KeyCode::Tab);
            press(&mut app, KeyCode::Backspace);
            press(&mut app, KeyCode::Backspace);
            press(&mut app, KeyCode::Backspace);
            type_text(&mut app, "Second");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(draft_labels(&app), vec!["One", "Second", "Three"]);
            assert_eq!(app.state.draft.as_ref().unwrap().fields[1].id, original_id);
        }

        #[test]
        fn test_move_field_down_follows_selection() {
            let mut app = builder_app();
            add_text_field(&mut app, "X");
            add_text_field(&mut app, "Y");
            add_text_field(&mut app, "Z");

            app.state.selected_field_index = 1;
            press(&mut app, KeyCode::Char('J'));
            assert_eq!(draft_labels(&app), vec!["X", "Z", "Y"]);
            assert_eq!(app.state.selected_field_index, 2);

            // Already last: no-op
            press(&mut app, KeyCode::Char('J'));
            assert_eq!(draft_labels(&app), vec!["X", "Z", "Y"]);
        }

        #[test]
        fn test_move_first_field_up_is_noop() {
            let mut app = builder_app();
            add_text_field(&mut app, "X");
            add_text_field(&mut app, "Y");
            app.state.selected_field_index = 0;
            app.handle_key(KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT))
                .unwrap();
            assert_eq!(draft_labels(&app), vec!["X", "Y"]);
            assert_eq!(app.state.selected_field_index, 0);
        }

        #[test]
        fn test_delete_field_clamps_selection() {
            let mut app = builder_app();
            add_text_field(&mut app, "X");
            add_text_field(&mut app, "Y");
            press(&mut app, KeyCode::Char('d'));
            assert_eq!(draft_labels(&app), vec!["X"]);
            assert_eq!(app.state.selected_field_index, 0);
        }

        #[test]
        fn test_save_persists_and_returns_to_list() {
            let mut app = builder_app();
            add_text_field(&mut app, "Name");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.state.current_view, View::FormList);
            assert_eq!(app.status_message.as_deref(), Some("Form saved successfully!"));
            assert!(app.state.draft.is_none());
            let stored = app.store.load_forms();
            assert_eq!(stored.len(), 1);
            assert_eq!(stored[0].fields[0].label, "Name");
            assert_eq!(stored, app.state.forms);
        }

        #[test]
        fn test_escape_discards_draft() {
            let mut app = builder_app();
            add_text_field(&mut app, "Name");
            press(&mut app, KeyCode::Esc);

            assert_eq!(app.state.current_view, View::FormList);
            assert!(app.state.forms[0].fields.is_empty());
            assert_eq!(
                app.status_message.as_deref(),
                Some("Unsaved changes discarded")
            );
        }
    }

    mod preview {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_submit_checked_checkbox() {
            let form = checkbox_form();
            let field_id = form.fields[0].id.clone();
            let mut app = app_with_forms(vec![form.clone()]);

            press(&mut app, KeyCode::Char('p'));
            assert_eq!(app.state.current_view, View::Preview);
            press(&mut app, KeyCode::Char(' ')); // check "Red"
            app.handle_key(ctrl('s')).unwrap();

            let response = app.store.last_response(&form.id).unwrap();
            assert_eq!(
                response.value(&field_id),
                Some(&ResponseValue::Multiple(vec!["Red".into()]))
            );
            assert_eq!(app.state.response_count(&form.id), 1);
            assert_eq!(
                app.status_message.as_deref(),
                Some("Form submitted successfully!")
            );
        }

        #[test]
        fn test_submit_nothing_checked_stores_empty_list() {
            let form = checkbox_form();
            let field_id = form.fields[0].id.clone();
            let mut app = app_with_forms(vec![form.clone()]);

            press(&mut app, KeyCode::Char('p'));
            app.handle_key(ctrl('s')).unwrap();

            let response = app.store.last_response(&form.id).unwrap();
            assert_eq!(
                response.value(&field_id),
                Some(&ResponseValue::Multiple(vec![]))
            );
        }

        #[test]
        fn test_preview_prefills_last_response() {
            let form = checkbox_form();
            let mut app = app_with_forms(vec![form]);

            press(&mut app, KeyCode::Char('p'));
            press(&mut app, KeyCode::Right);
            press(&mut app, KeyCode::Char(' ')); // check "Blue"
            app.handle_key(ctrl('s')).unwrap();
            press(&mut app, KeyCode::Esc);
            press(&mut app, KeyCode::Char('p'));

            let preview = app.state.preview.as_ref().unwrap();
            assert_eq!(preview.to_raw_input().get_all(&preview.form.fields[0].id), ["Blue"]);
        }

        #[test]
        fn test_required_field_blocks_submit() {
            let mut form = Form::new("Contact").unwrap();
            form.add_field(FormField::new(FieldType::Text, "Email", true, vec![]).unwrap());
            let mut app = app_with_forms(vec![form.clone()]);

            press(&mut app, KeyCode::Char('p'));
            app.handle_key(ctrl('s')).unwrap();

            assert!(app.state.has_errors());
            assert!(app.store.load_responses(&form.id).is_empty());
        }

        #[test]
        fn test_typing_and_submitting_text() {
            let mut form = Form::new("Contact").unwrap();
            form.add_field(FormField::new(FieldType::Text, "Email", true, vec![]).unwrap());
            let field_id = form.fields[0].id.clone();
            let mut app = app_with_forms(vec![form.clone()]);

            press(&mut app, KeyCode::Char('p'));
            type_text(&mut app, "ada@example.com");
            app.handle_key(ctrl('s')).unwrap();

            let response = app.store.last_response(&form.id).unwrap();
            assert_eq!(
                response.value(&field_id),
                Some(&ResponseValue::Single("ada@example.com".into()))
            );
        }
    }

    mod responses_and_delete {
        use super::*;
        use pretty_assertions::assert_eq;

        fn app_with_submission() -> (App, Form) {
            let form = checkbox_form();
            let mut app = app_with_forms(vec![form.clone(), Form::new("Other").unwrap()]);
            press(&mut app, KeyCode::Char('p'));
            app.handle_key(ctrl('s')).unwrap();
            press(&mut app, KeyCode::Esc);
            (app, form)
        }

        #[test]
        fn test_responses_view_lists_submissions() {
            let (mut app, form) = app_with_submission();
            press(&mut app, KeyCode::Char('r'));
            assert_eq!(app.state.current_view, View::Responses);
            assert_eq!(app.state.responses.len(), 1);
            assert_eq!(app.state.responses[0].form_id, form.id);
            press(&mut app, KeyCode::Esc);
            assert_eq!(app.state.current_view, View::FormList);
            assert!(app.state.responses.is_empty());
        }

        #[test]
        fn test_delete_requires_confirmation() {
            let (mut app, form) = app_with_submission();
            press(&mut app, KeyCode::Char('d'));
            let pending = app.state.pending_delete.as_ref().unwrap();
            assert_eq!(pending.form_id, form.id);
            assert_eq!(pending.response_count, 1);

            // Enter on the default "Cancel" keeps the form
            press(&mut app, KeyCode::Enter);
            assert!(app.state.pending_delete.is_none());
            assert_eq!(app.state.forms.len(), 2);
        }

        #[test]
        fn test_confirmed_delete_cascades() {
            let (mut app, form) = app_with_submission();
            press(&mut app, KeyCode::Char('d'));
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Enter);

            assert_eq!(app.state.forms.len(), 1);
            assert_eq!(app.state.forms[0].name, "Other");
            assert!(app.store.load_responses(&form.id).is_empty());
            assert_eq!(app.store.load_forms(), app.state.forms);
        }

        #[test]
        fn test_delete_without_confirmation_when_disabled() {
            let (mut app, form) = app_with_submission();
            app.config.confirm_deletes = Some(false);
            press(&mut app, KeyCode::Char('d'));

            assert!(app.state.pending_delete.is_none());
            assert!(app.state.forms.iter().all(|f| f.id != form.id));
        }

        #[test]
        fn test_delete_last_form_clamps_selection() {
            let mut app = app_with_forms(vec![Form::new("A").unwrap(), Form::new("B").unwrap()]);
            app.config.confirm_deletes = Some(false);
            press(&mut app, KeyCode::Down);
            press(&mut app, KeyCode::Char('d'));
            assert_eq!(app.state.selected_index, 0);
        }
    }

    mod storage_failures {
        use super::*;
        use pretty_assertions::assert_eq;

        fn app_over(rejected_key: &'static str, forms: &[Form], responses: &[FormResponse]) -> App {
            let mut inner = MemoryBackend::new();
            inner.set(FORMS_KEY, &serde_json::to_string(forms).unwrap()).unwrap();
            inner
                .set(RESPONSES_KEY, &serde_json::to_string(responses).unwrap())
                .unwrap();
            let backend = RejectingBackend { inner, rejected_key };
            let mut app = App::with_store(FormStore::new(Box::new(backend)), AppConfig::default());
            app.config.confirm_deletes = Some(false);
            app
        }

        fn submitted(form: &Form) -> FormResponse {
            let raw: RawInput = [(form.fields[0].id.clone(), "Red")].into_iter().collect();
            build_response(form, &raw)
        }

        #[test]
        fn test_rejected_response_cleanup_keeps_memory_and_disk_in_step() {
            let a = checkbox_form();
            let b = Form::new("B").unwrap();
            let mut app = app_over(RESPONSES_KEY, &[a.clone(), b], &[submitted(&a)]);

            press(&mut app, KeyCode::Char('d'));

            assert!(app.state.has_errors());
            assert_eq!(app.store.load_forms(), app.state.forms);
            assert_eq!(app.state.forms.len(), 2);
            assert_eq!(app.state.response_count(&a.id), 1);
        }

        #[test]
        fn test_rejected_forms_write_resyncs_response_counts() {
            let a = checkbox_form();
            let mut app = app_over(FORMS_KEY, &[a.clone()], &[submitted(&a)]);
            assert_eq!(app.state.response_count(&a.id), 1);

            press(&mut app, KeyCode::Char('d'));

            assert!(app.state.has_errors());
            assert_eq!(app.store.load_forms(), app.state.forms);
            assert_eq!(app.state.response_count(&a.id), 0);
        }

        #[test]
        fn test_failed_save_keeps_draft_and_reports() {
            let mut mock = MockKeyValueBackend::new();
            mock.expect_get().returning(|_| Ok(None));
            mock.expect_set()
                .returning(|_, _| Err(StoreError::Backend("disk full".into())));
            let mut app = App::with_store(FormStore::new(Box::new(mock)), AppConfig::default());
            app.state.forms.push(Form::new("Survey").unwrap());

            press(&mut app, KeyCode::Enter);
            add_text_field(&mut app, "Name");
            app.handle_key(ctrl('s')).unwrap();

            assert_eq!(app.state.current_view, View::Builder);
            assert!(app.state.draft.is_some());
            assert_eq!(
                app.state.current_error(),
                Some("Failed to save form: storage backend error: disk full")
            );
        }
    }
}
