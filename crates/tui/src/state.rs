//! Application state: the terminal-free UI state machine.
//!
//! `PetCareApp::handle_key` mutates the registry and reports what the
//! outer loop must do next (`AppCommand`). Persistence happens there.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent};
use tracing::{debug, warn};

use petcare_core::{Pet, PetCareError, PetId, PetRegistry};

use crate::forms::{Form, FormEvent, FormKind, TaskPicker};
use crate::input_handler::{BrowseAction, browse_action, is_quit_chord};

/// Lines scrolled by PageUp / PageDown in the care panel.
pub const CARE_SCROLL_STEP: u16 = 5;

/// What the outer loop must do after a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppCommand {
    None,
    /// The registry changed and must be written to the store.
    Persist,
    /// Re-read the clock and recompute every panel.
    Refresh,
    Quit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub level: StatusLevel,
    pub text: String,
}

/// Which screen or dialog has the keyboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Form(Form),
    PickTask(TaskPicker),
    ConfirmRemove { pet_id: PetId, name: String },
    Details(PetId),
    Help,
}

#[derive(Debug, Clone)]
pub struct PetCareApp {
    registry: PetRegistry,
    selected: Option<usize>,
    mode: Mode,
    status: Option<StatusMessage>,
    today: NaiveDate,
    health_preview_limit: usize,
    care_scroll: u16,
}

impl PetCareApp {
    pub fn new(registry: PetRegistry, today: NaiveDate, health_preview_limit: usize) -> Self {
        let selected = (!registry.is_empty()).then_some(0);
        Self {
            registry,
            selected,
            mode: Mode::Browse,
            status: None,
            today,
            health_preview_limit,
            care_scroll: 0,
        }
    }

    pub fn registry(&self) -> &PetRegistry {
        &self.registry
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn health_preview_limit(&self) -> usize {
        self.health_preview_limit
    }

    pub fn care_scroll(&self) -> u16 {
        self.care_scroll
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_pet(&self) -> Option<&Pet> {
        self.selected.and_then(|i| self.registry.pets().get(i))
    }

    pub fn set_status(&mut self, level: StatusLevel, text: impl Into<String>) {
        self.status = Some(StatusMessage {
            level,
            text: text.into(),
        });
    }

    /// Recompute against a new date (F5, or a date rollover).
    pub fn refresh(&mut self, today: NaiveDate) {
        self.today = today;
        let len = self.registry.len();
        self.selected = match self.selected {
            _ if len == 0 => None,
            Some(i) => Some(i.min(len - 1)),
            None => Some(0),
        };
    }

    pub fn report_save_error(&mut self, error: &dyn std::fmt::Display) {
        warn!("Error saving data: {}", error);
        self.set_status(StatusLevel::Error, format!("Error saving data: {}", error));
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> AppCommand {
        if is_quit_chord(key) {
            return AppCommand::Quit;
        }
        self.status = None;
        let mode = std::mem::replace(&mut self.mode, Mode::Browse);
        match mode {
            Mode::Browse => match browse_action(key) {
                Some(action) => self.handle_browse(action),
                None => AppCommand::None,
            },
            Mode::Form(form) => self.handle_form(form, key),
            Mode::PickTask(picker) => self.handle_picker(picker, key),
            Mode::ConfirmRemove { pet_id, name } => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                    self.remove_pet(pet_id, &name)
                }
                KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => AppCommand::None,
                _ => {
                    self.mode = Mode::ConfirmRemove { pet_id, name };
                    AppCommand::None
                }
            },
            Mode::Details(_) | Mode::Help => AppCommand::None,
        }
    }

    fn handle_browse(&mut self, action: BrowseAction) -> AppCommand {
        match action {
            BrowseAction::SelectPrev => self.move_selection(-1),
            BrowseAction::SelectNext => self.move_selection(1),
            BrowseAction::SelectFirst => self.select((!self.registry.is_empty()).then_some(0)),
            BrowseAction::SelectLast => self.select(self.registry.len().checked_sub(1)),
            BrowseAction::AddPet => self.mode = Mode::Form(Form::add_pet()),
            BrowseAction::RemovePet => {
                if let Some(pet) = self.require_pet("Please select a pet to remove") {
                    let (pet_id, name) = (pet.id, pet.name.clone());
                    self.mode = Mode::ConfirmRemove { pet_id, name };
                }
            }
            BrowseAction::ShowDetails => {
                if let Some(pet) = self.require_pet("Please select a pet to view details") {
                    self.mode = Mode::Details(pet.id);
                }
            }
            BrowseAction::MarkTaskDone => {
                if let Some(pet) = self.require_pet("Please select a pet first") {
                    if pet.care_schedule.is_empty() {
                        let text = format!("No tasks available for {}", pet.name);
                        self.set_status(StatusLevel::Info, text);
                    } else {
                        let items = pet
                            .care_schedule
                            .iter()
                            .map(|t| format!("{} (every {} days)", t.task, t.frequency_days))
                            .collect();
                        let picker = TaskPicker::new(pet.id, &pet.name, items);
                        self.mode = Mode::PickTask(picker);
                    }
                }
            }
            BrowseAction::AddTask => {
                if let Some(pet) = self.require_pet("Please select a pet first") {
                    self.mode = Mode::Form(Form::add_task(pet.id, &pet.name));
                }
            }
            BrowseAction::AddHealthRecord => {
                if let Some(pet) = self.require_pet("Please select a pet first") {
                    self.mode = Mode::Form(Form::add_health_record(pet.id, &pet.name));
                }
            }
            BrowseAction::ScrollCareUp => {
                self.care_scroll = self.care_scroll.saturating_sub(CARE_SCROLL_STEP);
            }
            BrowseAction::ScrollCareDown => {
                self.care_scroll = self.care_scroll.saturating_add(CARE_SCROLL_STEP);
            }
            BrowseAction::Refresh => return AppCommand::Refresh,
            BrowseAction::Help => self.mode = Mode::Help,
            BrowseAction::Quit => return AppCommand::Quit,
        }
        AppCommand::None
    }

    /// Selected pet, or a warning in the status bar. Clones so the caller
    /// can switch modes freely.
    fn require_pet(&mut self, warning: &str) -> Option<Pet> {
        let pet = self.selected_pet().cloned();
        if pet.is_none() {
            self.set_status(StatusLevel::Warning, warning);
        }
        pet
    }

    fn select(&mut self, index: Option<usize>) {
        if self.selected != index {
            self.care_scroll = 0;
        }
        self.selected = index;
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.registry.len();
        if len == 0 {
            return self.select(None);
        }
        let next = match self.selected {
            Some(i) => (i as isize + delta).clamp(0, len as isize - 1) as usize,
            None => 0,
        };
        self.select(Some(next));
    }

    fn handle_form(&mut self, mut form: Form, key: &KeyEvent) -> AppCommand {
        match form.handle_key(key) {
            FormEvent::Cancel => AppCommand::None,
            FormEvent::Submit => match self.submit_form(&form) {
                Ok(command) => command,
                Err(e) => {
                    debug!(error = %e, "Form rejected");
                    form.error = Some(e.to_string());
                    self.mode = Mode::Form(form);
                    AppCommand::None
                }
            },
            FormEvent::Ignored | FormEvent::Edited { .. } => {
                self.mode = Mode::Form(form);
                AppCommand::None
            }
        }
    }

    fn submit_form(&mut self, form: &Form) -> Result<AppCommand, PetCareError> {
        let today = self.today;
        match &form.kind {
            FormKind::AddPet => {
                let (name, age, breed, kind) = form.pet_input()?;
                let pet = Pet::new(name, age, breed, kind, today)?;
                let added = self.registry.add_pet(pet)?.name.clone();
                self.select(self.registry.len().checked_sub(1));
                self.set_status(
                    StatusLevel::Success,
                    format!("{} has been added to your pets!", added),
                );
            }
            FormKind::AddTask { pet_id } => {
                let (task, frequency) = form.task_input()?;
                let pet = self.pet_mut(*pet_id)?;
                let added = pet.add_care_task(task, frequency, today)?.task.clone();
                self.set_status(
                    StatusLevel::Success,
                    format!("Task '{}' added successfully!", added),
                );
            }
            FormKind::AddHealthRecord { pet_id } => {
                let (kind, description) = form.record_input()?;
                let pet = self.pet_mut(*pet_id)?;
                pet.add_health_record(kind, description, today)?;
                self.set_status(StatusLevel::Success, "Health record added successfully!");
            }
        }
        Ok(AppCommand::Persist)
    }

    fn pet_mut(&mut self, pet_id: PetId) -> Result<&mut Pet, PetCareError> {
        self.registry
            .get_mut(pet_id)
            .ok_or_else(|| PetCareError::PetNotFound(pet_id.to_string()))
    }

    fn handle_picker(&mut self, mut picker: TaskPicker, key: &KeyEvent) -> AppCommand {
        match key.code {
            KeyCode::Esc => return AppCommand::None,
            KeyCode::Up | KeyCode::Char('k') => picker.move_by(-1),
            KeyCode::Down | KeyCode::Char('j') => picker.move_by(1),
            KeyCode::Enter => {
                let today = self.today;
                let result = self
                    .pet_mut(picker.pet_id)
                    .and_then(|pet| pet.complete_task(picker.selected, today).map(|t| t.task.clone()));
                return match result {
                    Ok(task) => {
                        self.set_status(StatusLevel::Success, format!("Task '{}' marked as done!", task));
                        AppCommand::Persist
                    }
                    Err(e) => {
                        self.set_status(StatusLevel::Error, e.to_string());
                        AppCommand::None
                    }
                };
            }
            _ => {}
        }
        self.mode = Mode::PickTask(picker);
        AppCommand::None
    }

    fn remove_pet(&mut self, pet_id: PetId, name: &str) -> AppCommand {
        match self.registry.remove_pet(pet_id) {
            Some(_) => {
                let len = self.registry.len();
                self.select(match self.selected {
                    _ if len == 0 => None,
                    Some(i) => Some(i.min(len - 1)),
                    None => None,
                });
                self.set_status(StatusLevel::Success, format!("{} has been removed", name));
                AppCommand::Persist
            }
            None => {
                self.set_status(StatusLevel::Error, format!("No pet named '{}'", name));
                AppCommand::None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use petcare_core::{DogSize, HealthRecordKind, PetKind};

    #[test]
    fn test_starts_with_first_pet_selected() {
        let app = sample_app();
        assert_eq!(app.selected_pet().unwrap().name, "Rex");
        let empty = PetCareApp::new(PetRegistry::new(), day("2024-03-01"), 3);
        assert!(empty.selected_pet().is_none());
    }

    #[test]
    fn test_navigation_clamps() {
        let mut app = sample_app();
        app.handle_key(&key(KeyCode::Up));
        assert_eq!(app.selected_index(), Some(0));
        app.handle_key(&key(KeyCode::Down));
        app.handle_key(&ch('j'));
        app.handle_key(&ch('j'));
        assert_eq!(app.selected_index(), Some(1));
        app.handle_key(&key(KeyCode::Home));
        assert_eq!(app.selected_index(), Some(0));
    }

    #[test]
    fn test_add_pet_flow() {
        let mut app = sample_app();
        assert_eq!(app.handle_key(&ch('a')), AppCommand::None);
        assert!(matches!(app.mode(), Mode::Form(_)));

        // missing name keeps the dialog open with an error
        assert_eq!(app.handle_key(&key(KeyCode::Enter)), AppCommand::None);
        match app.mode() {
            Mode::Form(form) => assert_eq!(form.error.as_deref(), Some("Please enter a name")),
            other => panic!("unexpected mode {:?}", other),
        }

        type_text(&mut app, "Buddy");
        app.handle_key(&key(KeyCode::Tab));
        type_text(&mut app, "4");
        app.handle_key(&key(KeyCode::Tab));
        type_text(&mut app, "Lab");
        app.handle_key(&key(KeyCode::Tab));
        app.handle_key(&key(KeyCode::Right));
        assert_eq!(app.handle_key(&key(KeyCode::Enter)), AppCommand::Persist);

        assert_eq!(app.mode(), &Mode::Browse);
        let buddy = app.selected_pet().unwrap();
        assert_eq!(buddy.name, "Buddy");
        assert_eq!(buddy.breed, "Lab");
        assert_eq!(buddy.kind, PetKind::Dog { size: DogSize::Large });
        assert_eq!(buddy.care_schedule.len(), 4);
        assert_eq!(
            app.status().unwrap().text,
            "Buddy has been added to your pets!"
        );
    }

    #[test]
    fn test_duplicate_pet_name_is_a_form_error() {
        let mut app = sample_app();
        app.handle_key(&ch('a'));
        type_text(&mut app, "rex");
        app.handle_key(&key(KeyCode::Tab));
        type_text(&mut app, "2");
        assert_eq!(app.handle_key(&key(KeyCode::Enter)), AppCommand::None);
        match app.mode() {
            Mode::Form(form) => assert!(form.error.as_deref().unwrap().contains("already exists")),
            other => panic!("unexpected mode {:?}", other),
        }
        assert_eq!(app.registry().len(), 2);
    }

    #[test]
    fn test_remove_requires_confirmation() {
        let mut app = sample_app();
        app.handle_key(&ch('x'));
        assert!(matches!(app.mode(), Mode::ConfirmRemove { .. }));
        app.handle_key(&ch('z'));
        assert!(matches!(app.mode(), Mode::ConfirmRemove { .. }));
        assert_eq!(app.handle_key(&ch('n')), AppCommand::None);
        assert_eq!(app.registry().len(), 2);

        app.handle_key(&key(KeyCode::End));
        app.handle_key(&key(KeyCode::Delete));
        assert_eq!(app.handle_key(&ch('y')), AppCommand::Persist);
        assert_eq!(app.registry().len(), 1);
        assert_eq!(app.selected_pet().unwrap().name, "Rex");
        assert_eq!(app.status().unwrap().text, "Tom has been removed");
    }

    #[test]
    fn test_actions_without_selection_warn() {
        let mut app = PetCareApp::new(PetRegistry::new(), day("2024-03-01"), 3);
        for k in ['x', 'd', 't', 'h', 'i'] {
            assert_eq!(app.handle_key(&ch(k)), AppCommand::None);
            assert_eq!(app.mode(), &Mode::Browse);
            assert_eq!(app.status().unwrap().level, StatusLevel::Warning);
        }
    }

    #[test]
    fn test_mark_task_done() {
        let mut app = sample_app();
        app.refresh(day("2024-03-10"));
        app.handle_key(&ch('d'));
        match app.mode() {
            Mode::PickTask(picker) => assert_eq!(picker.items[0], "Walk (every 1 days)"),
            other => panic!("unexpected mode {:?}", other),
        }
        app.handle_key(&key(KeyCode::Down));
        assert_eq!(app.handle_key(&key(KeyCode::Enter)), AppCommand::Persist);
        let rex = app.selected_pet().unwrap();
        assert_eq!(rex.care_schedule[1].last_done, day("2024-03-10"));
        assert_eq!(rex.care_schedule[0].last_done, day("2024-03-01"));
        assert_eq!(app.status().unwrap().text, "Task 'Feed' marked as done!");
    }

    #[test]
    fn test_mark_done_with_no_tasks_is_info() {
        let mut app = sample_app();
        app.handle_key(&ch('j'));
        // Tom was loaded without a schedule
        app.handle_key(&ch('d'));
        assert_eq!(app.mode(), &Mode::Browse);
        assert_eq!(app.status().unwrap().level, StatusLevel::Info);
    }

    #[test]
    fn test_add_task_and_health_record() {
        let mut app = sample_app();
        app.handle_key(&ch('t'));
        type_text(&mut app, "Teeth");
        app.handle_key(&key(KeyCode::Tab));
        type_text(&mut app, "0");
        assert_eq!(app.handle_key(&key(KeyCode::Enter)), AppCommand::None);
        app.handle_key(&key(KeyCode::Backspace));
        type_text(&mut app, "7");
        assert_eq!(app.handle_key(&key(KeyCode::Enter)), AppCommand::Persist);
        let rex = app.selected_pet().unwrap();
        assert_eq!(rex.care_schedule.last().unwrap().task, "Teeth");

        app.handle_key(&ch('h'));
        type_text(&mut app, "Rabies booster");
        assert_eq!(app.handle_key(&key(KeyCode::Enter)), AppCommand::Persist);
        let record = app.selected_pet().unwrap().health_records.last().unwrap().clone();
        assert_eq!(record.kind, HealthRecordKind::Checkup);
        assert_eq!(record.date, app.today());
    }

    #[test]
    fn test_overlays_close_on_any_key() {
        let mut app = sample_app();
        app.handle_key(&key(KeyCode::Enter));
        assert!(matches!(app.mode(), Mode::Details(_)));
        app.handle_key(&ch('q'));
        assert_eq!(app.mode(), &Mode::Browse);
        app.handle_key(&ch('?'));
        assert_eq!(app.mode(), &Mode::Help);
        assert_eq!(app.handle_key(&key(KeyCode::Esc)), AppCommand::None);
        assert_eq!(app.mode(), &Mode::Browse);
    }

    #[test]
    fn test_quit_and_refresh_commands() {
        let mut app = sample_app();
        assert_eq!(app.handle_key(&key(KeyCode::F(5))), AppCommand::Refresh);
        assert_eq!(app.handle_key(&ch('q')), AppCommand::Quit);
        app.handle_key(&ch('a'));
        // q is text inside a form; Ctrl+C always quits
        assert_eq!(app.handle_key(&ch('q')), AppCommand::None);
        assert_eq!(app.handle_key(&ctrl('c')), AppCommand::Quit);
    }

    #[test]
    fn test_care_scroll_resets_on_selection_change() {
        let mut app = sample_app();
        app.handle_key(&key(KeyCode::PageDown));
        assert_eq!(app.care_scroll(), CARE_SCROLL_STEP);
        app.handle_key(&ch('j'));
        assert_eq!(app.care_scroll(), 0);
    }

    #[test]
    fn test_report_save_error() {
        let mut app = sample_app();
        app.report_save_error(&"disk full");
        let status = app.status().unwrap();
        assert_eq!(status.level, StatusLevel::Error);
        assert_eq!(status.text, "Error saving data: disk full");
    }
}
