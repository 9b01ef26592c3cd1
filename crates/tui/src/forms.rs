//! Dialog forms for adding pets, care tasks and health records, plus the task picker.

use crossterm::event::{KeyCode, KeyEvent};

use petcare_core::{
    DogSize, HealthRecordKind, PetCareError, PetId, PetKind, Species, parse_age,
};

use crate::input_handler::edit_text;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Choice { options: Vec<String>, selected: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub label: String,
    pub value: FieldValue,
}

impl FormField {
    pub fn text(label: &str) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Text(String::new()),
        }
    }

    pub fn choice<S: ToString>(label: &str, options: &[S], selected: usize) -> Self {
        Self {
            label: label.to_string(),
            value: FieldValue::Choice {
                options: options.iter().map(|o| o.to_string()).collect(),
                selected,
            },
        }
    }

    /// Display value: the typed text, or the selected option.
    pub fn display(&self) -> &str {
        match &self.value {
            FieldValue::Text(text) => text,
            FieldValue::Choice { options, selected } => options
                .get(*selected)
                .map(String::as_str)
                .unwrap_or_default(),
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice { .. })
    }
}

/// What a form collects, and for which pet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormKind {
    AddPet,
    AddTask { pet_id: PetId },
    AddHealthRecord { pet_id: PetId },
}

/// Outcome of feeding a key to a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    Ignored,
    Edited { field: usize },
    Submit,
    Cancel,
}

/// Fields of the add-pet form.
const PET_KIND: usize = 0;
const PET_NAME: usize = 1;
const PET_AGE: usize = 2;
const PET_BREED: usize = 3;
const PET_EXTRA: usize = 4;

const TASK_NAME: usize = 0;
const TASK_FREQUENCY: usize = 1;

const RECORD_KIND: usize = 0;
const RECORD_DESCRIPTION: usize = 1;

const CAT_LOCATIONS: [&str; 2] = ["Indoor", "Outdoor"];
const BIRD_FLIGHT: [&str; 2] = ["Can fly", "Cannot fly"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Form {
    pub kind: FormKind,
    pub title: String,
    pub fields: Vec<FormField>,
    pub focus: usize,
    pub error: Option<String>,
}

impl Form {
    pub fn add_pet() -> Self {
        let dog = Species::Dog.default_kind();
        Self {
            kind: FormKind::AddPet,
            title: "Add New Pet".to_string(),
            fields: vec![
                FormField::choice("Pet Type:", &Species::ALL, 0),
                FormField::text("Name:"),
                FormField::text("Age:"),
                FormField::text("Breed:"),
                extra_field(&dog),
            ],
            focus: PET_NAME,
            error: None,
        }
    }

    pub fn add_task(pet_id: PetId, pet_name: &str) -> Self {
        Self {
            kind: FormKind::AddTask { pet_id },
            title: format!("Add Care Task for {}", pet_name),
            fields: vec![
                FormField::text("Task Name:"),
                FormField::text("Frequency (days):"),
            ],
            focus: TASK_NAME,
            error: None,
        }
    }

    pub fn add_health_record(pet_id: PetId, pet_name: &str) -> Self {
        let default_kind = HealthRecordKind::CHOICES
            .iter()
            .position(|k| *k == HealthRecordKind::default())
            .unwrap_or(0);
        Self {
            kind: FormKind::AddHealthRecord { pet_id },
            title: format!("Add Health Record for {}", pet_name),
            fields: vec![
                FormField::choice("Record Type:", &HealthRecordKind::CHOICES, default_kind),
                FormField::text("Description:"),
            ],
            focus: RECORD_DESCRIPTION,
            error: None,
        }
    }

    pub fn handle_key(&mut self, key: &KeyEvent) -> FormEvent {
        match key.code {
            KeyCode::Esc => return FormEvent::Cancel,
            KeyCode::Enter => return FormEvent::Submit,
            KeyCode::Tab | KeyCode::Down => {
                self.focus = (self.focus + 1) % self.fields.len();
                return FormEvent::Ignored;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.focus = (self.focus + self.fields.len() - 1) % self.fields.len();
                return FormEvent::Ignored;
            }
            _ => {}
        }

        let focus = self.focus;
        let changed = match &mut self.fields[focus].value {
            FieldValue::Choice { options, selected } => match key.code {
                KeyCode::Left => {
                    *selected = (*selected + options.len() - 1) % options.len();
                    true
                }
                KeyCode::Right | KeyCode::Char(' ') => {
                    *selected = (*selected + 1) % options.len();
                    true
                }
                _ => false,
            },
            FieldValue::Text(text) => edit_text(text, key),
        };
        if !changed {
            return FormEvent::Ignored;
        }

        self.error = None;
        if self.kind == FormKind::AddPet && focus == PET_KIND {
            let species = self.selected_species();
            self.fields[PET_EXTRA] = extra_field(&species.default_kind());
        }
        FormEvent::Edited { field: focus }
    }

    fn value(&self, index: usize) -> &str {
        self.fields.get(index).map(FormField::display).unwrap_or_default()
    }

    fn selected_species(&self) -> Species {
        match &self.fields[PET_KIND].value {
            FieldValue::Choice { selected, .. } => {
                Species::ALL.get(*selected).copied().unwrap_or(Species::Dog)
            }
            FieldValue::Text(_) => Species::Dog,
        }
    }

    /// Validated add-pet input: name, age, breed, kind.
    pub fn pet_input(&self) -> Result<(String, u32, String, PetKind), PetCareError> {
        let name = self.value(PET_NAME).trim().to_string();
        if name.is_empty() {
            return Err(PetCareError::EmptyName);
        }
        let age = parse_age(self.value(PET_AGE))?;
        let breed = self.value(PET_BREED).trim().to_string();
        let extra = self.value(PET_EXTRA);
        let kind = match self.selected_species() {
            Species::Dog => PetKind::Dog {
                size: extra.parse::<DogSize>().unwrap_or_default(),
            },
            Species::Cat => PetKind::Cat {
                indoor: extra == CAT_LOCATIONS[0],
            },
            Species::Bird => PetKind::Bird {
                can_fly: extra == BIRD_FLIGHT[0],
            },
        };
        Ok((name, age, breed, kind))
    }

    /// Validated add-task input: description and frequency in days.
    pub fn task_input(&self) -> Result<(String, i64), PetCareError> {
        let task = self.value(TASK_NAME).trim().to_string();
        if task.is_empty() {
            return Err(PetCareError::EmptyTaskName);
        }
        let raw = self.value(TASK_FREQUENCY);
        let frequency = raw
            .trim()
            .parse::<i64>()
            .map_err(|_| PetCareError::UnparsableFrequency(raw.to_string()))?;
        Ok((task, frequency))
    }

    /// Validated health-record input: kind and description.
    pub fn record_input(&self) -> Result<(HealthRecordKind, String), PetCareError> {
        let kind = HealthRecordKind::from(self.value(RECORD_KIND).to_string());
        let description = self.value(RECORD_DESCRIPTION).trim().to_string();
        if description.is_empty() {
            return Err(PetCareError::EmptyDescription);
        }
        Ok((kind, description))
    }
}

/// The kind-dependent add-pet field: size, location or flight status.
fn extra_field(kind: &PetKind) -> FormField {
    match kind {
        PetKind::Dog { size } => {
            let selected = DogSize::ALL.iter().position(|s| s == size).unwrap_or(1);
            FormField::choice("Size:", &DogSize::ALL, selected)
        }
        PetKind::Cat { indoor } => {
            FormField::choice("Location:", &CAT_LOCATIONS, usize::from(!*indoor))
        }
        PetKind::Bird { can_fly } => {
            FormField::choice("Flight Status:", &BIRD_FLIGHT, usize::from(!*can_fly))
        }
    }
}

/// Task list shown by "Mark Task Done".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPicker {
    pub pet_id: PetId,
    pub pet_name: String,
    pub items: Vec<String>,
    pub selected: usize,
}

impl TaskPicker {
    pub fn new(pet_id: PetId, pet_name: &str, items: Vec<String>) -> Self {
        Self {
            pet_id,
            pet_name: pet_name.to_string(),
            items,
            selected: 0,
        }
    }

    pub fn move_by(&mut self, delta: isize) {
        if self.items.is_empty() {
            return;
        }
        let len = self.items.len() as isize;
        self.selected = (self.selected as isize + delta).rem_euclid(len) as usize;
    }
}
