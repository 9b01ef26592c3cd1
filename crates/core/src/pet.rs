//! Pets and their kind-specific attributes

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::care::{CareTask, OverdueTask};
use crate::error::{PetCareError, Result};
use crate::health::{HealthRecord, HealthRecordKind};

/// Breed stored when the user leaves the field blank.
pub const UNKNOWN_BREED: &str = "Unknown";

/// Unique identifier for a pet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PetId(pub Uuid);

impl PetId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for PetId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for PetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Animal family, without attributes. Used by forms and the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Species {
    Dog,
    Cat,
    Bird,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Dog, Species::Cat, Species::Bird];

    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Bird => "Bird",
        }
    }

    /// Kind with every attribute at its default.
    pub fn default_kind(&self) -> PetKind {
        match self {
            Species::Dog => PetKind::Dog {
                size: DogSize::default(),
            },
            Species::Cat => PetKind::Cat { indoor: true },
            Species::Bird => PetKind::Bird { can_fly: true },
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Species {
    type Err = PetCareError;

    fn from_str(s: &str) -> Result<Self> {
        Species::ALL
            .into_iter()
            .find(|species| species.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| PetCareError::UnknownKind(s.to_string()))
    }
}

/// Dog size. Sizes outside the three known ones, as written by hand or by
/// older versions, are kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum DogSize {
    Small,
    #[default]
    Medium,
    Large,
    Custom(String),
}

impl DogSize {
    pub const ALL: [DogSize; 3] = [DogSize::Small, DogSize::Medium, DogSize::Large];

    pub fn as_str(&self) -> &str {
        match self {
            DogSize::Small => "Small",
            DogSize::Medium => "Medium",
            DogSize::Large => "Large",
            DogSize::Custom(label) => label,
        }
    }
}

impl fmt::Display for DogSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for DogSize {
    fn from(raw: String) -> Self {
        Self::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(raw.trim()))
            .unwrap_or(DogSize::Custom(raw))
    }
}

impl From<DogSize> for String {
    fn from(size: DogSize) -> Self {
        match size {
            DogSize::Custom(label) => label,
            known => known.as_str().to_string(),
        }
    }
}

/// Strict parse for user input: only the three known sizes.
impl FromStr for DogSize {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        DogSize::ALL
            .into_iter()
            .find(|size| size.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown size '{}', expected small, medium or large", s))
    }
}

fn default_true() -> bool {
    true
}

/// Kind-specific attributes. Tagged by `type` on disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PetKind {
    Dog {
        #[serde(default)]
        size: DogSize,
    },
    Cat {
        #[serde(default = "default_true")]
        indoor: bool,
    },
    Bird {
        #[serde(default = "default_true")]
        can_fly: bool,
    },
}

impl PetKind {
    pub fn species(&self) -> Species {
        match self {
            PetKind::Dog { .. } => Species::Dog,
            PetKind::Cat { .. } => Species::Cat,
            PetKind::Bird { .. } => Species::Bird,
        }
    }

    /// Seed schedule for a newly adopted pet: (task, every n days).
    pub fn default_schedule(&self) -> &'static [(&'static str, u32)] {
        match self {
            PetKind::Dog { .. } => &[("Walk", 1), ("Feed", 1), ("Bath", 7), ("Vet Checkup", 90)],
            PetKind::Cat { .. } => &[
                ("Feed", 1),
                ("Litter Box Clean", 2),
                ("Brush", 3),
                ("Vet Checkup", 90),
            ],
            PetKind::Bird { .. } => &[
                ("Feed", 1),
                ("Cage Clean", 3),
                ("Wing Trim", 60),
                ("Vet Checkup", 180),
            ],
        }
    }

    pub fn sound(&self) -> &'static str {
        match self {
            PetKind::Dog { .. } => "Woof! 🐕",
            PetKind::Cat { .. } => "Meow! 🐱",
            PetKind::Bird { .. } => "Tweet! 🐦",
        }
    }

    pub fn care_requirements(&self) -> String {
        match self {
            PetKind::Dog { size } => format!(
                "Dogs need daily walks, feeding, weekly baths, and regular vet checkups. Size: {}",
                size
            ),
            PetKind::Cat { indoor } => format!(
                "Cats need daily feeding, litter maintenance, brushing, and vet checkups. Type: {}",
                if *indoor { "Indoor" } else { "Outdoor" }
            ),
            PetKind::Bird { can_fly } => format!(
                "Birds need daily feeding, cage cleaning, wing care, and vet checkups. Status: {}",
                if *can_fly { "Can fly" } else { "Cannot fly" }
            ),
        }
    }
}

/// Parse a user-entered age in whole years.
pub fn parse_age(raw: &str) -> Result<u32> {
    raw.trim()
        .parse::<u32>()
        .map_err(|_| PetCareError::InvalidAge(raw.to_string()))
}

/// Core pet structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pet {
    #[serde(default)]
    pub id: PetId,
    pub name: String,
    /// Signed so hand-edited files with odd ages still load.
    pub age: i64,
    pub breed: String,
    #[serde(flatten)]
    pub kind: PetKind,
    #[serde(default)]
    pub care_schedule: Vec<CareTask>,
    #[serde(default)]
    pub health_records: Vec<HealthRecord>,
}

impl Pet {
    /// Create a pet with the default schedule for its kind, all last done `today`.
    pub fn new(
        name: impl Into<String>,
        age: u32,
        breed: impl Into<String>,
        kind: PetKind,
        today: NaiveDate,
    ) -> Result<Self> {
        let name = name.into().trim().to_string();
        if name.is_empty() {
            return Err(PetCareError::EmptyName);
        }
        let breed = breed.into().trim().to_string();
        let care_schedule = kind
            .default_schedule()
            .iter()
            .map(|(task, every)| CareTask {
                task: (*task).to_string(),
                frequency_days: i64::from(*every),
                last_done: today,
            })
            .collect();

        Ok(Self {
            id: PetId::new(),
            name,
            age: i64::from(age),
            breed: if breed.is_empty() {
                UNKNOWN_BREED.to_string()
            } else {
                breed
            },
            kind,
            care_schedule,
            health_records: Vec::new(),
        })
    }

    pub fn kind_name(&self) -> &'static str {
        self.kind.species().as_str()
    }

    pub fn sound(&self) -> &'static str {
        self.kind.sound()
    }

    pub fn care_requirements(&self) -> String {
        self.kind.care_requirements()
    }

    /// List entry label, e.g. `Rex (Dog) - Woof! 🐕`.
    pub fn summary(&self) -> String {
        format!("{} ({}) - {}", self.name, self.kind_name(), self.sound())
    }

    pub fn add_care_task(
        &mut self,
        task: impl Into<String>,
        frequency_days: i64,
        last_done: NaiveDate,
    ) -> Result<&CareTask> {
        let task = CareTask::new(task, frequency_days, last_done)?;
        self.care_schedule.push(task);
        Ok(&self.care_schedule[self.care_schedule.len() - 1])
    }

    /// Index of the first task whose description matches, ignoring case.
    pub fn find_task(&self, task: &str) -> Option<usize> {
        let wanted = task.trim();
        self.care_schedule
            .iter()
            .position(|t| t.task.eq_ignore_ascii_case(wanted))
    }

    pub fn complete_task(&mut self, index: usize, today: NaiveDate) -> Result<&CareTask> {
        let name = self.name.clone();
        let task = self
            .care_schedule
            .get_mut(index)
            .ok_or_else(|| PetCareError::TaskNotFound {
                pet: name,
                task: format!("#{}", index + 1),
            })?;
        task.mark_done(today);
        Ok(task)
    }

    pub fn add_health_record(
        &mut self,
        kind: HealthRecordKind,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Result<&HealthRecord> {
        let record = HealthRecord::new(kind, description, date)?;
        self.health_records.push(record);
        Ok(&self.health_records[self.health_records.len() - 1])
    }

    /// The last `limit` health records, oldest first.
    pub fn recent_health_records(&self, limit: usize) -> &[HealthRecord] {
        let start = self.health_records.len().saturating_sub(limit);
        &self.health_records[start..]
    }

    pub fn overdue_tasks(&self, today: NaiveDate) -> Vec<OverdueTask> {
        self.care_schedule
            .iter()
            .filter_map(|task| {
                task.days_overdue(today).map(|days_overdue| OverdueTask {
                    pet_id: self.id,
                    pet_name: self.name.clone(),
                    task: task.task.clone(),
                    days_overdue,
                })
            })
            .collect()
    }
}
