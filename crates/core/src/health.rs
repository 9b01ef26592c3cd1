//! Health records

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PetCareError, Result};

/// Kind of veterinary or wellness event.
///
/// Serialized as a plain string. Unrecognised strings from older data files
/// are kept verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum HealthRecordKind {
    Vaccination,
    #[default]
    Checkup,
    Treatment,
    Medication,
    Other,
    Custom(String),
}

impl HealthRecordKind {
    /// Kinds offered by the record form, in display order.
    pub const CHOICES: [HealthRecordKind; 5] = [
        HealthRecordKind::Vaccination,
        HealthRecordKind::Checkup,
        HealthRecordKind::Treatment,
        HealthRecordKind::Medication,
        HealthRecordKind::Other,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            HealthRecordKind::Vaccination => "Vaccination",
            HealthRecordKind::Checkup => "Checkup",
            HealthRecordKind::Treatment => "Treatment",
            HealthRecordKind::Medication => "Medication",
            HealthRecordKind::Other => "Other",
            HealthRecordKind::Custom(label) => label,
        }
    }
}

impl fmt::Display for HealthRecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for HealthRecordKind {
    fn from(raw: String) -> Self {
        Self::CHOICES
            .iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(raw.trim()))
            .cloned()
            .unwrap_or(HealthRecordKind::Custom(raw))
    }
}

impl From<HealthRecordKind> for String {
    fn from(kind: HealthRecordKind) -> Self {
        kind.as_str().to_string()
    }
}

impl FromStr for HealthRecordKind {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(HealthRecordKind::from(s.to_string()))
    }
}

/// A dated note describing a veterinary or wellness event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthRecord {
    #[serde(rename = "type")]
    pub kind: HealthRecordKind,
    pub description: String,
    pub date: NaiveDate,
}

impl HealthRecord {
    pub fn new(kind: HealthRecordKind, description: impl Into<String>, date: NaiveDate) -> Result<Self> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(PetCareError::EmptyDescription);
        }
        Ok(Self {
            kind,
            description,
            date,
        })
    }
}
