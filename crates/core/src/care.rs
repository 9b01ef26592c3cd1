//! Care task core types

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{PetCareError, Result};
use crate::pet::PetId;

/// Calendar format used on disk and on the command line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| PetCareError::InvalidDate(raw.to_string()))
}

/// A recurring care item, e.g. feeding or walking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CareTask {
    pub task: String,
    /// Signed on disk; hand-edited files may carry zero or negative values.
    pub frequency_days: i64,
    pub last_done: NaiveDate,
}

impl CareTask {
    pub fn new(task: impl Into<String>, frequency_days: i64, last_done: NaiveDate) -> Result<Self> {
        let task = task.into().trim().to_string();
        if task.is_empty() {
            return Err(PetCareError::EmptyTaskName);
        }
        if frequency_days < 1 {
            return Err(PetCareError::InvalidFrequency(frequency_days));
        }
        Ok(Self {
            task,
            frequency_days,
            last_done,
        })
    }

    /// Whole days elapsed since the task was last done. Negative when
    /// `last_done` lies in the future.
    pub fn days_since(&self, today: NaiveDate) -> i64 {
        (today - self.last_done).num_days()
    }

    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.days_since(today) >= self.frequency_days
    }

    /// Days past due, counting the due day itself as the first.
    pub fn days_overdue(&self, today: NaiveDate) -> Option<i64> {
        let since = self.days_since(today);
        (since >= self.frequency_days).then(|| since - self.frequency_days + 1)
    }

    pub fn status(&self, today: NaiveDate) -> CareStatus {
        match self.days_overdue(today) {
            Some(days_overdue) => CareStatus::Overdue { days_overdue },
            None => CareStatus::Done,
        }
    }

    pub fn mark_done(&mut self, today: NaiveDate) {
        self.last_done = today;
    }
}

/// Status of a care task relative to a given day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CareStatus {
    Done,
    Overdue { days_overdue: i64 },
}

impl CareStatus {
    pub fn label(&self) -> &'static str {
        match self {
            CareStatus::Done => "✅ Done",
            CareStatus::Overdue { .. } => "❌ Overdue",
        }
    }
}

/// An overdue task, flattened across pets for the overview panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OverdueTask {
    pub pet_id: PetId,
    pub pet_name: String,
    pub task: String,
    pub days_overdue: i64,
}
