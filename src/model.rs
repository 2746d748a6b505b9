use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{GanttError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    NotStarted,
    #[default]
    InProgress,
    Completed,
    Delayed,
    Paused,
}

impl Status {
    /// Every status, in legend order.
    pub const ALL: [Status; 5] = [
        Self::NotStarted,
        Self::InProgress,
        Self::Completed,
        Self::Delayed,
        Self::Paused,
    ];

    /// Parse a status name. Case, spaces, hyphens and underscores are ignored,
    /// and the Italian labels used by older workbooks are accepted too.
    pub fn parse(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "notstarted" | "noniniziato" => Ok(Self::NotStarted),
            "inprogress" | "incorso" => Ok(Self::InProgress),
            "completed" | "completato" => Ok(Self::Completed),
            "delayed" | "inritardo" => Ok(Self::Delayed),
            "paused" | "inpausa" => Ok(Self::Paused),
            _ => Err(GanttError::InvalidStatus(s.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "NotStarted",
            Self::InProgress => "InProgress",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
            Self::Paused => "Paused",
        }
    }

    /// Human-readable label, used in the chart legend.
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
            Self::Delayed => "Delayed",
            Self::Paused => "Paused",
        }
    }

    /// Bar fill color as RGB.
    pub fn color(self) -> [u8; 3] {
        match self {
            Self::NotStarted => [0xD3, 0xD3, 0xD3], // lightgrey
            Self::InProgress => [0xAD, 0xD8, 0xE6], // lightblue
            Self::Completed => [0x90, 0xEE, 0x90],  // lightgreen
            Self::Delayed => [0xFA, 0x80, 0x72],    // salmon
            Self::Paused => [0xFF, 0xFF, 0x00],     // yellow
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Years a workbook date cell can hold.
pub const MIN_YEAR: i32 = 1900;
pub const MAX_YEAR: i32 = 9999;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub person: String,
    pub status: Status,
}

impl Activity {
    /// Length of the activity in whole days.
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }

    /// Check the field invariants every stored activity must satisfy.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(GanttError::validation("activity name must not be empty"));
        }
        if self.person.trim().is_empty() {
            return Err(GanttError::validation("person must not be empty"));
        }
        for date in [self.start_date, self.end_date] {
            if !(MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
                return Err(GanttError::validation(format!(
                    "date {date} outside supported years {MIN_YEAR} to {MAX_YEAR}"
                )));
            }
        }
        if self.end_date <= self.start_date {
            return Err(GanttError::validation(format!(
                "end date {} must be after start date {}",
                self.end_date, self.start_date
            )));
        }
        Ok(())
    }
}
