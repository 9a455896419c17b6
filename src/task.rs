use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Status {
    Pending,
    Completed,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Pending => write!(f, "Pending"),
            Status::Completed => write!(f, "Completed"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Priority {
    /// Parse user input case-insensitively. `None` for anything unrecognized;
    /// callers decide whether falling back to `Medium` warrants a warning.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_lowercase().as_str() {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }

    /// Sort rank: High before Medium before Low.
    pub fn rank(self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "High"),
            Priority::Medium => write!(f, "Medium"),
            Priority::Low => write!(f, "Low"),
        }
    }
}

/// Strict ISO calendar-date parse. A malformed string never enters a `Task`.
pub fn parse_due_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Task {
    pub title: String,
    pub status: Status,
    pub priority: Priority,
    #[serde(with = "due_date_format")]
    pub due_date: Option<NaiveDate>,
}

impl Task {
    pub fn new(title: impl Into<String>, priority: Priority, due_date: Option<NaiveDate>) -> Self {
        Self {
            title: title.into(),
            status: Status::Pending,
            priority,
            due_date,
        }
    }

    /// One-line rendering used by the task list and search results.
    pub fn summary(&self) -> String {
        let due = self
            .due_date
            .map(|d| d.format(DATE_FORMAT).to_string())
            .unwrap_or_else(|| "None".to_string());
        format!(
            "{}  |  {}  |  Priority: {}  |  Due: {}",
            self.title, self.status, self.priority, due
        )
    }
}

/// `due_date` on the wire is a `%Y-%m-%d` string, empty when absent. The field
/// is always present so any conforming reader can round-trip the file.
mod due_date_format {
    use chrono::NaiveDate;
    use serde::{self, Deserialize, Deserializer, Serializer};

    use super::DATE_FORMAT;

    pub fn serialize<S>(date: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match date {
            Some(d) => serializer.serialize_str(&d.format(DATE_FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        if s.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(&s, DATE_FORMAT)
            .map(Some)
            .map_err(serde::de::Error::custom)
    }
}
