//! Cases and their tasks. Read-only from this service's point of view.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::user::FirmId;

pub type CaseId = i64;
pub type TaskId = i64;

/// A legal matter owned by exactly one firm
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Case {
    pub id: CaseId,
    pub firm_id: FirmId,
    pub title: String,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// A unit of work attached to a case
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub case_id: CaseId,
    pub title: String,
    pub status: String,
    /// `None` when unset or when the stored value is not a real date
    pub due_date: Option<NaiveDate>,
}

impl Task {
    /// Interpret a raw stored date. Zero dates and garbage become `None`.
    pub fn parse_due_date(raw: Option<&str>) -> Option<NaiveDate> {
        let raw = raw?.trim();
        let date_part = raw.get(..10).unwrap_or(raw);
        NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
    }
}
