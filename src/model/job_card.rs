//! The job card form: the payload the CLI writes into drafts.

use jiff::{Zoned, civil::Date};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::SelectedEquipment;

/// Where a job card stands in review.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    #[default]
    Draft,
    InProgress,
    Completed,
    Approved,
}

impl JobStatus {
    pub const ALL: [Self; 4] = [Self::Draft, Self::InProgress, Self::Completed, Self::Approved];

    pub fn id(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
            Self::Approved => "approved",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
            Self::Approved => "Approved",
        }
    }
}

/// Form state for one inspection job.
///
/// Fields the form doesn't know about are kept in `extra` so that
/// rewriting a draft never drops what another surface stored in it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobCardForm {
    #[serde(default)]
    pub job_number: String,
    #[serde(default)]
    pub vessel: String,
    #[serde(default)]
    pub technology: String,
    #[serde(default)]
    pub technician1: String,
    #[serde(default)]
    pub technician2: String,
    #[serde(
        default,
        deserialize_with = "blank_date_as_none",
        skip_serializing_if = "Option::is_none"
    )]
    pub date: Option<Date>,
    #[serde(default)]
    pub status: JobStatus,
    #[serde(default)]
    pub equipment: Vec<SelectedEquipment>,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub findings: String,
    #[serde(default)]
    pub recommendations: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobCardForm {
    /// A blank form for a new job.
    pub fn new(job_number: String, vessel: String, technology: String, date: Date) -> Self {
        Self {
            job_number,
            vessel,
            technology,
            technician1: String::new(),
            technician2: String::new(),
            date: Some(date),
            status: JobStatus::Draft,
            equipment: Vec::new(),
            notes: String::new(),
            findings: String::new(),
            recommendations: String::new(),
            extra: Map::new(),
        }
    }

    /// Returns the selected item with this equipment id, if any.
    pub fn selected_mut(&mut self, equipment_id: &str) -> Option<&mut SelectedEquipment> {
        self.equipment
            .iter_mut()
            .find(|e| e.record.id == equipment_id)
    }

    /// Removes an item from the selection. Returns whether it was selected.
    pub fn deselect(&mut self, equipment_id: &str) -> bool {
        let before = self.equipment.len();
        self.equipment.retain(|e| e.record.id != equipment_id);
        self.equipment.len() != before
    }
}

/// A cleared date input is stored as `""`; read it as no date.
fn blank_date_as_none<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(s) if !s.trim().is_empty() => s
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

/// Generates a job number of the form `JC-{YY}{MM}-{NNN}`.
///
/// The sequence part is random in `000..=999`; it is not checked against
/// existing drafts.
pub fn generate_job_number(now: &Zoned) -> String {
    let year = now.year().rem_euclid(100);
    let month = now.month();
    let seq = Uuid::new_v4().as_u128() % 1000;
    format!("JC-{year:02}{month:02}-{seq:03}")
}
