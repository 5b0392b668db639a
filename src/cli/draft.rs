//! Draft commands: new, save, show, list, delete, clear, select, deselect, set.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use clap::{Subcommand, ValueEnum};
use jiff::{Zoned, civil::Date, tz::TimeZone};
use serde_json::Value;
use tracing::warn;

use crate::model::{
    Capability, Condition, Draft, JobCardForm, JobStatus, SelectedEquipment, generate_job_number,
    technician, technology, vessel,
};

use super::App;
use super::format::{draft_summary, equipment_line};

/// How many fresh job numbers to try before giving up on a collision.
const JOB_NUMBER_ATTEMPTS: usize = 16;

#[derive(Debug, Subcommand)]
pub enum DraftCommand {
    /// Start a new job card. Prints the generated job number.
    New {
        /// Vessel id (e.g. `saxi`).
        #[arg(long)]
        vessel: String,

        /// Technology id (e.g. `vibration`).
        #[arg(long)]
        technology: String,

        /// First technician id. Defaults to the configured technician.
        #[arg(long)]
        technician: Option<String>,

        /// Optional second technician id.
        #[arg(long)]
        second_technician: Option<String>,

        /// Job date (`YYYY-MM-DD`). Defaults to today.
        #[arg(long)]
        date: Option<Date>,
    },

    /// Save a raw JSON payload as a draft, replacing any existing one.
    ///
    /// Reads from `--file`, or stdin when omitted.
    Save {
        /// Draft id.
        id: String,

        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// Print a draft as JSON.
    Show {
        /// Draft id.
        id: String,
    },

    /// List drafts, most recently saved first.
    List,

    /// Delete a draft. Deleting a missing draft is not an error.
    Delete {
        /// Draft id.
        id: String,
    },

    /// Delete every draft.
    Clear {
        /// Confirm deleting all drafts.
        #[arg(long)]
        yes: bool,
    },

    /// Add equipment to a draft, or update its condition and notes.
    Select {
        /// Draft id.
        id: String,

        /// Equipment id from the draft's vessel and technology.
        equipment_id: String,

        #[arg(long, value_enum)]
        condition: Option<ConditionArg>,

        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove equipment from a draft.
    Deselect {
        /// Draft id.
        id: String,

        equipment_id: String,
    },

    /// Update a draft's status or free-text fields.
    Set {
        /// Draft id.
        id: String,

        #[arg(long, value_enum)]
        status: Option<StatusArg>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        findings: Option<String>,

        #[arg(long)]
        recommendations: Option<String>,
    },
}

impl DraftCommand {
    pub(super) fn required_capability(&self) -> Option<Capability> {
        match self {
            Self::New { .. } => Some(Capability::CreateJobCard),
            Self::Save { .. } | Self::Select { .. } | Self::Deselect { .. } | Self::Set { .. } => {
                Some(Capability::EditOwnJobCard)
            }
            Self::Show { .. } | Self::List | Self::Delete { .. } | Self::Clear { .. } => None,
        }
    }
}

/// CLI-facing equipment condition, mapped to the domain `Condition`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ConditionArg {
    Normal,
    /// Attention required.
    Attention,
    Critical,
}

impl ConditionArg {
    fn to_domain(self) -> Condition {
        match self {
            Self::Normal => Condition::Normal,
            Self::Attention => Condition::Attention,
            Self::Critical => Condition::Critical,
        }
    }
}

/// CLI-facing job status, mapped to the domain `JobStatus`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StatusArg {
    Draft,
    #[value(name = "in_progress")]
    InProgress,
    Completed,
    Approved,
}

impl StatusArg {
    pub(super) fn to_domain(self) -> JobStatus {
        match self {
            Self::Draft => JobStatus::Draft,
            Self::InProgress => JobStatus::InProgress,
            Self::Completed => JobStatus::Completed,
            Self::Approved => JobStatus::Approved,
        }
    }
}

pub(super) fn run(app: &App, command: DraftCommand) -> Result<(), String> {
    match command {
        DraftCommand::New {
            vessel,
            technology,
            technician,
            second_technician,
            date,
        } => {
            let technician = technician.or_else(|| app.config.technician.clone());
            let form = new_form(
                vessel,
                technology,
                technician,
                second_technician,
                date,
                &Zoned::now(),
            )?;
            cmd_new(app, form, || generate_job_number(&Zoned::now()))
        }
        DraftCommand::Save { id, file } => cmd_save(app, &id, file),
        DraftCommand::Show { id } => cmd_show(app, &id),
        DraftCommand::List => cmd_list(app),
        DraftCommand::Delete { id } => cmd_delete(app, &id),
        DraftCommand::Clear { yes } => cmd_clear(app, yes),
        DraftCommand::Select {
            id,
            equipment_id,
            condition,
            notes,
        } => cmd_select(
            app,
            &id,
            &equipment_id,
            condition.map(ConditionArg::to_domain),
            notes,
        ),
        DraftCommand::Deselect { id, equipment_id } => cmd_deselect(app, &id, &equipment_id),
        DraftCommand::Set {
            id,
            status,
            notes,
            findings,
            recommendations,
        } => cmd_set(
            app,
            &id,
            FormUpdate {
                status: status.map(StatusArg::to_domain),
                notes,
                findings,
                recommendations,
            },
        ),
    }
}

/// Builds a blank job card, validating ids against the reference tables.
fn new_form(
    vessel_id: String,
    technology_id: String,
    technician1: Option<String>,
    technician2: Option<String>,
    date: Option<Date>,
    now: &Zoned,
) -> Result<JobCardForm, String> {
    if vessel(&vessel_id).is_none() {
        return Err(format!("unknown vessel '{vessel_id}'"));
    }
    if technology(&technology_id).is_none() {
        return Err(format!("unknown technology '{technology_id}'"));
    }
    for id in technician1.iter().chain(technician2.iter()) {
        if technician(id).is_none() {
            return Err(format!("unknown technician '{id}'"));
        }
    }
    if technician2.is_some() && technician1 == technician2 {
        return Err("second technician must differ from the first".to_string());
    }

    let mut form = JobCardForm::new(
        generate_job_number(now),
        vessel_id,
        technology_id,
        date.unwrap_or_else(|| now.date()),
    );
    form.technician1 = technician1.unwrap_or_default();
    form.technician2 = technician2.unwrap_or_default();
    Ok(form)
}

fn cmd_new(
    app: &App,
    mut form: JobCardForm,
    regenerate: impl FnMut() -> String,
) -> Result<(), String> {
    claim_job_number(app, &mut form, regenerate)?;
    let id = form.job_number.clone();
    save_form(app, &id, &form)?;
    println!("{id}");
    Ok(())
}

/// Replaces the form's job number until it names no existing draft.
fn claim_job_number(
    app: &App,
    form: &mut JobCardForm,
    mut regenerate: impl FnMut() -> String,
) -> Result<(), String> {
    let mut attempts = 1;
    while load_existing(app, &form.job_number)?.is_some() {
        if attempts == JOB_NUMBER_ATTEMPTS {
            return Err("could not generate an unused job number".to_string());
        }
        warn!(job = %form.job_number, "job number already in use, regenerating");
        form.job_number = regenerate();
        attempts += 1;
    }
    Ok(())
}

fn cmd_save(app: &App, id: &str, file: Option<PathBuf>) -> Result<(), String> {
    let raw = match &file {
        Some(path) => fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|e| format!("failed to read stdin: {e}"))?;
            buf
        }
    };
    let data: Value =
        serde_json::from_str(&raw).map_err(|e| format!("payload is not valid JSON: {e}"))?;

    let draft = app
        .storage
        .save_draft(id, data)
        .map_err(|e| format!("failed to save draft: {e}"))?;
    eprintln!("Saved draft {} at {}", draft.id, draft.updated_at);
    Ok(())
}

fn cmd_show(app: &App, id: &str) -> Result<(), String> {
    let draft = load_existing(app, id)?.ok_or_else(|| format!("no draft '{id}'"))?;
    let json = serde_json::to_string_pretty(&draft)
        .map_err(|e| format!("failed to serialize draft: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_list(app: &App) -> Result<(), String> {
    let drafts = app
        .storage
        .list_drafts()
        .map_err(|e| format!("failed to list drafts: {e}"))?;

    if drafts.is_empty() {
        println!("No drafts");
        return Ok(());
    }

    let tz = TimeZone::system();
    for draft in &drafts {
        println!("{}", draft_summary(draft, &tz));
    }
    Ok(())
}

fn cmd_delete(app: &App, id: &str) -> Result<(), String> {
    app.storage
        .delete_draft(id)
        .map_err(|e| format!("failed to delete draft: {e}"))?;
    eprintln!("Deleted draft {id}");
    Ok(())
}

fn cmd_clear(app: &App, yes: bool) -> Result<(), String> {
    if !yes {
        return Err("refusing to delete all drafts without --yes".to_string());
    }
    app.storage
        .clear_drafts()
        .map_err(|e| format!("failed to clear drafts: {e}"))?;
    eprintln!("Deleted all drafts");
    Ok(())
}

fn cmd_select(
    app: &App,
    id: &str,
    equipment_id: &str,
    condition: Option<Condition>,
    notes: Option<String>,
) -> Result<(), String> {
    let mut form = load_form(app, id)?;
    select_equipment(app, &mut form, equipment_id, condition, notes)?;
    save_form(app, id, &form)?;

    if let Some(selected) = form.selected_mut(equipment_id) {
        eprintln!("{} [{}]", equipment_line(&selected.record), selected.condition);
    }
    Ok(())
}

/// Adds an item to the form's selection, or updates it if already selected.
fn select_equipment(
    app: &App,
    form: &mut JobCardForm,
    equipment_id: &str,
    condition: Option<Condition>,
    notes: Option<String>,
) -> Result<(), String> {
    if form.selected_mut(equipment_id).is_none() {
        let record = app
            .catalog
            .find_by_id(&form.vessel, &form.technology, equipment_id)
            .ok_or_else(|| {
                format!(
                    "no equipment '{equipment_id}' for {}/{}",
                    form.vessel, form.technology
                )
            })?;
        form.equipment.push(SelectedEquipment::new(record.clone()));
    }

    if let Some(selected) = form.selected_mut(equipment_id) {
        if let Some(condition) = condition {
            selected.condition = condition;
        }
        if let Some(notes) = notes {
            selected.notes = notes;
        }
    }
    Ok(())
}

fn cmd_deselect(app: &App, id: &str, equipment_id: &str) -> Result<(), String> {
    let mut form = load_form(app, id)?;
    if form.deselect(equipment_id) {
        save_form(app, id, &form)?;
        eprintln!("Removed {equipment_id} from {id}");
    } else {
        eprintln!("{equipment_id} is not selected on {id}");
    }
    Ok(())
}

/// Field changes requested by `draft set`.
#[derive(Debug, Default)]
struct FormUpdate {
    status: Option<JobStatus>,
    notes: Option<String>,
    findings: Option<String>,
    recommendations: Option<String>,
}

impl FormUpdate {
    fn apply(self, form: &mut JobCardForm) {
        if let Some(status) = self.status {
            form.status = status;
        }
        if let Some(notes) = self.notes {
            form.notes = notes;
        }
        if let Some(findings) = self.findings {
            form.findings = findings;
        }
        if let Some(recommendations) = self.recommendations {
            form.recommendations = recommendations;
        }
    }
}

fn cmd_set(app: &App, id: &str, update: FormUpdate) -> Result<(), String> {
    let mut form = load_form(app, id)?;
    update.apply(&mut form);
    save_form(app, id, &form)?;
    eprintln!("Updated {id} [{}]", form.status.name());
    Ok(())
}

fn load_existing(app: &App, id: &str) -> Result<Option<Draft>, String> {
    app.storage
        .load_draft(id)
        .map_err(|e| format!("failed to load draft: {e}"))
}

/// Loads a draft and reads its payload as a job card form.
fn load_form(app: &App, id: &str) -> Result<JobCardForm, String> {
    let draft = load_existing(app, id)?.ok_or_else(|| format!("no draft '{id}'"))?;
    serde_json::from_value(draft.data).map_err(|e| format!("draft '{id}' is not a job card: {e}"))
}

fn save_form(app: &App, id: &str, form: &JobCardForm) -> Result<(), String> {
    let data =
        serde_json::to_value(form).map_err(|e| format!("failed to serialize job card: {e}"))?;
    app.storage
        .save_draft(id, data)
        .map_err(|e| format!("failed to save draft: {e}"))?;
    Ok(())
}
