//! Equipment catalog commands: list, show, areas, next-id.

use clap::{Args, Subcommand};
use tracing::warn;

use crate::model::{Capability, EquipmentRecord};

use super::App;
use super::format::{equipment_line, partition_label};

/// Selects one (vessel, technology) partition of the catalog.
#[derive(Debug, Args)]
pub struct Partition {
    /// Vessel id (e.g. `saxi`).
    #[arg(long)]
    vessel: String,

    /// Technology id (e.g. `vibration`).
    #[arg(long)]
    technology: String,
}

#[derive(Debug, Subcommand)]
pub enum EquipmentCommand {
    /// List equipment, optionally searched and filtered by area.
    List {
        #[command(flatten)]
        partition: Partition,

        /// Case-insensitive match on description, area, function location, or SAP number.
        #[arg(long)]
        search: Option<String>,

        /// Exact area name.
        #[arg(long)]
        area: Option<String>,
    },

    /// Print one equipment record as JSON.
    Show {
        #[command(flatten)]
        partition: Partition,

        /// Equipment id (e.g. `SAX-VIB-001`).
        id: String,
    },

    /// List the distinct areas in a partition.
    Areas {
        #[command(flatten)]
        partition: Partition,
    },

    /// Suggest the id for a new equipment entry.
    NextId {
        #[command(flatten)]
        partition: Partition,
    },
}

impl EquipmentCommand {
    pub(super) fn required_capability(&self) -> Option<Capability> {
        match self {
            Self::NextId { .. } => Some(Capability::ManageEquipment),
            Self::List { .. } | Self::Show { .. } | Self::Areas { .. } => None,
        }
    }
}

pub(super) fn run(app: &App, command: EquipmentCommand) -> Result<(), String> {
    match command {
        EquipmentCommand::List {
            partition,
            search,
            area,
        } => cmd_list(app, &partition, search.as_deref(), area.as_deref()),
        EquipmentCommand::Show { partition, id } => cmd_show(app, &partition, &id),
        EquipmentCommand::Areas { partition } => cmd_areas(app, &partition),
        EquipmentCommand::NextId { partition } => {
            println!(
                "{}",
                app.catalog
                    .suggest_id(&partition.vessel, &partition.technology)
            );
            Ok(())
        }
    }
}

fn cmd_list(
    app: &App,
    p: &Partition,
    search: Option<&str>,
    area: Option<&str>,
) -> Result<(), String> {
    if app.catalog.load(&p.vessel, &p.technology).is_empty() {
        warn!(vessel = %p.vessel, technology = %p.technology, "no equipment registered");
    }

    let records = list_records(app, p, search, area);
    if records.is_empty() {
        println!("No equipment");
        return Ok(());
    }

    for eq in &records {
        println!("{}", equipment_line(eq));
    }
    eprintln!(
        "{} item(s) in {}",
        records.len(),
        partition_label(&p.vessel, &p.technology)
    );
    Ok(())
}

/// Records in a partition, narrowed to one area and then by search term.
fn list_records<'a>(
    app: &'a App,
    p: &Partition,
    search: Option<&str>,
    area: Option<&str>,
) -> Vec<&'a EquipmentRecord> {
    let Some(area) = area else {
        return app.catalog.search(&p.vessel, &p.technology, search);
    };
    let needle = search.filter(|t| !t.is_empty()).map(str::to_lowercase);
    app.catalog
        .by_area(&p.vessel, &p.technology, area)
        .into_iter()
        .filter(|e| needle.as_deref().is_none_or(|n| e.matches(n)))
        .collect()
}

fn cmd_show(app: &App, p: &Partition, id: &str) -> Result<(), String> {
    let eq = app
        .catalog
        .find_by_id(&p.vessel, &p.technology, id)
        .ok_or_else(|| format!("no equipment '{id}' for {}/{}", p.vessel, p.technology))?;
    let json = serde_json::to_string_pretty(eq)
        .map_err(|e| format!("failed to serialize equipment: {e}"))?;
    println!("{json}");
    Ok(())
}

fn cmd_areas(app: &App, p: &Partition) -> Result<(), String> {
    for area in app.catalog.unique_areas(&p.vessel, &p.technology) {
        println!("{area}");
    }
    Ok(())
}
