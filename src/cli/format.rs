//! Output formatting for CLI display.

use jiff::tz::TimeZone;
use serde_json::Value;

use crate::model::{
    Draft, EquipmentRecord, JobStatus, TECHNICIANS, TECHNOLOGIES, VESSELS, technology, vessel,
};

/// One line per draft: id, last saved, vessel, technology, equipment count.
///
/// Reads the payload leniently; drafts that aren't job cards still list.
pub(super) fn draft_summary(draft: &Draft, tz: &TimeZone) -> String {
    let field = |name: &str| draft.data.get(name).and_then(Value::as_str);

    let saved = draft
        .updated_at
        .to_zoned(tz.clone())
        .strftime("%Y-%m-%d %H:%M")
        .to_string();
    let count = draft
        .data
        .get("equipment")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);

    format!(
        "{}  {saved}  {}  {}  {count} item(s)",
        draft.id,
        vessel_name(field("vessel")),
        technology_name(field("technology")),
    )
}

/// `Name / Technology` for a partition, falling back to the raw ids.
pub(super) fn partition_label(vessel_id: &str, technology_id: &str) -> String {
    format!(
        "{} / {}",
        vessel_name(Some(vessel_id)),
        technology_name(Some(technology_id))
    )
}

pub(super) fn equipment_line(eq: &EquipmentRecord) -> String {
    let sap = eq.sap_number.as_deref().unwrap_or("-");
    format!(
        "{}  {}  {}  {}  SAP {sap}",
        eq.id, eq.area, eq.function_location, eq.equipment_desc
    )
}

/// The reference tables, one entry per line under a heading per table.
pub(super) fn reference_lines() -> Vec<String> {
    let mut lines = vec!["Vessels:".to_string()];
    lines.extend(
        VESSELS
            .iter()
            .map(|v| format!("  {:<14} {} ({})", v.id, v.name, v.code)),
    );
    lines.push("Technologies:".to_string());
    lines.extend(
        TECHNOLOGIES
            .iter()
            .map(|t| format!("  {:<14} {} ({})", t.id, t.name, t.equipment_prefix)),
    );
    lines.push("Technicians:".to_string());
    lines.extend(
        TECHNICIANS
            .iter()
            .map(|t| format!("  {:<14} {} <{}>", t.id, t.name, t.email)),
    );
    lines.push("Statuses:".to_string());
    lines.extend(
        JobStatus::ALL
            .iter()
            .map(|s| format!("  {:<14} {}", s.id(), s.name())),
    );
    lines
}

fn vessel_name(id: Option<&str>) -> &str {
    match id.filter(|s| !s.is_empty()) {
        None => "Not set",
        Some(id) => vessel(id).map_or(id, |v| v.name),
    }
}

fn technology_name(id: Option<&str>) -> &str {
    match id.filter(|s| !s.is_empty()) {
        None => "Not set",
        Some(id) => technology(id).map_or(id, |t| t.name),
    }
}
