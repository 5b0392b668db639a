//! Equipment records and the per-item inspection state attached to a job card.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One inspectable item in a vessel's equipment registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentRecord {
    /// Conventionally `{vesselCode}-{techPrefix}-{sequence}`, e.g. `SAX-VIB-001`.
    pub id: String,
    #[serde(default)]
    pub area: String,
    #[serde(default)]
    pub function_location: String,
    #[serde(default)]
    pub equipment_desc: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sap_number: Option<String>,
}

impl EquipmentRecord {
    /// Case-insensitive substring match over description, area,
    /// function location, and SAP number. `needle` must already be lowercase.
    pub(crate) fn matches(&self, needle: &str) -> bool {
        [
            Some(self.equipment_desc.as_str()),
            Some(self.area.as_str()),
            Some(self.function_location.as_str()),
            self.sap_number.as_deref(),
        ]
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
    }
}

/// Inspection outcome recorded against a selected item.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    #[default]
    Normal,
    /// Attention required.
    Attention,
    Critical,
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Normal => "normal",
            Self::Attention => "attention required",
            Self::Critical => "critical",
        })
    }
}

/// An equipment record picked into a job card, with its findings.
///
/// Serialized flat: the record's fields sit alongside `condition` and `notes`.
/// Any other per-item fields are kept in `extra`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedEquipment {
    #[serde(flatten)]
    pub record: EquipmentRecord,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub notes: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl SelectedEquipment {
    /// Selects a record with the default condition and no notes.
    pub fn new(record: EquipmentRecord) -> Self {
        Self {
            record,
            condition: Condition::Normal,
            notes: String::new(),
            extra: Map::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    fn pump() -> EquipmentRecord {
        EquipmentRecord {
            id: "SAX-VIB-001".into(),
            area: "Process Deck".into(),
            function_location: "SAX-PRC-P-101A".into(),
            equipment_desc: "Crude Transfer Pump A".into(),
            sap_number: Some("10045123".into()),
        }
    }

    #[test]
    fn matches_is_case_insensitive_across_fields() {
        let eq = pump();
        assert!(eq.matches("pump"));
        assert!(eq.matches("process"));
        assert!(eq.matches("prc-p"));
        assert!(eq.matches("451"));
        assert!(!eq.matches("compressor"));
    }

    #[test]
    fn matches_without_sap_number() {
        let mut eq = pump();
        eq.sap_number = None;
        assert!(!eq.matches("451"));
    }

    #[test]
    fn selected_equipment_serializes_flat() {
        let selected = SelectedEquipment {
            record: pump(),
            condition: Condition::Attention,
            notes: "High axial vibration".into(),
            extra: Map::new(),
        };
        let value = serde_json::to_value(&selected).unwrap();

        assert_eq!(value["id"], "SAX-VIB-001");
        assert_eq!(value["equipmentDesc"], "Crude Transfer Pump A");
        assert_eq!(value["condition"], "attention");
        assert_eq!(value["notes"], "High axial vibration");
    }

    #[test]
    fn selected_equipment_defaults_missing_condition() {
        let value = json!({ "id": "MON-THM-004", "area": "Turret" });
        let selected: SelectedEquipment = serde_json::from_value(value).unwrap();

        assert_eq!(selected.condition, Condition::Normal);
        assert!(selected.notes.is_empty());
        assert_eq!(selected.record.sap_number, None);
        assert!(selected.extra.is_empty());
    }

    #[test]
    fn selected_equipment_keeps_unknown_fields() {
        let value = json!({
            "id": "SAX-VIB-001",
            "area": "Process Deck",
            "condition": "critical",
            "photoRef": "img-0042",
            "readings": { "velocity": 7.1 }
        });
        let selected: SelectedEquipment = serde_json::from_value(value).unwrap();

        assert_eq!(selected.record.id, "SAX-VIB-001");
        assert_eq!(selected.condition, Condition::Critical);
        assert_eq!(selected.extra.len(), 2);
        assert!(!selected.extra.contains_key("id"));
        assert!(!selected.extra.contains_key("condition"));

        let back = serde_json::to_value(&selected).unwrap();
        assert_eq!(back["photoRef"], "img-0042");
        assert_eq!(back["readings"]["velocity"], 7.1);
        assert_eq!(back["id"], "SAX-VIB-001");
    }
}
