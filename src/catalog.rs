//! Equipment catalog: the static per-vessel, per-technology equipment registry.
//!
//! The registry ships inside the binary as JSON under `data/`, one file per
//! partition. It is parsed once at start-up; after that every lookup is a
//! total function over memory. A (vessel, technology) pair with no data
//! resolves to an empty list, never an error, since new vessels and
//! technologies may legitimately have nothing registered yet.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::model::{self, EquipmentRecord};

/// Embedded partitions: (vessel, technology, JSON array of records).
const EMBEDDED: &[(&str, &str, &str)] = &[
    ("saxi", "vibration", include_str!("../data/saxi-vibration.json")),
    ("saxi", "thermography", include_str!("../data/saxi-thermography.json")),
    ("mondo", "vibration", include_str!("../data/mondo-vibration.json")),
    ("mondo", "thermography", include_str!("../data/mondo-thermography.json")),
    ("ngoma", "vibration", include_str!("../data/ngoma-vibration.json")),
    ("ngoma", "thermography", include_str!("../data/ngoma-thermography.json")),
];

/// Vessel code used in suggested ids when the vessel isn't in the reference table.
const FALLBACK_VESSEL_CODE: &str = "EQ";
/// Technology prefix used in suggested ids when the technology isn't known.
const FALLBACK_TECH_PREFIX: &str = "VIB";

/// Errors in catalog data, detected when the catalog is built.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("invalid equipment data for {vessel}/{technology}: {source}")]
    Parse {
        vessel: String,
        technology: String,
        source: serde_json::Error,
    },

    #[error("duplicate equipment id {id} in {vessel}/{technology}")]
    DuplicateId {
        vessel: String,
        technology: String,
        id: String,
    },
}

/// Equipment records partitioned by vessel, then technology.
#[derive(Debug, Default)]
pub struct Catalog {
    partitions: BTreeMap<String, BTreeMap<String, Vec<EquipmentRecord>>>,
}

impl Catalog {
    /// Builds the catalog from the data embedded at compile time.
    pub fn embedded() -> Result<Self, CatalogError> {
        let mut partitions = Vec::with_capacity(EMBEDDED.len());
        for &(vessel, technology, json) in EMBEDDED {
            let records: Vec<EquipmentRecord> =
                serde_json::from_str(json).map_err(|source| CatalogError::Parse {
                    vessel: vessel.to_string(),
                    technology: technology.to_string(),
                    source,
                })?;
            partitions.push((vessel.to_string(), technology.to_string(), records));
        }
        Self::from_partitions(partitions)
    }

    /// Builds a catalog from explicit partitions.
    ///
    /// Ids must be unique within each partition. A pair given twice keeps
    /// the later records.
    pub fn from_partitions(
        partitions: impl IntoIterator<Item = (String, String, Vec<EquipmentRecord>)>,
    ) -> Result<Self, CatalogError> {
        let mut catalog = Self::default();
        for (vessel, technology, records) in partitions {
            let duplicate = {
                let mut seen = BTreeSet::new();
                records
                    .iter()
                    .find(|r| !seen.insert(r.id.as_str()))
                    .map(|r| r.id.clone())
            };
            if let Some(id) = duplicate {
                return Err(CatalogError::DuplicateId {
                    vessel,
                    technology,
                    id,
                });
            }
            debug!(%vessel, %technology, count = records.len(), "loaded equipment partition");
            catalog
                .partitions
                .entry(vessel)
                .or_default()
                .insert(technology, records);
        }
        Ok(catalog)
    }

    /// Returns the equipment list for a vessel and technology, in catalog order.
    ///
    /// Empty if the pair has no data.
    pub fn load(&self, vessel: &str, technology: &str) -> &[EquipmentRecord] {
        self.partitions
            .get(vessel)
            .and_then(|techs| techs.get(technology))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn find_by_id(
        &self,
        vessel: &str,
        technology: &str,
        id: &str,
    ) -> Option<&EquipmentRecord> {
        self.load(vessel, technology).iter().find(|e| e.id == id)
    }

    /// Case-insensitive substring search over description, area, function
    /// location, and SAP number.
    ///
    /// An absent or empty term returns the whole partition.
    pub fn search(
        &self,
        vessel: &str,
        technology: &str,
        term: Option<&str>,
    ) -> Vec<&EquipmentRecord> {
        let records = self.load(vessel, technology);
        match term.filter(|t| !t.is_empty()) {
            None => records.iter().collect(),
            Some(term) => {
                let needle = term.to_lowercase();
                records.iter().filter(|e| e.matches(&needle)).collect()
            }
        }
    }

    /// Records whose area is exactly `area`, in catalog order.
    pub fn by_area(&self, vessel: &str, technology: &str, area: &str) -> Vec<&EquipmentRecord> {
        self.load(vessel, technology)
            .iter()
            .filter(|e| e.area == area)
            .collect()
    }

    /// Distinct areas present in a partition.
    pub fn unique_areas(&self, vessel: &str, technology: &str) -> BTreeSet<&str> {
        self.load(vessel, technology)
            .iter()
            .map(|e| e.area.as_str())
            .collect()
    }

    /// Suggests the conventional id for the next equipment entry in a partition:
    /// `{vesselCode}-{techPrefix}-{count + 1:03}`.
    pub fn suggest_id(&self, vessel: &str, technology: &str) -> String {
        let code = model::vessel(vessel).map_or(FALLBACK_VESSEL_CODE, |v| v.code);
        let prefix =
            model::technology(technology).map_or(FALLBACK_TECH_PREFIX, |t| t.equipment_prefix);
        let next = self.load(vessel, technology).len() + 1;
        format!("{code}-{prefix}-{next:03}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::embedded().unwrap()
    }

    fn ids(records: &[&EquipmentRecord]) -> Vec<String> {
        records.iter().map(|e| e.id.clone()).collect()
    }

    fn record(id: &str, area: &str) -> EquipmentRecord {
        EquipmentRecord {
            id: id.into(),
            area: area.into(),
            function_location: String::new(),
            equipment_desc: String::new(),
            sap_number: None,
        }
    }

    #[test]
    fn embedded_partitions_parse() {
        let catalog = catalog();
        for &(vessel, technology, _) in EMBEDDED {
            let records = catalog.load(vessel, technology);
            assert!(!records.is_empty(), "{vessel}/{technology}");

            let code = model::vessel(vessel).unwrap().code;
            let prefix = model::technology(technology).unwrap().equipment_prefix;
            for eq in records {
                assert!(
                    eq.id.starts_with(&format!("{code}-{prefix}-")),
                    "{vessel}/{technology}: {}",
                    eq.id
                );
            }
        }
    }

    #[test]
    fn load_unknown_pair_is_empty() {
        let catalog = catalog();
        assert!(catalog.load("atlantis", "sonar").is_empty());
        assert!(catalog.load("saxi", "sonar").is_empty());
        assert!(catalog.load("saxi", "oil").is_empty());
        assert!(catalog.load("", "").is_empty());
    }

    #[test]
    fn load_preserves_catalog_order() {
        let catalog = catalog();
        let records = catalog.load("saxi", "vibration");
        assert_eq!(records[0].id, "SAX-VIB-001");
        assert_eq!(records[1].id, "SAX-VIB-002");
    }

    #[test]
    fn find_by_id() {
        let catalog = catalog();
        let eq = catalog
            .find_by_id("saxi", "vibration", "SAX-VIB-005")
            .unwrap();
        assert_eq!(eq.equipment_desc, "Seawater Lift Pump A");

        assert!(catalog.find_by_id("saxi", "thermography", "SAX-VIB-005").is_none());
        assert!(catalog.find_by_id("atlantis", "sonar", "SAX-VIB-005").is_none());
    }

    #[test]
    fn search_matches_exactly_the_filtered_subset() {
        let catalog = catalog();
        let found = catalog.search("saxi", "vibration", Some("pump"));

        let expected: Vec<&EquipmentRecord> = catalog
            .load("saxi", "vibration")
            .iter()
            .filter(|e| {
                [
                    Some(&e.equipment_desc),
                    Some(&e.area),
                    Some(&e.function_location),
                    e.sap_number.as_ref(),
                ]
                .into_iter()
                .flatten()
                .any(|f| f.to_lowercase().contains("pump"))
            })
            .collect();

        assert_eq!(found, expected);
        assert_eq!(
            ids(&found),
            [
                "SAX-VIB-001",
                "SAX-VIB-002",
                "SAX-VIB-005",
                "SAX-VIB-006",
                "SAX-VIB-010"
            ]
        );
    }

    #[test]
    fn search_is_case_insensitive() {
        let catalog = catalog();
        assert_eq!(
            catalog.search("saxi", "vibration", Some("PUMP")),
            catalog.search("saxi", "vibration", Some("pump"))
        );
    }

    #[test]
    fn search_matches_sap_number_and_function_location() {
        let catalog = catalog();
        assert_eq!(
            ids(&catalog.search("saxi", "vibration", Some("10047001"))),
            ["SAX-VIB-008"]
        );
        assert_eq!(
            ids(&catalog.search("saxi", "vibration", Some("sax-hpu"))),
            ["SAX-VIB-011"]
        );
    }

    #[test]
    fn search_without_term_returns_everything() {
        let catalog = catalog();
        let all = catalog.load("mondo", "thermography").len();
        assert_eq!(catalog.search("mondo", "thermography", None).len(), all);
        assert_eq!(catalog.search("mondo", "thermography", Some("")).len(), all);
    }

    #[test]
    fn search_unknown_pair_is_empty() {
        assert!(catalog().search("atlantis", "sonar", Some("pump")).is_empty());
    }

    #[test]
    fn by_area_is_exact_and_ordered() {
        let catalog = catalog();
        let turret = catalog.by_area("saxi", "vibration", "Turret");
        assert_eq!(ids(&turret), ["SAX-VIB-011", "SAX-VIB-012"]);

        assert!(catalog.by_area("saxi", "vibration", "turret").is_empty());
        assert!(catalog.by_area("saxi", "vibration", "Turr").is_empty());
    }

    #[test]
    fn unique_areas() {
        let catalog = catalog();
        let areas = catalog.unique_areas("saxi", "vibration");
        assert_eq!(
            areas,
            BTreeSet::from(["Machinery Space", "Process Deck", "Turret", "Utilities"])
        );
        assert!(catalog.unique_areas("atlantis", "sonar").is_empty());
    }

    #[test]
    fn suggest_id_follows_convention() {
        let catalog = catalog();
        let count = catalog.load("saxi", "thermography").len();
        assert_eq!(
            catalog.suggest_id("saxi", "thermography"),
            format!("SAX-THM-{:03}", count + 1)
        );
        assert_eq!(catalog.suggest_id("mondo", "oil"), "MON-OIL-001");
        assert_eq!(catalog.suggest_id("atlantis", "sonar"), "EQ-VIB-001");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let err = Catalog::from_partitions([(
            "saxi".to_string(),
            "vibration".to_string(),
            vec![record("SAX-VIB-001", "Turret"), record("SAX-VIB-001", "Utilities")],
        )])
        .unwrap_err();

        assert!(matches!(err, CatalogError::DuplicateId { ref id, .. } if id == "SAX-VIB-001"));
    }

    #[test]
    fn same_id_in_different_partitions_is_allowed() {
        let catalog = Catalog::from_partitions([
            (
                "saxi".to_string(),
                "vibration".to_string(),
                vec![record("X-1", "Turret")],
            ),
            (
                "saxi".to_string(),
                "thermography".to_string(),
                vec![record("X-1", "Turret")],
            ),
        ])
        .unwrap();

        assert!(catalog.find_by_id("saxi", "vibration", "X-1").is_some());
        assert!(catalog.find_by_id("saxi", "thermography", "X-1").is_some());
    }
}
