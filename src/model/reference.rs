//! Fixed reference tables: vessels, technologies, technicians.

/// A vessel whose equipment is inspected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vessel {
    pub id: &'static str,
    pub name: &'static str,
    /// Prefix for equipment ids on this vessel.
    pub code: &'static str,
}

/// An inspection technology.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Technology {
    pub id: &'static str,
    pub name: &'static str,
    /// Middle segment of equipment ids inspected with this technology.
    pub equipment_prefix: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Technician {
    pub id: &'static str,
    pub name: &'static str,
    pub email: &'static str,
}

pub const VESSELS: &[Vessel] = &[
    Vessel { id: "saxi", name: "Saxi", code: "SAX" },
    Vessel { id: "mondo", name: "Mondo", code: "MON" },
    Vessel { id: "ngoma", name: "Ngoma", code: "NGO" },
];

pub const TECHNOLOGIES: &[Technology] = &[
    Technology { id: "vibration", name: "Vibration", equipment_prefix: "VIB" },
    Technology { id: "oil", name: "Oil", equipment_prefix: "OIL" },
    Technology { id: "thermography", name: "Thermography", equipment_prefix: "THM" },
    Technology { id: "balancing", name: "Balancing and Alignment", equipment_prefix: "BAL" },
    Technology { id: "visual", name: "Visual Inspection", equipment_prefix: "VIS" },
];

pub const TECHNICIANS: &[Technician] = &[
    Technician { id: "peet", name: "Peet Peacock", email: "peet.peacock@wearcheck.com" },
    Technician { id: "deon", name: "Deon Gaarkeuken", email: "deon.gaarkeuken@wearcheck.com" },
    Technician { id: "jaco", name: "Jaco Willer", email: "jaco.willer@wearcheck.com" },
    Technician { id: "marcel", name: "Marcel Schoeman", email: "marcel.schoeman@wearcheck.com" },
    Technician { id: "edward", name: "Edward Pieterse Jnr", email: "edward.pieterse@wearcheck.com" },
    Technician { id: "dave", name: "Dave Viljoen", email: "dave.viljoen@wearcheck.com" },
];

pub fn vessel(id: &str) -> Option<&'static Vessel> {
    VESSELS.iter().find(|v| v.id == id)
}

pub fn technology(id: &str) -> Option<&'static Technology> {
    TECHNOLOGIES.iter().find(|t| t.id == id)
}

pub fn technician(id: &str) -> Option<&'static Technician> {
    TECHNICIANS.iter().find(|t| t.id == id)
}
