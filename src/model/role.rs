//! Roles and the actions each role may take.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    #[default]
    Technician,
    Manager,
    SuperAdmin,
}

impl Role {
    /// Position in the role hierarchy; higher outranks lower.
    pub fn level(self) -> u8 {
        match self {
            Self::Technician => 1,
            Self::Manager => 2,
            Self::SuperAdmin => 3,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Technician => "technician",
            Self::Manager => "manager",
            Self::SuperAdmin => "super_admin",
        })
    }
}

/// A permitted action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Capability {
    CreateJobCard,
    EditOwnJobCard,
    EditAnyJobCard,
    DeleteJobCard,
    ApproveJobCard,
    ManageEquipment,
    ManageUsers,
    ApproveRequests,
    RequestEquipment,
    ViewAnalytics,
    ViewAllJobCards,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::CreateJobCard => "create job card",
            Self::EditOwnJobCard => "edit own job card",
            Self::EditAnyJobCard => "edit any job card",
            Self::DeleteJobCard => "delete job card",
            Self::ApproveJobCard => "approve job card",
            Self::ManageEquipment => "manage equipment",
            Self::ManageUsers => "manage users",
            Self::ApproveRequests => "approve requests",
            Self::RequestEquipment => "request equipment",
            Self::ViewAnalytics => "view analytics",
            Self::ViewAllJobCards => "view all job cards",
        })
    }
}

/// The actions a role may take.
pub fn capabilities(role: Role) -> BTreeSet<Capability> {
    let mut caps = BTreeSet::from([
        Capability::CreateJobCard,
        Capability::EditOwnJobCard,
        Capability::RequestEquipment,
    ]);
    if role.level() >= Role::Manager.level() {
        caps.extend([
            Capability::EditAnyJobCard,
            Capability::DeleteJobCard,
            Capability::ApproveJobCard,
            Capability::ManageEquipment,
            Capability::ApproveRequests,
            Capability::ViewAnalytics,
            Capability::ViewAllJobCards,
        ]);
    }
    if role == Role::SuperAdmin {
        caps.insert(Capability::ManageUsers);
    }
    caps
}
