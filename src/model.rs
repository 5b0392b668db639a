//! Core data model for jobcard.
//!
//! Drafts, equipment records, the job card form written into drafts,
//! the fixed reference tables, and roles.

mod draft;
mod equipment;
mod job_card;
mod reference;
mod role;

pub use draft::Draft;
pub use equipment::{Condition, EquipmentRecord, SelectedEquipment};
pub use job_card::{JobCardForm, JobStatus, generate_job_number};
pub use reference::{TECHNICIANS, TECHNOLOGIES, VESSELS, technician, technology, vessel};
pub use role::{Capability, Role, capabilities};
