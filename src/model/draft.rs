//! Draft: a job card in progress, stored locally until submitted.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A locally persisted, not-yet-submitted job card.
///
/// The payload is opaque to the store. Saving under an existing id
/// replaces the whole payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    /// Caller-chosen key: a generated job number or an existing record id.
    pub id: String,

    /// Form state as the caller wrote it.
    pub data: Value,

    /// Assigned by the store on every save.
    pub updated_at: Timestamp,
}
