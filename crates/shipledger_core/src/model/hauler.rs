//! Hauler read model.
//!
//! Haulers are owned by the fleet-management side of the application; this
//! component only reads them to expand ship documents.

use serde::{Deserialize, Serialize};

/// Hauler row as joined into expanded ship documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hauler {
    /// Store-generated primary key.
    pub id: i64,
    /// Display name of the hauler company.
    pub name: String,
    /// Dock the hauler operates from.
    pub dock_id: i64,
}
