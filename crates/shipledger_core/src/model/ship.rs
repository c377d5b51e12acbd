//! Ship domain model.
//!
//! # Responsibility
//! - Define the canonical ship record and its two document shapes.
//! - Provide write-side validation for create/update drafts.
//!
//! # Invariants
//! - `id` is store-generated and immutable for the lifetime of a row.
//! - An expanded document never carries a flat `hauler_id` next to the
//!   nested `hauler` object.

use crate::model::hauler::Hauler;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable identifier for a persisted ship row.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type ShipId = i64;

/// Flat ship record as stored in the `Ship` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ship {
    /// Store-generated primary key.
    pub id: ShipId,
    /// Display name of the vessel.
    pub name: String,
    /// Foreign key to the hauler operating this ship. Not enforced by a
    /// store constraint; dangling values are legal at this layer.
    pub hauler_id: i64,
}

/// Ship record with its hauler denormalized into a nested object.
///
/// The flat `hauler_id` is dropped in this shape; `hauler.id` is the one
/// source of that value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpandedShip {
    /// Store-generated primary key.
    pub id: ShipId,
    /// Display name of the vessel.
    pub name: String,
    /// Joined hauler row.
    pub hauler: Hauler,
}

/// Output document for read operations: one of two explicit shapes.
///
/// Serializes without a tag, so the flat variant encodes as
/// `{"id", "name", "hauler_id"}` and the expanded variant as
/// `{"id", "name", "hauler": {...}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ShipDocument {
    Flat(Ship),
    Expanded(ExpandedShip),
}

impl ShipDocument {
    /// Returns the ship id regardless of shape.
    pub fn id(&self) -> ShipId {
        match self {
            Self::Flat(ship) => ship.id,
            Self::Expanded(ship) => ship.id,
        }
    }

    /// Returns the ship name regardless of shape.
    pub fn name(&self) -> &str {
        match self {
            Self::Flat(ship) => ship.name.as_str(),
            Self::Expanded(ship) => ship.name.as_str(),
        }
    }
}

/// Write model for create/update operations.
///
/// The id is never part of a draft; it is store-generated on create and
/// immutable on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipDraft {
    /// Display name of the vessel. Must not be blank.
    pub name: String,
    /// Hauler assignment. Must be positive; existence is not checked here.
    pub hauler_id: i64,
}

impl ShipDraft {
    pub fn new(name: impl Into<String>, hauler_id: i64) -> Self {
        Self {
            name: name.into(),
            hauler_id,
        }
    }

    /// Checks draft invariants before the draft reaches SQL.
    ///
    /// # Errors
    /// - `BlankName` when `name` is empty or whitespace-only.
    /// - `NonPositiveHaulerId` when `hauler_id < 1`.
    pub fn validate(&self) -> Result<(), ShipValidationError> {
        if self.name.trim().is_empty() {
            return Err(ShipValidationError::BlankName);
        }
        if self.hauler_id < 1 {
            return Err(ShipValidationError::NonPositiveHaulerId(self.hauler_id));
        }
        Ok(())
    }
}

/// Validation failure for a ship draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShipValidationError {
    BlankName,
    NonPositiveHaulerId(i64),
}

impl Display for ShipValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "ship name must not be blank"),
            Self::NonPositiveHaulerId(value) => {
                write!(f, "hauler_id must be positive, got {value}")
            }
        }
    }
}

impl Error for ShipValidationError {}
