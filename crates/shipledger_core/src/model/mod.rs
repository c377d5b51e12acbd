//! Domain models for shipping records.
//!
//! # Responsibility
//! - Define canonical data structures used by core business logic.
//! - Keep the flat and expanded document shapes as explicit variants.
//!
//! # Invariants
//! - Every ship is identified by a store-generated integer `ShipId`.
//! - A ship document is either flat or expanded, never a mix of both.

pub mod hauler;
pub mod ship;
