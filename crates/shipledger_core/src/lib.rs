//! Core domain logic for ShipLedger.
//! This crate is the single source of truth for shipping-record invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::hauler::Hauler;
pub use model::ship::{ExpandedShip, Ship, ShipDocument, ShipDraft, ShipId, ShipValidationError};
pub use repo::ship_repo::{
    RepoError, RepoResult, ShipFetchOptions, ShipRepository, SqliteShipRepository,
};
pub use service::ship_service::{ShipService, StoreConfig, UrlRequest};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
