//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes must enforce `ShipDraft::validate()` before SQL
//!   mutations.
//! - Missing rows are reported as values (`None`/`false`), not as errors;
//!   `RepoError` is reserved for storage and data-integrity failures.

pub mod ship_repo;
