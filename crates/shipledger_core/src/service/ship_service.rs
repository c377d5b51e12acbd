//! Ship use-case service.
//!
//! # Responsibility
//! - Provide the five ship operations exposed to the dispatch layer.
//! - Resolve caller query parameters into named fetch flags once, at the
//!   boundary.
//! - Own the caller contract: JSON text for reads, booleans for writes.
//!
//! # Invariants
//! - Every operation runs on its own scoped connection, released on all
//!   exit paths.
//! - A missing id surfaces as `false`/`None`, never as an error.

use crate::db::open_db;
use crate::model::ship::{ShipDraft, ShipId};
use crate::repo::ship_repo::{
    RepoResult, ShipFetchOptions, ShipRepository, SqliteShipRepository,
};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::PathBuf;

const EXPAND_PARAM: &str = "_expand";
const HAULER_TOKEN: &str = "hauler";

/// Store location, passed in at construction instead of a fixed global path.
///
/// Tests point this at temp-file stores for isolation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

impl Default for StoreConfig {
    /// Historical store location of the shipping application.
    fn default() -> Self {
        Self::new("./shipping.db")
    }
}

/// Caller-supplied request context for read operations.
///
/// Mirrors the dispatch layer's parsed url structure: an optional mapping
/// from parameter name to one or more string values. Every level is
/// optional; a partial or empty structure is valid input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UrlRequest {
    #[serde(default)]
    pub query_params: Option<HashMap<String, Vec<String>>>,
}

impl UrlRequest {
    /// Resolves query parameters into fetch flags.
    ///
    /// Expansion is on iff the `_expand` parameter's values include the
    /// literal `"hauler"`. A missing map, key, or token resolves to flat
    /// output, never an error.
    pub fn fetch_options(&self) -> ShipFetchOptions {
        let expand_hauler = self
            .query_params
            .as_ref()
            .and_then(|params| params.get(EXPAND_PARAM))
            .is_some_and(|values| values.iter().any(|value| value == HAULER_TOKEN));

        ShipFetchOptions { expand_hauler }
    }
}

/// Use-case service for ship CRUD, called by the external dispatch layer.
pub struct ShipService {
    config: StoreConfig,
}

impl ShipService {
    /// Creates a service bound to the given store location.
    pub fn new(config: StoreConfig) -> Self {
        Self { config }
    }

    /// Lists all ships as a JSON array. An empty store yields `[]`.
    pub fn list(&self, request: Option<&UrlRequest>) -> RepoResult<String> {
        let options = resolve_options(request);
        let ships = self.with_repo(|repo| repo.list_ships(options))?;
        Ok(serde_json::to_string(&ships)?)
    }

    /// Gets one ship as a JSON object, or `None` when the id is absent.
    ///
    /// With expansion requested, a ship whose hauler row is missing also
    /// reads as `None`, matching the list omission policy.
    pub fn retrieve(&self, id: ShipId, request: Option<&UrlRequest>) -> RepoResult<Option<String>> {
        let options = resolve_options(request);
        match self.with_repo(|repo| repo.get_ship(id, options))? {
            Some(document) => Ok(Some(serde_json::to_string(&document)?)),
            None => Ok(None),
        }
    }

    /// Inserts a new ship. A successful insert always returns `true`;
    /// storage failures surface as errors instead of `false`.
    pub fn create(&self, draft: &ShipDraft) -> RepoResult<bool> {
        self.with_repo(|repo| repo.create_ship(draft))?;
        Ok(true)
    }

    /// Updates `name` and `hauler_id` of one ship. Returns `false` when the
    /// id does not exist; the store is left unchanged in that case.
    pub fn update(&self, id: ShipId, draft: &ShipDraft) -> RepoResult<bool> {
        self.with_repo(|repo| repo.update_ship(id, draft))
    }

    /// Deletes one ship. Returns `false` when the id does not exist.
    pub fn delete(&self, id: ShipId) -> RepoResult<bool> {
        self.with_repo(|repo| repo.delete_ship(id))
    }

    /// Runs one operation on a scoped connection.
    ///
    /// The connection is opened per call and dropped on every exit path,
    /// including errors; no connection outlives its operation.
    fn with_repo<T>(
        &self,
        operation: impl FnOnce(&SqliteShipRepository<'_>) -> RepoResult<T>,
    ) -> RepoResult<T> {
        let conn = open_db(&self.config.db_path)?;
        let repo = SqliteShipRepository::try_new(&conn)?;
        operation(&repo)
    }
}

fn resolve_options(request: Option<&UrlRequest>) -> ShipFetchOptions {
    request.map(UrlRequest::fetch_options).unwrap_or_default()
}
