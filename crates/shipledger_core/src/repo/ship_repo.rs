//! Ship repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide stable CRUD APIs over the `Ship` table.
//! - Keep SQL details inside the core persistence boundary.
//!
//! # Invariants
//! - Write paths must call `ShipDraft::validate()` before SQL mutations.
//! - Read paths must reject invalid persisted state instead of masking it.
//! - Expanded reads use inner-join semantics: ships whose `hauler_id` has no
//!   matching hauler row are omitted, for single-row and list reads alike.

use crate::db::DbError;
use crate::model::hauler::Hauler;
use crate::model::ship::{ExpandedShip, Ship, ShipDocument, ShipDraft, ShipId, ShipValidationError};
use rusqlite::{params, Connection, Row};
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const SHIP_SELECT_SQL: &str = "SELECT
    s.id,
    s.name,
    s.hauler_id
FROM Ship s";

const SHIP_EXPANDED_SELECT_SQL: &str = "SELECT
    s.id,
    s.name,
    h.id AS hauler_pk,
    h.name AS hauler_name,
    h.dock_id AS hauler_dock_id
FROM Ship s
JOIN Hauler h
    ON h.id = s.hauler_id";

const REQUIRED_TABLES: &[(&str, &[&str])] = &[
    ("Ship", &["id", "name", "hauler_id"]),
    ("Hauler", &["id", "name", "dock_id"]),
];

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for ship persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(ShipValidationError),
    Db(DbError),
    InvalidData(String),
    Serialization(serde_json::Error),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
    MissingRequiredColumn {
        table: &'static str,
        column: &'static str,
    },
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted ship data: {message}"),
            Self::Serialization(err) => write!(f, "failed to encode ship document: {err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match required \
                 {expected_version}; open the store via db::open_db"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::MissingRequiredColumn { table, column } => {
                write!(f, "required column `{table}.{column}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::Serialization(err) => Some(err),
            Self::InvalidData(_)
            | Self::UninitializedConnection { .. }
            | Self::MissingRequiredTable(_)
            | Self::MissingRequiredColumn { .. } => None,
        }
    }
}

impl From<ShipValidationError> for RepoError {
    fn from(value: ShipValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialization(value)
    }
}

/// Read options for single-row and list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShipFetchOptions {
    /// When set, hauler fields are joined in and nested under `hauler`.
    pub expand_hauler: bool,
}

/// Repository interface for ship CRUD operations.
pub trait ShipRepository {
    /// Inserts a new ship and returns its store-generated id.
    fn create_ship(&self, draft: &ShipDraft) -> RepoResult<ShipId>;
    /// Updates `name` and `hauler_id` of one ship. Returns `false` when the
    /// id does not exist.
    fn update_ship(&self, id: ShipId, draft: &ShipDraft) -> RepoResult<bool>;
    /// Gets one ship by id, `None` when absent. With expansion requested, a
    /// ship whose hauler row is missing also reads as `None`.
    fn get_ship(&self, id: ShipId, options: ShipFetchOptions) -> RepoResult<Option<ShipDocument>>;
    /// Lists all ships ordered by id.
    fn list_ships(&self, options: ShipFetchOptions) -> RepoResult<Vec<ShipDocument>>;
    /// Deletes one ship by id. Returns `false` when the id does not exist.
    fn delete_ship(&self, id: ShipId) -> RepoResult<bool>;
}

/// SQLite-backed ship repository.
pub struct SqliteShipRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteShipRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version does not match.
    /// - `MissingRequiredTable`/`MissingRequiredColumn` when the shipping
    ///   schema is incomplete.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn)?;
        Ok(Self { conn })
    }
}

impl ShipRepository for SqliteShipRepository<'_> {
    fn create_ship(&self, draft: &ShipDraft) -> RepoResult<ShipId> {
        draft.validate()?;

        self.conn.execute(
            "INSERT INTO Ship (name, hauler_id) VALUES (?1, ?2);",
            params![draft.name.as_str(), draft.hauler_id],
        )?;

        Ok(self.conn.last_insert_rowid())
    }

    fn update_ship(&self, id: ShipId, draft: &ShipDraft) -> RepoResult<bool> {
        draft.validate()?;

        let changed = self.conn.execute(
            "UPDATE Ship
             SET
                name = ?1,
                hauler_id = ?2
             WHERE id = ?3;",
            params![draft.name.as_str(), draft.hauler_id, id],
        )?;

        Ok(changed > 0)
    }

    fn get_ship(&self, id: ShipId, options: ShipFetchOptions) -> RepoResult<Option<ShipDocument>> {
        let sql = if options.expand_hauler {
            format!("{SHIP_EXPANDED_SELECT_SQL}\nWHERE s.id = ?1;")
        } else {
            format!("{SHIP_SELECT_SQL}\nWHERE s.id = ?1;")
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params![id])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_ship_row(row, options)?));
        }

        Ok(None)
    }

    fn list_ships(&self, options: ShipFetchOptions) -> RepoResult<Vec<ShipDocument>> {
        let sql = if options.expand_hauler {
            format!("{SHIP_EXPANDED_SELECT_SQL}\nORDER BY s.id ASC;")
        } else {
            format!("{SHIP_SELECT_SQL}\nORDER BY s.id ASC;")
        };

        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut ships = Vec::new();

        while let Some(row) = rows.next()? {
            ships.push(parse_ship_row(row, options)?);
        }

        Ok(ships)
    }

    fn delete_ship(&self, id: ShipId) -> RepoResult<bool> {
        let deleted = self
            .conn
            .execute("DELETE FROM Ship WHERE id = ?1;", params![id])?;

        Ok(deleted > 0)
    }
}

fn parse_ship_row(row: &Row<'_>, options: ShipFetchOptions) -> RepoResult<ShipDocument> {
    let id: ShipId = row.get("id")?;
    let name: String = row.get("name")?;
    if name.trim().is_empty() {
        return Err(RepoError::InvalidData(format!(
            "blank name in Ship.name for id {id}"
        )));
    }

    if options.expand_hauler {
        return Ok(ShipDocument::Expanded(ExpandedShip {
            id,
            name,
            hauler: Hauler {
                id: row.get("hauler_pk")?,
                name: row.get("hauler_name")?,
                dock_id: row.get("hauler_dock_id")?,
            },
        }));
    }

    Ok(ShipDocument::Flat(Ship {
        id,
        name,
        hauler_id: row.get("hauler_id")?,
    }))
}

fn ensure_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = crate::db::migrations::latest_version();
    let actual_version: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for &(table, columns) in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }

        let present = table_columns(conn, table)?;
        for &column in columns {
            if !present.contains(column) {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_columns(conn: &Connection, table: &str) -> RepoResult<HashSet<String>> {
    let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1);")?;
    let mut rows = stmt.query([table])?;
    let mut columns = HashSet::new();

    while let Some(row) = rows.next()? {
        columns.insert(row.get::<_, String>(0)?);
    }

    Ok(columns)
}
