use rusqlite::{params, Connection};
use shipledger_core::db::migrations::latest_version;
use shipledger_core::db::open_db_in_memory;
use shipledger_core::{
    RepoError, ShipDocument, ShipDraft, ShipFetchOptions, ShipRepository, SqliteShipRepository,
};

const EXPANDED: ShipFetchOptions = ShipFetchOptions { expand_hauler: true };

fn seed_hauler(conn: &Connection, id: i64, name: &str, dock_id: i64) {
    conn.execute(
        "INSERT INTO Hauler (id, name, dock_id) VALUES (?1, ?2, ?3);",
        params![id, name, dock_id],
    )
    .unwrap();
}

#[test]
fn create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let id = repo.create_ship(&ShipDraft::new("Titanic", 1)).unwrap();

    let loaded = repo
        .get_ship(id, ShipFetchOptions::default())
        .unwrap()
        .unwrap();
    match loaded {
        ShipDocument::Flat(ship) => {
            assert_eq!(ship.id, id);
            assert_eq!(ship.name, "Titanic");
            assert_eq!(ship.hauler_id, 1);
        }
        other => panic!("expected flat document, got {other:?}"),
    }
}

#[test]
fn create_returns_store_generated_ids() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let first = repo.create_ship(&ShipDraft::new("Aurora", 1)).unwrap();
    let second = repo.create_ship(&ShipDraft::new("Borealis", 1)).unwrap();

    assert!(second > first);
}

#[test]
fn update_existing_ship() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let id = repo.create_ship(&ShipDraft::new("Draft Name", 1)).unwrap();

    let updated = repo
        .update_ship(id, &ShipDraft::new("Final Name", 2))
        .unwrap();
    assert!(updated);

    let loaded = repo
        .get_ship(id, ShipFetchOptions::default())
        .unwrap()
        .unwrap();
    match loaded {
        ShipDocument::Flat(ship) => {
            assert_eq!(ship.name, "Final Name");
            assert_eq!(ship.hauler_id, 2);
        }
        other => panic!("expected flat document, got {other:?}"),
    }
}

#[test]
fn update_missing_ship_returns_false_and_leaves_store_unchanged() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let id = repo.create_ship(&ShipDraft::new("Aurora", 1)).unwrap();

    let updated = repo
        .update_ship(id + 100, &ShipDraft::new("Ghost", 9))
        .unwrap();
    assert!(!updated);

    let ships = repo.list_ships(ShipFetchOptions::default()).unwrap();
    assert_eq!(ships.len(), 1);
    assert_eq!(ships[0].name(), "Aurora");
}

#[test]
fn delete_existing_ship_then_get_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let id = repo.create_ship(&ShipDraft::new("Aurora", 1)).unwrap();

    assert!(repo.delete_ship(id).unwrap());
    assert!(repo
        .get_ship(id, ShipFetchOptions::default())
        .unwrap()
        .is_none());
}

#[test]
fn delete_missing_ship_returns_false() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    assert!(!repo.delete_ship(9999).unwrap());
}

#[test]
fn get_on_empty_store_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    assert!(repo
        .get_ship(9999, ShipFetchOptions::default())
        .unwrap()
        .is_none());
    assert!(repo.get_ship(9999, EXPANDED).unwrap().is_none());
}

#[test]
fn list_on_empty_store_is_empty() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    assert!(repo.list_ships(ShipFetchOptions::default()).unwrap().is_empty());
    assert!(repo.list_ships(EXPANDED).unwrap().is_empty());
}

#[test]
fn expanded_get_nests_hauler_fields() {
    let conn = open_db_in_memory().unwrap();
    seed_hauler(&conn, 1, "ShipCo", 7);
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let id = repo.create_ship(&ShipDraft::new("Titanic", 1)).unwrap();

    let loaded = repo.get_ship(id, EXPANDED).unwrap().unwrap();
    match loaded {
        ShipDocument::Expanded(ship) => {
            assert_eq!(ship.id, id);
            assert_eq!(ship.name, "Titanic");
            assert_eq!(ship.hauler.id, 1);
            assert_eq!(ship.hauler.name, "ShipCo");
            assert_eq!(ship.hauler.dock_id, 7);
        }
        other => panic!("expected expanded document, got {other:?}"),
    }
}

#[test]
fn expanded_reads_omit_ships_with_missing_hauler() {
    let conn = open_db_in_memory().unwrap();
    seed_hauler(&conn, 1, "ShipCo", 7);
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let assigned = repo.create_ship(&ShipDraft::new("Titanic", 1)).unwrap();
    let dangling = repo.create_ship(&ShipDraft::new("Orphan", 42)).unwrap();

    // List and single-row reads must agree on the omission policy.
    let expanded = repo.list_ships(EXPANDED).unwrap();
    assert_eq!(expanded.len(), 1);
    assert_eq!(expanded[0].id(), assigned);

    assert!(repo.get_ship(dangling, EXPANDED).unwrap().is_none());

    // Flat reads still see the dangling ship.
    let flat = repo.list_ships(ShipFetchOptions::default()).unwrap();
    assert_eq!(flat.len(), 2);
    assert!(repo
        .get_ship(dangling, ShipFetchOptions::default())
        .unwrap()
        .is_some());
}

#[test]
fn dangling_hauler_id_is_accepted_on_write() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    // No Hauler rows exist at all; integrity is the caller's problem.
    let id = repo.create_ship(&ShipDraft::new("Orphan", 42)).unwrap();
    assert!(repo.update_ship(id, &ShipDraft::new("Orphan", 43)).unwrap());
}

#[test]
fn validation_failure_blocks_create_and_update() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let create_err = repo.create_ship(&ShipDraft::new("  ", 1)).unwrap_err();
    assert!(matches!(create_err, RepoError::Validation(_)));

    let id = repo.create_ship(&ShipDraft::new("Aurora", 1)).unwrap();
    let update_err = repo
        .update_ship(id, &ShipDraft::new("Aurora", 0))
        .unwrap_err();
    assert!(matches!(update_err, RepoError::Validation(_)));

    let ships = repo.list_ships(ShipFetchOptions::default()).unwrap();
    assert_eq!(ships.len(), 1);
}

#[test]
fn read_path_rejects_blank_persisted_name() {
    let conn = open_db_in_memory().unwrap();
    conn.execute(
        "INSERT INTO Ship (name, hauler_id) VALUES ('   ', 1);",
        [],
    )
    .unwrap();
    let repo = SqliteShipRepository::try_new(&conn).unwrap();

    let err = repo.list_ships(ShipFetchOptions::default()).unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)));
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteShipRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_required_ship_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteShipRepository::try_new(&conn);
    assert!(matches!(result, Err(RepoError::MissingRequiredTable("Ship"))));
}

#[test]
fn repository_rejects_connection_missing_required_ship_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(
        "CREATE TABLE Ship (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );
        CREATE TABLE Hauler (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            dock_id INTEGER NOT NULL
        );",
    )
    .unwrap();
    conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version()))
        .unwrap();

    let result = SqliteShipRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "Ship",
            column: "hauler_id"
        })
    ));
}
