//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `shipledger_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use shipledger_core::{ShipService, StoreConfig};

fn main() {
    println!("shipledger_core version={}", shipledger_core::core_version());

    // With a database path argument, run one real list operation against it.
    let Some(db_path) = std::env::args().nth(1) else {
        return;
    };
    let service = ShipService::new(StoreConfig::new(db_path));
    match service.list(None) {
        Ok(ships) => println!("ships={ships}"),
        Err(err) => {
            eprintln!("failed to list ships: {err}");
            std::process::exit(1);
        }
    }
}
