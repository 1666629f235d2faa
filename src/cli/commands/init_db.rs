//! Init-db command implementation.

use crate::store::Database;
use crate::Result;
use colored::Colorize;
use std::path::Path;

/// Create the catalog database and its tables.
pub fn init_db(path: &Path) -> Result<()> {
    let existed = path.exists();
    let db = Database::open(path)?;

    if existed {
        println!(
            "{} Catalog already exists, schema verified: {}",
            "[OK]".green(),
            path.display()
        );
    } else {
        println!("{} Created catalog: {}", "[OK]".green(), path.display());
    }

    tracing::debug!(
        "{} shows, {} people",
        db.list_shows()?.len(),
        db.list_people()?.len()
    );

    Ok(())
}
