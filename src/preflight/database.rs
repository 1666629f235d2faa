//! Catalog database preflight check.

use super::CheckResult;
use crate::store::Database;
use std::path::Path;

/// Check that the catalog can be opened and its schema applied.
pub fn check(path: &Path) -> CheckResult {
    match Database::open(path) {
        Ok(_) => CheckResult::ok("Catalog", &path.display().to_string()),
        Err(e) => CheckResult::fail(
            "Catalog",
            &format!("cannot open {}: {}", path.display(), e),
            "Set DB_PATH or --db to a writable location",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_check_creates_catalog() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("catalog.sqlite3");
        let result = check(&path);
        assert!(result.success);
        assert!(path.exists());
    }
}
