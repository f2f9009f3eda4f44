use rusqlite::Connection;
use std::path::PathBuf;
use anyhow::{Context, Result};
use crate::db::migrations::MigrationManager;

/// Database connection manager
pub struct DbConnection;

impl DbConnection {
    /// Get the default database path
    pub fn default_path() -> PathBuf {
        let home = dirs::home_dir().expect("Could not determine home directory");
        home.join(".leadboard").join("pipeline.db")
    }

    /// Get database path from configuration file or default
    pub fn resolve_path() -> Result<PathBuf> {
        let config_path = Self::config_path();

        if config_path.exists() {
            if let Ok(config) = std::fs::read_to_string(&config_path) {
                for line in config.lines() {
                    let line = line.trim();
                    if let Some(path_str) = line.strip_prefix("data.location=") {
                        let path = PathBuf::from(path_str.trim());

                        // If path is relative, resolve relative to config file directory
                        if path.is_relative() {
                            return Ok(config_path.parent().unwrap().join(path));
                        } else {
                            return Ok(path);
                        }
                    }
                }
            }
        }

        Ok(Self::default_path())
    }

    /// Get the configuration file path
    pub fn config_path() -> PathBuf {
        let home = dirs::home_dir().expect("Could not determine home directory");
        home.join(".leadboard").join("rc")
    }

    /// Connect to the database, creating it and parent directories if needed
    pub fn connect() -> Result<Connection> {
        let db_path = Self::resolve_path()?;

        // Create parent directory if it doesn't exist
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open database: {}", db_path.display()))?;

        // Initialize schema
        MigrationManager::initialize(&conn)
            .context("Failed to initialize database schema")?;

        Ok(conn)
    }

    /// Connect to an in-memory database (for testing)
    pub fn connect_in_memory() -> Result<Connection> {
        let conn = Connection::open_in_memory()
            .context("Failed to open in-memory database")?;

        MigrationManager::initialize(&conn)
            .context("Failed to initialize database schema")?;

        Ok(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_path() {
        let path = DbConnection::default_path();
        assert!(path.to_string_lossy().contains(".leadboard"));
        assert!(path.to_string_lossy().ends_with("pipeline.db"));
    }

    #[test]
    fn test_connect_initializes_schema() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("test.db");

        let conn = Connection::open(&db_path).unwrap();
        MigrationManager::initialize(&conn).unwrap();

        assert!(db_path.exists());
    }

    #[test]
    fn test_connect_in_memory() {
        let conn = DbConnection::connect_in_memory().unwrap();

        // Verify schema was initialized
        let version = MigrationManager::get_version(&conn).unwrap();
        assert_eq!(version, 2);
    }
}
