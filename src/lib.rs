pub mod client;
pub mod config;
pub mod db {
    pub mod models;
}
pub mod schema;
pub mod services {
    pub mod collect;
    pub mod dashboard;
}
pub mod web {
    pub mod routes;
    pub mod views;
}

use diesel::prelude::*;
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use log::info;
use std::path::{Path, PathBuf};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Open the SQLite store at `database_url` (a filesystem path, or `:memory:`).
pub fn establish_connection(database_url: &str) -> Result<SqliteConnection, String> {
    SqliteConnection::establish(database_url).map_err(|e| format!("DB connection failed: {}", e))
}

/// Bring the shared schema up to date. Both binaries call this on startup, so
/// whichever process starts first creates the `weather_data` table.
pub fn apply_database_migrations(conn: &mut SqliteConnection) -> Result<(), String> {
    match conn.run_pending_migrations(MIGRATIONS) {
        Ok(applied) => {
            if applied.is_empty() {
                info!("Database schema is up to date; no migrations were applied");
            } else {
                let names = applied.iter().map(|v| v.to_string()).collect::<Vec<_>>().join(", ");
                info!("Applied {} database migration(s): {}", applied.len(), names);
            }
            Ok(())
        }
        Err(e) => Err(format!("Applying database migrations failed: {}", e)),
    }
}

/// Load a `.env` file from the working directory, if one exists.
///
/// Plain `KEY=VALUE` assignments only; `#` comments and an optional `export `
/// prefix are accepted. Values already present in the process environment win.
pub fn load_env_file_if_present() -> Result<Option<PathBuf>, String> {
    let path = PathBuf::from(".env");
    if !path.is_file() {
        return Ok(None);
    }
    load_env_file(&path)?;
    Ok(Some(path))
}

fn load_env_file(path: &Path) -> Result<(), String> {
    let contents =
        std::fs::read_to_string(path).map_err(|e| format!("failed to read {}: {}", path.display(), e))?;

    for (index, line) in contents.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let assignment = trimmed.strip_prefix("export ").map(str::trim_start).unwrap_or(trimmed);
        let Some((key, value)) = assignment.split_once('=') else {
            return Err(format!("{}:{}: missing '=' in assignment", path.display(), index + 1));
        };
        let key = key.trim();
        if key.is_empty() || key.chars().any(|c| c.is_whitespace()) {
            return Err(format!("{}:{}: invalid variable name", path.display(), index + 1));
        }
        if std::env::var_os(key).is_none() {
            // Updating process-level environment variables is unsafe on some targets.
            unsafe {
                std::env::set_var(key, value.trim());
            }
        }
    }

    Ok(())
}

/// Init logging after the environment so RUST_LOG from .env is respected.
pub fn init_logging() {
    let default_filter = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(default_filter)
        .format_timestamp_secs()
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::weather_data::dsl as W;

    #[test]
    fn migrations_create_the_reading_table() {
        let mut conn = establish_connection(":memory:").unwrap();
        apply_database_migrations(&mut conn).unwrap();

        let count: i64 = W::weather_data.count().get_result(&mut conn).unwrap();
        assert_eq!(count, 0);

        // A second pass is a no-op.
        apply_database_migrations(&mut conn).unwrap();
    }
}
