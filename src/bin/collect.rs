//! Collector entry point: one API attempt, at most one row, then exit.
//! Meant to be re-invoked periodically by an external scheduler (cron etc).

use log::{error, info};
use openmeteo_sqlite::client::OpenMeteoClient;
use openmeteo_sqlite::config::Config;
use openmeteo_sqlite::services::collect;
use openmeteo_sqlite::{apply_database_migrations, establish_connection, load_env_file_if_present};

fn main() {
    let loaded_env = match load_env_file_if_present() {
        Ok(info) => info,
        Err(err) => {
            eprintln!("fatal: {}", err);
            std::process::exit(1);
        }
    };

    openmeteo_sqlite::init_logging();

    if let Some(path) = loaded_env.as_ref() {
        info!("Environment loaded from .env file: {}", path.display());
    }
    info!(
        "openmeteo-sqlite collector {} (git {}) starting",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_TIME_GIT_HASH")
    );

    // Config, store, and schema problems are setup failures and fatal; a
    // failed collection attempt is an expected outcome and is not.
    let (cfg, mut conn) = match setup() {
        Ok(v) => v,
        Err(e) => {
            error!("fatal: {}", e);
            std::process::exit(1);
        }
    };

    let client = OpenMeteoClient::new(cfg.latitude, cfg.longitude, cfg.request_timeout);
    match collect::run_once(&mut conn, &client) {
        Ok(row) => {
            println!(
                "Successfully added temperature {}°C at {} UTC to {}",
                row.temperature_celsius,
                row.entry_time.format("%Y-%m-%d %H:%M:%S"),
                cfg.database_url
            );
        }
        Err(e) => {
            error!("collection run failed: {}", e);
            println!("Error fetching temperature: {}", e);
        }
    }
}

fn setup() -> Result<(Config, diesel::SqliteConnection), String> {
    let cfg = Config::from_env()?;
    info!(
        "Config loaded (database_url={}, latitude={}, longitude={}, timeout={}s)",
        cfg.database_url,
        cfg.latitude,
        cfg.longitude,
        cfg.request_timeout.as_secs()
    );

    let mut conn = establish_connection(&cfg.database_url)?;
    info!("Connected to database");
    apply_database_migrations(&mut conn)?;

    Ok((cfg, conn))
}
