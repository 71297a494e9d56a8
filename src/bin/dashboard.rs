//! Dashboard server entry point: serves the HTML summary and the health
//! probe until killed. Reads the same SQLite file the collector writes.

use log::{error, info};
use openmeteo_sqlite::config::Config;
use openmeteo_sqlite::web::routes::{self, AppState};
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
        "openmeteo-sqlite dashboard {} (git {}) starting",
        env!("CARGO_PKG_VERSION"),
        env!("BUILD_TIME_GIT_HASH")
    );

    if let Err(e) = run() {
        error!("fatal: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cfg = Config::from_env()?;
    info!("Config loaded (database_url={}, bind_addr={})", cfg.database_url, cfg.bind_addr);

    let mut conn = establish_connection(&cfg.database_url)?;
    info!("Connected to database");
    // Whichever process starts first creates the schema.
    apply_database_migrations(&mut conn)?;

    let state = AppState::new(conn);

    let runtime = tokio::runtime::Runtime::new().map_err(|e| format!("starting runtime failed: {}", e))?;
    runtime.block_on(routes::serve(cfg.bind_addr, state))
}
