//! One fetch-and-store run: a single request to the weather API, then a
//! single committed row. Any failure aborts the run with zero rows written;
//! there is no retry here, the external scheduler just runs us again.

use crate::client::{OpenMeteoClient, OpenMeteoError};
use crate::db::models::NewReading;
use crate::schema;
use core::fmt;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Why a collection run wrote nothing.
#[derive(Debug)]
pub enum CollectError {
    /// Fetching or decoding the weather API response failed
    Api(OpenMeteoError),
    /// The insert failed; the transaction was rolled back
    Store(diesel::result::Error),
}

impl Display for CollectError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            CollectError::Api(e) => write!(f, "fetching temperature failed: {}", e),
            CollectError::Store(e) => write!(f, "storing reading failed: {}", e),
        }
    }
}

impl Error for CollectError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CollectError::Api(e) => Some(e),
            CollectError::Store(e) => Some(e),
        }
    }
}

impl From<OpenMeteoError> for CollectError {
    fn from(value: OpenMeteoError) -> Self {
        CollectError::Api(value)
    }
}

/// Fetch the current temperature and append one reading, stamped with the
/// current UTC time. Returns the row that was written.
pub fn run_once(conn: &mut SqliteConnection, client: &OpenMeteoClient) -> Result<NewReading, CollectError> {
    use schema::weather_data::dsl as W;

    let temperature = client.current_temperature()?;
    let row = NewReading::now(temperature);

    conn.transaction(|conn| diesel::insert_into(W::weather_data).values(&row).execute(conn))
        .map_err(CollectError::Store)?;

    info!(
        "Stored reading: {}°C at {} UTC",
        row.temperature_celsius,
        row.entry_time.format("%Y-%m-%d %H:%M:%S")
    );
    Ok(row)
}
