//! Read-side queries for the dashboard. Every request re-queries the store;
//! nothing is cached between requests.

use crate::db::models::Reading;
use crate::schema;
use diesel::prelude::*;
use diesel::SqliteConnection;

/// How many of the newest readings feed the rolling average.
pub const AVERAGE_WINDOW: i64 = 50;
/// How many of the newest readings the page lists.
pub const RECENT_WINDOW: i64 = 10;

/// Everything one index-page render needs, straight from the store.
#[derive(Debug, Clone)]
pub struct DashboardData {
    /// The single most recent reading, if any rows exist.
    pub latest: Option<Reading>,
    /// Up to [`AVERAGE_WINDOW`] newest readings, newest first.
    pub window: Vec<Reading>,
    /// Up to [`RECENT_WINDOW`] newest readings, newest first.
    pub recent: Vec<Reading>,
}

impl DashboardData {
    /// Arithmetic mean over the window, rounded to 2 decimal places.
    /// `None` when there are no readings at all.
    pub fn average(&self) -> Option<f64> {
        if self.window.is_empty() {
            return None;
        }
        let sum: f64 = self.window.iter().map(|r| r.temperature_celsius).sum();
        Some(round2(sum / self.window.len() as f64))
    }
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Run the three index-page queries: latest reading, averaging window,
/// display list. Ordering is `entry_time` descending throughout; ties are
/// left to the store, as there is no secondary sort key.
pub fn load(conn: &mut SqliteConnection) -> QueryResult<DashboardData> {
    use schema::weather_data::dsl as W;

    let latest = W::weather_data
        .order(W::entry_time.desc())
        .select(Reading::as_select())
        .first(conn)
        .optional()?;

    let window = W::weather_data
        .order(W::entry_time.desc())
        .limit(AVERAGE_WINDOW)
        .select(Reading::as_select())
        .load(conn)?;

    let recent = W::weather_data
        .order(W::entry_time.desc())
        .limit(RECENT_WINDOW)
        .select(Reading::as_select())
        .load(conn)?;

    Ok(DashboardData { latest, window, recent })
}

/// The health probe's trivial read. Succeeds on an empty table; fails when
/// the store is unreachable or the schema is missing.
pub fn ping(conn: &mut SqliteConnection) -> QueryResult<()> {
    use schema::weather_data::dsl as W;

    W::weather_data
        .select(W::id)
        .order(W::id.asc())
        .first::<i32>(conn)
        .optional()
        .map(|_| ())
}
