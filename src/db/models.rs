//! Diesel model structs for the reading store.
//!
//! One table, one row per collector run. Rows are append-only: the collector
//! inserts them and nothing ever updates or deletes them.

use chrono::{NaiveDateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::schema;

/// One stored temperature sample.
#[derive(Debug, Clone, PartialEq, Queryable, Identifiable, Selectable, Serialize, Deserialize)]
#[diesel(table_name = schema::weather_data)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Reading {
    pub id: i32,
    /// Insertion timestamp, UTC. Not unique: rapid runs may collide.
    pub entry_time: NaiveDateTime,
    pub temperature_celsius: f64,
}

#[derive(Debug, Clone, PartialEq, Insertable, Serialize, Deserialize)]
#[diesel(table_name = schema::weather_data)]
pub struct NewReading {
    pub entry_time: NaiveDateTime,
    pub temperature_celsius: f64,
}

impl NewReading {
    /// A reading stamped with the current UTC time.
    pub fn now(temperature_celsius: f64) -> Self {
        NewReading {
            entry_time: Utc::now().naive_utc(),
            temperature_celsius,
        }
    }
}
