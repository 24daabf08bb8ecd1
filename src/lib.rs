//! A small JSON API over authors and their quotes, backed by SQLite.

use sqlx::{Pool, Sqlite};

pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod init;
pub mod models;
pub mod routes;
pub mod schemas;
pub mod session;
pub mod telemetry;

/// Shared application state handed to every request.
#[derive(Clone)]
pub struct Data {
    pub db: Pool<Sqlite>,
}
