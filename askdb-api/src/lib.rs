//! askdb API: upload a SQLite database, ask a natural-language question,
//! get back the generated SQL and its results.

pub mod config;
pub mod error;
pub mod executor;
pub mod handlers;
pub mod models;
pub mod pages;
pub mod schema;
pub mod translator;
pub mod uploads;
