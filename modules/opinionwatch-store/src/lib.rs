//! SQLite persistence for the analysed comment dataset.
//!
//! The dataset lives in a single `comments` table that every save drops and
//! recreates. Readers (the report command, external dashboards) only ever see
//! the latest complete run.

pub mod error;
mod store;

pub use error::{Result, StoreError};
pub use store::{SqliteStore, TABLE_NAME};
