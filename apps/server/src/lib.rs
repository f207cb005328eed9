//! Recipe server - Rust implementation
//!
//! A recipe management REST API with:
//! - CRUD over recipes and their ingredients
//! - Filtered, paginated search with a separate count query
//! - Batch ingredient loading and serving-size scaling
//! - PostgreSQL or in-memory storage

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod models;
pub mod request_context;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{Error, Result};
pub use state::AppState;
