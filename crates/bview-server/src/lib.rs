//! HTTP front end for bview.
//!
//! Serves HTML pages for browsing buckets and a small JSON REST surface for
//! reading, upserting and deleting records. Stored values are treated as
//! JSON only here; the store underneath never interprets them.

pub mod config;
pub mod error;
pub mod handler;
pub mod render;
pub mod router;
pub mod server;

pub use config::ServerConfig;
pub use error::{ServerError, ServerResult};
pub use handler::{AppState, UpsertRequest, UpsertResponse};
pub use server::BviewServer;
