//! Adapter for the hosted backend service the site delegates to: record
//! CRUD per content kind, file storage with public URLs, and session-based
//! authentication. Everything above this crate works with camelCase record
//! shapes; the snake_case row convention never leaves the client.

pub mod auth;
pub mod client;
pub mod error;
pub mod models;
pub mod store;

pub use auth::Session;
pub use client::GatewayClient;
pub use error::GatewayError;
pub use store::{FileStore, RecordGateway, StoredFile};
