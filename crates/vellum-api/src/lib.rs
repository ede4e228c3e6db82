// vellum-api: Async Rust client for the Vellum platform REST API

pub mod client;
pub mod error;
pub mod patch;
pub mod transport;
pub mod types;

pub use client::VellumClient;
pub use error::Error;
pub use patch::Patch;
pub use transport::{TlsMode, TransportConfig};
