// dogport-api: Async Rust client for the dog network-policy management API

pub mod client;
pub mod error;
pub mod transport;
pub mod types;

pub use client::{DogClient, RulesetQuery};
pub use error::Error;
pub use transport::{TlsMode, TransportConfig};
