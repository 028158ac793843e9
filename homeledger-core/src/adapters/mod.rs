//! Adapter implementations (hexagonal architecture)
//!
//! Adapters implement the port traits defined in `ports/`.

pub mod digest;

pub use digest::DigestCredentialStore;
