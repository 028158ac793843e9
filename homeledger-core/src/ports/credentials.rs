//! Credential store port
//!
//! Sealing and comparing secrets is delegated to an external store so the
//! policy code never handles raw credential material beyond passing it on.

use crate::domain::Credential;

/// Seals and verifies account secrets
///
/// Implementations decide the sealing algorithm. The core only requires that
/// `verify(&seal(s), s)` holds and that sealed values never reveal `s`.
pub trait CredentialStore: Send + Sync {
    /// Store name (e.g., "sha256")
    fn name(&self) -> &str;

    /// Turn a raw secret into its stored form
    fn seal(&self, secret: &str) -> Credential;

    /// Compare a raw candidate against a stored credential
    fn verify(&self, stored: &Credential, candidate: &str) -> bool;
}
