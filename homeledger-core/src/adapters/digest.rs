//! Salted SHA-256 credential store
//!
//! Sealed format: `sha256$<salt>$<hex digest>`. The salt is a random v4 UUID
//! in simple (hyphen-less) form.

use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::domain::Credential;
use crate::ports::CredentialStore;

const SCHEME: &str = "sha256";

/// Default [`CredentialStore`] used by the CLI
#[derive(Debug, Clone, Copy, Default)]
pub struct DigestCredentialStore;

impl DigestCredentialStore {
    pub fn new() -> Self {
        Self
    }

    fn digest(salt: &str, secret: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(salt.as_bytes());
        hasher.update(b"|");
        hasher.update(secret.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl CredentialStore for DigestCredentialStore {
    fn name(&self) -> &str {
        SCHEME
    }

    fn seal(&self, secret: &str) -> Credential {
        let salt = Uuid::new_v4().simple().to_string();
        let digest = Self::digest(&salt, secret);
        Credential::from_sealed(format!("{}${}${}", SCHEME, salt, digest))
    }

    fn verify(&self, stored: &Credential, candidate: &str) -> bool {
        let mut parts = stored.sealed().splitn(3, '$');
        let (Some(scheme), Some(salt), Some(expected)) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };
        if scheme != SCHEME {
            return false;
        }

        let actual = Self::digest(salt, candidate);
        // Compare every byte so timing does not depend on the first mismatch
        actual.len() == expected.len()
            && actual
                .bytes()
                .zip(expected.bytes())
                .fold(0u8, |acc, (a, b)| acc | (a ^ b))
                == 0
    }
}
