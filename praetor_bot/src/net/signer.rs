//! Request signing for outbound messages.
//!
//! Every message this client sends carries a lowercase hex HMAC-SHA256 of
//! one canonical component, keyed with the player's secret. The secret
//! itself never leaves this type.

use hmac::{Hmac, Mac, digest::KeyInit};
use sha2::Sha256;
use std::fmt;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum SignerError {
    #[error("signing secret is empty")]
    EmptySecret,
}

/// HMAC-SHA256 signer keyed with the per-client secret.
#[derive(Clone)]
pub struct Signer {
    mac: HmacSha256,
}

impl fmt::Debug for Signer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signer").field("secret", &"<redacted>").finish()
    }
}

impl Signer {
    /// An empty secret is a configuration error, reported here so it
    /// surfaces at startup rather than at the first signature.
    pub fn new(secret: impl AsRef<[u8]>) -> Result<Self, SignerError> {
        let secret = secret.as_ref();
        if secret.is_empty() {
            return Err(SignerError::EmptySecret);
        }
        // HMAC takes keys of any length, so only the empty check can fail.
        let mac = <HmacSha256 as KeyInit>::new_from_slice(secret)
            .map_err(|_| SignerError::EmptySecret)?;
        Ok(Self { mac })
    }

    fn digest(&self, component: &str) -> Vec<u8> {
        let mut mac = self.mac.clone();
        mac.update(component.as_bytes());
        mac.finalize().into_bytes().to_vec()
    }

    /// Hex digest of `component`. Deterministic for a given secret.
    pub fn sign(&self, component: &str) -> String {
        hex::encode(self.digest(component))
    }

    /// Check a hex signature against `component` in constant time.
    pub fn verify(&self, component: &str, signature: &str) -> bool {
        match hex::decode(signature) {
            Ok(given) => self.digest(component).ct_eq(&given).into(),
            Err(_) => false,
        }
    }
}
