//! Named HMAC algorithm registry and digest computation.
//!
//! Every signature and fingerprint digest in this crate is an HMAC over a
//! canonical byte string, hex-encoded in lowercase. The algorithm is chosen
//! by name at configuration time and validated against [`HashAlgorithm::REGISTERED`];
//! an unknown name is rejected before any hashing occurs.

use std::fmt;
use std::str::FromStr;

use hmac::{Hmac, KeyInit, Mac};
use md5::Md5;
use sha1::Sha1;
use sha2::{Sha256, Sha384, Sha512};
use subtle::ConstantTimeEq;

use crate::error::ConfigError;

/// A keyed-hash algorithm supported for signatures and fingerprints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HashAlgorithm {
    /// HMAC-MD5 (32 hex characters). Kept for fingerprinting legacy data sets.
    Md5,
    /// HMAC-SHA1 (40 hex characters).
    Sha1,
    /// HMAC-SHA256 (64 hex characters), the default.
    #[default]
    Sha256,
    /// HMAC-SHA384 (96 hex characters).
    Sha384,
    /// HMAC-SHA512 (128 hex characters).
    Sha512,
}

impl HashAlgorithm {
    /// The algorithm names accepted by [`HashAlgorithm::from_name`].
    pub const REGISTERED: [&'static str; 5] = ["md5", "sha1", "sha256", "sha384", "sha512"];

    /// Resolve an algorithm from its name, case-insensitively.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownAlgorithm`] if the name is not in
    /// [`HashAlgorithm::REGISTERED`].
    pub fn from_name(name: &str) -> Result<Self, ConfigError> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Ok(Self::Md5),
            "sha1" => Ok(Self::Sha1),
            "sha256" => Ok(Self::Sha256),
            "sha384" => Ok(Self::Sha384),
            "sha512" => Ok(Self::Sha512),
            _ => Err(ConfigError::UnknownAlgorithm {
                name: name.to_owned(),
                registered: Self::REGISTERED.to_vec(),
            }),
        }
    }

    /// The canonical lowercase name of this algorithm.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha1 => "sha1",
            Self::Sha256 => "sha256",
            Self::Sha384 => "sha384",
            Self::Sha512 => "sha512",
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for HashAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

/// Compute `HMAC(algorithm, message, key)` as a lowercase hex string.
#[must_use]
pub fn hmac_hex(algorithm: HashAlgorithm, message: &str, key: &[u8]) -> String {
    match algorithm {
        HashAlgorithm::Md5 => {
            let mut mac =
                Hmac::<Md5>::new_from_slice(key).expect("HMAC accepts keys of any length");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        HashAlgorithm::Sha1 => {
            let mut mac =
                Hmac::<Sha1>::new_from_slice(key).expect("HMAC accepts keys of any length");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        HashAlgorithm::Sha256 => {
            let mut mac =
                Hmac::<Sha256>::new_from_slice(key).expect("HMAC accepts keys of any length");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        HashAlgorithm::Sha384 => {
            let mut mac =
                Hmac::<Sha384>::new_from_slice(key).expect("HMAC accepts keys of any length");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
        HashAlgorithm::Sha512 => {
            let mut mac =
                Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any length");
            mac.update(message.as_bytes());
            hex::encode(mac.finalize().into_bytes())
        }
    }
}

/// Compare two hex digests in constant time.
#[must_use]
pub fn digest_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
