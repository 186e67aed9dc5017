//! Deterministic URL canonicalization with HMAC signing and fingerprinting.
//!
//! This crate turns a URL into a canonical, order-independent byte
//! representation and derives keyed hashes from it, for two use cases:
//!
//! - **Signing**: append an HMAC signature (and optionally an expiry
//!   timestamp) to a URL's query string, so a recipient can check
//!   authenticity and non-expiry without any server-side state.
//! - **Fingerprinting**: derive a stable digest of a URL under configurable
//!   normalization rules (ignore scheme, fragment, chosen query parameters,
//!   ...), for deduplication and cache keying.
//!
//! Both pipelines share the same canonical query form: parameters are
//! serialized as `key=value` (a bare `?b` counts as `?b=`), sorted bytewise,
//! and joined with `&`, so parameter order never changes a hash.
//!
//! # Signing
//!
//! ```
//! use urlseal::{HashConfiguration, Signer};
//!
//! let signer = Signer::new(HashConfiguration::new("secure-key"));
//! let signed = signer.sign("https://example.com/download?file=report.pdf")?;
//!
//! let verifier = signer.verifier();
//! assert!(verifier.is_valid(&signed)?);
//! assert!(!verifier.is_valid(&signed.replace("report", "secrets"))?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Signatures can expire:
//!
//! ```
//! use urlseal::{HashConfiguration, Signer};
//!
//! let signer = Signer::new(HashConfiguration::new("secure-key"));
//! let signed = signer.sign_with_timeout("/download", "+10 minutes")?;
//! assert!(signed.contains("_expires="));
//! assert!(signer.verifier().is_valid(&signed)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Fingerprinting
//!
//! ```
//! use urlseal::{FingerprintOptions, FingerprintReader};
//!
//! let reader = FingerprintReader::new(
//!     FingerprintOptions::builder().secret("42").build()?,
//! );
//! let first = reader.capture("https://example.com/?b=2&a=1")?;
//! let second = reader.capture("https://example.com/?a=1&b=2")?;
//! assert!(reader.compare(&first, &second));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Modules
//!
//! - [`uri`] - URL component splitting and rebuilding
//! - [`canonical`] - canonical query-string construction
//! - [`algorithm`] - HMAC algorithm registry and digest computation
//! - [`config`] - signing configuration and component selection
//! - [`timeout`] - timeout inputs and date-expression parsing
//! - [`sign`] - the signing pipeline
//! - [`verify`] - the verification state machine
//! - [`fingerprint`] - fingerprint capture and comparison
//! - [`error`] - error taxonomy

pub mod algorithm;
pub mod canonical;
pub mod config;
pub mod error;
pub mod fingerprint;
pub mod sign;
pub mod timeout;
pub mod uri;
pub mod verify;

pub use algorithm::{HashAlgorithm, digest_eq, hmac_hex};
pub use canonical::{canonical_query, canonical_query_ignoring};
pub use config::{ComponentSet, HashConfiguration, UrlPart};
pub use error::{ConfigError, SignError, TimeoutError, UrlError, VerifyError};
pub use fingerprint::{Fingerprint, FingerprintOptions, FingerprintReader};
pub use sign::Signer;
pub use timeout::Timeout;
pub use uri::UrlComponents;
pub use verify::Verifier;
