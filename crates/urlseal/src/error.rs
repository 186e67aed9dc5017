//! Error types for URL signing, verification, and fingerprinting.
//!
//! Each failure family gets its own enum so callers can discriminate
//! "never signed" from "tampered" from "expired" without string matching.
//! Configuration problems surface at construction time, never at first use.

/// Errors raised while building a [`HashConfiguration`](crate::config::HashConfiguration)
/// or [`FingerprintOptions`](crate::fingerprint::FingerprintOptions).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The same query key was configured for both the signature and the timeout.
    #[error(
        "the URL key {key:?} was configured for the signature AND the timeout; the keys must be different"
    )]
    IdenticalKeys {
        /// The key that was assigned to both roles.
        key: String,
    },

    /// The named hash algorithm is not in the registry.
    #[error(
        "the hash algorithm {name:?} is not available; use one of the registered algorithms: {}",
        .registered.join(", ")
    )]
    UnknownAlgorithm {
        /// The rejected algorithm name.
        name: String,
        /// The names this build recognizes.
        registered: Vec<&'static str>,
    },

    /// The fingerprint secret was empty.
    #[error("the fingerprint secret must not be empty")]
    EmptySecret,
}

/// Errors raised while splitting a URL string into components.
#[derive(Debug, thiserror::Error)]
pub enum UrlError {
    /// The URL string was empty (or whitespace only).
    #[error("the URL string is empty")]
    Empty,

    /// The URL could not be split into components.
    #[error("invalid URL syntax: {0}")]
    Syntax(String),

    /// The authority carried a port that is not a decimal port number.
    #[error("invalid port in authority {0:?}")]
    InvalidPort(String),

    /// Scheme hashing is enabled but the URL carries no scheme.
    #[error("the scheme for URL ({0}) is missing")]
    MissingScheme(String),
}

/// Errors raised while resolving a timeout input to a unix timestamp.
#[derive(Debug, thiserror::Error)]
pub enum TimeoutError {
    /// The timeout expression did not match any supported date format.
    #[error("the timeout {0:?} cannot be parsed as a date expression")]
    NotParsable(String),

    /// The timeout input carried no usable content at all.
    #[error("unknown timeout format: {0:?}")]
    UnknownFormat(String),

    /// The resolved timestamp lies before the current time.
    #[error("the timeout is not valid: {timeout} lies in the past (now {now})")]
    InPast {
        /// The resolved unix timestamp.
        timeout: i64,
        /// The clock reading it was checked against.
        now: i64,
    },
}

/// Errors raised by [`Signer::sign`](crate::sign::Signer::sign) and friends.
#[derive(Debug, thiserror::Error)]
pub enum SignError {
    /// The input URL could not be parsed.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// The timeout input was rejected.
    #[error(transparent)]
    Timeout(#[from] TimeoutError),
}

/// Errors raised by [`Verifier::verify`](crate::verify::Verifier::verify).
///
/// Everything except [`VerifyError::InvalidUrl`] belongs to the validation
/// family that [`Verifier::is_valid`](crate::verify::Verifier::is_valid)
/// converts to `Ok(false)`.
#[derive(Debug, thiserror::Error)]
pub enum VerifyError {
    /// The input URL could not be parsed.
    #[error(transparent)]
    InvalidUrl(#[from] UrlError),

    /// The query string does not carry the configured signature key.
    #[error("{}", signature_not_found_message(.query))]
    SignatureNotFound {
        /// The query string of the URL, if it had one.
        query: Option<String>,
    },

    /// The signed URL carries a timeout that has passed.
    #[error("the signature expired at {timeout} and is no longer valid (now {now})")]
    SignatureExpired {
        /// The unix timestamp found under the timeout key.
        timeout: i64,
        /// The clock reading it was checked against.
        now: i64,
    },

    /// The signature key is present but its value is empty.
    #[error("the signature is empty and therefore invalid")]
    SignatureEmpty,

    /// The recomputed signature differs from the one in the URL.
    #[error("the signature does not match this URL (expected {computed})")]
    SignatureMismatch {
        /// The signature recomputed from the URL components.
        computed: String,
    },

    /// The timeout value in the query string was not an integer.
    #[error(transparent)]
    Timeout(#[from] TimeoutError),
}

fn signature_not_found_message(query: &Option<String>) -> String {
    match query {
        Some(query) => format!(
            "cannot verify the URL because the query string {query:?} does not contain a signature"
        ),
        None => "cannot verify the URL because it does not contain a query string".to_owned(),
    }
}
