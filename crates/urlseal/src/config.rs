//! Signing configuration: which URL parts are hashed, under which query keys
//! the signature and timeout travel, and with which algorithm.

use crate::algorithm::HashAlgorithm;
use crate::error::ConfigError;

/// One of the seven URL parts a hash can cover.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlPart {
    /// The URL scheme (`https`).
    Scheme,
    /// The `user:password` part of the authority.
    Userinfo,
    /// The host name.
    Host,
    /// The port.
    Port,
    /// The path.
    Path,
    /// The query string.
    Query,
    /// The fragment.
    Fragment,
}

/// A named set of URL parts.
///
/// This is the single flag representation used everywhere: signing defaults
/// to host, path, and query; fingerprinting defaults to all seven parts.
///
/// # Examples
///
/// ```
/// use urlseal::config::{ComponentSet, UrlPart};
///
/// let parts = ComponentSet::signing_default().with(UrlPart::Scheme);
/// assert!(parts.contains(UrlPart::Scheme));
/// assert!(parts.contains(UrlPart::Path));
/// assert!(!parts.contains(UrlPart::Fragment));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComponentSet {
    scheme: bool,
    userinfo: bool,
    host: bool,
    port: bool,
    path: bool,
    query: bool,
    fragment: bool,
}

impl ComponentSet {
    /// The empty set.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            scheme: false,
            userinfo: false,
            host: false,
            port: false,
            path: false,
            query: false,
            fragment: false,
        }
    }

    /// All seven parts.
    #[must_use]
    pub const fn all() -> Self {
        Self {
            scheme: true,
            userinfo: true,
            host: true,
            port: true,
            path: true,
            query: true,
            fragment: true,
        }
    }

    /// The default signing scope: host, path, and query.
    ///
    /// Scheme and fragment are excluded so that a signed link survives
    /// protocol upgrades and anchor navigation.
    #[must_use]
    pub const fn signing_default() -> Self {
        Self::empty()
            .with(UrlPart::Host)
            .with(UrlPart::Path)
            .with(UrlPart::Query)
    }

    /// Build a set from a list of parts.
    #[must_use]
    pub fn of(parts: &[UrlPart]) -> Self {
        parts.iter().fold(Self::empty(), |set, part| set.with(*part))
    }

    /// Return this set with `part` included.
    #[must_use]
    pub const fn with(self, part: UrlPart) -> Self {
        let mut set = self;
        match part {
            UrlPart::Scheme => set.scheme = true,
            UrlPart::Userinfo => set.userinfo = true,
            UrlPart::Host => set.host = true,
            UrlPart::Port => set.port = true,
            UrlPart::Path => set.path = true,
            UrlPart::Query => set.query = true,
            UrlPart::Fragment => set.fragment = true,
        }
        set
    }

    /// Return this set with `part` excluded.
    #[must_use]
    pub const fn without(self, part: UrlPart) -> Self {
        let mut set = self;
        match part {
            UrlPart::Scheme => set.scheme = false,
            UrlPart::Userinfo => set.userinfo = false,
            UrlPart::Host => set.host = false,
            UrlPart::Port => set.port = false,
            UrlPart::Path => set.path = false,
            UrlPart::Query => set.query = false,
            UrlPart::Fragment => set.fragment = false,
        }
        set
    }

    /// Whether `part` is in the set.
    #[must_use]
    pub const fn contains(self, part: UrlPart) -> bool {
        match part {
            UrlPart::Scheme => self.scheme,
            UrlPart::Userinfo => self.userinfo,
            UrlPart::Host => self.host,
            UrlPart::Port => self.port,
            UrlPart::Path => self.path,
            UrlPart::Query => self.query,
            UrlPart::Fragment => self.fragment,
        }
    }

    /// The union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self {
            scheme: self.scheme || other.scheme,
            userinfo: self.userinfo || other.userinfo,
            host: self.host || other.host,
            port: self.port || other.port,
            path: self.path || other.path,
            query: self.query || other.query,
            fragment: self.fragment || other.fragment,
        }
    }
}

impl FromIterator<UrlPart> for ComponentSet {
    fn from_iter<I: IntoIterator<Item = UrlPart>>(iter: I) -> Self {
        iter.into_iter().fold(Self::empty(), Self::with)
    }
}

/// Configuration shared by a [`Signer`](crate::sign::Signer) and its paired
/// [`Verifier`](crate::verify::Verifier).
///
/// The signature and timeout query keys must differ; this is checked at
/// construction and by every mutator, so an inconsistent configuration can
/// never reach the signing pipeline.
#[derive(Debug, Clone)]
pub struct HashConfiguration {
    key: String,
    signature_key: String,
    timeout_key: String,
    parts: ComponentSet,
    algorithm: HashAlgorithm,
}

impl HashConfiguration {
    /// The query key the signature is stored under by default.
    pub const DEFAULT_SIGNATURE_KEY: &'static str = "_signature";
    /// The query key the expiry timestamp is stored under by default.
    pub const DEFAULT_TIMEOUT_KEY: &'static str = "_expires";

    /// Create a configuration with default keys, parts, and algorithm.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            signature_key: Self::DEFAULT_SIGNATURE_KEY.to_owned(),
            timeout_key: Self::DEFAULT_TIMEOUT_KEY.to_owned(),
            parts: ComponentSet::signing_default(),
            algorithm: HashAlgorithm::default(),
        }
    }

    /// Create a configuration with explicit signature and timeout keys.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IdenticalKeys`] when both keys are equal.
    pub fn with_keys(
        key: impl Into<String>,
        signature_key: impl Into<String>,
        timeout_key: impl Into<String>,
    ) -> Result<Self, ConfigError> {
        let signature_key = signature_key.into();
        let timeout_key = timeout_key.into();
        if signature_key == timeout_key {
            return Err(ConfigError::IdenticalKeys { key: signature_key });
        }
        Ok(Self {
            key: key.into(),
            signature_key,
            timeout_key,
            parts: ComponentSet::signing_default(),
            algorithm: HashAlgorithm::default(),
        })
    }

    /// The secret HMAC key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Replace the secret HMAC key.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// The query key the signature travels under.
    #[must_use]
    pub fn signature_key(&self) -> &str {
        &self.signature_key
    }

    /// Replace the signature query key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IdenticalKeys`] if it would collide with the
    /// timeout key.
    pub fn set_signature_key(&mut self, key: impl Into<String>) -> Result<(), ConfigError> {
        let key = key.into();
        if key == self.timeout_key {
            return Err(ConfigError::IdenticalKeys { key });
        }
        self.signature_key = key;
        Ok(())
    }

    /// The query key the expiry timestamp travels under.
    #[must_use]
    pub fn timeout_key(&self) -> &str {
        &self.timeout_key
    }

    /// Replace the timeout query key.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::IdenticalKeys`] if it would collide with the
    /// signature key.
    pub fn set_timeout_key(&mut self, key: impl Into<String>) -> Result<(), ConfigError> {
        let key = key.into();
        if key == self.signature_key {
            return Err(ConfigError::IdenticalKeys { key });
        }
        self.timeout_key = key;
        Ok(())
    }

    /// The URL parts covered by the signature.
    #[must_use]
    pub fn parts(&self) -> ComponentSet {
        self.parts
    }

    /// Replace the set of URL parts covered by the signature.
    pub fn set_parts(&mut self, parts: ComponentSet) {
        self.parts = parts;
    }

    /// The HMAC algorithm.
    #[must_use]
    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Replace the HMAC algorithm.
    pub fn set_algorithm(&mut self, algorithm: HashAlgorithm) {
        self.algorithm = algorithm;
    }
}
