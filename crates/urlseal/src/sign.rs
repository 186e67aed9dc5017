//! URL signing.
//!
//! [`Signer`] implements the signing pipeline:
//!
//! 1. Parse the URL into components.
//! 2. Strip any existing signature/timeout parameters so that re-signing an
//!    already-signed URL is idempotent.
//! 3. If a timeout was given, resolve it to a unix timestamp, reject it when
//!    it lies in the past, and append it under the configured timeout key.
//! 4. Compute the signature: an HMAC over the URL rebuilt from only the
//!    configured parts, with the query in canonical (sorted) form.
//! 5. Append the signature under the configured signature key, last.
//! 6. Rebuild and return the full URL.
//!
//! The original query parameters keep their order in the output; only the
//! hash input is canonicalized. Signing without a timeout is deterministic,
//! and the output always verifies under the same configuration.

use chrono::Utc;
use tracing::debug;

use crate::algorithm::hmac_hex;
use crate::canonical::{build_pairs, canonical_query, parse_pairs, remove_key};
use crate::config::{HashConfiguration, UrlPart};
use crate::error::{SignError, TimeoutError};
use crate::timeout::Timeout;
use crate::uri::UrlComponents;
use crate::verify::Verifier;

/// The clock used unless one is injected: current unix time.
pub(crate) fn system_clock() -> i64 {
    Utc::now().timestamp()
}

/// Signs URLs under a [`HashConfiguration`].
#[derive(Debug, Clone)]
pub struct Signer {
    config: HashConfiguration,
    clock: fn() -> i64,
}

impl Signer {
    /// Create a signer using the system clock.
    #[must_use]
    pub fn new(config: HashConfiguration) -> Self {
        Self {
            config,
            clock: system_clock,
        }
    }

    /// Create a signer with an injected clock (unix seconds). Used to make
    /// expiry behavior deterministic in tests.
    #[must_use]
    pub fn with_clock(config: HashConfiguration, clock: fn() -> i64) -> Self {
        Self { config, clock }
    }

    /// The signer's configuration.
    #[must_use]
    pub fn config(&self) -> &HashConfiguration {
        &self.config
    }

    /// Create a verifier carrying a copy of this signer's configuration and
    /// clock.
    #[must_use]
    pub fn verifier(&self) -> Verifier {
        Verifier::with_clock(self.config.clone(), self.clock)
    }

    /// Sign a URL without an expiry; the signature is valid indefinitely.
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidUrl`] when the URL cannot be parsed.
    pub fn sign(&self, url: &str) -> Result<String, SignError> {
        self.sign_inner(url, None)
    }

    /// Sign a URL with an expiry.
    ///
    /// The timeout may be a unix timestamp, a `DateTime<Utc>`, or a date
    /// expression string (see [`Timeout`]).
    ///
    /// # Errors
    ///
    /// Returns [`SignError::InvalidUrl`] when the URL cannot be parsed, and
    /// [`SignError::Timeout`] when the timeout cannot be resolved or lies in
    /// the past.
    pub fn sign_with_timeout(
        &self,
        url: &str,
        timeout: impl Into<Timeout>,
    ) -> Result<String, SignError> {
        self.sign_inner(url, Some(timeout.into()))
    }

    fn sign_inner(&self, url: &str, timeout: Option<Timeout>) -> Result<String, SignError> {
        let mut components = UrlComponents::parse(url)?;
        let mut pairs = parse_pairs(components.query.as_deref().unwrap_or(""));
        remove_key(&mut pairs, self.config.signature_key());
        remove_key(&mut pairs, self.config.timeout_key());

        if let Some(timeout) = timeout {
            let now = (self.clock)();
            let timestamp = timeout.resolve(now)?;
            if timestamp < now {
                return Err(TimeoutError::InPast {
                    timeout: timestamp,
                    now,
                }
                .into());
            }
            pairs.push((
                self.config.timeout_key().to_owned(),
                Some(timestamp.to_string()),
            ));
        }

        components.query = build_pairs(&pairs);
        let signature = signature_for(&self.config, &components);
        debug!(url, signature, "signed URL");

        pairs.push((self.config.signature_key().to_owned(), Some(signature)));
        components.query = build_pairs(&pairs);
        Ok(components.build())
    }
}

/// Compute the signature over the parts of `components` selected by the
/// configuration.
///
/// The hash input is a mini-URL rebuilt from only the selected parts. An
/// excluded part contributes nothing (`None`, or an empty path); an included
/// query is canonicalized first and omitted entirely when empty, so a
/// query-less URL never hashes a dangling `?`.
///
/// Shared by [`Signer`] and [`Verifier`] so both sides derive byte-identical
/// hash input.
pub(crate) fn signature_for(config: &HashConfiguration, components: &UrlComponents) -> String {
    let parts = config.parts();
    let selected = UrlComponents {
        scheme: filtered(parts.contains(UrlPart::Scheme), &components.scheme),
        userinfo: filtered(parts.contains(UrlPart::Userinfo), &components.userinfo),
        host: filtered(parts.contains(UrlPart::Host), &components.host),
        port: components.port.filter(|_| parts.contains(UrlPart::Port)),
        path: if parts.contains(UrlPart::Path) {
            components.path.clone()
        } else {
            String::new()
        },
        query: if parts.contains(UrlPart::Query) {
            components.query.as_deref().and_then(canonical_query)
        } else {
            None
        },
        fragment: filtered(parts.contains(UrlPart::Fragment), &components.fragment),
    };

    let payload = selected.build();
    debug!(payload, "canonical signature payload");
    hmac_hex(config.algorithm(), &payload, config.key().as_bytes())
}

fn filtered(included: bool, value: &Option<String>) -> Option<String> {
    if included { value.clone() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ComponentSet;

    fn path_query_signer() -> Signer {
        let mut config = HashConfiguration::new("secure-key");
        config.set_parts(ComponentSet::of(&[UrlPart::Path, UrlPart::Query]));
        Signer::new(config)
    }

    #[test]
    fn test_should_sign_root_path_with_known_vector() {
        let signer = Signer::new(HashConfiguration::new("secure-key"));
        assert_eq!(
            signer.sign("/").unwrap(),
            "/?_signature=d603a7eee64f1e0f9bc9388a7fdf18ebddab6c5676220b613a7f6f3c90a9ebfc"
        );
    }

    #[test]
    fn test_should_hash_only_selected_parts() {
        // Path+query scope: the host never enters the hash input.
        let signer = path_query_signer();
        let signed = signer.sign("https://example.com/test").unwrap();
        assert!(signed.contains(
            "_signature=fbdd0b5c0d62dd16deb3111bf81fa97d31441b8fa369aa250819f42caafdbd40"
        ));

        let signed = signer.sign("https://example.com/foo/bar?qux=pax").unwrap();
        assert!(signed.contains(
            "_signature=0a186b0712502fa25c85acc7c563f7fe9c9e2fdbd73e2de5897fc79eb1b05c5e"
        ));
    }

    #[test]
    fn test_should_canonicalize_query_for_hash_input() {
        // "qux&baz=bar" hashes as the sorted form "baz=bar&qux=".
        let signer = path_query_signer();
        let signed = signer.sign("https://example.com/foo?qux&baz=bar").unwrap();
        assert!(signed.contains(
            "_signature=cc4f0cc4cb1041ff08c8c38b26bf6795a50c382fecad3280875dc3a44876dacf"
        ));
        // The original parameter order is kept in the output.
        assert!(signed.starts_with("https://example.com/foo?qux&baz=bar&_signature="));
    }

    #[test]
    fn test_should_produce_identical_signature_for_any_query_order() {
        let signer = path_query_signer();
        let a = extract_signature(&signer.sign("/foo?a=1&b=2").unwrap());
        let b = extract_signature(&signer.sign("/foo?b=2&a=1").unwrap());
        assert_eq!(a, b);
    }

    #[test]
    fn test_should_ignore_fragment_under_default_parts() {
        let signer = path_query_signer();
        let plain = extract_signature(&signer.sign("/foo?qux&baz=bar").unwrap());
        let with_fragment = extract_signature(&signer.sign("/foo?qux&baz=bar#fragment").unwrap());
        assert_eq!(plain, with_fragment);
    }

    #[test]
    fn test_should_ignore_scheme_under_default_parts() {
        let signer = Signer::new(HashConfiguration::new("secure-key"));
        let http = extract_signature(&signer.sign("http://www.example.com/foo").unwrap());
        let https = extract_signature(&signer.sign("https://www.example.com/foo").unwrap());
        assert_eq!(http, https);
    }

    #[test]
    fn test_should_distinguish_schemes_when_scheme_is_hashed() {
        let mut config = HashConfiguration::new("secure-key");
        config.set_parts(ComponentSet::of(&[UrlPart::Scheme, UrlPart::Path]));
        let signer = Signer::new(config);
        let http = extract_signature(&signer.sign("http://www.example.com/foo").unwrap());
        let https = extract_signature(&signer.sign("https://www.example.com/foo").unwrap());
        assert_ne!(http, https);
    }

    #[test]
    fn test_should_sign_deterministically_without_timeout() {
        let signer = Signer::new(HashConfiguration::new("42"));
        let url = "https://www.example.com/?foo=bar&qux=1234";
        assert_eq!(signer.sign(url).unwrap(), signer.sign(url).unwrap());
    }

    #[test]
    fn test_should_keep_original_query_and_append_signature() {
        let signer = Signer::new(HashConfiguration::new("42"));
        let signed = signer.sign("https://www.example.com/?foo=bar&qux=1234").unwrap();
        assert!(signed.starts_with("https://www.example.com/?foo=bar&qux=1234&_signature="));
    }

    #[test]
    fn test_should_re_sign_idempotently() {
        let signer = Signer::new(HashConfiguration::new("42"));
        let signed = signer.sign("https://www.example.com/?foo=bar").unwrap();
        assert_eq!(signer.sign(&signed).unwrap(), signed);
    }

    #[test]
    fn test_should_replace_timeout_when_re_signing() {
        let signer = Signer::with_clock(HashConfiguration::new("42"), || 1_700_000_000);
        let first = signer.sign_with_timeout("/foo", 1_700_000_042).unwrap();
        let second = signer.sign_with_timeout(&first, 1_700_000_600).unwrap();

        assert!(first.contains("_expires=1700000042"));
        assert!(second.contains("_expires=1700000600"));
        assert!(!second.contains("_expires=1700000042"));
        assert_ne!(
            extract_signature(&first),
            extract_signature(&second),
            "a new timeout must produce a new signature"
        );
    }

    #[test]
    fn test_should_append_timeout_before_signature() {
        let signer = Signer::with_clock(HashConfiguration::new("42"), || 1_700_000_000);
        let signed = signer.sign_with_timeout("/", "+42 seconds").unwrap();
        let expires = signed.find("_expires=1700000042").expect("timeout in query");
        let signature = signed.find("_signature=").expect("signature in query");
        assert!(expires < signature);
    }

    #[test]
    fn test_should_reject_timeout_in_past() {
        let signer = Signer::with_clock(HashConfiguration::new("42"), || 1_700_000_000);
        for timeout in [
            Timeout::At(1_699_999_999),
            Timeout::from("-10 seconds"),
            Timeout::from("2001-10-10 10:10:10"),
        ] {
            assert!(matches!(
                signer.sign_with_timeout("/", timeout),
                Err(SignError::Timeout(TimeoutError::InPast { .. }))
            ));
        }
    }

    #[test]
    fn test_should_reject_unparsable_timeout() {
        let signer = Signer::new(HashConfiguration::new("42"));
        assert!(matches!(
            signer.sign_with_timeout("/", "qux"),
            Err(SignError::Timeout(TimeoutError::NotParsable(_)))
        ));
    }

    #[test]
    fn test_should_reject_invalid_url() {
        let signer = Signer::new(HashConfiguration::new("42"));
        assert!(matches!(signer.sign(""), Err(SignError::InvalidUrl(_))));
    }

    fn extract_signature(signed: &str) -> String {
        let start = signed.find("_signature=").expect("signature in query") + "_signature=".len();
        signed[start..]
            .chars()
            .take_while(|c| c.is_ascii_hexdigit())
            .collect()
    }
}
