//! Canonical query-string construction.
//!
//! A query string is parsed into an ordered list of key/value pairs which
//! preserves duplicate keys and distinguishes a bare key (`?b`) from a key
//! with an empty value (`?b=`). The canonical form erases that distinction
//! and the original parameter order:
//!
//! ```text
//! parse      "z=1&b&a=2"  ->  [("z", "1"), ("b", -), ("a", "2")]
//! serialize               ->  ["z=1", "b=", "a=2"]
//! sort                    ->  ["a=2", "b=", "z=1"]
//! join                    ->  "a=2&b=&z=1"
//! ```
//!
//! Whole `key=value` strings are sorted bytewise, which both orders distinct
//! keys and deterministically tie-breaks duplicate keys by their values.

/// One query parameter. `None` means the raw pair had no `=` at all.
pub type QueryPair = (String, Option<String>);

/// Split a raw query string into ordered key/value pairs.
///
/// Empty segments (`a=1&&b=2`) are dropped. No percent-decoding is applied;
/// keys and values keep their raw bytes.
#[must_use]
pub fn parse_pairs(query: &str) -> Vec<QueryPair> {
    query
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (key.to_owned(), Some(value.to_owned())),
            None => (segment.to_owned(), None),
        })
        .collect()
}

/// Rebuild a raw query string from pairs, preserving their order and the
/// bare-key/empty-value distinction. Returns `None` when there are no pairs,
/// so a query-less URL stays query-less.
#[must_use]
pub fn build_pairs(pairs: &[QueryPair]) -> Option<String> {
    if pairs.is_empty() {
        return None;
    }
    let rebuilt = pairs
        .iter()
        .map(|(key, value)| match value {
            Some(value) => format!("{key}={value}"),
            None => key.clone(),
        })
        .collect::<Vec<_>>()
        .join("&");
    Some(rebuilt)
}

/// Canonicalize a query string: order-independent, duplicate-preserving,
/// with a trailing `=` for every valueless parameter.
///
/// Returns `None` for an empty query so that "no query" and "empty query"
/// collapse to the same canonical absence.
///
/// # Examples
///
/// ```
/// use urlseal::canonical::canonical_query;
///
/// assert_eq!(canonical_query("z=1&b&a=2").as_deref(), Some("a=2&b=&z=1"));
/// assert_eq!(canonical_query(""), None);
/// ```
#[must_use]
pub fn canonical_query(query: &str) -> Option<String> {
    canonical_query_ignoring(query, &[])
}

/// Like [`canonical_query`], but drops any pair whose key matches an entry
/// of `ignored` before sorting.
///
/// Array-notation keys match their base name: `qux[]`, `qux[2]` and
/// `qux[deep][nest]` are all dropped by ignoring `qux`. Matching is
/// case-sensitive; entries that match nothing are inert.
#[must_use]
pub fn canonical_query_ignoring(query: &str, ignored: &[&str]) -> Option<String> {
    let mut serialized: Vec<String> = parse_pairs(query)
        .into_iter()
        .filter(|(key, _)| !ignored.contains(&base_key(key)))
        .map(|(key, value)| format!("{key}={}", value.unwrap_or_default()))
        .collect();

    if serialized.is_empty() {
        return None;
    }

    serialized.sort_unstable();
    Some(serialized.join("&"))
}

/// Remove every pair stored under `key` (exact raw match).
pub fn remove_key(pairs: &mut Vec<QueryPair>, key: &str) {
    pairs.retain(|(existing, _)| existing != key);
}

/// Look up the first value stored under `key`.
///
/// The outer `Option` is presence of the key; the inner one distinguishes
/// `key=...` from a bare `key`.
#[must_use]
pub fn value_of<'a>(pairs: &'a [QueryPair], key: &str) -> Option<&'a Option<String>> {
    pairs
        .iter()
        .find(|(existing, _)| existing == key)
        .map(|(_, value)| value)
}

/// Strip one trailing array-notation suffix: `bar[2][x]` becomes `bar`.
fn base_key(key: &str) -> &str {
    match key.find('[') {
        Some(index) if key.ends_with(']') => &key[..index],
        _ => key,
    }
}
