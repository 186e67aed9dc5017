//! Timeout inputs for signed URLs.
//!
//! A signing timeout may arrive as a unix timestamp, a [`DateTime`], or a
//! date expression string. Expressions are parsed permissively, in order:
//!
//! ```text
//! "1893492672"            bare epoch seconds
//! "+42 seconds"           relative offset (also "in 2 hours", "-10 seconds")
//! "2035-10-10T10:10:10Z"  RFC 3339
//! "Wed, 10 Oct 2035 10:10:10 +0000"  RFC 2822
//! "2035-10-10 10:10:10"   naive date-time, interpreted as UTC
//! "10.10.2035 10:10:10"   day-first date-time, interpreted as UTC
//! "2035-10-10"            bare date, midnight UTC
//! ```
//!
//! Whether the resolved timestamp lies in the past is checked by the caller
//! against its injected clock, after parsing, so a parseable-but-past
//! expression is rejected as in-the-past rather than unparsable.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

use crate::error::TimeoutError;

/// A timeout input for [`Signer::sign_with_timeout`](crate::sign::Signer::sign_with_timeout).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timeout {
    /// An absolute unix timestamp, used as-is.
    At(i64),
    /// A date-time value; its epoch seconds are used.
    Date(DateTime<Utc>),
    /// A date expression, parsed permissively (see module docs).
    Expr(String),
}

impl From<i64> for Timeout {
    fn from(timestamp: i64) -> Self {
        Self::At(timestamp)
    }
}

impl From<DateTime<Utc>> for Timeout {
    fn from(date: DateTime<Utc>) -> Self {
        Self::Date(date)
    }
}

impl From<&str> for Timeout {
    fn from(expr: &str) -> Self {
        Self::Expr(expr.to_owned())
    }
}

impl From<String> for Timeout {
    fn from(expr: String) -> Self {
        Self::Expr(expr)
    }
}

impl Timeout {
    /// Resolve this input to a unix timestamp. Relative expressions are
    /// anchored at `now`.
    ///
    /// # Errors
    ///
    /// Returns [`TimeoutError::UnknownFormat`] for a blank expression and
    /// [`TimeoutError::NotParsable`] for one that matches no supported
    /// format. Past timestamps are not rejected here.
    pub fn resolve(&self, now: i64) -> Result<i64, TimeoutError> {
        match self {
            Self::At(timestamp) => Ok(*timestamp),
            Self::Date(date) => Ok(date.timestamp()),
            Self::Expr(expr) => parse_expr(expr, now),
        }
    }
}

fn parse_expr(expr: &str, now: i64) -> Result<i64, TimeoutError> {
    let trimmed = expr.trim();
    if trimmed.is_empty() {
        return Err(TimeoutError::UnknownFormat(expr.to_owned()));
    }

    if trimmed.chars().all(|c| c.is_ascii_digit()) {
        return trimmed
            .parse::<i64>()
            .map_err(|_| TimeoutError::NotParsable(expr.to_owned()));
    }

    if let Some(timestamp) = parse_relative(trimmed, now) {
        return Ok(timestamp);
    }

    if let Ok(date) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(date.timestamp());
    }
    if let Ok(date) = DateTime::parse_from_rfc2822(trimmed) {
        return Ok(date.timestamp());
    }
    for format in ["%Y-%m-%d %H:%M:%S", "%d.%m.%Y %H:%M:%S"] {
        if let Ok(date) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(date.and_utc().timestamp());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc().timestamp());
    }

    Err(TimeoutError::NotParsable(expr.to_owned()))
}

/// Parse relative offsets such as `+42 seconds`, `in 2 hours`, `-1 day`.
fn parse_relative(expr: &str, now: i64) -> Option<i64> {
    let rest = expr.strip_prefix("in ").unwrap_or(expr);
    let (sign, rest) = match rest.strip_prefix('+') {
        Some(rest) => (1, rest),
        None => match rest.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, rest),
        },
    };

    let (amount, unit) = rest.trim().split_once(char::is_whitespace)?;
    let amount: i64 = amount.parse().ok()?;
    let unit_seconds = match unit.trim() {
        "second" | "seconds" | "sec" | "secs" | "s" => 1,
        "minute" | "minutes" | "min" | "mins" => 60,
        "hour" | "hours" | "hr" | "hrs" => 3600,
        "day" | "days" => 86_400,
        "week" | "weeks" => 604_800,
        _ => return None,
    };

    Some(now + sign * amount * unit_seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    const NOW: i64 = 1_700_000_000;

    #[test]
    fn test_should_pass_through_absolute_timestamp() {
        assert_eq!(Timeout::At(1_893_492_672).resolve(NOW).unwrap(), 1_893_492_672);
        assert_eq!(Timeout::from(42_i64).resolve(NOW).unwrap(), 42);
    }

    #[test]
    fn test_should_resolve_date_time_value() {
        let date = DateTime::parse_from_rfc3339("2035-10-10T10:10:10+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(Timeout::from(date).resolve(NOW).unwrap(), 2_075_616_610);
    }

    #[test]
    fn test_should_resolve_relative_expressions() {
        assert_eq!(Timeout::from("+42 seconds").resolve(NOW).unwrap(), NOW + 42);
        assert_eq!(Timeout::from("in 2 hours").resolve(NOW).unwrap(), NOW + 7200);
        assert_eq!(Timeout::from("-10 seconds").resolve(NOW).unwrap(), NOW - 10);
        assert_eq!(Timeout::from("10 minutes").resolve(NOW).unwrap(), NOW + 600);
        assert_eq!(Timeout::from("+1 week").resolve(NOW).unwrap(), NOW + 604_800);
    }

    #[test]
    fn test_should_resolve_absolute_expressions() {
        assert_eq!(
            Timeout::from("2035-10-10T10:10:10+02:00").resolve(NOW).unwrap(),
            2_075_616_610
        );
        assert_eq!(
            Timeout::from("10.10.2035 10:10:10").resolve(NOW).unwrap(),
            2_075_623_810
        );
        assert_eq!(
            Timeout::from("2035-10-10 10:10:10").resolve(NOW).unwrap(),
            2_075_623_810
        );
        // Bare dates resolve to midnight UTC.
        assert_eq!(
            Timeout::from("2035-10-10").resolve(NOW).unwrap(),
            2_075_587_200
        );
        // Bare digit strings are epoch seconds.
        assert_eq!(Timeout::from("1893492672").resolve(NOW).unwrap(), 1_893_492_672);
    }

    #[test]
    fn test_should_reject_unparsable_expression() {
        assert!(matches!(
            Timeout::from("qux").resolve(NOW),
            Err(TimeoutError::NotParsable(_))
        ));
        assert!(matches!(
            Timeout::from("42 fortnights").resolve(NOW),
            Err(TimeoutError::NotParsable(_))
        ));
    }

    #[test]
    fn test_should_reject_blank_expression() {
        assert!(matches!(
            Timeout::from("  ").resolve(NOW),
            Err(TimeoutError::UnknownFormat(_))
        ));
    }
}
