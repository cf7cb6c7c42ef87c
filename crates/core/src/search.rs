//! List-limit handling shared by the query endpoints.

/// Page size used when the caller gives no usable `limit`.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Largest page size a single query may request.
pub const MAX_LIST_LIMIT: i64 = 500;

/// Resolve a raw `limit` query value.
///
/// Only the leading integer is read, so `"2.5"` and `"2abc"` both mean 2.
/// Missing, non-numeric, zero or negative values fall back to `default`
/// instead of erroring; anything above `max` is clamped to `max`.
pub fn clamp_limit(raw: Option<&str>, default: i64, max: i64) -> i64 {
    match raw.and_then(leading_integer) {
        Some(n) if n > 0 => n.min(max),
        _ => default,
    }
}

/// Optional sign followed by at least one ASCII digit, after leading
/// whitespace. Digit runs too long for `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = digits[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn limit(raw: &str) -> i64 {
        clamp_limit(Some(raw), DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT)
    }

    #[test]
    fn missing_limit_uses_default() {
        assert_eq!(clamp_limit(None, DEFAULT_LIST_LIMIT, MAX_LIST_LIMIT), 50);
    }

    #[test]
    fn garbage_and_non_positive_use_default() {
        for raw in ["abc", "", " ", "-", "+", "0", "-3", ".5", "x2"] {
            assert_eq!(limit(raw), 50, "{raw:?}");
        }
    }

    #[test]
    fn valid_limit_passes_through() {
        assert_eq!(limit("2"), 2);
        assert_eq!(limit(" 75 "), 75);
        assert_eq!(limit("+7"), 7);
    }

    #[test]
    fn only_the_leading_integer_counts() {
        assert_eq!(limit("2.5"), 2);
        assert_eq!(limit("2abc"), 2);
        assert_eq!(limit("10,20"), 10);
        assert_eq!(limit("-0.9"), 50);
    }

    #[test]
    fn oversized_limit_is_clamped() {
        assert_eq!(limit("100000"), 500);
        assert_eq!(limit("99999999999999999999999"), 500);
    }
}
