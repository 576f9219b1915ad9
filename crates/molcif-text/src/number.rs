#![forbid(unsafe_code)]

//! Best-effort ASCII number parsing for the tokenizer hot path.
//!
//! These scanners never fail: they read the longest valid prefix of the
//! `[start, end)` range and ignore the rest, so the CIF placeholder tokens
//! `.` and `?` simply parse as zero. Strict validation belongs to callers
//! that want it — see `molcif_columnar::Value` for the column-level coercion
//! policy.

/// Parse a decimal integer from `bytes[start..end]`.
///
/// An optional leading `-` or `+` is honored; scanning stops at the first
/// non-digit. No digits means zero.
pub fn parse_int(bytes: &[u8], start: usize, end: usize) -> i64 {
    let mut i = start;
    let mut sign = 1i64;
    if i < end && (bytes[i] == b'-' || bytes[i] == b'+') {
        if bytes[i] == b'-' {
            sign = -1;
        }
        i += 1;
    }
    let mut value = 0i64;
    while i < end {
        let c = bytes[i].wrapping_sub(b'0');
        if c > 9 {
            break;
        }
        // Wrapping keeps the scanner total even on absurd digit runs; such
        // tokens are garbage either way under the best-effort policy.
        value = value.wrapping_mul(10).wrapping_add(c as i64);
        i += 1;
    }
    sign.wrapping_mul(value)
}

/// Parse a decimal float (optional fraction and `e`/`E` exponent) from
/// `bytes[start..end]`.
///
/// Scanning stops at the first byte that does not continue the number; pure
/// garbage parses as zero.
pub fn parse_float(bytes: &[u8], start: usize, end: usize) -> f64 {
    let mut i = start;
    let mut sign = 1.0f64;
    if i < end && (bytes[i] == b'-' || bytes[i] == b'+') {
        if bytes[i] == b'-' {
            sign = -1.0;
        }
        i += 1;
    }

    let mut whole = 0.0f64;
    while i < end {
        let c = bytes[i].wrapping_sub(b'0');
        if c > 9 {
            break;
        }
        whole = whole * 10.0 + c as f64;
        i += 1;
    }

    let mut value = whole;
    if i < end && bytes[i] == b'.' {
        i += 1;
        let mut fraction = 0.0f64;
        let mut divider = 1.0f64;
        while i < end {
            let c = bytes[i].wrapping_sub(b'0');
            if c > 9 {
                break;
            }
            fraction = fraction * 10.0 + c as f64;
            divider *= 10.0;
            i += 1;
        }
        value += fraction / divider;
    }

    if i < end && (bytes[i] == b'e' || bytes[i] == b'E') {
        let exponent = parse_int(bytes, i + 1, end) as i32;
        value *= 10f64.powi(exponent);
    }

    sign * value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(s: &str) -> i64 {
        parse_int(s.as_bytes(), 0, s.len())
    }

    fn float(s: &str) -> f64 {
        parse_float(s.as_bytes(), 0, s.len())
    }

    #[test]
    fn integers() {
        assert_eq!(int("0"), 0);
        assert_eq!(int("1234"), 1234);
        assert_eq!(int("-56"), -56);
        assert_eq!(int("+7"), 7);
        // Longest valid prefix; placeholders parse as zero.
        assert_eq!(int("12ab"), 12);
        assert_eq!(int("."), 0);
        assert_eq!(int("?"), 0);
    }

    #[test]
    fn floats() {
        assert_eq!(float("1.5"), 1.5);
        assert_eq!(float("-0.25"), -0.25);
        assert_eq!(float("2"), 2.0);
        assert_eq!(float(".5"), 0.5);
        assert_eq!(float("1e3"), 1000.0);
        assert!((float("1.5e-2") - 0.015).abs() < 1e-12);
        assert_eq!(float("-1.25E2"), -125.0);
        assert_eq!(float("?"), 0.0);
    }

    #[test]
    fn sub_ranges_are_respected() {
        let s = b"xx-42.5yy";
        assert_eq!(parse_int(s, 2, 5), -42);
        assert_eq!(parse_float(s, 2, 7), -42.5);
    }
}
