//! Display formatting shared by the dashboard payloads.

/// Format a ratio as a percentage with at most two decimal places.
///
/// The value is truncated, not rounded, and trailing zeros are dropped:
/// `0.99` gives `"99"`, `0.9937` gives `"99.37"`, `0.995` gives `"99.5"`.
pub fn percent(value: f64) -> String {
    // Ten-decimal stabilization first, so binary artifacts like
    // 0.99 * 100 = 99.00000000000001 do not leak into the display.
    let scaled = format!("{:.10}", value * 100.0);
    let (int_part, frac) = match scaled.split_once('.') {
        Some(parts) => parts,
        None => return scaled,
    };
    let kept = &frac[..frac.len().min(2)];
    let kept = kept.trim_end_matches('0');
    if kept.is_empty() {
        int_part.to_string()
    } else {
        format!("{}.{}", int_part, kept)
    }
}

/// Group a count into thousands: `1234567` gives `"1,234,567"`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_drops_trailing_zeros() {
        assert_eq!(percent(0.99), "99");
        assert_eq!(percent(1.0), "100");
        assert_eq!(percent(0.0), "0");
        assert_eq!(percent(0.995), "99.5");
    }

    #[test]
    fn test_percent_truncates_to_two_decimals() {
        assert_eq!(percent(0.9937), "99.37");
        assert_eq!(percent(0.98765), "98.76");
        assert_eq!(percent(0.99999), "99.99");
    }

    #[test]
    fn test_percent_small_values() {
        assert_eq!(percent(0.0001), "0.01");
        assert_eq!(percent(0.00001), "0");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
        assert_eq!(group_thousands(45_000_000), "45,000,000");
    }
}
