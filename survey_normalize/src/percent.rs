// Decoding of coverage percentage answers.

/// Decodes a percentage answer that may be a bare number or a `low_high`
/// range string such as `"25_50"`.
///
/// Ranges report their maximum, not the midpoint: surveyors record the band
/// they observed and downstream validation works with the upper bound.
/// Absent or unparsable answers are 0.
pub fn parse_percentage(value: Option<&str>) -> f64 {
    let s = match value {
        Some(s) => s.trim(),
        None => return 0.0,
    };
    if let Some((low, high)) = s.split_once('_') {
        if !high.contains('_') && low.parse::<f64>().is_ok() {
            if let Ok(h) = high.parse::<f64>() {
                return h;
            }
        }
    }
    s.parse::<f64>().unwrap_or(0.0)
}

/// A plain numeric answer with no range encoding. Used by the repeated-group
/// forms, which store a single maximum-value field.
pub fn parse_number(value: Option<&str>) -> f64 {
    value
        .and_then(|s| s.trim().parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// Call-site policy layered on top of the parser: prefer the maximum field,
/// fall back to the minimum one, else 0. A maximum that parses to 0 counts
/// as missing, matching the historical transformation behavior.
pub fn resolve_range_pair(min: Option<&str>, max: Option<&str>) -> f64 {
    let m = parse_percentage(max);
    if m != 0.0 {
        return m;
    }
    parse_percentage(min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_reports_maximum() {
        assert_eq!(parse_percentage(Some("25_50")), 50.0);
        assert_eq!(parse_percentage(Some("0_10")), 10.0);
        assert_eq!(parse_percentage(Some("2.5_7.5")), 7.5);
    }

    #[test]
    fn bare_numbers() {
        assert_eq!(parse_percentage(Some("60")), 60.0);
        assert_eq!(parse_percentage(Some("45.5")), 45.5);
    }

    #[test]
    fn garbage_is_zero() {
        assert_eq!(parse_percentage(None), 0.0);
        assert_eq!(parse_percentage(Some("")), 0.0);
        assert_eq!(parse_percentage(Some("a_b")), 0.0);
        assert_eq!(parse_percentage(Some("10_20_30")), 0.0);
        assert_eq!(parse_percentage(Some("n/a")), 0.0);
    }

    #[test]
    fn pair_prefers_max_then_min() {
        assert_eq!(resolve_range_pair(Some("10_25"), Some("50_75")), 75.0);
        assert_eq!(resolve_range_pair(Some("10_25"), None), 25.0);
        assert_eq!(resolve_range_pair(Some("10_25"), Some("0")), 25.0);
        assert_eq!(resolve_range_pair(None, None), 0.0);
    }

    #[test]
    fn plain_numbers_have_no_range_decoding() {
        assert_eq!(parse_number(Some("60")), 60.0);
        assert_eq!(parse_number(Some("25_50")), 0.0);
        assert_eq!(parse_number(None), 0.0);
    }
}
