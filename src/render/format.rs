/// Formats a ratio for display.
///
/// - `None` prints as `-`
/// - tiny non-zero magnitudes (below `0.0001`) use 4 significant digits in
///   scientific form, e.g. `5.000e-5`
/// - other magnitudes below 1 use 4 fixed decimals, e.g. `0.5000`
/// - everything else is comma-grouped with at most 4 fractional digits,
///   e.g. `1,234.5`
pub fn format_value(value: Option<f64>) -> String {
    let Some(v) = value else {
        return "-".to_string();
    };

    if v.is_nan() {
        return "NaN".to_string();
    }
    if v.is_infinite() {
        return if v > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let magnitude = v.abs();
    if magnitude < 0.0001 && v != 0.0 {
        format!("{:.3e}", v)
    } else if magnitude < 1.0 && v != 0.0 {
        format!("{:.4}", v)
    } else {
        grouped(v)
    }
}

fn grouped(v: f64) -> String {
    let fixed = format!("{:.4}", v.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut out = String::with_capacity(fixed.len() + int_part.len() / 3 + 1);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(digit);
    }
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }

    if v < 0.0 && out != "0" {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_undefined() {
        assert_eq!(format_value(None), "-");
    }

    #[test]
    fn test_tiny_values_use_significant_digits() {
        assert_eq!(format_value(Some(0.00005)), "5.000e-5");
        assert_eq!(format_value(Some(-0.00001234)), "-1.234e-5");
    }

    #[test]
    fn test_fractions_use_four_decimals() {
        assert_eq!(format_value(Some(0.5)), "0.5000");
        assert_eq!(format_value(Some(0.1)), "0.1000");
        assert_eq!(format_value(Some(-0.25)), "-0.2500");
        assert_eq!(format_value(Some(0.0001)), "0.0001");
    }

    #[test]
    fn test_large_values_are_grouped() {
        assert_eq!(format_value(Some(1234.5)), "1,234.5");
        assert_eq!(format_value(Some(10.0)), "10");
        assert_eq!(format_value(Some(1_234_567.123456)), "1,234,567.1235");
        assert_eq!(format_value(Some(-98765.0)), "-98,765");
        assert_eq!(format_value(Some(100.0)), "100");
        assert_eq!(format_value(Some(0.0)), "0");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_value(Some(f64::INFINITY)), "∞");
        assert_eq!(format_value(Some(f64::NAN)), "NaN");
    }
}
