/// Calculator Kernel: Numeric Text Primitives
///
/// Display values are text. These are the only conversions between
/// text and f64 used by the kernel:
///   - `parse_float`: lenient prefix parse, NaN when nothing parses
///   - `to_display_string`: shortest round-trip rendering
///   - `to_fixed` / `to_exponential`: exact rounding, ties away from zero

/// Fraction digits needed to print any finite f64 exactly.
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Values at or above this magnitude are never written in fixed notation.
const FIXED_NOTATION_LIMIT: f64 = 1e21;

/// Parse the longest numeric prefix of `text`.
///
/// Accepts leading whitespace, an optional sign, digits with an optional
/// fraction and exponent, or `Infinity`. Anything else yields NaN.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if bytes[0] == b'-' {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    end = skip_digits(bytes, end);
    let mut mantissa_digits = end - int_start;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = skip_digits(bytes, end + 1);
        let frac_digits = frac_end - (end + 1);
        if mantissa_digits + frac_digits > 0 {
            end = frac_end;
            mantissa_digits += frac_digits;
        }
    }
    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let digits_end = skip_digits(bytes, exp_end);
        if digits_end > exp_end {
            end = digits_end;
        }
    }

    s[..end].parse::<f64>().unwrap_or(f64::NAN)
}

/// Render `value` with the fewest digits that round-trip.
///
/// Plain notation for decimal exponents in (-7, 21), `d.ddde±x` outside.
/// `-0` renders as "0".
pub fn to_display_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value < 0.0 {
        return format!("-{}", to_display_string(-value));
    }

    let (digits, point) = shortest_digits(value);
    let k = digits.len() as i32;

    if k <= point && point <= 21 {
        format!("{}{}", digits, "0".repeat((point - k) as usize))
    } else if 0 < point && point <= 21 {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{}.{}", int_part, frac_part)
    } else if -6 < point && point <= 0 {
        format!("0.{}{}", "0".repeat((-point) as usize), digits)
    } else {
        exponent_notation(&digits, point - 1)
    }
}

/// Fixed notation with exactly `fraction_digits` digits after the point.
pub fn to_fixed(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() || value.abs() >= FIXED_NOTATION_LIMIT {
        return to_display_string(value);
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));

    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(fraction_digits))
        .map(|b| b - b'0')
        .collect();
    if frac_part.as_bytes().get(fraction_digits).is_some_and(|&b| b >= b'5') {
        increment_digits(&mut digits);
    }

    let int_len = digits.len() - fraction_digits;
    let mut out = String::with_capacity(digits.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    out.extend(digits[..int_len].iter().map(|d| char::from(b'0' + d)));
    if fraction_digits > 0 {
        out.push('.');
        out.extend(digits[int_len..].iter().map(|d| char::from(b'0' + d)));
    }
    out
}

/// Exponential notation with `fraction_digits` digits after the point.
pub fn to_exponential(value: f64, fraction_digits: usize) -> String {
    if !value.is_finite() {
        return to_display_string(value);
    }
    let sign = if value < 0.0 { "-" } else { "" };
    if value == 0.0 {
        let zeros = "0".repeat(fraction_digits);
        return if fraction_digits > 0 {
            format!("0.{}e+0", zeros)
        } else {
            "0e+0".to_string()
        };
    }

    let exact = format!("{:.*}", EXACT_FRACTION_DIGITS, value.abs());
    let int_len = exact.find('.').unwrap_or(exact.len());
    let all: Vec<u8> = exact.bytes().filter(u8::is_ascii_digit).map(|b| b - b'0').collect();
    let first = all.iter().position(|&d| d != 0).unwrap_or(0);
    let mut exponent = int_len as i32 - 1 - first as i32;

    let significant = &all[first..];
    let wanted = fraction_digits + 1;
    let mut digits: Vec<u8> = significant.iter().copied().take(wanted).collect();
    digits.resize(wanted, 0);
    if significant.get(wanted).is_some_and(|&d| d >= 5) {
        increment_digits(&mut digits);
        if digits.len() > wanted {
            digits.truncate(wanted);
            exponent += 1;
        }
    }

    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    format!("{}{}", sign, exponent_notation(&text, exponent))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn skip_digits(bytes: &[u8], mut idx: usize) -> usize {
    while bytes.get(idx).is_some_and(u8::is_ascii_digit) {
        idx += 1;
    }
    idx
}

/// Shortest significant digits of a positive finite value and the position
/// of the decimal point relative to them (`value = 0.digits × 10^point`).
fn shortest_digits(value: f64) -> (String, i32) {
    let sci = format!("{:e}", value);
    let (mantissa, exp) = sci.split_once('e').unwrap_or((sci.as_str(), "0"));
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let exp: i32 = exp.parse().unwrap_or(0);
    (digits, exp + 1)
}

/// `d[.ddd]e±x`, dropping the point for a single digit.
fn exponent_notation(digits: &str, exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    let (lead, rest) = digits.split_at(1);
    if rest.is_empty() {
        format!("{}e{}{}", lead, sign, exponent.abs())
    } else {
        format!("{}.{}e{}{}", lead, rest, sign, exponent.abs())
    }
}

/// Add one unit in the last place, growing on carry-out.
fn increment_digits(digits: &mut Vec<u8>) {
    for d in digits.iter_mut().rev() {
        if *d == 9 {
            *d = 0;
        } else {
            *d += 1;
            return;
        }
    }
    digits.insert(0, 1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_prefixes() {
        assert_eq!(parse_float("42"), 42.0);
        assert_eq!(parse_float("-5"), -5.0);
        assert_eq!(parse_float("0."), 0.0);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("  3.25abc"), 3.25);
        assert_eq!(parse_float("1.5e+3"), 1500.0);
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_float_rejects_non_numeric() {
        assert!(parse_float("Error: division by zero").is_nan());
        assert!(parse_float("").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float(".").is_nan());
    }

    #[test]
    fn test_display_string_plain() {
        assert_eq!(to_display_string(10.0), "10");
        assert_eq!(to_display_string(-0.0), "0");
        assert_eq!(to_display_string(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(to_display_string(0.000001), "0.000001");
        assert_eq!(to_display_string(1e20), "100000000000000000000");
    }

    #[test]
    fn test_display_string_exponential() {
        assert_eq!(to_display_string(1e21), "1e+21");
        assert_eq!(to_display_string(1.5e-7), "1.5e-7");
        assert_eq!(to_display_string(-2.5e300), "-2.5e+300");
        assert_eq!(to_display_string(f64::NAN), "NaN");
    }

    #[test]
    fn test_to_fixed_rounds_half_away_from_zero() {
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(-2.5, 0), "-3");
        assert_eq!(to_fixed(0.125, 2), "0.13");
        assert_eq!(to_fixed(9.995, 2), "9.99"); // 9.995 is stored below the tie
        assert_eq!(to_fixed(99.5, 0), "100");
        assert_eq!(to_fixed(1.0, 3), "1.000");
    }

    #[test]
    fn test_to_exponential() {
        assert_eq!(to_exponential(123456.0, 2), "1.23e+5");
        assert_eq!(to_exponential(9.99, 1), "1.0e+1");
        assert_eq!(to_exponential(0.00015, 1), "1.5e-4");
        assert_eq!(to_exponential(-1e300, 3), "-1.000e+300");
        assert_eq!(to_exponential(0.0, 2), "0.00e+0");
    }
}
