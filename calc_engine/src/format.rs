/// Calculator Kernel: Display Formatter
///
/// Pure function from a number (or numeric text) to display text that
/// fits `MAX_DISPLAY_LENGTH`:
///   1. NaN                                   -> generic error token
///   2. has a point, too long                 -> fixed, fraction rounded to fit
///                                               (budget clamped at zero)
///   3. still too long                        -> exponential, precision 10
///   4. otherwise                             -> unchanged

use crate::number::{parse_float, to_display_string, to_exponential, to_fixed};
use crate::MAX_DISPLAY_LENGTH;

/// Shown whenever a value does not parse as a number.
pub const ERROR_GENERIC: &str = "Error";

/// Mantissa digits used when switching to exponential notation.
pub const EXPONENTIAL_PRECISION: usize = MAX_DISPLAY_LENGTH - 6;

/// Formatter input: a computed value or text already on the display.
#[derive(Debug, Clone, Copy)]
pub enum Numeric<'a> {
    Value(f64),
    Text(&'a str),
}

impl From<f64> for Numeric<'_> {
    fn from(value: f64) -> Self {
        Numeric::Value(value)
    }
}

impl<'a> From<&'a str> for Numeric<'a> {
    fn from(text: &'a str) -> Self {
        Numeric::Text(text)
    }
}

/// Format a number or numeric text for the display.
pub fn format_number<'a>(input: impl Into<Numeric<'a>>) -> String {
    let text = match input.into() {
        Numeric::Value(v) => to_display_string(v),
        Numeric::Text(s) => s.to_string(),
    };

    if text == "NaN" {
        return ERROR_GENERIC.to_string();
    }

    if let Some((int_part, frac_part)) = text.split_once('.') {
        let budget = MAX_DISPLAY_LENGTH as i64 - int_part.len() as i64 - 1;
        if frac_part.len() as i64 > budget {
            let value = parse_float(&text);
            let fixed = to_fixed(value, budget.max(0) as usize);
            if fixed.len() <= MAX_DISPLAY_LENGTH {
                return fixed;
            }
            return exponential_within_budget(value);
        }
    }

    if text.len() > MAX_DISPLAY_LENGTH {
        return exponential_within_budget(parse_float(&text));
    }

    text
}

/// True for any of the sentinel error displays.
pub fn is_error_display(display: &str) -> bool {
    display.starts_with(ERROR_GENERIC)
}

/// Exponential notation, dropping mantissa digits until the text fits.
fn exponential_within_budget(value: f64) -> String {
    if value.is_nan() {
        return ERROR_GENERIC.to_string();
    }
    let mut precision = EXPONENTIAL_PRECISION;
    loop {
        let text = to_exponential(value, precision);
        if text.len() <= MAX_DISPLAY_LENGTH || precision == 0 {
            return text;
        }
        precision -= 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_values_unchanged() {
        assert_eq!(format_number(10.0), "10");
        assert_eq!(format_number(-0.5), "-0.5");
        assert_eq!(format_number("0."), "0.");
        assert_eq!(format_number(1e21), "1e+21");
    }

    #[test]
    fn test_nan_is_error() {
        assert_eq!(format_number(f64::NAN), ERROR_GENERIC);
        assert_eq!(format_number("NaN"), ERROR_GENERIC);
    }

    #[test]
    fn test_long_fraction_is_rounded() {
        assert_eq!(format_number(0.1 + 0.2), "0.30000000000000");
        assert_eq!(format_number(1.0 / 3.0), "0.33333333333333");
        assert_eq!(format_number(2.0 / 3.0), "0.66666666666667");
        assert_eq!(format_number(-1.0 / 3.0), "-0.3333333333333");
        assert_eq!(format_number(123.456789012345678), "123.456789012346");
    }

    #[test]
    fn test_long_integer_goes_exponential() {
        assert_eq!(format_number(12345678901234567.0), "1.2345678901e+16");
        assert_eq!(format_number(1e20), "1.0000000000e+20");
    }

    #[test]
    fn test_exponential_fits_budget_when_negative() {
        let out = format_number(-1e20);
        assert_eq!(out, "-1.000000000e+20");
        assert!(out.len() <= MAX_DISPLAY_LENGTH);

        let huge = format_number(-1.7976931348623157e308);
        assert!(huge.len() <= MAX_DISPLAY_LENGTH, "{}", huge);
    }

    #[test]
    fn test_negative_fraction_budget_clamps_to_integer() {
        // 16-character integer part: no room for any fraction digit.
        assert_eq!(format_number(1234567890123456.8), "1234567890123457");
        assert_eq!(format_number(-123456789012345.6), "-123456789012346");
    }

    #[test]
    fn test_rounding_overflow_goes_exponential() {
        assert_eq!(format_number(99.99999999999999), "1.0000000000e+2");
    }

    #[test]
    fn test_huge_value_with_point_fits() {
        let out = format_number(1.2345678901234567e25);
        assert_eq!(out, "1.2345678901e+25");
    }

    #[test]
    fn test_idempotent_on_output() {
        for v in [0.1 + 0.2, 1e20, -1e20, 1.0 / 7.0, 42.0, 1.5e-9, 98765.4321] {
            let once = format_number(v);
            assert_eq!(format_number(once.as_str()), once);
        }
    }

    #[test]
    fn test_is_error_display() {
        assert!(is_error_display("Error"));
        assert!(is_error_display("Error: division by zero"));
        assert!(!is_error_display("-12.5"));
    }
}
