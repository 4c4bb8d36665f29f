//! Number text: rendering results, reading operands back, and the
//! presentation rule for over-long displays

use serde::{Deserialize, Serialize};

/// Text shown while the engine is in the error state
pub const ERROR_TOKEN: &str = "Error";

/// Largest exponent (exclusive) rendered in plain decimal notation
const PLAIN_MAX_EXPONENT: i32 = 21;

/// Smallest exponent (exclusive) rendered in plain decimal notation
const PLAIN_MIN_EXPONENT: i32 = -6;

/// Renders a value as display text.
///
/// Uses the shortest digit string that reads back to the same `f64`.
/// Magnitudes in `[1e-6, 1e21)` are written in plain decimal notation,
/// everything else in exponential notation with a signed exponent
/// (`1e+21`, `1.5e-7`). Negative zero renders as `0`.
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let sci = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = sci.split_once('e') else {
        return sci;
    };
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let digit_count = digits.len() as i32;
    // position of the decimal point relative to the first digit
    let point = exponent + 1;

    let body = if digit_count <= point && point <= PLAIN_MAX_EXPONENT {
        format!("{digits}{}", "0".repeat((point - digit_count) as usize))
    } else if 0 < point && point <= PLAIN_MAX_EXPONENT {
        let (int_part, frac_part) = digits.split_at(point as usize);
        format!("{int_part}.{frac_part}")
    } else if PLAIN_MIN_EXPONENT < point && point <= 0 {
        format!("0.{}{digits}", "0".repeat((-point) as usize))
    } else {
        let (lead, rest) = digits.split_at(1);
        let sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exponent.abs())
        }
    };

    if value < 0.0 {
        format!("-{body}")
    } else {
        body
    }
}

/// Reads the numeric value of display text.
///
/// Takes the longest leading numeric literal (`"5."` reads as 5,
/// `"1e+21"` as 1e21). Text with no leading literal, such as a lone `"-"`
/// left behind by backspace, reads as NaN.
#[must_use]
pub fn parse_operand(text: &str) -> f64 {
    let text = text.trim_start();
    let bytes = text.as_bytes();
    let len = bytes.len();

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    if text[end..].starts_with("Infinity") {
        return if text.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let int_start = end;
    while end < len && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < len && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < len && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return f64::NAN;
    }

    if end < len && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < len && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits = exp_end;
        while exp_end < len && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > exp_digits {
            end = exp_end;
        }
    }

    text[..end].parse().unwrap_or(f64::NAN)
}

/// Enough fractional digits to write any `f64` out exactly
const EXACT_FRACTION_DIGITS: usize = 1100;

/// Magnitude from which fixed-point rendering falls back to `format_number`
const FIXED_LIMIT: f64 = 1e21;

/// Exact decimal expansion of `|value|` as (integer digits, fraction digits)
fn exact_digits(value: f64) -> (String, String) {
    let text = format!("{:.prec$}", value.abs(), prec = EXACT_FRACTION_DIGITS);
    match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part.to_string(), frac_part.to_string()),
        None => (text, String::new()),
    }
}

/// Adds one to an ASCII digit string, returning true on carry out
fn increment(digits: &mut [u8]) -> bool {
    for digit in digits.iter_mut().rev() {
        if *digit == b'9' {
            *digit = b'0';
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}

fn ascii(digits: &[u8]) -> String {
    digits.iter().copied().map(char::from).collect()
}

/// Renders `value` with `digits` fractional digits.
///
/// Rounds the exact decimal value, taking the larger magnitude on ties
/// (`1000.001953125` keeps eight digits as `1000.00195313`).
fn to_fixed(value: f64, digits: usize) -> String {
    if value.abs() >= FIXED_LIMIT {
        return format_number(value);
    }
    let (int_part, frac_part) = exact_digits(value);
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(digits))
        .collect();
    let round_up = frac_part.as_bytes().get(digits).is_some_and(|&d| d >= b'5');
    if round_up && increment(&mut kept) {
        kept.insert(0, b'1');
    }

    let split = kept.len() - digits;
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        format!("{sign}{}", ascii(&kept))
    } else {
        format!("{sign}{}.{}", ascii(&kept[..split]), ascii(&kept[split..]))
    }
}

/// Renders `value` with `digits` fractional digits and a signed exponent.
///
/// Ties round to the larger magnitude (`1234565000000` becomes
/// `1.23457e+12`).
fn to_exponential(value: f64, digits: usize) -> String {
    let (int_part, frac_part) = exact_digits(value);
    let all: Vec<u8> = int_part.bytes().chain(frac_part.bytes()).collect();

    let (mantissa, exponent) = match all.iter().position(|&d| d != b'0') {
        Some(first) => {
            let significant = &all[first..];
            let mut mantissa: Vec<u8> = significant
                .iter()
                .copied()
                .chain(std::iter::repeat(b'0'))
                .take(digits + 1)
                .collect();
            let mut exponent = int_part.len() as i64 - 1 - first as i64;
            let round_up = significant.get(digits + 1).is_some_and(|&d| d >= b'5');
            if round_up && increment(&mut mantissa) {
                mantissa.insert(0, b'1');
                mantissa.pop();
                exponent += 1;
            }
            (mantissa, exponent)
        }
        None => (vec![b'0'; digits + 1], 0),
    };

    let sign = if value < 0.0 { "-" } else { "" };
    let exp_sign = if exponent < 0 { '-' } else { '+' };
    let (lead, rest) = mantissa.split_at(1);
    if rest.is_empty() {
        format!("{sign}{}e{exp_sign}{}", ascii(lead), exponent.abs())
    } else {
        format!(
            "{sign}{}.{}e{exp_sign}{}",
            ascii(lead),
            ascii(rest),
            exponent.abs()
        )
    }
}

/// Presentation rule for display text that no longer fits the screen.
///
/// Deserializes from YAML or JSON with every field optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayFormat {
    /// Longest display text shown verbatim
    pub max_plain_len: usize,
    /// Magnitude above which long values switch to exponential notation
    pub exponential_threshold: f64,
    /// Fractional digits in exponential notation
    pub exponential_digits: usize,
    /// Fractional digits in fixed-point notation
    pub fixed_digits: usize,
}

impl Default for DisplayFormat {
    fn default() -> Self {
        Self {
            max_plain_len: 12,
            exponential_threshold: 999_999_999_999.0,
            exponential_digits: 5,
            fixed_digits: 8,
        }
    }
}

impl DisplayFormat {
    /// Creates the default format
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads a format from YAML, falling back to defaults for missing fields
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml_ng::Error> {
        serde_yaml_ng::from_str(yaml)
    }

    /// Formats raw display text for the screen
    #[must_use]
    pub fn apply(&self, display: &str) -> String {
        if display == ERROR_TOKEN || display.len() <= self.max_plain_len {
            return display.to_string();
        }

        let value = parse_operand(display);
        if !value.is_finite() {
            return format_number(value);
        }
        if value.abs() > self.exponential_threshold {
            to_exponential(value, self.exponential_digits)
        } else {
            to_fixed(value, self.fixed_digits)
        }
    }
}
