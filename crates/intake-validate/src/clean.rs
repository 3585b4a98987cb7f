//! String cleaning and field format checks.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("Invalid email regex")
});

/// Trim and collapse runs of whitespace to a single space.
#[must_use]
pub fn clean_string(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parse a loosely formatted number.
///
/// Decimal commas become points and every character other than digits,
/// `.` and `-` is dropped before parsing, so `"R$ 12,50"` reads as `12.5`.
/// Returns `None` for blank or unparseable input.
#[must_use]
pub fn clean_numeric(value: &str) -> Option<f64> {
    let digits: String = value
        .replace(',', ".")
        .chars()
        .filter(|ch| ch.is_ascii_digit() || *ch == '.' || *ch == '-')
        .collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<f64>().ok().filter(|number| number.is_finite())
}

fn strip(value: &str, noise: &[char]) -> String {
    value.trim().chars().filter(|ch| !noise.contains(ch)).collect()
}

fn all_digits(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|ch| ch.is_ascii_digit())
}

#[must_use]
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value.trim())
}

/// Brazilian taxpayer id: 11 digits once `.`, `-` and spaces are removed.
#[must_use]
pub fn is_valid_cpf(value: &str) -> bool {
    let digits = strip(value, &['.', '-', ' ']);
    all_digits(&digits) && digits.len() == 11
}

/// At least 10 digits once parentheses, `-` and spaces are removed.
#[must_use]
pub fn is_valid_phone(value: &str) -> bool {
    let digits = strip(value, &['(', ')', '-', ' ']);
    all_digits(&digits) && digits.len() >= 10
}

/// Brazilian postal code (CEP): exactly 8 digits, hyphen optional.
#[must_use]
pub fn is_valid_postal_code(value: &str) -> bool {
    let digits = strip(value, &['-', ' ']);
    all_digits(&digits) && digits.len() == 8
}
