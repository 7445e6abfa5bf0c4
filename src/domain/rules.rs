//! Field-level validation rules shared by the Guest and Host entities.
//! Each rule returns every violation it finds rather than stopping at the
//! first, so callers can report the complete list.

use derive_more::{Display, Error};

use super::core::Money;

/// The 50 US state codes plus DC.
pub const STATE_CODES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DC", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM",
    "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA",
    "WV", "WI", "WY",
];

#[derive(Error, Display, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[display("{} is required", _0)]
    Required(#[error(not(source))] &'static str),
    #[display("{} must be at least 2 letters long", _0)]
    TooShort(#[error(not(source))] &'static str),
    #[display("Illegal character detected in {}", _0)]
    IllegalCharacter(#[error(not(source))] &'static str),
    #[display("Email length is too short to be a valid email")]
    EmailTooShort,
    #[display("Invalid email address (check placement of '@' and '.')")]
    EmailMalformed,
    #[display("{} must match the format (XXX) XXXXXXX", _0)]
    PhoneFormat(#[error(not(source))] &'static str),
    #[display("Invalid state abbreviation")]
    UnknownState,
    #[display("Invalid postal code format. Use 5 digit code")]
    PostalCodeFormat,
    #[display("{} must be higher than 0", _0)]
    RateNotPositive(#[error(not(source))] &'static str),
}

pub fn is_valid_state(code: &str) -> bool {
    STATE_CODES
        .iter()
        .any(|state| state.eq_ignore_ascii_case(code))
}

/// Name fields: at least 2 characters, no comma (the persisted encoding's
/// separator).
pub fn validate_name(field: &'static str, value: &str) -> Vec<FieldError> {
    if value.trim().is_empty() {
        return vec![FieldError::Required(field)];
    }
    let mut errors = Vec::new();
    if value.chars().count() < 2 {
        errors.push(FieldError::TooShort(field));
    }
    if value.contains(',') {
        errors.push(FieldError::IllegalCharacter(field));
    }
    errors
}

/// Free-text fields (address, city): present and at least 2 characters.
pub fn validate_text(field: &'static str, value: &str) -> Vec<FieldError> {
    if value.trim().is_empty() {
        return vec![FieldError::Required(field)];
    }
    if value.chars().count() < 2 {
        return vec![FieldError::TooShort(field)];
    }
    Vec::new()
}

/// Email: length >= 8, no comma, exactly one '@' with at least one '.'
/// somewhere after it.
pub fn validate_email(value: &str) -> Vec<FieldError> {
    if value.trim().is_empty() {
        return vec![FieldError::Required("Email")];
    }
    let mut errors = Vec::new();
    if value.chars().count() < 8 {
        errors.push(FieldError::EmailTooShort);
    }
    if value.contains(',') {
        errors.push(FieldError::IllegalCharacter("Email"));
    }
    match value.find('@') {
        Some(at) if value.matches('@').count() == 1 => {
            if !value[at..].contains('.') {
                errors.push(FieldError::EmailMalformed);
            }
        }
        _ => errors.push(FieldError::EmailMalformed),
    }
    errors
}

/// Phone: the literal layout `(XXX) XXXXXXX` — length 13, parenthesis and
/// space at fixed offsets, every other character a digit.
pub fn validate_phone(field: &'static str, value: &str) -> Vec<FieldError> {
    if value.trim().is_empty() {
        return vec![FieldError::Required(field)];
    }
    if is_valid_phone(value) {
        Vec::new()
    } else {
        vec![FieldError::PhoneFormat(field)]
    }
}

fn is_valid_phone(value: &str) -> bool {
    let bytes = value.as_bytes();
    bytes.len() == 13
        && bytes[0] == b'('
        && bytes[4] == b')'
        && bytes[5] == b' '
        && bytes[1..4].iter().all(u8::is_ascii_digit)
        && bytes[6..13].iter().all(u8::is_ascii_digit)
}

pub fn validate_state(value: &str) -> Vec<FieldError> {
    if value.trim().is_empty() {
        return vec![FieldError::Required("State")];
    }
    if is_valid_state(value) {
        Vec::new()
    } else {
        vec![FieldError::UnknownState]
    }
}

/// Postal code: exactly 5 digits.
pub fn validate_postal_code(value: &str) -> Vec<FieldError> {
    if value.trim().is_empty() {
        return vec![FieldError::Required("Postal code")];
    }
    let bytes = value.as_bytes();
    if bytes.len() == 5 && bytes.iter().all(u8::is_ascii_digit) {
        Vec::new()
    } else {
        vec![FieldError::PostalCodeFormat]
    }
}

pub fn validate_rate(field: &'static str, rate: Money) -> Vec<FieldError> {
    if rate.cents() > 0 {
        Vec::new()
    } else {
        vec![FieldError::RateNotPositive(field)]
    }
}
