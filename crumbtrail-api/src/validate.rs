//! The shared field-validation core.
//!
//! Every scalar attribute of every entity passes through one of these
//! validators before it can reach an `Insertable` record. The order is always
//! trim, then sanitize, then the required check, then the length check; the
//! first violation aborts with a `Validation` error naming the field, so a
//! caller never observes a partially validated record.

use chrono::NaiveTime;

use crate::error::ApiError;

pub const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Single-character profile type codes: admin, owner, employee.
pub const PROFILE_TYPES: [&str; 3] = ["a", "o", "e"];

/// Characters permitted in an email address besides ASCII alphanumerics.
const EMAIL_CHARS: &str = "!#$%&'*+-/=?^_`{|}~.@";

/// Strips angle-bracket tag runs and control characters.
///
/// This is the injection-safe pass applied to every plain-text field before
/// it is stored or echoed back to a client.
fn strip_tags(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_tag = false;
    for c in value.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Trim plus the plain-text sanitization pass. Sanitizing can expose new
/// leading or trailing whitespace, so the result is trimmed again.
pub fn sanitize_text(value: &str) -> String {
    strip_tags(value.trim()).trim().to_string()
}

/// A required plain-text field of at most `max` characters.
pub fn text(field: &'static str, value: &str, max: usize) -> Result<String, ApiError> {
    let clean = sanitize_text(value);
    if clean.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    if clean.chars().count() > max {
        return Err(ApiError::validation(format!(
            "{field} is longer than {max} characters"
        )));
    }
    Ok(clean)
}

/// An optional plain-text field: empty after trimming becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ApiError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let clean = sanitize_text(value);
    if clean.is_empty() {
        return Ok(None);
    }
    if clean.chars().count() > max {
        return Err(ApiError::validation(format!(
            "{field} is longer than {max} characters"
        )));
    }
    Ok(Some(clean))
}

/// An email address: the sanitization pass drops any character outside the
/// set legal in an address, then length is checked against 128.
pub fn email(field: &'static str, value: &str) -> Result<String, ApiError> {
    let clean: String = value
        .trim()
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || EMAIL_CHARS.contains(*c))
        .collect();
    if clean.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    if clean.chars().count() > 128 {
        return Err(ApiError::validation(format!(
            "{field} is longer than 128 characters"
        )));
    }
    Ok(clean)
}

/// A phone number: 10 to 32 characters after sanitization.
pub fn phone(field: &'static str, value: &str) -> Result<String, ApiError> {
    let clean = sanitize_text(value);
    if clean.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    if clean.chars().count() < 10 {
        return Err(ApiError::validation(format!(
            "{field} must be a complete number starting with an area code"
        )));
    }
    if clean.chars().count() > 32 {
        return Err(ApiError::validation(format!(
            "{field} is longer than 32 characters"
        )));
    }
    Ok(clean)
}

/// An opaque token of at most `max` characters.
pub fn token(field: &'static str, value: &str, max: usize) -> Result<String, ApiError> {
    text(field, value, max)
}

/// A fixed-length credential field (salt, hash).
pub fn exact(field: &'static str, value: &str, len: usize) -> Result<String, ApiError> {
    let clean = sanitize_text(value);
    if clean.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    if clean.chars().count() != len {
        return Err(ApiError::validation(format!(
            "{field} must be exactly {len} characters"
        )));
    }
    Ok(clean)
}

/// The closed set of profile type codes.
pub fn profile_type(value: &str) -> Result<String, ApiError> {
    let clean = sanitize_text(value);
    if PROFILE_TYPES.contains(&clean.as_str()) {
        Ok(clean)
    } else {
        Err(ApiError::validation(
            "profile_type must be one of 'a' (admin), 'o' (owner), 'e' (employee)",
        ))
    }
}

/// The closed set of English day names.
pub fn day_of_week(value: &str) -> Result<String, ApiError> {
    let clean = sanitize_text(value);
    if DAYS_OF_WEEK.contains(&clean.as_str()) {
        Ok(clean)
    } else {
        Err(ApiError::validation(
            "schedule_day_of_week must be a day name, Monday through Sunday",
        ))
    }
}

/// A wall-clock time, accepted as `HH:MM` or `HH:MM:SS`.
pub fn time_of_day(field: &'static str, value: &str) -> Result<NaiveTime, ApiError> {
    let clean = sanitize_text(value);
    NaiveTime::parse_from_str(&clean, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(&clean, "%H:%M"))
        .map_err(|_| ApiError::validation(format!("{field} must be a time of day (HH:MM)")))
}

/// A store key. Keys are assigned by the store and always positive, so a
/// non-positive key is a malformed-key contract violation at the persistence
/// layer, not a field-validation failure.
pub fn key(field: &'static str, id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::persistence(format!("{field} is not positive")));
    }
    Ok(id)
}
