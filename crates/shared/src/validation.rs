//! Client-side schema for user drafts. Pure predicates only; nothing here talks to the server.

use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::{
    domain::{DraftField, FormDraft},
    error::FieldErrors,
};

pub const MIN_NAME_CHARS: usize = 2;
pub const MIN_PASSWORD_CHARS: usize = 6;

pub const FIRST_NAME_TOO_SHORT: &str = "First name must be at least 2 characters long";
pub const LAST_NAME_TOO_SHORT: &str = "Last name must be at least 2 characters long";
pub const INVALID_EMAIL: &str = "Invalid email address";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters long";
pub const INVALID_DATE: &str = "Invalid date format";

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
            .expect("email pattern must compile")
    })
}

pub fn is_valid_email(raw: &str) -> bool {
    let Some((local, _)) = raw.split_once('@') else {
        return false;
    };
    if local.starts_with('.') || local.contains("..") {
        return false;
    }
    email_pattern().is_match(raw)
}

/// Calendar-day spellings typed into the birthday field, besides timestamps.
const DATE_FORMATS: [&str; 7] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%b %d %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%B %d, %Y",
];

/// Accepts a date-input value (`YYYY-MM-DD`), a few common spellings of a day
/// (`2000/01/15`, `01/15/2000`, `Jan 15 2000`, `January 15, 2000`) or a full
/// timestamp, as long as it names a real calendar day.
pub fn is_valid_date(raw: &str) -> bool {
    let raw = raw.trim();
    if raw.is_empty() {
        return false;
    }
    DATE_FORMATS
        .iter()
        .any(|format| NaiveDate::parse_from_str(raw, format).is_ok())
        || DateTime::parse_from_rfc3339(raw).is_ok()
        || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
}

fn has_min_chars(value: &str, min: usize) -> bool {
    value.chars().count() >= min
}

/// Checks every rule and returns one message per failing field.
pub fn validate(draft: &FormDraft) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if !has_min_chars(&draft.first_name, MIN_NAME_CHARS) {
        errors.insert(DraftField::FirstName, FIRST_NAME_TOO_SHORT);
    }
    if !has_min_chars(&draft.last_name, MIN_NAME_CHARS) {
        errors.insert(DraftField::LastName, LAST_NAME_TOO_SHORT);
    }
    if !is_valid_email(&draft.email) {
        errors.insert(DraftField::Email, INVALID_EMAIL);
    }
    if !has_min_chars(&draft.password, MIN_PASSWORD_CHARS) {
        errors.insert(DraftField::Password, PASSWORD_TOO_SHORT);
    }
    if !is_valid_date(&draft.birthday) {
        errors.insert(DraftField::Birthday, INVALID_DATE);
    }

    errors
}

#[cfg(test)]
#[path = "tests/validation_tests.rs"]
mod tests;
