//! Derived fields.
//!
//! Values that follow from other fields and are never entered directly: age from date of
//! birth, and triple-negative status from the three receptor statuses. Everything here is
//! total; malformed input yields `None` rather than an error.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};

use crate::constants::{ER_STATUS_FIELD, HER2_STATUS_FIELD, NEGATIVE, PR_STATUS_FIELD, TNBC_STATUS_FIELD};
use crate::record::{FieldValue, PatientRecord};

/// Parses a calendar date from `YYYY-MM-DD` or an ISO 8601 date-time.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.date_naive());
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.date())
}

/// Whole years between `date_of_birth` and `today`.
///
/// Year difference, minus one if `today`'s month/day precedes the birth month/day. A birth
/// date after `today` has no age.
pub fn compute_age(date_of_birth: NaiveDate, today: NaiveDate) -> Option<i32> {
    if date_of_birth > today {
        return None;
    }
    let mut age = today.year() - date_of_birth.year();
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    Some(age)
}

/// [`compute_age`] over raw text; empty or unparseable input gives `None`.
pub fn compute_age_from_str(date_of_birth: &str, today: NaiveDate) -> Option<i32> {
    parse_date(date_of_birth).and_then(|dob| compute_age(dob, today))
}

/// Age as of the caller's local date at call time.
pub fn age_today(date_of_birth: &str) -> Option<i32> {
    compute_age_from_str(date_of_birth, chrono::Local::now().date_naive())
}

/// Triple-negative status from ER, PR and HER2.
///
/// `Some(true)` when all three are exactly `Negative`, `Some(false)` when at least one is
/// set and they are not all negative, `None` while none of them is set.
pub fn compute_tnbc(er: Option<&str>, pr: Option<&str>, her2: Option<&str>) -> Option<bool> {
    let statuses = [er, pr, her2].map(|s| s.filter(|v| !v.is_empty()));
    if statuses.iter().all(Option::is_none) {
        return None;
    }
    Some(statuses.iter().all(|s| *s == Some(NEGATIVE)))
}

/// Recomputes `tnbc_status` from the record's receptor fields.
///
/// Leaves the stored flag alone while no receptor status is set. Returns whether the stored
/// value changed.
pub fn apply_tnbc(record: &mut PatientRecord) -> bool {
    let derived = compute_tnbc(
        record.text(ER_STATUS_FIELD),
        record.text(PR_STATUS_FIELD),
        record.text(HER2_STATUS_FIELD),
    );
    let Some(tnbc) = derived else {
        return false;
    };
    let previous = record.set(TNBC_STATUS_FIELD, FieldValue::Bool(tnbc));
    if previous != Some(FieldValue::Bool(tnbc)) {
        tracing::debug!(tnbc, "triple-negative status recomputed");
        true
    } else {
        false
    }
}

/// `true` for the fields whose change requires [`apply_tnbc`].
pub fn is_tnbc_input(field: &str) -> bool {
    matches!(field, ER_STATUS_FIELD | PR_STATUS_FIELD | HER2_STATUS_FIELD)
}
