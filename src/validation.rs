//! Guest input validation.
//!
//! The pure checks here run on every form change for live feedback; the
//! submission check runs once when the guest submits and produces the
//! normalized [`Entry`] that gets stored and sent.

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::models::{Attendance, Entry, MealPref, RsvpForm, Side};

/// Reasons a submission is refused before anything is stored or sent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter a name")]
    MissingName,
    #[error("Party size must be greater than 0 for attending guests")]
    ZeroParty,
    #[error("Meat and veg counts must match the party size")]
    MealMismatch,
    #[error("{0}")]
    InvalidChoice(String),
}

impl ValidationError {
    /// Stable machine-readable reason.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::MissingName => "missing_name",
            ValidationError::ZeroParty => "zero_party",
            ValidationError::MealMismatch => "meal_mismatch",
            ValidationError::InvalidChoice(_) => "invalid_choice",
        }
    }
}

/// Best-effort integer parse.
///
/// Everything except ASCII digits and `-` is dropped, then an optional sign
/// and the leading run of digits are read. Input with no readable digits
/// yields `default`.
pub fn to_int(input: &str, default: i64) -> i64 {
    let cleaned: String = input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .collect();

    let (negative, rest) = match cleaned.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, cleaned.as_str()),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];

    if digits.is_empty() {
        return default;
    }
    match digits.parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => default,
    }
}

/// Checks meal counts against the party size.
///
/// Guests who are not attending always pass. A meal preference outside
/// meat/veg/mixed also passes.
pub fn meal_counts_valid(attending: &str, meal_pref: &str, total: i64, meat: i64, veg: i64) -> bool {
    if attending != "yes" {
        return true;
    }
    match meal_pref.parse::<MealPref>() {
        Ok(pref) => counts_match(pref, total, meat, veg),
        Err(_) => true,
    }
}

fn counts_match(pref: MealPref, total: i64, meat: i64, veg: i64) -> bool {
    match pref {
        MealPref::Mixed => meat.checked_add(veg) == Some(total),
        MealPref::Meat => meat == total && veg == 0,
        MealPref::Veg => veg == total && meat == 0,
    }
}

/// Validates a submitted form and builds the entry to store.
///
/// Non-attending guests have their meal counts zeroed whatever the form says.
pub fn validate_submission(
    form: &RsvpForm,
    created_at: DateTime<Utc>,
) -> Result<Entry, ValidationError> {
    let name = form.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }

    let attending: Attendance = form
        .attending
        .parse()
        .map_err(ValidationError::InvalidChoice)?;
    let side: Side = form.side.parse().map_err(ValidationError::InvalidChoice)?;
    let meal_pref: MealPref = form
        .meal_pref
        .parse()
        .map_err(ValidationError::InvalidChoice)?;

    let total = to_int(&form.total, 0);
    let (total, meat, veg) = if attending.is_attending() {
        let meat = to_int(&form.meat_count, 0);
        let veg = to_int(&form.veg_count, 0);

        if total <= 0 {
            return Err(ValidationError::ZeroParty);
        }
        if meat < 0 || veg < 0 || !counts_match(meal_pref, total, meat, veg) {
            return Err(ValidationError::MealMismatch);
        }
        (total, meat, veg)
    } else {
        (total.max(0), 0, 0)
    };

    let mut entry = Entry::new(name, side, attending)
        .with_party(clamp_count(total), meal_pref, clamp_count(meat), clamp_count(veg))
        .with_phone(form.phone.trim())
        .with_notes(form.notes.trim());
    entry.created_at = created_at;

    Ok(entry)
}

fn clamp_count(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attending_form(total: &str, pref: &str, meat: &str, veg: &str) -> RsvpForm {
        RsvpForm {
            name: "Tom".to_string(),
            total: total.to_string(),
            meal_pref: pref.to_string(),
            meat_count: meat.to_string(),
            veg_count: veg.to_string(),
            ..RsvpForm::default()
        }
    }

    #[test]
    fn test_to_int() {
        assert_eq!(to_int("42", 0), 42);
        assert_eq!(to_int(" 3 guests", 0), 3);
        assert_eq!(to_int("-5", 0), -5);
        assert_eq!(to_int("1-2", 0), 1);
        assert_eq!(to_int("abc", 7), 7);
        assert_eq!(to_int("", 0), 0);
        assert_eq!(to_int("-", 9), 9);
        assert_eq!(to_int("--1", 4), 4);
    }

    #[test]
    fn test_non_attending_always_valid() {
        for attending in ["no", "maybe", ""] {
            for (t, m, v) in [(0, 0, 0), (3, 1, 1), (2, 5, 9), (-1, 4, -2)] {
                assert!(meal_counts_valid(attending, "meat", t, m, v));
                assert!(meal_counts_valid(attending, "mixed", t, m, v));
            }
        }
    }

    #[test]
    fn test_meat_rule() {
        for t in 0..20 {
            assert!(meal_counts_valid("yes", "meat", t, t, 0));
            if t > 0 {
                assert!(!meal_counts_valid("yes", "meat", t, t - 1, 0));
                assert!(!meal_counts_valid("yes", "meat", t, t, 1));
            }
        }
    }

    #[test]
    fn test_veg_rule() {
        assert!(meal_counts_valid("yes", "veg", 3, 0, 3));
        assert!(!meal_counts_valid("yes", "veg", 3, 1, 2));
    }

    #[test]
    fn test_mixed_rule() {
        for t in 0..8 {
            for m in 0..8 {
                for v in 0..8 {
                    assert_eq!(meal_counts_valid("yes", "mixed", t, m, v), m + v == t);
                }
            }
        }
    }

    #[test]
    fn test_mixed_rule_with_huge_counts() {
        assert!(!meal_counts_valid("yes", "mixed", 5, i64::MAX, 1));
        assert!(!meal_counts_valid("yes", "mixed", i64::MAX, i64::MAX, i64::MAX));
        assert!(meal_counts_valid("yes", "mixed", i64::MAX, i64::MAX, 0));
    }

    #[test]
    fn test_submission_huge_mixed_counts_mismatch() {
        let form = attending_form("5", "mixed", "9223372036854775807", "1");
        let err = validate_submission(&form, Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::MealMismatch);
    }

    #[test]
    fn test_unknown_meal_pref_passes() {
        assert!(meal_counts_valid("yes", "vegan", 3, 0, 0));
    }

    #[test]
    fn test_submission_builds_entry() {
        let now = Utc::now();
        let entry = validate_submission(&attending_form("2", "meat", "2", "0"), now).unwrap();

        assert_eq!(entry.name, "Tom");
        assert_eq!(entry.total, 2);
        assert_eq!(entry.meat_count, 2);
        assert_eq!(entry.veg_count, 0);
        assert_eq!(entry.created_at, now);
    }

    #[test]
    fn test_submission_missing_name() {
        let form = RsvpForm {
            name: "   ".to_string(),
            ..RsvpForm::default()
        };
        let err = validate_submission(&form, Utc::now()).unwrap_err();
        assert_eq!(err, ValidationError::MissingName);
        assert_eq!(err.code(), "missing_name");
    }

    #[test]
    fn test_submission_zero_party() {
        let err = validate_submission(&attending_form("0", "meat", "0", "0"), Utc::now())
            .unwrap_err();
        assert_eq!(err.code(), "zero_party");
    }

    #[test]
    fn test_submission_meal_mismatch() {
        let err = validate_submission(&attending_form("3", "mixed", "1", "1"), Utc::now())
            .unwrap_err();
        assert_eq!(err, ValidationError::MealMismatch);
    }

    #[test]
    fn test_submission_rejects_negative_counts() {
        let err = validate_submission(&attending_form("2", "mixed", "-1", "3"), Utc::now())
            .unwrap_err();
        assert_eq!(err.code(), "meal_mismatch");
    }

    #[test]
    fn test_submission_unknown_choice() {
        let err = validate_submission(&attending_form("2", "vegan", "2", "0"), Utc::now())
            .unwrap_err();
        assert_eq!(err.code(), "invalid_choice");
        assert!(err.to_string().contains("vegan"));
    }

    #[test]
    fn test_submission_zeroes_counts_when_absent() {
        let form = RsvpForm {
            name: "Amy".to_string(),
            attending: "no".to_string(),
            total: "2".to_string(),
            meat_count: "5".to_string(),
            veg_count: "1".to_string(),
            ..RsvpForm::default()
        };
        let entry = validate_submission(&form, Utc::now()).unwrap();
        assert_eq!(entry.total, 2);
        assert_eq!(entry.meat_count, 0);
        assert_eq!(entry.veg_count, 0);
    }

    #[test]
    fn test_submission_clamps_negative_party_when_absent() {
        let form = RsvpForm {
            name: "Amy".to_string(),
            attending: "maybe".to_string(),
            total: "-3".to_string(),
            ..RsvpForm::default()
        };
        let entry = validate_submission(&form, Utc::now()).unwrap();
        assert_eq!(entry.total, 0);
    }
}
