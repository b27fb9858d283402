//! Request-boundary validation predicates shared by the auth and user
//! management handlers. Error message assembly stays in the handlers; these
//! only answer yes/no.

use chrono::NaiveDate;
use regex::Regex;
use std::sync::OnceLock;

/// Phone numbers: optional +, optional leading 1, 9-15 digits.
pub const PHONE_FORMAT_MESSAGE: &str =
    "Phone number must be entered in the format: '+999999999'. Up to 15 digits allowed.";

pub const DATE_IN_FUTURE_MESSAGE: &str = "Date must not be in the future.";

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?1?\d{9,15}$").expect("phone regex is valid"))
}

pub fn valid_phone(phone: &str) -> bool {
    phone_regex().is_match(phone)
}

/// Basic email shape check: local part, exactly one @, domain with a dot,
/// sane length.
pub fn valid_email(email: &str) -> bool {
    if email.len() > 254 {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty() && !domain.contains('@') && domain.contains('.')
        }
        None => false,
    }
}

pub fn valid_password(password: &str) -> bool {
    password.len() >= 8
}

/// Dates of birth and similar fields must not lie in the future.
pub fn date_not_in_future(date: NaiveDate) -> bool {
    date <= chrono::Utc::now().date_naive()
}
