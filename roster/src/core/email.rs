//! Registration email rules.

use std::sync::LazyLock;

use regex::Regex;

/// Only `@gmail.com` addresses may register. The domain match is exact and
/// case-sensitive; the local part is restricted to `[A-Za-z0-9._%+-]`.
static GMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9._%+-]+@gmail\.com$").unwrap());

pub fn is_allowed_email(email: &str) -> bool {
    GMAIL_RE.is_match(email)
}

/// Case-insensitive lookup key for an email.
pub fn email_key(email: &str) -> String {
    email.to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_and_tagged_gmail_addresses() {
        for email in [
            "al@gmail.com",
            "First.Last@gmail.com",
            "a+hack_2024%x-y@gmail.com",
        ] {
            assert!(is_allowed_email(email), "{email} should be allowed");
        }
    }

    #[test]
    fn rejects_other_domains_and_malformed_addresses() {
        for email in [
            "",
            "@gmail.com",
            "al@GMAIL.com",
            "al@gmail.co",
            "al@gmil.com",
            "al@mail.gmail.com",
            "al@gmail.com.evil",
            "al@yahoo.com",
            "al bo@gmail.com",
            " al@gmail.com",
            "al@@gmail.com",
        ] {
            assert!(!is_allowed_email(email), "{email:?} should be rejected");
        }
    }

    #[test]
    fn email_key_folds_case() {
        assert_eq!(email_key("AL@Gmail.com"), email_key("al@gmail.com"));
    }
}
