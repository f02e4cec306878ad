use std::{fmt, ops::Deref, str::FromStr};

/// Number of characters in an admission number.
pub const LENGTH: usize = 13;

const PREFIX: &str = "AP";

/// Returns `true` if `s` has the shape of an admission number.
///
/// The format is `AP` followed by 11 ASCII digits, 13 characters in total.
/// Only `0-9` count as digits.
///
/// # Examples
///
/// ```
/// use roster::domain::is_valid_admission_number;
///
/// assert!(is_valid_admission_number("AP12345678901"));
/// assert!(!is_valid_admission_number("XP12345678901"));
/// assert!(!is_valid_admission_number("AP1234567890A"));
/// ```
#[must_use]
pub fn is_valid_admission_number(s: &str) -> bool {
    check(s).is_ok()
}

fn check(s: &str) -> Result<(), Error> {
    if s.len() != LENGTH {
        return Err(Error::Length(s.to_string()));
    }
    if !s.starts_with(PREFIX) {
        return Err(Error::Prefix(s.to_string()));
    }
    if !s.bytes().skip(PREFIX.len()).all(|b| b.is_ascii_digit()) {
        return Err(Error::Digits(s.to_string()));
    }
    Ok(())
}

/// The unique key of a student record.
///
/// An admission number can only be constructed by parsing, so every value of
/// this type satisfies [`is_valid_admission_number`].
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct AdmissionNumber(String);

impl AdmissionNumber {
    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Errors that can occur when parsing an admission number.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The input is not exactly 13 characters long.
    #[error("Invalid admission number '{0}': expected 13 characters (AP followed by 11 digits)")]
    Length(String),

    /// The input does not start with `AP`.
    #[error("Invalid admission number '{0}': must start with 'AP'")]
    Prefix(String),

    /// The characters after the prefix are not all digits.
    #[error("Invalid admission number '{0}': 'AP' must be followed by 11 digits")]
    Digits(String),
}

impl FromStr for AdmissionNumber {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        check(s)?;
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<&str> for AdmissionNumber {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl AsRef<str> for AdmissionNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Deref for AdmissionNumber {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for AdmissionNumber {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(""; "empty")]
    #[test_case("AP"; "prefix only")]
    #[test_case("AP1234567890"; "one digit short")]
    #[test_case("AP123456789012"; "one digit long")]
    #[test_case("AP12345678901 "; "trailing space")]
    #[test_case("AP１２３４５６７８９０"; "full width digits")]
    fn wrong_length_is_invalid(s: &str) {
        assert!(!is_valid_admission_number(s));
    }

    #[test]
    fn any_length_other_than_thirteen_is_invalid() {
        for len in (0..40).filter(|&len| len != LENGTH) {
            let s = format!("AP{}", "1".repeat(len.saturating_sub(2)));
            let s = &s[..len.min(s.len())];
            assert!(!is_valid_admission_number(s), "accepted {s:?}");
        }
    }

    #[test]
    fn valid_number() {
        assert!(is_valid_admission_number("AP12345678901"));
        assert!(is_valid_admission_number("AP00000000000"));
    }

    #[test_case("XP12345678901"; "wrong first letter")]
    #[test_case("AX12345678901"; "wrong second letter")]
    #[test_case("ap12345678901"; "lowercase prefix")]
    fn wrong_prefix_is_invalid(s: &str) {
        assert!(!is_valid_admission_number(s));
        assert!(matches!(s.parse::<AdmissionNumber>(), Err(Error::Prefix(_))));
    }

    #[test_case("AP1234567890A"; "trailing letter")]
    #[test_case("AP-2345678901"; "dash")]
    #[test_case("AP12345 78901"; "inner space")]
    fn non_digit_is_invalid(s: &str) {
        assert!(!is_valid_admission_number(s));
        assert!(matches!(s.parse::<AdmissionNumber>(), Err(Error::Digits(_))));
    }

    #[test]
    fn parse_reports_length() {
        let result = AdmissionNumber::try_from("AP123");
        assert_eq!(result, Err(Error::Length("AP123".to_string())));
    }

    #[test]
    fn parsed_number_displays_unchanged() {
        let number: AdmissionNumber = "AP00000000001".parse().unwrap();
        assert_eq!(number.to_string(), "AP00000000001");
        assert_eq!(number.as_str(), "AP00000000001");
        assert_eq!(&*number, "AP00000000001");
    }

    #[test]
    fn error_display() {
        let error = Error::Prefix("XP12345678901".to_string());
        assert_eq!(
            error.to_string(),
            "Invalid admission number 'XP12345678901': must start with 'AP'"
        );
    }
}
