//! Field validation and canonicalization for SSIS records.
//!
//! Codes and names of colleges, programs and students share one textual
//! rule: after trimming they may contain only ASCII letters and spaces.
//! Names are stored in title case, codes in upper case.

use thiserror::Error;

use crate::auth::validation::{
    MAX_EMAIL_LENGTH, MAX_PASSWORD_LENGTH, MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH,
    MIN_USERNAME_LENGTH,
};

/// Maximum length of a college or program code.
pub const MAX_CODE_LENGTH: usize = 20;

/// Maximum length of a college or program name.
pub const MAX_NAME_LENGTH: usize = 100;

/// Maximum length of a student's first or last name.
pub const MAX_PERSON_NAME_LENGTH: usize = 50;

/// Maximum length of a student photo URL.
pub const MAX_PHOTO_URL_LENGTH: usize = 500;

/// Validation errors, each tied to the input field it concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// A textual field contains something other than letters and spaces.
    #[error("{field} must contain only letters and spaces")]
    NotAlphabetic { field: &'static str },

    /// A field exceeds its maximum length.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    /// Student id number is not `DDDD-DDDD`.
    #[error("id_number must follow the format XXXX-XXXX (digits only)")]
    InvalidIdNumber,

    /// Unknown gender value.
    #[error("gender must be one of Male, Female, Others")]
    InvalidGender,

    /// Unknown year level value.
    #[error("year_level must be one of 1, 2, 3, 4, 4+")]
    InvalidYearLevel,

    /// The program is owned by another college than the one given.
    #[error("program does not belong to the selected college")]
    ProgramCollegeMismatch,

    /// Photo URL is not an http(s) URL.
    #[error("photo_url must start with http:// or https://")]
    InvalidPhotoUrl,

    /// Username length out of range.
    #[error("username must be {MIN_USERNAME_LENGTH}-{MAX_USERNAME_LENGTH} characters")]
    UsernameLength,

    /// Username contains invalid characters.
    #[error("username can only contain letters, digits, underscores and dots")]
    UsernameInvalidChars,

    /// Email address is malformed.
    #[error("email must be a valid address of at most {MAX_EMAIL_LENGTH} characters")]
    InvalidEmail,

    /// Password is too short.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    PasswordTooShort,

    /// Password is too long.
    #[error("password must be at most {MAX_PASSWORD_LENGTH} characters")]
    PasswordTooLong,
}

impl ValidationError {
    /// Name of the input field this error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::Required { field }
            | ValidationError::NotAlphabetic { field }
            | ValidationError::TooLong { field, .. } => field,
            ValidationError::InvalidIdNumber => "id_number",
            ValidationError::InvalidGender => "gender",
            ValidationError::InvalidYearLevel => "year_level",
            ValidationError::ProgramCollegeMismatch => "program_id",
            ValidationError::InvalidPhotoUrl => "photo_url",
            ValidationError::UsernameLength | ValidationError::UsernameInvalidChars => "username",
            ValidationError::InvalidEmail => "email",
            ValidationError::PasswordTooShort | ValidationError::PasswordTooLong => "password",
        }
    }
}

/// Trim and collapse runs of whitespace into single spaces.
pub fn collapse_whitespace(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Convert to title case: first letter of every word upper case, the rest lower case.
///
/// ```
/// use ssis::validation::to_title_case;
///
/// assert_eq!(to_title_case("college of computer studies"), "College Of Computer Studies");
/// ```
pub fn to_title_case(value: &str) -> String {
    value
        .split(' ')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn letters_and_spaces(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let collapsed = collapse_whitespace(value);
    if collapsed.is_empty() {
        return Err(ValidationError::Required { field });
    }
    if !collapsed.chars().all(|c| c.is_ascii_alphabetic() || c == ' ') {
        return Err(ValidationError::NotAlphabetic { field });
    }
    if collapsed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(collapsed)
}

/// Validate a name field and return its canonical title-case form.
pub fn canonical_name(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    letters_and_spaces(field, value, max).map(|name| to_title_case(&name))
}

/// Validate a code field and return its canonical upper-case form.
pub fn canonical_code(field: &'static str, value: &str) -> Result<String, ValidationError> {
    letters_and_spaces(field, value, MAX_CODE_LENGTH).map(|code| code.to_uppercase())
}

/// Validate a student id number (`DDDD-DDDD`) and return it trimmed.
pub fn canonical_id_number(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required { field: "id_number" });
    }
    let bytes = trimmed.as_bytes();
    let well_formed = bytes.len() == 9
        && bytes.iter().enumerate().all(|(i, b)| {
            if i == 4 {
                *b == b'-'
            } else {
                b.is_ascii_digit()
            }
        });
    if !well_formed {
        return Err(ValidationError::InvalidIdNumber);
    }
    Ok(trimmed.to_string())
}

/// Validate an optional photo URL; blank values become `None`.
pub fn canonical_photo_url(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(url) = value.map(str::trim).filter(|u| !u.is_empty()) else {
        return Ok(None);
    };
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ValidationError::InvalidPhotoUrl);
    }
    if url.len() > MAX_PHOTO_URL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "photo_url",
            max: MAX_PHOTO_URL_LENGTH,
        });
    }
    Ok(Some(url.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(
            to_title_case("college of computer studies"),
            "College Of Computer Studies"
        );
        assert_eq!(to_title_case("BACHELOR OF ARTS"), "Bachelor Of Arts");
        assert_eq!(to_title_case("mIxEd"), "Mixed");
    }

    #[test]
    fn test_canonical_name_trims_and_collapses() {
        assert_eq!(
            canonical_name("college_name", "  college   of  law ", MAX_NAME_LENGTH).unwrap(),
            "College Of Law"
        );
    }

    #[test]
    fn test_canonical_name_rejects_non_letters() {
        assert_eq!(
            canonical_name("college_name", "College 42", MAX_NAME_LENGTH),
            Err(ValidationError::NotAlphabetic {
                field: "college_name"
            })
        );
        assert_eq!(
            canonical_name("last_name", "O'Brien", MAX_PERSON_NAME_LENGTH),
            Err(ValidationError::NotAlphabetic { field: "last_name" })
        );
    }

    #[test]
    fn test_canonical_name_required_and_length() {
        assert_eq!(
            canonical_name("first_name", "   ", MAX_PERSON_NAME_LENGTH),
            Err(ValidationError::Required {
                field: "first_name"
            })
        );
        let long = "a".repeat(MAX_PERSON_NAME_LENGTH + 1);
        assert_eq!(
            canonical_name("first_name", &long, MAX_PERSON_NAME_LENGTH),
            Err(ValidationError::TooLong {
                field: "first_name",
                max: MAX_PERSON_NAME_LENGTH
            })
        );
    }

    #[test]
    fn test_canonical_code_uppercases() {
        assert_eq!(canonical_code("college_code", " ccs ").unwrap(), "CCS");
        assert!(canonical_code("college_code", "CC5").is_err());
    }

    #[test]
    fn test_id_number_format() {
        assert_eq!(canonical_id_number(" 2025-0001 ").unwrap(), "2025-0001");
        assert_eq!(
            canonical_id_number("20251"),
            Err(ValidationError::InvalidIdNumber)
        );
        assert_eq!(
            canonical_id_number("2025_0001"),
            Err(ValidationError::InvalidIdNumber)
        );
        assert_eq!(
            canonical_id_number("2025-00a1"),
            Err(ValidationError::InvalidIdNumber)
        );
        assert_eq!(
            canonical_id_number(""),
            Err(ValidationError::Required { field: "id_number" })
        );
    }

    #[test]
    fn test_photo_url() {
        assert_eq!(canonical_photo_url(None).unwrap(), None);
        assert_eq!(canonical_photo_url(Some("  ")).unwrap(), None);
        assert_eq!(
            canonical_photo_url(Some("https://cdn.example.com/a.png")).unwrap(),
            Some("https://cdn.example.com/a.png".to_string())
        );
        assert_eq!(
            canonical_photo_url(Some("ftp://x")),
            Err(ValidationError::InvalidPhotoUrl)
        );
    }

    #[test]
    fn test_error_fields() {
        assert_eq!(ValidationError::InvalidIdNumber.field(), "id_number");
        assert_eq!(
            ValidationError::TooLong {
                field: "college_name",
                max: 3
            }
            .field(),
            "college_name"
        );
        assert_eq!(ValidationError::PasswordTooShort.field(), "password");
        assert_eq!(ValidationError::ProgramCollegeMismatch.field(), "program_id");
    }
}
