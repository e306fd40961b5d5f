//! Input validation for account credentials.
//!
//! This module provides validation functions for usernames, passwords,
//! and email addresses.

use crate::validation::ValidationError;

/// Minimum username length.
pub const MIN_USERNAME_LENGTH: usize = 3;

/// Maximum username length.
pub const MAX_USERNAME_LENGTH: usize = 20;

/// Minimum password length.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Maximum password length.
pub const MAX_PASSWORD_LENGTH: usize = 128;

/// Maximum email length.
pub const MAX_EMAIL_LENGTH: usize = 100;

/// Validate a username.
///
/// Requirements:
/// - Length: 3-20 characters
/// - Characters: alphanumeric (a-z, A-Z, 0-9), underscore (_) and dot (.)
///
/// # Examples
///
/// ```
/// use ssis::auth::validation::validate_username;
///
/// assert!(validate_username("jane.doe").is_ok());
/// assert!(validate_username("ab").is_err()); // too short
/// assert!(validate_username("jane doe").is_err()); // space
/// ```
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    let len = username.chars().count();
    if !(MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len) {
        return Err(ValidationError::UsernameLength);
    }

    if !username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
    {
        return Err(ValidationError::UsernameInvalidChars);
    }

    Ok(())
}

/// Validate a password.
///
/// Requirements:
/// - Length: 8-128 characters
pub fn validate_password(password: &str) -> Result<(), ValidationError> {
    let len = password.chars().count();
    if len < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooShort);
    }
    if len > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::PasswordTooLong);
    }
    Ok(())
}

/// Validate an email address.
///
/// Requirements:
/// - At most 100 characters
/// - Shape `local@domain.tld`: one `@`, a non-empty local part, and a domain
///   with at least one dot that neither starts nor ends the domain
/// - No whitespace
///
/// # Examples
///
/// ```
/// use ssis::auth::validation::validate_email;
///
/// assert!(validate_email("registrar@example.edu").is_ok());
/// assert!(validate_email("registrar@localhost").is_err());
/// ```
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() || email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::InvalidEmail);
    }
    if email.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidEmail);
    }

    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    match domain.rsplit_once('.') {
        Some((host, tld)) if !host.is_empty() && !tld.is_empty() && !host.starts_with('.') => {
            Ok(())
        }
        _ => Err(ValidationError::InvalidEmail),
    }
}
