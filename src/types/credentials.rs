use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Username and password pair for registration and login.
///
/// Registration posts this as JSON; login posts the same fields
/// form-encoded, matching the backend's OAuth2 password flow.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credentials {
    /// Account name.
    pub username: String,

    /// Account password, sent only over the wire and never stored.
    pub password: String,
}

impl Credentials {
    /// Create a new credentials pair.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Checks the pair before any request is sent.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` when either field is empty or
    /// whitespace-only.
    pub fn validate(&self) -> Result<()> {
        if self.username.trim().is_empty() {
            return Err(Error::validation(
                "username must not be empty",
                Some("username".to_string()),
            ));
        }
        if self.password.trim().is_empty() {
            return Err(Error::validation(
                "password must not be empty",
                Some("password".to_string()),
            ));
        }
        Ok(())
    }

    /// Checks a sign-up form, including the password confirmation field.
    ///
    /// # Errors
    ///
    /// Returns `Error::Validation` when a field is empty or the
    /// confirmation does not match.
    pub fn validate_with_confirmation(&self, confirmation: &str) -> Result<()> {
        self.validate()?;
        if self.password != confirmation {
            return Err(Error::validation(
                "passwords do not match",
                Some("password".to_string()),
            ));
        }
        Ok(())
    }
}
