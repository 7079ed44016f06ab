// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password policy for operator credentials.
//!
//! The legacy operator store accepted any 8-character password, so the
//! default policy matches that floor. Rejecting a password equal to the
//! login name is the one rule added on top.

use thiserror::Error;

/// Password policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PasswordPolicyError {
    /// Password is too short.
    #[error("Password must be at least {min_length} characters")]
    TooShort { min_length: usize },

    /// Password equals the login name.
    #[error("Password must not match the login name")]
    MatchesLoginName,
}

/// Password policy configuration.
pub struct PasswordPolicy {
    /// Minimum password length in characters.
    pub min_length: usize,
}

impl Default for PasswordPolicy {
    fn default() -> Self {
        Self { min_length: 8 }
    }
}

impl PasswordPolicy {
    /// Validates a password for a new operator account.
    ///
    /// # Arguments
    ///
    /// * `password` - The password to validate
    /// * `login_name` - The operator login name (password must not match)
    ///
    /// # Errors
    ///
    /// Returns a `PasswordPolicyError` if the password does not meet
    /// policy requirements.
    pub fn validate(&self, password: &str, login_name: &str) -> Result<(), PasswordPolicyError> {
        if password.chars().count() < self.min_length {
            return Err(PasswordPolicyError::TooShort {
                min_length: self.min_length,
            });
        }

        if password.eq_ignore_ascii_case(login_name) {
            return Err(PasswordPolicyError::MatchesLoginName);
        }

        Ok(())
    }
}
