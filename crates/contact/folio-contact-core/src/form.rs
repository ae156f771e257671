//! Contact form record and validation rules.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The structured record the form collects. `subject` is optional content;
/// everything else is required.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub subject: String,
    pub message: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("required field '{0}' is empty")]
    MissingField(&'static str),
    #[error("name must be at least 2 characters")]
    NameTooShort,
    #[error("email address is not valid")]
    InvalidEmail,
    #[error("message must be at least 10 characters")]
    MessageTooShort,
}

impl ContactForm {
    /// Checks run in the order the form reports them: required fields,
    /// email shape, name length, message length.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if self.email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if self.message.trim().is_empty() {
            return Err(ValidationError::MissingField("message"));
        }
        if !email_shape_ok(&self.email) {
            return Err(ValidationError::InvalidEmail);
        }
        if self.name.chars().count() < 2 {
            return Err(ValidationError::NameTooShort);
        }
        if self.message.chars().count() < 10 {
            return Err(ValidationError::MessageTooShort);
        }
        Ok(())
    }
}

/// Shape check only (`local@domain.tld`): exactly one `@`, non-empty local
/// part, dotted domain with non-empty labels, no whitespace anywhere.
/// Deliverability is the relay's problem.
fn email_shape_ok(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.is_empty() {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}
