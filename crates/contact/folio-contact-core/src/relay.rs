//! The email relay boundary.
//!
//! The actual transport lives in the host (browser SDK, HTTP client, test
//! double); the core only hands over a validated form and interprets the
//! success/failure signal.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::form::ContactForm;

/// The three opaque strings that identify the external relay account.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelayConfig {
    #[serde(rename = "serviceId")]
    pub service_id: String,
    #[serde(rename = "templateId")]
    pub template_id: String,
    #[serde(rename = "publicKey")]
    pub public_key: String,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum RelayError {
    /// The relay answered with a non-success status.
    #[error("relay rejected the message (status {0})")]
    Rejected(u16),
    /// The relay could not be reached at all.
    #[error("relay unreachable: {0}")]
    Unreachable(String),
}

/// Implemented by host adapters over the external relay service.
pub trait EmailRelay {
    fn send(&mut self, form: &ContactForm) -> Result<(), RelayError>;
}
