//! Folio Contact Core
//!
//! Validation and submission flow for the site's contact form. Transport is
//! an opaque external relay behind the `EmailRelay` trait; this crate only
//! interprets its success/failure signal and turns every outcome into a
//! user-visible, auto-dismissing message.

pub mod form;
pub mod message;
pub mod relay;

pub use form::{ContactForm, ValidationError};
pub use message::{FormMessage, MessageKind, DISMISS_AFTER_MS};
pub use relay::{EmailRelay, RelayConfig, RelayError};

use serde::{Deserialize, Serialize};

/// Result of one submission attempt. `sent` is true only when the relay
/// confirmed delivery; the message is always suitable for display.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct SubmitOutcome {
    pub sent: bool,
    pub message: FormMessage,
}

/// Validate and forward a form. No failure escapes as an error: validation
/// problems and relay failures both degrade to a dismissible message.
pub fn submit(form: &ContactForm, relay: &mut dyn EmailRelay) -> SubmitOutcome {
    if let Err(e) = form.validate() {
        log::debug!("contact form rejected: {e}");
        return SubmitOutcome {
            sent: false,
            message: FormMessage::error("Please fill in all fields correctly"),
        };
    }

    match relay.send(form) {
        Ok(()) => SubmitOutcome {
            sent: true,
            message: FormMessage::success("Message sent successfully! I'll get back to you soon."),
        },
        Err(e) => {
            log::error!("email send error: {e}");
            SubmitOutcome {
                sent: false,
                message: FormMessage::error("Failed to send message. Please try again later."),
            }
        }
    }
}
