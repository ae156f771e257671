//! Motion preference gate.
//!
//! The reduced-motion signal is host state; the core keeps an explicitly
//! owned copy inside the sequencer rather than an ambient global. Hosts seed
//! it at init and forward change notifications through `Inputs::preference`.

use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

#[derive(Debug)]
pub struct MotionGate {
    preference: MotionPreference,
}

impl MotionGate {
    /// `None` means the host signal was unreadable; default to full motion.
    pub fn new(initial: Option<MotionPreference>) -> Self {
        Self {
            preference: initial.unwrap_or_default(),
        }
    }

    #[inline]
    pub fn preference(&self) -> MotionPreference {
        self.preference
    }

    #[inline]
    pub fn is_reduced(&self) -> bool {
        self.preference == MotionPreference::Reduced
    }

    /// Apply a change notification; returns true when the value changed.
    pub fn set(&mut self, preference: MotionPreference) -> bool {
        if self.preference == preference {
            return false;
        }
        self.preference = preference;
        true
    }
}

impl Default for MotionGate {
    fn default() -> Self {
        Self::new(None)
    }
}
