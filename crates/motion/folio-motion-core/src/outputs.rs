//! Output contracts from the core sequencer.
//!
//! Outputs carry the style values to apply this frame, keyed by element
//! handle and property, plus a separate list of semantic events. The
//! sequencer is the only producer of `StyleWrite`s, which keeps every
//! animated property single-writer.

use serde::{Deserialize, Serialize};

use crate::gate::MotionPreference;
use crate::ids::BindingId;
use crate::property::Property;
use crate::sequencer::ElementHandle;

/// One animated property value for one element this frame.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StyleWrite {
    pub element: ElementHandle,
    pub property: Property,
    pub value: f32,
}

/// Discrete semantic signals emitted during stepping.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[non_exhaustive]
pub enum MotionEvent {
    Entered {
        binding: BindingId,
    },
    Exited {
        binding: BindingId,
    },
    TransitionStarted {
        element: ElementHandle,
        property: Property,
    },
    TransitionFinished {
        element: ElementHandle,
        property: Property,
    },
    /// A superseding trigger cancelled an in-flight transition.
    TransitionInterrupted {
        element: ElementHandle,
        property: Property,
    },
    /// A once-only binding fired and stopped observing.
    BindingRetired {
        binding: BindingId,
    },
    /// Registration selector matched nothing; the call was a no-op.
    TargetMissing {
        selector: String,
    },
    PreferenceChanged {
        preference: MotionPreference,
    },
}

/// Outputs returned by Sequencer::update().
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Outputs {
    #[serde(default)]
    pub writes: Vec<StyleWrite>,
    #[serde(default)]
    pub events: Vec<MotionEvent>,
}

impl Outputs {
    #[inline]
    pub fn clear(&mut self) {
        self.writes.clear();
        self.events.clear();
    }

    #[inline]
    pub fn push_write(&mut self, write: StyleWrite) {
        self.writes.push(write);
    }

    #[inline]
    pub fn push_event(&mut self, event: MotionEvent) {
        self.events.push(event);
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.writes.is_empty() && self.events.is_empty()
    }
}
