//! Declarative transition model: what to animate (TransitionSpec) and when
//! (TriggerBinding). Both are immutable once registered with the sequencer.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;
use crate::property::PropertyRange;

/// Where the trigger line sits relative to the viewport.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum Threshold {
    /// Fraction of viewport height measured from the top (0.8 means the line
    /// sits at 80% of the viewport, the site's `top 80%` start).
    ViewportFraction(f32),
    /// Explicit pixel offset above the viewport bottom edge.
    Px(f32),
}

impl Threshold {
    /// Y coordinate of the trigger line for a given viewport height.
    #[inline]
    pub fn line(&self, viewport_height: f32) -> f32 {
        match self {
            Threshold::ViewportFraction(f) => viewport_height * f,
            Threshold::Px(px) => viewport_height - px,
        }
    }
}

/// Condition that activates a transition.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum TriggerKind {
    /// Fires on the first frame after init (hero choreography).
    OnLoad,
    /// Discrete crossing of a viewport threshold (entrance animations).
    OnScrollIntoView { threshold: Threshold },
    /// Continuous progress through a scroll window. `start`/`end` are
    /// viewport-height fractions of the travel window: 1.0 is the bottom
    /// edge, 0.0 the top edge. Parallax uses (1.0, 0.0): top-enters-bottom
    /// through bottom-leaves-top.
    OnScrollScrub { start: f32, end: f32 },
    OnHoverEnter,
    OnHoverLeave,
}

/// One timed visual transition applied to every element the target selector
/// resolves to.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TransitionSpec {
    /// Selector resolved by the host at registration time.
    #[serde(rename = "targetSelector")]
    pub target_selector: String,
    pub ranges: Vec<PropertyRange>,
    #[serde(rename = "duration")]
    pub duration_ms: f32,
    #[serde(default)]
    pub easing: Easing,
    /// Stagger delay before the transition starts, in milliseconds.
    #[serde(default, rename = "startOffset")]
    pub start_offset_ms: f32,
}

impl TransitionSpec {
    /// Validate basic invariants (finite non-negative timing, at least one
    /// property range).
    pub fn validate_basic(&self) -> Result<(), String> {
        if self.target_selector.is_empty() {
            return Err("TransitionSpec.targetSelector must not be empty".into());
        }
        if !self.duration_ms.is_finite() || self.duration_ms < 0.0 {
            return Err(format!(
                "TransitionSpec.duration must be finite and >= 0 for '{}'",
                self.target_selector
            ));
        }
        if !self.start_offset_ms.is_finite() || self.start_offset_ms < 0.0 {
            return Err(format!(
                "TransitionSpec.startOffset must be finite and >= 0 for '{}'",
                self.target_selector
            ));
        }
        if self.ranges.is_empty() {
            return Err(format!(
                "TransitionSpec.ranges must not be empty for '{}'",
                self.target_selector
            ));
        }
        Ok(())
    }
}

/// Association of a trigger condition with the elements it observes.
/// At most one spec exists per (element, trigger kind).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct TriggerBinding {
    /// Selector for the trigger element(s), resolved by the host.
    pub selector: String,
    pub kind: TriggerKind,
    /// Retire permanently after the first activation.
    #[serde(default)]
    pub once: bool,
}

/// Lifecycle of one (element, trigger kind) pair.
///
/// Once-only: Pending -> Armed -> Fired (terminal).
/// Continuous/hover: Armed <-> Active, never terminal.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum ActivationState {
    Pending,
    Armed,
    Active,
    Fired,
}
