//! Folio Motion Core (host-agnostic)
//!
//! Scroll- and hover-driven animation sequencing for the folio site, with no
//! DOM dependency. A host adapter resolves selectors to opaque element
//! handles, feeds viewport geometry and pointer events into
//! `Sequencer::update()` each frame, and applies the emitted `StyleWrite`s.

pub mod config;
pub mod easing;
pub mod gate;
pub mod group;
pub mod ids;
pub mod inputs;
pub mod outputs;
pub mod presets;
pub mod property;
pub mod sequencer;
pub mod stored;
pub mod transition;
pub mod util;
pub mod viewport;

// Re-exports for consumers (adapters)
pub use config::Config;
pub use easing::Easing;
pub use gate::{MotionGate, MotionPreference};
pub use group::{group_total_duration, member_start_times, GroupMember};
pub use ids::{BindingId, GroupId, IdAllocator};
pub use inputs::{HoverEvent, Inputs, RectUpdate};
pub use outputs::{MotionEvent, Outputs, StyleWrite};
pub use presets::{init_animations, PageContent};
pub use property::{Property, PropertyRange};
pub use sequencer::{ElementHandle, ElementResolver, Sequencer};
pub use stored::parse_registry_json;
pub use transition::{ActivationState, Threshold, TransitionSpec, TriggerBinding, TriggerKind};
pub use viewport::{Rect, Viewport, ViewportDetector};
