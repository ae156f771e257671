//! Core configuration for folio-motion-core.

use serde::{Deserialize, Serialize};

use crate::easing::Easing;

/// Defaults applied to entrance registrations that leave fields unset, plus
/// engine sizing. Values mirror the site-wide entrance settings (800 ms,
/// 100 ms delay, 100 px offset before the viewport bottom).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub default_duration_ms: f32,
    pub default_delay_ms: f32,
    /// Trigger line offset in pixels above the viewport bottom.
    pub default_offset_px: f32,
    pub default_easing: Easing,

    /// Maximum events retained per tick; events past the cap are dropped.
    pub max_events_per_tick: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_ms: 800.0,
            default_delay_ms: 100.0,
            default_offset_px: 100.0,
            default_easing: Easing::ease_out_cubic(),
            max_events_per_tick: 1024,
        }
    }
}
