//! Animated style properties and per-property value ranges.
//!
//! The core animates a small, fixed property set; every value is a scalar
//! `f32` in the property's natural unit (opacity 0..1, translation px, scale
//! factor, width percent). Hosts map these onto actual style writes.

use serde::{Deserialize, Serialize};

use crate::util::lerp;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Property {
    Opacity,
    TranslateX,
    TranslateY,
    Scale,
    WidthPct,
}

impl Property {
    /// Neutral resting value for the property (what an untouched element has).
    pub fn neutral(self) -> f32 {
        match self {
            Property::Opacity => 1.0,
            Property::TranslateX | Property::TranslateY | Property::WidthPct => 0.0,
            Property::Scale => 1.0,
        }
    }
}

/// Endpoints of one animated property. `from` is the visual state at progress
/// 0, `to` at progress 1.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub struct PropertyRange {
    pub property: Property,
    pub from: f32,
    pub to: f32,
}

impl PropertyRange {
    pub fn new(property: Property, from: f32, to: f32) -> Self {
        Self { property, from, to }
    }

    /// Value at an eased progress in [0,1].
    #[inline]
    pub fn at(&self, eased: f32) -> f32 {
        lerp(self.from, self.to, eased)
    }
}
