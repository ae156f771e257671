//! Easing curves:
//! - Linear (scrub/parallax)
//! - PowerOut(n) (polynomial ease-out families)
//! - CubicBezier (css-style timing, x-curve inverted via binary search)

use serde::{Deserialize, Serialize};

/// Control points for the entrance default (`ease-out-cubic`).
const EASE_OUT_CUBIC_CTRL: [f32; 4] = [0.215, 0.61, 0.355, 1.0];

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq)]
pub enum Easing {
    Linear,
    /// `1 - (1 - t)^n`; degree 2 and 3 match the site's `power2.out` /
    /// `power3.out` curves.
    PowerOut(u8),
    /// Cubic-bezier timing with control points (x1, y1, x2, y2).
    CubicBezier([f32; 4]),
}

impl Easing {
    pub const fn ease_out_cubic() -> Self {
        Easing::CubicBezier(EASE_OUT_CUBIC_CTRL)
    }

    /// Look up a curve by its stylesheet name.
    pub fn from_name(name: &str) -> Option<Easing> {
        match name {
            "none" | "linear" => Some(Easing::Linear),
            "power1.out" => Some(Easing::PowerOut(1)),
            "power2.out" => Some(Easing::PowerOut(2)),
            "power3.out" => Some(Easing::PowerOut(3)),
            "power4.out" => Some(Easing::PowerOut(4)),
            "ease-out-cubic" => Some(Easing::ease_out_cubic()),
            _ => None,
        }
    }

    /// Eased progress for t in [0,1]. Inputs outside the range are clamped.
    pub fn eval(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Easing::Linear => t,
            Easing::PowerOut(n) => {
                let inv = 1.0 - t;
                1.0 - inv.powi(i32::from(*n).max(1))
            }
            Easing::CubicBezier(ctrl) => bezier_ease_t(t, ctrl[0], ctrl[1], ctrl[2], ctrl[3]),
        }
    }
}

impl Default for Easing {
    fn default() -> Self {
        Easing::ease_out_cubic()
    }
}

/// One axis of a css-style cubic bezier. Endpoints are implicit (0 and 1);
/// only the two inner control values vary.
#[inline]
fn bezier_axis(c1: f32, c2: f32, t: f32) -> f32 {
    let u = 1.0 - t;
    3.0 * u * u * t * c1 + 3.0 * u * t * t * c2 + t * t * t
}

/// Eased value for control points (x1, y1, x2, y2): find the curve parameter
/// whose x equals the input progress by bisecting [0,1] (x is monotonic for
/// control x-values in [0,1]), then evaluate the y axis there.
#[inline]
fn bezier_ease_t(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    let target = t.clamp(0.0, 1.0);
    // Identity control points make x(t) == t; no search needed.
    if x1 == 0.0 && y1 == 0.0 && x2 == 1.0 && y2 == 1.0 {
        return target;
    }
    let mut lo = 0.0f32;
    let mut hi = 1.0f32;
    let mut mid = target;
    for _ in 0..24 {
        let x = bezier_axis(x1, x2, mid);
        if (x - target).abs() < 1e-6 {
            break;
        }
        if x < target {
            lo = mid;
        } else {
            hi = mid;
        }
        mid = 0.5 * (lo + hi);
    }
    bezier_axis(y1, y2, mid)
}
