//! Input contracts for the core sequencer.
//!
//! The host adapter builds one `Inputs` per frame from the DOM events it saw
//! since the last frame (scroll, resize, pointer, media-query change) and
//! passes it into `Sequencer::update()`. Geometry arrives as viewport-relative
//! rects; the core never queries layout itself.

use serde::{Deserialize, Serialize};

use crate::gate::MotionPreference;
use crate::sequencer::ElementHandle;
use crate::viewport::{Rect, Viewport};

#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct Inputs {
    /// New viewport metrics (present after scroll or resize).
    #[serde(default)]
    pub viewport: Option<Viewport>,
    /// Fresh bounding boxes for observed elements.
    #[serde(default)]
    pub rects: Vec<RectUpdate>,
    /// Pointer enter/leave events on hover-bound elements.
    #[serde(default)]
    pub hover: Vec<HoverEvent>,
    /// Elements removed from the document since the last frame.
    #[serde(default)]
    pub removed: Vec<ElementHandle>,
    /// Reduced-motion change notification from the host.
    #[serde(default)]
    pub preference: Option<MotionPreference>,
}

impl Inputs {
    pub fn is_empty(&self) -> bool {
        self.viewport.is_none()
            && self.rects.is_empty()
            && self.hover.is_empty()
            && self.removed.is_empty()
            && self.preference.is_none()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RectUpdate {
    pub element: ElementHandle,
    pub rect: Rect,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HoverEvent {
    pub element: ElementHandle,
    /// true = pointer entered, false = pointer left.
    pub entered: bool,
}
