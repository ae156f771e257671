//! Viewport trigger detection.
//!
//! Pure geometry over host-reported rects: no DOM, no IntersectionObserver.
//! The detector keeps the last-known rect per element and a set of watches,
//! and re-evaluates at most once per sequencer frame, only when geometry
//! changed since the previous pass (scroll/resize events coalesce into the
//! dirty flag).

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::ids::BindingId;
use crate::sequencer::ElementHandle;
use crate::transition::Threshold;

/// Host viewport metrics. `scroll_y` is informational; rects are already
/// viewport-relative.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Viewport {
    pub height: f32,
    pub scroll_y: f32,
}

/// Viewport-relative bounding box (vertical axis only).
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct Rect {
    pub top: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(top: f32, height: f32) -> Self {
        Self { top, height }
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

#[derive(Clone, Copy, Debug)]
enum WatchMode {
    Discrete { threshold: Threshold, once: bool },
    Scrub { start: f32, end: f32 },
}

#[derive(Clone, Debug)]
struct Watch {
    binding: BindingId,
    element: ElementHandle,
    mode: WatchMode,
    inside: bool,
    last_progress: Option<f32>,
}

/// Signal emitted for one watched binding during an evaluation pass.
#[derive(Clone, Debug, PartialEq)]
pub enum DetectorSignal {
    Entered,
    Exited,
    Progress(f32),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DetectorEvent {
    pub binding: BindingId,
    pub element: ElementHandle,
    pub signal: DetectorSignal,
}

#[derive(Debug, Default)]
pub struct ViewportDetector {
    viewport: Viewport,
    rects: HashMap<ElementHandle, Rect>,
    watches: Vec<Watch>,
    dirty: bool,
}

impl ViewportDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn watch_count(&self) -> usize {
        self.watches.len()
    }

    pub fn set_viewport(&mut self, viewport: Viewport) {
        if self.viewport != viewport {
            self.viewport = viewport;
            self.dirty = true;
        }
    }

    pub fn set_rect(&mut self, element: &str, rect: Rect) {
        let prev = self.rects.insert(element.to_string(), rect);
        if prev != Some(rect) {
            self.dirty = true;
        }
    }

    /// Observe a discrete threshold crossing for a binding.
    pub fn observe_discrete(
        &mut self,
        binding: BindingId,
        element: ElementHandle,
        threshold: Threshold,
        once: bool,
    ) {
        self.watches.push(Watch {
            binding,
            element,
            mode: WatchMode::Discrete { threshold, once },
            inside: false,
            last_progress: None,
        });
        self.dirty = true;
    }

    /// Observe continuous scrub progress through a scroll window.
    pub fn observe_scrub(
        &mut self,
        binding: BindingId,
        element: ElementHandle,
        start: f32,
        end: f32,
    ) {
        self.watches.push(Watch {
            binding,
            element,
            mode: WatchMode::Scrub { start, end },
            inside: false,
            last_progress: None,
        });
        self.dirty = true;
    }

    /// Stop observing a binding (once-only bindings after they fire).
    pub fn retire(&mut self, binding: BindingId) {
        self.watches.retain(|w| w.binding != binding);
    }

    /// Drop everything tied to an element that left the document. Silent by
    /// contract: animation must never block page functionality.
    pub fn remove_element(&mut self, element: &str) {
        let before = self.watches.len();
        self.rects.remove(element);
        self.watches.retain(|w| w.element != element);
        if self.watches.len() != before {
            log::debug!(
                "detector dropped {} watch(es) for removed element '{element}'",
                before - self.watches.len()
            );
        }
    }

    /// Evaluate all watches against current geometry. Runs at most once per
    /// call and only when geometry changed; crossing signals fire exactly
    /// once per crossing, scrub signals fire on every progress change.
    pub fn evaluate(&mut self, out: &mut Vec<DetectorEvent>) {
        if !self.dirty {
            return;
        }
        self.dirty = false;

        let vh = self.viewport.height;
        let mut retired: Vec<BindingId> = Vec::new();

        for watch in &mut self.watches {
            let rect = match self.rects.get(watch.element.as_str()) {
                Some(r) => *r,
                // Geometry not reported yet; keep waiting.
                None => continue,
            };

            match watch.mode {
                WatchMode::Discrete { threshold, once } => {
                    let line = threshold.line(vh);
                    let inside = rect.top <= line && rect.bottom() >= 0.0;
                    if inside != watch.inside {
                        watch.inside = inside;
                        out.push(DetectorEvent {
                            binding: watch.binding,
                            element: watch.element.clone(),
                            signal: if inside {
                                DetectorSignal::Entered
                            } else {
                                DetectorSignal::Exited
                            },
                        });
                        if inside && once {
                            retired.push(watch.binding);
                        }
                    }
                }
                WatchMode::Scrub { start, end } => {
                    let progress = scrub_progress(rect, vh, start, end);
                    if watch.last_progress != Some(progress) {
                        watch.last_progress = Some(progress);
                        out.push(DetectorEvent {
                            binding: watch.binding,
                            element: watch.element.clone(),
                            signal: DetectorSignal::Progress(progress),
                        });
                    }
                }
            }
        }

        for binding in retired {
            self.retire(binding);
        }
    }
}

/// Progress of an element through a scrub window expressed as viewport-height
/// fractions (1.0 = bottom edge, 0.0 = top edge). A zero-height element has
/// no defined travel; policy is progress 0.
fn scrub_progress(rect: Rect, viewport_height: f32, start: f32, end: f32) -> f32 {
    if rect.height <= 0.0 {
        return 0.0;
    }
    let travel = viewport_height * (start - end) + rect.height;
    if travel <= 0.0 {
        return 0.0;
    }
    ((viewport_height * start - rect.top) / travel).clamp(0.0, 1.0)
}
