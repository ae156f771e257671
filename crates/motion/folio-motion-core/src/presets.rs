//! The site's standard animation registry.
//!
//! `init_animations` is the boundary with the page bootstrap: one idempotent
//! call after the document is interactive populates the full registry and
//! arms the detector. Content-derived numbers the page stores in data
//! attributes (parallax speeds, skill levels) arrive via `PageContent`,
//! collected by the host before init.

use crate::easing::Easing;
use crate::group::GroupMember;
use crate::property::{Property, PropertyRange};
use crate::sequencer::{ElementResolver, Sequencer};
use crate::transition::{Threshold, TransitionSpec, TriggerBinding, TriggerKind};

/// Per-page data the host collects from the document before init.
#[derive(Clone, Debug)]
pub struct PageContent {
    pub viewport_height: f32,
    /// (selector, speed factor) pairs; translation travel is
    /// `speed * viewport_height` over the full scroll window.
    pub parallax: Vec<(String, f32)>,
    /// (selector, level percent) pairs for the skill indicators.
    pub skills: Vec<(String, f32)>,
}

impl Default for PageContent {
    fn default() -> Self {
        Self {
            viewport_height: 800.0,
            parallax: Vec::new(),
            skills: Vec::new(),
        }
    }
}

/// Populate the standard registry. Idempotent; a second call is a no-op.
pub fn init_animations(
    seq: &mut Sequencer,
    resolver: &mut dyn ElementResolver,
    content: &PageContent,
) {
    if seq.is_initialized() {
        return;
    }

    register_generic_entrances(seq, resolver);
    register_hero(seq, resolver);
    register_parallax(seq, resolver, content);
    register_skills(seq, resolver, content);
    register_projects(seq, resolver);

    seq.mark_initialized();
}

/// Site-wide fade-up entrance for every `[data-aos]` element, using the
/// configured defaults (800 ms, 100 ms delay, 100 px offset).
fn register_generic_entrances(seq: &mut Sequencer, resolver: &mut dyn ElementResolver) {
    let cfg = seq.config().clone();
    let spec = TransitionSpec {
        target_selector: "[data-aos]".into(),
        ranges: vec![
            PropertyRange::new(Property::Opacity, 0.0, 1.0),
            PropertyRange::new(Property::TranslateY, 20.0, 0.0),
        ],
        duration_ms: cfg.default_duration_ms,
        easing: cfg.default_easing,
        start_offset_ms: cfg.default_delay_ms,
    };
    let binding = TriggerBinding {
        selector: "[data-aos]".into(),
        kind: TriggerKind::OnScrollIntoView {
            threshold: Threshold::Px(cfg.default_offset_px),
        },
        once: true,
    };
    let _ = log_register(seq.register(binding, spec, resolver), "[data-aos]");
}

/// Hero choreography: heading, subtext, call-to-action, overlapping starts.
fn register_hero(seq: &mut Sequencer, resolver: &mut dyn ElementResolver) {
    let fade_up = |selector: &str, rise_px: f32, duration_ms: f32| TransitionSpec {
        target_selector: selector.into(),
        ranges: vec![
            PropertyRange::new(Property::TranslateY, rise_px, 0.0),
            PropertyRange::new(Property::Opacity, 0.0, 1.0),
        ],
        duration_ms,
        easing: Easing::PowerOut(3),
        start_offset_ms: 0.0,
    };
    let members = vec![
        GroupMember {
            spec: fade_up(".hero h1", 100.0, 1000.0),
            overlap_ms: 0.0,
        },
        GroupMember {
            spec: fade_up(".hero p", 50.0, 800.0),
            overlap_ms: 500.0,
        },
        GroupMember {
            spec: fade_up(".hero .cta-button", 30.0, 600.0),
            overlap_ms: 400.0,
        },
    ];
    let binding = TriggerBinding {
        selector: ".hero".into(),
        kind: TriggerKind::OnLoad,
        once: true,
    };
    if let Err(e) = seq.register_group("hero", binding, members, resolver) {
        log::warn!("hero sequence rejected: {e}");
    }
}

/// Scroll-scrubbed parallax over the element's full viewport travel.
fn register_parallax(
    seq: &mut Sequencer,
    resolver: &mut dyn ElementResolver,
    content: &PageContent,
) {
    for (selector, speed) in &content.parallax {
        let spec = TransitionSpec {
            target_selector: selector.clone(),
            ranges: vec![PropertyRange::new(
                Property::TranslateY,
                0.0,
                content.viewport_height * speed,
            )],
            duration_ms: 0.0,
            easing: Easing::Linear,
            start_offset_ms: 0.0,
        };
        let binding = TriggerBinding {
            selector: selector.clone(),
            kind: TriggerKind::OnScrollScrub {
                start: 1.0,
                end: 0.0,
            },
            once: false,
        };
        let _ = log_register(seq.register(binding, spec, resolver), selector);
    }
}

/// Skill level indicators: one once-only width fill per indicator.
fn register_skills(seq: &mut Sequencer, resolver: &mut dyn ElementResolver, content: &PageContent) {
    for (selector, level) in &content.skills {
        let spec = TransitionSpec {
            target_selector: selector.clone(),
            ranges: vec![PropertyRange::new(Property::WidthPct, 0.0, *level)],
            duration_ms: 1500.0,
            easing: Easing::PowerOut(2),
            start_offset_ms: 0.0,
        };
        let binding = TriggerBinding {
            selector: selector.clone(),
            kind: TriggerKind::OnScrollIntoView {
                threshold: Threshold::ViewportFraction(0.8),
            },
            once: true,
        };
        let _ = log_register(seq.register(binding, spec, resolver), selector);
    }
}

/// Project cards: once-only entrance plus reversible hover zoom on the image.
fn register_projects(seq: &mut Sequencer, resolver: &mut dyn ElementResolver) {
    let entrance = TransitionSpec {
        target_selector: ".project-card".into(),
        ranges: vec![
            PropertyRange::new(Property::TranslateY, 50.0, 0.0),
            PropertyRange::new(Property::Opacity, 0.0, 1.0),
        ],
        duration_ms: 800.0,
        easing: Easing::PowerOut(1),
        start_offset_ms: 0.0,
    };
    let _ = log_register(
        seq.register(
            TriggerBinding {
                selector: ".project-card".into(),
                kind: TriggerKind::OnScrollIntoView {
                    threshold: Threshold::ViewportFraction(0.85),
                },
                once: true,
            },
            entrance,
            resolver,
        ),
        ".project-card",
    );

    let zoom = |from: f32, to: f32| TransitionSpec {
        target_selector: ".project-card .project-image".into(),
        ranges: vec![PropertyRange::new(Property::Scale, from, to)],
        duration_ms: 400.0,
        easing: Easing::PowerOut(2),
        start_offset_ms: 0.0,
    };
    let _ = log_register(
        seq.register(
            TriggerBinding {
                selector: ".project-card".into(),
                kind: TriggerKind::OnHoverEnter,
                once: false,
            },
            zoom(1.0, 1.1),
            resolver,
        ),
        ".project-card (hover enter)",
    );
    let _ = log_register(
        seq.register(
            TriggerBinding {
                selector: ".project-card".into(),
                kind: TriggerKind::OnHoverLeave,
                once: false,
            },
            zoom(1.1, 1.0),
            resolver,
        ),
        ".project-card (hover leave)",
    );
}

fn log_register(
    result: Result<Vec<crate::ids::BindingId>, String>,
    what: &str,
) -> Vec<crate::ids::BindingId> {
    match result {
        Ok(ids) => ids,
        Err(e) => {
            log::warn!("registration of '{what}' rejected: {e}");
            Vec::new()
        }
    }
}
