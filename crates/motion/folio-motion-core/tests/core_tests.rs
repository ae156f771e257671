use hashbrown::HashMap;

use folio_motion_core::{
    ActivationState, Config, Easing, ElementResolver, Inputs, MotionEvent, MotionPreference,
    Property, PropertyRange, Rect, RectUpdate, Sequencer, Threshold, TransitionSpec,
    TriggerBinding, TriggerKind, Viewport,
};

/// Resolver backed by a selector -> handles map, the shape a DOM adapter
/// would produce.
struct MapResolver(HashMap<String, Vec<String>>);

impl MapResolver {
    fn new(entries: &[(&str, &[&str])]) -> Self {
        let mut map = HashMap::new();
        for (sel, handles) in entries {
            map.insert(
                sel.to_string(),
                handles.iter().map(|h| h.to_string()).collect(),
            );
        }
        Self(map)
    }
}

impl ElementResolver for MapResolver {
    fn resolve(&mut self, selector: &str) -> Vec<String> {
        self.0.get(selector).cloned().unwrap_or_default()
    }
}

fn entrance_spec(selector: &str) -> TransitionSpec {
    TransitionSpec {
        target_selector: selector.into(),
        ranges: vec![
            PropertyRange::new(Property::Opacity, 0.0, 1.0),
            PropertyRange::new(Property::TranslateY, 50.0, 0.0),
        ],
        duration_ms: 800.0,
        easing: Easing::Linear,
        start_offset_ms: 0.0,
    }
}

fn entrance_binding(selector: &str) -> TriggerBinding {
    TriggerBinding {
        selector: selector.into(),
        kind: TriggerKind::OnScrollIntoView {
            threshold: Threshold::Px(100.0),
        },
        once: true,
    }
}

fn geometry(element: &str, top: f32) -> Inputs {
    Inputs {
        viewport: Some(Viewport {
            height: 1000.0,
            scroll_y: 0.0,
        }),
        rects: vec![RectUpdate {
            element: element.into(),
            rect: Rect::new(top, 100.0),
        }],
        ..Default::default()
    }
}

fn write_for(
    out: &folio_motion_core::Outputs,
    element: &str,
    property: Property,
) -> Option<f32> {
    out.writes
        .iter()
        .find(|w| w.element == element && w.property == property)
        .map(|w| w.value)
}

/// it should make register a no-op for selectors matching nothing
#[test]
fn missing_target_register_is_noop() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = MapResolver::new(&[]);
    let ids = seq
        .register(entrance_binding(".ghost"), entrance_spec(".ghost"), &mut resolver)
        .expect("no-op, not an error");
    assert!(ids.is_empty());
    assert_eq!(seq.watch_count(), 0);
    assert_eq!(seq.active_channel_count(), 0);

    // The miss is reported with the next frame's outputs, once.
    let out = seq.update(0.0, Inputs::default());
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, MotionEvent::TargetMissing { selector } if selector == ".ghost")));
    let out = seq.update(16.0, Inputs::default());
    assert!(out.events.is_empty());
}

/// it should cap the events delivered in one tick
#[test]
fn event_overflow_is_capped() {
    let cfg = Config {
        max_events_per_tick: 4,
        ..Config::default()
    };
    let mut seq = Sequencer::new(cfg, None);
    let mut resolver = MapResolver::new(&[
        (".a", &["a-1"]),
        (".b", &["b-1"]),
        (".c", &["c-1"]),
    ]);
    let first = seq
        .register(entrance_binding(".a"), entrance_spec(".a"), &mut resolver)
        .unwrap();
    seq.register(entrance_binding(".b"), entrance_spec(".b"), &mut resolver)
        .unwrap();
    seq.register(entrance_binding(".c"), entrance_spec(".c"), &mut resolver)
        .unwrap();

    // All three cross in the same frame; each raises four events, but only
    // the earliest four survive the cap.
    let rects = [("a-1", 800.0), ("b-1", 800.0), ("c-1", 800.0)]
        .iter()
        .map(|(e, top)| RectUpdate {
            element: e.to_string(),
            rect: Rect::new(*top, 100.0),
        })
        .collect();
    let out = seq.update(
        0.0,
        Inputs {
            viewport: Some(Viewport {
                height: 1000.0,
                scroll_y: 0.0,
            }),
            rects,
            ..Default::default()
        },
    );
    assert_eq!(out.events.len(), 4);
    assert!(matches!(
        out.events[0],
        MotionEvent::Entered { binding } if binding == first[0]
    ));
}

/// it should reject structurally invalid specs with an error
#[test]
fn invalid_spec_rejected() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = MapResolver::new(&[(".card", &["card-1"])]);
    let mut bad = entrance_spec(".card");
    bad.ranges.clear();
    assert!(seq
        .register(entrance_binding(".card"), bad, &mut resolver)
        .is_err());
}

/// it should fire a once binding exactly once and keep it Fired afterwards
#[test]
fn once_binding_is_idempotent() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = MapResolver::new(&[(".card", &["card-1"])]);
    let ids = seq
        .register(entrance_binding(".card"), entrance_spec(".card"), &mut resolver)
        .unwrap();
    let id = ids[0];
    assert_eq!(seq.binding_state(id), Some(ActivationState::Armed));

    // Far below the fold: nothing happens.
    let out = seq.update(0.0, geometry("card-1", 2000.0));
    assert!(out.writes.is_empty());

    // Crosses the trigger line: transition starts and the binding retires.
    let out = seq.update(0.0, geometry("card-1", 800.0));
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, MotionEvent::Entered { binding } if *binding == id)));
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, MotionEvent::BindingRetired { binding } if *binding == id)));
    assert_eq!(seq.binding_state(id), Some(ActivationState::Fired));
    assert_eq!(seq.watch_count(), 0);

    // Run the transition to completion.
    let out = seq.update(800.0, Inputs::default());
    assert_eq!(write_for(out, "card-1", Property::Opacity), Some(1.0));
    let _ = seq.update(0.0, Inputs::default());
    assert_eq!(seq.active_channel_count(), 0);

    // Leave and re-enter: state stays Fired, no writes.
    let _ = seq.update(0.0, geometry("card-1", 2000.0));
    let out = seq.update(0.0, geometry("card-1", 800.0));
    assert!(out.writes.is_empty());
    assert_eq!(seq.binding_state(id), Some(ActivationState::Fired));

    // Explicit re-activation is ignored too.
    seq.activate(id);
    let out = seq.update(16.0, Inputs::default());
    assert!(out.writes.is_empty());
}

/// it should interpolate tween values along the easing curve
#[test]
fn tween_values_follow_the_curve() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = MapResolver::new(&[(".card", &["card-1"])]);
    let ids = seq
        .register(entrance_binding(".card"), entrance_spec(".card"), &mut resolver)
        .unwrap();
    assert_eq!(ids.len(), 1);

    let _ = seq.update(0.0, geometry("card-1", 800.0));
    let out = seq.update(400.0, Inputs::default());
    // Linear, halfway: opacity 0.5, translateY 25.
    assert_eq!(write_for(out, "card-1", Property::Opacity), Some(0.5));
    assert_eq!(write_for(out, "card-1", Property::TranslateY), Some(25.0));
}

/// it should continue a hover reversal from the current progress
#[test]
fn hover_reversal_continues_from_progress() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver =
        MapResolver::new(&[(".card", &["card-1"]), (".card img", &["img-1"])]);

    let zoom = |from: f32, to: f32| TransitionSpec {
        target_selector: ".card img".into(),
        ranges: vec![PropertyRange::new(Property::Scale, from, to)],
        duration_ms: 400.0,
        easing: Easing::Linear,
        start_offset_ms: 0.0,
    };
    seq.register(
        TriggerBinding {
            selector: ".card".into(),
            kind: TriggerKind::OnHoverEnter,
            once: false,
        },
        zoom(1.0, 1.1),
        &mut resolver,
    )
    .unwrap();
    seq.register(
        TriggerBinding {
            selector: ".card".into(),
            kind: TriggerKind::OnHoverLeave,
            once: false,
        },
        zoom(1.1, 1.0),
        &mut resolver,
    )
    .unwrap();

    let hover = |entered: bool| Inputs {
        hover: vec![folio_motion_core::HoverEvent {
            element: "card-1".into(),
            entered,
        }],
        ..Default::default()
    };

    let near = |v: Option<f32>, expected: f32| {
        let v = v.expect("expected a scale write");
        assert!((v - expected).abs() < 1e-5, "got {v}, wanted {expected}");
    };

    // Enter, advance halfway: progress 0.5 -> scale 1.05.
    let _ = seq.update(0.0, hover(true));
    let out = seq.update(200.0, Inputs::default());
    near(write_for(out, "img-1", Property::Scale), 1.05);

    // Leave mid-flight: same frame still reports the same value (continuity).
    let out = seq.update(0.0, hover(false));
    near(write_for(out, "img-1", Property::Scale), 1.05);

    // Reverse direction retraces from 0.5, reaching base after 200ms.
    let out = seq.update(100.0, Inputs::default());
    near(write_for(out, "img-1", Property::Scale), 1.025);
    let out = seq.update(100.0, Inputs::default());
    assert_eq!(write_for(out, "img-1", Property::Scale), Some(1.0));

    // Re-enter before the channel is dropped: resumes from 0, same channel.
    assert_eq!(seq.active_channel_count(), 1);
    let _ = seq.update(0.0, hover(true));
    let out = seq.update(200.0, Inputs::default());
    near(write_for(out, "img-1", Property::Scale), 1.05);
}

/// it should cancel an in-flight tween when a superseding trigger restarts it
#[test]
fn superseded_transition_is_interrupted() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = MapResolver::new(&[(".banner", &["banner-1"])]);
    let binding = TriggerBinding {
        selector: ".banner".into(),
        kind: TriggerKind::OnScrollIntoView {
            threshold: Threshold::Px(100.0),
        },
        once: false,
    };
    let ids = seq
        .register(binding, entrance_spec(".banner"), &mut resolver)
        .unwrap();
    let id = ids[0];

    let _ = seq.update(0.0, geometry("banner-1", 800.0));
    let _ = seq.update(100.0, Inputs::default());
    assert_eq!(seq.active_channel_count(), 2);
    assert_eq!(seq.binding_state(id), Some(ActivationState::Active));

    // Scroll away re-arms the non-once binding without touching the tween.
    let out = seq.update(0.0, geometry("banner-1", 2000.0));
    assert!(out
        .events
        .iter()
        .any(|e| matches!(e, MotionEvent::Exited { binding } if *binding == id)));
    assert_eq!(seq.binding_state(id), Some(ActivationState::Armed));

    // Re-entering restarts the tween, interrupting both property channels.
    let out = seq.update(0.0, geometry("banner-1", 800.0));
    let interruptions = out
        .events
        .iter()
        .filter(|e| matches!(e, MotionEvent::TransitionInterrupted { .. }))
        .count();
    assert_eq!(interruptions, 2);
    // Restarted channels begin from their `from` values again.
    assert_eq!(write_for(out, "banner-1", Property::Opacity), Some(0.0));
    assert_eq!(seq.active_channel_count(), 2);
}

/// it should keep first registration when an element gets a duplicate kind
#[test]
fn duplicate_binding_per_element_kind_is_skipped() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = MapResolver::new(&[(".skill", &["skill-1"])]);

    let first = seq
        .register(entrance_binding(".skill"), entrance_spec(".skill"), &mut resolver)
        .unwrap();
    assert_eq!(first.len(), 1);

    // Second entrance path for the same indicator: unified away.
    let second = seq
        .register(entrance_binding(".skill"), entrance_spec(".skill"), &mut resolver)
        .unwrap();
    assert!(second.is_empty());
    assert_eq!(seq.watch_count(), 1);
}

/// it should drop bindings and channels for elements that left the document
#[test]
fn removed_element_is_dropped_silently() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = MapResolver::new(&[(".card", &["card-1"])]);
    let ids = seq
        .register(entrance_binding(".card"), entrance_spec(".card"), &mut resolver)
        .unwrap();

    let _ = seq.update(0.0, geometry("card-1", 800.0));
    assert_eq!(seq.active_channel_count(), 2);

    let out = seq.update(
        16.0,
        Inputs {
            removed: vec!["card-1".into()],
            ..Default::default()
        },
    );
    assert!(out.writes.is_empty());
    assert_eq!(seq.active_channel_count(), 0);
    assert_eq!(seq.watch_count(), 0);
    assert_eq!(seq.binding_state(ids[0]), None);
}

/// it should produce empty outputs when stepping with no data
#[test]
fn update_with_no_data_is_safe_and_empty() {
    let mut seq = Sequencer::new(Config::default(), None);
    let out = seq.update(16.0, Inputs::default());
    assert!(out.writes.is_empty() && out.events.is_empty());
}

/// it should report preference changes through events
#[test]
fn preference_change_is_announced() {
    let mut seq = Sequencer::new(Config::default(), None);
    let out = seq.update(
        0.0,
        Inputs {
            preference: Some(MotionPreference::Reduced),
            ..Default::default()
        },
    );
    assert!(out.events.contains(&MotionEvent::PreferenceChanged {
        preference: MotionPreference::Reduced
    }));
    assert_eq!(seq.preference(), MotionPreference::Reduced);
}
