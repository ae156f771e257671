use hashbrown::HashMap;

use folio_motion_core::{
    init_animations, Config, ElementResolver, HoverEvent, Inputs, PageContent, Property, Rect,
    RectUpdate, Sequencer, Viewport,
};

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

fn page_resolver() -> MapResolver {
    MapResolver::new(&[
        ("[data-aos]", &["about-1", "contact-1"]),
        (".hero", &["hero-1"]),
        (".hero h1", &["hero-h1"]),
        (".hero p", &["hero-p"]),
        (".hero .cta-button", &["hero-cta"]),
        (".hero-bg", &["bg-1"]),
        (".skill-bar .skill-level", &["skill-rust", "skill-ts"]),
        (".project-card", &["proj-1"]),
        (".project-card .project-image", &["img-1"]),
    ])
}

fn page_content() -> PageContent {
    PageContent {
        viewport_height: 1000.0,
        parallax: vec![(".hero-bg".into(), 0.5)],
        skills: vec![(".skill-bar .skill-level".into(), 90.0)],
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

/// it should install the standard registry exactly once
#[test]
fn init_is_idempotent() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = page_resolver();
    let content = page_content();

    init_animations(&mut seq, &mut resolver, &content);
    assert!(seq.is_initialized());
    // 2 entrances + 1 parallax + 2 skills + 1 project card.
    assert_eq!(seq.watch_count(), 6);

    init_animations(&mut seq, &mut resolver, &content);
    assert_eq!(seq.watch_count(), 6);
}

/// it should play the hero sequence on the first frame
#[test]
fn hero_plays_on_load() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = page_resolver();
    init_animations(&mut seq, &mut resolver, &page_content());

    // First frame: the heading starts from its risen-out position.
    let out = seq.update(0.0, Inputs::default());
    assert_eq!(write_for(out, "hero-h1", Property::TranslateY), Some(100.0));
    assert_eq!(write_for(out, "hero-h1", Property::Opacity), Some(0.0));
    // The subtext holds until its 500ms start.
    assert!(write_for(out, "hero-p", Property::TranslateY).is_none());

    let out = seq.update(500.0, Inputs::default());
    assert_eq!(write_for(out, "hero-p", Property::TranslateY), Some(50.0));
}

/// it should fill a skill indicator to its level when it scrolls in
#[test]
fn skill_fill_reaches_level() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = page_resolver();
    init_animations(&mut seq, &mut resolver, &page_content());
    let _ = seq.update(0.0, Inputs::default());

    // Trigger line sits at 80% of the viewport.
    let out = seq.update(
        0.0,
        Inputs {
            viewport: Some(Viewport {
                height: 1000.0,
                scroll_y: 0.0,
            }),
            rects: vec![RectUpdate {
                element: "skill-rust".into(),
                rect: Rect::new(750.0, 20.0),
            }],
            ..Default::default()
        },
    );
    assert_eq!(write_for(out, "skill-rust", Property::WidthPct), Some(0.0));

    let out = seq.update(1500.0, Inputs::default());
    assert_eq!(write_for(out, "skill-rust", Property::WidthPct), Some(90.0));
    // The sibling indicator was not triggered.
    assert!(write_for(out, "skill-ts", Property::WidthPct).is_none());
}

/// it should zoom the project image on hover through the registry
#[test]
fn project_hover_zooms_image() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = page_resolver();
    init_animations(&mut seq, &mut resolver, &page_content());
    let _ = seq.update(0.0, Inputs::default());

    let _ = seq.update(
        0.0,
        Inputs {
            hover: vec![HoverEvent {
                element: "proj-1".into(),
                entered: true,
            }],
            ..Default::default()
        },
    );
    let out = seq.update(400.0, Inputs::default());
    let v = write_for(out, "img-1", Property::Scale).unwrap();
    assert!((v - 1.1).abs() < 1e-5, "got {v}");
}

/// it should come up empty on a page with none of the known content
#[test]
fn init_on_bare_page_is_harmless() {
    let mut seq = Sequencer::new(Config::default(), None);
    let mut resolver = MapResolver::new(&[]);
    init_animations(&mut seq, &mut resolver, &PageContent::default());
    assert!(seq.is_initialized());
    assert_eq!(seq.watch_count(), 0);

    let out = seq.update(16.0, Inputs::default());
    assert!(out.writes.is_empty());
}
