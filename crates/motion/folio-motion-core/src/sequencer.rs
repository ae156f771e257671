//! Sequencer: registry ownership and the public frame API.
//!
//! Methods:
//! - new, register, register_group, activate, update (inputs -> detector pass -> channel advance)
//!
//! The sequencer owns every binding, spec and activation state, and is the
//! single writer of animated properties: runtime channels are keyed by
//! (element, property), so starting a channel cancels any prior writer of the
//! same key.

use hashbrown::HashMap;

use crate::config::Config;
use crate::easing::Easing;
use crate::gate::{MotionGate, MotionPreference};
use crate::group::{group_total_duration, member_start_times, GroupMember};
use crate::ids::{BindingId, GroupId, IdAllocator};
use crate::inputs::Inputs;
use crate::outputs::{MotionEvent, Outputs, StyleWrite};
use crate::property::{Property, PropertyRange};
use crate::transition::{ActivationState, TransitionSpec, TriggerBinding, TriggerKind};
use crate::viewport::{DetectorSignal, ViewportDetector};

/// Opaque element handle (small string key minted by the host resolver).
pub type ElementHandle = String;

/// Trait for resolving selectors to live element handles.
/// Host adapters (DOM/wasm, test harnesses) implement this and pass it into
/// register()/init_animations(). Resolution happens once, at registration.
pub trait ElementResolver {
    fn resolve(&mut self, selector: &str) -> Vec<ElementHandle>;
}

/// What a binding runs when it fires.
#[derive(Clone, Debug)]
enum Payload {
    Spec {
        spec: TransitionSpec,
        targets: Vec<ElementHandle>,
    },
    Group(GroupId),
}

#[derive(Clone, Debug)]
struct Row {
    id: BindingId,
    binding: TriggerBinding,
    element: ElementHandle,
    state: ActivationState,
    payload: Payload,
}

#[derive(Clone, Debug)]
struct ResolvedMember {
    spec: TransitionSpec,
    targets: Vec<ElementHandle>,
    start_ms: f32,
}

#[derive(Clone, Debug)]
struct ResolvedGroup {
    name: String,
    members: Vec<ResolvedMember>,
    total_ms: f32,
}

#[derive(Clone, Debug)]
enum ChannelKind {
    Tween { delay_ms: f32, elapsed_ms: f32 },
    Hover { progress: f32, forward: bool, settled: bool },
    Scrub { progress: f32, dirty: bool },
}

/// One in-flight writer of a single (element, property) pair.
#[derive(Clone, Debug)]
struct Channel {
    range: PropertyRange,
    duration_ms: f32,
    easing: Easing,
    kind: ChannelKind,
}

#[derive(Debug)]
pub struct Sequencer {
    cfg: Config,
    ids: IdAllocator,
    gate: MotionGate,
    detector: ViewportDetector,
    rows: Vec<Row>,
    groups: HashMap<GroupId, ResolvedGroup>,
    channels: HashMap<(ElementHandle, Property), Channel>,
    outputs: Outputs,
    /// Events raised between frames (registration-time misses); delivered
    /// with the next update's outputs.
    pending_events: Vec<MotionEvent>,
    load_fired: bool,
    initialized: bool,
}

impl Sequencer {
    /// Create a sequencer; `initial` is the host's reduced-motion signal at
    /// startup (None when unreadable, which defaults to full motion).
    pub fn new(cfg: Config, initial: Option<MotionPreference>) -> Self {
        Self {
            cfg,
            ids: IdAllocator::new(),
            gate: MotionGate::new(initial),
            detector: ViewportDetector::new(),
            rows: Vec::new(),
            groups: HashMap::new(),
            channels: HashMap::new(),
            outputs: Outputs::default(),
            pending_events: Vec::new(),
            load_fired: false,
            initialized: false,
        }
    }

    pub fn preference(&self) -> MotionPreference {
        self.gate.preference()
    }

    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// True once the preset registry has been installed (init_animations).
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub(crate) fn mark_initialized(&mut self) {
        self.initialized = true;
    }

    /// Activation state of a binding, if it exists.
    pub fn binding_state(&self, binding: BindingId) -> Option<ActivationState> {
        self.rows.iter().find(|r| r.id == binding).map(|r| r.state)
    }

    /// Number of in-flight (element, property) channels.
    pub fn active_channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Number of bindings the detector is still observing.
    pub fn watch_count(&self) -> usize {
        self.detector.watch_count()
    }

    /// Total choreography length of a registered group, in milliseconds.
    pub fn group_duration(&self, group: GroupId) -> Option<f32> {
        self.groups.get(&group).map(|g| g.total_ms)
    }

    /// Register one binding with its transition. A selector that resolves to
    /// no live element makes the call a no-op (content may be absent on a
    /// given page), never an error; the returned list is then empty.
    pub fn register(
        &mut self,
        binding: TriggerBinding,
        spec: TransitionSpec,
        resolver: &mut dyn ElementResolver,
    ) -> Result<Vec<BindingId>, String> {
        spec.validate_basic()?;

        let triggers = resolver.resolve(&binding.selector);
        let targets = if spec.target_selector == binding.selector {
            triggers.clone()
        } else {
            resolver.resolve(&spec.target_selector)
        };
        if triggers.is_empty() || targets.is_empty() {
            let missing = if triggers.is_empty() {
                &binding.selector
            } else {
                &spec.target_selector
            };
            log::debug!("register: selector '{missing}' matched nothing, skipping");
            self.pending_events.push(MotionEvent::TargetMissing {
                selector: missing.clone(),
            });
            return Ok(Vec::new());
        }

        // Pair trigger[i] with target[i] when the selectors match one-to-one
        // (per-card entrances, per-card hover images); otherwise every trigger
        // drives the full target list.
        let paired = triggers.len() == targets.len();
        let mut ids = Vec::new();
        for (i, element) in triggers.into_iter().enumerate() {
            if self.has_binding_for(&element, &binding.kind) {
                log::warn!(
                    "element '{element}' already has a {:?} binding, keeping the first",
                    binding.kind
                );
                continue;
            }
            let row_targets = if paired {
                vec![targets[i].clone()]
            } else {
                targets.clone()
            };
            let id = self.ids.alloc_binding();
            self.install_watch(id, &element, &binding);
            self.rows.push(Row {
                id,
                binding: binding.clone(),
                element,
                state: initial_state(&binding),
                payload: Payload::Spec {
                    spec: spec.clone(),
                    targets: row_targets,
                },
            });
            ids.push(id);
        }
        Ok(ids)
    }

    /// Register a named sequence of transitions fired together by one
    /// trigger, staggered by their declared overlaps.
    pub fn register_group(
        &mut self,
        name: &str,
        binding: TriggerBinding,
        members: Vec<GroupMember>,
        resolver: &mut dyn ElementResolver,
    ) -> Result<Option<GroupId>, String> {
        for m in &members {
            m.spec.validate_basic()?;
        }

        let triggers = resolver.resolve(&binding.selector);
        if triggers.is_empty() {
            log::debug!("register_group '{name}': trigger '{}' matched nothing", binding.selector);
            self.pending_events.push(MotionEvent::TargetMissing {
                selector: binding.selector.clone(),
            });
            return Ok(None);
        }

        let starts = member_start_times(&members);
        let total_ms = group_total_duration(&members);
        let mut resolved = Vec::new();
        for (m, start_ms) in members.into_iter().zip(starts) {
            let targets = resolver.resolve(&m.spec.target_selector);
            if targets.is_empty() {
                // Absent member content is fine; the rest of the sequence
                // keeps its declared timing.
                log::debug!(
                    "group '{name}': member '{}' matched nothing, skipping",
                    m.spec.target_selector
                );
                continue;
            }
            resolved.push(ResolvedMember {
                spec: m.spec,
                targets,
                start_ms,
            });
        }
        if resolved.is_empty() {
            self.pending_events.push(MotionEvent::TargetMissing {
                selector: name.to_string(),
            });
            return Ok(None);
        }

        let gid = self.ids.alloc_group();
        self.groups.insert(
            gid,
            ResolvedGroup {
                name: name.to_string(),
                members: resolved,
                total_ms,
            },
        );
        for element in triggers {
            let id = self.ids.alloc_binding();
            self.install_watch(id, &element, &binding);
            self.rows.push(Row {
                id,
                binding: binding.clone(),
                element,
                state: initial_state(&binding),
                payload: Payload::Group(gid),
            });
        }
        Ok(Some(gid))
    }

    /// Run one binding now. Idempotent under `Fired`; respects the motion
    /// gate; a missing target is skipped with a log, never an error.
    pub fn activate(&mut self, binding: BindingId) {
        let Some(idx) = self.rows.iter().position(|r| r.id == binding) else {
            log::debug!("activate: unknown binding {binding:?}");
            return;
        };
        self.fire_row(idx);
    }

    /// Step the sequencer by `dt_ms` with this frame's host inputs,
    /// producing style writes and events.
    pub fn update(&mut self, dt_ms: f32, inputs: Inputs) -> &Outputs {
        self.outputs.clear();
        self.outputs.events.append(&mut self.pending_events);

        // 1) Preference change first: it decides how everything below runs.
        if let Some(pref) = inputs.preference {
            if self.gate.set(pref) {
                self.outputs
                    .push_event(MotionEvent::PreferenceChanged { preference: pref });
                if self.gate.is_reduced() {
                    self.finish_all_in_flight();
                }
            }
        }

        // 2) Structural changes: elements that left the document.
        for element in &inputs.removed {
            self.drop_element(element);
        }

        // 3) Geometry (coalesced into the detector's dirty flag).
        if let Some(vp) = inputs.viewport {
            self.detector.set_viewport(vp);
        }
        for ru in &inputs.rects {
            self.detector.set_rect(&ru.element, ru.rect);
        }

        // 4) Pointer events drive the reversible hover channels.
        for ev in &inputs.hover {
            self.apply_hover(&ev.element, ev.entered);
        }

        // 5) OnLoad bindings fire on the first frame after init.
        if !self.load_fired {
            self.load_fired = true;
            let load_rows: Vec<usize> = self
                .rows
                .iter()
                .enumerate()
                .filter(|(_, r)| matches!(r.binding.kind, TriggerKind::OnLoad))
                .map(|(i, _)| i)
                .collect();
            for idx in load_rows {
                self.fire_row(idx);
            }
        }

        // 6) One detector pass per frame, at most.
        let mut signals = Vec::new();
        self.detector.evaluate(&mut signals);
        for ev in signals {
            match ev.signal {
                DetectorSignal::Entered => {
                    self.outputs
                        .push_event(MotionEvent::Entered { binding: ev.binding });
                    if let Some(idx) = self.rows.iter().position(|r| r.id == ev.binding) {
                        self.fire_row(idx);
                    }
                }
                DetectorSignal::Exited => {
                    self.outputs
                        .push_event(MotionEvent::Exited { binding: ev.binding });
                    if let Some(row) = self.rows.iter_mut().find(|r| r.id == ev.binding) {
                        if row.state == ActivationState::Active && !row.binding.once {
                            row.state = ActivationState::Armed;
                        }
                    }
                }
                DetectorSignal::Progress(p) => self.apply_scrub(ev.binding, p),
            }
        }

        // 7) Advance channels and emit writes.
        self.advance_channels(dt_ms);

        // 8) Backpressure on events.
        if self.outputs.events.len() > self.cfg.max_events_per_tick {
            self.outputs.events.truncate(self.cfg.max_events_per_tick);
        }

        &self.outputs
    }

    fn has_binding_for(&self, element: &str, kind: &TriggerKind) -> bool {
        self.rows.iter().any(|r| {
            r.element == element
                && std::mem::discriminant(&r.binding.kind) == std::mem::discriminant(kind)
        })
    }

    fn install_watch(&mut self, id: BindingId, element: &str, binding: &TriggerBinding) {
        match binding.kind {
            TriggerKind::OnScrollIntoView { threshold } => {
                self.detector
                    .observe_discrete(id, element.to_string(), threshold, binding.once);
            }
            TriggerKind::OnScrollScrub { start, end } => {
                self.detector
                    .observe_scrub(id, element.to_string(), start, end);
            }
            TriggerKind::OnLoad | TriggerKind::OnHoverEnter | TriggerKind::OnHoverLeave => {}
        }
    }

    /// Execute a row's payload. The caller resolved the index.
    fn fire_row(&mut self, idx: usize) {
        let row = self.rows[idx].clone();
        if row.state == ActivationState::Fired {
            return;
        }

        let reduced = self.gate.is_reduced();
        match &row.payload {
            Payload::Spec { spec, targets } => {
                if targets.is_empty() {
                    log::warn!(
                        "activation of {:?} skipped: target '{}' no longer in the document",
                        row.id,
                        spec.target_selector
                    );
                } else {
                    for target in targets {
                        self.launch_spec(target, spec, spec.start_offset_ms, reduced);
                    }
                }
            }
            Payload::Group(gid) => {
                let Some(group) = self.groups.get(gid).cloned() else {
                    return;
                };
                log::debug!("starting sequence '{}' ({} members)", group.name, group.members.len());
                for member in &group.members {
                    for target in &member.targets {
                        self.launch_spec(
                            target,
                            &member.spec,
                            member.start_ms + member.spec.start_offset_ms,
                            reduced,
                        );
                    }
                }
            }
        }

        let row = &mut self.rows[idx];
        if row.binding.once {
            row.state = ActivationState::Fired;
            self.detector.retire(row.id);
            self.outputs
                .push_event(MotionEvent::BindingRetired { binding: row.id });
        } else {
            row.state = ActivationState::Active;
        }
    }

    /// Start (or short-circuit, under reduced motion) every property range of
    /// a spec on one target element.
    fn launch_spec(&mut self, target: &str, spec: &TransitionSpec, delay_ms: f32, reduced: bool) {
        for range in &spec.ranges {
            let key = (target.to_string(), range.property);
            if reduced {
                // Final state immediately, zero intermediate frames.
                self.cancel_channel(&key);
                self.outputs.push_write(StyleWrite {
                    element: target.to_string(),
                    property: range.property,
                    value: range.to,
                });
                continue;
            }
            self.cancel_channel(&key);
            self.outputs.push_event(MotionEvent::TransitionStarted {
                element: target.to_string(),
                property: range.property,
            });
            self.channels.insert(
                key,
                Channel {
                    range: *range,
                    duration_ms: spec.duration_ms,
                    easing: spec.easing,
                    kind: ChannelKind::Tween {
                        delay_ms,
                        elapsed_ms: 0.0,
                    },
                },
            );
        }
    }

    /// Remove an in-flight channel on this key, reporting the interruption.
    /// Hover channels are not removed here; they flip instead (apply_hover).
    fn cancel_channel(&mut self, key: &(ElementHandle, Property)) {
        if self.channels.remove(key).is_some() {
            self.outputs.push_event(MotionEvent::TransitionInterrupted {
                element: key.0.clone(),
                property: key.1,
            });
        }
    }

    fn apply_hover(&mut self, element: &str, entered: bool) {
        let wanted = if entered {
            TriggerKind::OnHoverEnter
        } else {
            TriggerKind::OnHoverLeave
        };
        let matched: Vec<Row> = self
            .rows
            .iter()
            .filter(|r| r.element == element && r.binding.kind == wanted)
            .cloned()
            .collect();

        for row in matched {
            let Payload::Spec { spec, targets } = &row.payload else {
                continue;
            };
            let reduced = self.gate.is_reduced();
            for target in targets {
                for range in &spec.ranges {
                    // Canonical hover direction is the enter range; a leave
                    // spec authored target->base is stored reversed so both
                    // events drive one channel.
                    let canonical = if entered {
                        *range
                    } else {
                        PropertyRange::new(range.property, range.to, range.from)
                    };
                    if reduced {
                        let value = if entered { canonical.to } else { canonical.from };
                        self.channels.remove(&(target.clone(), range.property));
                        self.outputs.push_write(StyleWrite {
                            element: target.clone(),
                            property: range.property,
                            value,
                        });
                        continue;
                    }
                    let key = (target.clone(), range.property);
                    let mut flipped = false;
                    if let Some(ch) = self.channels.get_mut(&key) {
                        // Reversal continues from the current progress: no
                        // restart, no visual jump.
                        if let ChannelKind::Hover {
                            forward, settled, ..
                        } = &mut ch.kind
                        {
                            *forward = entered;
                            *settled = false;
                            flipped = true;
                        }
                        if flipped {
                            ch.duration_ms = spec.duration_ms;
                            ch.easing = spec.easing;
                        }
                    }
                    if !flipped {
                        // A leave with no prior enter leaves the element at
                        // its base state; nothing to do.
                        if !entered {
                            continue;
                        }
                        self.cancel_channel(&key);
                        self.outputs.push_event(MotionEvent::TransitionStarted {
                            element: target.clone(),
                            property: range.property,
                        });
                        self.channels.insert(
                            key,
                            Channel {
                                range: canonical,
                                duration_ms: spec.duration_ms,
                                easing: spec.easing,
                                kind: ChannelKind::Hover {
                                    progress: 0.0,
                                    forward: true,
                                    settled: false,
                                },
                            },
                        );
                    }
                }
            }
            if let Some(r) = self.rows.iter_mut().find(|r| r.id == row.id) {
                r.state = if entered {
                    ActivationState::Active
                } else {
                    ActivationState::Armed
                };
            }
        }
    }

    fn apply_scrub(&mut self, binding: BindingId, progress: f32) {
        if self.gate.is_reduced() {
            // Scrub has no terminal state; under reduced motion it is
            // suppressed entirely and the static layout stands.
            return;
        }
        let Some(row) = self.rows.iter().find(|r| r.id == binding).cloned() else {
            return;
        };
        let Payload::Spec { spec, targets } = &row.payload else {
            return;
        };
        for target in targets {
            for range in &spec.ranges {
                let key = (target.clone(), range.property);
                let mut updated = false;
                if let Some(ch) = self.channels.get_mut(&key) {
                    if let ChannelKind::Scrub { progress: p, dirty } = &mut ch.kind {
                        if *p != progress {
                            *p = progress;
                            *dirty = true;
                        }
                        updated = true;
                    }
                }
                if !updated {
                    self.cancel_channel(&key);
                    self.channels.insert(
                        key,
                        Channel {
                            range: *range,
                            duration_ms: spec.duration_ms,
                            easing: spec.easing,
                            kind: ChannelKind::Scrub {
                                progress,
                                dirty: true,
                            },
                        },
                    );
                }
            }
        }
    }

    /// Advance every channel by dt and emit this frame's writes.
    fn advance_channels(&mut self, dt_ms: f32) {
        let mut finished: Vec<(ElementHandle, Property)> = Vec::new();

        for (key, ch) in self.channels.iter_mut() {
            match &mut ch.kind {
                ChannelKind::Tween {
                    delay_ms,
                    elapsed_ms,
                } => {
                    let mut dt_left = dt_ms;
                    if *delay_ms > 0.0 {
                        if dt_left < *delay_ms {
                            *delay_ms -= dt_left;
                            continue;
                        }
                        dt_left -= *delay_ms;
                        *delay_ms = 0.0;
                    }
                    *elapsed_ms += dt_left;
                    let t = if ch.duration_ms <= 0.0 {
                        1.0
                    } else {
                        (*elapsed_ms / ch.duration_ms).clamp(0.0, 1.0)
                    };
                    self.outputs.writes.push(StyleWrite {
                        element: key.0.clone(),
                        property: key.1,
                        value: ch.range.at(ch.easing.eval(t)),
                    });
                    if t >= 1.0 {
                        finished.push(key.clone());
                    }
                }
                ChannelKind::Hover {
                    progress,
                    forward,
                    settled,
                } => {
                    if *settled {
                        continue;
                    }
                    let step = if ch.duration_ms <= 0.0 {
                        1.0
                    } else {
                        dt_ms / ch.duration_ms
                    };
                    *progress = if *forward {
                        (*progress + step).min(1.0)
                    } else {
                        (*progress - step).max(0.0)
                    };
                    self.outputs.writes.push(StyleWrite {
                        element: key.0.clone(),
                        property: key.1,
                        value: ch.range.at(ch.easing.eval(*progress)),
                    });
                    if (*forward && *progress >= 1.0) || (!*forward && *progress <= 0.0) {
                        *settled = true;
                        self.outputs.events.push(MotionEvent::TransitionFinished {
                            element: key.0.clone(),
                            property: key.1,
                        });
                    }
                }
                ChannelKind::Scrub { progress, dirty } => {
                    if !*dirty {
                        continue;
                    }
                    *dirty = false;
                    self.outputs.writes.push(StyleWrite {
                        element: key.0.clone(),
                        property: key.1,
                        value: ch.range.at(ch.easing.eval(*progress)),
                    });
                }
            }
        }

        for key in finished {
            self.channels.remove(&key);
            self.outputs.push_event(MotionEvent::TransitionFinished {
                element: key.0,
                property: key.1,
            });
        }
    }

    /// Full -> Reduced mid-flight: every in-flight animation jumps to its end
    /// state this frame; nothing is left visually stranded.
    fn finish_all_in_flight(&mut self) {
        let keys: Vec<(ElementHandle, Property)> = self.channels.keys().cloned().collect();
        for key in keys {
            let Some(ch) = self.channels.remove(&key) else {
                continue;
            };
            let end_value = match ch.kind {
                ChannelKind::Tween { .. } => ch.range.to,
                ChannelKind::Hover { forward, .. } => {
                    if forward {
                        ch.range.to
                    } else {
                        ch.range.from
                    }
                }
                // Scrub carries no end state; drop it without a write.
                ChannelKind::Scrub { .. } => continue,
            };
            self.outputs.push_write(StyleWrite {
                element: key.0.clone(),
                property: key.1,
                value: end_value,
            });
            self.outputs.push_event(MotionEvent::TransitionFinished {
                element: key.0,
                property: key.1,
            });
        }
    }

    /// Element left the document: drop its watches, channels and rows.
    fn drop_element(&mut self, element: &str) {
        self.detector.remove_element(element);
        self.channels.retain(|key, _| key.0 != element);
        let before = self.rows.len();
        self.rows.retain(|r| r.element != element);
        if self.rows.len() != before {
            log::debug!(
                "dropped {} binding(s) for removed element '{element}'",
                before - self.rows.len()
            );
        }
        // Rows triggered elsewhere may still point at the element; strip it
        // so activation skips cleanly.
        for row in &mut self.rows {
            if let Payload::Spec { targets, .. } = &mut row.payload {
                targets.retain(|t| t != element);
            }
        }
        for group in self.groups.values_mut() {
            for member in &mut group.members {
                member.targets.retain(|t| t != element);
            }
        }
    }
}

fn initial_state(binding: &TriggerBinding) -> ActivationState {
    match binding.kind {
        // Observed from registration on.
        TriggerKind::OnScrollIntoView { .. }
        | TriggerKind::OnScrollScrub { .. }
        | TriggerKind::OnHoverEnter
        | TriggerKind::OnHoverLeave => ActivationState::Armed,
        TriggerKind::OnLoad => ActivationState::Pending,
    }
}
