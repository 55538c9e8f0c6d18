use std::collections::{BTreeMap, VecDeque};

use crate::{
    foundation::core::{BoxId, Edges, ObserverId, Size},
    host::{Animator, HIDDEN_KEY, LayoutEngine, Notification, ViewLayer},
    layout::constraint::Constraint,
    layout::spacer::ScaffoldRole,
};

#[derive(Clone, Debug)]
struct HostBox {
    hidden: bool,
    intrinsic_size: Size,
    role: Option<ScaffoldRole>,
    animations: u32,
}

/// Handle to an animation context opened with [`MemoryHost::begin_animation`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AnimationId(u32);

#[derive(Clone, Debug)]
struct AnimationContext {
    id: AnimationId,
    boxes: Vec<BoxId>,
    stop_observers: Vec<ObserverId>,
}

/// In-process host: keeps box flags, an observer registry, installed constraints and animation
/// contexts in memory.
///
/// It does not solve anything; it records what a real host would be asked to do. Observer
/// notifications are queued and handed out by [`MemoryHost::drain_notifications`] so the caller
/// can forward them to the container on its own schedule.
#[derive(Debug, Default)]
pub struct MemoryHost {
    boxes: BTreeMap<BoxId, HostBox>,
    next_box: u32,
    observers: BTreeMap<(BoxId, &'static str), Vec<ObserverId>>,
    notifications: VecDeque<Notification>,
    constraints: Vec<Constraint>,
    margins: Edges,
    layout_passes: usize,
    contexts: Vec<AnimationContext>,
    next_animation: u32,
}

impl MemoryHost {
    /// Empty host.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a visible content box with the given preferred size.
    pub fn add_box(&mut self, intrinsic_size: Size) -> BoxId {
        self.insert(intrinsic_size, None)
    }

    fn insert(&mut self, intrinsic_size: Size, role: Option<ScaffoldRole>) -> BoxId {
        let id = BoxId(self.next_box);
        self.next_box += 1;
        self.boxes.insert(
            id,
            HostBox {
                hidden: false,
                intrinsic_size,
                role,
                animations: 0,
            },
        );
        id
    }

    /// `true` while `id` exists in the hierarchy.
    pub fn contains(&self, id: BoxId) -> bool {
        self.boxes.contains_key(&id)
    }

    /// Change the preferred size of `id`.
    pub fn set_intrinsic_size(&mut self, id: BoxId, intrinsic_size: Size) {
        if let Some(b) = self.boxes.get_mut(&id) {
            b.intrinsic_size = intrinsic_size;
        }
    }

    /// Scaffold boxes currently in the hierarchy.
    pub fn spacers(&self) -> impl Iterator<Item = (BoxId, ScaffoldRole)> + '_ {
        self.boxes
            .iter()
            .filter_map(|(&id, b)| b.role.map(|role| (id, role)))
    }

    /// Number of scaffold boxes currently in the hierarchy.
    pub fn spacer_count(&self) -> usize {
        self.spacers().count()
    }

    /// Installed constraints, in installation order.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Number of observers registered for `key` on `id`.
    pub fn observer_count(&self, id: BoxId, key: &'static str) -> usize {
        self.observers.get(&(id, key)).map_or(0, Vec::len)
    }

    /// Take every queued observer notification.
    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain(..).collect()
    }

    /// Margin insets last pushed by a container.
    pub fn layout_margins(&self) -> Edges {
        self.margins
    }

    /// Number of solve passes requested so far.
    pub fn layout_passes(&self) -> usize {
        self.layout_passes
    }

    /// Start an animation on `boxes`. A completion request for a box attaches to the newest
    /// running context that animates it.
    pub fn begin_animation(&mut self, boxes: &[BoxId]) -> AnimationId {
        let id = AnimationId(self.next_animation);
        self.next_animation += 1;
        for b in boxes {
            if let Some(hb) = self.boxes.get_mut(b) {
                hb.animations += 1;
            }
        }
        self.contexts.push(AnimationContext {
            id,
            boxes: boxes.to_vec(),
            stop_observers: Vec::new(),
        });
        id
    }

    /// Finish an animation context. Returns the observers owed a completion signal; the caller
    /// delivers one signal to each.
    pub fn finish_animation(&mut self, id: AnimationId) -> Vec<ObserverId> {
        let Some(pos) = self.contexts.iter().position(|c| c.id == id) else {
            return Vec::new();
        };
        let ctx = self.contexts.remove(pos);
        for b in &ctx.boxes {
            if let Some(hb) = self.boxes.get_mut(b) {
                hb.animations = hb.animations.saturating_sub(1);
            }
        }
        ctx.stop_observers
    }
}

impl ViewLayer for MemoryHost {
    fn is_hidden(&self, id: BoxId) -> bool {
        self.boxes.get(&id).is_some_and(|b| b.hidden)
    }

    fn set_hidden(&mut self, id: BoxId, hidden: bool) {
        let Some(b) = self.boxes.get_mut(&id) else {
            return;
        };
        let old = b.hidden;
        b.hidden = hidden;
        if old == hidden {
            return;
        }
        for &observer in self.observers.get(&(id, HIDDEN_KEY)).into_iter().flatten() {
            self.notifications.push_back(Notification {
                observer,
                id,
                key: HIDDEN_KEY,
                old,
                new: hidden,
            });
        }
    }

    fn intrinsic_size(&self, id: BoxId) -> Size {
        self.boxes
            .get(&id)
            .map_or(Size::ZERO, |b| b.intrinsic_size)
    }

    fn add_observer(&mut self, id: BoxId, key: &'static str, observer: ObserverId) {
        self.observers.entry((id, key)).or_default().push(observer);
    }

    fn remove_observer(&mut self, id: BoxId, key: &'static str, observer: ObserverId) {
        if let Some(list) = self.observers.get_mut(&(id, key)) {
            if let Some(pos) = list.iter().position(|&o| o == observer) {
                list.remove(pos);
            }
            if list.is_empty() {
                self.observers.remove(&(id, key));
            }
        }
    }

    fn insert_spacer(&mut self, role: ScaffoldRole) -> BoxId {
        self.insert(Size::ZERO, Some(role))
    }

    fn remove_spacer(&mut self, id: BoxId) {
        if self.boxes.get(&id).is_some_and(|b| b.role.is_some()) {
            self.boxes.remove(&id);
            self.observers.retain(|(b, _), _| *b != id);
        }
    }
}

impl LayoutEngine for MemoryHost {
    fn add_constraints(&mut self, constraints: &[Constraint]) {
        self.constraints.extend_from_slice(constraints);
    }

    fn remove_constraints(&mut self, constraints: &[Constraint]) {
        for c in constraints {
            if let Some(pos) = self.constraints.iter().position(|installed| installed == c) {
                self.constraints.remove(pos);
            }
        }
    }

    fn set_layout_margins(&mut self, margins: Edges) {
        self.margins = margins;
    }

    fn layout_if_needed(&mut self) {
        self.layout_passes += 1;
    }
}

impl Animator for MemoryHost {
    fn has_animations(&self, id: BoxId) -> bool {
        self.boxes.get(&id).is_some_and(|b| b.animations > 0)
    }

    fn notify_animation_stop(&mut self, observer: ObserverId, id: BoxId) {
        if let Some(ctx) = self.contexts.iter_mut().rev().find(|c| c.boxes.contains(&id))
            && !ctx.stop_observers.contains(&observer)
        {
            ctx.stop_observers.push(observer);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/memory.rs"]
mod tests;
