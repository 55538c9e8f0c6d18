//! Animated show/hide of arranged boxes.
//!
//! When a box's hidden flag flips, the container rebuilds its constraints for the new state
//! right away so the running animation has a target geometry. The flag itself stays cleared
//! until the animation completes; setting it immediately would make the box vanish before the
//! animation could play. Transitions waiting on an animation sit in a queue,
//! newest first, and are settled when the host reports a stopped animation context.

use std::collections::VecDeque;

use crate::{
    foundation::core::{BoxId, ObserverId},
    host::{Animator, HIDDEN_KEY, ViewLayer},
};

/// A transition waiting for its animation to finish.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct QueueEntry {
    /// Transitioning box.
    pub id: BoxId,
    /// Hidden flag to apply once the box has no animation in flight.
    pub hidden: bool,
}

/// How a flag flip was resolved.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Transition {
    /// The box was animating; the flag is applied on a later completion signal.
    Queued,
    /// No animation was running; the flag was applied immediately.
    Settled,
}

/// Per-container visibility state machine.
///
/// A box moves `Visible -> AnimatingToHidden -> Hidden` or `Hidden -> AnimatingToVisible ->
/// Visible`; the in-between states are represented by queue entries and by the
/// animating-to-hidden set.
#[derive(Debug)]
pub struct VisibilityCoordinator {
    observer: ObserverId,
    registered: Vec<BoxId>,
    animating_to_hidden: Vec<BoxId>,
    queue: VecDeque<QueueEntry>,
}

impl VisibilityCoordinator {
    /// Coordinator that registers with the host as `observer`.
    pub fn new(observer: ObserverId) -> Self {
        Self {
            observer,
            registered: Vec::new(),
            animating_to_hidden: Vec::new(),
            queue: VecDeque::new(),
        }
    }

    /// Observer identity used for host registrations.
    pub fn observer(&self) -> ObserverId {
        self.observer
    }

    /// `true` while a hidden-flag listener is registered for `id`.
    pub fn is_registered(&self, id: BoxId) -> bool {
        self.registered.contains(&id)
    }

    /// `true` while `id` is animating towards hidden.
    pub fn is_animating_to_hidden(&self, id: BoxId) -> bool {
        self.animating_to_hidden.contains(&id)
    }

    /// Pending transitions, newest first.
    pub fn pending(&self) -> impl Iterator<Item = &QueueEntry> + '_ {
        self.queue.iter()
    }

    /// Hidden for layout purposes: flag set, or on its way to hidden.
    pub fn is_hidden<V: ViewLayer + ?Sized>(&self, host: &V, id: BoxId) -> bool {
        host.is_hidden(id) || self.is_animating_to_hidden(id)
    }

    /// The flag value `id` will settle on: the newest pending target, else the current flag.
    pub fn requested_hidden<V: ViewLayer + ?Sized>(&self, host: &V, id: BoxId) -> bool {
        self.queue
            .iter()
            .find(|e| e.id == id)
            .map_or_else(|| host.is_hidden(id), |e| e.hidden)
    }

    fn is_suspended(&self, id: BoxId) -> bool {
        self.queue.iter().any(|e| e.id == id)
    }

    /// Subscribe to `id`'s hidden flag. At most one registration per box; boxes with a pending
    /// transition are subscribed again when it settles.
    pub fn register<V: ViewLayer + ?Sized>(&mut self, host: &mut V, id: BoxId) {
        if self.is_registered(id) || self.is_suspended(id) {
            return;
        }
        host.add_observer(id, HIDDEN_KEY, self.observer);
        self.registered.push(id);
        tracing::trace!(box_id = %id, "hidden listener registered");
    }

    /// Drop the hidden-flag subscription for `id`, if any.
    pub fn unregister<V: ViewLayer + ?Sized>(&mut self, host: &mut V, id: BoxId) {
        let Some(pos) = self.registered.iter().position(|&b| b == id) else {
            return;
        };
        host.remove_observer(id, HIDDEN_KEY, self.observer);
        self.registered.remove(pos);
        tracing::trace!(box_id = %id, "hidden listener removed");
    }

    /// Write the flag without our own listener hearing about it.
    pub(crate) fn write_quietly<V: ViewLayer + ?Sized>(
        &mut self,
        host: &mut V,
        id: BoxId,
        hidden: bool,
    ) {
        let registered = self.is_registered(id);
        if registered {
            host.remove_observer(id, HIDDEN_KEY, self.observer);
        }
        host.set_hidden(id, hidden);
        if registered {
            host.add_observer(id, HIDDEN_KEY, self.observer);
        }
    }

    /// First step of a flip: record the target so the next rebuild already treats a box heading
    /// for hidden as hidden, and a box heading back to visible as visible.
    pub fn begin_transition(&mut self, id: BoxId, hidden: bool) {
        if hidden {
            if !self.is_animating_to_hidden(id) {
                self.animating_to_hidden.push(id);
            }
        } else {
            self.animating_to_hidden.retain(|&b| b != id);
        }
    }

    /// Second half of a flip, run after the rebuild: silence the listener, keep the box visible
    /// while its animation plays and either queue the target behind the running animation or
    /// apply it now.
    ///
    /// A box heading for hidden stays hidden for layout through the animating-to-hidden set; a
    /// box heading for visible is visible for layout as soon as its flag is cleared.
    #[tracing::instrument(skip(self, host, arranged))]
    pub fn defer_flag<H: ViewLayer + Animator + ?Sized>(
        &mut self,
        host: &mut H,
        id: BoxId,
        hidden: bool,
        arranged: &[BoxId],
    ) -> Transition {
        self.unregister(host, id);
        host.set_hidden(id, false);

        if host.has_animations(id) {
            self.queue.push_front(QueueEntry { id, hidden });
            host.notify_animation_stop(self.observer, id);
            tracing::debug!(hidden, pending = self.queue.len(), "transition queued");
            Transition::Queued
        } else {
            self.finish(host, id, hidden, arranged);
            Transition::Settled
        }
    }

    /// Completion signal for one animation context.
    ///
    /// Settles every queued box with no animation left in flight. Only the newest entry of a box
    /// is applied; older entries of the same box are dropped as superseded. Returns the number
    /// of boxes settled.
    #[tracing::instrument(skip_all, fields(pending = self.queue.len()))]
    pub fn animation_did_stop<H: ViewLayer + Animator + ?Sized>(
        &mut self,
        host: &mut H,
        arranged: &[BoxId],
    ) -> usize {
        let mut settled: Vec<BoxId> = Vec::new();
        let mut remaining = VecDeque::with_capacity(self.queue.len());
        let mut ready = Vec::new();

        for entry in self.queue.drain(..) {
            if settled.contains(&entry.id) {
                continue;
            }
            if host.has_animations(entry.id) {
                remaining.push_back(entry);
            } else {
                settled.push(entry.id);
                ready.push(entry);
            }
        }
        self.queue = remaining;

        for entry in &ready {
            self.finish(host, entry.id, entry.hidden, arranged);
        }
        tracing::debug!(settled = ready.len(), "animation stopped");
        ready.len()
    }

    fn finish<V: ViewLayer + ?Sized>(
        &mut self,
        host: &mut V,
        id: BoxId,
        hidden: bool,
        arranged: &[BoxId],
    ) {
        self.queue.retain(|e| e.id != id);
        host.set_hidden(id, hidden);
        self.animating_to_hidden.retain(|&b| b != id);
        if arranged.contains(&id) {
            self.register(host, id);
        }
        tracing::debug!(box_id = %id, hidden, "transition settled");
    }

    /// Unsubscribe from every box, keeping queued transitions so their completions still apply.
    pub fn unregister_all<V: ViewLayer + ?Sized>(&mut self, host: &mut V) {
        for id in std::mem::take(&mut self.registered) {
            host.remove_observer(id, HIDDEN_KEY, self.observer);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/visibility.rs"]
mod tests;
