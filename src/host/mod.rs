//! Collaborator seams between a stack container and its host toolkit.
//!
//! The host owns the view hierarchy, solves installed constraints into geometry and runs
//! animations. A container only ever talks to it through these traits, always on the host's
//! control thread.

pub(crate) mod memory;

use crate::{
    foundation::core::{BoxId, Edges, ObserverId, Size},
    layout::constraint::Constraint,
    layout::spacer::ScaffoldRole,
};

/// Attribute name under which hidden-flag observers are registered.
pub const HIDDEN_KEY: &str = "hidden";

/// Host features resolved once when a container is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Capabilities {
    /// The engine understands margin-inset attributes (`leftMargin`, ...) on the container.
    #[serde(default)]
    pub native_layout_margins: bool,
}

/// A value change delivered to a registered observer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Notification {
    /// Receiving observer.
    pub observer: ObserverId,
    /// Box whose attribute changed.
    pub id: BoxId,
    /// Observed attribute name.
    pub key: &'static str,
    /// Value before the change.
    pub old: bool,
    /// Value after the change.
    pub new: bool,
}

/// View hierarchy: box flags, intrinsic sizes, observers and scaffold insertion.
pub trait ViewLayer {
    /// Current hidden flag of `id`.
    fn is_hidden(&self, id: BoxId) -> bool;
    /// Write the hidden flag, notifying observers registered under [`HIDDEN_KEY`].
    fn set_hidden(&mut self, id: BoxId, hidden: bool);
    /// Preferred size of `id`.
    fn intrinsic_size(&self, id: BoxId) -> Size;
    /// Register `observer` for changes of `key` on `id`.
    fn add_observer(&mut self, id: BoxId, key: &'static str, observer: ObserverId);
    /// Drop a registration made with [`ViewLayer::add_observer`].
    fn remove_observer(&mut self, id: BoxId, key: &'static str, observer: ObserverId);
    /// Insert a zero-content scaffold box into the container.
    fn insert_spacer(&mut self, role: ScaffoldRole) -> BoxId;
    /// Remove and destroy a scaffold box.
    fn remove_spacer(&mut self, id: BoxId);
}

/// Constraint solver.
pub trait LayoutEngine {
    /// Install constraints.
    fn add_constraints(&mut self, constraints: &[Constraint]);
    /// Uninstall constraints previously handed to [`LayoutEngine::add_constraints`].
    fn remove_constraints(&mut self, constraints: &[Constraint]);
    /// Update the container's native margin insets.
    fn set_layout_margins(&mut self, margins: Edges);
    /// Solve pending changes into geometry now.
    fn layout_if_needed(&mut self);
}

/// Animation subsystem.
pub trait Animator {
    /// `true` while any animation is running on `id`.
    fn has_animations(&self, id: BoxId) -> bool;
    /// Ask for one completion signal from the animation context currently animating `id`,
    /// delivered to `observer` on the control thread.
    fn notify_animation_stop(&mut self, observer: ObserverId, id: BoxId);
}

/// Everything a stack container needs from its host.
pub trait Host: ViewLayer + LayoutEngine + Animator {}

impl<T: ViewLayer + LayoutEngine + Animator + ?Sized> Host for T {}
