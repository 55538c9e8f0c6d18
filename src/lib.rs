//! Stackform generates the constraint set that lays out a linear stack of boxes.
//!
//! A [`StackContainer`] owns an ordered list of arranged boxes and a [`StackConfig`] (axis,
//! cross-axis alignment, main-axis distribution, spacing, margins). Whenever the arrangement or
//! the configuration changes, the container throws its constraints away and derives a fresh
//! set, which an external solver turns into geometry.
//!
//! # Pipeline overview
//!
//! 1. **Plan**: `StackConfig + visible count -> ScaffoldPlan` (which helper boxes are needed)
//! 2. **Scaffold**: [`SpacerFactory`] inserts the planned zero-content boxes into the host
//! 3. **Build**: [`ConstraintBuilder`] turns boxes, config and scaffold into [`Constraint`]s
//! 4. **Install**: the container hands the result to the host's [`LayoutEngine`]
//!
//! Hiding and showing arranged boxes is animated through the [`VisibilityCoordinator`], which
//! rebuilds for the target state first and defers the real flag write until the host reports
//! that the animation has stopped.
//!
//! The host is abstracted by the [`ViewLayer`], [`LayoutEngine`] and [`Animator`] traits.
//! [`MemoryHost`] is an in-process implementation used by the CLI and the tests.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod animation;
mod foundation;
mod host;
mod layout;
mod scene;
mod stack;

pub use animation::visibility::{QueueEntry, Transition, VisibilityCoordinator};
pub use foundation::core::{BoxId, Edges, Item, ObserverId, Size};
pub use foundation::error::{StackError, StackResult};
pub use host::memory::{AnimationId, MemoryHost};
pub use host::{Animator, Capabilities, HIDDEN_KEY, Host, LayoutEngine, Notification, ViewLayer};
pub use layout::builder::{
    ArrangedBox, BOTTOM_MARGIN_GUIDE, ConstraintBuilder, LEFT_MARGIN_GUIDE, RIGHT_MARGIN_GUIDE,
    TOP_MARGIN_GUIDE,
};
pub use layout::config::{Alignment, Axis, Distribution, StackConfig};
pub use layout::constraint::{Attribute, Constraint, Priority, Relation, priority_countdown};
pub use layout::spacer::{Scaffold, ScaffoldPlan, ScaffoldRole, SpacerFactory};
pub use scene::{Scene, SceneBox, SceneLayout};
pub use stack::container::StackContainer;
