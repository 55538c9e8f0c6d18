use std::fmt;

pub use kurbo::Size;

use crate::foundation::error::{StackError, StackResult};

/// Opaque handle to a box living in the host view hierarchy.
///
/// The host owns every box. A container only ever destroys the scaffold boxes it asked the host
/// to create.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct BoxId(pub u32);

impl fmt::Display for BoxId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "box#{}", self.0)
    }
}

/// Identity of a value observer registered with the host view layer.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ObserverId(pub u32);

/// One side of a constraint: the stack container itself or a box it lays out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Item {
    /// The stack container.
    Container,
    /// An arranged or scaffold box.
    Box(BoxId),
}

impl From<BoxId> for Item {
    fn from(value: BoxId) -> Self {
        Self::Box(value)
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Container => f.write_str("container"),
            Self::Box(id) => id.fmt(f),
        }
    }
}

/// Four-sided inset in layout points.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq)]
pub struct Edges {
    /// Top inset.
    #[serde(default)]
    pub top: f64,
    /// Left inset.
    #[serde(default)]
    pub left: f64,
    /// Bottom inset.
    #[serde(default)]
    pub bottom: f64,
    /// Right inset.
    #[serde(default)]
    pub right: f64,
}

impl Edges {
    /// The same inset on every side.
    pub fn all(value: f64) -> Self {
        Self {
            top: value,
            left: value,
            bottom: value,
            right: value,
        }
    }

    pub(crate) fn validate(&self) -> StackResult<()> {
        let sides = [self.top, self.left, self.bottom, self.right];
        if sides.iter().any(|v| !v.is_finite()) {
            return Err(StackError::validation("layout margins must be finite"));
        }
        Ok(())
    }
}

impl Default for Edges {
    fn default() -> Self {
        Self::all(8.0)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
