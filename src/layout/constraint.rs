use std::fmt;

use crate::foundation::core::Item;

/// Geometric attribute of an item that a constraint can relate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Attribute {
    /// Left edge.
    Left,
    /// Right edge.
    Right,
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
    /// Leading edge (left in left-to-right layouts).
    Leading,
    /// Trailing edge (right in left-to-right layouts).
    Trailing,
    /// Width.
    Width,
    /// Height.
    Height,
    /// Horizontal center.
    CenterX,
    /// Vertical center.
    CenterY,
    /// Baseline of the first line of content.
    FirstBaseline,
    /// Left edge inset by the item's layout margins.
    LeftMargin,
    /// Right edge inset by the item's layout margins.
    RightMargin,
    /// Top edge inset by the item's layout margins.
    TopMargin,
    /// Bottom edge inset by the item's layout margins.
    BottomMargin,
}

impl Attribute {
    /// Stable lower-camel-case name used in diagnostics.
    pub fn name(self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Leading => "leading",
            Self::Trailing => "trailing",
            Self::Width => "width",
            Self::Height => "height",
            Self::CenterX => "centerX",
            Self::CenterY => "centerY",
            Self::FirstBaseline => "firstBaseline",
            Self::LeftMargin => "leftMargin",
            Self::RightMargin => "rightMargin",
            Self::TopMargin => "topMargin",
            Self::BottomMargin => "bottomMargin",
        }
    }
}

/// Relation between the two sides of a constraint.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// `first <= second`.
    LessOrEqual,
    /// `first == second`.
    Equal,
    /// `first >= second`.
    GreaterOrEqual,
}

impl Relation {
    /// Symbol used when rendering a constraint.
    pub fn symbol(self) -> &'static str {
        match self {
            Self::LessOrEqual => "<=",
            Self::Equal => "==",
            Self::GreaterOrEqual => ">=",
        }
    }
}

/// Solver priority in `[1, 1000]`; 1000 is required.
///
/// Fractional values are allowed so a constraint can sit just below required and still beat
/// every integer-priority competitor.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize)]
pub struct Priority(f32);

impl Priority {
    /// Required priority; the solver must satisfy these.
    pub const REQUIRED: Self = Self(1000.0);
    /// Lowest representable priority.
    pub const MIN: Self = Self(1.0);

    pub(crate) const ALIGNED_EDGE: Self = Self(999.5);
    pub(crate) const EQUAL_CENTERING: Self = Self(150.0);
    pub(crate) const SPANNER_THICKNESS: Self = Self(51.0);
    pub(crate) const FITTING_SIZE: Self = Self(49.0);
    pub(crate) const CROSS_AXIS_GUIDE: Self = Self(25.0);

    /// Build a priority, clamping into `[1, 1000]`. NaN maps to required.
    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self::REQUIRED;
        }
        Self(value.clamp(Self::MIN.0, Self::REQUIRED.0))
    }

    /// Raw priority value.
    pub fn value(self) -> f32 {
        self.0
    }

    /// `true` when the solver may not relax this constraint.
    pub fn is_required(self) -> bool {
        self.0 >= Self::REQUIRED.0
    }

    /// This priority lowered by `steps` whole units, never below [`Priority::MIN`].
    pub fn stepped_down(self, steps: usize) -> Self {
        let steps = steps.min(1000) as f32;
        Self((self.0 - steps).max(Self::MIN.0))
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::REQUIRED
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `count` priorities starting at `start`, each one step weaker than the last.
///
/// Every policy that needs sequence-order tie-breaking goes through this so earlier items always
/// win over later ones in the same way.
pub fn priority_countdown(start: Priority, count: usize) -> impl Iterator<Item = Priority> {
    (0..count).map(move |step| start.stepped_down(step))
}

/// A prioritized linear relation `item.attribute REL multiplier * to.attribute + constant`.
///
/// When `to` is `None` the right-hand side is the bare constant.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Constraint {
    /// Constrained item.
    pub item: Item,
    /// Constrained attribute of `item`.
    pub attribute: Attribute,
    /// Relation between the sides.
    pub relation: Relation,
    /// Right-hand item and attribute, if any.
    pub to: Option<(Item, Attribute)>,
    /// Scale applied to the right-hand attribute.
    pub multiplier: f64,
    /// Offset added to the right-hand side.
    pub constant: f64,
    /// Solver priority.
    pub priority: Priority,
    /// Stable debug name for host diagnostics.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub identifier: Option<&'static str>,
}

impl Constraint {
    /// `item.attribute == to.to_attribute` at required priority.
    pub fn between(
        item: impl Into<Item>,
        attribute: Attribute,
        to: impl Into<Item>,
        to_attribute: Attribute,
    ) -> Self {
        Self {
            item: item.into(),
            attribute,
            relation: Relation::Equal,
            to: Some((to.into(), to_attribute)),
            multiplier: 1.0,
            constant: 0.0,
            priority: Priority::REQUIRED,
            identifier: None,
        }
    }

    /// `item.attribute == to.attribute` at required priority.
    pub fn matching(item: impl Into<Item>, attribute: Attribute, to: impl Into<Item>) -> Self {
        Self::between(item, attribute, to, attribute)
    }

    /// `item.attribute == constant` at required priority.
    pub fn fixed(item: impl Into<Item>, attribute: Attribute, constant: f64) -> Self {
        Self {
            item: item.into(),
            attribute,
            relation: Relation::Equal,
            to: None,
            multiplier: 1.0,
            constant,
            priority: Priority::REQUIRED,
            identifier: None,
        }
    }

    /// Replace the relation.
    pub fn related_by(mut self, relation: Relation) -> Self {
        self.relation = relation;
        self
    }

    /// Replace the multiplier.
    pub fn times(mut self, multiplier: f64) -> Self {
        self.multiplier = multiplier;
        self
    }

    /// Replace the constant.
    pub fn plus(mut self, constant: f64) -> Self {
        self.constant = constant;
        self
    }

    /// Replace the priority.
    pub fn at(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Attach a debug identifier.
    pub fn named(mut self, identifier: &'static str) -> Self {
        self.identifier = Some(identifier);
        self
    }

    /// `true` when either side mentions `item`.
    pub fn involves(&self, item: Item) -> bool {
        self.item == item || self.to.is_some_and(|(to, _)| to == item)
    }
}

impl Constraint {
    /// Human-readable form, naming items with `label`.
    pub fn describe(&self, label: impl Fn(Item) -> String) -> String {
        let mut out = format!(
            "{}.{} {} ",
            label(self.item),
            self.attribute.name(),
            self.relation.symbol()
        );
        match self.to {
            Some((to, to_attribute)) => {
                out.push_str(&format!("{}.{}", label(to), to_attribute.name()));
                if self.multiplier != 1.0 {
                    out.push_str(&format!(" * {}", self.multiplier));
                }
                if self.constant > 0.0 {
                    out.push_str(&format!(" + {}", self.constant));
                } else if self.constant < 0.0 {
                    out.push_str(&format!(" - {}", -self.constant));
                }
            }
            None => out.push_str(&self.constant.to_string()),
        }
        out.push_str(&format!(" @{}", self.priority));
        if let Some(id) = self.identifier {
            out.push_str(&format!(" [{id}]"));
        }
        out
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe(|item| item.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/constraint.rs"]
mod tests;
