use crate::{
    foundation::core::{Edges, Size},
    foundation::error::{StackError, StackResult},
    layout::constraint::Attribute,
};

/// Axis along which arranged boxes are stacked.
///
/// Persisted as `0 = horizontal`, `1 = vertical`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Axis {
    /// Boxes run left to right.
    #[default]
    Horizontal,
    /// Boxes run top to bottom.
    Vertical,
}

/// Cross-axis placement of arranged boxes.
///
/// Persisted as `0 = fill`, `1 = leading`, `2 = trailing`, `3 = center`, `4 = firstBaseline`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Alignment {
    /// Stretch every box across the whole cross axis.
    #[default]
    Fill,
    /// Align leading (top for horizontal stacks) edges.
    Leading,
    /// Align trailing (bottom for horizontal stacks) edges.
    Trailing,
    /// Align cross-axis centers.
    Center,
    /// Align first baselines; only meaningful for horizontal stacks.
    FirstBaseline,
}

/// Division of main-axis space among arranged boxes.
///
/// Persisted as `0 = fill`, `1 = fillEqually`, `2 = fillProportionally`, `3 = equalSpacing`,
/// `4 = equalCentering`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum Distribution {
    /// Chain boxes with `spacing` between them; sizes come from the boxes.
    #[default]
    Fill,
    /// Chain boxes and make every visible box the same main-axis size.
    FillEqually,
    /// Size visible boxes in proportion to their intrinsic main-axis size.
    FillProportionally,
    /// Equal gaps between visible boxes, at least `spacing`.
    EqualSpacing,
    /// Equal distance between consecutive visible box centers.
    EqualCentering,
}

impl From<i64> for Axis {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Vertical,
            _ => Self::Horizontal,
        }
    }
}

impl From<Axis> for i64 {
    fn from(value: Axis) -> Self {
        match value {
            Axis::Horizontal => 0,
            Axis::Vertical => 1,
        }
    }
}

impl From<i64> for Alignment {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Leading,
            2 => Self::Trailing,
            3 => Self::Center,
            4 => Self::FirstBaseline,
            _ => Self::Fill,
        }
    }
}

impl From<Alignment> for i64 {
    fn from(value: Alignment) -> Self {
        match value {
            Alignment::Fill => 0,
            Alignment::Leading => 1,
            Alignment::Trailing => 2,
            Alignment::Center => 3,
            Alignment::FirstBaseline => 4,
        }
    }
}

impl From<i64> for Distribution {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::FillEqually,
            2 => Self::FillProportionally,
            3 => Self::EqualSpacing,
            4 => Self::EqualCentering,
            _ => Self::Fill,
        }
    }
}

impl From<Distribution> for i64 {
    fn from(value: Distribution) -> Self {
        match value {
            Distribution::Fill => 0,
            Distribution::FillEqually => 1,
            Distribution::FillProportionally => 2,
            Distribution::EqualSpacing => 3,
            Distribution::EqualCentering => 4,
        }
    }
}

impl Axis {
    /// Size attribute along the stacking direction.
    pub fn main_dimension(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Width,
            Self::Vertical => Attribute::Height,
        }
    }

    /// Size attribute across the stacking direction.
    pub fn cross_dimension(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Height,
            Self::Vertical => Attribute::Width,
        }
    }

    /// Edge where the stack starts.
    pub fn leading_edge(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Leading,
            Self::Vertical => Attribute::Top,
        }
    }

    /// Edge where the stack ends.
    pub fn trailing_edge(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Trailing,
            Self::Vertical => Attribute::Bottom,
        }
    }

    /// Center coordinate along the stacking direction.
    pub fn main_center(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::CenterX,
            Self::Vertical => Attribute::CenterY,
        }
    }

    /// First edge across the stacking direction.
    pub fn cross_leading_edge(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Top,
            Self::Vertical => Attribute::Leading,
        }
    }

    /// Last edge across the stacking direction.
    pub fn cross_trailing_edge(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::Bottom,
            Self::Vertical => Attribute::Trailing,
        }
    }

    /// Center coordinate across the stacking direction.
    pub fn cross_center(self) -> Attribute {
        match self {
            Self::Horizontal => Attribute::CenterY,
            Self::Vertical => Attribute::CenterX,
        }
    }

    /// Component of `size` along the stacking direction.
    pub fn main_extent(self, size: Size) -> f64 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }
}

/// Complete stack configuration. Changing any field invalidates the generated constraints.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct StackConfig {
    /// Stacking axis.
    #[serde(default)]
    pub axis: Axis,
    /// Cross-axis alignment policy.
    #[serde(default)]
    pub alignment: Alignment,
    /// Main-axis distribution policy.
    #[serde(default)]
    pub distribution: Distribution,
    /// Gap between adjacent visible boxes; must be finite and `>= 0`.
    #[serde(default)]
    pub spacing: f64,
    /// Lay boxes out inside the container's margins instead of its edges.
    #[serde(default)]
    pub layout_margins_relative: bool,
    /// Margin insets used when `layout_margins_relative` is set.
    #[serde(default)]
    pub layout_margins: Edges,
}

impl Default for StackConfig {
    fn default() -> Self {
        Self {
            axis: Axis::default(),
            alignment: Alignment::default(),
            distribution: Distribution::default(),
            spacing: 0.0,
            layout_margins_relative: false,
            layout_margins: Edges::default(),
        }
    }
}

impl StackConfig {
    /// Check scalar fields; enum fields are always valid.
    pub fn validate(&self) -> StackResult<()> {
        validate_spacing(self.spacing)?;
        self.layout_margins.validate()
    }

    /// Parse a persisted configuration. Unknown enum integers fall back to defaults.
    pub fn from_json(s: &str) -> StackResult<Self> {
        let config: Self = serde_json::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize for persistence.
    pub fn to_json(&self) -> StackResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

pub(crate) fn validate_spacing(spacing: f64) -> StackResult<()> {
    if !spacing.is_finite() || spacing < 0.0 {
        return Err(StackError::validation(format!(
            "spacing must be finite and >= 0 (got {spacing})"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/layout/config.rs"]
mod tests;
