use crate::{
    foundation::core::BoxId,
    host::ViewLayer,
    layout::config::{Alignment, Distribution, StackConfig},
};

/// Purpose of a container-owned scaffold box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaffoldRole {
    /// Stands in for the container's margin-inset rectangle.
    LayoutMarginsGuide,
    /// Cross-axis reference line used when alignment is not fill.
    AlignmentSpanner,
    /// Gap filler between two visible boxes.
    Distributing,
}

impl ScaffoldRole {
    /// Stable debug identifier handed to the host with the box.
    pub fn identifier(self) -> &'static str {
        match self {
            Self::LayoutMarginsGuide => "stack-layout-margins-guide",
            Self::AlignmentSpanner => "stack-alignment-spanner",
            Self::Distributing => "stack-distributing",
        }
    }
}

/// Which scaffold boxes a rebuild needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScaffoldPlan {
    /// A margin guide is needed.
    pub margins_guide: bool,
    /// An alignment spanner is needed.
    pub alignment_spanner: bool,
    /// Number of distribution spacers.
    pub distribution_spacers: usize,
}

impl ScaffoldPlan {
    /// Exactly the scaffolding the builder's alignment and distribution branches will reference.
    pub fn for_layout(config: &StackConfig, visible: usize) -> Self {
        let distribution_spacers = match config.distribution {
            Distribution::EqualSpacing | Distribution::EqualCentering => {
                visible.saturating_sub(1)
            }
            Distribution::Fill | Distribution::FillEqually | Distribution::FillProportionally => 0,
        };
        Self {
            margins_guide: config.layout_margins_relative,
            alignment_spanner: config.alignment != Alignment::Fill,
            distribution_spacers,
        }
    }

    /// Total number of boxes this plan creates.
    pub fn len(&self) -> usize {
        usize::from(self.margins_guide)
            + usize::from(self.alignment_spanner)
            + self.distribution_spacers
    }

    /// `true` when nothing needs to be created.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Scaffold boxes created for one rebuild.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scaffold {
    margins_guide: Option<BoxId>,
    alignment_spanner: Option<BoxId>,
    spacers: Vec<BoxId>,
}

impl Scaffold {
    /// Margin guide, when margins-relative arrangement is on.
    pub fn margins_guide(&self) -> Option<BoxId> {
        self.margins_guide
    }

    /// Alignment spanner, when alignment is not fill.
    pub fn alignment_spanner(&self) -> Option<BoxId> {
        self.alignment_spanner
    }

    /// Distribution spacers in sequence order.
    pub fn spacers(&self) -> &[BoxId] {
        &self.spacers
    }

    /// Every scaffold box, guide first, then spanner, then spacers.
    pub fn boxes(&self) -> impl Iterator<Item = BoxId> + '_ {
        self.margins_guide
            .into_iter()
            .chain(self.alignment_spanner)
            .chain(self.spacers.iter().copied())
    }

    /// Number of scaffold boxes.
    pub fn len(&self) -> usize {
        self.boxes().count()
    }

    /// `true` when no scaffold box exists.
    pub fn is_empty(&self) -> bool {
        self.margins_guide.is_none() && self.alignment_spanner.is_none() && self.spacers.is_empty()
    }

    /// The plan these boxes satisfy.
    pub fn plan(&self) -> ScaffoldPlan {
        ScaffoldPlan {
            margins_guide: self.margins_guide.is_some(),
            alignment_spanner: self.alignment_spanner.is_some(),
            distribution_spacers: self.spacers.len(),
        }
    }

    /// `true` when `id` is one of these scaffold boxes.
    pub fn contains(&self, id: BoxId) -> bool {
        self.boxes().any(|b| b == id)
    }
}

/// Creates and destroys zero-content scaffold boxes in the host hierarchy.
#[derive(Debug)]
pub struct SpacerFactory;

impl SpacerFactory {
    /// Insert the boxes named by `plan` into the host.
    pub fn create<V: ViewLayer + ?Sized>(host: &mut V, plan: &ScaffoldPlan) -> Scaffold {
        let margins_guide = plan
            .margins_guide
            .then(|| host.insert_spacer(ScaffoldRole::LayoutMarginsGuide));
        let alignment_spanner = plan
            .alignment_spanner
            .then(|| host.insert_spacer(ScaffoldRole::AlignmentSpanner));
        let spacers = (0..plan.distribution_spacers)
            .map(|_| host.insert_spacer(ScaffoldRole::Distributing))
            .collect();
        Scaffold {
            margins_guide,
            alignment_spanner,
            spacers,
        }
    }

    /// Remove every box of `scaffold` from the host.
    pub fn destroy<V: ViewLayer + ?Sized>(host: &mut V, scaffold: Scaffold) {
        for id in scaffold.boxes() {
            host.remove_spacer(id);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/layout/spacer.rs"]
mod tests;
