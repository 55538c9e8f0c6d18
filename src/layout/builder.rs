//! Constraint generation for a stack container.
//!
//! The builder is a pure function of the arranged boxes, the configuration and the scaffold
//! boxes created for this rebuild. It never talks to the host; the container installs what it
//! returns.

use crate::{
    foundation::core::{BoxId, Item, Size},
    foundation::error::{StackError, StackResult},
    host::Capabilities,
    layout::config::{Alignment, Axis, Distribution, StackConfig},
    layout::constraint::{Attribute, Constraint, Priority, Relation, priority_countdown},
    layout::spacer::{Scaffold, ScaffoldPlan},
};

/// Debug names of the four margin-guide constraints.
pub const TOP_MARGIN_GUIDE: &str = "stack-topMargin-guide-constraint";
/// See [`TOP_MARGIN_GUIDE`].
pub const LEFT_MARGIN_GUIDE: &str = "stack-leftMargin-guide-constraint";
/// See [`TOP_MARGIN_GUIDE`].
pub const BOTTOM_MARGIN_GUIDE: &str = "stack-bottomMargin-guide-constraint";
/// See [`TOP_MARGIN_GUIDE`].
pub const RIGHT_MARGIN_GUIDE: &str = "stack-rightMargin-guide-constraint";

/// What the builder needs to know about one arranged box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArrangedBox {
    /// Host handle.
    pub id: BoxId,
    /// Hidden flag set, or animating towards hidden.
    pub hidden: bool,
    /// Preferred size reported by the host.
    pub intrinsic_size: Size,
}

impl ArrangedBox {
    /// A visible box.
    pub fn visible(id: BoxId, intrinsic_size: Size) -> Self {
        Self {
            id,
            hidden: false,
            intrinsic_size,
        }
    }

    /// A hidden box.
    pub fn hidden(id: BoxId, intrinsic_size: Size) -> Self {
        Self {
            id,
            hidden: true,
            intrinsic_size,
        }
    }
}

/// Link in a main-axis chain. Scaffold spacers are never hidden.
#[derive(Clone, Copy, Debug)]
struct Link {
    item: Item,
    hidden: bool,
}

/// Derives the full constraint set for one rebuild.
#[derive(Debug)]
pub struct ConstraintBuilder<'a> {
    config: &'a StackConfig,
    capabilities: Capabilities,
    boxes: &'a [ArrangedBox],
    scaffold: &'a Scaffold,
}

impl<'a> ConstraintBuilder<'a> {
    /// Builder over `boxes`.
    ///
    /// `scaffold` must hold exactly the boxes [`ScaffoldPlan::for_layout`] asks for with this
    /// config and the number of visible boxes; anything else is a validation error.
    pub fn new(
        config: &'a StackConfig,
        capabilities: Capabilities,
        boxes: &'a [ArrangedBox],
        scaffold: &'a Scaffold,
    ) -> StackResult<Self> {
        let visible = boxes.iter().filter(|b| !b.hidden).count();
        let expected = ScaffoldPlan::for_layout(config, visible);
        let actual = scaffold.plan();
        if !boxes.is_empty() && actual != expected {
            return Err(StackError::validation(format!(
                "scaffold does not match the layout: expected {expected:?}, got {actual:?}"
            )));
        }
        Ok(Self::planned(config, capabilities, boxes, scaffold))
    }

    /// Builder over a scaffold created by [`crate::SpacerFactory::create`] from the plan for
    /// this config and visibility.
    pub(crate) fn planned(
        config: &'a StackConfig,
        capabilities: Capabilities,
        boxes: &'a [ArrangedBox],
        scaffold: &'a Scaffold,
    ) -> Self {
        Self {
            config,
            capabilities,
            boxes,
            scaffold,
        }
    }

    /// Emit every constraint for the current arrangement. Empty input yields nothing.
    pub fn build(&self) -> Vec<Constraint> {
        let mut out = self.box_constraints();
        if self.boxes.is_empty() {
            return out;
        }

        out.extend(self.match_edges_constraints());
        out.extend(self.first_and_last_constraints());
        out.extend(self.distribution_constraints());
        if self.config.alignment != Alignment::Fill {
            out.extend(self.spanner_constraints());
        }
        if let Some(guide) = self.scaffold.margins_guide() {
            out.extend(self.margins_guide_constraints(guide));
        }
        out
    }

    fn axis(&self) -> Axis {
        self.config.axis
    }

    fn visible(&self) -> impl Iterator<Item = &ArrangedBox> + '_ {
        self.boxes.iter().filter(|b| !b.hidden)
    }

    fn links(&self) -> Vec<Link> {
        self.boxes
            .iter()
            .map(|b| Link {
                item: Item::Box(b.id),
                hidden: b.hidden,
            })
            .collect()
    }

    /// Present whenever alignment is not fill; the plan guarantees it.
    fn spanner(&self) -> Item {
        self.scaffold
            .alignment_spanner()
            .map_or(Item::Container, Item::Box)
    }

    fn edge_item(&self) -> Item {
        self.scaffold
            .margins_guide()
            .map(Item::Box)
            .unwrap_or(Item::Container)
    }

    /// Per-box weak cross-axis guide and the zero main-axis size of hidden boxes.
    fn box_constraints(&self) -> Vec<Constraint> {
        let axis = self.axis();
        let mut out = Vec::new();
        for b in self.boxes {
            if self.config.alignment != Alignment::Fill {
                out.push(
                    Constraint::fixed(b.id, axis.cross_dimension(), 0.0)
                        .related_by(Relation::GreaterOrEqual)
                        .at(Priority::CROSS_AXIS_GUIDE),
                );
            }
            if b.hidden {
                out.push(Constraint::fixed(b.id, axis.main_dimension(), 0.0));
            }
        }
        out
    }

    /// Cross-axis edge matching across every arranged box, hidden ones included.
    fn match_edges_constraints(&self) -> Vec<Constraint> {
        let items: Vec<Item> = self.boxes.iter().map(|b| Item::Box(b.id)).collect();
        let axis = self.axis();
        let required = Priority::REQUIRED;
        match self.config.alignment {
            Alignment::Fill => {
                let mut out = equal_attributes(&items, axis.cross_trailing_edge(), required);
                out.extend(equal_attributes(&items, axis.cross_leading_edge(), required));
                out
            }
            Alignment::Center => equal_attributes(&items, axis.cross_center(), required),
            Alignment::Leading => equal_attributes(&items, axis.cross_leading_edge(), required),
            Alignment::Trailing => equal_attributes(&items, axis.cross_trailing_edge(), required),
            Alignment::FirstBaseline => match axis {
                Axis::Horizontal => equal_attributes(&items, Attribute::FirstBaseline, required),
                Axis::Vertical => Vec::new(),
            },
        }
    }

    /// Pins the edge anchor to the first and last visible boxes and to the cross-axis extremes.
    fn first_and_last_constraints(&self) -> Vec<Constraint> {
        let axis = self.axis();
        let edge = self.edge_item();
        let mut out = Vec::new();

        if let Some(first) = self.visible().next() {
            out.push(Constraint::matching(edge, axis.leading_edge(), first.id));
        }
        if let Some(last) = self.visible().last() {
            out.push(Constraint::matching(edge, axis.trailing_edge(), last.id));
        }

        let first_arranged = Item::Box(self.boxes[0].id);
        let (leading, trailing, center) = match (self.config.alignment, axis) {
            (Alignment::Fill, _) => (first_arranged, first_arranged, None),
            (Alignment::Center, _) => (self.spanner(), self.spanner(), Some(first_arranged)),
            (Alignment::Leading, _) | (Alignment::FirstBaseline, Axis::Horizontal) => {
                (first_arranged, self.spanner(), None)
            }
            (Alignment::Trailing, _) => (self.spanner(), first_arranged, None),
            (Alignment::FirstBaseline, Axis::Vertical) => (self.spanner(), self.spanner(), None),
        };

        out.push(Constraint::matching(edge, axis.cross_leading_edge(), leading));
        out.push(Constraint::matching(edge, axis.cross_trailing_edge(), trailing));
        if let Some(center) = center {
            out.push(Constraint::matching(edge, axis.cross_center(), center));
        }
        out
    }

    fn distribution_constraints(&self) -> Vec<Constraint> {
        match self.config.distribution {
            Distribution::Fill | Distribution::FillEqually | Distribution::FillProportionally => {
                self.fill_family_constraints()
            }
            Distribution::EqualSpacing => self.equal_spacing_constraints(),
            Distribution::EqualCentering => self.equal_centering_constraints(),
        }
    }

    fn fill_family_constraints(&self) -> Vec<Constraint> {
        let axis = self.axis();
        let mut out = Vec::new();
        if self.config.alignment == Alignment::FirstBaseline && axis == Axis::Horizontal {
            out.push(
                Constraint::fixed(Item::Container, Attribute::Height, 0.0)
                    .at(Priority::FITTING_SIZE),
            );
        }
        match self.config.distribution {
            Distribution::FillEqually => {
                let visible: Vec<Item> = self.visible().map(|b| Item::Box(b.id)).collect();
                out.extend(equal_attributes(
                    &visible,
                    axis.main_dimension(),
                    Priority::REQUIRED,
                ));
            }
            Distribution::FillProportionally => out.extend(self.proportional_constraints()),
            _ => {}
        }
        out.extend(self.fill_constraints(&self.links(), Relation::Equal, self.config.spacing));
        out
    }

    /// Main-axis size of each visible box as a share of the container, weighted by intrinsic
    /// size. Spacing gaps count towards the total so the shares plus gaps add up to one.
    fn proportional_constraints(&self) -> Vec<Constraint> {
        let axis = self.axis();
        let visible_count = self.visible().count();
        if visible_count == 0 {
            return Vec::new();
        }
        let extent = |b: &ArrangedBox| axis.main_extent(b.intrinsic_size).max(0.0);
        let total = self.visible().map(extent).sum::<f64>()
            + self.config.spacing * (visible_count as f64 - 1.0);

        let priorities: Vec<Priority> = if visible_count > 1 {
            priority_countdown(Priority::REQUIRED.stepped_down(1), self.boxes.len()).collect()
        } else {
            vec![Priority::REQUIRED; self.boxes.len()]
        };

        self.boxes
            .iter()
            .zip(priorities)
            .filter(|(b, _)| !b.hidden)
            .map(|(b, priority)| {
                let weight = if total > 0.0 { extent(b) / total } else { 0.0 };
                Constraint::matching(b.id, axis.main_dimension(), Item::Container)
                    .times(weight)
                    .at(priority)
            })
            .collect()
    }

    fn equal_spacing_constraints(&self) -> Vec<Constraint> {
        let axis = self.axis();
        let spacers = self.scaffold.spacers();

        let mut links = Vec::with_capacity(self.boxes.len() + spacers.len());
        let mut spacer_iter = spacers.iter();
        for (index, b) in self.visible().enumerate() {
            if index > 0 {
                let Some(&spacer) = spacer_iter.next() else {
                    break;
                };
                links.push(Link {
                    item: Item::Box(spacer),
                    hidden: false,
                });
            }
            links.push(Link {
                item: Item::Box(b.id),
                hidden: false,
            });
        }

        let mut out = self.fitting_size_constraints();
        out.extend(self.fill_constraints(&links, Relation::Equal, 0.0));
        let spacer_items: Vec<Item> = spacers.iter().map(|&s| Item::Box(s)).collect();
        out.extend(equal_attributes(
            &spacer_items,
            axis.main_dimension(),
            Priority::REQUIRED,
        ));
        out.extend(self.fill_constraints(
            &self.links(),
            Relation::GreaterOrEqual,
            self.config.spacing,
        ));
        out
    }

    fn equal_centering_constraints(&self) -> Vec<Constraint> {
        let axis = self.axis();
        let spacers = self.scaffold.spacers();
        let visible: Vec<BoxId> = self.visible().map(|b| b.id).collect();

        let mut out = self.fitting_size_constraints();
        for (pair, &spacer) in visible.windows(2).zip(spacers) {
            out.push(Constraint::between(
                pair[0],
                axis.main_center(),
                spacer,
                axis.leading_edge(),
            ));
            out.push(Constraint::between(
                pair[1],
                axis.main_center(),
                spacer,
                axis.trailing_edge(),
            ));
        }
        let spacer_items: Vec<Item> = spacers.iter().map(|&s| Item::Box(s)).collect();
        out.extend(equal_attributes(
            &spacer_items,
            axis.main_dimension(),
            Priority::EQUAL_CENTERING,
        ));
        out.extend(self.fill_constraints(
            &self.links(),
            Relation::GreaterOrEqual,
            self.config.spacing,
        ));
        out
    }

    /// Weak pin of the container's main-axis size (and height for baseline-aligned rows) so the
    /// spacer distributions shrink to fit when nothing else sizes the container.
    fn fitting_size_constraints(&self) -> Vec<Constraint> {
        let fitting = |attribute| {
            Constraint::fixed(Item::Container, attribute, 0.0).at(Priority::FITTING_SIZE)
        };
        match self.axis() {
            Axis::Horizontal => {
                let mut out = vec![fitting(Attribute::Width)];
                if self.config.alignment == Alignment::FirstBaseline {
                    out.push(fitting(Attribute::Height));
                }
                out
            }
            Axis::Vertical => vec![fitting(Attribute::Height)],
        }
    }

    /// Chains `links` edge to edge along the main axis.
    fn fill_constraints(&self, links: &[Link], relation: Relation, spacing: f64) -> Vec<Constraint> {
        let axis = self.axis();
        let last = links.len().saturating_sub(1);
        links
            .windows(2)
            .enumerate()
            .map(|(index, pair)| {
                let (prev, next) = (pair[0], pair[1]);
                let gap = chain_gap(prev, next, index == 0, index + 1 == last, spacing);
                Constraint::between(next.item, axis.leading_edge(), prev.item, axis.trailing_edge())
                    .related_by(relation)
                    .plus(gap)
            })
            .collect()
    }

    /// Spanner bounds the cross-axis extent of every visible box.
    fn spanner_constraints(&self) -> Vec<Constraint> {
        let axis = self.axis();
        let spanner = self.spanner();

        let (leading_relation, leading_priority) = match self.config.alignment {
            Alignment::Leading => (Relation::Equal, Priority::ALIGNED_EDGE),
            _ => (Relation::LessOrEqual, Priority::REQUIRED),
        };
        let (trailing_relation, trailing_priority) = match self.config.alignment {
            Alignment::Trailing => (Relation::Equal, Priority::ALIGNED_EDGE),
            _ => (Relation::GreaterOrEqual, Priority::REQUIRED),
        };

        let mut out = Vec::new();
        for b in self.visible() {
            out.push(
                Constraint::matching(spanner, axis.cross_leading_edge(), b.id)
                    .related_by(leading_relation)
                    .at(leading_priority),
            );
            out.push(
                Constraint::matching(spanner, axis.cross_trailing_edge(), b.id)
                    .related_by(trailing_relation)
                    .at(trailing_priority),
            );
        }
        out.push(Constraint::fixed(spanner, axis.cross_dimension(), 0.0).at(Priority::SPANNER_THICKNESS));
        out
    }

    /// Ties the margin guide to the container's margin-inset rectangle.
    fn margins_guide_constraints(&self, guide: BoxId) -> Vec<Constraint> {
        if self.capabilities.native_layout_margins {
            return vec![
                Constraint::between(Item::Container, Attribute::BottomMargin, guide, Attribute::Bottom)
                    .named(BOTTOM_MARGIN_GUIDE),
                Constraint::between(Item::Container, Attribute::LeftMargin, guide, Attribute::Left)
                    .named(LEFT_MARGIN_GUIDE),
                Constraint::between(Item::Container, Attribute::RightMargin, guide, Attribute::Right)
                    .named(RIGHT_MARGIN_GUIDE),
                Constraint::between(Item::Container, Attribute::TopMargin, guide, Attribute::Top)
                    .named(TOP_MARGIN_GUIDE),
            ];
        }
        let margins = self.config.layout_margins;
        vec![
            Constraint::matching(Item::Container, Attribute::Bottom, guide)
                .plus(margins.bottom)
                .named(BOTTOM_MARGIN_GUIDE),
            Constraint::matching(Item::Container, Attribute::Left, guide)
                .plus(-margins.left)
                .named(LEFT_MARGIN_GUIDE),
            Constraint::matching(Item::Container, Attribute::Right, guide)
                .plus(margins.right)
                .named(RIGHT_MARGIN_GUIDE),
            Constraint::matching(Item::Container, Attribute::Top, guide)
                .plus(-margins.top)
                .named(TOP_MARGIN_GUIDE),
        ]
    }
}

/// Gap between two chained links.
///
/// A seam next to a single hidden box is halved so a run of boxes collapsing one after another
/// shrinks smoothly. At the outer ends of the chain there is no further neighbor to share the
/// seam with, so the full spacing stays.
fn chain_gap(prev: Link, next: Link, prev_is_first: bool, next_is_last: bool, spacing: f64) -> f64 {
    match (prev.hidden, next.hidden) {
        (false, false) => spacing,
        (true, true) => 0.0,
        (true, false) if prev_is_first => spacing,
        (false, true) if next_is_last => spacing,
        _ => spacing / 2.0,
    }
}

/// Chains `attribute` of every item to the first one.
///
/// Below required priority each successive constraint is one step weaker than the previous. The
/// first constraint carries `priority` itself, so equal-centering spacers start at exactly 150.
fn equal_attributes(items: &[Item], attribute: Attribute, priority: Priority) -> Vec<Constraint> {
    let Some((&first, rest)) = items.split_first() else {
        return Vec::new();
    };
    let priorities: Vec<Priority> = if priority.is_required() {
        vec![priority; rest.len()]
    } else {
        priority_countdown(priority, rest.len()).collect()
    };
    rest.iter()
        .zip(priorities)
        .map(|(&item, p)| Constraint::matching(first, attribute, item).at(p))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/unit/layout/builder.rs"]
mod tests;
