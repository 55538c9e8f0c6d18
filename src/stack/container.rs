use crate::{
    animation::visibility::{Transition, VisibilityCoordinator},
    foundation::core::{BoxId, Edges, ObserverId},
    foundation::error::{StackError, StackResult},
    host::{Capabilities, HIDDEN_KEY, Host, Notification, ViewLayer},
    layout::builder::{ArrangedBox, ConstraintBuilder},
    layout::config::{Alignment, Axis, Distribution, StackConfig, validate_spacing},
    layout::constraint::Constraint,
    layout::spacer::{Scaffold, ScaffoldPlan, SpacerFactory},
};

/// A linear stack of boxes laid out through generated constraints.
///
/// Mutations only mark the container dirty; the constraint set is rebuilt wholesale on the next
/// [`StackContainer::layout_if_needed`]. Hidden-flag flips of arranged boxes rebuild
/// synchronously so a surrounding animation has a geometry to animate towards.
#[derive(Debug)]
pub struct StackContainer {
    config: StackConfig,
    capabilities: Capabilities,
    arranged: Vec<BoxId>,
    visibility: VisibilityCoordinator,
    installed: Vec<Constraint>,
    scaffold: Scaffold,
    needs_update: bool,
}

impl StackContainer {
    /// Empty container with the default configuration. `observer` is the identity this
    /// container uses for host observer registrations.
    pub fn new(observer: ObserverId, capabilities: Capabilities) -> Self {
        Self {
            config: StackConfig::default(),
            capabilities,
            arranged: Vec::new(),
            visibility: VisibilityCoordinator::new(observer),
            installed: Vec::new(),
            scaffold: Scaffold::default(),
            needs_update: true,
        }
    }

    /// Empty container with `config`.
    pub fn with_config(
        observer: ObserverId,
        capabilities: Capabilities,
        config: StackConfig,
    ) -> StackResult<Self> {
        config.validate()?;
        let mut container = Self::new(observer, capabilities);
        container.config = config;
        Ok(container)
    }

    /// Current configuration.
    pub fn config(&self) -> &StackConfig {
        &self.config
    }

    /// Capabilities fixed at creation.
    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }

    /// Arranged boxes in stacking order.
    pub fn arranged(&self) -> &[BoxId] {
        &self.arranged
    }

    /// Constraints installed by the last rebuild.
    pub fn installed_constraints(&self) -> &[Constraint] {
        &self.installed
    }

    /// Scaffold boxes created by the last rebuild.
    pub fn scaffold(&self) -> &Scaffold {
        &self.scaffold
    }

    /// Visibility state machine.
    pub fn visibility(&self) -> &VisibilityCoordinator {
        &self.visibility
    }

    /// `true` when the next geometry pass must rebuild constraints.
    pub fn needs_update(&self) -> bool {
        self.needs_update
    }

    /// Mark the generated constraints stale.
    pub fn set_needs_update(&mut self) {
        self.needs_update = true;
    }

    /// Hidden for layout purposes: flag set, or animating towards hidden.
    pub fn is_hidden<V: ViewLayer + ?Sized>(&self, host: &V, id: BoxId) -> bool {
        self.visibility.is_hidden(host, id)
    }

    /// Set the stacking axis.
    pub fn set_axis(&mut self, axis: Axis) {
        self.config.axis = axis;
        self.set_needs_update();
    }

    /// Set the cross-axis alignment.
    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.config.alignment = alignment;
        self.set_needs_update();
    }

    /// Set the main-axis distribution.
    pub fn set_distribution(&mut self, distribution: Distribution) {
        self.config.distribution = distribution;
        self.set_needs_update();
    }

    /// Set the gap between adjacent visible boxes.
    pub fn set_spacing(&mut self, spacing: f64) -> StackResult<()> {
        validate_spacing(spacing)?;
        self.config.spacing = spacing;
        self.set_needs_update();
        Ok(())
    }

    /// Arrange inside the margins instead of the container's edges.
    pub fn set_layout_margins_relative(&mut self, relative: bool) {
        self.config.layout_margins_relative = relative;
        self.set_needs_update();
    }

    /// Set the margin insets. Hosts with native margins receive them directly.
    pub fn set_layout_margins<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        margins: Edges,
    ) -> StackResult<()> {
        margins.validate()?;
        self.config.layout_margins = margins;
        if self.capabilities.native_layout_margins {
            host.set_layout_margins(margins);
        }
        self.set_needs_update();
        Ok(())
    }

    /// Replace the whole configuration.
    pub fn set_config<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        config: StackConfig,
    ) -> StackResult<()> {
        config.validate()?;
        if self.capabilities.native_layout_margins {
            host.set_layout_margins(config.layout_margins);
        }
        self.config = config;
        self.set_needs_update();
        Ok(())
    }

    /// Persisted axis value.
    pub fn axis_value(&self) -> i64 {
        self.config.axis.into()
    }

    /// Set the axis from its persisted value; unknown values fall back to horizontal.
    pub fn set_axis_value(&mut self, value: i64) {
        self.set_axis(Axis::from(value));
    }

    /// Persisted alignment value.
    pub fn alignment_value(&self) -> i64 {
        self.config.alignment.into()
    }

    /// Set the alignment from its persisted value; unknown values fall back to fill.
    pub fn set_alignment_value(&mut self, value: i64) {
        self.set_alignment(Alignment::from(value));
    }

    /// Persisted distribution value.
    pub fn distribution_value(&self) -> i64 {
        self.config.distribution.into()
    }

    /// Set the distribution from its persisted value; unknown values fall back to fill.
    pub fn set_distribution_value(&mut self, value: i64) {
        self.set_distribution(Distribution::from(value));
    }

    /// Arrange `id` after every other box.
    pub fn append<V: ViewLayer + ?Sized>(&mut self, host: &mut V, id: BoxId) -> StackResult<()> {
        self.insert(host, id, self.arranged.len())
    }

    /// Arrange `id` at `index`; `index == len` appends.
    pub fn insert<V: ViewLayer + ?Sized>(
        &mut self,
        host: &mut V,
        id: BoxId,
        index: usize,
    ) -> StackResult<()> {
        if self.arranged.contains(&id) {
            return Err(StackError::validation(format!("{id} is already arranged")));
        }
        if index > self.arranged.len() {
            return Err(StackError::validation(format!(
                "insert index {index} out of bounds for {} arranged boxes",
                self.arranged.len()
            )));
        }
        self.arranged.insert(index, id);
        self.visibility.register(host, id);
        self.set_needs_update();
        Ok(())
    }

    /// Arrange every box of `ids` in order after the existing ones.
    pub fn extend<V: ViewLayer + ?Sized>(
        &mut self,
        host: &mut V,
        ids: impl IntoIterator<Item = BoxId>,
    ) -> StackResult<()> {
        for id in ids {
            self.append(host, id)?;
        }
        Ok(())
    }

    /// Stop arranging `id`. Returns `false` (and does nothing) when it was not arranged.
    pub fn remove<V: ViewLayer + ?Sized>(&mut self, host: &mut V, id: BoxId) -> bool {
        let Some(pos) = self.arranged.iter().position(|&b| b == id) else {
            return false;
        };
        self.arranged.remove(pos);
        self.visibility.unregister(host, id);
        self.set_needs_update();
        true
    }

    /// Rebuild now if dirty, then let the host solve.
    pub fn layout_if_needed<H: Host + ?Sized>(&mut self, host: &mut H) {
        if self.needs_update {
            self.update_constraints(host);
        }
        host.layout_if_needed();
    }

    /// Throw away the installed constraints and scaffold boxes and generate fresh ones.
    #[tracing::instrument(skip_all, fields(arranged = self.arranged.len()))]
    pub fn update_constraints<H: Host + ?Sized>(&mut self, host: &mut H) {
        host.remove_constraints(&self.installed);
        self.installed.clear();
        SpacerFactory::destroy(host, std::mem::take(&mut self.scaffold));
        self.needs_update = false;

        if self.arranged.is_empty() {
            tracing::debug!("no arranged boxes; nothing installed");
            return;
        }

        let view: &H = host;
        let boxes: Vec<ArrangedBox> = self
            .arranged
            .iter()
            .map(|&id| ArrangedBox {
                id,
                hidden: self.visibility.is_hidden(view, id),
                intrinsic_size: view.intrinsic_size(id),
            })
            .collect();
        let visible = boxes.iter().filter(|b| !b.hidden).count();

        let plan = ScaffoldPlan::for_layout(&self.config, visible);
        let scaffold = SpacerFactory::create(host, &plan);
        let constraints =
            ConstraintBuilder::planned(&self.config, self.capabilities, &boxes, &scaffold).build();
        host.add_constraints(&constraints);

        tracing::debug!(
            visible,
            scaffold = scaffold.len(),
            constraints = constraints.len(),
            "constraints rebuilt"
        );
        self.installed = constraints;
        self.scaffold = scaffold;
    }

    /// Entry point for host observer notifications.
    pub fn observe<H: Host + ?Sized>(&mut self, host: &mut H, notification: &Notification) {
        if notification.observer != self.visibility.observer()
            || notification.key != HIDDEN_KEY
            || !self.arranged.contains(&notification.id)
            || notification.old == notification.new
        {
            return;
        }
        self.hidden_changed(host, notification.id, notification.old, notification.new);
    }

    /// Hide or show an arranged box through the container.
    ///
    /// Unlike a raw flag write this also works while the box is mid-transition: the flip is
    /// measured against the target it is already heading for, so the latest request wins once
    /// the animations settle. Returns `None` when nothing changes.
    pub fn set_hidden<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        id: BoxId,
        hidden: bool,
    ) -> Option<Transition> {
        if !self.arranged.contains(&id) {
            self.visibility.write_quietly(host, id, hidden);
            return None;
        }
        let old = self.visibility.requested_hidden(host, id);
        if old == hidden {
            return None;
        }
        self.visibility.write_quietly(host, id, hidden);
        Some(self.hidden_changed(host, id, old, hidden))
    }

    #[tracing::instrument(skip(self, host))]
    fn hidden_changed<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
        id: BoxId,
        old: bool,
        hidden: bool,
    ) -> Transition {
        self.visibility.begin_transition(id, hidden);
        self.set_needs_update();
        self.layout_if_needed(host);
        self.visibility
            .defer_flag(host, id, hidden, &self.arranged)
    }

    /// Completion signal for one animation context.
    pub fn animation_did_stop<H: Host + ?Sized>(&mut self, host: &mut H) -> usize {
        self.visibility.animation_did_stop(host, &self.arranged)
    }

    /// Uninstall everything this container put into the host and drop every listener.
    pub fn dismantle<H: Host + ?Sized>(mut self, host: &mut H) {
        host.remove_constraints(&self.installed);
        SpacerFactory::destroy(host, std::mem::take(&mut self.scaffold));
        self.visibility.unregister_all(host);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stack/container.rs"]
mod tests;
