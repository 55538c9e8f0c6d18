use super::*;
use crate::{
    foundation::core::{Item, Size},
    host::memory::{AnimationId, MemoryHost},
    layout::constraint::{Attribute, Priority, Relation},
};

const OBSERVER: ObserverId = ObserverId(1);

fn stack_of(host: &mut MemoryHost, widths: &[f64]) -> (StackContainer, Vec<BoxId>) {
    let mut container = StackContainer::new(OBSERVER, Capabilities::default());
    let ids: Vec<BoxId> = widths
        .iter()
        .map(|&w| host.add_box(Size::new(w, 10.0)))
        .collect();
    container.extend(host, ids.iter().copied()).unwrap();
    (container, ids)
}

fn deliver(container: &mut StackContainer, host: &mut MemoryHost) {
    for note in host.drain_notifications() {
        container.observe(host, &note);
    }
}

fn finish(container: &mut StackContainer, host: &mut MemoryHost, anim: AnimationId) {
    for _ in host.finish_animation(anim) {
        container.animation_did_stop(host);
    }
}

fn zero_width(id: BoxId) -> Constraint {
    Constraint::fixed(id, Attribute::Width, 0.0)
}

type Logical = (Attribute, Relation, Option<Attribute>, u32, i64);

fn logical(constraints: &[Constraint]) -> Vec<Logical> {
    constraints
        .iter()
        .map(|c| {
            (
                c.attribute,
                c.relation,
                c.to.map(|(_, a)| a),
                (c.priority.value() * 10.0) as u32,
                (c.constant * 1000.0).round() as i64,
            )
        })
        .collect()
}

#[test]
fn empty_container_installs_nothing() {
    let mut host = MemoryHost::new();
    let mut container = StackContainer::with_config(
        OBSERVER,
        Capabilities::default(),
        StackConfig {
            alignment: Alignment::Center,
            distribution: Distribution::EqualCentering,
            layout_margins_relative: true,
            ..StackConfig::default()
        },
    )
    .unwrap();

    container.layout_if_needed(&mut host);
    assert!(container.installed_constraints().is_empty());
    assert!(container.scaffold().is_empty());
    assert!(host.constraints().is_empty());
    assert_eq!(host.spacer_count(), 0);
    assert_eq!(host.layout_passes(), 1);
}

#[test]
fn arranging_registers_exactly_one_listener() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0]);
    for &id in &ids {
        assert_eq!(host.observer_count(id, HIDDEN_KEY), 1);
    }

    let err = container.append(&mut host, ids[0]).unwrap_err();
    assert!(matches!(err, StackError::Validation(_)));
    assert_eq!(host.observer_count(ids[0], HIDDEN_KEY), 1);

    assert!(container.remove(&mut host, ids[0]));
    assert_eq!(host.observer_count(ids[0], HIDDEN_KEY), 0);
    assert_eq!(container.arranged(), &ids[1..]);
}

#[test]
fn insert_checks_bounds_and_keeps_order() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0]);
    let extra = host.add_box(Size::new(5.0, 5.0));

    assert!(container.insert(&mut host, extra, 3).is_err());
    assert_eq!(host.observer_count(extra, HIDDEN_KEY), 0);

    container.insert(&mut host, extra, 1).unwrap();
    assert_eq!(container.arranged(), &[ids[0], extra, ids[1]]);
    assert!(container.needs_update());
}

#[test]
fn removing_an_unknown_box_is_a_no_op() {
    let mut host = MemoryHost::new();
    let (mut container, _) = stack_of(&mut host, &[10.0]);
    container.layout_if_needed(&mut host);
    let stranger = host.add_box(Size::ZERO);

    assert!(!container.remove(&mut host, stranger));
    assert!(!container.needs_update());
}

#[test]
fn rebuilds_are_deterministic() {
    let mut host = MemoryHost::new();
    let (mut container, _) = stack_of(&mut host, &[10.0, 20.0, 30.0]);
    container.set_alignment(Alignment::Center);
    container.set_distribution(Distribution::EqualSpacing);
    container.set_spacing(4.0).unwrap();

    container.layout_if_needed(&mut host);
    let first = logical(container.installed_constraints());
    let spacers = host.spacer_count();

    container.update_constraints(&mut host);
    assert_eq!(logical(container.installed_constraints()), first);
    assert_eq!(host.spacer_count(), spacers);
    assert_eq!(host.constraints().len(), container.installed_constraints().len());
}

#[test]
fn config_changes_replace_the_scaffold() {
    let mut host = MemoryHost::new();
    let (mut container, _) = stack_of(&mut host, &[10.0, 20.0, 30.0]);
    container.set_distribution(Distribution::EqualCentering);
    container.layout_if_needed(&mut host);
    assert_eq!(host.spacer_count(), 2);

    container.set_distribution(Distribution::Fill);
    assert!(container.needs_update());
    container.layout_if_needed(&mut host);
    assert_eq!(host.spacer_count(), 0);
    assert!(!container.needs_update());
    assert_eq!(host.constraints(), container.installed_constraints());
}

#[test]
fn invalid_settings_are_rejected() {
    let mut host = MemoryHost::new();
    let (mut container, _) = stack_of(&mut host, &[10.0]);
    assert!(container.set_spacing(-1.0).is_err());
    assert!(
        container
            .set_layout_margins(&mut host, Edges::all(f64::NAN))
            .is_err()
    );
    assert_eq!(container.config().spacing, 0.0);
}

#[test]
fn native_margins_are_forwarded_to_the_host() {
    let mut host = MemoryHost::new();
    let mut container = StackContainer::new(
        OBSERVER,
        Capabilities {
            native_layout_margins: true,
        },
    );
    container
        .set_layout_margins(&mut host, Edges::all(3.0))
        .unwrap();
    assert_eq!(host.layout_margins(), Edges::all(3.0));
    assert_eq!(container.config().layout_margins, Edges::all(3.0));
}

#[test]
fn persisted_values_round_trip_through_the_container() {
    let mut container = StackContainer::new(OBSERVER, Capabilities::default());
    container.set_axis_value(1);
    container.set_alignment_value(3);
    container.set_distribution_value(17);
    assert_eq!(container.config().axis, Axis::Vertical);
    assert_eq!(container.alignment_value(), 3);
    assert_eq!(container.distribution_value(), 0);
}

#[test]
fn observed_flip_without_animation_settles_at_once() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0, 30.0]);
    container.layout_if_needed(&mut host);

    host.set_hidden(ids[1], true);
    deliver(&mut container, &mut host);

    assert!(host.is_hidden(ids[1]));
    assert!(container.installed_constraints().contains(&zero_width(ids[1])));
    assert_eq!(host.observer_count(ids[1], HIDDEN_KEY), 1);
    assert!(host.drain_notifications().is_empty());
}

#[test]
fn observed_flip_during_animation_defers_the_flag() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0, 30.0]);
    container.layout_if_needed(&mut host);

    let anim = host.begin_animation(&[ids[1]]);
    host.set_hidden(ids[1], true);
    deliver(&mut container, &mut host);

    assert!(!host.is_hidden(ids[1]));
    assert!(container.is_hidden(&host, ids[1]));
    assert!(container.installed_constraints().contains(&zero_width(ids[1])));
    assert_eq!(host.observer_count(ids[1], HIDDEN_KEY), 0);

    finish(&mut container, &mut host, anim);
    assert!(host.is_hidden(ids[1]));
    assert_eq!(host.observer_count(ids[1], HIDDEN_KEY), 1);
    assert!(container.visibility().pending().next().is_none());
}

#[test]
fn double_toggle_resolves_to_the_latest_request() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0]);
    container.layout_if_needed(&mut host);
    let id = ids[0];

    let first = host.begin_animation(&[id]);
    assert_eq!(
        container.set_hidden(&mut host, id, true),
        Some(Transition::Queued)
    );
    assert!(container.installed_constraints().contains(&zero_width(id)));

    let second = host.begin_animation(&[id]);
    assert_eq!(
        container.set_hidden(&mut host, id, false),
        Some(Transition::Queued)
    );
    assert!(!host.is_hidden(id));
    assert!(!container.installed_constraints().contains(&zero_width(id)));

    finish(&mut container, &mut host, first);
    finish(&mut container, &mut host, second);
    assert!(!host.is_hidden(id));
    assert_eq!(host.observer_count(id, HIDDEN_KEY), 1);
    assert!(host.drain_notifications().is_empty());
}

#[test]
fn showing_during_animation_survives_a_rebuild() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0]);
    let id = ids[0];
    container.set_hidden(&mut host, id, true);
    container.layout_if_needed(&mut host);
    assert!(container.installed_constraints().contains(&zero_width(id)));

    let anim = host.begin_animation(&[id]);
    assert_eq!(
        container.set_hidden(&mut host, id, false),
        Some(Transition::Queued)
    );
    assert!(!host.is_hidden(id));

    container.set_spacing(4.0).unwrap();
    container.layout_if_needed(&mut host);
    assert!(!container.is_hidden(&host, id));
    assert!(!container.installed_constraints().contains(&zero_width(id)));

    finish(&mut container, &mut host, anim);
    assert!(!host.is_hidden(id));
    assert_eq!(host.observer_count(id, HIDDEN_KEY), 1);
}

#[test]
fn animations_finishing_out_of_order_settle_their_own_boxes() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0]);
    container.layout_if_needed(&mut host);

    let slow = host.begin_animation(&[ids[0]]);
    assert_eq!(
        container.set_hidden(&mut host, ids[0], true),
        Some(Transition::Queued)
    );
    let fast = host.begin_animation(&[ids[1]]);

    finish(&mut container, &mut host, fast);
    assert!(!host.is_hidden(ids[0]));
    assert_eq!(container.visibility().pending().count(), 1);

    finish(&mut container, &mut host, slow);
    assert!(host.is_hidden(ids[0]));
    assert!(container.visibility().pending().next().is_none());
    assert_eq!(host.observer_count(ids[0], HIDDEN_KEY), 1);
}

#[test]
fn repeated_requests_are_ignored() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0]);
    assert_eq!(
        container.set_hidden(&mut host, ids[0], true),
        Some(Transition::Settled)
    );
    assert_eq!(container.set_hidden(&mut host, ids[0], true), None);
    assert!(host.is_hidden(ids[0]));
}

#[test]
fn removed_box_still_settles_its_pending_flag() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0]);
    container.layout_if_needed(&mut host);

    let anim = host.begin_animation(&[ids[0]]);
    container.set_hidden(&mut host, ids[0], true);
    assert!(container.remove(&mut host, ids[0]));
    container.layout_if_needed(&mut host);
    assert!(
        !container
            .installed_constraints()
            .iter()
            .any(|c| c.involves(Item::Box(ids[0])))
    );

    finish(&mut container, &mut host, anim);
    assert!(host.is_hidden(ids[0]));
    assert_eq!(host.observer_count(ids[0], HIDDEN_KEY), 0);
}

#[test]
fn notifications_for_other_observers_are_ignored() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0]);
    container.layout_if_needed(&mut host);
    let note = Notification {
        observer: ObserverId(99),
        id: ids[0],
        key: HIDDEN_KEY,
        old: false,
        new: true,
    };
    container.observe(&mut host, &note);
    assert!(!container.needs_update());
    assert!(!container.visibility().is_animating_to_hidden(ids[0]));
}

#[test]
fn dismantle_removes_everything() {
    let mut host = MemoryHost::new();
    let (mut container, ids) = stack_of(&mut host, &[10.0, 20.0]);
    container.set_alignment(Alignment::Leading);
    container.layout_if_needed(&mut host);
    assert!(host.spacer_count() > 0);
    assert!(
        container
            .installed_constraints()
            .iter()
            .any(|c| c.priority == Priority::ALIGNED_EDGE)
    );

    container.dismantle(&mut host);
    assert!(host.constraints().is_empty());
    assert_eq!(host.spacer_count(), 0);
    for id in ids {
        assert_eq!(host.observer_count(id, HIDDEN_KEY), 0);
    }
}
