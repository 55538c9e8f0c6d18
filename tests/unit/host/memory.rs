use super::*;

#[test]
fn hidden_writes_notify_registered_observers_once() {
    let mut host = MemoryHost::new();
    let id = host.add_box(Size::new(10.0, 10.0));
    host.add_observer(id, HIDDEN_KEY, ObserverId(1));

    host.set_hidden(id, true);
    host.set_hidden(id, true);
    let notes = host.drain_notifications();
    assert_eq!(
        notes,
        vec![Notification {
            observer: ObserverId(1),
            id,
            key: HIDDEN_KEY,
            old: false,
            new: true,
        }]
    );
    assert!(host.drain_notifications().is_empty());
}

#[test]
fn removed_observers_stay_silent() {
    let mut host = MemoryHost::new();
    let id = host.add_box(Size::ZERO);
    host.add_observer(id, HIDDEN_KEY, ObserverId(1));
    assert_eq!(host.observer_count(id, HIDDEN_KEY), 1);

    host.remove_observer(id, HIDDEN_KEY, ObserverId(1));
    assert_eq!(host.observer_count(id, HIDDEN_KEY), 0);
    host.set_hidden(id, true);
    assert!(host.drain_notifications().is_empty());
    assert!(host.is_hidden(id));
}

#[test]
fn only_scaffold_boxes_can_be_removed() {
    let mut host = MemoryHost::new();
    let content = host.add_box(Size::new(4.0, 4.0));
    let spacer = host.insert_spacer(ScaffoldRole::Distributing);
    assert_eq!(host.spacer_count(), 1);

    host.remove_spacer(content);
    host.remove_spacer(spacer);
    assert!(host.contains(content));
    assert!(!host.contains(spacer));
    assert_eq!(host.intrinsic_size(spacer), Size::ZERO);
}

#[test]
fn constraints_are_removed_by_value() {
    let mut host = MemoryHost::new();
    let a = host.add_box(Size::ZERO);
    let b = host.add_box(Size::ZERO);
    let first = Constraint::matching(a, crate::Attribute::Top, b);
    let second = Constraint::matching(a, crate::Attribute::Bottom, b);

    host.add_constraints(&[first.clone(), second.clone()]);
    host.remove_constraints(std::slice::from_ref(&first));
    assert_eq!(host.constraints(), std::slice::from_ref(&second));
}

#[test]
fn animation_contexts_collect_stop_observers() {
    let mut host = MemoryHost::new();
    let id = host.add_box(Size::ZERO);
    assert!(!host.has_animations(id));

    let anim = host.begin_animation(&[id]);
    assert!(host.has_animations(id));
    host.notify_animation_stop(ObserverId(3), id);
    host.notify_animation_stop(ObserverId(3), id);

    assert_eq!(host.finish_animation(anim), vec![ObserverId(3)]);
    assert!(!host.has_animations(id));
    assert!(host.finish_animation(anim).is_empty());
}

#[test]
fn stop_requests_attach_to_the_newest_context() {
    let mut host = MemoryHost::new();
    let id = host.add_box(Size::ZERO);
    let older = host.begin_animation(&[id]);
    let newer = host.begin_animation(&[id]);
    host.notify_animation_stop(ObserverId(1), id);

    assert!(host.finish_animation(older).is_empty());
    assert!(host.has_animations(id));
    assert_eq!(host.finish_animation(newer), vec![ObserverId(1)]);
}

#[test]
fn stop_requests_follow_the_box_not_the_latest_context() {
    let mut host = MemoryHost::new();
    let a = host.add_box(Size::ZERO);
    let b = host.add_box(Size::ZERO);
    let for_a = host.begin_animation(&[a]);
    let for_b = host.begin_animation(&[b]);
    host.notify_animation_stop(ObserverId(1), a);

    assert!(host.finish_animation(for_b).is_empty());
    assert_eq!(host.finish_animation(for_a), vec![ObserverId(1)]);
}

#[test]
fn stop_requests_for_idle_boxes_are_dropped() {
    let mut host = MemoryHost::new();
    let a = host.add_box(Size::ZERO);
    let b = host.add_box(Size::ZERO);
    let anim = host.begin_animation(&[a]);
    host.notify_animation_stop(ObserverId(1), b);
    assert!(host.finish_animation(anim).is_empty());
}

#[test]
fn margins_and_layout_passes_are_recorded() {
    let mut host = MemoryHost::new();
    assert_eq!(host.layout_passes(), 0);
    host.set_layout_margins(Edges::all(2.0));
    host.layout_if_needed();
    assert_eq!(host.layout_margins(), Edges::all(2.0));
    assert_eq!(host.layout_passes(), 1);
}
