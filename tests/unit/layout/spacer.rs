use super::*;
use crate::host::memory::MemoryHost;

#[test]
fn plan_follows_alignment_and_distribution() {
    let config = StackConfig::default();
    assert!(ScaffoldPlan::for_layout(&config, 3).is_empty());

    let config = StackConfig {
        alignment: Alignment::Center,
        distribution: Distribution::EqualSpacing,
        layout_margins_relative: true,
        ..StackConfig::default()
    };
    let plan = ScaffoldPlan::for_layout(&config, 4);
    assert!(plan.margins_guide);
    assert!(plan.alignment_spanner);
    assert_eq!(plan.distribution_spacers, 3);
    assert_eq!(plan.len(), 5);
}

#[test]
fn spacers_count_visible_gaps_only() {
    let config = StackConfig {
        distribution: Distribution::EqualCentering,
        ..StackConfig::default()
    };
    assert_eq!(ScaffoldPlan::for_layout(&config, 0).distribution_spacers, 0);
    assert_eq!(ScaffoldPlan::for_layout(&config, 1).distribution_spacers, 0);
    assert_eq!(ScaffoldPlan::for_layout(&config, 5).distribution_spacers, 4);
}

#[test]
fn create_and_destroy_round_trip_through_the_host() {
    let mut host = MemoryHost::new();
    let content = host.add_box(crate::Size::new(10.0, 10.0));
    let plan = ScaffoldPlan {
        margins_guide: true,
        alignment_spanner: true,
        distribution_spacers: 2,
    };

    let scaffold = SpacerFactory::create(&mut host, &plan);
    assert_eq!(scaffold.len(), 4);
    assert_eq!(host.spacer_count(), 4);
    assert!(scaffold.margins_guide().is_some());
    assert!(scaffold.alignment_spanner().is_some());
    assert_eq!(scaffold.spacers().len(), 2);
    assert!(!scaffold.contains(content));

    let roles: Vec<ScaffoldRole> = host.spacers().map(|(_, role)| role).collect();
    assert_eq!(
        roles,
        vec![
            ScaffoldRole::LayoutMarginsGuide,
            ScaffoldRole::AlignmentSpanner,
            ScaffoldRole::Distributing,
            ScaffoldRole::Distributing,
        ]
    );

    SpacerFactory::destroy(&mut host, scaffold);
    assert_eq!(host.spacer_count(), 0);
    assert!(host.contains(content));
}

#[test]
fn roles_carry_debug_identifiers() {
    assert_eq!(
        ScaffoldRole::LayoutMarginsGuide.identifier(),
        "stack-layout-margins-guide"
    );
    assert_eq!(
        ScaffoldRole::AlignmentSpanner.identifier(),
        "stack-alignment-spanner"
    );
    assert_eq!(ScaffoldRole::Distributing.identifier(), "stack-distributing");
}
