//! Stat container and reduction integration tests
//!
//! End-to-end checks of the reduction contract: baseline resolution,
//! effect stacking and removal, steal pairs, and degradation under bad
//! contributors.

use thornvale::combat::Class;
use thornvale::core::types::AttackType;
use thornvale::stats::{
    apply_steal, remove_steal, Attribute, Battlefield, EffectKind, EffectNode, Stat, StatBundle,
    Unit,
};

fn unit_with_strength(bf: &mut Battlefield, strength: f64) -> thornvale::core::types::UnitId {
    let mut unit = Unit::new(AttackType::Melee, Class::Warrior);
    unit.set_base(Stat::Attribute(Attribute::Strength), strength);
    bf.spawn_unit(unit)
}

#[test]
fn test_baseline_unit_resolves_base_values() {
    let mut bf = Battlefield::new();
    let id = unit_with_strength(&mut bf, 42.0);
    assert_eq!(bf.resolve(id, Stat::Attribute(Attribute::Strength)), 42.0);
    // unknown-to-the-caller stats default, never error
    assert_eq!(bf.resolve(id, Stat::Attribute(Attribute::Willpower)), 0.0);
    assert_eq!(bf.resolve(id, Stat::EnchantWard), 1.0);
    assert_eq!(bf.resolve(id, Stat::StealFactor(Attribute::Strength)), 1.0);
}

#[test]
fn test_full_removal_restores_every_derived_stat() {
    let mut bf = Battlefield::new();
    let id = unit_with_strength(&mut bf, 100.0);
    let strength = Stat::Attribute(Attribute::Strength);
    let ward = Stat::PhysicalWard;

    let before = (bf.resolve(id, strength), bf.resolve(id, ward));

    // composite with two children touching different stats
    let parent = bf.insert_effect(EffectNode::new(EffectKind::Composite));
    let child_a = bf.insert_effect(EffectNode::new(EffectKind::Bundle(
        StatBundle::new().with_bonus(strength, 30.0),
    )));
    let child_b = bf.insert_effect(EffectNode::new(EffectKind::Bundle(
        StatBundle::new().with_multiplier(ward, 1.5),
    )));
    bf.attach(parent, id).unwrap();
    bf.attach(child_a, id).unwrap();
    bf.attach(child_b, id).unwrap();
    bf.add_child(parent, child_a).unwrap();
    bf.add_child(parent, child_b).unwrap();

    assert_ne!(bf.resolve(id, strength), before.0);
    assert_ne!(bf.resolve(id, ward), before.1);

    bf.remove(parent).unwrap();
    assert_eq!(bf.resolve(id, strength), before.0);
    assert_eq!(bf.resolve(id, ward), before.1);
}

#[test]
fn test_steal_scenario_single() {
    let mut bf = Battlefield::new();
    let attacker = unit_with_strength(&mut bf, 1000.0);
    let victim = unit_with_strength(&mut bf, 1000.0);
    apply_steal(&mut bf, attacker, victim, Attribute::Strength, 0.1).unwrap();
    assert_eq!(
        bf.resolve(attacker, Stat::Attribute(Attribute::Strength)),
        1100.0
    );
    assert_eq!(
        bf.resolve(victim, Stat::Attribute(Attribute::Strength)),
        900.0
    );
}

#[test]
fn test_steal_scenario_stacked() {
    let mut bf = Battlefield::new();
    let attacker = unit_with_strength(&mut bf, 1000.0);
    let victim = unit_with_strength(&mut bf, 1000.0);
    apply_steal(&mut bf, attacker, victim, Attribute::Strength, 0.1).unwrap();
    apply_steal(&mut bf, attacker, victim, Attribute::Strength, 0.2).unwrap();
    assert_eq!(
        bf.resolve(attacker, Stat::Attribute(Attribute::Strength)),
        1280.0
    );
    assert_eq!(
        bf.resolve(victim, Stat::Attribute(Attribute::Strength)),
        720.0
    );
}

#[test]
fn test_steal_stack_is_strictly_diminishing() {
    let mut bf = Battlefield::new();
    let attacker = unit_with_strength(&mut bf, 1000.0);
    let victim = unit_with_strength(&mut bf, 1000.0);

    let mut last_victim = 1000.0;
    let mut last_delta = f64::INFINITY;
    for _ in 0..12 {
        apply_steal(&mut bf, attacker, victim, Attribute::Strength, 0.3).unwrap();
        let now = bf.resolve(victim, Stat::Attribute(Attribute::Strength));
        let delta = last_victim - now;
        assert!(delta >= 0.0);
        assert!(delta <= last_delta, "stack must diminish");
        last_victim = now;
        last_delta = delta;
    }
    // the factor shrinks (0.7^12, about 0.014) but never reaches zero
    let factor = bf.resolve(attacker, Stat::StealFactor(Attribute::Strength));
    assert!(factor > 0.0 && factor < 0.02);
    // the victim keeps at least the uncapped share of the baseline
    assert!(last_victim >= 200.0 - 1e-9);
}

#[test]
fn test_steal_pair_removal_is_symmetric() {
    let mut bf = Battlefield::new();
    let attacker = unit_with_strength(&mut bf, 1000.0);
    let victim = unit_with_strength(&mut bf, 800.0);
    let pair = apply_steal(&mut bf, attacker, victim, Attribute::Strength, 0.25).unwrap();
    remove_steal(&mut bf, pair).unwrap();
    assert_eq!(
        bf.resolve(attacker, Stat::Attribute(Attribute::Strength)),
        1000.0
    );
    assert_eq!(
        bf.resolve(victim, Stat::Attribute(Attribute::Strength)),
        800.0
    );
}

#[test]
fn test_bad_contributors_never_abort_reduction() {
    let mut bf = Battlefield::new();
    let id = unit_with_strength(&mut bf, 50.0);
    let strength = Stat::Attribute(Attribute::Strength);

    let poison = bf.insert_effect(EffectNode::new(EffectKind::Bundle(
        StatBundle::new()
            .with_bonus(strength, f64::NAN)
            .with_extra(strength, f64::NEG_INFINITY),
    )));
    let honest = bf.insert_effect(EffectNode::new(EffectKind::Bundle(
        StatBundle::new().with_bonus(strength, 10.0),
    )));
    bf.attach(poison, id).unwrap();
    bf.attach(honest, id).unwrap();

    // the poisoned contributor degrades to neutral, the honest one lands
    assert_eq!(bf.resolve(id, strength), 60.0);
}

#[test]
fn test_reentrant_contributor_is_skipped() {
    let mut bf = Battlefield::new();
    let id = unit_with_strength(&mut bf, 80.0);
    let strength = Stat::Attribute(Attribute::Strength);
    let cycle = bf.insert_effect(EffectNode::new(EffectKind::Scaling {
        from: strength,
        to: strength,
        rate: 1.0,
    }));
    bf.attach(cycle, id).unwrap();
    // inner resolve skips the in-progress contributor: 80 + 1.0 * 80
    assert_eq!(bf.resolve(id, strength), 160.0);
}
