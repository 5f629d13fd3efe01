//! Enchantment pipeline integration tests
//!
//! Full-cycle runs: tokens gathered from built combatants, expanded and
//! applied, countered, and finally cashed out through the exchange.

use thornvale::combat::{build, calculate_enchantment_exchange, CharacterRecord, Class, Weapon};
use thornvale::core::types::AttackType;
use thornvale::enchant::pipeline::{FLAMEBRAND_DAMAGE, KEENEDGE_ACCURACY, MENDING_HEAL};
use thornvale::enchant::{apply, expand, expand_named, order_for_activation, resolve_counter_spells, EnchantToken};
use thornvale::stats::{Attribute, Battlefield, Stat};

fn duelist(name: &str, enchants: Vec<EnchantToken>) -> CharacterRecord {
    let mut record = CharacterRecord::bare(name, Class::Spellblade, AttackType::Spell);
    record.attributes = vec![
        (Attribute::Intellect, 60.0),
        (Attribute::Willpower, 40.0),
    ];
    let mut blade = Weapon::new("etched blade", 6);
    blade.enchants = enchants;
    record.weapons = vec![blade];
    record
}

#[test]
fn test_composite_expansion_is_ordered_and_complete() {
    let mut primitives = expand(&[EnchantToken::Archon, EnchantToken::CounterSpell]);
    order_for_activation(&mut primitives);
    // canonical activation priority, descending
    assert_eq!(
        primitives,
        vec![
            EnchantToken::CounterSpell,
            EnchantToken::Wardveil,
            EnchantToken::Mending,
            EnchantToken::Keenedge,
            EnchantToken::Flamebrand,
        ]
    );
}

#[test]
fn test_malformed_names_are_dropped() {
    let primitives = expand_named(&["stormlash", "no-such-rune"]);
    assert_eq!(
        primitives,
        vec![EnchantToken::Keenedge, EnchantToken::Flamebrand]
    );
}

#[test]
fn test_tokens_from_weapons_flow_through_the_pipeline() {
    let mut bf = Battlefield::new();
    let caster = build(
        &mut bf,
        &duelist("caster", vec![EnchantToken::Stormlash]),
    )
    .unwrap();
    let target = build(&mut bf, &duelist("target", vec![])).unwrap();

    let applied = apply(&mut bf, caster.unit, target.unit, &caster.enchant_tokens()).unwrap();
    assert_eq!(applied.self_effects.len(), 2);
    assert_eq!(bf.resolve(caster.unit, Stat::EnchantDamage), FLAMEBRAND_DAMAGE);
    // keenedge multiplies the caster's own attack type accuracy
    let base = bf.resolve(target.unit, Stat::Accuracy(AttackType::Spell));
    let buffed = bf.resolve(caster.unit, Stat::Accuracy(AttackType::Spell));
    assert!((buffed - base * KEENEDGE_ACCURACY).abs() < 1e-9);
}

#[test]
fn test_counter_duel_suppresses_the_weaker_side() {
    let mut bf = Battlefield::new();
    let caster = build(
        &mut bf,
        &duelist(
            "caster",
            vec![EnchantToken::Flamebrand, EnchantToken::Mending],
        ),
    )
    .unwrap();
    let rival = build(
        &mut bf,
        &duelist("rival", vec![EnchantToken::CounterSpell]),
    )
    .unwrap();

    let caster_applied =
        apply(&mut bf, caster.unit, rival.unit, &caster.enchant_tokens()).unwrap();
    let rival_applied = apply(&mut bf, rival.unit, caster.unit, &rival.enchant_tokens()).unwrap();
    assert_eq!(caster_applied.counter_count, 0);
    assert_eq!(rival_applied.counter_count, 1);

    let outcome = resolve_counter_spells(
        &mut bf,
        caster.unit,
        caster_applied.counter_count,
        rival.unit,
        rival_applied.counter_count,
    )
    .unwrap();
    assert_eq!(outcome.countered, Some(caster.unit));
    // budget 2 covers both enchantments
    assert_eq!(outcome.disabled.len(), 2);

    let exchange = calculate_enchantment_exchange(&bf, &caster, &rival);
    assert_eq!(exchange.victim_damage, 0);
    assert_eq!(exchange.attacker_heal, 0);
}

#[test]
fn test_uncountered_enchantments_cash_out_in_the_exchange() {
    let mut bf = Battlefield::new();
    let caster = build(
        &mut bf,
        &duelist(
            "caster",
            vec![EnchantToken::Flamebrand, EnchantToken::Mending],
        ),
    )
    .unwrap();
    let target = build(&mut bf, &duelist("target", vec![])).unwrap();

    apply(&mut bf, caster.unit, target.unit, &caster.enchant_tokens()).unwrap();
    resolve_counter_spells(&mut bf, caster.unit, 0, target.unit, 0).unwrap();

    let exchange = calculate_enchantment_exchange(&bf, &caster, &target);
    assert_eq!(exchange.victim_damage, FLAMEBRAND_DAMAGE as u64);
    assert_eq!(exchange.attacker_heal, MENDING_HEAL as u64);
    assert_eq!(exchange.attacker_damage, 0);
}

#[test]
fn test_next_round_replaces_the_previous_application() {
    let mut bf = Battlefield::new();
    let caster = build(
        &mut bf,
        &duelist("caster", vec![EnchantToken::Plaguewind]),
    )
    .unwrap();
    let target = build(&mut bf, &duelist("target", vec![])).unwrap();

    let ward_before = bf.resolve(target.unit, Stat::EnchantWard);
    apply(&mut bf, caster.unit, target.unit, &caster.enchant_tokens()).unwrap();
    assert!(bf.resolve(target.unit, Stat::EnchantWard) < ward_before);

    // a plain follow-up attack drops the previous debuff bundle
    apply(&mut bf, caster.unit, target.unit, &[EnchantToken::Mending]).unwrap();
    assert_eq!(bf.resolve(target.unit, Stat::EnchantWard), ward_before);
}
