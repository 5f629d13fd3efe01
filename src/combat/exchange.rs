//! Enchantment damage and healing
//!
//! Resolved symmetrically, once per direction, from the derived
//! enchantment pools on each side. Constitution scales the outgoing pools;
//! the receiving side's level and enchantment ward resist them. Heroes
//! resist with their full level, other creatures with its square root.

use crate::combat::constants::{CONSTITUTION_SCALE_DIVISOR, ENCHANT_CEILING};
use crate::combat::snapshot::Combatant;
use crate::stats::battlefield::Battlefield;
use crate::stats::stat::{Attribute, Stat};

/// Result of one enchantment exchange; all values are non-negative and
/// already clamped
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EnchantOutcome {
    pub attacker_damage: u64,
    pub victim_damage: u64,
    pub attacker_heal: u64,
    pub victim_heal: u64,
}

/// One direction of the exchange: the source's pools land on the target
fn resolve_direction(
    battlefield: &Battlefield,
    source: &Combatant,
    target: &Combatant,
) -> (u64, u64) {
    let constitution = battlefield
        .resolve(source.unit, Stat::Attribute(Attribute::Constitution))
        .max(0.0);
    let scale = 1.0 + constitution / CONSTITUTION_SCALE_DIVISOR;

    let level = battlefield.resolve(target.unit, Stat::Level).max(1.0);
    let resistance = if target.hero { level } else { level.sqrt() };
    let ward = battlefield.resolve(target.unit, Stat::EnchantWard);
    let divisor = (resistance * ward).max(1.0);

    let leech = battlefield.resolve(source.unit, Stat::EnchantLeech).max(0.0) * scale / divisor;

    let mut damage =
        battlefield.resolve(source.unit, Stat::EnchantDamage).max(0.0) * scale / divisor + leech;
    damage = damage.clamp(0.0, ENCHANT_CEILING);

    let regeneration = source.max_health
        * battlefield
            .resolve(source.unit, Stat::PassiveRegeneration)
            .max(0.0);
    let mut heal = battlefield.resolve(source.unit, Stat::EnchantHeal).max(0.0) * scale
        + leech
        + regeneration;
    heal = heal.clamp(0.0, ENCHANT_CEILING);

    let mut damage = damage.round() as u64;
    if battlefield.resolve(target.unit, Stat::OneDamageOnly) != 0.0 {
        damage = damage.min(1);
    }
    (damage, heal.round() as u64)
}

/// Resolve enchantment damage and healing in both directions
pub fn calculate_enchantment_exchange(
    battlefield: &Battlefield,
    attacker: &Combatant,
    victim: &Combatant,
) -> EnchantOutcome {
    let (victim_damage, attacker_heal) = resolve_direction(battlefield, attacker, victim);
    let (attacker_damage, victim_heal) = resolve_direction(battlefield, victim, attacker);
    EnchantOutcome {
        attacker_damage,
        victim_damage,
        attacker_heal,
        victim_heal,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::class::Class;
    use crate::combat::snapshot::{build, CharacterRecord, Item};
    use crate::core::types::AttackType;
    use crate::enchant::pipeline::{apply, FLAMEBRAND_DAMAGE, MENDING_HEAL};
    use crate::enchant::token::EnchantToken;

    fn caster(level: u32) -> CharacterRecord {
        let mut record = CharacterRecord::bare("caster", Class::Mage, AttackType::Spell);
        record.level = level;
        record
    }

    #[test]
    fn test_no_enchantments_no_exchange() {
        let mut bf = Battlefield::new();
        let a = build(&mut bf, &caster(10)).unwrap();
        let v = build(&mut bf, &caster(10)).unwrap();
        let outcome = calculate_enchantment_exchange(&bf, &a, &v);
        assert_eq!(outcome, EnchantOutcome::default());
    }

    #[test]
    fn test_flamebrand_damages_victim_only() {
        let mut bf = Battlefield::new();
        let a = build(&mut bf, &caster(1)).unwrap();
        let v = build(&mut bf, &caster(1)).unwrap();
        apply(&mut bf, a.unit, v.unit, &[EnchantToken::Flamebrand]).unwrap();
        let outcome = calculate_enchantment_exchange(&bf, &a, &v);
        // level 1 hero: divisor 1, mage intellect bonus does not feed
        // constitution, so the pool lands unscaled
        assert_eq!(outcome.victim_damage, FLAMEBRAND_DAMAGE as u64);
        assert_eq!(outcome.attacker_damage, 0);
    }

    #[test]
    fn test_hero_resists_with_full_level() {
        let mut bf = Battlefield::new();
        let a = build(&mut bf, &caster(1)).unwrap();
        let mut hero_record = caster(100);
        hero_record.hero = true;
        let mut beast_record = caster(100);
        beast_record.hero = false;
        let hero = build(&mut bf, &hero_record).unwrap();
        let beast = build(&mut bf, &beast_record).unwrap();

        apply(&mut bf, a.unit, hero.unit, &[EnchantToken::Flamebrand]).unwrap();
        let vs_hero = calculate_enchantment_exchange(&bf, &a, &hero);
        apply(&mut bf, a.unit, beast.unit, &[EnchantToken::Flamebrand]).unwrap();
        let vs_beast = calculate_enchantment_exchange(&bf, &a, &beast);
        // sqrt(100) = 10 divides ten times less than the hero's 100
        assert!(vs_beast.victim_damage > vs_hero.victim_damage);
    }

    #[test]
    fn test_leech_heals_the_source_and_hurts_the_target() {
        let mut bf = Battlefield::new();
        let a = build(&mut bf, &caster(1)).unwrap();
        let v = build(&mut bf, &caster(1)).unwrap();
        apply(&mut bf, a.unit, v.unit, &[EnchantToken::Leechroot]).unwrap();
        let outcome = calculate_enchantment_exchange(&bf, &a, &v);
        assert_eq!(outcome.victim_damage, 20);
        assert_eq!(outcome.attacker_heal, 20);
        assert_eq!(outcome.victim_heal, 0);
    }

    #[test]
    fn test_regeneration_adds_flat_heal() {
        let mut bf = Battlefield::new();
        let mut record = caster(1);
        record.max_health = 500.0;
        let a = build(&mut bf, &record).unwrap();
        let v = build(&mut bf, &caster(1)).unwrap();
        apply(
            &mut bf,
            a.unit,
            v.unit,
            &[EnchantToken::Mending, EnchantToken::Regrowth],
        )
        .unwrap();
        let outcome = calculate_enchantment_exchange(&bf, &a, &v);
        // mending pool + 2% of 500 max health
        assert_eq!(outcome.attacker_heal, MENDING_HEAL as u64 + 10);
    }

    #[test]
    fn test_one_damage_only_caps_enchant_damage() {
        let mut bf = Battlefield::new();
        let a = build(&mut bf, &caster(1)).unwrap();
        let mut warded = caster(1);
        warded.quest_items = vec![Item {
            name: "martyr's sigil".into(),
            bonuses: vec![(Stat::OneDamageOnly, 1.0)],
        }];
        let v = build(&mut bf, &warded).unwrap();
        apply(&mut bf, a.unit, v.unit, &[EnchantToken::Flamebrand]).unwrap();
        let outcome = calculate_enchantment_exchange(&bf, &a, &v);
        assert!(outcome.victim_damage <= 1);
    }
}
