//! Physical damage resolution
//!
//! Pure function over two combatant snapshots. Victim armor accumulates
//! additively per piece as an exponential of effective level (shields grow
//! from a distinct base), the weapon curve is contested against it, then
//! variance, criticals, the contested stat ratio, and the final multipliers
//! apply. The result is clamped to [1, 1e9] and forced to 1 for victims
//! that can only take one damage.

use rand::Rng;

use crate::combat::constants::*;
use crate::combat::snapshot::Combatant;
use crate::stats::battlefield::Battlefield;
use crate::stats::stat::{damage_reduction_stat, damage_stat, Stat};

/// Result of one damage resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DamageOutcome {
    pub damage: u64,
    pub critical: bool,
    pub double_critical: bool,
}

/// Total armor contributed by every worn piece, scaled by the victim's
/// physical ward
fn total_armor(battlefield: &Battlefield, victim: &Combatant) -> f64 {
    let mut total = 0.0;
    for piece in &victim.armor {
        let growth = if piece.shield {
            SHIELD_GROWTH
        } else {
            ARMOR_GROWTH
        };
        total += growth.powi(piece.effective_level() as i32);
    }
    total * battlefield.resolve(victim.unit, Stat::PhysicalWard)
}

/// Roll damage for one attack that already hit
pub fn calculate_damage(
    battlefield: &Battlefield,
    attacker: &Combatant,
    victim: &Combatant,
    rng: &mut impl Rng,
) -> DamageOutcome {
    let attack = attacker.attack_type;

    // Base weapon damage contested against accumulated armor
    let weapon_level = attacker
        .active_weapon()
        .map(|w| w.effective_level())
        .unwrap_or(0) as f64;
    let armor = total_armor(battlefield, victim);

    let mut decrease = 1.0;
    if victim.class.halves_base_damage() {
        decrease *= GUARDIAN_BASE_DAMAGE_FACTOR;
    }
    decrease *= RESILIENCE_DECAY.powi(victim.skills.resilience as i32);

    let curve = WEAPON_DAMAGE_GROWTH.powf(weapon_level)
        + WEAPON_DAMAGE_PER_LEVEL * weapon_level
        - armor;
    let mut damage = (curve * decrease).max(1.0);

    // Symmetric variance scaled by the attacker's small-luck
    let swing = attacker.luck.small * VARIANCE_SCALE;
    damage *= 1.0 + swing * (rng.gen::<f64>() * 2.0 - 1.0);

    // Criticals: x3, another x3, and a half-odds third tier for the two
    // classes that can land it
    let critical = rng.gen::<f64>() < attacker.luck.large.clamp(0.0, 1.0);
    let mut double_critical = false;
    if critical {
        damage *= CRITICAL_MULTIPLIER;
        double_critical = rng.gen::<f64>() < attacker.luck.ultra.clamp(0.0, 1.0);
        if double_critical {
            damage *= CRITICAL_MULTIPLIER;
            let triple_odds = (attacker.luck.ultra / 2.0).clamp(0.0, 1.0);
            if attacker.class.triple_critical() && rng.gen::<f64>() < triple_odds {
                damage *= CRITICAL_MULTIPLIER;
            }
        }
    }

    // Contested stat ratio
    let power = battlefield
        .resolve(attacker.unit, damage_stat(attack))
        .max(0.0);
    let reduction = battlefield.resolve(victim.unit, damage_reduction_stat(attack));
    let denominator = (reduction / 2.0).max(MIN_CONTESTED_DENOMINATOR);
    damage *= power / denominator;

    // Percentage increase and accumulated armor piercing
    damage *= battlefield.resolve(attacker.unit, Stat::DamageIncrease);
    damage *= battlefield.resolve(attacker.unit, Stat::ArmorPierce);

    // Flat multiplicative reduction per tiered armor piece
    for piece in &victim.armor {
        if piece.passive_tier > 0 {
            damage *= PASSIVE_TIER_ARMOR_FACTOR.powi(piece.passive_tier as i32);
        }
    }

    let mut damage = damage.clamp(DAMAGE_FLOOR, DAMAGE_CEILING).round() as u64;
    if battlefield.resolve(victim.unit, Stat::OneDamageOnly) != 0.0 {
        damage = 1;
    }

    DamageOutcome {
        damage,
        critical,
        double_critical,
    }
}
