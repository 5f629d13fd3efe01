//! Hit check
//!
//! Pure function over two combatant snapshots: derive to-hit and dodge
//! from the attacker's attack type, roll the class-specific luck bonuses,
//! scale by bonus accuracy/dodge, add passive upgrade tier bonuses, then
//! sample `acc / (acc + dodge)`.

use rand::Rng;

use crate::combat::constants::*;
use crate::combat::snapshot::Combatant;
use crate::stats::battlefield::Battlefield;
use crate::stats::stat::{dodge_stat, to_hit_stat, Stat};

/// Roll whether the attacker lands a hit on the victim
pub fn calculate_hit(
    battlefield: &Battlefield,
    attacker: &Combatant,
    victim: &Combatant,
    rng: &mut impl Rng,
) -> bool {
    let attack = attacker.attack_type;

    let mut accuracy = battlefield.resolve(attacker.unit, to_hit_stat(attack));
    // class-specific luck-based random accuracy bonus
    accuracy += rng.gen::<f64>() * attacker.class.luck_accuracy_span() * attacker.luck.small;
    accuracy *= battlefield.resolve(attacker.unit, Stat::BonusAccuracy);
    if let Some(weapon) = attacker.active_weapon() {
        let scale = if weapon.two_handed {
            TWO_HAND_TIER_ACCURACY_SCALE
        } else {
            ONE_HAND_TIER_ACCURACY_SCALE
        };
        accuracy += weapon.passive_tier as f64 * scale;
    }

    let mut dodge = battlefield.resolve(victim.unit, dodge_stat(attack));
    dodge += rng.gen::<f64>() * victim.class.luck_dodge_span() * victim.luck.small;
    dodge *= battlefield.resolve(victim.unit, Stat::BonusDodge);
    dodge += battlefield.resolve(victim.unit, Stat::ArmorTier) * ARMOR_TIER_DODGE_SCALE;
    dodge += battlefield.resolve(victim.unit, Stat::ShieldTier) * SHIELD_TIER_DODGE_SCALE;

    let accuracy = accuracy.max(0.0);
    let dodge = dodge.max(0.0);
    let probability = if accuracy + dodge > 0.0 {
        accuracy / (accuracy + dodge)
    } else {
        0.5
    };
    rng.gen::<f64>() < probability
}
