//! Steal pairs: paired attacker/victim effects redirecting part of a stat's
//! advantage from victim to attacker
//!
//! The attacker-side effect pins a pre-steal baseline on both units (first
//! steal on an attribute wins) and multiplies the attribute's steal factor
//! pseudo-stat by `1 - fraction`; the victim-side effect is sourced from the
//! attacker and contributes the mirrored negative transfer. Stacked steals
//! diminish multiplicatively and can never drive the factor to zero.

use crate::core::error::{CoreError, Result};
use crate::core::types::{EffectId, UnitId};
use crate::stats::battlefield::Battlefield;
use crate::stats::effect::{EffectKind, EffectNode, EffectSource};
use crate::stats::stat::{Attribute, Stat};

/// Attacker and victim halves of one steal
#[derive(Debug, Clone, Copy)]
pub struct StealPair {
    pub attacker_side: EffectId,
    pub victim_side: EffectId,
}

/// Apply a steal of `fraction` on `attribute` by `attacker` against
/// `victim`. Pins pre-steal baselines on first use, then attaches both
/// halves of the pair.
pub fn apply_steal(
    battlefield: &mut Battlefield,
    attacker: UnitId,
    victim: UnitId,
    attribute: Attribute,
    fraction: f64,
) -> Result<StealPair> {
    battlefield
        .unit(attacker)
        .ok_or(CoreError::UnitNotFound(attacker))?;
    battlefield
        .unit(victim)
        .ok_or(CoreError::UnitNotFound(victim))?;

    let fraction = EffectKind::coerce_steal_fraction(fraction);
    let stat = Stat::Attribute(attribute);
    let baseline = Stat::StealBaseline(attribute);

    // Pre-steal baselines: the derived values before this (or any) steal
    // landed. `ensure_base` keeps the first pinned value on stacking.
    let pre_attacker = battlefield.resolve(attacker, stat);
    let pre_victim = battlefield.resolve(victim, stat);
    if let Some(unit) = battlefield.unit_mut(attacker) {
        unit.ensure_base(baseline, pre_attacker);
    }
    if let Some(unit) = battlefield.unit_mut(victim) {
        unit.ensure_base(baseline, pre_victim);
    }

    let attacker_side = battlefield.insert_effect(EffectNode::new(EffectKind::StealAttacker {
        victim,
        attribute,
        fraction,
    }));
    let victim_side = battlefield.insert_effect(
        EffectNode::new(EffectKind::StealVictim {
            attacker,
            attribute,
            fraction,
        })
        .with_source(EffectSource::Unit(attacker))
        .as_debuff(),
    );
    battlefield.attach(attacker_side, attacker)?;
    battlefield.attach(victim_side, victim)?;

    Ok(StealPair {
        attacker_side,
        victim_side,
    })
}

/// Remove both halves of a steal pair
pub fn remove_steal(battlefield: &mut Battlefield, pair: StealPair) -> Result<()> {
    battlefield.remove(pair.attacker_side)?;
    battlefield.remove(pair.victim_side)?;
    Ok(())
}
