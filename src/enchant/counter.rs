//! Counter-spell resolution
//!
//! Compares each side's counter capability and disables a budgeted subset
//! of the weaker side's enchantments, highest counter priority first.
//! Disabling suspends a contribution without destroying the effect, so a
//! later re-application starts clean.

use tracing::debug;

use crate::core::error::{CoreError, Result};
use crate::core::types::{EffectId, UnitId};
use crate::stats::battlefield::Battlefield;

/// Outcome of one counter-spell resolution
#[derive(Debug, Clone, Default)]
pub struct CounterOutcome {
    /// Side whose enchantments were suppressed, if any
    pub countered: Option<UnitId>,
    /// Effects disabled, in suppression order
    pub disabled: Vec<EffectId>,
}

/// Resolve counter-spells between two sides.
///
/// Raw counter-counts are each doubled; equal counts (including 0, 0)
/// cancel nothing. Otherwise the side with fewer counters is countered and
/// the budget is the absolute difference. Eligible targets are that side's
/// enabled, non-debuff, enchantment-tagged effects whose token carries a
/// counter priority; they are ranked descending and at most `budget` of
/// them are disabled.
pub fn resolve_counter_spells(
    battlefield: &mut Battlefield,
    attacker: UnitId,
    attacker_counters: u32,
    victim: UnitId,
    victim_counters: u32,
) -> Result<CounterOutcome> {
    battlefield
        .unit(attacker)
        .ok_or(CoreError::UnitNotFound(attacker))?;
    battlefield
        .unit(victim)
        .ok_or(CoreError::UnitNotFound(victim))?;

    let attacker_total = attacker_counters * 2;
    let victim_total = victim_counters * 2;
    if attacker_total == victim_total {
        return Ok(CounterOutcome::default());
    }

    let (loser, budget) = if attacker_total < victim_total {
        (attacker, victim_total - attacker_total)
    } else {
        (victim, attacker_total - victim_total)
    };

    // Eligible targets in attachment order; the stable sort keeps that
    // order inside equal priorities
    let mut eligible: Vec<(u32, EffectId)> = battlefield
        .unit(loser)
        .map(|unit| {
            unit.modifiers
                .iter()
                .filter_map(|&eid| {
                    let effect = battlefield.effect(eid)?;
                    if effect.disabled || effect.debuff {
                        return None;
                    }
                    let priority = effect.tag?.counter_priority()?;
                    Some((priority, eid))
                })
                .collect()
        })
        .unwrap_or_default();
    eligible.sort_by_key(|&(priority, _)| std::cmp::Reverse(priority));

    let mut outcome = CounterOutcome {
        countered: Some(loser),
        disabled: Vec::new(),
    };
    for &(_, eid) in eligible.iter().take(budget as usize) {
        battlefield.set_enabled(eid, false)?;
        outcome.disabled.push(eid);
    }
    debug!(
        ?loser,
        budget,
        disabled = outcome.disabled.len(),
        "counter-spells resolved"
    );
    Ok(outcome)
}
