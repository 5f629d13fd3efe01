//! Enchantment resolution pipeline
//!
//! Expands composite tokens into primitives, sorts them into canonical
//! activation order, then converts each primitive into one or two effects:
//! a self-facing effect attached to the caster and/or an opponent-facing
//! debuff. All opponent-facing effects of one application hang off a single
//! composite parent attached to the opponent, so the whole bundle is
//! replaced atomically before each new attack.
//!
//! Application order across two combatants is caster-first: one side's
//! buffs land before the other side's debuffs reach it. That asymmetry is
//! long-standing behavior and is preserved here.

use tracing::debug;

use crate::core::error::{CoreError, Result};
use crate::core::types::{AttackType, EffectId, UnitId};
use crate::enchant::token::{expand, order_for_activation, EnchantToken};
use crate::stats::battlefield::Battlefield;
use crate::stats::effect::{EffectKind, EffectNode, EffectSource, StatBundle};
use crate::stats::stat::Stat;

// Effect magnitudes per primitive token
pub const FLAMEBRAND_DAMAGE: f64 = 30.0;
pub const MENDING_HEAL: f64 = 25.0;
pub const LEECHROOT_LEECH: f64 = 20.0;
pub const KEENEDGE_ACCURACY: f64 = 1.1;
pub const IRONSKIN_WARD: f64 = 1.15;
pub const WARDVEIL_WARD: f64 = 1.25;
pub const REGROWTH_RATE: f64 = 0.02;
pub const SMITE_SPELL_DAMAGE: f64 = 40.0;
pub const SMITE_POWER: f64 = 1.05;
pub const SIPHON_LEECH: f64 = 15.0;
pub const SIPHON_WARD_DEBUFF: f64 = 0.9;
pub const WITHERBANE_POWER_DEBUFF: f64 = 0.9;
pub const DUSTCLOUD_ACCURACY_DEBUFF: f64 = 0.9;

/// Effects created by one pipeline application
#[derive(Debug, Clone, Default)]
pub struct AppliedEnchantments {
    /// Self-facing effects attached to the caster
    pub self_effects: Vec<EffectId>,
    /// Composite parent of all opponent-facing effects, if any were built
    pub opponent_bundle: Option<EffectId>,
    /// Counter-spell tokens seen in the expansion (raw, undoubled)
    pub counter_count: u32,
}

/// Self- and opponent-facing bundles one primitive constructs
fn primitive_effects(
    token: EnchantToken,
    caster_attack: AttackType,
    opponent_attack: AttackType,
) -> (Option<StatBundle>, Option<StatBundle>) {
    use EnchantToken::*;
    match token {
        Flamebrand => (
            Some(StatBundle::new().with_bonus(Stat::EnchantDamage, FLAMEBRAND_DAMAGE)),
            None,
        ),
        Mending => (
            Some(StatBundle::new().with_bonus(Stat::EnchantHeal, MENDING_HEAL)),
            None,
        ),
        Leechroot => (
            Some(StatBundle::new().with_bonus(Stat::EnchantLeech, LEECHROOT_LEECH)),
            None,
        ),
        Keenedge => (
            Some(
                StatBundle::new()
                    .with_multiplier(Stat::Accuracy(caster_attack), KEENEDGE_ACCURACY),
            ),
            None,
        ),
        Ironskin => (
            Some(StatBundle::new().with_multiplier(Stat::PhysicalWard, IRONSKIN_WARD)),
            None,
        ),
        Wardveil => (
            Some(StatBundle::new().with_multiplier(Stat::EnchantWard, WARDVEIL_WARD)),
            None,
        ),
        Regrowth => (
            Some(StatBundle::new().with_bonus(Stat::PassiveRegeneration, REGROWTH_RATE)),
            None,
        ),
        // Conditioned on attack type: casters burn, everyone else swings
        Smite => match caster_attack {
            AttackType::Spell => (
                Some(StatBundle::new().with_bonus(Stat::EnchantDamage, SMITE_SPELL_DAMAGE)),
                None,
            ),
            _ => (
                Some(StatBundle::new().with_multiplier(Stat::Power(caster_attack), SMITE_POWER)),
                None,
            ),
        },
        Siphon => (
            Some(StatBundle::new().with_bonus(Stat::EnchantLeech, SIPHON_LEECH)),
            Some(StatBundle::new().with_multiplier(Stat::EnchantWard, SIPHON_WARD_DEBUFF)),
        ),
        Witherbane => (
            None,
            Some(
                StatBundle::new()
                    .with_multiplier(Stat::Power(opponent_attack), WITHERBANE_POWER_DEBUFF),
            ),
        ),
        Dustcloud => (
            None,
            Some(
                StatBundle::new()
                    .with_multiplier(Stat::Accuracy(opponent_attack), DUSTCLOUD_ACCURACY_DEBUFF),
            ),
        ),
        // Counted, never constructed
        CounterSpell => (None, None),
        // Composites never reach construction
        Stormlash | Plaguewind | Archon => (None, None),
    }
}

/// Remove the unit's own enchantment-tagged effects. Incoming debuffs
/// belong to the opponent's bundle and are left alone; they get replaced
/// when that opponent re-applies. Called before each new attack.
pub fn clear_enchantments(battlefield: &mut Battlefield, unit: UnitId) -> Result<()> {
    let tagged: Vec<EffectId> = battlefield
        .unit(unit)
        .ok_or(CoreError::UnitNotFound(unit))?
        .modifiers
        .iter()
        .copied()
        .filter(|&eid| {
            battlefield
                .effect(eid)
                .map(|e| e.tag.is_some() && !e.debuff)
                .unwrap_or(false)
        })
        .collect();
    for eid in tagged {
        // children of a composite may already be gone when it cascades
        let _ = battlefield.remove(eid);
    }
    Ok(())
}

/// Expand, order, and apply a caster's enchantments against an opponent.
///
/// Self-facing effects supersede the caster's previous enchantments;
/// opponent-facing effects replace the opponent's incoming bundle as one
/// atomic unit.
pub fn apply(
    battlefield: &mut Battlefield,
    caster: UnitId,
    opponent: UnitId,
    tokens: &[EnchantToken],
) -> Result<AppliedEnchantments> {
    let caster_attack = battlefield
        .unit(caster)
        .ok_or(CoreError::UnitNotFound(caster))?
        .attack_type;
    let opponent_attack = battlefield
        .unit(opponent)
        .ok_or(CoreError::UnitNotFound(opponent))?
        .attack_type;

    let mut primitives = expand(tokens);
    order_for_activation(&mut primitives);

    clear_enchantments(battlefield, caster)?;
    if let Some(previous) = battlefield.unit(opponent).and_then(|u| u.incoming_bundle) {
        battlefield.remove(previous)?;
    }

    let mut applied = AppliedEnchantments::default();
    let mut opponent_children: Vec<(EnchantToken, StatBundle)> = Vec::new();

    for token in primitives {
        if token == EnchantToken::CounterSpell {
            applied.counter_count += 1;
            continue;
        }
        let (self_bundle, opponent_bundle) =
            primitive_effects(token, caster_attack, opponent_attack);
        if let Some(bundle) = self_bundle {
            let eid = battlefield
                .insert_effect(EffectNode::new(EffectKind::Bundle(bundle)).with_tag(token));
            battlefield.attach(eid, caster)?;
            applied.self_effects.push(eid);
        }
        if let Some(bundle) = opponent_bundle {
            opponent_children.push((token, bundle));
        }
    }

    if !opponent_children.is_empty() {
        let composite = battlefield.insert_effect(
            EffectNode::new(EffectKind::Composite).with_source(EffectSource::Unit(caster)),
        );
        battlefield.attach(composite, opponent)?;
        for (token, bundle) in opponent_children {
            let child = battlefield.insert_effect(
                EffectNode::new(EffectKind::Bundle(bundle))
                    .with_source(EffectSource::Unit(caster))
                    .with_tag(token)
                    .as_debuff(),
            );
            battlefield.attach(child, opponent)?;
            battlefield.add_child(composite, child)?;
        }
        if let Some(unit) = battlefield.unit_mut(opponent) {
            unit.incoming_bundle = Some(composite);
        }
        applied.opponent_bundle = Some(composite);
    }

    debug!(
        ?caster,
        ?opponent,
        self_effects = applied.self_effects.len(),
        counter = applied.counter_count,
        "enchantments applied"
    );
    Ok(applied)
}
