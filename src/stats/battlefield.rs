//! Effect arena and the stat reduction algorithm
//!
//! The battlefield owns every unit and effect taking part in one resolved
//! action. Effects are arena nodes with parent/child indices, so composite
//! ownership and cascade removal are explicit rather than an implicit object
//! graph.
//!
//! Reduction contract: `resolve(unit, stat)` combines three independently
//! reduced contributions (additive base, multiplier product, extra bonus),
//! each guarded against reentrancy by a visited set keyed by
//! `(EffectId, Stat)` that travels with the call. A contributor that
//! recurses into itself, returns a non-finite number, or points at a unit
//! no longer in the arena contributes nothing; it is logged and the
//! reduction continues. Nothing here aborts a combat resolution.

use ahash::AHashSet;
use tracing::{debug, warn};

use crate::core::error::{CoreError, Result};
use crate::core::types::{EffectId, UnitId};
use crate::stats::effect::{EffectKind, EffectNode, TierSlot};
use crate::stats::stat::{Attribute, Stat};
use crate::stats::unit::Unit;

/// A transfer can never take more than this share of the smaller side's
/// pre-steal baseline
pub const MAX_STEAL_SHARE: f64 = 0.8;

/// Visited set threaded through a reduction; blocks a contributor from
/// recursing into itself for the same (effect, stat) pair
#[derive(Debug, Default)]
pub struct ReduceGuard {
    in_progress: AHashSet<(EffectId, Stat)>,
}

impl ReduceGuard {
    fn enter(&mut self, effect: EffectId, stat: Stat) -> bool {
        self.in_progress.insert((effect, stat))
    }

    fn exit(&mut self, effect: EffectId, stat: Stat) {
        self.in_progress.remove(&(effect, stat));
    }
}

/// Arena of units and effects for one resolved action
#[derive(Debug, Default)]
pub struct Battlefield {
    units: Vec<Option<Unit>>,
    effects: Vec<Option<EffectNode>>,
}

impl Battlefield {
    pub fn new() -> Self {
        Self::default()
    }

    // ------------------------------------------------------------------
    // Units
    // ------------------------------------------------------------------

    pub fn spawn_unit(&mut self, unit: Unit) -> UnitId {
        let id = UnitId(self.units.len() as u32);
        self.units.push(Some(unit));
        id
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.get(id.0 as usize).and_then(|u| u.as_ref())
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.get_mut(id.0 as usize).and_then(|u| u.as_mut())
    }

    /// Remove a unit and every effect still attached to it
    pub fn despawn_unit(&mut self, id: UnitId) -> Result<()> {
        let modifiers = self
            .unit(id)
            .ok_or(CoreError::UnitNotFound(id))?
            .modifiers
            .clone();
        for eid in modifiers {
            // Children may already be gone by the time their parent cascades
            let _ = self.remove(eid);
        }
        self.units[id.0 as usize] = None;
        debug!(?id, "unit despawned");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Effects: insert / attach / detach / remove / suspend
    // ------------------------------------------------------------------

    pub fn insert_effect(&mut self, node: EffectNode) -> EffectId {
        let id = EffectId(self.effects.len() as u32);
        self.effects.push(Some(node));
        id
    }

    pub fn effect(&self, id: EffectId) -> Option<&EffectNode> {
        self.effects.get(id.0 as usize).and_then(|e| e.as_ref())
    }

    pub fn effect_mut(&mut self, id: EffectId) -> Option<&mut EffectNode> {
        self.effects.get_mut(id.0 as usize).and_then(|e| e.as_mut())
    }

    /// Register `child` under `parent`, transferring ownership to the
    /// composite's lifecycle
    pub fn add_child(&mut self, parent: EffectId, child: EffectId) -> Result<()> {
        self.effect(child).ok_or(CoreError::EffectNotFound(child))?;
        let node = self
            .effect_mut(parent)
            .ok_or(CoreError::EffectNotFound(parent))?;
        node.children.push(child);
        Ok(())
    }

    /// Attach an effect to a unit.
    ///
    /// Attaching to the current parent is a no-op "update" notification.
    /// Attaching to a different unit first detaches (cascading through
    /// children), then appends to the new parent's modifier list.
    pub fn attach(&mut self, effect: EffectId, unit: UnitId) -> Result<()> {
        let parent = self
            .effect(effect)
            .ok_or(CoreError::EffectNotFound(effect))?
            .parent;
        self.unit(unit).ok_or(CoreError::UnitNotFound(unit))?;

        if parent == Some(unit) {
            debug!(?effect, ?unit, "effect update");
            return Ok(());
        }
        if parent.is_some() {
            self.detach_cascade(effect)?;
        }
        if let Some(node) = self.effect_mut(effect) {
            node.parent = Some(unit);
        }
        if let Some(u) = self.unit_mut(unit) {
            u.modifiers.push(effect);
        }
        debug!(?effect, ?unit, "effect attached");
        Ok(())
    }

    /// Detach an effect and all of its children from their parents,
    /// children first
    fn detach_cascade(&mut self, effect: EffectId) -> Result<()> {
        let children = self
            .effect(effect)
            .ok_or(CoreError::EffectNotFound(effect))?
            .children
            .clone();
        for child in children {
            let _ = self.detach_cascade(child);
        }
        self.detach_one(effect);
        Ok(())
    }

    fn detach_one(&mut self, effect: EffectId) {
        let Some(parent) = self.effect(effect).and_then(|e| e.parent) else {
            return;
        };
        if let Some(u) = self.unit_mut(parent) {
            u.modifiers.retain(|&m| m != effect);
            if u.incoming_bundle == Some(effect) {
                u.incoming_bundle = None;
            }
        }
        if let Some(node) = self.effect_mut(effect) {
            node.parent = None;
        }
        debug!(?effect, ?parent, "effect detached");
    }

    /// Remove an effect: children depth-first, then detach and free the node
    pub fn remove(&mut self, effect: EffectId) -> Result<()> {
        let children = self
            .effect(effect)
            .ok_or(CoreError::EffectNotFound(effect))?
            .children
            .clone();
        for child in children {
            let _ = self.remove(child);
        }
        self.detach_one(effect);
        self.effects[effect.0 as usize] = None;
        debug!(?effect, "effect removed");
        Ok(())
    }

    /// Suspend or restore an effect's contribution without destroying it.
    /// Idempotent in both directions.
    pub fn set_enabled(&mut self, effect: EffectId, enabled: bool) -> Result<()> {
        let node = self
            .effect_mut(effect)
            .ok_or(CoreError::EffectNotFound(effect))?;
        node.disabled = !enabled;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Reduction
    // ------------------------------------------------------------------

    /// Derived value of a named stat: additive base times multiplier plus
    /// extra bonus, snapped to the unit's precision when configured
    pub fn resolve(&self, unit: UnitId, stat: Stat) -> f64 {
        let mut guard = ReduceGuard::default();
        self.resolve_guarded(unit, stat, &mut guard)
    }

    fn resolve_guarded(&self, unit_id: UnitId, stat: Stat, guard: &mut ReduceGuard) -> f64 {
        let Some(unit) = self.unit(unit_id) else {
            warn!(?unit_id, "resolve against missing unit");
            return stat.default_base();
        };

        let mut additive = unit.base_value(stat);
        let mut multiplier = 1.0;
        let mut extra = 0.0;

        for &eid in &unit.modifiers {
            let Some(effect) = self.effect(eid) else {
                warn!(?eid, "stale effect id in modifier list");
                continue;
            };
            if effect.disabled {
                continue;
            }
            if !guard.enter(eid, stat) {
                warn!(?eid, ?stat, "reentrant contributor skipped");
                continue;
            }
            if let Some(b) = self.bonus_of(effect, unit_id, stat, guard) {
                additive += sanitize(b, 0.0, eid, stat, "bonus");
            }
            if let Some(m) = self.multiplier_of(effect, unit_id, stat) {
                multiplier *= sanitize(m, 1.0, eid, stat, "multiplier");
            }
            if let Some(x) = self.extra_bonus_of(eid, effect, stat, guard) {
                extra += sanitize(x, 0.0, eid, stat, "extra bonus");
            }
            guard.exit(eid, stat);
        }

        let mut value = additive * multiplier + extra;
        if !value.is_finite() {
            warn!(?unit_id, ?stat, "non-finite reduction result zeroed");
            return 0.0;
        }
        if let Some(&granularity) = unit.precision.get(&stat) {
            value = (value / granularity).round() * granularity;
        }
        value
    }

    fn bonus_of(
        &self,
        effect: &EffectNode,
        owner: UnitId,
        stat: Stat,
        guard: &mut ReduceGuard,
    ) -> Option<f64> {
        match &effect.kind {
            EffectKind::Bundle(bundle) => bundle.bonus.get(&stat).copied(),
            EffectKind::ArmorTier { slot, tier } => match (slot, stat) {
                (TierSlot::Armor, Stat::ArmorTier) => Some(*tier as f64),
                (TierSlot::Shield, Stat::ShieldTier) => Some(*tier as f64),
                _ => None,
            },
            EffectKind::ClassTraits { class } => class.stat_bonus(stat),
            EffectKind::Scaling { from, to, rate } => {
                if stat == *to {
                    Some(rate * self.resolve_guarded(owner, *from, guard))
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn multiplier_of(&self, effect: &EffectNode, owner: UnitId, stat: Stat) -> Option<f64> {
        match &effect.kind {
            EffectKind::Bundle(bundle) => bundle.multiplier.get(&stat).copied(),
            EffectKind::ClassTraits { class } => class.stat_multiplier(stat),
            EffectKind::Stance { stance } => {
                let attack = self.unit(owner).map(|u| u.attack_type)?;
                stance.stat_multiplier(stat, attack)
            }
            EffectKind::StealAttacker {
                attribute,
                fraction,
                ..
            } => {
                if stat == Stat::StealFactor(*attribute) {
                    Some(1.0 - fraction)
                } else {
                    None
                }
            }
            _ => None,
        }
    }

    fn extra_bonus_of(
        &self,
        eid: EffectId,
        effect: &EffectNode,
        stat: Stat,
        guard: &mut ReduceGuard,
    ) -> Option<f64> {
        match &effect.kind {
            EffectKind::Bundle(bundle) => bundle.extra.get(&stat).copied(),
            EffectKind::StealAttacker {
                victim, attribute, ..
            } => {
                if stat != Stat::Attribute(*attribute) {
                    return None;
                }
                let owner = effect.parent?;
                Some(self.steal_share(owner, eid, owner, *victim, *attribute, false, guard))
            }
            EffectKind::StealVictim {
                attacker,
                attribute,
                ..
            } => {
                if stat != Stat::Attribute(*attribute) {
                    return None;
                }
                let owner = effect.parent?;
                Some(-self.steal_share(owner, eid, *attacker, owner, *attribute, true, guard))
            }
            _ => None,
        }
    }

    /// Marginal transfer contributed by one steal effect.
    ///
    /// Stacked steals on the same attribute diminish multiplicatively: the
    /// cumulative stolen fraction is `1 - prod(1 - f_i)`, so each effect
    /// contributes the difference between the cumulative fraction up to and
    /// including itself and the one before it, times the smaller side's
    /// pre-steal baseline. The cumulative fraction is capped at
    /// [`MAX_STEAL_SHARE`].
    #[allow(clippy::too_many_arguments)]
    fn steal_share(
        &self,
        owner: UnitId,
        eid: EffectId,
        attacker: UnitId,
        victim: UnitId,
        attribute: Attribute,
        incoming: bool,
        guard: &mut ReduceGuard,
    ) -> f64 {
        if self.unit(attacker).is_none() || self.unit(victim).is_none() {
            warn!(?attacker, ?victim, "steal against missing unit contributes nothing");
            return 0.0;
        }
        let baseline_stat = Stat::StealBaseline(attribute);
        // Live cross-unit reads of both sides' pinned baselines
        let base_attacker = self.resolve_guarded(attacker, baseline_stat, guard);
        let base_victim = self.resolve_guarded(victim, baseline_stat, guard);
        let baseline = base_attacker.min(base_victim);
        if baseline <= 0.0 {
            return 0.0;
        }

        let (before, including) = self.cumulative_steal(owner, eid, attribute, incoming);
        // scale each cumulative fraction before subtracting so the marginals
        // telescope to the exact capped total across the stack
        including.min(MAX_STEAL_SHARE) * baseline - before.min(MAX_STEAL_SHARE) * baseline
    }

    /// Cumulative stolen fraction over the owner's steal effects on one
    /// attribute, in application order: (before `upto`, including `upto`).
    /// `incoming` selects the victim-side stack; a unit stealing and being
    /// stolen from at once carries two independent stacks.
    fn cumulative_steal(
        &self,
        owner: UnitId,
        upto: EffectId,
        attribute: Attribute,
        incoming: bool,
    ) -> (f64, f64) {
        let Some(unit) = self.unit(owner) else {
            return (0.0, 0.0);
        };
        let mut product = 1.0;
        let mut before = 0.0;
        let mut including = 0.0;
        for &eid in &unit.modifiers {
            let Some(effect) = self.effect(eid) else {
                continue;
            };
            if effect.disabled {
                continue;
            }
            let fraction = match effect.kind {
                EffectKind::StealAttacker {
                    attribute: a,
                    fraction,
                    ..
                } if !incoming && a == attribute => fraction,
                EffectKind::StealVictim {
                    attribute: a,
                    fraction,
                    ..
                } if incoming && a == attribute => fraction,
                _ => continue,
            };
            if eid == upto {
                before = 1.0 - product;
            }
            product *= 1.0 - fraction;
            if eid == upto {
                including = 1.0 - product;
            }
        }
        (before, including)
    }
}

/// Non-finite contributions degrade to the neutral element, logged
fn sanitize(value: f64, neutral: f64, eid: EffectId, stat: Stat, what: &str) -> f64 {
    if value.is_finite() {
        value
    } else {
        warn!(?eid, ?stat, what, "non-finite contribution treated as neutral");
        neutral
    }
}
