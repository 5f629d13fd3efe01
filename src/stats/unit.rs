//! Stat container for one combat participant
//!
//! A unit owns raw base values and the ordered list of attached effects.
//! Units are built per combat participant and discarded after the triggering
//! request; they are never persisted.

use ahash::AHashMap;

use crate::combat::class::Class;
use crate::core::types::{AttackType, EffectId};
use crate::stats::stat::Stat;

#[derive(Debug, Clone)]
pub struct Unit {
    /// Raw base values; unlisted stats fall back to `Stat::default_base`
    pub base: AHashMap<Stat, f64>,
    /// Rounding granularity per stat; derived values snap to the nearest
    /// multiple when present
    pub precision: AHashMap<Stat, f64>,
    pub attack_type: AttackType,
    pub class: Class,
    /// Attached effects, in application order. Order never changes the
    /// arithmetic, only display and counter-spell selection.
    pub modifiers: Vec<EffectId>,
    /// Opponent-facing enchantment bundle currently applied to this unit,
    /// replaced before each incoming attack
    pub incoming_bundle: Option<EffectId>,
}

impl Unit {
    pub fn new(attack_type: AttackType, class: Class) -> Self {
        Self {
            base: AHashMap::new(),
            precision: AHashMap::new(),
            attack_type,
            class,
            modifiers: Vec::new(),
            incoming_bundle: None,
        }
    }

    /// Raw base value for a stat, before any effect contribution
    pub fn base_value(&self, stat: Stat) -> f64 {
        self.base.get(&stat).copied().unwrap_or(stat.default_base())
    }

    pub fn set_base(&mut self, stat: Stat, value: f64) {
        self.base.insert(stat, value);
    }

    /// Set a base value only if none exists yet. Returns the value now in
    /// place. Steal effects use this to pin a pre-steal baseline.
    pub fn ensure_base(&mut self, stat: Stat, value: f64) -> f64 {
        *self.base.entry(stat).or_insert(value)
    }

    pub fn set_precision(&mut self, stat: Stat, granularity: f64) {
        if granularity > 0.0 {
            self.precision.insert(stat, granularity);
        }
    }
}
