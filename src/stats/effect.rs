//! Effect nodes: stacked contributors to a unit's derived stats
//!
//! Effects live in the battlefield arena and form an explicit ownership tree:
//! a composite parent owns its children by index, and removal cascades
//! depth-first. An effect has exactly one parent unit at a time; its source
//! may be a different unit (cross-unit steal) or an item, held as a
//! non-owning key.

use ahash::AHashMap;
use tracing::warn;

use crate::combat::class::Class;
use crate::combat::stance::Stance;
use crate::core::types::{EffectId, UnitId};
use crate::enchant::token::EnchantToken;
use crate::stats::stat::{Attribute, Stat};

/// Where an effect came from. Never owns the referent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum EffectSource {
    #[default]
    Intrinsic,
    Unit(UnitId),
    Item(String),
}

/// Which tier stat an armor-tier contributor feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TierSlot {
    Armor,
    Shield,
}

/// Static per-stat bonus/multiplier/extra-bonus maps, fixed at construction.
/// Covers nearly all equipment and enchantment effects.
#[derive(Debug, Clone, Default)]
pub struct StatBundle {
    pub bonus: AHashMap<Stat, f64>,
    pub multiplier: AHashMap<Stat, f64>,
    pub extra: AHashMap<Stat, f64>,
}

impl StatBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bonus(mut self, stat: Stat, value: f64) -> Self {
        self.bonus.insert(stat, value);
        self
    }

    pub fn with_multiplier(mut self, stat: Stat, value: f64) -> Self {
        self.multiplier.insert(stat, value);
        self
    }

    pub fn with_extra(mut self, stat: Stat, value: f64) -> Self {
        self.extra.insert(stat, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.bonus.is_empty() && self.multiplier.is_empty() && self.extra.is_empty()
    }
}

/// Polymorphic contribution kind
#[derive(Debug, Clone)]
pub enum EffectKind {
    /// Static stat bundle
    Bundle(StatBundle),
    /// Converts an item tier (plus accumulated tier bonuses) into
    /// armor-tier / shield-tier contributions
    ArmorTier { slot: TierSlot, tier: i32 },
    /// Per-class multiplier/bonus table, keyed by the unit's attack type
    /// for accuracy and damage
    ClassTraits { class: Class },
    /// Stance-keyed accuracy/dodge/damage multipliers
    Stance { stance: Stance },
    /// Contributes `rate * resolve(from)` as a bonus on `to`. Reads a live
    /// derived stat of its own unit, so it runs under the reentrancy guard.
    Scaling { from: Stat, to: Stat, rate: f64 },
    /// Attacker half of a steal pair
    StealAttacker {
        victim: UnitId,
        attribute: Attribute,
        fraction: f64,
    },
    /// Victim half of a steal pair; sourced from the attacker and reading
    /// the attacker's live steal factor
    StealVictim {
        attacker: UnitId,
        attribute: Attribute,
        fraction: f64,
    },
    /// No numeric contribution; owns child effects as one lifecycle unit
    Composite,
}

impl EffectKind {
    /// Armor-tier contributor with coercion of structurally invalid tiers.
    /// A non-positive tier is coerced to 1 and logged, never rejected.
    pub fn armor_tier(slot: TierSlot, tier: i32) -> Self {
        let tier = if tier <= 0 {
            warn!(tier, "non-positive armor tier coerced to 1");
            1
        } else {
            tier
        };
        EffectKind::ArmorTier { slot, tier }
    }

    /// Steal fraction outside (0, MAX_STEAL_FRACTION] is coerced into range
    /// and logged.
    pub fn coerce_steal_fraction(fraction: f64) -> f64 {
        const MAX_STEAL_FRACTION: f64 = 0.95;
        if !fraction.is_finite() || fraction <= 0.0 {
            warn!(fraction, "invalid steal fraction coerced to 0");
            0.0
        } else if fraction > MAX_STEAL_FRACTION {
            warn!(fraction, "steal fraction clamped to {MAX_STEAL_FRACTION}");
            MAX_STEAL_FRACTION
        } else {
            fraction
        }
    }
}

/// Arena node for one effect
#[derive(Debug, Clone)]
pub struct EffectNode {
    pub kind: EffectKind,
    /// Current parent unit; exactly one at a time, none while detached
    pub parent: Option<UnitId>,
    pub source: EffectSource,
    /// Originating enchantment, when the effect came out of the pipeline
    pub tag: Option<EnchantToken>,
    pub debuff: bool,
    /// Counter-spell suspension; a disabled effect contributes nothing
    pub disabled: bool,
    /// Exclusively owned children, removed before this node is
    pub children: Vec<EffectId>,
}

impl EffectNode {
    pub fn new(kind: EffectKind) -> Self {
        Self {
            kind,
            parent: None,
            source: EffectSource::Intrinsic,
            tag: None,
            debuff: false,
            disabled: false,
            children: Vec::new(),
        }
    }

    pub fn with_source(mut self, source: EffectSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_tag(mut self, tag: EnchantToken) -> Self {
        self.tag = Some(tag);
        self
    }

    pub fn as_debuff(mut self) -> Self {
        self.debuff = true;
        self
    }
}
