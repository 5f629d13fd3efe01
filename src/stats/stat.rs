//! Closed stat enumeration with explicit neutral defaults
//!
//! Every derived value a combat resolution reads is keyed by one of these
//! variants. Unknown-by-the-caller stats simply resolve to their neutral
//! default, never to an error.

use serde::{Deserialize, Serialize};

use crate::core::types::AttackType;

/// A primary attribute - the stealable subset of stats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Attribute {
    Strength,
    Dexterity,
    Intellect,
    Willpower,
    Agility,
    Constitution,
}

impl Attribute {
    pub const ALL: [Attribute; 6] = [
        Attribute::Strength,
        Attribute::Dexterity,
        Attribute::Intellect,
        Attribute::Willpower,
        Attribute::Agility,
        Attribute::Constitution,
    ];
}

/// A named stat a unit can resolve
///
/// Multiplier-natured stats (wards, bonus accuracy/dodge, steal factors)
/// default to 1; everything else defaults to 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stat {
    /// Primary attribute (strength, agility, ...)
    Attribute(Attribute),
    /// Character level
    Level,

    /// To-hit stat per attack type
    Accuracy(AttackType),
    /// Dodge stat per incoming attack type
    Evasion(AttackType),
    /// Damage stat per attack type
    Power(AttackType),
    /// Damage-reduction stat per incoming attack type
    Resistance(AttackType),

    /// Final multiplier on accuracy in the hit check
    BonusAccuracy,
    /// Final multiplier on dodge in the hit check
    BonusDodge,
    /// Percentage increase applied to dealt physical damage
    DamageIncrease,
    /// Accumulated armor-reduction multiplier applied to dealt damage
    ArmorPierce,
    /// Scales the victim's total armor (percentage damage reduction)
    PhysicalWard,
    /// Scales the victim's resistance against enchantment damage/leech
    EnchantWard,

    /// Aggregate armor tier across worn pieces
    ArmorTier,
    /// Aggregate shield tier
    ShieldTier,

    /// Outgoing enchantment healing pool
    EnchantHeal,
    /// Outgoing enchantment damage pool
    EnchantDamage,
    /// Outgoing enchantment leech pool
    EnchantLeech,
    /// Fraction of max health regained per enchantment exchange
    PassiveRegeneration,

    /// Steal pseudo-stat: product of (1 - fraction) over active steals
    StealFactor(Attribute),
    /// Steal pseudo-stat: pre-steal baseline captured when the first steal
    /// on this attribute lands
    StealBaseline(Attribute),

    /// Non-zero means the unit can only ever take one point of damage
    OneDamageOnly,
}

impl Stat {
    /// Neutral baseline when a unit has no explicit base value
    pub fn default_base(self) -> f64 {
        match self {
            Stat::BonusAccuracy
            | Stat::BonusDodge
            | Stat::DamageIncrease
            | Stat::ArmorPierce
            | Stat::PhysicalWard
            | Stat::EnchantWard
            | Stat::StealFactor(_) => 1.0,
            _ => 0.0,
        }
    }
}

/// To-hit stat for an attacker of the given attack type
pub fn to_hit_stat(attack: AttackType) -> Stat {
    Stat::Accuracy(attack)
}

/// Dodge stat a defender uses against the given attack type
pub fn dodge_stat(attack: AttackType) -> Stat {
    Stat::Evasion(attack)
}

/// Damage stat for an attacker of the given attack type
pub fn damage_stat(attack: AttackType) -> Stat {
    Stat::Power(attack)
}

/// Damage-reduction stat a defender uses against the given attack type
pub fn damage_reduction_stat(attack: AttackType) -> Stat {
    Stat::Resistance(attack)
}

/// The primary attribute each combat stat grows from
///
/// Snapshot construction attaches scaling links along this table so that
/// anything moving an attribute (equipment, steals) flows into the combat
/// stats that read it.
pub fn governing_attribute(stat: Stat) -> Option<Attribute> {
    match stat {
        Stat::Accuracy(AttackType::Melee) => Some(Attribute::Dexterity),
        Stat::Accuracy(AttackType::Ranged) => Some(Attribute::Dexterity),
        Stat::Accuracy(AttackType::Spell) => Some(Attribute::Intellect),
        Stat::Evasion(AttackType::Melee) => Some(Attribute::Agility),
        Stat::Evasion(AttackType::Ranged) => Some(Attribute::Agility),
        Stat::Evasion(AttackType::Spell) => Some(Attribute::Willpower),
        Stat::Power(AttackType::Melee) => Some(Attribute::Strength),
        Stat::Power(AttackType::Ranged) => Some(Attribute::Dexterity),
        Stat::Power(AttackType::Spell) => Some(Attribute::Intellect),
        Stat::Resistance(AttackType::Melee) => Some(Attribute::Constitution),
        Stat::Resistance(AttackType::Ranged) => Some(Attribute::Agility),
        Stat::Resistance(AttackType::Spell) => Some(Attribute::Willpower),
        _ => None,
    }
}
