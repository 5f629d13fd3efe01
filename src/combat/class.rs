//! Character classes and their trait tables
//!
//! A class contributes multipliers and flat bonuses through the class-trait
//! effect, keyed by attack type for accuracy and damage. Hybrid classes
//! blend in a half-weight contribution for their secondary attack type.

use serde::{Deserialize, Serialize};

use crate::core::types::AttackType;
use crate::stats::stat::{Attribute, Stat};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Class {
    #[default]
    Warrior,
    Ranger,
    Mage,
    /// Defensive line class; takes half base weapon damage
    Guardian,
    Assassin,
    Berserker,
    /// Hybrid: melee primary with a half-weight spell secondary
    Spellblade,
}

impl Class {
    pub const ALL: [Class; 7] = [
        Class::Warrior,
        Class::Ranger,
        Class::Mage,
        Class::Guardian,
        Class::Assassin,
        Class::Berserker,
        Class::Spellblade,
    ];

    /// Attack type the class is built around
    pub fn primary_attack(self) -> AttackType {
        match self {
            Class::Warrior | Class::Guardian | Class::Berserker | Class::Spellblade => {
                AttackType::Melee
            }
            Class::Ranger | Class::Assassin => AttackType::Ranged,
            Class::Mage => AttackType::Spell,
        }
    }

    /// Secondary attack type for hybrid classes, blended at half weight
    pub fn secondary_attack(self) -> Option<AttackType> {
        match self {
            Class::Spellblade => Some(AttackType::Spell),
            _ => None,
        }
    }

    /// Guardians shrug off half of base weapon damage
    pub fn halves_base_damage(self) -> bool {
        matches!(self, Class::Guardian)
    }

    /// Classes that can land a triple critical
    pub fn triple_critical(self) -> bool {
        matches!(self, Class::Assassin | Class::Berserker)
    }

    fn accuracy_trait(self) -> f64 {
        match self {
            Class::Warrior => 1.10,
            Class::Ranger => 1.12,
            Class::Mage => 1.12,
            Class::Guardian => 1.05,
            Class::Assassin => 1.15,
            Class::Berserker => 1.05,
            Class::Spellblade => 1.08,
        }
    }

    fn power_trait(self) -> f64 {
        match self {
            Class::Warrior => 1.10,
            Class::Ranger => 1.10,
            Class::Mage => 1.15,
            Class::Guardian => 1.00,
            Class::Assassin => 1.12,
            Class::Berserker => 1.20,
            Class::Spellblade => 1.08,
        }
    }

    /// Trait multiplier for an accuracy stat of the given attack type:
    /// full weight on the primary, half weight on a hybrid secondary
    pub fn accuracy_multiplier(self, attack: AttackType) -> f64 {
        self.blend(attack, self.accuracy_trait())
    }

    /// Trait multiplier for a damage stat of the given attack type
    pub fn power_multiplier(self, attack: AttackType) -> f64 {
        self.blend(attack, self.power_trait())
    }

    fn blend(self, attack: AttackType, full: f64) -> f64 {
        if attack == self.primary_attack() {
            full
        } else if Some(attack) == self.secondary_attack() {
            1.0 + (full - 1.0) / 2.0
        } else {
            1.0
        }
    }

    /// Class-trait multiplier contribution per stat
    pub fn stat_multiplier(self, stat: Stat) -> Option<f64> {
        let value = match stat {
            Stat::Accuracy(at) => self.accuracy_multiplier(at),
            Stat::Power(at) => self.power_multiplier(at),
            Stat::Resistance(_) if self == Class::Guardian => 1.10,
            _ => return None,
        };
        if value == 1.0 {
            None
        } else {
            Some(value)
        }
    }

    /// Class-trait flat bonus contribution per stat
    pub fn stat_bonus(self, stat: Stat) -> Option<f64> {
        match (self, stat) {
            (Class::Guardian, Stat::Attribute(Attribute::Constitution)) => Some(10.0),
            (Class::Berserker, Stat::Attribute(Attribute::Strength)) => Some(10.0),
            (Class::Mage, Stat::Attribute(Attribute::Intellect)) => Some(10.0),
            (Class::Assassin, Stat::Attribute(Attribute::Agility)) => Some(5.0),
            (Class::Ranger, Stat::Attribute(Attribute::Dexterity)) => Some(5.0),
            _ => None,
        }
    }

    /// Span of the random accuracy bonus rolled in the hit check, scaled by
    /// the attacker's small-luck coefficient
    pub fn luck_accuracy_span(self) -> f64 {
        match self {
            Class::Assassin => 6.0,
            Class::Ranger => 5.0,
            Class::Mage => 4.0,
            Class::Spellblade => 4.0,
            Class::Warrior => 3.0,
            Class::Berserker => 3.0,
            Class::Guardian => 2.0,
        }
    }

    /// Span of the random dodge bonus rolled in the hit check
    pub fn luck_dodge_span(self) -> f64 {
        match self {
            Class::Assassin => 5.0,
            Class::Ranger => 4.0,
            Class::Spellblade => 3.0,
            Class::Warrior => 2.0,
            Class::Mage => 2.0,
            Class::Berserker => 1.0,
            Class::Guardian => 1.0,
        }
    }
}
