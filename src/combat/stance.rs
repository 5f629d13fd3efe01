//! Combat stances
//!
//! A stance is one attached effect trading accuracy, damage, and dodge
//! against each other. Offensive multipliers apply to the unit's own attack
//! type; the dodge trade-off applies against every incoming attack type.

use serde::{Deserialize, Serialize};

use crate::core::types::AttackType;
use crate::stats::stat::Stat;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Stance {
    #[default]
    Neutral,
    /// Press the attack: more accuracy and damage, easier to hit
    Aggressive,
    /// Guard up: harder to hit, weaker strikes
    Defensive,
    /// All-out offense at the cost of most of the guard
    Reckless,
}

impl Stance {
    fn accuracy(self) -> f64 {
        match self {
            Stance::Neutral => 1.0,
            Stance::Aggressive => 1.05,
            Stance::Defensive => 1.0,
            Stance::Reckless => 1.10,
        }
    }

    fn power(self) -> f64 {
        match self {
            Stance::Neutral => 1.0,
            Stance::Aggressive => 1.15,
            Stance::Defensive => 0.85,
            Stance::Reckless => 1.30,
        }
    }

    fn evasion(self) -> f64 {
        match self {
            Stance::Neutral => 1.0,
            Stance::Aggressive => 0.90,
            Stance::Defensive => 1.20,
            Stance::Reckless => 0.70,
        }
    }

    /// Stance contribution for a stat, given the unit's own attack type
    pub fn stat_multiplier(self, stat: Stat, own_attack: AttackType) -> Option<f64> {
        let value = match stat {
            Stat::Accuracy(at) if at == own_attack => self.accuracy(),
            Stat::Power(at) if at == own_attack => self.power(),
            Stat::Evasion(_) => self.evasion(),
            _ => return None,
        };
        if value == 1.0 {
            None
        } else {
            Some(value)
        }
    }
}
