//! Core type definitions used throughout the engine

use serde::{Deserialize, Serialize};

/// Unique identifier for a unit inside a [`Battlefield`](crate::stats::Battlefield)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl UnitId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// Unique identifier for an effect node in the effect arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EffectId(pub u32);

impl EffectId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

/// How a combatant attacks - selects which accuracy/evasion/power/resistance
/// stats a resolution reads
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AttackType {
    #[default]
    Melee,
    Ranged,
    Spell,
}

impl AttackType {
    /// All attack types, in canonical order
    pub const ALL: [AttackType; 3] = [AttackType::Melee, AttackType::Ranged, AttackType::Spell];
}
