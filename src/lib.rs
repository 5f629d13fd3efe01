//! Thornvale - persistent text RPG simulation core
//!
//! The stat resolution and combat engine: raw base statistics plus an
//! open-ended stack of effects (equipment, enchantments, class traits,
//! stances, steals) reduce to one derived value per named stat, and three
//! pure functions resolve hit, damage, and enchantment exchanges between
//! two combatant snapshots. Persistence, transport, and authorization live
//! outside this crate.

pub mod combat;
pub mod core;
pub mod enchant;
pub mod stats;
