//! Combat resolution constants - all tunable values in one place

// Weapon damage curve
pub const WEAPON_DAMAGE_GROWTH: f64 = 1.4;
pub const WEAPON_DAMAGE_PER_LEVEL: f64 = 15.0;

// Armor accumulation curves; shields grow from a distinct base
pub const ARMOR_GROWTH: f64 = 1.35;
pub const SHIELD_GROWTH: f64 = 1.45;

// Flat multiplicative reduction per armor piece carrying a passive
// upgrade tier (applied once per tier step)
pub const PASSIVE_TIER_ARMOR_FACTOR: f64 = 0.96;

// Exponential decay of base damage per point of the victim's resilience
pub const RESILIENCE_DECAY: f64 = 0.92;

// Guardians take half base weapon damage
pub const GUARDIAN_BASE_DAMAGE_FACTOR: f64 = 0.5;

// Symmetric damage variance, scaled by the attacker's small-luck
pub const VARIANCE_SCALE: f64 = 0.15;

// Each critical tier multiplies damage by this
pub const CRITICAL_MULTIPLIER: f64 = 3.0;

// Passive upgrade tier scaling in the hit check
pub const ARMOR_TIER_DODGE_SCALE: f64 = 1.5;
pub const SHIELD_TIER_DODGE_SCALE: f64 = 2.0;
pub const ONE_HAND_TIER_ACCURACY_SCALE: f64 = 2.0;
pub const TWO_HAND_TIER_ACCURACY_SCALE: f64 = 4.0;

// Physical damage bounds
pub const DAMAGE_FLOOR: f64 = 1.0;
pub const DAMAGE_CEILING: f64 = 1_000_000_000.0;

// Enchantment exchange
pub const CONSTITUTION_SCALE_DIVISOR: f64 = 250.0;
pub const ENCHANT_CEILING: f64 = 1_000_000_000.0;

// Safety floor for the contested damage ratio denominator
pub const MIN_CONTESTED_DENOMINATOR: f64 = 1.0;
