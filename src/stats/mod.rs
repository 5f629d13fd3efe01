pub mod battlefield;
pub mod effect;
pub mod stat;
pub mod steal;
pub mod unit;

pub use battlefield::{Battlefield, MAX_STEAL_SHARE};
pub use effect::{EffectKind, EffectNode, EffectSource, StatBundle, TierSlot};
pub use stat::{
    damage_reduction_stat, damage_stat, dodge_stat, governing_attribute, to_hit_stat, Attribute,
    Stat,
};
pub use steal::{apply_steal, remove_steal, StealPair};
pub use unit::Unit;
