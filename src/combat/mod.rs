pub mod class;
pub mod constants;
pub mod damage;
pub mod exchange;
pub mod hit;
pub mod snapshot;
pub mod stance;

pub use class::Class;
pub use damage::{calculate_damage, DamageOutcome};
pub use exchange::{calculate_enchantment_exchange, EnchantOutcome};
pub use hit::calculate_hit;
pub use snapshot::{build, ArmorPiece, CharacterRecord, Combatant, Item, Luck, Skills, Weapon};
pub use stance::Stance;
