pub mod counter;
pub mod pipeline;
pub mod token;

pub use counter::{resolve_counter_spells, CounterOutcome};
pub use pipeline::{apply, clear_enchantments, AppliedEnchantments};
pub use token::{expand, expand_named, order_for_activation, EnchantToken};
