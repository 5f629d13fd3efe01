//! Enchantment tokens: a closed flat enumeration
//!
//! Composite tokens expand to a multiset of primitives; primitives map to
//! one or two effect constructions in the pipeline. Expansion is recursive
//! and terminates because substitution rules only ever point "downward"
//! toward primitives.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnchantToken {
    // Primitives
    /// Outgoing enchantment damage
    Flamebrand,
    /// Outgoing enchantment healing
    Mending,
    /// Outgoing enchantment leech
    Leechroot,
    /// Accuracy multiplier on the caster's own attack type
    Keenedge,
    /// Scales the caster's total armor
    Ironskin,
    /// Scales the caster's resistance to enchantment damage
    Wardveil,
    /// Flat passive regeneration per exchange
    Regrowth,
    /// Enchantment damage for casters, a small power boost otherwise
    Smite,
    /// Leech for the caster plus an enchantment-ward debuff on the opponent
    Siphon,
    /// Power debuff on the opponent
    Witherbane,
    /// Accuracy debuff on the opponent
    Dustcloud,
    /// No effect of its own; fuels counter-spell resolution
    CounterSpell,

    // Composites
    /// Keenedge + Flamebrand
    Stormlash,
    /// Witherbane + Dustcloud + Siphon
    Plaguewind,
    /// Stormlash + Wardveil + Mending (nested composite)
    Archon,
}

impl EnchantToken {
    /// Substitution rule for composite tokens; `None` marks a primitive
    pub fn expansion(self) -> Option<&'static [EnchantToken]> {
        use EnchantToken::*;
        match self {
            Stormlash => Some(&[Keenedge, Flamebrand]),
            Plaguewind => Some(&[Witherbane, Dustcloud, Siphon]),
            Archon => Some(&[Stormlash, Wardveil, Mending]),
            _ => None,
        }
    }

    pub fn is_composite(self) -> bool {
        self.expansion().is_some()
    }

    /// Canonical activation priority; higher activates earlier. Tokens
    /// absent from the canonical list sort lowest (0).
    pub fn activation_priority(self) -> u32 {
        use EnchantToken::*;
        match self {
            CounterSpell => 120,
            Wardveil => 110,
            Ironskin => 100,
            Mending => 90,
            Regrowth => 80,
            Keenedge => 70,
            Smite => 60,
            Flamebrand => 50,
            Leechroot => 40,
            Siphon => 30,
            Witherbane => 20,
            Dustcloud => 10,
            _ => 0,
        }
    }

    /// Counter-spell priority; `None` means the token cannot be countered.
    /// Higher-priority tokens are disabled first.
    pub fn counter_priority(self) -> Option<u32> {
        use EnchantToken::*;
        match self {
            Flamebrand => Some(70),
            Smite => Some(60),
            Leechroot => Some(50),
            Keenedge => Some(40),
            Wardveil => Some(30),
            Mending => Some(20),
            Regrowth => Some(10),
            _ => None,
        }
    }
}

impl EnchantToken {
    /// Lookup by persisted name. Unknown names yield `None`; callers treat
    /// that as an empty expansion, never a failure.
    pub fn from_name(name: &str) -> Option<Self> {
        use EnchantToken::*;
        match name {
            "flamebrand" => Some(Flamebrand),
            "mending" => Some(Mending),
            "leechroot" => Some(Leechroot),
            "keenedge" => Some(Keenedge),
            "ironskin" => Some(Ironskin),
            "wardveil" => Some(Wardveil),
            "regrowth" => Some(Regrowth),
            "smite" => Some(Smite),
            "siphon" => Some(Siphon),
            "witherbane" => Some(Witherbane),
            "dustcloud" => Some(Dustcloud),
            "counterspell" => Some(CounterSpell),
            "stormlash" => Some(Stormlash),
            "plaguewind" => Some(Plaguewind),
            "archon" => Some(Archon),
            _ => None,
        }
    }
}

/// Expand persisted token names; malformed names expand to nothing
pub fn expand_named<S: AsRef<str>>(names: &[S]) -> Vec<EnchantToken> {
    let mut tokens = Vec::with_capacity(names.len());
    for name in names {
        match EnchantToken::from_name(name.as_ref()) {
            Some(token) => tokens.push(token),
            None => tracing::warn!(name = name.as_ref(), "unknown enchantment name ignored"),
        }
    }
    expand(&tokens)
}

/// Recursively substitute composite tokens until every token is primitive
pub fn expand(tokens: &[EnchantToken]) -> Vec<EnchantToken> {
    let mut out = Vec::with_capacity(tokens.len());
    for &token in tokens {
        expand_into(token, &mut out);
    }
    out
}

fn expand_into(token: EnchantToken, out: &mut Vec<EnchantToken>) {
    match token.expansion() {
        Some(parts) => {
            for &part in parts {
                expand_into(part, out);
            }
        }
        None => out.push(token),
    }
}

/// Stable-sort primitives into canonical activation order. Affects effect
/// construction order and counter selection, never the final arithmetic.
pub fn order_for_activation(tokens: &mut [EnchantToken]) {
    tokens.sort_by_key(|t| std::cmp::Reverse(t.activation_priority()));
}
