//! Combatant snapshots
//!
//! A snapshot is the read-only bundle a combat resolution consumes: a unit
//! in the battlefield plus equipment, skills, luck coefficients, and
//! health. Snapshots are built fresh from a persisted character record per
//! action and never persisted themselves.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::combat::class::Class;
use crate::combat::stance::Stance;
use crate::core::error::Result;
use crate::core::types::{AttackType, UnitId};
use crate::enchant::token::EnchantToken;
use crate::stats::battlefield::Battlefield;
use crate::stats::effect::{EffectKind, EffectNode, EffectSource, StatBundle, TierSlot};
use crate::stats::stat::{governing_attribute, Attribute, Stat};
use crate::stats::unit::Unit;

/// Per-stat bonuses an item grants while equipped
pub type ItemBonuses = Vec<(Stat, f64)>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Weapon {
    pub name: String,
    pub level: u32,
    pub two_handed: bool,
    /// Passive upgrade tier; scales accuracy in the hit check
    pub passive_tier: u32,
    pub enchants: Vec<EnchantToken>,
    pub bonuses: ItemBonuses,
}

impl Weapon {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
            two_handed: false,
            passive_tier: 0,
            enchants: Vec::new(),
            bonuses: Vec::new(),
        }
    }

    /// Sort key for the weapon list; the highest effective level is the
    /// active weapon
    pub fn effective_level(&self) -> u32 {
        self.level + self.passive_tier
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmorPiece {
    pub name: String,
    pub level: u32,
    pub shield: bool,
    /// Item tier feeding the armor-tier contributor
    pub tier: i32,
    /// Accumulated tier bonuses from upgrades
    pub tier_bonus: i32,
    /// Passive upgrade tier; raises effective level and shaves incoming
    /// damage per tier step
    pub passive_tier: u32,
    pub bonuses: ItemBonuses,
}

impl ArmorPiece {
    pub fn new(name: impl Into<String>, level: u32) -> Self {
        Self {
            name: name.into(),
            level,
            shield: false,
            tier: 1,
            tier_bonus: 0,
            passive_tier: 0,
            bonuses: Vec::new(),
        }
    }

    pub fn effective_level(&self) -> u32 {
        self.level + self.passive_tier
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub name: String,
    pub bonuses: ItemBonuses,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Skills {
    /// Exponentially decays incoming base weapon damage
    pub resilience: u32,
}

/// The three luck coefficients: variance, critical, and double-critical
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct Luck {
    pub small: f64,
    pub large: f64,
    pub ultra: f64,
}

/// Raw persisted bundle a collaborator hands the engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterRecord {
    pub name: String,
    pub level: u32,
    pub class: Class,
    pub attack_type: AttackType,
    pub stance: Stance,
    pub attributes: Vec<(Attribute, f64)>,
    /// Expected pre-sorted by effective level descending; re-sorted
    /// defensively on build
    pub weapons: Vec<Weapon>,
    pub armor: Vec<ArmorPiece>,
    pub quest_items: Vec<Item>,
    pub artifact: Option<Item>,
    pub skills: Skills,
    pub luck: Luck,
    pub hero: bool,
    pub health: f64,
    pub max_health: f64,
}

/// Read-only bundle for one combat resolution
#[derive(Debug, Clone)]
pub struct Combatant {
    pub unit: UnitId,
    pub attack_type: AttackType,
    pub class: Class,
    pub weapons: Vec<Weapon>,
    pub armor: Vec<ArmorPiece>,
    pub quest_items: Vec<Item>,
    pub artifact: Option<Item>,
    pub skills: Skills,
    pub luck: Luck,
    pub hero: bool,
    pub health: f64,
    pub max_health: f64,
}

impl Combatant {
    /// The weapon a hit/damage resolution swings with
    pub fn active_weapon(&self) -> Option<&Weapon> {
        self.weapons.first()
    }

    /// Every enchantment token this combatant brings into an exchange
    pub fn enchant_tokens(&self) -> Vec<EnchantToken> {
        self.weapons
            .iter()
            .flat_map(|w| w.enchants.iter().copied())
            .collect()
    }
}

/// Build a combatant snapshot from a persisted record.
///
/// Spawns the unit, seeds base values, and attaches the intrinsic effect
/// stack: attribute-to-combat-stat scaling links (one composite), class
/// traits, stance, and per-item bundles and tier contributors.
pub fn build(battlefield: &mut Battlefield, record: &CharacterRecord) -> Result<Combatant> {
    let mut max_health = record.max_health;
    if !max_health.is_finite() || max_health <= 0.0 {
        warn!(name = %record.name, max_health, "non-positive max health coerced to 1");
        max_health = 1.0;
    }
    let health = record.health.clamp(0.0, max_health);

    let mut unit = Unit::new(record.attack_type, record.class);
    for &(attribute, value) in &record.attributes {
        unit.set_base(Stat::Attribute(attribute), value);
    }
    unit.set_base(Stat::Level, record.level as f64);
    let unit_id = battlefield.spawn_unit(unit);

    attach_attribute_links(battlefield, unit_id)?;

    let class_traits = battlefield.insert_effect(EffectNode::new(EffectKind::ClassTraits {
        class: record.class,
    }));
    battlefield.attach(class_traits, unit_id)?;

    let stance = battlefield.insert_effect(EffectNode::new(EffectKind::Stance {
        stance: record.stance,
    }));
    battlefield.attach(stance, unit_id)?;

    let mut weapons = record.weapons.clone();
    weapons.sort_by_key(|w| std::cmp::Reverse(w.effective_level()));
    for weapon in &weapons {
        attach_item_bundle(battlefield, unit_id, &weapon.name, &weapon.bonuses)?;
    }

    for piece in &record.armor {
        attach_item_bundle(battlefield, unit_id, &piece.name, &piece.bonuses)?;
        let slot = if piece.shield {
            TierSlot::Shield
        } else {
            TierSlot::Armor
        };
        let tier = battlefield.insert_effect(
            EffectNode::new(EffectKind::armor_tier(slot, piece.tier + piece.tier_bonus))
                .with_source(EffectSource::Item(piece.name.clone())),
        );
        battlefield.attach(tier, unit_id)?;
    }

    for item in &record.quest_items {
        attach_item_bundle(battlefield, unit_id, &item.name, &item.bonuses)?;
    }
    if let Some(artifact) = &record.artifact {
        attach_item_bundle(battlefield, unit_id, &artifact.name, &artifact.bonuses)?;
    }

    Ok(Combatant {
        unit: unit_id,
        attack_type: record.attack_type,
        class: record.class,
        weapons,
        armor: record.armor.clone(),
        quest_items: record.quest_items.clone(),
        artifact: record.artifact.clone(),
        skills: record.skills,
        luck: record.luck,
        hero: record.hero,
        health,
        max_health,
    })
}

/// One composite owning the scaling links from primary attributes to the
/// combat stats they govern
fn attach_attribute_links(battlefield: &mut Battlefield, unit: UnitId) -> Result<()> {
    let composite = battlefield.insert_effect(EffectNode::new(EffectKind::Composite));
    battlefield.attach(composite, unit)?;
    for at in AttackType::ALL {
        for stat in [
            Stat::Accuracy(at),
            Stat::Evasion(at),
            Stat::Power(at),
            Stat::Resistance(at),
        ] {
            let Some(attribute) = governing_attribute(stat) else {
                continue;
            };
            let link = battlefield.insert_effect(EffectNode::new(EffectKind::Scaling {
                from: Stat::Attribute(attribute),
                to: stat,
                rate: 1.0,
            }));
            battlefield.attach(link, unit)?;
            battlefield.add_child(composite, link)?;
        }
    }
    Ok(())
}

fn attach_item_bundle(
    battlefield: &mut Battlefield,
    unit: UnitId,
    name: &str,
    bonuses: &ItemBonuses,
) -> Result<()> {
    if bonuses.is_empty() {
        return Ok(());
    }
    let mut bundle = StatBundle::new();
    for &(stat, value) in bonuses {
        *bundle.bonus.entry(stat).or_insert(0.0) += value;
    }
    let eid = battlefield.insert_effect(
        EffectNode::new(EffectKind::Bundle(bundle))
            .with_source(EffectSource::Item(name.to_string())),
    );
    battlefield.attach(eid, unit)?;
    Ok(())
}

impl CharacterRecord {
    /// Minimal record for tests and tooling
    pub fn bare(name: impl Into<String>, class: Class, attack_type: AttackType) -> Self {
        Self {
            name: name.into(),
            level: 1,
            class,
            attack_type,
            stance: Stance::Neutral,
            attributes: Vec::new(),
            weapons: Vec::new(),
            armor: Vec::new(),
            quest_items: Vec::new(),
            artifact: None,
            skills: Skills::default(),
            luck: Luck::default(),
            hero: true,
            health: 100.0,
            max_health: 100.0,
        }
    }
}
