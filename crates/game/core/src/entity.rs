//! Entities that take part in encounters.

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Deref, DerefMut};

use crate::grid::Position;
use crate::stats::{EquipmentBonus, Stats};

/// Free-form classification markers such as `player`, `boss`, `melee`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tags(BTreeSet<String>);

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, tag: impl Into<String>) -> bool {
        self.0.insert(tag.into())
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.0.contains(tag)
    }

    pub fn has_any<'t>(&self, tags: impl IntoIterator<Item = &'t str>) -> bool {
        tags.into_iter().any(|tag| self.has_tag(tag))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for Tags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// Identity, stats and placement shared by the player and monsters.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entity {
    pub id: String,
    pub name: String,
    pub stats: Stats,
    pub position: Position,
    pub tags: Tags,
}

impl Entity {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stats: Stats,
        position: Position,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stats,
            position,
            tags: Tags::new(),
        }
    }

    /// Builder: attach classification tags.
    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn is_alive(&self) -> bool {
        self.stats.is_alive()
    }
}

/// Monsters carry nothing beyond the shared entity data.
pub type Monster = Entity;

/// The controllable character.
///
/// Progression, inventory and quests live outside the combat engine; the
/// engine only needs the summed equipment bonus, the equipped weapon type
/// and a purse plus weapon experience for rewards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    pub entity: Entity,
    pub equipment: EquipmentBonus,
    /// Weapon type used to look up the ability bar (`sword`, `bow`, `staff`).
    pub weapon: Option<String>,
    pub gold: u32,
    /// Experience per weapon type.
    weapon_experience: BTreeMap<String, u32>,
}

impl Player {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            equipment: EquipmentBonus::default(),
            weapon: None,
            gold: 0,
            weapon_experience: BTreeMap::new(),
        }
    }

    /// Builder: equip a weapon type.
    pub fn with_weapon(mut self, weapon: impl Into<String>) -> Self {
        self.weapon = Some(weapon.into());
        self
    }

    /// Builder: set the equipment bonus.
    pub fn with_equipment(mut self, equipment: EquipmentBonus) -> Self {
        self.equipment = equipment;
        self
    }

    /// Builder: starting gold.
    pub fn with_gold(mut self, gold: u32) -> Self {
        self.gold = gold;
        self
    }

    /// Base stats plus equipment bonuses. HP pools come from base stats.
    pub fn total_stats(&self) -> Stats {
        self.entity.stats.with_bonus(&self.equipment)
    }

    /// Applies an already-resisted hit using base plus equipment armor.
    pub fn take_damage(&mut self, damage: i32) -> i32 {
        let armor = self.entity.stats.armor.saturating_add(self.equipment.armor);
        self.entity.stats.absorb(damage, armor)
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn can_afford(&self, amount: u32) -> bool {
        self.gold >= amount
    }

    /// Credits the equipped weapon type. Returns false when unarmed.
    pub fn add_weapon_experience(&mut self, amount: u32) -> bool {
        let Some(weapon) = self.weapon.as_ref() else {
            return false;
        };
        let total = self.weapon_experience.entry(weapon.clone()).or_default();
        *total = total.saturating_add(amount);
        true
    }

    pub fn weapon_experience(&self, weapon: &str) -> u32 {
        self.weapon_experience.get(weapon).copied().unwrap_or(0)
    }
}

impl Deref for Player {
    type Target = Entity;

    fn deref(&self) -> &Entity {
        &self.entity
    }
}

impl DerefMut for Player {
    fn deref_mut(&mut self) -> &mut Entity {
        &mut self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hero() -> Player {
        let entity = Entity::new("player", "Hero", Stats::new(100, 6, 3, 10, 5), Position::ORIGIN)
            .with_tags(["player"]);
        Player::new(entity).with_weapon("sword")
    }

    #[test]
    fn tags_lookup() {
        let tags: Tags = ["a", "b"].into_iter().collect();
        assert!(tags.has_tag("a"));
        assert!(!tags.has_tag("c"));
        assert!(tags.has_any(["x", "b"]));
        assert!(!tags.has_any(["x", "y"]));
    }

    #[test]
    fn total_stats_include_equipment() {
        let player = hero().with_equipment(EquipmentBonus {
            ap: 2,
            armor: 3,
            ..EquipmentBonus::default()
        });
        let total = player.total_stats();
        assert_eq!(total.ap, 8);
        assert_eq!(total.armor, 3);
        assert_eq!(player.stats.ap, 6);
    }

    #[test]
    fn player_damage_uses_equipment_armor() {
        let mut player = hero().with_equipment(EquipmentBonus {
            armor: 4,
            ..EquipmentBonus::default()
        });
        assert_eq!(player.take_damage(10), 6);
        assert_eq!(player.stats.current_hp(), 94);
    }

    #[test]
    fn gold_purse() {
        let mut player = hero().with_gold(10);
        player.add_gold(5);
        assert!(player.can_afford(15));
        assert!(!player.can_afford(16));
    }

    #[test]
    fn weapon_experience_follows_equipped_weapon() {
        let mut player = hero();
        assert!(player.add_weapon_experience(1));
        assert!(player.add_weapon_experience(2));
        player.weapon = Some("bow".to_string());
        assert!(player.add_weapon_experience(1));
        player.weapon = None;
        assert!(!player.add_weapon_experience(5));

        assert_eq!(player.weapon_experience("sword"), 3);
        assert_eq!(player.weapon_experience("bow"), 1);
        assert_eq!(player.weapon_experience("staff"), 0);
    }
}
