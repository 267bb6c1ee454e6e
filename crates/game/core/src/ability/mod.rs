//! Ability definitions and the catalogue they are registered into.
//!
//! An [`Ability`] is declarative: an AP cost, an inclusive Manhattan range
//! band, capability tags and an ordered list of [`Effect`]s. The
//! [`AbilityCatalogue`] is an explicit object handed to the combat engine
//! rather than process-wide state, so independent encounters can use
//! independent catalogues.

mod builtin;
mod effect;

use std::collections::HashMap;

pub use builtin::weapon_kits;
pub use effect::Effect;

use crate::entity::Tags;
use crate::grid::Position;

/// A castable weapon ability.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ability {
    pub id: String,
    pub name: String,
    pub tags: Tags,
    pub cost_ap: i32,
    pub range_min: u32,
    pub range_max: u32,
    pub effects: Vec<Effect>,
    pub weapon_type: String,
}

impl Ability {
    /// Creates a free, zero-range ability with no effects.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        weapon_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tags: Tags::new(),
            cost_ap: 0,
            range_min: 0,
            range_max: 0,
            effects: Vec::new(),
            weapon_type: weapon_type.into(),
        }
    }

    pub fn with_tags<S: Into<String>>(mut self, tags: impl IntoIterator<Item = S>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    pub fn with_cost(mut self, cost_ap: i32) -> Self {
        self.cost_ap = cost_ap;
        self
    }

    pub fn with_range(mut self, range_min: u32, range_max: u32) -> Self {
        self.range_min = range_min;
        self.range_max = range_max;
        self
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// True when the Manhattan distance falls inside `[range_min, range_max]`.
    pub fn in_range(&self, source: Position, target: Position) -> bool {
        let distance = source.manhattan_distance(target);
        (self.range_min..=self.range_max).contains(&distance)
    }

    /// Ranged abilities need an unobstructed line of sight.
    pub fn is_ranged(&self) -> bool {
        self.tags.has_tag("ranged")
    }

    /// True melee (reach 1) must hit one of the four orthogonal neighbours.
    pub fn requires_adjacency(&self) -> bool {
        self.tags.has_tag("melee") && self.range_max <= 1
    }

    /// Self-targeted abilities are aimed at the caster's own tile.
    pub fn targets_self(&self) -> bool {
        self.tags.has_tag("self") || self.range_max == 0
    }
}

/// Registry of abilities keyed by id, preserving registration order.
#[derive(Clone, Debug, Default)]
pub struct AbilityCatalogue {
    abilities: Vec<Ability>,
    index: HashMap<String, usize>,
}

impl AbilityCatalogue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalogue pre-populated with the sword, bow and staff kits.
    pub fn builtin() -> Self {
        Self::from_abilities(weapon_kits())
    }

    pub fn from_abilities(abilities: impl IntoIterator<Item = Ability>) -> Self {
        let mut catalogue = Self::new();
        for ability in abilities {
            catalogue.register(ability);
        }
        catalogue
    }

    /// Inserts or overwrites by id. An overwritten ability keeps its slot.
    ///
    /// Returns the previous definition when the id was already registered.
    pub fn register(&mut self, ability: Ability) -> Option<Ability> {
        match self.index.get(&ability.id) {
            Some(&slot) => Some(std::mem::replace(&mut self.abilities[slot], ability)),
            None => {
                self.index.insert(ability.id.clone(), self.abilities.len());
                self.abilities.push(ability);
                None
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<&Ability> {
        self.index.get(id).map(|&slot| &self.abilities[slot])
    }

    /// All abilities of one weapon type, in registration order.
    pub fn abilities_for_weapon(&self, weapon_type: &str) -> Vec<&Ability> {
        self.abilities
            .iter()
            .filter(|ability| ability.weapon_type == weapon_type)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Ability> {
        self.abilities.iter()
    }

    pub fn len(&self) -> usize {
        self.abilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.abilities.is_empty()
    }
}

/// Renders `1:Name 2:Name 3:Name` for the first `size` weapon abilities.
pub fn ability_bar(catalogue: &AbilityCatalogue, weapon: Option<&str>, size: usize) -> String {
    let Some(weapon) = weapon else {
        return "No weapon equipped".to_string();
    };

    catalogue
        .abilities_for_weapon(weapon)
        .iter()
        .take(size)
        .enumerate()
        .map(|(slot, ability)| format!("{}:{}", slot + 1, ability.name))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_kits_expose_three_abilities_each() {
        let catalogue = AbilityCatalogue::builtin();
        assert_eq!(catalogue.len(), 9);

        let sword: Vec<_> = catalogue
            .abilities_for_weapon("sword")
            .iter()
            .map(|ability| ability.id.as_str())
            .collect();
        assert_eq!(sword, ["sword_boost", "charge", "slash"]);

        let bow: Vec<_> = catalogue
            .abilities_for_weapon("bow")
            .iter()
            .map(|ability| ability.id.as_str())
            .collect();
        assert_eq!(bow, ["bow_boost", "precise_shot", "push_shot"]);

        assert_eq!(catalogue.abilities_for_weapon("staff").len(), 3);
        assert!(catalogue.abilities_for_weapon("axe").is_empty());
    }

    #[test]
    fn register_overwrites_in_place() {
        let mut catalogue = AbilityCatalogue::builtin();
        let stronger = Ability::new("charge", "Heavy Charge", "sword")
            .with_tags(["movement", "melee"])
            .with_cost(5)
            .with_range(1, 4)
            .with_effect(Effect::charge(60));

        let previous = catalogue.register(stronger);
        assert_eq!(previous.map(|ability| ability.name), Some("Charge".to_string()));
        assert_eq!(catalogue.len(), 9);

        let sword = catalogue.abilities_for_weapon("sword");
        assert_eq!(sword[1].name, "Heavy Charge");
        assert_eq!(catalogue.get("charge").map(|ability| ability.cost_ap), Some(5));
    }

    #[test]
    fn in_range_is_inclusive_manhattan_band() {
        let catalogue = AbilityCatalogue::builtin();
        let Some(shot) = catalogue.get("push_shot") else {
            panic!("push_shot is built in");
        };
        let source = Position::new(1, 3);
        assert!(!shot.in_range(source, Position::new(2, 3)));
        assert!(shot.in_range(source, Position::new(3, 3)));
        assert!(shot.in_range(source, Position::new(4, 5)));
        assert!(!shot.in_range(source, Position::new(7, 3)));
    }

    #[test]
    fn tag_derived_rules() {
        let catalogue = AbilityCatalogue::builtin();
        let slash = catalogue.get("slash").unwrap();
        let charge = catalogue.get("charge").unwrap();
        let fireball = catalogue.get("fireball").unwrap();
        let shield = catalogue.get("ice_shield").unwrap();

        assert!(slash.requires_adjacency());
        assert!(!charge.requires_adjacency());
        assert!(fireball.is_ranged());
        assert!(!slash.is_ranged());
        assert!(shield.targets_self());
        assert!(!fireball.targets_self());
    }

    #[test]
    fn ability_bar_lists_first_slots() {
        let catalogue = AbilityCatalogue::builtin();
        assert_eq!(
            ability_bar(&catalogue, Some("sword"), 3),
            "1:Boost 2:Charge 3:Slash"
        );
        assert_eq!(ability_bar(&catalogue, Some("bow"), 2), "1:Boost 2:Precise Shot");
        assert_eq!(ability_bar(&catalogue, None, 3), "No weapon equipped");
    }
}
