//! Built-in weapon kits: sword, bow and staff.
//!
//! Each kit exposes a self-buff, a primary damage ability and a utility
//! ability, in that order.

use super::{Ability, Effect};

/// All built-in abilities in registration order.
pub fn weapon_kits() -> Vec<Ability> {
    let mut abilities = sword_kit();
    abilities.extend(bow_kit());
    abilities.extend(staff_kit());
    abilities
}

fn boost(weapon: &str) -> Ability {
    Ability::new(format!("{weapon}_boost"), "Boost", weapon)
        .with_tags(["buff", "self"])
        .with_cost(2)
        .with_range(0, 0)
        .with_effect(Effect::buff_ap(2, 1))
}

fn sword_kit() -> Vec<Ability> {
    vec![
        boost("sword"),
        Ability::new("charge", "Charge", "sword")
            .with_tags(["movement", "melee"])
            .with_cost(3)
            .with_range(1, 4)
            .with_effect(Effect::charge(25)),
        Ability::new("slash", "Slash", "sword")
            .with_tags(["melee"])
            .with_cost(4)
            .with_range(1, 1)
            .with_effect(Effect::damage(35)),
    ]
}

fn bow_kit() -> Vec<Ability> {
    vec![
        boost("bow"),
        Ability::new("precise_shot", "Precise Shot", "bow")
            .with_tags(["ranged"])
            .with_cost(3)
            .with_range(2, 6)
            .with_effect(Effect::damage(30)),
        Ability::new("push_shot", "Push Shot", "bow")
            .with_tags(["ranged", "control"])
            .with_cost(4)
            .with_range(2, 5)
            .with_effect(Effect::damage(20))
            .with_effect(Effect::push(2)),
    ]
}

fn staff_kit() -> Vec<Ability> {
    vec![
        boost("staff"),
        Ability::new("fireball", "Fireball", "staff")
            .with_tags(["magic", "ranged"])
            .with_cost(4)
            .with_range(2, 5)
            .with_effect(Effect::damage(40)),
        Ability::new("ice_shield", "Ice Shield", "staff")
            .with_tags(["magic", "defensive"])
            .with_cost(3)
            .with_range(0, 0)
            .with_effect(Effect::buff_ap(3, 2)),
    ]
}
