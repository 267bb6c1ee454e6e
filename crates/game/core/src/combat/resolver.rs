//! Effect resolver: applies an ability's effects against the target tile.
//!
//! Preconditions (AP, range, adjacency, line of sight) are the caller's job;
//! see [`super::validation`]. Resolution always runs to completion before
//! returning, including defeat bookkeeping.

use std::ops::ControlFlow;

use crate::ability::{Ability, Effect};
use crate::entity::Player;
use crate::grid::Position;
use crate::stats::Stats;

use super::log::LogSink;
use super::los::has_line_of_sight;
use super::state::{ApBuff, CombatState, DefeatReport};

/// `max(1, raw - res)`: resistance alone never cancels a hit.
pub fn mitigate(raw: i32, res: i32) -> i32 {
    raw.saturating_sub(res).max(1)
}

/// Applies resistance, then armor through [`Stats::take_damage`].
///
/// Returns the HP loss that was applied, always at least 1.
pub fn resolve_damage(raw: i32, target: &mut Stats) -> i32 {
    let resisted = mitigate(raw, target.res);
    target.take_damage(resisted)
}

/// Deducts the ability's cost and applies its effects in list order.
///
/// Returns the monsters defeated by this cast.
pub fn resolve_ability_effects(
    ability: &Ability,
    player: &mut Player,
    target: Position,
    state: &mut CombatState,
    log: &mut dyn LogSink,
) -> Vec<DefeatReport> {
    state.player_ap -= ability.cost_ap;
    tracing::debug!(
        ability = %ability.id,
        %target,
        ap_left = state.player_ap,
        "resolving ability"
    );

    let mut resolution = Resolution {
        ability,
        player,
        target,
        state,
        log,
        defeated: Vec::new(),
    };

    for effect in &ability.effects {
        let flow = match *effect {
            Effect::Damage { amount } => resolution.damage(amount),
            Effect::Charge { amount } => resolution.charge(amount),
            Effect::Push { distance } => resolution.push(distance),
            Effect::BuffAp { amount, duration } => resolution.buff_ap(amount, duration),
        };
        if flow.is_break() {
            break;
        }
    }

    resolution.defeated
}

struct Resolution<'r> {
    ability: &'r Ability,
    player: &'r mut Player,
    target: Position,
    state: &'r mut CombatState,
    log: &'r mut dyn LogSink,
    defeated: Vec<DefeatReport>,
}

impl Resolution<'_> {
    fn damage(&mut self, amount: i32) -> ControlFlow<()> {
        let Some(slot) = self.state.opponent_at(self.target) else {
            return ControlFlow::Continue(());
        };

        if self.ability.is_ranged()
            && !has_line_of_sight(&self.state.grid, self.player.position, self.target)
        {
            self.log.append("No line of sight".to_string());
            return ControlFlow::Break(());
        }

        let monster = &mut self.state.opponents[slot].monster;
        let dealt = resolve_damage(amount, &mut monster.stats);
        self.log.append(format!(
            "{} deals {} damage to {}",
            self.ability.id, dealt, monster.name
        ));
        self.settle(slot)
    }

    fn charge(&mut self, amount: i32) -> ControlFlow<()> {
        let Some(slot) = self.state.opponent_at(self.target) else {
            return ControlFlow::Continue(());
        };

        let (dx, dy) = self.player.position.step_toward(self.target);
        let landing = self.target.offset(-dx, -dy);
        let occupied = self.state.opponent_at(landing).is_some();
        if !self.state.grid.walkable(landing) || occupied {
            self.log.append("Can't charge there - blocked!".to_string());
            return ControlFlow::Continue(());
        }

        self.player.position = landing;
        self.log.append(format!("Charged to {landing}"));

        let monster = &mut self.state.opponents[slot].monster;
        let dealt = resolve_damage(amount, &mut monster.stats);
        self.log.append(format!("Charge deals {} damage to {}", dealt, monster.name));
        self.settle(slot)
    }

    fn push(&mut self, distance: u32) -> ControlFlow<()> {
        let Some(slot) = self.state.opponent_at(self.target) else {
            return ControlFlow::Continue(());
        };

        let (dx, dy) = self.player.position.step_toward(self.target);
        if (dx, dy) == (0, 0) {
            return ControlFlow::Continue(());
        }

        let mut current = self.target;
        let mut collided = false;
        for _ in 0..distance.max(1) {
            let next = current.offset(dx, dy);
            let free = self.state.grid.walkable(next)
                && next != self.player.position
                && self.state.opponent_at(next).is_none();
            if !free {
                collided = true;
                break;
            }
            current = next;
        }

        let monster = &mut self.state.opponents[slot].monster;
        if current != monster.position {
            monster.position = current;
            self.log.append(format!("{} pushed to {}", monster.name, current));
        }

        if !collided {
            return ControlFlow::Continue(());
        }

        let dealt = resolve_damage(self.state.config.collision_damage, &mut monster.stats);
        self.log.append(format!(
            "Collision! {} takes {} bonus damage",
            monster.name, dealt
        ));
        self.settle(slot)
    }

    fn buff_ap(&mut self, amount: i32, duration: u32) -> ControlFlow<()> {
        self.state.player_ap += amount;
        self.state.ap_buffs.push(ApBuff {
            source: self.ability.id.clone(),
            amount,
            duration,
            granted_on_turn: self.state.current_turn,
        });
        self.log.append(format!("AP buffed by {amount}"));
        ControlFlow::Continue(())
    }

    /// Removes the monster in `slot` if it died; a defeat ends the cast.
    fn settle(&mut self, slot: usize) -> ControlFlow<()> {
        if self.state.opponents[slot].monster.is_alive() {
            return ControlFlow::Continue(());
        }

        let opponent = self.state.opponents.remove(slot);
        let report = DefeatReport::of(&opponent.monster, self.state.current_turn);
        self.log.append(format!("{} is defeated!", opponent.monster.name));
        tracing::info!(monster = %report.id, turn = report.turn, "monster defeated");

        if self.state.opponents.is_empty() {
            self.state.is_active = false;
        }
        self.state.defeated.push(report.clone());
        self.defeated.push(report);
        ControlFlow::Break(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::log::IntentLog;
    use crate::config::CombatConfig;
    use crate::entity::{Entity, Monster};
    use proptest::prelude::*;

    fn hero_at(position: Position) -> Player {
        Player::new(Entity::new(
            "player",
            "Hero",
            Stats::new(100, 6, 3, 10, 5),
            position,
        ))
    }

    fn state_with(monster: Monster) -> CombatState {
        let mut state = CombatState::new(CombatConfig::default(), vec![monster]);
        state.player_ap = 6;
        state
    }

    fn dummy(position: Position, stats: Stats) -> Monster {
        Monster::new("dummy", "Dummy", stats, position)
    }

    #[test]
    fn damage_applies_resistance_then_armor() {
        let mut stats = Stats::new(100, 6, 3, 10, 10).with_armor(5);
        assert_eq!(resolve_damage(35, &mut stats), 20);
        assert_eq!(stats.current_hp(), 80);
    }

    #[test]
    fn effects_resolve_in_list_order() {
        let ability = Ability::new("combo", "Combo", "sword")
            .with_cost(1)
            .with_range(1, 1)
            .with_effect(Effect::buff_ap(2, 0))
            .with_effect(Effect::damage(10));
        let target = Position::new(3, 3);
        let mut state = state_with(dummy(target, Stats::new(50, 6, 3, 10, 0)));
        let mut player = hero_at(Position::new(2, 3));
        let mut log = IntentLog::new();

        resolve_ability_effects(&ability, &mut player, target, &mut state, &mut log);

        assert_eq!(state.player_ap(), 7);
        assert_eq!(log.entries(), ["AP buffed by 2", "combo deals 10 damage to Dummy"]);
    }

    #[test]
    fn defeat_removes_monster_and_stops_cast() {
        let ability = Ability::new("double", "Double", "sword")
            .with_cost(4)
            .with_effect(Effect::damage(35))
            .with_effect(Effect::buff_ap(5, 1));
        let target = Position::new(3, 3);
        let mut state = state_with(dummy(target, Stats::new(30, 6, 3, 10, 0)));
        let mut player = hero_at(Position::new(2, 3));
        let mut log = IntentLog::new();

        let defeated = resolve_ability_effects(&ability, &mut player, target, &mut state, &mut log);

        assert_eq!(defeated.len(), 1);
        assert_eq!(defeated[0].stats.hp, 30);
        assert!(state.is_victory());
        assert!(!state.is_active());
        assert_eq!(state.player_ap(), 2, "buff after the killing blow never runs");
        assert_eq!(log.last(), Some("Dummy is defeated!"));
    }

    #[test]
    fn charge_lands_next_to_target() {
        let ability = Ability::new("charge", "Charge", "sword")
            .with_cost(3)
            .with_effect(Effect::charge(25));
        let target = Position::new(6, 3);
        let mut state = state_with(dummy(target, Stats::new(100, 6, 3, 10, 0)));
        let mut player = hero_at(Position::new(2, 3));
        let mut log = IntentLog::new();

        resolve_ability_effects(&ability, &mut player, target, &mut state, &mut log);

        assert_eq!(player.position, Position::new(5, 3));
        assert_eq!(state.first_monster().map(|m| m.stats.current_hp()), Some(75));
        assert_eq!(state.player_ap(), 3);
    }

    #[test]
    fn blocked_charge_deals_no_damage() {
        let ability = Ability::new("charge", "Charge", "sword")
            .with_cost(3)
            .with_effect(Effect::charge(25));
        let target = Position::new(6, 3);
        let mut state = state_with(dummy(target, Stats::new(100, 6, 3, 10, 0)));
        state.grid.add_blocked([Position::new(5, 3)]);
        let mut player = hero_at(Position::new(2, 3));
        let mut log = IntentLog::new();

        resolve_ability_effects(&ability, &mut player, target, &mut state, &mut log);

        assert_eq!(player.position, Position::new(2, 3));
        assert_eq!(state.first_monster().map(|m| m.stats.current_hp()), Some(100));
        assert_eq!(state.player_ap(), 3, "AP is spent even when the charge fails");
        assert_eq!(log.last(), Some("Can't charge there - blocked!"));
    }

    #[test]
    fn push_without_obstacle_has_no_bonus() {
        let ability = Ability::new("shove", "Shove", "bow")
            .with_cost(1)
            .with_effect(Effect::push(2));
        let target = Position::new(4, 3);
        let mut state = state_with(dummy(target, Stats::new(100, 6, 3, 10, 0)));
        let mut player = hero_at(Position::new(2, 3));
        let mut log = IntentLog::new();

        resolve_ability_effects(&ability, &mut player, target, &mut state, &mut log);

        let monster = state.first_monster().unwrap();
        assert_eq!(monster.position, Position::new(6, 3));
        assert_eq!(monster.stats.current_hp(), 100);
        assert!(!log.mentions("Collision"));
    }

    #[test]
    fn push_against_wall_collides_once() {
        let ability = Ability::new("shove", "Shove", "bow")
            .with_cost(1)
            .with_effect(Effect::push(3));
        // Arena wall at x = 9.
        let target = Position::new(7, 3);
        let mut state = state_with(dummy(target, Stats::new(100, 6, 3, 10, 2)));
        let mut player = hero_at(Position::new(5, 3));
        let mut log = IntentLog::new();

        resolve_ability_effects(&ability, &mut player, target, &mut state, &mut log);

        let monster = state.first_monster().unwrap();
        assert_eq!(monster.position, Position::new(8, 3));
        assert_eq!(monster.stats.current_hp(), 92);
        let collisions = log
            .entries()
            .iter()
            .filter(|entry| entry.starts_with("Collision!"))
            .count();
        assert_eq!(collisions, 1);
    }

    #[test]
    fn ranged_damage_rechecks_line_of_sight() {
        let ability = Ability::new("shot", "Shot", "bow")
            .with_tags(["ranged"])
            .with_cost(3)
            .with_effect(Effect::damage(30))
            .with_effect(Effect::push(1));
        let target = Position::new(6, 3);
        let mut state = state_with(dummy(target, Stats::new(100, 6, 3, 10, 0)));
        state.grid.add_blocked([Position::new(4, 3)]);
        let mut player = hero_at(Position::new(2, 3));
        let mut log = IntentLog::new();

        let defeated = resolve_ability_effects(&ability, &mut player, target, &mut state, &mut log);

        assert!(defeated.is_empty());
        assert_eq!(state.player_ap(), 3, "AP is not refunded");
        let monster = state.first_monster().unwrap();
        assert_eq!(monster.stats.current_hp(), 100);
        assert_eq!(monster.position, target, "the push after the abort never runs");
        assert_eq!(log.last(), Some("No line of sight"));
    }

    #[test]
    fn buff_records_duration_without_expiry() {
        let ability = Ability::new("boost", "Boost", "sword")
            .with_cost(2)
            .with_effect(Effect::buff_ap(3, 2));
        let mut state = state_with(dummy(Position::new(8, 3), Stats::new(100, 6, 3, 10, 0)));
        let mut player = hero_at(Position::new(2, 3));
        let mut log = IntentLog::new();

        let at = player.position;
        resolve_ability_effects(&ability, &mut player, at, &mut state, &mut log);

        assert_eq!(state.player_ap(), 7);
        assert_eq!(state.ap_buffs().len(), 1);
        assert_eq!(state.ap_buffs()[0].duration, 2);
    }

    proptest! {
        #[test]
        fn damage_is_always_at_least_one(
            raw in -50i32..200,
            res in 0i32..200,
            armor in 0i32..200,
        ) {
            let mut stats = Stats::new(1_000, 6, 3, 10, res).with_armor(armor);
            let applied = resolve_damage(raw, &mut stats);
            let expected = ((raw - res).max(1) - armor).max(1);
            prop_assert_eq!(applied, expected);
            prop_assert_eq!(stats.current_hp(), 1_000 - expected);
        }
    }
}
