//! Turn-based combat state machine.
//!
//! [`CombatEngine`] borrows one encounter's [`CombatState`], the player, the
//! ability catalogue and the log for the duration of a call sequence, the
//! same way the overworld lends them out between input events. Every public
//! operation either completes fully or is rejected with a [`CombatError`]
//! whose message has already been appended to the log; a rejection never
//! changes state.

use crate::ability::{Ability, AbilityCatalogue};
use crate::entity::{Monster, Player};
use crate::grid::Position;

use super::ai::{MonsterAction, MonsterContext, MonsterPolicy, TiredOrStrike};
use super::errors::CombatError;
use super::log::LogSink;
use super::resolver::{mitigate, resolve_ability_effects};
use super::state::{CombatState, DefeatReport, Phase, ResourcePool};
use super::validation::validate_cast;

use crate::error::GameError;

/// How the encounter stands after a successful cast.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CastOutcome {
    /// The player may keep acting.
    Continue,
    /// No AP left; the caller should prompt for turn end.
    OutOfAp,
    /// Every monster is gone.
    Victory,
}

/// Result of a resolved cast.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CastReport {
    pub ability: String,
    pub target: Position,
    pub outcome: CastOutcome,
    pub defeated: Vec<DefeatReport>,
}

/// How the encounter stands after the monster phase.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TurnOutcome {
    /// Pools were refilled and the player acts again on `turn`.
    NextTurn { turn: u32 },
    /// The player's HP reached zero.
    Defeat,
}

/// Index of the first overworld monster standing on `position`.
pub fn check_combat_trigger(position: Position, monsters: &[Monster]) -> Option<usize> {
    monsters
        .iter()
        .position(|monster| monster.position == position)
}

pub struct CombatEngine<'a> {
    state: &'a mut CombatState,
    player: &'a mut Player,
    catalogue: &'a AbilityCatalogue,
    log: &'a mut dyn LogSink,
    policy: &'a dyn MonsterPolicy,
}

impl<'a> CombatEngine<'a> {
    pub fn new(
        state: &'a mut CombatState,
        player: &'a mut Player,
        catalogue: &'a AbilityCatalogue,
        log: &'a mut dyn LogSink,
    ) -> Self {
        Self {
            state,
            player,
            catalogue,
            log,
            policy: &TiredOrStrike,
        }
    }

    /// Builder: replace the monster decision policy.
    pub fn with_policy(mut self, policy: &'a dyn MonsterPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn state(&self) -> &CombatState {
        self.state
    }

    pub fn player(&self) -> &Player {
        self.player
    }

    /// Places everyone on their arena start tiles and seeds all pools.
    ///
    /// The player's current position is remembered as the overworld return
    /// tile.
    pub fn start_combat(&mut self) {
        let state = &mut *self.state;
        state.return_position = Some(self.player.position);
        self.player.position = state.arena.player_start;

        let slots = state
            .arena
            .monster_slots(&state.grid, state.opponents.len());
        for (opponent, slot) in state.opponents.iter_mut().zip(slots) {
            opponent.monster.position = slot;
        }
        for opponent in &mut state.opponents {
            opponent.pool = ResourcePool::from_stats(&opponent.monster.stats);
        }

        let total = self.player.total_stats();
        state.player_ap = total.ap;
        state.player_mp = total.mp;
        state.current_turn = 1;
        state.phase = Phase::PlayerTurn;
        state.is_active = !state.opponents.is_empty();
        state.can_move = true;
        state.can_cast = true;

        let names = state
            .opponents
            .iter()
            .map(|opponent| opponent.monster.name.as_str())
            .collect::<Vec<_>>()
            .join(", ");
        let names = if names.is_empty() { "Unknown" } else { &names };

        self.log.append("=== COMBAT ARENA ===".to_string());
        self.log.append(format!("Fighting: {names}"));
        tracing::info!(
            monsters = state.opponents.len(),
            player_ap = state.player_ap,
            player_mp = state.player_mp,
            "combat started"
        );
    }

    /// Moves the player one step, spending 1 MP.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<Position, CombatError> {
        match self.move_player(dx, dy) {
            Ok(destination) => Ok(destination),
            Err(error) => self.reject(error),
        }
    }

    /// Casts the ability in bar slot `slot` (1-based).
    ///
    /// Self-targeted abilities aim at the player; everything else aims at
    /// the first monster in the list.
    pub fn select_ability(&mut self, slot: usize) -> Result<CastReport, CombatError> {
        let selected = self
            .ensure_player_turn()
            .and_then(|()| self.ability_in_slot(slot))
            .and_then(|ability| Ok((ability, self.default_target(ability)?)));

        match selected {
            Ok((ability, target)) => self.cast(ability, target),
            Err(error) => self.reject(error),
        }
    }

    /// Casts a catalogue ability at an explicit tile.
    pub fn cast_at(
        &mut self,
        ability_id: &str,
        target: Position,
    ) -> Result<CastReport, CombatError> {
        let catalogue = self.catalogue;
        let ability = self.ensure_player_turn().and_then(|()| {
            catalogue
                .get(ability_id)
                .ok_or_else(|| CombatError::UnknownAbility {
                    id: ability_id.to_string(),
                })
        });

        match ability {
            Ok(ability) => self.cast(ability, target),
            Err(error) => self.reject(error),
        }
    }

    /// Ends the player phase and runs the monster phase immediately.
    pub fn end_turn(&mut self) -> Result<TurnOutcome, CombatError> {
        if let Err(error) = self.ensure_player_turn() {
            return self.reject(error);
        }

        self.state.phase = Phase::MonsterTurn;
        tracing::debug!(turn = self.state.current_turn, "player ended turn");
        Ok(self.run_monster_turn())
    }

    fn cast(&mut self, ability: &Ability, target: Position) -> Result<CastReport, CombatError> {
        if let Err(error) = validate_cast(
            ability,
            self.player.position,
            target,
            self.state.player_ap,
            &self.state.grid,
        ) {
            return self.reject(error);
        }

        let defeated = resolve_ability_effects(ability, self.player, target, self.state, self.log);

        let outcome = if self.state.is_victory() {
            self.log.append("Victory! All monsters defeated!".to_string());
            CastOutcome::Victory
        } else if self.state.player_ap <= 0 {
            self.log.append("No AP left! End your turn.".to_string());
            CastOutcome::OutOfAp
        } else {
            CastOutcome::Continue
        };

        Ok(CastReport {
            ability: ability.id.clone(),
            target,
            outcome,
            defeated,
        })
    }

    fn move_player(&mut self, dx: i32, dy: i32) -> Result<Position, CombatError> {
        self.ensure_player_turn()?;
        if !self.state.can_move || self.state.player_mp <= 0 {
            return Err(CombatError::NoMovementLeft);
        }

        let destination = self.player.position.offset(dx, dy);
        if !self.state.grid.walkable(destination) || self.state.monster_at(destination).is_some() {
            return Err(CombatError::MovementBlocked { destination });
        }

        self.player.position = destination;
        self.state.player_mp -= 1;
        self.log.append(format!(
            "Moved to {} - MP: {}",
            destination, self.state.player_mp
        ));
        Ok(destination)
    }

    fn run_monster_turn(&mut self) -> TurnOutcome {
        self.log.append("--- Monster's turn ---".to_string());
        let attack_cost = self.state.config.monster_attack_cost;

        for slot in 0..self.state.opponents.len() {
            let opponent = &self.state.opponents[slot];
            let action = self.policy.decide(&MonsterContext {
                monster: &opponent.monster,
                pool: opponent.pool,
                player: self.player,
                attack_cost,
            });
            let name = opponent.monster.name.clone();

            match action {
                MonsterAction::Attack => {
                    let raw = opponent.monster.stats.atk;
                    let resisted = mitigate(raw, self.player.total_stats().res);
                    let dealt = self.player.take_damage(resisted);
                    self.state.opponents[slot].pool.ap -= attack_cost;
                    self.log.append(format!("{name} attacks for {dealt} damage!"));
                }
                MonsterAction::Rest => {
                    self.log.append(format!("{name} is too tired to attack"));
                }
            }

            if !self.player.is_alive() {
                self.log.append("You have been defeated!".to_string());
                self.state.is_active = false;
                tracing::info!(turn = self.state.current_turn, "player defeated");
                return TurnOutcome::Defeat;
            }
        }

        self.reset_turn();
        TurnOutcome::NextTurn {
            turn: self.state.current_turn,
        }
    }

    fn reset_turn(&mut self) {
        let total = self.player.total_stats();
        let state = &mut *self.state;
        state.player_ap = total.ap;
        state.player_mp = total.mp;
        for opponent in &mut state.opponents {
            opponent.pool = ResourcePool::from_stats(&opponent.monster.stats);
        }
        state.current_turn += 1;
        state.phase = Phase::PlayerTurn;
        state.can_move = true;
        state.can_cast = true;

        self.log.append(format!("=== TURN {} ===", state.current_turn));
        self.log.append(format!(
            "Your turn! AP: {}, MP: {}",
            state.player_ap, state.player_mp
        ));
        tracing::debug!(turn = state.current_turn, "turn reset");
    }

    fn ensure_player_turn(&self) -> Result<(), CombatError> {
        if !self.state.is_active {
            return Err(CombatError::CombatOver);
        }
        if self.state.phase != Phase::PlayerTurn {
            return Err(CombatError::NotYourTurn);
        }
        Ok(())
    }

    fn ability_in_slot(&self, slot: usize) -> Result<&'a Ability, CombatError> {
        let weapon = self.player.weapon.as_deref().ok_or(CombatError::NoWeapon)?;
        let abilities = self.catalogue.abilities_for_weapon(weapon);
        let bar = abilities.len().min(self.state.config.ability_bar_size);
        if slot == 0 || slot > bar {
            return Err(CombatError::UnknownSlot { slot });
        }
        Ok(abilities[slot - 1])
    }

    fn default_target(&self, ability: &Ability) -> Result<Position, CombatError> {
        if ability.targets_self() {
            return Ok(self.player.position);
        }
        self.state
            .first_monster()
            .map(|monster| monster.position)
            .ok_or(CombatError::NoTarget)
    }

    fn reject<T>(&mut self, error: CombatError) -> Result<T, CombatError> {
        tracing::debug!(code = error.error_code(), %error, "combat action rejected");
        self.log.append(error.to_string());
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::log::IntentLog;
    use crate::config::CombatConfig;
    use crate::entity::Entity;
    use crate::stats::Stats;

    fn hero(ap: i32) -> Player {
        Player::new(Entity::new(
            "player",
            "Hero",
            Stats::new(100, ap, 3, 10, 5),
            Position::new(10, 10),
        ))
        .with_weapon("sword")
    }

    fn slime(hp: i32) -> Monster {
        Monster::new("slime", "Slime", Stats::new(hp, 6, 3, 12, 0), Position::new(10, 10))
    }

    fn adjacent_config() -> CombatConfig {
        CombatConfig::default().with_starts(Position::new(1, 3), Position::new(2, 3))
    }

    #[test]
    fn start_combat_places_everyone() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);

        engine.start_combat();

        assert_eq!(engine.player().position, Position::new(1, 3));
        assert_eq!(engine.state().return_position(), Some(Position::new(10, 10)));
        assert_eq!(engine.state().player_ap(), 6);
        assert_eq!(
            engine.state().first_monster().map(|m| m.position),
            Some(Position::new(8, 3))
        );
        assert_eq!(log.entries(), ["=== COMBAT ARENA ===", "Fighting: Slime"]);
    }

    #[test]
    fn movement_spends_mp_until_exhausted() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        assert_eq!(engine.try_move(1, 0), Ok(Position::new(2, 3)));
        assert_eq!(engine.try_move(1, 0), Ok(Position::new(3, 3)));
        assert_eq!(engine.try_move(0, -1), Ok(Position::new(3, 2)));
        assert_eq!(engine.try_move(1, 0), Err(CombatError::NoMovementLeft));
        assert_eq!(engine.player().position, Position::new(3, 2));
        assert_eq!(log.last(), Some("No movement points left"));
    }

    #[test]
    fn walls_block_movement_without_cost() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        let result = engine.try_move(-1, 0);

        assert_eq!(
            result,
            Err(CombatError::MovementBlocked {
                destination: Position::new(0, 3)
            })
        );
        assert_eq!(engine.state().player_mp(), 3);
        assert_eq!(log.last(), Some("Can't move there!"));
    }

    #[test]
    fn unknown_slot_is_rejected() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        assert_eq!(
            engine.select_ability(4),
            Err(CombatError::UnknownSlot { slot: 4 })
        );
        assert_eq!(
            engine.select_ability(0),
            Err(CombatError::UnknownSlot { slot: 0 })
        );
        assert_eq!(engine.state().player_ap(), 6);
    }

    #[test]
    fn unarmed_player_cannot_select() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        player.weapon = None;
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        assert_eq!(engine.select_ability(1), Err(CombatError::NoWeapon));
        assert_eq!(log.last(), Some("No weapon equipped!"));
    }

    #[test]
    fn self_buff_targets_the_player() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        let report = engine.select_ability(1).expect("boost is castable");

        assert_eq!(report.ability, "sword_boost");
        assert_eq!(report.target, Position::new(1, 3));
        assert_eq!(report.outcome, CastOutcome::Continue);
        assert_eq!(engine.state().player_ap(), 6);
        assert_eq!(engine.state().ap_buffs().len(), 1);
    }

    #[test]
    fn spending_all_ap_reports_out_of_ap() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(adjacent_config(), vec![slime(100)]);
        let mut player = hero(4);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        let report = engine.select_ability(3).expect("slash is castable");

        assert_eq!(report.outcome, CastOutcome::OutOfAp);
        assert_eq!(engine.state().player_ap(), 0);
        assert_eq!(log.last(), Some("No AP left! End your turn."));
    }

    #[test]
    fn killing_the_last_monster_is_victory() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(adjacent_config(), vec![slime(10)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        let report = engine.cast_at("slash", Position::new(2, 3)).expect("slash lands");

        assert_eq!(report.outcome, CastOutcome::Victory);
        assert_eq!(report.defeated.len(), 1);
        assert!(!engine.state().is_active());
        assert_eq!(engine.end_turn(), Err(CombatError::CombatOver));
        assert!(log.mentions("Victory! All monsters defeated!"));
    }

    #[test]
    fn unknown_ability_id_is_rejected() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        assert_eq!(
            engine.cast_at("meteor", Position::new(8, 3)),
            Err(CombatError::UnknownAbility {
                id: "meteor".to_string()
            })
        );
    }

    #[test]
    fn monster_attacks_then_turn_resets() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();
        engine.try_move(1, 0).expect("open floor");

        let outcome = engine.end_turn();

        assert_eq!(outcome, Ok(TurnOutcome::NextTurn { turn: 2 }));
        assert_eq!(engine.player().stats.current_hp(), 93);
        assert_eq!(engine.state().player_mp(), 3);
        assert_eq!(engine.state().phase(), Phase::PlayerTurn);
        let tail = log.since(3);
        assert_eq!(
            tail,
            [
                "--- Monster's turn ---",
                "Slime attacks for 7 damage!",
                "=== TURN 2 ===",
                "Your turn! AP: 6, MP: 3",
            ]
        );
    }

    #[test]
    fn lethal_monster_turn_defeats_player() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        player.stats = player.stats.clone().with_current_hp(5);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        engine.start_combat();

        assert_eq!(engine.end_turn(), Ok(TurnOutcome::Defeat));
        assert!(!engine.state().is_active());
        assert_eq!(engine.state().current_turn(), 1);
        assert_eq!(log.last(), Some("You have been defeated!"));
    }

    #[test]
    fn end_turn_during_monster_phase_changes_nothing() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        {
            let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
            engine.start_combat();
        }
        state.phase = Phase::MonsterTurn;

        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log);
        assert_eq!(engine.end_turn(), Err(CombatError::NotYourTurn));
        assert_eq!(engine.try_move(1, 0), Err(CombatError::NotYourTurn));
        assert_eq!(engine.state().current_turn(), 1);
        assert_eq!(engine.player().stats.current_hp(), 100);
        assert_eq!(log.last(), Some("Not your turn!"));
    }

    struct AlwaysRest;

    impl MonsterPolicy for AlwaysRest {
        fn decide(&self, _ctx: &MonsterContext<'_>) -> MonsterAction {
            MonsterAction::Rest
        }
    }

    #[test]
    fn custom_policy_drives_monsters() {
        let catalogue = AbilityCatalogue::builtin();
        let mut state = CombatState::new(CombatConfig::default(), vec![slime(40)]);
        let mut player = hero(6);
        let mut log = IntentLog::new();
        let mut engine = CombatEngine::new(&mut state, &mut player, &catalogue, &mut log)
            .with_policy(&AlwaysRest);
        engine.start_combat();

        engine.end_turn().expect("player turn");

        assert_eq!(engine.player().stats.current_hp(), 100);
        assert!(log.mentions("Slime is too tired to attack"));
    }

    #[test]
    fn trigger_finds_monster_on_tile() {
        let monsters = vec![
            Monster::new("a", "A", Stats::new(1, 1, 1, 1, 1), Position::new(10, 10)),
            Monster::new("b", "B", Stats::new(1, 1, 1, 1, 1), Position::new(20, 15)),
        ];
        assert_eq!(check_combat_trigger(Position::new(20, 15), &monsters), Some(1));
        assert_eq!(check_combat_trigger(Position::new(0, 0), &monsters), None);
    }
}
