//! Overworld session: movement, encounter lifecycle and rewards.
//!
//! The session owns everything that outlives a single fight (overworld
//! grid, player, remaining monsters, log) and lends it to a
//! [`CombatEngine`] for each combat action.

use std::collections::BTreeMap;

use game_content::{ContentBundle, OverworldMap};
use game_core::{
    AbilityCatalogue, CastOutcome, CombatConfig, CombatEngine, CombatError, CombatState,
    DefeatReport, Entity, Glyphs, Grid, IntentLog, LogSink, Monster, Player, Position, Stats,
    TurnOutcome, ability_bar, check_combat_trigger, render_grid, render_lines,
};

/// Why a session action was refused.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    Combat(#[from] CombatError),

    #[error("The adventure is over")]
    GameOver,
}

/// What an overworld or arena step did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Moved(Position),
    /// Off the map or into a wall; nothing changed.
    Blocked,
    /// The step landed on a monster and combat began.
    EncounterStarted { monster: String },
}

/// Gold granted for a defeated monster: `hp / 5 + 5`.
pub fn gold_reward(report: &DefeatReport) -> u32 {
    u32::try_from(report.stats.hp / 5 + 5).unwrap_or(0)
}

pub struct Session {
    map_name: String,
    grid: Grid,
    player: Player,
    monsters: Vec<Monster>,
    catalogue: AbilityCatalogue,
    config: CombatConfig,
    combat: Option<CombatState>,
    log: IntentLog,
    kills: BTreeMap<String, u32>,
    game_over: bool,
}

impl Session {
    /// Starting hero: 100 HP, 6 AP, 3 MP, 10 ATK, 5 RES, 100 gold.
    pub fn default_player(weapon: Option<String>) -> Player {
        let mut player = Player::new(
            Entity::new(
                "player",
                "Hero",
                Stats::new(100, 6, 3, 10, 5),
                Position::ORIGIN,
            )
            .with_tags(["player"]),
        )
        .with_gold(100);
        player.weapon = weapon;
        player
    }

    /// Spawns the bundle's monster on every map spawn tile and puts the
    /// player on the map's start tile.
    pub fn new(bundle: ContentBundle, mut player: Player) -> Self {
        let ContentBundle {
            config,
            catalogue,
            map,
            monster,
        } = bundle;
        let OverworldMap {
            name,
            grid,
            player_start,
            spawns,
        } = map;

        player.position = player_start;
        let monsters = spawns.into_iter().map(|tile| monster.spawn(tile)).collect();
        Self::from_parts(name, grid, player, monsters, catalogue, config)
    }

    pub fn from_parts(
        map_name: impl Into<String>,
        grid: Grid,
        player: Player,
        monsters: Vec<Monster>,
        catalogue: AbilityCatalogue,
        config: CombatConfig,
    ) -> Self {
        Self {
            map_name: map_name.into(),
            grid,
            player,
            monsters,
            catalogue,
            config,
            combat: None,
            log: IntentLog::new(),
            kills: BTreeMap::new(),
            game_over: false,
        }
    }

    pub fn map_name(&self) -> &str {
        &self.map_name
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Monsters still roaming the overworld.
    pub fn monsters(&self) -> &[Monster] {
        &self.monsters
    }

    pub fn combat(&self) -> Option<&CombatState> {
        self.combat.as_ref()
    }

    pub fn in_combat(&self) -> bool {
        self.combat.is_some()
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn log(&self) -> &IntentLog {
        &self.log
    }

    /// Kills recorded for a monster id.
    pub fn kills(&self, monster_id: &str) -> u32 {
        self.kills.get(monster_id).copied().unwrap_or(0)
    }

    pub fn kill_counts(&self) -> &BTreeMap<String, u32> {
        &self.kills
    }

    /// Moves in the arena during combat, otherwise on the overworld.
    pub fn try_move(&mut self, dx: i32, dy: i32) -> Result<MoveOutcome, SessionError> {
        self.ensure_running()?;

        if let Some(combat) = self.combat.as_mut() {
            let mut engine =
                CombatEngine::new(combat, &mut self.player, &self.catalogue, &mut self.log);
            let destination = engine.try_move(dx, dy)?;
            return Ok(MoveOutcome::Moved(destination));
        }

        let destination = self.player.position.offset(dx, dy);
        if !self.grid.walkable(destination) {
            return Ok(MoveOutcome::Blocked);
        }
        self.player.position = destination;

        match check_combat_trigger(destination, &self.monsters) {
            Some(index) => {
                let monster = self.start_combat(index);
                Ok(MoveOutcome::EncounterStarted { monster })
            }
            None => Ok(MoveOutcome::Moved(destination)),
        }
    }

    /// Casts the ability in bar slot `slot` (1-based).
    pub fn select_ability(&mut self, slot: usize) -> Result<CastOutcome, SessionError> {
        self.ensure_running()?;
        let Some(combat) = self.combat.as_mut() else {
            return Err(self.not_in_combat());
        };
        let mut engine =
            CombatEngine::new(combat, &mut self.player, &self.catalogue, &mut self.log);
        let report = engine.select_ability(slot)?;
        self.after_cast(report.outcome);
        Ok(report.outcome)
    }

    /// Casts a catalogue ability at an explicit arena tile.
    pub fn cast_at(
        &mut self,
        ability_id: &str,
        target: Position,
    ) -> Result<CastOutcome, SessionError> {
        self.ensure_running()?;
        let Some(combat) = self.combat.as_mut() else {
            return Err(self.not_in_combat());
        };
        let mut engine =
            CombatEngine::new(combat, &mut self.player, &self.catalogue, &mut self.log);
        let report = engine.cast_at(ability_id, target)?;
        self.after_cast(report.outcome);
        Ok(report.outcome)
    }

    pub fn end_turn(&mut self) -> Result<TurnOutcome, SessionError> {
        self.ensure_running()?;
        let Some(combat) = self.combat.as_mut() else {
            return Err(self.not_in_combat());
        };
        let mut engine =
            CombatEngine::new(combat, &mut self.player, &self.catalogue, &mut self.log);
        let outcome = engine.end_turn()?;
        if outcome == TurnOutcome::Defeat {
            self.lose();
        }
        Ok(outcome)
    }

    /// Arena view during combat, overworld view otherwise.
    pub fn render(&self) -> Vec<String> {
        let glyphs = Glyphs::ASCII;
        let rows = match &self.combat {
            Some(combat) => combat.render(&self.player, &glyphs),
            None => {
                let monsters: Vec<Position> =
                    self.monsters.iter().map(|monster| monster.position).collect();
                render_grid(&self.grid, self.player.position, &monsters, &glyphs)
            }
        };
        render_lines(&rows)
    }

    pub fn ability_bar(&self) -> String {
        ability_bar(
            &self.catalogue,
            self.player.weapon.as_deref(),
            self.config.ability_bar_size,
        )
    }

    /// One-line HUD for the current mode.
    pub fn status_line(&self) -> String {
        let hp = self.player.stats.current_hp();
        let max_hp = self.player.stats.hp;
        match &self.combat {
            Some(combat) => {
                let foes = combat
                    .monsters()
                    .map(|m| format!("{} {}/{}", m.name, m.stats.current_hp(), m.stats.hp))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!(
                    "Turn {} | HP {}/{} | AP {} | MP {} | {}",
                    combat.current_turn(),
                    hp,
                    max_hp,
                    combat.player_ap(),
                    combat.player_mp(),
                    foes
                )
            }
            None => format!(
                "{} | HP {}/{} | Gold {} | Monsters left {}",
                self.map_name,
                hp,
                max_hp,
                self.player.gold,
                self.monsters.len()
            ),
        }
    }

    fn start_combat(&mut self, index: usize) -> String {
        let monster = self.monsters.remove(index);
        let name = monster.name.clone();
        tracing::info!(monster = %monster.id, position = %monster.position, "encounter triggered");

        let mut combat = CombatState::new(self.config.clone(), vec![monster]);
        CombatEngine::new(&mut combat, &mut self.player, &self.catalogue, &mut self.log)
            .start_combat();
        self.combat = Some(combat);
        name
    }

    fn after_cast(&mut self, outcome: CastOutcome) {
        match outcome {
            CastOutcome::Victory => self.win(),
            CastOutcome::Continue | CastOutcome::OutOfAp => {}
        }
    }

    /// Grants rewards for every defeat and returns to the overworld tile
    /// the encounter started from.
    fn win(&mut self) {
        let Some(combat) = self.combat.take() else {
            return;
        };

        for report in combat.defeated() {
            let gold = gold_reward(report);
            self.player.add_gold(gold);
            *self.kills.entry(report.id.clone()).or_default() += 1;
            self.log.append(format!("Gained {gold} gold"));
            if self.player.add_weapon_experience(1) {
                self.log.append("Weapon experience gained!".to_string());
            }
            tracing::info!(monster = %report.id, gold, "reward granted");
        }

        if let Some(position) = combat.return_position() {
            self.player.position = position;
        }
    }

    fn lose(&mut self) {
        self.combat = None;
        self.game_over = true;
        tracing::info!(gold = self.player.gold, "session over");
    }

    fn ensure_running(&self) -> Result<(), SessionError> {
        if self.game_over {
            Err(SessionError::GameOver)
        } else {
            Ok(())
        }
    }

    fn not_in_combat(&mut self) -> SessionError {
        let error = CombatError::NotInCombat;
        self.log.append(error.to_string());
        error.into()
    }
}
