//! Text client for the dungeon tactics game.
//!
//! # Architecture
//!
//! ```text
//! main (composition root)
//!   ├─→ ClientConfig (environment)
//!   ├─→ logging (tracing → per-session file)
//!   ├─→ ContentFactory (game-content)
//!   └─→ Session (overworld + CombatEngine from game-core)
//! ```
//!
//! The session is synchronous: every command is one call that returns after
//! the engine (and, on turn end, every monster) has finished acting.

pub mod config;
pub mod logging;
pub mod session;

pub use config::ClientConfig;
pub use session::{MoveOutcome, Session, SessionError, gold_reward};

/// A parsed line of player input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Move { dx: i32, dy: i32 },
    Ability(usize),
    EndTurn,
    Help,
    Quit,
}

impl Command {
    /// Parses `w`/`a`/`s`/`d`, a slot digit, `e`, `h`/`?` or `q`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "w" => Some(Self::Move { dx: 0, dy: -1 }),
            "a" => Some(Self::Move { dx: -1, dy: 0 }),
            "s" => Some(Self::Move { dx: 0, dy: 1 }),
            "d" => Some(Self::Move { dx: 1, dy: 0 }),
            "e" => Some(Self::EndTurn),
            "h" | "?" => Some(Self::Help),
            "q" | "quit" => Some(Self::Quit),
            other => other.parse().ok().map(Self::Ability),
        }
    }
}

pub const HELP: &str = "w/a/s/d move | 1-3 use ability | e end turn | h help | q quit";
