//! In-combat rule violations.
//!
//! None of these abort anything: the engine appends the message to the
//! intent log, leaves state untouched and hands the error back so the input
//! loop can retry.

use crate::error::{ErrorSeverity, GameError};
use crate::grid::Position;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CombatError {
    #[error("Not in combat!")]
    NotInCombat,

    #[error("Combat is over!")]
    CombatOver,

    #[error("Not your turn!")]
    NotYourTurn,

    #[error("No weapon equipped!")]
    NoWeapon,

    #[error("No ability in slot {slot}")]
    UnknownSlot { slot: usize },

    #[error("Unknown ability '{id}'")]
    UnknownAbility { id: String },

    #[error("Not enough AP for {ability}! Need {need}, have {have}")]
    InsufficientAp {
        ability: String,
        need: i32,
        have: i32,
    },

    #[error("Target out of range for {ability}! Range: {min}-{max}, distance {distance}")]
    OutOfRange {
        ability: String,
        min: u32,
        max: u32,
        distance: u32,
    },

    #[error("{ability} needs an adjacent target")]
    NotAdjacent { ability: String },

    #[error("No line of sight")]
    NoLineOfSight,

    #[error("Target out of bounds")]
    TargetOutOfBounds { target: Position },

    #[error("No target")]
    NoTarget,

    #[error("No movement points left")]
    NoMovementLeft,

    #[error("Can't move there!")]
    MovementBlocked { destination: Position },
}

impl GameError for CombatError {
    fn severity(&self) -> ErrorSeverity {
        use CombatError::*;
        match self {
            NotInCombat | CombatOver | NotYourTurn => ErrorSeverity::Recoverable,
            InsufficientAp { .. } | NoMovementLeft | MovementBlocked { .. } => {
                ErrorSeverity::Recoverable
            }
            NoWeapon | UnknownSlot { .. } | UnknownAbility { .. } | NoTarget => {
                ErrorSeverity::Validation
            }
            OutOfRange { .. } | NotAdjacent { .. } | NoLineOfSight | TargetOutOfBounds { .. } => {
                ErrorSeverity::Validation
            }
        }
    }

    fn error_code(&self) -> &'static str {
        use CombatError::*;
        match self {
            NotInCombat => "COMBAT_NOT_IN_COMBAT",
            CombatOver => "COMBAT_OVER",
            NotYourTurn => "COMBAT_NOT_YOUR_TURN",
            NoWeapon => "COMBAT_NO_WEAPON",
            UnknownSlot { .. } => "COMBAT_UNKNOWN_SLOT",
            UnknownAbility { .. } => "COMBAT_UNKNOWN_ABILITY",
            InsufficientAp { .. } => "COMBAT_INSUFFICIENT_AP",
            OutOfRange { .. } => "COMBAT_OUT_OF_RANGE",
            NotAdjacent { .. } => "COMBAT_NOT_ADJACENT",
            NoLineOfSight => "COMBAT_NO_LINE_OF_SIGHT",
            TargetOutOfBounds { .. } => "COMBAT_TARGET_OUT_OF_BOUNDS",
            NoTarget => "COMBAT_NO_TARGET",
            NoMovementLeft => "COMBAT_NO_MOVEMENT_LEFT",
            MovementBlocked { .. } => "COMBAT_MOVEMENT_BLOCKED",
        }
    }
}
