//! Validation failures for content records.

use game_core::{ErrorSeverity, GameError};

/// A content record that cannot be turned into a game-core value.
///
/// Every variant is fatal: content is validated once at startup.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("map '{map}' has invalid dimensions {width}x{height}")]
    InvalidDimension {
        map: String,
        width: u32,
        height: u32,
    },

    #[error("map '{map}' blocks ({x}, {y}) outside its bounds")]
    BlockedOutOfBounds { map: String, x: i32, y: i32 },

    #[error("map '{map}' places {what} at ({x}, {y}) on a tile that is not walkable")]
    UnwalkablePlacement {
        map: String,
        what: &'static str,
        x: i32,
        y: i32,
    },

    #[error("map '{map}' has no monster spawns")]
    EmptyMonsterList { map: String },

    #[error("unknown effect type '{kind}' in ability '{ability}'")]
    UnknownEffect { ability: String, kind: String },

    #[error("effect '{kind}' in ability '{ability}' is missing '{field}'")]
    MissingEffectField {
        ability: String,
        kind: String,
        field: &'static str,
    },

    #[error("ability '{ability}' has inverted range {min}-{max}")]
    InvertedRange { ability: String, min: u32, max: u32 },

    #[error("ability '{ability}' has negative cost {cost}")]
    NegativeCost { ability: String, cost: i32 },

    #[error("duplicate ability id '{ability}'")]
    DuplicateAbility { ability: String },

    #[error("monster '{monster}' has invalid {field} {value}")]
    InvalidStat {
        monster: String,
        field: &'static str,
        value: i32,
    },

    #[error("monster '{monster}' references unknown ability '{ability}'")]
    UnknownMonsterAbility { monster: String, ability: String },

    #[error("combat arena {width}x{height} leaves no floor inside the walls")]
    InvalidArena { width: u32, height: u32 },

    #[error("combat config places {what} at ({x}, {y}) on a tile that is not walkable")]
    UnwalkableArenaStart { what: &'static str, x: i32, y: i32 },

    #[error("combat config places the player and the monster on ({x}, {y})")]
    OverlappingArenaStarts { x: i32, y: i32 },

    #[error("combat config has invalid {field} {value}")]
    InvalidConfigValue { field: &'static str, value: i64 },
}

impl GameError for ContentError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Fatal
    }

    fn error_code(&self) -> &'static str {
        use ContentError::*;
        match self {
            InvalidDimension { .. } => "CONTENT_INVALID_DIMENSION",
            BlockedOutOfBounds { .. } => "CONTENT_BLOCKED_OUT_OF_BOUNDS",
            UnwalkablePlacement { .. } => "CONTENT_UNWALKABLE_PLACEMENT",
            EmptyMonsterList { .. } => "CONTENT_EMPTY_MONSTER_LIST",
            UnknownEffect { .. } => "CONTENT_UNKNOWN_EFFECT",
            MissingEffectField { .. } => "CONTENT_MISSING_EFFECT_FIELD",
            InvertedRange { .. } => "CONTENT_INVERTED_RANGE",
            NegativeCost { .. } => "CONTENT_NEGATIVE_COST",
            DuplicateAbility { .. } => "CONTENT_DUPLICATE_ABILITY",
            InvalidStat { .. } => "CONTENT_INVALID_STAT",
            UnknownMonsterAbility { .. } => "CONTENT_UNKNOWN_MONSTER_ABILITY",
            InvalidArena { .. } => "CONTENT_INVALID_ARENA",
            UnwalkableArenaStart { .. } => "CONTENT_UNWALKABLE_ARENA_START",
            OverlappingArenaStarts { .. } => "CONTENT_OVERLAPPING_ARENA_STARTS",
            InvalidConfigValue { .. } => "CONTENT_INVALID_CONFIG_VALUE",
        }
    }
}
