//! Data-driven content records and loaders.
//!
//! This crate turns RON/TOML data files into validated game-core values:
//! - Overworld maps (RON)
//! - Monster templates (RON)
//! - Ability lists (RON, optional; the built-in weapon kits otherwise)
//! - Combat tuning (TOML, optional; `CombatConfig::default()` otherwise)
//!
//! Records are validated once at load time. Any malformed record is a
//! [`ContentError`] and aborts startup; nothing is silently defaulted.

pub mod error;
pub mod records;

#[cfg(feature = "loaders")]
pub mod loaders;

pub use error::ContentError;
pub use records::{
    AbilityRecord, EffectRecord, MapRecord, MonsterRecord, MonsterTemplate, OverworldMap,
    StatsRecord, build_catalogue, validate_config,
};

#[cfg(feature = "loaders")]
pub use loaders::{
    AbilityLoader, ConfigLoader, ContentBundle, ContentFactory, MapLoader, MonsterLoader,
};
