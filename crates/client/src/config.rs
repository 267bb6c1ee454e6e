//! Client configuration read from the environment.
use std::env;
use std::path::PathBuf;

/// Startup settings for the text client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Directory holding `maps/`, `monsters/` and the optional
    /// `config.toml` / `abilities.ron`.
    pub content_dir: PathBuf,
    /// Log directory name; a timestamped one is generated when absent.
    pub session_id: Option<String>,
    /// Equipped weapon type. `None` means unarmed.
    pub weapon: Option<String>,
    pub map: String,
    pub monster: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("data"),
            session_id: None,
            weapon: Some("sword".to_string()),
            map: "zone_001".to_string(),
            monster: "slime".to_string(),
        }
    }
}

impl ClientConfig {
    /// Construct client configuration from environment variables.
    ///
    /// Environment variables:
    /// - `DUNGEON_CONTENT_DIR` - Content directory (default: `data`)
    /// - `DUNGEON_SESSION_ID` - Session/log directory name (default: generated)
    /// - `DUNGEON_WEAPON` - `sword`, `bow`, `staff` or `none` (default: `sword`)
    /// - `DUNGEON_MAP` - Map file stem under `maps/` (default: `zone_001`)
    /// - `DUNGEON_MONSTER` - Monster file stem under `monsters/` (default: `slime`)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(dir) = read_env::<PathBuf>("DUNGEON_CONTENT_DIR") {
            config.content_dir = dir;
        }
        if let Some(session_id) = read_env::<String>("DUNGEON_SESSION_ID") {
            config.session_id = Some(session_id).filter(|id| !id.is_empty());
        }
        if let Some(weapon) = read_env::<String>("DUNGEON_WEAPON") {
            config.weapon = parse_weapon(&weapon);
        }
        if let Some(map) = read_env::<String>("DUNGEON_MAP") {
            config.map = map;
        }
        if let Some(monster) = read_env::<String>("DUNGEON_MONSTER") {
            config.monster = monster;
        }

        config
    }
}

fn parse_weapon(value: &str) -> Option<String> {
    let value = value.trim().to_ascii_lowercase();
    match value.as_str() {
        "" | "none" => None,
        _ => Some(value),
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
