//! Table configuration read from the environment.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;

use tracing::level_filters::LevelFilter;

/// Session settings for the table binary.
#[derive(Debug, Clone, PartialEq)]
pub struct TableConfig {
    pub max_players: usize,
    pub bet_min: i64,
    pub bet_max: i64,
    /// Deck shuffle seed.
    pub seed: u32,
    /// Log file; `None` disables logging (stdout belongs to the table).
    pub log_path: Option<PathBuf>,
    pub log_level: LevelFilter,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            max_players: 4,
            bet_min: 1,
            bet_max: 500,
            seed: 1,
            log_path: None,
            log_level: LevelFilter::INFO,
        }
    }
}

impl TableConfig {
    /// Create from `CARD_TABLE_*` environment variables.
    ///
    /// Unset or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Like [`TableConfig::from_env`] with a custom variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let var = &var;

        let max_players = parsed(var, "CARD_TABLE_MAX_PLAYERS")
            .filter(|n: &usize| *n > 0)
            .unwrap_or(defaults.max_players);
        let mut bet_min = parsed(var, "CARD_TABLE_BET_MIN").unwrap_or(defaults.bet_min);
        let mut bet_max = parsed(var, "CARD_TABLE_BET_MAX").unwrap_or(defaults.bet_max);
        if bet_max < bet_min {
            std::mem::swap(&mut bet_min, &mut bet_max);
        }
        let seed = parsed(var, "CARD_TABLE_SEED").unwrap_or(defaults.seed);

        let log_path = var("CARD_TABLE_LOG_PATH")
            .map(|s| s.trim().to_string())
            .and_then(|s| if s.is_empty() { None } else { Some(PathBuf::from(s)) });
        let log_level = parsed(var, "CARD_TABLE_LOG_LEVEL").unwrap_or(defaults.log_level);

        Self {
            max_players,
            bet_min,
            bet_max,
            seed,
            log_path,
            log_level,
        }
    }
}

fn parsed<T: FromStr>(var: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    var(key).and_then(|s| s.trim().parse().ok())
}
