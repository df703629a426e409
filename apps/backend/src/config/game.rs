use std::env;
use std::str::FromStr;

use crate::domain::rules::DEFAULT_PHASE_SECS;
use crate::domain::session::{PhaseBudgets, SessionRules};
use crate::error::AppError;

/// Process-wide game settings, read once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Rooms below this size are topped up with synthetic participants on start.
    pub min_players: usize,
    pub max_players: usize,
    pub budgets: PhaseBudgets,
    pub guard_blocks_kills: bool,
    /// Base seed for deterministic rooms; `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// Arm real phase timers. Simulations and tests drive expiry by hand.
    pub timers_enabled: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            min_players: 6,
            max_players: 12,
            budgets: PhaseBudgets::default(),
            guard_blocks_kills: true,
            seed: None,
            timers_enabled: true,
        }
    }
}

impl GameConfig {
    /// Build from `WEREWOLF_*` environment variables, defaulting anything unset.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let config = Self {
            min_players: parse_var("WEREWOLF_MIN_PLAYERS")?.unwrap_or(defaults.min_players),
            max_players: parse_var("WEREWOLF_MAX_PLAYERS")?.unwrap_or(defaults.max_players),
            budgets: PhaseBudgets {
                night: parse_var("WEREWOLF_NIGHT_SECS")?.unwrap_or(DEFAULT_PHASE_SECS),
                day: parse_var("WEREWOLF_DAY_SECS")?.unwrap_or(DEFAULT_PHASE_SECS),
                vote: parse_var("WEREWOLF_VOTE_SECS")?.unwrap_or(DEFAULT_PHASE_SECS),
            },
            guard_blocks_kills: parse_var("WEREWOLF_GUARD_BLOCKS_KILLS")?
                .unwrap_or(defaults.guard_blocks_kills),
            seed: parse_var("WEREWOLF_SEED")?,
            timers_enabled: parse_var("WEREWOLF_TIMERS")?.unwrap_or(defaults.timers_enabled),
        };
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), AppError> {
        if self.max_players < self.min_players {
            return Err(AppError::config(format!(
                "WEREWOLF_MAX_PLAYERS ({}) is below WEREWOLF_MIN_PLAYERS ({})",
                self.max_players, self.min_players
            )));
        }
        if self.max_players > usize::from(u8::MAX) {
            return Err(AppError::config(format!(
                "WEREWOLF_MAX_PLAYERS ({}) exceeds {} seats",
                self.max_players,
                u8::MAX
            )));
        }
        Ok(())
    }

    pub fn session_rules(&self) -> SessionRules {
        SessionRules {
            min_players: self.min_players,
            max_players: self.max_players,
            budgets: self.budgets,
            guard_blocks_kills: self.guard_blocks_kills,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_min_players(mut self, min_players: usize) -> Self {
        self.min_players = min_players;
        self
    }

    pub fn with_budgets(mut self, budgets: PhaseBudgets) -> Self {
        self.budgets = budgets;
        self
    }

    pub fn with_timers(mut self, enabled: bool) -> Self {
        self.timers_enabled = enabled;
        self
    }
}

/// Optional environment variable parsed as `T`; malformed values are config errors.
fn parse_var<T: FromStr>(name: &str) -> Result<Option<T>, AppError> {
    match env::var(name) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has invalid value '{raw}'"))
        }),
        Err(_) => Ok(None),
    }
}
