//! Roles, factions and the role composition per game mode.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::action::ActionKind;
use crate::errors::domain::{DomainError, ValidationKind};

/// Fixed role enumeration. A participant's role is assigned once at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Villager,
    Wolf,
    /// Wolf that can win alone once every other participant is gone.
    AwakenedWolf,
    Seer,
    Witch,
    Hunter,
    Guard,
    /// Pairs two participants as lovers at game start.
    Matchmaker,
    Thief,
}

/// Win-arithmetic grouping. Lovers cut across both and are tracked per participant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Faction {
    Wolves,
    Village,
}

impl Role {
    pub const fn faction(self) -> Faction {
        match self {
            Role::Wolf | Role::AwakenedWolf => Faction::Wolves,
            _ => Faction::Village,
        }
    }

    #[inline]
    pub const fn is_wolf_aligned(self) -> bool {
        matches!(self.faction(), Faction::Wolves)
    }

    /// Night action that must be submitted before the night can complete.
    ///
    /// The witch is absent on purpose: declining both potions is a valid night.
    pub const fn required_night_action(self) -> Option<ActionKind> {
        match self {
            Role::Wolf | Role::AwakenedWolf => Some(ActionKind::Kill),
            Role::Seer => Some(ActionKind::Check),
            Role::Guard => Some(ActionKind::Protect),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Role::Villager => "villager",
            Role::Wolf => "wolf",
            Role::AwakenedWolf => "awakened_wolf",
            Role::Seer => "seer",
            Role::Witch => "witch",
            Role::Hunter => "hunter",
            Role::Guard => "guard",
            Role::Matchmaker => "matchmaker",
            Role::Thief => "thief",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured mode; determines which special roles are dealt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    /// Two wolves, seer, witch; everyone else a villager.
    #[default]
    Classic,
    /// Classic plus hunter and guard.
    Standard,
    /// One wolf, awakened wolf, seer, witch, hunter, guard, matchmaker.
    Extended,
}

impl GameMode {
    pub const ALL: [GameMode; 3] = [GameMode::Classic, GameMode::Standard, GameMode::Extended];

    pub fn special_roles(self) -> &'static [Role] {
        match self {
            GameMode::Classic => &[Role::Wolf, Role::Wolf, Role::Seer, Role::Witch],
            GameMode::Standard => &[
                Role::Wolf,
                Role::Wolf,
                Role::Seer,
                Role::Witch,
                Role::Hunter,
                Role::Guard,
            ],
            GameMode::Extended => &[
                Role::Wolf,
                Role::AwakenedWolf,
                Role::Seer,
                Role::Witch,
                Role::Hunter,
                Role::Guard,
                Role::Matchmaker,
            ],
        }
    }

    /// Smallest roster that seats every special role and leaves wolves
    /// outnumbered at the start.
    pub fn minimum_players(self) -> usize {
        let specials = self.special_roles();
        let wolves = specials.iter().filter(|r| r.is_wolf_aligned()).count();
        specials.len().max(2 * wolves + 1)
    }

    /// Role multiset for a roster of `players`, specials first, villagers after.
    pub fn compose_roles(self, players: usize) -> Result<Vec<Role>, DomainError> {
        let min = self.minimum_players();
        if players < min {
            return Err(DomainError::validation(
                ValidationKind::InsufficientPlayers,
                format!("{self} mode needs at least {min} players, got {players}"),
            ));
        }
        let mut roles = self.special_roles().to_vec();
        roles.resize(players, Role::Villager);
        Ok(roles)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            GameMode::Classic => "classic",
            GameMode::Standard => "standard",
            GameMode::Extended => "extended",
        }
    }
}

impl fmt::Display for GameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GameMode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "classic" => Ok(GameMode::Classic),
            "standard" => Ok(GameMode::Standard),
            "extended" => Ok(GameMode::Extended),
            other => Err(DomainError::validation(
                ValidationKind::Other("UNKNOWN_MODE".into()),
                format!("unknown game mode '{other}'"),
            )),
        }
    }
}
