//! Shared types for the simulator.

use clap::ValueEnum;
use werewolf_backend::domain::participant::Profile;
use werewolf_backend::domain::roles::GameMode;

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Jsonl,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    Classic,
    Standard,
    Extended,
}

impl From<ModeArg> for GameMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Classic => GameMode::Classic,
            ModeArg::Standard => GameMode::Standard,
            ModeArg::Extended => GameMode::Extended,
        }
    }
}

/// Profile for every seat, or `mixed` to rotate through all of them.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ProfileArg {
    Aggressive,
    Cautious,
    Strategic,
    Baseline,
    Mixed,
}

impl ProfileArg {
    pub fn for_seat(self, seat: usize) -> Profile {
        match self {
            ProfileArg::Aggressive => Profile::Aggressive,
            ProfileArg::Cautious => Profile::Cautious,
            ProfileArg::Strategic => Profile::Strategic,
            ProfileArg::Baseline => Profile::Baseline,
            ProfileArg::Mixed => Profile::ALL[seat % Profile::ALL.len()],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ProfileArg::Mixed => "mixed",
            other => other.for_seat(0).as_str(),
        }
    }
}
