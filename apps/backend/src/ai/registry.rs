//! Registered decision strategies.
//!
//! 1) Implement `Strategy` for a unit type in its own module.
//! 2) Add a `StrategyEntry` with a stable `name` and `version`.
//! 3) Extend `strategy_for`, the only place a profile becomes behavior.

use crate::ai::{Aggressive, Baseline, Cautious, Strategic, Strategy};
use crate::domain::participant::Profile;

/// Metadata for a registered strategy.
pub struct StrategyEntry {
    pub name: &'static str,
    pub version: &'static str,
    pub profile: Profile,
}

static STRATEGIES: &[StrategyEntry] = &[
    StrategyEntry {
        name: Aggressive::NAME,
        version: Aggressive::VERSION,
        profile: Profile::Aggressive,
    },
    StrategyEntry {
        name: Cautious::NAME,
        version: Cautious::VERSION,
        profile: Profile::Cautious,
    },
    StrategyEntry {
        name: Strategic::NAME,
        version: Strategic::VERSION,
        profile: Profile::Strategic,
    },
    StrategyEntry {
        name: Baseline::NAME,
        version: Baseline::VERSION,
        profile: Profile::Baseline,
    },
];

/// Returns the statically registered strategies.
pub fn registered_strategies() -> &'static [StrategyEntry] {
    STRATEGIES
}

/// Finds a registered strategy by its name.
pub fn by_name(name: &str) -> Option<&'static StrategyEntry> {
    registered_strategies()
        .iter()
        .find(|entry| entry.name.eq_ignore_ascii_case(name))
}

static AGGRESSIVE: Aggressive = Aggressive;
static CAUTIOUS: Cautious = Cautious;
static STRATEGIC: Strategic = Strategic;
static BASELINE: Baseline = Baseline;

/// Single dispatch point from profile to implementation.
pub fn strategy_for(profile: Profile) -> &'static dyn Strategy {
    match profile {
        Profile::Aggressive => &AGGRESSIVE,
        Profile::Cautious => &CAUTIOUS,
        Profile::Strategic => &STRATEGIC,
        Profile::Baseline => &BASELINE,
    }
}
