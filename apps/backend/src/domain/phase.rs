//! Phase state machine: completion, resolution, win evaluation, advance.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::action::ActionKind;
use crate::domain::participant::ParticipantId;
use crate::domain::roles::Role;
use crate::domain::session::{Session, VoteRecord};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Strict cycle: night -> day -> vote -> night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Night,
    Day,
    Vote,
}

impl Phase {
    pub const fn next(self) -> Phase {
        match self {
            Phase::Night => Phase::Day,
            Phase::Day => Phase::Vote,
            Phase::Vote => Phase::Night,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Phase::Night => "night",
            Phase::Day => "day",
            Phase::Vote => "vote",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Terminal result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Lovers,
    AwakenedWolf,
    Village,
    Wolves,
}

/// Effects of resolving one phase.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PhaseReport {
    /// Participants who died in this resolution, in order.
    pub deaths: Vec<ParticipantId>,
    /// Vote phase only: the participant eliminated, if any.
    pub eliminated: Option<ParticipantId>,
}

/// Result of a successful [`advance`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Transition {
    pub resolved: Phase,
    pub round: u32,
    pub report: PhaseReport,
    /// `Some` when the session became terminal; the phase does not move then.
    pub outcome: Option<Outcome>,
}

/// Is the current phase ready to resolve without a timer?
pub fn is_phase_complete(session: &Session) -> bool {
    if !session.is_started() || session.is_terminal() {
        return false;
    }
    match session.phase() {
        Phase::Night => session.alive().all(|p| {
            p.role()
                .and_then(Role::required_night_action)
                .map_or(true, |kind| session.has_submitted(&p.id, kind))
        }),
        Phase::Day => session.time_left() == 0,
        Phase::Vote => session
            .alive()
            .all(|p| session.has_submitted(&p.id, ActionKind::Vote)),
    }
}

/// Apply the current phase's effects. Does not move the phase.
pub fn resolve_phase(session: &mut Session) -> PhaseReport {
    match session.phase() {
        Phase::Night => resolve_night(session),
        Phase::Day => PhaseReport::default(),
        Phase::Vote => resolve_vote(session),
    }
}

fn resolve_night(session: &mut Session) -> PhaseReport {
    let log = std::mem::take(&mut session.log);

    let protected: BTreeSet<ParticipantId> = if session.rules().guard_blocks_kills {
        log.iter()
            .filter(|a| a.kind == ActionKind::Protect)
            .filter_map(|a| a.target.clone())
            .collect()
    } else {
        BTreeSet::new()
    };

    let mut deaths: Vec<ParticipantId> = Vec::new();
    let mut killed: BTreeSet<ParticipantId> = BTreeSet::new();

    for action in log.iter().filter(|a| a.kind == ActionKind::Kill) {
        let Some(target) = &action.target else { continue };
        if protected.contains(target) {
            debug!(target = %target, "kill blocked by guard");
            continue;
        }
        if session.kill(target) {
            killed.insert(target.clone());
            deaths.push(target.clone());
        }
    }

    // A save only reverses a wolf kill from this pass.
    for target in log
        .iter()
        .filter(|a| a.kind == ActionKind::Save)
        .filter_map(|a| a.target.as_ref())
    {
        if killed.remove(target) {
            session.revive(target);
            deaths.retain(|d| d != target);
        }
    }

    // Poison is applied after saves.
    for target in log
        .iter()
        .filter(|a| a.kind == ActionKind::Poison)
        .filter_map(|a| a.target.as_ref())
    {
        if session.kill(target) {
            deaths.push(target.clone());
        }
    }

    PhaseReport {
        deaths,
        eliminated: None,
    }
}

/// Strictly highest count wins; any tie at the top eliminates nobody.
pub fn tally_votes<'a, I>(ballots: I) -> Option<ParticipantId>
where
    I: IntoIterator<Item = &'a ParticipantId>,
{
    let mut counts: BTreeMap<&ParticipantId, u32> = BTreeMap::new();
    for target in ballots {
        *counts.entry(target).or_insert(0) += 1;
    }
    let top = counts.values().copied().max()?;
    let mut leaders = counts.into_iter().filter(|(_, c)| *c == top);
    match (leaders.next(), leaders.next()) {
        (Some((winner, _)), None) => Some(winner.clone()),
        _ => None,
    }
}

fn resolve_vote(session: &mut Session) -> PhaseReport {
    let log = std::mem::take(&mut session.log);
    let ballots: Vec<(ParticipantId, ParticipantId)> = log
        .into_iter()
        .filter(|a| a.kind == ActionKind::Vote)
        // A voter shot mid-phase no longer counts.
        .filter(|a| session.participant(&a.actor).is_some_and(|p| p.alive))
        .filter_map(|a| a.target.map(|t| (a.actor, t)))
        .collect();

    let eliminated = tally_votes(ballots.iter().map(|(_, t)| t));
    let mut deaths = Vec::new();
    if let Some(target) = &eliminated {
        if session.kill(target) {
            deaths.push(target.clone());
        }
    }

    session.vote_history.push(VoteRecord {
        round: session.round(),
        ballots,
        eliminated: eliminated.clone(),
    });

    PhaseReport { deaths, eliminated }
}

/// Evaluate win conditions in precedence order.
pub fn check_game_end(session: &Session) -> Option<Outcome> {
    let alive: Vec<_> = session.alive().collect();
    let wolves: Vec<_> = alive.iter().filter(|p| p.is_wolf_aligned()).collect();
    let village = alive.len() - wolves.len();
    let lovers = alive.iter().filter(|p| p.lover).count();

    if lovers == 2 && alive.len() == 2 {
        return Some(Outcome::Lovers);
    }
    if wolves.len() == 1 && wolves[0].has_role(Role::AwakenedWolf) && village == 0 {
        return Some(Outcome::AwakenedWolf);
    }
    if wolves.is_empty() {
        return Some(Outcome::Village);
    }
    if wolves.len() >= village {
        return Some(Outcome::Wolves);
    }
    None
}

/// Record a terminal outcome if one is reached. Used after out-of-band
/// deaths such as a hunter's shot.
pub fn settle(session: &mut Session) -> Option<Outcome> {
    if session.outcome.is_none() {
        session.outcome = check_game_end(session);
    }
    session.outcome
}

/// Resolve the current phase and move to the next one.
///
/// Without `force`, an incomplete phase is rejected. A terminal session
/// accepts no further transitions.
pub fn advance(session: &mut Session, force: bool) -> Result<Transition, DomainError> {
    if !session.is_started() {
        return Err(DomainError::not_started());
    }
    if session.is_terminal() {
        return Err(DomainError::conflict(ConflictKind::GameOver, "game is over"));
    }
    if !force && !is_phase_complete(session) {
        return Err(DomainError::validation(
            ValidationKind::PhaseIncomplete,
            format!("{} phase is still waiting on actions", session.phase()),
        ));
    }

    let resolved = session.phase();
    let round = session.round();
    let report = resolve_phase(session);
    let outcome = settle(session);

    if outcome.is_none() {
        let next = resolved.next();
        if resolved == Phase::Vote {
            session.round += 1;
        }
        session.enter_phase(next);
    }

    Ok(Transition {
        resolved,
        round,
        report,
        outcome,
    })
}

/// Timer expiry: zero the clock and resolve whatever was submitted.
pub fn expire(session: &mut Session) -> Result<Transition, DomainError> {
    if session.is_started() && !session.is_terminal() {
        session.time_left = 0;
    }
    advance(session, true)
}
