//! What a synthetic actor can see of the session.
//!
//! Everything here is derived from public facts (roster, transcript, vote
//! history, current ballots) plus the actor's own private knowledge. The
//! witch and the wolves additionally see tonight's recorded kills.

use std::collections::BTreeMap;

use rand::seq::IndexedRandom;

use crate::ai::DecisionRng;
use crate::domain::action::ActionKind;
use crate::domain::participant::{Participant, ParticipantId};
use crate::domain::phase::Phase;
use crate::domain::roles::{Faction, Role};
use crate::domain::session::Session;
use crate::domain::skills::SkillLedger;

pub struct ActorView<'a> {
    session: &'a Session,
    me: &'a Participant,
    role: Role,
    known: Option<&'a BTreeMap<ParticipantId, Role>>,
}

impl<'a> ActorView<'a> {
    pub fn new(session: &'a Session, actor: &ParticipantId) -> Option<Self> {
        let me = session.participant(actor)?;
        let role = me.role()?;
        Some(Self {
            session,
            me,
            role,
            known: session.knowledge_of(actor),
        })
    }

    pub fn id(&self) -> &ParticipantId {
        &self.me.id
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn round(&self) -> u32 {
        self.session.round()
    }

    pub fn alive_count(&self) -> usize {
        self.session.alive().count()
    }

    pub fn ledger(&self) -> Option<&'a SkillLedger> {
        self.session.skill_ledger_for(&self.me.id)
    }

    pub fn known_role(&self, id: &ParticipantId) -> Option<Role> {
        self.known.and_then(|k| k.get(id).copied())
    }

    fn my_faction(&self) -> Faction {
        self.role.faction()
    }

    /// Known to sit on the other side.
    pub fn is_known_hostile(&self, id: &ParticipantId) -> bool {
        self.known_role(id)
            .is_some_and(|r| r.faction() != self.my_faction())
    }

    /// Known to sit on the same side.
    pub fn is_known_friendly(&self, id: &ParticipantId) -> bool {
        self.known_role(id)
            .is_some_and(|r| r.faction() == self.my_faction())
    }

    /// Living participants other than the actor.
    pub fn others(&self) -> Vec<&'a Participant> {
        self.session
            .alive()
            .filter(|p| p.id != self.me.id)
            .collect()
    }

    /// Others minus anyone the actor knows to be an ally.
    pub fn opponents(&self) -> Vec<&'a Participant> {
        self.others()
            .into_iter()
            .filter(|p| !self.is_known_friendly(&p.id))
            .collect()
    }

    /// Others whose role the actor has not learned.
    pub fn unknowns(&self) -> Vec<&'a Participant> {
        self.others()
            .into_iter()
            .filter(|p| self.known_role(&p.id).is_none())
            .collect()
    }

    /// Tonight's kill targets. Empty for anyone but the wolves and the witch.
    pub fn tonight_victims(&self) -> Vec<&'a ParticipantId> {
        if self.session.phase() != Phase::Night {
            return Vec::new();
        }
        if self.role.is_wolf_aligned() || self.role == Role::Witch {
            self.session.pending_kills()
        } else {
            Vec::new()
        }
    }

    /// Day phases the actor has lived through, including the current one.
    pub fn days_elapsed(&self) -> u32 {
        match self.session.phase() {
            Phase::Night => self.round().saturating_sub(1),
            Phase::Day | Phase::Vote => self.round(),
        }
    }

    pub fn speech_count(&self, id: &ParticipantId) -> usize {
        self.session
            .transcript()
            .iter()
            .filter(|l| &l.speaker == id)
            .count()
    }

    /// Has `id` spoken in at least every other day so far?
    pub fn is_active(&self, id: &ParticipantId) -> bool {
        let days = self.days_elapsed() as usize;
        days == 0 || self.speech_count(id) * 2 >= days
    }

    pub fn spoke_today(&self) -> bool {
        let round = self.round();
        self.session
            .transcript()
            .iter()
            .any(|l| l.round == round && l.speaker == self.me.id)
    }

    pub fn votes_received(&self, id: &ParticipantId) -> usize {
        self.session
            .vote_history()
            .iter()
            .flat_map(|r| r.ballots.iter())
            .filter(|(_, target)| target == id)
            .count()
    }

    /// Past ballots `id` cast against participants the actor trusts.
    fn votes_against_friends(&self, id: &ParticipantId) -> usize {
        self.session
            .vote_history()
            .iter()
            .flat_map(|r| r.ballots.iter())
            .filter(|(voter, target)| {
                voter == id && (target == &self.me.id || self.is_known_friendly(target))
            })
            .count()
    }

    /// Heuristic suspicion score; higher is more likely hostile.
    pub fn suspicion(&self, id: &ParticipantId) -> u32 {
        if self.is_known_hostile(id) {
            return 100;
        }
        if self.is_known_friendly(id) {
            return 0;
        }
        let mut score = 10 * self.votes_against_friends(id) as u32;
        if !self.is_active(id) {
            score += 3;
        }
        score + self.votes_received(id) as u32
    }

    /// Known special role, or a loud voice at the table.
    pub fn is_important(&self, id: &ParticipantId) -> bool {
        matches!(
            self.known_role(id),
            Some(Role::Seer | Role::Witch | Role::Guard | Role::Hunter)
        ) || self.speech_count(id) > self.days_elapsed() as usize
    }

    /// Leading target among ballots already cast this vote phase, if it
    /// holds at least a third of the living table.
    pub fn popular_vote_target(&self) -> Option<ParticipantId> {
        if self.session.phase() != Phase::Vote {
            return None;
        }
        let mut counts: BTreeMap<&ParticipantId, usize> = BTreeMap::new();
        for action in self.session.action_log() {
            if action.kind == ActionKind::Vote {
                if let Some(target) = &action.target {
                    *counts.entry(target).or_default() += 1;
                }
            }
        }
        let threshold = self.alive_count().div_ceil(3);
        counts
            .into_iter()
            .filter(|(id, c)| *c >= threshold && *id != &self.me.id)
            .max_by_key(|(_, c)| *c)
            .map(|(id, _)| id.clone())
    }
}

/// Uniform choice.
pub fn pick_any(candidates: &[&Participant], rng: &mut DecisionRng) -> Option<ParticipantId> {
    candidates.choose(rng).map(|p| p.id.clone())
}

/// Highest score wins; ties broken uniformly.
pub fn pick_max_by<F>(
    candidates: &[&Participant],
    rng: &mut DecisionRng,
    score: F,
) -> Option<ParticipantId>
where
    F: Fn(&Participant) -> i64,
{
    let best = candidates.iter().map(|p| score(p)).max()?;
    let top: Vec<&Participant> = candidates
        .iter()
        .copied()
        .filter(|p| score(p) == best)
        .collect();
    pick_any(&top, rng)
}
