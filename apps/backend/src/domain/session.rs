//! Authoritative per-room game record.
//!
//! `Session` owns the roster, phase/round counters, the current phase's
//! action log and every piece of private knowledge participants have
//! accumulated. Validation lives here; resolution is deferred to
//! [`crate::domain::phase`].

use std::collections::{BTreeMap, BTreeSet};

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::domain::action::{Action, ActionKind, ActionRequest};
use crate::domain::participant::{Participant, ParticipantId, RoomId};
use crate::domain::phase::{Outcome, Phase};
use crate::domain::roles::{GameMode, Role};
use crate::domain::rules::{phase_allows, role_allows, DEFAULT_PHASE_SECS};
use crate::domain::skills::{self, SkillLedger};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Per-phase time budgets in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PhaseBudgets {
    pub night: u32,
    pub day: u32,
    pub vote: u32,
}

impl Default for PhaseBudgets {
    fn default() -> Self {
        Self {
            night: DEFAULT_PHASE_SECS,
            day: DEFAULT_PHASE_SECS,
            vote: DEFAULT_PHASE_SECS,
        }
    }
}

impl PhaseBudgets {
    pub fn for_phase(&self, phase: Phase) -> u32 {
        match phase {
            Phase::Night => self.night,
            Phase::Day => self.day,
            Phase::Vote => self.vote,
        }
    }
}

/// Knobs fixed at session creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionRules {
    /// Configured minimum; the mode's own minimum still applies on top.
    pub min_players: usize,
    pub max_players: usize,
    pub budgets: PhaseBudgets,
    /// A guard's protection cancels that night's kills on the protected target.
    pub guard_blocks_kills: bool,
}

impl Default for SessionRules {
    fn default() -> Self {
        Self {
            min_players: 6,
            max_players: 12,
            budgets: PhaseBudgets::default(),
            guard_blocks_kills: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscussionLine {
    pub round: u32,
    pub speaker: ParticipantId,
    pub text: String,
}

/// Ballots and result of one resolved vote phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VoteRecord {
    pub round: u32,
    /// (voter, target) in submission order.
    pub ballots: Vec<(ParticipantId, ParticipantId)>,
    pub eliminated: Option<ParticipantId>,
}

/// What a successful submission produced for the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Recorded,
    /// Seer result; must only ever be delivered to the seer.
    Revealed { target: ParticipantId, role: Role },
    /// Hunter's shot applied immediately.
    Shot { target: ParticipantId },
}

#[derive(Debug, Clone)]
pub struct Session {
    pub(crate) room_id: RoomId,
    pub(crate) mode: GameMode,
    pub(crate) rules: SessionRules,
    pub(crate) roster: Vec<Participant>,
    pub(crate) phase: Phase,
    /// Starts at 1; moves only on vote -> night.
    pub(crate) round: u32,
    pub(crate) time_budget: u32,
    pub(crate) time_left: u32,
    /// Current phase's actions; cleared when night or vote resolves.
    pub(crate) log: Vec<Action>,
    pub(crate) started: bool,
    pub(crate) outcome: Option<Outcome>,
    pub(crate) ledgers: BTreeMap<ParticipantId, SkillLedger>,
    /// Roles each participant has learned about others.
    pub(crate) knowledge: BTreeMap<ParticipantId, BTreeMap<ParticipantId, Role>>,
    pub(crate) transcript: Vec<DiscussionLine>,
    pub(crate) vote_history: Vec<VoteRecord>,
    /// Dead hunters still owed their final shot.
    pub(crate) pending_shots: BTreeSet<ParticipantId>,
    /// Bumped on every phase entry; timers compare against it.
    pub(crate) phase_epoch: u64,
}

impl Session {
    pub fn new(room_id: RoomId, mode: GameMode, rules: SessionRules) -> Self {
        Self {
            room_id,
            mode,
            rules,
            roster: Vec::new(),
            phase: Phase::Night,
            round: 1,
            time_budget: rules.budgets.night,
            time_left: rules.budgets.night,
            log: Vec::new(),
            started: false,
            outcome: None,
            ledgers: BTreeMap::new(),
            knowledge: BTreeMap::new(),
            transcript: Vec::new(),
            vote_history: Vec::new(),
            pending_shots: BTreeSet::new(),
            phase_epoch: 0,
        }
    }

    pub fn with_roster(
        room_id: RoomId,
        mode: GameMode,
        rules: SessionRules,
        roster: Vec<Participant>,
    ) -> Result<Self, DomainError> {
        let mut session = Self::new(room_id, mode, rules);
        for participant in roster {
            session.join(participant)?;
        }
        Ok(session)
    }

    pub fn room_id(&self) -> &RoomId {
        &self.room_id
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn rules(&self) -> &SessionRules {
        &self.rules
    }

    pub fn roster(&self) -> &[Participant] {
        &self.roster
    }

    pub fn participant(&self, id: &ParticipantId) -> Option<&Participant> {
        self.roster.iter().find(|p| &p.id == id)
    }

    pub fn alive(&self) -> impl Iterator<Item = &Participant> {
        self.roster.iter().filter(|p| p.alive)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn time_budget(&self) -> u32 {
        self.time_budget
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn phase_epoch(&self) -> u64 {
        self.phase_epoch
    }

    pub fn action_log(&self) -> &[Action] {
        &self.log
    }

    pub fn transcript(&self) -> &[DiscussionLine] {
        &self.transcript
    }

    pub fn vote_history(&self) -> &[VoteRecord] {
        &self.vote_history
    }

    pub fn pending_shots(&self) -> &BTreeSet<ParticipantId> {
        &self.pending_shots
    }

    pub fn skill_ledger_for(&self, id: &ParticipantId) -> Option<&SkillLedger> {
        self.ledgers.get(id)
    }

    /// Roles `viewer` has learned about other participants.
    pub fn knowledge_of(&self, viewer: &ParticipantId) -> Option<&BTreeMap<ParticipantId, Role>> {
        self.knowledge.get(viewer)
    }

    /// Effective roster minimum for this session.
    pub fn required_players(&self) -> usize {
        self.rules.min_players.max(self.mode.minimum_players())
    }

    /// Has `actor` already recorded a `kind` action in the current phase?
    pub fn has_submitted(&self, actor: &ParticipantId, kind: ActionKind) -> bool {
        self.log.iter().any(|a| &a.actor == actor && a.kind == kind)
    }

    /// Targets of tonight's recorded kills, in submission order.
    pub fn pending_kills(&self) -> Vec<&ParticipantId> {
        self.log
            .iter()
            .filter(|a| a.kind == ActionKind::Kill)
            .filter_map(|a| a.target.as_ref())
            .collect()
    }

    pub fn join(&mut self, mut participant: Participant) -> Result<(), DomainError> {
        if self.started {
            return Err(DomainError::conflict(
                ConflictKind::GameAlreadyStarted,
                "roster is fixed once the game has started",
            ));
        }
        if self.roster.len() >= self.rules.max_players {
            return Err(DomainError::validation(
                ValidationKind::RoomFull,
                format!("room {} is full", self.room_id),
            ));
        }
        if self.participant(&participant.id).is_some() {
            return Err(DomainError::conflict(
                ConflictKind::Other("ALREADY_SEATED".into()),
                format!("{} is already seated", participant.id),
            ));
        }
        participant.seat = u8::try_from(self.roster.len()).map_err(|_| {
            DomainError::validation(
                ValidationKind::RoomFull,
                format!("room {} has no seat numbers left", self.room_id),
            )
        })?;
        participant.alive = true;
        self.roster.push(participant);
        Ok(())
    }

    /// Deal the mode's roles in random seat order and enter the first night.
    pub fn start<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Result<(), DomainError> {
        self.ensure_startable()?;
        let mut roles = self.mode.compose_roles(self.roster.len())?;
        roles.shuffle(rng);
        self.start_with_roles(roles)
    }

    /// Start with an explicit seat-ordered role list.
    pub fn start_with_roles(&mut self, roles: Vec<Role>) -> Result<(), DomainError> {
        self.ensure_startable()?;
        if roles.len() != self.roster.len() {
            return Err(DomainError::validation(
                ValidationKind::Other("ROLE_COUNT_MISMATCH".into()),
                format!("{} roles for {} seats", roles.len(), self.roster.len()),
            ));
        }

        for (participant, role) in self.roster.iter_mut().zip(roles) {
            participant.assign_role(role)?;
            if role == Role::Witch {
                self.ledgers
                    .insert(participant.id.clone(), SkillLedger::default());
            }
        }

        let wolves: Vec<(ParticipantId, Role)> = self
            .roster
            .iter()
            .filter_map(|p| p.role().filter(|r| r.is_wolf_aligned()).map(|r| (p.id.clone(), r)))
            .collect();
        for (wolf, _) in &wolves {
            for (ally, role) in &wolves {
                if ally != wolf {
                    self.learn(wolf, ally, *role);
                }
            }
        }

        self.started = true;
        self.round = 1;
        self.enter_phase(Phase::Night);
        Ok(())
    }

    fn ensure_startable(&self) -> Result<(), DomainError> {
        if self.started {
            return Err(DomainError::conflict(
                ConflictKind::GameAlreadyStarted,
                format!("room {} already started", self.room_id),
            ));
        }
        let required = self.required_players();
        if self.roster.len() < required {
            return Err(DomainError::validation(
                ValidationKind::InsufficientPlayers,
                format!("need {required} players, have {}", self.roster.len()),
            ));
        }
        Ok(())
    }

    /// Bind two participants as lovers; they learn each other's roles.
    pub fn pair_lovers(&mut self, a: &ParticipantId, b: &ParticipantId) -> Result<(), DomainError> {
        if !self.started {
            return Err(DomainError::not_started());
        }
        if a == b {
            return Err(DomainError::invalid_target("a participant cannot be paired with themselves"));
        }
        if self.roster.iter().any(|p| p.lover) {
            return Err(DomainError::conflict(
                ConflictKind::Other("LOVERS_PAIRED".into()),
                "lovers are already paired",
            ));
        }
        let role_a = self.require(a)?.role();
        let role_b = self.require(b)?.role();
        for p in self.roster.iter_mut().filter(|p| &p.id == a || &p.id == b) {
            p.lover = true;
        }
        if let Some(role) = role_b {
            self.learn(a, b, role);
        }
        if let Some(role) = role_a {
            self.learn(b, a, role);
        }
        Ok(())
    }

    /// Run every check `submit_action` would, without mutating anything.
    pub fn validate(&self, req: &ActionRequest) -> Result<(), DomainError> {
        if req.kind == ActionKind::StartGame {
            return Err(DomainError::invalid_action(
                "start_game is handled by the room, not the session",
            ));
        }
        if !self.started {
            return Err(DomainError::not_started());
        }
        if self.outcome.is_some() {
            return Err(DomainError::conflict(ConflictKind::GameOver, "game is over"));
        }

        let actor = self.require(&req.actor)?;
        let role = actor.role().ok_or_else(DomainError::not_started)?;

        if req.kind == ActionKind::Shoot {
            if role != Role::Hunter {
                return Err(DomainError::invalid_action(format!("{role} cannot shoot")));
            }
            if !self.pending_shots.contains(&actor.id) {
                return Err(DomainError::invalid_action("no shot available"));
            }
        } else {
            if !actor.alive {
                return Err(DomainError::invalid_action("dead participants cannot act"));
            }
            if !role_allows(role, req.kind) {
                return Err(DomainError::invalid_action(format!("{role} cannot {}", req.kind)));
            }
            if !phase_allows(self.phase, req.kind) {
                return Err(DomainError::invalid_action(format!(
                    "{} is not allowed during {}",
                    req.kind, self.phase
                )));
            }
        }

        if req.kind.requires_target() {
            let target_id = req
                .target
                .as_ref()
                .ok_or_else(|| DomainError::invalid_target(format!("{} needs a target", req.kind)))?;
            let target = self.require(target_id)?;
            if !target.alive {
                return Err(DomainError::invalid_target(format!("{target_id} is dead")));
            }
            if target_id == &actor.id && !req.kind.allows_self_target() {
                return Err(DomainError::invalid_target(format!(
                    "{} cannot target yourself",
                    req.kind
                )));
            }
            if req.kind == ActionKind::Kill && target.is_wolf_aligned() {
                return Err(DomainError::invalid_target(
                    "wolves cannot target wolf-aligned participants",
                ));
            }
        } else if req.kind == ActionKind::Discuss
            && req.content.as_deref().map_or(true, |c| c.trim().is_empty())
        {
            return Err(DomainError::invalid_action("discussion needs content"));
        }

        if req.kind.is_decisive()
            && req.kind != ActionKind::Shoot
            && self.has_submitted(&req.actor, req.kind)
        {
            return Err(DomainError::validation(
                ValidationKind::DuplicateAction,
                format!("{} already submitted {} this phase", req.actor, req.kind),
            ));
        }

        if matches!(req.kind, ActionKind::Save | ActionKind::Poison) {
            let used = self
                .ledgers
                .get(&req.actor)
                .is_some_and(|ledger| ledger.is_used(req.kind));
            if used {
                return Err(DomainError::conflict(
                    ConflictKind::SkillAlreadyUsed,
                    format!("{} potion already used", req.kind),
                ));
            }
        }

        Ok(())
    }

    /// Validate and record one action. Rejected actions leave no trace.
    pub fn submit_action(&mut self, req: ActionRequest) -> Result<ActionOutcome, DomainError> {
        self.validate(&req)?;

        let outcome = match req.kind {
            ActionKind::Shoot => {
                let target = required_target(&req)?;
                skills::use_hunter(self, &req.actor, &target)?;
                // Applied immediately; never enters the phase log.
                return Ok(ActionOutcome::Shot { target });
            }
            ActionKind::Check => {
                let target = required_target(&req)?;
                let role = skills::use_seer(self, &req.actor, &target)?;
                ActionOutcome::Revealed { target, role }
            }
            ActionKind::Save | ActionKind::Poison => {
                let target = required_target(&req)?;
                skills::use_witch(self, &req.actor, &target, req.kind)?;
                ActionOutcome::Recorded
            }
            ActionKind::Protect => {
                let target = required_target(&req)?;
                skills::use_guard(self, &req.actor, &target)?;
                ActionOutcome::Recorded
            }
            ActionKind::Discuss => {
                self.transcript.push(DiscussionLine {
                    round: self.round,
                    speaker: req.actor.clone(),
                    text: req.content.clone().unwrap_or_default(),
                });
                ActionOutcome::Recorded
            }
            _ => ActionOutcome::Recorded,
        };

        self.log.push(Action::stamp(req));
        Ok(outcome)
    }

    pub(crate) fn require(&self, id: &ParticipantId) -> Result<&Participant, DomainError> {
        self.participant(id)
            .ok_or_else(|| DomainError::unknown_participant(id))
    }

    pub(crate) fn participant_mut(&mut self, id: &ParticipantId) -> Option<&mut Participant> {
        self.roster.iter_mut().find(|p| &p.id == id)
    }

    /// Mark `id` dead. Returns false when already dead.
    pub(crate) fn kill(&mut self, id: &ParticipantId) -> bool {
        let Some(p) = self.participant_mut(id) else {
            return false;
        };
        if !p.alive {
            return false;
        }
        p.alive = false;
        if p.has_role(Role::Hunter) {
            self.pending_shots.insert(id.clone());
        }
        true
    }

    /// Undo a kill made earlier in the same resolution pass.
    pub(crate) fn revive(&mut self, id: &ParticipantId) {
        if let Some(p) = self.participant_mut(id) {
            p.alive = true;
        }
        self.pending_shots.remove(id);
    }

    pub(crate) fn learn(&mut self, viewer: &ParticipantId, subject: &ParticipantId, role: Role) {
        self.knowledge
            .entry(viewer.clone())
            .or_default()
            .insert(subject.clone(), role);
    }

    pub(crate) fn enter_phase(&mut self, phase: Phase) {
        self.phase = phase;
        self.time_budget = self.rules.budgets.for_phase(phase);
        self.time_left = self.time_budget;
        self.phase_epoch = self.phase_epoch.wrapping_add(1);
    }
}

fn required_target(req: &ActionRequest) -> Result<ParticipantId, DomainError> {
    req.target
        .clone()
        .ok_or_else(|| DomainError::invalid_target(format!("{} needs a target", req.kind)))
}
