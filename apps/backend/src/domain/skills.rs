//! Skill manager: gates for actions that consume or depend on a role's
//! scarce capability.
//!
//! Every entry point checks role identity strictly. A mismatch is a
//! `RoleMismatch` validation failure, never a best-effort fallback.

use serde::Serialize;

use crate::domain::action::ActionKind;
use crate::domain::participant::ParticipantId;
use crate::domain::roles::Role;
use crate::domain::session::Session;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// Witch potion usage. Each slot is set at most once per session and
/// remembers the target chosen when it was spent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SkillLedger {
    pub save: Option<ParticipantId>,
    pub poison: Option<ParticipantId>,
}

impl SkillLedger {
    pub fn save_used(&self) -> bool {
        self.save.is_some()
    }

    pub fn poison_used(&self) -> bool {
        self.poison.is_some()
    }

    pub fn is_used(&self, kind: ActionKind) -> bool {
        match kind {
            ActionKind::Save => self.save_used(),
            ActionKind::Poison => self.poison_used(),
            _ => false,
        }
    }
}

fn require_role(
    session: &Session,
    actor: &ParticipantId,
    role: Role,
) -> Result<(), DomainError> {
    let participant = session.require(actor)?;
    if participant.has_role(role) {
        Ok(())
    } else {
        Err(DomainError::validation(
            ValidationKind::RoleMismatch,
            format!("{actor} is not a {role}"),
        ))
    }
}

fn require_target(session: &Session, target: &ParticipantId) -> Result<Role, DomainError> {
    session
        .require(target)?
        .role()
        .ok_or_else(DomainError::not_started)
}

/// Reveal `target`'s role to the seer and remember it as their knowledge.
pub fn use_seer(
    session: &mut Session,
    seer: &ParticipantId,
    target: &ParticipantId,
) -> Result<Role, DomainError> {
    require_role(session, seer, Role::Seer)?;
    let role = require_target(session, target)?;
    session.learn(seer, target, role);
    Ok(role)
}

/// Spend a witch potion. `kind` must be save or poison.
pub fn use_witch(
    session: &mut Session,
    witch: &ParticipantId,
    target: &ParticipantId,
    kind: ActionKind,
) -> Result<(), DomainError> {
    require_role(session, witch, Role::Witch)?;
    require_target(session, target)?;

    let ledger = session.ledgers.entry(witch.clone()).or_default();
    let slot = match kind {
        ActionKind::Save => &mut ledger.save,
        ActionKind::Poison => &mut ledger.poison,
        other => {
            return Err(DomainError::validation(
                ValidationKind::InvalidSkillKind,
                format!("{other} is not a witch potion"),
            ))
        }
    };
    if slot.is_some() {
        return Err(DomainError::conflict(
            ConflictKind::SkillAlreadyUsed,
            format!("{kind} potion already used"),
        ));
    }
    *slot = Some(target.clone());
    Ok(())
}

/// Fire the hunter's final shot. Applied at once, outside phase resolution.
pub fn use_hunter(
    session: &mut Session,
    hunter: &ParticipantId,
    target: &ParticipantId,
) -> Result<(), DomainError> {
    require_role(session, hunter, Role::Hunter)?;
    require_target(session, target)?;
    session.pending_shots.remove(hunter);
    session.kill(target);
    Ok(())
}

/// Validate a guard's protection. The effect is read back from the
/// night log during resolution.
pub fn use_guard(
    session: &mut Session,
    guard: &ParticipantId,
    target: &ParticipantId,
) -> Result<(), DomainError> {
    require_role(session, guard, Role::Guard)?;
    require_target(session, target)?;
    Ok(())
}
