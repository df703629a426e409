//! Action legality shared by session validation and the phase machine.

use crate::domain::action::ActionKind;
use crate::domain::phase::Phase;
use crate::domain::roles::Role;

/// Default phase length in seconds.
pub const DEFAULT_PHASE_SECS: u32 = 120;

/// Does `phase` accept actions of `kind`?
///
/// `shoot` is phase-independent: it fires whenever a dead hunter holds a pending shot.
pub fn phase_allows(phase: Phase, kind: ActionKind) -> bool {
    match kind {
        ActionKind::Kill
        | ActionKind::Check
        | ActionKind::Save
        | ActionKind::Poison
        | ActionKind::Protect => phase == Phase::Night,
        ActionKind::Discuss => phase == Phase::Day,
        ActionKind::Vote => phase == Phase::Vote,
        ActionKind::Shoot => true,
        ActionKind::StartGame => false,
    }
}

/// Does `role` carry the capability for `kind`?
pub fn role_allows(role: Role, kind: ActionKind) -> bool {
    match kind {
        ActionKind::Kill => role.is_wolf_aligned(),
        ActionKind::Check => role == Role::Seer,
        ActionKind::Save | ActionKind::Poison => role == Role::Witch,
        ActionKind::Protect => role == Role::Guard,
        ActionKind::Shoot => role == Role::Hunter,
        ActionKind::Vote | ActionKind::Discuss => true,
        ActionKind::StartGame => false,
    }
}

/// Night actions a role may submit, in the order synthetic actors consider them.
pub fn night_actions(role: Role) -> &'static [ActionKind] {
    match role {
        Role::Wolf | Role::AwakenedWolf => &[ActionKind::Kill],
        Role::Seer => &[ActionKind::Check],
        Role::Guard => &[ActionKind::Protect],
        Role::Witch => &[ActionKind::Save, ActionKind::Poison],
        _ => &[],
    }
}
