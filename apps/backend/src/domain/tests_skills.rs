use crate::domain::action::{ActionKind, ActionRequest};
use crate::domain::phase::{self, Phase};
use crate::domain::roles::{GameMode, Role};
use crate::domain::session::ActionOutcome;
use crate::domain::skills::{use_guard, use_hunter, use_seer, use_witch};
use crate::domain::test_prelude::{act, classic_six, pid, started};
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};

fn standard_six() -> crate::domain::session::Session {
    // p0 p1 wolves, p2 seer, p3 witch, p4 hunter, p5 guard
    started(
        GameMode::Standard,
        &[
            Role::Wolf,
            Role::Wolf,
            Role::Seer,
            Role::Witch,
            Role::Hunter,
            Role::Guard,
        ],
    )
}

/// Night -> day -> vote -> night, resolving whatever was submitted.
fn skip_to_next_night(session: &mut crate::domain::session::Session) {
    for _ in 0..3 {
        phase::expire(session).unwrap();
    }
    assert_eq!(session.phase(), Phase::Night);
}

#[test]
fn skill_setters_check_role_identity() {
    let mut session = classic_six();
    let err = use_seer(&mut session, &pid("p4"), &pid("p0")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RoleMismatch, _)
    ));
    let err = use_witch(&mut session, &pid("p2"), &pid("p0"), ActionKind::Save).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RoleMismatch, _)
    ));
    let err = use_hunter(&mut session, &pid("p2"), &pid("p0")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RoleMismatch, _)
    ));
    let err = use_guard(&mut session, &pid("p2"), &pid("p0")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::RoleMismatch, _)
    ));
}

#[test]
fn skill_setters_reject_unknown_targets() {
    let mut session = classic_six();
    let err = use_seer(&mut session, &pid("p2"), &pid("zed")).unwrap_err();
    assert!(matches!(
        err,
        DomainError::NotFound(NotFoundKind::Participant, _)
    ));
}

#[test]
fn witch_rejects_non_potion_kinds() {
    let mut session = classic_six();
    let err = use_witch(&mut session, &pid("p3"), &pid("p0"), ActionKind::Kill).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidSkillKind, _)
    ));
    let ledger = session.skill_ledger_for(&pid("p3")).unwrap();
    assert!(!ledger.save_used() && !ledger.poison_used());
}

#[test]
fn witch_potions_are_single_use_for_the_whole_session() {
    let mut session = classic_six();
    act(&mut session, "p3", ActionKind::Save, "p4");
    assert_eq!(
        session.skill_ledger_for(&pid("p3")).unwrap().save,
        Some(pid("p4"))
    );

    skip_to_next_night(&mut session);
    assert_eq!(session.phase(), Phase::Night);
    assert_eq!(session.round(), 2);

    let err = session
        .submit_action(ActionRequest::targeted(&pid("p3"), ActionKind::Save, &pid("p5")))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::SkillAlreadyUsed, _)
    ));
    assert_eq!(err.code(), crate::errors::ErrorCode::SkillAlreadyUsed);

    act(&mut session, "p3", ActionKind::Poison, "p0");
    skip_to_next_night(&mut session);
    let err = session
        .submit_action(ActionRequest::targeted(&pid("p3"), ActionKind::Poison, &pid("p1")))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Conflict(ConflictKind::SkillAlreadyUsed, _)
    ));
}

#[test]
fn save_reverses_only_this_nights_kill() {
    let mut session = classic_six();
    act(&mut session, "p0", ActionKind::Kill, "p4");
    act(&mut session, "p1", ActionKind::Kill, "p4");
    act(&mut session, "p2", ActionKind::Check, "p5");
    act(&mut session, "p3", ActionKind::Save, "p4");
    let t = phase::advance(&mut session, false).unwrap();
    assert!(t.report.deaths.is_empty());
    assert!(session.participant(&pid("p4")).unwrap().alive);
}

#[test]
fn save_on_untargeted_participant_is_spent_without_effect() {
    let mut session = classic_six();
    act(&mut session, "p0", ActionKind::Kill, "p4");
    act(&mut session, "p1", ActionKind::Kill, "p4");
    act(&mut session, "p2", ActionKind::Check, "p5");
    act(&mut session, "p3", ActionKind::Save, "p5");
    let t = phase::advance(&mut session, false).unwrap();
    assert_eq!(t.report.deaths, vec![pid("p4")]);
    assert!(session.skill_ledger_for(&pid("p3")).unwrap().save_used());
}

#[test]
fn poison_kills_unconditionally() {
    let mut session = classic_six();
    act(&mut session, "p0", ActionKind::Kill, "p4");
    act(&mut session, "p1", ActionKind::Kill, "p4");
    act(&mut session, "p2", ActionKind::Check, "p5");
    act(&mut session, "p3", ActionKind::Poison, "p0");
    let t = phase::advance(&mut session, false).unwrap();
    assert_eq!(t.report.deaths, vec![pid("p4"), pid("p0")]);
}

#[test]
fn save_cannot_undo_poison_on_a_killed_target() {
    let mut session = classic_six();
    act(&mut session, "p0", ActionKind::Kill, "p4");
    act(&mut session, "p3", ActionKind::Poison, "p4");
    act(&mut session, "p3", ActionKind::Save, "p4");
    let report = phase::resolve_phase(&mut session);
    assert_eq!(report.deaths, vec![pid("p4")]);
    assert!(!session.participant(&pid("p4")).unwrap().alive);
}

#[test]
fn save_cannot_undo_poison_without_a_kill() {
    let mut session = classic_six();
    act(&mut session, "p0", ActionKind::Kill, "p5");
    act(&mut session, "p3", ActionKind::Poison, "p4");
    act(&mut session, "p3", ActionKind::Save, "p4");
    let report = phase::resolve_phase(&mut session);
    assert_eq!(report.deaths, vec![pid("p5"), pid("p4")]);
    assert!(!session.participant(&pid("p4")).unwrap().alive);
    assert!(!session.participant(&pid("p5")).unwrap().alive);
}

#[test]
fn guard_protection_blocks_the_kill() {
    let mut session = standard_six();
    act(&mut session, "p0", ActionKind::Kill, "p2");
    act(&mut session, "p1", ActionKind::Kill, "p2");
    act(&mut session, "p2", ActionKind::Check, "p0");
    act(&mut session, "p5", ActionKind::Protect, "p2");
    assert!(phase::is_phase_complete(&session));
    let t = phase::advance(&mut session, false).unwrap();
    assert!(t.report.deaths.is_empty());
}

#[test]
fn guard_cannot_protect_themselves() {
    let mut session = standard_six();
    let err = session
        .submit_action(ActionRequest::targeted(&pid("p5"), ActionKind::Protect, &pid("p5")))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidTarget, _)
    ));
}

#[test]
fn dead_hunter_gets_one_immediate_shot() {
    let mut session = standard_six();
    act(&mut session, "p0", ActionKind::Kill, "p4");
    act(&mut session, "p1", ActionKind::Kill, "p4");
    act(&mut session, "p2", ActionKind::Check, "p3");
    act(&mut session, "p5", ActionKind::Protect, "p3");
    phase::advance(&mut session, false).unwrap();
    assert!(session.pending_shots().contains(&pid("p4")));

    let outcome = session
        .submit_action(ActionRequest::targeted(&pid("p4"), ActionKind::Shoot, &pid("p0")))
        .unwrap();
    assert_eq!(outcome, ActionOutcome::Shot { target: pid("p0") });
    assert!(!session.participant(&pid("p0")).unwrap().alive);
    assert!(session.pending_shots().is_empty());
    assert!(session.action_log().is_empty());

    let err = session
        .submit_action(ActionRequest::targeted(&pid("p4"), ActionKind::Shoot, &pid("p1")))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidAction, _)
    ));
}

#[test]
fn living_hunter_cannot_shoot() {
    let mut session = standard_six();
    let err = session
        .submit_action(ActionRequest::targeted(&pid("p4"), ActionKind::Shoot, &pid("p0")))
        .unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidAction, _)
    ));
}
