use crate::domain::action::{ActionKind, ActionRequest};
use crate::domain::phase::{self, Outcome, Phase};
use crate::domain::roles::{GameMode, Role};
use crate::domain::session::Session;
use crate::domain::test_prelude::{act, classic_six, pid, started};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};

/// p0 p1 wolves, p2 seer, p3 witch, p4 p5 p6 villagers.
fn classic_seven() -> Session {
    started(
        GameMode::Classic,
        &[
            Role::Wolf,
            Role::Wolf,
            Role::Seer,
            Role::Witch,
            Role::Villager,
            Role::Villager,
            Role::Villager,
        ],
    )
}

fn classic_seven_at_vote() -> Session {
    let mut session = classic_seven();
    phase::expire(&mut session).unwrap();
    phase::expire(&mut session).unwrap();
    assert_eq!(session.phase(), Phase::Vote);
    assert_eq!(session.alive().count(), 7);
    session
}

#[test]
fn phases_cycle_strictly() {
    assert_eq!(Phase::Night.next(), Phase::Day);
    assert_eq!(Phase::Day.next(), Phase::Vote);
    assert_eq!(Phase::Vote.next(), Phase::Night);
}

#[test]
fn night_waits_for_every_required_actor_but_not_the_witch() {
    let mut session = classic_six();
    assert!(!phase::is_phase_complete(&session));
    act(&mut session, "p0", ActionKind::Kill, "p4");
    assert!(!phase::is_phase_complete(&session));
    act(&mut session, "p1", ActionKind::Kill, "p5");
    assert!(!phase::is_phase_complete(&session));
    act(&mut session, "p2", ActionKind::Check, "p0");
    assert!(phase::is_phase_complete(&session));
}

#[test]
fn incomplete_phase_refuses_unforced_advance() {
    let mut session = classic_six();
    let err = phase::advance(&mut session, false).unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::PhaseIncomplete, _)
    ));
    assert_eq!(session.phase(), Phase::Night);
}

#[test]
fn kills_apply_in_submission_order_and_clear_the_log() {
    let mut session = classic_seven();
    act(&mut session, "p0", ActionKind::Kill, "p5");
    act(&mut session, "p1", ActionKind::Kill, "p4");
    act(&mut session, "p2", ActionKind::Check, "p3");
    let t = phase::advance(&mut session, false).unwrap();
    assert_eq!(t.resolved, Phase::Night);
    assert_eq!(t.report.deaths, vec![pid("p5"), pid("p4")]);
    assert!(session.action_log().is_empty());
    assert_eq!(session.phase(), Phase::Day);
}

#[test]
fn day_completes_only_when_the_clock_runs_out() {
    let mut session = classic_six();
    phase::expire(&mut session).unwrap();
    assert_eq!(session.phase(), Phase::Day);
    assert!(session.time_left() > 0);
    assert!(!phase::is_phase_complete(&session));

    session
        .submit_action(ActionRequest::discuss(&pid("p4"), "hello"))
        .unwrap();
    let t = phase::expire(&mut session).unwrap();
    assert_eq!(t.resolved, Phase::Day);
    assert!(t.report.deaths.is_empty());
    assert_eq!(session.phase(), Phase::Vote);
}

#[test]
fn strict_plurality_is_eliminated() {
    let mut session = classic_seven_at_vote();
    for (voter, target) in [
        ("p0", "p4"),
        ("p1", "p4"),
        ("p2", "p4"),
        ("p3", "p5"),
        ("p6", "p5"),
        ("p4", "p6"),
        ("p5", "p6"),
    ] {
        act(&mut session, voter, ActionKind::Vote, target);
    }
    assert!(phase::is_phase_complete(&session));
    let t = phase::advance(&mut session, false).unwrap();
    assert_eq!(t.report.eliminated, Some(pid("p4")));
    assert!(!session.participant(&pid("p4")).unwrap().alive);
    assert_eq!(session.vote_history().len(), 1);
    assert_eq!(session.vote_history()[0].ballots.len(), 7);
}

#[test]
fn tie_eliminates_nobody() {
    let mut session = classic_seven_at_vote();
    act(&mut session, "p0", ActionKind::Vote, "p4");
    act(&mut session, "p1", ActionKind::Vote, "p4");
    act(&mut session, "p2", ActionKind::Vote, "p5");
    act(&mut session, "p3", ActionKind::Vote, "p5");
    assert!(!phase::is_phase_complete(&session));
    let t = phase::expire(&mut session).unwrap();
    assert_eq!(t.report.eliminated, None);
    assert_eq!(session.alive().count(), 7);
}

#[test]
fn round_moves_only_on_vote_to_night() {
    let mut session = classic_six();
    assert_eq!(session.round(), 1);
    phase::expire(&mut session).unwrap();
    assert_eq!((session.phase(), session.round()), (Phase::Day, 1));
    phase::expire(&mut session).unwrap();
    assert_eq!((session.phase(), session.round()), (Phase::Vote, 1));
    phase::expire(&mut session).unwrap();
    assert_eq!((session.phase(), session.round()), (Phase::Night, 2));
}

#[test]
fn every_phase_entry_resets_the_clock_and_bumps_the_epoch() {
    let mut session = classic_six();
    let epoch = session.phase_epoch();
    phase::expire(&mut session).unwrap();
    assert_eq!(session.phase_epoch(), epoch + 1);
    assert_eq!(session.time_left(), session.rules().budgets.day);
}

#[test]
fn terminal_session_is_inert() {
    let mut session = classic_six();
    act(&mut session, "p0", ActionKind::Kill, "p4");
    act(&mut session, "p1", ActionKind::Kill, "p5");
    act(&mut session, "p2", ActionKind::Check, "p0");
    act(&mut session, "p3", ActionKind::Poison, "p2");
    let t = phase::advance(&mut session, false).unwrap();
    // two wolves against the lone witch
    assert_eq!(t.outcome, Some(Outcome::Wolves));
    assert_eq!(session.phase(), Phase::Night);

    let err = phase::expire(&mut session).unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::GameOver, _)));
    let err = session
        .submit_action(ActionRequest::discuss(&pid("p0"), "gg"))
        .unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::GameOver, _)));
}

#[test]
fn ballot_of_a_voter_shot_mid_vote_is_dropped() {
    // p0 p1 wolves, p2 seer, p3 witch, p4 hunter, p5 guard, p6 villager
    let mut session = started(
        GameMode::Standard,
        &[
            Role::Wolf,
            Role::Wolf,
            Role::Seer,
            Role::Witch,
            Role::Hunter,
            Role::Guard,
            Role::Villager,
        ],
    );
    act(&mut session, "p0", ActionKind::Kill, "p4");
    phase::expire(&mut session).unwrap();
    phase::expire(&mut session).unwrap();
    assert_eq!(session.phase(), Phase::Vote);
    assert!(session.pending_shots().contains(&pid("p4")));

    act(&mut session, "p2", ActionKind::Vote, "p0");
    act(&mut session, "p3", ActionKind::Vote, "p0");
    act(&mut session, "p1", ActionKind::Vote, "p5");
    act(&mut session, "p6", ActionKind::Vote, "p5");
    act(&mut session, "p4", ActionKind::Shoot, "p6");
    assert!(!session.participant(&pid("p6")).unwrap().alive);

    let t = phase::expire(&mut session).unwrap();
    assert_eq!(t.report.eliminated, Some(pid("p0")));
    assert_eq!(session.vote_history()[0].ballots.len(), 3);
}
