use rand::SeedableRng;

use crate::ai::engine::{decide, turn_order, Decision};
use crate::ai::DecisionRng;
use crate::domain::action::{ActionKind, ActionRequest};
use crate::domain::participant::{Participant, ParticipantId, Profile, RoomId};
use crate::domain::phase::{self, Phase};
use crate::domain::roles::{GameMode, Role};
use crate::domain::session::{Session, SessionRules};

fn pid(s: &str) -> ParticipantId {
    ParticipantId::from(s)
}

fn synthetic_session(mode: GameMode, roles: &[Role], profile: Profile) -> Session {
    let roster = (0..roles.len())
        .map(|i| Participant::synthetic(format!("p{i}"), format!("AI Player {i}"), profile))
        .collect();
    let rules = SessionRules {
        min_players: 0,
        ..SessionRules::default()
    };
    let mut session = Session::with_roster(RoomId::from("ai"), mode, rules, roster).unwrap();
    session.start_with_roles(roles.to_vec()).unwrap();
    session
}

const CLASSIC_SIX: [Role; 6] = [
    Role::Wolf,
    Role::Wolf,
    Role::Seer,
    Role::Witch,
    Role::Villager,
    Role::Villager,
];

const EXTENDED_EIGHT: [Role; 8] = [
    Role::Wolf,
    Role::AwakenedWolf,
    Role::Seer,
    Role::Witch,
    Role::Hunter,
    Role::Guard,
    Role::Matchmaker,
    Role::Villager,
];

/// One synthetic pass over the current phase; returns how many acted.
fn run_pass(session: &mut Session, rng: &mut DecisionRng) -> usize {
    let mut acted = 0;
    for actor in turn_order(session) {
        if let Decision::Act(req) = decide(session, &actor, rng) {
            check_shape(session, &req);
            session.submit_action(req).expect("engine output must be legal");
            phase::settle(session);
            acted += 1;
        }
    }
    acted
}

fn check_shape(session: &Session, req: &ActionRequest) {
    if let Some(target) = &req.target {
        let t = session.participant(target).expect("target exists");
        assert!(t.alive, "{} targeted dead {}", req.actor, target);
        if req.kind != ActionKind::Save {
            assert_ne!(&req.actor, target, "{} targeted themselves", req.kind);
        }
    }
}

fn play_out(mode: GameMode, roles: &[Role], profile: Profile, seed: u64) -> Session {
    let mut session = synthetic_session(mode, roles, profile);
    let mut rng = DecisionRng::seed_from_u64(seed);
    for _ in 0..90 {
        if session.is_terminal() {
            break;
        }
        run_pass(&mut session, &mut rng);
        if session.is_terminal() {
            break;
        }
        phase::expire(&mut session).unwrap();
    }
    session
}

#[test]
fn humans_always_pass() {
    let mut session = Session::with_roster(
        RoomId::from("h"),
        GameMode::Classic,
        SessionRules::default(),
        (0..6)
            .map(|i| Participant::human(format!("p{i}"), format!("P{i}")))
            .collect(),
    )
    .unwrap();
    session.start_with_roles(CLASSIC_SIX.to_vec()).unwrap();
    let mut rng = DecisionRng::seed_from_u64(1);
    assert_eq!(decide(&session, &pid("p0"), &mut rng), Decision::Pass);
    assert!(turn_order(&session).is_empty());
}

#[test]
fn every_profile_finishes_games_with_legal_actions() {
    for profile in Profile::ALL {
        for seed in 0..6u64 {
            let session = play_out(GameMode::Classic, &CLASSIC_SIX, profile, seed);
            assert!(
                session.is_terminal(),
                "{profile} seed {seed} did not finish"
            );
            let session = play_out(GameMode::Extended, &EXTENDED_EIGHT, profile, seed);
            assert!(
                session.is_terminal(),
                "{profile} seed {seed} extended did not finish"
            );
        }
    }
}

#[test]
fn night_actors_fill_every_required_action() {
    let mut session = synthetic_session(GameMode::Classic, &CLASSIC_SIX, Profile::Strategic);
    let mut rng = DecisionRng::seed_from_u64(9);
    run_pass(&mut session, &mut rng);
    assert!(phase::is_phase_complete(&session));
}

#[test]
fn witch_acts_after_the_wolves() {
    let session = synthetic_session(GameMode::Classic, &CLASSIC_SIX, Profile::Cautious);
    let order = turn_order(&session);
    assert_eq!(order.last(), Some(&pid("p3")));
}

#[test]
fn cautious_witch_saves_tonights_victim() {
    let mut session = synthetic_session(GameMode::Classic, &CLASSIC_SIX, Profile::Cautious);
    session
        .submit_action(ActionRequest::targeted(&pid("p0"), ActionKind::Kill, &pid("p4")))
        .unwrap();
    let mut rng = DecisionRng::seed_from_u64(5);
    let decision = decide(&session, &pid("p3"), &mut rng);
    assert_eq!(
        decision,
        Decision::Act(ActionRequest::targeted(&pid("p3"), ActionKind::Save, &pid("p4")))
    );
}

#[test]
fn seer_with_nothing_left_to_learn_passes() {
    let mut session = synthetic_session(GameMode::Classic, &CLASSIC_SIX, Profile::Baseline);
    for (i, role) in CLASSIC_SIX.iter().enumerate() {
        session.learn(&pid("p2"), &pid(&format!("p{i}")), *role);
    }
    let mut rng = DecisionRng::seed_from_u64(2);
    assert_eq!(decide(&session, &pid("p2"), &mut rng), Decision::Pass);
}

#[test]
fn synthetic_discussion_happens_once_per_day() {
    let mut session = synthetic_session(GameMode::Classic, &CLASSIC_SIX, Profile::Aggressive);
    phase::expire(&mut session).unwrap();
    assert_eq!(session.phase(), Phase::Day);
    let mut rng = DecisionRng::seed_from_u64(4);
    let alive = session.alive().count();
    assert_eq!(run_pass(&mut session, &mut rng), alive);
    assert_eq!(run_pass(&mut session, &mut rng), 0);
    assert_eq!(session.transcript().len(), alive);
}

#[test]
fn dead_participants_without_a_shot_pass() {
    let mut session = synthetic_session(GameMode::Classic, &CLASSIC_SIX, Profile::Baseline);
    session.kill(&pid("p4"));
    let mut rng = DecisionRng::seed_from_u64(8);
    assert_eq!(decide(&session, &pid("p4"), &mut rng), Decision::Pass);
    assert!(!turn_order(&session).contains(&pid("p4")));
}

#[test]
fn dead_synthetic_hunter_takes_the_shot() {
    let mut session = synthetic_session(GameMode::Extended, &EXTENDED_EIGHT, Profile::Aggressive);
    session.kill(&pid("p4"));
    let mut rng = DecisionRng::seed_from_u64(11);
    match decide(&session, &pid("p4"), &mut rng) {
        Decision::Act(req) => assert_eq!(req.kind, ActionKind::Shoot),
        Decision::Pass => panic!("hunter should fire"),
    }
}
