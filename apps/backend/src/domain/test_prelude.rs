//! Shared helpers for domain unit and property tests.

use proptest::test_runner::Config;

use crate::domain::action::{ActionKind, ActionRequest};
use crate::domain::participant::{Participant, ParticipantId, RoomId};
use crate::domain::roles::{GameMode, Role};
use crate::domain::session::{Session, SessionRules};

pub fn proptest_config() -> Config {
    Config {
        cases: 64,
        failure_persistence: None,
        ..Config::default()
    }
}

pub fn pid(s: &str) -> ParticipantId {
    ParticipantId::from(s)
}

/// Started session with seats `p0..pN` holding `roles` in order.
pub fn started(mode: GameMode, roles: &[Role]) -> Session {
    let rules = SessionRules {
        min_players: 0,
        ..SessionRules::default()
    };
    let roster = (0..roles.len())
        .map(|i| Participant::human(format!("p{i}"), format!("Player {i}")))
        .collect();
    let mut session = Session::with_roster(RoomId::from("room"), mode, rules, roster)
        .expect("roster fits");
    session
        .start_with_roles(roles.to_vec())
        .expect("session starts");
    session
}

/// Six seats: p0 p1 wolves, p2 seer, p3 witch, p4 p5 villagers.
pub fn classic_six() -> Session {
    started(
        GameMode::Classic,
        &[
            Role::Wolf,
            Role::Wolf,
            Role::Seer,
            Role::Witch,
            Role::Villager,
            Role::Villager,
        ],
    )
}

pub fn act(session: &mut Session, actor: &str, kind: ActionKind, target: &str) {
    session
        .submit_action(ActionRequest::targeted(&pid(actor), kind, &pid(target)))
        .unwrap_or_else(|e| panic!("{actor} {kind} {target} rejected: {e}"));
}
