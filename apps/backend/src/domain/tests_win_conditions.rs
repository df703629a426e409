use crate::domain::phase::{check_game_end, settle, Outcome};
use crate::domain::roles::{GameMode, Role};
use crate::domain::session::Session;
use crate::domain::test_prelude::{pid, started};

/// p0 wolf, p1 awakened wolf, p2 seer, p3 witch, p4 hunter, p5 guard, p6 matchmaker.
fn extended_seven() -> Session {
    started(
        GameMode::Extended,
        &[
            Role::Wolf,
            Role::AwakenedWolf,
            Role::Seer,
            Role::Witch,
            Role::Hunter,
            Role::Guard,
            Role::Matchmaker,
        ],
    )
}

fn keep_alive(session: &mut Session, survivors: &[&str]) {
    let doomed: Vec<_> = session
        .roster()
        .iter()
        .filter(|p| !survivors.contains(&p.id.as_str()))
        .map(|p| p.id.clone())
        .collect();
    for id in doomed {
        session.kill(&id);
    }
}

#[test]
fn fresh_game_is_ongoing() {
    assert_eq!(check_game_end(&extended_seven()), None);
}

#[test]
fn lovers_win_over_wolf_parity() {
    let mut session = extended_seven();
    session.pair_lovers(&pid("p0"), &pid("p2")).unwrap();
    keep_alive(&mut session, &["p0", "p2"]);
    // one wolf, one villager: parity alone would hand it to the wolves
    assert_eq!(check_game_end(&session), Some(Outcome::Lovers));
}

#[test]
fn lovers_need_to_be_the_last_two_standing() {
    let mut session = extended_seven();
    session.pair_lovers(&pid("p0"), &pid("p2")).unwrap();
    keep_alive(&mut session, &["p0", "p2", "p3"]);
    assert_eq!(check_game_end(&session), None);
}

#[test]
fn awakened_wolf_alone_wins_solo() {
    let mut session = extended_seven();
    keep_alive(&mut session, &["p1"]);
    assert_eq!(check_game_end(&session), Some(Outcome::AwakenedWolf));
}

#[test]
fn plain_wolf_alone_is_a_wolf_win() {
    let mut session = extended_seven();
    keep_alive(&mut session, &["p0"]);
    assert_eq!(check_game_end(&session), Some(Outcome::Wolves));
}

#[test]
fn village_wins_when_no_wolves_remain() {
    let mut session = extended_seven();
    keep_alive(&mut session, &["p2", "p5"]);
    assert_eq!(check_game_end(&session), Some(Outcome::Village));
}

#[test]
fn wolves_win_on_parity() {
    let mut session = extended_seven();
    keep_alive(&mut session, &["p0", "p1", "p2", "p3"]);
    assert_eq!(check_game_end(&session), Some(Outcome::Wolves));

    let mut session = extended_seven();
    keep_alive(&mut session, &["p0", "p2", "p3"]);
    assert_eq!(check_game_end(&session), None);
}

#[test]
fn settle_records_the_outcome_once() {
    let mut session = extended_seven();
    keep_alive(&mut session, &["p2", "p5"]);
    assert_eq!(settle(&mut session), Some(Outcome::Village));
    assert!(session.is_terminal());
}

#[test]
fn lovers_learn_each_other_and_pair_only_once() {
    let mut session = extended_seven();
    session.pair_lovers(&pid("p0"), &pid("p2")).unwrap();
    assert_eq!(
        session.knowledge_of(&pid("p2")).unwrap().get(&pid("p0")),
        Some(&Role::Wolf)
    );
    assert!(session.pair_lovers(&pid("p3"), &pid("p4")).is_err());
    assert!(session.pair_lovers(&pid("p3"), &pid("p3")).is_err());
}
