use crate::domain::action::ActionKind;
use crate::domain::phase;
use crate::domain::roles::Role;
use crate::domain::test_prelude::{act, classic_six, pid};

#[test]
fn room_snapshot_hides_every_role() {
    let session = classic_six();
    let snap = session.snapshot();
    assert!(snap.started);
    assert!(snap.viewer.is_none());
    assert!(snap.roster.iter().all(|p| p.role.is_none()));
}

#[test]
fn participant_sees_own_role_and_what_they_learned() {
    let mut session = classic_six();
    act(&mut session, "p2", ActionKind::Check, "p1");

    let seer_view = session.snapshot_for(&pid("p2"));
    let role_of = |id: &str| {
        seer_view
            .roster
            .iter()
            .find(|p| p.id == pid(id))
            .and_then(|p| p.role)
    };
    assert_eq!(role_of("p2"), Some(Role::Seer));
    assert_eq!(role_of("p1"), Some(Role::Wolf));
    assert_eq!(role_of("p0"), None);
    assert_eq!(seer_view.viewer.as_ref().unwrap().role, Some(Role::Seer));

    let wolf_view = session.snapshot_for(&pid("p0"));
    let ally = wolf_view.roster.iter().find(|p| p.id == pid("p1")).unwrap();
    assert_eq!(ally.role, Some(Role::Wolf));
    let seer = wolf_view.roster.iter().find(|p| p.id == pid("p2")).unwrap();
    assert_eq!(seer.role, None);
}

#[test]
fn witch_view_reports_remaining_potions() {
    let mut session = classic_six();
    act(&mut session, "p3", ActionKind::Save, "p4");
    let potions = session
        .snapshot_for(&pid("p3"))
        .viewer
        .and_then(|v| v.potions)
        .unwrap();
    assert!(!potions.save_available);
    assert!(potions.poison_available);
}

#[test]
fn roles_are_revealed_at_game_end() {
    let mut session = classic_six();
    act(&mut session, "p0", ActionKind::Kill, "p4");
    act(&mut session, "p1", ActionKind::Kill, "p5");
    act(&mut session, "p2", ActionKind::Check, "p0");
    act(&mut session, "p3", ActionKind::Poison, "p2");
    phase::advance(&mut session, false).unwrap();
    let snap = session.snapshot();
    assert!(snap.outcome.is_some());
    assert!(snap.roster.iter().all(|p| p.role.is_some()));
}

#[test]
fn serializing_twice_is_byte_identical() {
    let mut session = classic_six();
    act(&mut session, "p2", ActionKind::Check, "p1");
    let a = serde_json::to_string(&session.snapshot_for(&pid("p2"))).unwrap();
    let b = serde_json::to_string(&session.snapshot_for(&pid("p2"))).unwrap();
    assert_eq!(a, b);
    let room_a = serde_json::to_vec(&session.snapshot()).unwrap();
    let room_b = serde_json::to_vec(&session.snapshot()).unwrap();
    assert_eq!(room_a, room_b);
}
