//! Property tests for round progression under arbitrary action streams.

use proptest::prelude::*;

use crate::domain::action::{ActionKind, ActionRequest};
use crate::domain::phase::{self, Phase};
use crate::domain::test_prelude::{self, classic_six, pid};

const KINDS: [ActionKind; 6] = [
    ActionKind::Kill,
    ActionKind::Check,
    ActionKind::Save,
    ActionKind::Poison,
    ActionKind::Vote,
    ActionKind::Discuss,
];

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: round never decreases and moves by exactly one only when
    /// a vote phase resolves into a new night.
    #[test]
    fn prop_round_moves_only_on_vote_to_night(
        steps in prop::collection::vec((0usize..6, 0usize..6, 0usize..6, any::<bool>()), 1..80),
    ) {
        let mut session = classic_six();
        for (actor, kind, target, resolve) in steps {
            if session.is_terminal() {
                break;
            }
            let kind = KINDS[kind];
            let actor = pid(&format!("p{actor}"));
            let req = if kind == ActionKind::Discuss {
                ActionRequest::discuss(&actor, "hmm")
            } else {
                ActionRequest::targeted(&actor, kind, &pid(&format!("p{target}")))
            };
            let log_before = session.action_log().len();
            if session.submit_action(req).is_err() {
                prop_assert_eq!(session.action_log().len(), log_before);
            }

            if resolve {
                let (phase_before, round_before) = (session.phase(), session.round());
                let t = phase::expire(&mut session).unwrap();
                prop_assert_eq!(t.resolved, phase_before);
                if t.outcome.is_some() {
                    prop_assert_eq!(session.round(), round_before);
                } else if phase_before == Phase::Vote {
                    prop_assert_eq!(session.phase(), Phase::Night);
                    prop_assert_eq!(session.round(), round_before + 1);
                } else {
                    prop_assert_eq!(session.round(), round_before);
                    prop_assert_eq!(session.phase(), phase_before.next());
                }
            }
        }
    }
}
