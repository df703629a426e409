//! Property tests for vote tallying (pure domain).
//!
//! Contract:
//! - The target with the strictly highest ballot count is eliminated
//! - Any tie at the top eliminates nobody
//! - No ballots, no elimination

use std::collections::BTreeMap;

use proptest::prelude::*;

use crate::domain::participant::ParticipantId;
use crate::domain::phase::tally_votes;
use crate::domain::test_prelude;

fn ids(raw: &[u8]) -> Vec<ParticipantId> {
    raw.iter().map(|n| ParticipantId::new(format!("p{n}"))).collect()
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Property: tally matches a straightforward count-and-compare.
    #[test]
    fn prop_tally_matches_reference(raw in prop::collection::vec(0u8..6, 0..12)) {
        let ballots = ids(&raw);
        let mut counts: BTreeMap<&ParticipantId, usize> = BTreeMap::new();
        for b in &ballots {
            *counts.entry(b).or_default() += 1;
        }
        let top = counts.values().copied().max();
        let leaders: Vec<_> = counts
            .iter()
            .filter(|(_, c)| Some(**c) == top)
            .map(|(id, _)| (*id).clone())
            .collect();
        let expected = if leaders.len() == 1 { Some(leaders[0].clone()) } else { None };

        prop_assert_eq!(tally_votes(ballots.iter()), expected);
    }

    /// Property: ballot order never changes the result.
    #[test]
    fn prop_tally_is_order_independent(raw in prop::collection::vec(0u8..6, 1..12)) {
        let ballots = ids(&raw);
        let mut reversed = ballots.clone();
        reversed.reverse();
        prop_assert_eq!(tally_votes(ballots.iter()), tally_votes(reversed.iter()));
    }
}

#[test]
fn three_two_two_eliminates_the_three() {
    let ballots = ids(&[0, 0, 0, 1, 1, 2, 2]);
    assert_eq!(tally_votes(ballots.iter()), Some(ParticipantId::from("p0")));
}

#[test]
fn two_two_tie_eliminates_nobody() {
    let ballots = ids(&[0, 0, 1, 1]);
    assert_eq!(tally_votes(ballots.iter()), None);
    assert_eq!(tally_votes(std::iter::empty()), None);
}
