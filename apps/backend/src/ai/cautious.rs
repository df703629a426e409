//! Cautious profile: avoids known quantities, prefers unknowns, follows
//! the table on votes.

use crate::ai::trait_def::{Strategy, WitchChoice};
use crate::ai::view::{pick_any, pick_max_by, ActorView};
use crate::ai::DecisionRng;
use crate::domain::participant::ParticipantId;

#[derive(Debug, Clone, Copy, Default)]
pub struct Cautious;

impl Cautious {
    pub const NAME: &'static str = "cautious";
    pub const VERSION: &'static str = "1.0.0";
}

impl Strategy for Cautious {
    fn kill_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        // Quiet unknowns draw the least attention.
        let unknown: Vec<_> = view
            .opponents()
            .into_iter()
            .filter(|p| view.known_role(&p.id).is_none())
            .collect();
        let pool = if unknown.is_empty() { view.opponents() } else { unknown };
        pick_max_by(&pool, rng, |p| -(view.speech_count(&p.id) as i64))
    }

    fn check_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        pick_max_by(&view.unknowns(), rng, |p| -(view.speech_count(&p.id) as i64))
    }

    fn protect_target(
        &self,
        view: &ActorView<'_>,
        rng: &mut DecisionRng,
    ) -> Option<ParticipantId> {
        let friends: Vec<_> = view
            .others()
            .into_iter()
            .filter(|p| view.is_known_friendly(&p.id))
            .collect();
        pick_any(&friends, rng).or_else(|| pick_any(&view.others(), rng))
    }

    fn vote_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        if let Some(popular) = view.popular_vote_target() {
            if !view.is_known_friendly(&popular) {
                return Some(popular);
            }
        }
        let unknown = view.unknowns();
        let pool = if unknown.is_empty() { view.opponents() } else { unknown };
        pick_max_by(&pool, rng, |p| i64::from(view.suspicion(&p.id)))
    }

    fn witch_choice(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<WitchChoice> {
        let ledger = view.ledger()?;
        if !ledger.save_used() {
            if let Some(victim) = view.tonight_victims().first() {
                return Some(WitchChoice::Save((*victim).clone()));
            }
        }
        if !ledger.poison_used() {
            let hostile: Vec<_> = view
                .opponents()
                .into_iter()
                .filter(|p| view.is_known_hostile(&p.id))
                .collect();
            return pick_any(&hostile, rng).map(WitchChoice::Poison);
        }
        None
    }
}
