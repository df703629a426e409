//! Baseline profile: uniform choice among legal targets.

use rand::Rng;

use crate::ai::trait_def::{Strategy, WitchChoice};
use crate::ai::view::{pick_any, ActorView};
use crate::ai::DecisionRng;
use crate::domain::participant::ParticipantId;

#[derive(Debug, Clone, Copy, Default)]
pub struct Baseline;

impl Baseline {
    pub const NAME: &'static str = "baseline";
    pub const VERSION: &'static str = "1.0.0";
}

impl Strategy for Baseline {
    fn kill_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        pick_any(&view.opponents(), rng)
    }

    fn check_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        pick_any(&view.unknowns(), rng)
    }

    fn protect_target(
        &self,
        view: &ActorView<'_>,
        rng: &mut DecisionRng,
    ) -> Option<ParticipantId> {
        pick_any(&view.others(), rng)
    }

    fn vote_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        pick_any(&view.opponents(), rng)
    }

    fn witch_choice(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<WitchChoice> {
        let ledger = view.ledger()?;
        if !ledger.save_used() {
            if let Some(victim) = view.tonight_victims().first() {
                if rng.random_bool(0.5) {
                    return Some(WitchChoice::Save((*victim).clone()));
                }
            }
        }
        if !ledger.poison_used() && view.round() > 1 && rng.random_bool(0.25) {
            return pick_any(&view.opponents(), rng).map(WitchChoice::Poison);
        }
        None
    }
}
