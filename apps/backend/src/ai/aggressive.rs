//! Aggressive profile: goes after known threats and loud voices first.

use crate::ai::trait_def::{Strategy, WitchChoice};
use crate::ai::view::{pick_max_by, ActorView};
use crate::ai::DecisionRng;
use crate::domain::participant::ParticipantId;

#[derive(Debug, Clone, Copy, Default)]
pub struct Aggressive;

impl Aggressive {
    pub const NAME: &'static str = "aggressive";
    pub const VERSION: &'static str = "1.0.0";
}

impl Strategy for Aggressive {
    fn kill_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        // Whoever talks the most or is known to matter.
        pick_max_by(&view.opponents(), rng, |p| {
            let weight = if view.is_important(&p.id) { 10 } else { 0 };
            weight + view.speech_count(&p.id) as i64
        })
    }

    fn check_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        pick_max_by(&view.unknowns(), rng, |p| i64::from(view.suspicion(&p.id)))
    }

    fn protect_target(
        &self,
        view: &ActorView<'_>,
        rng: &mut DecisionRng,
    ) -> Option<ParticipantId> {
        pick_max_by(&view.others(), rng, |p| view.speech_count(&p.id) as i64)
    }

    fn vote_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        pick_max_by(&view.opponents(), rng, |p| i64::from(view.suspicion(&p.id)))
    }

    fn witch_choice(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<WitchChoice> {
        let ledger = view.ledger()?;
        if !ledger.poison_used() {
            let suspects: Vec<_> = view
                .opponents()
                .into_iter()
                .filter(|p| view.suspicion(&p.id) >= 10)
                .collect();
            if let Some(target) = pick_max_by(&suspects, rng, |p| i64::from(view.suspicion(&p.id)))
            {
                return Some(WitchChoice::Poison(target));
            }
        }
        if !ledger.save_used() {
            if let Some(victim) = view.tonight_victims().first() {
                return Some(WitchChoice::Save((*victim).clone()));
            }
        }
        None
    }
}
