//! Strategic profile.
//!
//! Weighs the round number and the survivor count before spending a
//! scarce resource:
//! - Save only an important victim, and only early (round <= 3) or when
//!   the table is small (<= 6 alive).
//! - Poison only after round 2 and only someone with a positive suspicion.
//! - Wolves remove important village voices first.

use crate::ai::trait_def::{Strategy, WitchChoice};
use crate::ai::view::{pick_max_by, ActorView};
use crate::ai::DecisionRng;
use crate::domain::participant::ParticipantId;

#[derive(Debug, Clone, Copy, Default)]
pub struct Strategic;

impl Strategic {
    pub const NAME: &'static str = "strategic";
    pub const VERSION: &'static str = "1.0.0";
}

impl Strategy for Strategic {
    fn kill_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        pick_max_by(&view.opponents(), rng, |p| {
            let important = if view.is_important(&p.id) { 20 } else { 0 };
            // Players voting against the pack are dangerous.
            important + 5 * view.suspicion(&p.id).min(20) as i64
        })
    }

    fn check_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        pick_max_by(&view.unknowns(), rng, |p| {
            i64::from(view.suspicion(&p.id)) * 2 + view.speech_count(&p.id) as i64
        })
    }

    fn protect_target(
        &self,
        view: &ActorView<'_>,
        rng: &mut DecisionRng,
    ) -> Option<ParticipantId> {
        pick_max_by(&view.others(), rng, |p| {
            let important = if view.is_important(&p.id) { 10 } else { 0 };
            important - i64::from(view.suspicion(&p.id))
        })
    }

    fn vote_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        let opponents = view.opponents();
        if let Some(popular) = view.popular_vote_target() {
            // Join a forming majority late in the game rather than split it.
            if view.alive_count() <= 5 && opponents.iter().any(|p| p.id == popular) {
                return Some(popular);
            }
        }
        pick_max_by(&opponents, rng, |p| i64::from(view.suspicion(&p.id)))
    }

    fn witch_choice(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<WitchChoice> {
        let ledger = view.ledger()?;
        if !ledger.save_used() {
            let early_or_small = view.round() <= 3 || view.alive_count() <= 6;
            if let Some(victim) = view.tonight_victims().first() {
                if early_or_small && (view.is_important(victim) || view.id() == *victim) {
                    return Some(WitchChoice::Save((*victim).clone()));
                }
            }
        }
        if !ledger.poison_used() && view.round() > 2 {
            let suspects: Vec<_> = view
                .opponents()
                .into_iter()
                .filter(|p| view.suspicion(&p.id) > 0)
                .collect();
            return pick_max_by(&suspects, rng, |p| i64::from(view.suspicion(&p.id)))
                .map(WitchChoice::Poison);
        }
        None
    }
}
