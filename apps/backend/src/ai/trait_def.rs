//! Decision strategy trait.

use crate::ai::view::ActorView;
use crate::ai::DecisionRng;
use crate::domain::participant::ParticipantId;

/// A witch's night decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WitchChoice {
    Save(ParticipantId),
    Poison(ParticipantId),
}

/// One implementation per behavioral profile.
///
/// Implementations only pick among participants the view hands them; the
/// engine re-validates every choice against the session before acting.
/// Returning `None` means pass.
pub trait Strategy: Send + Sync {
    fn kill_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId>;

    fn check_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId>;

    fn protect_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng)
        -> Option<ParticipantId>;

    fn vote_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId>;

    fn witch_choice(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<WitchChoice>;

    /// A dead hunter's final shot. Defaults to whoever they would vote out.
    fn shot_target(&self, view: &ActorView<'_>, rng: &mut DecisionRng) -> Option<ParticipantId> {
        self.vote_target(view, rng)
    }
}
