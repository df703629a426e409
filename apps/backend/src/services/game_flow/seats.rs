//! Synthetic seat filling and start-of-game pairings.

use rand::seq::IndexedRandom;
use rand::Rng;
use tracing::debug;

use crate::domain::participant::{Participant, ParticipantId, Profile};
use crate::domain::roles::Role;
use crate::domain::session::Session;
use crate::errors::domain::{DomainError, ValidationKind};

/// Display name for the `ordinal`-th synthetic participant in a room (1-based).
pub fn synthetic_name(ordinal: usize) -> String {
    format!("AI Player {ordinal}")
}

fn synthetic_id<R: Rng + ?Sized>(rng: &mut R) -> ParticipantId {
    let uuid = uuid::Builder::from_random_bytes(rng.random()).into_uuid();
    ParticipantId::new(format!("ai_{}", uuid.simple()))
}

/// Seat synthetic participants until the roster reaches the session's
/// minimum. Returns the ids added, in seat order.
///
/// Fails without seating anyone when the minimum exceeds the room's capacity.
pub(crate) fn fill_seats<R: Rng + ?Sized>(
    session: &mut Session,
    rng: &mut R,
) -> Result<Vec<ParticipantId>, DomainError> {
    let required = session.required_players();
    let capacity = session.rules().max_players;
    if required > capacity {
        return Err(DomainError::validation(
            ValidationKind::RoomFull,
            format!("{} mode needs {required} seats, room holds {capacity}", session.mode()),
        ));
    }
    let mut added = Vec::new();
    while session.roster().len() < required {
        let ordinal = session
            .roster()
            .iter()
            .filter(|p| p.kind.is_synthetic())
            .count()
            + 1;
        let profile = Profile::ALL
            .choose(rng)
            .copied()
            .unwrap_or(Profile::Baseline);
        let id = synthetic_id(rng);
        session.join(Participant::synthetic(
            id.as_str(),
            synthetic_name(ordinal),
            profile,
        ))?;
        debug!(room_id = %session.room_id(), participant = %id, %profile, "Seated synthetic participant");
        added.push(id);
    }
    Ok(added)
}

/// Bind the matchmaker to a random other participant, if the mode dealt one.
pub(crate) fn pair_matchmaker<R: Rng + ?Sized>(
    session: &mut Session,
    rng: &mut R,
) -> Result<Option<(ParticipantId, ParticipantId)>, DomainError> {
    let Some(matchmaker) = session
        .roster()
        .iter()
        .find(|p| p.has_role(Role::Matchmaker))
        .map(|p| p.id.clone())
    else {
        return Ok(None);
    };
    let candidates: Vec<ParticipantId> = session
        .roster()
        .iter()
        .filter(|p| p.id != matchmaker)
        .map(|p| p.id.clone())
        .collect();
    let Some(partner) = candidates.choose(rng).cloned() else {
        return Ok(None);
    };
    session.pair_lovers(&matchmaker, &partner)?;
    Ok(Some((matchmaker, partner)))
}
