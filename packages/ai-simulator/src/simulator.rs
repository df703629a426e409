//! Runs synthetic-only rooms to completion through the real room controller.
//!
//! Timers are disabled and every phase is forced, so a game takes as long
//! as its decisions do.

use std::collections::BTreeMap;
use std::sync::Arc;

use werewolf_backend::config::GameConfig;
use werewolf_backend::domain::participant::{Participant, Profile, RoomId};
use werewolf_backend::domain::phase::Outcome;
use werewolf_backend::domain::roles::GameMode;
use werewolf_backend::domain::session::VoteRecord;
use werewolf_backend::domain::snapshot::ParticipantView;
use werewolf_backend::services::delivery::RecordingDelivery;
use werewolf_backend::services::RoomController;
use werewolf_backend::AppError;

/// Expiries allowed per game before it counts as stuck.
const MAX_EXPIRIES: usize = 600;

pub struct GameResult {
    pub outcome: Outcome,
    pub rounds: u32,
    pub roster: Vec<ParticipantView>,
    pub profiles: Vec<Profile>,
    pub votes: Vec<VoteRecord>,
    pub discussion_lines: usize,
    /// Frames delivered, by frame type.
    pub frames: BTreeMap<&'static str, usize>,
}

pub struct Simulator {
    mode: GameMode,
    players: usize,
    profiles: Vec<Profile>,
    seed: u64,
}

impl Simulator {
    pub fn new(mode: GameMode, profiles: Vec<Profile>, seed: u64) -> Self {
        Self {
            mode,
            players: profiles.len(),
            profiles,
            seed,
        }
    }

    pub async fn simulate_game(&self, game_num: u32) -> Result<GameResult, AppError> {
        let roster = self
            .profiles
            .iter()
            .enumerate()
            .map(|(seat, profile)| {
                Participant::synthetic(
                    format!("sim_{seat}"),
                    format!("AI Player {}", seat + 1),
                    *profile,
                )
            })
            .collect();
        let config = GameConfig::default()
            .with_seed(self.seed)
            .with_min_players(self.players)
            .with_timers(false);
        let delivery = Arc::new(RecordingDelivery::new());
        let room = RoomController::new(
            RoomId::new(format!("sim-{game_num}")),
            self.mode,
            roster,
            config,
            delivery.clone(),
        )?;

        room.start().await?;
        for _ in 0..MAX_EXPIRIES {
            if room.is_finished() {
                break;
            }
            room.expire_phase().await?;
        }

        let mut frames = BTreeMap::new();
        for frame in delivery.frames() {
            *frames.entry(frame.kind()).or_insert(0) += 1;
        }

        room.with_session(|session| {
            let outcome = session.outcome().ok_or_else(|| {
                AppError::internal(format!(
                    "game {game_num} still running after {MAX_EXPIRIES} expiries"
                ))
            })?;
            Ok(GameResult {
                outcome,
                rounds: session.round(),
                roster: session.snapshot().roster,
                profiles: session
                    .roster()
                    .iter()
                    .map(|p| p.kind.profile().unwrap_or(Profile::Baseline))
                    .collect(),
                votes: session.vote_history().to_vec(),
                discussion_lines: session.transcript().len(),
                frames,
            })
        })
    }
}
