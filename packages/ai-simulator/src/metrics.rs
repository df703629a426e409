//! Metrics collection and output for simulation results.

use std::collections::BTreeMap;

use serde::Serialize;
use werewolf_backend::domain::phase::Outcome;
use werewolf_backend::domain::roles::{Faction, Role};
use werewolf_backend::domain::snapshot::ParticipantView;

use crate::simulator::GameResult;

/// Complete game metrics for output.
#[derive(Debug, Clone, Serialize)]
pub struct GameMetrics {
    pub game_id: u32,
    pub seed: u64,
    pub timestamp: String,
    pub config: SimConfig,
    pub result: GameResultMetrics,
    pub players: Vec<PlayerMetrics>,
    pub frames: BTreeMap<&'static str, usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimConfig {
    pub mode: String,
    pub players: usize,
    pub profile: String,
    pub total_games: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameResultMetrics {
    pub outcome: Outcome,
    pub rounds: u32,
    pub survivors: usize,
    pub votes_held: usize,
    pub eliminations: usize,
    pub discussion_lines: usize,
    pub duration_ms: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PlayerMetrics {
    pub seat: u8,
    pub id: String,
    pub profile: String,
    pub role: Option<Role>,
    pub alive: bool,
    pub lover: bool,
    pub won: bool,
    pub votes_cast: usize,
    pub votes_received: usize,
}

/// Did this participant end up on the winning side?
pub fn is_winner(view: &ParticipantView, outcome: Outcome) -> bool {
    match outcome {
        Outcome::Lovers => view.lover,
        Outcome::AwakenedWolf => view.role == Some(Role::AwakenedWolf),
        Outcome::Village => view.role.is_some_and(|r| r.faction() == Faction::Village),
        Outcome::Wolves => view.role.is_some_and(|r| r.faction() == Faction::Wolves),
    }
}

pub struct MetricsContext<'a> {
    pub game_id: u32,
    pub seed: u64,
    pub mode: &'a str,
    pub profile: &'a str,
    pub total_games: u32,
    pub duration_ms: f64,
}

pub fn build_game_metrics(ctx: &MetricsContext<'_>, result: &GameResult) -> GameMetrics {
    let timestamp = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .unwrap_or_else(|_| String::from("unknown"));

    let players: Vec<PlayerMetrics> = result
        .roster
        .iter()
        .enumerate()
        .map(|(idx, view)| {
            let ballots = result.votes.iter().flat_map(|v| v.ballots.iter());
            let (cast, received) = ballots.fold((0, 0), |(cast, received), (voter, target)| {
                (
                    cast + usize::from(voter == &view.id),
                    received + usize::from(target == &view.id),
                )
            });
            PlayerMetrics {
                seat: view.seat,
                id: view.id.to_string(),
                profile: result
                    .profiles
                    .get(idx)
                    .map_or("unknown", |p| p.as_str())
                    .to_owned(),
                role: view.role,
                alive: view.alive,
                lover: view.lover,
                won: is_winner(view, result.outcome),
                votes_cast: cast,
                votes_received: received,
            }
        })
        .collect();

    GameMetrics {
        game_id: ctx.game_id,
        seed: ctx.seed,
        timestamp,
        config: SimConfig {
            mode: ctx.mode.to_owned(),
            players: result.roster.len(),
            profile: ctx.profile.to_owned(),
            total_games: ctx.total_games,
        },
        result: GameResultMetrics {
            outcome: result.outcome,
            rounds: result.rounds,
            survivors: result.roster.iter().filter(|p| p.alive).count(),
            votes_held: result.votes.len(),
            eliminations: result
                .votes
                .iter()
                .filter(|v| v.eliminated.is_some())
                .count(),
            discussion_lines: result.discussion_lines,
            duration_ms: ctx.duration_ms,
        },
        players,
        frames: result.frames.clone(),
    }
}

/// One CSV line per game.
#[derive(Debug, Serialize)]
pub struct CsvSummaryRow {
    pub game_id: u32,
    pub seed: u64,
    pub mode: String,
    pub players: usize,
    pub profile: String,
    pub outcome: String,
    pub rounds: u32,
    pub survivors: usize,
    pub eliminations: usize,
    pub duration_ms: f64,
}

impl From<&GameMetrics> for CsvSummaryRow {
    fn from(metrics: &GameMetrics) -> Self {
        CsvSummaryRow {
            game_id: metrics.game_id,
            seed: metrics.seed,
            mode: metrics.config.mode.clone(),
            players: metrics.config.players,
            profile: metrics.config.profile.clone(),
            outcome: outcome_name(metrics.result.outcome).to_owned(),
            rounds: metrics.result.rounds,
            survivors: metrics.result.survivors,
            eliminations: metrics.result.eliminations,
            duration_ms: metrics.result.duration_ms,
        }
    }
}

pub fn outcome_name(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::Lovers => "lovers",
        Outcome::AwakenedWolf => "awakened_wolf",
        Outcome::Village => "village",
        Outcome::Wolves => "wolves",
    }
}
