//! Randomized playouts.
//!
//! A rollout walks one random line from a position for a bounded number of
//! plies and reports a Light-positive value: scaled material at the horizon,
//! a large ply-discounted bonus for a mate found on the way, or a small
//! constant for a side with no moves that is not in check.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Instant;

use rand::Rng;

use crate::game_state::{game_state::GameState, shogi_types::Color};
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::move_generator::{MoveGenResult, MoveGenerator};
use crate::search::board_scoring::BoardScorer;

/// Magnitude unit of mate scores.
pub const INF: f64 = 1000.0;

/// Value of a leaf where the side to move has no moves and is not in check.
pub const STALEMATE_SCORE: f64 = 1.0;

/// Rollouts past this ply are abandoned.
pub const DEFAULT_MAX_ROLLOUT_PLY: u32 = 90;

/// Mate bonus for a mate found `ply` plies below the rollout root.
pub fn mate_bonus(ply: u32) -> f64 {
    match ply {
        0 => 50.0,
        1 => 40.0,
        2 => 30.0,
        3 => 25.0,
        4..=20 => f64::from(21 - ply),
        _ => 1.0,
    }
}

/// Per-search state shared by every rollout of one `think` call.
pub struct RolloutContext<'a, R: Rng> {
    pub deadline: Instant,
    pub stop_signal: Option<&'a AtomicBool>,
    pub rng: &'a mut R,
    pub max_ply: u32,
    pub nodes: u64,
    /// Latched once the deadline, the stop signal or the ply cap cut a rollout short.
    pub stopped: bool,
}

impl<'a, R: Rng> RolloutContext<'a, R> {
    pub fn new(deadline: Instant, stop_signal: Option<&'a AtomicBool>, rng: &'a mut R) -> Self {
        Self {
            deadline,
            stop_signal,
            rng,
            max_ply: DEFAULT_MAX_ROLLOUT_PLY,
            nodes: 0,
            stopped: false,
        }
    }

    /// Deadline passed or cancellation requested.
    #[inline]
    pub fn out_of_time(&self) -> bool {
        Instant::now() > self.deadline
            || self
                .stop_signal
                .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Play one random line of at most `depth` plies from `start`.
///
/// Returns `0.0` and latches `ctx.stopped` when the search runs out of time or
/// the line grows past `ctx.max_ply`.
pub fn rollout<G, S, R>(
    generator: &G,
    scorer: &S,
    start: &GameState,
    depth: u32,
    ctx: &mut RolloutContext<'_, R>,
) -> MoveGenResult<f64>
where
    G: MoveGenerator,
    S: BoardScorer,
    R: Rng,
{
    let mut current = start.clone();
    let mut depth = depth;
    let mut ply = 0u32;

    loop {
        ctx.nodes += 1;

        if ply > ctx.max_ply || ctx.out_of_time() {
            ctx.stopped = true;
            return Ok(0.0);
        }

        if depth < 1 {
            return Ok(scorer.score(&current));
        }

        let mut moves = generator.generate_legal_moves(&current)?;
        if moves.is_empty() {
            let mover = current.side_to_move;
            if !is_king_in_check(&current, mover) {
                return Ok(STALEMATE_SCORE);
            }
            let magnitude = 0.1 * mate_bonus(ply) * INF;
            let jitter: f64 = ctx.rng.random();
            return Ok(match mover {
                Color::Light => -magnitude + jitter,
                Color::Dark => magnitude + jitter,
            });
        }

        let pick = ctx.rng.random_range(0..moves.len());
        current = moves.swap_remove(pick).game_after_move;
        depth -= 1;
        ply += 1;
    }
}
