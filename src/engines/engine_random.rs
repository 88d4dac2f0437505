//! Random-move engine.
//!
//! Plays a uniformly drawn legal move. Backs the rollout engine's
//! `RandomMode` and serves as a weak sparring partner in tests.

use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::SeedableRng;

use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_generator::FastLegalMoveGenerator;
use crate::move_generation::move_generator::MoveGenerator;

pub struct RandomEngine {
    move_generator: FastLegalMoveGenerator,
    rng: StdRng,
}

impl RandomEngine {
    /// Seeded from OS entropy.
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            move_generator: FastLegalMoveGenerator,
            rng,
        }
    }

    /// Uniform index into a list of `len` moves, `None` when it is empty.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        (0..len).choose(&mut self.rng)
    }
}

impl Default for RandomEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine for RandomEngine {
    fn name(&self) -> &str {
        "PlumShogi Random"
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        _params: &GoParams,
    ) -> Result<EngineOutput, String> {
        let legal_moves = self
            .move_generator
            .generate_legal_moves(game_state)
            .map_err(|e| e.to_string())?;

        let mut out = EngineOutput::default();
        out.info_lines.push(format!(
            "info string random_engine legal_moves {}",
            legal_moves.len()
        ));

        out.best_move = self
            .pick_index(legal_moves.len())
            .map(|index| legal_moves[index].move_description);
        Ok(out)
    }
}
