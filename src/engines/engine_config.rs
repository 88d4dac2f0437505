use crate::game_state::shogi_rules::{DEFAULT_REPETITION_THRESHOLD, STRICT_REPETITION_THRESHOLD};
use crate::search::rollout::DEFAULT_MAX_ROLLOUT_PLY;

/// Tunables of the rollout engine. Every field can also be changed at runtime
/// through `Engine::set_option`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Occurrences after which a candidate move counts as a repetition draw.
    pub repetition_threshold: usize,
    /// Occurrences after which the current position ends the game.
    pub strict_repetition_threshold: usize,
    /// Pick uniformly among legal moves instead of searching.
    pub random_mode: bool,
    /// Fixed RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub max_rollout_ply: u32,
    pub default_time_budget_secs: f64,
    pub default_moves_to_go: u16,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            repetition_threshold: DEFAULT_REPETITION_THRESHOLD,
            strict_repetition_threshold: STRICT_REPETITION_THRESHOLD,
            random_mode: false,
            seed: None,
            max_rollout_ply: DEFAULT_MAX_ROLLOUT_PLY,
            default_time_budget_secs: 10.0,
            default_moves_to_go: 40,
        }
    }
}

impl EngineConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}
