//! Engine abstraction layer.
//!
//! Defines common input parameters and output payloads so different engine
//! strategies can be selected at runtime behind a single trait interface.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::MoveDescription;

#[derive(Debug, Clone, Default)]
pub struct GoParams {
    /// Remaining thinking time in seconds.
    pub time_budget_secs: Option<f64>,
    /// Moves left until the next time control.
    pub moves_to_go: Option<u16>,
}

#[derive(Debug, Clone, Default)]
pub struct EngineOutput {
    pub best_move: Option<MoveDescription>,
    pub info_lines: Vec<String>,
}

pub trait Engine: Send {
    fn name(&self) -> &str;

    fn new_game(&mut self) {}

    fn set_option(&mut self, _name: &str, _value: &str) -> Result<(), String> {
        Ok(())
    }

    fn set_stop_signal(&mut self, _stop_signal: Option<Arc<AtomicBool>>) {}

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, String>;
}
