//! Per-move time budgeting.
//!
//! Callers pass the remaining time and moves-to-go; the engine turns them into
//! a search deadline.

use std::time::{Duration, Instant};

use crate::engines::engine_config::EngineConfig;
use crate::engines::engine_trait::GoParams;

pub const MIN_SEARCH_BUDGET: Duration = Duration::from_millis(1);

/// Fill unset fields of `params` from the engine defaults.
pub fn resolve_go_params(params: &GoParams, config: &EngineConfig) -> GoParams {
    GoParams {
        time_budget_secs: Some(
            params
                .time_budget_secs
                .unwrap_or(config.default_time_budget_secs),
        ),
        moves_to_go: Some(params.moves_to_go.unwrap_or(config.default_moves_to_go)),
    }
}

/// Spend 1/20 of the remaining time close to the time control, 1/30 otherwise.
pub fn search_budget(time_budget_secs: f64, moves_to_go: u16) -> Duration {
    let divisor = if moves_to_go < 10 { 20.0 } else { 30.0 };
    let secs = time_budget_secs / divisor;
    if !secs.is_finite() || secs <= 0.0 {
        return MIN_SEARCH_BUDGET;
    }
    Duration::try_from_secs_f64(secs)
        .unwrap_or(MIN_SEARCH_BUDGET)
        .max(MIN_SEARCH_BUDGET)
}

#[inline]
pub fn search_deadline(time_budget_secs: f64, moves_to_go: u16) -> Instant {
    Instant::now() + search_budget(time_budget_secs, moves_to_go)
}
