use crate::game_state::game_state::GameState;
use crate::moves::move_descriptions::MoveDescription;

pub use crate::errors::MoveGenerationError;

pub type MoveGenResult<T> = Result<T, MoveGenerationError>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveAnnotations {
    pub gives_check: bool,
    pub is_capture: bool,
    pub is_drop: bool,
    pub is_promotion: bool,
}

#[derive(Debug, Clone)]
pub struct GeneratedMove {
    pub move_description: MoveDescription,
    pub game_after_move: GameState,
    pub annotations: MoveAnnotations,
}

pub trait MoveGenerator: Send + Sync {
    fn generate_legal_moves(&self, game_state: &GameState) -> MoveGenResult<Vec<GeneratedMove>>;
}
