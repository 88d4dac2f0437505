//! Error types shared by the codec, the move generator, and the engines.

use thiserror::Error;

/// Malformed serialized position text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("position text needs at least 3 fields, found {0}")]
    MissingFields(usize),
    #[error("board layout must contain 9 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} does not sum to 9 files")]
    RankWidth { rank: usize },
    #[error("invalid piece character '{0}' in board layout")]
    InvalidPiece(char),
    #[error("'+' marker is not followed by a promotable piece")]
    InvalidPromotion,
    #[error("reserve field must be bracketed after the board layout")]
    MissingReserve,
    #[error("invalid reserve piece '{0}'")]
    InvalidReserve(char),
    #[error("invalid side-to-move field: {0}")]
    InvalidSide(String),
    #[error("invalid move counter: {0}")]
    InvalidCounter(String),
    #[error("expected exactly one king per side")]
    KingCount,
}

/// Move notation that matches none of the currently generated legal moves.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("illegal move: {notation}")]
pub struct IllegalMoveError {
    pub notation: String,
}

/// Failure raised while expanding a position. Only invariant violations end up
/// here; illegal candidates are filtered silently.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveGenerationError {
    #[error("invalid game state: {0}")]
    InvalidState(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    IllegalMove(#[from] IllegalMoveError),
    #[error(transparent)]
    MoveGeneration(#[from] MoveGenerationError),
    #[error("invalid option {name}={value}")]
    InvalidOption { name: String, value: String },
}
