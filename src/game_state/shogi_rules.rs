//! Canonical shogi-rule constants.
//!
//! Starting position, promotion-zone geometry and the thresholds used by the
//! draw and game-length rules.

/// Standard starting position, board rank 9 first, reserves bracketed.
pub const STARTING_POSITION: &str =
    "lnsgkgsnl/1r5b1/ppppppppp/9/9/9/PPPPPPPPP/1B5R1/LNSGKGSNL[-] w 0 1";

/// Number of ranks nearest the opponent in which pieces may promote.
pub const PROMOTION_ZONE_DEPTH: u8 = 3;

/// How many history entries a repetition query looks back over.
pub const REPETITION_LOOKBACK: usize = 100;

/// Occurrences of one position that make a repetition draw.
pub const DEFAULT_REPETITION_THRESHOLD: usize = 4;

/// Threshold used when classifying the game status of the current position.
pub const STRICT_REPETITION_THRESHOLD: usize = 3;

/// Fullmove number after which the game is declared drawn.
pub const MAX_FULLMOVES: u16 = 450;

/// History length after which the game is declared drawn.
pub const MAX_HISTORY_LEN: usize = 900;

/// Impasse points a side needs to claim the win.
pub const IMPASSE_WIN_POINTS: u32 = 24;
