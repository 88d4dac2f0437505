//! Zobrist hashing support for position identity and repetition tracking.
//!
//! Keys come from a splitmix64 stream over a fixed seed, so the standard table
//! is identical across runs. Every board cell contributes one key for its
//! current content (empty included) and the side to move adds one more.
//! Reserves are not part of the key.

use std::sync::OnceLock;

use crate::game_state::{game_state::GameState, shogi_types::*};

/// Cell states per square: 14 kinds per side plus empty.
pub const CELL_STATES: usize = 29;

const STANDARD_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristTables {
    cell_keys: [[u64; CELL_STATES]; NUM_SQUARES],
    side_keys: [u64; 2],
}

static STANDARD_TABLES: OnceLock<ZobristTables> = OnceLock::new();

impl ZobristTables {
    pub fn from_seed(seed: u64) -> Self {
        let mut state = seed;

        let mut cell_keys = [[0u64; CELL_STATES]; NUM_SQUARES];
        for square in &mut cell_keys {
            for key in square {
                *key = next_random_u64(&mut state);
            }
        }

        let side_keys = [next_random_u64(&mut state), next_random_u64(&mut state)];

        Self {
            cell_keys,
            side_keys,
        }
    }

    /// Process-wide table, built once on first use and never mutated.
    #[inline]
    pub fn standard() -> &'static ZobristTables {
        STANDARD_TABLES.get_or_init(|| ZobristTables::from_seed(STANDARD_SEED))
    }

    #[inline]
    pub fn cell_key(&self, square: Square, cell: i8) -> u64 {
        let state = (cell as i16 + PieceKind::King.code() as i16) as usize;
        self.cell_keys[square as usize][state]
    }

    #[inline]
    pub fn side_key(&self, color: Color) -> u64 {
        self.side_keys[color.index()]
    }
}

#[inline]
fn next_random_u64(state: &mut u64) -> u64 {
    // splitmix64
    *state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
    let mut z = *state;
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Compute the full position key from scratch.
pub fn compute_zobrist_key(tables: &ZobristTables, game_state: &GameState) -> u64 {
    let mut key = tables.side_key(game_state.side_to_move);
    for (square, &cell) in game_state.cells.iter().enumerate() {
        key ^= tables.cell_key(square as Square, cell);
    }
    key
}
