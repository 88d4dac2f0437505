//! Crate root module declarations for the Plum Shogi engine project.
//!
//! This file exposes all top-level subsystems (game state, move generation,
//! search, engines, and utility helpers) so binaries, tests, and external
//! tooling can import stable module paths.

pub mod errors;

pub mod game_state {
    pub mod game_state;
    pub mod shogi_rules;
    pub mod shogi_types;
}

pub mod moves {
    pub mod move_descriptions;
    pub mod piece_movement;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_moves_board;
    pub mod legal_moves_drops;
    pub mod move_generator;
    pub mod perft;
    pub mod side_profile;
}

pub mod search {
    pub mod board_scoring;
    pub mod game_status;
    pub mod history;
    pub mod rollout;
    pub mod zobrist;
}

pub mod engines {
    pub mod engine_config;
    pub mod engine_random;
    pub mod engine_rollout;
    pub mod engine_trait;
    pub mod time_management;
}

pub mod utils {
    pub mod notation;
    pub mod position_generator;
    pub mod position_parser;
    pub mod render_game_state;
}
