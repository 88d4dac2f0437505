use crate::game_state::game_state::GameState;
use crate::move_generation::move_generator::{GeneratedMove, MoveGenResult, MoveGenerator};
use crate::utils::notation::move_to_notation;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: usize,
    pub captures: usize,
    pub drops: usize,
    pub promotions: usize,
    pub checks: usize,
}

impl PerftCounts {
    fn record_leaf(&mut self, mv: &GeneratedMove) {
        self.nodes += 1;
        if mv.annotations.is_capture {
            self.captures += 1;
        }
        if mv.annotations.is_drop {
            self.drops += 1;
        }
        if mv.annotations.is_promotion {
            self.promotions += 1;
        }
        if mv.annotations.gives_check {
            self.checks += 1;
        }
    }
}

pub fn perft<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    let mut total = PerftCounts::default();

    for mv in root_moves {
        perft_recurse(generator, &mv, depth, 1, &mut total)?;
    }

    Ok(total)
}

/// Leaf counts below each root move, keyed by the move's notation, in
/// generation order.
pub fn perft_divide<G: MoveGenerator>(
    generator: &G,
    game_state: &GameState,
    depth: u8,
) -> MoveGenResult<Vec<(String, usize)>> {
    if depth == 0 {
        return Ok(Vec::new());
    }

    let root_moves = generator.generate_legal_moves(game_state)?;
    let mut divided = Vec::with_capacity(root_moves.len());

    for mv in root_moves {
        let mut counts = PerftCounts::default();
        perft_recurse(generator, &mv, depth, 1, &mut counts)?;
        divided.push((move_to_notation(&mv.move_description), counts.nodes));
    }

    Ok(divided)
}

fn perft_recurse<G: MoveGenerator>(
    generator: &G,
    mv: &GeneratedMove,
    search_depth: u8,
    current_depth: u8,
    counts: &mut PerftCounts,
) -> MoveGenResult<()> {
    if current_depth == search_depth {
        counts.record_leaf(mv);
        return Ok(());
    }

    let moves = generator.generate_legal_moves(&mv.game_after_move)?;
    for child in moves {
        perft_recurse(generator, &child, search_depth, current_depth + 1, counts)?;
    }

    Ok(())
}
