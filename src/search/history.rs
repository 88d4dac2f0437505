//! Game history and repetition detection.
//!
//! Positions are stored in play order together with a cursor. Undo moves the
//! cursor back without dropping entries; the next record overwrites everything
//! after the cursor. Repetition queries compare Zobrist keys computed with the
//! history's own table, so callers never have to refresh keys themselves.

use std::sync::Arc;

use crate::game_state::game_state::GameState;
use crate::game_state::shogi_rules::{
    DEFAULT_REPETITION_THRESHOLD, MAX_HISTORY_LEN, REPETITION_LOOKBACK,
};
use crate::search::zobrist::{compute_zobrist_key, ZobristTables};

#[derive(Debug, Clone)]
pub struct History {
    tables: Arc<ZobristTables>,
    entries: Vec<GameState>,
    // Number of live entries; entries[cursor - 1] is the current position.
    cursor: usize,
    threshold: usize,
}

impl History {
    pub fn new(tables: Arc<ZobristTables>) -> Self {
        Self::with_threshold(tables, DEFAULT_REPETITION_THRESHOLD)
    }

    pub fn with_threshold(tables: Arc<ZobristTables>, threshold: usize) -> Self {
        Self {
            tables,
            entries: Vec::new(),
            cursor: 0,
            threshold,
        }
    }

    #[inline]
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn set_threshold(&mut self, threshold: usize) {
        self.threshold = threshold;
    }

    #[inline]
    pub fn tables(&self) -> &Arc<ZobristTables> {
        &self.tables
    }

    /// Key of `game_state` under this history's table.
    #[inline]
    pub fn key_of(&self, game_state: &GameState) -> u64 {
        compute_zobrist_key(&self.tables, game_state)
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    pub fn current(&self) -> Option<&GameState> {
        self.cursor.checked_sub(1).map(|idx| &self.entries[idx])
    }

    /// Append `game_state` after the cursor, discarding any undone entries.
    pub fn record(&mut self, game_state: &GameState) {
        let mut entry = game_state.clone();
        entry.refresh_hash(&self.tables);
        self.entries.truncate(self.cursor);
        self.entries.push(entry);
        self.cursor += 1;
    }

    /// Record `game_state`, then report whether it now repeats often enough to
    /// be a draw under the configured threshold.
    pub fn record_and_check_draw(&mut self, game_state: &GameState) -> bool {
        self.record(game_state);
        self.is_draw(game_state, self.threshold)
    }

    /// True once `game_state` occurs at least `threshold` times among the last
    /// `REPETITION_LOOKBACK` recorded positions.
    pub fn is_draw(&self, game_state: &GameState, threshold: usize) -> bool {
        let key = self.key_of(game_state);
        let repeats = self.entries[..self.cursor]
            .iter()
            .rev()
            .take(REPETITION_LOOKBACK)
            .filter(|entry| entry.zobrist_key == key)
            .count();
        repeats >= threshold
    }

    /// Step back one ply. Returns the position now current; with nothing to
    /// undo the cursor stays put.
    pub fn undo(&mut self) -> Option<&GameState> {
        if self.cursor > 1 {
            self.cursor -= 1;
        }
        self.current()
    }

    /// Step back two plies, taking back a full move of the side to move.
    pub fn remove(&mut self) -> Option<&GameState> {
        if self.cursor > 2 {
            self.cursor -= 2;
        }
        self.current()
    }

    #[inline]
    pub fn is_too_long(&self) -> bool {
        self.cursor > MAX_HISTORY_LEN
    }
}
