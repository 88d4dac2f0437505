//! Randomized-rollout engine.
//!
//! Every root candidate is scored by summing random playouts until the
//! per-move deadline; the side to move then plays the candidate with the best
//! Light-positive total (max for Light, min for Dark). The engine also owns
//! the game history, so repetition draws are known before any search starts.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use log::{debug, trace, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::engines::engine_config::EngineConfig;
use crate::engines::engine_random::RandomEngine;
use crate::engines::engine_trait::{Engine, EngineOutput, GoParams};
use crate::engines::time_management::{resolve_go_params, search_deadline};
use crate::errors::{EngineError, IllegalMoveError};
use crate::game_state::game_state::GameState;
use crate::game_state::shogi_types::{Color, TerminalClass};
use crate::move_generation::legal_move_generator::{FastLegalMoveGenerator, LegalMoveGenerator};
use crate::move_generation::move_generator::{GeneratedMove, MoveGenerationError, MoveGenerator};
use crate::moves::move_descriptions::MoveDescription;
use crate::search::board_scoring::MaterialScorer;
use crate::search::game_status::{classify, GameStatus};
use crate::search::history::History;
use crate::search::rollout::{rollout, RolloutContext};
use crate::search::zobrist::ZobristTables;
use crate::utils::notation::move_to_notation;

/// Outcome of one [`RolloutEngine::think`] call.
#[derive(Debug, Clone)]
pub struct ThinkResult {
    /// Position after the chosen move; `None` when the game was already over.
    pub chosen: Option<GameState>,
    pub best_move: Option<MoveDescription>,
    pub notation: Option<String>,
    /// Status of the position the engine leaves behind.
    pub status: GameStatus,
    pub info_lines: Vec<String>,
}

struct Candidate {
    generated: GeneratedMove,
    known_draw: bool,
    score: f64,
}

#[derive(Debug, Clone, Copy, Default)]
struct SearchSummary {
    completed_passes: usize,
    nodes: u64,
}

pub struct RolloutEngine {
    config: EngineConfig,
    root_generator: LegalMoveGenerator,
    rollout_generator: FastLegalMoveGenerator,
    scorer: MaterialScorer,
    history: History,
    position: GameState,
    rng: StdRng,
    // Serves `RandomMode`; reseeded together with `rng`.
    random: RandomEngine,
    stop_signal: Arc<AtomicBool>,
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

fn seeded_random_engine(seed: Option<u64>) -> RandomEngine {
    match seed {
        Some(seed) => RandomEngine::with_seed(seed),
        None => RandomEngine::new(),
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl RolloutEngine {
    pub fn new(config: EngineConfig) -> Self {
        let tables = Arc::new(ZobristTables::standard().clone());
        let history = History::with_threshold(tables, config.repetition_threshold);
        let rng = seeded_rng(config.seed);
        let random = seeded_random_engine(config.seed);
        let mut engine = Self {
            config,
            root_generator: LegalMoveGenerator,
            rollout_generator: FastLegalMoveGenerator,
            scorer: MaterialScorer,
            history,
            position: GameState::new_game(),
            rng,
            random,
            stop_signal: Arc::new(AtomicBool::new(false)),
        };
        engine.set_position(GameState::new_game());
        engine
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(EngineConfig::with_seed(seed))
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn position(&self) -> &GameState {
        &self.position
    }

    #[inline]
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Shared cancellation flag polled between candidates and between plies.
    pub fn stop_signal(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.stop_signal)
    }

    /// Replace the current position and restart the history from it.
    pub fn set_position(&mut self, game_state: GameState) {
        let mut game_state = game_state;
        game_state.refresh_hash(self.history.tables());
        self.history.reset();
        self.history.record(&game_state);
        self.position = game_state;
    }

    pub fn set_position_str(&mut self, text: &str) -> Result<(), EngineError> {
        let game_state = GameState::from_position_str(text)?;
        self.set_position(game_state);
        Ok(())
    }

    pub fn new_game(&mut self) {
        if let Some(seed) = self.config.seed {
            self.rng = StdRng::seed_from_u64(seed);
            self.random = RandomEngine::with_seed(seed);
        }
        self.stop_signal.store(false, Ordering::Relaxed);
        self.set_position(GameState::new_game());
    }

    /// Successor of `game_state` reached by the legal move written as
    /// `notation`.
    pub fn apply_move_by_notation(
        game_state: &GameState,
        notation: &str,
    ) -> Result<GameState, IllegalMoveError> {
        let wanted = notation.trim();
        let illegal = || IllegalMoveError {
            notation: wanted.to_owned(),
        };

        let legal_moves = FastLegalMoveGenerator
            .generate_legal_moves(game_state)
            .map_err(|err| {
                warn!("move generation failed while matching {wanted}: {err}");
                illegal()
            })?;

        let mut next = legal_moves
            .into_iter()
            .find(|generated| move_to_notation(&generated.move_description) == wanted)
            .map(|generated| generated.game_after_move)
            .ok_or_else(illegal)?;
        next.refresh_hash(ZobristTables::standard());
        Ok(next)
    }

    /// Play `notation` from the current position and record it. The position
    /// is left unchanged on error.
    pub fn make_move(&mut self, notation: &str) -> Result<(), EngineError> {
        let next = Self::apply_move_by_notation(&self.position, notation)?;
        self.history.record(&next);
        self.position = next;
        Ok(())
    }

    /// Step back one ply.
    pub fn history_undo(&mut self) -> &GameState {
        if let Some(previous) = self.history.undo().cloned() {
            self.position = previous;
        }
        &self.position
    }

    /// Step back two plies, returning the move to the same side.
    pub fn history_remove(&mut self) -> &GameState {
        if let Some(previous) = self.history.remove().cloned() {
            self.position = previous;
        }
        &self.position
    }

    pub fn set_option(&mut self, name: &str, value: &str) -> Result<(), EngineError> {
        let invalid = || EngineError::InvalidOption {
            name: name.to_owned(),
            value: value.to_owned(),
        };

        if name.eq_ignore_ascii_case("RepetitionThreshold") {
            let parsed = value.trim().parse::<usize>().map_err(|_| invalid())?;
            self.config.repetition_threshold = parsed.max(1);
            self.history.set_threshold(self.config.repetition_threshold);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("StrictRepetition") {
            let parsed = value.trim().parse::<usize>().map_err(|_| invalid())?;
            self.config.strict_repetition_threshold = parsed.max(1);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("RandomMode") {
            self.config.random_mode = parse_flag(value).ok_or_else(invalid)?;
            return Ok(());
        }
        if name.eq_ignore_ascii_case("Seed") {
            let parsed = value.trim().parse::<u64>().map_err(|_| invalid())?;
            self.config.seed = Some(parsed);
            self.rng = StdRng::seed_from_u64(parsed);
            self.random = RandomEngine::with_seed(parsed);
            return Ok(());
        }
        if name.eq_ignore_ascii_case("MaxRolloutPly") {
            let parsed = value.trim().parse::<u32>().map_err(|_| invalid())?;
            self.config.max_rollout_ply = parsed.max(1);
            return Ok(());
        }

        debug!("ignoring unknown option {name}");
        Ok(())
    }

    /// Choose, play and record a move for the side to move.
    ///
    /// Running out of time or being cancelled is not an error: the best
    /// candidate found so far is played, and a legal move is always returned
    /// while one exists.
    pub fn think(
        &mut self,
        time_budget_secs: f64,
        moves_to_go: u16,
    ) -> Result<ThinkResult, EngineError> {
        let deadline = search_deadline(time_budget_secs, moves_to_go);
        let root = self.position.clone();
        let root_moves = self.root_generator.generate_legal_moves(&root)?;

        let mut info_lines = vec![format!(
            "info string rollout_engine legal_moves {}",
            root_moves.len()
        )];

        let status = classify(
            &root,
            root_moves.len(),
            &self.history,
            self.config.strict_repetition_threshold,
        );
        if status.is_over() {
            debug!("no move searched, game already over: {status}");
            self.position.terminal_class = status.terminal_class_for(root.side_to_move);
            info_lines.push(format!("info string rollout_engine game_over {status}"));
            return Ok(ThinkResult {
                chosen: None,
                best_move: None,
                notation: None,
                status,
                info_lines,
            });
        }

        let mut candidates: Vec<Candidate> = root_moves
            .into_iter()
            .map(|mut generated| {
                let known_draw = self
                    .history
                    .is_draw(&generated.game_after_move, self.config.repetition_threshold);
                if known_draw {
                    generated.game_after_move.terminal_class = TerminalClass::Draw;
                }
                Candidate {
                    generated,
                    known_draw,
                    score: 0.0,
                }
            })
            .collect();

        let draws = candidates.iter().filter(|c| c.known_draw).count();
        if draws > 0 {
            info_lines.push(format!("info string rollout_engine known_draws {draws}"));
        }

        let pick = if let Some(index) = self.find_immediate_mate(&candidates)? {
            info_lines.push("info string rollout_engine immediate_mate".to_owned());
            index
        } else if self.config.random_mode {
            info_lines.push("info string rollout_engine random_mode".to_owned());
            self.random.pick_index(candidates.len()).ok_or_else(|| {
                MoveGenerationError::InvalidState("no candidate to pick from".to_owned())
            })?
        } else {
            let summary = self.run_passes(&mut candidates, deadline)?;
            info_lines.push(format!(
                "info string rollout_engine passes {} nodes {}",
                summary.completed_passes, summary.nodes
            ));
            select_best(&candidates, root.side_to_move)
        };

        let candidate = &candidates[pick];
        let best_move = candidate.generated.move_description;
        let notation = move_to_notation(&best_move);
        let mut chosen = candidate.generated.game_after_move.clone();
        chosen.refresh_hash(self.history.tables());
        info_lines.push(format!(
            "info string rollout_engine best {notation} score {:.3}",
            candidate.score
        ));
        debug!("{notation} chosen with score {:.3}", candidate.score);

        self.history.record(&chosen);
        self.position = chosen.clone();
        self.stop_signal.store(false, Ordering::Relaxed);

        let replies = self.rollout_generator.generate_legal_moves(&chosen)?;
        let status = classify(
            &chosen,
            replies.len(),
            &self.history,
            self.config.strict_repetition_threshold,
        );
        if status.is_over() {
            info_lines.push(format!("info string rollout_engine game_over {status}"));
            chosen.terminal_class = status.terminal_class_for(chosen.side_to_move);
            self.position.terminal_class = chosen.terminal_class;
        }

        Ok(ThinkResult {
            chosen: Some(chosen),
            best_move: Some(best_move),
            notation: Some(notation),
            status,
            info_lines,
        })
    }

    // A checking candidate that leaves the opponent without replies is mate.
    fn find_immediate_mate(&self, candidates: &[Candidate]) -> Result<Option<usize>, EngineError> {
        for (index, candidate) in candidates.iter().enumerate() {
            if !candidate.generated.annotations.gives_check {
                continue;
            }
            let replies = self
                .rollout_generator
                .generate_legal_moves(&candidate.generated.game_after_move)?;
            if replies.is_empty() {
                return Ok(Some(index));
            }
        }
        Ok(None)
    }

    // Sampling passes over every non-draw candidate until the deadline. Only
    // complete passes are committed, except a first pass cut short.
    fn run_passes(
        &mut self,
        candidates: &mut [Candidate],
        deadline: Instant,
    ) -> Result<SearchSummary, EngineError> {
        let searchable = candidates.iter().filter(|c| !c.known_draw).count();
        if searchable == 0 {
            return Ok(SearchSummary::default());
        }

        let stop_signal = Arc::clone(&self.stop_signal);
        let mut ctx = RolloutContext::new(deadline, Some(stop_signal.as_ref()), &mut self.rng);
        ctx.max_ply = self.config.max_rollout_ply;

        let mut pass_scores = vec![0.0; candidates.len()];
        let mut completed_passes = 0usize;

        loop {
            pass_scores.iter_mut().for_each(|score| *score = 0.0);
            let mut cut_short = false;

            for (index, candidate) in candidates.iter().enumerate() {
                if candidate.known_draw {
                    continue;
                }
                let depth = 3 + ctx.rng.random_range(0..20u32);
                pass_scores[index] += rollout(
                    &self.rollout_generator,
                    &self.scorer,
                    &candidate.generated.game_after_move,
                    depth,
                    &mut ctx,
                )?;

                if ctx.stopped || ctx.out_of_time() {
                    cut_short = true;
                    break;
                }
            }

            if cut_short {
                if completed_passes == 0 {
                    commit_pass(candidates, &pass_scores);
                }
                break;
            }

            commit_pass(candidates, &pass_scores);
            completed_passes += 1;
            trace!(
                "pass {completed_passes} done after {} nodes over {searchable} candidates",
                ctx.nodes
            );
        }

        debug!(
            "rollout search finished: {completed_passes} passes, {} nodes",
            ctx.nodes
        );
        Ok(SearchSummary {
            completed_passes,
            nodes: ctx.nodes,
        })
    }
}

impl Default for RolloutEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

fn commit_pass(candidates: &mut [Candidate], pass_scores: &[f64]) {
    for (candidate, score) in candidates.iter_mut().zip(pass_scores) {
        candidate.score += score;
    }
}

// Light maximizes and Dark minimizes; ties keep generation order.
fn select_best(candidates: &[Candidate], mover: Color) -> usize {
    let mut best = 0;
    for (index, candidate) in candidates.iter().enumerate().skip(1) {
        let better = match mover {
            Color::Light => candidate.score > candidates[best].score,
            Color::Dark => candidate.score < candidates[best].score,
        };
        if better {
            best = index;
        }
    }
    best
}

impl Engine for RolloutEngine {
    fn name(&self) -> &str {
        "PlumShogi Rollout"
    }

    fn new_game(&mut self) {
        RolloutEngine::new_game(self);
    }

    fn set_option(&mut self, name: &str, value: &str) -> Result<(), String> {
        RolloutEngine::set_option(self, name, value).map_err(|e| e.to_string())
    }

    fn set_stop_signal(&mut self, stop_signal: Option<Arc<AtomicBool>>) {
        self.stop_signal = stop_signal.unwrap_or_else(|| Arc::new(AtomicBool::new(false)));
    }

    fn choose_move(
        &mut self,
        game_state: &GameState,
        params: &GoParams,
    ) -> Result<EngineOutput, String> {
        if game_state.to_position_string() != self.position.to_position_string() {
            self.set_position(game_state.clone());
        }

        let resolved = resolve_go_params(params, &self.config);
        let result = self
            .think(
                resolved
                    .time_budget_secs
                    .unwrap_or(self.config.default_time_budget_secs),
                resolved
                    .moves_to_go
                    .unwrap_or(self.config.default_moves_to_go),
            )
            .map_err(|e| e.to_string())?;

        Ok(EngineOutput {
            best_move: result.best_move,
            info_lines: result.info_lines,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::search::game_status::DrawReason;

    fn init_logger() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn engine_at(text: &str, seed: u64) -> RolloutEngine {
        init_logger();
        let mut engine = RolloutEngine::with_seed(seed);
        engine
            .set_position_str(text)
            .expect("position should parse");
        engine
    }

    fn assert_finds(text: &str, expected: &str) {
        for seed in [1, 2, 3] {
            let mut engine = engine_at(text, seed);
            let result = engine.think(1.5, 40).expect("think should succeed");
            assert_eq!(result.notation.as_deref(), Some(expected));
            assert!(matches!(result.status, GameStatus::Mate { .. }));

            let chosen = result.chosen.expect("a mating move was played");
            assert_eq!(chosen.terminal_class, TerminalClass::Loss);
            assert_eq!(engine.position().terminal_class, TerminalClass::Loss);
        }
    }

    // Scores every candidate by sampling alone and returns the pick.
    fn sampled_choice(text: &str, seed: u64) -> String {
        let mut engine = engine_at(text, seed);
        let root = engine.position().clone();
        let mut candidates: Vec<Candidate> = LegalMoveGenerator
            .generate_legal_moves(&root)
            .expect("move generation should succeed")
            .into_iter()
            .map(|generated| Candidate {
                generated,
                known_draw: false,
                score: 0.0,
            })
            .collect();

        let deadline = Instant::now() + Duration::from_millis(300);
        let summary = engine
            .run_passes(&mut candidates, deadline)
            .expect("sampling should succeed");
        assert!(summary.completed_passes >= 1);

        let best = select_best(&candidates, root.side_to_move);
        move_to_notation(&candidates[best].generated.move_description)
    }

    #[test]
    fn sampling_alone_ranks_mate_in_one_first() {
        let cases = [
            ("9/9/9/9/9/9/4K4/R4R3/6k2[-] w 0 1", "a2a1"),
            ("3k5/2P1P4/3K5/9/1N7/9/9/9/9[-] w 0 1", "b5c7="),
            ("6K2/r4r3/4k4/9/9/9/9/9/9[-] b 0 1", "a8a9"),
        ];
        for (text, expected) in cases {
            for seed in [1, 2, 3, 4] {
                assert_eq!(sampled_choice(text, seed), expected, "{text} seed {seed}");
            }
        }
    }

    #[test]
    fn selection_maximizes_for_light_and_minimizes_for_dark() {
        let game = GameState::new_game();
        let mut candidates: Vec<Candidate> = LegalMoveGenerator
            .generate_legal_moves(&game)
            .expect("move generation should succeed")
            .into_iter()
            .take(3)
            .map(|generated| Candidate {
                generated,
                known_draw: false,
                score: 0.0,
            })
            .collect();
        candidates[0].score = 2.0;
        candidates[1].score = -4.0;
        candidates[2].score = 2.0;

        assert_eq!(select_best(&candidates, Color::Light), 0);
        assert_eq!(select_best(&candidates, Color::Dark), 1);
    }

    #[test]
    fn finds_knight_mate_without_promotion() {
        assert_finds("3k5/2P1P4/3K5/9/1N7/9/9/9/9[-] w 0 1", "b5c7=");
    }

    #[test]
    fn finds_gold_drop_mate() {
        assert_finds("4k4/9/4K4/9/9/9/9/9/9[G] w 0 1", "G@e8");
    }

    #[test]
    fn finds_rook_mate() {
        assert_finds("9/9/9/9/9/9/4K4/R4R3/6k2[-] w 0 1", "a2a1");
    }

    #[test]
    fn finds_rook_mate_for_dark() {
        assert_finds("6K2/r4r3/4k4/9/9/9/9/9/9[-] b 0 1", "a8a9");
    }

    #[test]
    fn think_plays_and_records_a_legal_move() {
        let mut engine = engine_at(crate::game_state::shogi_rules::STARTING_POSITION, 7);
        let result = engine.think(0.3, 40).expect("think should succeed");

        let notation = result.notation.expect("start position has moves");
        assert!(RolloutEngine::apply_move_by_notation(&GameState::new_game(), &notation).is_ok());
        assert_eq!(engine.history().len(), 2);
        assert_eq!(engine.position().side_to_move, Color::Dark);
        assert_eq!(result.status, GameStatus::Ongoing);
    }

    #[test]
    fn cancellation_still_returns_a_move() {
        let mut engine = engine_at(crate::game_state::shogi_rules::STARTING_POSITION, 11);
        let stop = engine.stop_signal();
        stop.store(true, Ordering::Relaxed);

        let started = Instant::now();
        let result = engine.think(600.0, 40).expect("think should succeed");
        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(result.chosen.is_some());
        assert!(!stop.load(Ordering::Relaxed));
    }

    #[test]
    fn random_mode_skips_search() {
        let mut engine = engine_at(crate::game_state::shogi_rules::STARTING_POSITION, 5);
        engine
            .set_option("randommode", "on")
            .expect("flag should parse");
        let result = engine.think(600.0, 40).expect("think should succeed");
        assert!(result.chosen.is_some());
        assert!(result
            .info_lines
            .iter()
            .any(|line| line.contains("random_mode")));
    }

    #[test]
    fn random_mode_is_reproducible_under_a_seed() {
        let play = || {
            let mut engine = engine_at(crate::game_state::shogi_rules::STARTING_POSITION, 21);
            engine
                .set_option("RandomMode", "true")
                .expect("flag should parse");
            (0..4)
                .map(|_| engine.think(1.0, 40).expect("think should succeed").notation)
                .collect::<Vec<_>>()
        };
        assert_eq!(play(), play());
    }

    #[test]
    fn mated_position_returns_no_move() {
        let mut engine = engine_at("9/9/9/9/9/9/4K4/5R3/R5k2[-] b 0 1", 3);
        let result = engine.think(1.0, 40).expect("think should succeed");
        assert!(result.chosen.is_none());
        assert_eq!(result.status, GameStatus::Mate { winner: Color::Light });
        assert_eq!(engine.history().len(), 1);
        assert_eq!(engine.position().terminal_class, TerminalClass::Loss);
    }

    #[test]
    fn strict_repetition_ends_the_game() {
        let mut engine = engine_at("k7r/9/9/9/9/9/9/9/K7R[-] w 0 1", 9);
        for _ in 0..2 {
            for notation in ["a1b1", "a9b9", "b1a1", "b9a9"] {
                engine.make_move(notation).expect("shuffle move is legal");
            }
        }
        let result = engine.think(1.0, 40).expect("think should succeed");
        assert!(result.chosen.is_none());
        assert_eq!(result.status, GameStatus::Draw(DrawReason::Repetition));
    }

    #[test]
    fn illegal_move_leaves_position_unchanged() {
        let mut engine = engine_at(crate::game_state::shogi_rules::STARTING_POSITION, 1);
        let before = engine.position().clone();

        let err = engine.make_move("a1a9").expect_err("rook cannot jump");
        assert_eq!(
            err,
            EngineError::IllegalMove(IllegalMoveError {
                notation: "a1a9".to_owned()
            })
        );
        assert_eq!(engine.position(), &before);
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn undo_and_remove_walk_back_through_history() {
        let mut engine = engine_at(crate::game_state::shogi_rules::STARTING_POSITION, 1);
        engine.make_move("c3c4").expect("pawn push is legal");
        engine.make_move("c7c6").expect("pawn push is legal");
        engine.make_move("g3g4").expect("pawn push is legal");

        assert_eq!(engine.history_undo().side_to_move, Color::Light);
        let start = engine.history_remove().to_position_string();
        assert_eq!(start, GameState::new_game().to_position_string());
        assert_eq!(engine.history().len(), 1);
    }

    #[test]
    fn options_validate_values() {
        let mut engine = RolloutEngine::with_seed(1);
        engine
            .set_option("RepetitionThreshold", "5")
            .expect("threshold should parse");
        assert_eq!(engine.config().repetition_threshold, 5);
        assert_eq!(engine.history().threshold(), 5);

        assert!(matches!(
            engine.set_option("Seed", "abc"),
            Err(EngineError::InvalidOption { .. })
        ));
        assert!(engine.set_option("Hash", "64").is_ok());
    }

    #[test]
    fn engine_trait_syncs_position() {
        init_logger();
        let mut engine = RolloutEngine::with_seed(4);
        let game = GameState::from_position_str("4k4/9/4K4/9/9/9/9/9/9[G] w 0 1")
            .expect("position should parse");
        let params = GoParams {
            time_budget_secs: Some(1.5),
            moves_to_go: Some(40),
        };
        let out = Engine::choose_move(&mut engine, &game, &params).expect("search should succeed");
        let best = out.best_move.expect("a mate exists");
        assert_eq!(move_to_notation(&best), "G@e8");
    }
}
