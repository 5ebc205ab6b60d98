// history.rs - Generation history and cycle avoidance
//
// A Session owns the current board plus a bounded window of the generations
// before it. A repeat within the last `depth` generations is treated as a
// short cycle and the board is reseeded instead.

use crate::codec;
use crate::config::LifeConfig;
use crate::grid::Board;
use rand::SeedableRng;
use rand::rngs::SmallRng;
use std::collections::VecDeque;
use tracing::{debug, info};

/// Last thing that changed the session's history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Advance,
    Reseed,
    Clear,
    Load,
    Resize,
}

/// What a single [`Session::advance`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The next generation was committed to history.
    Advanced,
    /// The next generation repeated one `period` generations back and was
    /// replaced by a fresh random board.
    Reseeded { period: usize },
}

pub struct Session {
    width: usize,
    height: usize,
    depth: usize,
    life_ratio: f64,
    life_border: f64,
    /// Oldest first; never empty.
    generations: VecDeque<Board>,
    generation: u64,
    reseeds: u64,
    last_action: Action,
    rng: SmallRng,
}

impl Session {
    /// Session seeded from OS entropy.
    pub fn new(config: &LifeConfig) -> Self {
        Self::with_rng(config, SmallRng::from_os_rng())
    }

    /// Deterministic session, for reproducible runs and tests.
    pub fn with_seed(config: &LifeConfig, seed: u64) -> Self {
        Self::with_rng(config, SmallRng::seed_from_u64(seed))
    }

    fn with_rng(config: &LifeConfig, rng: SmallRng) -> Self {
        let mut session = Self {
            width: config.width,
            height: config.height,
            depth: config.depth,
            life_ratio: config.life_ratio,
            life_border: config.life_border,
            generations: VecDeque::new(),
            generation: 0,
            reseeds: 0,
            last_action: Action::Reseed,
            rng,
        };
        session.reseed();
        session
    }

    /// The current (most recent) board.
    pub fn board(&self) -> &Board {
        // generations is never empty
        &self.generations[self.generations.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn set_depth(&mut self, depth: usize) {
        self.depth = depth;
        self.trim();
    }

    pub fn history_len(&self) -> usize {
        self.generations.len()
    }

    /// Generations committed since the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Times a cycle forced a reseed.
    pub fn reseeds(&self) -> u64 {
        self.reseeds
    }

    pub fn last_action(&self) -> Action {
        self.last_action
    }

    pub fn encode(&self) -> String {
        codec::encode(self.board())
    }

    fn restart(&mut self, board: Board, action: Action) {
        self.generations.clear();
        self.generations.push_back(board);
        self.generation = 0;
        self.last_action = action;
    }

    /// Replaces the history with a freshly randomized board.
    pub fn reseed(&mut self) {
        let board = Board::random(
            self.width,
            self.height,
            self.life_ratio,
            self.life_border,
            &mut self.rng,
        );
        info!(
            width = self.width,
            height = self.height,
            population = board.population(),
            "reseeded board"
        );
        self.restart(board, Action::Reseed);
    }

    /// Replaces the history with an all-dead board.
    pub fn clear(&mut self) {
        let board = Board::new(self.width, self.height);
        info!(width = self.width, height = self.height, "cleared board");
        self.restart(board, Action::Clear);
    }

    /// Adopts `board` (and its dimensions) as the only generation.
    pub fn load(&mut self, board: Board) {
        self.width = board.width();
        self.height = board.height();
        info!(
            width = self.width,
            height = self.height,
            population = board.population(),
            "loaded board"
        );
        self.restart(board, Action::Load);
    }

    /// Resizes the current board, seeding any new territory.
    pub fn resize(&mut self, width: usize, height: usize) {
        let current = &self.generations[self.generations.len() - 1];
        let board = current.resize(
            width,
            height,
            self.life_ratio,
            self.life_border,
            &mut self.rng,
        );
        info!(from_width = self.width, from_height = self.height, width, height, "resized board");
        self.width = width;
        self.height = height;
        self.restart(board, Action::Resize);
    }

    /// Flips one cell of the current board; out of range is ignored.
    pub fn toggle(&mut self, x: usize, y: usize) {
        if let Some(board) = self.generations.back_mut() {
            board.toggle(x, y);
        }
    }

    /// How many generations back `candidate` last appeared, counted from
    /// the slot it would be inserted into. The newest match wins.
    fn cycle_period(&self, candidate: &Board) -> Option<usize> {
        self.generations
            .iter()
            .rposition(|past| past.is_equal(candidate))
            .map(|index| self.generations.len() - index)
    }

    /// Steps one generation, or reseeds if the step closes a short cycle.
    pub fn advance(&mut self) -> Step {
        let candidate = self.board().next();

        if let Some(period) = self.cycle_period(&candidate) {
            if period <= self.depth {
                info!(period, generation = self.generation, "cycle detected");
                self.reseeds += 1;
                self.reseed();
                return Step::Reseeded { period };
            }
        }

        self.generations.push_back(candidate);
        self.generation += 1;
        self.last_action = Action::Advance;
        self.trim();
        debug!(
            generation = self.generation,
            history = self.generations.len(),
            "advanced"
        );
        Step::Advanced
    }

    /// Once the window grows past twice its bound, keep only the newest
    /// `max(1, depth)` generations.
    fn trim(&mut self) {
        let keep = self.depth.max(1);
        if self.generations.len() > 2 * keep {
            let excess = self.generations.len() - keep;
            self.generations.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const F: bool = false;
    const T: bool = true;

    fn config(depth: usize) -> LifeConfig {
        LifeConfig {
            width: 3,
            height: 3,
            depth,
            life_ratio: 0.0,
            life_border: 0.0,
            ..LifeConfig::default()
        }
    }

    fn blinker() -> Board {
        Board::from_cells(3, 3, vec![F, T, F, F, T, F, F, T, F])
    }

    #[test]
    fn new_session_holds_one_board() {
        let session = Session::with_seed(&config(4), 1);
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.board().width(), 3);
        assert_eq!(session.last_action(), Action::Reseed);
    }

    #[test]
    fn blinker_reseeds_within_depth() {
        let mut session = Session::with_seed(&config(2), 1);
        session.load(blinker());

        assert_eq!(session.advance(), Step::Advanced);
        assert_eq!(session.history_len(), 2);

        assert_eq!(session.advance(), Step::Reseeded { period: 2 });
        assert_eq!(session.history_len(), 1);
        assert!(!session.board().is_equal(&blinker()));
        assert_eq!(session.reseeds(), 1);
        assert_eq!(session.generation(), 0);
    }

    #[test]
    fn depth_zero_never_reseeds() {
        let mut session = Session::with_seed(&config(0), 1);
        session.load(blinker());

        assert_eq!(session.advance(), Step::Advanced);
        assert_eq!(session.history_len(), 2);
        assert_eq!(session.advance(), Step::Advanced);
        assert!(session.board().is_equal(&blinker()));
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.reseeds(), 0);
        assert_eq!(session.generation(), 2);
    }

    #[test]
    fn newest_repeat_decides_the_period() {
        let mut session = Session::with_seed(&config(2), 1);
        session.load(blinker());
        session.advance();

        // Edit the horizontal phase back into the vertical one: [A, A].
        for (x, y) in [(0, 1), (2, 1), (1, 0), (1, 2)] {
            session.toggle(x, y);
        }
        assert!(session.board().is_equal(&blinker()));
        assert_eq!(session.advance(), Step::Advanced);
        assert_eq!(session.history_len(), 3);

        // The vertical phase sits 3 back (past depth) and 2 back (within it).
        assert_eq!(session.advance(), Step::Reseeded { period: 2 });
    }

    #[test]
    fn depth_one_catches_still_life() {
        let mut session = Session::with_seed(&config(1), 1);
        session.load(Board::new(3, 3));
        assert_eq!(session.advance(), Step::Reseeded { period: 1 });
    }

    #[test]
    fn depth_one_lets_blinker_run() {
        let mut session = Session::with_seed(&config(1), 1);
        session.load(blinker());
        for _ in 0..10 {
            assert_eq!(session.advance(), Step::Advanced);
            assert!(session.history_len() <= 2);
        }
    }

    #[test]
    fn history_is_trimmed_to_depth() {
        let mut cfg = config(3);
        cfg.width = 20;
        cfg.height = 20;
        let mut session = Session::with_seed(&cfg, 1);
        // A glider travels without repeating on a 20x20 board for a while.
        session.load(crate::patterns::Pattern::find("Glider").expect("glider").place(20, 20));
        let mut max_len = 0;
        for _ in 0..20 {
            assert_eq!(session.advance(), Step::Advanced);
            max_len = max_len.max(session.history_len());
            assert!(session.history_len() >= 1);
        }
        assert_eq!(max_len, 6);
        assert!(session.history_len() <= 6);
    }

    #[test]
    fn clear_gives_dead_board() {
        let mut session = Session::with_seed(&config(2), 1);
        session.load(blinker());
        session.advance();
        session.clear();
        assert_eq!(session.history_len(), 1);
        assert_eq!(session.board().population(), 0);
        assert_eq!(session.last_action(), Action::Clear);
    }

    #[test]
    fn toggle_touches_only_current_board() {
        let mut session = Session::with_seed(&config(4), 1);
        session.load(blinker());
        session.advance();
        session.toggle(0, 0);
        session.toggle(9, 9);
        assert!(session.board().cell(0, 0));
        assert_eq!(session.history_len(), 2);
    }

    #[test]
    fn resize_keeps_overlap() {
        let mut session = Session::with_seed(&config(4), 1);
        session.load(blinker());
        session.resize(5, 4);
        assert_eq!(session.board().width(), 5);
        assert_eq!(session.board().height(), 4);
        assert_eq!(session.board().population(), 3);
        assert_eq!(session.last_action(), Action::Resize);
        session.reseed();
        assert_eq!(session.board().width(), 5);
    }

    #[test]
    fn shrinking_depth_trims() {
        let mut cfg = config(5);
        cfg.width = 20;
        cfg.height = 20;
        let mut session = Session::with_seed(&cfg, 1);
        session.load(crate::patterns::Pattern::find("Glider").expect("glider").place(20, 20));
        for _ in 0..8 {
            session.advance();
        }
        assert_eq!(session.history_len(), 9);
        session.set_depth(2);
        assert_eq!(session.history_len(), 2);
    }
}
