//! Discrete-tick snake simulation
//!
//! The board advances once per fixed tick while running. It sits paused
//! until the first accepted direction and goes back to paused (fully reset)
//! after every crash.

use std::collections::VecDeque;

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::grid::{Board, Cell, Direction};
use crate::consts::*;
use crate::settings::{FoodPlacement, SnakeSettings};

/// Whether the tick timer should be advancing the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnakePhase {
    /// Waiting for a direction key
    Paused,
    Running,
}

/// What ended a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrashKind {
    Wall,
    SelfHit,
}

/// Result of one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Paused, nothing happened
    Idle,
    Moved,
    Ate,
    /// The board was reset and paused
    Crashed(CrashKind),
}

/// Complete snake game state
#[derive(Debug, Clone)]
pub struct SnakeState {
    pub board: Board,
    /// Occupied cells, head first
    pub body: VecDeque<Cell>,
    /// Heading applied on the last tick
    pub heading: Direction,
    /// Direction to apply on the next tick
    pub pending: Option<Direction>,
    pub food: Vec<Cell>,
    pub score: u32,
    pub phase: SnakePhase,
    /// Ticks since the last reset
    pub ticks: u64,
    food_count: usize,
    placement: FoodPlacement,
    rng: Pcg32,
}

impl SnakeState {
    /// Create a paused game from settings
    pub fn new(settings: &SnakeSettings, seed: u64) -> Self {
        let board = Board::new(settings.board_width, settings.board_height);
        let mut state = Self {
            board,
            body: VecDeque::with_capacity(board.cell_count()),
            heading: Direction::Right,
            pending: None,
            food: Vec::with_capacity(settings.food_count),
            score: 0,
            phase: SnakePhase::Paused,
            ticks: 0,
            food_count: settings.food_count,
            placement: settings.food_placement,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset();
        state
    }

    /// Create a paused game on a `width` x `height` board with default rules
    pub fn with_board(width: i32, height: i32, seed: u64) -> Self {
        let settings = SnakeSettings {
            board_width: width,
            board_height: height,
            ..SnakeSettings::default()
        };
        Self::new(&settings, seed)
    }

    /// Back to the starting layout: short body at board centre heading right
    pub fn reset(&mut self) {
        let center = self.board.center();
        self.body.clear();
        for i in 0..SNAKE_INITIAL_LENGTH as i32 {
            self.body.push_back(center - IVec2::new(i, 0));
        }
        self.heading = Direction::Right;
        self.pending = None;
        self.score = 0;
        self.ticks = 0;
        self.phase = SnakePhase::Paused;

        self.food.clear();
        for _ in 0..self.food_count {
            if let Some(cell) = self.place_food() {
                self.food.push(cell);
            }
        }
    }

    #[inline]
    pub fn head(&self) -> Cell {
        // Body is never empty: reset always lays down SNAKE_INITIAL_LENGTH cells
        self.body[0]
    }

    pub fn is_running(&self) -> bool {
        self.phase == SnakePhase::Running
    }

    /// Record directional intent for the next tick.
    ///
    /// Reversing straight back onto the neck is ignored. Any other direction
    /// replaces the pending one and starts a paused game. Returns whether the
    /// direction was accepted.
    pub fn steer(&mut self, dir: Direction) -> bool {
        if dir == self.heading.opposite() {
            return false;
        }
        self.pending = Some(dir);
        if self.phase == SnakePhase::Paused {
            log::debug!("Snake started heading {:?}", dir);
            self.phase = SnakePhase::Running;
        }
        true
    }

    /// Stop ticking without resetting the board
    pub fn exit(&mut self) {
        self.phase = SnakePhase::Paused;
        self.pending = None;
    }

    /// Advance the board by one tick
    pub fn tick(&mut self) -> TickOutcome {
        if self.phase != SnakePhase::Running {
            return TickOutcome::Idle;
        }

        if let Some(dir) = self.pending.take() {
            self.heading = dir;
        }

        let next = self.head() + self.heading.delta();

        if !self.board.contains(next) {
            return self.crash(CrashKind::Wall);
        }

        let food_idx = self.food.iter().position(|&f| f == next);
        let grows = food_idx.is_some();

        // The tail moves out of the way this tick unless we grow
        let checked = if grows {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        if self.body.iter().take(checked).any(|&c| c == next) {
            return self.crash(CrashKind::SelfHit);
        }

        self.body.push_front(next);
        self.ticks += 1;

        match food_idx {
            Some(idx) => {
                self.food.swap_remove(idx);
                self.score += SNAKE_FOOD_SCORE;
                if let Some(cell) = self.place_food() {
                    self.food.push(cell);
                }
                TickOutcome::Ate
            }
            None => {
                self.body.pop_back();
                TickOutcome::Moved
            }
        }
    }

    fn crash(&mut self, kind: CrashKind) -> TickOutcome {
        log::info!(
            "Snake crashed ({:?}) with score {} after {} ticks",
            kind,
            self.score,
            self.ticks
        );
        self.reset();
        TickOutcome::Crashed(kind)
    }

    /// True if the cell holds body or food
    pub fn is_occupied(&self, cell: Cell) -> bool {
        self.body.contains(&cell) || self.food.contains(&cell)
    }

    /// Pick a cell for new food according to the placement strategy.
    ///
    /// `BoundedRetry` always yields a cell (the fixed fallback once retries
    /// run out). `FreeCells` yields `None` only when the board is full.
    pub fn place_food(&mut self) -> Option<Cell> {
        match self.placement {
            FoodPlacement::BoundedRetry { attempts } => Some(self.place_food_bounded(attempts)),
            FoodPlacement::FreeCells => self.place_food_free(),
        }
    }

    fn place_food_bounded(&mut self, attempts: u32) -> Cell {
        for _ in 0..attempts {
            let cell = IVec2::new(
                self.rng.random_range(0..self.board.width),
                self.rng.random_range(0..self.board.height),
            );
            if !self.is_occupied(cell) {
                return cell;
            }
        }
        let (x, y) = SNAKE_FALLBACK_FOOD_CELL;
        log::debug!("Food placement exhausted {} attempts, using fallback", attempts);
        IVec2::new(x, y)
    }

    fn place_food_free(&mut self) -> Option<Cell> {
        let free: Vec<Cell> = self
            .board
            .cells()
            .filter(|&c| !self.is_occupied(c))
            .collect();
        if free.is_empty() {
            return None;
        }
        Some(free[self.rng.random_range(0..free.len())])
    }

    /// Replace the food set (tests and scripted demos)
    pub fn set_food(&mut self, food: Vec<Cell>) {
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 20x20 board with food parked out of the snake's way
    fn quiet_board() -> SnakeState {
        let mut state = SnakeState::with_board(20, 20, 7);
        state.set_food(vec![IVec2::new(0, 19)]);
        state
    }

    #[test]
    fn test_initial_layout() {
        let state = SnakeState::with_board(20, 20, 1);
        let body: Vec<_> = state.body.iter().copied().collect();
        assert_eq!(
            body,
            vec![IVec2::new(10, 10), IVec2::new(9, 10), IVec2::new(8, 10)]
        );
        assert_eq!(state.heading, Direction::Right);
        assert_eq!(state.phase, SnakePhase::Paused);
        assert_eq!(state.food.len(), SNAKE_FOOD_COUNT);
        for f in &state.food {
            assert!(!state.body.contains(f));
        }
    }

    #[test]
    fn test_paused_until_direction() {
        let mut state = quiet_board();
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.head(), IVec2::new(10, 10));

        assert!(state.steer(Direction::Up));
        assert_eq!(state.phase, SnakePhase::Running);
        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.head(), IVec2::new(10, 9));
    }

    #[test]
    fn test_down_then_tick() {
        let mut state = quiet_board();
        state.steer(Direction::Down);
        state.tick();

        assert_eq!(state.head(), IVec2::new(10, 11));
        assert_eq!(state.body.len(), 3);
        assert!(!state.body.contains(&IVec2::new(8, 10)));
        assert_eq!(state.body[1], IVec2::new(10, 10));
        assert_eq!(state.body[2], IVec2::new(9, 10));
    }

    #[test]
    fn test_reversal_ignored() {
        let mut state = quiet_board();
        assert!(!state.steer(Direction::Left));
        assert_eq!(state.phase, SnakePhase::Paused);

        state.steer(Direction::Right);
        state.tick();
        assert!(!state.steer(Direction::Left));
        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.head(), IVec2::new(12, 10));
    }

    #[test]
    fn test_one_direction_change_per_tick() {
        let mut state = quiet_board();
        state.steer(Direction::Right);
        state.tick();

        // Up then Down before the tick: both valid against heading Right, last wins
        assert!(state.steer(Direction::Up));
        assert!(state.steer(Direction::Down));
        assert_eq!(state.pending, Some(Direction::Down));
        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.head(), IVec2::new(11, 11));

        // Left is checked against the applied heading, not the pending one
        assert!(state.steer(Direction::Left));
        state.steer(Direction::Up);
        assert_eq!(state.pending, Some(Direction::Left));
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut state = quiet_board();
        state.set_food(vec![IVec2::new(11, 10)]);
        state.steer(Direction::Right);

        assert_eq!(state.tick(), TickOutcome::Ate);
        assert_eq!(state.body.len(), 4);
        assert_eq!(state.score, SNAKE_FOOD_SCORE);
        assert_eq!(state.food.len(), 1);
        assert_ne!(state.food[0], IVec2::new(11, 10));
        assert!(!state.body.contains(&state.food[0]));
        assert_eq!(state.body.back(), Some(&IVec2::new(8, 10)));
    }

    #[test]
    fn test_wall_crash_resets() {
        let mut state = quiet_board();
        state.steer(Direction::Right);
        let mut outcome = TickOutcome::Idle;
        for _ in 0..10 {
            outcome = state.tick();
        }
        assert_eq!(outcome, TickOutcome::Crashed(CrashKind::Wall));
        assert_eq!(state.phase, SnakePhase::Paused);
        assert_eq!(state.head(), IVec2::new(10, 10));
        assert_eq!(state.body.len(), 3);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick(), TickOutcome::Idle);
    }

    #[test]
    fn test_tail_chase_is_allowed() {
        // Loop of 4: head moves into the cell the tail vacates this tick
        let mut state = quiet_board();
        state.body = VecDeque::from(vec![
            IVec2::new(5, 5),
            IVec2::new(5, 6),
            IVec2::new(6, 6),
            IVec2::new(6, 5),
        ]);
        state.heading = Direction::Up;
        state.phase = SnakePhase::Running;
        state.pending = Some(Direction::Right);

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.head(), IVec2::new(6, 5));
    }

    #[test]
    fn test_turn_into_middle_of_body() {
        // U-shaped body heading left; turning down lands on a middle segment
        let mut state = quiet_board();
        state.body = VecDeque::from(vec![
            IVec2::new(5, 5),
            IVec2::new(6, 5),
            IVec2::new(6, 6),
            IVec2::new(5, 6),
            IVec2::new(4, 6),
        ]);
        state.heading = Direction::Left;
        state.phase = SnakePhase::Running;
        state.score = 20;
        assert!(state.steer(Direction::Down));

        assert_eq!(state.tick(), TickOutcome::Crashed(CrashKind::SelfHit));
        assert_eq!(state.phase, SnakePhase::Paused);
        assert_eq!(state.head(), IVec2::new(10, 10));
        assert_eq!(state.body.len(), 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_tail_is_solid_when_growing() {
        let mut state = quiet_board();
        state.body = VecDeque::from(vec![
            IVec2::new(5, 5),
            IVec2::new(5, 6),
            IVec2::new(6, 6),
            IVec2::new(6, 5),
        ]);
        state.set_food(vec![IVec2::new(6, 5)]);
        state.heading = Direction::Up;
        state.phase = SnakePhase::Running;
        state.pending = Some(Direction::Right);

        assert_eq!(state.tick(), TickOutcome::Crashed(CrashKind::SelfHit));
    }

    #[test]
    fn test_exit_pauses_without_reset() {
        let mut state = quiet_board();
        state.steer(Direction::Up);
        state.tick();
        state.tick();
        state.exit();

        assert_eq!(state.phase, SnakePhase::Paused);
        assert_eq!(state.head(), IVec2::new(10, 8));
        assert_eq!(state.tick(), TickOutcome::Idle);

        state.steer(Direction::Up);
        state.tick();
        assert_eq!(state.head(), IVec2::new(10, 7));
    }

    #[test]
    fn test_bounded_retry_fallback() {
        // Fill every cell but one; a zero-ish budget can't find it
        let settings = SnakeSettings {
            board_width: 6,
            board_height: 6,
            food_count: 1,
            food_placement: FoodPlacement::BoundedRetry { attempts: 1 },
            ..SnakeSettings::default()
        };
        let mut state = SnakeState::new(&settings, 3);
        state.body = state
            .board
            .cells()
            .filter(|&c| c != IVec2::new(5, 5))
            .collect();
        state.set_food(Vec::new());

        let mut fell_back = false;
        for _ in 0..50 {
            let cell = state.place_food().unwrap();
            if cell == IVec2::new(0, 0) {
                fell_back = true;
            } else {
                assert_eq!(cell, IVec2::new(5, 5));
            }
        }
        assert!(fell_back);
    }

    #[test]
    fn test_free_cells_placement() {
        let settings = SnakeSettings {
            board_width: 6,
            board_height: 6,
            food_count: 1,
            food_placement: FoodPlacement::FreeCells,
            ..SnakeSettings::default()
        };
        let mut state = SnakeState::new(&settings, 3);
        state.body = state
            .board
            .cells()
            .filter(|&c| c != IVec2::new(5, 5))
            .collect();
        state.set_food(Vec::new());
        assert_eq!(state.place_food(), Some(IVec2::new(5, 5)));

        state.set_food(vec![IVec2::new(5, 5)]);
        assert_eq!(state.place_food(), None);
    }

    #[test]
    fn test_determinism() {
        let mut a = SnakeState::with_board(20, 20, 42);
        let mut b = SnakeState::with_board(20, 20, 42);
        assert_eq!(a.food, b.food);

        let script = [Direction::Up, Direction::Left, Direction::Down, Direction::Left];
        for dir in script {
            a.steer(dir);
            b.steer(dir);
            for _ in 0..3 {
                assert_eq!(a.tick(), b.tick());
            }
        }
        assert_eq!(a.body, b.body);
        assert_eq!(a.food, b.food);
    }
}
