use alloc::collections::VecDeque;
use alloc::vec::Vec;
use rand::prelude::*;
use rand::rngs::SmallRng;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineState {
    Running,
    GameOver,
}

impl EngineState {
    pub const fn is_over(self) -> bool {
        matches!(self, Self::GameOver)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Running
    }
}

/// Discrete input delivered by an external input source before a tick.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    TurnNorth,
    TurnSouth,
    TurnEast,
    TurnWest,
    Reverse,
    ToggleAutopilot,
    Quit,
}

impl Command {
    pub const fn turn(direction: Direction) -> Self {
        match direction {
            Direction::North => Self::TurnNorth,
            Direction::South => Self::TurnSouth,
            Direction::East => Self::TurnEast,
            Direction::West => Self::TurnWest,
        }
    }
}

/// Drives one game: owns the board, the snake and all scoring state.
#[derive(Clone, Debug)]
pub struct Engine<P = BreadthFirst> {
    config: GameConfig,
    board: Board,
    snake: Snake,
    pathfinder: P,
    state: EngineState,
    score: u32,
    lives: u32,
    cycle: u64,
    food_count: CellCount,
    obstacles_placed: bool,
    last_outcome: TickOutcome,
    pending: VecDeque<Command>,
    rng: SmallRng,
}

impl Engine {
    pub fn new(config: GameConfig) -> Result<Self> {
        Self::with_pathfinder(config, BreadthFirst)
    }
}

impl<P: PathFinder> Engine<P> {
    pub fn with_pathfinder(config: GameConfig, pathfinder: P) -> Result<Self> {
        config.validate()?;

        let mut board = Board::new(config.width, config.height)?;
        let snake = Snake::spawn(&mut board, config.spawn())?;
        let mut engine = Self {
            config,
            board,
            snake,
            pathfinder,
            state: EngineState::Running,
            score: 0,
            lives: config.lives,
            cycle: 0,
            food_count: 0,
            obstacles_placed: false,
            last_outcome: TickOutcome::Idle,
            pending: VecDeque::new(),
            rng: SmallRng::seed_from_u64(config.seed),
        };
        engine.add_food();
        engine.place_obstacles();
        Ok(engine)
    }

    /// Wipes the board interior and starts over with fresh score, lives and obstacles.
    ///
    /// The random stream continues, so consecutive games differ.
    pub fn start_new_game(&mut self) -> Result<()> {
        self.board.clear_interior();
        let mode = self.snake.mode();
        self.snake = Snake::spawn(&mut self.board, self.config.spawn())?;
        self.snake.set_mode(mode);

        self.state = EngineState::Running;
        self.score = 0;
        self.lives = self.config.lives;
        self.cycle = 0;
        self.food_count = 0;
        self.obstacles_placed = false;
        self.last_outcome = TickOutcome::Idle;
        self.pending.clear();

        self.add_food();
        self.place_obstacles();
        log::info!("New game started");
        Ok(())
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn cycle_count(&self) -> u64 {
        self.cycle
    }

    pub fn food_count(&self) -> CellCount {
        self.food_count
    }

    pub fn obstacles_placed(&self) -> bool {
        self.obstacles_placed
    }

    pub fn last_outcome(&self) -> TickOutcome {
        self.last_outcome
    }

    pub fn food_eaten(&self) -> bool {
        self.last_outcome.food_eaten()
    }

    pub fn tick_rate(&self) -> u32 {
        self.config.tick_rate(self.score)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::from_engine(self)
    }

    /// Queues a command for the next cycle.
    pub fn submit(&mut self, command: Command) {
        if !self.state.is_over() {
            self.pending.push_back(command);
        }
    }

    /// Runs one tick: input, movement, collision and food rules, then the food top-up.
    pub fn cycle(&mut self) -> TickOutcome {
        if self.state.is_over() {
            self.pending.clear();
            self.last_outcome = TickOutcome::Idle;
            return self.last_outcome;
        }

        if self.apply_commands() {
            log::info!("Quit requested at cycle {}", self.cycle);
            self.end_game();
            self.last_outcome = TickOutcome::GameOver;
            return self.last_outcome;
        }

        let outcome = if self.cycle % self.config.move_interval == 0 {
            self.update_snake()
        } else {
            TickOutcome::Idle
        };

        self.update_food();
        self.cycle += 1;
        self.last_outcome = outcome;
        outcome
    }

    /// Drains the command queue. Returns `true` when a quit was requested; commands after
    /// the quit are discarded.
    fn apply_commands(&mut self) -> bool {
        while let Some(command) = self.pending.pop_front() {
            match command {
                Command::TurnNorth => self.turn(Direction::North),
                Command::TurnSouth => self.turn(Direction::South),
                Command::TurnEast => self.turn(Direction::East),
                Command::TurnWest => self.turn(Direction::West),
                Command::Reverse => self.snake.reverse(&mut self.board),
                Command::ToggleAutopilot => {
                    let mode = self.snake.toggle_mode();
                    log::debug!("Control mode is now {mode:?}");
                }
                Command::Quit => {
                    self.pending.clear();
                    return true;
                }
            }
        }
        false
    }

    fn turn(&mut self, direction: Direction) {
        if !self.snake.set_heading(direction) {
            log::debug!(
                "Ignoring turn to {direction:?} while heading {:?}",
                self.snake.heading()
            );
        }
    }

    /// The cell the head will try to enter this cycle. Equal to the head when the
    /// autopilot has no safe move, and possibly off the board.
    fn next_cell(&mut self) -> Coord2 {
        let head = self.snake.head();
        match self.snake.mode() {
            ControlMode::Autopilot => self
                .pathfinder
                .find_route(&mut self.board, head)
                .next_cell(head),
            ControlMode::Manual => self.snake.ahead().unwrap_or(head),
        }
    }

    fn update_snake(&mut self) -> TickOutcome {
        let next = self.next_cell();

        match self.snake.advance(&mut self.board, next) {
            AdvanceOutcome::Blocked => self.lose_life(next),
            AdvanceOutcome::Grew => {
                self.food_count = self.food_count.saturating_sub(1);
                self.score += 1;
                self.add_food();
                TickOutcome::Ate
            }
            AdvanceOutcome::Moved => TickOutcome::Moved,
        }
    }

    fn lose_life(&mut self, at: Coord2) -> TickOutcome {
        self.lives = self.lives.saturating_sub(1);
        log::debug!("Collision at {at:?}, {} lives left", self.lives);

        if self.lives == 0 {
            self.end_game();
            return TickOutcome::GameOver;
        }

        match self.snake.respawn(&mut self.board, self.config.spawn()) {
            Ok(covered_food) => {
                self.food_count = self.food_count.saturating_sub(covered_food);
                TickOutcome::LostLife
            }
            Err(err) => {
                log::warn!("Could not respawn snake: {err}");
                self.end_game();
                TickOutcome::GameOver
            }
        }
    }

    fn end_game(&mut self) {
        if self.state.is_over() {
            return;
        }
        self.state = EngineState::GameOver;
        log::info!("Game over with score {}", self.score);
    }

    fn update_food(&mut self) {
        if self.food_count == 0 || self.cycle % self.config.food_add_interval == 0 {
            self.add_food();
        }
    }

    /// Turns a uniformly random `Empty` cell into food.
    pub fn add_food(&mut self) -> FoodPlacement {
        let free = self.board.empty_count();
        if free == 0 {
            log::debug!("No empty cell left for food");
            return FoodPlacement::Saturated;
        }

        let place = self.rng.random_range(0..free) as usize;
        let Some(coords) = self
            .board
            .iter()
            .filter(|cell| cell.kind() == CellKind::Empty)
            .nth(place)
            .map(Cell::coords)
        else {
            return FoodPlacement::Saturated;
        };

        self.board.become_food(coords);
        self.food_count += 1;
        FoodPlacement::Placed(coords)
    }

    /// Seeds interior walls once per game, away from the snake's start. Returns how many
    /// were placed.
    pub fn place_obstacles(&mut self) -> CellCount {
        if self.obstacles_placed {
            return 0;
        }
        self.obstacles_placed = true;

        let start = self.config.spawn().head;
        let radius = self.config.protected_radius;
        let mut candidates: Vec<Coord2> = self
            .board
            .iter()
            .filter(|cell| cell.kind() == CellKind::Empty)
            .map(Cell::coords)
            .filter(|&coords| !self.board.is_border(coords) && chebyshev(coords, start) > radius)
            .collect();

        let wanted = self.config.obstacle_count as usize;
        if wanted > candidates.len() {
            log::warn!(
                "Only room for {} of {} obstacles",
                candidates.len(),
                wanted
            );
        }

        // partial Fisher-Yates: the first `placed` candidates become walls
        let placed = wanted.min(candidates.len());
        for i in 0..placed {
            let j = self.rng.random_range(i..candidates.len());
            candidates.swap(i, j);
            self.board.become_wall(candidates[i]);
        }
        placed as CellCount
    }
}
