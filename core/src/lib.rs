#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use engine::*;
pub use error::*;
pub use pathfinder::*;
pub use snake::*;
pub use snapshot::*;
pub use types::*;

mod board;
mod cell;
mod engine;
mod error;
mod pathfinder;
mod snake;
mod snapshot;
mod types;

#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: Coord,
    pub height: Coord,
    pub initial_length: usize,
    pub lives: u32,
    /// Food is topped up whenever `cycle % food_add_interval == 0`.
    pub food_add_interval: u64,
    /// The snake only moves on cycles where `cycle % move_interval == 0`.
    pub move_interval: u64,
    pub obstacle_count: CellCount,
    /// Obstacles never land within this Chebyshev distance of the start head.
    pub protected_radius: u16,
    pub base_tick_rate: u32,
    pub speedup_every: u32,
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: 50,
            height: 30,
            initial_length: 3,
            lives: 3,
            food_add_interval: 100,
            move_interval: 1,
            obstacle_count: 10,
            protected_radius: 3,
            base_tick_rate: 20,
            speedup_every: 5,
            seed: 0,
        }
    }
}

impl GameConfig {
    pub fn new(width: Coord, height: Coord) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    pub fn with_seed(self, seed: u64) -> Self {
        Self { seed, ..self }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|err| {
            log::warn!("Could not parse game config: {err}");
            GameError::InvalidConfig
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Where the snake starts and respawns: centered, facing east.
    pub fn spawn(&self) -> Spawn {
        Spawn {
            head: (self.height / 2, self.width / 2),
            length: self.initial_length,
            heading: Direction::East,
        }
    }

    /// Ticks per second a driver should run at for the given score. Saturates at `u32::MAX`.
    pub const fn tick_rate(&self, score: u32) -> u32 {
        self.base_tick_rate.saturating_add(score / self.speedup_every)
    }

    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(GameError::InvalidDimensions);
        }

        let spawn = self.spawn();
        let tail_col = i64::from(spawn.head.1) - (self.initial_length as i64 - 1);
        let fits = self.height >= 3
            && (2..self.width as usize).contains(&self.initial_length)
            && tail_col >= 1;
        let protected = usize::from(self.protected_radius) + 1 >= self.initial_length;

        if !fits
            || !protected
            || self.lives == 0
            || self.food_add_interval == 0
            || self.move_interval == 0
            || self.speedup_every == 0
        {
            return Err(GameError::InvalidConfig);
        }
        Ok(())
    }
}

/// What happened during one engine cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// The snake did not move this cycle, or the game was already over.
    Idle,
    Moved,
    Ate,
    /// Fatal collision with lives remaining, the snake was respawned.
    LostLife,
    GameOver,
}

impl TickOutcome {
    pub const fn has_update(self) -> bool {
        use TickOutcome::*;
        match self {
            Idle => false,
            Moved => true,
            Ate => true,
            LostLife => true,
            GameOver => true,
        }
    }

    pub const fn food_eaten(self) -> bool {
        matches!(self, Self::Ate)
    }
}

/// Result of trying to drop a new food cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FoodPlacement {
    Placed(Coord2),
    /// There is no `Empty` cell left.
    Saturated,
}
