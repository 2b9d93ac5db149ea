use alloc::vec::Vec;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Read-only view of an engine after a completed tick, for renderers and audio.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Cell kinds indexed `[row, col]`.
    pub cells: Array2<CellKind>,
    /// Snake coordinates, head first.
    pub snake: Vec<Coord2>,
    pub heading: Direction,
    pub mode: ControlMode,
    pub score: u32,
    pub lives: u32,
    pub game_over: bool,
    pub food_eaten: bool,
    pub cycle: u64,
    pub tick_rate: u32,
}

impl Snapshot {
    pub fn from_engine<P: PathFinder>(engine: &Engine<P>) -> Self {
        let snake = engine.snake();
        Self {
            cells: engine.board().kinds(),
            snake: snake.iter().collect(),
            heading: snake.heading(),
            mode: snake.mode(),
            score: engine.score(),
            lives: engine.lives(),
            game_over: engine.is_game_over(),
            food_eaten: engine.food_eaten(),
            cycle: engine.cycle_count(),
            tick_rate: engine.tick_rate(),
        }
    }

    pub fn dims(&self) -> Coord2 {
        let (height, width) = self.cells.dim();
        (height as Coord, width as Coord)
    }

    pub fn kind_at(&self, (row, col): Coord2) -> Option<CellKind> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        self.cells.get([row, col]).copied()
    }

    /// Checks that the grid and the snake agree: the border is wall, the snake is a chain
    /// of adjacent cells painted `Head` then `Body`, and no other cell is part of a snake.
    pub fn validate(&self) -> Result<()> {
        let (height, width) = self.dims();
        for ((row, col), &kind) in self.cells.indexed_iter() {
            let (row, col) = (row as Coord, col as Coord);
            let border = row == 0 || col == 0 || row == height - 1 || col == width - 1;
            if border && kind != CellKind::Wall {
                return Err(GameError::BrokenBorder);
            }
        }

        if self.snake.len() < 2
            || self
                .snake
                .windows(2)
                .any(|pair| manhattan(pair[0], pair[1]) != 1)
        {
            return Err(GameError::InvalidSnake);
        }

        for (i, &coords) in self.snake.iter().enumerate() {
            let expected = if i == 0 { CellKind::Head } else { CellKind::Body };
            if self.kind_at(coords) != Some(expected) {
                return Err(GameError::InvalidSnake);
            }
        }

        let painted = self.cells.iter().filter(|kind| kind.is_snake()).count();
        if painted != self.snake.len() {
            return Err(GameError::InvalidSnake);
        }

        Ok(())
    }
}
