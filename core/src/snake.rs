use alloc::collections::VecDeque;
use serde::{Deserialize, Serialize};

use crate::*;

/// Who picks the next move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlMode {
    Manual,
    Autopilot,
}

impl ControlMode {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Manual => Self::Autopilot,
            Self::Autopilot => Self::Manual,
        }
    }
}

impl Default for ControlMode {
    fn default() -> Self {
        Self::Manual
    }
}

/// Result of pushing the head into a neighboring cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// The target is a wall, the body, or the head itself. Nothing was changed.
    Blocked,
    /// Moved into an empty cell, length unchanged.
    Moved,
    /// Ate the food in the target cell, length grew by one.
    Grew,
}

impl AdvanceOutcome {
    pub const fn is_fatal(self) -> bool {
        matches!(self, Self::Blocked)
    }
}

/// Where and how a fresh snake is laid out.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spawn {
    pub head: Coord2,
    pub length: usize,
    pub heading: Direction,
}

impl Spawn {
    /// Head first, with the body trailing opposite to `heading`.
    pub fn cells(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (d_row, d_col) = self.heading.opposite().delta();
        let (row, col) = self.head;
        (0..self.length as Coord).map(move |i| (row + d_row * i, col + d_col * i))
    }
}

/// Ordered snake segments, head first.
///
/// The board is the source of truth for cell kinds; every mutation here keeps the
/// `Head`/`Body` cells on the board in step with `cells`.
#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    cells: VecDeque<Coord2>,
    heading: Direction,
    mode: ControlMode,
}

impl Snake {
    /// Places a snake on `board` along `cells`, head first.
    ///
    /// Fails when fewer than two cells are given, when consecutive cells are not adjacent,
    /// or when any cell is not currently `Empty` or `Food`.
    pub fn place(board: &mut Board, cells: &[Coord2], heading: Direction) -> Result<Self> {
        validate_layout(board, cells, |_| false)?;

        let snake = Self {
            cells: cells.iter().copied().collect(),
            heading,
            mode: ControlMode::Manual,
        };
        snake.paint(board);
        Ok(snake)
    }

    pub fn spawn(board: &mut Board, spawn: Spawn) -> Result<Self> {
        let cells: alloc::vec::Vec<_> = spawn.cells().collect();
        Self::place(board, &cells, spawn.heading)
    }

    fn paint(&self, board: &mut Board) {
        let mut cells = self.cells.iter();
        if let Some(&head) = cells.next() {
            board.become_head(head);
        }
        for &body in cells {
            board.become_body(body);
        }
    }

    pub fn head(&self) -> Coord2 {
        self.cells[0]
    }

    pub fn neck(&self) -> Option<Coord2> {
        self.cells.get(1).copied()
    }

    pub fn tail(&self) -> Coord2 {
        self.cells[self.cells.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells.iter().copied()
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        self.cells.contains(&coords)
    }

    pub fn heading(&self) -> Direction {
        self.heading
    }

    pub fn mode(&self) -> ControlMode {
        self.mode
    }

    pub fn set_mode(&mut self, mode: ControlMode) {
        self.mode = mode;
    }

    pub fn toggle_mode(&mut self) -> ControlMode {
        self.mode = self.mode.toggled();
        self.mode
    }

    /// Changes the heading unless `direction` points from the head into the neck. Returns
    /// whether the heading was applied.
    ///
    /// The check is against the body rather than the pending heading, so several turns
    /// queued before the next move can never steer the head back into its neck.
    pub fn set_heading(&mut self, direction: Direction) -> bool {
        let into_neck = self
            .neck()
            .is_some_and(|neck| step(self.head(), direction) == Some(neck));
        if into_neck {
            return false;
        }
        self.heading = direction;
        true
    }

    /// Coordinates one step ahead of the head along the heading, possibly off the board.
    pub fn ahead(&self) -> Option<Coord2> {
        step(self.head(), self.heading)
    }

    /// Moves the head into `next`, which must be adjacent to the current head.
    pub fn advance(&mut self, board: &mut Board, next: Coord2) -> AdvanceOutcome {
        let Some(direction) = Direction::between(self.head(), next) else {
            return AdvanceOutcome::Blocked;
        };
        let Some(kind) = board.kind_at(next) else {
            return AdvanceOutcome::Blocked;
        };

        let outcome = match kind {
            CellKind::Wall | CellKind::Body | CellKind::Head => return AdvanceOutcome::Blocked,
            CellKind::Food => AdvanceOutcome::Grew,
            CellKind::Empty => AdvanceOutcome::Moved,
        };

        board.become_body(self.head());
        board.become_head(next);
        self.cells.push_front(next);

        if outcome == AdvanceOutcome::Moved {
            if let Some(tail) = self.cells.pop_back() {
                board.become_empty(tail);
            }
        }

        self.heading = direction;
        outcome
    }

    /// Swaps head and tail, reversing the body in between.
    ///
    /// The new heading points from the new neck to the new head. A turn accepted since the
    /// last move is discarded, so a reversal followed by another reversal restores the
    /// cells, and restores the heading whenever it agreed with the body.
    pub fn reverse(&mut self, board: &mut Board) {
        if self.cells.len() < 2 {
            return;
        }

        let old_head = self.head();
        let old_tail = self.tail();
        self.cells.make_contiguous().reverse();
        board.become_body(old_head);
        board.become_head(old_tail);

        let (head, neck) = (self.cells[0], self.cells[1]);
        self.heading = if neck.0 < head.0 {
            Direction::South
        } else if neck.0 > head.0 {
            Direction::North
        } else if neck.1 < head.1 {
            Direction::East
        } else if neck.1 > head.1 {
            Direction::West
        } else {
            unreachable!("snake head and neck share {head:?}")
        };
    }

    /// Clears the current cells on `board` and lays out a fresh snake from `spawn`.
    ///
    /// Returns how many food cells the new snake covered. The control mode is kept.
    ///
    /// On error the snake and the board are left untouched.
    pub fn respawn(&mut self, board: &mut Board, spawn: Spawn) -> Result<CellCount> {
        let cells: alloc::vec::Vec<_> = spawn.cells().collect();
        validate_layout(board, &cells, |coords| self.contains(coords))?;

        for &coords in &self.cells {
            board.become_empty(coords);
        }
        self.cells.clear();

        let eaten = cells
            .iter()
            .filter(|&&coords| board.kind_at(coords) == Some(CellKind::Food))
            .count() as CellCount;

        self.cells.extend(cells);
        self.heading = spawn.heading;
        self.paint(board);
        Ok(eaten)
    }
}

/// `vacated` marks cells that count as free because the current snake is about to leave them.
fn validate_layout(
    board: &Board,
    cells: &[Coord2],
    vacated: impl Fn(Coord2) -> bool,
) -> Result<()> {
    if cells.len() < 2 {
        return Err(GameError::InvalidSnake);
    }
    let free = cells.iter().all(|&coords| {
        vacated(coords) || matches!(board.kind_at(coords), Some(CellKind::Empty | CellKind::Food))
    });
    let adjacent = cells.windows(2).all(|pair| manhattan(pair[0], pair[1]) == 1);
    let distinct = cells
        .iter()
        .enumerate()
        .all(|(i, coords)| !cells[i + 1..].contains(coords));

    if free && adjacent && distinct {
        Ok(())
    } else {
        Err(GameError::InvalidSnake)
    }
}
