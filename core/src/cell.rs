use serde::{Deserialize, Serialize};

use crate::*;

/// What currently occupies a board position.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Wall,
    Food,
    Head,
    Body,
}

impl CellKind {
    /// Whether the pathfinder may route through this kind.
    pub const fn is_traversable(self) -> bool {
        match self {
            Self::Empty | Self::Food => true,
            Self::Wall | Self::Head | Self::Body => false,
        }
    }

    /// Whether moving the head into this kind costs a life.
    pub const fn is_fatal(self) -> bool {
        !self.is_traversable()
    }

    pub const fn is_snake(self) -> bool {
        matches!(self, Self::Head | Self::Body)
    }
}

impl Default for CellKind {
    fn default() -> Self {
        Self::Empty
    }
}

/// A single board position with its kind and the metadata of the current search pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    row: Coord,
    col: Coord,
    kind: CellKind,
    visited: bool,
    parent: Option<Coord2>,
}

impl Cell {
    pub(crate) const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            kind: CellKind::Empty,
            visited: false,
            parent: None,
        }
    }

    pub const fn row(&self) -> Coord {
        self.row
    }

    pub const fn col(&self) -> Coord {
        self.col
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    pub const fn kind(&self) -> CellKind {
        self.kind
    }

    pub const fn visited(&self) -> bool {
        self.visited
    }

    pub const fn parent(&self) -> Option<Coord2> {
        self.parent
    }

    pub(crate) fn set_kind(&mut self, kind: CellKind) {
        self.kind = kind;
    }

    pub(crate) fn mark_visited(&mut self, parent: Option<Coord2>) {
        self.visited = true;
        self.parent = parent;
    }

    pub(crate) fn clear_search_info(&mut self) {
        self.visited = false;
        self.parent = None;
    }
}
