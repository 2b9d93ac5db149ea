use crate::*;
pub use bfs::*;

mod bfs;

/// Strategy that picks the autopilot's next cell.
pub trait PathFinder {
    /// May overwrite the board's search metadata, never its cell kinds.
    fn find_route(&self, board: &mut Board, head: Coord2) -> Route;
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Route {
    /// First step of a shortest path to the nearest food, `distance` hops away.
    Food { next: Coord2, distance: usize },
    /// No food is reachable, `next` is merely safe for one step.
    Wander(Coord2),
    /// Every neighbor of the head is blocked.
    Stuck,
}

impl Route {
    /// The cell to move into, or `head` itself when there is no safe move.
    pub const fn next_cell(self, head: Coord2) -> Coord2 {
        match self {
            Self::Food { next, .. } | Self::Wander(next) => next,
            Self::Stuck => head,
        }
    }

    pub const fn is_stuck(self) -> bool {
        matches!(self, Self::Stuck)
    }
}
