use serde::{Deserialize, Serialize};

/// Single coordinate axis used for rows, columns and board dimensions.
///
/// Signed so that callers can probe one step past the border without wrapping.
pub type Coord = i16;

/// Count type used for cell totals and food counts.
pub type CellCount = u32;

/// Two-dimensional coordinates `(row, col)`.
pub type Coord2 = (Coord, Coord);

/// Compass heading on the grid. Row numbers grow towards the south.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    /// Fixed enumeration order used for every neighbor walk.
    pub const ALL: [Direction; 4] = [Self::North, Self::South, Self::East, Self::West];

    pub const fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    pub const fn is_opposite(self, other: Direction) -> bool {
        matches!(
            (self, other),
            (Self::North, Self::South)
                | (Self::South, Self::North)
                | (Self::East, Self::West)
                | (Self::West, Self::East)
        )
    }

    /// Returns the `(d_row, d_col)` step for this heading.
    pub const fn delta(self) -> (Coord, Coord) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    /// Direction of the single step leading from `from` to `to`, if they are adjacent.
    pub fn between(from: Coord2, to: Coord2) -> Option<Self> {
        let step = (to.0.checked_sub(from.0)?, to.1.checked_sub(from.1)?);
        Self::ALL.into_iter().find(|dir| dir.delta() == step)
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::East
    }
}

/// Applies `direction` to `coords`. The result may lie outside any board.
pub fn step(coords: Coord2, direction: Direction) -> Option<Coord2> {
    let (d_row, d_col) = direction.delta();
    Some((coords.0.checked_add(d_row)?, coords.1.checked_add(d_col)?))
}

pub const fn manhattan(a: Coord2, b: Coord2) -> u32 {
    a.0.abs_diff(b.0) as u32 + a.1.abs_diff(b.1) as u32
}

pub const fn chebyshev(a: Coord2, b: Coord2) -> u16 {
    let d_row = a.0.abs_diff(b.0);
    let d_col = a.1.abs_diff(b.1);
    if d_row > d_col { d_row } else { d_col }
}

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    /// Callers must have bounds-checked `self`; negative values are clamped to zero.
    fn to_nd_index(self) -> Self::Output {
        [self.0.max(0) as usize, self.1.max(0) as usize]
    }
}

/// Iterates over the in-bounds orthogonal neighbors of a cell in `Direction::ALL` order.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: u8,
}

impl NeighborIter {
    pub(crate) fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = (Direction, Coord2);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let dir = *Direction::ALL.get(usize::from(self.index))?;
            self.index += 1;

            let next_item = step(self.center, dir).filter(|&(row, col)| {
                (0..self.bounds.0).contains(&row) && (0..self.bounds.1).contains(&col)
            });
            if let Some(coords) = next_item {
                return Some((dir, coords));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    #[test]
    fn opposite_directions() {
        assert!(Direction::North.is_opposite(Direction::South));
        assert!(Direction::East.is_opposite(Direction::West));
        assert!(!Direction::North.is_opposite(Direction::East));
        for dir in Direction::ALL {
            assert_eq!(dir.opposite().opposite(), dir);
            assert!(dir.is_opposite(dir.opposite()));
        }
    }

    #[test]
    fn between_recovers_the_step() {
        for dir in Direction::ALL {
            let to = step((4, 4), dir).unwrap();
            assert_eq!(Direction::between((4, 4), to), Some(dir));
        }
        assert_eq!(Direction::between((4, 4), (4, 4)), None);
        assert_eq!(Direction::between((4, 4), (5, 5)), None);
    }

    #[test]
    fn neighbor_iter_skips_out_of_range() {
        let corner: Vec<_> = NeighborIter::new((0, 0), (3, 3)).collect();
        assert_eq!(
            corner,
            [(Direction::South, (1, 0)), (Direction::East, (0, 1))]
        );

        let center: Vec<_> = NeighborIter::new((1, 1), (3, 3)).map(|(_, c)| c).collect();
        assert_eq!(center, [(0, 1), (2, 1), (1, 2), (1, 0)]);
    }

    #[test]
    fn distances() {
        assert_eq!(manhattan((1, 1), (3, 4)), 5);
        assert_eq!(chebyshev((1, 1), (3, 4)), 3);
        assert_eq!(chebyshev((-2, 0), (2, 0)), 4);
    }
}
