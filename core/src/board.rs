use ndarray::Array2;

use crate::*;

/// Fixed-size grid of cells. The outermost ring is always `Wall`.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    pub fn new(width: Coord, height: Coord) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(GameError::InvalidDimensions);
        }

        let cells = Array2::from_shape_fn((height as usize, width as usize), |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        });
        let mut board = Self { cells };
        board.add_border_walls();
        Ok(board)
    }

    fn add_border_walls(&mut self) {
        let (height, width) = self.dims();
        for row in 0..height {
            for col in 0..width {
                if self.is_border((row, col)) {
                    self.cells[(row, col).to_nd_index()].set_kind(CellKind::Wall);
                }
            }
        }
    }

    pub fn width(&self) -> Coord {
        self.cells.dim().1 as Coord
    }

    pub fn height(&self) -> Coord {
        self.cells.dim().0 as Coord
    }

    /// Bounds as `(height, width)`, matching `(row, col)` coordinates.
    pub fn dims(&self) -> Coord2 {
        (self.height(), self.width())
    }

    pub fn total_cells(&self) -> CellCount {
        self.cells.len() as CellCount
    }

    pub fn contains(&self, (row, col): Coord2) -> bool {
        (0..self.height()).contains(&row) && (0..self.width()).contains(&col)
    }

    pub fn is_border(&self, coords: Coord2) -> bool {
        let (row, col) = coords;
        self.contains(coords)
            && (row == 0 || col == 0 || row == self.height() - 1 || col == self.width() - 1)
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        if self.contains(coords) {
            Some(&self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub(crate) fn get_mut(&mut self, coords: Coord2) -> Option<&mut Cell> {
        if self.contains(coords) {
            Some(&mut self.cells[coords.to_nd_index()])
        } else {
            None
        }
    }

    pub fn kind_at(&self, coords: Coord2) -> Option<CellKind> {
        self.get(coords).map(Cell::kind)
    }

    pub fn neighbor(&self, coords: Coord2, direction: Direction) -> Option<&Cell> {
        self.get(step(coords, direction)?)
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.dims())
    }

    /// Row-major iteration over every cell.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn count(&self, kind: CellKind) -> CellCount {
        self.iter().filter(|cell| cell.kind() == kind).count() as CellCount
    }

    pub fn empty_count(&self) -> CellCount {
        self.count(CellKind::Empty)
    }

    /// Owned copy of the grid kinds, indexed `[row, col]`.
    pub fn kinds(&self) -> Array2<CellKind> {
        self.cells.map(Cell::kind)
    }

    pub fn become_wall(&mut self, coords: Coord2) -> bool {
        self.set_kind(coords, CellKind::Wall)
    }

    pub fn become_food(&mut self, coords: Coord2) -> bool {
        self.set_kind(coords, CellKind::Food)
    }

    pub fn become_head(&mut self, coords: Coord2) -> bool {
        self.set_kind(coords, CellKind::Head)
    }

    pub fn become_body(&mut self, coords: Coord2) -> bool {
        self.set_kind(coords, CellKind::Body)
    }

    pub fn become_empty(&mut self, coords: Coord2) -> bool {
        self.set_kind(coords, CellKind::Empty)
    }

    /// Recolors a cell. Out-of-range coordinates and border cells that would stop being
    /// `Wall` are left untouched and reported as `false`.
    pub fn set_kind(&mut self, coords: Coord2, kind: CellKind) -> bool {
        if self.is_border(coords) && kind != CellKind::Wall {
            log::warn!("Refusing to turn border cell {coords:?} into {kind:?}");
            return false;
        }
        match self.get_mut(coords) {
            Some(cell) => {
                cell.set_kind(kind);
                true
            }
            None => false,
        }
    }

    /// Turns every interior cell back into `Empty`, keeping the border.
    pub fn clear_interior(&mut self) {
        let (height, width) = self.dims();
        for row in 1..height - 1 {
            for col in 1..width - 1 {
                self.cells[(row, col).to_nd_index()].set_kind(CellKind::Empty);
            }
        }
    }

    /// Resets `visited` and `parent` on every cell. Must run before each search pass.
    pub fn clear_search_info(&mut self) {
        self.cells.iter_mut().for_each(Cell::clear_search_info);
    }
}
