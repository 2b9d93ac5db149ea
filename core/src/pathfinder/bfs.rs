use alloc::collections::VecDeque;
use smallvec::SmallVec;

use super::*;

/// Breadth-first search towards the nearest food, expanding neighbors in
/// `Direction::ALL` order. Falls back to the first open neighbor when no food is
/// reachable.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BreadthFirst;

impl PathFinder for BreadthFirst {
    fn find_route(&self, board: &mut Board, head: Coord2) -> Route {
        board.clear_search_info();

        let Some(head_cell) = board.get_mut(head) else {
            return Route::Stuck;
        };
        head_cell.mark_visited(None);

        let mut to_visit = VecDeque::from([head]);
        while let Some(current) = to_visit.pop_front() {
            if board.kind_at(current) == Some(CellKind::Food) {
                return match first_step(board, head, current) {
                    Some((next, distance)) => Route::Food { next, distance },
                    None => {
                        log::warn!("Broken search path from {current:?}, falling back");
                        fallback(board, head)
                    }
                };
            }

            let neighbors: SmallVec<[Coord2; 4]> = board
                .iter_neighbors(current)
                .map(|(_, coords)| coords)
                .filter(|&coords| {
                    board
                        .get(coords)
                        .is_some_and(|cell| !cell.visited() && cell.kind().is_traversable())
                })
                .collect();

            for coords in neighbors {
                if let Some(cell) = board.get_mut(coords) {
                    cell.mark_visited(Some(current));
                    to_visit.push_back(coords);
                }
            }
        }

        fallback(board, head)
    }
}

/// Walks parent links back from `food` to the cell adjacent to `head`.
///
/// Returns that cell together with the path length, or `None` if the chain breaks.
fn first_step(board: &Board, head: Coord2, food: Coord2) -> Option<(Coord2, usize)> {
    let mut current = food;
    let mut distance = 1;
    loop {
        let parent = board.get(current)?.parent()?;
        if parent == head {
            return Some((current, distance));
        }
        current = parent;
        distance += 1;
    }
}

fn fallback(board: &Board, head: Coord2) -> Route {
    board
        .iter_neighbors(head)
        .find(|&(_, coords)| {
            matches!(
                board.kind_at(coords),
                Some(CellKind::Empty | CellKind::Food)
            )
        })
        .map_or(Route::Stuck, |(_, coords)| Route::Wander(coords))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;
    use alloc::vec::Vec;

    /// Builds a board from rows of `#` wall, `*` food, `H` head, `o` body, `.` empty.
    fn parse(rows: &[&str]) -> (Board, Coord2) {
        let height = rows.len() as Coord;
        let width = rows[0].len() as Coord;
        let mut board = Board::new(width, height).unwrap();
        let mut head = (0, 0);
        for (row, line) in rows.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                let coords = (row as Coord, col as Coord);
                let kind = match ch {
                    '#' => CellKind::Wall,
                    '*' => CellKind::Food,
                    'H' => {
                        head = coords;
                        CellKind::Head
                    }
                    'o' => CellKind::Body,
                    _ => CellKind::Empty,
                };
                board.set_kind(coords, kind);
            }
        }
        (board, head)
    }

    /// Plain distance fill from `head`, independent of the search metadata.
    fn brute_force_distances(board: &Board, head: Coord2) -> Vec<Vec<Option<usize>>> {
        let (height, width) = board.dims();
        let mut dist = vec![vec![None; width as usize]; height as usize];
        dist[head.0 as usize][head.1 as usize] = Some(0);
        let mut changed = true;
        while changed {
            changed = false;
            for cell in board.iter() {
                let (row, col) = cell.coords();
                if !cell.kind().is_traversable() {
                    continue;
                }
                let best = board
                    .iter_neighbors(cell.coords())
                    .filter_map(|(_, (r, c))| dist[r as usize][c as usize])
                    .min();
                if let Some(best) = best {
                    let slot = &mut dist[row as usize][col as usize];
                    if slot.is_none_or(|d| best + 1 < d) {
                        *slot = Some(best + 1);
                        changed = true;
                    }
                }
            }
        }
        dist
    }

    fn nearest_food(board: &Board, head: Coord2) -> Option<usize> {
        let dist = brute_force_distances(board, head);
        board
            .iter()
            .filter(|cell| cell.kind() == CellKind::Food)
            .filter_map(|cell| dist[cell.row() as usize][cell.col() as usize])
            .min()
    }

    #[test]
    fn finds_food_straight_ahead() {
        // Width 6 keeps column 4 inside the border ring.
        let (mut board, head) = parse(&[
            "######", //
            "#....#", //
            "#oH.*#", //
            "#....#", //
            "######",
        ]);

        let route = BreadthFirst.find_route(&mut board, head);

        assert_eq!(
            route,
            Route::Food {
                next: (2, 3),
                distance: 2
            }
        );
    }

    #[test]
    fn returns_first_step_of_a_shortest_path() {
        let grids: [&[&str]; 4] = [
            &[
                "#######", //
                "#..#..#", //
                "#H.#.*#", //
                "#.....#", //
                "#######",
            ],
            &[
                "########", //
                "#*....o#", //
                "#.###.o#", //
                "#...#.H#", //
                "#.*....#", //
                "########",
            ],
            &[
                "#######", //
                "#*...*#", //
                "#..H..#", //
                "#oooo.#", //
                "#*....#", //
                "#######",
            ],
            &[
                "#########", //
                "#.......#", //
                "#.#####.#", //
                "#.#*..#.#", //
                "#.#.###.#", //
                "#...H...#", //
                "#########",
            ],
        ];

        for rows in grids {
            let (mut board, head) = parse(rows);
            let expected = nearest_food(&board, head).unwrap();

            let Route::Food { next, distance } = BreadthFirst.find_route(&mut board, head) else {
                panic!("no route found for {rows:?}");
            };

            assert_eq!(distance, expected, "{rows:?}");
            assert_eq!(manhattan(head, next), 1);
            // Stepping into `next` must leave the food exactly one hop closer.
            let mut stepped = board.clone();
            stepped.become_body(head);
            stepped.become_head(next);
            let remaining = if board.kind_at(next) == Some(CellKind::Food) {
                0
            } else {
                nearest_food(&stepped, next).unwrap()
            };
            assert_eq!(remaining + 1, expected, "{rows:?}");
        }
    }

    #[test]
    fn ties_follow_neighbor_order() {
        let (mut board, head) = parse(&[
            "#####", //
            "#.*.#", //
            "#.H*#", //
            "#...#", //
            "#####",
        ]);

        let route = BreadthFirst.find_route(&mut board, head);

        assert_eq!(
            route,
            Route::Food {
                next: (1, 2),
                distance: 1
            }
        );
    }

    #[test]
    fn falls_back_to_first_open_neighbor() {
        let (mut board, head) = parse(&[
            "#######", //
            "#...#*#", //
            "#.H.###", //
            "#.o...#", //
            "#######",
        ]);

        let route = BreadthFirst.find_route(&mut board, head);

        assert_eq!(route, Route::Wander((1, 2)));
        assert_eq!(route.next_cell(head), (1, 2));
    }

    #[test]
    fn stuck_returns_the_head() {
        let (mut board, head) = parse(&[
            "#####", //
            "#.o.#", //
            "#oHo#", //
            "#.#*#", //
            "#####",
        ]);

        let route = BreadthFirst.find_route(&mut board, head);

        assert!(route.is_stuck());
        assert_eq!(route.next_cell(head), head);
    }

    #[test]
    fn no_state_leaks_between_searches() {
        let (mut board, head) = parse(&[
            "#######", //
            "#*....#", //
            "#..H..#", //
            "#....*#", //
            "#######",
        ]);
        let first = BreadthFirst.find_route(&mut board, head);

        board.become_empty((1, 1));
        let second = BreadthFirst.find_route(&mut board, head);

        assert_eq!(
            first,
            Route::Food {
                next: (1, 3),
                distance: 3
            }
        );
        assert_eq!(
            second,
            Route::Food {
                next: (3, 3),
                distance: 3
            }
        );

        board.clear_search_info();
        assert!(
            board
                .iter()
                .all(|cell| !cell.visited() && cell.parent().is_none())
        );
    }
}
