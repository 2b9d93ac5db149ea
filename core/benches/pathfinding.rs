use autosnake_core::*;
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

fn open_board(width: Coord, height: Coord) -> (Board, Coord2) {
    let mut board = Board::new(width, height).unwrap();
    let head = (height / 2, width / 2);
    board.become_head(head);
    board.become_body((head.0, head.1 - 1));
    board.become_food((1, 1));
    (board, head)
}

/// Food walled off in a corner, so the search floods the whole board before giving up.
fn unreachable_food(width: Coord, height: Coord) -> (Board, Coord2) {
    let (mut board, head) = open_board(width, height);
    board.become_wall((1, 2));
    board.become_wall((2, 1));
    (board, head)
}

fn bench_breadth_first(c: &mut Criterion) {
    let mut group = c.benchmark_group("breadth_first");
    for size in [16, 32, 64, 128] {
        let (mut board, head) = open_board(size, size);
        group.bench_with_input(BenchmarkId::new("far_food", size), &head, |b, &head| {
            b.iter(|| BreadthFirst.find_route(black_box(&mut board), head))
        });

        let (mut board, head) = unreachable_food(size, size);
        group.bench_with_input(BenchmarkId::new("no_food", size), &head, |b, &head| {
            b.iter(|| BreadthFirst.find_route(black_box(&mut board), head))
        });
    }
    group.finish();
}

fn bench_autopilot_game(c: &mut Criterion) {
    c.bench_function("autopilot_500_cycles", |b| {
        b.iter(|| {
            let mut engine = Engine::new(GameConfig::new(40, 30).with_seed(11)).unwrap();
            engine.submit(Command::ToggleAutopilot);
            for _ in 0..500 {
                if engine.is_game_over() {
                    break;
                }
                engine.cycle();
            }
            black_box(engine.score())
        })
    });
}

criterion_group!(benches, bench_breadth_first, bench_autopilot_game);
criterion_main!(benches);
