use criterion::{criterion_group, criterion_main, Criterion};
use common::game::{Direction, Grid, NpcController, Point, SessionRng, Snake};

fn scattered_foods(count: usize, rng: &mut SessionRng) -> Vec<Point> {
    (0..count)
        .map(|_| Point::new(rng.random_range(0..100), rng.random_range(0..100)))
        .collect()
}

fn long_snake(len: usize) -> Snake {
    // Serpentine body so the self-occupancy checks have something to chew on.
    let mut snake = Snake::spawn(Point::new(2, 0), Direction::Right);
    let mut x = 2;
    let mut y = 0;
    let mut rightward = true;
    for _ in 0..len.saturating_sub(3) {
        if (rightward && x == 99) || (!rightward && x == 0) {
            y += 1;
            rightward = !rightward;
        } else if rightward {
            x += 1;
        } else {
            x -= 1;
        }
        snake.advance(Point::new(x, y), true);
    }
    snake
}

fn bench_choose_short_snake(foods: &[Point]) {
    let grid = Grid::new(100, 100);
    let snake = Snake::spawn(Point::new(50, 50), Direction::Left);
    NpcController::choose_direction(&snake, Direction::Left, foods, grid);
}

fn bench_choose_long_snake(snake: &Snake, foods: &[Point]) {
    let grid = Grid::new(100, 100);
    NpcController::choose_direction(snake, Direction::Right, foods, grid);
}

fn npc_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("npc_heuristic");

    let mut rng = SessionRng::new(4242);
    let foods = scattered_foods(5, &mut rng);
    let crowded_foods = scattered_foods(50, &mut rng);
    let snake = long_snake(500);

    group.bench_function("short_snake_five_foods", |b| {
        b.iter(|| bench_choose_short_snake(&foods))
    });

    group.bench_function("short_snake_fifty_foods", |b| {
        b.iter(|| bench_choose_short_snake(&crowded_foods))
    });

    group.bench_function("long_snake_five_foods", |b| {
        b.iter(|| bench_choose_long_snake(&snake, &foods))
    });

    group.finish();
}

criterion_group!(benches, npc_bench);
criterion_main!(benches);
