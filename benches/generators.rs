use criterion::{criterion_group, criterion_main, Criterion};
use mazes::{
    generators::{self, GenerationParams},
    grid::Grid,
    observers::NoopObserver,
    randomness::seeded_rng,
    units::{Height, Width},
};

fn bench_recursive_backtracker_maze_32(c: &mut Criterion) {
    let mut g = Grid::new(Width(32), Height(32)).unwrap();
    let params = GenerationParams::for_grid(&g);
    let mut rng = seeded_rng(Some(32));

    c.bench_function("recursive_backtracker_maze_32", move |b| {
        b.iter(|| generators::recursive_backtracker(&mut g, &params, &mut rng, &mut NoopObserver))
    });
}

fn bench_recursive_backtracker_maze_350(c: &mut Criterion) {
    let mut g = Grid::new(Width(350), Height(350)).unwrap();
    let params = GenerationParams::for_grid(&g);
    let mut rng = seeded_rng(Some(350));

    c.bench_function("recursive_backtracker_maze_350", move |b| {
        b.iter(|| generators::recursive_backtracker(&mut g, &params, &mut rng, &mut NoopObserver))
    });
}

fn bench_carve_loops_100(c: &mut Criterion) {
    let mut g = Grid::new(Width(100), Height(100)).unwrap();
    let params = GenerationParams::for_grid(&g).loops(500);
    let mut rng = seeded_rng(Some(100));

    c.bench_function("backtracker_with_500_loops_100", move |b| {
        b.iter(|| generators::recursive_backtracker(&mut g, &params, &mut rng, &mut NoopObserver))
    });
}

criterion_group!(
    benches,
    bench_recursive_backtracker_maze_32,
    bench_recursive_backtracker_maze_350,
    bench_carve_loops_100
);
criterion_main!(benches);
