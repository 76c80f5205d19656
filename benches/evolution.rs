//! Benchmarks for maze simulation and the generational loop.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use maze_evolver::{
    EvolutionConfig, EvolutionEngine, GridMaze, Instruction, simulate,
    compute::evolution::{FitnessEvaluator, GenomeRng, Robot},
    schema::{GenomeConstraints, PopulationConfig},
};

fn bench_simulate(c: &mut Criterion) {
    let maze = GridMaze::reference();
    let solution: Vec<Instruction> = "FFFFLFFFFFRFFFLFFFFRFFLFS"
        .chars()
        .filter_map(Instruction::from_symbol)
        .collect();

    c.bench_function("simulate_reference_solution", |b| {
        b.iter(|| simulate(black_box(&solution), black_box(&maze)));
    });
}

fn bench_evaluate_population(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_population");
    let maze = GridMaze::reference();
    let evaluator = FitnessEvaluator::default();
    let constraints = GenomeConstraints::default();

    for size in [100, 500, 2000] {
        let mut rng = GenomeRng::new(42);
        let genotypes: Vec<_> = (0..size)
            .map(|_| rng.random_genotype(&constraints))
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                genotypes
                    .iter()
                    .map(|g| Robot::evaluated(g.clone(), &evaluator, &maze).fitness())
                    .sum::<f64>()
            });
        });
    }

    group.finish();
}

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("generation_step");

    for size in [100, 500] {
        let config = EvolutionConfig {
            population: PopulationConfig {
                size,
                elite_count: 10,
                ..Default::default()
            },
            random_seed: Some(42),
            ..Default::default()
        };

        let mut engine = EvolutionEngine::new(config).expect("valid config");
        engine.initialize();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| engine.advance());
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_simulate,
    bench_evaluate_population,
    bench_generation
);
criterion_main!(benches);
