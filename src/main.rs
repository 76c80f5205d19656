//! Maze Evolver CLI - Evolve a maze-solving robot from JSON configuration.

use std::fs;
use std::io;
use std::path::PathBuf;

use maze_evolver::{
    EvolutionConfig, EvolutionEngine, GridMaze,
    report::{RunRecorder, write_solution},
};

/// Generation budget applied by `--default`. The reference tuning can plateau
/// on a path that reaches the goal in too many moves.
const DEFAULT_GENERATION_BUDGET: usize = 5_000;

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} <config.json | --default> [output_dir]", args[0]);
        eprintln!();
        eprintln!("Evolve robot instruction sequences until one solves the maze.");
        eprintln!();
        eprintln!("Arguments:");
        eprintln!("  config.json  Path to evolution configuration file");
        eprintln!(
            "  --default    Run the reference maze with default settings ({} generations max)",
            DEFAULT_GENERATION_BUDGET
        );
        eprintln!("  output_dir   Directory for the fitness log and solution file");
        eprintln!();
        eprintln!("Example configuration is generated with --example flag.");
        std::process::exit(1);
    }

    if args[1] == "--example" {
        print_example_config();
        return;
    }

    let config: EvolutionConfig = if args[1] == "--default" {
        default_run_config()
    } else {
        let config_path = PathBuf::from(&args[1]);
        let config_str = fs::read_to_string(&config_path).unwrap_or_else(|e| {
            eprintln!("Error reading config file: {}", e);
            std::process::exit(1);
        });
        serde_json::from_str(&config_str).unwrap_or_else(|e| {
            eprintln!("Error parsing config: {}", e);
            std::process::exit(1);
        })
    };

    let output_dir = args.get(2).map(PathBuf::from);

    let mut engine = EvolutionEngine::new(config.clone()).unwrap_or_else(|e| {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    });

    let mut recorder = output_dir.as_ref().map(|dir| {
        fs::create_dir_all(dir)
            .and_then(|_| RunRecorder::create(dir.join("robots.txt")))
            .unwrap_or_else(|e| {
                eprintln!("Error creating output files: {}", e);
                std::process::exit(1);
            })
    });

    print_header(&config, engine.maze(), engine.seed());

    let mut record_error: Option<io::Error> = None;
    let result = engine.run_with_callback(|report| {
        println!(
            "  Generation {}: best={:.4} avg={:.4} {}",
            report.generation, report.best.fitness, report.avg_fitness, report.best.phenotype
        );
        log::trace!("Fitness: {:?}", report.fitness);

        if let Some(recorder) = recorder.as_mut()
            && record_error.is_none()
            && let Err(e) = recorder.record(report)
        {
            record_error = Some(e);
        }
    });

    println!();
    if result.converged() {
        println!("Solved after {} generations", result.stats.generations);
    } else {
        println!(
            "Stopped after {} generations: {}",
            result.stats.generations, result.stats.stop_reason
        );
    }
    println!("  Best fitness:   {:.4}", result.best.fitness);
    println!("  Best phenotype: {}", result.best.phenotype);
    println!("  Best genotype:  {}", result.best.genotype);
    println!(
        "  Outcome:        {:?} at {} after {} moves",
        result.best.outcome, result.best.final_position, result.best.moves_made
    );
    println!(
        "  Time:           {:.2}s ({:.0} evaluations/s)",
        result.stats.elapsed_seconds, result.stats.evaluations_per_second
    );

    if let Some(dir) = output_dir {
        if let Some(e) = record_error {
            eprintln!("Error writing fitness log: {}", e);
            std::process::exit(1);
        }
        let finished = recorder
            .map(RunRecorder::finish)
            .transpose()
            .and_then(|_| write_solution(dir.join("solution.txt"), &result.best.phenotype));
        if let Err(e) = finished {
            eprintln!("Error writing output files: {}", e);
            std::process::exit(1);
        }
        println!("  Output:         {}", dir.display());
    }
}

fn print_header(config: &EvolutionConfig, maze: &GridMaze, seed: u64) {
    println!("Maze Evolver");
    println!("============");
    for row in maze.to_rows() {
        println!("  {}", row);
    }
    println!(
        "Population: {} ({} elites), crossover rate {:.0}%",
        config.population.size,
        config.population.elite_count,
        config.operators.crossover_rate * 100.0
    );
    println!("Target fitness: {}", config.population.target_fitness);
    match config.population.max_generations {
        Some(max) => println!("Generation budget: {}", max),
        None => {
            log::warn!("No generation budget set; the run stops only on the target or stagnation");
            println!(
                "Generation budget: unbounded (set population.max_generations to cap the run)"
            );
        }
    }
    println!("Seed: {}", seed);
    println!();
}

fn default_run_config() -> EvolutionConfig {
    let mut config = EvolutionConfig::default();
    config.population.max_generations = Some(DEFAULT_GENERATION_BUDGET);
    config
}

fn print_example_config() {
    let config = EvolutionConfig {
        random_seed: Some(42),
        ..Default::default()
    };

    println!("Example configuration (config.json):");
    match serde_json::to_string_pretty(&config) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing config: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_run_is_bounded() {
        let config = default_run_config();
        assert_eq!(
            config.population.max_generations,
            Some(DEFAULT_GENERATION_BUDGET)
        );
        assert!(config.validate().is_ok());
    }
}
