//! Genetic Images CLI - Evolve a population toward a target image.

use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use genetic_images::{
    compute::evolution::EvolutionEngine,
    raster::{BitmapSnapshotWriter, SnapshotSink, SnapshotTag, TargetImage},
    schema::EvolutionConfig,
};

fn print_usage(program: &str) {
    eprintln!("Usage: {} <target-image> [--config <config.json>]", program);
    eprintln!();
    eprintln!("Evolve random images toward the target with a genetic algorithm.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  target-image  Image to approximate (PNG, JPEG, BMP, GIF)");
    eprintln!("  --config      Optional JSON run configuration");
    eprintln!();
    eprintln!("Print the default configuration with --example-config.");
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("genetic-images");

    if args.get(1).map(String::as_str) == Some("--example-config") {
        print_example_config();
        return;
    }

    let (target_path, config_path) = match args.as_slice() {
        [_, target] => (PathBuf::from(target), None),
        [_, target, flag, config] if flag == "--config" => {
            (PathBuf::from(target), Some(PathBuf::from(config)))
        }
        _ => {
            print_usage(program);
            std::process::exit(1);
        }
    };

    // Load configuration
    let config: EvolutionConfig = match config_path {
        Some(path) => {
            let config_str = fs::read_to_string(&path).unwrap_or_else(|e| {
                eprintln!("Error reading config file: {}", e);
                std::process::exit(1);
            });
            serde_json::from_str(&config_str).unwrap_or_else(|e| {
                eprintln!("Error parsing config: {}", e);
                std::process::exit(1);
            })
        }
        None => EvolutionConfig::default(),
    };

    if let Err(e) = config.validate() {
        eprintln!("Invalid configuration: {}", e);
        std::process::exit(1);
    }

    let target = TargetImage::load(&target_path).unwrap_or_else(|e| {
        eprintln!("Error loading target image: {}", e);
        std::process::exit(1);
    });
    let target = Arc::new(target);

    println!("Genetic Images");
    println!("==============");
    println!("Target: {} ({}x{})", target_path.display(), target.width(), target.height());
    println!("Population: {}", config.population.size);
    println!(
        "Crossover: {}  Mutation: {} (per pixel {})",
        config.variation.crossover_rate,
        config.variation.mutation_rate,
        config.variation.gene_mutation_rate
    );
    println!();

    let save_final = config.snapshot.save_final;
    let mut final_writer = BitmapSnapshotWriter::from_config(&config.snapshot);
    let writer = final_writer.clone();

    let mut engine = EvolutionEngine::new(config, Arc::clone(&target))
        .with_snapshot_sink(Box::new(writer));

    let result = engine
        .run_with_callback(|stats| {
            if stats.generation == 0 {
                println!("Initial population: max fitness {}", stats.max);
                return;
            }
            println!(
                "-- Generation {} --  min {}  max {}  avg {:.1}  std {:.1}",
                stats.generation, stats.min, stats.max, stats.mean, stats.std
            );
        })
        .unwrap_or_else(|e| {
            eprintln!("Evolution failed: {}", e);
            std::process::exit(1);
        });

    println!();
    println!("Stopped: {:?}", result.stats.stop_reason);
    println!("Generations: {}", result.stats.generations);
    println!("Best fitness: {}", result.stats.final_stats.min);
    println!(
        "Time: {:.2}s ({:.1} evaluations/s)",
        result.stats.elapsed_seconds, result.stats.evaluations_per_second
    );

    if save_final {
        match final_writer.write_snapshot(
            SnapshotTag::Final,
            &result.best,
            target.width(),
            target.height(),
        ) {
            Ok(path) => println!("Best individual written to {}", path.display()),
            Err(e) => eprintln!("Error writing final image: {}", e),
        }
    }
}

fn print_example_config() {
    let config = EvolutionConfig::default();

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap());
}
