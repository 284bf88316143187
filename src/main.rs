//! Ripple - Wavefront propagation for generative sound-propagation drawings

use anyhow::Result;
use clap::Parser;
use ripple::config;
use ripple::export;
use ripple::geometry::Point;
use ripple::Scene;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands};

fn init_logging(verbose: bool) {
    let default = if verbose { "ripple=debug" } else { "ripple=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Trace {
            config: config_path,
            output,
        } => {
            println!("Loading scene from {:?}...", config_path);
            let cfg = config::load_config(&config_path)?;
            let scene = Scene::from_config(&cfg)?;

            println!(
                "Tracing {} sources on a {}x{} grid...",
                cfg.sources.len(),
                cfg.grid.width,
                cfg.grid.height
            );
            let report = scene.trace()?;

            for source in &report.sources {
                let polylines: usize = source.wavefronts.iter().map(|w| w.polylines.len()).sum();
                println!(
                    "  Source {}: {} rings, {} polylines, {} nodes reached",
                    source.index,
                    source.wavefronts.len(),
                    polylines,
                    source.reached_nodes
                );
            }

            export::write_report(&output, &report)?;
            println!("\nWrote {} polylines to {:?}", report.polyline_count(), output);
        }

        Commands::Probe {
            config: config_path,
            x,
            y,
            home,
        } => {
            let cfg = config::load_config(&config_path)?;
            let scene = Scene::from_config(&cfg)?;
            let fields = scene.compute_fields();
            let point = Point::new(x, y);

            println!("Probe at ({}, {}):", x, y);
            for (i, sf) in fields.iter().enumerate() {
                let time = sf.field.sample(point);
                if time.is_finite() {
                    println!("  Source {}: arrival {:.3}", i, time);
                } else {
                    println!("  Source {}: unreached", i);
                }
            }

            let value = ripple::interference_at(point, &fields, home)?;
            println!("  Interference (home {}): {:.4}", home, value);
        }

        Commands::Check {
            config: config_path,
        } => {
            println!("Checking scene at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Scene is valid!");
                    println!("  Grid: {}x{}", cfg.grid.width, cfg.grid.height);
                    println!(
                        "  Bounds: ({}, {}) - ({}, {})",
                        cfg.bounds.min_x, cfg.bounds.min_y, cfg.bounds.max_x, cfg.bounds.max_y
                    );
                    println!("  Sources: {}", cfg.sources.len());
                    for source in &cfg.sources {
                        println!(
                            "    - ({}, {}) wavelength {} amplitude {}",
                            source.position.x,
                            source.position.y,
                            source.wavelength,
                            source.amplitude
                        );
                    }
                    println!("  Obstacles: {}", cfg.obstacles.len());
                    if !cfg.thresholds.is_empty() {
                        println!("  Thresholds: {:?}", cfg.thresholds);
                    } else if let Some(rings) = cfg.rings {
                        match rings.count {
                            Some(count) => println!("  Rings: {} every {}", count, rings.spacing),
                            None => println!("  Rings: every {} until unreached", rings.spacing),
                        }
                    }
                    println!("  Saddle resolution: {:?}", cfg.contour.saddle);
                }
                Err(e) => {
                    println!("Scene is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example = include_str!("../scene.example.yaml");

            let path = "scene.yaml";
            if std::path::Path::new(path).exists() {
                println!("scene.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example)?;
                println!("Created scene.yaml with example scene.");
            }
        }
    }

    Ok(())
}
