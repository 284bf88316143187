//! CLI interface for Ripple

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Wavefront propagation for generative sound-propagation drawings
#[derive(Parser)]
#[command(name = "ripple")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Log solver and linking details
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Solve a scene and write its wavefronts as JSON
    Trace {
        /// Scene file path
        #[arg(short, long, default_value = "scene.yaml")]
        config: PathBuf,

        /// Output file path
        #[arg(short, long, default_value = "wavefronts.json")]
        output: PathBuf,
    },

    /// Print arrival times and interference at a point
    Probe {
        /// Scene file path
        #[arg(short, long, default_value = "scene.yaml")]
        config: PathBuf,

        /// World x coordinate
        #[arg(long, allow_hyphen_values = true)]
        x: f64,

        /// World y coordinate
        #[arg(long, allow_hyphen_values = true)]
        y: f64,

        /// Index of the source whose wavefront the point lies on
        #[arg(long, default_value = "0")]
        home: usize,
    },

    /// Validate a scene file
    Check {
        /// Scene file path
        #[arg(short, long, default_value = "scene.yaml")]
        config: PathBuf,
    },

    /// Generate an example scene file
    Init,
}
