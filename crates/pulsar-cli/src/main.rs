//! Pulsar CLI — frame driving, characterization, and validation.

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "pulsar")]
#[command(version, about = "Pulsar — per-frame mesh regeneration and update-strategy harness")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Drive the updater for a number of frames.
    Run {
        /// Number of frames to drive.
        #[arg(short, long, default_value_t = 240)]
        frames: u32,

        /// Sphere divisions per grid axis.
        #[arg(short, long, default_value_t = 32)]
        divisions: u32,

        /// Starting update mode (vertex, generate, publish, deferred).
        #[arg(short, long, default_value = "vertex")]
        mode: String,

        /// Advance the mode every N frames (the original app's tap gesture).
        #[arg(long)]
        cycle_every: Option<u32>,

        /// Deferred buffer handoff (snapshot, live).
        #[arg(long, default_value = "snapshot")]
        deferred_strategy: String,
    },

    /// Characterize all four update modes and report per-frame cost.
    Bench {
        /// Number of frames per mode.
        #[arg(short, long, default_value_t = 240)]
        frames: u32,

        /// Sphere divisions per grid axis.
        #[arg(short, long, default_value_t = 32)]
        divisions: u32,

        /// Rebuild the index buffer every frame (naive-baseline parity).
        #[arg(long)]
        rebuild_topology: bool,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Generate one frame and validate buffers and artifact construction.
    Validate {
        /// Sphere divisions per grid axis.
        #[arg(short, long, default_value_t = 32)]
        divisions: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            frames,
            divisions,
            mode,
            cycle_every,
            deferred_strategy,
        } => commands::run(frames, divisions, &mode, cycle_every, &deferred_strategy),
        Commands::Bench {
            frames,
            divisions,
            rebuild_topology,
            output,
        } => commands::bench(frames, divisions, rebuild_topology, output.as_deref()),
        Commands::Validate { divisions } => commands::validate(divisions),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
