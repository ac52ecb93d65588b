use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "rallylog")]
#[command(about = "Local-first practice log for padel training clips", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Vault directory (defaults to the per-user data dir)
    #[arg(short, long, global = true)]
    pub dir: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Save a captured clip into the vault
    #[command(alias = "s")]
    Save {
        /// Path to the recorded video file
        file: PathBuf,

        /// Shot type (derecha, reves, volea_derecha, volea_reves, bandeja, remate, saque)
        #[arg(short, long)]
        shot: String,

        /// Clip duration in seconds
        #[arg(long, default_value_t = 0.0)]
        duration: f64,
    },

    /// List stored clips
    #[command(alias = "ls")]
    List {
        /// Only show clips of this shot type
        #[arg(short, long)]
        shot: Option<String>,
    },

    /// Delete one or more clips by id (unique prefixes accepted)
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Show vault totals
    Stats,

    /// Delete clips older than the retention window
    Sweep {
        /// Override the configured age threshold, in days
        #[arg(long)]
        days: Option<u32>,
    },

    /// Record an analysis score for a user and shot type
    #[command(alias = "r")]
    Record {
        user: String,

        /// Shot type the score applies to
        shot: String,

        /// Overall score, 0-100
        score: u8,

        #[arg(long)]
        posture: Option<u8>,

        #[arg(long)]
        timing: Option<u8>,

        #[arg(long = "follow-through")]
        follow_through: Option<u8>,

        #[arg(long)]
        power: Option<u8>,

        /// Clip this score belongs to (id prefix accepted)
        #[arg(long)]
        clip: Option<String>,
    },

    /// Show a user's progress per shot type
    Summary { user: String },

    /// Verify and repair vault consistency
    Doctor,

    /// Get or set configuration (media-ext, retention-days)
    Config {
        /// Configuration key
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}
