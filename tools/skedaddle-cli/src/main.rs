//! Skedaddle CLI: hide messages in Morse code frame animations.
//!
//! Usage:
//!   skedaddle encode [OPTIONS]    Encode a message to an AVIF/MP4 file
//!   skedaddle plan [OPTIONS]      Show the transmission plan without encoding
//!   skedaddle decode <MORSE>      Decode a morse string back to text
//!   skedaddle decode-help         Explain how to read a transmission by eye
//!   skedaddle check               Check that ffmpeg is available
//!   skedaddle config <init|show>  Write or display the configuration file

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use skedaddle_common::config::{config_file_path, AppConfig};

mod commands;

#[derive(Parser)]
#[command(
    name = "skedaddle",
    about = "Encode secret messages as Morse code frame animations",
    version,
    author
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Message and timing options shared by `encode` and `plan`.
#[derive(Args, Debug, Clone)]
pub struct TransmissionArgs {
    /// Message to encode [default: MEOW]
    #[arg(short, long)]
    text: Option<String>,

    /// Words per minute [default: 15]
    #[arg(short, long)]
    wpm: Option<f64>,

    /// Pause after the message before the loop repeats, in seconds [default: 1.0]
    #[arg(long)]
    end_gap: Option<f64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a message into a looping image or video
    Encode {
        #[command(flatten)]
        transmission: TransmissionArgs,

        /// Output file path [default: morse-kitty.<format>]
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: avif or mp4 [default: avif]
        #[arg(short, long)]
        format: Option<String>,

        /// Add a morse beep audio track
        #[arg(short, long)]
        audio: bool,

        /// Beep frequency in Hz [default: 800]
        #[arg(short = 'F', long)]
        frequency: Option<u32>,

        /// Signal frame image, shown for dits and dahs [default: a.jpg]
        #[arg(short = 'A', long)]
        frame_a: Option<PathBuf>,

        /// Pause frame image [default: b.jpg]
        #[arg(short = 'B', long)]
        frame_b: Option<PathBuf>,

        /// Separate frame image for dahs [default: same as --frame-a]
        #[arg(long)]
        frame_dah: Option<PathBuf>,
    },

    /// Show the transmission plan without encoding
    Plan {
        #[command(flatten)]
        transmission: TransmissionArgs,

        /// Print the full event sequence as JSON
        #[arg(long)]
        json: bool,
    },

    /// Decode a morse string (dots, dashes, spaces) back to text
    Decode {
        /// Morse input, e.g. "... --- ..."
        morse: String,
    },

    /// Show instructions for decoding a transmission by eye
    DecodeHelp,

    /// Check system capabilities
    Check,

    /// Manage the configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Write the default configuration file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show the config file location and effective settings
    Show,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::load();

    // Initialize logging
    let mut logging = config.logging.clone();
    if cli.verbose {
        logging.level = "debug".to_string();
    }
    skedaddle_common::logging::init_logging(&logging);
    tracing::debug!(path = %config_file_path().display(), "Configuration resolved");

    match cli.command {
        Commands::Encode {
            transmission,
            output,
            format,
            audio,
            frequency,
            frame_a,
            frame_b,
            frame_dah,
        } => commands::encode::run(
            &config,
            transmission,
            commands::encode::OutputArgs {
                output,
                format,
                audio,
                frequency,
                frame_a,
                frame_b,
                frame_dah,
            },
        ),
        Commands::Plan { transmission, json } => commands::plan::run(&config, transmission, json),
        Commands::Decode { morse } => commands::decode::run(&morse),
        Commands::DecodeHelp => commands::decode_help::run(),
        Commands::Check => commands::check::run(),
        Commands::Config { action } => match action {
            ConfigAction::Init { force } => commands::config::init(force),
            ConfigAction::Show => commands::config::show(&config),
        },
    }
}
