//! CLI definitions for segtype
//!
//! Kept in the library so completion generation and tests can reach the
//! same `clap` definitions the binary parses.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Version string with git hash and build date.
pub const VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_GIT_SHA"),
    " ",
    env!("SEGTYPE_BUILD_DATE"),
    ")"
);

#[derive(Parser, Debug)]
#[command(name = "segtype")]
#[command(version = VERSION)]
#[command(about = "Listening and typing practice against timed subtitle segments")]
#[command(
    long_about = "Plays captions segment by segment, pausing at the end of each one so you \
can type what you heard.\n\nMEDIA is either a path to a caption JSON file or a media id \
looked up as <id>.json in the captions directory."
)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Write logs to this file
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Practise typing a video's captions segment by segment
    #[command(long_about = "Open an interactive practice session.\n\n\
Keys:\n  Ctrl-N  next segment\n  Ctrl-R  repeat segment\n  Ctrl-B  previous segment\n  \
Home/End  first/last segment\n  Ctrl-P  play/pause\n  Ctrl-T  show/hide subtitle\n  \
Ctrl-U  clear typed input\n  Esc     quit")]
    Practice {
        /// Caption file or media id
        media: String,

        /// Directory to look up media ids in
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// List the segments loaded for a media id
    Segments {
        /// Caption file or media id
        media: String,

        /// Directory to look up media ids in
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show which segment is active at a playback position
    Locate {
        /// Caption file or media id
        media: String,

        /// Playback position in milliseconds
        position_ms: u64,

        /// Directory to look up media ids in
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Inspect configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as TOML
    Show,
    /// Print the config file location
    Path,
    /// Write a config file with default settings if none exists
    Init,
}
