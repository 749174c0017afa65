use std::path::PathBuf;

use clap::Parser;

use crate::config::Config;
use crate::logging::Verbosity;

/// biography - edit and display your personal biography in the browser
#[derive(Debug, Parser)]
#[command(name = "biography")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a configuration file (default: ./biography.toml)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Directory holding the record and the profile picture
    #[arg(short, long, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:8501
    #[arg(short, long, value_name = "ADDR")]
    pub bind: Option<String>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    #[must_use]
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::Trace,
            }
        }
    }

    /// Flags given on the command line win over every other source.
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(bind) = &self.bind {
            config.bind = bind.clone();
        }
    }
}
