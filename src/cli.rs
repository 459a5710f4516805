//! Command line of the `navpanel` console front.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::ConfigArgs;

/// Personal start page: prints the dashboard, or exports, imports and searches.
#[derive(Debug, Parser)]
#[command(name = "navpanel", version)]
pub struct Cli {
    #[command(flatten)]
    pub config: ConfigArgs,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// Write nav-panel-backup.json into DIR (the configured export directory by default).
    Export {
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,
    },
    /// Import a backup file.
    Import {
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
    /// Open a web search on ENGINE (the current engine by default).
    Search {
        query: String,
        #[arg(value_name = "ENGINE")]
        engine: Option<String>,
    },
}
