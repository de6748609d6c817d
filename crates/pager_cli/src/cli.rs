//! Command line arguments for `pager`.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use pager_engine::CacheCategory;
use pager_logging::LevelFilter;

#[derive(Parser)]
#[command(
    name = "pager",
    version,
    about = "Page through the Rick and Morty API from the terminal"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (default: ./pager.ron).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Also write logs to ./pager.log.
    #[arg(long = "log-file", global = true)]
    pub log_file: bool,

    /// Increase log verbosity (-v for info, -vv for debug).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// List a collection page by page.
    List(ListArgs),
}

#[derive(Parser)]
pub struct ListArgs {
    #[arg(value_enum)]
    pub resource: Resource,

    /// Stop after this many pages.
    #[arg(long = "max-pages", value_name = "N")]
    pub max_pages: Option<usize>,

    /// Drop cached responses and reload from the first page.
    #[arg(long = "refresh")]
    pub refresh: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Resource {
    Episodes,
    Characters,
    Locations,
}

impl Resource {
    pub fn cache_category(self) -> CacheCategory {
        match self {
            Resource::Episodes => CacheCategory::Episodes,
            Resource::Characters => CacheCategory::Characters,
            Resource::Locations => CacheCategory::Locations,
        }
    }
}
