use crate::workspace::{BuilderConfig, Config};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "idpick")]
#[command(about = "Fuzzy-pick identifiers from a workspace's cached id list", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Log only errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

impl Cli {
    /// Default log level for this invocation.
    ///
    /// `pick` renders its list on stderr, so it logs only warnings unless asked.
    pub fn log_level(&self) -> Level {
        if self.quiet {
            Level::ERROR
        } else if self.verbose {
            Level::DEBUG
        } else if matches!(self.command, Commands::Pick { .. }) {
            Level::WARN
        } else {
            Level::INFO
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Interactively select ids; prints each selected id on its own line
    Pick {
        workspace: String,
        /// Maximum number of suggestions shown
        #[arg(long)]
        cap: Option<usize>,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        builder: BuilderArgs,
    },
    /// Print ranked suggestions for a query as `score<TAB>id`
    Suggest {
        workspace: String,
        query: String,
        /// Maximum number of suggestions (defaults to the configured cap)
        #[arg(short = 'n', long)]
        limit: Option<usize>,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Print every candidate id in stored order
    List {
        workspace: String,
        #[command(flatten)]
        source: SourceArgs,
    },
    /// Rebuild the candidate ids with the index builder and report the count
    Refresh {
        workspace: String,
        #[command(flatten)]
        source: SourceArgs,
        #[command(flatten)]
        builder: BuilderArgs,
    },
}

/// Override for where candidates are read from.
#[derive(Args, Debug, Default)]
pub struct SourceArgs {
    /// Candidate file, relative to the workspace
    #[arg(long)]
    pub storage: Option<PathBuf>,
}

impl SourceArgs {
    pub fn apply(self, config: &mut Config) {
        if let Some(storage) = self.storage {
            config.storage_path = storage;
        }
    }
}

/// Override for the program that rebuilds the candidate file.
#[derive(Args, Debug, Default)]
pub struct BuilderArgs {
    /// Program that rebuilds the candidate file
    #[arg(long)]
    pub builder: Option<String>,
    /// Argument for the builder program (repeatable; `{workspace}` is substituted)
    #[arg(long = "builder-arg", allow_hyphen_values = true)]
    pub builder_args: Vec<String>,
}

impl BuilderArgs {
    pub fn apply(self, config: &mut Config) {
        if let Some(program) = self.builder {
            config.builder = Some(BuilderConfig {
                program,
                args: self.builder_args,
            });
        } else if !self.builder_args.is_empty()
            && let Some(builder) = config.builder.as_mut()
        {
            builder.args = self.builder_args;
        }
    }
}
