//! CLI argument parsing and command dispatch

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands;

/// app-jre - Build a minimal Java runtime image for a packaged application
#[derive(Parser, Debug)]
#[command(name = "app-jre")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Colorize output (always, never, auto)
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    color: String,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract the bundle, analyze it and link a stripped runtime image
    Link(commands::link::LinkArgs),

    /// Show the modules the runtime image would contain, without linking
    Modules(commands::modules::ModulesArgs),

    /// Validate the configuration and the resolved build layout
    Validate(commands::validate::ValidateArgs),

    /// Generate shell completion scripts
    Completions(commands::completions::CompletionsArgs),
}

impl Cli {
    fn init_logging(&self) {
        // RUST_LOG takes precedence over --log-level
        let env = env_logger::Env::default().default_filter_or(self.log_level.as_str());
        let _ = env_logger::Builder::from_env(env)
            .format_timestamp(None)
            .try_init();
    }

    /// Execute the CLI command
    pub fn execute(self) -> Result<()> {
        self.init_logging();

        match self.command {
            Commands::Link(args) => commands::link::execute(args, &self.color),
            Commands::Modules(args) => commands::modules::execute(args, &self.color),
            Commands::Validate(args) => commands::validate::execute(args, &self.color),
            Commands::Completions(args) => commands::completions::execute(args),
        }
    }
}
