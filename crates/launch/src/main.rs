use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use launch_config::parser;
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser)]
#[command(name = "launch")]
#[command(about = "Launch Order - dependency-aware service start ordering")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(
        short = 'f',
        long = "file",
        global = true,
        env = "LAUNCH_CONFIG",
        default_value = "services.yaml"
    )]
    file: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the order in which services start
    Order {
        /// Services to start (empty means all)
        services: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Group services that may start together
        #[arg(long)]
        layers: bool,
    },

    /// Print the order in which services stop
    StopOrder {
        /// Services to stop (empty means all)
        services: Vec<String>,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },

    /// Show services affected by stopping the given ones
    Affected {
        /// Services to stop
        #[arg(required = true)]
        services: Vec<String>,
    },

    /// Validate configuration file and dependencies
    Validate,
}

/// Output format for service lists
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One service per line
    Text,
    /// JSON array
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let logs = logging::init(cli.verbose);

    let config = parser::parse_file(&cli.file)
        .with_context(|| format!("Failed to parse configuration {}", cli.file.display()))?;
    logs.apply_configured(config.settings.log_level.as_deref());

    match cli.command {
        Commands::Order {
            services,
            format,
            layers,
        } => commands::order::run(&config, &services, format, layers),
        Commands::StopOrder { services, format } => {
            commands::stop::run(&config, &services, format)
        }
        Commands::Affected { services } => commands::affected::run(&config, &services),
        Commands::Validate => commands::validate::run(&cli.file, &config),
    }
}
