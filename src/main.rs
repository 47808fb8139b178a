use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use tripspend::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for tripspend::AppCommand {
    fn from(cmd: Commands) -> tripspend::AppCommand {
        match cmd {
            Commands::Summary { json } => tripspend::AppCommand::Summary { json },
            Commands::Recent => tripspend::AppCommand::Recent,
            Commands::Country { code } => tripspend::AppCommand::Country { code },
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display average spending per country and overall
    Summary {
        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },
    /// Display spending logged today or yesterday
    Recent,
    /// Look up the currency and name of a country code
    Country { code: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => tripspend::cli::setup::setup(),
        Some(cmd) => tripspend::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
