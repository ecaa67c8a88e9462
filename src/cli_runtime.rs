use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use rad::clients::Clients;
use rad::config::FileConfigStore;
use rad::init::Runner;
use rad::model::Workspace;
use rad::prompt::terminal::TerminalPrompter;

#[derive(Parser)]
#[command(name = "rad")]
#[command(about = "Radius control plane CLI", long_about = None)]
pub(crate) struct Cli {
    /// Increase log verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Interactively install Radius, create an environment, and configure a workspace
    Init {
        /// Prompt for every option instead of choosing defaults
        #[arg(long)]
        full: bool,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        output: OutputFormat,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    rad::logging::init(cli.verbose);

    match cli.command {
        Commands::Init { full, output } => {
            let config = FileConfigStore::from_env()?;
            tracing::debug!(path = %config.path().display(), "using config file");
            let clients = Clients::system(Box::new(config))?;
            let cwd = std::env::current_dir().context("get current dir")?;

            let mut runner = Runner::new(Box::new(TerminalPrompter::new()), clients)
                .full(full)
                .working_dir(cwd);
            runner.validate()?;
            let workspace = runner.run()?;
            print_workspace(&workspace, output)?;
        }
    }

    Ok(())
}

fn print_workspace(workspace: &Workspace, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::json!({
                    "name": workspace.name,
                    "connection": workspace.connection,
                    "scope": workspace.scope,
                    "environment": workspace.environment,
                    "defaultApplication": workspace.default_application,
                }))
                .context("serialize workspace json")?
            );
        }
        OutputFormat::Text => {
            println!("Initialization complete! Have a RAD time 😎");
            println!("workspace: {}", workspace.name);
            println!("context: {}", workspace.connection.context);
            println!("environment: {}", workspace.environment);
            if let Some(app) = &workspace.default_application {
                println!("application: {}", app);
            }
        }
    }
    Ok(())
}
