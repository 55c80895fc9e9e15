use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use gaia_core::{DateBound, GaiaConfig, LogFormat};
use std::path::PathBuf;

mod commands;
mod logging;

#[derive(Parser, Debug)]
#[command(name = "gaia", version, about = "Gaia scheduling tool gateway")]
struct Cli {
    /// Configuration file (defaults to ./gaia.yaml when present)
    #[arg(long, short = 'c', env = "GAIA_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Log format, overriding the configuration file
    #[arg(long, value_enum, global = true)]
    log_format: Option<LogFormatArg>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP tool gateway.
    Serve {
        /// Interface to bind
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long, env = "PORT")]
        port: Option<u16>,
    },

    /// Inspect the published tools (offline).
    Tools {
        #[command(subcommand)]
        cmd: ToolsCommand,
    },

    /// Run one availability check against the configured upstream and print the decision.
    CheckAvailability {
        #[arg(long)]
        doctor_id: String,

        #[arg(long)]
        branch_id: String,

        /// Start of the window (YYYY-MM-DD or ISO 8601)
        #[arg(long)]
        date_from: DateBound,

        /// End of the window (YYYY-MM-DD or ISO 8601)
        #[arg(long)]
        date_to: DateBound,
    },
}

#[derive(Subcommand, Debug)]
enum ToolsCommand {
    /// List the published tools
    List {
        /// Print each tool's input schema
        #[arg(long, short = 'v', default_value_t = false)]
        verbose: bool,
    },

    /// Show the full descriptor of one tool
    Describe { tool_name: String },
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogFormatArg {
    Text,
    Json,
}

impl From<LogFormatArg> for LogFormat {
    fn from(arg: LogFormatArg) -> Self {
        match arg {
            LogFormatArg::Text => LogFormat::Text,
            LogFormatArg::Json => LogFormat::Json,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = GaiaConfig::load(cli.config.as_deref()).with_context(|| match &cli.config {
        Some(path) => format!("Failed to load configuration from {}", path.display()),
        None => "Failed to load configuration".to_string(),
    })?;
    if let Some(format) = cli.log_format {
        config.logging.format = format.into();
    }

    logging::init(config.logging.format);

    match cli.cmd {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            commands::serve::run(config).await?
        }

        Command::Tools { cmd } => match cmd {
            ToolsCommand::List { verbose } => commands::tools::list(verbose)?,
            ToolsCommand::Describe { tool_name } => commands::tools::describe(&tool_name)?,
        },

        Command::CheckAvailability {
            doctor_id,
            branch_id,
            date_from,
            date_to,
        } => {
            let query = gaia_core::AvailabilityQuery {
                doctor_id,
                branch_id,
                date_from,
                date_to,
            };
            commands::availability::check(&config, query).await?
        }
    }

    Ok(())
}
