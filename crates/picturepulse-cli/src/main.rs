mod logging;
mod output;
mod shell;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};

use picturepulse_core::config::AppConfig;
use picturepulse_core::error::PulseError;
use picturepulse_core::search::SearchCommand;
use picturepulse_runtime::RuntimeError;

use crate::output::Output;

#[derive(Parser)]
#[command(name = "picturepulse")]
#[command(about = "Search movies, rate the ones you watched, and keep a running list")]
#[command(version)]
struct Cli {
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Print machine-readable JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// OMDb API key (overrides provider.api_key)
    #[arg(long, env = "PICTUREPULSE_API_KEY", hide_env_values = true, global = true)]
    api_key: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    /// Write logs to a daily-rolling file instead of stderr
    /// (defaults to picturepulse.log in the data directory)
    #[arg(long, value_name = "PATH", num_args = 0..=1, global = true)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search movies by title
    Search {
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Show full details for a movie id (e.g. tt0133093)
    Show { id: String },
    /// Rate a movie 1-10 and add it to the watched list
    Rate {
        id: String,
        #[arg(value_parser = clap::value_parser!(u8).range(1..=10))]
        rating: u8,
    },
    /// List watched movies with summary statistics
    Watched,
    /// Remove a movie from the watched list
    Remove { id: String },
    /// Interactive search session
    Shell,
    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        cmd: ConfigCommand,
    },
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the config file location
    Path,
    /// Print the effective configuration (API key masked)
    Show,
    /// Write the default configuration to the config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),
    #[error(transparent)]
    Pulse(#[from] PulseError),
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Failed(String),
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_file = cli
        .log_file
        .clone()
        .map(|path| path.unwrap_or_else(|| AppConfig::log_dir().join("picturepulse.log")));
    if let Err(e) = logging::init(cli.verbose, cli.quiet, log_file.as_deref()) {
        eprintln!("error: failed to set up logging: {e}");
        return ExitCode::FAILURE;
    }

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn load_config(path: &Path, api_key: Option<&str>) -> Result<AppConfig, PulseError> {
    let mut config = AppConfig::load_from(path)?;
    if let Some(key) = api_key {
        config.provider.api_key = key.to_string();
    }
    Ok(config)
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let out = Output::new(cli.json, cli.quiet);
    let path = cli.config.unwrap_or_else(AppConfig::config_path);
    let api_key = cli.api_key;
    let load = || load_config(&path, api_key.as_deref());

    match cli.command {
        Command::Search { query } => {
            let config = load()?;
            let mut session = picturepulse_runtime::open(&config)?;
            let query = query.join(" ");
            if session.set_query(query.as_str()) == SearchCommand::Cleared {
                return Err(CliError::Failed(format!(
                    "query must be at least {} characters",
                    config.search.min_query_len
                )));
            }
            session.settle().await;

            let snap = session.search();
            if let Some(error) = &snap.error {
                return Err(CliError::Failed(error.clone()));
            }
            out.emit(&output::search(&snap), &snap.results);
        }
        Command::Show { id } => {
            let mut session = picturepulse_runtime::open(&load()?)?;
            session.select(id);
            session.settle().await;

            let snap = session.detail();
            if let Some(error) = &snap.error {
                return Err(CliError::Failed(error.clone()));
            }
            let human = format!(
                "{}\n{}",
                session.title(),
                output::detail(&snap, session.rating())
            );
            out.emit(&human, &snap.detail);
        }
        Command::Rate { id, rating } => {
            let mut session = picturepulse_runtime::open(&load()?)?;
            session.select(id);
            session.settle().await;

            if let Some(error) = session.detail().error {
                return Err(CliError::Failed(error));
            }
            session.rate(rating)?;
            let entry = session.add_to_watched()?;
            let human = format!(
                "Added {} ({}) rated {}/10\n",
                entry.title, entry.year, entry.user_rating
            );
            out.emit(&human, &entry);
        }
        Command::Watched => {
            let session = picturepulse_runtime::open_offline(&load()?)?;
            let report = output::WatchedReport {
                summary: session.aggregates(),
                watched: session.watched(),
            };
            out.emit(&output::watched(report.watched, &report.summary), &report);
        }
        Command::Remove { id } => {
            let mut session = picturepulse_runtime::open_offline(&load()?)?;
            let removed = session.remove_watched(&id);
            if removed == 0 {
                return Err(CliError::Failed(format!("{id} is not on the watched list")));
            }
            out.emit(
                &format!("Removed {id}\n"),
                &serde_json::json!({ "id": id, "removed": removed }),
            );
        }
        Command::Shell => {
            let config = load()?;
            let session = picturepulse_runtime::open(&config)?;
            shell::run(session, &config.search.initial_query).await?;
        }
        Command::Config { cmd } => match cmd {
            ConfigCommand::Path => println!("{}", path.display()),
            ConfigCommand::Show => {
                let mut config = load()?;
                if !config.provider.api_key.is_empty() {
                    config.provider.api_key = "********".into();
                }
                let text = toml::to_string_pretty(&config)
                    .map_err(|e| PulseError::Config(e.to_string()))?;
                out.emit(&text, &config);
            }
            ConfigCommand::Init { force } => {
                if path.exists() && !force {
                    return Err(CliError::Failed(format!(
                        "{} already exists (use --force to overwrite)",
                        path.display()
                    )));
                }
                AppConfig::default().save_to(&path)?;
                out.info(format!("Wrote {}", path.display()));
            }
        },
    }
    Ok(())
}
