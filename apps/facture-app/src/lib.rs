//! # Facture App Library
//!
//! Request boundary: configuration, commands, and the `facture` CLI.
//!
//! ## Module Structure
//! ```text
//! facture_app_lib/
//! ├── lib.rs          ◄─── You are here (run, tracing, output)
//! ├── main.rs         ◄─── Binary entry (calls run())
//! ├── cli.rs          ◄─── clap definitions
//! ├── error.rs        ◄─── ApiError { code, message }
//! ├── commands/       ◄─── generate_document, clients, items, kinds
//! │   ├── mod.rs
//! │   ├── document.rs
//! │   ├── client.rs
//! │   └── item.rs
//! └── state/          ◄─── AppState { config, store, renderer }
//!     ├── mod.rs
//!     └── config.rs
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use crate::cli::{ClientAction, Cli, Command, ConfigAction, ItemAction};
use crate::commands::{client, document, item};
use crate::error::{ApiError, ApiResult};
use crate::state::{AppConfig, AppState, ConfigError};

/// Parses the command line, runs one command, and reports the outcome.
///
/// Errors are printed (as JSON with `--json`) and turn into a non-zero
/// exit code; nothing here panics on user input.
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    let json = cli.json;
    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = ?err.code, "{}", err.message);
            if json {
                match serde_json::to_string_pretty(&err) {
                    Ok(body) => println!("{}", body),
                    Err(_) => eprintln!("{}", err),
                }
            } else {
                eprintln!("Erreur : {}", err.message);
            }
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber on stderr.
///
/// Default filter: `info,facture=debug`, overridden by `RUST_LOG`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,facture=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::TRACE)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Runs one parsed command.
pub fn execute(cli: Cli) -> ApiResult<()> {
    let Cli {
        config: config_path,
        json,
        command,
    } = cli;
    let out = Output { json };

    match command {
        Command::Kinds => {
            let kinds = document::list_document_kinds();
            out.emit(&kinds, || {
                kinds
                    .iter()
                    .map(|k| format!("{:<20} {}  {}", k.id, k.type_code, k.label))
                    .collect::<Vec<_>>()
                    .join("\n")
            })
        }
        Command::Config {
            action: ConfigAction::Init { force },
        } => {
            let path = config_path
                .or_else(AppConfig::default_config_path)
                .ok_or_else(|| ApiError::internal("No config directory available"))?;
            if path.exists() && !force {
                return Err(ApiError::validation(format!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                )));
            }
            AppConfig::default().save(&path)?;
            out.emit(&path, || format!("Configuration écrite : {}", path.display()))
        }
        Command::Config {
            action: ConfigAction::Show,
        } => {
            let config = AppConfig::load(config_path)?;
            let text = toml::to_string_pretty(&config)
                .map_err(|e| ApiError::internal(e.to_string()))?;
            out.emit(&config, || text.trim_end().to_string())
        }
        command => {
            let config = AppConfig::load(config_path)?;
            let state = AppState::open(config)?;
            info!(data_dir = %state.store.data_dir().display(), "Facture ready");
            dispatch(&state, out, command)
        }
    }
}

/// Runs a command that needs the record store.
fn dispatch(state: &AppState, out: Output, command: Command) -> ApiResult<()> {
    let fmt = &state.config.format;

    match command {
        Command::Generate(args) => {
            let dto = document::generate_document(state, args.into())?;
            out.emit(&dto, || dto.summary_lines(fmt).join("\n"))
        }
        Command::Clients { action } => match action {
            ClientAction::List => {
                let clients = client::list_clients(state)?;
                out.emit(&clients, || {
                    clients
                        .iter()
                        .map(|c| format!("{:>4}  {}  ({})", c.id, c.name, c.address))
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            }
            ClientAction::Add(args) => {
                let added = client::add_client(state, args.into())?;
                out.emit(&added, || format!("Client {} ajouté : {}", added.id, added.name))
            }
            ClientAction::Delete { id } => {
                client::delete_client(state, id)?;
                out.emit(&id, || format!("Client {} supprimé", id))
            }
        },
        Command::Items { action } => match action {
            ItemAction::List => {
                let items = item::list_items(state)?;
                out.emit(&items, || {
                    items
                        .iter()
                        .map(|i| {
                            format!(
                                "{:>4}  {:<10} {}  {}",
                                i.id,
                                i.code,
                                i.description,
                                fmt.format_amount(i.unit_price)
                            )
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                })
            }
            ItemAction::Add(args) => {
                let added = item::add_item(state, args.into())?;
                out.emit(&added, || format!("Article {} ajouté : {}", added.id, added.code))
            }
            ItemAction::Delete { id } => {
                item::delete_item(state, id)?;
                out.emit(&id, || format!("Article {} supprimé", id))
            }
        },
        Command::Kinds | Command::Config { .. } => Err(ApiError::internal(
            "command does not use the record store",
        )),
    }
}

/// Prints a command result as JSON or as text.
#[derive(Debug, Clone, Copy)]
struct Output {
    json: bool,
}

impl Output {
    fn emit<T: Serialize>(&self, value: &T, text: impl FnOnce() -> String) -> ApiResult<()> {
        if self.json {
            let body =
                serde_json::to_string_pretty(value).map_err(|e| ApiError::internal(e.to_string()))?;
            println!("{}", body);
        } else {
            let body = text();
            if !body.is_empty() {
                println!("{}", body);
            }
        }
        Ok(())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::internal(err.to_string())
    }
}
