//! Command implementations.
//!
//! Each module defines its clap arguments next to the code that runs
//! them. State-touching commands load [`AppState`] once, change it and
//! save only the documents they touched.

pub mod codegen;
pub mod collection;
pub mod env;
pub mod history;
pub mod import;
pub mod query;
pub mod send;
pub mod settings;
pub mod shared;
pub mod table;

use std::sync::Arc;

use courier_application::{AppState, StateStore};
use courier_infrastructure::FileKeyValueStore;

use crate::cli::Commands;
use crate::config::AppConfig;

pub type CommandResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

/// Handles shared by the commands.
pub struct Context {
    pub store: StateStore<FileKeyValueStore>,
}

impl Context {
    pub fn new(config: &AppConfig) -> Self {
        let backend = Arc::new(FileKeyValueStore::new(&config.data_dir));
        Self {
            store: StateStore::new(backend),
        }
    }

    pub async fn load(&self) -> AppState {
        self.store.load().await
    }
}

pub async fn run(command: Commands, config: &AppConfig) -> CommandResult {
    let ctx = Context::new(config);
    match command {
        Commands::Send(args) => send::execute(&ctx, &args).await,
        Commands::Codegen(args) => codegen::execute(&ctx, &args).await,
        Commands::Import(args) => import::execute(&ctx, &args).await,
        Commands::Query(args) => query::execute(&args),
        Commands::Table(args) => table::execute(&ctx, &args).await,
        Commands::History(command) => history::execute(&ctx, command.command).await,
        Commands::Env(command) => env::execute(&ctx, command.command).await,
        Commands::Collection(command) => collection::execute(&ctx, command.command).await,
        Commands::Theme(args) => settings::execute_theme(&ctx, &args).await,
        Commands::Profile(args) => settings::execute_profile(&ctx, &args).await,
    }
}
