//! Command line definition.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::commands::{collection, codegen, env, history, import, query, send, settings, table};

#[derive(Debug, Parser)]
#[command(name = "courier")]
#[command(about = "A local-first API client for HTTP, SOAP, FTP and database requests")]
#[command(version)]
pub struct Cli {
    /// Directory holding saved state
    #[arg(long = "data-dir", env = "COURIER_DATA_DIR", global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Send a request and print the response
    Send(send::SendArgs),
    /// Generate a code snippet for a request
    Codegen(codegen::CodegenArgs),
    /// Import a curl command, SOAP envelope or body text
    Import(import::ImportArgs),
    /// Filter and reshape a JSON document
    Query(query::QueryArgs),
    /// Show a JSON array as a table
    Table(table::TableArgs),
    /// Inspect and replay request history
    History(history::HistoryCommand),
    /// Manage environments
    Env(env::EnvCommand),
    /// Manage saved request collections
    Collection(collection::CollectionCommand),
    /// Show or set the color theme
    Theme(settings::ThemeArgs),
    /// Show or update the local user profile
    Profile(settings::ProfileArgs),
}
