//! Request history: listing, inspection and resending.

use clap::{Args, Subcommand};

use courier_application::{ApplicationError, Document};

use super::shared::{OutputArgs, OutputFormat};
use super::{CommandResult, Context, send};
use crate::output::history_lines;

#[derive(Debug, Args)]
pub struct HistoryCommand {
    #[command(subcommand)]
    pub command: HistorySubcommand,
}

#[derive(Debug, Subcommand)]
pub enum HistorySubcommand {
    /// List recent requests, newest first
    List(ListArgs),
    /// Show the stored request of one entry
    Show(EntryArgs),
    /// Send the request of one entry again
    Resend(EntryArgs),
    /// Remove one entry
    Remove(EntryArgs),
    /// Remove every entry
    Clear,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    /// Show at most this many entries
    #[arg(short = 'n', long = "limit", value_name = "N")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct EntryArgs {
    /// History entry id
    #[arg(value_name = "ID")]
    pub id: String,
}

pub async fn execute(ctx: &Context, command: HistorySubcommand) -> CommandResult {
    let mut state = ctx.load().await;

    match command {
        HistorySubcommand::List(args) => {
            let limit = args.limit.unwrap_or(usize::MAX);
            let entries: Vec<_> = state.history.entries().iter().take(limit).collect();
            match args.output.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
                OutputFormat::Text if entries.is_empty() => println!("No history yet"),
                OutputFormat::Text => print!("{}", history_lines(&entries)),
            }
        }
        HistorySubcommand::Show(args) => {
            let item = state.history.get(&args.id).ok_or_else(|| not_found(&args.id))?;
            println!("{}", serde_json::to_string_pretty(&item.request)?);
        }
        HistorySubcommand::Resend(args) => {
            let request = state
                .history
                .get(&args.id)
                .ok_or_else(|| not_found(&args.id))?
                .request
                .clone();
            send::dispatch(ctx, &mut state, &request, None, None, false, OutputFormat::Text).await?;
        }
        HistorySubcommand::Remove(args) => {
            state.history.remove(&args.id).ok_or_else(|| not_found(&args.id))?;
            ctx.store.save(Document::History, &state).await?;
            println!("Removed {}", args.id);
        }
        HistorySubcommand::Clear => {
            ctx.store.reset(Document::History).await?;
            println!("History cleared");
        }
    }

    Ok(())
}

fn not_found(id: &str) -> ApplicationError {
    ApplicationError::NotFound(format!("history entry '{id}'"))
}
