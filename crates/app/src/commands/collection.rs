//! Saved request collections.

use clap::{Args, Subcommand};

use courier_application::{
    ApplicationError,
    use_cases::{DeleteFromCollection, SaveToCollection},
};

use super::shared::{OutputArgs, OutputFormat};
use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct CollectionCommand {
    #[command(subcommand)]
    pub command: CollectionSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum CollectionSubcommand {
    /// List collections
    List,
    /// Show the requests of a collection
    Show(ShowArgs),
    /// Save the last used request into a collection
    Save(SaveArgs),
    /// Delete a request from a collection
    Delete(DeleteArgs),
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Collection name or id
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct SaveArgs {
    /// Collection name; created when missing
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Name to save the request under
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct DeleteArgs {
    /// Collection name or id
    #[arg(value_name = "COLLECTION")]
    pub collection: String,

    /// Request name or id
    #[arg(value_name = "REQUEST")]
    pub request: String,
}

pub async fn execute(ctx: &Context, command: CollectionSubcommand) -> CommandResult {
    let mut state = ctx.load().await;

    match command {
        CollectionSubcommand::List => {
            if state.collections.is_empty() {
                println!("No collections");
            }
            for collection in &state.collections {
                println!("{} ({} requests)", collection.name, collection.len());
            }
        }
        CollectionSubcommand::Show(args) => {
            let collection = state.collection(&args.collection).ok_or_else(|| {
                ApplicationError::NotFound(format!("collection '{}'", args.collection))
            })?;
            match args.output.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(collection)?),
                OutputFormat::Text => {
                    for request in &collection.requests {
                        println!("{:<7} {:<24} {}", request.method, request.name, request.url);
                    }
                }
            }
        }
        CollectionSubcommand::Save(args) => {
            if state.config.url.trim().is_empty() {
                return Err(
                    ApplicationError::Invalid("no request to save; send or import one first".to_string())
                        .into(),
                );
            }
            let mut request = state.config.clone();
            if let Some(name) = args.name {
                request.name = name;
            }
            let name = request.name.clone();
            SaveToCollection::new(ctx.store.clone())
                .execute(&mut state, &args.collection, request)
                .await?;
            println!("Saved '{name}' to '{}'", args.collection);
        }
        CollectionSubcommand::Delete(args) => {
            let removed = DeleteFromCollection::new(ctx.store.clone())
                .execute(&mut state, &args.collection, &args.request)
                .await?;
            println!("Deleted '{}' from '{}'", removed.name, args.collection);
        }
    }

    Ok(())
}
