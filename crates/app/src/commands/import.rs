//! Importing curl commands, SOAP envelopes and raw bodies.

use clap::Args;

use courier_application::{Document, use_cases::SaveToCollection};
use courier_infrastructure::import_text;

use super::shared::InputArgs;
use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct ImportArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Text to import instead of reading a file
    #[arg(long = "text", value_name = "TEXT", conflicts_with = "input")]
    pub text: Option<String>,

    /// Also save the result into this collection
    #[arg(short = 'c', long = "collection", value_name = "COLLECTION")]
    pub collection: Option<String>,

    /// Name for the imported request
    #[arg(short = 'n', long = "name", value_name = "NAME")]
    pub name: Option<String>,
}

/// Merges the imported draft into the current request and saves it, so
/// the next `send` without a URL uses it.
pub async fn execute(ctx: &Context, args: &ImportArgs) -> CommandResult {
    let text = match &args.text {
        Some(text) => text.clone(),
        None => args.input.read_text()?,
    };
    let imported = import_text(&text)?;

    let mut state = ctx.load().await;
    imported.draft.apply_to(&mut state.config);
    if let Some(name) = &args.name {
        state.config.name.clone_from(name);
    }
    ctx.store.save(Document::Config, &state).await?;

    println!(
        "Imported {} as {} {}",
        imported.format, state.config.method, state.config.url
    );

    if let Some(collection) = &args.collection {
        let request = state.config.clone();
        SaveToCollection::new(ctx.store.clone())
            .execute(&mut state, collection, request)
            .await?;
        println!("Saved to collection '{collection}'");
    }

    Ok(())
}
