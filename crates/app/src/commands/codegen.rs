//! Client snippet generation for a request.

use clap::Args;

use courier_domain::codegen::{CodeTarget, RequestMode};
use courier_infrastructure::generate;

use super::shared::RequestArgs;
use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct CodegenArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Snippet target, e.g. curl, js-fetch, python-requests, node-ftp
    #[arg(short = 't', long = "target", value_name = "TARGET", default_value = "curl")]
    pub target: String,

    /// List the targets available for the request
    #[arg(short = 'l', long = "list")]
    pub list: bool,
}

pub async fn execute(ctx: &Context, args: &CodegenArgs) -> CommandResult {
    let state = ctx.load().await;
    let request = args.request.resolve(&state)?;

    if args.list {
        let mode = RequestMode::of(&request);
        println!("Targets for {mode} requests:");
        for target in CodeTarget::for_mode(mode) {
            println!(
                "  {:<16} {} (.{})",
                target.id(),
                target.display_name(),
                target.file_extension()
            );
        }
        return Ok(());
    }

    println!("{}", generate(&request, &args.target));
    Ok(())
}
