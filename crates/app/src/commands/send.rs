//! Sending a request through the execution driver.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;

use courier_application::{
    AppState, ApplicationError, RequestExecutor, use_cases::SendRequest,
    variable_resolver::VariableResolver,
};
use courier_domain::{request::RequestSpec, table::ServerQuery};
use courier_infrastructure::{ProtocolRouter, TransformEngine};

use super::shared::{OutputArgs, OutputFormat, RequestArgs};
use super::{CommandResult, Context};
use crate::output;

#[derive(Debug, Args)]
pub struct SendArgs {
    #[command(flatten)]
    pub request: RequestArgs,

    /// Transform script applied to JSON responses
    #[arg(short = 't', long = "transform", value_name = "SCRIPT", conflicts_with = "transform_file")]
    pub transform: Option<String>,

    /// Read the transform script from a file
    #[arg(long = "transform-file", value_name = "FILE")]
    pub transform_file: Option<PathBuf>,

    /// Environment to interpolate with instead of the active one
    #[arg(short = 'e', long = "env", value_name = "NAME")]
    pub environment: Option<String>,

    /// Print response headers
    #[arg(short = 'i', long = "include")]
    pub include_headers: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

impl SendArgs {
    fn transform_script(&self) -> CommandResult<Option<String>> {
        match (&self.transform, &self.transform_file) {
            (Some(script), _) => Ok(Some(script.clone())),
            (None, Some(path)) => Ok(Some(std::fs::read_to_string(path)?)),
            (None, None) => Ok(None),
        }
    }
}

pub async fn execute(ctx: &Context, args: &SendArgs) -> CommandResult {
    let mut state = ctx.load().await;
    let request = args.request.resolve(&state)?;
    let transform = args.transform_script()?;

    if let Some(name) = &args.environment {
        let env = state
            .environment(name)
            .ok_or_else(|| ApplicationError::NotFound(format!("environment '{name}'")))?;
        state.active_environment = Some(env.id);
    }

    let unresolved = VariableResolver::new(state.active_environment()).unresolved_in(&request);
    if !unresolved.is_empty() {
        eprintln!("warning: unresolved variables: {}", unresolved.join(", "));
    }

    dispatch(
        ctx,
        &mut state,
        &request,
        transform.as_deref(),
        None,
        args.include_headers,
        args.output.output,
    )
    .await
}

/// Sends through the protocol router and prints the outcome. Failed
/// calls are recorded in history before the error is returned.
pub async fn dispatch(
    ctx: &Context,
    state: &mut AppState,
    request: &RequestSpec,
    transform: Option<&str>,
    server_query: Option<&ServerQuery>,
    include_headers: bool,
    format: OutputFormat,
) -> CommandResult {
    let router = ProtocolRouter::with_defaults()?;
    let executor = RequestExecutor::new(Arc::new(router))
        .with_transformer(Arc::new(TransformEngine::new()));
    let use_case = SendRequest::new(executor, ctx.store.clone());

    let outcome = use_case
        .execute_with_query(state, request, transform, server_query)
        .await;

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&outcome)?),
        OutputFormat::Text => output::print_outcome(&outcome, include_headers),
    }

    match outcome.error {
        Some(failure) => Err(failure.message.into()),
        None => Ok(()),
    }
}
