//! Theme and user profile preferences.

use clap::Args;

use courier_application::Document;
use courier_domain::settings::ThemeMode;

use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct ThemeArgs {
    /// light, dark or system; prints the current theme when omitted
    #[arg(value_name = "MODE", value_parser = parse_theme)]
    pub mode: Option<ThemeMode>,
}

#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Display name
    #[arg(long = "name", value_name = "NAME")]
    pub name: Option<String>,

    /// Contact email
    #[arg(long = "email", value_name = "EMAIL")]
    pub email: Option<String>,
}

pub async fn execute_theme(ctx: &Context, args: &ThemeArgs) -> CommandResult {
    let mut state = ctx.load().await;
    if let Some(mode) = args.mode {
        state.theme = mode;
        ctx.store.save(Document::Theme, &state).await?;
    }
    println!("{}", state.theme);
    Ok(())
}

pub async fn execute_profile(ctx: &Context, args: &ProfileArgs) -> CommandResult {
    let mut state = ctx.load().await;
    if args.name.is_some() || args.email.is_some() {
        if let Some(name) = &args.name {
            state.user.name.clone_from(name);
        }
        if let Some(email) = &args.email {
            state.user.email.clone_from(email);
        }
        ctx.store.save(Document::User, &state).await?;
    }
    println!("{}", state.user.name);
    if !state.user.email.is_empty() {
        println!("{}", state.user.email);
    }
    Ok(())
}

fn parse_theme(value: &str) -> Result<ThemeMode, String> {
    value.parse().map_err(|e| format!("{e}"))
}
