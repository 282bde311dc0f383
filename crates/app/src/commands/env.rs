//! Environments and their variables.

use clap::{Args, Subcommand};

use courier_application::{
    ApplicationError, Document,
    use_cases::{DeleteEnvironment, SetVariable, SwitchEnvironment},
};

use super::shared::{OutputArgs, OutputFormat};
use super::{CommandResult, Context};

#[derive(Debug, Args)]
pub struct EnvCommand {
    #[command(subcommand)]
    pub command: EnvSubcommand,
}

#[derive(Debug, Subcommand)]
pub enum EnvSubcommand {
    /// List environments
    List,
    /// Show the variables of an environment
    Show(ShowArgs),
    /// Make an environment active; without a name, deactivate
    Use(UseArgs),
    /// Set a variable, creating the environment if needed
    Set(SetArgs),
    /// Remove a variable
    Unset(UnsetArgs),
    /// Delete an environment
    Delete(NameArgs),
}

#[derive(Debug, Args)]
pub struct NameArgs {
    /// Environment name or id
    #[arg(value_name = "ENV")]
    pub name: String,
}

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Environment name or id
    #[arg(value_name = "ENV")]
    pub name: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Debug, Args)]
pub struct UseArgs {
    /// Environment name or id
    #[arg(value_name = "ENV")]
    pub name: Option<String>,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    /// Environment name or id
    #[arg(value_name = "ENV")]
    pub name: String,
    /// Variable name
    #[arg(value_name = "KEY")]
    pub key: String,
    /// Variable value
    #[arg(value_name = "VALUE")]
    pub value: String,
}

#[derive(Debug, Args)]
pub struct UnsetArgs {
    /// Environment name or id
    #[arg(value_name = "ENV")]
    pub name: String,
    /// Variable name
    #[arg(value_name = "KEY")]
    pub key: String,
}

pub async fn execute(ctx: &Context, command: EnvSubcommand) -> CommandResult {
    let mut state = ctx.load().await;

    match command {
        EnvSubcommand::List => {
            if state.environments.is_empty() {
                println!("No environments");
            }
            let active = state.active_environment;
            for env in &state.environments {
                let marker = if Some(env.id) == active { "*" } else { " " };
                println!("{marker} {} ({} variables)", env.name, env.variable_count());
            }
        }
        EnvSubcommand::Show(args) => {
            let env = state.environment(&args.name).ok_or_else(|| not_found(&args.name))?;
            match args.output.output {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(env)?),
                OutputFormat::Text => {
                    for variable in &env.variables {
                        let disabled = if variable.enabled { "" } else { "  (disabled)" };
                        println!("{}={}{disabled}", variable.key, variable.value);
                    }
                }
            }
        }
        EnvSubcommand::Use(args) => {
            SwitchEnvironment::new(ctx.store.clone())
                .execute(&mut state, args.name.as_deref())
                .await?;
            match args.name {
                Some(name) => println!("Using environment '{name}'"),
                None => println!("No active environment"),
            }
        }
        EnvSubcommand::Set(args) => {
            SetVariable::new(ctx.store.clone())
                .execute(&mut state, &args.name, &args.key, &args.value)
                .await?;
            println!("Set {} in '{}'", args.key, args.name);
        }
        EnvSubcommand::Unset(args) => {
            let env = state
                .environment_mut(&args.name)
                .ok_or_else(|| not_found(&args.name))?;
            if !env.remove(&args.key) {
                return Err(
                    ApplicationError::NotFound(format!("variable '{}'", args.key)).into(),
                );
            }
            ctx.store.save(Document::Environments, &state).await?;
            println!("Removed {} from '{}'", args.key, args.name);
        }
        EnvSubcommand::Delete(args) => {
            DeleteEnvironment::new(ctx.store.clone())
                .execute(&mut state, &args.name)
                .await?;
            println!("Deleted environment '{}'", args.name);
        }
    }

    Ok(())
}

fn not_found(name: &str) -> ApplicationError {
    ApplicationError::NotFound(format!("environment '{name}'"))
}
