use crate::{env::EnvManager, error::CliError};
use clap::Parser;
use commands::Commands;
use filter_compiler::{
    Compilation, CompilerSettings, FilterCompiler, PredicateCompiler, SearchPayload,
};
use model::records::user::User;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod commands;
mod env;
mod error;
mod output;

#[derive(Parser)]
#[command(
    name = "user-filter",
    version = "0.1.0",
    about = "Compile JSON search payloads into user filters"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            payload,
            users,
            max_depth,
            env_file,
            json,
            output,
        } => {
            let settings = load_settings(max_depth, env_file.as_deref())?;
            let compilation = compile_file(&payload, settings)?;
            for dropped in &compilation.dropped {
                warn!("Ignored part of the search payload: {}", dropped);
            }

            let source = std::fs::read_to_string(&users)?;
            let users: Vec<User> = serde_json::from_str(&source)?;
            let matched = compilation.predicate.filter(&users);
            info!("{} of {} users matched", matched.len(), users.len());

            let rendered = if json {
                output::users_json(&matched)?
            } else {
                output::users_table(&matched)
            };

            match output {
                Some(path) => std::fs::write(path, rendered)?,
                None => println!("{rendered}"),
            }
        }
        Commands::Explain {
            payload,
            max_depth,
            env_file,
            json,
        } => {
            let settings = load_settings(max_depth, env_file.as_deref())?;
            let compilation = compile_file(&payload, settings)?;
            if json {
                println!("{}", output::explain_json(&compilation)?);
            } else {
                println!("{}", output::explain_text(&compilation));
            }
        }
        Commands::Fields { json } => {
            if json {
                println!("{}", output::fields_json()?);
            } else {
                println!("{}", output::fields_table());
            }
        }
    }

    Ok(())
}

/// Flags override the environment (and an optional .env file), which
/// overrides the defaults.
fn load_settings(
    max_depth: Option<usize>,
    env_file: Option<&str>,
) -> Result<CompilerSettings, CliError> {
    let mut env = EnvManager::from_process();
    if let Some(path) = env_file {
        env.load_from_file(path)?;
    }

    let settings = CompilerSettings::from_env_with(|key| env.get(key))?;
    Ok(match max_depth {
        Some(depth) => settings.with_max_depth(depth),
        None => settings,
    })
}

fn compile_file(path: &str, settings: CompilerSettings) -> Result<Compilation<User>, CliError> {
    let source = std::fs::read_to_string(path)?;
    let payload = SearchPayload::from_json(&source)?;
    info!("Compiling search payload from {} ({:?})", path, settings);
    Ok(PredicateCompiler::<User>::for_record(settings).compile(&payload))
}
