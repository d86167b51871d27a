use blockclock_config::Environment;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod command;
mod executor;
mod scenario;
include!(concat!(env!("OUT_DIR"), "/version.rs"));

use crate::command::Command;

#[derive(Parser, Debug)]
#[command(term_width = 0)]
#[command(name = "blockclock-sim")]
#[command(version = APP_VERSION, long_version = APP_LONG_VERSION)]
#[command(about = "Replays end-of-block scheduler scenarios", long_about = None)]
struct App {
    #[command(subcommand)]
    command: Command,
    /// Environment whose authority and default budget apply (mainnet-beta, testnet, devnet or local)
    #[arg(long, value_name = "ENV", global = true)]
    env: Option<String>,
}

fn main() -> eyre::Result<()> {
    let app = App::parse();

    // stdout carries command output only
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let env = match app.env {
        Some(env) => env.parse::<Environment>()?,
        None => Environment::Local,
    };
    let config = env.config()?;

    tracing::debug!(%env, authority = %config.authority, "Loaded scheduler config");

    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    match app.command {
        Command::Run(args) => args.execute(&config, &mut handle),
        Command::Validate(args) => args.execute(&config, &mut handle),
    }
}
