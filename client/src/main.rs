#![deny(
    clippy::expect_used,
    clippy::panic,
    clippy::todo,
    clippy::unimplemented,
    clippy::unwrap_used
)]
#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::process::ExitCode;

use clap::Parser;
use oracle_of_bacon::{
    render::render_text, Config, OracleClient, Response, DEFAULT_ACTOR,
};
use tracing_subscriber::EnvFilter;

/// Find how two actors are connected through the movies they appeared in.
#[derive(Debug, Parser)]
#[command(name = "oracle-of-bacon", version, about)]
struct Cli {
    /// Actor to start from
    from: String,

    /// Actor to reach
    #[arg(default_value = DEFAULT_ACTOR)]
    to: String,

    /// API key (overrides OOB_ORACLE__API_KEY and config.yaml)
    #[arg(long)]
    api_key: Option<String>,

    /// Path to a YAML configuration file
    #[arg(long, default_value = "config.yaml")]
    config: String,

    /// Print the response as JSON
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(response) => match response {
            Response::Graph(_) | Response::Spellcheck(_) => ExitCode::SUCCESS,
            Response::Error(_) | Response::Unknown(_) => ExitCode::from(1),
        },
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Response> {
    // Load and validate configuration first (fail-fast)
    let mut config = Config::load_from(&cli.config)?;
    apply_overrides(&mut config, &cli);

    // Logs go to stderr so stdout stays machine-readable with --json
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_new(&config.logging.level)?)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(
        version = env!("CARGO_PKG_VERSION"),
        base_url = %config.oracle.base_url,
        "oracle-of-bacon starting up"
    );

    let mut client = OracleClient::from_config(&config)?;
    client.query_mut().set_from(cli.from);
    client.query_mut().set_to(cli.to);

    let response = client.find_connections().await?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&response)?);
    } else {
        println!("{}", render_text(&response));
    }

    Ok(response)
}

/// Command-line values win over every configuration source.
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(api_key) = &cli.api_key {
        config.oracle.api_key.clone_from(api_key);
    }
}
