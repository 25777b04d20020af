// ABOUTME: CLI for looking up Overwatch player stats with ovrstat-career.
// ABOUTME: Prints the player profile as JSON, or a JSON error envelope with a per-kind exit status.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use ovrstat_career::{parse_profile, Client, ErrorCode, PlayerProfile, StatsError};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use url::Url;

#[derive(Parser, Debug)]
#[command(name = "ovrstat")]
#[command(about = "Look up Overwatch player stats and print them as JSON")]
struct Args {
    /// Battle tag, e.g. Someone#1234
    tag: String,

    /// Platform: pc, console, xbl, psn, nintendo-switch
    #[arg(short = 'p', long = "platform", default_value = "pc")]
    platform: String,

    /// Parse a saved profile page instead of fetching (skips the account search)
    #[arg(long = "html")]
    html: Option<PathBuf>,

    /// Selector profile JSON replacing the builtin one
    #[arg(long = "selectors")]
    selectors: Option<PathBuf>,

    /// Profile page base URL
    #[arg(long = "base-url")]
    base_url: Option<Url>,

    /// Account search endpoint
    #[arg(long = "search-url")]
    search_url: Option<Url>,

    /// Request timeout in seconds
    #[arg(long = "timeout", default_value_t = 30)]
    timeout: u64,

    /// User-Agent header
    #[arg(long = "user-agent")]
    user_agent: Option<String>,

    /// Output compact JSON instead of pretty
    #[arg(long = "compact")]
    compact: bool,

    /// Log pipeline progress to stderr
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

/// Status code and process exit status per error kind.
fn status_for(code: ErrorCode) -> (u16, u8) {
    match code {
        ErrorCode::PlayerNotFound => (404, 4),
        ErrorCode::InvalidPlatform => (400, 3),
        ErrorCode::UpstreamUnavailable => (502, 5),
        ErrorCode::MalformedDocument => (500, 6),
    }
}

fn code_name(code: ErrorCode) -> &'static str {
    match code {
        ErrorCode::PlayerNotFound => "playerNotFound",
        ErrorCode::InvalidPlatform => "invalidPlatform",
        ErrorCode::UpstreamUnavailable => "upstreamUnavailable",
        ErrorCode::MalformedDocument => "malformedDocument",
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn build_client(args: &Args) -> Result<Client> {
    let mut builder = Client::builder().timeout(Duration::from_secs(args.timeout));
    if let Some(url) = &args.base_url {
        builder = builder.base_url(url.clone());
    }
    if let Some(url) = &args.search_url {
        builder = builder.search_url(url.clone());
    }
    if let Some(agent) = &args.user_agent {
        builder = builder.user_agent(agent.clone());
    }
    if let Some(path) = &args.selectors {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed to read selector profile {}", path.display()))?;
        let profile = parse_profile(&json)
            .with_context(|| format!("invalid selector profile {}", path.display()))?;
        builder = builder.selectors(profile);
    }
    Ok(builder.build())
}

async fn run(args: &Args, client: &Client) -> Result<Result<PlayerProfile, StatsError>> {
    debug!(
        tag = %args.tag,
        platform = %args.platform,
        offline = args.html.is_some(),
        selectors = %client.selectors().version,
        "looking up player"
    );
    match &args.html {
        Some(path) => {
            let html = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(client.stats_from_html(&html, &args.platform, &args.tag))
        }
        None => Ok(client.stats(&args.platform, &args.tag).await),
    }
}

fn print_json(value: &impl serde::Serialize, compact: bool) -> Result<()> {
    let out = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    println!("{}", out);
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_tracing(args.verbose);

    let outcome = match build_client(&args) {
        Ok(client) => run(&args, &client).await,
        Err(err) => Err(err),
    };

    let printed = match outcome {
        Ok(Ok(profile)) => print_json(&profile, args.compact).map(|_| ExitCode::SUCCESS),
        Ok(Err(err)) => {
            let (status, exit) = status_for(err.code);
            let envelope = json!({
                "error": {
                    "code": code_name(err.code),
                    "status": status,
                    "tag": err.tag,
                    "message": err.to_string(),
                }
            });
            print_json(&envelope, args.compact).map(|_| ExitCode::from(exit))
        }
        Err(err) => {
            eprintln!("Error: {:#}", err);
            Ok(ExitCode::FAILURE)
        }
    };

    printed.unwrap_or_else(|err| {
        eprintln!("Error: {:#}", err);
        ExitCode::FAILURE
    })
}
