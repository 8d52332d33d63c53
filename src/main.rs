//! CLI entry point for reqwrap.

use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::Parser;
use reqwrap::{RequestOptions, download_file, request};
use tracing::debug;

mod cli;

use cli::{Args, Command, DownloadArgs, RequestArgs};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments first (before tracing, so --help works without logs)
    let args = Args::parse();

    // Priority: RUST_LOG env var > quiet flag > verbose flag > default (info)
    let default_level = if args.quiet {
        "error"
    } else {
        match args.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    debug!(?args, "CLI arguments parsed");

    match args.command {
        Command::Request(request_args) => run_request(request_args).await,
        Command::Download(download_args) => run_download(download_args).await,
    }
}

async fn run_request(args: RequestArgs) -> Result<()> {
    let mut options = RequestOptions::new()
        .timeout(Duration::from_secs(args.timeout_secs))
        .headers(args.headers)
        .params(args.params);
    if let Some(body) = &args.json {
        options = options.json(body);
    }
    if let (Some(user), Some(password)) = (args.user, args.password) {
        options = options.basic_auth(user, password);
    }

    let response = request(&args.method, &args.url, &options).await;
    if let Some(err) = response.err() {
        bail!("request failed: {err}");
    }

    println!("{}", response.code());
    println!("{}", response.text());
    Ok(())
}

async fn run_download(args: DownloadArgs) -> Result<()> {
    let path = download_file(
        &args.url,
        &args.dir,
        Duration::from_secs(args.timeout_secs),
    )
    .await
    .with_context(|| format!("downloading {}", args.url))?;

    println!("{}", path.display());
    Ok(())
}
