use clap::Parser;
use dotenv::dotenv;
use std::error::Error;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use github_profile_lookup_lib::{
    Args, GitHubFetcher, HtmlSurface, ProfileSource, SearchOutcome, Surface, TerminalSurface,
    ViewController,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error + Send + Sync>> {
    // Pick up RUST_LOG from .env before the subscriber reads it
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let html = args.html.as_deref().map(HtmlSurface::new);
    if let Some(surface) = &html {
        info!("Writing pages to '{}'", surface.path());
    }
    let surface = (TerminalSurface::stdout(!args.quiet_spinner), html);
    let controller = ViewController::new(GitHubFetcher::new()?, surface);

    let result = match args.username.as_deref() {
        Some(username) => run_once(&controller, username).await,
        None => run_interactive(&controller).await,
    };

    controller.shutdown();
    result
}

async fn run_once<F, S>(
    controller: &ViewController<F, S>,
    username: &str,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    F: ProfileSource,
    S: Surface,
{
    match controller.search(username).await? {
        SearchOutcome::Failed(e) => Err(e.into()),
        outcome => {
            debug!("Search finished: {:?}", outcome);
            Ok(())
        }
    }
}

/// Read one query per line until EOF. Failed lookups are shown and the
/// loop carries on.
async fn run_interactive<F, S>(
    controller: &ViewController<F, S>,
) -> Result<(), Box<dyn Error + Send + Sync>>
where
    F: ProfileSource,
    S: Surface,
{
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("username> ");
        std::io::stdout().flush()?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let outcome = controller.search(&line).await?;
        debug!("Search finished: {:?}", outcome);
    }

    println!();
    Ok(())
}
