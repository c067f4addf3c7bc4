use anyhow::Context;
use clap::Parser;
use tracing::{error, info};

use reqwest_xauth::{tag_counts, BookmarkClient, Config, Session, TokenExchangeClient};

/// Sign in with xAuth and list bookmarks, or print one bookmark's text.
#[derive(Debug, Parser)]
#[command(name = "xauth-bookmarks", version, about)]
struct Cli {
    #[command(flatten)]
    config: Config,

    /// Number of bookmarks to list.
    #[arg(long, default_value = "50")]
    limit: i64,

    /// Print the HTML text of this bookmark instead of listing.
    #[arg(long, value_name = "BOOKMARK_ID")]
    text: Option<i64>,

    /// Log filter directives (e.g. "info", "reqwest_xauth=debug").
    #[arg(long, env = "RUST_LOG", default_value = "warn")]
    log_level: String,

    /// Log format: text or json.
    #[arg(long, default_value = "text")]
    log_format: String,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli);

    if let Err(e) = run(cli) {
        error!("fatal: {e:#}");
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn init_tracing(cli: &Cli) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    match cli.log_format.as_str() {
        "json" => {
            fmt::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .json()
                .init();
        }
        _ => {
            fmt::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let config = &cli.config;
    let transport = reqwest::blocking::Client::builder()
        .build()
        .context("failed to build HTTP client")?;

    let credentials = config.credentials();
    info!(url = %config.access_token_url(), "signing in");
    let token = TokenExchangeClient::new(&transport, config.access_token_url())
        .timeout(config.timeout())
        .exchange_credentials_for_token(&credentials)
        .context("failed to get access token")?;
    let session = Session::new(transport, &credentials, token).timeout(config.timeout());
    let client = BookmarkClient::new(session, config.api_root());

    if let Some(bookmark_id) = cli.text {
        let html = client
            .get_bookmark_text(bookmark_id)
            .with_context(|| format!("failed to get text of bookmark {bookmark_id}"))?;
        println!("{html}");
        return Ok(());
    }

    let bookmarks = client
        .list_bookmarks(cli.limit)
        .context("failed to get bookmarks")?;
    for bookmark in &bookmarks {
        let tags = bookmark
            .tags
            .iter()
            .map(|tag| tag.name.as_str())
            .collect::<Vec<_>>()
            .join(",");
        println!(
            "{}\t{}\t{} | {:.0}%",
            bookmark.bookmark_id,
            bookmark.title,
            tags,
            bookmark.progress * 100.0
        );
    }

    let counts = tag_counts(&bookmarks);
    if !counts.is_empty() {
        println!();
        for (name, count) in counts {
            println!("({count}) {name}");
        }
    }
    Ok(())
}
