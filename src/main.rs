//! Hopcrawl command-line interface

use anyhow::Context;
use clap::Parser;
use hopcrawl::config::{DEFAULT_LINK_LIMIT, DEFAULT_MAX_DEPTH, DEFAULT_MAX_FRONTIER};
use hopcrawl::{CrawlConfig, Crawler, LogSink};
use tracing_subscriber::EnvFilter;

/// Hopcrawl: a bounded-depth polite web crawler
///
/// Crawls outbound links breadth-first from a start URL up to a configured
/// depth, honoring robots.txt and skipping excluded domains.
#[derive(Parser, Debug)]
#[command(name = "hopcrawl")]
#[command(version)]
#[command(about = "A bounded-depth, robots.txt-respecting web crawler", long_about = None)]
struct Cli {
    /// Starting URL to crawl
    url: String,

    /// Depth of crawling (the start URL is depth 1)
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    depth: u32,

    /// Limit of links considered per page
    #[arg(long, default_value_t = DEFAULT_LINK_LIMIT)]
    limit: usize,

    /// Domain substrings to exclude from crawling (repeatable)
    #[arg(long = "exclude", value_name = "DOMAIN")]
    exclude: Vec<String>,

    /// User-agent sent with every request
    #[arg(long, value_name = "AGENT")]
    user_agent: Option<String>,

    /// Number of concurrent page fetches
    #[arg(long, default_value_t = 1)]
    concurrency: usize,

    /// Abort if the frontier grows past this many queued URLs
    #[arg(long, default_value_t = DEFAULT_MAX_FRONTIER)]
    max_frontier: usize,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    if !cli.quiet {
        print_banner();
    }

    let mut config = CrawlConfig::new(&cli.url)
        .context("refusing to start crawl")?
        .with_max_depth(cli.depth)?
        .with_link_limit(cli.limit)
        .with_excluded_domains(cli.exclude)
        .with_max_concurrency(cli.concurrency)?
        .with_max_frontier(cli.max_frontier)?;

    if let Some(agent) = &cli.user_agent {
        config = config.with_user_agent(agent)?;
    }

    let crawler = Crawler::new(config)?;

    // Ctrl-C stops dequeuing and lets in-flight fetches drain.
    let handle = crawler.handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing in-flight fetches");
            handle.stop();
        }
    });

    let mut sink = LogSink;
    let summary = crawler.run(&mut sink).await?;

    tracing::info!(
        "Done: {} pages crawled, {} failed, {} denied by robots.txt, {} links found",
        summary.pages_crawled,
        summary.pages_failed,
        summary.robots_denied,
        summary.links_discovered
    );

    Ok(())
}

/// Sets up the tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("hopcrawl=info,warn"),
            1 => EnvFilter::new("hopcrawl=debug,info"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn print_banner() {
    let art = r"
    H  H  OOO  PPPP
    H  H O   O P   P
    HHHH O   O PPPP
    H  H O   O P
    H  H  OOO  P
    ";
    println!("{art}");
}
