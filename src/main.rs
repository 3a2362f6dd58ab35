use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use product_scout::api::create_router;
use product_scout::config::{Config, normalize_base};
use product_scout::pipeline::ListingScraper;

#[derive(Parser)]
#[command(version, about = "Scrape product search listings and serve them as JSON")]
struct Cli {
    /// Shop base URL, e.g. https://www.amazon.de
    #[arg(long, global = true)]
    site_base: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP API and the static client (default)
    Serve {
        #[arg(long)]
        port: Option<u16>,

        #[arg(long)]
        static_dir: Option<PathBuf>,
    },
    /// Run one search and print the JSON result
    Scrape {
        keyword: String,

        #[arg(long)]
        pretty: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Also picks up `log` records from this crate and its dependencies
    tracing_subscriber::fmt()
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .with_target(true)
        .init();

    let mut config = Config::from_env().context("reading configuration")?;
    if let Some(base) = &cli.site_base {
        config.site_base = normalize_base(base);
    }

    match cli.command.unwrap_or(Command::Serve {
        port: None,
        static_dir: None,
    }) {
        Command::Serve { port, static_dir } => {
            if let Some(port) = port {
                config.port = port;
            }
            if let Some(dir) = static_dir {
                config.static_dir = dir;
            }
            serve(config).await
        }
        Command::Scrape { keyword, pretty } => scrape_once(config, &keyword, pretty).await,
    }
}

async fn serve(config: Config) -> anyhow::Result<()> {
    let scraper = Arc::new(ListingScraper::new(&config)?);
    let app = create_router(scraper, &config.static_dir);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .with_context(|| format!("binding port {}", config.port))?;
    let addr = listener.local_addr()?;
    tracing::info!(
        "listening on {addr}, try http://localhost:{}/api/scrape?keyword=mouse",
        addr.port()
    );
    tracing::info!("scraping {}", config.site_base);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn scrape_once(config: Config, keyword: &str, pretty: bool) -> anyhow::Result<()> {
    let scraper = ListingScraper::new(&config)?;
    let result = scraper.search(keyword).await?;
    let json = if pretty {
        serde_json::to_string_pretty(&result)?
    } else {
        serde_json::to_string(&result)?
    };
    println!("{json}");
    Ok(())
}
