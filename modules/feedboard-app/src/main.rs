use std::collections::BTreeSet;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use feedboard_app::render::{render_json, render_text};
use feedboard_app::Dashboard;
use feedboard_client::SourceClient;
use feedboard_common::{Config, DateRange, FilterChange, SortKey, TypeFilter};

#[derive(Parser)]
#[command(name = "feedboard", about = "Personalized content dashboard")]
struct Cli {
    /// Log as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the mock content sources
    Serve {
        #[arg(long, env = "FEEDBOARD_HOST")]
        host: Option<String>,
        #[arg(long, env = "FEEDBOARD_PORT")]
        port: Option<u16>,
    },
    /// Load the feed and print the filtered, sorted view
    Feed(FeedArgs),
    /// Query the search endpoint and print the results
    Search {
        query: String,
        #[arg(long = "type", default_value = "all")]
        content_type: TypeFilter,
        #[arg(long)]
        json: bool,
        #[arg(long, env = "FEEDBOARD_API_URL")]
        api_url: Option<String>,
    },
}

#[derive(Args)]
struct FeedArgs {
    /// Free-text search; supports `type:` and `source:` operators
    #[arg(long)]
    query: Option<String>,
    #[arg(long = "type", default_value = "all")]
    content_type: TypeFilter,
    /// Keep only these categories (repeatable)
    #[arg(long = "category")]
    categories: Vec<String>,
    #[arg(long, default_value = "all")]
    date_range: DateRange,
    /// newest, oldest, relevance or popular
    #[arg(long, default_value = "newest")]
    sort: String,
    /// Pages to load per source
    #[arg(long, default_value_t = 1)]
    pages: u32,
    #[arg(long)]
    json: bool,
    #[arg(long, env = "FEEDBOARD_API_URL")]
    api_url: Option<String>,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("feedboard=info,tower_http=info"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = Config::from_env()?;
    init_tracing(cli.log_json || config.log_json);

    match cli.command {
        Command::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            let addr = config.bind_addr();
            let listener = tokio::net::TcpListener::bind(&addr)
                .await
                .with_context(|| format!("Failed to bind {addr}"))?;
            feedboard_sources::serve(listener).await
        }
        Command::Feed(args) => {
            if let Some(api_url) = args.api_url.clone() {
                config.api_url = api_url;
            }
            run_feed(&config, args).await
        }
        Command::Search {
            query,
            content_type,
            json,
            api_url,
        } => {
            if let Some(api_url) = api_url {
                config.api_url = api_url;
            }
            let mut dashboard = Dashboard::new(
                SourceClient::from_config(&config),
                config.categories.clone(),
            );
            dashboard.add_search_history(&query).await?;
            dashboard.search(&query, content_type).await?;
            print_view(&dashboard, json)
        }
    }
}

async fn run_feed(config: &Config, args: FeedArgs) -> Result<()> {
    let mut dashboard =
        Dashboard::new(SourceClient::from_config(config), config.categories.clone());

    dashboard.load_feed().await?;
    for _ in 1..args.pages {
        if !dashboard.state().has_more() {
            break;
        }
        dashboard.load_more().await?;
    }

    dashboard
        .set_filter(FilterChange::ContentType(args.content_type))
        .await?;
    if !args.categories.is_empty() {
        let categories: BTreeSet<String> = args.categories.into_iter().collect();
        dashboard
            .set_filter(FilterChange::Categories(categories))
            .await?;
    }
    dashboard
        .set_filter(FilterChange::DateRange(args.date_range))
        .await?;
    dashboard.set_sort_by(SortKey::from(args.sort)).await?;
    if let Some(query) = args.query {
        dashboard.add_search_history(&query).await?;
        dashboard.set_search_query(&query).await?;
    }

    info!(
        session = dashboard.session_id(),
        events = dashboard.journal().len(),
        items = dashboard.state().items.len(),
        shown = dashboard.state().view.len(),
        "Feed ready"
    );
    print_view(&dashboard, args.json)
}

fn print_view(dashboard: &Dashboard, json: bool) -> Result<()> {
    let state = dashboard.state();
    if let Some(error) = &state.error {
        warn!(error = %error, "Some content failed to load");
    }
    if json {
        println!("{}", render_json(&state.view)?);
    } else {
        print!("{}", render_text(&state.view));
    }
    Ok(())
}
