use clap::{Parser, Subcommand};
use eyre::{Context, eyre};
use jiff::Timestamp;
use std::io::IsTerminal;
use std::path::PathBuf;
use tokio::sync::watch;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_catalog::controllers::ChannelPage;
use youtube_catalog::{Catalog, Category, ChannelSummary, Config, Item, ViewState, YouTubeClient, format};

/// Browse the YouTube catalog from the terminal.
#[derive(Debug, Parser)]
#[command(version)]
struct Args {
    /// Path to a TOML config file. Defaults to `youtube-catalog.toml` if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Most popular videos, optionally within one category.
    Feed {
        /// Category id; `0` (the default) means all categories.
        #[arg(long, default_value = Category::ALL_ID)]
        category: Category,
    },
    /// Search for videos.
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },
    /// A channel's metadata and recent uploads.
    Channel { id: String },
    /// A single video with its channel and top comments.
    Video { id: String },
}

const DEFAULT_CONFIG_PATH: &str = "youtube-catalog.toml";

#[tokio::main]
async fn main() -> eyre::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    let args = Args::parse();
    let config_path = args
        .config
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));
    let config = Config::load(Some(config_path.as_path()))
        .with_context(|| format!("load config from {}", config_path.display()))?;

    let http = reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build HTTP client")?;
    let client = YouTubeClient::new(&config, http);
    tracing::debug!(base_url = client.base_url(), "using YouTube API");

    let catalog = Catalog::start(client, &config);
    let now = Timestamp::now();

    match args.command {
        Command::Feed { category } => {
            let mut feed = catalog.feed().subscribe();
            println!("== {category} ==");
            catalog.select_category(category);
            let state = settled(&mut feed).await?;
            print_items(&ready_or_error(state)?, now);
        }
        Command::Search { query } => {
            let query = query.join(" ");
            let mut results = catalog.search_results().subscribe();
            println!("== results for {query:?} ==");
            catalog.search(query);
            let state = settled(&mut results).await?;
            print_items(&ready_or_error(state)?, now);
        }
        Command::Channel { id } => {
            let mut page = catalog.channel().subscribe();
            catalog.open_channel(id);
            let state = settled(&mut page).await?;
            print_channel_page(&ready_or_error(state)?, now);
        }
        Command::Video { id } => {
            let mut item = catalog.video().subscribe_item();
            let mut channel = catalog.video().subscribe_channel();
            let mut comments = catalog.video().subscribe_comments();
            catalog.open_video(id);

            let item = ready_or_error(settled(&mut item).await?)?;
            print_video(&item, now);

            // a missing channel is not fatal to the page
            let channel = channel.wait_for(|state| !state.is_loading()).await?.clone();
            match channel {
                ViewState::Ready(summary) => print_channel(&summary, now),
                ViewState::Error(e) => println!("channel unavailable: {e}"),
                ViewState::Idle | ViewState::Loading => {}
            }

            println!();
            match settled(&mut comments).await? {
                ViewState::Ready(threads) if threads.is_empty() => println!("no comments"),
                ViewState::Ready(threads) => {
                    println!("top comments:");
                    for thread in threads {
                        let when = thread
                            .published_at
                            .map(|at| format::published(at, now))
                            .unwrap_or_default();
                        println!("  {} ({when}, {} likes)", thread.author_name, format::count(thread.like_count));
                        println!("    {}", thread.text);
                    }
                }
                ViewState::Error(e) => println!("comments unavailable: {e}"),
                ViewState::Idle | ViewState::Loading => {}
            }
        }
    }

    catalog.shutdown().await;
    Ok(())
}

/// Waits until the slot leaves `Idle`/`Loading` and returns the settled state.
async fn settled<T: Clone>(rx: &mut watch::Receiver<ViewState<T>>) -> eyre::Result<ViewState<T>> {
    let state = rx
        .wait_for(ViewState::is_settled)
        .await
        .context("controller went away")?;
    Ok(state.clone())
}

fn ready_or_error<T>(state: ViewState<T>) -> eyre::Result<T> {
    match state {
        ViewState::Ready(data) => Ok(data),
        ViewState::Error(e) => Err(eyre!(e)),
        ViewState::Idle | ViewState::Loading => Err(eyre!("view did not settle")),
    }
}

fn print_items(items: &[Item], now: Timestamp) {
    if items.is_empty() {
        println!("no videos");
        return;
    }
    for (rank, item) in items.iter().enumerate() {
        let duration = item
            .duration_raw
            .as_deref()
            .and_then(format::duration)
            .unwrap_or_default();
        let published = item
            .published_at
            .map(|at| format::published(at, now))
            .unwrap_or_default();
        println!("{:>3}. {} [{}] {duration}", rank + 1, item.title, item.id);
        println!(
            "     {} · {} views · {published}",
            item.channel_title,
            format::optional_count(item.view_count)
        );
    }
}

fn print_video(item: &Item, now: Timestamp) {
    println!("{} [{}]", item.title, item.id);
    let published = item
        .published_at
        .map(|at| format::published(at, now))
        .unwrap_or_default();
    println!(
        "{} views · {} likes · {} comments · {published}",
        format::optional_count(item.view_count),
        format::optional_count(item.like_count),
        format::optional_count(item.comment_count),
    );
    if let Some(url) = &item.thumbnail_url {
        println!("thumbnail: {url}");
    }
    if !item.description.is_empty() {
        println!();
        println!("{}", item.description);
    }
    println!();
}

fn print_channel(channel: &ChannelSummary, now: Timestamp) {
    println!("{} [{}]", channel.title, channel.id);
    let since = channel
        .published_at
        .map(|at| format!(" · joined {}", format::published(at, now)))
        .unwrap_or_default();
    println!(
        "{} subscribers · {} videos · {} views{since}",
        format::optional_count(channel.subscriber_count),
        format::optional_count(channel.video_count),
        format::optional_count(channel.view_count),
    );
}

fn print_channel_page(page: &ChannelPage, now: Timestamp) {
    match &page.channel {
        Ok(channel) => {
            print_channel(channel, now);
            if let Some(banner) = &channel.banner_url {
                println!("banner: {banner}");
            }
        }
        Err(e) => println!("channel details unavailable: {e}"),
    }
    match &page.uploads {
        Ok(uploads) => {
            println!();
            println!("== videos ({}) ==", uploads.regular.len());
            print_items(&uploads.regular, now);
            println!();
            println!("== shorts ({}) ==", uploads.shorts.len());
            print_items(&uploads.shorts, now);
        }
        Err(e) => println!("uploads unavailable: {e}"),
    }
}
