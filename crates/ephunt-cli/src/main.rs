//! Command-line episode search
//!
//! Thin surface over `ephunt-core`: argument parsing, query
//! construction and result printing. Everything with algorithmic
//! content lives in the core crate.

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};

use ephunt_core::{
    render, EpisodeSearch, NyaaAdapter, Query, RenderStyle, SourceAdapter, ToshoAdapter,
};

#[derive(Parser, Debug)]
#[command(
    name = "ephunt",
    version,
    about = "Search release catalogs for episodes matching declarative criteria"
)]
struct Cli {
    /// Series search text sent to every enabled catalog
    #[arg(required_unless_present = "list_sources")]
    query: Option<String>,

    /// Season filter, e.g. "2" or "1,3-6" (repeatable)
    #[arg(short = 's', long = "season")]
    seasons: Vec<String>,

    /// Episode filter, e.g. "5" or "1-4,12" (repeatable)
    #[arg(short = 'e', long = "episode")]
    episodes: Vec<String>,

    /// Resolution whitelist: 480p, 720p, 1080p; "any" clears earlier picks
    #[arg(short = 'r', long = "resolution")]
    resolutions: Vec<String>,

    /// File-type whitelist, e.g. mkv; "any" clears earlier picks
    #[arg(short = 'x', long = "extension")]
    extensions: Vec<String>,

    /// Release-group whitelist (repeatable)
    #[arg(short = 'g', long = "group")]
    groups: Vec<String>,

    /// Keep only the newest episode per series (or per listed season)
    #[arg(long)]
    latest: bool,

    /// Keep every matching release variant instead of one per episode
    #[arg(long)]
    allow_duplicates: bool,

    /// Output naming style
    #[arg(long, value_enum, default_value_t = StyleArg::Bracketed)]
    style: StyleArg,

    /// Catalogs to search (repeatable)
    #[arg(long = "source", value_enum, default_values_t = [SourceArg::Nyaa, SourceArg::Tosho])]
    sources: Vec<SourceArg>,

    /// Override the nyaa base URL
    #[arg(long, value_name = "URL")]
    nyaa_url: Option<String>,

    /// Restrict the nyaa listing to one category, e.g. 1_2
    #[arg(long, value_name = "CATEGORY")]
    nyaa_category: Option<String>,

    /// Override the tosho base URL
    #[arg(long, value_name = "URL")]
    tosho_url: Option<String>,

    /// Print download links alongside titles
    #[arg(long)]
    links: bool,

    /// List the available catalogs and their options, then exit
    #[arg(long)]
    list_sources: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StyleArg {
    Bracketed,
    Dotted,
}

impl From<StyleArg> for RenderStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Bracketed => RenderStyle::Bracketed,
            StyleArg::Dotted => RenderStyle::Dotted,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum SourceArg {
    Nyaa,
    Tosho,
}

/// Fold the repeatable criterion flags into a validated query.
///
/// Flags are applied in the order given on the command line, so an
/// "any" token clears whatever the earlier flags of that dimension
/// accumulated.
fn build_query(cli: &Cli) -> Result<Query> {
    let mut builder = Query::builder()
        .match_latest(cli.latest)
        .allow_duplicates(cli.allow_duplicates);

    for spec in &cli.seasons {
        builder = builder.seasons(spec)?;
    }
    for spec in &cli.episodes {
        builder = builder.episodes(spec)?;
    }
    for token in &cli.resolutions {
        builder = builder.resolution(token)?;
    }
    for token in &cli.extensions {
        builder = builder.extension(token);
    }
    for name in &cli.groups {
        builder = builder.group(name);
    }

    Ok(builder.build())
}

/// Wire the requested catalog adapters.
fn build_adapters(cli: &Cli) -> Result<Vec<Box<dyn SourceAdapter>>> {
    let mut adapters: Vec<Box<dyn SourceAdapter>> = Vec::new();
    let mut requested = cli.sources.clone();
    requested.dedup();

    for source in requested {
        match source {
            SourceArg::Nyaa => {
                let mut adapter = match &cli.nyaa_url {
                    Some(url) => NyaaAdapter::with_base_url(url.as_str()),
                    None => NyaaAdapter::new(),
                }
                .context("failed to set up the nyaa adapter")?;
                if let Some(category) = &cli.nyaa_category {
                    adapter = adapter.category(category.as_str());
                }
                adapters.push(Box::new(adapter));
            }
            SourceArg::Tosho => {
                let adapter = match &cli.tosho_url {
                    Some(url) => ToshoAdapter::with_base_url(url.as_str()),
                    None => ToshoAdapter::new(),
                }
                .context("failed to set up the tosho adapter")?;
                adapters.push(Box::new(adapter));
            }
        }
    }

    if adapters.is_empty() {
        bail!("no catalogs enabled");
    }
    Ok(adapters)
}

fn print_sources(adapters: &[Box<dyn SourceAdapter>]) {
    for adapter in adapters {
        println!("{}", adapter.name());
        for option in adapter.options() {
            println!("  --{:<16} {:<10} {}", option.flag, option.shape, option.description);
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let adapters = build_adapters(&cli)?;
    if cli.list_sources {
        print_sources(&adapters);
        return Ok(());
    }

    let query = build_query(&cli)?;
    let search_text = cli.query.as_deref().unwrap_or_default();

    let search = EpisodeSearch::with_adapters(adapters);
    tracing::info!(sources = ?search.adapter_names(), "searching");

    let episodes = search.run(search_text, &query).await;

    for episode in &episodes {
        if cli.links {
            println!("{}\t{}", render(episode, cli.style.into()), episode.link);
        } else {
            println!("{}", render(episode, cli.style.into()));
        }
    }

    Ok(())
}
