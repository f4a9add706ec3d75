//! cinescope - terminal browser for TMDB movie and TV lists.

/// Application configuration (TOML).
mod config;
/// Terminal UI components.
mod tui;

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result, bail};
use cinescope_api::image::{ImageSize, poster_url};
use cinescope_api::tmdb::{Credential, LocalTmdbApi, MediaRecord, MediaType, TmdbClient};
use cinescope_catalog::route::DetailRoute;
use cinescope_catalog::{
    Catalog, Category, LoadState, PopularStore, RegionFilter, RegionStore, TvRegionStore,
};
use clap::builder::NonEmptyStringValueParser;
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing::instrument;
use tracing_subscriber::filter::EnvFilter;
#[cfg(not(feature = "otel"))]
use tracing_subscriber::fmt;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
#[cfg(feature = "otel")]
use tracing_subscriber::layer::SubscriberExt;
#[cfg(feature = "otel")]
use tracing_subscriber::util::SubscriberInitExt;

use crate::config::{AppConfig, resolve_config_path};

/// CLI argument parser.
#[derive(Parser)]
#[command(about, version)]
struct Cli {
    /// Override config directory.
    #[arg(long, global = true)]
    dir: Option<PathBuf>,

    /// Write logs to this file instead of stdout.
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// Subcommand to run.
    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Browse popular, regional and TV lists in a terminal UI.
    Browse(BrowseArgs),
    /// List popular movies.
    Popular,
    /// List movies filtered by language and origin region.
    Region(RegionArgs),
    /// List TV shows filtered by origin country.
    Tv,
    /// Search titles across all three lists.
    Search(SearchArgs),
    /// Show the first record with an id across all three lists.
    Show(ShowArgs),
    /// Fetch full details for one movie or TV show.
    Details(DetailsArgs),
    /// Config file operations.
    Config(ConfigCommand),
}

/// Arguments for the `region` subcommand.
#[derive(clap::Args)]
struct RegionArgs {
    /// Response language (default: `[region].language`).
    #[arg(long)]
    language: Option<String>,
    /// Region and origin country (default: `[region].region`).
    #[arg(long)]
    region: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(clap::Args)]
struct SearchArgs {
    /// Case-insensitive title substring.
    #[arg(long, required = true, value_parser = NonEmptyStringValueParser::new())]
    query: String,
}

/// Arguments for the `show` subcommand.
#[derive(clap::Args)]
struct ShowArgs {
    /// TMDB id.
    #[arg(long, required = true)]
    id: u64,
}

/// Arguments for the `browse` subcommand.
#[derive(clap::Args)]
struct BrowseArgs {
    /// Start on a detail route such as `/detail/tv/218843`.
    #[arg(long)]
    route: Option<DetailRoute>,
}

/// Arguments for the `details` subcommand.
#[derive(clap::Args)]
struct DetailsArgs {
    /// `movie` or `tv`.
    #[arg(long, required = true)]
    media_type: MediaType,
    /// TMDB id.
    #[arg(long, required = true)]
    id: u64,
    /// Response language (default: `[popular].language`).
    #[arg(long)]
    language: Option<String>,
}

/// Arguments for the `config` subcommand.
#[derive(clap::Args)]
struct ConfigCommand {
    /// Config subcommand to run.
    #[command(subcommand)]
    command: ConfigSubcommands,
}

/// Available config subcommands.
#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Print the config file path.
    Path,
    /// Write a config file with default values.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Loads the config file for `dir`.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved or the file is invalid.
fn load_config(dir: Option<&PathBuf>) -> Result<AppConfig> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    AppConfig::load(&config_path).context("failed to load config")
}

/// Builds a `TmdbClient` from config.
///
/// The token is read from `[api].token_env` on every request, so a missing
/// variable is not an error here.
///
/// # Errors
///
/// Returns an error if the base URL is invalid or the client fails to build.
#[instrument(skip_all)]
fn build_tmdb_client(config: &AppConfig) -> Result<TmdbClient> {
    TmdbClient::builder()
        .base_url(config.base_url()?)
        .credential(Credential::Env(config.api.token_env.clone()))
        .user_agent(concat!(
            env!("CARGO_PKG_NAME"),
            "/",
            env!("CARGO_PKG_VERSION")
        ))
        .build()
        .context("failed to build TMDB client")
}

/// Builds the three stores with their configured request parameters.
fn build_catalog(config: &AppConfig) -> Catalog {
    Catalog::new(
        PopularStore::new(config.popular_params()),
        RegionStore::new(config.region_filter()),
        TvRegionStore::new(config.tv_params()),
    )
}

/// Fails when a single-list refresh did not produce data.
///
/// # Errors
///
/// Returns an error if `state` is `Stale`. The cause is already logged.
fn ensure_loaded(category: Category, state: LoadState) -> Result<()> {
    if state == LoadState::Stale {
        bail!("failed to fetch {}", category.label());
    }
    Ok(())
}

/// Logs one line per record.
fn print_records<'a>(
    records: impl IntoIterator<Item = &'a MediaRecord>,
    media_type: Option<MediaType>,
) {
    tracing::info!("ID\tMedia\tTitle");
    let mut total: usize = 0;
    for record in records {
        let media = media_type.unwrap_or_else(|| record.inferred_media_type());
        tracing::info!("{}\t{}\t{}", record.id, media, record.effective_title());
        total = total.saturating_add(1);
    }
    tracing::info!("Total: {} records", total);
}

/// Runs the `browse` subcommand.
///
/// # Errors
///
/// Returns an error if config loading, client setup or the TUI fails.
#[instrument(skip_all)]
async fn run_browse(args: &BrowseArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    tui::run_browser(
        &client,
        build_catalog(&config),
        config.region_filter(),
        config.carousel_interval(),
        args.route,
    )
    .await
    .context("browser TUI failed")
}

/// Runs the `popular` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the fetch fails.
#[instrument(skip_all)]
async fn run_popular(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let mut store = PopularStore::new(config.popular_params());
    store.refresh(&client, &CancellationToken::new()).await;
    ensure_loaded(Category::Popular, store.state())?;

    print_records(store.records(), Some(MediaType::Movie));
    Ok(())
}

/// Runs the `region` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the fetch fails.
#[instrument(skip_all)]
async fn run_region(args: RegionArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let defaults = config.region_filter();
    let filter = RegionFilter::new(
        args.language.unwrap_or(defaults.language),
        args.region.unwrap_or(defaults.region),
    );
    tracing::info!("Language: {}  Region: {}", filter.language, filter.region);

    let mut store = RegionStore::default();
    store
        .refresh(&client, Some(filter), &CancellationToken::new())
        .await;
    ensure_loaded(Category::Region, store.state())?;

    print_records(store.records(), Some(MediaType::Movie));
    Ok(())
}

/// Runs the `tv` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the fetch fails.
#[instrument(skip_all)]
async fn run_tv(dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;

    let mut store = TvRegionStore::new(config.tv_params());
    store.refresh(&client, &CancellationToken::new()).await;
    ensure_loaded(Category::TvRegion, store.state())?;

    print_records(store.records(), Some(MediaType::Tv));
    Ok(())
}

/// Refreshes all three lists with configured parameters.
async fn refresh_catalog<A: LocalTmdbApi>(api: &A, config: &AppConfig) -> Catalog {
    let mut catalog = build_catalog(config);
    catalog
        .refresh_all(api, Some(config.region_filter()), &CancellationToken::new())
        .await;
    catalog
}

/// Runs the `search` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build.
#[instrument(skip_all)]
async fn run_search(args: &SearchArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let catalog = refresh_catalog(&client, &config).await;

    let hits = catalog.search_by_title(&args.query);
    if hits.is_empty() {
        tracing::info!("No results found.");
        return Ok(());
    }
    print_records(hits, None);
    Ok(())
}

/// Runs the `show` subcommand.
///
/// # Errors
///
/// Returns an error if no list holds the id.
#[instrument(skip_all)]
async fn run_show(args: &ShowArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let catalog = refresh_catalog(&client, &config).await;

    let record = catalog.find_by_id(args.id)?;
    let media_type = record.inferred_media_type();
    tracing::info!("ID: {}", record.id);
    tracing::info!("Route: {}", DetailRoute::new(media_type, record.id));
    tracing::info!("Title: {}", record.effective_title());
    tracing::info!(
        "Date: {}",
        record
            .release_date
            .as_deref()
            .or(record.first_air_date.as_deref())
            .unwrap_or("-")
    );
    tracing::info!("Overview: {}", record.overview().unwrap_or("-"));
    tracing::info!(
        "Poster: {}",
        poster_url(record.poster_path.as_deref(), ImageSize::Original)
    );
    Ok(())
}

/// Runs the `details` subcommand.
///
/// # Errors
///
/// Returns an error if the client fails to build or the API request fails.
#[instrument(skip_all)]
async fn run_details(args: &DetailsArgs, dir: Option<&PathBuf>) -> Result<()> {
    let config = load_config(dir)?;
    let client = build_tmdb_client(&config)?;
    let language = args
        .language
        .as_deref()
        .unwrap_or(config.popular.language.as_str());

    let details = client
        .media_details(args.media_type, args.id, language)
        .await
        .with_context(|| format!("TMDB {} details request failed", args.media_type))?;

    tracing::info!("ID: {}", details.id);
    tracing::info!("Title: {}", details.display_title());
    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        tracing::info!("Tagline: {}", tagline);
    }
    tracing::info!("Status: {}", details.status.as_deref().unwrap_or("-"));
    tracing::info!(
        "Date: {}",
        details
            .release_date
            .as_deref()
            .or(details.first_air_date.as_deref())
            .unwrap_or("-")
    );
    match args.media_type {
        MediaType::Movie => tracing::info!(
            "Runtime: {}",
            details
                .runtime
                .map_or_else(|| String::from("-"), |r| format!("{r}min"))
        ),
        MediaType::Tv => tracing::info!(
            "Seasons: {}  Episodes: {}",
            details
                .number_of_seasons
                .map_or_else(|| String::from("-"), |v| v.to_string()),
            details
                .number_of_episodes
                .map_or_else(|| String::from("-"), |v| v.to_string()),
        ),
    }
    let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
    tracing::info!("Genres: {}", genres.join(", "));
    tracing::info!("Overview: {}", details.overview.as_deref().unwrap_or("-"));
    tracing::info!(
        "Poster: {}",
        poster_url(details.poster_path.as_deref(), ImageSize::Original)
    );
    Ok(())
}

/// Runs the `config path` subcommand.
///
/// # Errors
///
/// Returns an error if the path cannot be resolved.
fn run_config_path(dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    tracing::info!("{}", config_path.display());
    Ok(())
}

/// Runs the `config init` subcommand.
///
/// # Errors
///
/// Returns an error if the file exists (without `--force`) or cannot be written.
fn run_config_init(force: bool, dir: Option<&PathBuf>) -> Result<()> {
    let config_path = resolve_config_path(dir).context("failed to resolve config path")?;
    if config_path.exists() && !force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }
    AppConfig::default()
        .save(&config_path)
        .context("failed to save config")?;
    tracing::info!("Wrote default config to {}", config_path.display());
    Ok(())
}

/// Picks the log destination.
///
/// `--log-file` wins; otherwise the interactive browser discards logs so the
/// screen stays intact, and every other command logs to stdout.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn log_writer(log_file: Option<&Path>, interactive: bool) -> Result<(BoxMakeWriter, bool)> {
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("failed to open log file {}", path.display()))?;
            Ok((BoxMakeWriter::new(Mutex::new(file)), false))
        }
        None if interactive => Ok((BoxMakeWriter::new(io::sink), false)),
        None => Ok((BoxMakeWriter::new(io::stdout), true)),
    }
}

/// Installs the global tracing subscriber.
///
/// # Errors
///
/// Returns an error if the log file cannot be opened.
fn init_tracing(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let (writer, ansi) = log_writer(log_file, interactive)?;
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    #[cfg(not(feature = "otel"))]
    {
        fmt()
            .with_env_filter(env_filter)
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false)
            .init();
    }

    #[cfg(feature = "otel")]
    {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(writer)
            .with_ansi(ansi)
            .with_target(false);

        let otel_layer = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
            .ok()
            .and_then(|_| {
                let exporter = opentelemetry_otlp::SpanExporter::builder()
                    .with_http()
                    .build()
                    .ok()?;

                let tracer_provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
                    .with_simple_exporter(exporter)
                    .build();

                let tracer = opentelemetry::trace::TracerProvider::tracer(
                    &tracer_provider,
                    env!("CARGO_PKG_NAME"),
                );
                opentelemetry::global::set_tracer_provider(tracer_provider);

                Some(tracing_opentelemetry::layer().with_tracer(tracer))
            });

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .with(otel_layer)
            .init();
    }

    Ok(())
}

/// Entry point.
///
/// # Errors
///
/// Returns an error if subcommand execution fails.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(
        cli.log_file.as_deref(),
        matches!(cli.command, Commands::Browse(_)),
    )?;

    let dir = cli.dir.as_ref();
    match cli.command {
        Commands::Browse(args) => run_browse(&args, dir).await,
        Commands::Popular => run_popular(dir).await,
        Commands::Region(args) => run_region(args, dir).await,
        Commands::Tv => run_tv(dir).await,
        Commands::Search(args) => run_search(&args, dir).await,
        Commands::Show(args) => run_show(&args, dir).await,
        Commands::Details(args) => run_details(&args, dir).await,
        Commands::Config(cmd) => match cmd.command {
            ConfigSubcommands::Path => run_config_path(dir),
            ConfigSubcommands::Init { force } => run_config_init(force, dir),
        },
    }
}
