use anyhow::{Context, Result, anyhow, bail};
use catalog::{Catalog, Entry, EntryKind};
use clap::{Parser, Subcommand};
use colored::Colorize;
use filters::{Criteria, FilterConfig, FilterHelper, FilterKind, TagSelection};
use fuzzy::NucleoSearch;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// catalog-filter - Filter character, group and lore catalogs
#[derive(Parser)]
#[command(name = "catalog-filter")]
#[command(about = "Filter a catalog of characters, groups, decks and world info", long_about = None)]
struct Cli {
    /// Path to the catalog entries JSON file
    #[arg(short, long, default_value = "data/catalog.json")]
    catalog: PathBuf,

    /// Path to the tag index JSON file
    #[arg(short, long)]
    tags: Option<PathBuf>,

    /// Path to a filter config JSON file
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Criteria shared by the filter and benchmark commands
#[derive(clap::Args, Clone, Default)]
struct FilterArgs {
    /// Name search term
    #[arg(long)]
    search: Option<String>,

    /// Keep only entries carrying this tag (repeatable, all must match)
    #[arg(long = "select-tag")]
    select_tags: Vec<String>,

    /// Drop entries carrying this tag (repeatable)
    #[arg(long = "exclude-tag")]
    exclude_tags: Vec<String>,

    /// Keep only favorites
    #[arg(long)]
    favorite: bool,

    /// Keep only groups
    #[arg(long)]
    group: bool,

    /// World-info search term
    #[arg(long)]
    world_info: Option<String>,

    /// Use fuzzy matching for name search
    #[arg(long)]
    fuzzy: bool,

    /// Hide characters already listed in a deck
    #[arg(long)]
    hide_deck_members: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply filters to the catalog and list what remains
    Filter {
        #[command(flatten)]
        args: FilterArgs,

        /// Maximum number of entries to print
        #[arg(long, default_value = "50")]
        limit: usize,
    },

    /// Show the tags of one entry
    Tags {
        /// Entry id (or world-info uid)
        #[arg(long)]
        id: String,
    },

    /// Run benchmark to test filtering performance
    Benchmark {
        #[command(flatten)]
        args: FilterArgs,

        /// Number of filter passes to time
        #[arg(long, default_value = "100")]
        iterations: usize,
    },
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    println!("Loading catalog from {}...", cli.catalog.display());
    let start = Instant::now();
    let catalog = Catalog::load_from_files(&cli.catalog, cli.tags.as_deref())
        .context("Failed to load catalog")?;
    println!("{} Loaded catalog in {:?}", "✓".green(), start.elapsed());

    let config = match &cli.config {
        Some(path) => FilterConfig::load(path)?,
        None => FilterConfig::default(),
    };

    match cli.command {
        Commands::Filter { args, limit } => handle_filter(&catalog, config, &args, limit)?,
        Commands::Tags { id } => handle_tags(&catalog, &id)?,
        Commands::Benchmark { args, iterations } => {
            handle_benchmark(&catalog, config, &args, iterations)?
        }
    }

    Ok(())
}

/// Build a helper over `catalog` with the criteria from `args`.
///
/// Command-line switches can only turn config flags on, never off.
fn build_helper(
    catalog: &Catalog,
    mut config: FilterConfig,
    args: &FilterArgs,
    changes: Arc<AtomicUsize>,
) -> Result<FilterHelper> {
    config.fuzzy_search |= args.fuzzy;
    config.hide_deck_members |= args.hide_deck_members;

    let mut helper = FilterHelper::new(move || {
        changes.fetch_add(1, Ordering::Relaxed);
    })
    .with_tag_index(Arc::new(catalog.tag_index().clone()))
    .with_fuzzy_search(Arc::new(NucleoSearch::from_entries(catalog.entries())))
    .with_config(config);

    if let Some(term) = &args.search {
        helper.set_criteria(FilterKind::Search, Criteria::search(term.as_str()), false)?;
    }
    let selection = TagSelection::new(
        args.select_tags.iter().cloned(),
        args.exclude_tags.iter().cloned(),
    );
    helper.set_criteria(FilterKind::Tag, selection.into(), false)?;
    helper.set_criteria(FilterKind::Favorite, Criteria::Favorite(args.favorite), false)?;
    helper.set_criteria(FilterKind::Group, Criteria::Group(args.group), false)?;
    if let Some(term) = &args.world_info {
        helper.set_criteria(
            FilterKind::WorldInfoSearch,
            Criteria::world_info_search(term.as_str()),
            false,
        )?;
    }

    Ok(helper)
}

/// Handle the 'filter' command
fn handle_filter(
    catalog: &Catalog,
    config: FilterConfig,
    args: &FilterArgs,
    limit: usize,
) -> Result<()> {
    let changes = Arc::new(AtomicUsize::new(0));
    let helper = build_helper(catalog, config, args, changes.clone())?;
    tracing::debug!("{} criteria changes applied", changes.load(Ordering::Relaxed));

    let start = Instant::now();
    let filtered = helper.apply_filters(catalog.entries());
    let elapsed = start.elapsed();

    println!(
        "{}",
        format!(
            "{} of {} entries match ({:?}):",
            filtered.len(),
            catalog.entries().len(),
            elapsed
        )
        .bold()
        .blue()
    );
    print_entries(&filtered, limit);
    if filtered.len() > limit {
        println!("  ... and {} more", filtered.len() - limit);
    }
    Ok(())
}

/// Handle the 'tags' command
fn handle_tags(catalog: &Catalog, id: &str) -> Result<()> {
    let entry = catalog
        .find(id)
        .ok_or_else(|| anyhow!("Entry {} not found", id))?;

    println!("{}", entry.label().bold().blue());
    match entry.lookup_key() {
        Some(key) => println!("{}Lookup key: {}", "• ".green(), key),
        None => println!("{}Lookup key: none (entry cannot carry tags)", "• ".green()),
    }

    let tags = catalog.tag_index().tags_for_entry(entry);
    if tags.is_empty() {
        println!("{}No tags", "• ".cyan());
        return Ok(());
    }
    println!("{}Tags:", "• ".cyan());
    for tag in tags {
        // Tag ids resolve to tag entries when the catalog lists them
        let name = catalog
            .find(tag)
            .filter(|e| e.kind == EntryKind::Tag)
            .and_then(Entry::name);
        match name {
            Some(name) => println!("  - {} ({})", tag, name),
            None => println!("  - {}", tag),
        }
    }
    Ok(())
}

/// Handle the 'benchmark' command
fn handle_benchmark(
    catalog: &Catalog,
    config: FilterConfig,
    args: &FilterArgs,
    iterations: usize,
) -> Result<()> {
    if iterations == 0 {
        bail!("Benchmark needs at least one iteration");
    }
    let helper = build_helper(catalog, config, args, Arc::new(AtomicUsize::new(0)))?;

    let mut timings: Vec<Duration> = Vec::with_capacity(iterations);
    let mut matched = 0;
    for _ in 0..iterations {
        let start = Instant::now();
        let filtered = helper.apply_filters(catalog.entries());
        timings.push(start.elapsed());
        matched = filtered.len();
    }

    let total_time: Duration = timings.iter().sum();
    let avg_latency = total_time / (timings.len() as u32);
    timings.sort();
    let p50 = percentile(&timings, 0.50);
    let p95 = percentile(&timings, 0.95);
    let p99 = percentile(&timings, 0.99);
    let throughput = iterations as f32 / total_time.as_secs_f32();

    println!("{}", "Benchmark results:".bold().blue());
    println!("Entries: {} in, {} out", catalog.entries().len(), matched);
    println!("Total time: {:?}", total_time);
    println!("Average latency: {:?}", avg_latency);
    println!("P50 latency: {:?}", p50);
    println!("P95 latency: {:?}", p95);
    println!("P99 latency: {:?}", p99);
    println!("Throughput: {:.2} passes/second", throughput);

    Ok(())
}

/// Nearest-rank percentile of sorted, non-empty `timings`
fn percentile(timings: &[Duration], p: f32) -> Duration {
    let idx = ((timings.len() as f32 * p) as usize).min(timings.len() - 1);
    timings[idx]
}

/// Print one line per entry, favorites starred
fn print_entries(entries: &[Entry], limit: usize) {
    for (rank, entry) in entries.iter().take(limit).enumerate() {
        let star = if entry.is_favorite() { "★".yellow() } else { " ".normal() };
        println!(
            "{}. {} {} [{}]",
            (rank + 1).to_string().green(),
            star,
            entry.label(),
            entry.kind
        );
    }
}
