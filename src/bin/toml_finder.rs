use anyhow::Context;
use clap::Parser;
use market_finder::app::report::{self, OutputFormat};
use market_finder::app::search;
use market_finder::core::ConfigProvider;
use market_finder::utils::{logger, validation::Validate};
use market_finder::{LocalStorage, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-finder")]
#[command(about = "Market finder driven by a TOML configuration file")]
struct Args {
    /// ZIP codes to search around
    #[arg(required_unless_present = "dry_run")]
    zip_codes: Vec<String>,

    /// Path to TOML configuration file
    #[arg(short, long, default_value = "market-finder.toml")]
    config: String,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Override the cache setting from the config
    #[arg(long)]
    cache: Option<bool>,

    /// Show the resolved configuration and check both tables are readable, without searching
    #[arg(long)]
    dry_run: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    logger::init_cli_logger(args.verbose);
    tracing::info!("Loading configuration from: {}", args.config);

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        tracing::error!("Suggestion: {}", e.recovery_suggestion());
        eprintln!("error: {}", e.user_friendly_message());
        std::process::exit(e.exit_code());
    }

    let cache = args.cache.unwrap_or_else(|| config.cache_enabled());
    let storage = LocalStorage::new(config.base_dir());

    if args.dry_run {
        display_config_summary(&config, &storage, cache);
        return Ok(());
    }

    let outcomes = match search(storage, config, &args.zip_codes, cache) {
        Ok(outcomes) => outcomes,
        Err(e) => {
            tracing::error!(
                "Search failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("error: {}", e.user_friendly_message());
            eprintln!("hint: {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    };

    let output = report::render(&outcomes, args.format)?;
    print!("{}", output);
    if args.format == OutputFormat::Json {
        println!();
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, storage: &LocalStorage, cache: bool) {
    println!("Configuration Summary:");
    println!("  Radius: {} miles", config.radius_miles());
    println!("  Cache: {}", if cache { "enabled" } else { "disabled" });

    let tables = [
        ("ZIP table", config.zip_table_path(), config.zip_table_encoding()),
        ("Market table", config.market_table_path(), config.market_table_encoding()),
    ];
    for (label, path, encoding) in tables {
        let full_path = storage.resolve_path(path);
        let status = if full_path.is_file() { "ok" } else { "MISSING" };
        println!("  {}: {} ({}) [{}]", label, full_path.display(), encoding, status);
    }

    let zip = config.zip_columns();
    println!("  ZIP columns: {}, {}, {}", zip.zip, zip.lat, zip.lon);
    let market = config.market_columns();
    println!(
        "  Market columns: {}, {}, {} (lat), {} (lon), {}",
        market.name, market.address, market.lat, market.lon, market.description
    );
}
