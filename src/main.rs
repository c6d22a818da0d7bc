use clap::Parser;
use market_finder::app::{report, search};
use market_finder::utils::{logger, validation::Validate};
use market_finder::{CliConfig, FinderError, LocalStorage};

fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = run(config) {
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
}

fn run(config: CliConfig) -> Result<(), FinderError> {
    config.validate()?;

    let storage = LocalStorage::new(config.base_dir.clone());
    let zip_codes = config.zip_codes.clone();
    let format = config.format;
    let cache = config.cache;

    let outcomes = search(storage, config, &zip_codes, cache)?;
    let output = report::render(&outcomes, format)?;
    print!("{}", output);
    if format == report::OutputFormat::Json {
        println!();
    }

    Ok(())
}
