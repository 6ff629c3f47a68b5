//! JustSplit - Expense Timeline & Settlement CLI
//!
//! Lays out dated expenses on an event timeline and reduces them into
//! balances and settlement transfers.

use std::path::{Path, PathBuf};

use justsplit_core::app::cli::{Cli, Commands, ConfigAction};
use justsplit_core::app::config::Config;
use justsplit_core::ledger::balance::compute_balances;
use justsplit_core::ledger::currency::ExchangeRates;
use justsplit_core::ledger::document::EventDocument;
use justsplit_core::ledger::settlement::{SettlementConfig, SettlementPlanner};
use justsplit_core::time::clock::{Clock, FixedClock, SystemClock};
use justsplit_core::timeline::layout::LayoutEngine;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Layout {
            input,
            threshold,
            now,
            json,
        } => {
            run_layout(&input, threshold, now, json, &config)?;
        }
        Commands::Balances {
            input,
            currency,
            rates,
            json,
        } => {
            run_balances(&input, currency, rates, json, &config)?;
        }
        Commands::Settle {
            input,
            currency,
            rates,
            json,
        } => {
            run_settle(&input, currency, rates, json, &config)?;
        }
        Commands::Validate { input } => {
            run_validate(&input)?;
        }
        Commands::List { detailed } => {
            run_list(detailed)?;
        }
        Commands::Init { force } => {
            run_init(force, &config)?;
        }
        Commands::Delete { name, force } => {
            run_delete(&name, force)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

fn load_document(input: &Path) -> anyhow::Result<EventDocument> {
    if !input.exists() {
        anyhow::bail!("Event document not found: {:?}", input);
    }
    let document = EventDocument::load(input)?;
    info!(
        "Loaded event '{}' with {} expenses",
        document.event.name,
        document.len()
    );
    Ok(document)
}

fn load_rates(rates: Option<PathBuf>, target: &str) -> anyhow::Result<ExchangeRates> {
    match rates {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Rate table not found: {:?}", path);
            }
            Ok(ExchangeRates::load(&path)?)
        }
        // No table: only same-currency documents will convert.
        None => Ok(ExchangeRates::new(target)),
    }
}

fn run_layout(
    input: &Path,
    threshold: Option<f64>,
    now: Option<String>,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let document = load_document(input)?;

    // Degenerate documents still lay out (markers clamp instead of the
    // tool crashing), but tell the user what they are looking at.
    if let Err(e) = document.validate() {
        warn!("Document has issues, markers may land at clamped positions: {e}");
    }

    let mut grouping = config.grouping.clone();
    if let Some(t) = threshold {
        grouping.threshold_pct = t;
        if let Some(msg) = grouping.validate().into_iter().next() {
            anyhow::bail!("Invalid threshold: {msg}");
        }
    }

    let engine = LayoutEngine::with_config(grouping);
    let clock: Box<dyn Clock> = match now {
        Some(ts) => {
            let fixed = FixedClock::from_timestamp(&ts);
            if fixed.now_ms().is_nan() {
                anyhow::bail!("Unparseable --now timestamp: '{ts}'");
            }
            Box::new(fixed)
        }
        None => Box::new(SystemClock),
    };

    let markers = engine.layout_document(&document, clock.as_ref());

    if json {
        println!("{}", serde_json::to_string_pretty(&markers)?);
        return Ok(());
    }

    println!("Timeline for '{}':", document.event.name);
    if markers.is_empty() {
        println!("  (no expenses)");
    }
    for marker in &markers {
        let badge = if marker.count > 1 {
            format!(" x{}", marker.count)
        } else {
            String::new()
        };
        println!(
            "  {:>7.2}%{}  {}",
            marker.position,
            badge,
            marker.item_ids.join(", ")
        );
    }

    Ok(())
}

fn run_balances(
    input: &Path,
    currency: Option<String>,
    rates: Option<PathBuf>,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let document = load_document(input)?;
    let target = currency.unwrap_or_else(|| config.settlement.currency.clone());
    let rates = load_rates(rates, &target)?;

    let balances = compute_balances(&document.expenses, &rates, &target)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&balances)?);
        return Ok(());
    }

    println!("Balances for '{}' ({target}):", document.event.name);
    if balances.is_empty() {
        println!("  (no expenses)");
    }
    for b in &balances {
        println!(
            "  {:<16} paid {:>10.2}  share {:>10.2}  net {:>+10.2}",
            b.participant, b.paid, b.share, b.net
        );
    }

    Ok(())
}

fn run_settle(
    input: &Path,
    currency: Option<String>,
    rates: Option<PathBuf>,
    json: bool,
    config: &Config,
) -> anyhow::Result<()> {
    let document = load_document(input)?;
    let target = currency.unwrap_or_else(|| config.settlement.currency.clone());
    let rates = load_rates(rates, &target)?;

    let balances = compute_balances(&document.expenses, &rates, &target)?;
    let planner = SettlementPlanner::with_config(SettlementConfig {
        min_transfer: config.settlement.min_transfer,
        currency: target.clone(),
    });
    let transfers = planner.suggest(&balances);

    if json {
        println!("{}", serde_json::to_string_pretty(&transfers)?);
        return Ok(());
    }

    println!("Settlement for '{}' ({target}):", document.event.name);
    if transfers.is_empty() {
        println!("  Everyone is settled up.");
    }
    for t in &transfers {
        println!("  {} pays {} {:.2} {}", t.from, t.to, t.amount, t.currency);
    }

    Ok(())
}

fn run_validate(input: &Path) -> anyhow::Result<()> {
    let document = load_document(input)?;

    match document.validate() {
        Ok(()) => {
            println!("Validation PASSED");
            Ok(())
        }
        Err(e) => {
            println!("Validation FAILED:");
            println!("  - {e}");
            anyhow::bail!("Validation failed")
        }
    }
}

fn run_list(detailed: bool) -> anyhow::Result<()> {
    let events_dir = Cli::events_dir();

    if !events_dir.exists() {
        println!("No event documents found in {}", events_dir.display());
        println!("Create the directory with: justsplit init");
        return Ok(());
    }

    println!("Event documents in {:?}:", events_dir);

    let mut entries: Vec<_> = std::fs::read_dir(&events_dir)?
        .filter_map(|e| e.ok())
        .filter(|e| e.path().extension().map(|ext| ext == "json").unwrap_or(false))
        .collect();

    entries.sort_by_key(|e| e.path());

    for entry in &entries {
        let path = entry.path();
        let file_name = path.file_name().unwrap_or_default().to_string_lossy();

        if detailed {
            match EventDocument::load(&path) {
                Ok(document) => {
                    let end = document.event.end_date.as_deref().unwrap_or("ongoing");
                    println!(
                        "  {}  ('{}', {} expenses, {} .. {})",
                        file_name,
                        document.event.name,
                        document.len(),
                        document.event.start_date,
                        end
                    );
                }
                Err(_) => {
                    let fs_meta = entry.metadata()?;
                    println!("  {}  ({} bytes, failed to parse)", file_name, fs_meta.len());
                }
            }
        } else {
            println!("  {}", file_name);
        }
    }

    if entries.is_empty() {
        println!("  (none)");
    }

    Ok(())
}

fn run_init(force: bool, config: &Config) -> anyhow::Result<()> {
    let config_path = Config::default_path();

    if config_path.exists() && !force {
        anyhow::bail!(
            "Config already exists at {:?}. Use --force to overwrite.",
            config_path
        );
    }

    config.save_default()?;
    println!("Created config at {:?}", config_path);
    println!("\nConfig content:\n{}", config.to_toml()?);

    std::fs::create_dir_all(Cli::events_dir())?;
    println!("Created events directory: {:?}", Cli::events_dir());

    Ok(())
}

fn run_delete(name: &str, force: bool) -> anyhow::Result<()> {
    let events_dir = Cli::events_dir();

    // Try exact filename first, then add .json extension
    let candidates = vec![
        events_dir.join(name),
        events_dir.join(format!("{}.json", name)),
    ];

    let target = candidates
        .into_iter()
        .find(|p| p.exists())
        .ok_or_else(|| anyhow::anyhow!("Event document '{}' not found in {:?}", name, events_dir))?;

    if !force {
        let file_size = std::fs::metadata(&target)?.len();
        println!("Will delete: {} ({} bytes)", target.display(), file_size);
        println!("Use --force to skip this prompt, or re-run with -f");
        return Ok(());
    }

    std::fs::remove_file(&target)?;
    info!("Deleted event document: {}", target.display());
    println!("Deleted: {}", target.display());

    Ok(())
}

fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("Configuration ({:?}):\n", Config::default_path());
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Reset { force } => {
            let config_path = Config::default_path();

            if config_path.exists() && !force {
                println!("Config exists at {:?}", config_path);
                println!("Use --force to reset to defaults");
                return Ok(());
            }

            Config::default().save_default()?;
            println!("Configuration reset to defaults at {:?}", config_path);
        }
    }

    Ok(())
}
