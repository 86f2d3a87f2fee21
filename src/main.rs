//! Domain Toolkit - command line front-end
//!
//! Estimate domain values, check availability, browse suggestions and
//! combine keywords into domain ideas.

use anyhow::{anyhow, Context};
use domain_toolkit::{
    ads::{AdSlot, HtmlSnippetHost},
    combiner::{CombineConfig, WordCombiner},
    consent::{ConsentCategory, ConsentPreferences},
    domain::{parse_domain_input, parse_tld_arg},
    watch::{NavigationKind, WatchView},
    AppConfig, Toolkit, ToolkitError, ValuationResult,
};
use indicatif::{ProgressBar, ProgressStyle};
use inquire::Confirm;
use std::env;
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    domain_toolkit::init().context("failed to initialize")?;

    let mut args: Vec<String> = env::args().skip(1).collect();
    let verbose = take_flag(&mut args, &["--verbose", "-v"]);
    domain_toolkit::logging::init_cli_logger(verbose);

    if args.is_empty() || matches!(args[0].as_str(), "--help" | "-h" | "help") {
        print_help();
        return Ok(());
    }

    let command = args.remove(0);
    if let Err(e) = run(&command, args).await {
        match e.downcast_ref::<ToolkitError>() {
            Some(toolkit_error) => eprintln!("{}", toolkit_error.user_message()),
            None => eprintln!("❌ Error: {:#}", e),
        }
        process::exit(1);
    }

    Ok(())
}

async fn run(command: &str, mut args: Vec<String>) -> anyhow::Result<()> {
    // Valuation and combining are local; no backend needed
    match command {
        "estimate" => return run_estimate(args),
        "combine" => return run_combine(args),
        _ => {}
    }

    let config = AppConfig::from_env()?;
    let host = Arc::new(HtmlSnippetHost::new());
    let toolkit = Toolkit::from_config(config, host.clone())?;

    match command {
        "check" => run_check(&toolkit, args).await,
        "suggest" => run_suggest(&toolkit, args).await,
        "favorites" => run_favorites(&toolkit, args).await,
        "history" => run_history(&toolkit, args).await,
        "watch" => run_watch(&toolkit, &mut args),
        "consent" => run_consent(&toolkit, &mut args),
        "ads" => {
            if args.is_empty() {
                return Err(anyhow!("usage: domain-toolkit ads <slot-id>..."));
            }
            let placed = args.iter().filter(|slot| toolkit.place_ad(&AdSlot::new(slot.as_str()))).count();
            if placed == 0 {
                println!("No ads placed (marketing cookies are off, or the ad network is unavailable).");
            } else {
                println!("{}", host.render());
            }
            Ok(())
        }
        other => Err(anyhow!("unknown command '{}'. Use --help for usage information", other)),
    }
}

/// Remove a boolean flag from the argument list
fn take_flag(args: &mut Vec<String>, names: &[&str]) -> bool {
    let before = args.len();
    args.retain(|a| !names.contains(&a.as_str()));
    args.len() != before
}

/// Remove `--name value` from the argument list
fn take_option(args: &mut Vec<String>, name: &str) -> anyhow::Result<Option<String>> {
    match args.iter().position(|a| a == name) {
        Some(idx) if idx + 1 < args.len() => {
            let value = args.remove(idx + 1);
            args.remove(idx);
            Ok(Some(value))
        }
        Some(_) => Err(anyhow!("{} needs a value", name)),
        None => Ok(None),
    }
}

fn spinner(message: impl Into<std::borrow::Cow<'static, str>>) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

fn run_estimate(mut args: Vec<String>) -> anyhow::Result<()> {
    let json = take_flag(&mut args, &["--json"]);
    if args.is_empty() {
        return Err(ToolkitError::invalid_input("Please enter a domain name").into());
    }

    let results = args
        .iter()
        .map(|domain| domain_toolkit::estimate(domain))
        .collect::<domain_toolkit::Result<Vec<_>>>()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        for result in &results {
            print_valuation(result);
        }
    }
    Ok(())
}

fn print_valuation(result: &ValuationResult) {
    println!("💎 {}", result.domain);
    println!("   Score:           {}/100 ({})", result.score, result.grade());
    println!(
        "   Estimated value: {}",
        domain_toolkit::pricing::format_price(result.estimated_value as f64, "USD")
    );
    println!("   Length:          {} ({})", result.factors.length, result.breakdown.length);
    println!("   TLD:             .{} ({})", result.factors.tld, result.breakdown.tld);
    println!("   Keywords:        {:+} ({})", result.factors.keyword_score, result.breakdown.keywords);
    println!(
        "   Brandability:    {:+} ({})",
        result.factors.brandability_score, result.breakdown.brandability
    );
    println!("   Market demand:   {:+} ({})", result.factors.market_score, result.breakdown.market);
    println!();
}

fn run_combine(mut args: Vec<String>) -> anyhow::Result<()> {
    let hyphenate = take_flag(&mut args, &["--hyphen"]);
    let random = take_flag(&mut args, &["--random"]);
    let tlds = take_option(&mut args, "--tlds")?
        .map(|t| parse_tld_arg(&t))
        .unwrap_or_default();
    let max_results = match take_option(&mut args, "--limit")? {
        Some(limit) => limit.parse().context("--limit must be a number")?,
        None => CombineConfig::default().max_results,
    };

    let combiner = WordCombiner::with_config(CombineConfig {
        hyphenate,
        max_results,
        ..Default::default()
    });
    let ideas = combiner.combine(&args, &tlds)?;

    if random {
        if let Some(idea) = WordCombiner::pick_random(&ideas, &mut rand::thread_rng()) {
            println!("🎲 {} (score {}, ~${})", idea.full_domain, idea.score, idea.estimated_value);
        }
        return Ok(());
    }

    println!("🧩 Domain ideas ({}):", ideas.len());
    for (i, idea) in ideas.iter().enumerate() {
        println!(
            "{:3}. {:<28} score {:>3}   ~{}",
            i + 1,
            idea.full_domain,
            idea.score,
            domain_toolkit::pricing::format_price(idea.estimated_value as f64, "USD")
        );
    }
    Ok(())
}

async fn run_check(toolkit: &Toolkit, args: Vec<String>) -> anyhow::Result<()> {
    // accepts "a.com b.io" as well as "a.com,b.io"
    let args = parse_domain_input(&args.join(" "));
    if args.is_empty() {
        return Err(ToolkitError::invalid_input("Please enter a domain name").into());
    }

    if args.len() == 1 {
        let bar = spinner(format!("Checking {}...", args[0]));
        let result = toolkit.check_domain(&args[0]).await;
        bar.finish_and_clear();
        print_availability(toolkit, &result?);
        return Ok(());
    }

    let bar = spinner(format!("Checking {} domains...", args.len()));
    let results = toolkit.check_domains(&args).await;
    bar.finish_and_clear();

    for availability in &results {
        print_availability(toolkit, availability);
    }
    let skipped = args.len() - results.len();
    if skipped > 0 {
        println!("⚠️  {} domain(s) could not be checked", skipped);
    }
    Ok(())
}

fn print_availability(toolkit: &Toolkit, availability: &domain_toolkit::Availability) {
    if availability.available {
        let price = availability
            .price
            .map(|p| format!(" - {}", toolkit.display_price(p, availability.currency.as_deref())))
            .unwrap_or_default();
        let period = availability
            .period
            .map(|years| format!(" / {} year(s)", years))
            .unwrap_or_default();
        println!("✅ {} - AVAILABLE{}{}", availability.domain, price, period);
    } else {
        println!("❌ {} - TAKEN", availability.domain);
    }
}

async fn run_suggest(toolkit: &Toolkit, args: Vec<String>) -> anyhow::Result<()> {
    let limit = match args.first() {
        Some(limit) => limit.parse().context("limit must be a number")?,
        None => 20,
    };

    let bar = spinner("Loading suggestions...");
    let suggestions = toolkit.suggestions(limit).await;
    bar.finish_and_clear();

    if suggestions.is_empty() {
        println!("No suggestions right now. Try again later.");
        return Ok(());
    }

    println!("✨ Suggested domains ({}):", suggestions.len());
    for s in &suggestions {
        let price = s
            .display_price()
            .map(|p| toolkit.display_price(p, None))
            .unwrap_or_else(|| "-".to_string());
        let score = s.score.map(|v| format!("{:.0}", v)).unwrap_or_else(|| "-".to_string());
        let category = s.category.as_deref().unwrap_or("general");
        println!("   {:<28} score {:>3}   {:>10}   {}", s.domain, score, price, category);
    }
    Ok(())
}

async fn run_favorites(toolkit: &Toolkit, mut args: Vec<String>) -> anyhow::Result<()> {
    if let Some(domain) = take_option(&mut args, "add")? {
        let favorite = toolkit.add_favorite(&domain).await?;
        println!("⭐ Saved {} (id {})", favorite.domain, favorite.id);
        return Ok(());
    }
    if let Some(id) = take_option(&mut args, "remove")? {
        toolkit.remove_favorite(&id).await?;
        println!("🗑️  Removed favorite {}", id);
        return Ok(());
    }

    let favorites = toolkit.favorites().await;
    if favorites.is_empty() {
        println!("No favorites yet.");
    }
    for favorite in &favorites {
        println!("⭐ {:<28} (id {})", favorite.domain, favorite.id);
    }
    Ok(())
}

async fn run_history(toolkit: &Toolkit, args: Vec<String>) -> anyhow::Result<()> {
    let limit = match args.first() {
        Some(limit) => limit.parse().context("limit must be a number")?,
        None => 10,
    };

    let checks = toolkit.recent_checks(limit).await;
    if checks.is_empty() {
        println!("No recent checks.");
    }
    for check in &checks {
        let when = check
            .checked_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let status = if check.available { "available" } else { "taken" };
        println!("   {:<28} {:<10} {}", check.domain, status, when);
    }
    Ok(())
}

fn run_watch(toolkit: &Toolkit, args: &mut Vec<String>) -> anyhow::Result<()> {
    let navigation = if take_flag(args, &["--reload"]) {
        NavigationKind::Reload
    } else {
        NavigationKind::Navigate
    };
    let query = args.first().map(String::as_str).unwrap_or_default();

    match toolkit.resolve_watch(query, navigation) {
        WatchView::Redirect { to } => println!("↪️  Redirecting to {}", to),
        WatchView::InvalidLink => println!("🚫 Invalid Watch Link"),
        WatchView::Play(page) => {
            println!("▶️  {}", page.title);
            if let Some(subtitle) = &page.subtitle {
                println!("   {}", subtitle);
            }
            if let Some(server) = &page.server {
                println!("   Server: {}", server);
            }
            println!("   {}", page.video_url);
        }
    }
    Ok(())
}

fn run_consent(toolkit: &Toolkit, args: &mut Vec<String>) -> anyhow::Result<()> {
    let consent = toolkit.consent();

    let prefs = if take_flag(args, &["--accept-all"]) {
        consent.accept_all()?
    } else if take_flag(args, &["--reject"]) {
        consent.reject_optional()?
    } else if take_flag(args, &["--reset"]) {
        consent.reset()?;
        println!("Cookie preferences cleared.");
        return Ok(());
    } else if take_flag(args, &["--show"]) {
        consent.current()
    } else {
        let mut prefs = ConsentPreferences::essential_only();
        for category in ConsentCategory::ALL {
            if category == ConsentCategory::Essential {
                continue;
            }
            let allowed = Confirm::new(&format!("Allow {} cookies?", category))
                .with_default(consent.allows(category))
                .with_help_message(category.description())
                .prompt()
                .context("consent prompt was cancelled")?;
            match category {
                ConsentCategory::Analytics => prefs.analytics = allowed,
                ConsentCategory::Marketing => prefs.marketing = allowed,
                ConsentCategory::Preferences => prefs.preferences = allowed,
                ConsentCategory::Essential => {}
            }
        }
        consent.save(prefs)?
    };

    println!("🍪 Cookie preferences:");
    for category in ConsentCategory::ALL {
        let mark = if prefs.allows(category) { "on" } else { "off" };
        println!("   {:<12} {}", category.to_string(), mark);
    }
    if !consent.has_decided() {
        println!("   (no choice saved yet)");
    }
    Ok(())
}

/// Print help information
fn print_help() {
    println!("🌐 Domain Toolkit v{}", domain_toolkit::VERSION);
    println!("═══════════════════════════════════════");
    println!();
    println!("USAGE:");
    println!("    domain-toolkit [--verbose] <COMMAND> [ARGS]");
    println!();
    println!("COMMANDS:");
    println!("    estimate <domain>... [--json]        Estimate domain value (offline)");
    println!("    combine <word>... [--tlds com,io] [--hyphen] [--limit N] [--random]");
    println!("                                         Combine words into ranked domain ideas");
    println!("    check <domain>[,<domain>...]         Check availability");
    println!("    suggest [limit]                      Browse curated suggestions");
    println!("    favorites [add <domain> | remove <id>]");
    println!("    history [limit]                      Your recent checks");
    println!("    watch <query> [--reload]             Resolve a watch link");
    println!("    consent [--accept-all | --reject | --show | --reset]");
    println!("    ads <slot-id>...                     Render ad markup (needs marketing consent)");
    println!();
    println!("ENVIRONMENT VARIABLES:");
    println!("    DOMAIN_TOOLKIT_API_URL         Backend base URL (default: http://localhost:8000/api)");
    println!("    DOMAIN_TOOLKIT_API_TOKEN       Session token for user endpoints");
    println!("    DOMAIN_TOOLKIT_STORAGE         Settings file, or 'memory'");
    println!("    DOMAIN_TOOLKIT_HOME_URL        Where reloaded watch pages return to");
    println!("    DOMAIN_TOOLKIT_AD_CLIENT       Ad network publisher id");
    println!("    DOMAIN_TOOLKIT_AD_SCRIPT_URL   Ad network script");
    println!("    DOMAIN_TOOLKIT_HISTORY_LIMIT   Valuations kept in memory (default: 10)");
    println!("    DOMAIN_TOOLKIT_PRICE_SCALE     'units' or 'legacy'");
    println!("    DOMAIN_TOOLKIT_TIMEOUT_SECS    Request timeout (default: 30)");
    println!("    RUST_LOG                       Log filter");
}
