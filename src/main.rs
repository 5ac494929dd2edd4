//! # chatstats CLI
//!
//! Command-line interface for the chatstats library.

use std::fs;
use std::path::Path;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use chatstats::analysis::{DeepStats, calculate_deep_stats_with};
use chatstats::cli::Args;
use chatstats::config::{DateOrder, StatsConfig};
use chatstats::filter::{FilterConfig, apply_filters};
use chatstats::format::write_to_format;
use chatstats::parser::TranscriptParser;
use chatstats::ChatstatsError;

fn main() {
    let args = <Args as ClapParser>::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr. `RUST_LOG` wins unless `--verbose` is given.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> Result<(), ChatstatsError> {
    let total_start = Instant::now();
    let target = args.output_target()?;
    let config = build_stats_config(args)?;
    let filter_config = build_filter_config(args)?;

    // Print header
    println!("📊 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);
    if let Some((ref path, format)) = target {
        println!("💾 Output:  {}", path);
        println!("📄 Format:  {}", format);
    }
    println!("📅 Dates:   {}", config.date_order);
    if let Some(ref search) = args.search {
        println!("🔍 Search:  {}", search);
    }
    if let Some(ref date) = args.date {
        println!("📅 Date:    {}", date);
    }
    if let Some(ref from) = args.from {
        println!("👤 From:    {}", from);
    }
    println!();

    println!("⏳ Reading transcript...");
    let parse_start = Instant::now();
    let messages = TranscriptParser::new().parse(Path::new(&args.input))?;
    let original_count = messages.len();
    println!(
        "   Found {} messages ({:.2}s)",
        original_count,
        parse_start.elapsed().as_secs_f64()
    );

    let messages = if filter_config.is_active() {
        println!("🔍 Filtering messages...");
        let filtered = apply_filters(messages, &filter_config);
        println!("   {} messages after filtering", filtered.len());
        filtered
    } else {
        messages
    };

    println!("🧮 Computing statistics...");
    let Some(stats) = calculate_deep_stats_with(&messages, &config) else {
        println!();
        println!("ℹ️  no messages");
        return Ok(());
    };

    if let Some((path, format)) = target {
        println!("💾 Writing {}...", format);
        write_to_format(&messages, &stats, &path, format)?;
        println!();
        println!("✅ Done! Output saved to {}", path);
    }

    print_summary(&stats);

    debug!(elapsed_ms = total_start.elapsed().as_millis() as u64, "run finished");
    println!();
    println!("⚡ Total time:  {:.2}s", total_start.elapsed().as_secs_f64());

    Ok(())
}

fn build_stats_config(args: &Args) -> Result<StatsConfig, ChatstatsError> {
    let mut config = match args.config {
        Some(ref path) => StatsConfig::from_json_str(&fs::read_to_string(path)?)?,
        None => StatsConfig::default(),
    };

    if let Some(min) = args.min_emoji {
        config = config.with_min_emoji_occurrence(min);
    }
    if let Some(top) = args.top {
        config = config.with_top_n(top).with_least_n(top);
    }
    if args.day_first {
        config = config.with_date_order(DateOrder::DayFirst);
    }

    config.validate()?;
    Ok(config)
}

fn build_filter_config(args: &Args) -> Result<FilterConfig, ChatstatsError> {
    let mut filter_config = FilterConfig::new().exclude_system(args.no_system);

    if let Some(ref search) = args.search {
        filter_config = filter_config.with_search(search);
    }
    if let Some(ref date) = args.date {
        filter_config = filter_config.with_date(date)?;
    }
    if let Some(ref from) = args.from {
        filter_config = filter_config.with_sender(from.clone());
    }

    Ok(filter_config)
}

fn print_summary(stats: &DeepStats) {
    println!();
    println!("📊 Summary:");
    println!("   Messages:     {}", stats.total_messages);
    println!("   Words:        {}", stats.total_words);
    println!("   Media:        {}", stats.total_media);
    println!("   Active days:  {}", stats.total_active_days);
    println!("   Day streak:   {}", stats.max_days_streak);
    if let Some(ref word) = stats.most_said_word {
        println!("   Top word:     {} ({})", word.word, word.count);
    }
    if let Some(ref bar) = stats.most_active_bar {
        println!("   Busiest time: {} ({}, {} messages)", bar.label, bar.top_sender, bar.total);
    }

    println!();
    println!("👥 Participants:");
    for (name, p) in stats.participants_by_activity() {
        println!(
            "   {:<20} {:>6} msgs  {:>7} words  streak {:>3}  {}",
            name, p.msg_count, p.words, p.longest_streak, p.yap_level
        );
    }
}
