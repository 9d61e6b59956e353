// src/bin/advisor_replay.rs
//
// Прогон ленты тиков (JSON lines) через советника: печатает каждую изменившуюся подсказку.

use std::error::Error;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use clap::Parser;
use serde::Deserialize;

use poker_advisor::domain::snapshot::{CalculatorOverrideMode, OverrideOptions, TableSnapshot};
use poker_advisor::engine::{Advisor, TrackerEvent};
use poker_advisor::infra::AdvisorConfig;

#[derive(Parser)]
#[command(name = "advisor_replay")]
#[command(about = "Replay recorded table snapshots through the poker advisor")]
struct Cli {
    /// JSON-lines file, one tick per line: {"snapshot": ..., "overrides": ..., "villain_mode": ...}
    #[arg(short, long)]
    input: PathBuf,
    /// JSON config file (AdvisorConfig)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Seed for reproducible suggestions (overrides config)
    #[arg(long)]
    seed: Option<u64>,
    /// Directory with per-player stat records (overrides config)
    #[arg(long)]
    stats_dir: Option<PathBuf>,
    /// Directory with <position>.json range charts (overrides config)
    #[arg(long)]
    ranges_dir: Option<PathBuf>,
    /// Monte-Carlo sample budget per equity call (overrides config)
    #[arg(long)]
    samples: Option<usize>,
    /// Print the suggestion on every tick, not only when it changes
    #[arg(long)]
    all: bool,
    /// Print rolling stats of these players at the end
    #[arg(long = "player")]
    players: Vec<String>,
}

/// Одна строка ленты.
#[derive(Deserialize)]
struct Tick {
    snapshot: TableSnapshot,
    #[serde(default)]
    overrides: OverrideOptions,
    #[serde(default)]
    villain_mode: CalculatorOverrideMode,
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AdvisorConfig::load(path)?,
        None => AdvisorConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(dir) = cli.stats_dir {
        config.stats_dir = dir;
    }
    if cli.ranges_dir.is_some() {
        config.ranges_dir = cli.ranges_dir;
    }
    if let Some(samples) = cli.samples {
        config.equity_samples = samples.max(1);
    }

    let mut advisor = Advisor::from_config(config)?;
    let reader = BufReader::new(File::open(&cli.input)?);

    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let tick: Tick = match serde_json::from_str(&line) {
            Ok(tick) => tick,
            Err(e) => {
                log::warn!("Строка {}: не разобрана: {}", line_no + 1, e);
                continue;
            }
        };

        let outcome = advisor.on_tick(&tick.snapshot, &tick.overrides, &tick.villain_mode);
        for event in &outcome.events {
            match event {
                TrackerEvent::NewHand { hand_number, dealer } => {
                    println!("--- раздача #{hand_number} (кнопка: место {dealer}) ---");
                }
                TrackerEvent::NewStreet { street } => println!("--- {street} ---"),
            }
        }
        if let Some(skip) = &outcome.skipped {
            log::debug!("Тик {} пропущен: {:?}", line_no + 1, skip);
            continue;
        }
        if let Some(suggestion) = &outcome.suggestion {
            if outcome.changed || cli.all {
                println!("[{:>4}] {}", line_no + 1, suggestion);
            }
        }
    }

    if let Some(summary) = advisor.finish()? {
        log::info!("Последняя раздача учтена: игроков {}", summary.updated.len());
    }

    for player in &cli.players {
        match advisor.stats().player_stats(player)? {
            Some(stats) => println!(
                "{player}: рук={} VPIP={:.1} PFR={:.1} 3B={:.1} F3B={:.1} CBF={:.1} WTSD={:.1}",
                stats.hands,
                stats.vpip,
                stats.pfr,
                stats.three_bet,
                stats.fold_to_three_bet,
                stats.cbet_flop,
                stats.went_to_showdown
            ),
            None => println!("{player}: нет данных"),
        }
    }

    Ok(())
}
