use super::band::WriterActivity;
use super::config::TrackerConfig;
use super::cycle::{CycleReport, load_snapshot, run_cycle};
use super::day_log::{DayLog, DayLogRow};
use super::models::Direction;
use super::screener::TradeSignal;
use crate::app_config::AppConfig;
use crate::utility::timing::{AggregateTimer, Timer};

use anyhow::Result;
use chrono::Local;
use colored::{ColoredString, Colorize};
use tracing::{error, info};

/// Tracker command handler - runs refresh cycles and renders their output
pub struct TrackerCommands;

impl TrackerCommands {
    /// Single refresh over the configured snapshot
    pub async fn run_once(app: &AppConfig) -> Result<()> {
        let config = TrackerConfig::from_env();
        let snapshot = load_snapshot(&app.snapshot_path)?;
        let report = run_cycle(&snapshot, &config, Local::now())?;

        Self::print_report(&report);
        if let Some(signal) = &report.signal {
            Self::print_signal(signal);
        }
        Ok(())
    }

    /// Print the cycle report as JSON
    pub async fn run_json(app: &AppConfig) -> Result<()> {
        let config = TrackerConfig::from_env();
        let snapshot = load_snapshot(&app.snapshot_path)?;
        let report = run_cycle(&snapshot, &config, Local::now())?;

        println!("{}", serde_json::to_string_pretty(&report)?);
        Ok(())
    }

    /// Re-read the snapshot every refresh period until Ctrl-C or `max_cycles`
    /// attempts, then hand back the session's day log
    pub async fn run_watch(app: &AppConfig) -> Result<DayLog> {
        let config = TrackerConfig::from_env();
        let mut day_log = DayLog::default();
        let mut cycle_times = AggregateTimer::new("Refresh cycles");
        let mut interval = tokio::time::interval(app.refresh);
        let mut attempts = 0usize;

        println!(
            "{} Watching {} every {}s (Ctrl-C to stop)",
            "→".cyan(),
            app.snapshot_path.yellow(),
            app.refresh.as_secs()
        );

        loop {
            // Failed refreshes count toward the limit too
            if app.max_cycles.is_some_and(|max| attempts >= max) {
                break;
            }

            tokio::select! {
                _ = interval.tick() => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Stopping watch loop");
                    break;
                }
            }

            attempts += 1;
            let timer = Timer::silent("refresh");
            // A bad snapshot skips this tick; the fetch layer may fix it by the next one
            let report = match load_snapshot(&app.snapshot_path)
                .and_then(|snapshot| Ok(run_cycle(&snapshot, &config, Local::now())?))
            {
                Ok(report) => report,
                Err(e) => {
                    error!(error = %e, "Refresh failed");
                    println!("{} Refresh failed: {}", "✗".red(), e);
                    continue;
                }
            };
            cycle_times.record(timer.stop());

            let first_signal = day_log.record(&report, Local::now());

            Self::print_report(&report);
            if let Some(row) = day_log.latest() {
                Self::print_day_log_row(row);
            }
            if first_signal {
                if let Some(signal) = day_log.latched_signal() {
                    Self::print_signal(signal);
                }
            } else if let Some(signal) = &report.signal {
                info!(shape = %signal.shape, "Signal already latched for this session");
            }
        }

        println!();
        println!("{}", "Day Table".cyan().bold());
        for row in day_log.rows() {
            Self::print_day_log_row(row);
        }
        println!(
            "{} Cycles logged: {} of {} attempted",
            "ℹ".blue(),
            day_log.len(),
            attempts
        );
        if let Some(signal) = day_log.latched_signal() {
            println!("{} Session signal: {}", "ℹ".blue(), signal.shape.to_string().yellow());
        }
        cycle_times.summary();
        Ok(day_log)
    }

    fn colored_by(direction: Direction, text: String) -> ColoredString {
        match direction {
            Direction::Up => text.green(),
            Direction::Down => text.red(),
        }
    }

    fn print_report(report: &CycleReport) {
        println!("{}", "=".repeat(60).blue());
        println!(
            "{} {}  {}  Week {}",
            "Market Tracker".green().bold(),
            report.market.to_string().yellow(),
            report.timestamp,
            report.week
        );
        println!("{}", "=".repeat(60).blue());

        let session = &report.session;
        let change = session
            .change_percent
            .map(|p| format!("{}%", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} Open: {}  Current: {} ({})",
            "✓".green(),
            session.open,
            Self::colored_by(session.direction, session.current.to_string()),
            Self::colored_by(session.direction, change)
        );

        if let Some(vix) = &report.vix {
            let change = vix
                .change_percent
                .map(|p| format!("{}%", p))
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{} VIX: {} ({})",
                "✓".green(),
                Self::colored_by(vix.direction, vix.current.to_string()),
                Self::colored_by(vix.direction, change)
            );
        }

        println!();
        println!("{}", "Gann Levels".cyan().bold());
        match &report.ladder {
            Some(ladder) => {
                for level in ladder.iter() {
                    println!("  {:<14} {:>12.2}", level.label.to_string(), level.price);
                }
            }
            None => println!("  {}", "unavailable".yellow()),
        }

        println!();
        println!(
            "{} (base {}, ATM {})",
            "Strike Price Band".cyan().bold(),
            report.band_base,
            report.atm_strike
        );
        println!(
            "  {:<13} {:>10} {:>9} {:>8} {:>9} {:>10}",
            "", "CE OI", "CE LTP", "Strike", "PE LTP", "PE OI"
        );
        for entry in &report.band {
            let r = &entry.record;
            let activity = match entry.activity {
                WriterActivity::CewExiting => entry.activity.to_string().green(),
                WriterActivity::CallWriters => entry.activity.to_string().red(),
            };
            let strike = if entry.in_range {
                r.strike.to_string().blue().bold()
            } else {
                r.strike.to_string().normal()
            };
            println!(
                "  {:<13} {:>10} {:>9} {:>8} {:>9} {:>10}",
                activity, r.call_open_interest, r.call_premium, strike, r.put_premium, r.put_open_interest
            );
        }

        if report.rows_dropped > 0 {
            println!(
                "{} Dropped {} of {} rows",
                "⚠".yellow(),
                report.rows_dropped,
                report.rows_total
            );
        }

        let bias = report
            .bias
            .percent
            .map(|p| format!("{}%", p))
            .unwrap_or_else(|| "undefined".to_string());
        println!(
            "{} CE OI: {}  Bias: {}  PE OI: {}",
            "ℹ".blue(),
            report.bias.totals.call_total,
            bias.yellow(),
            report.bias.totals.put_total
        );
    }

    fn print_day_log_row(row: &DayLogRow) {
        let bias = row
            .bias_percent
            .map(|p| format!("{}%", p))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{} {}  {}  {}  {}  {}",
            "⏱".yellow(),
            row.time.format("%H:%M:%S"),
            row.current,
            row.call_total,
            bias,
            row.put_total
        );
    }

    fn print_signal(signal: &TradeSignal) {
        println!();
        println!(
            "🔔 {} CE {} @ {} / PE {} @ {} (gap {}%) at {}",
            signal.shape.to_string().green().bold(),
            signal.call_strike,
            signal.call_premium,
            signal.put_strike,
            signal.put_premium,
            signal.premium_gap_percent,
            signal.timestamp.format("%H:%M")
        );
    }
}
