use anyhow::Result;
use colored::Colorize;
use nse_market_tracker::app_config::AppConfig;
use nse_market_tracker::logging;
use nse_market_tracker::tracker::{TrackerCommands, config::SUPPORTED_INDICES};

#[tokio::main]
async fn main() -> Result<()> {
    logging::init_logging()?;

    let app = AppConfig::from_env();

    // JSON output stays machine-readable
    if app.mode != "json" {
        println!("{}", "=".repeat(60).blue());
        println!("{}", "NSE Day Market Tracker".green().bold());
        println!("{}", "=".repeat(60).blue());
        app.log_config();
    }

    if let Err(e) = app.validate() {
        eprintln!("{} {}", "✗".red(), e);
        eprintln!("Set TRACKER_MODE and TRACKER_SNAPSHOT to control execution");
        eprintln!(
            "Supported indices: {}",
            SUPPORTED_INDICES
                .iter()
                .map(|m| m.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
        eprintln!("Examples:");
        eprintln!("  TRACKER_MODE=once cargo run                          # One refresh, rendered");
        eprintln!("  TRACKER_MODE=json cargo run                          # One refresh as JSON");
        eprintln!("  TRACKER_MODE=watch TRACKER_REFRESH_SECS=5 cargo run  # Refresh until Ctrl-C");
        std::process::exit(1);
    }

    match app.mode.as_str() {
        "watch" => {
            TrackerCommands::run_watch(&app).await?;
        }
        "json" => TrackerCommands::run_json(&app).await?,
        _ => TrackerCommands::run_once(&app).await?,
    }

    Ok(())
}
