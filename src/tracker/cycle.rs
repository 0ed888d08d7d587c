use super::aggregator::BiasReading;
use super::band::{BandEntry, PriceGrid, band_base, select_band};
use super::config::{SLOW_CYCLE_THRESHOLD_MS, TrackerConfig};
use super::error::TrackerError;
use super::gann::{GannLadder, compute_ladder};
use super::models::{Market, MarketSnapshot};
use super::normalizer::normalize_rows;
use super::screener::{TradeSignal, atm_strike, screen};
use super::session::{SessionSummary, VixReading, parse_price, week_of_month};
use crate::utility::timing::Timer;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

/// Everything one refresh produces for the display layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub market: Market,
    pub timestamp: String,
    pub week: u32,
    pub session: SessionSummary,
    pub vix: Option<VixReading>,
    pub band_base: i64,
    pub atm_strike: i64,

    /// `None` when the open sits too close to the edge of the generated levels
    pub ladder: Option<GannLadder>,

    pub band: Vec<BandEntry>,
    pub bias: BiasReading,
    pub signal: Option<TradeSignal>,

    pub rows_total: usize,
    pub rows_dropped: usize,
}

/// Read a snapshot written by the fetch layer
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<MarketSnapshot> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse snapshot {}", path.display()))
}

/// One full pass over a snapshot: normalize, ladder, band, bias, screen.
///
/// Same snapshot and `now` always give the same report. Only unusable open or
/// current prices fail the cycle; a missing ladder or undefined bias is
/// reported inside the result.
pub fn run_cycle(
    snapshot: &MarketSnapshot,
    config: &TrackerConfig,
    now: DateTime<Local>,
) -> Result<CycleReport, TrackerError> {
    let _timer = Timer::start_with_threshold("refresh cycle", SLOW_CYCLE_THRESHOLD_MS);

    let open = parse_price("open", &snapshot.open)?;
    let current = parse_price("current", &snapshot.current)?;

    let invalid = |field: &'static str, value: &str| TrackerError::InvalidPrice {
        field,
        value: value.to_string(),
    };
    let base = band_base(open).ok_or_else(|| invalid("open", &snapshot.open))?;
    let atm = atm_strike(current).ok_or_else(|| invalid("current", &snapshot.current))?;

    let vix = match snapshot.vix.as_ref().map(VixReading::from_snapshot).transpose() {
        Ok(vix) => vix,
        Err(e) => {
            warn!(error = %e, "VIX unavailable");
            None
        }
    };

    let records = normalize_rows(&snapshot.rows, &config.columns);

    let ladder = open
        .to_f64()
        .ok_or_else(|| invalid("open", &snapshot.open))
        .and_then(compute_ladder);
    let ladder = match ladder {
        Ok(ladder) => Some(ladder),
        Err(e) => {
            warn!(error = %e, "Gann ladder unavailable");
            None
        }
    };

    let band = select_band(&PriceGrid::new(base), &records);
    let bias = BiasReading::from_band(&band);
    if bias.percent.is_none() {
        warn!(call_total = bias.totals.call_total, "Bias undefined for this cycle");
    }

    let signal = screen(atm, &records, config.percentage_threshold, now);

    info!(
        market = %snapshot.market,
        band = band.len(),
        bias = ?bias.percent,
        signal = ?signal.as_ref().map(|s| s.shape),
        "Cycle complete"
    );

    Ok(CycleReport {
        market: snapshot.market,
        timestamp: snapshot.timestamp.clone(),
        week: week_of_month(now.date_naive()),
        session: SessionSummary::new(open, current),
        vix,
        band_base: base,
        atm_strike: atm,
        ladder,
        band,
        bias,
        signal,
        rows_total: snapshot.rows.len(),
        rows_dropped: snapshot.rows.len() - records.len(),
    })
}
