pub mod aggregator;
pub mod band;
pub mod config;
pub mod cycle;
pub mod day_log;
pub mod error;
pub mod gann;
pub mod models;
pub mod normalizer;
pub mod screener;
pub mod session;
pub mod tracker_commands;

// Re-exports (public API)
pub use aggregator::{BiasReading, OpenInterestTotals, aggregate_open_interest};
pub use band::{BandEntry, PriceGrid, WriterActivity, band_base, select_band};
pub use config::{ColumnMap, TrackerConfig};
pub use cycle::{CycleReport, load_snapshot, run_cycle};
pub use day_log::{DayLog, DayLogRow};
pub use error::TrackerError;
pub use gann::{GannLabel, GannLadder, GannLevel, compute_ladder, square_of_nine_levels};
pub use models::{Direction, Market, MarketSnapshot, StrikeRecord, VixSnapshot};
pub use normalizer::{normalize_row, normalize_rows};
pub use screener::{
    StrategyShape, TradeSignal, atm_strike, find_premium_pair, percentage_difference, screen,
};
pub use session::{SessionSummary, VixReading, week_of_month};
pub use tracker_commands::TrackerCommands;
