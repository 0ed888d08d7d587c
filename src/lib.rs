pub mod app_config;
pub mod logging;
pub mod tracker;
pub mod utility;

// Re-exports for convenience
pub use tracker::{
    BandEntry, BiasReading, CycleReport, GannLadder, MarketSnapshot, StrikeRecord, TradeSignal,
    TrackerConfig, TrackerError, run_cycle,
};
