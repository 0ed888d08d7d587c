use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Market {
    #[serde(rename = "NIFTY")]
    Nifty,

    #[serde(rename = "BANKNIFTY", alias = "Bank NIFTY")]
    BankNifty,
}

impl fmt::Display for Market {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Market::Nifty => write!(f, "NIFTY"),
            Market::BankNifty => write!(f, "Bank NIFTY"),
        }
    }
}

/// One refresh worth of market data, as handed over by the fetch layer.
/// Prices stay as the source printed them (thousands separators included).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub market: Market,

    pub timestamp: String,

    pub open: String,

    #[serde(alias = "ltp")]
    pub current: String,

    #[serde(default)]
    pub vix: Option<VixSnapshot>,

    /// Options-chain rows, already split into cell text
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VixSnapshot {
    #[serde(rename = "CURRENT_PRICE")]
    pub current: String,

    #[serde(rename = "PREV_CLOSE")]
    pub prev_close: String,
}

/// Normalized options-chain row for a single strike
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrikeRecord {
    #[serde(rename = "strikePrice")]
    pub strike: i64,

    #[serde(rename = "callPremium")]
    pub call_premium: Decimal,

    #[serde(rename = "callOpenInterest")]
    pub call_open_interest: i64,

    #[serde(rename = "putPremium")]
    pub put_premium: Decimal,

    #[serde(rename = "putOpenInterest")]
    pub put_open_interest: i64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    /// Flat counts as up, the way the tracker colors an unchanged index
    pub fn between<T: PartialOrd>(reference: T, value: T) -> Self {
        if value >= reference {
            Direction::Up
        } else {
            Direction::Down
        }
    }
}
