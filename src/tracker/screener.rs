use super::config::{ATM_ROUND_UP_REMAINDER, STRIKE_STEP};
use super::models::StrikeRecord;
use chrono::{DateTime, Local};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Short-options shapes, in the order they are tried
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StrategyShape {
    Straddle,
    NearStrangle,
    FarStrangle,
}

impl StrategyShape {
    pub const ALL: [StrategyShape; 3] = [
        StrategyShape::Straddle,
        StrategyShape::NearStrangle,
        StrategyShape::FarStrangle,
    ];

    /// (call strike, put strike) for this shape around the ATM strike
    pub fn strikes(&self, atm: i64) -> (i64, i64) {
        let width = match self {
            StrategyShape::Straddle => 0,
            StrategyShape::NearStrangle => STRIKE_STEP,
            StrategyShape::FarStrangle => 2 * STRIKE_STEP,
        };
        (atm + width, atm - width)
    }
}

impl fmt::Display for StrategyShape {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StrategyShape::Straddle => write!(f, "STRADDLE"),
            StrategyShape::NearStrangle => write!(f, "NEAR STRANGLE"),
            StrategyShape::FarStrangle => write!(f, "FAR STRANGLE"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeSignal {
    pub shape: StrategyShape,
    pub call_strike: i64,
    pub put_strike: i64,
    pub call_premium: Decimal,
    pub put_premium: Decimal,
    pub premium_gap_percent: Decimal,
    pub timestamp: DateTime<Local>,
}

/// ATM strike from the current index value: the whole part rounded down to
/// the strike step, bumped one step up when the remainder is past half.
pub fn atm_strike(current: Decimal) -> Option<i64> {
    let close = current.trunc().to_i64()?;
    let remainder = close.rem_euclid(STRIKE_STEP);
    let atm = close - remainder;

    if remainder > ATM_ROUND_UP_REMAINDER {
        Some(atm + STRIKE_STEP)
    } else {
        Some(atm)
    }
}

/// How far the larger premium sits above the smaller, in percent of the
/// smaller one (2 dp). A zero smaller premium counts as 1.
pub fn percentage_difference(ce: Decimal, pe: Decimal) -> Decimal {
    let (big, mut small) = if ce > pe { (ce, pe) } else { (pe, ce) };
    let increase = big - small;
    if small.is_zero() {
        small = Decimal::ONE;
    }
    (increase / small * Decimal::ONE_HUNDRED).round_dp(2)
}

/// Scan forward for the call premium at `call_strike` and the put premium at
/// `put_strike`, stopping once both are seen. First occurrence per side wins.
pub fn find_premium_pair(
    records: &[StrikeRecord],
    call_strike: i64,
    put_strike: i64,
) -> Option<(Decimal, Decimal)> {
    let mut ce = None;
    let mut pe = None;

    for record in records {
        if ce.is_none() && record.strike == call_strike {
            ce = Some(record.call_premium);
        }
        if pe.is_none() && record.strike == put_strike {
            pe = Some(record.put_premium);
        }
        if let (Some(ce), Some(pe)) = (ce, pe) {
            return Some((ce, pe));
        }
    }

    None
}

/// Try each shape in turn and return the first whose premiums are balanced
/// within `threshold` percent. `None` means no shape qualified.
pub fn screen(
    atm: i64,
    records: &[StrikeRecord],
    threshold: Decimal,
    now: DateTime<Local>,
) -> Option<TradeSignal> {
    for shape in StrategyShape::ALL {
        let (call_strike, put_strike) = shape.strikes(atm);

        let Some((call_premium, put_premium)) = find_premium_pair(records, call_strike, put_strike)
        else {
            debug!(%shape, call_strike, put_strike, "Strikes not found");
            continue;
        };

        let gap = percentage_difference(call_premium, put_premium);
        if gap <= threshold {
            debug!(%shape, %gap, "Strategy matched");
            return Some(TradeSignal {
                shape,
                call_strike,
                put_strike,
                call_premium,
                put_premium,
                premium_gap_percent: gap,
                timestamp: now,
            });
        }

        debug!(%shape, %gap, %threshold, "Premiums not balanced");
    }

    None
}
