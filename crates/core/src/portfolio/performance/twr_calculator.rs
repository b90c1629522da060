//! Chain-linked time-weighted return.
//!
//! Daily returns are computed net of that day's cash flow and multiplied
//! together in date order. Each point depends on the previous one, so the
//! chain is strictly sequential.

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::{DailyCashFlow, TwrPoint};
use crate::portfolio::valuation::DailyPortfolioValue;

const HUNDRED: Decimal = dec!(100);

/// Parameters of the TWR chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TwrOptions {
    /// Daily returns with an absolute value above this are clamped to zero.
    pub outlier_threshold: Decimal,
    /// Decimal places kept on emitted percentages.
    pub precision: u32,
}

/// Lifecycle of a [`TwrChain`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwrState {
    Uninitialized,
    Seeded,
    Accumulating,
    Done,
}

/// Return of one day, net of the day's cash flow.
///
/// * `prev > 0`: `(curr - cash_flow) / prev - 1`, clamped to zero when it
///   cannot be represented or its magnitude exceeds `outlier_threshold`.
/// * otherwise zero. With nothing invested the day before there is no
///   performance to measure, and a first contribution is not a return.
pub fn daily_return(
    prev: Decimal,
    curr: Decimal,
    cash_flow: Decimal,
    outlier_threshold: Decimal,
) -> Decimal {
    if prev <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let ratio = curr
        .checked_sub(cash_flow)
        .and_then(|net| net.checked_div(prev))
        .and_then(|r| r.checked_sub(Decimal::ONE));

    match ratio {
        Some(r) if r.abs() <= outlier_threshold => r,
        Some(r) => {
            debug!(
                "Daily return {} exceeds ±{} (prev {}, curr {}, flow {}). Clamped to zero.",
                r, outlier_threshold, prev, curr, cash_flow
            );
            Decimal::ZERO
        }
        None => {
            warn!(
                "Daily return not representable (prev {}, curr {}, flow {}). Clamped to zero.",
                prev, curr, cash_flow
            );
            Decimal::ZERO
        }
    }
}

/// Incremental TWR accumulator.
///
/// The first pushed value seeds the chain at `0 %`; every following value
/// extends it by one day.
#[derive(Debug, Clone)]
pub struct TwrChain {
    options: TwrOptions,
    state: TwrState,
    cumulative: Decimal,
    cumulative_percent: Decimal,
    previous_value: Decimal,
}

impl TwrChain {
    pub fn new(options: TwrOptions) -> Self {
        Self {
            options,
            state: TwrState::Uninitialized,
            cumulative: Decimal::ONE,
            cumulative_percent: Decimal::ZERO,
            previous_value: Decimal::ZERO,
        }
    }

    pub fn state(&self) -> TwrState {
        self.state
    }

    /// Adds the next day. Returns `None` once the chain is finished.
    pub fn push(&mut self, point: &DailyPortfolioValue, cash_flow: Decimal) -> Option<TwrPoint> {
        let daily = match self.state {
            TwrState::Done => return None,
            TwrState::Uninitialized => {
                self.state = TwrState::Seeded;
                self.cumulative = Decimal::ONE;
                Decimal::ZERO
            }
            TwrState::Seeded | TwrState::Accumulating => {
                self.state = TwrState::Accumulating;
                daily_return(
                    self.previous_value,
                    point.value,
                    cash_flow,
                    self.options.outlier_threshold,
                )
            }
        };

        let next = Decimal::ONE
            .checked_add(daily)
            .and_then(|growth| self.cumulative.checked_mul(growth))
            .and_then(|cumulative| {
                cumulative
                    .checked_sub(Decimal::ONE)
                    .and_then(|gain| gain.checked_mul(HUNDRED))
                    .map(|percent| (cumulative, percent))
            });
        match next {
            Some((cumulative, percent)) => {
                self.cumulative = cumulative;
                self.cumulative_percent = percent.round_dp(self.options.precision);
            }
            None => warn!(
                "Cumulative return overflowed on {}. Day treated as flat.",
                point.date
            ),
        }
        self.previous_value = point.value;

        Some(TwrPoint {
            date: point.date,
            value: self.cumulative_percent,
        })
    }

    /// Closes the chain. Further pushes are ignored.
    pub fn finish(&mut self) {
        self.state = TwrState::Done;
    }
}

/// Runs the whole TWR chain over a value series sorted by date.
///
/// The first point is always `0`. An empty series gives an empty result.
pub fn calculate_twr(
    values: &[DailyPortfolioValue],
    cash_flows: &DailyCashFlow,
    options: TwrOptions,
) -> Vec<TwrPoint> {
    let mut chain = TwrChain::new(options);
    let mut points = Vec::with_capacity(values.len());

    for (index, value) in values.iter().enumerate() {
        // the seed day's flow is already inside its value
        let cash_flow = if index == 0 {
            Decimal::ZERO
        } else {
            cash_flows.on(value.date)
        };
        if let Some(point) = chain.push(value, cash_flow) {
            points.push(point);
        }
    }
    chain.finish();

    points
}
