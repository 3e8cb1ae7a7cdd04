//! Simulated movement applied on every refresh cycle.
//!
//! Stock levels take a small random walk, category insights drift by bounded
//! noise, and the short-horizon forecast series is redrawn. All randomness
//! comes from the caller's `Rng` so cycles are reproducible under a seeded
//! generator.

use std::str::FromStr;

use chrono::{Days, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};

use stocksense_inventory::{CategoryInsight, FORECAST_HORIZON, ForecastPoint};

/// Largest absolute stock change per product per cycle.
pub const MAX_STOCK_STEP: i64 = 4;

/// Forecast points that also carry an observed value.
pub const ACTUAL_POINTS: usize = 3;

const FORECAST_BASE: u32 = 100;
const FORECAST_SPREAD: u32 = 50;

/// What category insights are perturbed from each cycle.
///
/// Neither option derives insights from the current product list; category
/// numbers are simulated independently of product-level numbers.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightBasis {
    /// Perturb last cycle's values (random walk; can drift over a long session).
    #[default]
    Previous,
    /// Perturb the seed values every cycle (bounded noise around the seed).
    Baseline,
}

impl FromStr for InsightBasis {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "previous" => Ok(Self::Previous),
            "baseline" => Ok(Self::Baseline),
            other => Err(format!("expected `previous` or `baseline`, got `{other}`")),
        }
    }
}

/// Random stock change in `-MAX_STOCK_STEP..=MAX_STOCK_STEP`.
pub fn stock_delta<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    let magnitude = rng.gen_range(0..=MAX_STOCK_STEP);
    if rng.gen_bool(0.5) { magnitude } else { -magnitude }
}

/// Apply a delta to a stock level, flooring at 0.
pub fn apply_delta(stock: u32, delta: i64) -> u32 {
    (i64::from(stock) + delta).clamp(0, i64::from(u32::MAX)) as u32
}

/// Perturb each insight's totals: stock by `-25..=24`, demand by `-10..=9`.
pub fn perturb_insights<R: Rng + ?Sized>(rng: &mut R, from: &[CategoryInsight]) -> Vec<CategoryInsight> {
    from.iter()
        .map(|insight| {
            let stock = apply_delta(insight.total_stock, rng.gen_range(-25..25));
            let demand = apply_delta(insight.average_demand, rng.gen_range(-10..10));
            insight.with_totals(stock, demand)
        })
        .collect()
}

/// Fresh `FORECAST_HORIZON`-day series starting at `today`.
///
/// Every point gets a predicted value in `[100, 149]`; the first
/// `ACTUAL_POINTS` also get an observed value from the same range.
pub fn forecast_series<R: Rng + ?Sized>(rng: &mut R, today: NaiveDate) -> Vec<ForecastPoint> {
    (0..FORECAST_HORIZON)
        .map(|i| ForecastPoint {
            date: today
                .checked_add_days(Days::new(i as u64))
                .unwrap_or(today),
            predicted: FORECAST_BASE + rng.gen_range(0..FORECAST_SPREAD),
            actual: (i < ACTUAL_POINTS).then(|| FORECAST_BASE + rng.gen_range(0..FORECAST_SPREAD)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn stock_deltas_stay_within_step() {
        let mut rng = StdRng::seed_from_u64(1);
        let deltas: Vec<i64> = (0..2000).map(|_| stock_delta(&mut rng)).collect();
        assert!(deltas.iter().all(|d| d.abs() <= MAX_STOCK_STEP));
        // Both directions occur.
        assert!(deltas.iter().any(|d| *d > 0));
        assert!(deltas.iter().any(|d| *d < 0));
    }

    #[test]
    fn stock_never_goes_negative() {
        assert_eq!(apply_delta(2, -4), 0);
        assert_eq!(apply_delta(0, -1), 0);
        assert_eq!(apply_delta(10, 3), 13);
    }

    #[test]
    fn insight_perturbation_is_bounded_and_keeps_risk() {
        let base = vec![
            CategoryInsight::new("Produce", 3500, 3200, 0.15).unwrap(),
            CategoryInsight::new("Tiny", 5, 3, 0.5).unwrap(),
        ];
        let mut rng = StdRng::seed_from_u64(2);

        for _ in 0..500 {
            let next = perturb_insights(&mut rng, &base);
            let stock_step = i64::from(next[0].total_stock) - 3500;
            let demand_step = i64::from(next[0].average_demand) - 3200;
            assert!((-25..25).contains(&stock_step));
            assert!((-10..10).contains(&demand_step));
            assert_eq!(next[0].wastage_risk, 0.15);
            assert_eq!(next[1].category, "Tiny");
        }
    }

    #[test]
    fn forecast_has_seven_days_and_three_actuals() {
        let mut rng = StdRng::seed_from_u64(3);
        let series = forecast_series(&mut rng, today());

        assert_eq!(series.len(), FORECAST_HORIZON);
        assert_eq!(series[0].date, today());
        assert_eq!(series[6].date, NaiveDate::from_ymd_opt(2026, 10, 25).unwrap());
        for (i, point) in series.iter().enumerate() {
            assert!((100..150).contains(&point.predicted));
            assert_eq!(point.actual.is_some(), i < ACTUAL_POINTS);
            if let Some(actual) = point.actual {
                assert!((100..150).contains(&actual));
            }
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let a = forecast_series(&mut StdRng::seed_from_u64(9), today());
        let b = forecast_series(&mut StdRng::seed_from_u64(9), today());
        assert_eq!(a, b);
    }

    #[test]
    fn insight_basis_parses_case_insensitively() {
        assert_eq!("Baseline".parse::<InsightBasis>().unwrap(), InsightBasis::Baseline);
        assert_eq!("previous".parse::<InsightBasis>().unwrap(), InsightBasis::Previous);
        assert!("derived".parse::<InsightBasis>().is_err());
    }
}
