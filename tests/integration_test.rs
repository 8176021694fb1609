use async_trait::async_trait;
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;

use approx::assert_relative_eq;
use standx_estimator::{
    accrual::AccrualEngine,
    config::Settings,
    models::{AccrualPeriod, EstimatorError, Result},
    network::{EstimateSource, GlobalPointsEstimator, PointsProvider},
    projection::{GrowthModel, ProjectionEngine},
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn engines() -> (AccrualEngine, ProjectionEngine) {
    let settings = Settings::default();
    (
        AccrualEngine::new(settings.campaign),
        ProjectionEngine::new(settings.projection.growth),
    )
}

#[test]
fn test_reference_scenario_end_to_end() {
    let (accrual, projection) = engines();

    // Start well inside the boost window so all 30 days accrue at 1.5x.
    let start = date(2025, 11, 1);
    let result = accrual.schedule(10_000.0, 30, false, start);
    assert_relative_eq!(result.total_points, 450_000.0, max_relative = 1e-12);

    let metrics = projection.project(
        result.total_points,
        30,
        10_000.0,
        1_000_000_000.0,
        5.0,
        500_000_000.0,
    );

    let projected = 500_000_000.0 * 1.015_f64.powi(30);
    assert_relative_eq!(metrics.projected_global, projected, max_relative = 1e-12);
    assert!((774_000_000.0..776_000_000.0).contains(&projected));

    assert!((29_000.0..29_100.0).contains(&metrics.est_value));
    assert_relative_eq!(metrics.net_profit, metrics.est_value, max_relative = 1e-12);
    assert!((0.28..0.30).contains(&metrics.roi_pct));
    assert!((3.4..3.6).contains(&metrics.apy_pct));
}

#[test]
fn test_schedule_invariants_across_durations() {
    let (accrual, _) = engines();
    let start = date(2025, 12, 1);

    for duration in 1u32..=90 {
        let result = accrual.schedule(2_500.0, duration, true, start);
        assert_eq!(result.schedule.len(), duration as usize);

        let mut running = 0.0;
        for (i, record) in result.schedule.iter().enumerate() {
            assert_eq!(record.day, i as u32 + 1);
            running += record.daily_points;
            assert_relative_eq!(record.cumulative_points, running, max_relative = 1e-9);
            if i > 0 {
                assert!(record.cumulative_points >= result.schedule[i - 1].cumulative_points);
            }
        }
        assert_relative_eq!(result.total_points, running, max_relative = 1e-9);
    }
}

#[test]
fn test_boost_cutoff_is_inclusive() {
    let settings = Settings::default();
    let cutoff = settings.campaign.boost_end_date;
    let accrual = AccrualEngine::new(settings.campaign);

    // A window starting on the cutoff day itself: day 1 boosted, rest base.
    let result = accrual.schedule(1_000.0, 3, false, cutoff);
    assert_eq!(result.schedule[0].period, AccrualPeriod::Boost);
    assert_eq!(result.schedule[1].period, AccrualPeriod::Base);
    assert_eq!(result.schedule[2].period, AccrualPeriod::Base);
    assert_eq!(result.boost_end_day(), Some(2));
}

#[test]
fn test_bonus_adds_flat_amount_per_day() {
    let (accrual, _) = engines();
    let start = date(2025, 12, 1);

    let plain = accrual.schedule(50_000.0, 60, false, start);
    let boosted = accrual.schedule(50_000.0, 60, true, start);

    for (a, b) in plain.schedule.iter().zip(&boosted.schedule) {
        assert_relative_eq!(b.daily_points - a.daily_points, 10.0, max_relative = 1e-9);
        assert_eq!(a.multiplier, b.multiplier);
    }
}

#[test]
fn test_degenerate_projection_inputs() {
    let (_, projection) = engines();

    let zeroed = projection.project(450_000.0, 30, 10_000.0, 1_000_000_000.0, 5.0, 0.0);
    assert_eq!(zeroed.share_pct, 0.0);
    assert_eq!(zeroed.est_value, 0.0);
    assert_eq!(zeroed.roi_pct, 0.0);
    assert_eq!(zeroed.apy_pct, 0.0);
}

#[test]
fn test_fdv_monotonicity() {
    let (_, projection) = engines();
    let mut last_value = 0.0;
    let mut last_roi = 0.0;

    for fdv in [1e8, 2.5e8, 5e8, 1e9, 2e9, 3e9] {
        let metrics = projection.project(450_000.0, 30, 10_000.0, fdv, 5.0, 500_000_000.0);
        assert!(metrics.est_value > last_value);
        assert!(metrics.roi_pct > last_roi);
        last_value = metrics.est_value;
        last_roi = metrics.roi_pct;
    }
}

#[test]
fn test_projected_network_grows_with_duration_in_both_models() {
    let models = [
        GrowthModel::Compound { daily_rate: 0.015 },
        GrowthModel::TieredDecay {
            early: 0.02,
            mid: 0.01,
            late: 0.005,
        },
    ];

    for growth in models {
        let projection = ProjectionEngine::new(growth);
        let mut last = 0.0;
        for days in [1u32, 15, 30, 45, 60, 75, 90] {
            let metrics =
                projection.project(450_000.0, days, 10_000.0, 1e9, 5.0, 500_000_000.0);
            assert!(metrics.projected_global > last);
            assert!(metrics.projected_global > 0.0);
            last = metrics.projected_global;
        }
    }
}

struct FailingProvider;

#[async_trait]
impl PointsProvider for FailingProvider {
    async fn fetch_estimate(&self) -> Result<f64> {
        Err(EstimatorError::MalformedResponse(
            "request timed out".to_string(),
        ))
    }
}

#[tokio::test]
async fn test_network_failure_falls_back_without_panicking() {
    let settings = Settings::default();
    let estimator = GlobalPointsEstimator::new(
        Arc::new(FailingProvider),
        Duration::from_secs(settings.api.cache_ttl_seconds),
        settings.api.fallback_global_points,
    );

    let estimate = estimator.current_estimate().await;
    assert_eq!(estimate.value, settings.api.fallback_global_points);
    assert_eq!(estimate.source, EstimateSource::Fallback);

    // The fallback still drives a usable end-to-end computation.
    let (accrual, projection) = engines();
    let result = accrual.schedule(10_000.0, 30, false, date(2025, 11, 1));
    let metrics = projection.project(result.total_points, 30, 10_000.0, 1e9, 5.0, estimate.value);
    assert!(metrics.est_value > 0.0);
}

#[test]
fn test_sensitivity_grid_covers_default_axes() {
    let settings = Settings::default();
    let accrual = AccrualEngine::new(settings.campaign.clone());
    let projection = ProjectionEngine::new(settings.projection.growth.clone());
    let sensitivity = &settings.projection.sensitivity;

    let grid = projection.sensitivity(
        &accrual,
        10_000.0,
        false,
        5.0,
        500_000_000.0,
        &sensitivity.fdv_axis(),
        &sensitivity.duration_axis(),
        date(2025, 11, 1),
    );

    assert_eq!(grid.duration_axis.len(), grid.net_profit.len());
    assert_eq!(grid.fdv_axis.len(), 10);
    assert!(grid
        .net_profit
        .iter()
        .all(|row| row.len() == grid.fdv_axis.len()));

    // Profit grows along the FDV axis in every row.
    for row in &grid.net_profit {
        assert!(row.windows(2).all(|w| w[1] > w[0]));
    }
}
