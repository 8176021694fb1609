use chrono::NaiveDate;

use crate::accrual::AccrualEngine;
use crate::models::{ProjectionResult, SensitivityGrid};
use crate::projection::GrowthModel;

/// Turns a points total into monetary and yield metrics against a projected
/// network-wide pool.
pub struct ProjectionEngine {
    growth: GrowthModel,
}

impl ProjectionEngine {
    pub fn new(growth: GrowthModel) -> Self {
        Self { growth }
    }

    pub fn growth(&self) -> &GrowthModel {
        &self.growth
    }

    /// Core derivation. Division-by-zero cases resolve to 0 rather than
    /// raising; inputs are otherwise assumed to be range-checked upstream.
    pub fn project(
        &self,
        my_points: f64,
        duration_days: u32,
        capital: f64,
        fdv: f64,
        airdrop_pct: f64,
        current_global_points: f64,
    ) -> ProjectionResult {
        let projected_global = self.growth.project(current_global_points, duration_days);

        let my_share = if projected_global > 0.0 {
            my_points / projected_global
        } else {
            0.0
        };

        let est_value = fdv * (airdrop_pct / 100.0) * my_share;

        // Principal is assumed fully recoverable, so the airdrop value is
        // the whole profit.
        let net_profit = est_value;

        let roi_pct = if capital > 0.0 {
            est_value / capital * 100.0
        } else {
            0.0
        };

        let apy_pct = if duration_days > 0 {
            roi_pct / duration_days as f64 * 365.0
        } else {
            0.0
        };

        ProjectionResult {
            est_value,
            net_profit,
            roi_pct,
            apy_pct,
            share_pct: my_share * 100.0,
            projected_global,
        }
    }

    /// Net profit over every FDV × duration combination. Each cell reruns
    /// the full accrual + projection pipeline for its duration.
    pub fn sensitivity(
        &self,
        accrual: &AccrualEngine,
        capital: f64,
        active_bonus: bool,
        airdrop_pct: f64,
        current_global_points: f64,
        fdv_axis: &[f64],
        duration_axis: &[u32],
        start_date: NaiveDate,
    ) -> SensitivityGrid {
        let mut net_profit = Vec::with_capacity(duration_axis.len());

        for &days in duration_axis {
            let points = accrual
                .schedule(capital, days, active_bonus, start_date)
                .total_points;

            let row = fdv_axis
                .iter()
                .map(|&fdv| {
                    self.project(
                        points,
                        days,
                        capital,
                        fdv,
                        airdrop_pct,
                        current_global_points,
                    )
                    .net_profit
                })
                .collect();
            net_profit.push(row);
        }

        SensitivityGrid {
            fdv_axis: fdv_axis.to_vec(),
            duration_axis: duration_axis.to_vec(),
            net_profit,
        }
    }
}
