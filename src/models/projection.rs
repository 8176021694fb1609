use serde::{Deserialize, Serialize};

/// Monetary and yield metrics derived from a points total.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Estimated airdrop payout in USD.
    pub est_value: f64,
    /// Equals `est_value`: the model assumes principal is always
    /// recoverable, so the whole payout counts as profit.
    pub net_profit: f64,
    /// Return on capital over the chosen duration, in percent.
    pub roi_pct: f64,
    /// ROI scaled to a 365-day basis, in percent.
    pub apy_pct: f64,
    /// User's slice of the projected network total, in percent.
    pub share_pct: f64,
    /// Projected network-wide points at the end of the duration.
    pub projected_global: f64,
}

/// Net-profit matrix over an FDV × duration cross product.
/// `net_profit[i][j]` holds the cell for `duration_axis[i]` and `fdv_axis[j]`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SensitivityGrid {
    pub fdv_axis: Vec<f64>,
    pub duration_axis: Vec<u32>,
    pub net_profit: Vec<Vec<f64>>,
}

impl SensitivityGrid {
    /// Smallest and largest cell values, used to scale color ramps.
    pub fn value_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for row in &self.net_profit {
            for &v in row {
                min = min.min(v);
                max = max.max(v);
            }
        }
        if min > max {
            (0.0, 0.0)
        } else {
            (min, max)
        }
    }
}
