use serde::{Deserialize, Serialize};

/// Network-wide points growth model. Selects the daily inflation rate for a
/// given elapsed day; the projection multiplies the factors day by day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GrowthModel {
    /// Single fixed daily rate compounded over the whole window.
    Compound { daily_rate: f64 },
    /// Rate steps down as the campaign ages: `early` for days 1-30,
    /// `mid` for days 31-60, `late` beyond that.
    TieredDecay { early: f64, mid: f64, late: f64 },
}

impl Default for GrowthModel {
    fn default() -> Self {
        GrowthModel::Compound { daily_rate: 0.015 }
    }
}

impl GrowthModel {
    /// Inflation rate applied on the given elapsed day (1-based).
    pub fn daily_rate(&self, day: u32) -> f64 {
        match self {
            GrowthModel::Compound { daily_rate } => *daily_rate,
            GrowthModel::TieredDecay { early, mid, late } => match day {
                1..=30 => *early,
                31..=60 => *mid,
                _ => *late,
            },
        }
    }

    /// Projects `current` forward by `days`, compounding one factor per day.
    pub fn project(&self, current: f64, days: u32) -> f64 {
        match self {
            GrowthModel::Compound { daily_rate } => {
                current * (1.0 + daily_rate).powi(days as i32)
            }
            GrowthModel::TieredDecay { .. } => (1..=days)
                .fold(current, |total, day| total * (1.0 + self.daily_rate(day))),
        }
    }

    /// All rates the model can produce, for config validation.
    pub fn rates(&self) -> Vec<f64> {
        match self {
            GrowthModel::Compound { daily_rate } => vec![*daily_rate],
            GrowthModel::TieredDecay { early, mid, late } => vec![*early, *mid, *late],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_compound_matches_closed_form() {
        let model = GrowthModel::Compound { daily_rate: 0.015 };
        let projected = model.project(500_000_000.0, 30);
        assert_relative_eq!(
            projected,
            500_000_000.0 * 1.015_f64.powi(30),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_tiered_rate_boundaries() {
        let model = GrowthModel::TieredDecay {
            early: 0.02,
            mid: 0.01,
            late: 0.005,
        };
        assert_eq!(model.daily_rate(1), 0.02);
        assert_eq!(model.daily_rate(30), 0.02);
        assert_eq!(model.daily_rate(31), 0.01);
        assert_eq!(model.daily_rate(60), 0.01);
        assert_eq!(model.daily_rate(61), 0.005);
        assert_eq!(model.daily_rate(90), 0.005);
    }

    #[test]
    fn test_tiered_projection_compounds_per_tier() {
        let model = GrowthModel::TieredDecay {
            early: 0.02,
            mid: 0.01,
            late: 0.005,
        };
        let projected = model.project(1_000_000.0, 65);
        let expected = 1_000_000.0
            * 1.02_f64.powi(30)
            * 1.01_f64.powi(30)
            * 1.005_f64.powi(5);
        assert_relative_eq!(projected, expected, max_relative = 1e-12);
    }

    #[test]
    fn test_projection_monotone_in_duration() {
        for model in [
            GrowthModel::Compound { daily_rate: 0.015 },
            GrowthModel::TieredDecay {
                early: 0.02,
                mid: 0.01,
                late: 0.005,
            },
        ] {
            let mut last = model.project(1_000.0, 0);
            assert_eq!(last, 1_000.0);
            for days in 1..=90 {
                let next = model.project(1_000.0, days);
                assert!(next >= last, "projection shrank at day {}", days);
                last = next;
            }
        }
    }

    #[test]
    fn test_zero_days_is_identity() {
        let model = GrowthModel::default();
        assert_eq!(model.project(42.0, 0), 42.0);
    }
}
