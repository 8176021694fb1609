use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Which accrual phase a calendar day falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccrualPeriod {
    Boost,
    Base,
}

impl AccrualPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccrualPeriod::Boost => "Boost",
            AccrualPeriod::Base => "Base",
        }
    }
}

/// One day of the points schedule. Day indices are 1-based.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyRecord {
    pub day: u32,
    pub date: NaiveDate,
    pub multiplier: f64,
    pub period: AccrualPeriod,
    pub daily_points: f64,
    pub cumulative_points: f64,
}

/// Full accrual outcome for one set of inputs. Recomputed from scratch on
/// every parameter change, never mutated in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccrualResult {
    pub total_points: f64,
    pub schedule: Vec<DailyRecord>,
}

impl AccrualResult {
    /// First day index accruing at the base rate, i.e. the day the boost
    /// multiplier expires. None when the whole window is boosted.
    pub fn boost_end_day(&self) -> Option<u32> {
        self.schedule
            .iter()
            .find(|r| r.period == AccrualPeriod::Base)
            .map(|r| r.day)
    }

    /// (day, cumulative points) pairs for chart datasets.
    pub fn cumulative_series(&self) -> Vec<(f64, f64)> {
        self.schedule
            .iter()
            .map(|r| (r.day as f64, r.cumulative_points))
            .collect()
    }
}
