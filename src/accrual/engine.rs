use chrono::{Duration, NaiveDate};

use crate::config::CampaignSettings;
use crate::models::{AccrualPeriod, AccrualResult, DailyRecord};

/// Builds the day-by-day points schedule from the campaign rules.
///
/// Deterministic given its inputs: the caller supplies the start date, so
/// "today" is pinned at the edge (CLI and TUI pass `Utc::now().date_naive()`,
/// tests pass a fixed date).
pub struct AccrualEngine {
    campaign: CampaignSettings,
}

impl AccrualEngine {
    pub fn new(campaign: CampaignSettings) -> Self {
        Self { campaign }
    }

    pub fn campaign(&self) -> &CampaignSettings {
        &self.campaign
    }

    /// Computes the full schedule. Days on or before the boost cutoff accrue
    /// at the boosted rate, later days at the base rate; the activity bonus
    /// is a flat addition on top of the rate component.
    pub fn schedule(
        &self,
        capital: f64,
        duration_days: u32,
        active_bonus: bool,
        start_date: NaiveDate,
    ) -> AccrualResult {
        let mut schedule = Vec::with_capacity(duration_days as usize);
        let mut total_points = 0.0;

        for offset in 0..duration_days {
            let date = start_date + Duration::days(offset as i64);

            let (multiplier, period) = if date <= self.campaign.boost_end_date {
                (self.campaign.boost_rate, AccrualPeriod::Boost)
            } else {
                (self.campaign.base_rate, AccrualPeriod::Base)
            };

            let mut daily_points = capital * multiplier;
            if active_bonus {
                daily_points += self.campaign.daily_bonus;
            }

            total_points += daily_points;
            schedule.push(DailyRecord {
                day: offset + 1,
                date,
                multiplier,
                period,
                daily_points,
                cumulative_points: total_points,
            });
        }

        AccrualResult {
            total_points,
            schedule,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn campaign() -> CampaignSettings {
        CampaignSettings {
            boost_rate: 1.5,
            base_rate: 1.2,
            daily_bonus: 10.0,
            boost_end_date: NaiveDate::from_ymd_opt(2025, 12, 11).unwrap(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_schedule_shape() {
        let engine = AccrualEngine::new(campaign());

        for duration in [1u32, 7, 30, 90] {
            let result = engine.schedule(10_000.0, duration, false, date(2025, 11, 1));
            assert_eq!(result.schedule.len(), duration as usize);
            for (i, record) in result.schedule.iter().enumerate() {
                assert_eq!(record.day, i as u32 + 1);
            }
        }
    }

    #[test]
    fn test_cumulative_is_running_sum() {
        let engine = AccrualEngine::new(campaign());
        let result = engine.schedule(5_000.0, 45, true, date(2025, 12, 1));

        let mut running = 0.0;
        for record in &result.schedule {
            running += record.daily_points;
            assert_relative_eq!(record.cumulative_points, running, max_relative = 1e-12);
        }
        assert_relative_eq!(result.total_points, running, max_relative = 1e-12);
    }

    #[test]
    fn test_boost_cutoff_boundary() {
        let engine = AccrualEngine::new(campaign());
        // Start two days before the cutoff: days 1-3 are boosted (the cutoff
        // day itself included), day 4 is the first base day.
        let result = engine.schedule(1_000.0, 5, false, date(2025, 12, 9));

        let periods: Vec<_> = result.schedule.iter().map(|r| r.period).collect();
        assert_eq!(
            periods,
            vec![
                AccrualPeriod::Boost,
                AccrualPeriod::Boost,
                AccrualPeriod::Boost,
                AccrualPeriod::Base,
                AccrualPeriod::Base,
            ]
        );
        assert_eq!(result.schedule[2].multiplier, 1.5);
        assert_eq!(result.schedule[3].multiplier, 1.2);
        assert_eq!(result.boost_end_day(), Some(4));
    }

    #[test]
    fn test_fully_boosted_window_has_no_end_marker() {
        let engine = AccrualEngine::new(campaign());
        let result = engine.schedule(1_000.0, 10, false, date(2025, 11, 1));
        assert!(result.boost_end_day().is_none());
    }

    #[test]
    fn test_bonus_is_flat_per_day() {
        let engine = AccrualEngine::new(campaign());
        let start = date(2025, 12, 5);

        let without = engine.schedule(10_000.0, 20, false, start);
        let with = engine.schedule(10_000.0, 20, true, start);

        for (a, b) in without.schedule.iter().zip(&with.schedule) {
            assert_relative_eq!(b.daily_points - a.daily_points, 10.0, max_relative = 1e-12);
            assert_eq!(a.multiplier, b.multiplier);
        }
        assert_relative_eq!(
            with.total_points - without.total_points,
            200.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_zero_duration() {
        let engine = AccrualEngine::new(campaign());
        let result = engine.schedule(10_000.0, 0, true, date(2025, 11, 1));
        assert!(result.schedule.is_empty());
        assert_eq!(result.total_points, 0.0);
    }

    #[test]
    fn test_zero_capital_accrues_only_bonus() {
        let engine = AccrualEngine::new(campaign());
        let result = engine.schedule(0.0, 10, true, date(2025, 11, 1));
        assert_relative_eq!(result.total_points, 100.0, max_relative = 1e-12);

        let no_bonus = engine.schedule(0.0, 10, false, date(2025, 11, 1));
        assert_eq!(no_bonus.total_points, 0.0);
    }
}
