use chrono::NaiveDate;

use crate::accrual::AccrualEngine;
use crate::config::{InputSettings, SensitivitySettings, Settings};
use crate::models::{AccrualResult, ProjectionResult, SensitivityGrid};
use crate::network::PointsEstimate;
use crate::projection::ProjectionEngine;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Breakdown,
}

/// Input fields in focus order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Capital,
    Days,
    ActiveBonus,
    Fdv,
    AirdropPct,
}

impl Field {
    pub fn next(self) -> Self {
        match self {
            Field::Capital => Field::Days,
            Field::Days => Field::ActiveBonus,
            Field::ActiveBonus => Field::Fdv,
            Field::Fdv => Field::AirdropPct,
            Field::AirdropPct => Field::Capital,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Field::Capital => Field::AirdropPct,
            Field::Days => Field::Capital,
            Field::ActiveBonus => Field::Days,
            Field::Fdv => Field::ActiveBonus,
            Field::AirdropPct => Field::Fdv,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::Capital => "Capital (DUSD)",
            Field::Days => "Duration (days)",
            Field::ActiveBonus => "Daily task bonus",
            Field::Fdv => "Expected FDV",
            Field::AirdropPct => "Airdrop share (%)",
        }
    }
}

pub struct App {
    pub screen: Screen,
    pub focus: Field,
    pub capital: f64,
    pub days: u32,
    pub active_bonus: bool,
    pub fdv_index: usize,
    pub airdrop_pct: f64,
    pub bounds: InputSettings,
    pub start_date: NaiveDate,
    pub estimate: PointsEstimate,
    pub accrual: AccrualResult,
    pub metrics: ProjectionResult,
    pub grid: SensitivityGrid,
    pub breakdown_scroll: usize,
    pub refreshing: bool,
    pub should_quit: bool,
    accrual_engine: AccrualEngine,
    projection_engine: ProjectionEngine,
    sensitivity: SensitivitySettings,
}

impl App {
    pub fn new(settings: &Settings, estimate: PointsEstimate, start_date: NaiveDate) -> Self {
        let mut app = Self {
            screen: Screen::Dashboard,
            focus: Field::Capital,
            capital: settings.inputs.default_capital,
            days: settings.inputs.default_days,
            active_bonus: false,
            fdv_index: settings.inputs.default_fdv_index,
            airdrop_pct: settings.inputs.default_airdrop_pct,
            bounds: settings.inputs.clone(),
            start_date,
            estimate,
            accrual: AccrualResult::default(),
            metrics: ProjectionResult::default(),
            grid: SensitivityGrid::default(),
            breakdown_scroll: 0,
            refreshing: false,
            should_quit: false,
            accrual_engine: AccrualEngine::new(settings.campaign.clone()),
            projection_engine: ProjectionEngine::new(settings.projection.growth.clone()),
            sensitivity: settings.projection.sensitivity.clone(),
        };
        app.recompute();
        app
    }

    pub fn fdv(&self) -> f64 {
        self.bounds.fdv_presets[self.fdv_index]
    }

    pub fn daily_bonus(&self) -> f64 {
        self.accrual_engine.campaign().daily_bonus
    }

    /// Reruns both engines and the sensitivity grid. Called after every
    /// parameter change.
    pub fn recompute(&mut self) {
        self.accrual =
            self.accrual_engine
                .schedule(self.capital, self.days, self.active_bonus, self.start_date);
        self.metrics = self.projection_engine.project(
            self.accrual.total_points,
            self.days,
            self.capital,
            self.fdv(),
            self.airdrop_pct,
            self.estimate.value,
        );
        self.grid = self.projection_engine.sensitivity(
            &self.accrual_engine,
            self.capital,
            self.active_bonus,
            self.airdrop_pct,
            self.estimate.value,
            &self.sensitivity.fdv_axis(),
            &self.sensitivity.duration_axis(),
            self.start_date,
        );
        self.breakdown_scroll = self
            .breakdown_scroll
            .min(self.accrual.schedule.len().saturating_sub(1));
    }

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn increment(&mut self) {
        match self.focus {
            Field::Capital => {
                self.capital =
                    (self.capital + self.bounds.capital_step).min(self.bounds.max_capital);
            }
            Field::Days => {
                self.days = (self.days + 1).min(self.bounds.max_days);
            }
            Field::ActiveBonus => {
                self.active_bonus = !self.active_bonus;
            }
            Field::Fdv => {
                if self.fdv_index + 1 < self.bounds.fdv_presets.len() {
                    self.fdv_index += 1;
                }
            }
            Field::AirdropPct => {
                self.airdrop_pct = (self.airdrop_pct + self.bounds.airdrop_pct_step)
                    .min(self.bounds.max_airdrop_pct);
            }
        }
        self.recompute();
    }

    pub fn decrement(&mut self) {
        match self.focus {
            Field::Capital => {
                self.capital =
                    (self.capital - self.bounds.capital_step).max(self.bounds.min_capital);
            }
            Field::Days => {
                self.days = self.days.saturating_sub(1).max(self.bounds.min_days);
            }
            Field::ActiveBonus => {
                self.active_bonus = !self.active_bonus;
            }
            Field::Fdv => {
                self.fdv_index = self.fdv_index.saturating_sub(1);
            }
            Field::AirdropPct => {
                self.airdrop_pct = (self.airdrop_pct - self.bounds.airdrop_pct_step)
                    .max(self.bounds.min_airdrop_pct);
            }
        }
        self.recompute();
    }

    pub fn toggle_bonus(&mut self) {
        self.active_bonus = !self.active_bonus;
        self.recompute();
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Dashboard => Screen::Breakdown,
            Screen::Breakdown => Screen::Dashboard,
        };
    }

    pub fn scroll_up(&mut self) {
        self.breakdown_scroll = self.breakdown_scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.breakdown_scroll + 1 < self.accrual.schedule.len() {
            self.breakdown_scroll += 1;
        }
    }

    pub fn set_estimate(&mut self, estimate: PointsEstimate) {
        self.estimate = estimate;
        self.refreshing = false;
        self.recompute();
    }
}
