pub mod models;
pub mod config;
pub mod accrual;
pub mod projection;
pub mod network;
pub mod utils;
pub mod tui;

pub use models::{
    AccrualResult, DailyRecord, EstimatorError, ProjectionResult, Result, SensitivityGrid,
};
pub use config::Settings;
