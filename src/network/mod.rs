pub mod rank_api;
pub mod estimator;

pub use rank_api::{PointsProvider, RankApiClient};
pub use estimator::{EstimateSource, GlobalPointsEstimator, PointsEstimate};

#[cfg(test)]
pub use rank_api::MockPointsProvider;
