use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, ORIGIN, REFERER, USER_AGENT};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

use crate::config::ApiSettings;
use crate::models::{EstimatorError, Result};

/// Source of the current network-wide point estimate.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PointsProvider: Send + Sync {
    async fn fetch_estimate(&self) -> Result<f64>;
}

#[derive(Debug, Deserialize)]
struct RankResponse {
    #[serde(default)]
    data: Vec<RankEntry>,
}

#[derive(Debug, Deserialize)]
struct RankEntry {
    #[serde(default)]
    points: PointsField,
}

/// The ranking feed has served `points` both as a JSON number and as a
/// decimal string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PointsField {
    Num(f64),
    Text(String),
}

impl Default for PointsField {
    fn default() -> Self {
        PointsField::Num(0.0)
    }
}

impl PointsField {
    fn value(&self) -> f64 {
        match self {
            PointsField::Num(n) => *n,
            PointsField::Text(s) => s.parse().unwrap_or(0.0),
        }
    }
}

/// HTTP client for the campaign ranking endpoint. Sums the normalized points
/// of the top `limit` participants and extrapolates to the full population
/// with the configured scaling factor.
pub struct RankApiClient {
    http: reqwest::Client,
    settings: ApiSettings,
}

impl RankApiClient {
    pub fn new(settings: ApiSettings) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(
                "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 \
                 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
            ),
        );
        headers.insert(ORIGIN, HeaderValue::from_static("https://standx.com"));
        headers.insert(REFERER, HeaderValue::from_static("https://standx.com/"));

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_seconds))
            .default_headers(headers)
            .build()?;

        Ok(Self { http, settings })
    }

    fn estimate_from(&self, body: RankResponse) -> Result<f64> {
        if body.data.is_empty() {
            return Err(EstimatorError::MalformedResponse(
                "ranking returned no entries".to_string(),
            ));
        }

        let sample_sum: f64 = body
            .data
            .iter()
            .map(|entry| entry.points.value() / self.settings.points_divisor)
            .sum();

        Ok(sample_sum * self.settings.sample_scaling_factor)
    }
}

#[async_trait]
impl PointsProvider for RankApiClient {
    async fn fetch_estimate(&self) -> Result<f64> {
        let response = self
            .http
            .get(&self.settings.rank_url)
            .query(&[
                ("limit", self.settings.limit),
                ("offset", self.settings.offset),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: RankResponse = response.json().await?;
        let estimate = self.estimate_from(body)?;
        debug!(estimate, "Extrapolated network point estimate from ranking");

        Ok(estimate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;

    fn client() -> RankApiClient {
        RankApiClient::new(Settings::default().api).unwrap()
    }

    #[test]
    fn test_estimate_sums_and_scales() {
        // Two entries of 100e12 raw points each: (100M + 100M) * 1.3.
        let body: RankResponse = serde_json::from_str(
            r#"{"data": [{"points": 100000000000000}, {"points": "100000000000000"}]}"#,
        )
        .unwrap();

        let estimate = client().estimate_from(body).unwrap();
        approx::assert_relative_eq!(estimate, 260_000_000.0, max_relative = 1e-12);
    }

    #[test]
    fn test_missing_points_field_counts_as_zero() {
        let body: RankResponse =
            serde_json::from_str(r#"{"data": [{"rank": 1}, {"points": 1300000}]}"#).unwrap();

        let estimate = client().estimate_from(body).unwrap();
        approx::assert_relative_eq!(estimate, 1.3 * 1.3, max_relative = 1e-12);
    }

    #[test]
    fn test_empty_data_is_malformed() {
        let body: RankResponse = serde_json::from_str(r#"{"data": []}"#).unwrap();
        assert!(matches!(
            client().estimate_from(body),
            Err(EstimatorError::MalformedResponse(_))
        ));

        let body: RankResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(client().estimate_from(body).is_err());
    }

    #[test]
    fn test_unparseable_points_string_counts_as_zero() {
        let body: RankResponse =
            serde_json::from_str(r#"{"data": [{"points": "not-a-number"}]}"#).unwrap();
        assert_eq!(client().estimate_from(body).unwrap(), 0.0);
    }
}
