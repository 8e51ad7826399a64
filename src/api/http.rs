use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::{ApiError, WorkoutApi};
use crate::workout::WorkoutPlan;

/// Response from the sensor endpoint. We only parse the field we need.
#[derive(Debug, Deserialize)]
struct SpeedReading {
    speed: f64,
}

/// reqwest-backed client for the spin-class backend.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn plan_url(&self, workout_id: u32) -> String {
        format!("{}/workout/workout_id/{workout_id}", self.base_url)
    }

    pub fn speed_url(&self) -> String {
        format!("{}/bluetooth/device/read/speed", self.base_url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status { url, status });
        }

        let body = match response.text().await {
            Ok(b) => b,
            Err(source) => return Err(ApiError::Transport { url, source }),
        };

        decode(url, &body)
    }
}

fn decode<T: DeserializeOwned>(url: String, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode { url, source })
}

#[async_trait]
impl WorkoutApi for HttpApi {
    async fn fetch_plan(&self, workout_id: u32) -> Result<WorkoutPlan, ApiError> {
        let url = self.plan_url(workout_id);
        tracing::debug!(%url, "Fetching workout plan");
        self.get_json(url).await
    }

    async fn read_speed(&self) -> Result<f64, ApiError> {
        let reading: SpeedReading = self.get_json(self.speed_url()).await?;
        Ok(reading.speed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::Zone;

    fn api() -> HttpApi {
        HttpApi::new("http://localhost:5000/", Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn endpoint_urls() {
        let api = api();
        assert_eq!(api.plan_url(50), "http://localhost:5000/workout/workout_id/50");
        assert_eq!(api.speed_url(), "http://localhost:5000/bluetooth/device/read/speed");
    }

    #[test]
    fn decode_plan_body() {
        let body = r#"{"workout": 50, "blocks": [{"time": 30, "intensity": "tempo"}]}"#;
        let plan: WorkoutPlan = decode("u".into(), body).unwrap();
        assert_eq!(plan.blocks[0].intensity, Zone::Tempo);
    }

    #[test]
    fn decode_speed_body() {
        let reading: SpeedReading = decode("u".into(), r#"{"speed": 17.25}"#).unwrap();
        assert_eq!(reading.speed, 17.25);
    }

    #[test]
    fn decode_error_names_url() {
        let err = decode::<SpeedReading>("http://x/speed".into(), "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
        assert!(err.to_string().contains("http://x/speed"));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Port 9 (discard) on localhost is never served in test environments.
        let api = HttpApi::new("http://127.0.0.1:9", Duration::from_millis(500)).unwrap();
        let err = api.read_speed().await.unwrap_err();
        assert!(matches!(err, ApiError::Transport { .. }));
    }
}
