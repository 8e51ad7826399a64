mod http;

pub use http::HttpApi;

use async_trait::async_trait;

use crate::workout::WorkoutPlan;

/// Failures talking to the spin-class backend.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("could not decode response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

/// The two backend calls the workout screen makes.
///
/// `HttpApi` is the real implementation; tests script their own.
#[async_trait]
pub trait WorkoutApi: Send + Sync {
    /// GET the workout plan with the given id.
    async fn fetch_plan(&self, workout_id: u32) -> Result<WorkoutPlan, ApiError>;

    /// GET the bike sensor's current speed in mph.
    async fn read_speed(&self) -> Result<f64, ApiError>;
}
