//! Scripted backend for tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, WorkoutApi};
use crate::workout::plan::PlanId;
use crate::workout::{Block, WorkoutPlan, Zone};

/// Three blocks: 3s recovery, 2s sprint, 4s tempo.
pub fn sample_plan() -> WorkoutPlan {
    WorkoutPlan {
        id: PlanId::Number(50),
        blocks: vec![
            Block { duration_secs: 3, intensity: Zone::Recovery },
            Block { duration_secs: 2, intensity: Zone::Sprint },
            Block { duration_secs: 4, intensity: Zone::Tempo },
        ],
    }
}

fn unavailable(url: &str) -> ApiError {
    ApiError::Status {
        url: url.to_string(),
        status: reqwest::StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// Backend that answers from a script. `Err(())` entries (and an exhausted
/// speed script) answer with HTTP 503.
pub struct FakeApi {
    plan: Option<WorkoutPlan>,
    speeds: Mutex<VecDeque<Result<f64, ()>>>,
    reads: AtomicUsize,
}

impl FakeApi {
    pub fn with_plan(plan: WorkoutPlan) -> Self {
        Self {
            plan: Some(plan),
            speeds: Mutex::new(VecDeque::new()),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn with_speeds(speeds: Vec<Result<f64, ()>>) -> Self {
        Self {
            plan: Some(sample_plan()),
            speeds: Mutex::new(speeds.into()),
            reads: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            plan: None,
            speeds: Mutex::new(VecDeque::new()),
            reads: AtomicUsize::new(0),
        }
    }

    /// Number of sensor requests made so far.
    pub fn speed_reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WorkoutApi for FakeApi {
    async fn fetch_plan(&self, _workout_id: u32) -> Result<WorkoutPlan, ApiError> {
        self.plan.clone().ok_or_else(|| unavailable("fake://plan"))
    }

    async fn read_speed(&self) -> Result<f64, ApiError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        let next = self.speeds.lock().unwrap().pop_front();
        match next {
            Some(Ok(speed)) => Ok(speed),
            _ => Err(unavailable("fake://speed")),
        }
    }
}
