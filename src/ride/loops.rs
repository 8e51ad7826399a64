use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::api::WorkoutApi;
use crate::tui::event::AppEvent;

/// The countdown and sensor loops of a running session.
///
/// Both tasks only post events; the screen applies them. Dropping this
/// aborts both, so no task outlives the active session or the screen.
pub struct TickLoops {
    countdown: JoinHandle<()>,
    sensor: JoinHandle<()>,
}

impl TickLoops {
    /// Spawn both loops on the current runtime. The first tick of each
    /// fires one `period` from now.
    pub fn spawn<A>(api: Arc<A>, period: Duration, tx: UnboundedSender<AppEvent>) -> Self
    where
        A: WorkoutApi + 'static,
    {
        tracing::debug!(?period, "Starting tick loops");
        let countdown = tokio::spawn(countdown_loop(period, tx.clone()));
        let sensor = tokio::spawn(sensor_loop(api, period, tx));
        Self { countdown, sensor }
    }
}

impl Drop for TickLoops {
    fn drop(&mut self) {
        self.countdown.abort();
        self.sensor.abort();
        tracing::debug!("Stopped tick loops");
    }
}

async fn countdown_loop(period: Duration, tx: UnboundedSender<AppEvent>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if tx.send(AppEvent::Countdown).is_err() {
            return;
        }
    }
}

/// Poll the sensor once per period. A slow response skips the ticks it
/// overlapped instead of queueing extra requests.
async fn sensor_loop<A: WorkoutApi>(api: Arc<A>, period: Duration, tx: UnboundedSender<AppEvent>) {
    let mut ticker = interval_at(Instant::now() + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    loop {
        ticker.tick().await;
        match api.read_speed().await {
            Ok(speed) => {
                if tx.send(AppEvent::Speed(speed)).is_err() {
                    return;
                }
            }
            Err(e) => tracing::warn!(error = %e, "Sensor poll failed; keeping last speed"),
        }
    }
}

/// Fetch the plan once and post the result.
pub fn spawn_plan_loader<A>(api: Arc<A>, workout_id: u32, tx: UnboundedSender<AppEvent>) -> JoinHandle<()>
where
    A: WorkoutApi + 'static,
{
    tokio::spawn(async move {
        let event = match api.fetch_plan(workout_id).await {
            Ok(plan) => {
                tracing::info!(workout_id, blocks = plan.len(), "Loaded workout plan");
                AppEvent::PlanLoaded(plan)
            }
            Err(e) => {
                tracing::error!(workout_id, error = %e, "Failed to load workout plan");
                AppEvent::PlanFailed(e.to_string())
            }
        };
        let _ = tx.send(event);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeApi;
    use tokio::sync::mpsc;

    const PERIOD: Duration = Duration::from_secs(1);

    #[tokio::test(start_paused = true)]
    async fn loops_post_countdown_and_speed_every_period() {
        let api = Arc::new(FakeApi::with_speeds(vec![Ok(12.0), Ok(13.5)]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _loops = TickLoops::spawn(api, PERIOD, tx);

        tokio::time::sleep(PERIOD * 2 + Duration::from_millis(10)).await;

        let mut countdowns = 0;
        let mut speeds = Vec::new();
        while let Ok(event) = rx.try_recv() {
            match event {
                AppEvent::Countdown => countdowns += 1,
                AppEvent::Speed(s) => speeds.push(s),
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert_eq!(countdowns, 2);
        assert_eq!(speeds, vec![12.0, 13.5]);
    }

    #[tokio::test(start_paused = true)]
    async fn nothing_fires_before_first_period() {
        let api = Arc::new(FakeApi::with_speeds(vec![Ok(12.0)]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _loops = TickLoops::spawn(api, PERIOD, tx);

        tokio::time::sleep(PERIOD / 2).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn sensor_errors_post_nothing() {
        let api = Arc::new(FakeApi::with_speeds(vec![Err(()), Ok(9.0)]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let _loops = TickLoops::spawn(api, PERIOD, tx);

        tokio::time::sleep(PERIOD * 2 + Duration::from_millis(10)).await;

        let speeds: Vec<f64> = std::iter::from_fn(|| rx.try_recv().ok())
            .filter_map(|e| match e {
                AppEvent::Speed(s) => Some(s),
                _ => None,
            })
            .collect();
        assert_eq!(speeds, vec![9.0]);
    }

    #[tokio::test(start_paused = true)]
    async fn dropping_stops_both_loops() {
        let api = Arc::new(FakeApi::with_speeds(vec![Ok(12.0); 10]));
        let (tx, mut rx) = mpsc::unbounded_channel();
        let loops = TickLoops::spawn(api, PERIOD, tx);

        tokio::time::sleep(PERIOD + Duration::from_millis(10)).await;
        drop(loops);
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(PERIOD * 3).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn plan_loader_posts_plan() {
        let api = Arc::new(FakeApi::with_plan(crate::testing::sample_plan()));
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_plan_loader(api, 50, tx).await.unwrap();
        assert!(matches!(rx.recv().await, Some(AppEvent::PlanLoaded(p)) if p.len() == 3));
    }

    #[tokio::test]
    async fn plan_loader_posts_failure() {
        let api = Arc::new(FakeApi::failing());
        let (tx, mut rx) = mpsc::unbounded_channel();
        spawn_plan_loader(api, 50, tx).await.unwrap();
        assert!(matches!(rx.recv().await, Some(AppEvent::PlanFailed(_))));
    }
}
