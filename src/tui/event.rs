use std::time::Duration;

use ratatui::crossterm::event::{self, Event, KeyEvent};
use tokio::sync::mpsc;

use crate::workout::WorkoutPlan;

/// Events consumed by the workout screen.
///
/// Terminal input, the background loops and the plan loader all post into
/// the same channel; the screen is the only thing that mutates state.
#[derive(Debug)]
pub enum AppEvent {
    /// A keyboard event.
    Key(KeyEvent),
    /// Terminal was resized.
    #[allow(dead_code)]
    Resize(u16, u16),
    /// Redraw tick for animations (~30 fps).
    Frame,
    /// One second of the countdown elapsed.
    Countdown,
    /// Fresh reading from the bike sensor.
    Speed(f64),
    /// The workout plan arrived.
    PlanLoaded(WorkoutPlan),
    /// The workout plan request failed.
    PlanFailed(String),
}

/// Owns the event channel and, when attached to a terminal, the thread that
/// polls crossterm for input.
pub struct EventHandler {
    tx: mpsc::UnboundedSender<AppEvent>,
    rx: mpsc::UnboundedReceiver<AppEvent>,
    _handle: Option<std::thread::JoinHandle<()>>,
}

impl EventHandler {
    /// Start the input polling thread.
    ///
    /// Sends Key and Resize events as they arrive, plus a Frame whenever no
    /// input arrives within `frame_rate`.
    pub fn new(frame_rate: Duration) -> Self {
        let mut handler = Self::detached();
        let tx = handler.tx.clone();

        let handle = std::thread::spawn(move || loop {
            let event = if event::poll(frame_rate).unwrap_or(false) {
                match event::read() {
                    Ok(Event::Key(key)) => AppEvent::Key(key),
                    Ok(Event::Resize(w, h)) => AppEvent::Resize(w, h),
                    _ => continue,
                }
            } else {
                AppEvent::Frame
            };
            if tx.send(event).is_err() {
                return;
            }
        });

        handler._handle = Some(handle);
        handler
    }

    /// A channel with no terminal input attached. Events only arrive through
    /// `sender()`.
    pub fn detached() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            tx,
            rx,
            _handle: None,
        }
    }

    /// Handle for background tasks to post events.
    pub fn sender(&self) -> mpsc::UnboundedSender<AppEvent> {
        self.tx.clone()
    }

    /// Receive the next event, waiting until one is available.
    pub async fn next(&mut self) -> Option<AppEvent> {
        self.rx.recv().await
    }
}
