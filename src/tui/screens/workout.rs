use std::sync::Arc;
use std::time::{Duration, Instant};

use ratatui::backend::Backend;
use ratatui::buffer::Buffer;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Widget};
use ratatui::Terminal;

use crate::api::WorkoutApi;
use crate::config::AppConfig;
use crate::ride::loops::{spawn_plan_loader, TickLoops};
use crate::tui::animation::{slide_offset, stagger_delay, Transition};
use crate::tui::event::{AppEvent, EventHandler};
use crate::tui::widgets::pace_gauge::PaceGaugeWidget;
use crate::tui::widgets::speed_card::SpeedCardWidget;
use crate::tui::widgets::timer::TimerWidget;
use crate::tui::widgets::zone_list::ZoneListWidget;
use crate::util::{format_miles, format_mph, format_seconds};
use crate::workout::{PaceTable, Phase, Session, TickOutcome};

/// Shown in place of the workout when the plan can't be loaded.
pub const LOAD_ERROR_MESSAGE: &str = "Error connecting to server";

/// Card height including borders.
const CARD_HEIGHT: u16 = 3;

/// What the screen needs from the config.
#[derive(Debug, Clone)]
pub struct ScreenSettings {
    pub workout_id: u32,
    pub tick_interval: Duration,
    pub animation: Duration,
    pub paces: PaceTable,
}

impl ScreenSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            workout_id: config.server.workout_id,
            tick_interval: config.session.tick_interval(),
            animation: config.session.animation(),
            paces: config.zones.clone(),
        }
    }
}

/// Whether the main loop should keep going.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Top-level state of the screen.
enum ScreenState {
    Loading,
    Failed,
    Loaded(Session),
}

/// How the ride ended, for the summary printed after the TUI closes.
#[derive(Debug, Clone, Default)]
pub struct RideOutcome {
    pub plan_id: Option<String>,
    pub load_error: Option<String>,
    pub total_blocks: usize,
    pub completed_blocks: usize,
    pub elapsed_secs: u32,
    pub total_secs: u32,
    pub distance: f64,
    pub goal_distance: f64,
    pub finished: bool,
}

/// The workout-session screen: plan, countdown, speeds and zone list.
pub struct WorkoutScreen {
    state: ScreenState,
    paces: PaceTable,
    animation: Duration,
    /// Whether the speed cards and zone list are (sliding) on screen.
    shown: bool,
    transition: Option<Transition>,
    load_error: Option<String>,
}

impl WorkoutScreen {
    pub fn new(paces: PaceTable, animation: Duration) -> Self {
        Self {
            state: ScreenState::Loading,
            paces,
            animation,
            shown: false,
            transition: None,
            load_error: None,
        }
    }

    pub fn session(&self) -> Option<&Session> {
        match &self.state {
            ScreenState::Loaded(session) => Some(session),
            _ => None,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.state, ScreenState::Failed)
    }

    /// True while the countdown and sensor loops should be running.
    pub fn is_active(&self) -> bool {
        self.session().is_some_and(Session::is_active)
    }

    /// Apply one event. The screen is the only writer of session state.
    pub fn handle_event(&mut self, event: AppEvent, now: Instant) -> Flow {
        let flow = match event {
            AppEvent::Key(key) => self.handle_key(key),
            AppEvent::PlanLoaded(plan) => {
                if matches!(self.state, ScreenState::Loading) {
                    self.state = ScreenState::Loaded(Session::new(plan, self.paces.clone()));
                }
                Flow::Continue
            }
            AppEvent::PlanFailed(reason) => {
                if matches!(self.state, ScreenState::Loading) {
                    self.load_error = Some(reason);
                    self.state = ScreenState::Failed;
                }
                Flow::Continue
            }
            AppEvent::Countdown => {
                if let ScreenState::Loaded(session) = &mut self.state {
                    if session.tick() == TickOutcome::Finished {
                        tracing::info!(
                            distance = session.state().current_distance,
                            "Workout finished"
                        );
                    }
                }
                Flow::Continue
            }
            AppEvent::Speed(speed) => {
                if let ScreenState::Loaded(session) = &mut self.state {
                    session.record_speed(speed);
                }
                Flow::Continue
            }
            AppEvent::Frame | AppEvent::Resize(_, _) => Flow::Continue,
        };

        self.update_transition(now);
        flow
    }

    fn handle_key(&mut self, key: KeyEvent) -> Flow {
        if key.kind != KeyEventKind::Press {
            return Flow::Continue;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => return Flow::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return Flow::Quit
            }
            _ => {}
        }

        if let ScreenState::Loaded(session) = &mut self.state {
            match key.code {
                KeyCode::Enter => {
                    session.start();
                }
                KeyCode::Char(' ') => {
                    session.toggle_pause();
                }
                _ => {}
            }
        }
        Flow::Continue
    }

    /// Start a slide whenever the active flag flips.
    fn update_transition(&mut self, now: Instant) {
        let shown = self.is_active();
        if shown != self.shown {
            self.shown = shown;
            self.transition = Some(Transition::new(shown, self.animation, now));
        }
    }

    /// Fraction of an animated element on screen at `now`.
    fn visible(&self, now: Instant, delay: Duration) -> f64 {
        match &self.transition {
            Some(t) => t.visible_at(now, delay),
            None if self.shown => 1.0,
            None => 0.0,
        }
    }

    pub fn outcome(&self) -> RideOutcome {
        match &self.state {
            ScreenState::Loaded(session) => {
                let state = session.state();
                RideOutcome {
                    plan_id: Some(session.plan().id.to_string()),
                    load_error: None,
                    total_blocks: session.plan().len(),
                    completed_blocks: session.completed_blocks(),
                    elapsed_secs: session.elapsed_secs(),
                    total_secs: session.plan().total_secs(),
                    distance: state.current_distance,
                    goal_distance: state.goal_distance,
                    finished: state.finished,
                }
            }
            _ => RideOutcome {
                load_error: self.load_error.clone(),
                ..RideOutcome::default()
            },
        }
    }

    pub fn render(&self, frame: &mut ratatui::Frame, now: Instant) {
        let area = frame.area();
        match &self.state {
            ScreenState::Loading => render_centered(frame, area, "Loading workout...", Color::DarkGray),
            ScreenState::Failed => render_centered(frame, area, LOAD_ERROR_MESSAGE, Color::Red),
            ScreenState::Loaded(session) => self.render_session(frame, area, session, now),
        }
    }

    fn render_session(&self, frame: &mut ratatui::Frame, area: Rect, session: &Session, now: Instant) {
        let state = session.state();
        let phase = session.phase();

        let outer = Block::default()
            .title(format!(
                " Workout {} ({} Remaining) ",
                session.plan().id,
                format_seconds(state.seconds_remaining)
            ))
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::White));
        let inner = outer.inner(area);
        frame.render_widget(outer, area);

        let cols = Layout::horizontal([
            Constraint::Min(30),   // cards, timer, gauge
            Constraint::Length(30), // zone list
        ])
        .split(inner);

        let rows = Layout::vertical([
            Constraint::Length(CARD_HEIGHT), // goal + current speed
            Constraint::Length(5),           // timer
            Constraint::Length(3),           // pace gauge
            Constraint::Length(1),           // distance
            Constraint::Min(0),
            Constraint::Length(1), // key hint
        ])
        .split(cols[0]);

        // Speed cards drop in from above.
        let cards = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[0]);
        let offset = slide_offset(CARD_HEIGHT, self.visible(now, Duration::ZERO));
        render_sliding_down(
            SpeedCardWidget::new("Goal Speed", format_mph(state.goal_speed)).color(Color::Cyan),
            cards[0],
            offset,
            frame.buffer_mut(),
        );
        render_sliding_down(
            SpeedCardWidget::new("Current Speed", format_mph(state.current_speed)),
            cards[1],
            offset,
            frame.buffer_mut(),
        );

        // Timer
        let timer = match (phase, state.current_block_index) {
            (Phase::Ready, _) => TimerWidget::new(session.plan().total_secs())
                .with_label("Press Enter to start".into()),
            (Phase::Finished, _) => TimerWidget::new(0).with_label("Workout complete".into()),
            (_, Some(index)) => TimerWidget::new(state.seconds_remaining)
                .with_block(index, session.plan().len())
                .with_duration(session.plan().block(index).map_or(0, |b| b.duration_secs))
                .paused(phase == Phase::Paused),
            (_, None) => TimerWidget::new(state.seconds_remaining),
        };
        frame.render_widget(timer, rows[1]);

        if matches!(phase, Phase::Riding | Phase::Paused) {
            frame.render_widget(PaceGaugeWidget::new(state.current_speed, state.goal_speed), rows[2]);
        }

        let distance = Paragraph::new(Line::from(vec![
            Span::styled("  Distance ", Style::default().fg(Color::DarkGray)),
            Span::raw(format_miles(state.current_distance)),
            Span::styled(" / goal ", Style::default().fg(Color::DarkGray)),
            Span::raw(format_miles(state.goal_distance)),
            Span::styled("   Left ", Style::default().fg(Color::DarkGray)),
            Span::raw(format_seconds(session.remaining_total_secs())),
        ]));
        frame.render_widget(distance, rows[3]);

        // Zone list slides in from the right, one row after another.
        let visibility = (0..session.plan().len())
            .map(|i| self.visible(now, stagger_delay(i)))
            .collect();
        frame.render_widget(
            ZoneListWidget::new(&session.plan().blocks, state.current_block_index, state.finished)
                .with_visibility(visibility),
            cols[1],
        );

        frame.render_widget(Paragraph::new(Line::from(key_hint(phase))), rows[5]);
    }
}

fn key_hint(phase: Phase) -> Vec<Span<'static>> {
    let key = Style::default().fg(Color::Green).add_modifier(Modifier::BOLD);
    let quit = Style::default().fg(Color::Red);
    match phase {
        Phase::Ready => vec![
            Span::styled("  [Enter]", key),
            Span::raw(" start  "),
            Span::styled("[q]", quit),
            Span::raw(" quit"),
        ],
        Phase::Riding => vec![
            Span::styled("  [Space]", key),
            Span::raw(" pause  "),
            Span::styled("[q]", quit),
            Span::raw(" quit"),
        ],
        Phase::Paused => vec![
            Span::styled("  [Space]", key),
            Span::raw(" resume  "),
            Span::styled("[q]", quit),
            Span::raw(" quit"),
        ],
        Phase::Finished => vec![Span::styled("  [q]", quit), Span::raw(" done")],
    }
}

fn render_centered(frame: &mut ratatui::Frame, area: Rect, text: &str, color: Color) {
    let rows = Layout::vertical([
        Constraint::Percentage(40),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .split(area);
    let paragraph = Paragraph::new(Line::from(Span::styled(
        text.to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(paragraph, rows[1]);
}

/// Draw `widget` as if it were shifted `offset` rows up, clipped to `area`.
fn render_sliding_down<W: Widget>(widget: W, area: Rect, offset: u16, buf: &mut Buffer) {
    if offset == 0 {
        widget.render(area, buf);
        return;
    }
    if offset >= area.height {
        return;
    }

    let mut scratch = Buffer::empty(area);
    widget.render(area, &mut scratch);
    for dy in 0..area.height - offset {
        for x in area.left()..area.right() {
            let src = scratch.cell((x, area.y + dy + offset)).cloned();
            if let (Some(src), Some(dst)) = (src, buf.cell_mut((x, area.y + dy))) {
                *dst = src;
            }
        }
    }
}

/// Run the workout screen until the rider quits.
///
/// Loads the plan once, then keeps the countdown and sensor loops running
/// exactly while the session is active.
pub async fn run<B, A>(
    terminal: &mut Terminal<B>,
    events: &mut EventHandler,
    api: Arc<A>,
    settings: ScreenSettings,
) -> anyhow::Result<RideOutcome>
where
    B: Backend,
    A: WorkoutApi + 'static,
{
    let mut screen = WorkoutScreen::new(settings.paces.clone(), settings.animation);
    let loader = spawn_plan_loader(api.clone(), settings.workout_id, events.sender());
    let mut loops: Option<TickLoops> = None;

    loop {
        terminal.draw(|frame| screen.render(frame, Instant::now()))?;

        let Some(event) = events.next().await else {
            break;
        };
        if screen.handle_event(event, Instant::now()) == Flow::Quit {
            break;
        }

        match (screen.is_active(), loops.is_some()) {
            (true, false) => {
                loops = Some(TickLoops::spawn(api.clone(), settings.tick_interval, events.sender()));
            }
            (false, true) => loops = None,
            _ => {}
        }
    }

    loader.abort();
    drop(loops);
    if screen.is_failed() {
        tracing::warn!("Workout screen closed after the plan failed to load");
    }
    Ok(screen.outcome())
}
