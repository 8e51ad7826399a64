use super::plan::WorkoutPlan;
use super::zones::PaceTable;

/// Seconds in an hour, for turning mph into miles per tick.
const SECS_PER_HOUR: f64 = 3600.0;

/// Live values of a ride. Owned by the workout screen and replaced tick by tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    /// Last speed read from the bike sensor (mph).
    pub current_speed: f64,
    /// Target pace of the current block (mph).
    pub goal_speed: f64,
    /// Miles ridden so far, integrated from `current_speed`.
    pub current_distance: f64,
    /// Miles the plan expected by now, integrated from `goal_speed`.
    pub goal_distance: f64,
    /// Block being ridden. None until the session is started.
    pub current_block_index: Option<usize>,
    pub seconds_remaining: u32,
    pub active: bool,
    pub finished: bool,
}

/// Coarse phase of a session, derived from the flags in `SessionState`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Plan loaded, waiting for the rider to start.
    Ready,
    Riding,
    Paused,
    Finished,
}

/// What a single countdown tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// The session is not active; nothing changed.
    Ignored,
    /// One second came off the current block.
    Counted,
    /// The current block ran out and the session moved to this block.
    Advanced(usize),
    /// The last block ran out.
    Finished,
}

/// A workout plan being ridden.
#[derive(Debug, Clone)]
pub struct Session {
    plan: WorkoutPlan,
    paces: PaceTable,
    state: SessionState,
}

impl Session {
    pub fn new(plan: WorkoutPlan, paces: PaceTable) -> Self {
        Self {
            plan,
            paces,
            state: SessionState::default(),
        }
    }

    pub fn plan(&self) -> &WorkoutPlan {
        &self.plan
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        match (&self.state.current_block_index, self.state.active, self.state.finished) {
            (_, _, true) => Phase::Finished,
            (_, true, _) => Phase::Riding,
            (Some(_), false, _) => Phase::Paused,
            (None, false, _) => Phase::Ready,
        }
    }

    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Enter block 0 and begin riding. Does nothing unless the session is Ready.
    ///
    /// A plan without any riding time finishes immediately.
    pub fn start(&mut self) -> bool {
        if self.phase() != Phase::Ready {
            return false;
        }
        match self.first_block_from(0) {
            Some(index) => {
                self.state.active = true;
                self.enter_block(index);
                tracing::info!(plan = %self.plan.id, blocks = self.plan.len(), "Session started");
            }
            None => {
                self.finish();
                tracing::info!(plan = %self.plan.id, "Plan has no riding time; finished immediately");
            }
        }
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.phase() != Phase::Riding {
            return false;
        }
        self.state.active = false;
        tracing::info!(block = ?self.state.current_block_index, "Session paused");
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.phase() != Phase::Paused {
            return false;
        }
        self.state.active = true;
        tracing::info!(block = ?self.state.current_block_index, "Session resumed");
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase() {
            Phase::Riding => self.pause(),
            Phase::Paused => self.resume(),
            Phase::Ready | Phase::Finished => false,
        }
    }

    /// Advance the countdown by one second.
    ///
    /// When the current block reaches zero the next block is entered with
    /// its own duration and goal pace; after the last block the session is
    /// marked finished and goes inactive.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.state.active {
            return TickOutcome::Ignored;
        }

        self.state.current_distance += self.state.current_speed / SECS_PER_HOUR;
        self.state.goal_distance += self.state.goal_speed / SECS_PER_HOUR;
        self.state.seconds_remaining = self.state.seconds_remaining.saturating_sub(1);

        if self.state.seconds_remaining > 0 {
            return TickOutcome::Counted;
        }

        let next = self
            .state
            .current_block_index
            .map_or(0, |i| i + 1);
        match self.first_block_from(next) {
            Some(index) => {
                self.enter_block(index);
                tracing::info!(
                    block = index,
                    goal = self.state.goal_speed,
                    "Advanced to next block"
                );
                TickOutcome::Advanced(index)
            }
            None => {
                self.finish();
                tracing::info!(plan = %self.plan.id, "Reached the end of the blocks");
                TickOutcome::Finished
            }
        }
    }

    /// Store a sensor reading. Readings that arrive while inactive are dropped,
    /// as are values that aren't a usable speed.
    pub fn record_speed(&mut self, speed: f64) -> bool {
        if !self.state.active {
            return false;
        }
        if !speed.is_finite() || speed < 0.0 {
            tracing::warn!(speed, "Ignoring invalid sensor speed");
            return false;
        }
        self.state.current_speed = speed;
        true
    }

    /// Seconds ridden so far.
    pub fn elapsed_secs(&self) -> u32 {
        match self.state.current_block_index {
            None => 0,
            Some(_) if self.state.finished => self.plan.total_secs(),
            Some(i) => {
                let block_secs = self.plan.block(i).map_or(0, |b| b.duration_secs);
                self.plan
                    .secs_before(i)
                    .saturating_add(block_secs.saturating_sub(self.state.seconds_remaining))
            }
        }
    }

    /// Seconds left in the whole workout.
    pub fn remaining_total_secs(&self) -> u32 {
        self.plan.total_secs().saturating_sub(self.elapsed_secs())
    }

    /// Blocks ridden to the end.
    pub fn completed_blocks(&self) -> usize {
        match self.state.current_block_index {
            None => 0,
            Some(_) if self.state.finished => self.plan.len(),
            Some(i) => i,
        }
    }

    /// First block at or after `from` that has any riding time.
    fn first_block_from(&self, from: usize) -> Option<usize> {
        (from..self.plan.len()).find(|&i| self.plan.blocks[i].duration_secs > 0)
    }

    fn enter_block(&mut self, index: usize) {
        let block = &self.plan.blocks[index];
        self.state.current_block_index = Some(index);
        self.state.seconds_remaining = block.duration_secs;
        self.state.goal_speed = self.paces.pace_for(&block.intensity);
    }

    fn finish(&mut self) {
        self.state.active = false;
        self.state.finished = true;
        self.state.seconds_remaining = 0;
        if self.state.current_block_index.is_none() && !self.plan.is_empty() {
            self.state.current_block_index = Some(self.plan.len() - 1);
        }
    }
}
