pub mod plan;
pub mod session;
pub mod zones;

pub use plan::{Block, WorkoutPlan};
pub use session::{Phase, Session, TickOutcome};
pub use zones::{PaceTable, Zone};
