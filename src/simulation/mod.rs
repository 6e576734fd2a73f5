//! Running a match: the guarded store and the turn clock

pub mod scheduler;
pub mod store;

pub use scheduler::{run_turns, IntervalScheduler, SchedulerHandle, TurnDriver};
pub use store::WorldStore;
