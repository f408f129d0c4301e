//! Pool assignment and schedule generation.

/// Pool membership, random dealing and balancing.
pub mod pools;

/// In-pool round-robin planning with optional replays.
pub mod generator;

pub use generator::{MAX_ATTEMPTS, SchedulePlan, Shortfall, plan_schedule};
