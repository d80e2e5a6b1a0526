//! Goal advisor: splits a month of savings across prioritized savings goals
//! and explains each allocation.
//!
//! - `planning`: the pure planner (normalize, allocate, explain, suggest)
//! - `db`: SQLite storage for the profile, goals and activity log
//! - `operations`: input parsing and the commands the CLI runs

pub mod db;
pub mod error;
pub mod models;
pub mod operations;
pub mod planning;

pub use error::{AdvisorError, InvalidGoalError, Result};
pub use models::goal::{validate_goals, Goal, NormalizedGoal};
pub use models::profile::{Profile, RiskProfile};
pub use planning::{allocate, apply_allocations, explain, normalize, plan, suggest, Plan};
