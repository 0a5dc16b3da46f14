//! Work time computation for a single working day.
//!
//! This crate turns a day's presence entries into work and break time:
//! - Reduction: folding `come`/`leave`/`trip` entries into raw work time
//! - Policy: applying statutory minimum breaks and the daily maximum
//! - Solving: finding the earliest leave time for a target work time

pub mod config;
mod entry;
mod error;
mod policy;
mod reducer;
mod solver;

pub use config::Config;
pub use entry::{Entry, EntryKind, UnknownEntryKind};
pub use error::{PolicyError, Result, SequenceError, WorkTimeError};
pub use policy::{Accounted, BreakPolicy, BreakTier, BusinessHours, adjust};
pub use reducer::{Effect, PresenceState, WorkDay, reduce, reduce_at, transition};
pub use solver::solve_leave_time;
