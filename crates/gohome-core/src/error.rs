//! Error types for work time computation.

use chrono::{Duration, NaiveDate, NaiveTime};
use thiserror::Error;

use crate::entry::EntryKind;
use crate::reducer::PresenceState;

/// Errors returned by the reducer and the leave time solver.
///
/// All of them describe a problem with the caller's input; none is
/// transient.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum WorkTimeError {
    /// No entries were supplied.
    #[error("no entries")]
    NoEntries,

    /// The entries do not form a valid presence sequence.
    #[error(transparent)]
    InvalidSequence(#[from] SequenceError),

    /// First and last entry fall on different calendar dates.
    #[error("list of entries must be for the same day (first on {first}, last on {last})")]
    CrossDayEntries { first: NaiveDate, last: NaiveDate },

    /// The requested target exceeds the policy's daily maximum.
    #[error("a maximum working time of {} hours per day is allowed", .max.num_hours())]
    MaxTimeReached { max: Duration },

    /// The solved leave time lies outside the configured business hours.
    #[error("business hours are from {} to {}", .open.format("%-H:%M"), .close.format("%-H:%M"))]
    OutOfBusinessHours { open: NaiveTime, close: NaiveTime },

    /// Break time passed to the solver is negative.
    #[error("break time must not be negative, got {} minutes", .break_time.num_minutes())]
    NegativeBreak { break_time: Duration },

    /// The solved leave time cannot be represented.
    #[error("leave time is out of range")]
    LeaveTimeOutOfRange,
}

/// Ways an entry sequence can violate the presence state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SequenceError {
    /// The first entry is not a `come`.
    #[error("work started without a come entry (first entry is {found})")]
    MissingCome { found: EntryKind },

    /// An entry arrived in a state that does not accept it.
    #[error("unexpected entry {kind} at index {index} while {state}")]
    UnexpectedEntry {
        kind: EntryKind,
        index: usize,
        state: PresenceState,
    },
}

/// Reasons a custom break policy is rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PolicyError {
    #[error("tier {index}: threshold must be positive")]
    NonPositiveThreshold { index: usize },

    #[error("tier {index}: minimum break must be positive")]
    NonPositiveBreak { index: usize },

    #[error("tier {index}: thresholds must be strictly increasing")]
    ThresholdsNotIncreasing { index: usize },

    #[error("tier {index}: minimum breaks must not decrease")]
    BreaksDecreasing { index: usize },

    #[error(
        "maximum work time of {max_work_minutes} minutes must exceed the last threshold of {threshold_minutes} minutes"
    )]
    CapBelowThreshold {
        max_work_minutes: i64,
        threshold_minutes: i64,
    },

    #[error("maximum work time must be positive")]
    NonPositiveCap,

    #[error("business hours must open before they close ({open} - {close})")]
    EmptyBusinessHours { open: NaiveTime, close: NaiveTime },

    #[error("invalid time of day {value:?}, expected HH:MM")]
    InvalidTimeOfDay { value: String },

    #[error("{value} minutes is out of range")]
    MinutesOutOfRange { value: i64 },
}

pub type Result<T> = std::result::Result<T, WorkTimeError>;
