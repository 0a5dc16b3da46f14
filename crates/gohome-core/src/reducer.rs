//! Presence reducer.
//!
//! Folds a day's entries into actual work time, start time and break time.
//!
//! # State machine
//!
//! | State     | Entry   | Effect       | Next      |
//! |-----------|---------|--------------|-----------|
//! | `Absent`  | `come`  | `MarkCome`   | `Working` |
//! | `Working` | `leave` | `AccrueWork` | `Absent`  |
//! | `Working` | `trip`  | `Nothing`    | `Trip`    |
//! | `Trip`    | `come`  | `Nothing`    | `Working` |
//!
//! Every other pair is rejected. Returning from a trip does not move the
//! last `come` instant, so the time spent on a trip is counted as work.

use std::fmt;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::entry::{Entry, EntryKind};
use crate::error::{Result, SequenceError, WorkTimeError};
use crate::policy::{Accounted, BreakPolicy};

/// Where the employee is while walking through the entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresenceState {
    /// Not at work.
    #[default]
    Absent,
    /// At work since the last `come`.
    Working,
    /// Out on a business trip.
    Trip,
}

impl fmt::Display for PresenceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Absent => "absent",
            Self::Working => "working",
            Self::Trip => "on trip",
        };
        write!(f, "{s}")
    }
}

/// What a transition does to the running totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// Remember the entry's instant as the start of the current work span.
    MarkCome,
    /// Add the span since the last `come` to the work time.
    AccrueWork,
    /// Leave the totals untouched.
    Nothing,
}

/// Returns the next state and effect for an entry, or `None` if the current
/// state does not accept it.
pub const fn transition(state: PresenceState, kind: EntryKind) -> Option<(PresenceState, Effect)> {
    use EntryKind::{Come, Leave, Trip};
    use PresenceState::{Absent, Working};

    match (state, kind) {
        (Absent, Come) => Some((Working, Effect::MarkCome)),
        (Working, Leave) => Some((Absent, Effect::AccrueWork)),
        (Working, Trip) => Some((PresenceState::Trip, Effect::Nothing)),
        (PresenceState::Trip, Come) => Some((Working, Effect::Nothing)),
        (Absent, Leave | Trip) | (Working, Come) | (PresenceState::Trip, Leave | Trip) => None,
    }
}

/// Result of reducing one day's entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDay<Tz: TimeZone> {
    /// Time spent between `come` and `leave`, trips included.
    pub work_time: Duration,
    /// Instant of the first entry.
    pub start: DateTime<Tz>,
    /// Instant of the terminal `leave`, synthetic if the day is still open.
    pub end: DateTime<Tz>,
    /// Presence time not spent working.
    pub break_time: Duration,
}

impl<Tz: TimeZone> WorkDay<Tz> {
    /// Wall-clock span between the first and the terminal entry.
    pub fn presence_time(&self) -> Duration {
        self.end.clone() - self.start.clone()
    }

    /// Applies `policy` to the raw work and break times.
    pub fn accounted(&self, policy: &BreakPolicy) -> Accounted {
        policy.adjust(self.work_time, self.break_time)
    }
}

/// Reduces entries, closing an open day at the current wall-clock time.
///
/// The clock is read once, before the reduction starts.
pub fn reduce<Tz: TimeZone>(entries: &[Entry<Tz>]) -> Result<WorkDay<Tz>> {
    let first = entries.first().ok_or(WorkTimeError::NoEntries)?;
    let now = Utc::now().with_timezone(&first.at.timezone());
    reduce_at(entries, now)
}

/// Reduces entries, closing an open day at `now`.
///
/// # Errors
///
/// - [`WorkTimeError::NoEntries`] for an empty slice.
/// - [`WorkTimeError::InvalidSequence`] if the day does not start with a
///   `come` or an entry is not accepted by the current state.
/// - [`WorkTimeError::CrossDayEntries`] if the first and last entry are on
///   different dates. Interior entries are not checked.
pub fn reduce_at<Tz: TimeZone>(entries: &[Entry<Tz>], now: DateTime<Tz>) -> Result<WorkDay<Tz>> {
    let (Some(first), Some(last)) = (entries.first(), entries.last()) else {
        return Err(WorkTimeError::NoEntries);
    };

    if first.kind != EntryKind::Come {
        return Err(SequenceError::MissingCome { found: first.kind }.into());
    }

    let (first_date, last_date) = (first.at.date_naive(), last.at.date_naive());
    if first_date != last_date {
        return Err(WorkTimeError::CrossDayEntries {
            first: first_date,
            last: last_date,
        });
    }

    // An open day is closed by a virtual leave so it can be computed live.
    let synthetic = (last.kind != EntryKind::Leave).then(|| {
        if now < last.at {
            tracing::warn!(
                now = %now.naive_local(),
                last = %last.at.naive_local(),
                "closing open day before its last entry"
            );
        }
        Entry::leave(now)
    });

    let mut state = PresenceState::Absent;
    let mut work_time = Duration::zero();
    let mut last_come = first.at.clone();

    for (index, entry) in entries.iter().chain(synthetic.as_ref()).enumerate() {
        let (next, effect) =
            transition(state, entry.kind).ok_or(SequenceError::UnexpectedEntry {
                kind: entry.kind,
                index,
                state,
            })?;
        tracing::trace!(index, %state, %next, ?effect, "presence transition");

        match effect {
            Effect::MarkCome => last_come = entry.at.clone(),
            Effect::AccrueWork => work_time += entry.at.clone() - last_come.clone(),
            Effect::Nothing => {}
        }
        state = next;
    }

    let end = synthetic.map_or_else(|| last.at.clone(), |leave| leave.at);
    let presence_time = end.clone() - first.at.clone();
    let day = WorkDay {
        work_time,
        start: first.at.clone(),
        end,
        break_time: presence_time - work_time,
    };
    tracing::debug!(
        work_minutes = day.work_time.num_minutes(),
        break_minutes = day.break_time.num_minutes(),
        "reduced entries"
    );
    Ok(day)
}
