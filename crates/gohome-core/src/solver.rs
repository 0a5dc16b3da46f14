//! Leave time solver.
//!
//! Finds the earliest minute at which the accounted work time of a day
//! reaches a target. Accounted work is monotone in raw work time, so a linear
//! search upwards from the target itself finds the smallest solution.

use chrono::{DateTime, Duration, TimeZone};

use crate::error::{Result, WorkTimeError};
use crate::policy::BreakPolicy;

/// Granularity of the search.
fn search_step() -> Duration {
    Duration::minutes(1)
}

impl BreakPolicy {
    /// Returns the earliest leave time at which accounted work since `start`
    /// reaches `target`, given `break_time` already taken.
    ///
    /// The result is exact to one minute.
    ///
    /// # Errors
    ///
    /// - [`WorkTimeError::MaxTimeReached`] if `target` exceeds the daily
    ///   maximum.
    /// - [`WorkTimeError::NegativeBreak`] if `break_time` is negative.
    /// - [`WorkTimeError::OutOfBusinessHours`] if the policy has business
    ///   hours and the leave time falls after closing on the start date.
    /// - [`WorkTimeError::LeaveTimeOutOfRange`] if the leave time cannot be
    ///   represented.
    pub fn solve_leave_time<Tz: TimeZone>(
        &self,
        start: DateTime<Tz>,
        break_time: Duration,
        target: Duration,
    ) -> Result<DateTime<Tz>> {
        if target > self.max_work() {
            return Err(WorkTimeError::MaxTimeReached {
                max: self.max_work(),
            });
        }
        if break_time < Duration::zero() {
            return Err(WorkTimeError::NegativeBreak { break_time });
        }

        // Terminates: accounted work saturates at max_work, which is >= target.
        let mut work_time = target;
        let mut steps = 0_u32;
        let accounted = loop {
            let accounted = self.adjust(work_time, break_time);
            if accounted.work_time >= target {
                break accounted;
            }
            work_time += search_step();
            steps += 1;
        };

        let leave = accounted
            .work_time
            .checked_add(&accounted.break_time)
            .and_then(|presence| start.clone().checked_add_signed(presence))
            .ok_or(WorkTimeError::LeaveTimeOutOfRange)?;
        tracing::debug!(
            steps,
            work_minutes = accounted.work_time.num_minutes(),
            break_minutes = accounted.break_time.num_minutes(),
            leave = %leave.naive_local(),
            "solved leave time"
        );

        if let Some(hours) = self.business_hours() {
            let closing = start.date_naive().and_time(hours.close);
            if leave.naive_local() > closing {
                return Err(WorkTimeError::OutOfBusinessHours {
                    open: hours.open,
                    close: hours.close,
                });
            }
        }

        Ok(leave)
    }
}

/// [`BreakPolicy::solve_leave_time`] with the statutory policy.
pub fn solve_leave_time<Tz: TimeZone>(
    start: DateTime<Tz>,
    break_time: Duration,
    target: Duration,
) -> Result<DateTime<Tz>> {
    BreakPolicy::statutory().solve_leave_time(start, break_time, target)
}
