//! Statutory break policy.
//!
//! Work beyond a tier's threshold only counts once the tier's minimum break
//! has been taken. A break that is too short is topped up from work time
//! instead of being rejected, and whatever exceeds the daily maximum is
//! moved into break time as well. Every step keeps `work + break` constant.
//!
//! With the statutory defaults:
//!
//! - 09:10 - 15:37 without a break accounts as 6:00 work and 0:27 break.
//! - 08:08 - 17:38 without a break accounts as 9:00 work and 0:30 break.

use std::sync::LazyLock;

use chrono::{Duration, NaiveTime};

use crate::error::PolicyError;

/// Work and break time after applying a [`BreakPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Accounted {
    pub work_time: Duration,
    pub break_time: Duration,
}

impl Accounted {
    pub const fn new(work_time: Duration, break_time: Duration) -> Self {
        Self {
            work_time,
            break_time,
        }
    }

    /// Presence time covered by this split.
    pub fn total(&self) -> Duration {
        self.work_time + self.break_time
    }
}

/// A minimum break that applies once work exceeds `after`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BreakTier {
    /// Work time above which the tier applies.
    pub after: Duration,
    /// Break required once the tier applies.
    pub min_break: Duration,
}

impl BreakTier {
    pub const fn new(after: Duration, min_break: Duration) -> Self {
        Self { after, min_break }
    }

    /// Moves work time into break time until the tier is satisfied.
    ///
    /// If the whole presence beyond `after` is shorter than `min_break`, work
    /// is held at `after` and the rest becomes break.
    pub fn apply(&self, accounted: Accounted) -> Accounted {
        let Accounted {
            work_time,
            break_time,
        } = accounted;

        if work_time <= self.after || break_time >= self.min_break {
            return accounted;
        }

        let slack = work_time + break_time - self.after;
        if slack < self.min_break {
            Accounted::new(self.after, slack)
        } else {
            Accounted::new(work_time + break_time - self.min_break, self.min_break)
        }
    }
}

/// Opening hours that a solved leave time must not exceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessHours {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl BusinessHours {
    pub fn new(open: NaiveTime, close: NaiveTime) -> Result<Self, PolicyError> {
        if open >= close {
            return Err(PolicyError::EmptyBusinessHours { open, close });
        }
        Ok(Self { open, close })
    }
}

/// Ordered break tiers plus a daily cap on accounted work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BreakPolicy {
    tiers: Vec<BreakTier>,
    max_work: Duration,
    business_hours: Option<BusinessHours>,
}

static STATUTORY: LazyLock<BreakPolicy> = LazyLock::new(|| BreakPolicy {
    tiers: vec![
        BreakTier::new(Duration::hours(6), Duration::minutes(30)),
        BreakTier::new(Duration::hours(9), Duration::minutes(45)),
    ],
    max_work: Duration::hours(10),
    business_hours: None,
});

impl Default for BreakPolicy {
    fn default() -> Self {
        Self::statutory().clone()
    }
}

impl BreakPolicy {
    /// Builds a custom policy.
    ///
    /// Thresholds must be positive and strictly increasing, minimum breaks
    /// positive and non-decreasing, and `max_work` above the last threshold.
    pub fn new(tiers: Vec<BreakTier>, max_work: Duration) -> Result<Self, PolicyError> {
        let mut previous: Option<&BreakTier> = None;
        for (index, tier) in tiers.iter().enumerate() {
            if tier.after <= Duration::zero() {
                return Err(PolicyError::NonPositiveThreshold { index });
            }
            if tier.min_break <= Duration::zero() {
                return Err(PolicyError::NonPositiveBreak { index });
            }
            if let Some(prev) = previous {
                if tier.after <= prev.after {
                    return Err(PolicyError::ThresholdsNotIncreasing { index });
                }
                if tier.min_break < prev.min_break {
                    return Err(PolicyError::BreaksDecreasing { index });
                }
            }
            previous = Some(tier);
        }

        if let Some(last) = tiers.last().filter(|last| max_work <= last.after) {
            return Err(PolicyError::CapBelowThreshold {
                max_work_minutes: max_work.num_minutes(),
                threshold_minutes: last.after.num_minutes(),
            });
        }
        if max_work <= Duration::zero() {
            return Err(PolicyError::NonPositiveCap);
        }

        Ok(Self {
            tiers,
            max_work,
            business_hours: None,
        })
    }

    /// The statutory rules: 30 minutes after 6 hours, 45 minutes after 9
    /// hours, at most 10 hours of work per day.
    pub fn statutory() -> &'static Self {
        &STATUTORY
    }

    /// Restricts solved leave times to `hours`.
    #[must_use]
    pub fn with_business_hours(mut self, hours: BusinessHours) -> Self {
        self.business_hours = Some(hours);
        self
    }

    pub fn tiers(&self) -> &[BreakTier] {
        &self.tiers
    }

    pub const fn max_work(&self) -> Duration {
        self.max_work
    }

    pub const fn business_hours(&self) -> Option<BusinessHours> {
        self.business_hours
    }

    /// Splits raw work and break time into accounted work and break time.
    pub fn adjust(&self, work_time: Duration, break_time: Duration) -> Accounted {
        let accounted = self
            .tiers
            .iter()
            .fold(Accounted::new(work_time, break_time), |acc, tier| {
                tier.apply(acc)
            });
        self.cap(accounted)
    }

    /// Moves work above the daily maximum into break time.
    fn cap(&self, accounted: Accounted) -> Accounted {
        if accounted.work_time <= self.max_work {
            return accounted;
        }
        Accounted::new(self.max_work, accounted.total() - self.max_work)
    }
}

/// [`BreakPolicy::adjust`] with the statutory policy.
pub fn adjust(work_time: Duration, break_time: Duration) -> Accounted {
    BreakPolicy::statutory().adjust(work_time, break_time)
}
