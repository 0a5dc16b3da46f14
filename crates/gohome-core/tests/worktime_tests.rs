//! End-to-end tests for the reduce → adjust → solve pipeline.

use chrono::{DateTime, Duration, FixedOffset, TimeZone};
use gohome_core::{
    BreakPolicy, Config, Entry, EntryKind, SequenceError, WorkTimeError, adjust, reduce,
    reduce_at, solve_leave_time,
};

fn at(hour: u32, minute: u32) -> DateTime<FixedOffset> {
    FixedOffset::east_opt(2 * 3600)
        .expect("valid offset")
        .with_ymd_and_hms(2025, 6, 2, hour, minute, 0)
        .single()
        .expect("valid test timestamp")
}

fn hm(hours: i64, minutes: i64) -> Duration {
    Duration::hours(hours) + Duration::minutes(minutes)
}

#[test]
fn test_short_day_without_break() {
    let entries = [Entry::come(at(9, 10)), Entry::leave(at(15, 37))];
    let day = reduce_at(&entries, at(20, 0)).unwrap();

    assert_eq!(day.work_time, hm(6, 27));
    assert_eq!(day.start, at(9, 10));
    assert_eq!(day.break_time, Duration::zero());

    let accounted = adjust(day.work_time, day.break_time);
    assert_eq!(accounted.work_time, hm(6, 0));
    assert_eq!(accounted.break_time, hm(0, 27));
}

#[test]
fn test_long_day_without_break() {
    let entries = [Entry::come(at(8, 8)), Entry::leave(at(17, 38))];
    let day = reduce_at(&entries, at(20, 0)).unwrap();

    assert_eq!(day.work_time, hm(9, 30));
    assert_eq!(day.break_time, Duration::zero());

    let accounted = adjust(day.work_time, day.break_time);
    assert_eq!(accounted.work_time, hm(9, 0));
    assert_eq!(accounted.break_time, hm(0, 30));
}

#[test]
fn test_trip_is_not_subtracted() {
    let entries = [
        Entry::come(at(9, 0)),
        Entry::trip(at(12, 0)),
        Entry::come(at(13, 0)),
        Entry::leave(at(18, 0)),
    ];
    let day = reduce_at(&entries, at(20, 0)).unwrap();

    assert_eq!(day.work_time, hm(9, 0));
    assert_eq!(day.break_time, Duration::zero());
}

#[test]
fn test_leave_time_for_eight_hours() {
    let leave = solve_leave_time(at(8, 0), Duration::zero(), hm(8, 0)).unwrap();
    assert_eq!(leave, at(16, 30));
}

#[test]
fn test_leave_time_above_cap() {
    let err = solve_leave_time(at(8, 0), Duration::zero(), hm(11, 0)).unwrap_err();
    assert!(matches!(err, WorkTimeError::MaxTimeReached { .. }));
    assert_eq!(
        err.to_string(),
        "a maximum working time of 10 hours per day is allowed"
    );
}

#[test]
fn test_open_day_pipeline() {
    // Came at 7:45, lunch 12:00 - 12:20, still at work at 13:00.
    let entries = [
        Entry::come(at(7, 45)),
        Entry::leave(at(12, 0)),
        Entry::come(at(12, 20)),
    ];
    let day = reduce_at(&entries, at(13, 0)).unwrap();
    assert_eq!(day.work_time, hm(4, 55));
    assert_eq!(day.break_time, hm(0, 20));

    // 20 minutes taken, 10 more are deducted once past six hours.
    let leave = solve_leave_time(day.start, day.break_time, hm(8, 0)).unwrap();
    assert_eq!(leave, at(16, 15));
}

#[test]
fn test_closed_day_ignores_wall_clock() {
    let entries = [
        Entry::come(at(8, 0)),
        Entry::leave(at(12, 0)),
        Entry::come(at(12, 30)),
        Entry::leave(at(16, 30)),
    ];
    assert_eq!(reduce(&entries), reduce_at(&entries, at(23, 59)));
}

#[test]
fn test_invalid_sequences() {
    let empty: Vec<Entry<FixedOffset>> = Vec::new();
    assert_eq!(reduce_at(&empty, at(9, 0)), Err(WorkTimeError::NoEntries));

    let starts_with_leave = [Entry::leave(at(8, 0)), Entry::leave(at(9, 0))];
    assert_eq!(
        reduce_at(&starts_with_leave, at(9, 0)),
        Err(WorkTimeError::InvalidSequence(SequenceError::MissingCome {
            found: EntryKind::Leave,
        }))
    );

    let double_leave = [
        Entry::come(at(8, 0)),
        Entry::leave(at(9, 0)),
        Entry::leave(at(10, 0)),
    ];
    assert!(matches!(
        reduce_at(&double_leave, at(11, 0)),
        Err(WorkTimeError::InvalidSequence(
            SequenceError::UnexpectedEntry { index: 2, .. }
        ))
    ));
}

#[test]
fn test_configured_policy_drives_solver() {
    let policy = Config::default().policy().unwrap();
    assert_eq!(&policy, BreakPolicy::statutory());

    let leave = policy
        .solve_leave_time(at(8, 0), Duration::zero(), hm(8, 0))
        .unwrap();
    assert_eq!(leave, solve_leave_time(at(8, 0), Duration::zero(), hm(8, 0)).unwrap());
}
