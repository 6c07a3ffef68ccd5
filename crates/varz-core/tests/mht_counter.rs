//! Minute/hour/total counter windows.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use varz_core::metric::{Metric, MhtCounter};
use varz_core::time::{make_time, minutes_since_epoch};

#[test]
fn fresh_counter_is_zero() {
    let c = MhtCounter::new(10);
    assert_eq!(c.total(), 0);
    assert_eq!(c.last_minute(), 0);
    assert_eq!(c.last_hour(), 0);
    assert_eq!(
        c.to_json(),
        r#"{"total":0,"last_minute":0,"last_hour":0,"last_minute_rate":0,"last_hour_rate":0,"start_time":10}"#
    );
}

#[test]
fn same_minute_accumulates() {
    let mut c = MhtCounter::new(0);
    c.increment(make_time(0, 1, 5, 0), 2);
    c.increment(make_time(0, 1, 5, 59), 3);
    assert_eq!(c.total(), 5);
    assert_eq!(c.last_minute(), 5);
    assert_eq!(c.last_hour(), 5);
}

#[test]
fn minute_rolls_into_hour() {
    let mut c = MhtCounter::new(0);
    c.increment(make_time(0, 0, 0, 10), 4);
    c.increment(make_time(0, 0, 1, 10), 6);
    assert_eq!(c.last_minute(), 6);
    assert_eq!(c.last_hour(), 10);
    assert_eq!(c.total(), 10);
}

#[test]
fn buckets_age_out_after_an_hour() {
    let mut c = MhtCounter::new(0);
    c.increment(make_time(0, 0, 0, 0), 1);
    c.increment(make_time(0, 0, 30, 0), 2);
    c.increment(make_time(0, 1, 0, 0), 4);
    // minute 0 left the window, 30 and 60 remain.
    assert_eq!(c.last_hour(), 6);
    assert_eq!(c.last_minute(), 4);
    assert_eq!(c.total(), 7);

    c.increment(make_time(1, 0, 0, 0), 8);
    assert_eq!(c.last_hour(), 8);
    assert_eq!(c.last_minute(), 8);
    assert_eq!(c.total(), 15);
}

#[test]
fn out_of_order_inside_horizon_lands_in_window() {
    let mut c = MhtCounter::new(0);
    c.increment(make_time(0, 0, 40, 0), 1);
    c.increment(make_time(0, 0, 10, 0), 2);
    assert_eq!(c.last_minute(), 1);
    assert_eq!(c.last_hour(), 3);
    assert_eq!(c.total(), 3);
}

#[test]
fn far_past_only_touches_total() {
    let mut c = MhtCounter::new(0);
    c.increment(make_time(2, 0, 0, 0), 5);
    c.increment(make_time(0, 0, 0, 0), 100);
    c.increment(make_time(1, 23, 0, 0), 7);
    assert_eq!(c.total(), 112);
    assert_eq!(c.last_hour(), 5);
    assert_eq!(c.last_minute(), 5);
}

#[test]
fn rates_divide_by_window_length() {
    let mut c = MhtCounter::new(0);
    c.increment(make_time(0, 0, 0, 0), 120);
    c.increment(make_time(0, 0, 1, 0), 60);
    assert_eq!(c.last_minute_rate(), 1.0);
    assert_eq!(c.last_hour_rate(), 180.0 / 3600.0);
}

#[test]
fn time_helpers() {
    assert_eq!(make_time(1, 2, 3, 4), 86_400 + 7_200 + 180 + 4);
    assert_eq!(minutes_since_epoch(make_time(0, 1, 0, 59)), 60);
}

#[test]
fn make_time_saturates() {
    assert_eq!(make_time(u64::MAX, 1, 1, 1), u64::MAX);
    assert_eq!(make_time(0, 0, u64::MAX / 60 + 1, 0), u64::MAX);
    assert_eq!(make_time(0, 0, 0, u64::MAX), u64::MAX);
}
