//! Minute/hour/total counter.
//!
//! Buckets are one minute wide and tagged with the minute they hold, in a ring
//! of `WINDOW_MINUTES` slots. A slot is reset lazily when a newer minute maps
//! onto it. The horizon is the hour ending at the newest minute this counter
//! has seen; adds older than that only reach `total`.

use crate::json::JsonWriter;
use crate::metric::Metric;
use crate::time::{minutes_since_epoch, VarzTime, SEC_IN_MIN};

/// Number of minute buckets (one hour).
pub const WINDOW_MINUTES: usize = 60;

#[derive(Debug, Clone, Copy, Default)]
struct Bucket {
    minute: u64,
    amount: i64,
}

#[derive(Debug, Clone)]
pub struct MhtCounter {
    start_time: VarzTime,
    total: i64,
    latest_minute: Option<u64>,
    buckets: [Bucket; WINDOW_MINUTES],
}

impl MhtCounter {
    pub fn new(start_time: VarzTime) -> Self {
        Self {
            start_time,
            total: 0,
            latest_minute: None,
            buckets: [Bucket::default(); WINDOW_MINUTES],
        }
    }

    pub fn start_time(&self) -> VarzTime {
        self.start_time
    }

    pub fn total(&self) -> i64 {
        self.total
    }

    pub fn increment(&mut self, time: VarzTime, amount: i64) {
        self.total = self.total.saturating_add(amount);

        let minute = minutes_since_epoch(time);
        let latest = match self.latest_minute.filter(|&l| l >= minute) {
            Some(l) => l,
            None => {
                self.latest_minute = Some(minute);
                minute
            }
        };
        if !in_horizon(latest, minute) {
            tracing::trace!(time, latest_minute = latest, "add older than window, total only");
            return;
        }

        let b = &mut self.buckets[(minute % WINDOW_MINUTES as u64) as usize];
        if b.minute != minute {
            // Slot still holds a minute at least an hour older.
            *b = Bucket { minute, amount: 0 };
        }
        b.amount = b.amount.saturating_add(amount);
    }

    /// Amount added during the newest minute seen.
    pub fn last_minute(&self) -> i64 {
        let Some(latest) = self.latest_minute else { return 0 };
        let b = &self.buckets[(latest % WINDOW_MINUTES as u64) as usize];
        if b.minute == latest {
            b.amount
        } else {
            0
        }
    }

    /// Amount added during the hour ending at the newest minute seen.
    pub fn last_hour(&self) -> i64 {
        let Some(latest) = self.latest_minute else { return 0 };
        self.buckets
            .iter()
            .filter(|b| in_horizon(latest, b.minute))
            .fold(0i64, |acc, b| acc.saturating_add(b.amount))
    }

    /// Per-second rate over the last minute.
    pub fn last_minute_rate(&self) -> f64 {
        self.last_minute() as f64 / SEC_IN_MIN as f64
    }

    /// Per-second rate over the last hour.
    pub fn last_hour_rate(&self) -> f64 {
        self.last_hour() as f64 / (WINDOW_MINUTES as u64 * SEC_IN_MIN) as f64
    }
}

fn in_horizon(latest: u64, minute: u64) -> bool {
    minute <= latest && latest - minute < WINDOW_MINUTES as u64
}

impl Metric for MhtCounter {
    fn write_json(&self, w: &mut JsonWriter) {
        w.dict_start();
        w.dict_key("total");
        w.signed(self.total);
        w.dict_next_key();
        w.dict_key("last_minute");
        w.signed(self.last_minute());
        w.dict_next_key();
        w.dict_key("last_hour");
        w.signed(self.last_hour());
        w.dict_next_key();
        w.dict_key("last_minute_rate");
        w.float(self.last_minute_rate());
        w.dict_next_key();
        w.dict_key("last_hour_rate");
        w.float(self.last_hour_rate());
        w.dict_next_key();
        w.dict_key("start_time");
        w.unsigned(self.start_time);
        w.dict_end();
    }
}
