//! Reservoir sampler (Algorithm R).
//!
//! Randomness is supplied by the caller on every offer, so a replayed stream
//! of offers always yields the same reservoir. The two 64-bit draws are joined
//! into one 128-bit value and reduced modulo `count`; the modulo bias is below
//! 2^-64 for any reachable `count`.

use crate::json::JsonWriter;
use crate::metric::Metric;
use crate::time::VarzTime;

pub const DEFAULT_SAMPLER_CAPACITY: usize = 1000;

/// One retained observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sample {
    pub time: VarzTime,
    pub value: i64,
}

#[derive(Debug, Clone)]
pub struct MhtSampler {
    start_time: VarzTime,
    capacity: usize,
    count: u64,
    samples: Vec<Sample>,
}

impl MhtSampler {
    /// A `capacity` of zero is treated as one. Storage grows with the offers,
    /// up to `capacity`.
    pub fn new(start_time: VarzTime, capacity: usize) -> Self {
        Self {
            start_time,
            capacity: capacity.max(1),
            count: 0,
            samples: Vec::new(),
        }
    }

    pub fn start_time(&self) -> VarzTime {
        self.start_time
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of values ever offered.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Retained samples. In offer order until the reservoir first fills.
    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub fn add_sample(&mut self, time: VarzTime, value: i64, randomness: [u64; 2]) {
        self.count = self.count.saturating_add(1);
        let sample = Sample { time, value };

        if self.samples.len() < self.capacity {
            self.samples.push(sample);
            return;
        }

        let j = uniform_index(randomness, self.count);
        if j < self.capacity as u64 {
            self.samples[j as usize] = sample;
        }
    }
}

/// Uniform index in `[0, bound)` from two caller draws.
fn uniform_index(randomness: [u64; 2], bound: u64) -> u64 {
    let wide = (u128::from(randomness[0]) << 64) | u128::from(randomness[1]);
    (wide % u128::from(bound.max(1))) as u64
}

impl Metric for MhtSampler {
    fn write_json(&self, w: &mut JsonWriter) {
        w.dict_start();
        w.dict_key("count");
        w.unsigned(self.count);
        w.dict_next_key();
        w.dict_key("capacity");
        w.unsigned(self.capacity as u64);
        w.dict_next_key();
        w.dict_key("samples");
        w.array_start();
        for (i, s) in self.samples.iter().enumerate() {
            if i != 0 {
                w.array_next_item();
            }
            w.dict_start();
            w.dict_key("time");
            w.unsigned(s.time);
            w.dict_next_key();
            w.dict_key("value");
            w.signed(s.value);
            w.dict_end();
        }
        w.array_end();
        w.dict_end();
    }

    fn release(&mut self) {
        self.samples = Vec::new();
    }
}
