//! Reservoir sampler invariants.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use varz_core::metric::{Metric, MhtSampler, Sample, DEFAULT_SAMPLER_CAPACITY};

/// Deterministic draw source for offers past capacity (splitmix64).
struct Draws(u64);

impl Draws {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9e37_79b9_7f4a_7c15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
        z ^ (z >> 31)
    }

    fn pair(&mut self) -> [u64; 2] {
        [self.next(), self.next()]
    }
}

#[test]
fn holds_first_items_until_full() {
    let mut s = MhtSampler::new(0, 10);
    for i in 0..7 {
        s.add_sample(i, i as i64 * 10, [u64::MAX, u64::MAX]);
    }
    assert_eq!(s.count(), 7);
    let expected: Vec<Sample> = (0..7).map(|i| Sample { time: i, value: i as i64 * 10 }).collect();
    assert_eq!(s.samples(), expected.as_slice());
}

#[test]
fn exactly_full_keeps_everything() {
    let mut s = MhtSampler::new(0, DEFAULT_SAMPLER_CAPACITY);
    for i in 0..DEFAULT_SAMPLER_CAPACITY as u64 {
        s.add_sample(i, i as i64, [0, 0]);
    }
    assert_eq!(s.samples().len(), DEFAULT_SAMPLER_CAPACITY);
    assert!(s.samples().iter().enumerate().all(|(i, x)| x.value == i as i64));
}

#[test]
fn past_capacity_holds_capacity_items_from_stream() {
    let mut s = MhtSampler::new(0, 50);
    let mut draws = Draws(42);
    for i in 0..5_000u64 {
        s.add_sample(i, i as i64, draws.pair());
    }
    assert_eq!(s.count(), 5_000);
    assert_eq!(s.samples().len(), 50);
    for x in s.samples() {
        assert!(x.value >= 0 && x.value < 5_000);
        assert_eq!(x.time as i64, x.value);
    }
    // Each stream item appears at most once.
    let mut values: Vec<i64> = s.samples().iter().map(|x| x.value).collect();
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), 50);
}

#[test]
fn index_in_range_replaces_slot() {
    let mut s = MhtSampler::new(0, 2);
    s.add_sample(1, 10, [0, 0]);
    s.add_sample(2, 20, [0, 0]);
    // count = 3: index (0 << 64 | 1) % 3 = 1 -> slot 1 replaced.
    s.add_sample(3, 30, [0, 1]);
    assert_eq!(s.samples()[0].value, 10);
    assert_eq!(s.samples()[1].value, 30);
    // count = 4: index 3 % 4 = 3 >= capacity -> discarded.
    s.add_sample(4, 40, [0, 3]);
    assert_eq!(s.count(), 4);
    assert_eq!(s.samples()[0].value, 10);
    assert_eq!(s.samples()[1].value, 30);
}

#[test]
fn high_draw_participates_in_index() {
    let mut s = MhtSampler::new(0, 1);
    s.add_sample(1, 1, [0, 0]);
    // count = 2: (1 << 64) % 2 = 0 -> slot 0 replaced.
    s.add_sample(2, 2, [1, 0]);
    assert_eq!(s.samples()[0].value, 2);
    // count = 3: (1 << 64 | 0) % 3 = 1 -> discarded (2^64 mod 3 == 1).
    s.add_sample(3, 3, [1, 0]);
    assert_eq!(s.samples()[0].value, 2);
}

#[test]
fn replacement_is_roughly_uniform() {
    // Offer 20 items to a 10-slot reservoir many times; every item should
    // survive with probability 1/2.
    let mut draws = Draws(7);
    let mut survived = [0u32; 20];
    let rounds = 4_000;
    for _ in 0..rounds {
        let mut s = MhtSampler::new(0, 10);
        for i in 0..20u64 {
            s.add_sample(i, i as i64, draws.pair());
        }
        for x in s.samples() {
            survived[x.value as usize] += 1;
        }
    }
    for (i, n) in survived.iter().enumerate() {
        let p = f64::from(*n) / f64::from(rounds);
        assert!((0.45..0.55).contains(&p), "item {i} survived with p={p}");
    }
}

#[test]
fn json_lists_samples_and_count() {
    let mut s = MhtSampler::new(3, 4);
    s.add_sample(5, 1, [0, 0]);
    s.add_sample(6, -2, [0, 0]);
    assert_eq!(
        s.to_json(),
        r#"{"count":2,"capacity":4,"samples":[{"time":5,"value":1},{"time":6,"value":-2}]}"#
    );
}

#[test]
fn release_frees_samples() {
    let mut s = MhtSampler::new(0, 4);
    s.add_sample(1, 1, [0, 0]);
    s.release();
    assert!(s.samples().is_empty());
    assert_eq!(s.count(), 1);
}

#[test]
fn storage_grows_with_offers_not_capacity() {
    // Reserving the full capacity up front would overflow here.
    let mut s = MhtSampler::new(0, usize::MAX);
    s.add_sample(1, 7, [0, 0]);
    s.add_sample(2, 8, [0, 0]);
    assert_eq!(s.capacity(), usize::MAX);
    assert_eq!(s.samples(), &[Sample { time: 1, value: 7 }, Sample { time: 2, value: 8 }]);
}
