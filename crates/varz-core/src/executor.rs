//! Operation executor.
//!
//! Owns the counter and sampler stores plus engine metadata. Each call to
//! [`Executor::execute`] is a complete transaction; `&mut self` keeps at most
//! one in flight per engine.

use std::sync::Arc;

use crate::error::Result;
use crate::hash::hash_name;
use crate::json::JsonWriter;
use crate::metric::{Metric, MhtCounter, MhtSampler, DEFAULT_SAMPLER_CAPACITY};
use crate::protocol::{Operation, OperationDescriptor, OperationRecord};
use crate::store::Store;
use crate::time::{Clock, VarzTime};

pub const DEFAULT_SLOT_COUNT: usize = 1024;

/// Engine sizing, fixed for the executor's lifetime (flush keeps it).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    pub slot_count: usize,
    pub sampler_capacity: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            slot_count: DEFAULT_SLOT_COUNT,
            sampler_capacity: DEFAULT_SAMPLER_CAPACITY,
        }
    }
}

/// Process-wide engine facts reported in snapshots.
#[derive(Debug, Clone, Copy)]
pub struct Metadata {
    pub start_time: VarzTime,
}

pub struct Executor {
    counters: Store<MhtCounter>,
    samplers: Store<MhtSampler>,
    metadata: Metadata,
    options: EngineOptions,
    clock: Arc<dyn Clock>,
}

impl Executor {
    /// Engine with `slot_count` slots per store and the default sampler capacity.
    pub fn new(slot_count: usize, clock: Arc<dyn Clock>) -> Self {
        Self::with_options(
            EngineOptions {
                slot_count,
                ..EngineOptions::default()
            },
            clock,
        )
    }

    pub fn with_options(options: EngineOptions, clock: Arc<dyn Clock>) -> Self {
        let start_time = clock.now();
        Self {
            counters: Store::new(options.slot_count),
            samplers: Store::new(options.slot_count),
            metadata: Metadata { start_time },
            options,
            clock,
        }
    }

    pub fn counters(&self) -> &Store<MhtCounter> {
        &self.counters
    }

    pub fn samplers(&self) -> &Store<MhtSampler> {
        &self.samplers
    }

    pub fn metadata(&self) -> Metadata {
        self.metadata
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }

    /// Run one operation. Reads return `Some(text)`; mutations return `None`.
    pub fn execute(&mut self, desc: &OperationDescriptor) -> Result<Option<String>> {
        let name = desc.variable_name().as_str();
        match *desc.op() {
            Operation::Invalid => Ok(None),
            Operation::CounterAdd { time, amount } => {
                self.counter_add(name, time, amount);
                Ok(None)
            }
            Operation::SamplerAdd {
                time,
                value,
                randomness,
            } => {
                self.sampler_add(name, time, value, randomness);
                Ok(None)
            }
            Operation::DumpAllJson => Ok(Some(self.dump_all_json())),
            Operation::ListAllJson => Ok(Some(self.list_all_json())),
            Operation::FlushAll => {
                self.flush_all();
                Ok(None)
            }
            Operation::CounterGet => Ok(Some(self.counter_get(name))),
        }
    }

    /// Decode a raw record and run it. Decoding failures leave the engine untouched.
    pub fn execute_record(&mut self, record: OperationRecord) -> Result<Option<String>> {
        let desc = record.into_descriptor()?;
        self.execute(&desc)
    }

    // --------------------
    // Handlers
    // --------------------

    fn counter_add(&mut self, name: &str, time: VarzTime, amount: i64) {
        let name_hash = hash_name(name);
        let counter = self.counters.get_or_add_with(name, name_hash, || {
            tracing::debug!(%name, name_hash, "creating counter");
            MhtCounter::new(time)
        });
        counter.increment(time, amount);
    }

    fn sampler_add(&mut self, name: &str, time: VarzTime, value: i64, randomness: [u64; 2]) {
        let name_hash = hash_name(name);
        let capacity = self.options.sampler_capacity;
        let sampler = self.samplers.get_or_add_with(name, name_hash, || {
            tracing::debug!(%name, name_hash, capacity, "creating sampler");
            MhtSampler::new(time, capacity)
        });
        sampler.add_sample(time, value, randomness);
    }

    fn counter_get(&self, name: &str) -> String {
        let name_hash = hash_name(name);
        match self.counters.get(name, name_hash) {
            Some(counter) => counter.to_json(),
            None => String::new(),
        }
    }

    fn dump_all_json(&self) -> String {
        let mut w = JsonWriter::new();
        w.dict_start();
        w.dict_key("mht_counters");
        write_entries(&self.counters, &mut w);

        w.dict_next_key();
        w.dict_key("mht_samplers");
        write_entries(&self.samplers, &mut w);

        w.dict_next_key();
        w.dict_key("metadata");
        w.dict_start();
        w.dict_key("start_time");
        w.unsigned(self.metadata.start_time);
        w.dict_end();

        w.dict_end();
        w.finish()
    }

    fn list_all_json(&self) -> String {
        let mut w = JsonWriter::new();
        w.dict_start();
        w.dict_key("mht_counters");
        write_names(&self.counters, &mut w);

        w.dict_next_key();
        w.dict_key("mht_samplers");
        write_names(&self.samplers, &mut w);

        w.dict_end();
        w.finish()
    }

    fn flush_all(&mut self) {
        let slots = self.counters.num_slots();
        tracing::info!(
            counters = self.counters.len(),
            samplers = self.samplers.len(),
            slots,
            "flushing all variables"
        );
        // Old stores drop here, releasing every value.
        self.counters = Store::new(slots);
        self.samplers = Store::new(slots);
        self.metadata = Metadata {
            start_time: self.clock.now(),
        };
    }
}

/// `[{"name":..,"value":..,"name_hash":..},...]`
fn write_entries<V: Metric>(store: &Store<V>, w: &mut JsonWriter) {
    w.array_start();
    let mut n = 0usize;
    store.visit(|e| {
        if n != 0 {
            w.array_next_item();
        }
        w.dict_start();
        w.dict_key("name");
        w.string(e.name());
        w.dict_next_key();
        w.dict_key("value");
        e.value().write_json(w);
        w.dict_next_key();
        w.dict_key("name_hash");
        w.unsigned(e.name_hash());
        w.dict_end();
        n += 1;
    });
    w.array_end();
}

/// `["name",...]`
fn write_names<V: Metric>(store: &Store<V>, w: &mut JsonWriter) {
    w.array_start();
    let mut n = 0usize;
    store.visit(|e| {
        if n != 0 {
            w.array_next_item();
        }
        w.string(e.name());
        n += 1;
    });
    w.array_end();
}
