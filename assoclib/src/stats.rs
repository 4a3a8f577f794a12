use serde::Serialize;
use crate::classifier::MissClassification;

/// Whether an access hit, and why it missed if it did not
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessKind {
    Hit,
    Miss(MissClassification),
}

/// Running counters for a simulation, plus the rates derived from them after every access
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Counters {
    pub hits: u64,
    pub misses: u64,
    pub compulsory_misses: u64,
    pub conflict_misses: u64,
    pub capacity_misses: u64,
    /// Percentage of accesses which hit
    pub hit_rate: f64,
    /// Percentage of accesses which missed
    pub miss_rate: f64,
    /// Mean cycles per access
    pub average_access_time: f64,
}

impl Counters {
    pub fn total_accesses(&self) -> u64 {
        self.hits + self.misses
    }
}

/// The counters as they stood after a given step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistorySnapshot {
    pub step: u64,
    #[serde(flatten)]
    pub counters: Counters,
}

/// Accumulates counters over a run and keeps the periodic snapshot history
#[derive(Debug, Clone)]
pub struct StatisticsAggregator {
    counters: Counters,
    total_latency: u64,
    hit_latency: u64,
    miss_latency: u64,
    history: Vec<HistorySnapshot>,
}

impl StatisticsAggregator {
    pub fn new(hit_latency: u64, miss_latency: u64) -> Self {
        Self {
            counters: Counters::default(),
            total_latency: 0,
            hit_latency,
            miss_latency,
            history: Vec::new(),
        }
    }

    /// Records one access and refreshes the derived rates
    pub fn on_access(&mut self, kind: AccessKind) -> &Counters {
        let counters = &mut self.counters;
        match kind {
            AccessKind::Hit => {
                counters.hits += 1;
                self.total_latency += self.hit_latency;
            }
            AccessKind::Miss(classification) => {
                counters.misses += 1;
                self.total_latency += self.miss_latency;
                match classification {
                    MissClassification::Compulsory => counters.compulsory_misses += 1,
                    MissClassification::Conflict => counters.conflict_misses += 1,
                    MissClassification::Capacity => counters.capacity_misses += 1,
                }
            }
        }
        let total = counters.total_accesses() as f64;
        counters.hit_rate = counters.hits as f64 / total * 100.0;
        counters.miss_rate = counters.misses as f64 / total * 100.0;
        counters.average_access_time = self.total_latency as f64 / total;
        counters
    }

    /// Appends a copy of the current counters to the history. Counters are left untouched
    pub fn capture_snapshot(&mut self, step: u64) {
        self.history.push(HistorySnapshot {
            step,
            counters: self.counters.clone(),
        });
    }

    pub fn counters(&self) -> &Counters {
        &self.counters
    }

    pub fn history(&self) -> &[HistorySnapshot] {
        &self.history
    }

    /// Total cycles charged so far
    pub fn total_latency(&self) -> u64 {
        self.total_latency
    }
}
