use crate::cache::CacheWay;
use crate::config::{AccessPatternConfig, ReplacementPolicyConfig, SimulationConfig};

mod cache;
mod config;

/// A single two-way set cycling through three addresses, which never fit at once
pub(crate) fn thrashing_config(replacement_policy: ReplacementPolicyConfig) -> SimulationConfig {
    SimulationConfig {
        num_sets: 1,
        associativity: 2,
        replacement_policy,
        access_pattern: AccessPatternConfig::Loop,
        loop_size: 3,
        total_steps: 9,
        snapshot_interval: 1,
        ..SimulationConfig::default()
    }
}

/// A valid way with the given tag, access time, and frequency
pub(crate) fn way(tag: u64, last_accessed: u64, frequency: u64) -> CacheWay {
    CacheWay {
        tag,
        valid: true,
        dirty: false,
        last_accessed,
        access_count: frequency,
        frequency,
    }
}

pub(crate) fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}
