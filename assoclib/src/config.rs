use serde::{Deserialize, Serialize};
use crate::error::ConfigError;

/// The configuration for one simulation run, usually parsed from JSON
///
/// Every field has a default, so a config file only needs to name what it changes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub num_sets: u64,
    pub associativity: u64,
    pub replacement_policy: ReplacementPolicyConfig,
    pub access_pattern: AccessPatternConfig,
    /// Period of the `loop` access pattern
    pub loop_size: u64,
    /// Probability, in percent, that a `hotCold` access lands in the hot range
    pub hot_data_percentage: u32,
    pub total_steps: u64,
    pub snapshot_interval: u64,
    /// Seeds the trace generator and the random replacement policy
    pub seed: u64,
    /// Cycles charged for a hit
    pub hit_latency: u64,
    /// Cycles charged for a miss
    pub miss_latency: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            num_sets: 16,
            associativity: 4,
            replacement_policy: ReplacementPolicyConfig::default(),
            access_pattern: AccessPatternConfig::default(),
            loop_size: 32,
            hot_data_percentage: 20,
            total_steps: 100,
            snapshot_interval: 10,
            seed: 0,
            hit_latency: 1,
            miss_latency: 100,
        }
    }
}

impl SimulationConfig {
    /// Checks the configuration, returning the first rule it breaks
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_sets == 0 {
            return Err(ConfigError::ZeroSets);
        }
        if self.associativity == 0 {
            return Err(ConfigError::ZeroAssociativity);
        }
        if self.loop_size == 0 {
            return Err(ConfigError::ZeroLoopSize);
        }
        if self.hot_data_percentage > 100 {
            return Err(ConfigError::HotPercentageOutOfRange(self.hot_data_percentage));
        }
        validate_run_length(self.total_steps, self.snapshot_interval)
    }
}

/// The run-length rules, shared between construction and `Simulator::run`
pub(crate) fn validate_run_length(total_steps: u64, snapshot_interval: u64) -> Result<(), ConfigError> {
    if total_steps == 0 {
        return Err(ConfigError::ZeroTotalSteps);
    }
    if snapshot_interval == 0 {
        return Err(ConfigError::ZeroSnapshotInterval);
    }
    Ok(())
}

/// The replacement policy - lru, fifo, random, lfu, or mru. Defaults to lru.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReplacementPolicyConfig {
    #[default]
    #[serde(alias = "lru")]
    LeastRecentlyUsed,
    #[serde(alias = "fifo")]
    FirstInFirstOut,
    #[serde(alias = "random")]
    Random,
    #[serde(alias = "lfu")]
    LeastFrequentlyUsed,
    #[serde(alias = "mru")]
    MostRecentlyUsed,
}

/// The access pattern used to generate the trace. Defaults to sequential.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessPatternConfig {
    #[default]
    #[serde(alias = "sequential")]
    Sequential,
    #[serde(alias = "random")]
    Random,
    #[serde(alias = "loop")]
    Loop,
    #[serde(alias = "hotCold", alias = "hot_cold")]
    HotCold,
}
