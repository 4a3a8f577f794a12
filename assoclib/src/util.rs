use std::collections::HashMap;
use crate::config::{AccessPatternConfig, ReplacementPolicyConfig, SimulationConfig};

pub const ALL_POLICIES: [ReplacementPolicyConfig; 5] = [
    ReplacementPolicyConfig::LeastRecentlyUsed,
    ReplacementPolicyConfig::FirstInFirstOut,
    ReplacementPolicyConfig::Random,
    ReplacementPolicyConfig::LeastFrequentlyUsed,
    ReplacementPolicyConfig::MostRecentlyUsed,
];

pub const ALL_PATTERNS: [AccessPatternConfig; 4] = [
    AccessPatternConfig::Sequential,
    AccessPatternConfig::Random,
    AccessPatternConfig::Loop,
    AccessPatternConfig::HotCold,
];

/// Gets one configuration per policy and access pattern pair, over a shared geometry
pub fn get_configs(num_sets: u64, associativity: u64, total_steps: u64) -> Vec<SimulationConfig> {
    let mut out = Vec::new();
    for replacement_policy in ALL_POLICIES {
        for access_pattern in ALL_PATTERNS {
            out.push(SimulationConfig {
                num_sets,
                associativity,
                replacement_policy,
                access_pattern,
                total_steps,
                ..SimulationConfig::default()
            });
        }
    }
    out
}

/// Counts the hits Belady's optimal policy achieves on a trace, the upper bound for any policy
/// which installs every miss
///
/// On a miss to a full set the resident block whose next use lies furthest ahead is evicted,
/// the lowest way winning ties
pub fn optimal_hit_count(addresses: &[u64], num_sets: u64, associativity: usize) -> u64 {
    // Index of the next access to the same address, usize::MAX if there is none
    let mut next_use = vec![usize::MAX; addresses.len()];
    let mut last_seen: HashMap<u64, usize> = HashMap::new();
    for (index, &address) in addresses.iter().enumerate().rev() {
        if let Some(&later) = last_seen.get(&address) {
            next_use[index] = later;
        }
        last_seen.insert(address, index);
    }

    // (address, next use) per resident block. Addresses map to exactly one set and tag, so
    // they identify blocks directly
    let mut sets: Vec<Vec<(u64, usize)>> = vec![Vec::with_capacity(associativity); num_sets as usize];
    let mut hits = 0;
    for (index, &address) in addresses.iter().enumerate() {
        let set = &mut sets[(address % num_sets) as usize];
        if let Some(entry) = set.iter_mut().find(|(resident, _)| *resident == address) {
            entry.1 = next_use[index];
            hits += 1;
        } else if set.len() < associativity {
            set.push((address, next_use[index]));
        } else {
            let mut victim = 0;
            for way in 1..set.len() {
                if set[way].1 > set[victim].1 {
                    victim = way;
                }
            }
            set[victim] = (address, next_use[index]);
        }
    }
    hits
}
