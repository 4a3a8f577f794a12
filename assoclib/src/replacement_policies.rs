use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use crate::cache::CacheWay;
use crate::config::ReplacementPolicyConfig;

/// A generic trait for implementing new replacement policies
///
/// A policy only picks a victim; it never touches the cache. All the state the provided policies
/// need lives in the way metadata, so apart from a random source they are stateless.
pub trait ReplacementPolicy {
    /// Chooses the way to evict from a full set
    ///
    /// Only called when the set has no invalid way left. Ties are broken by scanning the ways in
    /// ascending order, the first candidate winning
    ///
    /// # Arguments
    ///
    /// * `ways`: The ways of the set, which must not be empty
    ///
    /// returns: usize, an index in `0..ways.len()`
    fn select_victim(&mut self, ways: &[CacheWay]) -> usize;
}

/// Scans in way order for the smallest key, keeping the first on ties
#[inline]
fn first_min_by_key(ways: &[CacheWay], key: impl Fn(&CacheWay) -> u64) -> usize {
    let mut min_value = u64::MAX;
    let mut min_index = 0;
    let mut index = 0;
    while index < ways.len() {
        let value = key(&ways[index]);
        if value < min_value {
            min_value = value;
            min_index = index;
        }
        index += 1;
    }
    min_index
}

/// Least Recently Used replacement policy, evicting the way with the oldest access time
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastRecentlyUsed;

impl ReplacementPolicy for LeastRecentlyUsed {
    fn select_victim(&mut self, ways: &[CacheWay]) -> usize {
        first_min_by_key(ways, |way| way.last_accessed)
    }
}

/// First in, first out replacement policy
///
/// Ways carry no separate insertion time, so this orders on the same access time as LRU and
/// behaves identically to it. A hit refreshes a line's position in the queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct FirstInFirstOut;

impl ReplacementPolicy for FirstInFirstOut {
    fn select_victim(&mut self, ways: &[CacheWay]) -> usize {
        first_min_by_key(ways, |way| way.last_accessed)
    }
}

/// Least frequently used replacement policy. Frequencies restart at 1 on install.
#[derive(Debug, Default, Clone, Copy)]
pub struct LeastFrequentlyUsed;

impl ReplacementPolicy for LeastFrequentlyUsed {
    fn select_victim(&mut self, ways: &[CacheWay]) -> usize {
        first_min_by_key(ways, |way| way.frequency)
    }
}

/// Most recently used replacement policy, evicting the way touched last
///
/// Counter-intuitive for most workloads, but it keeps part of a cyclic working set resident
/// when the cycle is longer than the set
#[derive(Debug, Default, Clone, Copy)]
pub struct MostRecentlyUsed;

impl ReplacementPolicy for MostRecentlyUsed {
    fn select_victim(&mut self, ways: &[CacheWay]) -> usize {
        let mut max_value = 0;
        let mut max_index = 0;
        let mut index = 0;
        while index < ways.len() {
            if index == 0 || ways[index].last_accessed > max_value {
                max_value = ways[index].last_accessed;
                max_index = index;
            }
            index += 1;
        }
        max_index
    }
}

/// Random replacement policy, drawing uniformly from the ways with an injected source
#[derive(Debug, Clone)]
pub struct RandomReplacement<R: Rng = StdRng> {
    rng: R,
}

impl<R: Rng> RandomReplacement<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomReplacement<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> ReplacementPolicy for RandomReplacement<R> {
    fn select_victim(&mut self, ways: &[CacheWay]) -> usize {
        self.rng.random_range(0..ways.len())
    }
}

/// Enum for all 5 provided policies
///
/// Branching on the concrete policies lets the compiler inline the victim scans, which a
/// `Box<dyn ReplacementPolicy>` would hide from it
#[derive(Debug, Clone)]
pub enum GenericPolicy {
    LeastRecentlyUsed(LeastRecentlyUsed),
    FirstInFirstOut(FirstInFirstOut),
    Random(RandomReplacement),
    LeastFrequentlyUsed(LeastFrequentlyUsed),
    MostRecentlyUsed(MostRecentlyUsed),
}

impl GenericPolicy {
    /// Creates the configured policy. `seed` is only used by the random policy
    pub fn from_config(config: ReplacementPolicyConfig, seed: u64) -> Self {
        match config {
            ReplacementPolicyConfig::LeastRecentlyUsed => LeastRecentlyUsed.into(),
            ReplacementPolicyConfig::FirstInFirstOut => FirstInFirstOut.into(),
            ReplacementPolicyConfig::Random => RandomReplacement::seeded(seed).into(),
            ReplacementPolicyConfig::LeastFrequentlyUsed => LeastFrequentlyUsed.into(),
            ReplacementPolicyConfig::MostRecentlyUsed => MostRecentlyUsed.into(),
        }
    }
}

impl From<LeastRecentlyUsed> for GenericPolicy {
    fn from(value: LeastRecentlyUsed) -> Self {
        Self::LeastRecentlyUsed(value)
    }
}

impl From<FirstInFirstOut> for GenericPolicy {
    fn from(value: FirstInFirstOut) -> Self {
        Self::FirstInFirstOut(value)
    }
}

impl From<RandomReplacement> for GenericPolicy {
    fn from(value: RandomReplacement) -> Self {
        Self::Random(value)
    }
}

impl From<LeastFrequentlyUsed> for GenericPolicy {
    fn from(value: LeastFrequentlyUsed) -> Self {
        Self::LeastFrequentlyUsed(value)
    }
}

impl From<MostRecentlyUsed> for GenericPolicy {
    fn from(value: MostRecentlyUsed) -> Self {
        Self::MostRecentlyUsed(value)
    }
}

impl ReplacementPolicy for GenericPolicy {
    fn select_victim(&mut self, ways: &[CacheWay]) -> usize {
        match self {
            GenericPolicy::LeastRecentlyUsed(p) => p.select_victim(ways),
            GenericPolicy::FirstInFirstOut(p) => p.select_victim(ways),
            GenericPolicy::Random(p) => p.select_victim(ways),
            GenericPolicy::LeastFrequentlyUsed(p) => p.select_victim(ways),
            GenericPolicy::MostRecentlyUsed(p) => p.select_victim(ways),
        }
    }
}
