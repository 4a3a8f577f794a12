use serde::Serialize;
use crate::error::InvariantViolation;

/// One way of a set: a tag plus the metadata the replacement policies key off
///
/// The tag is never cleared on eviction, only overwritten by the next install to the same way
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CacheWay {
    pub tag: u64,
    pub valid: bool,
    pub dirty: bool,
    /// Logical time of the last install or hit
    pub last_accessed: u64,
    pub access_count: u64,
    pub frequency: u64,
}

/// A fixed-size set of ways. The number of ways never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CacheSet {
    set_id: usize,
    ways: Vec<CacheWay>,
}

impl CacheSet {
    fn new(set_id: usize, associativity: usize) -> Self {
        Self {
            set_id,
            ways: vec![CacheWay::default(); associativity],
        }
    }

    pub fn set_id(&self) -> usize {
        self.set_id
    }

    pub fn ways(&self) -> &[CacheWay] {
        &self.ways
    }
}

/// Result of searching a set for a tag
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Lookup {
    Hit(usize),
    Miss,
}

/// A set-associative cache holding tags and replacement metadata, without data
///
/// The cache only models geometry, lookup, and installation. Choosing a victim is left to the
/// replacement policies, and deciding when to install is left to the simulator, which is the
/// only owner of a cache during a run.
///
/// Addresses are block numbers: there is no offset field, so the set is `address mod num_sets`
/// and the tag is `address div num_sets`. Set counts need not be powers of two.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cache {
    sets: Vec<CacheSet>,
    #[serde(skip)]
    num_sets: u64,
    #[serde(skip)]
    associativity: usize,
}

impl Cache {
    /// Creates a cache with every way invalid and tagged 0
    ///
    /// Both dimensions must be non-zero, which `SimulationConfig::validate` guarantees
    pub fn new(num_sets: u64, associativity: usize) -> Self {
        Self {
            sets: (0..num_sets as usize).map(|id| CacheSet::new(id, associativity)).collect(),
            num_sets,
            associativity,
        }
    }

    pub fn num_sets(&self) -> u64 {
        self.num_sets
    }

    pub fn associativity(&self) -> usize {
        self.associativity
    }

    pub fn sets(&self) -> &[CacheSet] {
        &self.sets
    }

    pub fn set(&self, set_index: usize) -> &CacheSet {
        &self.sets[set_index]
    }

    /// Splits an address into a set index and a tag
    ///
    /// # Examples
    ///
    /// ```
    /// use assoclib::cache::Cache;
    /// let cache = Cache::new(16, 4);
    /// assert_eq!(cache.decompose(37), (5, 2));
    /// ```
    pub fn decompose(&self, address: u64) -> (usize, u64) {
        ((address % self.num_sets) as usize, address / self.num_sets)
    }

    /// Searches a set in way order, returning the first valid way holding `tag`
    pub fn lookup(&self, set_index: usize, tag: u64) -> Lookup {
        self.sets[set_index]
            .ways
            .iter()
            .position(|way| way.valid && way.tag == tag)
            .map_or(Lookup::Miss, Lookup::Hit)
    }

    /// Overwrites a way with a freshly installed line
    pub fn install(&mut self, set_index: usize, way_index: usize, tag: u64, logical_time: u64) {
        self.sets[set_index].ways[way_index] = CacheWay {
            tag,
            valid: true,
            dirty: false,
            last_accessed: logical_time,
            access_count: 1,
            frequency: 1,
        };
    }

    /// Updates the metadata of a way which was hit
    pub fn record_hit(&mut self, set_index: usize, way_index: usize, logical_time: u64) {
        let way = &mut self.sets[set_index].ways[way_index];
        way.last_accessed = logical_time;
        way.access_count += 1;
        way.frequency += 1;
    }

    /// Gets the lowest-indexed invalid way of a set, if any
    pub fn first_free_way(&self, set_index: usize) -> Option<usize> {
        self.sets[set_index].ways.iter().position(|way| !way.valid)
    }

    /// Gets the number of valid lines across all sets. Useful for analysing cache occupancy or
    /// debugging
    pub fn valid_line_count(&self) -> usize {
        self.sets.iter().flat_map(|set| set.ways.iter()).filter(|way| way.valid).count()
    }

    /// Gets the number of lines which have never been filled
    pub fn invalid_line_count(&self) -> usize {
        self.sets.len() * self.associativity - self.valid_line_count()
    }

    /// Checks that no two valid ways of a set hold the same tag
    pub fn check_set_invariant(&self, set_index: usize) -> Result<(), InvariantViolation> {
        let ways = &self.sets[set_index].ways;
        for (first_way, first) in ways.iter().enumerate().filter(|(_, way)| way.valid) {
            if let Some(offset) = ways[first_way + 1..]
                .iter()
                .position(|other| other.valid && other.tag == first.tag)
            {
                return Err(InvariantViolation {
                    set: set_index,
                    tag: first.tag,
                    first_way,
                    second_way: first_way + 1 + offset,
                });
            }
        }
        Ok(())
    }

    /// Checks the per-set invariant over the whole cache
    pub fn check_invariant(&self) -> Result<(), InvariantViolation> {
        (0..self.sets.len()).try_for_each(|set_index| self.check_set_invariant(set_index))
    }
}
