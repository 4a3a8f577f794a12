use std::fs::File;
use std::io::BufRead;
use std::path::Path;
use lazy_static::lazy_static;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use regex::Regex;
use crate::config::{AccessPatternConfig, SimulationConfig};
use crate::error::TraceError;
use crate::io::get_reader;

/// Exclusive upper bound of the `random` pattern
pub const RANDOM_ADDRESS_LIMIT: u64 = 1000;
/// The hot range of the `hotCold` pattern, `[0, 10)`
pub const HOT_RANGE: std::ops::Range<u64> = 0..10;
/// The cold range of the `hotCold` pattern, `[100, 1100)`
pub const COLD_RANGE: std::ops::Range<u64> = 100..1100;

/// Produces the address accessed at each step of a synthetic trace
///
/// The `sequential` and `loop` patterns are pure functions of the step. The `random` and
/// `hotCold` patterns draw from the injected source, so a seeded source gives a reproducible
/// trace.
#[derive(Debug, Clone)]
pub struct TraceGenerator<R: Rng = StdRng> {
    pattern: AccessPatternConfig,
    loop_size: u64,
    hot_data_percentage: u32,
    rng: R,
}

impl TraceGenerator<StdRng> {
    /// Creates the generator for a configuration, seeded with its `seed`
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self::new(
            config.access_pattern,
            config.loop_size,
            config.hot_data_percentage,
            StdRng::seed_from_u64(config.seed),
        )
    }
}

impl<R: Rng> TraceGenerator<R> {
    /// `loop_size` must be non-zero and `hot_data_percentage` at most 100; both are checked by
    /// `SimulationConfig::validate`
    pub fn new(pattern: AccessPatternConfig, loop_size: u64, hot_data_percentage: u32, rng: R) -> Self {
        Self {
            pattern,
            loop_size,
            hot_data_percentage,
            rng,
        }
    }

    /// Gets the address accessed at `step`
    pub fn next(&mut self, step: u64) -> u64 {
        match self.pattern {
            AccessPatternConfig::Sequential => step,
            AccessPatternConfig::Random => self.rng.random_range(0..RANDOM_ADDRESS_LIMIT),
            AccessPatternConfig::Loop => step % self.loop_size,
            AccessPatternConfig::HotCold => {
                if self.rng.random_ratio(self.hot_data_percentage, 100) {
                    self.rng.random_range(HOT_RANGE)
                } else {
                    self.rng.random_range(COLD_RANGE)
                }
            }
        }
    }
}

lazy_static! {
    static ref TRACE_LINE: Regex =
        Regex::new(r"^\s*(?:0[xX](?P<hex>[0-9a-fA-F]+)|(?P<dec>[0-9]+))\s*(?:#.*)?$").unwrap();
    static ref SKIPPED_LINE: Regex = Regex::new(r"^\s*(?:#.*)?$").unwrap();
}

/// An address trace recorded ahead of time, replayed in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedTrace {
    addresses: Vec<u64>,
}

impl RecordedTrace {
    /// Wraps a list of addresses, which must not be empty
    pub fn new(addresses: Vec<u64>) -> Result<Self, TraceError> {
        if addresses.is_empty() {
            return Err(TraceError::Empty);
        }
        Ok(Self { addresses })
    }

    /// Parses a trace with one address per line
    ///
    /// Addresses are decimal or `0x`-prefixed hexadecimal. Blank lines and anything after a `#`
    /// are ignored
    ///
    /// # Examples
    ///
    /// ```
    /// use assoclib::trace::RecordedTrace;
    /// let trace = RecordedTrace::parse("# warm up\n0x10\n3\n\n7 # again\n".as_bytes()).unwrap();
    /// assert_eq!(trace.addresses(), &[16, 3, 7]);
    /// ```
    pub fn parse(reader: impl BufRead) -> Result<Self, TraceError> {
        let mut addresses = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if SKIPPED_LINE.is_match(&line) {
                continue;
            }
            let parse_error = || TraceError::Parse {
                line: index + 1,
                content: line.clone(),
            };
            let captures = TRACE_LINE.captures(&line).ok_or_else(parse_error)?;
            let address = match (captures.name("hex"), captures.name("dec")) {
                (Some(hex), _) => u64::from_str_radix(hex.as_str(), 16),
                (None, Some(dec)) => dec.as_str().parse::<u64>(),
                (None, None) => return Err(parse_error()),
            };
            // Out of range for u64
            addresses.push(address.map_err(|_| parse_error())?);
        }
        Self::new(addresses)
    }

    /// Reads and parses a trace file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let file = File::open(path)?;
        Self::parse(get_reader(file)?)
    }

    pub fn addresses(&self) -> &[u64] {
        &self.addresses
    }

    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}

/// The source of addresses for a run, either synthetic or recorded
#[derive(Debug, Clone)]
pub enum TraceSource {
    Synthetic(TraceGenerator),
    Recorded(RecordedTrace),
}

impl TraceSource {
    /// Gets the address for `step`, or `None` once a recorded trace is exhausted
    pub fn address_at(&mut self, step: u64) -> Option<u64> {
        match self {
            TraceSource::Synthetic(generator) => Some(generator.next(step)),
            TraceSource::Recorded(trace) => usize::try_from(step)
                .ok()
                .and_then(|index| trace.addresses.get(index).copied()),
        }
    }
}

impl From<TraceGenerator> for TraceSource {
    fn from(value: TraceGenerator) -> Self {
        Self::Synthetic(value)
    }
}

impl From<RecordedTrace> for TraceSource {
    fn from(value: RecordedTrace) -> Self {
        Self::Recorded(value)
    }
}
