use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use log::{debug, info, trace};
use serde::Serialize;
use crate::cache::{Cache, Lookup};
use crate::classifier::{classify, MissClassification};
use crate::config::{validate_run_length, SimulationConfig};
use crate::error::{ConfigError, SimError};
use crate::replacement_policies::{GenericPolicy, ReplacementPolicy};
use crate::stats::{AccessKind, Counters, HistorySnapshot, StatisticsAggregator};
use crate::trace::{RecordedTrace, TraceGenerator, TraceSource};

/// Where the simulator is in its lifecycle
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SimulationState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

/// A handle for cancelling a run, cheap to clone and safe to trigger from any thread
///
/// Cancellation is cooperative: the simulator only looks at the token between steps, so a step
/// in progress always finishes
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }

    fn clear(&self) {
        self.0.store(false, Ordering::Release);
    }
}

/// What a single access did to the cache
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessResult {
    Hit { way: usize },
    /// `evicted` holds the tag of the line replaced, if the set was full
    Miss { classification: MissClassification, way: usize, evicted: Option<u64> },
}

/// The full record of one processed access
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct AccessOutcome {
    pub step: u64,
    pub address: u64,
    pub set_index: usize,
    pub tag: u64,
    pub result: AccessResult,
}

impl AccessOutcome {
    pub fn is_hit(&self) -> bool {
        matches!(self.result, AccessResult::Hit { .. })
    }
}

/// The result of a simulation. Can be serialised as the report printed by the command line tool
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimulationReport {
    pub config: SimulationConfig,
    pub state: SimulationState,
    pub steps_processed: u64,
    pub counters: Counters,
    pub history: Vec<HistorySnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache: Option<Cache>,
}

/// The simulator owns the cache, the statistics, and the address source for a run, and steps
/// them forward one access at a time.
///
/// It supports calling run multiple times: each call picks up the trace and cache from the step
/// where the previous one stopped, with fresh counters. Simulation time keeps accumulating. Only
/// `reset` discards the cache.
/// Outside readers get shared references and reports, never mutable access.
#[derive(Debug)]
pub struct Simulator {
    config: SimulationConfig,
    cache: Cache,
    policy: GenericPolicy,
    source: TraceSource,
    stats: StatisticsAggregator,
    state: SimulationState,
    steps_processed: u64,
    snapshot_interval: u64,
    cancel: CancelToken,
    simulation_time: Duration,
}

impl Simulator {
    /// Creates a new simulator over the synthetic trace described by the configuration
    ///
    /// # Arguments
    ///
    /// * `config`: A simulation configuration, usually resulting from parsing JSON
    ///
    /// returns: Result<Simulator, ConfigError>, failing fast on an invalid configuration
    pub fn new(config: SimulationConfig) -> Result<Self, ConfigError> {
        let source = TraceGenerator::from_config(&config).into();
        Self::with_source(config, source)
    }

    /// Creates a new simulator replaying a recorded trace. The configured access pattern is
    /// ignored
    pub fn with_trace(config: SimulationConfig, trace: RecordedTrace) -> Result<Self, ConfigError> {
        Self::with_source(config, trace.into())
    }

    /// Creates a new simulator replaying the trace file at `path`
    pub fn from_trace_file(config: SimulationConfig, path: impl AsRef<Path>) -> Result<Self, SimError> {
        let trace = RecordedTrace::from_file(path)?;
        info!("loaded {} recorded addresses", trace.len());
        Ok(Self::with_trace(config, trace)?)
    }

    fn with_source(config: SimulationConfig, source: TraceSource) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            cache: Cache::new(config.num_sets, config.associativity as usize),
            policy: Self::policy_for(&config),
            stats: StatisticsAggregator::new(config.hit_latency, config.miss_latency),
            state: SimulationState::Idle,
            steps_processed: 0,
            snapshot_interval: config.snapshot_interval,
            cancel: CancelToken::default(),
            simulation_time: Duration::ZERO,
            source,
            config,
        })
    }

    // Offset so the policy does not replay the trace generator's draws
    fn policy_for(config: &SimulationConfig) -> GenericPolicy {
        GenericPolicy::from_config(config.replacement_policy, config.seed.wrapping_add(1))
    }

    /// Processes exactly one access: generate, decompose, look up, then either record the hit or
    /// classify, account, and install the miss
    ///
    /// The snapshot history is sampled whenever the step index is a multiple of the current
    /// snapshot interval. Stepping by hand does not change the lifecycle state
    ///
    /// returns: Option<AccessOutcome>, `None` when a recorded trace has run out
    pub fn step(&mut self) -> Option<AccessOutcome> {
        let step = self.steps_processed;
        let address = self.source.address_at(step)?;
        let (set_index, tag) = self.cache.decompose(address);
        let result = match self.cache.lookup(set_index, tag) {
            Lookup::Hit(way) => {
                self.cache.record_hit(set_index, way, step);
                self.stats.on_access(AccessKind::Hit);
                AccessResult::Hit { way }
            }
            Lookup::Miss => {
                // Classify first, installing overwrites the tags it looks at
                let classification = classify(self.cache.set(set_index).ways(), tag);
                self.stats.on_access(AccessKind::Miss(classification));
                let (way, evicted) = match self.cache.first_free_way(set_index) {
                    Some(way) => (way, None),
                    None => {
                        let way = self.policy.select_victim(self.cache.set(set_index).ways());
                        (way, Some(self.cache.set(set_index).ways()[way].tag))
                    }
                };
                self.cache.install(set_index, way, tag, step);
                AccessResult::Miss { classification, way, evicted }
            }
        };
        #[cfg(debug_assertions)]
        if let Err(violation) = self.cache.check_set_invariant(set_index) {
            panic!("internal consistency error: {violation}");
        }
        trace!("step {step}: address {address:#x} -> set {set_index}, tag {tag:#x}: {result:?}");

        if step % self.snapshot_interval == 0 {
            self.stats.capture_snapshot(step);
            debug!("snapshot at step {step}: {:?}", self.stats.counters());
        }
        self.steps_processed += 1;
        Some(AccessOutcome {
            step,
            address,
            set_index,
            tag,
            result,
        })
    }

    /// Runs up to `total_steps` further accesses
    ///
    /// The trace and cache carry on from where the previous run stopped, but counters, latency,
    /// and history start again from zero. Stops early, leaving every result accumulated so far valid, when the cancel token is
    /// triggered (checked between steps) or a recorded trace is exhausted. A cancel requested
    /// while no run is in progress stops the next run before its first step
    ///
    /// # Arguments
    ///
    /// * `total_steps`: The number of accesses to process, must be non-zero
    /// * `snapshot_interval`: The history sampling period, must be non-zero
    ///
    /// returns: Result<SimulationState, ConfigError>, the terminal state of the run
    pub fn run(&mut self, total_steps: u64, snapshot_interval: u64) -> Result<SimulationState, ConfigError> {
        validate_run_length(total_steps, snapshot_interval)?;
        if self.state != SimulationState::Idle {
            self.stats = StatisticsAggregator::new(self.config.hit_latency, self.config.miss_latency);
        }
        self.snapshot_interval = snapshot_interval;
        self.state = SimulationState::Running;
        info!(
            "running {total_steps} steps from step {} ({:?}, {:?})",
            self.steps_processed, self.config.replacement_policy, self.config.access_pattern
        );

        let start = Instant::now();
        let mut processed = 0;
        self.state = loop {
            if processed == total_steps {
                break SimulationState::Completed;
            }
            if self.cancel.is_cancelled() {
                // Consumed, so a later run resumes instead of stopping immediately
                self.cancel.clear();
                break SimulationState::Cancelled;
            }
            if self.step().is_none() {
                info!("recorded trace exhausted after {} steps", self.steps_processed);
                break SimulationState::Completed;
            }
            processed += 1;
        };
        self.simulation_time += start.elapsed();

        let counters = self.stats.counters();
        info!(
            "run {:?} after {processed} steps: {} hits, {} misses, hit rate {:.2}%",
            self.state, counters.hits, counters.misses, counters.hit_rate
        );
        Ok(self.state)
    }

    /// Runs the number of steps and snapshot interval given by the configuration
    pub fn run_configured(&mut self) -> Result<SimulationState, ConfigError> {
        self.run(self.config.total_steps, self.config.snapshot_interval)
    }

    /// Requests cancellation at the next step boundary, of the current run or else the next one
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Gets a token which can cancel runs of this simulator from elsewhere
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Discards the cache, statistics, and history and returns to `Idle`
    ///
    /// Random sources are re-seeded, so a run after a reset repeats a fresh simulator's run
    pub fn reset(&mut self) {
        self.cache = Cache::new(self.config.num_sets, self.config.associativity as usize);
        self.policy = Self::policy_for(&self.config);
        if let TraceSource::Synthetic(_) = self.source {
            self.source = TraceGenerator::from_config(&self.config).into();
        }
        self.stats = StatisticsAggregator::new(self.config.hit_latency, self.config.miss_latency);
        self.steps_processed = 0;
        self.snapshot_interval = self.config.snapshot_interval;
        self.simulation_time = Duration::ZERO;
        self.cancel.clear();
        self.state = SimulationState::Idle;
        info!("simulator reset");
    }

    pub fn state(&self) -> SimulationState {
        self.state
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn cache(&self) -> &Cache {
        &self.cache
    }

    pub fn counters(&self) -> &Counters {
        self.stats.counters()
    }

    pub fn history(&self) -> &[HistorySnapshot] {
        self.stats.history()
    }

    pub fn steps_processed(&self) -> u64 {
        self.steps_processed
    }

    /// Gets the wall-clock time spent running, across all runs since the last reset
    pub fn execution_time(&self) -> &Duration {
        &self.simulation_time
    }

    /// Copies the current results into a report, with the cache grid if requested
    pub fn report(&self, include_cache: bool) -> SimulationReport {
        SimulationReport {
            config: self.config.clone(),
            state: self.state,
            steps_processed: self.steps_processed,
            counters: self.stats.counters().clone(),
            history: self.stats.history().to_vec(),
            cache: include_cache.then(|| self.cache.clone()),
        }
    }
}
