use thiserror::Error;

/// A configuration rejected at construction or at `run` entry. The run never starts.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("num_sets must be a positive integer")]
    ZeroSets,
    #[error("associativity must be a positive integer")]
    ZeroAssociativity,
    #[error("total_steps must be a positive integer")]
    ZeroTotalSteps,
    #[error("snapshot_interval must be a positive integer")]
    ZeroSnapshotInterval,
    #[error("loop_size must be a positive integer")]
    ZeroLoopSize,
    #[error("hot_data_percentage must lie in [0, 100], got {0}")]
    HotPercentageOutOfRange(u32),
}

/// Failure to load a recorded address trace
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("couldn't read the trace: {0}")]
    Io(#[from] std::io::Error),
    #[error("couldn't parse line {line} of the trace: {content:?}")]
    Parse { line: usize, content: String },
    #[error("the trace contains no addresses")]
    Empty,
}

/// Two valid ways of one set hold the same tag.
///
/// This is never produced by bad input, only by a defect in install or eviction, so the
/// simulator treats it as fatal.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
#[error("set {set} holds tag {tag:#x} in both way {first_way} and way {second_way}")]
pub struct InvariantViolation {
    pub set: usize,
    pub tag: u64,
    pub first_way: usize,
    pub second_way: usize,
}

/// Any error the library can hand back to a caller
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Trace(#[from] TraceError),
}
