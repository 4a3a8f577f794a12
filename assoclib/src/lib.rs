//! # AssocLib
//!
//! Assoclib is a library for simulating a single set-associative cache over an address trace
//!
//! It models the cache geometry, a pluggable replacement policy, classification of misses into
//! compulsory, conflict, and capacity misses, and run statistics with a periodic history. Traces
//! are either generated from an access pattern or replayed from a recorded file
//!
//! Runs are reproducible: every random choice is drawn from a source seeded by the
//! configuration

/// Contains the cache model: address decomposition, lookup, and installation
pub mod cache;

/// Contains the miss classifier
pub mod classifier;

/// Contains definitions for the JSON configuration format and its validation
pub mod config;

/// Contains the error types returned by the library
pub mod error;

/// Contains the file reader used for recorded traces
pub mod io;

/// Contains the provided replacement policies, with a trait for implementing custom replacement
/// policies
pub mod replacement_policies;

/// Contains the simulator, which drives a cache over a trace and collects results
pub mod simulator;

/// Contains the counters, derived rates, and snapshot history of a run
pub mod stats;

/// Contains the synthetic trace generator and recorded traces
pub mod trace;

#[cfg(test)]
mod test;

/// Contains utilities for running tests and benchmarks.
pub mod util;
