/*!
 * Simulator Limits and Constants
 *
 * Centralized location for quantum bounds, environment variable names,
 * and the fixed status strings attached to display records.
 */

// =============================================================================
// QUANTUM
// =============================================================================

/// Smallest round-robin slice
pub const MIN_QUANTUM_TICKS: u64 = 1;

/// Largest round-robin slice accepted from configuration
pub const MAX_QUANTUM_TICKS: u64 = 1_000_000;

/// Quantum used when none is configured
pub const DEFAULT_QUANTUM_TICKS: u64 = 1;

// =============================================================================
// ENVIRONMENT
// =============================================================================

/// Enables JSON log output when set to `1` or `true`
pub const ENV_TRACE_JSON: &str = "SCHED_SIM_TRACE_JSON";

/// Default scheduling policy for the command line host
pub const ENV_POLICY: &str = "SCHED_SIM_POLICY";

/// Default round-robin quantum for the command line host
pub const ENV_QUANTUM: &str = "SCHED_SIM_QUANTUM";

// =============================================================================
// DISPLAY COMMENTS
// =============================================================================

pub const COMMENT_NOT_ARRIVED: &str = "not arrived yet";
pub const COMMENT_READY: &str = "ready for running";
pub const COMMENT_RUNNING: &str = "running on CPU";
pub const COMMENT_BLOCKED: &str = "waiting on I/O";
pub const COMMENT_DONE: &str = "finished";
