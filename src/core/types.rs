/*!
 * Core Types
 * Common types used across the simulator
 */

/// One discrete unit of simulated time
pub type Tick = u64;

/// Position of a process in the arrival-sorted display array
pub type Slot = usize;

/// Common result type for simulator operations
pub type SimResult<T> = Result<T, super::errors::SimError>;
