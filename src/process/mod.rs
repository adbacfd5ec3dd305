/*!
 * Process Module
 * Process records and their per-tick display state
 */

pub mod types;

pub use types::{IoCycle, Process, ProcessState, ScheduledProcess};
