/*!
 * Scheduler Module
 * Scheduling engine, dispatch policies and the timelines they produce
 */

pub mod dispatch;
pub mod engine;
pub mod stats;
pub mod timeline;
pub mod types;

// Re-export public API
pub use dispatch::{dispatcher_for, Dispatch, Fcfs, Job, RoundRobin, Sjf};
pub use engine::Engine;
pub use stats::{ProcessStats, TimelineStats};
pub use timeline::{Snapshot, Timeline};
pub use types::{SchedulingPolicy, TimeQuantum};
