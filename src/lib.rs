/*!
 * CPU Scheduling Simulator Library
 * Process description parsing and single-core scheduling timelines
 */

pub mod core;
pub mod monitoring;
pub mod parser;
pub mod process;
pub mod scheduler;
pub mod session;

// Re-exports
pub use crate::core::{ConfigError, SimConfig, SimError, SimResult, Tick};
pub use monitoring::init_tracing;
pub use parser::{parse, parse_source, render_processes, tokenize, GrammarVariant, Token};
pub use process::{IoCycle, Process, ProcessState, ScheduledProcess};
pub use scheduler::{Engine, SchedulingPolicy, Snapshot, TimeQuantum, Timeline, TimelineStats};
pub use session::{Session, SessionError};

/// Parse a process description and simulate it under `config`
pub fn simulate(source: &str, config: &SimConfig) -> SimResult<Timeline> {
    let processes = parse_source(source, config.grammar)?;
    Ok(Engine::from_config(processes, config).run())
}
