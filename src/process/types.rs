/*!
 * Process Types
 * Process records produced by the parser and display records produced by the engine
 */

use crate::core::limits::{
    COMMENT_BLOCKED, COMMENT_DONE, COMMENT_NOT_ARRIVED, COMMENT_READY, COMMENT_RUNNING,
};
use crate::core::types::Tick;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declared I/O burst of a process
///
/// Parsed and carried through, but never consulted by any dispatch policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct IoCycle {
    pub start_at: Tick,
    pub duration: Tick,
}

impl IoCycle {
    pub const fn new(start_at: Tick, duration: Tick) -> Self {
        Self { start_at, duration }
    }
}

/// Process description parsed from a process file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Process {
    pub name: String,
    pub arrived_at: Tick,
    /// Remaining CPU time; only the engine decrements it
    pub burst_time: Tick,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub io: Vec<IoCycle>,
}

impl Process {
    pub fn new(name: impl Into<String>, arrived_at: Tick, burst_time: Tick) -> Self {
        Self {
            name: name.into(),
            arrived_at,
            burst_time,
            io: Vec::new(),
        }
    }

    pub fn with_io(mut self, io: impl IntoIterator<Item = IoCycle>) -> Self {
        self.io.extend(io);
        self
    }

    #[inline]
    pub const fn is_finished(&self) -> bool {
        self.burst_time == 0
    }
}

/// Display state of a process at one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProcessState {
    /// Arrival time not reached yet
    NotArrived,
    /// Arrived and waiting in the ready queue
    Ready,
    /// Holding the CPU this tick
    Running,
    /// Waiting on I/O (never produced by the current policies)
    Blocked,
    /// All burst time consumed
    Done,
}

impl ProcessState {
    /// Human-readable status attached to display records
    pub const fn comment(&self) -> &'static str {
        match self {
            Self::NotArrived => COMMENT_NOT_ARRIVED,
            Self::Ready => COMMENT_READY,
            Self::Running => COMMENT_RUNNING,
            Self::Blocked => COMMENT_BLOCKED,
            Self::Done => COMMENT_DONE,
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NotArrived => "NOT ARRIVED",
            Self::Ready => "READY",
            Self::Running => "RUNNING",
            Self::Blocked => "BLOCKED",
            Self::Done => "DONE",
        }
    }

    #[inline]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }
}

impl fmt::Display for ProcessState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-tick display record of one process
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ScheduledProcess {
    pub name: String,
    /// Remaining burst time as of this tick
    pub burst_time: Tick,
    pub state: ProcessState,
    pub comment: String,
    pub arrived_time: Tick,
}

impl ScheduledProcess {
    /// Initial display record: every process starts out as not arrived
    pub fn from_process(process: &Process) -> Self {
        Self {
            name: process.name.clone(),
            burst_time: process.burst_time,
            state: ProcessState::NotArrived,
            comment: ProcessState::NotArrived.comment().to_string(),
            arrived_time: process.arrived_at,
        }
    }

    pub(crate) fn set_state(&mut self, state: ProcessState) {
        self.state = state;
        self.comment.clear();
        self.comment.push_str(state.comment());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_display_record() {
        let process = Process::new("A", 3, 5).with_io([IoCycle::new(1, 2)]);
        let display = ScheduledProcess::from_process(&process);

        assert_eq!(display.name, "A");
        assert_eq!(display.burst_time, 5);
        assert_eq!(display.arrived_time, 3);
        assert_eq!(display.state, ProcessState::NotArrived);
        assert_eq!(display.comment, COMMENT_NOT_ARRIVED);
    }

    #[test]
    fn test_state_change_updates_comment() {
        let mut display = ScheduledProcess::from_process(&Process::new("A", 0, 1));
        display.set_state(ProcessState::Running);
        assert_eq!(display.comment, COMMENT_RUNNING);
        display.set_state(ProcessState::Done);
        assert_eq!(display.comment, COMMENT_DONE);
        assert!(display.state.is_terminal());
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&ProcessState::NotArrived).unwrap();
        assert_eq!(json, "\"not_arrived\"");
        let state: ProcessState = serde_json::from_str("\"running\"").unwrap();
        assert_eq!(state, ProcessState::Running);
    }

    #[test]
    fn test_process_without_io_omits_field() {
        let json = serde_json::to_value(Process::new("A", 0, 2)).unwrap();
        assert!(json.get("io").is_none());
        let back: Process = serde_json::from_value(json).unwrap();
        assert!(back.io.is_empty());
    }
}
