/*!
 * Timeline
 * Immutable per-tick snapshots of every process's display state
 */

use crate::core::types::Slot;
use crate::process::{ProcessState, ScheduledProcess};
use serde::{Deserialize, Serialize};
use std::ops::Index;

/// Full-cardinality copy of the display array at one tick
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    processes: Vec<ScheduledProcess>,
}

impl Snapshot {
    /// Value copy of the live display array
    pub fn capture(display: &[ScheduledProcess]) -> Self {
        Self {
            processes: display.to_vec(),
        }
    }

    #[inline]
    pub fn processes(&self) -> &[ScheduledProcess] {
        &self.processes
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ScheduledProcess> {
        self.processes.iter()
    }

    /// Process holding the CPU in this snapshot, if any
    pub fn running(&self) -> Option<&ScheduledProcess> {
        self.processes
            .iter()
            .find(|p| p.state == ProcessState::Running)
    }

    /// First process with the given name
    pub fn find(&self, name: &str) -> Option<&ScheduledProcess> {
        self.processes.iter().find(|p| p.name == name)
    }

    pub fn all_done(&self) -> bool {
        self.processes.iter().all(|p| p.state.is_terminal())
    }
}

impl Index<Slot> for Snapshot {
    type Output = ScheduledProcess;

    fn index(&self, slot: Slot) -> &Self::Output {
        &self.processes[slot]
    }
}

impl From<Vec<ScheduledProcess>> for Snapshot {
    fn from(processes: Vec<ScheduledProcess>) -> Self {
        Self { processes }
    }
}

/// Append-only sequence of snapshots, one per tick plus a closing frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    snapshots: Vec<Snapshot>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    #[inline]
    pub fn get(&self, tick: usize) -> Option<&Snapshot> {
        self.snapshots.get(tick)
    }

    #[inline]
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    #[inline]
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    pub fn into_snapshots(self) -> Vec<Snapshot> {
        self.snapshots
    }

    /// Process holding the CPU at `tick`
    pub fn running_at(&self, tick: usize) -> Option<&ScheduledProcess> {
        self.get(tick).and_then(Snapshot::running)
    }

    /// Name of the running process for every snapshot, `None` when idle
    pub fn dispatch_trace(&self) -> Vec<Option<&str>> {
        self.snapshots
            .iter()
            .map(|s| s.running().map(|p| p.name.as_str()))
            .collect()
    }

    /// Number of snapshots in which `slot` is running
    pub fn running_ticks(&self, slot: Slot) -> usize {
        self.snapshots
            .iter()
            .filter(|s| s.processes.get(slot).map(|p| p.state) == Some(ProcessState::Running))
            .count()
    }
}

impl Index<usize> for Timeline {
    type Output = Snapshot;

    fn index(&self, tick: usize) -> &Self::Output {
        &self.snapshots[tick]
    }
}

impl From<Vec<Snapshot>> for Timeline {
    fn from(snapshots: Vec<Snapshot>) -> Self {
        Self { snapshots }
    }
}

impl IntoIterator for Timeline {
    type Item = Snapshot;
    type IntoIter = std::vec::IntoIter<Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.into_iter()
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::Process;

    fn display(states: &[(&str, ProcessState)]) -> Vec<ScheduledProcess> {
        states
            .iter()
            .map(|(name, state)| {
                let mut p = ScheduledProcess::from_process(&Process::new(*name, 0, 1));
                p.set_state(*state);
                p
            })
            .collect()
    }

    #[test]
    fn test_capture_is_independent_copy() {
        let mut live = display(&[("A", ProcessState::Ready)]);
        let snapshot = Snapshot::capture(&live);
        live[0].set_state(ProcessState::Running);

        assert_eq!(snapshot[0].state, ProcessState::Ready);
        assert!(snapshot.running().is_none());
    }

    #[test]
    fn test_dispatch_trace() {
        let mut timeline = Timeline::new();
        timeline.push(Snapshot::from(display(&[
            ("A", ProcessState::Running),
            ("B", ProcessState::Ready),
        ])));
        timeline.push(Snapshot::from(display(&[
            ("A", ProcessState::Done),
            ("B", ProcessState::NotArrived),
        ])));

        assert_eq!(timeline.dispatch_trace(), vec![Some("A"), None]);
        assert_eq!(timeline.running_ticks(0), 1);
        assert_eq!(timeline.running_ticks(1), 0);
        assert_eq!(timeline.running_at(0).map(|p| p.name.as_str()), Some("A"));
    }

    #[test]
    fn test_snapshot_serializes_as_plain_array() {
        let snapshot = Snapshot::from(display(&[("A", ProcessState::Done)]));
        let json = serde_json::to_value(&snapshot).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["state"], "done");
    }
}
