/*!
 * Dispatch Policies
 * Selection and slice rules plugged into the shared engine loop
 */

use super::types::{SchedulingPolicy, TimeQuantum};
use crate::core::types::{Slot, Tick};
use crate::process::Process;
use std::collections::VecDeque;
use std::fmt;

/// Process owned by the engine while it waits or runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    /// Index into the arrival-sorted display array
    pub slot: Slot,
    pub process: Process,
}

impl Job {
    pub fn new(slot: Slot, process: Process) -> Self {
        Self { slot, process }
    }

    #[inline]
    pub fn remaining(&self) -> Tick {
        self.process.burst_time
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.process.name
    }
}

/// Capability set of a dispatch policy
pub trait Dispatch: fmt::Debug {
    fn policy(&self) -> SchedulingPolicy;

    /// Remove and return the job to dispatch next
    fn select_next(&mut self, ready: &mut VecDeque<Job>) -> Option<Job>;

    /// Ticks granted to `job` once dispatched; never more than its remaining burst
    fn slice_for(&self, job: &Job) -> Tick;
}

/// First-come-first-served: queue head, run to completion
#[derive(Debug, Clone, Copy, Default)]
pub struct Fcfs;

impl Dispatch for Fcfs {
    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::Fcfs
    }

    fn select_next(&mut self, ready: &mut VecDeque<Job>) -> Option<Job> {
        ready.pop_front()
    }

    fn slice_for(&self, job: &Job) -> Tick {
        job.remaining()
    }
}

/// Non-preemptive shortest job first
#[derive(Debug, Clone, Copy, Default)]
pub struct Sjf;

impl Dispatch for Sjf {
    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::Sjf
    }

    fn select_next(&mut self, ready: &mut VecDeque<Job>) -> Option<Job> {
        // Stable sort keeps queue order among equal bursts
        ready.make_contiguous().sort_by_key(Job::remaining);
        ready.pop_front()
    }

    fn slice_for(&self, job: &Job) -> Tick {
        job.remaining()
    }
}

/// Round-robin: queue head, at most one quantum per dispatch
#[derive(Debug, Clone, Copy)]
pub struct RoundRobin {
    quantum: TimeQuantum,
}

impl RoundRobin {
    pub fn new(quantum: TimeQuantum) -> Self {
        Self { quantum }
    }

    pub fn quantum(&self) -> TimeQuantum {
        self.quantum
    }
}

impl Dispatch for RoundRobin {
    fn policy(&self) -> SchedulingPolicy {
        SchedulingPolicy::RoundRobin
    }

    fn select_next(&mut self, ready: &mut VecDeque<Job>) -> Option<Job> {
        ready.pop_front()
    }

    fn slice_for(&self, job: &Job) -> Tick {
        job.remaining().min(self.quantum.as_ticks())
    }
}

/// Build the dispatcher for a policy; the quantum only matters for round-robin
pub fn dispatcher_for(policy: SchedulingPolicy, quantum: TimeQuantum) -> Box<dyn Dispatch> {
    match policy {
        SchedulingPolicy::Fcfs => Box::new(Fcfs),
        SchedulingPolicy::Sjf => Box::new(Sjf),
        SchedulingPolicy::RoundRobin => Box::new(RoundRobin::new(quantum)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(bursts: &[(&str, Tick)]) -> VecDeque<Job> {
        bursts
            .iter()
            .enumerate()
            .map(|(slot, (name, burst))| Job::new(slot, Process::new(*name, 0, *burst)))
            .collect()
    }

    #[test]
    fn test_fcfs_takes_head() {
        let mut ready = queue(&[("A", 5), ("B", 1)]);
        let job = Fcfs.select_next(&mut ready).unwrap();
        assert_eq!(job.name(), "A");
        assert_eq!(Fcfs.slice_for(&job), 5);
        assert_eq!(ready.len(), 1);
    }

    #[test]
    fn test_sjf_takes_shortest_with_stable_ties() {
        let mut ready = queue(&[("A", 5), ("B", 2), ("C", 2), ("D", 1)]);
        let mut sjf = Sjf;

        let order: Vec<String> = std::iter::from_fn(|| sjf.select_next(&mut ready))
            .map(|job| job.process.name)
            .collect();
        assert_eq!(order, vec!["D", "B", "C", "A"]);
    }

    #[test]
    fn test_round_robin_slice_is_capped() {
        let rr = RoundRobin::new(TimeQuantum::new(3).unwrap());
        let ready = queue(&[("A", 7), ("B", 2)]);
        assert_eq!(rr.slice_for(&ready[0]), 3);
        assert_eq!(rr.slice_for(&ready[1]), 2);
    }

    #[test]
    fn test_dispatcher_for_each_policy() {
        for policy in SchedulingPolicy::ALL {
            assert_eq!(dispatcher_for(policy, TimeQuantum::default()).policy(), policy);
        }
    }

    #[test]
    fn test_empty_queue() {
        let mut ready = VecDeque::new();
        assert!(Fcfs.select_next(&mut ready).is_none());
        assert!(Sjf.select_next(&mut ready).is_none());
    }
}
