/*!
 * Scheduling Engine
 * Single-core tick-by-tick simulation driven by a dispatch policy
 *
 * The loop admits arrivals, asks the policy for the next job and runs it for
 * the granted slice, capturing one snapshot per tick. Idle ticks happen only
 * while some process has not arrived yet. One closing snapshot duplicates the
 * final state.
 */

use super::dispatch::{dispatcher_for, Dispatch, Job};
use super::timeline::{Snapshot, Timeline};
use super::types::{SchedulingPolicy, TimeQuantum};
use crate::core::config::SimConfig;
use crate::core::types::Tick;
use crate::process::{Process, ProcessState, ScheduledProcess};
use std::collections::VecDeque;
use tracing::{debug, info, trace};

/// Single-use simulation of one process set under one policy
#[derive(Debug)]
pub struct Engine {
    /// Not yet arrived, ascending by arrival time
    pending: VecDeque<Job>,
    ready: VecDeque<Job>,
    /// Live display records, index-aligned with the arrival-sorted input
    display: Vec<ScheduledProcess>,
    time: Tick,
    idle_ticks: Tick,
    timeline: Timeline,
    dispatcher: Box<dyn Dispatch>,
}

impl Engine {
    /// Create engine with the default quantum
    pub fn new(processes: Vec<Process>, policy: SchedulingPolicy) -> Self {
        Self::with_quantum(processes, policy, TimeQuantum::default())
    }

    /// Create engine with a custom round-robin quantum
    pub fn with_quantum(
        processes: Vec<Process>,
        policy: SchedulingPolicy,
        quantum: TimeQuantum,
    ) -> Self {
        Self::with_dispatcher(processes, dispatcher_for(policy, quantum))
    }

    pub fn from_config(processes: Vec<Process>, config: &SimConfig) -> Self {
        Self::with_quantum(processes, config.policy, config.quantum)
    }

    /// Create engine around any dispatch policy
    pub fn with_dispatcher(mut processes: Vec<Process>, dispatcher: Box<dyn Dispatch>) -> Self {
        // Stable: equal arrivals keep input order
        processes.sort_by_key(|p| p.arrived_at);

        let display: Vec<ScheduledProcess> =
            processes.iter().map(ScheduledProcess::from_process).collect();
        let count = display.len();
        let total_burst = processes
            .iter()
            .fold(0, |sum: Tick, p| sum.saturating_add(p.burst_time));
        let pending = processes
            .into_iter()
            .enumerate()
            .map(|(slot, process)| Job::new(slot, process))
            .collect();

        debug!(
            policy = dispatcher.policy().as_str(),
            processes = count,
            total_burst,
            "engine initialized"
        );

        Self {
            pending,
            ready: VecDeque::new(),
            display,
            time: 0,
            idle_ticks: 0,
            timeline: Timeline::new(),
            dispatcher,
        }
    }

    pub fn policy(&self) -> SchedulingPolicy {
        self.dispatcher.policy()
    }

    /// Initial display array, before any tick
    pub fn display(&self) -> &[ScheduledProcess] {
        &self.display
    }

    /// Run the simulation to completion and hand over the timeline
    pub fn run(mut self) -> Timeline {
        while !self.pending.is_empty() || !self.ready.is_empty() {
            self.admit_arrivals();

            let Some(mut job) = self.dispatcher.select_next(&mut self.ready) else {
                self.time += 1;
                self.idle_ticks += 1;
                trace!(time = self.time, "cpu idle");
                self.snapshot();
                continue;
            };

            let slice = self.dispatcher.slice_for(&job);
            debug!(
                time = self.time,
                name = job.name(),
                remaining = job.remaining(),
                slice,
                preemptive = self.dispatcher.policy().is_preemptive(),
                "dispatch"
            );

            for _ in 0..slice {
                self.mark_running(&job);
                self.snapshot();
                job.process.burst_time -= 1;
                self.time += 1;
                self.admit_arrivals();
            }

            if job.process.is_finished() {
                self.mark_done(&job);
            } else {
                debug!(
                    time = self.time,
                    name = job.name(),
                    remaining = job.remaining(),
                    "preempted"
                );
                self.mark_ready(&job);
                self.ready.push_back(job);
            }
        }

        // Closing frame duplicates the final state
        self.snapshot();

        info!(
            policy = self.dispatcher.policy().as_str(),
            ticks = self.time,
            idle_ticks = self.idle_ticks,
            snapshots = self.timeline.len(),
            "simulation complete"
        );
        self.timeline
    }

    /// Move every arrived process into the ready queue
    fn admit_arrivals(&mut self) {
        let time = self.time;
        while self
            .pending
            .front()
            .is_some_and(|job| job.process.arrived_at <= time)
        {
            let Some(job) = self.pending.pop_front() else {
                break;
            };
            if job.remaining() > 0 {
                self.display[job.slot].set_state(ProcessState::Ready);
            }
            trace!(time, name = job.name(), "arrived");
            self.ready.push_back(job);
        }
    }

    fn mark_running(&mut self, job: &Job) {
        let entry = &mut self.display[job.slot];
        entry.set_state(ProcessState::Running);
        entry.burst_time = entry.burst_time.saturating_sub(1);
        trace!(time = self.time, name = job.name(), remaining = entry.burst_time, "tick");
    }

    fn mark_ready(&mut self, job: &Job) {
        self.display[job.slot].set_state(ProcessState::Ready);
    }

    fn mark_done(&mut self, job: &Job) {
        self.display[job.slot].set_state(ProcessState::Done);
        debug!(time = self.time, name = job.name(), "finished");
    }

    fn snapshot(&mut self) {
        self.timeline.push(Snapshot::capture(&self.display));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::dispatch::Fcfs;

    fn states(timeline: &Timeline, tick: usize) -> Vec<(ProcessState, Tick)> {
        timeline[tick]
            .iter()
            .map(|p| (p.state, p.burst_time))
            .collect()
    }

    #[test]
    fn test_fcfs_two_processes() {
        let processes = vec![Process::new("A", 0, 3), Process::new("B", 1, 2)];
        let timeline = Engine::new(processes, SchedulingPolicy::Fcfs).run();

        use ProcessState::*;
        assert_eq!(timeline.len(), 6);
        assert_eq!(states(&timeline, 0), vec![(Running, 2), (NotArrived, 2)]);
        assert_eq!(states(&timeline, 1), vec![(Running, 1), (Ready, 2)]);
        assert_eq!(states(&timeline, 2), vec![(Running, 0), (Ready, 2)]);
        assert_eq!(states(&timeline, 3), vec![(Done, 0), (Running, 1)]);
        assert_eq!(states(&timeline, 4), vec![(Done, 0), (Running, 0)]);
        assert_eq!(states(&timeline, 5), vec![(Done, 0), (Done, 0)]);
    }

    #[test]
    fn test_idle_ticks_before_first_arrival() {
        let processes = vec![Process::new("A", 2, 1)];
        let timeline = Engine::new(processes, SchedulingPolicy::Fcfs).run();

        use ProcessState::*;
        assert_eq!(timeline.len(), 4);
        assert_eq!(states(&timeline, 0), vec![(NotArrived, 1)]);
        assert_eq!(states(&timeline, 1), vec![(NotArrived, 1)]);
        assert_eq!(states(&timeline, 2), vec![(Running, 0)]);
        assert_eq!(states(&timeline, 3), vec![(Done, 0)]);
    }

    #[test]
    fn test_display_sorted_by_arrival() {
        let processes = vec![
            Process::new("late", 5, 1),
            Process::new("early", 0, 1),
            Process::new("tie", 0, 1),
        ];
        let engine = Engine::new(processes, SchedulingPolicy::Fcfs);
        let names: Vec<&str> = engine.display().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["early", "tie", "late"]);
    }

    #[test]
    fn test_empty_process_list() {
        let timeline = Engine::new(Vec::new(), SchedulingPolicy::RoundRobin).run();
        assert_eq!(timeline.len(), 1);
        assert!(timeline[0].is_empty());
    }

    #[test]
    fn test_zero_burst_finishes_without_ticks() {
        let processes = vec![Process::new("Z", 0, 0), Process::new("A", 0, 1)];
        let timeline = Engine::new(processes, SchedulingPolicy::Fcfs).run();

        use ProcessState::*;
        assert_eq!(timeline.len(), 2);
        assert_eq!(states(&timeline, 0), vec![(Done, 0), (Running, 0)]);
        assert_eq!(timeline.running_ticks(0), 0);
    }

    #[test]
    fn test_huge_bursts_do_not_overflow_on_setup() {
        let processes = vec![Process::new("A", 0, u64::MAX), Process::new("B", 0, 1)];
        let engine = Engine::new(processes, SchedulingPolicy::Fcfs);
        assert_eq!(engine.display().len(), 2);
        assert_eq!(engine.display()[0].burst_time, u64::MAX);
    }

    #[test]
    fn test_custom_dispatcher() {
        let processes = vec![Process::new("A", 0, 2)];
        let engine = Engine::with_dispatcher(processes, Box::new(Fcfs));
        assert_eq!(engine.policy(), SchedulingPolicy::Fcfs);
        assert_eq!(engine.run().len(), 3);
    }
}
