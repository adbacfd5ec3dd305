/*!
 * Timeline Statistics
 * Per-process and aggregate metrics derived from recorded snapshots
 *
 * Everything is computed from snapshots alone, so a restored session yields
 * the same numbers as the run that produced it.
 */

use super::timeline::Timeline;
use crate::core::types::Tick;
use crate::process::ProcessState;
use serde::{Deserialize, Serialize};

/// Metrics for one display slot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProcessStats {
    pub name: String,
    pub arrived_at: Tick,
    /// Ticks spent running
    pub cpu_ticks: Tick,
    /// Contiguous running stretches
    pub dispatches: usize,
    /// First tick on the CPU
    pub first_run: Option<Tick>,
    /// Tick after the last running tick
    pub completion: Option<Tick>,
    pub turnaround: Option<Tick>,
    pub waiting: Option<Tick>,
}

/// Aggregate metrics for a whole timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct TimelineStats {
    pub processes: Vec<ProcessStats>,
    /// Simulated ticks, excluding the closing frame
    pub total_ticks: Tick,
    pub busy_ticks: Tick,
    pub idle_ticks: Tick,
    pub average_turnaround: f64,
    pub average_waiting: f64,
}

impl TimelineStats {
    pub fn from_timeline(timeline: &Timeline) -> Self {
        let total_ticks = timeline.len().saturating_sub(1) as Tick;
        let ticks = &timeline.snapshots()[..total_ticks as usize];
        let width = timeline.get(0).map_or(0, |s| s.len());

        let processes: Vec<ProcessStats> = (0..width)
            .map(|slot| {
                let first = &timeline[0][slot];
                let mut stats = ProcessStats {
                    name: first.name.clone(),
                    arrived_at: first.arrived_time,
                    cpu_ticks: 0,
                    dispatches: 0,
                    first_run: None,
                    completion: None,
                    turnaround: None,
                    waiting: None,
                };

                let mut was_running = false;
                for (tick, snapshot) in ticks.iter().enumerate() {
                    let running = snapshot[slot].state == ProcessState::Running;
                    if running {
                        stats.cpu_ticks += 1;
                        stats.first_run.get_or_insert(tick as Tick);
                        stats.completion = Some(tick as Tick + 1);
                        if !was_running {
                            stats.dispatches += 1;
                        }
                    }
                    was_running = running;
                }

                stats.turnaround = stats
                    .completion
                    .map(|done| done.saturating_sub(stats.arrived_at));
                stats.waiting = stats
                    .turnaround
                    .map(|turnaround| turnaround.saturating_sub(stats.cpu_ticks));
                stats
            })
            .collect();

        let busy_ticks = ticks.iter().filter(|s| s.running().is_some()).count() as Tick;

        Self {
            average_turnaround: average(processes.iter().filter_map(|p| p.turnaround)),
            average_waiting: average(processes.iter().filter_map(|p| p.waiting)),
            processes,
            total_ticks,
            busy_ticks,
            idle_ticks: total_ticks - busy_ticks,
        }
    }

    pub fn get(&self, name: &str) -> Option<&ProcessStats> {
        self.processes.iter().find(|p| p.name == name)
    }

    /// Share of simulated ticks with a process on the CPU
    pub fn utilization(&self) -> f64 {
        if self.total_ticks == 0 {
            return 0.0;
        }
        self.busy_ticks as f64 / self.total_ticks as f64
    }
}

fn average(values: impl Iterator<Item = Tick>) -> f64 {
    // Accumulate wide; tick counts near u64::MAX must not wrap
    let (sum, count) = values.fold((0u128, 0u64), |(sum, count), v| {
        (sum + u128::from(v), count + 1)
    });
    if count == 0 {
        0.0
    } else {
        sum as f64 / count as f64
    }
}
