/*!
 * Scheduler Types
 * Policy and quantum configuration for the scheduling engine
 */

use crate::core::config::ConfigError;
use crate::core::limits::{DEFAULT_QUANTUM_TICKS, MAX_QUANTUM_TICKS, MIN_QUANTUM_TICKS};
use crate::core::types::Tick;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Dispatch policy selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SchedulingPolicy {
    /// First-come-first-served, run to completion
    #[default]
    Fcfs,
    /// Non-preemptive shortest job first
    Sjf,
    /// Round-robin with a fixed quantum
    RoundRobin,
}

impl SchedulingPolicy {
    pub const ALL: [SchedulingPolicy; 3] = [Self::Fcfs, Self::Sjf, Self::RoundRobin];

    /// Parse from string representation
    pub fn from_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "fcfs" | "first_come_first_served" | "fifo" => Ok(Self::Fcfs),
            "sjf" | "shortest_job_first" => Ok(Self::Sjf),
            "round_robin" | "roundrobin" | "rr" => Ok(Self::RoundRobin),
            _ => Err(ConfigError::InvalidPolicy(s.to_string())),
        }
    }

    #[inline(always)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fcfs => "fcfs",
            Self::Sjf => "sjf",
            Self::RoundRobin => "round_robin",
        }
    }

    /// Whether a dispatched process can lose the CPU before finishing
    #[inline]
    pub const fn is_preemptive(&self) -> bool {
        matches!(self, Self::RoundRobin)
    }
}

impl fmt::Display for SchedulingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for SchedulingPolicy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SchedulingPolicy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::from_str(&s).map_err(serde::de::Error::custom)
    }
}

/// Round-robin slice length in ticks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TimeQuantum {
    ticks: Tick,
}

impl TimeQuantum {
    /// Create new time quantum
    pub fn new(ticks: Tick) -> Result<Self, ConfigError> {
        if !(MIN_QUANTUM_TICKS..=MAX_QUANTUM_TICKS).contains(&ticks) {
            return Err(ConfigError::InvalidQuantum {
                ticks,
                min: MIN_QUANTUM_TICKS,
                max: MAX_QUANTUM_TICKS,
            });
        }
        Ok(Self { ticks })
    }

    #[inline(always)]
    pub const fn as_ticks(&self) -> Tick {
        self.ticks
    }
}

impl Default for TimeQuantum {
    fn default() -> Self {
        Self {
            ticks: DEFAULT_QUANTUM_TICKS,
        }
    }
}

impl fmt::Display for TimeQuantum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ticks", self.ticks)
    }
}

impl<'de> Deserialize<'de> for TimeQuantum {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let ticks = Tick::deserialize(deserializer)?;
        Self::new(ticks).map_err(serde::de::Error::custom)
    }
}
