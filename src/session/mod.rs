/*!
 * Simulation Session
 * Save and restore the replay position of a computed timeline
 *
 * A session stores only snapshots. Restoring one replays recorded frames;
 * it never resumes the engine.
 */

use crate::scheduler::{SchedulingPolicy, Snapshot, Timeline, TimeQuantum};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

/// Session persistence errors
#[derive(Error, Debug, Diagnostic)]
pub enum SessionError {
    #[error("Failed to read or write session file {path}: {source}")]
    #[diagnostic(
        code(session::io),
        help("Check the path and file permissions.")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed session data: {0}")]
    #[diagnostic(
        code(session::malformed),
        help("Session files are written by `sched-sim run --save`; do not edit them by hand.")
    )]
    Malformed(#[from] serde_json::Error),

    #[error("Inconsistent session: {0}")]
    #[diagnostic(code(session::inconsistent))]
    Inconsistent(String),
}

pub type SessionResult<T> = Result<T, SessionError>;

/// Replay state of one simulation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Session {
    pub policy: SchedulingPolicy,
    pub quantum: TimeQuantum,
    /// Frames not shown yet, in order
    remaining: VecDeque<Snapshot>,
    /// Frames already shown, in order
    displayed: Vec<Snapshot>,
}

impl Session {
    /// Start a replay of a fresh timeline
    pub fn new(policy: SchedulingPolicy, quantum: TimeQuantum, timeline: Timeline) -> Self {
        Self {
            policy,
            quantum,
            remaining: timeline.into_snapshots().into(),
            displayed: Vec::new(),
        }
    }

    /// Show the next frame
    pub fn advance(&mut self) -> Option<&Snapshot> {
        let frame = self.remaining.pop_front()?;
        self.displayed.push(frame);
        self.displayed.last()
    }

    /// Show up to `steps` frames, returning how many were shown
    pub fn advance_by(&mut self, steps: usize) -> usize {
        let count = steps.min(self.remaining.len());
        self.displayed.extend(self.remaining.drain(..count));
        count
    }

    pub fn remaining(&self) -> &VecDeque<Snapshot> {
        &self.remaining
    }

    pub fn displayed(&self) -> &[Snapshot] {
        &self.displayed
    }

    pub fn is_finished(&self) -> bool {
        self.remaining.is_empty()
    }

    /// `(shown, total)` frame counts
    pub fn progress(&self) -> (usize, usize) {
        let shown = self.displayed.len();
        (shown, shown + self.remaining.len())
    }

    /// Reassemble the full recorded timeline
    pub fn timeline(&self) -> Timeline {
        Timeline::from(
            self.displayed
                .iter()
                .chain(self.remaining.iter())
                .cloned()
                .collect::<Vec<_>>(),
        )
    }

    pub fn to_json(&self) -> SessionResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> SessionResult<Self> {
        let session: Self = serde_json::from_str(json)?;
        session.validate()?;
        Ok(session)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> SessionResult<()> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|source| SessionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let (shown, total) = self.progress();
        info!(path = %path.display(), shown, total, "session saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let session = Self::from_json(&json)?;
        let (shown, total) = session.progress();
        info!(path = %path.display(), shown, total, "session restored");
        Ok(session)
    }

    /// Every frame must describe the same number of processes
    fn validate(&self) -> SessionResult<()> {
        let mut frames = self.displayed.iter().chain(self.remaining.iter());
        let Some(first) = frames.next() else {
            return Ok(());
        };
        let width = first.len();
        for (index, frame) in frames.enumerate() {
            if frame.len() != width {
                return Err(SessionError::Inconsistent(format!(
                    "frame {} has {} processes, expected {}",
                    index + 1,
                    frame.len(),
                    width
                )));
            }
        }
        debug!(width, "session frames validated");
        Ok(())
    }
}
