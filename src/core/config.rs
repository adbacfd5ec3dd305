/*!
 * Simulation Configuration
 * Policy, quantum and grammar selection for one simulation run
 */

use crate::parser::GrammarVariant;
use crate::scheduler::{SchedulingPolicy, TimeQuantum};
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Invalid configuration value
#[derive(Error, Debug, Clone, PartialEq, Eq, Diagnostic)]
pub enum ConfigError {
    #[error("Invalid policy '{0}'")]
    #[diagnostic(
        code(config::invalid_policy),
        help("Valid policies: fcfs, sjf, round_robin (rr).")
    )]
    InvalidPolicy(String),

    #[error("Invalid quantum: {ticks} must be between {min} and {max} ticks")]
    #[diagnostic(
        code(config::invalid_quantum),
        help("The round-robin quantum is a positive number of ticks.")
    )]
    InvalidQuantum { ticks: u64, min: u64, max: u64 },

    #[error("Invalid grammar '{0}'")]
    #[diagnostic(
        code(config::invalid_grammar),
        help("Valid grammars: with_io, without_io.")
    )]
    InvalidGrammar(String),
}

/// Everything needed to turn a process file into a timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SimConfig {
    pub policy: SchedulingPolicy,
    /// Only consulted by round-robin
    #[serde(default)]
    pub quantum: TimeQuantum,
    #[serde(default)]
    pub grammar: GrammarVariant,
}

impl SimConfig {
    pub fn new(policy: SchedulingPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn with_quantum(mut self, quantum: TimeQuantum) -> Self {
        self.quantum = quantum;
        self
    }

    pub fn with_grammar(mut self, grammar: GrammarVariant) -> Self {
        self.grammar = grammar;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimConfig::default();
        assert_eq!(config.policy, SchedulingPolicy::Fcfs);
        assert_eq!(config.quantum, TimeQuantum::default());
        assert_eq!(config.grammar, GrammarVariant::WithIo);
    }

    #[test]
    fn test_builder() {
        let quantum = TimeQuantum::new(3).unwrap();
        let config = SimConfig::new(SchedulingPolicy::RoundRobin)
            .with_quantum(quantum)
            .with_grammar(GrammarVariant::WithoutIo);
        assert_eq!(config.quantum.as_ticks(), 3);
        assert_eq!(config.grammar, GrammarVariant::WithoutIo);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let config: SimConfig = serde_json::from_str(r#"{"policy":"sjf"}"#).unwrap();
        assert_eq!(config.policy, SchedulingPolicy::Sjf);
        assert_eq!(config.quantum, TimeQuantum::default());
    }

    #[test]
    fn test_deserialize_grammar_field() {
        let json = r#"{"policy":"rr","quantum":2,"grammar":"without_io"}"#;
        let config: SimConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.grammar, GrammarVariant::WithoutIo);

        let config: SimConfig =
            serde_json::from_str(r#"{"policy":"fcfs","grammar":"IO"}"#).unwrap();
        assert_eq!(config.grammar, GrammarVariant::WithIo);

        let err = serde_json::from_str::<SimConfig>(r#"{"policy":"fcfs","grammar":"yaml"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid grammar"));
    }

    #[test]
    fn test_invalid_quantum_message() {
        let err = TimeQuantum::new(0).unwrap_err();
        assert!(err.to_string().contains("must be between"));
    }
}
