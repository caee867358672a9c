//! Search over turn choices.
//!
//! Finds the highest-scoring sequence of option indices for a game whose
//! per-turn options are known in advance. Three variants share one
//! breadth-first expansion core:
//!
//! - `Exhaustive` keeps every distinct board.
//! - `Pruned` drops successors whose score is negative or lower than
//!   their parent's.
//! - `DepthLimited` prunes like `Pruned` and, every `depth` turns, also
//!   drops the lowest-scoring `pct_to_prune` fraction of the frontier.

pub mod bfs;
pub mod frontier;

pub use bfs::{replay, run, run_until};
pub use frontier::{Frontier, Node};

use serde::{Deserialize, Serialize};

use crate::game::GameError;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SearchVariant {
    #[default]
    Exhaustive,
    Pruned,
    DepthLimited { depth: usize, pct_to_prune: f64 },
}

impl SearchVariant {
    /// Whether successors are filtered by the non-decreasing score rule.
    pub fn prunes(&self) -> bool {
        !matches!(self, SearchVariant::Exhaustive)
    }
}

/// Search parameters.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub variant: SearchVariant,
    /// Expand frontier states on the rayon pool.
    pub parallel: bool,
    /// Wall-clock budget; checked between turns.
    pub movetime_ms: Option<u64>,
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if let SearchVariant::DepthLimited {
            depth,
            pct_to_prune,
        } = self.variant
        {
            if depth == 0 {
                return Err(GameError::InvalidSearchConfig(
                    "depth must be at least 1".to_string(),
                ));
            }
            if !(0.0..=1.0).contains(&pct_to_prune) {
                return Err(GameError::InvalidSearchConfig(format!(
                    "pct_to_prune must lie in [0, 1], got {}",
                    pct_to_prune
                )));
            }
        }
        Ok(())
    }
}

/// Outcome of a search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Best final score found; 0 if every branch was pruned.
    pub score: i32,
    /// Option index chosen on each turn to reach `score`.
    pub path: Vec<usize>,
    /// Successor states generated.
    pub nodes: u64,
    /// Turns expanded before the search finished or was stopped.
    pub turns_searched: usize,
    /// Largest frontier held after any turn.
    pub peak_frontier: usize,
    /// False if a stop flag or time budget ended the search early.
    pub complete: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn depth_limited_validation() {
        let bad_depth = SearchConfig {
            variant: SearchVariant::DepthLimited {
                depth: 0,
                pct_to_prune: 0.5,
            },
            ..SearchConfig::default()
        };
        assert!(matches!(
            bad_depth.validate(),
            Err(GameError::InvalidSearchConfig(_))
        ));

        let bad_pct = SearchConfig {
            variant: SearchVariant::DepthLimited {
                depth: 2,
                pct_to_prune: f64::NAN,
            },
            ..SearchConfig::default()
        };
        assert!(bad_pct.validate().is_err());

        assert!(SearchConfig::default().validate().is_ok());
    }

    #[test]
    fn config_from_json() {
        let cfg: SearchConfig = serde_json::from_str(
            r#"{"variant": {"kind": "depth_limited", "depth": 3, "pct_to_prune": 0.25}}"#,
        )
        .unwrap();
        assert_eq!(
            cfg.variant,
            SearchVariant::DepthLimited {
                depth: 3,
                pct_to_prune: 0.25
            }
        );
        assert!(!cfg.parallel);
        assert_eq!(cfg.movetime_ms, None);
    }
}
