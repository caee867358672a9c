//! Breadth-first search over turn choices.
//!
//! Every turn, each frontier state is expanded by every option of that
//! turn. Successors are merged into the next frontier in frontier order
//! and then option order, so the outcome is the same whether expansion
//! runs sequentially or on the rayon pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use rayon::prelude::*;

use super::frontier::{Frontier, Node};
use super::{SearchConfig, SearchResult, SearchVariant};
use crate::game::{GameError, GameState};

/// Searches from `root` to the end of the game.
pub fn run(root: &GameState, config: &SearchConfig) -> Result<SearchResult, GameError> {
    run_until(root, config, &AtomicBool::new(false))
}

/// Like `run`, but stops between turns once `stop` is set or the
/// configured time budget is spent. A stopped search reports the best
/// state of its last complete frontier.
pub fn run_until(
    root: &GameState,
    config: &SearchConfig,
    stop: &AtomicBool,
) -> Result<SearchResult, GameError> {
    config.validate()?;
    let start = Instant::now();
    let movetime = config.movetime_ms.map(Duration::from_millis);
    let prune = config.variant.prunes();
    let remaining = root.turn_limit().saturating_sub(root.turns_passed());

    let mut frontier = Frontier::with_root(root.clone());
    let mut nodes: u64 = 0;
    let mut peak = frontier.len();
    let mut turns_searched = 0;
    let mut complete = true;

    for _ in 0..remaining {
        if frontier.is_empty() {
            break;
        }
        if stop.load(Ordering::Relaxed) || movetime.is_some_and(|t| start.elapsed() >= t) {
            complete = false;
            break;
        }

        let batches = expand_all(frontier.nodes(), prune, config.parallel)?;
        nodes += (frontier.len() * root.choice_count()) as u64;

        let mut next = Frontier::new();
        for node in batches.into_iter().flatten() {
            next.insert(node);
        }
        frontier = next;
        turns_searched += 1;

        if let SearchVariant::DepthLimited {
            depth,
            pct_to_prune,
        } = config.variant
        {
            if turns_searched % depth == 0 {
                let dropped = frontier.cull(pct_to_prune);
                log::debug!("culled {} states after turn {}", dropped, turns_searched);
            }
        }

        peak = peak.max(frontier.len());
        log::debug!(
            "turn {}/{}: {} states, {} nodes",
            root.turns_passed() + turns_searched,
            root.turn_limit(),
            frontier.len(),
            nodes
        );
    }

    let (score, path) = frontier
        .best()
        .map_or((0, Vec::new()), |n| (n.state.score(), n.path.clone()));

    log::info!(
        "{:?} search: score {} over {} turns, {} nodes, peak frontier {}, {}ms{}",
        config.variant,
        score,
        turns_searched,
        nodes,
        peak,
        start.elapsed().as_millis(),
        if complete { "" } else { " (stopped early)" }
    );

    Ok(SearchResult {
        score,
        path,
        nodes,
        turns_searched,
        peak_frontier: peak,
        complete,
    })
}

/// Expands every node, preserving frontier order in the output.
fn expand_all(nodes: &[Node], prune: bool, parallel: bool) -> Result<Vec<Vec<Node>>, GameError> {
    if parallel {
        nodes.par_iter().map(|n| expand(n, prune)).collect()
    } else {
        nodes.iter().map(|n| expand(n, prune)).collect()
    }
}

/// Applies each option of the current turn to `node`. With `prune`, a
/// successor is dropped when its score is negative or below its parent's.
fn expand(node: &Node, prune: bool) -> Result<Vec<Node>, GameError> {
    let parent = node.state.score();
    let count = node.state.choice_count();
    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let state = node.state.successor(i)?;
        if prune && (state.score() < 0 || state.score() < parent) {
            continue;
        }
        let mut path = Vec::with_capacity(node.path.len() + 1);
        path.extend_from_slice(&node.path);
        path.push(i);
        out.push(Node { state, path });
    }
    Ok(out)
}

/// Replays `path` from `root`, returning the resulting state.
pub fn replay(root: &GameState, path: &[usize]) -> Result<GameState, GameError> {
    let mut state = root.clone();
    for &i in path {
        state.choose_option(i)?;
    }
    Ok(state)
}
