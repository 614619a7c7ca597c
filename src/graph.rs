/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The layout pipeline: commits -> lanes -> edges -> nodes.

use std::collections::HashMap;
use std::hash::Hash;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::edge::build_edges;
use crate::edge::Edge;
use crate::lane::assign_lanes;
use crate::node::build_nodes;
use crate::node::GraphNode;

/// A commit as the layout engine sees it: an identifier plus ordered parent
/// identifiers. The first parent defines primary lineage continuation.
///
/// Everything else about a commit (author, message, dates) stays with the
/// caller; output rows line up positionally with input rows, so metadata is
/// joined back by row index.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct CommitNode<N> {
    pub id: N,
    pub parents: Vec<N>,
}

impl<N> CommitNode<N> {
    pub fn new(id: N, parents: Vec<N>) -> Self {
        CommitNode { id, parents }
    }
}

/// A finished layout.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Graph<N> {
    /// One node per input commit, in input order.
    pub nodes: Vec<GraphNode<N>>,
    /// Connectors between in-window rows, in row order then parent order.
    pub edges: Vec<Edge>,
    /// Number of columns the widest part of the graph needs.
    pub width: usize,
}

/// Lay out `commits` (reverse-chronological, newest first) into per-row
/// rendering primitives.
///
/// `branch_heads` attaches a label to matching rows; when several entries
/// target the same id, the first in slice order wins, so callers wanting a
/// portable tie-break should pre-sort the slice (e.g. by branch name).
///
/// The layout is a pure function of its arguments: identical input yields
/// identical output, and every call starts from a fresh column table.
/// Malformed input degrades instead of failing: a duplicate id keeps its
/// first assignment, and a parent missing from the window simply gets no
/// connector.
pub fn layout<N>(commits: &[CommitNode<N>], branch_heads: &[(N, String)]) -> Graph<N>
where
    N: Clone + Eq + Hash,
{
    let mut rows: HashMap<N, usize> = HashMap::with_capacity(commits.len());
    for (row, commit) in commits.iter().enumerate() {
        rows.entry(commit.id.clone()).or_insert(row);
    }

    let lanes = assign_lanes(commits, &rows);
    let edges = build_edges(commits, &rows, &lanes);
    let nodes = build_nodes(commits, &lanes, &edges, branch_heads);

    tracing::debug!(
        target: "commitgraph::graph",
        "laid out {} rows, {} edges, width {}",
        nodes.len(),
        edges.len(),
        lanes.width
    );

    Graph {
        nodes,
        edges,
        width: lanes.width,
    }
}
