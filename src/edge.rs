/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Connector records between child and parent rows.

use std::collections::HashMap;
use std::hash::Hash;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::graph::CommitNode;
use crate::lane::LaneAssignments;

/// One directed connector from a child commit to one of its parents.
///
/// Edges exist only between rows inside the loaded window; a parent beyond
/// the window boundary produces no edge, so a lineage visually ends at the
/// boundary until more history is loaded.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub child_row: usize,
    pub parent_row: usize,
    pub child_column: usize,
    pub parent_column: usize,
    /// Color class of the line being drawn: the parent lineage's class.
    pub color: usize,
    /// True for the first entry in the child's parent list.
    pub is_first_parent: bool,
}

/// Emit one edge per (child, parent) pair with both ends in the window,
/// in row order then parent-list order.
pub(crate) fn build_edges<N>(
    commits: &[CommitNode<N>],
    rows: &HashMap<N, usize>,
    lanes: &LaneAssignments<N>,
) -> Vec<Edge>
where
    N: Clone + Eq + Hash,
{
    let mut edges = Vec::new();
    for (child_row, commit) in commits.iter().enumerate() {
        let child_column = match lanes.columns.get(&commit.id) {
            Some(&column) => column,
            None => continue,
        };
        for (index, parent) in commit.parents.iter().enumerate() {
            let (parent_row, parent_column) =
                match (rows.get(parent), lanes.columns.get(parent)) {
                    (Some(&row), Some(&column)) => (row, column),
                    _ => continue,
                };
            let color = lanes
                .colors
                .get(parent)
                .or_else(|| lanes.colors.get(&commit.id))
                .copied()
                .unwrap_or_default();
            edges.push(Edge {
                child_row,
                parent_row,
                child_column,
                parent_column,
                color,
                is_first_parent: index == 0,
            });
        }
    }
    edges
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lane::assign_lanes;

    fn commit(id: &str, parents: &[&str]) -> CommitNode<String> {
        CommitNode::new(
            id.to_string(),
            parents.iter().map(|p| p.to_string()).collect(),
        )
    }

    fn edges_of(commits: &[CommitNode<String>]) -> Vec<Edge> {
        let mut rows = HashMap::new();
        for (row, commit) in commits.iter().enumerate() {
            rows.entry(commit.id.clone()).or_insert(row);
        }
        let lanes = assign_lanes(commits, &rows);
        build_edges(commits, &rows, &lanes)
    }

    #[test]
    fn test_one_edge_per_in_window_parent() {
        let commits = vec![
            commit("m", &["a", "b"]),
            commit("a", &["gone"]),
            commit("b", &[]),
        ];
        let edges = edges_of(&commits);
        // m->a and m->b; a's parent is outside the window.
        assert_eq!(edges.len(), 2);
        assert!(edges[0].is_first_parent);
        assert_eq!((edges[0].child_row, edges[0].parent_row), (0, 1));
        assert!(!edges[1].is_first_parent);
        assert_eq!((edges[1].child_row, edges[1].parent_row), (0, 2));
    }

    #[test]
    fn test_edge_takes_parent_color() {
        let commits = vec![commit("m", &["a", "b"]), commit("a", &[]), commit("b", &[])];
        let edges = edges_of(&commits);
        // The merge curve into b is drawn in b's lineage color.
        assert_eq!(edges[1].parent_column, 1);
        assert_eq!(edges[1].color, 1);
        assert_eq!(edges[0].color, 0);
    }

    #[test]
    fn test_no_edges_for_empty_input() {
        assert!(edges_of(&[]).is_empty());
    }
}
