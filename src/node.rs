/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Per-row drawing instructions.

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::hash::Hash;

use itertools::Itertools;
use serde_derive::Deserialize;
use serde_derive::Serialize;

use crate::edge::Edge;
use crate::graph::CommitNode;
use crate::lane::LaneAssignments;

/// Drawing instructions for one commit row. This is the unit a renderer
/// consumes: where the node sits, whether its lineage continues above and
/// below, which other lineages cross behind the row, and which lanes its
/// merge curves reach.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GraphNode<N> {
    pub id: N,
    pub column: usize,
    /// Opaque palette class of this row's lineage.
    pub color: usize,
    /// Label of the first branch head targeting this commit, if any.
    pub branch_label: Option<String>,
    /// A line arrives from the row above in this commit's own column.
    pub line_from_top: bool,
    /// The primary lineage continues straight down from this row.
    pub line_to_bottom: bool,
    /// Columns of other lineages crossing behind this row untouched.
    pub pass_through_lanes: BTreeSet<usize>,
    /// Columns reached by curved connectors leaving this row, in parent
    /// order.
    pub curves_to_bottom: Vec<usize>,
}

/// Derive one [`GraphNode`] per row from the edge list and the column map.
pub(crate) fn build_nodes<N>(
    commits: &[CommitNode<N>],
    lanes: &LaneAssignments<N>,
    edges: &[Edge],
    branch_heads: &[(N, String)],
) -> Vec<GraphNode<N>>
where
    N: Clone + Eq + Hash,
{
    let outgoing: HashMap<usize, Vec<&Edge>> =
        edges.iter().map(|edge| (edge.child_row, edge)).into_group_map();
    let incoming: HashMap<usize, Vec<&Edge>> =
        edges.iter().map(|edge| (edge.parent_row, edge)).into_group_map();

    // Vertical threads crossing each row: the parent column of every edge
    // that spans it.
    let mut crossing: Vec<BTreeSet<usize>> = vec![BTreeSet::new(); commits.len()];
    for edge in edges {
        for row in edge.child_row + 1..edge.parent_row {
            crossing[row].insert(edge.parent_column);
        }
    }

    // First matching label wins; the caller controls the slice order.
    let mut labels: HashMap<&N, &str> = HashMap::new();
    for (id, name) in branch_heads {
        labels.entry(id).or_insert_with(|| name.as_str());
    }

    let empty = Vec::new();
    let mut nodes = Vec::with_capacity(commits.len());
    for (row, commit) in commits.iter().enumerate() {
        let column = lanes.columns.get(&commit.id).copied().unwrap_or_default();
        let color = lanes.colors.get(&commit.id).copied().unwrap_or_default();
        let outgoing = outgoing.get(&row).unwrap_or(&empty);
        let incoming = incoming.get(&row).unwrap_or(&empty);

        let line_from_top = incoming.iter().any(|edge| edge.parent_column == column);
        let line_to_bottom = outgoing
            .iter()
            .any(|edge| edge.is_first_parent && edge.parent_column == column);
        let curves_to_bottom = outgoing
            .iter()
            .filter(|edge| edge.parent_column != column)
            .map(|edge| edge.parent_column)
            .collect();
        let mut pass_through_lanes = std::mem::take(&mut crossing[row]);
        pass_through_lanes.remove(&column);

        nodes.push(GraphNode {
            id: commit.id.clone(),
            column,
            color,
            branch_label: labels.get(&commit.id).map(|label| label.to_string()),
            line_from_top,
            line_to_bottom,
            pass_through_lanes,
            curves_to_bottom,
        });
    }
    nodes
}
