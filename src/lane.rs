/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under the MIT license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Lane and color assignment.
//!
//! A lineage is the maximal run of commits connected through first-parent
//! links; it occupies one column for as long as it is live. Columns are
//! handed out by [`ColumnArena`] lowest-index-first, so layouts are
//! deterministic and pack to the left.

use std::collections::HashMap;
use std::hash::Hash;

use crate::column::ColumnArena;
use crate::graph::CommitNode;

/// One column and one color class per commit id, plus the number of columns
/// the finished layout needs. Color classes are opaque indexes; a fresh one
/// is minted per lineage-opening event (a new head, or a merge parent
/// starting its own lane).
#[derive(Clone, Debug)]
pub(crate) struct LaneAssignments<N> {
    pub columns: HashMap<N, usize>,
    pub colors: HashMap<N, usize>,
    pub width: usize,
}

/// Walk the commit list newest-first and assign every in-window id a column
/// and a color class. `rows` maps each id to its first row.
pub(crate) fn assign_lanes<N>(
    commits: &[CommitNode<N>],
    rows: &HashMap<N, usize>,
) -> LaneAssignments<N>
where
    N: Clone + Eq + Hash,
{
    let mut arena = ColumnArena::new();
    let mut columns: HashMap<N, usize> = HashMap::with_capacity(commits.len());
    let mut colors: HashMap<N, usize> = HashMap::with_capacity(commits.len());
    let mut next_color = 0;

    for (row, commit) in commits.iter().enumerate() {
        if rows.get(&commit.id).copied() != Some(row) {
            // A later occurrence of an id that already has a row. The first
            // assignment stands; re-running parent propagation here could
            // hand one column to two live lineages.
            tracing::warn!(
                target: "commitgraph::lane",
                "duplicate commit id at row {}, keeping earlier assignment",
                row
            );
            continue;
        }

        // Either a descendant's first-parent step reserved a column for
        // this id, or this is a new lineage head (a branch tip with no
        // descendant in the window).
        let column = match columns.get(&commit.id) {
            Some(&column) => {
                arena.occupy(column, commit.id.clone());
                column
            }
            None => {
                let column = arena.find_free_column();
                arena.occupy(column, commit.id.clone());
                columns.insert(commit.id.clone(), column);
                colors.insert(commit.id.clone(), next_color);
                tracing::trace!(
                    target: "commitgraph::lane",
                    "row {}: new head in column {}, color {}",
                    row,
                    column,
                    next_color
                );
                next_color += 1;
                column
            }
        };

        // The first parent continues this lineage: same column, same color.
        // The slot's owner becomes the parent so the column is found again
        // when the parent's row is reached. Parents outside the window are
        // never assigned a column.
        if let Some(first_parent) = commit.parents.first() {
            if rows.contains_key(first_parent) && !columns.contains_key(first_parent) {
                let color = colors[&commit.id];
                columns.insert(first_parent.clone(), column);
                colors.insert(first_parent.clone(), color);
                arena.occupy(column, first_parent.clone());
            }
        }

        // Every other in-window parent without a column yet is a merge
        // source starting its own lane.
        for parent in commit.parents.iter().skip(1) {
            if rows.contains_key(parent) && !columns.contains_key(parent) {
                let new_column = arena.find_free_column();
                arena.occupy(new_column, parent.clone());
                columns.insert(parent.clone(), new_column);
                colors.insert(parent.clone(), next_color);
                tracing::trace!(
                    target: "commitgraph::lane",
                    "row {}: merge parent opens column {}, color {}",
                    row,
                    new_column,
                    next_color
                );
                next_color += 1;
            }
        }

        // The column is vacated in this same step when the lineage ends
        // here: at a root, or when the thread continuing downward was
        // already bound to another branch's column.
        let release = match commit.parents.first() {
            None => true,
            Some(first_parent) => columns
                .get(first_parent)
                .map_or(false, |&parent_column| parent_column != column),
        };
        if release {
            arena.free(column);
            tracing::trace!(target: "commitgraph::lane", "row {}: column {} released", row, column);
        }
    }

    LaneAssignments {
        columns,
        colors,
        width: arena.width(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn commit(id: &str, parents: &[&str]) -> CommitNode<String> {
        CommitNode::new(
            id.to_string(),
            parents.iter().map(|p| p.to_string()).collect(),
        )
    }

    fn rows_of(commits: &[CommitNode<String>]) -> HashMap<String, usize> {
        let mut rows = HashMap::new();
        for (row, commit) in commits.iter().enumerate() {
            rows.entry(commit.id.clone()).or_insert(row);
        }
        rows
    }

    #[test]
    fn test_first_parent_inherits_column_and_color() {
        let commits = vec![commit("b", &["a"]), commit("a", &[])];
        let lanes = assign_lanes(&commits, &rows_of(&commits));
        assert_eq!(lanes.columns["a"], lanes.columns["b"]);
        assert_eq!(lanes.colors["a"], lanes.colors["b"]);
        assert_eq!(lanes.width, 1);
    }

    #[test]
    fn test_merge_parent_opens_new_column_and_color() {
        let commits = vec![commit("m", &["a", "b"]), commit("a", &[]), commit("b", &[])];
        let lanes = assign_lanes(&commits, &rows_of(&commits));
        assert_eq!(lanes.columns["m"], 0);
        assert_eq!(lanes.columns["a"], 0);
        assert_eq!(lanes.columns["b"], 1);
        assert_ne!(lanes.colors["b"], lanes.colors["m"]);
        assert_eq!(lanes.width, 2);
    }

    #[test]
    fn test_out_of_window_parents_get_no_column() {
        let commits = vec![commit("a", &["gone", "also-gone"])];
        let lanes = assign_lanes(&commits, &rows_of(&commits));
        assert_eq!(lanes.columns.len(), 1);
        assert!(!lanes.columns.contains_key("gone"));
        assert!(!lanes.columns.contains_key("also-gone"));
    }

    #[test]
    fn test_root_releases_column_for_reuse() {
        // "b" is a root; the head "c" that follows should land in b's slot.
        let commits = vec![
            commit("m", &["a", "b"]),
            commit("b", &[]),
            commit("c", &["a2"]),
            commit("a", &[]),
        ];
        let lanes = assign_lanes(&commits, &rows_of(&commits));
        assert_eq!(lanes.columns["b"], 1);
        assert_eq!(lanes.columns["c"], 1);
        assert_eq!(lanes.width, 2);
    }

    #[test]
    fn test_duplicate_id_keeps_first_assignment() {
        let commits = vec![commit("a", &[]), commit("a", &[])];
        let lanes = assign_lanes(&commits, &rows_of(&commits));
        assert_eq!(lanes.columns["a"], 0);
        assert_eq!(lanes.colors["a"], 0);
        assert_eq!(lanes.width, 1);
    }
}
