//! Priority re-sequencing.
//!
//! Within a status group, priorities must read `1, 2, ..., N` once sorted.
//! After a caller writes an arbitrary priority for one member, the group is
//! fetched ordered by priority and every member is renumbered by position.
//! The value the caller wrote therefore only decides where its client lands;
//! ties keep whatever order the store returned them in.

use lambars::pipe;

use super::{Client, ClientId, Priority};

/// A single `priority = value WHERE id = ...` write produced by a pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriorityAssignment {
    pub id: ClientId,
    pub priority: Priority,
}

/// Plans the renumbering of a group already ordered by priority.
///
/// Every member gets an assignment, including members whose priority is
/// already correct: the pass rewrites the whole group.
#[must_use]
pub fn resequence(ordered_group: &[Client]) -> Vec<PriorityAssignment> {
    ordered_group
        .iter()
        .enumerate()
        .map(assign_position)
        .collect()
}

fn assign_position((index, client): (usize, &Client)) -> PriorityAssignment {
    PriorityAssignment {
        id: client.id,
        priority: Priority::at_position(index),
    }
}

/// Returns `true` when the group's priorities, once sorted, are exactly `1..=N`.
#[must_use]
pub fn is_contiguous(group: &[Client]) -> bool {
    pipe!(group, sorted_priorities, reads_as_positions)
}

fn sorted_priorities(group: &[Client]) -> Vec<Priority> {
    let mut priorities: Vec<Priority> = group.iter().map(|client| client.priority).collect();
    priorities.sort();
    priorities
}

fn reads_as_positions(priorities: Vec<Priority>) -> bool {
    priorities
        .into_iter()
        .enumerate()
        .all(|(index, priority)| priority == Priority::at_position(index))
}
