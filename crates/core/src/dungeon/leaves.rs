use std::collections::VecDeque;

use crate::types::NodeId;

use super::tree::PartitionTree;

/// Leaves under `start`, breadth-first. A leaf start yields itself.
pub fn extract_leaves(tree: &PartitionTree, start: NodeId) -> Vec<NodeId> {
    let Some(children) = tree.children(start) else {
        return vec![start];
    };

    let mut leaves = Vec::new();
    let mut open = VecDeque::from(children);
    while let Some(current) = open.pop_front() {
        match tree.children(current) {
            Some(grandchildren) => open.extend(grandchildren),
            None => leaves.push(current),
        }
    }
    leaves
}
