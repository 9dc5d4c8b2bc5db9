//! Arena-backed partition tree. Nodes own their children through the arena;
//! parent links are plain keys used only for upward queries.

use std::cmp::Reverse;

use slotmap::SlotMap;

use crate::types::{CorridorAxis, NodeId, Rect};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CorridorLink {
    pub axis: CorridorAxis,
    /// The two structures (rooms or partition subtrees) the corridor joins,
    /// in the order they were handed to the synthesizer.
    pub structures: [NodeId; 2],
    /// Rectangles the corridor was measured against: lower then upper for
    /// vertical corridors, left then right for horizontal ones.
    pub ends: [Rect; 2],
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeKind {
    Partition,
    /// Leaf carrying the room inscribed inside its area.
    Room(Rect),
    Corridor(CorridorLink),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeNode {
    pub area: Rect,
    pub parent: Option<NodeId>,
    pub children: Option<[NodeId; 2]>,
    pub layer: u32,
    pub kind: NodeKind,
}

impl TreeNode {
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// What the node occupies on the map: the room for rooms, the area otherwise.
    pub fn footprint(&self) -> Rect {
        match self.kind {
            NodeKind::Room(room) => room,
            NodeKind::Partition | NodeKind::Corridor(_) => self.area,
        }
    }
}

pub struct PartitionTree {
    nodes: SlotMap<NodeId, TreeNode>,
    creation_order: Vec<NodeId>,
    root: NodeId,
}

impl PartitionTree {
    pub fn new(area: Rect) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(TreeNode {
            area,
            parent: None,
            children: None,
            layer: 0,
            kind: NodeKind::Partition,
        });
        Self { nodes, creation_order: vec![root], root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn node(&self, id: NodeId) -> &TreeNode {
        &self.nodes[id]
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn children(&self, id: NodeId) -> Option<[NodeId; 2]> {
        self.nodes[id].children
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id].parent
    }

    pub fn footprint(&self, id: NodeId) -> Rect {
        self.nodes[id].footprint()
    }

    /// Distance from the root, counted by walking parent links.
    pub fn depth(&self, id: NodeId) -> u32 {
        let mut depth = 0;
        let mut cursor = self.nodes[id].parent;
        while let Some(parent) = cursor {
            depth += 1;
            cursor = self.nodes[parent].parent;
        }
        depth
    }

    /// Every node in the order it was created; the root comes first.
    pub fn nodes_in_creation_order(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.creation_order.iter().map(|&id| (id, &self.nodes[id]))
    }

    /// Nodes with two children, deepest layer first. Within a layer the
    /// creation order is kept.
    pub fn junctions_deepest_first(&self) -> Vec<NodeId> {
        let mut junctions: Vec<NodeId> = self
            .creation_order
            .iter()
            .copied()
            .filter(|&id| self.nodes[id].children.is_some())
            .collect();
        junctions.sort_by_key(|&id| Reverse(self.nodes[id].layer));
        junctions
    }

    /// Split `parent` into the two given areas. Returns the new child keys.
    pub(super) fn split(&mut self, parent: NodeId, first: Rect, second: Rect) -> [NodeId; 2] {
        debug_assert!(self.nodes[parent].children.is_none(), "node already split");
        let layer = self.nodes[parent].layer + 1;
        let mut insert_child = |area| {
            let id = self.nodes.insert(TreeNode {
                area,
                parent: Some(parent),
                children: None,
                layer,
                kind: NodeKind::Partition,
            });
            self.creation_order.push(id);
            id
        };
        let children = [insert_child(first), insert_child(second)];
        self.nodes[parent].children = Some(children);
        children
    }

    pub(super) fn inscribe_room(&mut self, leaf: NodeId, room: Rect) {
        let node = &mut self.nodes[leaf];
        debug_assert!(node.is_leaf(), "rooms are only inscribed in leaves");
        debug_assert!(node.area.contains_rect(&room), "room {room:?} escapes {:?}", node.area);
        node.kind = NodeKind::Room(room);
    }

    /// Store a corridor under the junction it bridges. The junction keeps
    /// exactly its two partition children.
    pub(super) fn attach_corridor(
        &mut self,
        junction: NodeId,
        rect: Rect,
        link: CorridorLink,
    ) -> NodeId {
        let layer = self.nodes[junction].layer + 1;
        let id = self.nodes.insert(TreeNode {
            area: rect,
            parent: Some(junction),
            children: None,
            layer,
            kind: NodeKind::Corridor(link),
        });
        self.creation_order.push(id);
        id
    }
}
