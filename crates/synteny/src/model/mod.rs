//! Element & group model: the arena the relaxation mutates.
//!
//! Purpose
//! - Hold every node (one per input element) and every rigid `NodeGroup` in
//!   flat vectors addressed by `NodeId`/`GroupId`.
//! - Derive group ranges on demand from member positions; nothing positional
//!   is cached across a mutation.
//!
//! Lifecycle
//! - `Layout::build` (see `build.rs`) creates nodes, groups and all links once
//!   per run. Relaxation only translates groups; groups never gain or lose
//!   members afterwards.

mod build;
mod types;

pub use build::center_on_homology_group;
pub use types::{
    GenomicElement, GroupId, GroupSummary, Node, NodeGroup, NodeId, PlacedElement, Side, Span,
    XLink, XLinks,
};

/// Owned arena of nodes and groups for one relaxation run.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub nodes: Vec<Node>,
    pub groups: Vec<NodeGroup>,
    /// Interned sequence ids, in first-seen input order.
    pub sequences: Vec<String>,
    /// Group ids per sequence, left to right.
    pub tracks: Vec<Vec<GroupId>>,
}

impl Layout {
    #[inline]
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    #[inline]
    pub fn group(&self, id: GroupId) -> &NodeGroup {
        &self.groups[id.0]
    }

    #[inline]
    pub fn group_mut(&mut self, id: GroupId) -> &mut NodeGroup {
        &mut self.groups[id.0]
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Current range of a group: min member start, max member end.
    pub fn group_range(&self, id: GroupId) -> Span {
        let g = self.group(id);
        let mut members = g.members.iter().map(|&n| self.node(n).span());
        let first = members
            .next()
            .unwrap_or(Span::new(g.original_range.start, g.original_range.end));
        members.fold(first, |acc, s| acc.union(&s))
    }

    /// Signed gap to the neighbor boundary on `side`, if there is a neighbor.
    ///
    /// Left: `left.end − self.start` (negative while ordered).
    /// Right: `right.start − self.end` (positive while ordered).
    pub fn gap(&self, id: GroupId, side: Side) -> Option<f64> {
        let link = self.group(id).x.get(side)?;
        let own = self.group_range(id);
        let other = self.group_range(link.neighbor);
        Some(match side {
            Side::Left => other.end - own.start,
            Side::Right => other.start - own.end,
        })
    }

    /// Translate every member of a group by `delta`.
    pub fn shift_group(&mut self, id: GroupId, delta: f64) {
        if delta == 0.0 {
            return;
        }
        let members = std::mem::take(&mut self.groups[id.0].members);
        for &n in &members {
            self.nodes[n.0].position += delta;
        }
        self.groups[id.0].members = members;
    }

    /// Record a move on the group and mirror its cooling state onto members.
    pub(crate) fn record_move(&mut self, id: GroupId, delta: f64, temp_scale: f64) {
        let g = &mut self.groups[id.0];
        g.last_move = delta;
        g.temp_scale = temp_scale;
        for &n in &g.members {
            let node = &mut self.nodes[n.0];
            node.last_move = delta;
            node.temp_scale = temp_scale;
        }
    }

    /// Elements with their final positions, flattened group by group in
    /// track order.
    pub fn placed_elements(&self) -> Vec<PlacedElement> {
        self.tracks
            .iter()
            .flatten()
            .flat_map(|&g| self.group(g).members.iter())
            .map(|&n| {
                let node = self.node(n);
                PlacedElement {
                    id: node.id.clone(),
                    sequence_id: self.sequences[node.sequence].clone(),
                    homology_group: node.homology_group.clone(),
                    start: node.start,
                    end: node.end,
                    position: node.position,
                    width: node.width,
                }
            })
            .collect()
    }

    pub fn group_summaries(&self) -> Vec<GroupSummary> {
        self.tracks
            .iter()
            .flatten()
            .map(|&g| {
                let group = self.group(g);
                GroupSummary {
                    sequence_id: self.sequences[group.sequence].clone(),
                    members: group
                        .members
                        .iter()
                        .map(|&n| self.node(n).id.clone())
                        .collect(),
                    original: group.original_range,
                    current: self.group_range(g),
                }
            })
            .collect()
    }
}
