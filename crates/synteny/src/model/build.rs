//! Grouping builder: nodes, overlap-merged groups, X and Y links.
//!
//! Steps
//! 1. Validate input and intern sequence ids.
//! 2. Create nodes sorted by (sequence, start) so the arena order is the track
//!    order; optionally re-center each sequence on an anchor homology group.
//! 3. Per sequence, merge nodes into the last open group while their
//!    `[start, end]` overlaps the group's running range.
//! 4. Link nodes and groups to their immediate left/right neighbors and map
//!    homology peers to owning groups.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use super::types::{GenomicElement, GroupId, Node, NodeGroup, NodeId, Span, XLink, XLinks};
use super::Layout;
use crate::error::{Error, Result};

impl Layout {
    /// Build the arena for one run. Empty input yields an empty layout.
    pub fn build(elements: &[GenomicElement], anchor: Option<&str>) -> Result<Layout> {
        validate(elements)?;

        let mut sequences: Vec<String> = Vec::new();
        let mut seq_index: HashMap<&str, usize> = HashMap::new();
        for e in elements {
            if !seq_index.contains_key(e.sequence_id.as_str()) {
                seq_index.insert(e.sequence_id.as_str(), sequences.len());
                sequences.push(e.sequence_id.clone());
            }
        }

        let mut order: Vec<usize> = (0..elements.len()).collect();
        order.sort_by(|&a, &b| {
            let (ea, eb) = (&elements[a], &elements[b]);
            seq_index[ea.sequence_id.as_str()]
                .cmp(&seq_index[eb.sequence_id.as_str()])
                .then(ea.start.total_cmp(&eb.start))
                .then(ea.end.total_cmp(&eb.end))
                .then(a.cmp(&b))
        });

        let nodes: Vec<Node> = order
            .iter()
            .map(|&i| {
                let e = &elements[i];
                Node {
                    id: e.id.clone(),
                    sequence: seq_index[e.sequence_id.as_str()],
                    homology_group: e.homology_group.clone(),
                    start: e.start,
                    end: e.end,
                    position: e.start,
                    width: e.end - e.start,
                    last_move: 0.0,
                    temp_scale: 1.0,
                    x: XLinks::default(),
                    y: Vec::new(),
                    group: GroupId(0),
                }
            })
            .collect();

        let mut layout = Layout {
            nodes,
            groups: Vec::new(),
            tracks: vec![Vec::new(); sequences.len()],
            sequences,
        };
        if let Some(anchor) = anchor {
            center_on_homology_group(&mut layout, anchor);
        }
        layout.link_nodes();
        layout.form_groups();
        layout.link_groups();
        debug!(
            nodes = layout.nodes.len(),
            groups = layout.groups.len(),
            sequences = layout.sequences.len(),
            "layout_built"
        );
        Ok(layout)
    }

    /// Contiguous node-id range per sequence (nodes are sorted by sequence).
    fn node_runs(&self) -> Vec<std::ops::Range<usize>> {
        let mut runs = vec![0..0; self.sequences.len()];
        let mut i = 0;
        while i < self.nodes.len() {
            let s = self.nodes[i].sequence;
            let begin = i;
            while i < self.nodes.len() && self.nodes[i].sequence == s {
                i += 1;
            }
            runs[s] = begin..i;
        }
        runs
    }

    fn link_nodes(&mut self) {
        for run in self.node_runs() {
            for i in run.clone() {
                let left = (i > run.start).then(|| {
                    let other = &self.nodes[i - 1];
                    XLink {
                        neighbor: NodeId(i - 1),
                        expected_gap: other.end_position() - self.nodes[i].position,
                    }
                });
                let right = (i + 1 < run.end).then(|| {
                    let other = &self.nodes[i + 1];
                    XLink {
                        neighbor: NodeId(i + 1),
                        expected_gap: other.position - self.nodes[i].end_position(),
                    }
                });
                self.nodes[i].x = XLinks { left, right };
            }
        }

        let mut by_homology: HashMap<&str, Vec<NodeId>> = HashMap::new();
        for (i, n) in self.nodes.iter().enumerate() {
            if let Some(h) = n.homology_group.as_deref() {
                by_homology.entry(h).or_default().push(NodeId(i));
            }
        }
        let peers: Vec<Vec<NodeId>> = self
            .nodes
            .iter()
            .map(|n| match n.homology_group.as_deref() {
                Some(h) => by_homology[h]
                    .iter()
                    .copied()
                    .filter(|&p| self.nodes[p.0].sequence != n.sequence)
                    .collect(),
                None => Vec::new(),
            })
            .collect();
        for (n, y) in self.nodes.iter_mut().zip(peers) {
            n.y = y;
        }
    }

    fn form_groups(&mut self) {
        for run in self.node_runs() {
            let mut open: Option<(GroupId, Span)> = None;
            for i in run {
                let span = self.nodes[i].span();
                match open {
                    Some((gid, range)) if range.overlaps(&span) => {
                        let g = &mut self.groups[gid.0];
                        g.members.push(NodeId(i));
                        g.original_range = g.original_range.union(&self.nodes[i].original_span());
                        self.nodes[i].group = gid;
                        open = Some((gid, range.union(&span)));
                    }
                    _ => {
                        let gid = GroupId(self.groups.len());
                        let seq = self.nodes[i].sequence;
                        self.groups.push(NodeGroup {
                            sequence: seq,
                            members: vec![NodeId(i)],
                            original_range: self.nodes[i].original_span(),
                            x: XLinks::default(),
                            y: Vec::new(),
                            last_move: 0.0,
                            temp_scale: 1.0,
                        });
                        self.tracks[seq].push(gid);
                        self.nodes[i].group = gid;
                        open = Some((gid, span));
                    }
                }
            }
        }
    }

    fn link_groups(&mut self) {
        let mut links: Vec<(GroupId, XLinks<GroupId>)> = Vec::with_capacity(self.groups.len());
        for track in &self.tracks {
            for (k, &gid) in track.iter().enumerate() {
                let own = self.group_range(gid);
                let left = k.checked_sub(1).map(|j| XLink {
                    neighbor: track[j],
                    expected_gap: self.group_range(track[j]).end - own.start,
                });
                let right = track.get(k + 1).map(|&next| XLink {
                    neighbor: next,
                    expected_gap: self.group_range(next).start - own.end,
                });
                links.push((gid, XLinks { left, right }));
            }
        }
        for (gid, x) in links {
            self.groups[gid.0].x = x;
        }

        for gi in 0..self.groups.len() {
            let mut ys: Vec<GroupId> = self.groups[gi]
                .members
                .iter()
                .flat_map(|&m| self.nodes[m.0].y.iter())
                .map(|&peer| self.nodes[peer.0].group)
                .filter(|&g| g != GroupId(gi))
                .collect();
            ys.sort_unstable();
            ys.dedup();
            self.groups[gi].y = ys;
        }
    }
}

/// Translate each sequence so the first element of `homology_group` sits at 0.
///
/// Sequences without a member of that group are left untouched.
pub fn center_on_homology_group(layout: &mut Layout, homology_group: &str) {
    for seq in 0..layout.sequences.len() {
        let anchor = layout
            .nodes
            .iter()
            .filter(|n| n.sequence == seq)
            .find(|n| n.homology_group.as_deref() == Some(homology_group))
            .map(|n| n.position);
        let Some(anchor) = anchor else {
            continue;
        };
        for n in layout.nodes.iter_mut().filter(|n| n.sequence == seq) {
            n.position -= anchor;
        }
    }
}

fn validate(elements: &[GenomicElement]) -> Result<()> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(elements.len());
    for e in elements {
        let invalid = |reason| Error::InvalidElement {
            id: e.id.clone(),
            reason,
        };
        if e.id.is_empty() {
            return Err(invalid("empty id"));
        }
        if e.sequence_id.is_empty() {
            return Err(invalid("empty sequence id"));
        }
        if !e.start.is_finite() || !e.end.is_finite() {
            return Err(invalid("non-finite coordinates"));
        }
        if e.end < e.start {
            return Err(invalid("end lies before start"));
        }
        if !seen.insert(e.id.as_str()) {
            return Err(Error::DuplicateElement { id: e.id.clone() });
        }
    }
    Ok(())
}
