//! Arena entities: input records, nodes, rigid node groups and their links.
//!
//! Nodes and groups refer to each other by index (`NodeId`, `GroupId`) into the
//! owning `Layout`; nothing here looks anything up by string id.

use serde::{Deserialize, Serialize};

/// One gene/transcript as supplied by the data provider.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenomicElement {
    pub id: String,
    pub sequence_id: String,
    pub start: f64,
    pub end: f64,
    #[serde(default)]
    pub homology_group: Option<String>,
}

impl GenomicElement {
    pub fn new(
        id: impl Into<String>,
        sequence_id: impl Into<String>,
        start: f64,
        end: f64,
        homology_group: Option<&str>,
    ) -> Self {
        Self {
            id: id.into(),
            sequence_id: sequence_id.into(),
            start,
            end,
            homology_group: homology_group.map(str::to_string),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GroupId(pub usize);

/// Closed interval `[start, end]` on one sequence.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub start: f64,
    pub end: f64,
}

impl Span {
    #[inline]
    pub fn new(start: f64, end: f64) -> Self {
        Self { start, end }
    }
    #[inline]
    pub fn width(&self) -> f64 {
        self.end - self.start
    }
    /// Inclusive overlap: touching endpoints count.
    #[inline]
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start <= other.end && other.start <= self.end
    }
    #[inline]
    pub fn union(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    /// Direction of the neighbor on this side: `-1` left, `+1` right.
    #[inline]
    pub fn direction(self) -> f64 {
        match self {
            Side::Left => -1.0,
            Side::Right => 1.0,
        }
    }
}

/// Link to an adjacent entity on the same sequence.
///
/// `expected_gap` is `neighbor boundary − own boundary` at construction time:
/// negative on the left side, positive on the right (for non-overlapping
/// entities).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XLink<I> {
    pub neighbor: I,
    pub expected_gap: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct XLinks<I> {
    pub left: Option<XLink<I>>,
    pub right: Option<XLink<I>>,
}

impl<I> Default for XLinks<I> {
    fn default() -> Self {
        Self {
            left: None,
            right: None,
        }
    }
}

impl<I: Copy> XLinks<I> {
    #[inline]
    pub fn get(&self, side: Side) -> Option<XLink<I>> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Arena entry for a single element.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: String,
    /// Index into `Layout::sequences`.
    pub sequence: usize,
    pub homology_group: Option<String>,
    /// Genomic coordinates (bp), immutable.
    pub start: f64,
    pub end: f64,
    /// Current layout start.
    pub position: f64,
    pub width: f64,
    pub last_move: f64,
    pub temp_scale: f64,
    pub x: XLinks<NodeId>,
    /// Homology peers on other sequences.
    pub y: Vec<NodeId>,
    pub group: GroupId,
}

impl Node {
    #[inline]
    pub fn end_position(&self) -> f64 {
        self.position + self.width
    }
    #[inline]
    pub fn original_span(&self) -> Span {
        Span::new(self.start, self.end)
    }
    #[inline]
    pub fn span(&self) -> Span {
        Span::new(self.position, self.end_position())
    }
}

/// Rigid cluster of overlapping nodes on one sequence.
#[derive(Clone, Debug)]
pub struct NodeGroup {
    pub sequence: usize,
    /// Sorted by start; contiguous in genomic order.
    pub members: Vec<NodeId>,
    /// Genomic bounding box of the members (bp), fixed at creation.
    pub original_range: Span,
    pub x: XLinks<GroupId>,
    pub y: Vec<GroupId>,
    pub last_move: f64,
    pub temp_scale: f64,
}

/// Final position of one element, ready for the rendering side.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacedElement {
    pub id: String,
    pub sequence_id: String,
    pub homology_group: Option<String>,
    pub start: f64,
    pub end: f64,
    pub position: f64,
    pub width: f64,
}

/// Flattened view of a group for grouped rendering.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub sequence_id: String,
    pub members: Vec<String>,
    pub original: Span,
    pub current: Span,
}
