//! Layout diagnostics: order inversions and homology-order crossings.
//!
//! Neither check alters the layout; both feed logs, reports and tests.

use serde::Serialize;

use crate::math::sign;
use crate::model::{GroupId, Layout, PlacedElement, Side};

/// A neighbor pair whose current gap has the wrong sign.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OrderViolation {
    pub group: usize,
    pub side: &'static str,
    pub gap: f64,
    pub expected: f64,
}

/// Compare every group's current gaps with the signs fixed at link time.
pub fn check_node_order(layout: &Layout) -> Vec<OrderViolation> {
    let mut out = Vec::new();
    for gi in 0..layout.groups.len() {
        let id = GroupId(gi);
        for side in [Side::Left, Side::Right] {
            let (Some(link), Some(gap)) = (layout.group(id).x.get(side), layout.gap(id, side))
            else {
                continue;
            };
            if sign(gap) != sign(link.expected_gap) {
                out.push(OrderViolation {
                    group: gi,
                    side: match side {
                        Side::Left => "left",
                        Side::Right => "right",
                    },
                    gap,
                    expected: link.expected_gap,
                });
            }
        }
    }
    out
}

/// Homology groups whose local order on some sequence differs from the
/// reference sequence (default: the first sequence seen).
///
/// Per sequence the homology order by position is taken with consecutive
/// repeats collapsed. An entry is reported (with its successor) when no
/// occurrence of it in the reference is followed by the same successor.
pub fn crossing_homology_groups(
    elements: &[PlacedElement],
    reference_sequence: Option<&str>,
) -> Vec<String> {
    let mut sequences: Vec<&str> = Vec::new();
    for e in elements {
        if !sequences.contains(&e.sequence_id.as_str()) {
            sequences.push(e.sequence_id.as_str());
        }
    }
    let Some(reference) = reference_sequence.or(sequences.first().copied()) else {
        return Vec::new();
    };
    let reference_order = homology_order(elements, reference);

    let mut crossing = Vec::new();
    for seq in sequences {
        let order = homology_order(elements, seq);
        for (i, hg) in order.iter().enumerate() {
            let next = order.get(i + 1);
            let kept = reference_order
                .iter()
                .enumerate()
                .any(|(r, rh)| rh == hg && reference_order.get(r + 1) == next);
            if !kept {
                crossing.push(hg.to_string());
                if let Some(n) = next {
                    crossing.push(n.to_string());
                }
            }
        }
    }
    crossing
}

fn homology_order<'a>(elements: &'a [PlacedElement], sequence: &str) -> Vec<&'a str> {
    let mut on_seq: Vec<&PlacedElement> = elements
        .iter()
        .filter(|e| e.sequence_id == sequence)
        .collect();
    on_seq.sort_by(|a, b| a.position.total_cmp(&b.position));
    let mut order: Vec<&str> = on_seq
        .into_iter()
        .filter_map(|e| e.homology_group.as_deref())
        .collect();
    order.dedup();
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::GenomicElement;

    fn placed(id: &str, seq: &str, pos: f64, h: &str) -> PlacedElement {
        PlacedElement {
            id: id.into(),
            sequence_id: seq.into(),
            homology_group: Some(h.into()),
            start: pos,
            end: pos + 1.0,
            position: pos,
            width: 1.0,
        }
    }

    #[test]
    fn fresh_layout_has_no_violations() {
        let elements = vec![
            GenomicElement::new("a", "s", 0.0, 10.0, None),
            GenomicElement::new("b", "s", 50.0, 60.0, None),
        ];
        let layout = Layout::build(&elements, None).unwrap();
        assert!(check_node_order(&layout).is_empty());
    }

    #[test]
    fn inverted_pair_is_reported_from_both_sides() {
        let elements = vec![
            GenomicElement::new("a", "s", 0.0, 10.0, None),
            GenomicElement::new("b", "s", 50.0, 60.0, None),
        ];
        let mut layout = Layout::build(&elements, None).unwrap();
        layout.shift_group(GroupId(0), 100.0);
        let v = check_node_order(&layout);
        assert_eq!(v.len(), 2);
        assert_eq!(v[0].side, "right");
        assert_eq!(v[1].side, "left");
    }

    #[test]
    fn swapped_neighbors_are_crossings() {
        let elements = vec![
            placed("a1", "s1", 0.0, "A"),
            placed("a2", "s1", 10.0, "B"),
            placed("a3", "s1", 20.0, "C"),
            placed("b1", "s2", 0.0, "A"),
            placed("b2", "s2", 10.0, "C"),
            placed("b3", "s2", 20.0, "B"),
        ];
        let crossing = crossing_homology_groups(&elements, None);
        assert_eq!(crossing, ["A", "C", "C", "B", "B"]);
        let same = crossing_homology_groups(&elements[..3], None);
        assert!(same.is_empty());
    }
}
