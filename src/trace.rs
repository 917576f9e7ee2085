//! Immutable tree snapshots for replaying a solve.
//!
//! The simplifier and solver never hand out references into the live
//! expression tree. Instead they capture [`Snapshot`]s: plain copies of
//! the tree's shape and labels at one moment, cheap to store and safe
//! to keep after the tree has been rewritten. An external renderer
//! draws them one at a time.

use crate::expr::Expr;
use std::collections::BTreeMap;

/// One frame of a solve trace: a rooted tree as parent-to-child edges
/// plus a label for every node.
///
/// Node ids are assigned depth-first, starting from the root id the
/// capturing call supplied, so sibling subtrees occupy contiguous id
/// ranges. A childless snapshot (a bare monomial) is encoded as the
/// single self-loop edge `(root, root)`, which tells the renderer apart
/// from an empty graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub edges: Vec<(usize, usize)>,
    pub labels: BTreeMap<usize, String>,
}

/// The chronological snapshots produced by one simplification or solve.
pub type Trace = Vec<Snapshot>;

impl Snapshot {
    /// The number of nodes captured.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Joins two snapshots (both rooted at id 0) under a fresh root
    /// labelled `root_label`.
    ///
    /// The new root takes id 0, `g1`'s ids shift up by one, and `g2`'s
    /// by `g1.len() + 1`, keeping all id ranges disjoint. Self-loop
    /// markers are dropped; the edges from the new root replace them.
    pub(crate) fn merge(g1: &Snapshot, g2: &Snapshot, root_label: &str) -> Snapshot {
        let mut edges = Vec::new();
        let mut labels = BTreeMap::new();
        labels.insert(0, root_label.to_string());

        let offset = g1.len() + 1;

        for &(parent, child) in &g1.edges {
            if parent != child {
                edges.push((parent + 1, child + 1));
            }
        }
        for (&id, label) in &g1.labels {
            labels.insert(id + 1, label.clone());
        }

        for &(parent, child) in &g2.edges {
            if parent != child {
                edges.push((parent + offset, child + offset));
            }
        }
        for (&id, label) in &g2.labels {
            labels.insert(id + offset, label.clone());
        }

        edges.push((0, 1));
        edges.push((0, offset));

        Snapshot { edges, labels }
    }
}

impl Expr {
    /// Capture this tree as a [`Snapshot`] whose root has id `root`.
    ///
    /// Monomial leaves are labelled with their rendering; sum and
    /// product nodes are labelled with their operator symbol and get
    /// one child per term. A bare monomial yields the single-node
    /// self-loop form.
    pub fn snapshot(&self, root: usize) -> Snapshot {
        match self {
            Expr::Monomial { .. } => {
                let mut labels = BTreeMap::new();
                labels.insert(root, self.to_string());
                Snapshot { edges: vec![(root, root)], labels }
            },
            Expr::Sum(terms) => compound_snapshot(terms, "+", root),
            Expr::Product(factors) => compound_snapshot(factors, "*", root),
        }
    }
}

fn compound_snapshot(terms: &[Expr], op: &str, root: usize) -> Snapshot {
    let mut edges = Vec::new();
    let mut labels = BTreeMap::new();
    labels.insert(root, op.to_string());

    let mut next = root + 1;
    for term in terms {
        edges.push((root, next));
        if term.is_monomial() {
            labels.insert(next, term.to_string());
            next += 1;
        } else {
            let sub = term.snapshot(next);
            next += sub.len();
            edges.extend(sub.edges);
            labels.extend(sub.labels);
        }
    }

    Snapshot { edges, labels }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    fn labels(pairs: &[(usize, &str)]) -> BTreeMap<usize, String> {
        pairs.iter().map(|&(id, s)| (id, s.to_string())).collect()
    }

    #[test]
    fn monomial_snapshot_is_a_self_loop() {
        let got = Expr::monomial(6.0, 2.0).snapshot(3);

        assert_eq!(got.edges, vec![(3, 3)]);
        assert_eq!(got.labels, labels(&[(3, "6x^2")]));
    }

    #[test]
    fn flat_sum_snapshot() {
        let got = parse("(2x + x + 1)").unwrap().snapshot(0);

        assert_eq!(got.edges, vec![(0, 1), (0, 2), (0, 3)]);
        assert_eq!(
            got.labels,
            labels(&[(0, "+"), (1, "2x"), (2, "x"), (3, "1")])
        );
    }

    #[test]
    fn nested_subtrees_take_contiguous_id_ranges() {
        let got = parse("(((x + 3) * (x + 3)) + 1)").unwrap().snapshot(0);

        assert_eq!(
            got.edges,
            vec![
                (0, 1),
                (1, 2),
                (2, 3),
                (2, 4),
                (1, 5),
                (5, 6),
                (5, 7),
                (0, 8),
            ]
        );
        assert_eq!(
            got.labels,
            labels(&[
                (0, "+"),
                (1, "*"),
                (2, "+"),
                (3, "x"),
                (4, "3"),
                (5, "+"),
                (6, "x"),
                (7, "3"),
                (8, "1"),
            ])
        );
    }

    #[test]
    fn snapshot_honours_the_starting_root_id() {
        let got = parse("(x + 1)").unwrap().snapshot(4);

        assert_eq!(got.edges, vec![(4, 5), (4, 6)]);
        assert_eq!(got.labels, labels(&[(4, "+"), (5, "x"), (6, "1")]));
    }

    #[test]
    fn merge_joins_under_a_fresh_root() {
        let left = parse("(x + 1)").unwrap().snapshot(0);
        let right = Expr::monomial(5.0, 0.0).snapshot(0);

        let got = Snapshot::merge(&left, &right, "=");

        assert_eq!(got.edges, vec![(1, 2), (1, 3), (0, 1), (0, 4)]);
        assert_eq!(
            got.labels,
            labels(&[(0, "="), (1, "+"), (2, "x"), (3, "1"), (4, "5")])
        );
    }

    #[test]
    fn merge_drops_self_loops() {
        let left = Expr::monomial(7.0, 0.0).snapshot(0);
        let right = Expr::monomial(7.0, 0.0).snapshot(0);

        let got = Snapshot::merge(&left, &right, "=");

        assert_eq!(got.edges, vec![(0, 1), (0, 2)]);
        assert_eq!(got.labels, labels(&[(0, "="), (1, "7"), (2, "7")]));
    }
}
