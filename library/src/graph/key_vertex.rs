//! Linear-time key vertex detection.
//!
//! A key vertex has no incoming edges and an edge to every other vertex.
//! Self-loops are ignored in both directions.
//!
//! Checking every vertex costs O(n^2). Instead, a single scan with two
//! pointers `r > c` rules out every vertex but one:
//!
//! - `edge(r, c)`: c has an incoming edge, so c is out. The candidate moves to r.
//! - `!edge(r, c)`: r misses an edge to c, so r is out.
//!
//! Either way r advances, so after n - 1 steps every vertex in `[0, n)` other
//! than c has been ruled out, and only c needs the O(n) check.

use super::adj_matrix::AdjMatrix;
use crate::error::{GraphError, GraphResult};
use serde::Serialize;
use std::fmt;
use std::iter::FusedIterator;
use tracing::{debug, trace};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Disqualified {
    /// The column vertex `c` has an incoming edge from `r`
    Col,
    /// The row vertex `r` has no edge to `c`
    Row,
}

/// One step of the elimination scan, with the pointers as they were before it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct TraceEntry {
    pub step: usize,
    pub row: usize,
    pub col: usize,
    pub disqualified: Disqualified,
}

impl TraceEntry {
    pub fn eliminated(&self) -> usize {
        match self.disqualified {
            Disqualified::Col => self.col,
            Disqualified::Row => self.row,
        }
    }

    pub fn survivor(&self) -> usize {
        match self.disqualified {
            Disqualified::Col => self.row,
            Disqualified::Row => self.col,
        }
    }
}

impl fmt::Display for TraceEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.disqualified {
            Disqualified::Col => write!(f, "col {} is bad. row {} survived", self.col, self.row),
            Disqualified::Row => write!(f, "col {} survived. row {} is bad", self.col, self.row),
        }
    }
}

/// Receives elimination steps in order. `()` discards them.
pub trait TraceSink {
    fn record(&mut self, entry: TraceEntry);
}

impl TraceSink for () {
    fn record(&mut self, _: TraceEntry) {}
}

impl TraceSink for Vec<TraceEntry> {
    fn record(&mut self, entry: TraceEntry) {
        self.push(entry);
    }
}

impl<S: TraceSink + ?Sized> TraceSink for &mut S {
    fn record(&mut self, entry: TraceEntry) {
        (**self).record(entry);
    }
}

/// The elimination scan, one step per `next()`.
///
/// Between steps, `row() > candidate()` and every vertex below `row()` other
/// than `candidate()` is known not to be a key vertex.
#[derive(Clone, Debug)]
pub struct Eliminator<'g> {
    g: &'g AdjMatrix,
    r: usize,
    c: usize,
}

impl<'g> Eliminator<'g> {
    pub fn new(g: &'g AdjMatrix) -> Self {
        Self { g, r: 1, c: 0 }
    }

    pub fn row(&self) -> usize {
        self.r
    }

    pub fn candidate(&self) -> usize {
        self.c
    }

    pub fn is_done(&self) -> bool {
        self.r >= self.g.len()
    }

    /// Runs the scan to the end and returns the only vertex that can still be
    /// a key vertex.
    pub fn run(g: &'g AdjMatrix, mut sink: impl TraceSink) -> usize {
        let mut scan = Self::new(g);
        for entry in scan.by_ref() {
            sink.record(entry);
        }
        scan.c
    }
}

impl Iterator for Eliminator<'_> {
    type Item = TraceEntry;

    fn next(&mut self) -> Option<TraceEntry> {
        if self.is_done() {
            return None;
        }
        let (r, c) = (self.r, self.c);
        debug_assert!(r > c);

        let disqualified = if self.g.edge(r, c) {
            self.c = r;
            Disqualified::Col
        } else {
            Disqualified::Row
        };
        self.r += 1;

        let entry = TraceEntry {
            step: r - 1,
            row: r,
            col: c,
            disqualified,
        };
        trace!(step = entry.step, row = r, col = c, "{entry}");
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rem = self.g.len().saturating_sub(self.r);
        (rem, Some(rem))
    }
}

impl ExactSizeIterator for Eliminator<'_> {}
impl FusedIterator for Eliminator<'_> {}

/// Whether `c` has in-degree 0 and out-degree n - 1. The diagonal is never read.
///
/// # Panics
/// If `c >= g.len()`. Use [`try_is_key`] for unchecked input.
pub fn is_key(g: &AdjMatrix, c: usize) -> bool {
    let n = g.len();
    if (0..n).any(|r| r != c && g.edge(r, c)) {
        return false;
    }
    (0..n).all(|c2| c2 == c || g.edge(c, c2))
}

pub fn try_is_key(g: &AdjMatrix, c: usize) -> GraphResult<bool> {
    if c >= g.len() {
        return Err(GraphError::VertexOutOfRange {
            vertex: c,
            n: g.len(),
        });
    }
    Ok(is_key(g, c))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    /// Survivor of the elimination scan
    pub candidate: usize,
    /// `Some(candidate)` if it passed validation
    pub key_vertex: Option<usize>,
}

impl Verdict {
    pub fn has_key_vertex(&self) -> bool {
        self.key_vertex.is_some()
    }
}

/// Eliminates down to one candidate, then validates it. At most 3n - 3 edge reads.
pub fn decide(g: &AdjMatrix, sink: impl TraceSink) -> Verdict {
    let candidate = Eliminator::run(g, sink);
    let valid = is_key(g, candidate);
    debug!(n = g.len(), candidate, valid, "key vertex check");
    Verdict {
        candidate,
        key_vertex: valid.then_some(candidate),
    }
}

pub fn find_key_vertex(g: &AdjMatrix) -> Option<usize> {
    decide(g, ()).key_vertex
}

/// Definitional O(n^2) reference, by counting degrees.
pub mod naive {
    use super::AdjMatrix;

    pub fn is_key_by_definition(g: &AdjMatrix, v: usize) -> bool {
        let n = g.len();
        let in_deg = (0..n).filter(|&u| u != v && g.get(u, v)).count();
        let out_deg = (0..n).filter(|&u| u != v && g.get(v, u)).count();
        in_deg == 0 && out_deg == n - 1
    }

    pub fn key_vertices(g: &AdjMatrix) -> Vec<usize> {
        (0..g.len()).filter(|&v| is_key_by_definition(g, v)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debugging::work::measure;

    fn graph(rows: &[&[u8]]) -> AdjMatrix {
        AdjMatrix::from_01_rows(rows).unwrap()
    }

    #[test]
    fn five_vertex_scan_trace() {
        let g = graph(&[
            &[0, 1, 1, 0, 1],
            &[1, 0, 1, 0, 0],
            &[0, 1, 0, 0, 1],
            &[1, 1, 1, 0, 1],
            &[0, 1, 1, 0, 0],
        ]);
        let mut log: Vec<TraceEntry> = vec![];
        let verdict = decide(&g, &mut log);
        assert_eq!(
            verdict,
            Verdict {
                candidate: 3,
                key_vertex: Some(3)
            }
        );

        let lines: Vec<String> = log.iter().map(|e| e.to_string()).collect();
        assert_eq!(
            lines,
            [
                "col 0 is bad. row 1 survived",
                "col 1 is bad. row 2 survived",
                "col 2 is bad. row 3 survived",
                "col 3 survived. row 4 is bad",
            ]
        );
        assert_eq!(log.iter().map(|e| e.step).collect::<Vec<_>>(), [0, 1, 2, 3]);
    }

    #[test]
    fn candidate_with_incoming_edge_is_refuted() {
        let g = graph(&[&[0, 1, 1, 0], &[1, 0, 1, 1], &[0, 0, 0, 0], &[1, 0, 1, 0]]);
        let verdict = decide(&g, ());
        assert_eq!(verdict.candidate, 1);
        assert!(!verdict.has_key_vertex());
    }

    #[test]
    fn self_loops_without_cross_edges() {
        let g = graph(&[&[1, 0], &[0, 1]]);
        assert_eq!(find_key_vertex(&g), None);
    }

    #[test]
    fn two_vertices_single_edge() {
        // 1 -> 0 only: vertex 1 has no incoming edge and reaches vertex 0.
        let g = graph(&[&[0, 0], &[1, 0]]);
        assert_eq!(find_key_vertex(&g), Some(1));
        assert!(!is_key(&g, 0));
    }

    #[test]
    fn single_vertex_is_key() {
        let mut log: Vec<TraceEntry> = vec![];
        let verdict = decide(&graph(&[&[0]]), &mut log);
        assert!(log.is_empty());
        assert_eq!(verdict.key_vertex, Some(0));

        assert_eq!(find_key_vertex(&graph(&[&[1]])), Some(0));
    }

    #[test]
    fn diagonal_is_not_read_for_candidate() {
        let g = graph(&[&[1, 1, 1], &[0, 1, 0], &[0, 1, 1]]);
        assert_eq!(find_key_vertex(&g), Some(0));
    }

    #[test]
    fn eliminator_pointers_after_each_step() {
        let g = graph(&[
            &[0, 0, 0, 1],
            &[1, 0, 0, 0],
            &[0, 0, 0, 0],
            &[0, 1, 1, 0],
        ]);
        let mut scan = Eliminator::new(&g);
        assert_eq!(scan.len(), 3);

        let mut seen = vec![(scan.row(), scan.candidate())];
        while scan.next().is_some() {
            seen.push((scan.row(), scan.candidate()));
        }
        assert_eq!(seen, [(1, 0), (2, 1), (3, 1), (4, 3)]);
        assert!(scan.is_done());
        assert_eq!(scan.next(), None);
    }

    #[test]
    fn out_of_range_vertex() {
        let g = graph(&[&[0, 1], &[0, 0]]);
        assert!(try_is_key(&g, 0).unwrap());
        assert!(matches!(
            try_is_key(&g, 2),
            Err(GraphError::VertexOutOfRange { vertex: 2, n: 2 })
        ));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn is_key_panics_past_the_end() {
        let g = graph(&[&[0, 0], &[1, 0]]);
        is_key(&g, 2);
    }

    #[test]
    fn edge_reads_are_linear() {
        for n in [1, 2, 17, 64, 200] {
            // Complete tournament oriented from lower to higher index: 0 is key.
            let g = AdjMatrix::from_fn(n, |i, j| i < j).unwrap();
            let (key, w) = measure(|| find_key_vertex(&g));
            assert_eq!(key, Some(0));
            assert!(w <= 3 * n as u64, "n = {n}, reads = {w}");
        }
    }

    #[test]
    fn naive_agrees_on_fixed_cases() {
        let g = graph(&[&[0, 1, 1], &[0, 0, 1], &[0, 0, 0]]);
        assert_eq!(naive::key_vertices(&g), [0]);
        let g = graph(&[&[0, 1, 0], &[0, 0, 1], &[1, 0, 0]]);
        assert!(naive::key_vertices(&g).is_empty());
        assert_eq!(find_key_vertex(&g), None);
    }
}
