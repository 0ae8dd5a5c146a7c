// Dense n x n adjacency matrix, packed row-major into u64 words.
use crate::debugging::work::work;
use crate::error::{GraphError, GraphResult};

type B = u64;
const BW: usize = 64;

#[derive(Clone, PartialEq, Eq, Hash)]
pub struct AdjMatrix {
    n: usize,
    bits: Vec<B>,
}

impl AdjMatrix {
    /// Builds an n x n matrix where `f(i, j)` tells whether i -> j is an edge.
    pub fn from_fn(n: usize, mut f: impl FnMut(usize, usize) -> bool) -> GraphResult<Self> {
        if n == 0 {
            return Err(GraphError::Empty);
        }
        let mut bits = vec![0; (n * n).div_ceil(BW)];
        for i in 0..n {
            for j in 0..n {
                if f(i, j) {
                    let k = i * n + j;
                    bits[k / BW] |= 1 << (k % BW);
                }
            }
        }
        Ok(Self { n, bits })
    }

    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> GraphResult<Self> {
        let n = rows.len();
        check_square(rows.iter().map(|row| row.as_ref().len()), n)?;
        Self::from_fn(n, |i, j| rows[i].as_ref()[j])
    }

    /// Same as `from_rows`, for rows of 0/1 integers. Any other value is rejected.
    pub fn from_01_rows<R: AsRef<[u8]>>(rows: &[R]) -> GraphResult<Self> {
        let n = rows.len();
        check_square(rows.iter().map(|row| row.as_ref().len()), n)?;
        for (i, row) in rows.iter().enumerate() {
            if let Some(j) = row.as_ref().iter().position(|&x| x > 1) {
                return Err(GraphError::invalid_entry(i, j, row.as_ref()[j].to_string()));
            }
        }
        Self::from_fn(n, |i, j| rows[i].as_ref()[j] == 1)
    }

    pub fn len(&self) -> usize {
        self.n
    }

    // Never true: construction rejects n = 0.
    pub fn is_empty(&self) -> bool {
        self.n == 0
    }

    /// Edge predicate shared by the eliminator and the validator. Every call
    /// counts as one edge read.
    #[inline]
    pub fn edge(&self, i: usize, j: usize) -> bool {
        work();
        self.get(i, j)
    }

    /// Uncounted read, for rendering and reference checks.
    ///
    /// # Panics
    /// If `i` or `j` is not below `len()`.
    #[inline]
    pub fn get(&self, i: usize, j: usize) -> bool {
        assert!(
            i < self.n && j < self.n,
            "edge ({i}, {j}) out of range for {} vertices",
            self.n
        );
        let k = i * self.n + j;
        (self.bits[k / BW] >> (k % BW)) & 1 != 0
    }

    /// A copy with the diagonal replaced by `loops(v)`. Off-diagonal edges are kept.
    pub fn with_diagonal(&self, mut loops: impl FnMut(usize) -> bool) -> Self {
        let mut res = self.clone();
        for v in 0..self.n {
            let k = v * self.n + v;
            if loops(v) {
                res.bits[k / BW] |= 1 << (k % BW);
            } else {
                res.bits[k / BW] &= !(1 << (k % BW));
            }
        }
        res
    }

    pub fn row(&self, i: usize) -> impl Iterator<Item = bool> + '_ {
        (0..self.n).map(move |j| self.get(i, j))
    }

    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = bool> + '_> + '_ {
        (0..self.n).map(move |i| self.row(i))
    }
}

fn check_square(lens: impl Iterator<Item = usize>, n: usize) -> GraphResult<()> {
    if n == 0 {
        return Err(GraphError::Empty);
    }
    for (row, len) in lens.enumerate() {
        if len != n {
            return Err(GraphError::NotSquare { row, len, n });
        }
    }
    Ok(())
}

impl std::fmt::Debug for AdjMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AdjMatrix(")?;
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            for x in row {
                write!(f, "{}", x as u8)?;
            }
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::debugging::work::measure;

    #[test]
    fn packs_across_word_boundaries() {
        let n = 11;
        let g = AdjMatrix::from_fn(n, |i, j| (i * 7 + j * 3) % 5 == 0).unwrap();
        for i in 0..n {
            for j in 0..n {
                assert_eq!(g.get(i, j), (i * 7 + j * 3) % 5 == 0, "({i}, {j})");
            }
        }
    }

    #[test]
    fn rejects_ragged_rows() {
        let err = AdjMatrix::from_01_rows(&[vec![0u8, 1], vec![0]]).unwrap_err();
        assert!(matches!(
            err,
            GraphError::NotSquare { row: 1, len: 1, n: 2 }
        ));

        let err = AdjMatrix::from_rows(&[vec![false, true, false], vec![true, false, false]])
            .unwrap_err();
        assert!(matches!(err, GraphError::NotSquare { row: 0, .. }));
    }

    #[test]
    fn rejects_non_binary_cells() {
        let err = AdjMatrix::from_01_rows(&[vec![0u8, 2], vec![1, 0]]).unwrap_err();
        assert!(matches!(err, GraphError::InvalidEntry { row: 0, col: 1, .. }));
    }

    #[test]
    fn rejects_empty() {
        let rows: [Vec<u8>; 0] = [];
        assert!(matches!(AdjMatrix::from_01_rows(&rows), Err(GraphError::Empty)));
        assert!(matches!(AdjMatrix::from_fn(0, |_, _| true), Err(GraphError::Empty)));
    }

    #[test]
    fn edge_is_counted_and_get_is_not() {
        let g = AdjMatrix::from_01_rows(&[[0u8, 1], [0, 0]]).unwrap();
        let (_, w) = measure(|| (g.get(0, 1), g.get(1, 0)));
        assert_eq!(w, 0);
        let (e, w) = measure(|| g.edge(0, 1));
        assert!(e);
        assert_eq!(w, 1);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn column_past_the_end_panics() {
        // (0, 2) would alias (1, 0) in the packed words.
        let g = AdjMatrix::from_01_rows(&[[0u8, 0], [1, 0]]).unwrap();
        g.get(0, 2);
    }

    #[test]
    fn with_diagonal_keeps_other_edges() {
        let g = AdjMatrix::from_01_rows(&[[0u8, 1, 1], [0, 1, 0], [1, 0, 0]]).unwrap();
        let h = g.with_diagonal(|v| v != 1);
        assert_eq!(format!("{h:?}"), "AdjMatrix(111/000/101)");
    }
}
