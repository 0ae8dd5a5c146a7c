// Human-readable rendering of matrices, traces and verdicts.
use crate::graph::adj_matrix::AdjMatrix;
use crate::graph::key_vertex::{TraceEntry, Verdict};
use std::fmt;

/// One `[0, 1, 1]` line per row, then `size = n`.
pub struct MatrixView<'a>(pub &'a AdjMatrix);

impl fmt::Display for MatrixView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.0.rows() {
            write!(f, "[")?;
            for (j, x) in row.enumerate() {
                if j > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}", x as u8)?;
            }
            writeln!(f, "]")?;
        }
        write!(f, "size = {}", self.0.len())
    }
}

pub struct TraceView<'a>(pub &'a [TraceEntry]);

impl fmt::Display for TraceView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, entry) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{entry}")?;
        }
        Ok(())
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.key_vertex {
            Some(v) => write!(f, "vertex to check = {}. key vertex: {v}", self.candidate),
            None => write!(f, "vertex to check = {}. no key vertex", self.candidate),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::key_vertex::decide;

    #[test]
    fn renders_matrix_trace_and_verdict() {
        let g = AdjMatrix::from_01_rows(&[[0u8, 0, 1], [1, 0, 1], [0, 0, 0]]).unwrap();
        assert_eq!(
            MatrixView(&g).to_string(),
            "[0, 0, 1]\n[1, 0, 1]\n[0, 0, 0]\nsize = 3"
        );

        let mut log: Vec<TraceEntry> = vec![];
        let verdict = decide(&g, &mut log);
        assert_eq!(
            TraceView(&log).to_string(),
            "col 0 is bad. row 1 survived\ncol 1 survived. row 2 is bad"
        );
        assert_eq!(verdict.to_string(), "vertex to check = 1. key vertex: 1");
    }

    #[test]
    fn empty_trace_renders_nothing() {
        assert_eq!(TraceView(&[]).to_string(), "");
    }
}
