//! Reference graphs with known answers.
//!
//! `extra_7` gives vertex 4 a self-loop on top of edges to every other vertex.
//! Self-loops are ignored, so 4 is still the key vertex.

use crate::error::GraphResult;
use crate::graph::adj_matrix::AdjMatrix;
use crate::graph::key_vertex::{decide, Verdict};
use tracing::{info, warn};

#[derive(Clone, Copy, Debug)]
pub struct Case {
    pub name: &'static str,
    pub rows: &'static [&'static [u8]],
    pub expected: Option<usize>,
}

impl Case {
    pub fn graph(&self) -> GraphResult<AdjMatrix> {
        AdjMatrix::from_01_rows(self.rows)
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Outcome {
    pub case: &'static Case,
    pub verdict: Verdict,
}

impl Outcome {
    pub fn passed(&self) -> bool {
        self.verdict.key_vertex == self.case.expected
    }
}

// Row 4 reaches every other vertex; other rows are empty unless noted.
const STAR_4: &[u8] = &[1, 1, 1, 1, 0, 1, 1];
const ZERO_7: &[u8] = &[0; 7];

pub const REFERENCE: &[Case] = &[
    Case {
        name: "graph_1",
        rows: &[
            &[0, 1, 1, 0, 1],
            &[1, 0, 1, 0, 0],
            &[0, 1, 0, 0, 1],
            &[1, 1, 1, 0, 1],
            &[0, 1, 1, 0, 0],
        ],
        expected: Some(3),
    },
    Case {
        name: "graph_2",
        rows: &[&[0, 1, 1, 0], &[1, 0, 1, 1], &[0, 0, 0, 0], &[1, 0, 1, 0]],
        expected: None,
    },
    Case {
        name: "graph_a",
        rows: &[
            &[0, 1, 1, 1, 1, 1],
            &[0, 0, 1, 0, 0, 0],
            &[0, 1, 0, 1, 0, 0],
            &[0, 0, 0, 0, 1, 0],
            &[0, 0, 0, 0, 0, 0],
            &[0, 0, 0, 0, 1, 0],
        ],
        expected: Some(0),
    },
    Case {
        name: "extra_1",
        rows: &[
            &[0, 1, 1, 1, 1, 1, 0],
            &[1, 0, 1, 1, 1, 1, 0],
            &[1, 1, 0, 1, 1, 1, 0],
            &[1, 1, 1, 0, 1, 1, 0],
            &[1, 1, 1, 1, 0, 1, 0],
            &[1, 1, 1, 1, 1, 0, 0],
            &[1, 1, 1, 1, 1, 1, 0],
        ],
        expected: Some(6),
    },
    Case {
        name: "extra_2",
        rows: &[ZERO_7, ZERO_7, ZERO_7, ZERO_7, STAR_4, ZERO_7, ZERO_7],
        expected: Some(4),
    },
    Case {
        name: "extra_3",
        rows: &[
            ZERO_7,
            ZERO_7,
            ZERO_7,
            ZERO_7,
            &[1, 1, 0, 1, 0, 1, 1],
            ZERO_7,
            ZERO_7,
        ],
        expected: None,
    },
    Case {
        name: "extra_4",
        rows: &[
            ZERO_7,
            ZERO_7,
            ZERO_7,
            ZERO_7,
            &[1, 1, 1, 1, 0, 1, 0],
            ZERO_7,
            ZERO_7,
        ],
        expected: None,
    },
    Case {
        name: "extra_5",
        rows: &[
            ZERO_7,
            &[0, 0, 0, 0, 1, 0, 0],
            ZERO_7,
            ZERO_7,
            STAR_4,
            ZERO_7,
            ZERO_7,
        ],
        expected: None,
    },
    Case {
        name: "extra_6",
        rows: &[
            ZERO_7,
            ZERO_7,
            ZERO_7,
            ZERO_7,
            STAR_4,
            ZERO_7,
            &[0, 0, 0, 0, 1, 0, 0],
        ],
        expected: None,
    },
    Case {
        name: "extra_7",
        rows: &[
            ZERO_7,
            ZERO_7,
            ZERO_7,
            ZERO_7,
            &[1, 1, 1, 1, 1, 1, 1],
            ZERO_7,
            ZERO_7,
        ],
        expected: Some(4),
    },
    Case {
        name: "extra_8",
        rows: &[ZERO_7, ZERO_7, ZERO_7, ZERO_7, STAR_4, ZERO_7, ZERO_7],
        expected: Some(4),
    },
    Case {
        name: "single",
        rows: &[&[0]],
        expected: Some(0),
    },
    Case {
        name: "two_loops",
        rows: &[&[1, 0], &[0, 1]],
        expected: None,
    },
    Case {
        name: "two_one_edge",
        rows: &[&[0, 0], &[1, 0]],
        expected: Some(1),
    },
];

pub fn run_case(case: &'static Case) -> GraphResult<Outcome> {
    let g = case.graph()?;
    let outcome = Outcome {
        case,
        verdict: decide(&g, ()),
    };
    if outcome.passed() {
        info!(case = case.name, verdict = ?outcome.verdict, "reference case ok");
    } else {
        warn!(
            case = case.name,
            expected = ?case.expected,
            got = ?outcome.verdict.key_vertex,
            "reference case mismatch"
        );
    }
    Ok(outcome)
}

pub fn run_all() -> GraphResult<Vec<Outcome>> {
    REFERENCE.iter().map(run_case).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::key_vertex::naive;

    #[test]
    fn every_reference_case_passes() {
        for outcome in run_all().unwrap() {
            assert!(
                outcome.passed(),
                "{}: expected {:?}, got {:?}",
                outcome.case.name,
                outcome.case.expected,
                outcome.verdict
            );
        }
    }

    #[test]
    fn expectations_match_definition() {
        for case in REFERENCE {
            let g = case.graph().unwrap();
            let by_definition = naive::key_vertices(&g);
            let expected: Vec<_> = case.expected.into_iter().collect();
            assert_eq!(by_definition, expected, "{}", case.name);
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = REFERENCE.iter().map(|c| c.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), REFERENCE.len());
    }
}
