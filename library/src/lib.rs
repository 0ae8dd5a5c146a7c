//! Linear-time key vertex detection on dense directed graphs, plus the
//! readers, renderers and reference data around it.

pub mod battery;
pub mod display;
pub mod error;

pub mod debugging {
    pub mod work;
}

pub mod graph {
    pub mod adj_matrix;
    pub mod key_vertex;
}

pub mod io {
    pub mod matrix_reader;
}

pub mod simulation {
    pub mod airport;
}

pub use error::{GraphError, GraphResult};
pub use graph::adj_matrix::AdjMatrix;
pub use graph::key_vertex::{
    decide, find_key_vertex, is_key, try_is_key, Disqualified, Eliminator, TraceEntry, TraceSink,
    Verdict,
};
