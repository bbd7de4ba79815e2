//! Heuristic output verifier for LearnLab exercises.
//!
//! Knows nothing about HTTP, the curriculum or code execution. Callers run
//! the learner's program elsewhere and pass in the captured output.

pub mod compare;
pub mod error_kind;
pub mod graph;
pub mod verifier;

pub use compare::{compare, normalize, Comparison, NO_OUTPUT_SENTINEL};
pub use error_kind::ErrorKind;
pub use graph::GraphCheck;
pub use verifier::{
    verify, ExerciseCheck, VerificationResult, Verifier, PLACEHOLDER_EXPECTED_OUTPUT,
};
