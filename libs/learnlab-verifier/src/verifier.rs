//! Output Verifier - Heuristic Grading Logic
//!
//! **Core Responsibility:**
//! Decide whether a learner's captured output is correct and explain why.
//!
//! **Critical Properties:**
//! - Never executes or parses the learner's code
//! - Pure function: (expected output, actual output, source text) → verdict
//! - Total: every input produces a well-formed result
//!
//! **Decision Order (first branch that fires wins):**
//! 1. Error signature in the actual output
//! 2. Source shorter than the minimum effort threshold
//! 3. Exercise checks (e.g. graph exercises) that have an opinion
//! 4. No expected output configured → any output passes
//! 5. Fuzzy comparison of expected and actual output

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::compare::{compare, normalize};
use crate::error_kind::ErrorKind;
use crate::graph::GraphCheck;

/// Expected output value meaning "no specific output required"
pub const PLACEHOLDER_EXPECTED_OUTPUT: &str = "Run your code to see the output!";

/// Trimmed source shorter than this (in characters) counts as no attempt
pub const MIN_CODE_CHARS: usize = 10;

/// Score at or above which a non-matching output is still accepted
pub const CLOSE_ENOUGH_PERCENT: f64 = 70.0;

/// Score at or above which the output is reported as partially correct
pub const PARTIAL_PERCENT: f64 = 40.0;

/// Verdict returned to the learner
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub correct: bool,
    pub feedback: String,
    pub suggestions: Vec<String>,
}

impl VerificationResult {
    pub fn correct(feedback: impl Into<String>) -> Self {
        Self {
            correct: true,
            feedback: feedback.into(),
            suggestions: Vec::new(),
        }
    }

    pub fn incorrect(feedback: impl Into<String>, suggestions: &[&str]) -> Self {
        Self {
            correct: false,
            feedback: feedback.into(),
            suggestions: suggestions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Exercise-specific check run before output comparison
///
/// A check that returns `Some` decides the verdict. `None` means the check
/// has no opinion and evaluation continues.
pub trait ExerciseCheck: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether this exercise type is signalled by the expected output
    fn applies_to(&self, expected_output: &str) -> bool;

    fn check(&self, user_code: &str) -> Option<VerificationResult>;
}

/// Configurable verifier
///
/// `Verifier::default()` carries the graph check. `Verifier::plain()` grades
/// on output alone.
pub struct Verifier {
    checks: Vec<Box<dyn ExerciseCheck>>,
}

impl Default for Verifier {
    fn default() -> Self {
        Self::plain().with_check(GraphCheck::new())
    }
}

impl Verifier {
    /// Verifier without any exercise checks
    pub fn plain() -> Self {
        Self { checks: Vec::new() }
    }

    pub fn with_check(mut self, check: impl ExerciseCheck + 'static) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Names of the configured exercise checks, in evaluation order
    pub fn check_names(&self) -> Vec<&'static str> {
        self.checks.iter().map(|c| c.name()).collect()
    }

    /// Grade a learner's output
    pub fn verify(
        &self,
        expected_output: &str,
        actual_output: &str,
        user_code: &str,
    ) -> VerificationResult {
        if let Some(kind) = ErrorKind::detect(actual_output) {
            debug!(error_type = %kind, "Error signature in output");
            return VerificationResult::incorrect(
                format!("Your code has an error: {}", kind),
                kind.suggestions(),
            );
        }

        if user_code.trim().chars().count() < MIN_CODE_CHARS {
            debug!("Source below minimum effort threshold");
            return VerificationResult::incorrect(
                "It looks like you haven't written any code yet!",
                &[
                    "Read the instructions carefully",
                    "Write your code in the editor, then run it",
                ],
            );
        }

        for check in &self.checks {
            if !check.applies_to(expected_output) {
                continue;
            }
            if let Some(result) = check.check(user_code) {
                debug!(check = check.name(), correct = result.correct, "Exercise check decided");
                return result;
            }
        }

        let expected_trimmed = expected_output.trim();
        if expected_trimmed.is_empty() || expected_trimmed == PLACEHOLDER_EXPECTED_OUTPUT {
            debug!("No expected output configured");
            return if normalize(actual_output).is_empty() {
                VerificationResult::incorrect(
                    "Your code didn't produce any output.",
                    &["Use print() to display your results"],
                )
            } else {
                VerificationResult::correct("Great! Your code ran successfully! 🎉")
            };
        }

        let comparison = compare(expected_output, actual_output);
        debug!(
            is_match = comparison.is_match,
            match_percent = comparison.match_percent,
            "Output compared"
        );

        // `is_match` and the percentage are consumed separately: the
        // close-enough band sits below the comparison's own match threshold.
        if comparison.is_match {
            VerificationResult::correct("Perfect! Your output matches the expected result! 🎉")
        } else if comparison.match_percent >= CLOSE_ENOUGH_PERCENT {
            VerificationResult::correct("Great job! Your output is close enough! 🎉")
        } else if comparison.match_percent >= PARTIAL_PERCENT {
            VerificationResult::incorrect(
                "Almost there! Your output is partially correct.",
                &[
                    "Check the formatting of your output, including spaces and punctuation",
                    "Compare your output with the expected output line by line",
                ],
            )
        } else {
            VerificationResult::incorrect(
                "Your output doesn't match the expected result.",
                &[
                    "Re-read the instructions and the expected output",
                    "Check your logic and calculations",
                ],
            )
        }
    }
}

/// Grade with the default configuration (graph checks enabled)
pub fn verify(expected_output: &str, actual_output: &str, user_code: &str) -> VerificationResult {
    Verifier::default().verify(expected_output, actual_output, user_code)
}
