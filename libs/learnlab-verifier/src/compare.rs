//! Fuzzy Output Comparison
//!
//! Scores how closely a learner's output resembles the expected output.
//!
//! **Normalization (applied to both sides):**
//! - Remove the "no output" sentinel printed by the runner
//! - Collapse whitespace runs to a single space, trim both ends
//! - Lowercase
//!
//! **Scoring, first rule that applies:**
//! 1. Equal after normalization → match, 100%
//! 2. Expected is contained in actual → match, 95%
//! 3. Token overlap: share of distinct expected tokens present in actual
//! 4. Numeric overlay: every expected number appears in actual → at least 80%
//!
//! Rules 3 and 4 only report a match at 90% or more. Callers are free to
//! re-threshold on the percentage.

use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashSet;

/// Printed by the runner when a program exits cleanly without writing anything
pub const NO_OUTPUT_SENTINEL: &str = "Code executed successfully (no output)";

/// Percentage reported when expected output is a substring of actual output
pub const CONTAINED_PERCENT: f64 = 95.0;

/// Floor applied when all expected numbers appear in the actual output
pub const NUMERIC_FLOOR_PERCENT: f64 = 80.0;

/// Token overlap needed for rules 3 and 4 to report a match
pub const TOKEN_MATCH_PERCENT: f64 = 90.0;

lazy_static! {
    static ref NUMBER: Regex = Regex::new(r"\d+(?:\.\d+)?").unwrap();
}

/// Outcome of comparing two outputs
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Comparison {
    pub is_match: bool,
    pub match_percent: f64,
}

impl Comparison {
    fn new(is_match: bool, match_percent: f64) -> Self {
        Self {
            is_match,
            match_percent,
        }
    }
}

/// Normalize output text for comparison
///
/// Idempotent: the result is lowercase, so the sentinel can never
/// reappear on a second pass.
pub fn normalize(output: &str) -> String {
    output
        .replace(NO_OUTPUT_SENTINEL, "")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Compare expected and actual output
pub fn compare(expected: &str, actual: &str) -> Comparison {
    let expected = normalize(expected);
    let actual = normalize(actual);

    if expected == actual {
        return Comparison::new(true, 100.0);
    }

    // Extra output around the required text is accepted
    if actual.contains(&expected) {
        return Comparison::new(true, CONTAINED_PERCENT);
    }

    let expected_tokens: HashSet<&str> = expected.split_whitespace().collect();
    if expected_tokens.is_empty() {
        return Comparison::new(false, 0.0);
    }
    let actual_tokens: HashSet<&str> = actual.split_whitespace().collect();

    let common = expected_tokens.intersection(&actual_tokens).count();
    let token_percent = 100.0 * common as f64 / expected_tokens.len() as f64;
    let match_percent = apply_numeric_overlay(&expected, &actual, token_percent);

    Comparison::new(match_percent >= TOKEN_MATCH_PERCENT, match_percent)
}

/// Raise the score to the numeric floor when every expected number shows up.
/// Never lowers `percent`.
fn apply_numeric_overlay(expected: &str, actual: &str, percent: f64) -> f64 {
    let expected_numbers = extract_numbers(expected);
    if expected_numbers.is_empty() {
        return percent;
    }

    if expected_numbers.is_subset(&extract_numbers(actual)) {
        percent.max(NUMERIC_FLOOR_PERCENT)
    } else {
        percent
    }
}

fn extract_numbers(text: &str) -> HashSet<&str> {
    NUMBER.find_iter(text).map(|m| m.as_str()).collect()
}
