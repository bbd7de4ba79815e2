//! Graph exercise check
//!
//! Plotting exercises can't be graded on textual output, so they are judged
//! on the shape of the learner's source: a matplotlib import, a plotting
//! call that receives data, and a call that shows the figure.
//!
//! The inspection is lexical. Calls inside comments or string literals
//! count the same as real ones.

use lazy_static::lazy_static;
use regex::Regex;

use crate::verifier::{ExerciseCheck, VerificationResult};

/// Substrings of the expected output that mark a graph exercise (lowercase)
const GRAPH_INDICATORS: [&str; 7] = [
    "[graph",
    "graph",
    "plot",
    "chart",
    "histogram",
    "scatter",
    "visualization",
];

const LIBRARY: &str = "matplotlib";

lazy_static! {
    /// Plotting call on pyplot or an axes handle with at least one argument
    static ref PLOT_WITH_DATA: Regex = Regex::new(
        r"\b(?:plt|ax\d*|axes\[\d+\]|axes\[\d+,\s*\d+\])\.(?:plot|bar|scatter|hist|pie|barh|subplot)\s*\(\s*[^\s)]"
    )
    .unwrap();
    static ref SUBPLOTS_CALL: Regex = Regex::new(r"\bsubplots\s*\(").unwrap();
}

/// Structural check for matplotlib exercises
#[derive(Debug, Clone, Copy, Default)]
pub struct GraphCheck;

impl GraphCheck {
    pub fn new() -> Self {
        Self
    }

    fn has_import(user_code: &str) -> bool {
        let lowered = user_code.to_lowercase();
        lowered.contains(&format!("import {}", LIBRARY))
            || lowered.contains(&format!("from {}", LIBRARY))
    }

    fn has_plot_with_data(user_code: &str) -> bool {
        PLOT_WITH_DATA.is_match(user_code)
    }

    fn has_subplots(user_code: &str) -> bool {
        SUBPLOTS_CALL.is_match(user_code)
    }

    fn has_show(user_code: &str) -> bool {
        user_code.contains("show()")
    }
}

impl ExerciseCheck for GraphCheck {
    fn name(&self) -> &'static str {
        "graph"
    }

    fn applies_to(&self, expected_output: &str) -> bool {
        let lowered = expected_output.to_lowercase();
        GRAPH_INDICATORS
            .iter()
            .any(|indicator| lowered.contains(indicator))
    }

    fn check(&self, user_code: &str) -> Option<VerificationResult> {
        if !Self::has_import(user_code) {
            return Some(VerificationResult::incorrect(
                format!("You need to import {} to create graphs.", LIBRARY),
                &["Add this line at the top: import matplotlib.pyplot as plt"],
            ));
        }

        if !Self::has_plot_with_data(user_code) {
            if Self::has_subplots(user_code) {
                return Some(VerificationResult::incorrect(
                    "You created subplots, but didn't plot any data on them!",
                    &[
                        "Use the axes returned by plt.subplots() to plot, e.g. ax.plot(x, y)",
                        "With several subplots, plot on each one, e.g. axes[0].bar(labels, values)",
                    ],
                ));
            }

            return Some(VerificationResult::incorrect(
                "You need to create a plot with actual data.",
                &[
                    "Call a plotting function such as plt.plot(x, y) or plt.bar(labels, values)",
                    "Make sure you pass your data to the plotting function",
                ],
            ));
        }

        if !Self::has_show(user_code) {
            return Some(VerificationResult::incorrect(
                "Don't forget to display your graph!",
                &["Add plt.show() at the end of your code"],
            ));
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPLETE: &str = "import matplotlib.pyplot as plt\nplt.bar(['a', 'b'], [1, 2])\nplt.show()";

    #[test]
    fn test_applies_to_indicators() {
        let check = GraphCheck::new();
        assert!(check.applies_to("[Graph: bar chart]"));
        assert!(check.applies_to("A SCATTER of points"));
        assert!(check.applies_to("Histogram of ages"));
        assert!(check.applies_to("data visualization"));
        assert!(check.applies_to("line plot"));
        assert!(!check.applies_to("Hello, World!"));
        assert!(!check.applies_to(""));
    }

    #[test]
    fn test_missing_import() {
        let result = GraphCheck::new().check("x=[1,2,3]\nprint(x)").unwrap();
        assert!(!result.correct);
        assert_eq!(result.feedback, "You need to import matplotlib to create graphs.");
        assert_eq!(result.suggestions.len(), 1);
    }

    #[test]
    fn test_import_is_case_insensitive() {
        let code = "IMPORT MATPLOTLIB.pyplot as plt\nplt.plot([1, 2])\nplt.show()";
        assert!(GraphCheck::new().check(code).is_none());
    }

    #[test]
    fn test_from_import_accepted() {
        let code = "from matplotlib import pyplot as plt\nplt.plot([1, 2])\nplt.show()";
        assert!(GraphCheck::new().check(code).is_none());
    }

    #[test]
    fn test_complete_program_has_no_opinion() {
        assert!(GraphCheck::new().check(COMPLETE).is_none());
    }

    #[test]
    fn test_empty_plot_call_does_not_count() {
        let code = "import matplotlib.pyplot as plt\nplt.plot()\nplt.show()";
        let result = GraphCheck::new().check(code).unwrap();
        assert_eq!(result.feedback, "You need to create a plot with actual data.");
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn test_whitespace_only_plot_call_does_not_count() {
        let code = "import matplotlib.pyplot as plt\nplt.plot( )\nplt.show()";
        let result = GraphCheck::new().check(code).unwrap();
        assert_eq!(result.feedback, "You need to create a plot with actual data.");
    }

    #[test]
    fn test_axes_receivers() {
        let receivers = ["ax", "ax1", "ax12", "axes[0]", "axes[1, 0]", "axes[1,1]"];
        for receiver in receivers {
            let code = format!(
                "import matplotlib.pyplot as plt\nfig, axes = plt.subplots(2, 2)\n{}.scatter(x, y)\nplt.show()",
                receiver
            );
            assert!(
                GraphCheck::new().check(&code).is_none(),
                "receiver {} not recognized",
                receiver
            );
        }
    }

    #[test]
    fn test_unknown_receiver_does_not_count() {
        let code = "import matplotlib.pyplot as plt\nfigure.plot(x, y)\nplt.show()";
        let result = GraphCheck::new().check(code).unwrap();
        assert_eq!(result.feedback, "You need to create a plot with actual data.");
    }

    #[test]
    fn test_subplots_without_data() {
        let code = "import matplotlib.pyplot as plt\nfig, ax = plt.subplots()\nax.plot()\nplt.show()";
        let result = GraphCheck::new().check(code).unwrap();
        assert_eq!(
            result.feedback,
            "You created subplots, but didn't plot any data on them!"
        );
        assert_eq!(result.suggestions.len(), 2);
    }

    #[test]
    fn test_subplots_call_is_not_a_plot_call() {
        // `subplots(` must not satisfy the `subplot(` plotting call
        let code = "import matplotlib.pyplot as plt\nfig, ax = plt.subplots(1, 2)\nplt.show()";
        let result = GraphCheck::new().check(code).unwrap();
        assert!(result.feedback.starts_with("You created subplots"));
    }

    #[test]
    fn test_missing_show() {
        let code = "import matplotlib.pyplot as plt\nplt.hist(ages)";
        let result = GraphCheck::new().check(code).unwrap();
        assert_eq!(result.feedback, "Don't forget to display your graph!");
        assert_eq!(result.suggestions, vec!["Add plt.show() at the end of your code"]);
    }

    #[test]
    fn test_bare_show_accepted() {
        let code = "from matplotlib.pyplot import *\nimport matplotlib.pyplot as plt\nplt.pie(sizes)\nshow()";
        assert!(GraphCheck::new().check(code).is_none());
    }

    #[test]
    fn test_commented_call_still_counts() {
        let code = "import matplotlib.pyplot as plt\n# plt.plot(x, y)\n# plt.show()";
        assert!(GraphCheck::new().check(code).is_none());
    }
}
