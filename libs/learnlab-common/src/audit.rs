// Curriculum audit
// Finds content problems that would confuse learners or the verifier

use learnlab_verifier::{Verifier, PLACEHOLDER_EXPECTED_OUTPUT};
use serde::Serialize;
use std::collections::HashSet;
use std::fmt;

use crate::types::CurriculumFile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Finding {
    DuplicateChapterId { chapter_id: String },
    DuplicateLessonId { lesson_id: String },
    EmptyChapter { chapter_id: String },
    MissingSolution { lesson_id: String },
    /// Fixable with `fill_blank_expected_outputs`
    BlankExpectedOutput { lesson_id: String },
    /// The reference solution, printing exactly the expected output, is rejected
    SolutionRejected { lesson_id: String, feedback: String },
}

impl Finding {
    pub fn severity(&self) -> Severity {
        match self {
            Finding::DuplicateChapterId { .. }
            | Finding::DuplicateLessonId { .. }
            | Finding::SolutionRejected { .. } => Severity::Error,
            Finding::EmptyChapter { .. }
            | Finding::MissingSolution { .. }
            | Finding::BlankExpectedOutput { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Finding::DuplicateChapterId { chapter_id } => {
                write!(f, "chapter '{}' is defined more than once", chapter_id)
            }
            Finding::DuplicateLessonId { lesson_id } => {
                write!(f, "lesson '{}' is defined more than once", lesson_id)
            }
            Finding::EmptyChapter { chapter_id } => {
                write!(f, "chapter '{}' has no lessons", chapter_id)
            }
            Finding::MissingSolution { lesson_id } => {
                write!(f, "lesson '{}' has no solution code", lesson_id)
            }
            Finding::BlankExpectedOutput { lesson_id } => {
                write!(f, "lesson '{}' has a blank expected output", lesson_id)
            }
            Finding::SolutionRejected { lesson_id, feedback } => write!(
                f,
                "lesson '{}': reference solution rejected ({})",
                lesson_id, feedback
            ),
        }
    }
}

/// Check every chapter and lesson. Findings come out in file order.
pub fn audit(file: &CurriculumFile, verifier: &Verifier) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut chapter_ids = HashSet::new();
    let mut lesson_ids = HashSet::new();

    for chapter in &file.chapters {
        if !chapter_ids.insert(chapter.id.as_str()) {
            findings.push(Finding::DuplicateChapterId {
                chapter_id: chapter.id.clone(),
            });
        }
        if chapter.lessons.is_empty() {
            findings.push(Finding::EmptyChapter {
                chapter_id: chapter.id.clone(),
            });
        }

        for lesson in &chapter.lessons {
            if !lesson_ids.insert(lesson.id.as_str()) {
                findings.push(Finding::DuplicateLessonId {
                    lesson_id: lesson.id.clone(),
                });
            }

            let has_solution = !lesson.solution_code.trim().is_empty();
            let expected = lesson.expected_output.trim();

            if !has_solution {
                findings.push(Finding::MissingSolution {
                    lesson_id: lesson.id.clone(),
                });
            }
            if expected.is_empty() {
                findings.push(Finding::BlankExpectedOutput {
                    lesson_id: lesson.id.clone(),
                });
            }

            if has_solution && !expected.is_empty() && expected != PLACEHOLDER_EXPECTED_OUTPUT {
                let result = verifier.verify(
                    &lesson.expected_output,
                    &lesson.expected_output,
                    &lesson.solution_code,
                );
                if !result.correct {
                    findings.push(Finding::SolutionRejected {
                        lesson_id: lesson.id.clone(),
                        feedback: result.feedback,
                    });
                }
            }
        }
    }

    findings
}

/// Replace blank expected outputs with the placeholder. Returns how many changed.
pub fn fill_blank_expected_outputs(file: &mut CurriculumFile) -> usize {
    let mut changed = 0;
    for lesson in file.chapters.iter_mut().flat_map(|c| c.lessons.iter_mut()) {
        if lesson.expected_output.trim().is_empty() {
            lesson.expected_output = PLACEHOLDER_EXPECTED_OUTPUT.to_string();
            changed += 1;
        }
    }
    changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chapter, Language, Lesson};

    fn lesson(id: &str, solution: &str, expected: &str) -> Lesson {
        Lesson {
            id: id.to_string(),
            title: id.to_string(),
            content: String::new(),
            starter_code: String::new(),
            solution_code: solution.to_string(),
            expected_output: expected.to_string(),
            hints: vec![],
        }
    }

    fn file(lessons: Vec<Lesson>) -> CurriculumFile {
        CurriculumFile {
            chapters: vec![Chapter {
                id: "py".to_string(),
                language: Language::Python,
                title: "Python".to_string(),
                description: String::new(),
                order: 1,
                lessons,
            }],
        }
    }

    #[test]
    fn test_clean_curriculum() {
        let file = file(vec![
            lesson("hello", "print('Hello, World!')", "Hello, World!"),
            lesson("free", "x = 1\nprint(x)", PLACEHOLDER_EXPECTED_OUTPUT),
        ]);
        assert!(audit(&file, &Verifier::default()).is_empty());
    }

    #[test]
    fn test_reports_missing_and_blank() {
        let file = file(vec![lesson("todo", "", "  ")]);
        let findings = audit(&file, &Verifier::default());
        assert_eq!(
            findings,
            vec![
                Finding::MissingSolution {
                    lesson_id: "todo".to_string()
                },
                Finding::BlankExpectedOutput {
                    lesson_id: "todo".to_string()
                },
            ]
        );
        assert!(findings.iter().all(|f| f.severity() == Severity::Warning));
    }

    #[test]
    fn test_reports_rejected_graph_solution() {
        // Solution never calls show()
        let file = file(vec![lesson(
            "bars",
            "import matplotlib.pyplot as plt\nplt.bar(['a'], [1])",
            "[Graph: bar chart]",
        )]);
        let findings = audit(&file, &Verifier::default());
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].severity(), Severity::Error);
        assert!(findings[0].to_string().contains("Don't forget to display your graph!"));

        assert!(audit(&file, &Verifier::plain()).is_empty());
    }

    #[test]
    fn test_reports_duplicates_and_empty_chapters() {
        let mut file = file(vec![
            lesson("a", "print('one two')", "one two"),
            lesson("a", "print('one two')", "one two"),
        ]);
        file.chapters.push(Chapter {
            id: "py".to_string(),
            language: Language::Python,
            title: "Again".to_string(),
            description: String::new(),
            order: 2,
            lessons: vec![],
        });

        let findings = audit(&file, &Verifier::default());
        assert!(findings.contains(&Finding::DuplicateLessonId {
            lesson_id: "a".to_string()
        }));
        assert!(findings.contains(&Finding::DuplicateChapterId {
            chapter_id: "py".to_string()
        }));
        assert!(findings.contains(&Finding::EmptyChapter {
            chapter_id: "py".to_string()
        }));
    }

    #[test]
    fn test_fill_blank_expected_outputs() {
        let mut file = file(vec![
            lesson("blank", "x = 1", ""),
            lesson("kept", "print(5)", "5"),
        ]);
        assert_eq!(fill_blank_expected_outputs(&mut file), 1);
        assert_eq!(
            file.chapters[0].lessons[0].expected_output,
            PLACEHOLDER_EXPECTED_OUTPUT
        );
        assert_eq!(file.chapters[0].lessons[1].expected_output, "5");
        assert_eq!(fill_blank_expected_outputs(&mut file), 0);
    }

    #[test]
    fn test_shipped_curriculum_is_clean() {
        // Assumes the workspace config/ directory is present
        let file = CurriculumFile::load("../../config/curriculum.json").unwrap();
        let findings = audit(&file, &Verifier::default());
        assert!(findings.is_empty(), "unexpected findings: {:?}", findings);
        assert!(crate::Catalog::new(file).is_ok());
    }

    #[test]
    fn test_finding_serializes_with_kind_tag() {
        let finding = Finding::MissingSolution {
            lesson_id: "x".to_string(),
        };
        let json = serde_json::to_value(&finding).unwrap();
        assert_eq!(json["kind"], "missing_solution");
        assert_eq!(json["lesson_id"], "x");
    }
}
