// CLI commands for managing LearnLab curriculum files
use anyhow::{bail, Context, Result};
use learnlab_common::audit::{self, Severity};
use learnlab_common::types::{Chapter, CurriculumFile, Language, Lesson};
use learnlab_verifier::{Verifier, PLACEHOLDER_EXPECTED_OUTPUT};
use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Optional files and values used to build a lesson
#[derive(Debug, Default, Clone, Copy)]
pub struct LessonSources<'a> {
    pub content_file: Option<&'a Path>,
    pub starter_file: Option<&'a Path>,
    pub solution_file: Option<&'a Path>,
    pub expected: Option<&'a str>,
}

/// Load curriculum configuration
fn load_curriculum(config_path: &Path) -> Result<CurriculumFile> {
    if !config_path.exists() {
        bail!(
            "Curriculum file not found: {} (create one with: learnlab-cli init)",
            config_path.display()
        );
    }
    CurriculumFile::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))
}

/// Save curriculum configuration
fn save_curriculum(config_path: &Path, curriculum: &CurriculumFile) -> Result<()> {
    curriculum
        .save(config_path)
        .with_context(|| format!("Failed to save {}", config_path.display()))
}

fn read_optional(path: Option<&Path>) -> Result<String> {
    match path {
        Some(p) => fs::read_to_string(p).with_context(|| format!("Failed to read {}", p.display())),
        None => Ok(String::new()),
    }
}

fn starter_curriculum() -> CurriculumFile {
    CurriculumFile {
        chapters: vec![Chapter {
            id: "python-basics".to_string(),
            language: Language::Python,
            title: "Python Basics".to_string(),
            description: "Your first Python programs".to_string(),
            order: 1,
            lessons: vec![Lesson {
                id: "hello-world".to_string(),
                title: "Hello, World!".to_string(),
                content: "# Hello, World!\n\nUse `print()` to write text to the screen.".to_string(),
                starter_code: "# Print a greeting\n".to_string(),
                solution_code: "print(\"Hello, World!\")".to_string(),
                expected_output: "Hello, World!".to_string(),
                hints: vec!["Text goes inside quotation marks".to_string()],
            }],
        }],
    }
}

/// Create a new curriculum file
pub fn init_curriculum(config_path: &Path) -> Result<()> {
    println!("🚀 Initializing curriculum at {}", config_path.display());

    if config_path.exists() {
        bail!("Curriculum file already exists: {}", config_path.display());
    }

    save_curriculum(config_path, &starter_curriculum())?;

    println!("✅ Curriculum created with a starter Python chapter");
    println!("\n📋 Next steps:");
    println!("  1. Add a chapter: learnlab-cli add-chapter --id <id> --language <lang> --title <title>");
    println!("  2. Add lessons:   learnlab-cli add-lesson --chapter <id> --id <lesson> --title <title>");
    println!("  3. Check content: learnlab-cli audit");

    Ok(())
}

/// Add a new chapter
pub fn add_chapter(
    config_path: &Path,
    id: &str,
    language: &str,
    title: &str,
    description: &str,
    order: Option<u32>,
) -> Result<()> {
    println!("🚀 Adding chapter: {}", id);

    if id.trim().is_empty() || title.trim().is_empty() {
        bail!("Chapter id and title cannot be empty");
    }
    let language: Language = language.parse()?;

    let mut curriculum = load_curriculum(config_path)?;

    // Default: after the last chapter
    let order = order.unwrap_or_else(|| {
        curriculum
            .chapters
            .iter()
            .map(|c| c.order)
            .max()
            .map_or(1, |max| max + 1)
    });

    curriculum.add_chapter(Chapter {
        id: id.to_string(),
        language,
        title: title.to_string(),
        description: description.to_string(),
        order,
        lessons: Vec::new(),
    })?;

    println!("📝 Updating {}...", config_path.display());
    save_curriculum(config_path, &curriculum)?;

    println!("✅ Chapter '{}' ({}) added at position {}", id, language, order);
    Ok(())
}

/// Add a new lesson to a chapter
pub fn add_lesson(
    config_path: &Path,
    chapter_id: &str,
    id: &str,
    title: &str,
    sources: LessonSources<'_>,
) -> Result<()> {
    println!("🚀 Adding lesson: {}", id);

    if id.trim().is_empty() || title.trim().is_empty() {
        bail!("Lesson id and title cannot be empty");
    }

    let mut curriculum = load_curriculum(config_path)?;

    let expected_output = match sources.expected {
        Some(e) if !e.trim().is_empty() => e.to_string(),
        _ => PLACEHOLDER_EXPECTED_OUTPUT.to_string(),
    };

    let lesson = Lesson {
        id: id.to_string(),
        title: title.to_string(),
        content: read_optional(sources.content_file)?,
        starter_code: read_optional(sources.starter_file)?,
        solution_code: read_optional(sources.solution_file)?,
        expected_output,
        hints: Vec::new(),
    };

    curriculum.add_lesson(chapter_id, lesson)?;

    println!("📝 Updating {}...", config_path.display());
    save_curriculum(config_path, &curriculum)?;

    println!("✅ Lesson '{}' added to chapter '{}'", id, chapter_id);
    if sources.solution_file.is_none() {
        println!("\n⚠️  No solution provided - `learnlab-cli audit` will flag this lesson");
    }

    Ok(())
}

/// Remove a lesson
pub fn remove_lesson(config_path: &Path, id: &str, yes: bool) -> Result<()> {
    println!("🗑️  Removing lesson: {}", id);

    let mut curriculum = load_curriculum(config_path)?;

    let (chapter_index, lesson_index) = curriculum
        .chapters
        .iter()
        .enumerate()
        .find_map(|(ci, c)| c.lessons.iter().position(|l| l.id == id).map(|li| (ci, li)))
        .ok_or_else(|| anyhow::anyhow!("Lesson '{}' not found in curriculum", id))?;

    if !yes {
        print!(
            "⚠️  This will remove lesson '{}' from chapter '{}'.\nContinue? (y/N): ",
            id, curriculum.chapters[chapter_index].id
        );
        io::stdout().flush()?;

        let mut input = String::new();
        io::stdin().read_line(&mut input)?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("❌ Aborted");
            return Ok(());
        }
    }

    curriculum.chapters[chapter_index].lessons.remove(lesson_index);
    println!("📝 Updating {}...", config_path.display());
    save_curriculum(config_path, &curriculum)?;

    println!("✅ Lesson '{}' removed", id);
    Ok(())
}

/// List chapters and their lessons
pub fn list_curriculum(config_path: &Path, language: Option<&str>) -> Result<()> {
    let curriculum = load_curriculum(config_path)?;
    let filter = language.map(str::parse::<Language>).transpose()?;

    let mut chapters: Vec<&Chapter> = curriculum
        .chapters
        .iter()
        .filter(|c| filter.map_or(true, |lang| c.language == lang))
        .collect();
    chapters.sort_by_key(|c| c.order);

    if chapters.is_empty() {
        println!("No chapters found.");
        println!("\n💡 Add a chapter with: learnlab-cli add-chapter --id <id> --language <lang> --title <title>");
        return Ok(());
    }

    println!("📋 Curriculum:\n");
    println!("{:<6} {:<24} {:<8} {:<36} {:<8}", "Order", "Chapter", "Lang", "Title", "Lessons");
    println!("{}", "─".repeat(86));

    let mut total_lessons = 0;
    for chapter in &chapters {
        println!(
            "{:<6} {:<24} {:<8} {:<36} {:<8}",
            chapter.order,
            chapter.id,
            chapter.language,
            chapter.title,
            chapter.lessons.len()
        );
        for lesson in &chapter.lessons {
            println!("{:<6} └─ {:<21} {}", "", lesson.id, lesson.title);
        }
        total_lessons += chapter.lessons.len();
    }

    println!(
        "\n✅ Total: {} chapter(s), {} lesson(s)",
        chapters.len(),
        total_lessons
    );
    Ok(())
}

/// Audit the curriculum. Returns false when any error-level finding remains.
pub fn audit_curriculum(config_path: &Path, fix: bool) -> Result<bool> {
    println!("🔍 Auditing {}...", config_path.display());

    let mut curriculum = load_curriculum(config_path)?;

    if fix {
        let changed = audit::fill_blank_expected_outputs(&mut curriculum);
        if changed > 0 {
            println!("📝 Filled {} blank expected output(s) with the placeholder", changed);
            save_curriculum(config_path, &curriculum)?;
        }
    }

    let findings = audit::audit(&curriculum, &Verifier::default());
    let errors = findings
        .iter()
        .filter(|f| f.severity() == Severity::Error)
        .count();

    for finding in &findings {
        match finding.severity() {
            Severity::Error => println!("  ❌ {}", finding),
            Severity::Warning => println!("  ⚠️  {}", finding),
        }
    }

    if findings.is_empty() {
        println!("✅ No problems found");
    } else {
        println!(
            "\n{} error(s), {} warning(s)",
            errors,
            findings.len() - errors
        );
    }

    Ok(errors == 0)
}

/// Verify captured output read from files. Returns the verdict.
pub fn verify_files(
    expected_file: &Path,
    actual_file: &Path,
    code_file: &Path,
    graph_checks: bool,
) -> Result<bool> {
    let expected = fs::read_to_string(expected_file)
        .with_context(|| format!("Failed to read {}", expected_file.display()))?;
    let actual = fs::read_to_string(actual_file)
        .with_context(|| format!("Failed to read {}", actual_file.display()))?;
    let code = fs::read_to_string(code_file)
        .with_context(|| format!("Failed to read {}", code_file.display()))?;

    let verifier = if graph_checks {
        Verifier::default()
    } else {
        Verifier::plain()
    };

    let result = verifier.verify(&expected, &actual, &code);
    let json = serde_json::to_string_pretty(&result).context("Failed to serialize result")?;
    println!("{}", json);

    Ok(result.correct)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config").join("curriculum.json");
        init_curriculum(&path).unwrap();
        (dir, path)
    }

    #[test]
    fn test_init_creates_starter_chapter() {
        let (_dir, path) = setup();
        let curriculum = CurriculumFile::load(&path).unwrap();
        assert_eq!(curriculum.chapters.len(), 1);
        assert_eq!(curriculum.chapters[0].lessons[0].id, "hello-world");

        assert!(init_curriculum(&path).is_err());
    }

    #[test]
    fn test_starter_curriculum_passes_audit() {
        let (_dir, path) = setup();
        assert!(audit_curriculum(&path, false).unwrap());
    }

    #[test]
    fn test_add_chapter_appends_in_order() {
        let (_dir, path) = setup();
        add_chapter(&path, "sql-intro", "sql", "SQL Intro", "", None).unwrap();

        let curriculum = CurriculumFile::load(&path).unwrap();
        let chapter = &curriculum.chapters[1];
        assert_eq!(chapter.language, Language::Sql);
        assert_eq!(chapter.order, 2);

        assert!(add_chapter(&path, "sql-intro", "sql", "Again", "", None).is_err());
        assert!(add_chapter(&path, "cobol", "cobol", "Nope", "", None).is_err());
    }

    #[test]
    fn test_add_lesson_reads_files() {
        let (dir, path) = setup();
        let solution = dir.path().join("solution.py");
        fs::write(&solution, "total = 10 + 5\nprint('Total:', total)").unwrap();

        add_lesson(
            &path,
            "python-basics",
            "addition",
            "Addition",
            LessonSources {
                solution_file: Some(&solution),
                expected: Some("Total: 15"),
                ..Default::default()
            },
        )
        .unwrap();

        let curriculum = CurriculumFile::load(&path).unwrap();
        let lesson = &curriculum.chapters[0].lessons[1];
        assert_eq!(lesson.expected_output, "Total: 15");
        assert!(lesson.solution_code.contains("10 + 5"));
        assert!(lesson.content.is_empty());
    }

    #[test]
    fn test_add_lesson_defaults_to_placeholder() {
        let (_dir, path) = setup();
        add_lesson(&path, "python-basics", "free", "Free play", LessonSources::default()).unwrap();

        let curriculum = CurriculumFile::load(&path).unwrap();
        assert_eq!(
            curriculum.chapters[0].lessons[1].expected_output,
            PLACEHOLDER_EXPECTED_OUTPUT
        );
    }

    #[test]
    fn test_add_lesson_rejects_unknown_chapter_and_duplicates() {
        let (_dir, path) = setup();
        assert!(add_lesson(&path, "missing", "x", "X", LessonSources::default()).is_err());
        assert!(add_lesson(&path, "python-basics", "hello-world", "Dup", LessonSources::default()).is_err());
    }

    #[test]
    fn test_remove_lesson() {
        let (_dir, path) = setup();
        remove_lesson(&path, "hello-world", true).unwrap();
        let curriculum = CurriculumFile::load(&path).unwrap();
        assert!(curriculum.chapters[0].lessons.is_empty());

        assert!(remove_lesson(&path, "hello-world", true).is_err());
    }

    #[test]
    fn test_list_with_filter() {
        let (_dir, path) = setup();
        list_curriculum(&path, None).unwrap();
        list_curriculum(&path, Some("r")).unwrap();
        assert!(list_curriculum(&path, Some("cobol")).is_err());
    }

    #[test]
    fn test_audit_fix_fills_blank_expected() {
        let (_dir, path) = setup();
        let mut curriculum = CurriculumFile::load(&path).unwrap();
        curriculum.chapters[0].lessons[0].expected_output = String::new();
        curriculum.save(&path).unwrap();

        assert!(audit_curriculum(&path, true).unwrap());
        let curriculum = CurriculumFile::load(&path).unwrap();
        assert_eq!(
            curriculum.chapters[0].lessons[0].expected_output,
            PLACEHOLDER_EXPECTED_OUTPUT
        );
    }

    #[test]
    fn test_audit_fails_on_rejected_solution() {
        let (_dir, path) = setup();
        let mut curriculum = CurriculumFile::load(&path).unwrap();
        curriculum.chapters[0].lessons[0].solution_code = "pass".to_string();
        curriculum.save(&path).unwrap();

        assert!(!audit_curriculum(&path, false).unwrap());
    }

    #[test]
    fn test_missing_curriculum_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = list_curriculum(&dir.path().join("none.json"), None).unwrap_err();
        assert!(err.to_string().contains("Curriculum file not found"));
    }

    #[test]
    fn test_verify_files() {
        let dir = tempfile::tempdir().unwrap();
        let expected = dir.path().join("expected.txt");
        let actual = dir.path().join("actual.txt");
        let code = dir.path().join("main.py");
        fs::write(&expected, "Total: 15").unwrap();
        fs::write(&actual, "total:   15\n").unwrap();
        fs::write(&code, "print('total:', 15)").unwrap();

        assert!(verify_files(&expected, &actual, &code, true).unwrap());

        fs::write(&expected, "[Graph: bar chart]").unwrap();
        fs::write(&actual, "[graph: bar chart]").unwrap();
        assert!(!verify_files(&expected, &actual, &code, true).unwrap());
        assert!(verify_files(&expected, &actual, &code, false).unwrap());

        assert!(verify_files(&dir.path().join("nope"), &actual, &code, true).is_err());
    }
}
