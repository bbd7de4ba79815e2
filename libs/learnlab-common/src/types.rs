use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CatalogError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Python,
    Sql,
    R,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Python, Language::Sql, Language::R];
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Language::Python => write!(f, "python"),
            Language::Sql => write!(f, "sql"),
            Language::R => write!(f, "r"),
        }
    }
}

impl FromStr for Language {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "python" => Ok(Language::Python),
            "sql" => Ok(Language::Sql),
            "r" => Ok(Language::R),
            _ => Err(CatalogError::UnknownLanguage(s.to_string())),
        }
    }
}

/// A single exercise within a chapter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    pub id: String,
    pub title: String,
    /// Markdown body, served as-is
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub starter_code: String,
    #[serde(default)]
    pub solution_code: String,
    #[serde(default)]
    pub expected_output: String,
    #[serde(default)]
    pub hints: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub language: Language,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: u32,
    #[serde(default)]
    pub lessons: Vec<Lesson>,
}

/// On-disk curriculum layout (`config/curriculum.json`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurriculumFile {
    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonSummary {
    pub id: String,
    pub title: String,
}

impl From<&Lesson> for LessonSummary {
    fn from(lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            title: lesson.title.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterSummary {
    pub id: String,
    pub language: Language,
    pub title: String,
    pub description: String,
    pub order: u32,
    pub lesson_count: usize,
}

impl From<&Chapter> for ChapterSummary {
    fn from(chapter: &Chapter) -> Self {
        Self {
            id: chapter.id.clone(),
            language: chapter.language,
            title: chapter.title.clone(),
            description: chapter.description.clone(),
            order: chapter.order,
            lesson_count: chapter.lessons.len(),
        }
    }
}

/// Chapter with lesson titles only
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChapterDetail {
    #[serde(flatten)]
    pub summary: ChapterSummary,
    pub lessons: Vec<LessonSummary>,
}

impl From<&Chapter> for ChapterDetail {
    fn from(chapter: &Chapter) -> Self {
        Self {
            summary: ChapterSummary::from(chapter),
            lessons: chapter.lessons.iter().map(LessonSummary::from).collect(),
        }
    }
}

/// Lesson as shown to learners: everything except the solution
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LessonView {
    pub id: String,
    pub chapter_id: String,
    pub language: Language,
    pub title: String,
    pub content: String,
    pub starter_code: String,
    pub expected_output: String,
    pub hints: Vec<String>,
}

impl LessonView {
    pub fn new(chapter: &Chapter, lesson: &Lesson) -> Self {
        Self {
            id: lesson.id.clone(),
            chapter_id: chapter.id.clone(),
            language: chapter.language,
            title: lesson.title.clone(),
            content: lesson.content.clone(),
            starter_code: lesson.starter_code.clone(),
            expected_output: lesson.expected_output.clone(),
            hints: lesson.hints.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageSummary {
    pub language: Language,
    pub chapters: usize,
    pub lessons: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_language_parsing() {
        assert_eq!("python".parse::<Language>().unwrap(), Language::Python);
        assert_eq!(" SQL ".parse::<Language>().unwrap(), Language::Sql);
        assert_eq!("R".parse::<Language>().unwrap(), Language::R);
        assert!("cobol".parse::<Language>().is_err());
    }

    #[test]
    fn test_language_display_roundtrips_serde() {
        for lang in Language::ALL {
            let json = serde_json::to_string(&lang).unwrap();
            assert_eq!(json, format!("\"{}\"", lang));
        }
    }

    #[test]
    fn test_lesson_defaults() {
        let lesson: Lesson = serde_json::from_str(r#"{"id": "l1", "title": "Intro"}"#).unwrap();
        assert!(lesson.expected_output.is_empty());
        assert!(lesson.hints.is_empty());
        assert!(lesson.solution_code.is_empty());
    }

    #[test]
    fn test_chapter_detail_flattens_summary() {
        let chapter = Chapter {
            id: "basics".to_string(),
            language: Language::Python,
            title: "Basics".to_string(),
            description: String::new(),
            order: 1,
            lessons: vec![Lesson {
                id: "hello".to_string(),
                title: "Hello".to_string(),
                content: String::new(),
                starter_code: String::new(),
                solution_code: "print('hi')".to_string(),
                expected_output: "hi".to_string(),
                hints: vec![],
            }],
        };

        let json = serde_json::to_value(ChapterDetail::from(&chapter)).unwrap();
        assert_eq!(json["id"], "basics");
        assert_eq!(json["lesson_count"], 1);
        assert_eq!(json["lessons"][0]["id"], "hello");
        assert!(json["lessons"][0].get("solution_code").is_none());
    }
}
