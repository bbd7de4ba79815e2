// Curriculum catalog
// Loads chapters and lessons from curriculum.json and indexes them by id

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::error::{CatalogError, CatalogResult};
use crate::types::{Chapter, CurriculumFile, Language, LanguageSummary, Lesson};

impl CurriculumFile {
    /// Read the curriculum without validating ids
    pub fn load<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the curriculum as pretty-printed JSON, creating parent directories
    pub fn save<P: AsRef<Path>>(&self, path: P) -> CatalogResult<()> {
        let path = path.as_ref();
        let write_err = |source: std::io::Error| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }

        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(write_err)
    }

    pub fn add_chapter(&mut self, chapter: Chapter) -> CatalogResult<()> {
        if self.chapters.iter().any(|c| c.id == chapter.id) {
            return Err(CatalogError::DuplicateChapter(chapter.id));
        }
        self.chapters.push(chapter);
        Ok(())
    }

    /// Append a lesson to an existing chapter. Lesson ids are global.
    pub fn add_lesson(&mut self, chapter_id: &str, lesson: Lesson) -> CatalogResult<()> {
        if self
            .chapters
            .iter()
            .flat_map(|c| &c.lessons)
            .any(|l| l.id == lesson.id)
        {
            return Err(CatalogError::DuplicateLesson(lesson.id));
        }

        let chapter = self
            .chapters
            .iter_mut()
            .find(|c| c.id == chapter_id)
            .ok_or_else(|| CatalogError::ChapterNotFound(chapter_id.to_string()))?;
        chapter.lessons.push(lesson);
        Ok(())
    }
}

/// Immutable, validated view of the curriculum
///
/// Chapters are kept sorted by `order` (ties keep file order). Chapter and
/// lesson ids are unique across the whole catalog.
#[derive(Debug, Clone)]
pub struct Catalog {
    chapters: Vec<Chapter>,
    /// lesson id → (chapter index, lesson index)
    lessons: HashMap<String, (usize, usize)>,
}

impl Catalog {
    pub fn new(file: CurriculumFile) -> CatalogResult<Self> {
        let mut chapters = file.chapters;
        chapters.sort_by_key(|c| c.order);

        let mut chapter_ids = HashSet::new();
        let mut lessons = HashMap::new();

        for (ci, chapter) in chapters.iter().enumerate() {
            if !chapter_ids.insert(chapter.id.as_str()) {
                return Err(CatalogError::DuplicateChapter(chapter.id.clone()));
            }
            for (li, lesson) in chapter.lessons.iter().enumerate() {
                if lessons.insert(lesson.id.clone(), (ci, li)).is_some() {
                    return Err(CatalogError::DuplicateLesson(lesson.id.clone()));
                }
            }
        }

        debug!(chapters = chapters.len(), lessons = lessons.len(), "Catalog indexed");
        Ok(Self { chapters, lessons })
    }

    /// Load and validate a curriculum file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> CatalogResult<Self> {
        let path = path.as_ref();
        let catalog = Self::new(CurriculumFile::load(path)?)?;
        info!(
            path = %path.display(),
            chapters = catalog.chapters.len(),
            lessons = catalog.lessons.len(),
            "Curriculum loaded"
        );
        Ok(catalog)
    }

    pub fn chapters(&self) -> &[Chapter] {
        &self.chapters
    }

    pub fn chapters_for(&self, language: Language) -> impl Iterator<Item = &Chapter> {
        self.chapters.iter().filter(move |c| c.language == language)
    }

    pub fn chapter(&self, id: &str) -> Option<&Chapter> {
        self.chapters.iter().find(|c| c.id == id)
    }

    /// Look up a lesson together with the chapter that owns it
    pub fn lesson(&self, id: &str) -> Option<(&Chapter, &Lesson)> {
        let &(ci, li) = self.lessons.get(id)?;
        let chapter = &self.chapters[ci];
        Some((chapter, &chapter.lessons[li]))
    }

    pub fn lesson_count(&self) -> usize {
        self.lessons.len()
    }

    /// Languages that have at least one chapter, in `Language::ALL` order
    pub fn languages(&self) -> Vec<LanguageSummary> {
        Language::ALL
            .iter()
            .filter_map(|&language| {
                let (chapters, lessons) = self
                    .chapters_for(language)
                    .fold((0, 0), |(c, l), ch| (c + 1, l + ch.lessons.len()));
                (chapters > 0).then_some(LanguageSummary {
                    language,
                    chapters,
                    lessons,
                })
            })
            .collect()
    }
}
