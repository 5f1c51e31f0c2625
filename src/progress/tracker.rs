use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::store::ProgressStore;

/// Sections of the week page, in display order
pub const SECTIONS: &[&str] = &[
    "introduccion",
    "conceptos",
    "proceso-dm",
    "aplicaciones",
    "herramientas",
    "evaluacion",
];

/// Checklist items per section; the evaluation section completes through
/// the quiz instead of a checklist.
const CHECKLIST: &[(&str, &[&str])] = &[
    ("introduccion", &["intro-video", "intro-lectura"]),
    ("conceptos", &["conceptos-lectura", "conceptos-ejemplos"]),
    ("proceso-dm", &["proceso-diagrama", "proceso-etapas"]),
    ("aplicaciones", &["aplicaciones-casos"]),
    ("herramientas", &["herramientas-instalacion", "herramientas-practica"]),
];

// Store keys, identical to the ones the course pages write
const KEY_COURSE_PROGRESS: &str = "course-progress";
const KEY_CHECKLIST_STATES: &str = "checklist-states";
const KEY_QUIZ_RESULT: &str = "quiz-result";
const COMPLETED: &str = "completed";

fn section_key(section: &str) -> String {
    format!("section-{}", section)
}

/// Result of the last graded quiz, as persisted under `quiz-result`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRecord {
    pub correct: usize,
    pub total: usize,
    pub percentage: f32,
}

/// Course progress over the fixed section list, persisted through the flat
/// store. A passing quiz score (≥ 60%) completes the evaluation section.
#[derive(Debug, Resource)]
pub struct CourseTracker {
    store: ProgressStore,
}

impl CourseTracker {
    pub fn new(store: ProgressStore) -> Self {
        CourseTracker { store }
    }

    /// Open the default on-disk store; `AULA_VIZ_STORE` overrides the path.
    pub fn open_default() -> Self {
        let path =
            std::env::var("AULA_VIZ_STORE").unwrap_or_else(|_| "aula_progress.json".to_string());
        CourseTracker::new(ProgressStore::open(path))
    }

    pub fn is_section_completed(&self, section: &str) -> bool {
        self.store.get(&section_key(section)) == Some(COMPLETED)
    }

    pub fn mark_section_completed(&mut self, section: &str) {
        if !SECTIONS.contains(&section) {
            log::warn!("Ignoring unknown section '{}'", section);
            return;
        }
        self.store.set(section_key(section), COMPLETED);

        let percentage = self.progress_percentage();
        self.store.set(KEY_COURSE_PROGRESS, format!("{}", percentage));
    }

    pub fn completed_sections(&self) -> usize {
        SECTIONS
            .iter()
            .filter(|section| self.is_section_completed(section))
            .count()
    }

    /// Progress as a percentage (0.0 to 100.0)
    pub fn progress_percentage(&self) -> f32 {
        self.completed_sections() as f32 / SECTIONS.len() as f32 * 100.0
    }

    /// Current checklist states as stored under `checklist-states`
    pub fn checklist_states(&self) -> BTreeMap<String, bool> {
        self.store
            .get(KEY_CHECKLIST_STATES)
            .and_then(|raw| serde_json::from_str(raw).ok())
            .unwrap_or_default()
    }

    pub fn is_item_checked(&self, item: &str) -> bool {
        self.checklist_states().get(item).copied().unwrap_or(false)
    }

    /// Toggle a checklist item. When every item of the section is checked
    /// the section completes automatically.
    pub fn set_checklist_item(&mut self, item: &str, checked: bool) {
        let mut states = self.checklist_states();
        states.insert(item.to_string(), checked);
        match serde_json::to_string(&states) {
            Ok(raw) => self.store.set(KEY_CHECKLIST_STATES, raw),
            Err(e) => log::warn!("Could not serialize checklist states: {}", e),
        }

        if checked {
            let owning = CHECKLIST.iter().find(|(_, items)| items.contains(&item));
            if let Some((section, items)) = owning {
                let all_checked = items
                    .iter()
                    .all(|i| states.get(*i).copied().unwrap_or(false));
                if all_checked {
                    self.mark_section_completed(section);
                }
            }
        }
    }

    /// Persist a quiz result; a pass completes the evaluation section
    pub fn record_quiz(&mut self, record: &QuizRecord) {
        match serde_json::to_string(record) {
            Ok(raw) => self.store.set(KEY_QUIZ_RESULT, raw),
            Err(e) => log::warn!("Could not serialize quiz result: {}", e),
        }

        if record.percentage >= 60.0 {
            self.mark_section_completed("evaluacion");
        }
    }

    pub fn last_quiz(&self) -> Option<QuizRecord> {
        self.store
            .get(KEY_QUIZ_RESULT)
            .and_then(|raw| serde_json::from_str(raw).ok())
    }

    pub fn store(&self) -> &ProgressStore {
        &self.store
    }
}
