use rand::Rng;
use rand::prelude::IndexedRandom;
use serde::Deserialize;

use crate::progress::{CourseTracker, QuizRecord};

const EVALUACION_JSON: &str = include_str!("../assets/quiz_evaluacion.json");

/// Passing threshold, percent
const PASS_PERCENTAGE: f32 = 60.0;
/// Top feedback tier, percent
const EXCELLENT_PERCENTAGE: f32 = 80.0;

/// One multiple-choice option
#[derive(Debug, Clone, Deserialize)]
pub struct Choice {
    /// Option key the answer sheet refers to ("a", "b", ...)
    pub key: String,
    pub text: String,
}

/// One question with its answer key and feedback strings
#[derive(Debug, Clone, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub options: Vec<Choice>,
    /// Key of the correct option
    pub answer: String,
    pub explanation_correct: String,
    pub explanation_incorrect: String,
}

/// A quiz definition, embedded as JSON next to the binary
#[derive(Debug, Clone, Deserialize)]
pub struct Quiz {
    pub title: String,
    pub questions: Vec<Question>,
}

/// Grading outcome of a single question
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    Unanswered,
}

/// Feedback tier of an overall score
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Excellent,
    Passing,
    NeedsReview,
}

impl ScoreBand {
    pub fn from_percentage(percentage: f32) -> Self {
        if percentage >= EXCELLENT_PERCENTAGE {
            ScoreBand::Excellent
        } else if percentage >= PASS_PERCENTAGE {
            ScoreBand::Passing
        } else {
            ScoreBand::NeedsReview
        }
    }
}

/// The graded answer sheet
#[derive(Debug, Clone)]
pub struct QuizReport {
    pub outcomes: Vec<AnswerOutcome>,
    pub correct: usize,
    pub total: usize,
}

impl Quiz {
    /// Load the embedded evaluation quiz of the week page
    pub fn evaluacion() -> Result<Self, String> {
        serde_json::from_str(EVALUACION_JSON).map_err(|e| format!("Invalid embedded quiz: {}", e))
    }

    /// Grade an answer sheet of option keys, one entry per question.
    /// Missing or `None` entries count as unanswered, never as wrong input.
    pub fn grade(&self, answers: &[Option<&str>]) -> QuizReport {
        let outcomes: Vec<AnswerOutcome> = self
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| match answers.get(index).copied().flatten() {
                None => AnswerOutcome::Unanswered,
                Some(answer) if answer == question.answer => AnswerOutcome::Correct,
                Some(_) => AnswerOutcome::Incorrect,
            })
            .collect();

        let correct = outcomes
            .iter()
            .filter(|outcome| **outcome == AnswerOutcome::Correct)
            .count();

        QuizReport {
            outcomes,
            correct,
            total: self.questions.len(),
        }
    }

    /// Fill an answer sheet with random option picks (the demo stand-in for
    /// a real form submission)
    pub fn random_answer_sheet(&self, rng: &mut impl Rng) -> Vec<Option<String>> {
        self.questions
            .iter()
            .map(|question| question.options.choose(rng).map(|choice| choice.key.clone()))
            .collect()
    }
}

impl QuizReport {
    pub fn percentage(&self) -> f32 {
        if self.total == 0 {
            0.0
        } else {
            self.correct as f32 / self.total as f32 * 100.0
        }
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_percentage(self.percentage())
    }

    pub fn passed(&self) -> bool {
        self.percentage() >= PASS_PERCENTAGE
    }

    /// Feedback line for one question, in the page's wording
    pub fn feedback(&self, quiz: &Quiz, index: usize) -> String {
        match self.outcomes.get(index) {
            Some(AnswerOutcome::Correct) => {
                format!("¡Correcto! {}", quiz.questions[index].explanation_correct)
            }
            Some(AnswerOutcome::Incorrect) => {
                format!("Incorrecto. {}", quiz.questions[index].explanation_incorrect)
            }
            _ => "Por favor selecciona una respuesta.".to_string(),
        }
    }

    /// Overall result message, in the page's three tiers
    pub fn summary(&self) -> String {
        result_message(self.correct, self.total, self.percentage())
    }

    /// Persist the result; a pass completes the evaluation section
    pub fn record(&self, tracker: &mut CourseTracker) {
        tracker.record_quiz(&QuizRecord {
            correct: self.correct,
            total: self.total,
            percentage: self.percentage(),
        });
    }
}

/// The tiered result message the page shows after grading
pub fn result_message(correct: usize, total: usize, percentage: f32) -> String {
    let opener = match ScoreBand::from_percentage(percentage) {
        ScoreBand::Excellent => "¡Excelente!",
        ScoreBand::Passing => "Buen trabajo.",
        ScoreBand::NeedsReview => "Necesitas repasar los conceptos.",
    };
    format!(
        "{} Has respondido correctamente {} de {} preguntas ({:.0}%).",
        opener, correct, total, percentage
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::progress::ProgressStore;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_embedded_quiz_parses() {
        let quiz = Quiz::evaluacion().unwrap();
        assert_eq!(quiz.questions.len(), 3);

        let key: Vec<&str> = quiz.questions.iter().map(|q| q.answer.as_str()).collect();
        assert_eq!(key, vec!["b", "b", "a"]);

        for question in &quiz.questions {
            assert!(
                question.options.iter().any(|c| c.key == question.answer),
                "answer key must name one of the options"
            );
        }
    }

    #[test]
    fn test_perfect_sheet() {
        let quiz = Quiz::evaluacion().unwrap();
        let report = quiz.grade(&[Some("b"), Some("b"), Some("a")]);

        assert_eq!(report.correct, 3);
        assert_eq!(report.percentage(), 100.0);
        assert_eq!(report.band(), ScoreBand::Excellent);
        assert!(report.passed());
    }

    #[test]
    fn test_two_of_three_passes() {
        let quiz = Quiz::evaluacion().unwrap();
        let report = quiz.grade(&[Some("b"), Some("b"), Some("c")]);

        assert_eq!(report.correct, 2);
        assert_eq!(report.band(), ScoreBand::Passing);
        assert!(report.passed());
    }

    #[test]
    fn test_one_of_three_needs_review() {
        let quiz = Quiz::evaluacion().unwrap();
        let report = quiz.grade(&[Some("b"), Some("a"), Some("c")]);

        assert_eq!(report.correct, 1);
        assert_eq!(report.band(), ScoreBand::NeedsReview);
        assert!(!report.passed());
    }

    #[test]
    fn test_unanswered_questions() {
        let quiz = Quiz::evaluacion().unwrap();
        let report = quiz.grade(&[Some("b"), None]);

        assert_eq!(report.outcomes[0], AnswerOutcome::Correct);
        assert_eq!(report.outcomes[1], AnswerOutcome::Unanswered);
        assert_eq!(report.outcomes[2], AnswerOutcome::Unanswered);
        assert_eq!(
            report.feedback(&quiz, 1),
            "Por favor selecciona una respuesta."
        );
    }

    #[test]
    fn test_feedback_wording() {
        let quiz = Quiz::evaluacion().unwrap();
        let report = quiz.grade(&[Some("b"), Some("a"), Some("a")]);

        assert!(report.feedback(&quiz, 0).starts_with("¡Correcto!"));
        assert!(report.feedback(&quiz, 1).starts_with("Incorrecto."));
    }

    #[test]
    fn test_summary_tiers() {
        assert!(result_message(3, 3, 100.0).starts_with("¡Excelente!"));
        assert!(result_message(2, 3, 66.7).starts_with("Buen trabajo."));
        assert!(result_message(1, 3, 33.3).starts_with("Necesitas repasar"));
    }

    #[test]
    fn test_record_completes_evaluation_on_pass() {
        let quiz = Quiz::evaluacion().unwrap();
        let mut tracker = CourseTracker::new(ProgressStore::in_memory());

        let report = quiz.grade(&[Some("b"), Some("b"), Some("a")]);
        report.record(&mut tracker);

        assert!(tracker.is_section_completed("evaluacion"));
        let stored = tracker.last_quiz().unwrap();
        assert_eq!(stored.correct, 3);
        assert_eq!(stored.percentage, 100.0);
    }

    #[test]
    fn test_random_sheet_answers_every_question() {
        let quiz = Quiz::evaluacion().unwrap();
        let mut rng = StdRng::seed_from_u64(12);
        let sheet = quiz.random_answer_sheet(&mut rng);

        assert_eq!(sheet.len(), 3);
        assert!(sheet.iter().all(|answer| answer.is_some()));
    }
}
