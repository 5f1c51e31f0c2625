mod store;
mod tracker;

pub use store::ProgressStore;
pub use tracker::{CourseTracker, QuizRecord, SECTIONS};

use bevy::prelude::*;

use crate::quiz::{self, Quiz};

pub struct ProgressPlugin;

impl Plugin for ProgressPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<QuizRequested>()
            .add_systems(Startup, load_progress)
            .add_systems(Update, (request_quiz, grade_demo_quiz));
    }
}

/// E was pressed: run the sample evaluation
#[derive(Message, Debug, Clone, Copy)]
pub struct QuizRequested;

fn load_progress(mut commands: Commands) {
    let tracker = CourseTracker::open_default();
    info!(
        "Progreso del curso: {:.0}% ({} de {} temas completados)",
        tracker.progress_percentage(),
        tracker.completed_sections(),
        SECTIONS.len(),
    );

    if let Some(last) = tracker.last_quiz() {
        info!(
            "{}",
            quiz::result_message(last.correct, last.total, last.percentage)
        );
    }

    match Quiz::evaluacion() {
        Ok(quiz) => info!(
            "Cuestionario '{}' listo ({} preguntas), pulsa E para la demo",
            quiz.title,
            quiz.questions.len()
        ),
        Err(e) => warn!("{}", e),
    }

    commands.insert_resource(tracker);
}

fn request_quiz(keys: Res<ButtonInput<KeyCode>>, mut requests: MessageWriter<QuizRequested>) {
    if keys.just_pressed(KeyCode::KeyE) {
        requests.write(QuizRequested);
    }
}

/// Demo stand-in for the quiz form: grade a randomly filled answer sheet,
/// log the per-question feedback and persist the result. A pass completes
/// the evaluation section, which shows up in the overlay's progress figure.
fn grade_demo_quiz(mut requests: MessageReader<QuizRequested>, mut tracker: ResMut<CourseTracker>) {
    if requests.read().count() == 0 {
        return;
    }

    let quiz = match Quiz::evaluacion() {
        Ok(quiz) => quiz,
        Err(e) => {
            warn!("{}", e);
            return;
        }
    };

    let sheet = quiz.random_answer_sheet(&mut rand::rng());
    let answers: Vec<Option<&str>> = sheet.iter().map(|a| a.as_deref()).collect();
    let report = quiz.grade(&answers);

    for index in 0..quiz.questions.len() {
        info!("Pregunta {}: {}", index + 1, report.feedback(&quiz, index));
    }
    info!("{}", report.summary());

    report.record(&mut tracker);
}
