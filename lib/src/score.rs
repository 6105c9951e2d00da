use serde::{Deserialize, Serialize};

use crate::error::InvalidStateError;
use crate::session::{PresentedQuestion, SessionModel};

/// Category assigned to questions that carry none of their own.
pub const FALLBACK_CATEGORY: &str = "General";

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct CategoryScore {
    pub category: String,
    pub correct: usize,
    pub total: usize,
}

/// One reviewable question: the presented question, its presentation
/// index, and the recorded answer if there was one.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ReviewEntry {
    pub question: PresentedQuestion,
    pub index: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_answer: Option<String>,
}

/// Grading result for one attempt. Derived from a session snapshot,
/// never mutated afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ScoreReport {
    pub correct_count: usize,
    pub incorrect_count: usize,
    pub total_count: usize,
    pub percentage: u32,
    pub by_category: Vec<CategoryScore>,
    pub missed: Vec<ReviewEntry>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReviewScope {
    All,
    IncorrectOnly,
}

/// Grades a session: exact string match against each question's
/// correct answer, unanswered questions counting as incorrect.
///
/// Categories accumulate in first-seen order. A session with no
/// questions cannot come out of a validated document, so scoring one
/// is rejected as an invalid state.
pub fn score(session: &SessionModel) -> Result<ScoreReport, InvalidStateError> {
    let total_count = session.len();
    if total_count == 0 {
        return Err(InvalidStateError::EmptySession);
    }

    let mut correct_count = 0;
    let mut by_category: Vec<CategoryScore> = Vec::new();
    let mut missed = Vec::new();

    for (index, presented) in session.presented_questions.iter().enumerate() {
        let user_answer = session.answer(index);
        let is_correct = user_answer == Some(presented.question.correct_answer.as_str());

        if is_correct {
            correct_count += 1;
        } else {
            missed.push(ReviewEntry {
                question: presented.clone(),
                index,
                user_answer: user_answer.map(str::to_owned),
            });
        }

        let category = presented
            .question
            .category
            .as_deref()
            .unwrap_or(FALLBACK_CATEGORY);
        let position = match by_category.iter().position(|c| c.category == category) {
            Some(position) => position,
            None => {
                by_category.push(CategoryScore {
                    category: category.to_owned(),
                    correct: 0,
                    total: 0,
                });
                by_category.len() - 1
            }
        };
        by_category[position].total += 1;
        if is_correct {
            by_category[position].correct += 1;
        }
    }

    let percentage = ((correct_count as f64 / total_count as f64) * 100.0).round() as u32;

    Ok(ScoreReport {
        correct_count,
        incorrect_count: total_count - correct_count,
        total_count,
        percentage,
        by_category,
        missed,
    })
}

/// Builds the set of questions to review: every presented question in
/// order, or only the missed ones from an existing report.
pub fn review_set(
    session: &SessionModel,
    report: &ScoreReport,
    scope: ReviewScope,
) -> Vec<ReviewEntry> {
    match scope {
        ReviewScope::All => session
            .presented_questions
            .iter()
            .enumerate()
            .map(|(index, presented)| ReviewEntry {
                question: presented.clone(),
                index,
                user_answer: session.answer(index).map(str::to_owned),
            })
            .collect(),
        ReviewScope::IncorrectOnly => report.missed.clone(),
    }
}
