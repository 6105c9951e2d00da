use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::data::{Question, QuizDocument};
use crate::error::InvalidStateError;
use crate::shuffle::shuffle;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Per-question feedback is surfaced immediately after each answer.
    Practice,
    /// Feedback is withheld until the attempt is graded.
    Exam,
}

/// A question prepared for one attempt: the validated question, its
/// index in the source document, and a per-session permutation of its
/// answer choices.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PresentedQuestion {
    pub question: Question,
    pub original_index: usize,
    pub answer_order: Vec<String>,
}

impl PresentedQuestion {
    fn present(question: Question, original_index: usize, rng: &mut impl Rng) -> Self {
        let answer_order = shuffle(&question.all_answers(), rng);

        Self {
            question,
            original_index,
            answer_order,
        }
    }
}

/// State of a single quiz attempt.
///
/// Question order follows the source document; only the answer choices
/// within each question are shuffled. Answers are keyed by presentation
/// index and the newest choice for an index wins.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SessionModel {
    pub mode: Mode,
    pub presented_questions: Vec<PresentedQuestion>,
    pub answers: HashMap<usize, String>,
}

impl SessionModel {
    pub fn start(document: &QuizDocument, mode: Mode) -> Self {
        Self::start_with_rng(document, mode, &mut rand::thread_rng())
    }

    pub fn start_with_rng(document: &QuizDocument, mode: Mode, rng: &mut impl Rng) -> Self {
        let presented_questions = document
            .questions
            .iter()
            .enumerate()
            .map(|(original_index, question)| {
                PresentedQuestion::present(question.clone(), original_index, rng)
            })
            .collect::<Vec<_>>();

        log::debug!(
            "started {mode:?} session with {} questions",
            presented_questions.len()
        );

        Self {
            mode,
            presented_questions,
            answers: HashMap::new(),
        }
    }

    /// Records the selected answer for the question at `index`,
    /// overwriting any prior selection.
    ///
    /// The answer text is stored as given; an illegal option is not an
    /// error here, it simply grades as incorrect.
    pub fn record_answer(
        &mut self,
        index: usize,
        answer: impl Into<String>,
    ) -> Result<(), InvalidStateError> {
        if index >= self.presented_questions.len() {
            return Err(InvalidStateError::OutOfRange {
                index,
                len: self.presented_questions.len(),
            });
        }

        self.answers.insert(index, answer.into());

        Ok(())
    }

    pub fn answer(&self, index: usize) -> Option<&str> {
        self.answers.get(&index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.presented_questions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.presented_questions.is_empty()
    }

    pub fn answered_count(&self) -> usize {
        self.answers.len()
    }

    pub fn is_complete(&self) -> bool {
        self.answered_count() == self.len()
    }
}
