pub mod data;
pub mod error;
pub mod score;
pub mod session;
pub mod shuffle;

pub use data::{load_and_validate, validate, Question, QuizDocument};
pub use error::{
    InvalidStateError, ParseError, QuizError, ValidationError, ValidationErrorKind,
};
pub use score::{
    review_set, score, CategoryScore, ReviewEntry, ReviewScope, ScoreReport, FALLBACK_CATEGORY,
};
pub use session::{Mode, PresentedQuestion, SessionModel};
pub use shuffle::shuffle;
