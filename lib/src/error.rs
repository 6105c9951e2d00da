use thiserror::Error;

#[derive(Error, Debug)]
pub enum QuizError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    InvalidState(#[from] InvalidStateError),
}

/// Input text is not well-formed JSON. Position is best-effort,
/// taken from the parser's failure offset.
#[derive(Error, Debug)]
#[error("malformed JSON at line {line}, column {column}: {message}")]
pub struct ParseError {
    pub line: usize,
    pub column: usize,
    pub message: String,
}

impl From<serde_json::Error> for ParseError {
    fn from(error: serde_json::Error) -> Self {
        Self {
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationErrorKind {
    MissingField,
    WrongType,
    EmptyValue,
    DuplicateAnswer,
}

/// Well-formed JSON that violates the quiz schema. `question` is the
/// 1-based index of the offending question, when one is involved.
#[derive(Error, Debug)]
#[error("{message}")]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    pub question: Option<usize>,
    pub message: String,
}

impl ValidationError {
    fn new(kind: ValidationErrorKind, question: Option<usize>, message: String) -> Self {
        let message = match question {
            Some(index) => format!("question {index}: {message}"),
            None => message,
        };

        Self {
            kind,
            question,
            message,
        }
    }

    pub fn missing_field(question: Option<usize>, field: &str) -> Self {
        Self::new(
            ValidationErrorKind::MissingField,
            question,
            format!("missing field `{field}`"),
        )
    }

    pub fn wrong_type(question: Option<usize>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::WrongType, question, message.into())
    }

    pub fn empty_value(question: Option<usize>, message: impl Into<String>) -> Self {
        Self::new(ValidationErrorKind::EmptyValue, question, message.into())
    }

    pub fn duplicate_answer(question: usize, answer: &str) -> Self {
        Self::new(
            ValidationErrorKind::DuplicateAnswer,
            Some(question),
            format!("duplicate answer `{answer}`"),
        )
    }
}

/// Contract violations by the caller. These indicate a programming
/// bug in the collaborator, not a user-facing condition.
#[derive(Error, Debug)]
pub enum InvalidStateError {
    #[error("cannot score a session with no questions")]
    EmptySession,

    #[error("question index {index} out of range (session has {len} questions)")]
    OutOfRange { index: usize, len: usize },
}
