//! Error taxonomy for the answer-key editor.
//!
//! Every error carries a stable machine code and a retry classification so the
//! host UI can decide between "fix your input" and "try again".

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Stable machine-readable classification shared by every error enum here.
pub trait ErrorCode: std::fmt::Display {
    fn error_code(&self) -> &'static str;

    fn retryable(&self) -> bool {
        false
    }
}

// =============================================================================
// BACKEND
// =============================================================================

/// Failures talking to the `/api` backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Request(String),

    /// The backend answered with a non-success status.
    #[error("backend returned status {status}")]
    Response { status: u16, body: String },

    /// The response body did not match the expected JSON contract.
    #[error("response parse failed: {0}")]
    Parse(String),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ErrorCode for ApiError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Request(_) => "E_API_REQUEST",
            Self::Response { .. } => "E_API_RESPONSE",
            Self::Parse(_) => "E_API_PARSE",
            Self::ClientBuild(_) => "E_HTTP_CLIENT_BUILD",
            Self::Config(_) => "E_CONFIG",
        }
    }

    fn retryable(&self) -> bool {
        matches!(self, Self::Request(_) | Self::Response { status: 429 | 500..=599, .. })
    }
}

// =============================================================================
// CSV
// =============================================================================

/// Malformed answer CSV input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CsvError {
    #[error("CSV has no header row")]
    MissingHeader,

    #[error("CSV header is missing the `{0}` column")]
    MissingColumn(&'static str),

    #[error("CSV ends inside a quoted field")]
    UnterminatedQuote,
}

impl ErrorCode for CsvError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeader => "E_CSV_MISSING_HEADER",
            Self::MissingColumn(_) => "E_CSV_MISSING_COLUMN",
            Self::UnterminatedQuote => "E_CSV_UNTERMINATED_QUOTE",
        }
    }
}

// =============================================================================
// EDITOR
// =============================================================================

/// Editor operation failures. Validation variants never reach the network.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EditorError {
    #[error("exam metadata has no subject code")]
    MissingSubject,

    #[error("there are no questions to save")]
    NoQuestions,

    #[error("no question could be resolved to a question number")]
    NoResolvableQuestions,

    #[error("a save is already in progress")]
    SaveInFlight,

    #[error("saved answers are still loading")]
    FetchInFlight,

    #[error("unknown elective subject: {0}")]
    UnknownElective(String),

    #[error(transparent)]
    Csv(#[from] CsvError),

    #[error(transparent)]
    Api(#[from] ApiError),
}

impl ErrorCode for EditorError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::MissingSubject => "E_MISSING_SUBJECT",
            Self::NoQuestions => "E_NO_QUESTIONS",
            Self::NoResolvableQuestions => "E_NO_RESOLVABLE_QUESTIONS",
            Self::SaveInFlight => "E_SAVE_IN_FLIGHT",
            Self::FetchInFlight => "E_FETCH_IN_FLIGHT",
            Self::UnknownElective(_) => "E_UNKNOWN_ELECTIVE",
            Self::Csv(e) => e.error_code(),
            Self::Api(e) => e.error_code(),
        }
    }

    fn retryable(&self) -> bool {
        match self {
            Self::SaveInFlight | Self::FetchInFlight => true,
            Self::Api(e) => e.retryable(),
            _ => false,
        }
    }
}

// =============================================================================
// SESSION
// =============================================================================

/// Invalid grading-session transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("grading is already running")]
    AlreadyRunning,

    #[error("grading is not running")]
    NotRunning,
}

impl ErrorCode for SessionError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::AlreadyRunning => "E_SESSION_ALREADY_RUNNING",
            Self::NotRunning => "E_SESSION_NOT_RUNNING",
        }
    }
}
