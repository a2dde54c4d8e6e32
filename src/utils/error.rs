// src/utils/error.rs
use thiserror::Error;

// Failures are grouped by the scope they abort: the run, one generation batch,
// or a single question.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Invalid URL '{0}': {1}")]
    InvalidUrl(String, String),

    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error: {0}")]
    Http(reqwest::StatusCode),
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectionError {
    #[error("'{0}' is not a section number")]
    NotANumber(String),

    #[error("section {choice} is out of range (1-{count})")]
    OutOfRange { choice: i64, count: usize },
}

#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {0}: {1}")]
    Http(reqwest::StatusCode, String),

    #[error("Unexpected generation response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum AnswerError {
    #[error("Network request failed: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP error {0}: {1}")]
    Http(reqwest::StatusCode, String),

    #[error("Unexpected answer response: {0}")]
    Malformed(String),
}

#[derive(Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error), // Console read/write failures

    #[error("Could not download the page: {0}")]
    Fetch(#[from] FetchError),
}

// `main` returns this error, and the runtime prints it with `{:?}`.
impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_messages() {
        assert_eq!(
            SelectionError::NotANumber("abc".to_string()).to_string(),
            "'abc' is not a section number"
        );
        assert_eq!(
            SelectionError::OutOfRange { choice: 9, count: 3 }.to_string(),
            "section 9 is out of range (1-3)"
        );
    }

    #[test]
    fn test_fetch_error_converts_into_app_error() {
        let err: AppError = FetchError::Http(reqwest::StatusCode::NOT_FOUND).into();
        assert!(matches!(err, AppError::Fetch(FetchError::Http(_))));
        assert!(err.to_string().contains("404"));
    }

    #[test]
    fn test_app_error_debug_is_the_readable_message() {
        let err: AppError = FetchError::Http(reqwest::StatusCode::NOT_FOUND).into();
        assert_eq!(format!("{:?}", err), "Could not download the page: HTTP error: 404 Not Found");
        assert_eq!(format!("{:?}", err), err.to_string());
    }
}
