// src/error.rs
// =============================================================================
// Errors that end a run.
//
// Anything that goes wrong before the pipeline starts (bad input, the fetch
// itself) is fatal for the whole invocation: there is a single page and a
// single request, so there is nothing to continue with. Problems inside one
// record are a different type (`event::MalformedEvent`) and never end a run.
// =============================================================================

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ActivityError {
    /// Input we refuse to send to the API
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("username not found")]
    NotFound,

    #[error("error fetching data. status code: {status}")]
    Http { status: u16 },

    #[error("Timeout! Please check your connection!")]
    Timeout,

    #[error("could not reach GitHub: {0}")]
    Transport(#[source] reqwest::Error),

    /// The API answered 200 but not with a list of events
    #[error("unexpected response from GitHub: {0}")]
    InvalidBody(#[from] serde_json::Error),

    #[error("could not write output: {0}")]
    Output(#[from] std::io::Error),
}

impl ActivityError {
    /// Process exit code for this failure
    ///
    /// An unknown user is reported like any other result, so it ends cleanly.
    pub fn exit_code(&self) -> i32 {
        match self {
            ActivityError::NotFound => 0,
            _ => 1,
        }
    }
}

impl From<reqwest::Error> for ActivityError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            ActivityError::Timeout
        } else {
            ActivityError::Transport(error)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(ActivityError::NotFound.exit_code(), 0);
        assert_eq!(ActivityError::Timeout.exit_code(), 1);
        assert_eq!(ActivityError::Http { status: 500 }.exit_code(), 1);
    }

    #[test]
    fn test_messages() {
        assert_eq!(ActivityError::NotFound.to_string(), "username not found");
        assert_eq!(
            ActivityError::Http { status: 503 }.to_string(),
            "error fetching data. status code: 503"
        );
    }
}
