use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum RemoteError {
    #[error("Failed to connect to the translation service")]
    #[diagnostic(
        code(lokalise::remote::connection_failed),
        help("Check your network connection or the configured api_url.")
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Translation service returned HTTP {status}: {message}")]
    #[diagnostic(code(lokalise::remote::status))]
    Status { status: u16, message: String },

    #[error("Invalid response from translation service: {message}")]
    #[diagnostic(
        code(lokalise::remote::invalid_response),
        help("The service returned data in an unexpected format.")
    )]
    InvalidResponse { message: String },

    #[error("No bundle file in the export response")]
    #[diagnostic(
        code(lokalise::remote::missing_bundle),
        help("Check that the project id is correct and the project has translations.")
    )]
    MissingBundle,
}

impl From<reqwest::Error> for RemoteError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() || e.is_request() {
            RemoteError::ConnectionFailed { source: e }
        } else {
            RemoteError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for RemoteError {
    fn from(e: serde_json::Error) -> Self {
        RemoteError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type RemoteResult<T> = Result<T, RemoteError>;
