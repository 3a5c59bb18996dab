use reqwest::StatusCode;
use serde::Deserialize;
use std::env;

pub mod client;
pub mod threads;

pub use client::OpenAiClient;

const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1/";

/// Holds the configuration a client needs to reach the API: key, base URL and
/// the optional beta opt-in marker. Construct one explicitly or load it from
/// the environment, then hand it to [`OpenAiClient::new`].
///
/// ## Examples
///
/// Use environment variables defined in a `.env` file:
///
/// ```no_run
/// use openai_threads::{Credentials, OpenAiClient};
/// use dotenvy::dotenv;
///
/// dotenv().ok();
/// let client = OpenAiClient::new(Credentials::from_env());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    base_url: String,
    beta_version: Option<String>,
}

impl Credentials {
    /// Creates credentials with an explicit base URL and no beta marker.
    /// The base URL is normalized to end with `/`.
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: parse_base_url(base_url.into()),
            beta_version: None,
        }
    }

    /// Reads credentials from `OPENAI_KEY`, `OPENAI_BASE_URL` and
    /// `OPENAI_BETA`. A missing key is left empty rather than panicking; the
    /// service rejects the request instead.
    pub fn from_env() -> Self {
        Self {
            api_key: env::var("OPENAI_KEY").unwrap_or_default(),
            base_url: parse_base_url(
                env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            ),
            beta_version: env::var("OPENAI_BETA").ok(),
        }
    }

    /// Opts in to a pre-stable API revision, e.g. `assistants=v2`. The marker
    /// is sent as the `OpenAI-Beta` header on every request.
    pub fn with_beta_version(mut self, version: impl Into<String>) -> Self {
        self.beta_version = Some(version.into());
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn beta_version(&self) -> Option<&str> {
        self.beta_version.as_deref()
    }
}

fn parse_base_url(mut value: String) -> String {
    if !value.ends_with('/') {
        value.push('/');
    }
    value
}

/// The error body returned by the API on non-2xx responses.
#[derive(Deserialize, Debug, Clone)]
pub struct OpenAiError {
    pub message: String,
    #[serde(rename = "type")]
    pub error_type: String,
    pub param: Option<String>,
    pub code: Option<String>,
}

impl OpenAiError {
    pub(crate) fn new(message: String, error_type: String) -> Self {
        Self {
            message,
            error_type,
            param: None,
            code: None,
        }
    }
}

impl std::fmt::Display for OpenAiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Everything that can go wrong with a request, in the order it can happen:
/// building the request, sending it, the service rejecting it, or the
/// response body not matching the expected shape. None of these are retried
/// or reinterpreted here; they propagate to the caller as-is.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to construct request: {0}")]
    RequestConstruction(#[source] reqwest::Error),
    #[error("transport failure: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("API error ({status}): {error}")]
    Api {
        status: StatusCode,
        error: OpenAiError,
    },
    #[error("failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

pub type ApiResponseOrError<T> = Result<T, Error>;
