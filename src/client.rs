use crate::{ApiResponseOrError, Credentials, Error, OpenAiError};
use reqwest::{header::AUTHORIZATION, Client, Method, Request};
use serde::{de::DeserializeOwned, Deserialize, Serialize};

const OPENAI_BETA: &str = "openai-beta";

/// A stateless handle on the API: owns the credentials and a `reqwest`
/// connection pool, nothing else. Cloning is cheap and clones share the pool.
/// Cancellation is whatever dropping the returned future means to `reqwest`.
#[derive(Clone)]
pub struct OpenAiClient {
    credentials: Credentials,
    client: Client,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "OpenAiClient")
    }
}

#[derive(Debug, Clone, Deserialize)]
struct OpenAiErrorWrapper {
    error: OpenAiError,
}

impl OpenAiClient {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            client: Client::new(),
        }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Composes the URL as a literal `base_url + route` concatenation and
    /// attaches the bearer token plus, when configured, the `OpenAI-Beta`
    /// marker. Fails before any network activity when the pieces don't form
    /// a valid request.
    fn build_request<S>(
        &self,
        method: Method,
        route: &str,
        body: Option<&S>,
    ) -> Result<Request, Error>
    where
        S: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.credentials.base_url(), route);
        let mut request = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, format!("Bearer {}", self.credentials.api_key()));

        if let Some(version) = self.credentials.beta_version() {
            request = request.header(OPENAI_BETA, version);
        }

        if let Some(body) = body {
            request = request.json(body);
        }

        request.build().map_err(Error::RequestConstruction)
    }

    pub async fn request<S, T>(
        &self,
        method: Method,
        route: &str,
        body: Option<&S>,
    ) -> ApiResponseOrError<T>
    where
        S: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.build_request(method.clone(), route, body)?;
        log::debug!("OpenAI Request[{method}] {}", request.url());

        let response = self
            .client
            .execute(request)
            .await
            .map_err(Error::Transport)?;
        let status = response.status();
        log::debug!("OpenAI Response[{method}] {} {route}", status.as_str());

        let text = response.text().await.map_err(Error::Transport)?;
        if status.is_success() {
            Ok(serde_json::from_str(&text)?)
        } else if let Ok(wrapper) = serde_json::from_str::<OpenAiErrorWrapper>(&text) {
            Err(Error::Api {
                status,
                error: wrapper.error,
            })
        } else {
            Err(Error::Api {
                status,
                error: OpenAiError::new(text, "unknown".to_string()),
            })
        }
    }

    pub async fn get<T>(&self, route: &str) -> ApiResponseOrError<T>
    where
        T: DeserializeOwned,
    {
        self.request::<(), T>(Method::GET, route, None).await
    }

    pub async fn post<S, T>(&self, route: &str, body: &S) -> ApiResponseOrError<T>
    where
        S: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.request(Method::POST, route, Some(body)).await
    }

    pub async fn delete<T>(&self, route: &str) -> ApiResponseOrError<T>
    where
        T: DeserializeOwned,
    {
        self.request::<(), T>(Method::DELETE, route, None).await
    }
}
