use std::env;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::observability::{
    CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS, LOGINS, REGISTRATIONS, VERIFY_FAILURES,
};
use crate::session::{self, Session};
use crate::token_store::{FileTokenStore, TokenStore};
use crate::types::{
    AskRequest, AskResponse, CreatedUser, Credentials, TokenResponse, VerifyResponse,
};

const DEFAULT_API_URL: &str = "http://localhost:8000/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Environment variable naming the backend base URL.
pub const API_URL_ENV: &str = "VERDICT_API_URL";

/// Client for the VerdictAI legal assistant API.
///
/// Request methods are stateless single-shot calls: one request, one
/// response, no retries. The only shared state is the [`TokenStore`], which
/// `ask` consults to attach the bearer token and which the sign-in/sign-out
/// flows write through.
#[derive(Clone)]
pub struct Verdict {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
    store: Arc<dyn TokenStore>,
}

impl Verdict {
    /// Create a new client.
    ///
    /// The base URL can be provided directly or read from the
    /// VERDICT_API_URL environment variable; otherwise a local development
    /// backend is assumed. Tokens persist through a [`FileTokenStore`] at
    /// its default location.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(
        base_url: Option<String>,
        timeout: Option<Duration>,
        store: Option<Arc<dyn TokenStore>>,
    ) -> Result<Self> {
        let base_url = base_url
            .or_else(|| env::var(API_URL_ENV).ok())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let base_url = normalize_base_url(base_url)?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
            store: store.unwrap_or_else(|| Arc::new(FileTokenStore::new())),
        })
    }

    /// Returns the backend base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the token store this client reads and writes.
    pub fn token_store(&self) -> &Arc<dyn TokenStore> {
        &self.store
    }

    /// Create and return default headers for API requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map a transport-level failure onto our Error type.
    fn transport_error(&self, e: reqwest::Error) -> Error {
        CLIENT_REQUEST_ERRORS.click();
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process API response errors and convert to our Error type.
    ///
    /// Surfaces the backend's error text: the FastAPI `detail` field when
    /// the body parses as JSON, the raw body otherwise, or a generic status
    /// message when the body is empty.
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        #[derive(Deserialize)]
        struct ErrorBody {
            detail: Option<serde_json::Value>,
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.detail)
            .map(|detail| match detail {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            });
        let message = detail.unwrap_or_else(|| {
            if body.trim().is_empty() {
                format!("status {}", status_code)
            } else {
                body.clone()
            }
        });

        match status_code {
            400 | 422 => Error::bad_request(message, None),
            401 => Error::authentication(message),
            403 => Error::permission(message),
            404 => Error::not_found(message),
            408 => Error::timeout(message, None),
            500 => Error::internal_server(message),
            502..=504 => Error::service_unavailable(message),
            _ => Error::api(status_code, message),
        }
    }

    /// Create an account.
    ///
    /// Posts the credentials as JSON to `/register`. A failing status
    /// surfaces the backend's error text to the caller.
    pub async fn register(&self, credentials: &Credentials) -> Result<CreatedUser> {
        credentials.validate()?;
        CLIENT_REQUESTS.click();

        let response = self
            .client
            .post(self.endpoint("register"))
            .headers(self.default_headers())
            .json(credentials)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        REGISTRATIONS.click();
        response.json::<CreatedUser>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Exchange credentials for a bearer token.
    ///
    /// Posts `username` and `password` form-encoded to `/token`, matching
    /// the backend's OAuth2 password flow. The returned token is not saved;
    /// see [`Verdict::sign_in`] for the full login flow.
    pub async fn login(&self, credentials: &Credentials) -> Result<TokenResponse> {
        credentials.validate()?;
        CLIENT_REQUESTS.click();

        let form = [
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];
        let response = self
            .client
            .post(self.endpoint("token"))
            .headers(self.default_headers())
            .form(&form)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        LOGINS.click();
        response.json::<TokenResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Ask the backend to confirm a token.
    ///
    /// Best-effort only: callers in the login flow tolerate and ignore a
    /// failure here rather than aborting. The authoritative check remains
    /// the backend's validation on each protected request.
    pub async fn verify_token(&self, token: &str) -> Result<VerifyResponse> {
        CLIENT_REQUESTS.click();

        let response = self
            .client
            .get(self.endpoint(&format!("verify-token/{}", token)))
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<VerifyResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Submit a legal question to `/ask`.
    ///
    /// Attaches `Authorization: Bearer <token>` whenever the token store
    /// holds a token; sends no such header otherwise. Unlike the account
    /// operations, a failing status yields only a generic status error:
    /// the chat surface renders a fixed fallback message instead of raw
    /// backend error text.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use verdict::Verdict;
    ///
    /// # tokio_test::block_on(async {
    /// let client = Verdict::new(None).unwrap();
    /// let response = client.ask("What is a tort?").await.unwrap();
    /// println!("{}", response.answer);
    /// # });
    /// ```
    pub async fn ask(&self, query: impl Into<String>) -> Result<AskResponse> {
        CLIENT_REQUESTS.click();

        let mut request = self
            .client
            .post(self.endpoint("ask"))
            .headers(self.default_headers())
            .json(&AskRequest::new(query));
        if let Some(token) = self.store.get() {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| self.transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Error::api(
                status.as_u16(),
                format!("status {}", status.as_u16()),
            ));
        }

        response.json::<AskResponse>().await.map_err(|e| {
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// The complete login flow.
    ///
    /// Exchanges credentials, saves the token, then confirms it with a
    /// best-effort [`Verdict::verify_token`] call whose failure is ignored.
    /// Returns the session derived from the saved token.
    pub async fn sign_in(&self, credentials: &Credentials) -> Result<Session> {
        let token = self.login(credentials).await?;
        self.store.save(&token.access_token);

        if self.verify_token(&token.access_token).await.is_err() {
            VERIFY_FAILURES.click();
        }

        session::current_user(self.store.as_ref())
            .ok_or_else(|| Error::authentication("login produced an unusable token"))
    }

    /// Clears the stored token.
    pub fn sign_out(&self) {
        self.store.clear();
    }

    /// Returns the current session without touching the network.
    pub fn current_user(&self) -> Option<Session> {
        session::current_user(self.store.as_ref())
    }

    /// The page-guard flow: clears an expired token and returns the
    /// session only when one remains usable.
    pub fn authenticated(&self) -> Option<Session> {
        session::authenticated(self.store.as_ref())
    }
}

impl fmt::Debug for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Verdict")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

fn normalize_base_url(base_url: String) -> Result<String> {
    url::Url::parse(&base_url)?;
    if base_url.ends_with('/') {
        Ok(base_url)
    } else {
        Ok(format!("{}/", base_url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryTokenStore;

    #[test]
    fn test_client_creation() {
        // Test with explicit base URL
        let client = Verdict::new(Some("https://api.example.com/".to_string())).unwrap();
        assert_eq!(client.base_url, "https://api.example.com/");
        assert_eq!(client.timeout, DEFAULT_TIMEOUT);

        // Test with custom options
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let client = Verdict::with_options(
            Some("https://custom-api.example.com".to_string()),
            Some(Duration::from_secs(30)),
            Some(store),
        )
        .unwrap();
        assert_eq!(client.base_url, "https://custom-api.example.com/");
        assert_eq!(client.timeout, Duration::from_secs(30));
    }

    #[test]
    fn base_url_must_parse() {
        assert!(Verdict::new(Some("not a url".to_string())).is_err());
    }

    #[test]
    fn endpoint_joins_paths() {
        let client = Verdict::new(Some("https://api.example.com".to_string())).unwrap();
        assert_eq!(client.endpoint("ask"), "https://api.example.com/ask");
        assert_eq!(
            client.endpoint("verify-token/abc"),
            "https://api.example.com/verify-token/abc"
        );
    }

    #[tokio::test]
    async fn register_validates_before_sending() {
        let client = Verdict::new(Some("https://api.example.com/".to_string())).unwrap();
        let err = client
            .register(&Credentials::new("", "pw"))
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn login_validates_before_sending() {
        let client = Verdict::new(Some("https://api.example.com/".to_string())).unwrap();
        let err = client.login(&Credentials::new("ada", "")).await.unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn sign_out_clears_store() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        store.save("tok");
        let client = Verdict::with_options(
            Some("https://api.example.com/".to_string()),
            None,
            Some(store.clone()),
        )
        .unwrap();
        client.sign_out();
        assert_eq!(store.get(), None);
    }
}
