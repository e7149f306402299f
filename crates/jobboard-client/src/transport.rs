//! Network transport

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::error::{ClientError, GraphQlError, Result};
use crate::operation::Operation;

/// Default request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const HTTP_UNAUTHORIZED: u16 = 401;

/// Sends operations and login requests to the server
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute an operation, returning the response `data` object
    async fn execute(&self, operation: Operation) -> Result<Value>;

    /// Exchange credentials for a bearer token
    async fn login(&self, email: &str, password: &str) -> Result<String>;
}

/// Transport over HTTP using `reqwest`
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    graphql_url: Url,
    login_url: Url,
}

impl HttpTransport {
    /// Create a transport for the server at `base_url`, e.g. `http://localhost:9000`
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| ClientError::Transport(format!("Invalid base URL {base_url}: {e}")))?;
        let join = |path: &str| {
            base.join(path)
                .map_err(|e| ClientError::Transport(format!("Invalid endpoint {path} for {base}: {e}")))
        };

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        Ok(Self {
            graphql_url: join("graphql")?,
            login_url: join("login")?,
            client,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, operation: Operation) -> Result<Value> {
        tracing::debug!(
            operation = operation.name(),
            kind = operation.kind().as_str(),
            authenticated = operation.header("authorization").is_some(),
            "Sending GraphQL operation"
        );

        let mut request = self
            .client
            .post(self.graphql_url.clone())
            .json(&operation.request_body());
        for (name, value) in operation.headers() {
            request = request.header(name.as_str(), value.as_str());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        parse_graphql_response(status, &body)
    }

    async fn login(&self, email: &str, password: &str) -> Result<String> {
        let response = self
            .client
            .post(self.login_url.clone())
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .bytes()
            .await
            .map_err(|e| ClientError::Transport(e.to_string()))?;

        parse_login_response(status, &body)
    }
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse {
    data: Option<Value>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    token: String,
}

const fn is_success(status: u16) -> bool {
    matches!(status, 200..=299)
}

fn http_error(status: u16, body: &[u8]) -> ClientError {
    let message = serde_json::from_slice::<ErrorBody>(body).map_or_else(
        |_| String::from_utf8_lossy(body).into_owned(),
        |b| b.error,
    );
    ClientError::Http { status, message }
}

/// Turn a `/graphql` HTTP response into its `data` object
///
/// A 401 means the credential was rejected before execution; a GraphQL
/// error coded `UNAUTHENTICATED` means a resolver required a login.
pub fn parse_graphql_response(status: u16, body: &[u8]) -> Result<Value> {
    if status == HTTP_UNAUTHORIZED {
        let message = serde_json::from_slice::<ErrorBody>(body)
            .map_or_else(|_| "unauthorized".to_string(), |b| b.error);
        return Err(ClientError::Unauthenticated(message));
    }

    let response: GraphQlResponse = match serde_json::from_slice(body) {
        Ok(response) => response,
        Err(_) if !is_success(status) => return Err(http_error(status, body)),
        Err(e) => return Err(e.into()),
    };

    if !response.errors.is_empty() {
        return Err(ClientError::from_graphql(response.errors));
    }
    if !is_success(status) {
        return Err(http_error(status, body));
    }

    response
        .data
        .filter(|d| !d.is_null())
        .ok_or_else(|| ClientError::MissingData("data".to_string()))
}

/// Turn a `/login` HTTP response into the issued token
pub fn parse_login_response(status: u16, body: &[u8]) -> Result<String> {
    if status == HTTP_UNAUTHORIZED {
        return Err(ClientError::LoginRejected);
    }
    if !is_success(status) {
        return Err(http_error(status, body));
    }

    let login: LoginResponse = serde_json::from_slice(body)?;
    Ok(login.token)
}
