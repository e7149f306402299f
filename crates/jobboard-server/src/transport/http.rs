//! HTTP transport implementation

use std::future::Future;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::extract::{Extension, State};
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{Html, IntoResponse, Json};
use axum::routing::{get, post};
use axum::{Router, middleware};
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::auth::{
    AuthContext, AuthError, AuthState, IdentityResolver, TokenCodec, TokenConfig, authenticate,
    identity_middleware,
};
use crate::config::{Config, HttpConfig};
use crate::constants::{DEFAULT_CORS_ORIGIN, STATUS_OK};
use crate::graphql::{JobBoardSchema, build_schema};
use crate::store::{MemoryStore, UserDirectory};
use crate::{Error, Result};

/// Health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

#[derive(Debug, Deserialize)]
struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    token: String,
}

/// Shared state of all HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub schema: JobBoardSchema,
    pub store: Arc<MemoryStore>,
    pub codec: Arc<TokenCodec>,
    pub auth: AuthState,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("store", &self.store)
            .field("codec", &self.codec)
            .field("auth", &self.auth)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Wire the schema, codec and identity resolver over one store
    #[must_use]
    pub fn new(store: Arc<MemoryStore>, token: &TokenConfig) -> Self {
        let codec = Arc::new(TokenCodec::new(token));
        let directory: Arc<dyn UserDirectory> = Arc::clone(&store) as Arc<dyn UserDirectory>;
        let resolver = IdentityResolver::new(Arc::clone(&codec), directory, token.stale_identity);

        Self {
            schema: build_schema(Arc::clone(&store)),
            store,
            codec,
            auth: AuthState::new(Arc::new(resolver)),
        }
    }
}

/// Build the application router
pub fn router(state: AppState, http: &HttpConfig) -> Router {
    let graphql = Router::new()
        .route("/graphql", get(graphiql_handler).post(graphql_handler))
        .route_layer(middleware::from_fn_with_state(
            state.auth.clone(),
            identity_middleware,
        ));

    #[allow(unused_mut)]
    let mut app = Router::new()
        .route("/login", post(login_handler))
        .route("/health", get(health_handler))
        .merge(graphql);

    #[cfg(feature = "metrics")]
    {
        app = app.route("/metrics", get(metrics_handler));
    }

    app.layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            http.request_timeout,
        ))
        .layer(build_cors_layer(http))
        .with_state(state)
}

/// Run the HTTP server until `shutdown` resolves
pub async fn run_http(
    config: &Config,
    store: Arc<MemoryStore>,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let addr = SocketAddr::new(config.http.host, config.http.port);

    emit_security_warnings(config.http.host, &config.http);

    let state = AppState::new(store, &config.auth);
    let app = router(state, &config.http);

    tracing::info!("HTTP server listening on {addr}");
    tracing::info!("GraphiQL available at http://{addr}/graphql");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|e| Error::Transport(format!("Failed to bind to {addr}: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| Error::Transport(format!("HTTP server error: {e}")))?;

    tracing::info!("HTTP server shutdown complete");
    Ok(())
}

fn build_cors_layer(config: &HttpConfig) -> CorsLayer {
    let origin = config
        .cors_origin
        .as_ref()
        .and_then(|o| o.parse::<HeaderValue>().ok())
        .unwrap_or_else(|| HeaderValue::from_static(DEFAULT_CORS_ORIGIN));

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}

fn emit_security_warnings(host: IpAddr, http_config: &HttpConfig) {
    let is_non_loopback = !host.is_loopback();
    let is_all_interfaces =
        host == IpAddr::V4(Ipv4Addr::UNSPECIFIED) || host == IpAddr::V6(Ipv6Addr::UNSPECIFIED);

    if is_all_interfaces {
        tracing::warn!(
            "HTTP server binding to all interfaces (0.0.0.0). \
             This exposes the server to all network interfaces."
        );
    } else if is_non_loopback {
        tracing::warn!(
            "HTTP server binding to non-loopback address ({host}). \
             Ensure network security policies are in place."
        );
    }

    if is_non_loopback {
        tracing::warn!(
            "Bearer tokens travel in clear text unless TLS is terminated in front of this server"
        );
    }

    if http_config.cors_origin.is_none() {
        tracing::info!(
            "CORS origin not configured (JOBBOARD_CORS_ORIGIN). \
             Using restrictive default: {DEFAULT_CORS_ORIGIN}"
        );
    }
}

async fn graphql_handler(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    request: GraphQLRequest,
) -> GraphQLResponse {
    #[cfg(feature = "metrics")]
    crate::observability::record_request("/graphql");

    state
        .schema
        .execute(request.into_inner().data(auth))
        .await
        .into()
}

async fn graphiql_handler() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

async fn login_handler(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> std::result::Result<Json<LoginResponse>, AuthError> {
    #[cfg(feature = "metrics")]
    crate::observability::record_request("/login");

    let result = authenticate(
        state.store.as_ref(),
        &state.codec,
        &body.email,
        &body.password,
    );

    #[cfg(feature = "metrics")]
    crate::observability::record_login(result.is_ok());

    Ok(Json(LoginResponse {
        token: result?.into_string(),
    }))
}

async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: STATUS_OK,
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(feature = "metrics")]
async fn metrics_handler() -> impl IntoResponse {
    (
        [(
            header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        crate::observability::render_metrics(),
    )
}
