use crate::config::Config;
use crate::protocol::{ErrorResponse, SessionMode, SessionTokenRequest, StartSessionResponse};
use crate::upstream::{UpstreamClient, UpstreamReply};
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::Json;
use serde_json::{json, Value};
use std::error::Error;
use std::sync::Arc;
use tower_http::cors::CorsLayer;

/// Returned to the browser whenever the upstream gives us nothing usable.
const TOKEN_FAILURE_MESSAGE: &str = "Failed to retrieve session token";

type ServerResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

struct ServerState {
    config: Config,
    upstream: UpstreamClient,
}

pub async fn run(config: Config) -> ServerResult<()> {
    let listen = config.listen.clone();
    let app = router(config);

    let listener = tokio::net::TcpListener::bind(&listen).await?;
    tracing::info!("live-avatar-demo listening on http://{listen}");
    axum::serve(listener, app).await?;

    Ok(())
}

pub fn router(config: Config) -> axum::Router {
    let upstream = UpstreamClient::new(&config.api_url, config.api_key.clone());
    let state = Arc::new(ServerState { config, upstream });

    axum::Router::new()
        .route("/api/start-session", post(start_session))
        .route("/api/start-custom-session", post(start_custom_session))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

async fn start_session(State(state): State<Arc<ServerState>>) -> TokenResponse {
    mint_session_token(&state, SessionMode::Full).await
}

async fn start_custom_session(State(state): State<Arc<ServerState>>) -> TokenResponse {
    mint_session_token(&state, SessionMode::Custom).await
}

/// Outcome of one minting attempt, already shaped for the browser: either
/// the token pair with a 200, or `{ "error": ... }` with the failure status.
#[derive(Debug)]
enum TokenResponse {
    Issued {
        session_token: String,
        session_id: String,
    },
    Failed {
        status: StatusCode,
        error: String,
    },
}

impl TokenResponse {
    fn failed(status: StatusCode, error: impl Into<String>) -> Self {
        Self::Failed {
            status,
            error: error.into(),
        }
    }
}

impl IntoResponse for TokenResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Issued {
                session_token,
                session_id,
            } => Json(StartSessionResponse {
                session_token,
                session_id,
            })
            .into_response(),
            Self::Failed { status, error } => {
                (status, Json(ErrorResponse { error })).into_response()
            }
        }
    }
}

async fn mint_session_token(state: &ServerState, mode: SessionMode) -> TokenResponse {
    let request = SessionTokenRequest::from_config(&state.config, mode);

    let reply = match state.upstream.mint_token(&request).await {
        Ok(reply) => reply,
        Err(err) => {
            tracing::error!("error retrieving session token: {err}");
            return TokenResponse::failed(StatusCode::INTERNAL_SERVER_ERROR, err.to_string());
        }
    };

    if !reply.status.is_success() {
        tracing::error!("upstream error: status={}, body={}", reply.status, reply.body);
    } else if mode == SessionMode::Custom {
        tracing::info!("upstream session response: {}", reply.body);
    }

    normalize_reply(&reply)
}

/// Maps a raw upstream reply onto the browser-facing contract. Pure: a
/// given status and body always produce the same response.
fn normalize_reply(reply: &UpstreamReply) -> TokenResponse {
    if !reply.status.is_success() {
        return TokenResponse::failed(reply.status, extract_error_message(&reply.body));
    }

    let body: Value = match serde_json::from_str(&reply.body) {
        Ok(body) => body,
        Err(err) => {
            return TokenResponse::failed(StatusCode::INTERNAL_SERVER_ERROR, err.to_string())
        }
    };

    let session_token = body
        .get("data")
        .and_then(|data| data.get("session_token"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let session_id = body
        .get("data")
        .and_then(|data| data.get("session_id"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();

    // A 2xx reply can still come back without a token; treat that as a
    // failure rather than handing the browser an empty credential.
    if session_token.is_empty() {
        return TokenResponse::failed(StatusCode::INTERNAL_SERVER_ERROR, TOKEN_FAILURE_MESSAGE);
    }

    TokenResponse::Issued {
        session_token,
        session_id,
    }
}

/// The upstream reports failures in several undocumented shapes. Try each
/// known message location in priority order, first match wins; a non-JSON
/// body is used verbatim, and an empty one falls back to the fixed message.
fn extract_error_message(raw: &str) -> String {
    let Ok(body) = serde_json::from_str::<Value>(raw) else {
        return if raw.is_empty() {
            TOKEN_FAILURE_MESSAGE.to_string()
        } else {
            raw.to_string()
        };
    };

    const EXTRACTORS: &[fn(&Value) -> Option<&str>] = &[
        |v| v.get("data")?.as_array()?.first()?.get("message")?.as_str(),
        |v| v.get("data")?.get("message")?.as_str(),
        |v| v.get("message")?.as_str(),
        |v| v.get("error")?.as_str(),
    ];

    EXTRACTORS
        .iter()
        .find_map(|extract| extract(&body))
        .unwrap_or(TOKEN_FAILURE_MESSAGE)
        .to_string()
}
