// src/handlers/shell.rs

use axum::{
    extract::{Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    common::error::ApiError,
    config::AppState,
    console::{
        nav::{nav_items, ShellView},
        AuthGate, Toast,
    },
    middleware::auth::{request_token, ConsoleSession},
};

#[derive(Debug, Default, Deserialize)]
pub struct ShellQuery {
    #[serde(default)]
    pub path: String,
}

// GET /api/health
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Shell",
    responses((status = 200, description = "Servidor no ar", body = String))
)]
pub async fn health() -> &'static str {
    "OK"
}

// GET /console/session
#[utoipa::path(
    get,
    path = "/console/session",
    tag = "Shell",
    responses(
        (status = 200, description = "Estado do gate: authenticated (com o usuário) ou unauthenticated", body = AuthGate)
    )
)]
pub async fn session_gate(State(app_state): State<AppState>, headers: HeaderMap) -> impl IntoResponse {
    let Some(token) = request_token(&headers) else {
        return (StatusCode::OK, Json(AuthGate::Unauthenticated));
    };

    let workspace = app_state.sessions.workspace(&token).await;
    let gate = workspace.auth_gate().await;
    if !gate.is_authenticated() {
        app_state.sessions.remove(&token).await;
    }
    (StatusCode::OK, Json(gate))
}

// GET /console/shell
#[utoipa::path(
    get,
    path = "/console/shell",
    tag = "Shell",
    params(("path" = Option<String>, Query, description = "Caminho atual do front (define a seção ativa)")),
    responses(
        (status = 200, description = "Navegação e usuário logado", body = ShellView),
        (status = 401, description = "Não autenticado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn shell_view(session: ConsoleSession, Query(query): Query<ShellQuery>) -> impl IntoResponse {
    Json(ShellView {
        display_name: session.user.display_name(),
        email: session.user.email.clone(),
        sections: nav_items(&query.path),
    })
}

// GET /console/toasts
#[utoipa::path(
    get,
    path = "/console/toasts",
    tag = "Shell",
    responses(
        (status = 200, description = "Toasts pendentes (a fila é esvaziada)", body = Vec<Toast>),
        (status = 401, description = "Não autenticado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn drain_toasts(session: ConsoleSession) -> impl IntoResponse {
    Json(session.workspace.toaster().drain().await)
}
