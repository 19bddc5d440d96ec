// src/middleware/auth.rs

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::CookieJar;

use crate::{
    api::AUTH_COOKIE,
    common::error::{ApiError, AppError},
    config::AppState,
    console::{AuthGate, Workspace},
    middleware::i18n::Locale,
    models::auth::AdminProfile,
};

/// Token do admin: cookie `admin_auth` primeiro, depois `Authorization: Bearer`.
pub fn request_token(headers: &HeaderMap) -> Option<String> {
    let jar = CookieJar::from_headers(headers);
    if let Some(cookie) = jar.get(AUTH_COOKIE) {
        let value = cookie.value().trim();
        if !value.is_empty() {
            return Some(value.to_string());
        }
    }

    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

// Sessão autenticada de uma requisição
#[derive(Clone)]
pub struct ConsoleSession {
    pub workspace: Arc<Workspace>,
    pub user: AdminProfile,
}

// O middleware em si
pub async fn console_guard(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let locale = request
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok())
        .map(Locale::from_header)
        .unwrap_or_default();
    let unauthenticated = || AppError::Unauthenticated.to_api_error(&locale, &app_state.i18n_store);

    let token = request_token(request.headers()).ok_or_else(unauthenticated)?;
    let workspace = app_state.sessions.workspace(&token).await;

    match workspace.auth_gate().await {
        AuthGate::Authenticated { user } => {
            // Insere a sessão nos "extensions" da requisição
            request.extensions_mut().insert(ConsoleSession { workspace, user });
            Ok(next.run(request).await)
        }
        _ => {
            tracing::debug!("token recusado pelo gate, descartando o workspace");
            app_state.sessions.remove(&token).await;
            Err(unauthenticated())
        }
    }
}

// Extrator para obter a sessão diretamente nos handlers
impl<S> FromRequestParts<S> for ConsoleSession
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<ConsoleSession>()
            .cloned()
            .ok_or(AppError::Unauthenticated)
    }
}
