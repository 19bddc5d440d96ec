// src/handlers/auth.rs

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    CookieJar,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    api::{AuthApi, AUTH_COOKIE},
    common::error::{ApiError, AppError},
    config::AppState,
    console::{
        forms::{AdminSignUpForm, SignInEmailForm},
        sign_in::{SignInFlow, SignInView},
        toast::Toast,
    },
    middleware::{auth::request_token, i18n::Locale},
    models::auth::{AuthResponse, AuthUser, PasswordSignIn, VerifyCodeRequest},
};

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignUpResult {
    pub message: Option<String>,
    pub toasts: Vec<Toast>,
}

// Guarda o token no cookie e abre o workspace da sessão com o toast de boas-vindas
async fn open_session(
    app_state: &AppState,
    locale: &Locale,
    jar: CookieJar,
    response: AuthResponse,
) -> Result<CookieJar, ApiError> {
    let token = response
        .token
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::Unauthenticated.to_api_error(locale, &app_state.i18n_store))?;

    let workspace = app_state.sessions.workspace(&token).await;
    let i18n = &app_state.i18n_store;
    workspace
        .toaster()
        .success(i18n.get(locale.as_str(), "toast.signed_in"), i18n.get(locale.as_str(), "toast.welcome"))
        .await;

    let cookie = Cookie::build((AUTH_COOKIE, token))
        .path("/")
        .http_only(true)
        .secure(app_state.config.cookie_secure)
        .same_site(SameSite::Lax);
    Ok(jar.add(cookie))
}

// POST /console/auth/sign-in
#[utoipa::path(
    post,
    path = "/console/auth/sign-in",
    tag = "Auth",
    request_body = SignInEmailForm,
    responses(
        (status = 200, description = "Código enviado; tela do código", body = SignInView),
        (status = 400, description = "E-mail inválido", body = ApiError)
    )
)]
pub async fn send_code(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(form): Json<SignInEmailForm>,
) -> Result<impl IntoResponse, ApiError> {
    let anonymous = app_state.sessions.anonymous();
    let mut flow = SignInFlow::new();

    flow.submit_email(anonymous.api().as_ref(), &form.email)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(flow.view(&app_state.i18n_store, locale.as_str()))))
}

// POST /console/auth/verify
#[utoipa::path(
    post,
    path = "/console/auth/verify",
    tag = "Auth",
    request_body = VerifyCodeRequest,
    responses(
        (status = 200, description = "Login concluído; cookie admin_auth definido", body = SignInView),
        (status = 400, description = "Código incompleto ou recusado", body = ApiError)
    )
)]
pub async fn verify_code(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    Json(payload): Json<VerifyCodeRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let anonymous = app_state.sessions.anonymous();

    // O passo do e-mail já aconteceu em outra requisição
    let mut flow = SignInFlow::at_code(payload.email.trim());
    flow.code_input_mut().paste(&payload.code);

    let response = flow
        .submit_code(anonymous.api().as_ref())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let jar = open_session(&app_state, &locale, jar, response).await?;
    Ok((jar, Json(flow.view(&app_state.i18n_store, locale.as_str()))))
}

// POST /console/auth/password
#[utoipa::path(
    post,
    path = "/console/auth/password",
    tag = "Auth",
    request_body = PasswordSignIn,
    responses(
        (status = 200, description = "Login por senha; cookie admin_auth definido", body = AuthUser),
        (status = 401, description = "Credenciais inválidas", body = ApiError)
    )
)]
pub async fn password_sign_in(
    State(app_state): State<AppState>,
    locale: Locale,
    jar: CookieJar,
    Json(credentials): Json<PasswordSignIn>,
) -> Result<impl IntoResponse, ApiError> {
    let anonymous = app_state.sessions.anonymous();
    let response = anonymous.api().sign_in_admin(&credentials).await?;

    tracing::info!(email = %credentials.email, "login por senha concluído");
    let user = response.user.clone();
    let jar = open_session(&app_state, &locale, jar, response).await?;
    Ok((jar, Json(user)))
}

// POST /console/auth/sign-up
#[utoipa::path(
    post,
    path = "/console/auth/sign-up",
    tag = "Auth",
    request_body = AdminSignUpForm,
    responses(
        (status = 201, description = "Conta de administrador criada", body = SignUpResult),
        (status = 400, description = "Formulário inválido", body = ApiError)
    )
)]
pub async fn sign_up_admin(
    State(app_state): State<AppState>,
    locale: Locale,
    Json(form): Json<AdminSignUpForm>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = form
        .into_payload()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let anonymous = app_state.sessions.anonymous();
    let response = anonymous
        .mutations(&app_state.i18n_store, locale.as_str())
        .sign_up_admin(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    // O workspace anônimo morre aqui; os toasts vão na resposta
    let result = SignUpResult {
        message: response.message,
        toasts: anonymous.toaster().drain().await,
    };
    Ok((StatusCode::CREATED, Json(result)))
}

// POST /console/auth/sign-out
#[utoipa::path(
    post,
    path = "/console/auth/sign-out",
    tag = "Auth",
    responses(
        (status = 204, description = "Sessão encerrada e cookie removido")
    )
)]
pub async fn sign_out(
    State(app_state): State<AppState>,
    headers: HeaderMap,
    jar: CookieJar,
) -> impl IntoResponse {
    if let Some(token) = request_token(&headers) {
        app_state.sessions.sign_out(&token).await;
    }

    let jar = jar.remove(Cookie::build(AUTH_COOKIE).path("/"));
    (jar, StatusCode::NO_CONTENT)
}
