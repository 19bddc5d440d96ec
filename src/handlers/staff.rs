// src/handlers/staff.rs

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::ApiError,
    config::AppState,
    console::{
        forms::StaffForm,
        staff::{staff_view, StaffFilters},
    },
    middleware::{auth::ConsoleSession, i18n::Locale},
    models::auth::Receipt,
    query::queries::StaffQuery,
};

// GET /console/staff
#[utoipa::path(
    get,
    path = "/console/staff",
    tag = "Staff",
    params(
        ("search" = Option<String>, Query, description = "Busca por nome, e-mail ou telefone"),
        ("page" = Option<usize>, Query, description = "Página (começa em 1)")
    ),
    responses(
        (status = 200, description = "Página da tabela de funcionários"),
        (status = 401, description = "Não autenticado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Query(filters): Query<StaffFilters>,
) -> Result<impl IntoResponse, ApiError> {
    let staff = session.workspace.queries().fetch::<StaffQuery>().await?;
    let empty = app_state.i18n_store.get(locale.as_str(), "table.staff.empty");

    let page = staff_view(&staff.items, &filters, app_state.config.page_size, &empty);
    Ok((StatusCode::OK, Json(page)))
}

// POST /console/staff
#[utoipa::path(
    post,
    path = "/console/staff",
    tag = "Staff",
    request_body = StaffForm,
    responses(
        (status = 201, description = "Conta de funcionário criada", body = Receipt),
        (status = 400, description = "Formulário inválido", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn sign_up_staff(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Json(form): Json<StaffForm>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = form
        .into_payload()
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .sign_up_staff(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(receipt)))
}
