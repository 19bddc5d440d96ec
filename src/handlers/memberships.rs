// src/handlers/memberships.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    console::{
        dialogs::{DeleteDialog, PreviewDialog},
        forms::MembershipForm,
        memberships::{memberships_view, MembershipFilters},
    },
    handlers::{find_record, today, ConfirmPayload},
    middleware::{auth::ConsoleSession, i18n::Locale},
    models::auth::Receipt,
    query::queries::MembershipsQuery,
};

// GET /console/memberships
#[utoipa::path(
    get,
    path = "/console/memberships",
    tag = "Memberships",
    params(
        ("search" = Option<String>, Query, description = "Busca por nome ou e-mail"),
        ("type" = Option<String>, Query, description = "Tipo de sócio ou \"all\""),
        ("card" = Option<String>, Query, description = "needs-card | no-card | all"),
        ("page" = Option<usize>, Query, description = "Página (começa em 1)")
    ),
    responses(
        (status = 200, description = "Tipos e página da tabela de sócios"),
        (status = 401, description = "Não autenticado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_memberships(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Query(filters): Query<MembershipFilters>,
) -> Result<impl IntoResponse, ApiError> {
    let members = session.workspace.queries().fetch::<MembershipsQuery>().await?;
    let empty = app_state.i18n_store.get(locale.as_str(), "table.memberships.empty");

    let view = memberships_view(&members.items, &filters, app_state.config.page_size, &empty);
    Ok((StatusCode::OK, Json(view)))
}

// POST /console/memberships
#[utoipa::path(
    post,
    path = "/console/memberships",
    tag = "Memberships",
    request_body = MembershipForm,
    responses(
        (status = 201, description = "Sócio cadastrado", body = Receipt),
        (status = 400, description = "Formulário inválido", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_membership(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Json(form): Json<MembershipForm>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = form
        .into_payload(today())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .create_membership(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

// GET /console/memberships/{id}
#[utoipa::path(
    get,
    path = "/console/memberships/{id}",
    tag = "Memberships",
    params(("id" = String, Path, description = "ID do sócio")),
    responses(
        (status = 200, description = "Sócio para o diálogo de visualização"),
        (status = 404, description = "Sócio não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_membership(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let members = session.workspace.queries().fetch::<MembershipsQuery>().await?;
    let member = find_record(&members.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(PreviewDialog::open(member)))
}

// GET /console/memberships/{id}/delete
#[utoipa::path(
    get,
    path = "/console/memberships/{id}/delete",
    tag = "Memberships",
    params(("id" = String, Path, description = "ID do sócio")),
    responses(
        (status = 200, description = "Texto do diálogo de confirmação"),
        (status = 404, description = "Sócio não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_membership_prompt(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let members = session.workspace.queries().fetch::<MembershipsQuery>().await?;
    let member = find_record(&members.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let dialog = DeleteDialog::open(member.id.clone(), member.name.clone());
    Ok(Json(dialog.view(&app_state.i18n_store, locale.as_str())))
}

// POST /console/memberships/{id}/delete
#[utoipa::path(
    post,
    path = "/console/memberships/{id}/delete",
    tag = "Memberships",
    params(("id" = String, Path, description = "ID do sócio")),
    request_body = ConfirmPayload,
    responses(
        (status = 200, description = "Sócio excluído", body = Receipt),
        (status = 400, description = "Exclusão não confirmada", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_membership(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(payload): Json<ConfirmPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if !payload.confirm {
        return Err(AppError::ConfirmationRequired.to_api_error(&locale, &app_state.i18n_store));
    }

    let members = session.workspace.queries().fetch::<MembershipsQuery>().await?;
    let member = find_record(&members.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    let confirmed = DeleteDialog::open(member.id.clone(), member.name.clone()).confirm();

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .delete_membership(&confirmed)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(receipt)))
}
