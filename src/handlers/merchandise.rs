// src/handlers/merchandise.rs

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
        dialogs::{DeleteDialog, EditDialog, PreviewDialog},
        forms::MerchandiseForm,
        merchandise::{merchandise_view, MerchandiseFilters},
    },
    handlers::{find_record, ConfirmPayload},
    middleware::{auth::ConsoleSession, i18n::Locale},
    models::{auth::Receipt, merchandise::Merchandise},
    query::queries::MerchandiseQuery,
};

// GET /console/merchandise
#[utoipa::path(
    get,
    path = "/console/merchandise",
    tag = "Merchandise",
    params(
        ("search" = Option<String>, Query, description = "Busca por nome ou descrição"),
        ("category" = Option<String>, Query, description = "Categoria ou \"all\""),
        ("page" = Option<usize>, Query, description = "Página (começa em 1)")
    ),
    responses(
        (status = 200, description = "Categorias e página da tabela de produtos"),
        (status = 401, description = "Não autenticado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_merchandise(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Query(filters): Query<MerchandiseFilters>,
) -> Result<impl IntoResponse, ApiError> {
    let items = session.workspace.queries().fetch::<MerchandiseQuery>().await?;
    let empty = app_state.i18n_store.get(locale.as_str(), "table.merchandise.empty");

    let view = merchandise_view(&items.items, &filters, app_state.config.page_size, &empty);
    Ok((StatusCode::OK, Json(view)))
}

// POST /console/merchandise
#[utoipa::path(
    post,
    path = "/console/merchandise",
    tag = "Merchandise",
    request_body = MerchandiseForm,
    responses(
        (status = 201, description = "Produto criado", body = Receipt),
        (status = 400, description = "Formulário inválido ou imagem fora da lista permitida", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_merchandise(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Json(form): Json<MerchandiseForm>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = form
        .into_payload(&app_state.images)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .create_merchandise(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

// GET /console/merchandise/{id}
#[utoipa::path(
    get,
    path = "/console/merchandise/{id}",
    tag = "Merchandise",
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Produto para o diálogo de visualização"),
        (status = 404, description = "Produto não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_merchandise(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let items = session.workspace.queries().fetch::<MerchandiseQuery>().await?;
    let item = find_record(&items.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(PreviewDialog::open(item)))
}

// PUT /console/merchandise/{id}
#[utoipa::path(
    put,
    path = "/console/merchandise/{id}",
    tag = "Merchandise",
    params(("id" = String, Path, description = "ID do produto")),
    request_body = Merchandise,
    responses(
        (status = 200, description = "Produto atualizado", body = Receipt),
        (status = 400, description = "Imagem fora da lista permitida", body = ApiError),
        (status = 404, description = "Produto não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn edit_merchandise(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(edited): Json<Merchandise>,
) -> Result<impl IntoResponse, ApiError> {
    if let Some(url) = edited.image_url.as_deref().filter(|u| !u.trim().is_empty()) {
        if !app_state.images.allows(url) {
            return Err(AppError::FormRejected("form.image_not_allowed").to_api_error(&locale, &app_state.i18n_store));
        }
    }

    let items = session.workspace.queries().fetch::<MerchandiseQuery>().await?;
    let original = find_record(&items.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let mut dialog = EditDialog::open(original);
    dialog.replace_draft(edited);

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .edit_merchandise(&dialog.submit())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(receipt)))
}

// GET /console/merchandise/{id}/delete
#[utoipa::path(
    get,
    path = "/console/merchandise/{id}/delete",
    tag = "Merchandise",
    params(("id" = String, Path, description = "ID do produto")),
    responses(
        (status = 200, description = "Texto do diálogo de confirmação"),
        (status = 404, description = "Produto não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_merchandise_prompt(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let items = session.workspace.queries().fetch::<MerchandiseQuery>().await?;
    let item = find_record(&items.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let dialog = DeleteDialog::open(item.id.clone(), item.name.clone());
    Ok(Json(dialog.view(&app_state.i18n_store, locale.as_str())))
}

// POST /console/merchandise/{id}/delete
#[utoipa::path(
    post,
    path = "/console/merchandise/{id}/delete",
    tag = "Merchandise",
    params(("id" = String, Path, description = "ID do produto")),
    request_body = ConfirmPayload,
    responses(
        (status = 200, description = "Produto excluído", body = Receipt),
        (status = 400, description = "Exclusão não confirmada", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_merchandise(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(payload): Json<ConfirmPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if !payload.confirm {
        return Err(AppError::ConfirmationRequired.to_api_error(&locale, &app_state.i18n_store));
    }

    let items = session.workspace.queries().fetch::<MerchandiseQuery>().await?;
    let item = find_record(&items.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    let confirmed = DeleteDialog::open(item.id.clone(), item.name.clone()).confirm();

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .delete_merchandise(&confirmed)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(receipt)))
}
