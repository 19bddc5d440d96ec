// src/handlers/events.rs

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
        events::{events_view, EventFilters},
        forms::EventForm,
    },
    handlers::{find_record, today, ConfirmPayload},
    middleware::{auth::ConsoleSession, i18n::Locale},
    models::{auth::Receipt, event::Event},
    query::queries::EventsQuery,
};

// GET /console/events
#[utoipa::path(
    get,
    path = "/console/events",
    tag = "Events",
    params(
        ("search" = Option<String>, Query, description = "Busca por times ou local"),
        ("status" = Option<String>, Query, description = "all | upcoming | ongoing | completed"),
        ("page" = Option<usize>, Query, description = "Página (começa em 1)")
    ),
    responses(
        (status = 200, description = "Estatísticas e página da tabela de eventos"),
        (status = 401, description = "Não autenticado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_events(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Query(filters): Query<EventFilters>,
) -> Result<impl IntoResponse, ApiError> {
    let events = session.workspace.queries().fetch::<EventsQuery>().await?;
    let empty = app_state.i18n_store.get(locale.as_str(), "table.events.empty");

    let view = events_view(&events.items, &filters, today(), app_state.config.page_size, &empty);
    Ok((StatusCode::OK, Json(view)))
}

// POST /console/events
#[utoipa::path(
    post,
    path = "/console/events",
    tag = "Events",
    request_body = EventForm,
    responses(
        (status = 201, description = "Evento criado", body = Receipt),
        (status = 400, description = "Formulário inválido", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn create_event(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Json(form): Json<EventForm>,
) -> Result<impl IntoResponse, ApiError> {
    let payload = form
        .into_payload(today())
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .create_event(&payload)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::CREATED, Json(receipt)))
}

// GET /console/events/{id}
#[utoipa::path(
    get,
    path = "/console/events/{id}",
    tag = "Events",
    params(("id" = String, Path, description = "ID do evento")),
    responses(
        (status = 200, description = "Evento para o diálogo de visualização"),
        (status = 404, description = "Evento não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn preview_event(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let events = session.workspace.queries().fetch::<EventsQuery>().await?;
    let event = find_record(&events.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(PreviewDialog::open(event)))
}

// PUT /console/events/{id}
#[utoipa::path(
    put,
    path = "/console/events/{id}",
    tag = "Events",
    params(("id" = String, Path, description = "ID do evento")),
    request_body = Event,
    responses(
        (status = 200, description = "Evento atualizado", body = Receipt),
        (status = 404, description = "Evento não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn edit_event(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(edited): Json<Event>,
) -> Result<impl IntoResponse, ApiError> {
    let events = session.workspace.queries().fetch::<EventsQuery>().await?;
    let original = find_record(&events.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let mut dialog = EditDialog::open(original);
    dialog.replace_draft(edited);

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .edit_event(&dialog.submit())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(receipt)))
}

// GET /console/events/{id}/delete
#[utoipa::path(
    get,
    path = "/console/events/{id}/delete",
    tag = "Events",
    params(("id" = String, Path, description = "ID do evento")),
    responses(
        (status = 200, description = "Texto do diálogo de confirmação"),
        (status = 404, description = "Evento não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_event_prompt(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let events = session.workspace.queries().fetch::<EventsQuery>().await?;
    let event = find_record(&events.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let dialog = DeleteDialog::open(event.id.clone(), event.display_name());
    Ok(Json(dialog.view(&app_state.i18n_store, locale.as_str())))
}

// POST /console/events/{id}/delete
#[utoipa::path(
    post,
    path = "/console/events/{id}/delete",
    tag = "Events",
    params(("id" = String, Path, description = "ID do evento")),
    request_body = ConfirmPayload,
    responses(
        (status = 200, description = "Evento excluído", body = Receipt),
        (status = 400, description = "Exclusão não confirmada", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn delete_event(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(payload): Json<ConfirmPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if !payload.confirm {
        return Err(AppError::ConfirmationRequired.to_api_error(&locale, &app_state.i18n_store));
    }

    let events = session.workspace.queries().fetch::<EventsQuery>().await?;
    let event = find_record(&events.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;
    let confirmed = DeleteDialog::open(event.id.clone(), event.display_name()).confirm();

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .delete_event(&confirmed)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(receipt)))
}
