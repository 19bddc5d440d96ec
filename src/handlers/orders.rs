// src/handlers/orders.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use crate::{
    common::error::{ApiError, AppError},
    config::AppState,
    console::orders::{orders_view, status_dialog, OrderDetails, OrderFilters},
    handlers::{find_record, today, ConfirmPayload},
    middleware::{auth::ConsoleSession, i18n::Locale},
    models::auth::Receipt,
    query::queries::OrdersQuery,
};

// GET /console/orders
#[utoipa::path(
    get,
    path = "/console/orders",
    tag = "Orders",
    params(
        ("search" = Option<String>, Query, description = "Busca por cliente ou número do pedido"),
        ("tab" = Option<String>, Query, description = "All | Pending | Unfulfilled | Completed"),
        ("page" = Option<usize>, Query, description = "Página (começa em 1)")
    ),
    responses(
        (status = 200, description = "Resumo, abas e página da tabela de pedidos"),
        (status = 401, description = "Não autenticado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_orders(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Query(filters): Query<OrderFilters>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = session.workspace.queries().fetch::<OrdersQuery>().await?;
    let empty = app_state.i18n_store.get(locale.as_str(), "table.orders.empty");

    let view = orders_view(&orders.items, &filters, today(), app_state.config.page_size, &empty);
    Ok((StatusCode::OK, Json(view)))
}

// GET /console/orders/{id}
#[utoipa::path(
    get,
    path = "/console/orders/{id}",
    tag = "Orders",
    params(("id" = String, Path, description = "ID do pedido (_id)")),
    responses(
        (status = 200, description = "Detalhes do pedido com os itens"),
        (status = 404, description = "Pedido não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn order_details(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = session.workspace.queries().fetch::<OrdersQuery>().await?;
    let order = find_record(&orders.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(OrderDetails::from_order(order)))
}

// GET /console/orders/{id}/status
#[utoipa::path(
    get,
    path = "/console/orders/{id}/status",
    tag = "Orders",
    params(("id" = String, Path, description = "ID do pedido (_id)")),
    responses(
        (status = 200, description = "Texto do diálogo de atualização de status"),
        (status = 409, description = "Pedido não está Unfulfilled", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn order_status_prompt(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let orders = session.workspace.queries().fetch::<OrdersQuery>().await?;
    let dialog = find_record(&orders.items, &id)
        .and_then(status_dialog)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(dialog.view(&app_state.i18n_store, locale.as_str())))
}

// POST /console/orders/{id}/status
#[utoipa::path(
    post,
    path = "/console/orders/{id}/status",
    tag = "Orders",
    params(("id" = String, Path, description = "ID do pedido (_id)")),
    request_body = ConfirmPayload,
    responses(
        (status = 200, description = "Status atualizado", body = Receipt),
        (status = 400, description = "Atualização não confirmada", body = ApiError),
        (status = 409, description = "Pedido não está Unfulfilled", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn update_order_status(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Json(payload): Json<ConfirmPayload>,
) -> Result<impl IntoResponse, ApiError> {
    if !payload.confirm {
        return Err(AppError::ConfirmationRequired.to_api_error(&locale, &app_state.i18n_store));
    }

    let orders = session.workspace.queries().fetch::<OrdersQuery>().await?;
    let confirmed = find_record(&orders.items, &id)
        .and_then(status_dialog)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?
        .confirm();

    let receipt = session
        .workspace
        .mutations(&app_state.i18n_store, locale.as_str())
        .update_order_status(&confirmed)
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok((StatusCode::OK, Json(receipt)))
}
