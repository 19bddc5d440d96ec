// src/handlers/documents.rs

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::{
    common::error::ApiError,
    config::AppState,
    handlers::find_record,
    middleware::{auth::ConsoleSession, i18n::Locale},
    query::queries::{MembershipsQuery, OrdersQuery},
    services::{
        card_service::card_file_name,
        document_service::{order_export_file_name, order_print_file_name},
        nfc::NfcOutcome,
        CardSide,
    },
};

#[derive(Debug, Default, Deserialize)]
pub struct CardQuery {
    #[serde(default)]
    pub side: CardSide,
}

// Nome do arquivo no Content-Disposition (só ASCII visível, sem aspas)
fn attachment(file_name: &str) -> String {
    let safe: String = file_name
        .chars()
        .map(|c| if c.is_ascii_graphic() || c == ' ' { c } else { '_' })
        .map(|c| if c == '"' || c == '\\' { '_' } else { c })
        .collect();
    format!("attachment; filename=\"{}\"", safe)
}

// Configura os Headers para o navegador baixar o arquivo
fn download(content_type: &'static str, file_name: &str, bytes: Vec<u8>) -> Response {
    let headers = [
        (header::CONTENT_TYPE, content_type.to_string()),
        (header::CONTENT_DISPOSITION, attachment(file_name)),
    ];
    (StatusCode::OK, headers, bytes).into_response()
}

// GET /console/memberships/{id}/card.png
#[utoipa::path(
    get,
    path = "/console/memberships/{id}/card.png",
    tag = "Documents",
    params(
        ("id" = String, Path, description = "ID do sócio"),
        ("side" = Option<CardSide>, Query, description = "membership (padrão) ou wallet")
    ),
    responses(
        (status = 200, description = "Cartão em PNG", content_type = "image/png"),
        (status = 404, description = "Sócio não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn membership_card_png(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Query(query): Query<CardQuery>,
) -> Result<Response, ApiError> {
    let members = session.workspace.queries().fetch::<MembershipsQuery>().await?;
    let member = find_record(&members.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let png = app_state
        .card_service
        .render_png(member, query.side)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(download("image/png", &card_file_name(member, query.side), png))
}

// GET /console/memberships/{id}/card.pdf
#[utoipa::path(
    get,
    path = "/console/memberships/{id}/card.pdf",
    tag = "Documents",
    params(
        ("id" = String, Path, description = "ID do sócio"),
        ("side" = Option<CardSide>, Query, description = "membership (padrão) ou wallet")
    ),
    responses(
        (status = 200, description = "Cartão para impressão", content_type = "application/pdf"),
        (status = 404, description = "Sócio não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn membership_card_pdf(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
    Query(query): Query<CardQuery>,
) -> Result<Response, ApiError> {
    let members = session.workspace.queries().fetch::<MembershipsQuery>().await?;
    let member = find_record(&members.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let pdf = app_state
        .card_service
        .render_pdf(member, query.side)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let file_name = card_file_name(member, query.side).replace(".png", ".pdf");
    Ok(download("application/pdf", &file_name, pdf))
}

// POST /console/memberships/{id}/nfc
#[utoipa::path(
    post,
    path = "/console/memberships/{id}/nfc",
    tag = "Documents",
    params(("id" = String, Path, description = "ID do sócio")),
    responses(
        (status = 200, description = "Token gravado e tag travada", body = NfcOutcome),
        (status = 422, description = "NFC indisponível ou token inválido", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn write_membership_nfc(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let members = session.workspace.queries().fetch::<MembershipsQuery>().await?;
    let member = find_record(&members.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let outcome = app_state
        .nfc_service
        .write_member_token(member, &app_state.i18n_store, locale.as_str())
        .await
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(Json(outcome))
}

// GET /console/orders/{id}/export
#[utoipa::path(
    get,
    path = "/console/orders/{id}/export",
    tag = "Documents",
    params(("id" = String, Path, description = "ID do pedido (_id)")),
    responses(
        (status = 200, description = "Pedido em JSON para download", content_type = "application/json"),
        (status = 404, description = "Pedido não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn export_order(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let orders = session.workspace.queries().fetch::<OrdersQuery>().await?;
    let order = find_record(&orders.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let json = app_state
        .document_service
        .export_order_json(order)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(download("application/json", &order_export_file_name(order), json))
}

// GET /console/orders/{id}/print
#[utoipa::path(
    get,
    path = "/console/orders/{id}/print",
    tag = "Documents",
    params(("id" = String, Path, description = "ID do pedido (_id)")),
    responses(
        (status = 200, description = "Pedido em PDF para impressão", content_type = "application/pdf"),
        (status = 404, description = "Pedido não encontrado", body = ApiError)
    ),
    security(("api_jwt" = []))
)]
pub async fn print_order(
    State(app_state): State<AppState>,
    locale: Locale,
    session: ConsoleSession,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let orders = session.workspace.queries().fetch::<OrdersQuery>().await?;
    let order = find_record(&orders.items, &id).map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    let pdf = app_state
        .document_service
        .generate_order_pdf(order)
        .map_err(|e| e.to_api_error(&locale, &app_state.i18n_store))?;

    Ok(download("application/pdf", &order_print_file_name(order), pdf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn attachment_names_are_header_safe() {
        assert_eq!(attachment("Jane Wanjiku-membership-card.png"), "attachment; filename=\"Jane Wanjiku-membership-card.png\"");
        assert_eq!(attachment("Zoë \"Z\"-wallet-card.png"), "attachment; filename=\"Zo_ _Z_-wallet-card.png\"");
    }
}
