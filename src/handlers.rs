// src/handlers.rs
//
// Shell HTTP: cada handler pega a sessão, chama o núcleo do console e devolve
// o view model em JSON (ou o arquivo exportado).

pub mod auth;
pub mod documents;
pub mod events;
pub mod memberships;
pub mod merchandise;
pub mod orders;
pub mod shell;
pub mod staff;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{common::error::AppError, console::TableRecord};

// Corpo do POST de confirmação (exclusão, atualização de status)
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ConfirmPayload {
    #[serde(default)]
    pub confirm: bool,
}

pub(crate) fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Registro do cache pelo id; 404 quando não está na lista.
pub(crate) fn find_record<'a, T: TableRecord>(records: &'a [T], id: &str) -> Result<&'a T, AppError> {
    records
        .iter()
        .find(|record| record.record_id() == id)
        .ok_or_else(|| AppError::RecordNotFound(id.to_string()))
}
