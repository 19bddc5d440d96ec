// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use utoipa::ToSchema;

use crate::common::i18n::I18nStore;
use crate::middleware::i18n::Locale;

// Status usado quando a API remota não responde (rede fora, timeout...)
pub const NO_RESPONSE_STATUS: u16 = 503;

// ---
// ApiError: o formato normalizado {message, statusCode, details}
// ---
// É o que sai nos toasts e o que o shell HTTP devolve para o front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[schema(example = "Failed to create event")]
    pub message: String,

    #[schema(example = 400)]
    pub status_code: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,

    // Nenhuma resposta chegou (rede, timeout). Um 503 devolvido pela API não conta.
    #[serde(skip)]
    pub transport: bool,
}

impl ApiError {
    pub fn new(status_code: u16, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: Some(status_code),
            details: None,
            transport: false,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    /// Falha de transporte: nenhuma resposta chegou do servidor.
    pub fn no_response() -> Self {
        Self {
            transport: true,
            ..Self::new(NO_RESPONSE_STATUS, "No response received from server")
        }
    }

    /// Normaliza uma resposta não-2xx da API remota.
    ///
    /// A mensagem vem do campo `message` do corpo (quando existe), senão do
    /// `fallback` da operação. `details` vem do campo `details`, ou do corpo
    /// inteiro quando ele não é um objeto com `message`.
    pub fn from_rejection(status: u16, body: Option<Value>, fallback: &str) -> Self {
        let message = body
            .as_ref()
            .and_then(|b| b.get("message"))
            .and_then(Value::as_str)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or(fallback)
            .to_string();

        let details = match &body {
            Some(b) if b.get("details").is_some() => b.get("details").cloned(),
            Some(Value::Object(map)) if map.contains_key("message") && map.len() == 1 => None,
            Some(Value::Null) | None => None,
            Some(other) => Some(other.clone()),
        };

        Self {
            message,
            status_code: Some(status),
            details,
            transport: false,
        }
    }

    pub fn is_transport(&self) -> bool {
        self.transport
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self.status_code, Some(401) | Some(403))
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.status_code {
            Some(code) => write!(f, "{} ({})", self.message, code),
            None => write!(f, "{}", self.message),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self
            .status_code
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

// ---
// AppError: erros internos do console
// ---
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // Regras de formulário checadas antes de chamar a API (chave do I18nStore)
    #[error("Formulário rejeitado: {0}")]
    FormRejected(&'static str),

    #[error("Sessão não autenticada")]
    Unauthenticated,

    #[error("Registro não encontrado: {0}")]
    RecordNotFound(String),

    #[error("Ação exige confirmação")]
    ConfirmationRequired,

    #[error("Ação indisponível para este registro: {0}")]
    ActionUnavailable(&'static str),

    #[error("Passo de login inválido")]
    InvalidSignInStep,

    // A API remota recusou (ou não respondeu). Vai para o usuário sem tradução.
    #[error("API remota: {0}")]
    Remote(#[from] ApiError),

    #[error("Fonte não encontrada: {0}")]
    FontNotFound(String),

    #[error("Falha ao exportar: {0}")]
    Export(String),

    #[error("NFC: {0}")]
    Nfc(String),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    /// Converte para o formato público, traduzindo as mensagens do próprio console.
    pub fn to_api_error(&self, locale: &Locale, i18n: &I18nStore) -> ApiError {
        let lang = locale.0.as_str();
        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .map(|e| match &e.message {
                            Some(m) => i18n.get(lang, m),
                            None => e.code.to_string(),
                        })
                        .collect();
                    details.insert(field.to_string(), json!(messages));
                }
                ApiError::new(400, i18n.get(lang, "validation.failed"))
                    .with_details(Value::Object(details))
            }
            AppError::FormRejected(key) => ApiError::new(400, i18n.get(lang, key)),
            AppError::Unauthenticated => ApiError::new(401, i18n.get(lang, "auth.unauthenticated")),
            AppError::RecordNotFound(id) => ApiError::new(404, i18n.get(lang, "record.not_found"))
                .with_details(json!({ "id": id })),
            AppError::ConfirmationRequired => {
                ApiError::new(400, i18n.get(lang, "dialog.confirmation_required"))
            }
            AppError::ActionUnavailable(key) => ApiError::new(409, i18n.get(lang, key)),
            AppError::InvalidSignInStep => ApiError::new(409, i18n.get(lang, "signin.wrong_step")),
            AppError::Remote(api_error) => api_error.clone(),
            AppError::Nfc(reason) => ApiError::new(422, i18n.format(lang, "nfc.failed", &[("reason", reason)])),
            // Todos os outros erros viram 500.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                ApiError::new(500, i18n.get(lang, "internal"))
            }
        }
    }
}

// Usado onde não há Locale (middleware): mensagens em inglês.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.to_api_error(&Locale::default(), &I18nStore::default())
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_prefers_body_message_and_keeps_details() {
        let body = json!({ "message": "Ticket price is required", "details": { "field": "ticketPrice" } });
        let err = ApiError::from_rejection(422, Some(body), "Failed to create event");

        assert_eq!(err.message, "Ticket price is required");
        assert_eq!(err.status_code, Some(422));
        assert_eq!(err.details, Some(json!({ "field": "ticketPrice" })));
    }

    #[test]
    fn rejection_without_message_uses_fallback_and_whole_body_as_details() {
        let body = json!({ "error": "boom" });
        let err = ApiError::from_rejection(500, Some(body.clone()), "Error updating the event.");

        assert_eq!(err.message, "Error updating the event.");
        assert_eq!(err.details, Some(body));
    }

    #[test]
    fn rejection_with_only_message_has_no_details() {
        let err = ApiError::from_rejection(404, Some(json!({ "message": "Not found" })), "x");
        assert_eq!(err.details, None);
    }

    #[test]
    fn no_response_is_transport_failure() {
        let err = ApiError::no_response();
        assert!(err.is_transport());
        assert_eq!(err.status_code, Some(503));
    }

    #[test]
    fn backend_503_is_a_rejection_not_a_transport_failure() {
        let rejected = ApiError::from_rejection(503, Some(json!({ "message": "Maintenance" })), "x");
        assert!(!rejected.is_transport());
        assert_eq!(rejected.message, "Maintenance");
        assert!(!ApiError::new(503, "Service Unavailable").is_transport());

        // A marca não vai para o JSON nem volta dele
        let wire = serde_json::to_value(ApiError::no_response()).unwrap();
        assert!(wire.get("transport").is_none());
        let back: ApiError = serde_json::from_value(wire).unwrap();
        assert!(!back.is_transport());
    }

    #[test]
    fn remote_errors_pass_through_verbatim() {
        let remote = ApiError::new(409, "Event already exists");
        let app = AppError::Remote(remote.clone());
        let out = app.to_api_error(&Locale("pt".into()), &I18nStore::default());
        assert_eq!(out, remote);
    }

    #[test]
    fn form_rejections_are_translated() {
        let app = AppError::FormRejected("event.tickets_positive");
        let en = app.to_api_error(&Locale("en".into()), &I18nStore::default());
        let pt = app.to_api_error(&Locale("pt".into()), &I18nStore::default());

        assert_eq!(en.message, "Available tickets must be greater than 0");
        assert_eq!(pt.message, "A quantidade de ingressos deve ser maior que 0");
        assert_eq!(en.status_code, Some(400));
    }
}
