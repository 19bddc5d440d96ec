// src/console/mutations.rs
//
// Cada mutação: chama a API, publica um toast e invalida a chave do recurso.
// Sem retry e sem update otimista; falha não mexe no cache.

use std::future::Future;

use crate::{
    api::{AuthApi, EventsApi, MembershipsApi, MerchandiseApi, OrdersApi, StaffApi},
    common::{
        error::{ApiError, AppError},
        i18n::I18nStore,
    },
    console::{
        dialogs::{DeleteSubmission, EditSubmission, StatusSubmission},
        toast::Toaster,
    },
    models::{
        auth::{AdminSignUp, AuthResponse, Receipt},
        event::{Event, NewEvent},
        membership::NewMembership,
        merchandise::{Merchandise, NewMerchandise},
        staff::StaffSignUp,
    },
    query::{QueryClient, QueryKey},
};

/// Resposta de mutação que pode trazer uma mensagem do servidor.
pub trait ServerMessage {
    fn server_message(&self) -> Option<&str>;
}

impl ServerMessage for Receipt {
    fn server_message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl ServerMessage for AuthResponse {
    fn server_message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

// Como cada mutação se apresenta ao usuário
struct Outcome {
    action: &'static str,
    key: Option<QueryKey>,
    title_key: &'static str,
    message_key: &'static str,
    // Criações mostram a mensagem do servidor quando ela vem
    server_message_first: bool,
}

pub struct MutationBinding<'a> {
    queries: &'a QueryClient,
    toaster: &'a Toaster,
    i18n: &'a I18nStore,
    lang: &'a str,
}

impl<'a> MutationBinding<'a> {
    pub fn new(queries: &'a QueryClient, toaster: &'a Toaster, i18n: &'a I18nStore, lang: &'a str) -> Self {
        Self { queries, toaster, i18n, lang }
    }

    async fn settle<T, F>(&self, outcome: Outcome, call: F) -> Result<T, AppError>
    where
        T: ServerMessage,
        F: Future<Output = Result<T, ApiError>>,
    {
        match call.await {
            Ok(response) => {
                let description = match response.server_message() {
                    Some(message) if outcome.server_message_first && !message.trim().is_empty() => {
                        message.to_string()
                    }
                    _ => self.i18n.get(self.lang, outcome.message_key),
                };
                self.toaster
                    .success(self.i18n.get(self.lang, outcome.title_key), description)
                    .await;

                match outcome.key {
                    Some(key) => {
                        let refetched = self.queries.invalidate(key).await;
                        tracing::info!(action = outcome.action, key = key.as_str(), refetched, "mutação concluída");
                    }
                    None => tracing::info!(action = outcome.action, "mutação concluída"),
                }
                Ok(response)
            }
            Err(err) => {
                tracing::error!(action = outcome.action, "mutação falhou: {}", err);
                self.toaster
                    .error(self.i18n.get(self.lang, "toast.error"), err.message.clone())
                    .await;
                Err(AppError::Remote(err))
            }
        }
    }

    // --- Eventos ---

    pub async fn create_event(&self, payload: &NewEvent) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "create_event",
            key: Some(QueryKey::AllEvents),
            title_key: "toast.created",
            message_key: "event.created",
            server_message_first: true,
        };
        self.settle(outcome, self.queries.api().create_event(payload)).await
    }

    pub async fn edit_event(&self, submission: &EditSubmission<Event>) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "edit_event",
            key: Some(QueryKey::AllEvents),
            title_key: "toast.updated",
            message_key: "event.updated",
            server_message_first: false,
        };
        let api = self.queries.api();
        self.settle(outcome, api.edit_event(&submission.item_id, &submission.updated_item))
            .await
    }

    pub async fn delete_event(&self, confirmed: &DeleteSubmission) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "delete_event",
            key: Some(QueryKey::AllEvents),
            title_key: "toast.deleted",
            message_key: "event.deleted",
            server_message_first: false,
        };
        self.settle(outcome, self.queries.api().delete_event(confirmed.item_id()))
            .await
    }

    // --- Produtos ---

    pub async fn create_merchandise(&self, payload: &NewMerchandise) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "create_merchandise",
            key: Some(QueryKey::AllMerchandise),
            title_key: "toast.created",
            message_key: "merchandise.created",
            server_message_first: true,
        };
        self.settle(outcome, self.queries.api().create_merchandise(payload))
            .await
    }

    pub async fn edit_merchandise(&self, submission: &EditSubmission<Merchandise>) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "edit_merchandise",
            key: Some(QueryKey::AllMerchandise),
            title_key: "toast.updated",
            message_key: "merchandise.updated",
            server_message_first: false,
        };
        let api = self.queries.api();
        self.settle(outcome, api.edit_merchandise(&submission.item_id, &submission.updated_item))
            .await
    }

    pub async fn delete_merchandise(&self, confirmed: &DeleteSubmission) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "delete_merchandise",
            key: Some(QueryKey::AllMerchandise),
            title_key: "toast.deleted",
            message_key: "merchandise.deleted",
            server_message_first: false,
        };
        self.settle(outcome, self.queries.api().delete_merchandise(confirmed.item_id()))
            .await
    }

    // --- Sócios ---

    pub async fn create_membership(&self, payload: &NewMembership) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "create_membership",
            key: Some(QueryKey::AllMemberships),
            title_key: "toast.created",
            message_key: "membership.created",
            server_message_first: true,
        };
        self.settle(outcome, self.queries.api().create_membership(payload))
            .await
    }

    pub async fn delete_membership(&self, confirmed: &DeleteSubmission) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "delete_membership",
            key: Some(QueryKey::AllMemberships),
            title_key: "toast.deleted",
            message_key: "membership.deleted",
            server_message_first: false,
        };
        self.settle(outcome, self.queries.api().delete_membership(confirmed.item_id()))
            .await
    }

    // --- Pedidos ---

    pub async fn update_order_status(&self, confirmed: &StatusSubmission) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "update_order_status",
            key: Some(QueryKey::Orders),
            title_key: "toast.updated",
            message_key: "order.status_updated",
            server_message_first: false,
        };
        self.settle(outcome, self.queries.api().update_order_status(confirmed.item_id()))
            .await
    }

    // --- Contas ---

    pub async fn sign_up_staff(&self, payload: &StaffSignUp) -> Result<Receipt, AppError> {
        let outcome = Outcome {
            action: "sign_up_staff",
            key: Some(QueryKey::AllStaff),
            title_key: "toast.created",
            message_key: "staff.created",
            server_message_first: true,
        };
        self.settle(outcome, self.queries.api().sign_up_staff(payload)).await
    }

    pub async fn sign_up_admin(&self, payload: &AdminSignUp) -> Result<AuthResponse, AppError> {
        let outcome = Outcome {
            action: "sign_up_admin",
            key: None,
            title_key: "toast.created",
            message_key: "admin.created",
            server_message_first: true,
        };
        self.settle(outcome, self.queries.api().sign_up_admin(payload)).await
    }
}
