// src/console/auth.rs

use std::sync::Arc;

use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    models::auth::AdminProfile,
    query::{queries::AdminInfoQuery, QueryClient, QueryState},
};

/// Gate de autenticação: a busca do perfil decide entre painel e login.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "state", rename_all = "camelCase")]
pub enum AuthGate {
    Loading,
    Authenticated { user: AdminProfile },
    Unauthenticated,
}

impl AuthGate {
    pub fn from_state(state: QueryState<Arc<AdminProfile>>) -> Self {
        match state {
            QueryState::Loading => AuthGate::Loading,
            QueryState::Success(user) => AuthGate::Authenticated { user: (*user).clone() },
            QueryState::Error(err) => {
                // Qualquer falha manda para o login; 401/403 é o caso esperado
                if err.is_transport() {
                    tracing::warn!("API remota sem resposta ao buscar o perfil: {}", err);
                } else if !err.is_unauthorized() {
                    tracing::warn!("perfil recusado, tratando como não autenticado: {}", err);
                }
                AuthGate::Unauthenticated
            }
        }
    }

    pub async fn resolve(queries: &QueryClient) -> Self {
        Self::from_state(queries.observe::<AdminInfoQuery>().await)
    }

    pub fn user(&self) -> Option<&AdminProfile> {
        match self {
            AuthGate::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthGate::Authenticated { .. })
    }
}
