// src/models/auth.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// Perfil retornado por /auth-admin/fetch-admin-info (decide o gate de autenticação)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminProfile {
    #[serde(alias = "_id", alias = "userId", default)]
    pub id: String,
    #[serde(alias = "firstname", default)]
    pub first_name: String,
    #[serde(alias = "lastname", default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
}

impl AdminProfile {
    pub fn display_name(&self) -> String {
        let name = format!("{} {}", self.first_name, self.last_name);
        let name = name.trim();
        if name.is_empty() {
            self.email.clone()
        } else {
            name.to_string()
        }
    }
}

// A API às vezes embrulha o perfil em { user: {...} } ou { admin: {...} }
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ProfileEnvelope {
    User { user: AdminProfile },
    Admin { admin: AdminProfile },
    Data { data: AdminProfile },
    Bare(AdminProfile),
}

impl ProfileEnvelope {
    pub(crate) fn into_profile(self) -> AdminProfile {
        match self {
            ProfileEnvelope::User { user } => user,
            ProfileEnvelope::Admin { admin } => admin,
            ProfileEnvelope::Data { data } => data,
            ProfileEnvelope::Bare(profile) => profile,
        }
    }
}

// --- Payloads enviados à API ---

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SignInRequest {
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct VerifyCodeRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PasswordSignIn {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AdminSignUp {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
    pub password: String,
}

// --- Respostas ---

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub firstname: Option<String>,
    #[serde(default)]
    pub lastname: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AuthResponse {
    // O token pode vir no corpo ou só no cookie `admin_auth`
    #[serde(default)]
    pub token: Option<String>,
    #[serde(default)]
    pub user: AuthUser,
    #[serde(default)]
    pub message: Option<String>,
}

/// Resposta genérica das mutações: só a mensagem interessa ao console.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Receipt {
    #[serde(default)]
    pub message: Option<String>,
}
