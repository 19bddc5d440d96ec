// src/models/staff.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Staff {
    #[serde(rename = "_id")]
    pub id: String,
    // A API usa "firstname"/"lastname" (minúsculo) para staff
    #[serde(rename = "firstname", default)]
    pub first_name: String,
    #[serde(rename = "lastname", default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Staff {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name).trim().to_string()
    }
}

// Corpo do POST /auth-admin/Staff/app-signup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StaffSignUp {
    #[serde(rename = "firstname")]
    pub first_name: String,
    #[serde(rename = "lastname")]
    pub last_name: String,
    pub email: String,
    pub phone_number: String,
}
