// src/api/staff.rs

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::client::{unexpected_response, ApiClient},
    common::error::ApiError,
    models::{
        auth::Receipt,
        staff::{Staff, StaffSignUp},
        ListEnvelope,
    },
};

#[async_trait]
pub trait StaffApi: Send + Sync {
    async fn fetch_all_staff(&self) -> Result<ListEnvelope<Staff>, ApiError>;
    async fn sign_up_staff(&self, input: &StaffSignUp) -> Result<Receipt, ApiError>;
}

#[async_trait]
impl StaffApi for ApiClient {
    async fn fetch_all_staff(&self) -> Result<ListEnvelope<Staff>, ApiError> {
        let exchange = self
            .get("/auth-admin/fetch-all-staff-details", "Error fetching all staff.")
            .await?;
        ListEnvelope::from_value(exchange.body, "staff").map_err(unexpected_response)
    }

    async fn sign_up_staff(&self, input: &StaffSignUp) -> Result<Receipt, ApiError> {
        self.send(
            Method::POST,
            "/auth-admin/Staff/app-signup",
            Some(input),
            "An error occurred during sign up.",
        )
        .await?
        .decode()
    }
}
