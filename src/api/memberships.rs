// src/api/memberships.rs

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::client::{unexpected_response, ApiClient},
    common::error::ApiError,
    models::{
        auth::Receipt,
        membership::{Membership, NewMembership},
        ListEnvelope,
    },
};

#[async_trait]
pub trait MembershipsApi: Send + Sync {
    async fn fetch_memberships(&self) -> Result<ListEnvelope<Membership>, ApiError>;
    async fn create_membership(&self, input: &NewMembership) -> Result<Receipt, ApiError>;
    async fn delete_membership(&self, item_id: &str) -> Result<Receipt, ApiError>;
}

#[async_trait]
impl MembershipsApi for ApiClient {
    async fn fetch_memberships(&self) -> Result<ListEnvelope<Membership>, ApiError> {
        let exchange = self
            .get("/membership/fetch-all-memberships", "Error fetching memberships.")
            .await?;
        ListEnvelope::from_value(exchange.body, "memberships").map_err(unexpected_response)
    }

    async fn create_membership(&self, input: &NewMembership) -> Result<Receipt, ApiError> {
        self.send(
            Method::POST,
            "/membership/create-membership",
            Some(input),
            "Failed to create membership",
        )
        .await?
        .decode()
    }

    async fn delete_membership(&self, item_id: &str) -> Result<Receipt, ApiError> {
        let path = format!("/membership/{}/remove-membership", item_id);
        self.send::<()>(Method::DELETE, &path, None, "An error occurred while removing member.")
            .await?
            .decode()
    }
}
