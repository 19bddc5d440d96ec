// src/api/merchandise.rs

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::client::{unexpected_response, ApiClient},
    common::error::ApiError,
    models::{
        auth::Receipt,
        merchandise::{Merchandise, NewMerchandise},
        ListEnvelope,
    },
};

#[async_trait]
pub trait MerchandiseApi: Send + Sync {
    async fn fetch_merchandise(&self) -> Result<ListEnvelope<Merchandise>, ApiError>;
    async fn create_merchandise(&self, input: &NewMerchandise) -> Result<Receipt, ApiError>;
    async fn edit_merchandise(&self, item_id: &str, updated_item: &Merchandise) -> Result<Receipt, ApiError>;
    async fn delete_merchandise(&self, item_id: &str) -> Result<Receipt, ApiError>;
}

#[async_trait]
impl MerchandiseApi for ApiClient {
    async fn fetch_merchandise(&self) -> Result<ListEnvelope<Merchandise>, ApiError> {
        let exchange = self
            .get("/merchandise/fetch-merchandise", "Error fetching merchandise.")
            .await?;
        ListEnvelope::from_value(exchange.body, "merchandise").map_err(unexpected_response)
    }

    async fn create_merchandise(&self, input: &NewMerchandise) -> Result<Receipt, ApiError> {
        self.send(
            Method::POST,
            "/merchandise/create-new-merchandise",
            Some(input),
            "Failed to create merchandise",
        )
        .await?
        .decode()
    }

    async fn edit_merchandise(&self, item_id: &str, updated_item: &Merchandise) -> Result<Receipt, ApiError> {
        let path = format!("/merchandise/{}/update-merchandise", item_id);
        self.send(Method::PUT, &path, Some(updated_item), "Error updating the merchandise.")
            .await?
            .decode()
    }

    async fn delete_merchandise(&self, item_id: &str) -> Result<Receipt, ApiError> {
        let path = format!("/merchandise/{}/remove-merchandise", item_id);
        self.send::<()>(Method::DELETE, &path, None, "An error occurred while removing merchandise.")
            .await?
            .decode()
    }
}
