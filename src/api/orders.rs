// src/api/orders.rs

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::client::{unexpected_response, ApiClient},
    common::error::ApiError,
    models::{auth::Receipt, order::Order, ListEnvelope},
};

#[async_trait]
pub trait OrdersApi: Send + Sync {
    async fn fetch_orders(&self) -> Result<ListEnvelope<Order>, ApiError>;
    /// Avança o status do pedido; a API decide o próximo status.
    async fn update_order_status(&self, item_id: &str) -> Result<Receipt, ApiError>;
}

#[async_trait]
impl OrdersApi for ApiClient {
    async fn fetch_orders(&self) -> Result<ListEnvelope<Order>, ApiError> {
        let exchange = self
            .get("/orders/fetch-all-orders", "Error fetching orders.")
            .await?;
        ListEnvelope::from_value(exchange.body, "orders").map_err(unexpected_response)
    }

    async fn update_order_status(&self, item_id: &str) -> Result<Receipt, ApiError> {
        let path = format!("/orders/{}/update-status", item_id);
        self.send::<()>(Method::PUT, &path, None, "Error updating the order status.")
            .await?
            .decode()
    }
}
