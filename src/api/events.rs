// src/api/events.rs

use async_trait::async_trait;
use reqwest::Method;

use crate::{
    api::client::{unexpected_response, ApiClient},
    common::error::ApiError,
    models::{
        auth::Receipt,
        event::{Event, NewEvent},
        ListEnvelope,
    },
};

#[async_trait]
pub trait EventsApi: Send + Sync {
    async fn fetch_events(&self) -> Result<ListEnvelope<Event>, ApiError>;
    async fn create_event(&self, input: &NewEvent) -> Result<Receipt, ApiError>;
    async fn edit_event(&self, item_id: &str, updated_item: &Event) -> Result<Receipt, ApiError>;
    async fn delete_event(&self, item_id: &str) -> Result<Receipt, ApiError>;
}

#[async_trait]
impl EventsApi for ApiClient {
    async fn fetch_events(&self) -> Result<ListEnvelope<Event>, ApiError> {
        let exchange = self
            .get("/event/fetch-all-events", "Error fetching all events.")
            .await?;
        ListEnvelope::from_value(exchange.body, "events").map_err(unexpected_response)
    }

    async fn create_event(&self, input: &NewEvent) -> Result<Receipt, ApiError> {
        self.send(Method::POST, "/event/create-event", Some(input), "Failed to create event")
            .await?
            .decode()
    }

    async fn edit_event(&self, item_id: &str, updated_item: &Event) -> Result<Receipt, ApiError> {
        let path = format!("/event/update-event/{}", item_id);
        self.send(Method::PUT, &path, Some(updated_item), "Error updating the event.")
            .await?
            .decode()
    }

    async fn delete_event(&self, item_id: &str) -> Result<Receipt, ApiError> {
        let path = format!("/event/delete-event/{}", item_id);
        self.send::<()>(Method::DELETE, &path, None, "An error occurred while removing event.")
            .await?
            .decode()
    }
}
