// src/console/toast.rs

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::Mutex;
use utoipa::ToSchema;
use uuid::Uuid;

// Quantos toasts ficam na fila antes de descartar os mais antigos
const MAX_TOASTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToastVariant {
    Default,
    Success,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Toast {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
    pub created_at: DateTime<Utc>,
}

/// Fila de notificações de uma sessão; o front drena e exibe.
#[derive(Debug, Default)]
pub struct Toaster {
    queue: Mutex<VecDeque<Toast>>,
}

impl Toaster {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn push(&self, title: impl Into<String>, description: impl Into<String>, variant: ToastVariant) -> Toast {
        let toast = Toast {
            id: Uuid::new_v4(),
            title: title.into(),
            description: description.into(),
            variant,
            created_at: Utc::now(),
        };

        let mut queue = self.queue.lock().await;
        if queue.len() == MAX_TOASTS {
            queue.pop_front();
        }
        queue.push_back(toast.clone());
        toast
    }

    pub async fn success(&self, title: impl Into<String>, description: impl Into<String>) -> Toast {
        self.push(title, description, ToastVariant::Success).await
    }

    pub async fn error(&self, title: impl Into<String>, description: impl Into<String>) -> Toast {
        self.push(title, description, ToastVariant::Destructive).await
    }

    pub async fn info(&self, title: impl Into<String>, description: impl Into<String>) -> Toast {
        self.push(title, description, ToastVariant::Default).await
    }

    /// Entrega e esvazia a fila.
    pub async fn drain(&self) -> Vec<Toast> {
        self.queue.lock().await.drain(..).collect()
    }

    pub async fn pending(&self) -> Vec<Toast> {
        self.queue.lock().await.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn it_should_drain_in_order() {
        let toaster = Toaster::new();
        toaster.success("Deleted!", "Event deleted successfully.").await;
        toaster.error("Error", "Not found").await;

        let toasts = toaster.drain().await;
        assert_eq!(toasts.len(), 2);
        assert_eq!(toasts[0].variant, ToastVariant::Success);
        assert_eq!(toasts[1].variant, ToastVariant::Destructive);
        assert!(toaster.drain().await.is_empty());
    }

    #[tokio::test]
    async fn it_should_drop_oldest_when_full() {
        let toaster = Toaster::new();
        for i in 0..(MAX_TOASTS + 3) {
            toaster.info("n", i.to_string()).await;
        }

        let toasts = toaster.pending().await;
        assert_eq!(toasts.len(), MAX_TOASTS);
        assert_eq!(toasts[0].description, "3");
    }
}
