// src/query/cache.rs

use std::{
    any::Any,
    collections::HashMap,
    future::Future,
    pin::Pin,
    sync::Arc,
    time::{Duration, Instant},
};

use serde::Serialize;
use tokio::sync::Mutex;

use crate::{api::AdminApi, common::error::ApiError};

pub type QueryFuture<T> = Pin<Box<dyn Future<Output = Result<T, ApiError>> + Send>>;

type AnyData = Arc<dyn Any + Send + Sync>;
type Refetch = Arc<dyn Fn(Arc<dyn AdminApi>) -> QueryFuture<AnyData> + Send + Sync>;

// --- Chaves ---
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum QueryKey {
    #[serde(rename = "adminInfo")]
    AdminInfo,
    #[serde(rename = "allEvents")]
    AllEvents,
    #[serde(rename = "allMerchandise")]
    AllMerchandise,
    #[serde(rename = "allMemberships")]
    AllMemberships,
    #[serde(rename = "orders")]
    Orders,
    #[serde(rename = "allStaff")]
    AllStaff,
}

impl QueryKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueryKey::AdminInfo => "adminInfo",
            QueryKey::AllEvents => "allEvents",
            QueryKey::AllMerchandise => "allMerchandise",
            QueryKey::AllMemberships => "allMemberships",
            QueryKey::Orders => "orders",
            QueryKey::AllStaff => "allStaff",
        }
    }
}

/// Uma consulta cacheável: chave fixa + como buscar na API.
pub trait Query: Send + Sync + 'static {
    type Output: Send + Sync + 'static;
    const KEY: QueryKey;

    fn fetch(api: Arc<dyn AdminApi>) -> QueryFuture<Self::Output>;
}

#[derive(Debug, Clone, Copy)]
pub struct QueryOptions {
    pub stale_time: Duration,
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for QueryOptions {
    fn default() -> Self {
        Self {
            stale_time: Duration::from_secs(60),
            retries: 0,
            retry_delay: Duration::from_secs(1),
        }
    }
}

/// Estado observável de uma consulta.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum QueryState<T> {
    Loading,
    Error(ApiError),
    Success(T),
}

struct Entry {
    data: Option<AnyData>,
    error: Option<ApiError>,
    fetched_at: Option<Instant>,
    invalidated: bool,
    refetch: Refetch,
}

impl Entry {
    fn new(refetch: Refetch) -> Self {
        Self {
            data: None,
            error: None,
            fetched_at: None,
            invalidated: false,
            refetch,
        }
    }
}

fn refetch_of<Q: Query>() -> Refetch {
    Arc::new(|api: Arc<dyn AdminApi>| -> QueryFuture<AnyData> {
        Box::pin(async move {
            Q::fetch(api)
                .await
                .map(|data| Arc::new(data) as AnyData)
        })
    })
}

// ---
// QueryClient: cache por sessão, invalidado por chave inteira
// ---
pub struct QueryClient {
    api: Arc<dyn AdminApi>,
    options: QueryOptions,
    entries: Mutex<HashMap<QueryKey, Entry>>,
}

impl QueryClient {
    pub fn new(api: Arc<dyn AdminApi>, options: QueryOptions) -> Self {
        Self {
            api,
            options,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn api(&self) -> &Arc<dyn AdminApi> {
        &self.api
    }

    /// Devolve o dado em cache se ainda estiver fresco; senão busca na API.
    pub async fn fetch<Q: Query>(&self) -> Result<Arc<Q::Output>, ApiError> {
        if let Some(data) = self.cached::<Q>().await {
            tracing::debug!(key = Q::KEY.as_str(), "consulta servida do cache");
            return Ok(data);
        }

        let refetch = refetch_of::<Q>();
        let outcome = self.run(Q::KEY, &refetch).await;
        self.record(Q::KEY, refetch, &outcome).await;

        let data = outcome?;
        data.downcast::<Q::Output>().map_err(|_| {
            tracing::error!(key = Q::KEY.as_str(), "tipo inesperado no cache");
            ApiError::new(500, "Unexpected cached value")
        })
    }

    /// Igual ao `fetch`, mas já no formato de estado (loading/error/success).
    pub async fn observe<Q: Query>(&self) -> QueryState<Arc<Q::Output>> {
        match self.fetch::<Q>().await {
            Ok(data) => QueryState::Success(data),
            Err(err) => QueryState::Error(err),
        }
    }

    /// Estado atual sem disparar requisição.
    pub async fn state<Q: Query>(&self) -> QueryState<Arc<Q::Output>> {
        let entries = self.entries.lock().await;
        let Some(entry) = entries.get(&Q::KEY) else {
            return QueryState::Loading;
        };
        if let Some(err) = &entry.error {
            return QueryState::Error(err.clone());
        }
        match entry.data.clone().and_then(|d| d.downcast::<Q::Output>().ok()) {
            Some(data) => QueryState::Success(data),
            None => QueryState::Loading,
        }
    }

    /// Marca a chave como velha e rebusca se ela já foi observada.
    /// Retorna `true` quando a rebusca aconteceu e deu certo.
    pub async fn invalidate(&self, key: QueryKey) -> bool {
        let refetch = {
            let mut entries = self.entries.lock().await;
            let Some(entry) = entries.get_mut(&key) else {
                tracing::debug!(key = key.as_str(), "invalidação sem observadores");
                return false;
            };
            entry.invalidated = true;
            entry.refetch.clone()
        };

        tracing::debug!(key = key.as_str(), "invalidando e rebuscando consulta");
        let outcome = self.run(key, &refetch).await;
        self.record(key, refetch, &outcome).await;
        outcome.is_ok()
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }

    async fn cached<Q: Query>(&self) -> Option<Arc<Q::Output>> {
        let entries = self.entries.lock().await;
        let entry = entries.get(&Q::KEY)?;
        if entry.invalidated || entry.error.is_some() {
            return None;
        }
        let fetched_at = entry.fetched_at?;
        if fetched_at.elapsed() >= self.options.stale_time {
            return None;
        }
        entry.data.clone()?.downcast::<Q::Output>().ok()
    }

    async fn run(&self, key: QueryKey, refetch: &Refetch) -> Result<AnyData, ApiError> {
        let mut attempt = 0;
        loop {
            match refetch(self.api.clone()).await {
                Ok(data) => return Ok(data),
                Err(err) if attempt < self.options.retries => {
                    attempt += 1;
                    tracing::warn!(key = key.as_str(), attempt, "consulta falhou, nova tentativa: {}", err);
                    tokio::time::sleep(self.options.retry_delay).await;
                }
                Err(err) => {
                    tracing::warn!(key = key.as_str(), "consulta falhou: {}", err);
                    return Err(err);
                }
            }
        }
    }

    // Falha mantém o dado anterior (como a tela mostraria) e guarda o erro
    async fn record(&self, key: QueryKey, refetch: Refetch, outcome: &Result<AnyData, ApiError>) {
        let mut entries = self.entries.lock().await;
        let entry = entries.entry(key).or_insert_with(|| Entry::new(refetch));
        match outcome {
            Ok(data) => {
                entry.data = Some(data.clone());
                entry.error = None;
                entry.fetched_at = Some(Instant::now());
                entry.invalidated = false;
            }
            Err(err) => {
                entry.error = Some(err.clone());
            }
        }
    }
}
