// src/console/workspace.rs

use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use tokio::sync::{Mutex, RwLock};

use crate::{
    api::{AdminApi, AuthApi, Connector},
    common::i18n::I18nStore,
    console::{auth::AuthGate, mutations::MutationBinding, toast::Toaster},
    query::{QueryClient, QueryOptions},
};

// ---
// Workspace: tudo que uma sessão de navegador tem (cache + toasts)
// ---
pub struct Workspace {
    token: Option<String>,
    queries: QueryClient,
    toaster: Toaster,
    last_seen: Mutex<Instant>,
}

impl Workspace {
    pub fn new(api: Arc<dyn AdminApi>, options: QueryOptions, token: Option<String>) -> Self {
        Self {
            token,
            queries: QueryClient::new(api, options),
            toaster: Toaster::new(),
            last_seen: Mutex::new(Instant::now()),
        }
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn queries(&self) -> &QueryClient {
        &self.queries
    }

    pub fn toaster(&self) -> &Toaster {
        &self.toaster
    }

    pub fn api(&self) -> &Arc<dyn AdminApi> {
        self.queries.api()
    }

    pub fn mutations<'a>(&'a self, i18n: &'a I18nStore, lang: &'a str) -> MutationBinding<'a> {
        MutationBinding::new(&self.queries, &self.toaster, i18n, lang)
    }

    pub async fn auth_gate(&self) -> AuthGate {
        AuthGate::resolve(&self.queries).await
    }

    /// Encerra a sessão no backend e esquece o cache. Falha no logout remoto
    /// não impede a limpeza local.
    pub async fn sign_out(&self) {
        if let Err(err) = self.api().logout().await {
            tracing::warn!("logout remoto falhou: {}", err);
        }
        self.queries.clear().await;
        self.toaster.drain().await;
    }

    async fn touch(&self) {
        *self.last_seen.lock().await = Instant::now();
    }

    async fn idle_for(&self) -> Duration {
        self.last_seen.lock().await.elapsed()
    }
}

// ---
// SessionRegistry: um workspace por token, nunca compartilhado
// ---
pub struct SessionRegistry {
    connector: Arc<dyn Connector>,
    options: QueryOptions,
    idle_timeout: Duration,
    workspaces: RwLock<HashMap<String, Arc<Workspace>>>,
}

impl SessionRegistry {
    pub fn new(connector: Arc<dyn Connector>, options: QueryOptions, idle_timeout: Duration) -> Self {
        Self {
            connector,
            options,
            idle_timeout,
            workspaces: RwLock::new(HashMap::new()),
        }
    }

    /// Workspace do token (criado na primeira vez).
    pub async fn workspace(&self, token: &str) -> Arc<Workspace> {
        self.evict_idle().await;

        if let Some(existing) = self.workspaces.read().await.get(token).cloned() {
            existing.touch().await;
            return existing;
        }

        let mut workspaces = self.workspaces.write().await;
        let workspace = workspaces
            .entry(token.to_string())
            .or_insert_with(|| {
                tracing::debug!("novo workspace de sessão");
                Arc::new(Workspace::new(
                    self.connector.connect(Some(token)),
                    self.options,
                    Some(token.to_string()),
                ))
            })
            .clone();
        drop(workspaces);

        workspace.touch().await;
        workspace
    }

    /// Workspace descartável para quem ainda não tem token (login, cadastro).
    pub fn anonymous(&self) -> Workspace {
        Workspace::new(self.connector.connect(None), self.options, None)
    }

    pub async fn remove(&self, token: &str) -> Option<Arc<Workspace>> {
        self.workspaces.write().await.remove(token)
    }

    /// Logout do token. Sem workspace local (expirado, outro processo) o
    /// backend ainda é avisado, sem registrar nada novo.
    pub async fn sign_out(&self, token: &str) {
        match self.remove(token).await {
            Some(workspace) => workspace.sign_out().await,
            None => {
                if let Err(err) = self.connector.connect(Some(token)).logout().await {
                    tracing::warn!("logout remoto falhou: {}", err);
                }
            }
        }
    }

    /// Remove workspaces parados há mais que o limite. Retorna quantos saíram.
    pub async fn evict_idle(&self) -> usize {
        let snapshot: Vec<(String, Arc<Workspace>)> = self
            .workspaces
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        let mut stale = Vec::new();
        for (token, workspace) in snapshot {
            if workspace.idle_for().await >= self.idle_timeout {
                stale.push(token);
            }
        }
        if stale.is_empty() {
            return 0;
        }

        let mut workspaces = self.workspaces.write().await;
        for token in &stale {
            workspaces.remove(token);
        }
        tracing::info!(evicted = stale.len(), "workspaces ociosos removidos");
        stale.len()
    }

    pub async fn len(&self) -> usize {
        self.workspaces.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
