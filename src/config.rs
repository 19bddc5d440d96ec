// src/config.rs

use std::{env, str::FromStr, sync::Arc, time::Duration};

use anyhow::Context;

use crate::{
    api::{ApiClient, Connector},
    common::i18n::I18nStore,
    console::{images::ImageAllowlist, SessionRegistry},
    query::QueryOptions,
    services::{CardService, DocumentService, NfcService, UnsupportedNfc},
};

pub const DEFAULT_API_BASE_URL: &str = "https://msealserver-production.up.railway.app/mseal";

// Configurações lidas do ambiente (.env)
#[derive(Debug, Clone)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub bind_addr: String,
    pub page_size: usize,
    pub query_stale: Duration,
    pub query_retries: u32,
    pub request_timeout: Duration,
    pub image_remote_patterns: String,
    pub fonts_dir: String,
    pub session_idle: Duration,
    pub cookie_secure: bool,
}

impl Default for ConsoleConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            bind_addr: "0.0.0.0:3000".to_string(),
            page_size: 5,
            query_stale: Duration::from_secs(60),
            query_retries: 1,
            request_timeout: Duration::from_secs(15),
            image_remote_patterns: "https://res.cloudinary.com/**".to_string(),
            fonts_dir: "./fonts".to_string(),
            session_idle: Duration::from_secs(30 * 60),
            cookie_secure: true,
        }
    }
}

// Variável ausente = padrão; presente mas inválida = erro
fn parsed<T: FromStr>(name: &str, default: T) -> anyhow::Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .with_context(|| format!("{} inválida: {:?}", name, raw)),
        _ => Ok(default),
    }
}

fn text(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

impl ConsoleConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let defaults = Self::default();

        let page_size: usize = parsed("PAGE_SIZE", defaults.page_size)?;
        if page_size == 0 {
            anyhow::bail!("PAGE_SIZE deve ser maior que zero");
        }

        Ok(Self {
            api_base_url: text("API_BASE_URL", &defaults.api_base_url),
            bind_addr: text("BIND_ADDR", &defaults.bind_addr),
            page_size,
            query_stale: Duration::from_secs(parsed("QUERY_STALE_SECS", defaults.query_stale.as_secs())?),
            query_retries: parsed("QUERY_RETRIES", defaults.query_retries)?,
            request_timeout: Duration::from_secs(parsed("REQUEST_TIMEOUT_SECS", defaults.request_timeout.as_secs())?),
            image_remote_patterns: text("IMAGE_REMOTE_PATTERNS", &defaults.image_remote_patterns),
            fonts_dir: text("FONTS_DIR", &defaults.fonts_dir),
            session_idle: Duration::from_secs(parsed("SESSION_IDLE_SECS", defaults.session_idle.as_secs())?),
            cookie_secure: parsed("COOKIE_SECURE", defaults.cookie_secure)?,
        })
    }

    pub fn query_options(&self) -> QueryOptions {
        QueryOptions {
            stale_time: self.query_stale,
            retries: self.query_retries,
            ..QueryOptions::default()
        }
    }
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ConsoleConfig>,
    pub sessions: Arc<SessionRegistry>,
    pub i18n_store: I18nStore,
    pub images: Arc<ImageAllowlist>,
    pub card_service: CardService,
    pub document_service: DocumentService,
    pub nfc_service: NfcService,
}

impl AppState {
    pub fn new(config: ConsoleConfig) -> anyhow::Result<Self> {
        let client = ApiClient::new(&config.api_base_url, config.request_timeout)
            .context("Falha ao criar o cliente da API remota")?;
        tracing::info!("✅ API remota em {}", client.base_url());

        // Servidor não tem leitor NFC: gravações caem no aviso de "não suportado"
        let nfc_service = NfcService::new(Arc::new(UnsupportedNfc));
        Ok(Self::with_connector(config, Arc::new(client), nfc_service))
    }

    /// Monta o grafo de dependências sobre qualquer conector (API real ou fake).
    pub fn with_connector(config: ConsoleConfig, connector: Arc<dyn Connector>, nfc_service: NfcService) -> Self {
        let sessions = SessionRegistry::new(connector, config.query_options(), config.session_idle);
        let images = ImageAllowlist::parse(&config.image_remote_patterns);

        Self {
            card_service: CardService::new(&config.fonts_dir),
            document_service: DocumentService::new(&config.fonts_dir),
            sessions: Arc::new(sessions),
            i18n_store: I18nStore::new(),
            images: Arc::new(images),
            nfc_service,
            config: Arc::new(config),
        }
    }
}
