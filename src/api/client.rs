// src/api/client.rs

use std::{sync::Arc, time::Duration};

use reqwest::{
    header::{self, HeaderMap, HeaderValue},
    Method, RequestBuilder,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{json, Value};

use crate::common::error::{ApiError, AppError};

// Nome do cookie que carrega o token do admin
pub const AUTH_COOKIE: &str = "admin_auth";

// Resposta crua de uma chamada bem-sucedida
pub(crate) struct Exchange {
    pub body: Value,
    pub headers: HeaderMap,
}

// ---
// ApiClient: adaptador HTTP (reqwest) da API remota do clube
// ---
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
    token: Option<Arc<str>>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, AppError> {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::InternalServerError(anyhow::Error::new(e)))?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            token: None,
        })
    }

    /// Mesmo cliente (pool compartilhado), autenticado com o token do admin.
    pub fn with_token(&self, token: Option<&str>) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            token: token.filter(|t| !t.is_empty()).map(Arc::from),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub(crate) async fn get(&self, path: &str, fallback: &str) -> Result<Exchange, ApiError> {
        self.execute(Method::GET, path, self.request(Method::GET, path), fallback)
            .await
    }

    pub(crate) async fn send<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        fallback: &str,
    ) -> Result<Exchange, ApiError>
    where
        B: Serialize + ?Sized,
    {
        let mut builder = self.request(method.clone(), path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.execute(method, path, builder, fallback).await
    }

    // Executa a requisição e normaliza qualquer falha em ApiError
    async fn execute(
        &self,
        method: Method,
        path: &str,
        builder: RequestBuilder,
        fallback: &str,
    ) -> Result<Exchange, ApiError> {
        tracing::debug!(%method, path, "chamando API remota");

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let headers = response.headers().clone();
        let bytes = response.bytes().await.map_err(transport_error)?;
        let body = parse_body(&bytes);

        if status.is_success() {
            return Ok(Exchange { body, headers });
        }

        tracing::warn!(%method, path, status = status.as_u16(), "API remota recusou a requisição");
        let body = if body.is_null() { None } else { Some(body) };
        Err(ApiError::from_rejection(status.as_u16(), body, fallback))
    }
}

impl Exchange {
    // Corpo vazio (DELETE/PUT sem retorno) conta como objeto vazio
    pub(crate) fn decode<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        let body = if self.body.is_null() { json!({}) } else { self.body };
        serde_json::from_value(body).map_err(unexpected_response)
    }

    /// Token devolvido num `Set-Cookie: admin_auth=...`, se houver.
    pub(crate) fn auth_cookie(&self) -> Option<String> {
        self.headers
            .get_all(header::SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .find_map(|cookie| {
                let (pair, _) = cookie.split_once(';').unwrap_or((cookie, ""));
                let (name, value) = pair.split_once('=')?;
                (name.trim() == AUTH_COOKIE && !value.trim().is_empty())
                    .then(|| value.trim().to_string())
            })
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Value::Null;
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}

// Sem resposta (conexão, timeout) vira 503; o resto é erro inesperado sem status.
fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() || err.is_connect() || err.is_request() || err.is_body() {
        tracing::error!("Sem resposta da API remota: {}", err);
        return ApiError::no_response();
    }
    ApiError {
        message: "An unexpected error occurred".to_string(),
        status_code: None,
        details: Some(json!(err.to_string())),
        transport: false,
    }
}

pub(crate) fn unexpected_response(err: serde_json::Error) -> ApiError {
    tracing::error!("Resposta inesperada da API remota: {}", err);
    ApiError {
        message: "Unexpected response from server".to_string(),
        status_code: None,
        details: Some(json!(err.to_string())),
        transport: false,
    }
}
