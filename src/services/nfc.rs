// src/services/nfc.rs

use std::{sync::Arc, time::Duration};

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    common::{error::AppError, i18n::I18nStore},
    models::membership::Membership,
};

// Capacidade útil da tag (~512 bytes) com folga para o cabeçalho NDEF
pub const MAX_TOKEN_BYTES: usize = 450;
pub const WRITE_ATTEMPTS: u32 = 3;

/// Gravador NFC do dispositivo.
#[async_trait]
pub trait NfcWriter: Send + Sync {
    fn is_available(&self) -> bool {
        true
    }

    async fn write(&self, payload: &[u8]) -> Result<(), String>;

    async fn make_read_only(&self) -> Result<(), String>;
}

/// Sem hardware NFC: toda gravação cai no aviso de "não suportado".
pub struct UnsupportedNfc;

#[async_trait]
impl NfcWriter for UnsupportedNfc {
    fn is_available(&self) -> bool {
        false
    }

    async fn write(&self, _payload: &[u8]) -> Result<(), String> {
        Err("unsupported".to_string())
    }

    async fn make_read_only(&self) -> Result<(), String> {
        Err("unsupported".to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NfcOutcome {
    pub bytes_written: usize,
    pub attempts: u32,
    pub messages: Vec<String>,
}

#[derive(Clone)]
pub struct NfcService {
    writer: Arc<dyn NfcWriter>,
    retry_pause: Duration,
}

impl NfcService {
    pub fn new(writer: Arc<dyn NfcWriter>) -> Self {
        Self {
            writer,
            retry_pause: Duration::from_secs(1),
        }
    }

    pub fn with_retry_pause(mut self, pause: Duration) -> Self {
        self.retry_pause = pause;
        self
    }

    /// Token da carteira (base64) já decodificado e dentro do limite da tag.
    pub fn token_bytes(member: &Membership, i18n: &I18nStore, lang: &str) -> Result<Vec<u8>, AppError> {
        let token = member
            .ecrypt_wallet_id
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Nfc(i18n.get(lang, "nfc.no_token")))?;

        let bytes = STANDARD
            .decode(token)
            .map_err(|e| AppError::Nfc(e.to_string()))?;

        if bytes.len() > MAX_TOKEN_BYTES {
            return Err(AppError::Nfc(i18n.get(lang, "nfc.token_too_large")));
        }
        Ok(bytes)
    }

    /// Grava o token e trava a tag. Até três tentativas, com pausa entre elas.
    pub async fn write_member_token(
        &self,
        member: &Membership,
        i18n: &I18nStore,
        lang: &str,
    ) -> Result<NfcOutcome, AppError> {
        if !self.writer.is_available() {
            return Err(AppError::Nfc(i18n.get(lang, "nfc.unsupported")));
        }
        let bytes = Self::token_bytes(member, i18n, lang)?;

        let mut attempt = 0;
        loop {
            attempt += 1;
            match self.write_and_lock(&bytes).await {
                Ok(()) => {
                    tracing::info!(member = %member.id, attempt, "token gravado na tag NFC");
                    return Ok(NfcOutcome {
                        bytes_written: bytes.len(),
                        attempts: attempt,
                        messages: vec![i18n.get(lang, "nfc.written"), i18n.get(lang, "nfc.locked")],
                    });
                }
                Err(reason) if attempt < WRITE_ATTEMPTS => {
                    tracing::warn!(member = %member.id, attempt, "gravação NFC falhou, tentando de novo: {}", reason);
                    tokio::time::sleep(self.retry_pause).await;
                }
                Err(reason) => {
                    tracing::error!(member = %member.id, "gravação NFC falhou: {}", reason);
                    return Err(AppError::Nfc(reason));
                }
            }
        }
    }

    async fn write_and_lock(&self, bytes: &[u8]) -> Result<(), String> {
        self.writer.write(bytes).await?;
        self.writer.make_read_only().await
    }
}
