// src/models/envelope.rs

use serde::{de::DeserializeOwned, de::Error as _, Serialize};
use serde_json::Value;

// Chaves em que a API costuma embrulhar coleções
const COLLECTION_KEYS: &[&str] = &["items", "events", "merchandise", "memberships", "staff", "orders", "data"];

/// Toda coleção vinda da API é normalizada para `{items, total}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListEnvelope<T> {
    pub items: Vec<T>,
    pub total: usize,
}

impl<T> Default for ListEnvelope<T> {
    fn default() -> Self {
        Self { items: Vec::new(), total: 0 }
    }
}

impl<T> ListEnvelope<T> {
    pub fn new(items: Vec<T>) -> Self {
        let total = items.len();
        Self { items, total }
    }
}

impl<T: DeserializeOwned> ListEnvelope<T> {
    /// Aceita um array puro, `{count, items}` ou um objeto com um array nomeado.
    /// `preferred` é a chave específica do recurso (ex: "events"), tentada primeiro.
    pub fn from_value(value: Value, preferred: &str) -> Result<Self, serde_json::Error> {
        match value {
            Value::Array(_) => {
                let items: Vec<T> = serde_json::from_value(value)?;
                Ok(Self::new(items))
            }
            Value::Object(mut map) => {
                let declared_total = ["count", "total"]
                    .iter()
                    .find_map(|k| map.get(*k).and_then(Value::as_u64))
                    .map(|n| n as usize);

                let key = std::iter::once(preferred)
                    .chain(COLLECTION_KEYS.iter().copied())
                    .find(|k| map.get(*k).is_some_and(Value::is_array))
                    .map(str::to_string);

                let Some(key) = key else {
                    return Err(serde_json::Error::custom(format!(
                        "coleção '{}' não encontrada na resposta",
                        preferred
                    )));
                };

                let raw = map.remove(&key).unwrap_or(Value::Array(Vec::new()));
                let items: Vec<T> = serde_json::from_value(raw)?;
                let total = declared_total.unwrap_or(items.len()).max(items.len());
                Ok(Self { items, total })
            }
            other => Err(serde_json::Error::custom(format!(
                "resposta inesperada para coleção: {}",
                other
            ))),
        }
    }
}
