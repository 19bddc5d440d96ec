// src/middleware/i18n.rs

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

use crate::common::i18n::DEFAULT_LANG;

// Idiomas com mensagens próprias no I18nStore
const SUPPORTED: [&str; 2] = ["en", "pt"];

// Nosso extrator de idioma
#[derive(Debug, Clone, PartialEq)]
pub struct Locale(pub String);

impl Default for Locale {
    fn default() -> Self {
        Locale(DEFAULT_LANG.to_string())
    }
}

impl Locale {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primeiro idioma do Accept-Language que o console suporta.
    pub fn from_header(header_str: &str) -> Self {
        accept_language::parse(header_str)
            .iter()
            // "pt-BR" -> "pt"
            .map(|tag| tag.split('-').next().unwrap_or(tag).to_lowercase())
            .find(|lang| SUPPORTED.contains(&lang.as_str()))
            .map(Locale)
            .unwrap_or_default()
    }
}

impl<S> FromRequestParts<S> for Locale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = parts
            .headers
            .get(header::ACCEPT_LANGUAGE)
            .and_then(|header_value| header_value.to_str().ok())
            .map(Locale::from_header)
            .unwrap_or_default();

        Ok(locale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("pt-BR,pt;q=0.9,en;q=0.8", "pt")]
    #[case("en-US", "en")]
    #[case("fr-FR,pt;q=0.5", "pt")]
    #[case("fr-FR", "en")]
    #[case("", "en")]
    fn picks_first_supported_language(#[case] header: &str, #[case] expected: &str) {
        assert_eq!(Locale::from_header(header).as_str(), expected);
    }
}
