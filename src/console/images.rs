// src/console/images.rs

use reqwest::Url;

// Padrões no formato "https://res.cloudinary.com/**"
#[derive(Debug, Clone, PartialEq)]
struct RemotePattern {
    scheme: String,
    host: String,
    path: String,
}

impl RemotePattern {
    fn parse(raw: &str) -> Option<Self> {
        let (scheme, rest) = raw.trim().split_once("://")?;
        let (host, path) = match rest.find('/') {
            Some(idx) => (&rest[..idx], &rest[idx..]),
            None => (rest, "/**"),
        };
        if host.is_empty() {
            return None;
        }
        Some(Self {
            scheme: scheme.to_lowercase(),
            host: host.to_lowercase(),
            path: path.to_string(),
        })
    }

    fn matches(&self, url: &Url) -> bool {
        url.scheme() == self.scheme
            && url.host_str().is_some_and(|h| h.eq_ignore_ascii_case(&self.host))
            && path_matches(&self.path, url.path())
    }
}

// "**" casa com qualquer resto; "*" casa com um único segmento
fn path_matches(pattern: &str, path: &str) -> bool {
    let pattern: Vec<&str> = pattern.trim_start_matches('/').split('/').collect();
    let path: Vec<&str> = path.trim_start_matches('/').split('/').collect();

    let mut i = 0;
    for (idx, part) in pattern.iter().enumerate() {
        if *part == "**" {
            return true;
        }
        let Some(segment) = path.get(idx) else {
            return false;
        };
        if *part != "*" && part != segment {
            return false;
        }
        i = idx + 1;
    }
    i == path.len()
}

/// Hosts de imagem aceitos nos formulários (IMAGE_REMOTE_PATTERNS).
#[derive(Debug, Clone, Default)]
pub struct ImageAllowlist {
    patterns: Vec<RemotePattern>,
}

impl ImageAllowlist {
    /// Lista separada por vírgulas; entradas inválidas são ignoradas com aviso.
    pub fn parse(raw: &str) -> Self {
        let patterns = raw
            .split(',')
            .filter(|p| !p.trim().is_empty())
            .filter_map(|p| {
                let parsed = RemotePattern::parse(p);
                if parsed.is_none() {
                    tracing::warn!(pattern = p.trim(), "padrão de imagem inválido ignorado");
                }
                parsed
            })
            .collect();
        Self { patterns }
    }

    /// Caminhos locais ("/placeholder.svg") sempre passam.
    pub fn allows(&self, image_url: &str) -> bool {
        let image_url = image_url.trim();
        if image_url.starts_with('/') && !image_url.starts_with("//") {
            return true;
        }
        match Url::parse(image_url) {
            Ok(url) => self.patterns.iter().any(|p| p.matches(&url)),
            Err(_) => false,
        }
    }
}
