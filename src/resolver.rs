use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use url::Url;

use crate::models::ResolvedSource;

// ── Constants ────────────────────────────────────────────────────────────────

/// Schemes browsers use for extension-internal resources. Markup pointing at
/// them is injected by other installed extensions, not served by the site.
const EXTENSION_SCHEMES: &[&str] = &["chrome-extension", "moz-extension", "safari-web-extension"];

static BASE_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("head > base").unwrap());

// ── Error type ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Unresolvable {
    #[error("source uses the extension scheme {0:?}")]
    ExtensionScheme(String),
    #[error("malformed source {raw:?}: {reason}")]
    Malformed {
        raw: String,
        #[source]
        reason: url::ParseError,
    },
}

// ── Base URL ─────────────────────────────────────────────────────────────────

/// Returns the URL relative references of `document` resolve against.
///
/// The page URL is reduced to origin and path, without credentials. A
/// `<base href>` in the head is resolved against that; an empty or
/// unjoinable `href` is ignored.
pub fn compute_base_url(document: &Html, location: &Url) -> Url {
    let mut page = location.clone();
    let _ = page.set_username("");
    let _ = page.set_password(None);
    page.set_query(None);
    page.set_fragment(None);

    let href = document
        .select(&BASE_SEL)
        .next()
        .and_then(|base| base.value().attr("href"))
        .filter(|href| !href.is_empty());

    match href {
        Some(href) => page.join(href).unwrap_or_else(|e| {
            tracing::debug!(href, error = %e, "ignoring unusable <base href>");
            page.clone()
        }),
        None => page,
    }
}

// ── Element naming ───────────────────────────────────────────────────────────

/// Lowercased `property` attribute, falling back to `name`.
pub fn effective_name(element: ElementRef<'_>) -> Option<String> {
    let v = element.value();
    v.attr("property")
        .or_else(|| v.attr("name"))
        .map(|s| s.trim().to_lowercase())
}

// ── Source resolution ────────────────────────────────────────────────────────

/// Resolves an authored `src`/`href` against `base`.
///
/// Empty and `data:` sources are passed through untouched with an empty
/// filename. Everything else must parse as a URL outside the extension
/// schemes.
pub fn resolve_source(raw: &str, base: &Url) -> Result<ResolvedSource, Unresolvable> {
    if raw.trim().is_empty() || raw.starts_with("data:") {
        return Ok(ResolvedSource {
            filename: String::new(),
            source: raw.to_string(),
        });
    }

    let url = base.join(raw).map_err(|reason| Unresolvable::Malformed {
        raw: raw.to_string(),
        reason,
    })?;

    if EXTENSION_SCHEMES.contains(&url.scheme()) {
        return Err(Unresolvable::ExtensionScheme(url.scheme().to_string()));
    }

    let source = url.to_string();
    let filename = source.rsplit('/').next().unwrap_or_default().to_string();
    Ok(ResolvedSource { filename, source })
}
