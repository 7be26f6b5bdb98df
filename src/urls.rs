//! URL Utility Functions
//!
//! Scheme/domain derivation, resolution of relative links against a source,
//! and the URL-shape heuristic used by `Article::is_valid_url`.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

/// Matches a publication date embedded in an article path (e.g. `/2024/03/15/`).
#[allow(clippy::expect_used)]
static DATE_IN_PATH: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([\./\-_]?(19|20)\d{2})[\./\-_]?(([0-3]?[0-9][\./\-_])|(\w{3,5}[\./\-_]))([0-3]?[0-9][\./\-]?)?")
        .expect("DATE_IN_PATH regex")
});

/// File extensions that may still carry an article.
const ALLOWED_TYPES: &[&str] = &[
    "html", "htm", "md", "rst", "aspx", "jsp", "rhtml", "cgi", "xhtml", "jhtml", "asp", "shtml",
];

/// Path segments that mark a news section.
const GOOD_PATHS: &[&str] = &[
    "story", "article", "feature", "featured", "slides", "slideshow", "gallery", "news", "video",
    "media", "v", "radio", "press",
];

/// Path segments or subdomains that never host articles.
const BAD_CHUNKS: &[&str] = &[
    "careers", "contact", "about", "faq", "terms", "privacy", "advert", "preferences", "feedback",
    "info", "browse", "howto", "account", "subscribe", "donate", "shop", "admin",
];

/// Registrable domain names that never host articles.
const BAD_DOMAINS: &[&str] = &["amazon", "doubleclick", "twitter"];

/// Check if a string is a valid absolute http(s) URL.
///
/// # Returns
/// * `(is_absolute, parsed_url)` - Whether URL is absolute and the parsed URL if valid
#[must_use]
pub fn is_absolute_url(s: &str) -> (bool, Option<Url>) {
    let s = s.trim();

    if !s.starts_with("http://") && !s.starts_with("https://") {
        return (false, None);
    }

    match Url::parse(s) {
        Ok(url) if url.host().is_some() => (true, Some(url)),
        _ => (false, None),
    }
}

/// Scheme of a URL, or empty string if it cannot be parsed.
#[must_use]
pub fn get_scheme(url_str: &str) -> String {
    Url::parse(url_str.trim())
        .map(|u| u.scheme().to_string())
        .unwrap_or_default()
}

/// Network location (host with optional port) of a URL, or empty string.
#[must_use]
pub fn get_domain(url_str: &str) -> String {
    let Ok(url) = Url::parse(url_str.trim()) else {
        return String::new();
    };
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        _ => String::new(),
    }
}

/// `scheme://domain` of a URL, or `None` when either part is missing.
#[must_use]
pub fn source_of(url_str: &str) -> Option<String> {
    let scheme = get_scheme(url_str);
    let domain = get_domain(url_str);
    if scheme.is_empty() || domain.is_empty() {
        None
    } else {
        Some(format!("{scheme}://{domain}"))
    }
}

/// Resolve `href` against `base`. Absolute and special (`data:`, `mailto:`...)
/// references are returned unchanged; unresolvable input yields the trimmed original.
#[must_use]
pub fn resolve(base: &str, href: &str) -> String {
    let href = href.trim();

    if href.is_empty() {
        return String::new();
    }

    if href.starts_with("data:")
        || href.starts_with("javascript:")
        || href.starts_with("mailto:")
        || href.starts_with("tel:")
    {
        return href.to_string();
    }

    if is_absolute_url(href).0 {
        return href.to_string();
    }

    match Url::parse(base).and_then(|b| b.join(href)) {
        Ok(resolved) => resolved.to_string(),
        Err(_) => href.to_string(),
    }
}

/// Drop query arguments and fragment.
#[must_use]
pub fn remove_args(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(mut url) => {
            url.set_query(None);
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => url_str.to_string(),
    }
}

/// Follow an off-site redirect wrapper (`?url=...`) back to its target.
#[must_use]
pub fn redirect_back(url_str: &str, source_domain: &str) -> String {
    let Ok(url) = Url::parse(url_str) else {
        return url_str.to_string();
    };
    let domain = url.host_str().unwrap_or_default();

    if domain.contains(source_domain) || source_domain.contains(domain) {
        return url_str.to_string();
    }

    url.query_pairs()
        .find(|(k, v)| k == "url" && !v.is_empty())
        .map_or_else(|| url_str.to_string(), |(_, v)| v.into_owned())
}

/// Drop the fragment only.
fn remove_fragment(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => url_str.to_string(),
    }
}

/// Prepare a raw article URL: resolve against `source_url`, unwrap redirect
/// wrappers and drop the fragment.
#[must_use]
pub fn prepare_url(url_str: &str, source_url: Option<&str>) -> String {
    let Some(source) = source_url else {
        return remove_fragment(url_str.trim());
    };

    let source_domain = Url::parse(source)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default();
    let joined = resolve(source, url_str);
    let unwrapped = if source_domain.is_empty() {
        joined
    } else {
        redirect_back(&joined, &source_domain)
    };
    remove_fragment(&unwrapped)
}

/// Lowercased extension of the last path segment, if any.
#[must_use]
pub fn url_to_filetype(url_str: &str) -> Option<String> {
    let url = Url::parse(url_str).ok()?;
    let last = url.path().trim_end_matches('/').rsplit('/').next()?;
    let (_, ext) = last.rsplit_once('.')?;
    let ext = ext.to_lowercase();
    if ext.is_empty() || ext.len() > 5 || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext)
}

/// Split a host into `(subdomain, domain)` around the registrable label.
fn split_host(host: &str) -> (String, String) {
    let labels: Vec<&str> = host.split('.').filter(|l| !l.is_empty()).collect();
    match labels.len() {
        0 => (String::new(), String::new()),
        1 => (String::new(), labels[0].to_lowercase()),
        n => {
            // second-level public suffixes such as co.uk / com.au
            let sld_suffix = n >= 3 && labels[n - 1].len() == 2 && labels[n - 2].len() <= 3;
            let domain_idx = if sld_suffix { n - 3 } else { n - 2 };
            (
                labels[..domain_idx].join(".").to_lowercase(),
                labels[domain_idx].to_lowercase(),
            )
        }
    }
}

/// Heuristic check that a URL looks like a news article.
///
/// Pure function of the URL: requires http(s), rejects media file types,
/// bad domains and bad path chunks, and accepts long slugs, dated paths or
/// known news sections.
#[must_use]
pub fn valid_url(url_str: &str) -> bool {
    // shortest plausible article url, eg: http://x.co
    if url_str.len() < 11 || url_str.contains("mailto:") {
        return false;
    }
    if !url_str.contains("http://") && !url_str.contains("https://") {
        return false;
    }

    let Ok(url) = Url::parse(url_str) else {
        return false;
    };
    let Some(host) = url.host_str() else {
        return false;
    };

    let path = url.path();
    if !path.starts_with('/') {
        return false;
    }
    let path = path.strip_suffix('/').unwrap_or(path);

    let mut chunks: Vec<String> = path
        .split('/')
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect();

    if let Some(last) = chunks.last_mut() {
        if let Some(file_type) = url_to_filetype(url_str) {
            if !ALLOWED_TYPES.contains(&file_type.as_str()) {
                return false;
            }
        }
        let pieces: Vec<&str> = last.split('.').collect();
        if pieces.len() > 1 {
            *last = pieces[pieces.len() - 2].to_string();
        }
    }

    if let Some(pos) = chunks.iter().position(|c| c == "index") {
        chunks.remove(pos);
    }

    let (subdomain, domain) = split_host(host);
    if BAD_DOMAINS.contains(&domain.as_str()) {
        return false;
    }

    let slug = chunks.last().cloned().unwrap_or_default();
    let dashes = slug.matches('-').count();
    let underscores = slug.matches('_').count();

    if !slug.is_empty() && (dashes > 4 || underscores > 4) {
        let separator = if dashes >= underscores { '-' } else { '_' };
        if !slug.split(separator).any(|p| p.to_lowercase() == domain) {
            return true;
        }
    }

    if chunks.len() <= 1 {
        return false;
    }

    if BAD_CHUNKS
        .iter()
        .any(|b| chunks.iter().any(|c| c == b) || *b == subdomain)
    {
        return false;
    }

    if DATE_IN_PATH.is_match(url_str) {
        return true;
    }

    chunks
        .iter()
        .any(|c| GOOD_PATHS.contains(&c.to_lowercase().as_str()))
}
