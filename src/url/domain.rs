use crate::{UrlError, UrlResult};
use url::Url;

/// Parses an absolute URL string, mapping failures to [`UrlError::Parse`]
pub fn parse_url(input: &str) -> UrlResult<Url> {
    Url::parse(input).map_err(|e| UrlError::Parse {
        input: input.to_string(),
        message: e.to_string(),
    })
}

/// Extracts the network location (host plus any explicit port) from a URL
///
/// The host is lowercased. Default ports are not repeated, so
/// `https://example.com:443/` and `https://example.com/` share a netloc.
///
/// # Returns
///
/// * `Some(String)` - The netloc, e.g. `"www.ics.uci.edu"` or `"localhost:8080"`
/// * `None` - If the URL has no host (`mailto:`, `data:` and similar)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use link_sieve::url::netloc;
///
/// let url = Url::parse("https://WWW.ICS.UCI.EDU/about").unwrap();
/// assert_eq!(netloc(&url), Some("www.ics.uci.edu".to_string()));
///
/// let url = Url::parse("http://localhost:8080/").unwrap();
/// assert_eq!(netloc(&url), Some("localhost:8080".to_string()));
/// ```
pub fn netloc(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    Some(match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host,
    })
}

/// Returns the URL's path with any `;params` on its last segment removed
///
/// `/file.pdf;jsessionid=ABC` becomes `/file.pdf`. Parameters on earlier
/// segments stay part of the path.
pub fn path_without_params(url: &Url) -> &str {
    let path = url.path();
    let last_segment = path.rfind('/').map_or(0, |i| i + 1);
    match path[last_segment..].find(';') {
        Some(i) => &path[..last_segment + i],
        None => path,
    }
}

/// Reduces a URL to scheme, netloc and path, dropping params, query and fragment
///
/// This is the key the trap detector counts visits under, so
/// `/calendar?day=1`, `/calendar?day=2` and `/calendar;jsessionid=9`
/// collapse to one entry.
pub fn base_url(url: &Url) -> UrlResult<String> {
    let netloc = netloc(url).ok_or_else(|| UrlError::MissingDomain(url.to_string()))?;
    Ok(format!(
        "{}://{}{}",
        url.scheme(),
        netloc,
        path_without_params(url)
    ))
}
