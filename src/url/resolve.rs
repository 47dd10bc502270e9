use crate::UrlError;
use url::Url;

/// Resolves an href found on a page against that page's URL
///
/// Relative and absolute hrefs are both accepted, the way a browser follows a
/// link. The href is used as-is apart from surrounding whitespace; an empty
/// href resolves to the page itself.
///
/// # Arguments
///
/// * `base` - URL of the document the href was found on
/// * `href` - The raw attribute value
///
/// # Returns
///
/// * `Ok(Url)` - Absolute HTTP(S) URL to follow
/// * `Err(UrlError)` - The href cannot be resolved or is not HTTP(S)
///
/// # Examples
///
/// ```
/// use url::Url;
/// use blog_harvest::url::resolve_link;
///
/// let base = Url::parse("https://example.com/blog/").unwrap();
/// let url = resolve_link(&base, "/post-a").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/post-a");
/// ```
pub fn resolve_link(base: &Url, href: &str) -> Result<Url, UrlError> {
    let resolved = base
        .join(href.trim())
        .map_err(|e| UrlError::Parse(format!("{}: {}", href, e)))?;

    match resolved.scheme() {
        "http" | "https" => Ok(resolved),
        other => Err(UrlError::InvalidScheme(format!(
            "Only HTTP and HTTPS links can be followed, got: {}",
            other
        ))),
    }
}
