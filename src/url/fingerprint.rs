use url::Url;

/// Computes the canonical form of a request URL used for duplicate filtering
///
/// # Canonicalization Steps
///
/// 1. Lowercase the host (the `url` crate already does this when parsing)
/// 2. Drop the port if it is the scheme default
/// 3. Remove fragment (everything after #)
/// 4. Sort query parameters by key, then value
/// 5. Remove empty query string (trailing ?)
///
/// The path is kept as-is: `/blog` and `/blog/` are different requests.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use blog_harvest::url::request_fingerprint;
///
/// let a = Url::parse("https://example.com/p?b=2&a=1#top").unwrap();
/// let b = Url::parse("https://EXAMPLE.com:443/p?a=1&b=2").unwrap();
/// assert_eq!(request_fingerprint(&a), request_fingerprint(&b));
/// ```
pub fn request_fingerprint(url: &Url) -> String {
    let mut canonical = url.clone();

    canonical.set_fragment(None);

    if canonical.query().is_some() {
        let mut params: Vec<(String, String)> = canonical
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        if params.is_empty() {
            canonical.set_query(None);
        } else {
            params.sort();
            canonical
                .query_pairs_mut()
                .clear()
                .extend_pairs(params.iter());
        }
    }

    canonical.to_string()
}
