use url::Url;

/// Absolute URL with a scheme and a host.
pub fn is_valid_url(raw: &str) -> bool {
    match Url::parse(raw) {
        Ok(url) => url.host_str().is_some_and(|host| !host.is_empty()),
        Err(_) => false,
    }
}

/// Host of `raw` with a leading `www.` removed (`www.power.se` -> `power.se`).
/// Returns an empty string when `raw` does not parse.
pub fn domain_from_url(raw: &str) -> String {
    Url::parse(raw)
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .map(|host| host.strip_prefix("www.").map(str::to_string).unwrap_or(host))
        .unwrap_or_default()
}
