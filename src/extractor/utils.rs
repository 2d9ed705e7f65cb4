// Helper functions shared by extractors and the registry

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Second-level label followed by a recognised public suffix
    static ref DOMAIN_RE: Regex = Regex::new(
        r"([a-z0-9][-a-z0-9]{0,62})\.(com\.cn|com\.hk|cn|com|net|edu|gov|biz|org|info|pro|name|xxx|xyz|be|me|top|cc|tv|tt)(?:$|[^a-z0-9-])"
    )
    .unwrap();
}

/// Site key for a host, e.g. "www.huya.com" -> "huya"
pub fn domain(host: &str) -> Option<String> {
    let host = host.to_lowercase();
    DOMAIN_RE
        .captures(&host)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// First capture group of `re` in `text`
pub fn match_one_of<'a>(text: &'a str, re: &Regex) -> Option<&'a str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
