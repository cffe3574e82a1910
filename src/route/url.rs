use crate::parse::Query;

/// The parts of a URL a route looks at.
///
/// `search` keeps its leading `?` and `hash` its leading `#`; both are empty
/// when absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UrlParts<'a> {
    pub pathname: &'a str,
    pub search: &'a str,
    pub hash: &'a str,
}

/// Splits an absolute or path-only URL.
///
/// `scheme://authority` is dropped; an absolute URL with no path has the
/// pathname `/`.
pub fn split(url: &str) -> UrlParts<'_> {
    let (rest, absolute) = match strip_origin(url) {
        Some(rest) => (rest, true),
        None => (url, false),
    };

    let (rest, hash) = match rest.find('#') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };
    let (pathname, search) = match rest.find('?') {
        Some(index) => rest.split_at(index),
        None => (rest, ""),
    };

    let pathname = if absolute && pathname.is_empty() { "/" } else { pathname };
    UrlParts {
        pathname,
        search,
        hash,
    }
}

fn strip_origin(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once("://")?;
    let valid_scheme = scheme.chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid_scheme {
        return None;
    }
    let path_start = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    Some(&rest[path_start..])
}

fn decode(component: &str) -> String {
    let spaced = component.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

/// Decodes `key=value&...`, with or without the leading `?`.
///
/// A key without `=` maps to the empty string. When a key repeats, the last
/// occurrence wins.
pub fn parse_query(search: &str) -> Query {
    let input = search.strip_prefix('?').unwrap_or(search);
    input
        .split('&')
        .filter(|segment| !segment.is_empty())
        .map(|segment| match segment.split_once('=') {
            Some((key, value)) => (decode(key), decode(value)),
            None => (decode(segment), String::new()),
        })
        .collect()
}

/// Encodes pairs as `key=value&...` without a leading `?`. An empty value is
/// written as a bare key.
pub fn format_query<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let mut query = String::new();
    for (key, value) in params {
        if !query.is_empty() {
            query.push('&');
        }
        query.push_str(&urlencoding::encode(key.as_ref()));
        let value = value.as_ref();
        if !value.is_empty() {
            query.push('=');
            query.push_str(&urlencoding::encode(value));
        }
    }
    query
}

/// Like [`format_query`], prefixed with `?` unless there is nothing to write.
pub fn format_search<I, K, V>(params: I) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    match format_query(params) {
        query if query.is_empty() => query,
        query => format!("?{query}"),
    }
}

/// The fragment without its leading `#`.
pub(crate) fn fragment(hash: &str) -> &str {
    hash.strip_prefix('#').unwrap_or(hash)
}
