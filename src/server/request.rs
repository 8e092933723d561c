use smallvec::SmallVec;
use std::sync::Arc;

/// Maximum inline parameters before heap allocation.
pub const MAX_INLINE_PARAMS: usize = 8;

/// Maximum inline headers before heap allocation.
pub const MAX_INLINE_HEADERS: usize = 16;

/// Route values and query parameters, in arrival order.
pub type ParamVec = SmallVec<[(Arc<str>, String); MAX_INLINE_PARAMS]>;

/// Request headers with lowercase names.
pub type HeaderVec = SmallVec<[(Arc<str>, String); MAX_INLINE_HEADERS]>;

/// Split a request target into its path and query string.
#[must_use]
pub fn split_path(target: &str) -> (&str, Option<&str>) {
    match target.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (target, None),
    }
}

/// Parse query string parameters from a request target.
///
/// Extracts everything after the `?` character and URL-decodes names and values.
#[must_use]
pub fn parse_query_params(target: &str) -> ParamVec {
    match split_path(target).1 {
        Some(query) => url::form_urlencoded::parse(query.as_bytes())
            .map(|(k, v)| (Arc::from(k.as_ref()), v.into_owned()))
            .collect(),
        None => ParamVec::new(),
    }
}

/// Look up a parameter by name.
///
/// Uses "last write wins" semantics: for `?limit=10&limit=20` the result is `20`.
#[inline]
#[must_use]
pub fn find_param<'a>(params: &'a ParamVec, name: &str) -> Option<&'a str> {
    params
        .iter()
        .rfind(|(k, _)| k.as_ref() == name)
        .map(|(_, v)| v.as_str())
}

/// Look up a header by name (case-insensitive per RFC 7230).
#[inline]
#[must_use]
pub fn find_header<'a>(headers: &'a HeaderVec, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_path() {
        assert_eq!(split_path("/todos"), ("/todos", None));
        assert_eq!(split_path("/todos?x=1"), ("/todos", Some("x=1")));
        assert_eq!(split_path("/todos?"), ("/todos", Some("")));
    }

    #[test]
    fn test_parse_query_params() {
        let q = parse_query_params("/p?x=1&y=hello%20world");
        assert_eq!(find_param(&q, "x"), Some("1"));
        assert_eq!(find_param(&q, "y"), Some("hello world"));
        assert_eq!(find_param(&q, "z"), None);
        assert!(parse_query_params("/p").is_empty());
    }

    #[test]
    fn test_duplicate_query_param_last_wins() {
        let q = parse_query_params("/p?limit=10&limit=20");
        assert_eq!(find_param(&q, "limit"), Some("20"));
    }

    #[test]
    fn test_find_header_case_insensitive() {
        let mut headers = HeaderVec::new();
        headers.push((Arc::from("x-api-key"), "secret".to_string()));
        assert_eq!(find_header(&headers, "X-Api-Key"), Some("secret"));
        assert_eq!(find_header(&headers, "authorization"), None);
    }
}
