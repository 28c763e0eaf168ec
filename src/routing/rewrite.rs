//! Pure path rewriting: gateway path to upstream URL

/// Join an upstream base URL with the remainder of the inbound path.
///
/// The inbound path has already had its `/{category}/{name}` prefix
/// stripped by route matching; `rest` is whatever followed it and may be
/// empty. The result always has exactly one `/` between base and rest no
/// matter how either side spells its slashes, and the query string (when
/// present) is appended unmodified.
pub fn rewrite_path(base_url: &str, rest: &str, query: &str) -> String {
    let base = base_url.trim_end_matches('/');
    let rest = rest.trim_start_matches('/');

    let mut url = format!("{}/{}", base, rest);
    if !query.is_empty() {
        url.push('?');
        url.push_str(query);
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_with_exactly_one_slash() {
        assert_eq!(
            rewrite_path("https://u.example.com", "ping", ""),
            "https://u.example.com/ping"
        );
        assert_eq!(
            rewrite_path("https://u.example.com/", "ping", ""),
            "https://u.example.com/ping"
        );
        assert_eq!(
            rewrite_path("https://u.example.com", "/ping", ""),
            "https://u.example.com/ping"
        );
        assert_eq!(
            rewrite_path("https://u.example.com/", "/ping", ""),
            "https://u.example.com/ping"
        );
    }

    #[test]
    fn empty_rest_yields_bare_root() {
        assert_eq!(rewrite_path("http://localhost:9000", "", ""), "http://localhost:9000/");
        assert_eq!(rewrite_path("http://localhost:9000/", "", ""), "http://localhost:9000/");
    }

    #[test]
    fn nested_rest_is_kept_verbatim() {
        assert_eq!(
            rewrite_path("http://localhost:9000/api", "v1/items/3", ""),
            "http://localhost:9000/api/v1/items/3"
        );
    }

    #[test]
    fn query_string_is_appended_unmodified() {
        assert_eq!(
            rewrite_path("https://echo.example.com", "ping", "x=1"),
            "https://echo.example.com/ping?x=1"
        );
        assert_eq!(
            rewrite_path("https://echo.example.com", "", "a=1&b=%20c"),
            "https://echo.example.com/?a=1&b=%20c"
        );
    }
}
