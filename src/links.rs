//! Tracking and redirect URL construction
//!
//! Tracking parameters are appended verbatim: nothing is percent-encoded,
//! so values containing reserved characters (`&`, `=`, `#`, spaces) produce
//! malformed URLs.

use url::Url;

/// Append `params` as a query string to `base`.
///
/// Uses `&` when `base` already carries a query string and `?` otherwise.
/// An empty parameter list returns `base` unchanged.
pub fn build_tracking_url<K, V>(base: &str, params: &[(K, V)]) -> String
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if params.is_empty() {
        return base.to_string();
    }

    let query = params
        .iter()
        .map(|(key, value)| format!("{}={}", key.as_ref(), value.as_ref()))
        .collect::<Vec<_>>()
        .join("&");

    let separator = if base.contains('?') { '&' } else { '?' };
    format!("{base}{separator}{query}")
}

/// Resolve `segment` as a relative reference against `base`.
///
/// Absolute bases go through [`Url::join`], so `/x`, `../x`, `./x` and
/// absolute segments resolve as a browser would. The host is normalised to
/// lowercase. A relative or empty base falls back to replacing everything
/// after its last `/`.
pub fn join_redirect_url(base: &str, segment: &str) -> String {
    match Url::parse(base) {
        Ok(parsed) => match parsed.join(segment) {
            Ok(joined) => joined.into(),
            Err(e) => {
                tracing::debug!(base, segment, error = %e, "Could not join redirect URL");
                join_relative(base, segment)
            }
        },
        Err(_) => join_relative(base, segment),
    }
}

fn join_relative(base: &str, segment: &str) -> String {
    let path = base.split(['?', '#']).next().unwrap_or_default();
    match path.rfind('/') {
        Some(idx) => format!("{}{segment}", &path[..=idx]),
        None => segment.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_with_question_mark() {
        assert_eq!(
            build_tracking_url("https://a.com/x", &[("utm_source", "s")]),
            "https://a.com/x?utm_source=s"
        );
    }

    #[test]
    fn appends_to_existing_query() {
        assert_eq!(
            build_tracking_url("https://a.com/x?y=1", &[("utm_source", "s")]),
            "https://a.com/x?y=1&utm_source=s"
        );
    }

    #[test]
    fn keeps_parameter_order() {
        let params = [
            ("utm_source", "msft_booth"),
            ("utm_medium", "qr"),
            ("utm_campaign", "2025"),
        ];
        assert_eq!(
            build_tracking_url("https://accionlabs.com/microsoft-event", &params),
            "https://accionlabs.com/microsoft-event?utm_source=msft_booth&utm_medium=qr&utm_campaign=2025"
        );
    }

    #[test]
    fn empty_params_return_base() {
        let params: [(&str, &str); 0] = [];
        assert_eq!(build_tracking_url("https://a.com/x", &params), "https://a.com/x");
    }

    #[test]
    fn values_are_not_percent_encoded() {
        // Reserved characters leak straight into the query string.
        let url = build_tracking_url("https://a.com/x", &[("utm_term", "a&b=c d")]);
        assert_eq!(url, "https://a.com/x?utm_term=a&b=c d");
    }

    #[test]
    fn join_appends_to_directory_base() {
        assert_eq!(
            join_redirect_url("https://x.github.io/qr-hosting/", "msft-2025"),
            "https://x.github.io/qr-hosting/msft-2025"
        );
    }

    #[test]
    fn join_replaces_last_segment() {
        assert_eq!(
            join_redirect_url("https://x.github.io/qr-hosting", "msft-2025"),
            "https://x.github.io/msft-2025"
        );
    }

    #[test]
    fn join_adds_root_slash_for_bare_host() {
        assert_eq!(
            join_redirect_url("https://x.github.io", "msft-2025"),
            "https://x.github.io/msft-2025"
        );
    }

    #[test]
    fn join_drops_query_and_fragment() {
        assert_eq!(
            join_redirect_url("https://x.io/site/?ref=1#top", "promo"),
            "https://x.io/site/promo"
        );
    }

    #[test]
    fn join_resolves_dot_segments_and_absolute_paths() {
        let cases = [
            ("https://x.io/site/", "/promo", "https://x.io/promo"),
            ("https://x.io/site/", "../promo", "https://x.io/promo"),
            ("https://x.io/a/b/", "./c", "https://x.io/a/b/c"),
            ("https://x.io/site/", "https://other.io/p", "https://other.io/p"),
        ];
        for (base, segment, expected) in cases {
            assert_eq!(join_redirect_url(base, segment), expected, "{base} + {segment}");
        }
    }

    #[test]
    fn join_lowercases_host() {
        assert_eq!(
            join_redirect_url("https://YOUR_USERNAME.github.io/qr-hosting/", "msft-2025"),
            "https://your_username.github.io/qr-hosting/msft-2025"
        );
    }

    #[test]
    fn join_with_empty_base() {
        assert_eq!(join_redirect_url("", "promo"), "promo");
    }

    #[test]
    fn join_relative_base() {
        assert_eq!(join_redirect_url("pages/index", "promo"), "pages/promo");
        assert_eq!(join_redirect_url("index", "promo"), "promo");
    }
}
