use crate::domain::model::Handle;

/// Derives the profile handle from a profile URL.
///
/// Only the path is looked at: scheme, host, query and fragment are
/// ignored and the host is neither validated nor checked against any
/// profile domain. The handle is the first path segment, taken verbatim,
/// with surrounding slashes removed. Input without a path segment yields
/// an empty handle instead of an error.
pub fn extract_handle(profile_url: &str) -> Handle {
    let first = url_path(profile_url.trim())
        .trim_matches('/')
        .split('/')
        .next()
        .unwrap_or_default();

    Handle::new(first)
}

/// Raw path component: `scheme:` and `//authority` dropped, cut at the
/// first `?` or `#`. No decoding or normalization.
fn url_path(raw: &str) -> &str {
    let rest = strip_scheme(raw);

    let rest = match rest.strip_prefix("//") {
        // 主機部分到第一個 / ? # 為止
        Some(authority) => authority
            .find(['/', '?', '#'])
            .map_or("", |i| &authority[i..]),
        None => rest,
    };

    rest.split(['?', '#']).next().unwrap_or_default()
}

fn strip_scheme(raw: &str) -> &str {
    match raw.split_once(':') {
        Some((scheme, rest)) if is_scheme(scheme) => rest,
        _ => raw,
    }
}

fn is_scheme(candidate: &str) -> bool {
    let mut chars = candidate.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}
