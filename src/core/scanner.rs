use crate::domain::model::ScanOutcome;
use regex::Regex;
use std::sync::LazyLock;

pub const DEFAULT_MARKERS: [&str; 3] = ["bit.ly", "grabify", "shady"];

static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"https?://\S+").expect("link pattern is a valid regex"));

/// Finds links in free text and flags the ones containing a known
/// shortener or redirection marker. Markers are compared case-insensitively.
#[derive(Debug, Clone)]
pub struct LinkScanner {
    markers: Vec<String>,
}

impl LinkScanner {
    pub fn new<I, S>(markers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let markers = markers
            .into_iter()
            .map(|m| m.as_ref().trim().to_lowercase())
            .filter(|m| !m.is_empty())
            .collect();
        Self { markers }
    }

    pub fn markers(&self) -> &[String] {
        &self.markers
    }

    /// Every `http://` / `https://` link in `bio`, in order of appearance
    /// with duplicates kept.
    pub fn extract_links(bio: &str) -> Vec<String> {
        LINK_PATTERN
            .find_iter(bio)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    pub fn scan(&self, bio: &str) -> ScanOutcome {
        let links = Self::extract_links(bio);

        // 找到第一個可疑連結即停止比對
        let flagged = links.iter().find_map(|link| {
            let lowered = link.to_lowercase();
            self.markers
                .iter()
                .find(|marker| lowered.contains(marker.as_str()))
                .map(|marker| (link, marker))
        });

        if let Some((link, marker)) = flagged {
            tracing::debug!("Link '{}' matched suspicious marker '{}'", link, marker);
        }

        ScanOutcome {
            suspicious: flagged.is_some(),
            links,
        }
    }
}

impl Default for LinkScanner {
    fn default() -> Self {
        Self::new(DEFAULT_MARKERS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_bio() {
        let outcome = LinkScanner::default().scan("");
        assert_eq!(outcome, ScanOutcome::default());
        assert!(!outcome.suspicious);
        assert!(outcome.links.is_empty());
    }

    #[test]
    fn test_links_keep_order_and_duplicates() {
        let bio = "shop https://a.example/x then http://b.example and https://a.example/x";
        let outcome = LinkScanner::default().scan(bio);

        assert!(!outcome.suspicious);
        assert_eq!(
            outcome.links,
            vec!["https://a.example/x", "http://b.example", "https://a.example/x"]
        );
    }

    #[test]
    fn test_marker_match_is_case_insensitive() {
        let outcome = LinkScanner::default().scan("promo HTTPS://BIT.LY/ABC");
        // scheme must be lowercase to count as a link
        assert!(outcome.links.is_empty());

        let outcome = LinkScanner::default().scan("promo https://BIT.LY/ABC");
        assert!(outcome.suspicious);
        assert_eq!(outcome.links, vec!["https://BIT.LY/ABC"]);
    }

    #[test]
    fn test_all_links_returned_after_first_match() {
        let bio = "http://grabify.link/t https://safe.example http://shady.site";
        let outcome = LinkScanner::default().scan(bio);

        assert!(outcome.suspicious);
        assert_eq!(outcome.links.len(), 3);
    }

    #[test]
    fn test_marker_outside_link_is_ignored() {
        let outcome = LinkScanner::default().scan("I never use bit.ly links, see https://me.example");
        assert!(!outcome.suspicious);
        assert_eq!(outcome.links, vec!["https://me.example"]);
    }

    #[test]
    fn test_custom_markers_are_normalized() {
        let scanner = LinkScanner::new(["  TinyURL.com ", ""]);
        assert_eq!(scanner.markers(), &["tinyurl.com".to_string()]);
        assert!(scanner.scan("go https://tinyurl.com/abc").suspicious);
        assert!(!scanner.scan("go http://bit.ly/abc").suspicious);
    }

    #[test]
    fn test_link_ends_at_whitespace() {
        let links = LinkScanner::extract_links("a http://x.example/p?q=1\tb\nhttps://y.example");
        assert_eq!(links, vec!["http://x.example/p?q=1", "https://y.example"]);
    }
}
