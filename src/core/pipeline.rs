use crate::core::handle::extract_handle;
use crate::core::scanner::{LinkScanner, DEFAULT_MARKERS};
use crate::core::verdict::evaluate;
use crate::domain::model::{AnalysisResult, Handle};
use crate::domain::ports::{BioFetcher, BreachLookup, ConfigProvider};
use crate::utils::error::GuardError;
use std::time::Duration;
use tokio::time::timeout;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(5);

/// Options the pipeline is constructed with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineSettings {
    pub markers: Vec<String>,
    pub fetch_timeout: Duration,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            markers: DEFAULT_MARKERS.iter().map(|m| m.to_string()).collect(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl PipelineSettings {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Self {
        Self {
            markers: config.markers().to_vec(),
            fetch_timeout: config.fetch_timeout(),
        }
    }
}

/// Profile risk evaluation: handle → bio → link scan → verdict.
///
/// The only I/O happens through the injected [`BioFetcher`] and
/// [`BreachLookup`]. A failed or timed out capability call never aborts the
/// run; the pipeline falls back to an empty bio or a zero breach count and
/// marks the result as degraded. Dropping the returned future cancels any
/// in-flight capability call and nothing is kept.
pub struct ProfilePipeline<F: BioFetcher, B: BreachLookup> {
    fetcher: F,
    breach_lookup: B,
    scanner: LinkScanner,
    fetch_timeout: Duration,
}

impl<F: BioFetcher, B: BreachLookup> ProfilePipeline<F, B> {
    pub fn new(fetcher: F, breach_lookup: B, settings: PipelineSettings) -> Self {
        Self {
            fetcher,
            breach_lookup,
            scanner: LinkScanner::new(&settings.markers),
            fetch_timeout: settings.fetch_timeout,
        }
    }

    pub fn scanner(&self) -> &LinkScanner {
        &self.scanner
    }

    pub async fn run(&self, profile_url: &str, email: &str) -> AnalysisResult {
        let handle = extract_handle(profile_url);
        if handle.is_empty() {
            tracing::warn!("⚠️ No handle could be derived from '{}'", profile_url);
        } else {
            tracing::debug!("Derived handle '{}' from '{}'", handle, profile_url);
        }

        let bio = self.fetch_bio(&handle).await;
        let breach_count = self.lookup_breaches(email).await;

        let outcome = self.scanner.scan(bio.as_deref().unwrap_or_default());
        tracing::debug!(
            "Scanned bio: {} link(s), suspicious={}",
            outcome.links.len(),
            outcome.suspicious
        );

        let verdict = evaluate(breach_count.unwrap_or(0), outcome.suspicious);
        let degraded = handle.is_empty() || bio.is_none() || breach_count.is_none();

        AnalysisResult::new(
            handle,
            breach_count.unwrap_or(0),
            verdict,
            outcome.links,
            degraded,
        )
    }

    /// `None` when there is no handle, the fetch failed or it timed out.
    async fn fetch_bio(&self, handle: &Handle) -> Option<String> {
        if handle.is_empty() {
            return None;
        }

        match timeout(self.fetch_timeout, self.fetcher.fetch_bio(handle)).await {
            Ok(Ok(bio)) => Some(bio),
            Ok(Err(e)) => {
                tracing::warn!("⚠️ Bio fetch failed, continuing with empty bio: {}", e);
                None
            }
            Err(_) => {
                let e = GuardError::FetchTimeout {
                    operation: format!("Bio fetch for '{}'", handle),
                    seconds: self.fetch_timeout.as_secs(),
                };
                tracing::warn!("⚠️ {}, continuing with empty bio", e);
                None
            }
        }
    }

    /// `None` when the lookup failed or timed out.
    async fn lookup_breaches(&self, email: &str) -> Option<u32> {
        match timeout(self.fetch_timeout, self.breach_lookup.count(email)).await {
            Ok(Ok(count)) => Some(count),
            Ok(Err(e)) => {
                tracing::warn!("⚠️ Breach lookup failed, assuming no breaches: {}", e);
                None
            }
            Err(_) => {
                tracing::warn!(
                    "⚠️ Breach lookup timed out after {:?}, assuming no breaches",
                    self.fetch_timeout
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BioStatus, SecurityVerdict};
    use crate::utils::error::Result;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct MockFetcher {
        bio: Option<String>,
        calls: Arc<AtomicUsize>,
    }

    impl MockFetcher {
        fn returning(bio: &str) -> Self {
            Self {
                bio: Some(bio.to_string()),
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        fn failing() -> Self {
            Self {
                bio: None,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }
    }

    #[async_trait]
    impl BioFetcher for MockFetcher {
        async fn fetch_bio(&self, handle: &Handle) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.bio.clone().ok_or_else(|| GuardError::FetchError {
                handle: handle.to_string(),
                reason: "connection refused".to_string(),
            })
        }
    }

    struct SlowFetcher;

    #[async_trait]
    impl BioFetcher for SlowFetcher {
        async fn fetch_bio(&self, _handle: &Handle) -> Result<String> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok("http://bit.ly/late".to_string())
        }
    }

    struct MockLookup(Option<u32>);

    #[async_trait]
    impl BreachLookup for MockLookup {
        async fn count(&self, _email: &str) -> Result<u32> {
            self.0.ok_or_else(|| GuardError::LookupError {
                reason: "service unavailable".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_suspicious_bio_is_not_secure() {
        let pipeline = ProfilePipeline::new(
            MockFetcher::returning("Check my shop http://bit.ly/xyz"),
            MockLookup(Some(0)),
            PipelineSettings::default(),
        );

        let result = pipeline.run("https://instagram.com/alice", "alice@example.com").await;

        assert_eq!(result.handle().as_str(), "alice");
        assert_eq!(result.bio_status(), BioStatus::SuspiciousLinkFound);
        assert_eq!(result.security_verdict(), SecurityVerdict::NotSecure);
        assert_eq!(result.links(), &["http://bit.ly/xyz".to_string()]);
        assert!(!result.is_degraded());
    }

    #[tokio::test]
    async fn test_failed_fetch_degrades_to_clean() {
        let pipeline = ProfilePipeline::new(
            MockFetcher::failing(),
            MockLookup(Some(0)),
            PipelineSettings::default(),
        );

        let result = pipeline.run("https://instagram.com/bob/", "bob@example.com").await;

        assert_eq!(result.handle().as_str(), "bob");
        assert_eq!(result.bio_status(), BioStatus::Clean);
        assert_eq!(result.security_verdict(), SecurityVerdict::Secure);
        assert!(result.is_degraded());
    }

    #[tokio::test]
    async fn test_breaches_make_clean_bio_not_secure() {
        let pipeline = ProfilePipeline::new(
            MockFetcher::returning("just photos"),
            MockLookup(Some(3)),
            PipelineSettings::default(),
        );

        let result = pipeline.run("https://instagram.com/carol", "carol@example.com").await;

        assert_eq!(result.breach_count(), 3);
        assert_eq!(result.bio_status(), BioStatus::Clean);
        assert_eq!(result.security_verdict(), SecurityVerdict::NotSecure);
    }

    #[tokio::test]
    async fn test_failed_lookup_assumes_zero_and_degrades() {
        let pipeline = ProfilePipeline::new(
            MockFetcher::returning("nothing to see"),
            MockLookup(None),
            PipelineSettings::default(),
        );

        let result = pipeline.run("https://instagram.com/dave", "dave@example.com").await;

        assert_eq!(result.breach_count(), 0);
        assert_eq!(result.security_verdict(), SecurityVerdict::Secure);
        assert!(result.is_degraded());
    }

    #[tokio::test]
    async fn test_empty_handle_skips_fetch() {
        let fetcher = MockFetcher::returning("http://bit.ly/never");
        let calls = fetcher.calls.clone();
        let pipeline = ProfilePipeline::new(fetcher, MockLookup(Some(0)), PipelineSettings::default());

        let result = pipeline.run("https://instagram.com/", "erin@example.com").await;

        assert!(result.handle().is_empty());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(result.bio_status(), BioStatus::Clean);
        assert!(result.is_degraded());
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_timeout_is_treated_as_failure() {
        let settings = PipelineSettings {
            fetch_timeout: Duration::from_secs(2),
            ..PipelineSettings::default()
        };
        let pipeline = ProfilePipeline::new(SlowFetcher, MockLookup(Some(0)), settings);

        let result = pipeline.run("https://instagram.com/frank", "frank@example.com").await;

        assert_eq!(result.bio_status(), BioStatus::Clean);
        assert_eq!(result.security_verdict(), SecurityVerdict::Secure);
        assert!(result.is_degraded());
        assert!(result.links().is_empty());
    }

    #[tokio::test]
    async fn test_custom_markers_are_used() {
        let settings = PipelineSettings {
            markers: vec!["linktr.ee".to_string()],
            ..PipelineSettings::default()
        };
        let pipeline = ProfilePipeline::new(
            MockFetcher::returning("http://bit.ly/a https://LinkTr.ee/grace"),
            MockLookup(Some(0)),
            settings,
        );

        let result = pipeline.run("https://instagram.com/grace", "grace@example.com").await;

        assert_eq!(result.bio_status(), BioStatus::SuspiciousLinkFound);
        assert_eq!(pipeline.scanner().markers(), &["linktr.ee".to_string()]);
    }
}
