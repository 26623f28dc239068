use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const TWO_FACTOR_ADVISORY: &str =
    "Please make sure Two-Factor Authentication is enabled for added protection.";

/// Profile identifier taken from the first path segment of a profile URL.
/// Case is preserved. Empty when the URL has no path segment.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Handle(String);

impl Handle {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Handle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BioStatus {
    Clean,
    SuspiciousLinkFound,
}

impl BioStatus {
    pub fn description(&self) -> &'static str {
        match self {
            BioStatus::Clean => "No suspicious link.",
            BioStatus::SuspiciousLinkFound => "Suspicious link found!",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SecurityVerdict {
    Secure,
    NotSecure,
}

impl SecurityVerdict {
    pub fn is_secure(&self) -> bool {
        matches!(self, SecurityVerdict::Secure)
    }

    pub fn as_yes_no(&self) -> &'static str {
        if self.is_secure() {
            "Yes"
        } else {
            "No"
        }
    }
}

/// Links found in a bio, in order of appearance, and whether any of them
/// matched a suspicious marker.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanOutcome {
    pub suspicious: bool,
    pub links: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub bio_status: BioStatus,
    pub security_verdict: SecurityVerdict,
    pub advisory: &'static str,
}

/// Outcome of one pipeline run. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    handle: Handle,
    breach_count: u32,
    bio_status: BioStatus,
    security_verdict: SecurityVerdict,
    advisory: &'static str,
    links: Vec<String>,
    degraded: bool,
}

impl AnalysisResult {
    pub fn new(
        handle: Handle,
        breach_count: u32,
        verdict: Verdict,
        links: Vec<String>,
        degraded: bool,
    ) -> Self {
        Self {
            handle,
            breach_count,
            bio_status: verdict.bio_status,
            security_verdict: verdict.security_verdict,
            advisory: verdict.advisory,
            links,
            degraded,
        }
    }

    pub fn handle(&self) -> &Handle {
        &self.handle
    }

    pub fn breach_count(&self) -> u32 {
        self.breach_count
    }

    pub fn bio_status(&self) -> BioStatus {
        self.bio_status
    }

    pub fn security_verdict(&self) -> SecurityVerdict {
        self.security_verdict
    }

    pub fn advisory(&self) -> &'static str {
        self.advisory
    }

    /// Links seen in the bio, kept for observability.
    pub fn links(&self) -> &[String] {
        &self.links
    }

    /// True when a sub-step failed and conservative defaults were used.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }
}

/// Persisted form of an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub id: u64,
    pub email: String,
    pub profile_url: String,
    pub handle: Handle,
    pub breach_count: u32,
    pub bio_status: BioStatus,
    pub is_secure: bool,
    pub degraded: bool,
    pub created_at: DateTime<Utc>,
}

impl AnalysisRecord {
    pub fn from_result(
        id: u64,
        email: &str,
        profile_url: &str,
        result: &AnalysisResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email: email.to_string(),
            profile_url: profile_url.to_string(),
            handle: result.handle().clone(),
            breach_count: result.breach_count(),
            bio_status: result.bio_status(),
            is_secure: result.security_verdict().is_secure(),
            degraded: result.is_degraded(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_copies_result_fields() {
        let verdict = Verdict {
            bio_status: BioStatus::SuspiciousLinkFound,
            security_verdict: SecurityVerdict::NotSecure,
            advisory: TWO_FACTOR_ADVISORY,
        };
        let result = AnalysisResult::new(
            Handle::new("alice"),
            0,
            verdict,
            vec!["http://bit.ly/xyz".to_string()],
            false,
        );

        let record = AnalysisRecord::from_result(
            7,
            "alice@example.com",
            "https://instagram.com/alice",
            &result,
            Utc::now(),
        );

        assert_eq!(record.id, 7);
        assert_eq!(record.handle.as_str(), "alice");
        assert_eq!(record.bio_status, BioStatus::SuspiciousLinkFound);
        assert!(!record.is_secure);
        assert!(!record.degraded);
    }

    #[test]
    fn test_handle_serializes_as_plain_string() {
        let json = serde_json::to_string(&Handle::new("Bob")).unwrap();
        assert_eq!(json, "\"Bob\"");
    }
}
