use crate::adapters::storage::HistoryStore;
use crate::core::pipeline::ProfilePipeline;
use crate::domain::model::{AnalysisRecord, AnalysisResult};
use crate::domain::ports::{BioFetcher, BreachLookup, Notifier, Storage};
use crate::utils::error::Result;
use crate::utils::validation::validate_email;

/// A finished analysis together with the record it was stored under.
#[derive(Debug, Clone)]
pub struct CompletedAnalysis {
    pub record: AnalysisRecord,
    pub result: AnalysisResult,
}

/// Runs the pipeline, persists the outcome and notifies the submitter.
pub struct AnalysisEngine<F, B, S, N>
where
    F: BioFetcher,
    B: BreachLookup,
    S: Storage,
    N: Notifier,
{
    pipeline: ProfilePipeline<F, B>,
    history: HistoryStore<S>,
    notifier: N,
}

impl<F, B, S, N> AnalysisEngine<F, B, S, N>
where
    F: BioFetcher,
    B: BreachLookup,
    S: Storage,
    N: Notifier,
{
    pub fn new(pipeline: ProfilePipeline<F, B>, history: HistoryStore<S>, notifier: N) -> Self {
        Self {
            pipeline,
            history,
            notifier,
        }
    }

    pub fn pipeline(&self) -> &ProfilePipeline<F, B> {
        &self.pipeline
    }

    /// The submitter address ends up in the report's `To:` header, so it is
    /// validated before anything runs.
    pub async fn analyze_profile(
        &self,
        profile_url: &str,
        submitter_email: &str,
    ) -> Result<CompletedAnalysis> {
        validate_email("email", submitter_email)?;
        tracing::info!("🔎 Analyzing {}", profile_url);

        let result = self.pipeline.run(profile_url, submitter_email).await;
        tracing::info!(
            "Handle '{}': {} / secure={}{}",
            result.handle(),
            result.bio_status().description(),
            result.security_verdict().as_yes_no(),
            if result.is_degraded() { " (degraded)" } else { "" }
        );

        let record = self
            .history
            .append(submitter_email, profile_url, &result)
            .await?;
        tracing::info!("💾 Stored analysis #{}", record.id);

        // 通知失敗只記錄，不影響結果
        if let Err(e) = self.notifier.notify(&record, &result).await {
            tracing::warn!("⚠️ Report delivery failed: {}", e);
            tracing::warn!("💡 Suggestion: {}", e.recovery_suggestion());
        }

        Ok(CompletedAnalysis { record, result })
    }

    pub async fn history(&self) -> Result<Vec<AnalysisRecord>> {
        self.history.history().await
    }
}
