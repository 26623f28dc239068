use crate::core::report::render_message;
use crate::domain::model::{AnalysisRecord, AnalysisResult};
use crate::domain::ports::{Notifier, Storage};
use crate::utils::error::{GuardError, Result};
use async_trait::async_trait;

/// Drops rendered report messages into an `outbox/` directory for a mail
/// relay to pick up.
pub struct OutboxNotifier<S: Storage> {
    storage: S,
    sender: String,
}

impl<S: Storage> OutboxNotifier<S> {
    pub fn new(storage: S, sender: &str) -> Self {
        Self {
            storage,
            sender: sender.to_string(),
        }
    }

    pub fn message_path(record: &AnalysisRecord) -> String {
        let handle: String = record
            .handle
            .as_str()
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                    c
                } else {
                    '_'
                }
            })
            .collect();

        if handle.is_empty() {
            format!("outbox/{}.eml", record.id)
        } else {
            format!("outbox/{}-{}.eml", record.id, handle)
        }
    }
}

#[async_trait]
impl<S: Storage> Notifier for OutboxNotifier<S> {
    async fn notify(&self, record: &AnalysisRecord, result: &AnalysisResult) -> Result<()> {
        let path = Self::message_path(record);
        let message = render_message(&self.sender, record, result);

        self.storage
            .write_file(&path, message.as_bytes())
            .await
            .map_err(|e| GuardError::NotificationError {
                message: format!("could not queue report for {}: {}", record.email, e),
            })?;

        tracing::info!("📧 Report for {} queued at {}", record.email, path);
        Ok(())
    }
}
