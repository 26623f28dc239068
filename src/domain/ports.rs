use crate::domain::model::{AnalysisRecord, AnalysisResult, Handle};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Appends `data` to the end of `path`, creating it when missing.
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn exists(&self, path: &str) -> impl std::future::Future<Output = bool> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn markers(&self) -> &[String];
    fn fetch_timeout(&self) -> Duration;
    fn bio_endpoint(&self) -> &str;
    fn user_agent(&self) -> &str;
    fn output_path(&self) -> &str;
    fn sender_address(&self) -> &str;
}

/// Retrieves the public biography text for a handle.
/// Any failure (network, non-2xx, unreadable body) is an `Err`.
#[async_trait]
pub trait BioFetcher: Send + Sync {
    async fn fetch_bio(&self, handle: &Handle) -> Result<String>;
}

/// Counts the public breaches an email address appears in.
#[async_trait]
pub trait BreachLookup: Send + Sync {
    async fn count(&self, email: &str) -> Result<u32>;
}

#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, record: &AnalysisRecord, result: &AnalysisResult) -> Result<()>;
}
