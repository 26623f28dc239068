pub mod engine;
pub mod handle;
pub mod pipeline;
pub mod report;
pub mod scanner;
pub mod verdict;

pub use crate::domain::model::{AnalysisRecord, AnalysisResult, BioStatus, Handle, SecurityVerdict};
pub use crate::domain::ports::{BioFetcher, BreachLookup, ConfigProvider, Notifier, Storage};
pub use crate::utils::error::Result;
