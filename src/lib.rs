pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{GuardConfig, TomlConfig};

pub use adapters::{HistoryStore, HttpBioFetcher, LocalStorage, OutboxNotifier, StaticBreachLookup};
pub use crate::core::{
    engine::{AnalysisEngine, CompletedAnalysis},
    pipeline::{PipelineSettings, ProfilePipeline},
};
pub use domain::model::{AnalysisRecord, AnalysisResult, BioStatus, Handle, SecurityVerdict};
pub use utils::error::{GuardError, Result};
