// Adapters layer: concrete implementations of the domain ports.

pub mod breach;
pub mod http;
pub mod notify;
pub mod storage;

pub use breach::StaticBreachLookup;
pub use http::HttpBioFetcher;
pub use notify::OutboxNotifier;
pub use storage::{HistoryStore, LocalStorage};
