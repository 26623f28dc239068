use crate::domain::ports::BreachLookup;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Breach lookup that answers the same count for every address.
/// Stands in until a real breach database is wired up.
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticBreachLookup {
    count: u32,
}

impl StaticBreachLookup {
    pub fn new(count: u32) -> Self {
        Self { count }
    }
}

#[async_trait]
impl BreachLookup for StaticBreachLookup {
    async fn count(&self, email: &str) -> Result<u32> {
        tracing::debug!("Breach lookup for {} (static: {})", email, self.count);
        Ok(self.count)
    }
}
