use crate::domain::model::Handle;
use crate::domain::ports::{BioFetcher, ConfigProvider};
use crate::utils::error::{GuardError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const DEFAULT_BIO_ENDPOINT: &str = "https://www.instagram.com/{handle}/?__a=1&__d=dis";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Fetches a profile page over HTTP(S) and pulls the biography out of it.
pub struct HttpBioFetcher {
    client: Client,
    endpoint_template: String,
    user_agent: String,
}

impl HttpBioFetcher {
    pub fn new(endpoint_template: &str, user_agent: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint_template: endpoint_template.to_string(),
            user_agent: user_agent.to_string(),
        })
    }

    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        Self::new(
            config.bio_endpoint(),
            config.user_agent(),
            config.fetch_timeout(),
        )
    }

    pub fn endpoint_for(&self, handle: &Handle) -> String {
        self.endpoint_template.replace("{handle}", handle.as_str())
    }
}

#[async_trait]
impl BioFetcher for HttpBioFetcher {
    async fn fetch_bio(&self, handle: &Handle) -> Result<String> {
        let endpoint = self.endpoint_for(handle);
        tracing::debug!("Fetching bio from: {}", endpoint);

        let response = self
            .client
            .get(&endpoint)
            .header(reqwest::header::USER_AGENT, &self.user_agent)
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Bio response status: {}", status);

        if !status.is_success() {
            return Err(GuardError::FetchError {
                handle: handle.to_string(),
                reason: format!("unexpected status {}", status),
            });
        }

        let body = response.text().await?;
        Ok(extract_biography(&body))
    }
}

/// Biography text from a profile payload.
///
/// JSON payloads carrying `graphql.user.biography` or `data.user.biography`
/// yield that field; any other body is scanned as-is.
pub fn extract_biography(body: &str) -> String {
    let Ok(json) = serde_json::from_str::<serde_json::Value>(body) else {
        return body.to_string();
    };

    ["/graphql/user/biography", "/data/user/biography"]
        .iter()
        .find_map(|pointer| json.pointer(pointer).and_then(|v| v.as_str()))
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}
