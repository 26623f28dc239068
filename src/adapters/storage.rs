use crate::domain::model::{AnalysisRecord, AnalysisResult};
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use chrono::Utc;
use std::path::Path;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

pub const HISTORY_FILE: &str = "analyses.jsonl";

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = Path::new(&self.base_path).join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(full_path, data).await?;
        Ok(())
    }

    async fn append_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(full_path)
            .await?;
        file.write_all(data).await?;
        file.flush().await?;
        Ok(())
    }

    async fn exists(&self, path: &str) -> bool {
        let full_path = Path::new(&self.base_path).join(path);
        tokio::fs::try_exists(full_path).await.unwrap_or(false)
    }
}

/// Analysis records kept as JSON lines, one per analysis.
///
/// Each record is appended to the end of the file; existing lines are never
/// rewritten. The next id lives in memory, seeded from the file on the first
/// append, and its lock is held until the line is written so concurrent
/// analyses never share an id or interleave lines.
pub struct HistoryStore<S: Storage> {
    storage: S,
    file_name: String,
    next_id: Mutex<Option<u64>>,
}

impl<S: Storage> HistoryStore<S> {
    pub fn new(storage: S) -> Self {
        Self::with_file_name(storage, HISTORY_FILE)
    }

    pub fn with_file_name(storage: S, file_name: &str) -> Self {
        Self {
            storage,
            file_name: file_name.to_string(),
            next_id: Mutex::new(None),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Stores a new record for `result` and returns it with its id assigned.
    pub async fn append(
        &self,
        email: &str,
        profile_url: &str,
        result: &AnalysisResult,
    ) -> Result<AnalysisRecord> {
        let mut next_id = self.next_id.lock().await;

        let mut line = String::new();
        let id = match *next_id {
            Some(id) => id,
            None => {
                let content = self.read_raw().await?;
                // 上次寫入中斷時補上換行，避免與新紀錄黏在同一行
                if !content.is_empty() && !content.ends_with('\n') {
                    line.push('\n');
                }
                parse_records(&content)
                    .iter()
                    .map(|r| r.id)
                    .max()
                    .unwrap_or(0)
                    + 1
            }
        };

        let record = AnalysisRecord::from_result(id, email, profile_url, result, Utc::now());
        line.push_str(&serde_json::to_string(&record)?);
        line.push('\n');

        // 寫入中途被取消時，下次重新從檔案推算
        *next_id = None;
        self.storage
            .append_file(&self.file_name, line.as_bytes())
            .await?;
        *next_id = Some(id + 1);

        tracing::debug!("Stored analysis #{} for '{}'", record.id, record.handle);
        Ok(record)
    }

    /// All readable records, newest first. Lines that do not parse are
    /// logged and skipped.
    pub async fn history(&self) -> Result<Vec<AnalysisRecord>> {
        let content = self.read_raw().await?;
        let mut records = parse_records(&content);
        records.sort_by(|a, b| b.id.cmp(&a.id));
        Ok(records)
    }

    async fn read_raw(&self) -> Result<String> {
        if !self.storage.exists(&self.file_name).await {
            return Ok(String::new());
        }

        let bytes = self.storage.read_file(&self.file_name).await?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

fn parse_records(content: &str) -> Vec<AnalysisRecord> {
    content
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match serde_json::from_str(line) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("⚠️ Skipping unreadable history line {}: {}", index + 1, e);
                None
            }
        })
        .collect()
}
