//! Corpus loader - reads every JSON file in the data directory / 语料加载器
//!
//! The corpus is rebuilt from disk on every call, nothing is cached.
//! A file that fails to open or parse is logged and skipped. / 单个文件失败不影响其他文件

use std::path::PathBuf;

use serde_json::Value;
use thiserror::Error;

use super::schema::MessageRecord;

/// Corpus file suffix / 语料文件后缀
const JSON_SUFFIX: &str = ".json";

/// Source of message records / 消息来源
pub trait MessageSource: Send + Sync {
    /// Materialize the whole corpus. Never fails; worst case is empty. / 加载全部记录
    fn load_all(&self) -> Vec<MessageRecord>;
}

/// Per-file load failure, only ever logged / 单个文件加载错误
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Directory-backed corpus loader / 基于目录的语料加载器
#[derive(Debug, Clone)]
pub struct CorpusLoader {
    data_dir: PathBuf,
}

impl CorpusLoader {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    /// Sorted names of `*.json` entries / 排序后的 JSON 文件名
    fn json_file_names(&self) -> std::io::Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir)? {
            let entry = entry?;
            match entry.file_name().into_string() {
                Ok(name) => {
                    if name.ends_with(JSON_SUFFIX) {
                        names.push(name);
                    }
                }
                Err(raw) => {
                    tracing::debug!("Skipping non UTF-8 file name: {:?}", raw);
                }
            }
        }
        names.sort();
        Ok(names)
    }

    /// Read one file and return the records it contributes / 读取单个文件
    fn load_file(&self, name: &str) -> Result<Vec<MessageRecord>, LoadError> {
        let path = self.data_dir.join(name);
        let content = std::fs::read_to_string(&path).map_err(|source| LoadError::Io {
            path: path.clone(),
            source,
        })?;
        let value: Value = serde_json::from_str(&content)
            .map_err(|source| LoadError::Parse { path, source })?;

        Ok(extract_messages(name, value))
    }
}

/// Flatten one parsed document into records / 将文档展开为记录
///
/// Accepts a top-level array, or an object with a `messages` array.
fn extract_messages(name: &str, value: Value) -> Vec<MessageRecord> {
    match value {
        Value::Array(items) => items.into_iter().map(MessageRecord::new).collect(),
        Value::Object(mut map) => match map.remove("messages") {
            Some(Value::Array(items)) => items.into_iter().map(MessageRecord::new).collect(),
            Some(_) => {
                tracing::warn!("{}: `messages` is not an array, skipped", name);
                Vec::new()
            }
            None => {
                tracing::debug!("{}: object without `messages`, skipped", name);
                Vec::new()
            }
        },
        _ => {
            tracing::debug!("{}: unsupported document shape, skipped", name);
            Vec::new()
        }
    }
}

impl MessageSource for CorpusLoader {
    fn load_all(&self) -> Vec<MessageRecord> {
        if !self.data_dir.exists() {
            return Vec::new();
        }

        let names = match self.json_file_names() {
            Ok(names) => names,
            Err(e) => {
                tracing::warn!("Failed to list data directory {:?}: {}", self.data_dir, e);
                return Vec::new();
            }
        };

        let mut records = Vec::new();
        for name in &names {
            match self.load_file(name) {
                Ok(found) => records.extend(found),
                Err(e) => tracing::warn!("Error loading {}: {}", name, e),
            }
        }

        tracing::debug!("Loaded {} records from {} files", records.len(), names.len());
        records
    }
}
