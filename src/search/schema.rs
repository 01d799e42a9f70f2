//! Message record and search page definitions / 消息记录与搜索结果页定义

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Deleted marker in `message_state` / 已删除标记
pub const DELETED_STATE: &str = "DELETED";

/// Message record - semi-structured chat message / 消息记录
///
/// Wraps the raw JSON value so unknown fields pass through untouched.
/// Every recognized field is read via a lookup that falls back to a default
/// when the field is missing or has the wrong type. / 字段缺失或类型不符时返回默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageRecord(Value);

impl MessageRecord {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Raw JSON value / 原始 JSON 值
    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Whether the record is a JSON object / 是否为对象
    pub fn is_object(&self) -> bool {
        self.0.is_object()
    }

    fn str_field(&self, key: &str) -> &str {
        self.0.get(key).and_then(Value::as_str).unwrap_or("")
    }

    /// Message body / 消息正文
    pub fn text(&self) -> &str {
        self.str_field("text")
    }

    /// `creator.name`, empty if `creator` is not an object / 发送者名称
    pub fn creator_name(&self) -> &str {
        self.0
            .get("creator")
            .filter(|c| c.is_object())
            .and_then(|c| c.get("name"))
            .and_then(Value::as_str)
            .unwrap_or("")
    }

    /// Sort key, compared as a plain string / 排序键
    pub fn created_date(&self) -> &str {
        self.str_field("created_date")
    }

    pub fn is_deleted(&self) -> bool {
        self.0.get("message_state").and_then(Value::as_str) == Some(DELETED_STATE)
    }
}

/// One page of search results / 搜索结果页
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchPage {
    /// Original records, unmodified / 原始记录
    #[serde(rename = "resultados")]
    pub results: Vec<MessageRecord>,
    #[serde(rename = "pagina")]
    pub page: i64,
    #[serde(rename = "total_paginas")]
    pub total_pages: usize,
    #[serde(rename = "total_resultados")]
    pub total_results: usize,
}

impl SearchPage {
    /// Result for an empty query / 空查询结果
    pub fn empty() -> Self {
        Self {
            results: Vec::new(),
            page: 1,
            total_pages: 0,
            total_results: 0,
        }
    }
}
