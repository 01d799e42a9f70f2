//! Search engine - filter, sort and paginate the corpus / 搜索引擎
//!
//! Every call reloads the corpus from its source:
//! - filter: case-insensitive substring on `creator.name` or `text` / 过滤
//! - sort: `created_date` descending, plain string comparison / 排序
//! - paginate: 1-based page of `page_size` records / 分页

use std::sync::Arc;

use thiserror::Error;

use super::loader::MessageSource;
use super::schema::{MessageRecord, SearchPage};

/// Search error / 搜索错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SearchError {
    #[error("page size must be a positive integer, got {0}")]
    InvalidPageSize(i64),
}

/// Search engine / 搜索引擎
#[derive(Clone)]
pub struct SearchEngine {
    source: Arc<dyn MessageSource>,
}

impl SearchEngine {
    pub fn new(source: Arc<dyn MessageSource>) -> Self {
        Self { source }
    }

    /// Search `query`, returning page `page` (1-based) of `page_size` records / 执行搜索
    ///
    /// An empty query returns an empty page without touching the source.
    /// `page < 1` or a page past the end yields no results, totals are still reported.
    pub fn search(&self, query: &str, page: i64, page_size: i64) -> Result<SearchPage, SearchError> {
        if query.is_empty() {
            return Ok(SearchPage::empty());
        }
        if page_size <= 0 {
            return Err(SearchError::InvalidPageSize(page_size));
        }

        let needle = query.to_lowercase();
        let mut matched: Vec<MessageRecord> = self
            .source
            .load_all()
            .into_iter()
            .filter(|record| matches(record, &needle))
            .collect();

        // Stable, so equal dates keep load order / 稳定排序
        matched.sort_by(|a, b| b.created_date().cmp(a.created_date()));

        let total_results = matched.len();
        let size = usize::try_from(page_size).unwrap_or(usize::MAX);
        let total_pages = total_results.div_ceil(size);

        let results = match page_start(page, size) {
            Some(start) if start < total_results => {
                matched.into_iter().skip(start).take(size).collect()
            }
            _ => Vec::new(),
        };

        tracing::debug!(
            "search {:?}: {} matched, page {}/{}",
            query,
            total_results,
            page,
            total_pages
        );

        Ok(SearchPage {
            results,
            page,
            total_pages,
            total_results,
        })
    }
}

/// Offset of the first record on `page`, `None` if out of range / 起始偏移
fn page_start(page: i64, size: usize) -> Option<usize> {
    if page < 1 {
        return None;
    }
    let index = usize::try_from(page - 1).ok()?;
    index.checked_mul(size)
}

/// Whether a record matches an already lower-cased needle / 记录是否匹配
///
/// Fields are tested separately, never concatenated.
pub fn matches(record: &MessageRecord, needle: &str) -> bool {
    if !record.is_object() || record.is_deleted() {
        return false;
    }
    record.creator_name().to_lowercase().contains(needle)
        || record.text().to_lowercase().contains(needle)
}
