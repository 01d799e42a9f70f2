//! Search module - message corpus loading and querying / 搜索模块
//!
//! Call flow / 调用流程：
//! - `CorpusLoader` reads every `*.json` file in the data directory
//! - `SearchEngine` filters, sorts and paginates what the loader returns
//! - No index and no cache: each search re-reads the directory / 无索引、无缓存

pub mod engine;
pub mod loader;
pub mod schema;

pub use engine::{SearchEngine, SearchError};
pub use loader::{CorpusLoader, LoadError, MessageSource};
pub use schema::{MessageRecord, SearchPage};
