use std::path::PathBuf;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::search::{CorpusLoader, SearchEngine};

/// Shared application state / 应用共享状态
///
/// Holds no mutable data: every search reloads the corpus itself.
#[derive(Clone)]
pub struct AppState {
    pub engine: SearchEngine,
    /// index.html, style.css, favicon.png live here / 静态文件目录
    pub static_dir: PathBuf,
    /// `limite` when omitted / 默认每页条数
    pub default_page_size: i64,
}

impl AppState {
    pub fn new(engine: SearchEngine, static_dir: PathBuf, default_page_size: i64) -> Self {
        Self {
            engine,
            static_dir,
            default_page_size,
        }
    }

    /// Build state backed by the configured data directory / 根据配置构建
    pub fn from_config(config: &AppConfig) -> Self {
        let default_page_size = config.search.default_page_size;
        if default_page_size <= 0 {
            tracing::warn!(
                "default_page_size is {}, searches without `limite` will be rejected",
                default_page_size
            );
        }
        let loader = CorpusLoader::new(config.get_data_dir());
        Self::new(
            SearchEngine::new(Arc::new(loader)),
            config.get_static_dir(),
            default_page_size,
        )
    }
}
