//! Application configuration module / 应用配置模块
//!
//! Loaded from config.json in the working directory.
//! Creates default config file on first run / 首次运行时创建默认配置文件

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Env var overriding the data directory / 覆盖数据目录的环境变量
pub const DATA_DIR_ENV: &str = "MSGSEARCH_DATA_DIR";
/// Env var overriding the listen port / 覆盖端口的环境变量
pub const PORT_ENV: &str = "MSGSEARCH_PORT";

const CONFIG_FILE: &str = "config.json";

/// Application configuration / 应用配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Server configuration / 服务器配置
    #[serde(default)]
    pub server: ServerConfig,
    /// Data configuration / 数据配置
    #[serde(default)]
    pub data: DataConfig,
    /// Search configuration / 搜索配置
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration / 服务器配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Server host address / 服务器监听地址
    pub host: String,
    /// Server port / 服务器端口
    pub port: u16,
}

/// Data configuration / 数据配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Directory holding the message JSON files / 消息 JSON 文件目录
    pub data_dir: String,
    /// Directory holding index.html, style.css, favicon.png / 静态文件目录
    pub static_dir: String,
}

/// Search configuration / 搜索配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size when `limite` is omitted / 默认每页条数
    pub default_page_size: i64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            data_dir: "Dados".to_string(),
            static_dir: ".".to_string(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { default_page_size: 5 }
    }
}

impl AppConfig {
    /// Get the data directory path / 获取数据目录路径
    pub fn get_data_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.data_dir)
    }

    /// Get the static files directory / 获取静态文件目录
    pub fn get_static_dir(&self) -> PathBuf {
        PathBuf::from(&self.data.static_dir)
    }

    /// Get the server bind address / 获取服务器绑定地址
    pub fn get_bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Apply environment overrides / 应用环境变量覆盖
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(DATA_DIR_ENV) {
            self.data.data_dir = dir;
        }
        if let Some(port) = lookup(PORT_ENV) {
            match port.parse::<u16>() {
                Ok(port) => self.server.port = port,
                Err(e) => tracing::warn!("Ignoring invalid {}={:?}: {}", PORT_ENV, port, e),
            }
        }
    }
}

/// Get the config file path / 获取配置文件路径
fn get_config_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join(CONFIG_FILE)
}

/// Load configuration from a given path, creating defaults if missing / 从指定路径加载配置
pub fn load_config_from(config_path: &Path) -> Result<AppConfig, String> {
    if config_path.exists() {
        let content = std::fs::read_to_string(config_path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        let config: AppConfig = serde_json::from_str(&content)
            .map_err(|e| format!("Failed to parse config file: {}", e))?;

        tracing::info!("Loaded configuration from {:?}", config_path);
        Ok(config)
    } else {
        let config = AppConfig::default();
        save_config_to(config_path, &config)?;
        tracing::info!("Created default configuration at {:?}", config_path);
        Ok(config)
    }
}

/// Save configuration to a given path / 保存配置到指定路径
pub fn save_config_to(config_path: &Path, config: &AppConfig) -> Result<(), String> {
    let content = serde_json::to_string_pretty(config)
        .map_err(|e| format!("Failed to serialize config: {}", e))?;

    std::fs::write(config_path, content)
        .map_err(|e| format!("Failed to write config file: {}", e))?;

    Ok(())
}

/// Load config.json, then apply environment overrides / 加载配置并应用环境变量
pub fn load_config() -> Result<AppConfig, String> {
    let mut config = load_config_from(&get_config_path())?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}
