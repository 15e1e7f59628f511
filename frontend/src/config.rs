//! 运行时配置
//!
//! 客户端唯一的配置项是 API 地址。优先级：
//! LocalStorage `meetpoint_api_url` > 编译期 `MEETPOINT_API_URL` > 默认值。

use crate::web::LocalStorage;
use url::Url;

pub const DEFAULT_API_URL: &str = "http://localhost:8000";
const STORAGE_API_URL_KEY: &str = "meetpoint_api_url";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: Url,
}

impl ClientConfig {
    /// 在浏览器中加载配置
    pub fn load() -> Self {
        Self::resolve(
            LocalStorage::get(STORAGE_API_URL_KEY),
            option_env!("MEETPOINT_API_URL"),
        )
    }

    /// 按优先级合并配置来源
    ///
    /// 非法或非 http(s) 的地址会被丢弃并记录警告。
    pub fn resolve(stored: Option<String>, built: Option<&str>) -> Self {
        let candidates = stored
            .into_iter()
            .chain(built.map(str::to_string))
            .map(|raw| raw.trim().trim_end_matches('/').to_string())
            .filter(|raw| !raw.is_empty());

        for raw in candidates {
            match Url::parse(&raw) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {
                    return Self { api_base_url: url };
                }
                Ok(url) => log::warn!("ignoring API url with scheme {}", url.scheme()),
                Err(e) => log::warn!("ignoring malformed API url {raw:?}: {e}"),
            }
        }

        Self::default()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: Url::parse(DEFAULT_API_URL).expect("DEFAULT_API_URL is a valid url"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_value_wins() {
        let config = ClientConfig::resolve(
            Some("https://api.example.com/".to_string()),
            Some("http://build.example.com"),
        );
        assert_eq!(config.api_base_url.as_str(), "https://api.example.com/");
    }

    #[test]
    fn falls_through_invalid_sources() {
        let config = ClientConfig::resolve(Some("not a url".to_string()), Some("ftp://files"));
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.api_base_url.as_str(), "http://localhost:8000/");
    }

    #[test]
    fn blank_stored_value_is_skipped() {
        let config = ClientConfig::resolve(Some("  ".to_string()), Some("http://build.example.com/api"));
        assert_eq!(config.api_base_url.as_str(), "http://build.example.com/api");
    }
}
