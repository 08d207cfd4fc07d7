use std::env;

use serde::Deserialize;

use crate::error::Result;

/// 服务配置
///
/// 包含监听地址、webhook 共享密钥以及两个外部服务的地址。
/// 由 [`load_from_env`] 在启动时从 TOML 文件加载，之后随
/// [`crate::state::AppState`] 传递，不存在进程级的全局密钥。
#[derive(Debug, Deserialize)]
pub struct Config {
    /// HTTP 监听地址，默认 `0.0.0.0:3000`
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
    /// webhook 请求头 `X-Signature` 必须携带的共享密钥
    pub webhook_secret: String,
    /// 文本清洗服务配置，参见 [`SanitizerConfig`]
    pub sanitizer: SanitizerConfig,
    /// 下游通知服务配置，参见 [`NotifierConfig`]
    pub notifier: NotifierConfig,
}

/// 文本清洗服务配置
#[derive(Debug, Deserialize)]
pub struct SanitizerConfig {
    /// 服务基础地址，请求会发往 `{base_url}/api/generate`
    pub base_url: String,
    /// 使用的模型名，默认 `llama3.1:latest`
    #[serde(default = "default_model")]
    pub model: String,
}

/// 下游通知服务配置
#[derive(Debug, Deserialize)]
pub struct NotifierConfig {
    /// 服务基础地址，摘要会发往 `{base_url}/news`
    pub base_url: String,
}

fn default_listen_addr() -> String {
    "0.0.0.0:3000".to_string()
}

fn default_model() -> String {
    "llama3.1:latest".to_string()
}

impl Config {
    /// 从 TOML 文本解析配置
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

/// 从环境变量 `NEWSDESK_CONFIG` 指向的文件加载配置
pub fn load_from_env() -> Config {
    let path = env::var("NEWSDESK_CONFIG").expect("NEWSDESK_CONFIG not set");
    let content = std::fs::read_to_string(&path).expect("Failed to read config file");
    Config::from_toml(&content).expect("Failed to parse config file")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_parses_full_toml() {
        let toml_content = r#"
            listen_addr = "127.0.0.1:8080"
            webhook_secret = "s3cret"

            [sanitizer]
            base_url = "http://localhost:11434"
            model = "qwen3:8b"

            [notifier]
            base_url = "http://localhost:9000"
        "#;

        let config = Config::from_toml(toml_content).expect("Failed to parse config");

        assert_eq!(config.listen_addr, "127.0.0.1:8080");
        assert_eq!(config.webhook_secret, "s3cret");
        assert_eq!(config.sanitizer.base_url, "http://localhost:11434");
        assert_eq!(config.sanitizer.model, "qwen3:8b");
        assert_eq!(config.notifier.base_url, "http://localhost:9000");
    }

    #[test]
    fn test_config_applies_defaults() {
        let toml_content = r#"
            webhook_secret = "s3cret"

            [sanitizer]
            base_url = "http://localhost:11434"

            [notifier]
            base_url = "http://localhost:9000"
        "#;

        let config = Config::from_toml(toml_content).expect("Failed to parse config");

        assert_eq!(config.listen_addr, "0.0.0.0:3000"); // 默认监听地址
        assert_eq!(config.sanitizer.model, "llama3.1:latest");
    }

    #[test]
    fn test_config_rejects_missing_secret() {
        let toml_content = r#"
            [sanitizer]
            base_url = "http://localhost:11434"

            [notifier]
            base_url = "http://localhost:9000"
        "#;

        assert!(Config::from_toml(toml_content).is_err());
    }
}
