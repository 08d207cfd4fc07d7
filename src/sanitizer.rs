use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SanitizerConfig;
use crate::error::Result;

/// 发给清洗模型的固定指令，正文会拼接在指令之后
const CLEAN_INSTRUCTION: &str = "Delete every reference to a news outlet and discard any malformed data or references to website layout.\nReturn only the cleaned news content.\n\nText:\n";

/// 单次清洗请求的硬超时
const SANITIZE_TIMEOUT: Duration = Duration::from_secs(120);

/// 文本清洗客户端
///
/// 调用外部生成式模型服务剔除正文里的媒体署名和排版噪音。
/// 清洗失败绝不能阻断入库，任何错误都回退到原文。
#[derive(Clone)]
pub struct Sanitizer {
    client: reqwest::Client,
    endpoint: String,
    model: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: Option<String>,
    result: Option<String>,
}

impl Sanitizer {
    /// 根据 [`SanitizerConfig`] 创建客户端
    pub fn new(config: &SanitizerConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .expect("Failed to build reqwest client");

        Self {
            client,
            endpoint: format!("{}/api/generate", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
        }
    }

    /// 清洗抓取的正文
    ///
    /// 空白正文直接原样返回，不发起外部调用。
    /// 超时、非成功状态码、传输或解析失败时记录日志并返回原文。
    pub async fn sanitize(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        match self.request_cleaned(text).await {
            Ok(Some(cleaned)) => cleaned,
            Ok(None) => text.to_string(),
            Err(e) => {
                tracing::warn!(%e, "清洗服务调用失败，回退到原文");
                text.to_string()
            }
        }
    }

    async fn request_cleaned(&self, text: &str) -> Result<Option<String>> {
        let resp = self
            .client
            .post(&self.endpoint)
            .timeout(SANITIZE_TIMEOUT)
            .json(&GenerateRequest {
                model: &self.model,
                prompt: format!("{CLEAN_INSTRUCTION}{text}"),
                stream: false,
            })
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(status = %status, body = %body, "清洗服务返回非成功状态，回退到原文");
            return Ok(None);
        }

        let payload: GenerateResponse = resp.json().await?;
        Ok(payload.response.or(payload.result))
    }
}
