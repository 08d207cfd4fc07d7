use axum::{Json, extract::State, http::HeaderMap};
use serde::{Deserialize, Serialize};

use crate::{
    content::{CreateArticleRequest, extract_category_names, parse_scraped_at},
    error::{Error, Result},
    ingest,
    state::AppState,
};

/// 携带共享密钥的请求头
const SIGNATURE_HEADER: &str = "X-Signature";

/// payload 没有标题时使用的占位标题
const DEFAULT_TITLE: &str = "Untitled";

/// 抓取的文章没有配图，统一使用的占位图
const PLACEHOLDER_IMAGE_URL: &str =
    "https://www.boynemedicalpractice.ie/wp-content/uploads/2021/10/placeholder-news.jpg";

/// 抓取服务推送的文章 payload。
///
/// 所有字段都允许缺失，未知字段被忽略。
#[derive(Debug, Deserialize)]
pub struct ScrapedArticlePayload {
    /// 文章标题
    pub title: Option<String>,
    /// 原文链接
    pub url: Option<String>,
    /// 抓取到的正文
    pub text: Option<String>,
    /// 来源站点名称
    pub source: Option<String>,
    /// 抓取时间字符串，允许多种格式
    #[serde(alias = "scrapedAt")]
    pub scraped_at: Option<String>,
    /// 自由文本主题，用于提取分类
    pub topic: Option<String>,
    /// 抓取端是否已清洗过正文
    #[serde(default, rename = "isCleaned", alias = "is_cleaned")]
    pub is_cleaned: bool,
    /// 可选的情感分析结果，下游暂未使用
    pub sentiment: Option<SentimentPayload>,
}

/// 情感分析结果
#[derive(Debug, Deserialize)]
pub struct SentimentPayload {
    pub label: Option<String>,
    pub score: Option<f64>,
}

/// webhook 成功响应体
#[derive(Debug, Serialize)]
pub struct WebhookReply {
    message: &'static str,
    #[serde(rename = "articleId")]
    article_id: i32,
}

/// 接收抓取服务推送的文章。
///
/// 处理顺序：校验签名 → 解析 payload → 清洗正文 → 提取分类 → 入库。
/// 签名校验先于 payload 解析，签名或解析失败都不会产生持久化副作用。
pub async fn receive_webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: String,
) -> Result<Json<WebhookReply>> {
    verify_signature(&headers, &state.config().webhook_secret)?;

    tracing::debug!(payload = %body, "收到 webhook 请求体");

    let payload: ScrapedArticlePayload = serde_json::from_str(&body)?;

    let original = payload.text.clone().unwrap_or_default();
    let cleaned = state.sanitizer().sanitize(&original).await;

    let request = build_create_request(payload, original, cleaned);
    let article = ingest::create_article(state.pool(), state.notifier(), request).await?;

    Ok(Json(WebhookReply {
        message: "Webhook received successfully",
        article_id: article.record.id,
    }))
}

/// 逐字节比较请求签名和配置的共享密钥
fn verify_signature(headers: &HeaderMap, secret: &str) -> Result<()> {
    let supplied = headers.get(SIGNATURE_HEADER).and_then(|v| v.to_str().ok());

    if supplied != Some(secret) {
        tracing::warn!(signature = ?supplied, "收到无效的 webhook 签名");
        return Err(Error::InvalidSignature);
    }

    Ok(())
}

/// 把 payload 和清洗结果组装成入库请求
///
/// 清洗结果为空白时保留原文；作者留空由入库服务补默认值。
fn build_create_request(
    payload: ScrapedArticlePayload,
    original: String,
    cleaned: String,
) -> CreateArticleRequest {
    let content = if cleaned.trim().is_empty() {
        original
    } else {
        cleaned
    };

    CreateArticleRequest {
        title: payload
            .title
            .filter(|title| !title.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
        content,
        author: None,
        published_at: payload.scraped_at.as_deref().and_then(parse_scraped_at),
        image_url: Some(PLACEHOLDER_IMAGE_URL.to_string()),
        relevance_score: 1,
        is_premium: false,
        category_ids: Vec::new(),
        category_names: extract_category_names(payload.topic.as_deref().unwrap_or_default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_deserializes_scraper_fields() {
        let body = r#"{
            "title": "A",
            "url": "https://example.com/a",
            "text": "body text",
            "source": "example",
            "scraped_at": "2025-03-01 12:00:00",
            "topic": "Politics/World",
            "isCleaned": false,
            "sentiment": { "label": "neutral", "score": 0.5 }
        }"#;

        let payload: ScrapedArticlePayload = serde_json::from_str(body).expect("反序列化失败");

        assert_eq!(payload.title.as_deref(), Some("A"));
        assert_eq!(payload.source.as_deref(), Some("example"));
        assert!(!payload.is_cleaned);
        assert_eq!(payload.sentiment.unwrap().label.as_deref(), Some("neutral"));
    }

    #[test]
    fn test_payload_ignores_unknown_fields() {
        let body = r#"{ "title": "A", "extra": { "nested": true } }"#;
        let payload: ScrapedArticlePayload = serde_json::from_str(body).expect("反序列化失败");
        assert_eq!(payload.title.as_deref(), Some("A"));
    }

    #[test]
    fn test_payload_rejects_null_body() {
        assert!(serde_json::from_str::<ScrapedArticlePayload>("null").is_err());
    }

    fn payload(topic: &str) -> ScrapedArticlePayload {
        serde_json::from_str(&format!(r#"{{ "text": "original", "topic": "{topic}" }}"#))
            .expect("反序列化失败")
    }

    #[test]
    fn test_build_request_uses_cleaned_text() {
        let request =
            build_create_request(payload("Politics"), "original".to_string(), "clean".to_string());

        assert_eq!(request.content, "clean");
        assert_eq!(request.category_names, vec!["Politics"]);
    }

    #[test]
    fn test_build_request_blank_cleaned_keeps_original() {
        let request =
            build_create_request(payload("Politics"), "original".to_string(), "  ".to_string());

        assert_eq!(request.content, "original");
    }

    #[test]
    fn test_build_request_defaults() {
        let request = build_create_request(payload(""), String::new(), String::new());

        assert_eq!(request.title, DEFAULT_TITLE);
        assert_eq!(request.image_url.as_deref(), Some(PLACEHOLDER_IMAGE_URL));
        assert_eq!(request.relevance_score, 1);
        assert!(!request.is_premium);
        assert!(request.category_names.is_empty());
        assert!(request.published_at.is_none());
    }

    #[test]
    fn test_verify_signature() {
        let mut headers = HeaderMap::new();
        headers.insert(SIGNATURE_HEADER, "s3cret".parse().unwrap());

        assert!(verify_signature(&headers, "s3cret").is_ok());
        assert!(verify_signature(&headers, "other").is_err());
        assert!(verify_signature(&HeaderMap::new(), "s3cret").is_err());
    }
}
