use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::NotifierConfig;
use crate::error::Result;
use crate::storage::{ArticleRecord, CategoryRecord};

/// 下游通知客户端
///
/// 文章入库成功后把摘要推送给外部系统。推送失败只记录日志，
/// 由调用方隔离，不影响入库结果。
#[derive(Clone)]
pub struct Notifier {
    client: reqwest::Client,
    endpoint: String,
}

/// 推送给下游的文章摘要
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticleSummary {
    pub id: i32,
    pub title: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub categories: Vec<String>,
    pub relevance_score: i32,
    pub is_premium: bool,
}

impl ArticleSummary {
    /// 根据入库结果构建摘要
    pub fn new(record: &ArticleRecord, categories: &[CategoryRecord]) -> Self {
        Self {
            id: record.id,
            title: record.title.clone(),
            author: record.author.clone(),
            published_at: record.published_at,
            categories: categories.iter().map(|c| c.name.clone()).collect(),
            relevance_score: record.relevance_score,
            is_premium: record.is_premium,
        }
    }
}

impl Notifier {
    /// 根据 [`NotifierConfig`] 创建客户端
    pub fn new(config: &NotifierConfig) -> Self {
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
            endpoint: format!("{}/news", config.base_url.trim_end_matches('/')),
        }
    }

    /// 推送摘要，非 2xx 状态视为失败交给调用方处理
    pub async fn publish(&self, summary: &ArticleSummary) -> Result<()> {
        self.client
            .post(&self.endpoint)
            .json(summary)
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
