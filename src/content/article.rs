use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// 缺省作者名，请求未携带作者时使用
pub const DEFAULT_AUTHOR: &str = "Editorial";

/// 文章入库请求
///
/// 是 webhook payload 与持久化文章之间的桥梁，也可由其他调用方直接构造。
/// 分类允许以两种形式给出：已存在分类的 id 列表，或按名称查找并按需创建的
/// 名称列表，二者在入库时合并去重。
#[derive(Debug)]
pub struct CreateArticleRequest {
    pub title: String,
    pub content: String,
    /// 可选作者，空白等同于未给出
    pub author: Option<String>,
    /// 可选发布时间，未给出时取入库时刻
    pub published_at: Option<DateTime<Utc>>,
    pub image_url: Option<String>,
    pub relevance_score: i32,
    pub is_premium: bool,
    /// 已存在分类的 id
    pub category_ids: Vec<i32>,
    /// 按名称解析的分类，不存在时惰性创建
    pub category_names: Vec<String>,
}

/// 补全默认值后的可插入文章
#[derive(Debug)]
pub struct ArticleDraft {
    pub title: String,
    pub content: String,
    pub author: String,
    pub published_at: DateTime<Utc>,
    pub image_url: String,
    pub relevance_score: i32,
    pub is_premium: bool,
}

impl ArticleDraft {
    /// 根据 [`CreateArticleRequest`] 构建草稿
    ///
    /// 默认值：
    /// - 作者缺失或空白 → [`DEFAULT_AUTHOR`]
    /// - 发布时间缺失 → 传入的 `now`（入库时刻）
    /// - 图片地址缺失 → 空字符串
    pub fn from_request(request: &CreateArticleRequest, now: DateTime<Utc>) -> Self {
        let author = match &request.author {
            Some(author) if !author.trim().is_empty() => author.clone(),
            _ => DEFAULT_AUTHOR.to_string(),
        };

        Self {
            title: request.title.clone(),
            content: request.content.clone(),
            author,
            published_at: request.published_at.unwrap_or(now),
            image_url: request.image_url.clone().unwrap_or_default(),
            relevance_score: request.relevance_score,
            is_premium: request.is_premium,
        }
    }
}

/// 宽松解析抓取时间字符串
///
/// 依次尝试 RFC 3339、`%Y-%m-%d %H:%M:%S`、`%Y/%m/%d %H:%M:%S` 和纯日期，
/// 全部失败返回 `None`，由调用方决定兜底时间。
pub fn parse_scraped_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Some(datetime.with_timezone(&Utc));
    }

    for fmt in &["%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> CreateArticleRequest {
        CreateArticleRequest {
            title: "A".to_string(),
            content: "body".to_string(),
            author: None,
            published_at: None,
            image_url: None,
            relevance_score: 1,
            is_premium: false,
            category_ids: Vec::new(),
            category_names: Vec::new(),
        }
    }

    #[test]
    fn test_draft_applies_defaults() {
        let now = Utc::now();
        let draft = ArticleDraft::from_request(&request(), now);

        assert_eq!(draft.author, DEFAULT_AUTHOR);
        assert_eq!(draft.published_at, now);
        assert_eq!(draft.image_url, "");
    }

    #[test]
    fn test_draft_blank_author_falls_back() {
        let mut req = request();
        req.author = Some("   ".to_string());

        let draft = ArticleDraft::from_request(&req, Utc::now());
        assert_eq!(draft.author, DEFAULT_AUTHOR);
    }

    #[test]
    fn test_draft_keeps_explicit_fields() {
        let mut req = request();
        req.author = Some("Alice".to_string());
        let published = Utc.with_ymd_and_hms(2025, 3, 1, 12, 0, 0).unwrap();
        req.published_at = Some(published);

        let draft = ArticleDraft::from_request(&req, Utc::now());
        assert_eq!(draft.author, "Alice");
        assert_eq!(draft.published_at, published);
    }

    #[test]
    fn test_parse_scraped_at_formats() {
        assert!(parse_scraped_at("2025-03-01T12:00:00Z").is_some());
        assert!(parse_scraped_at("2025-03-01 12:00:00").is_some());
        assert!(parse_scraped_at("2025/03/01 12:00:00").is_some());
        assert!(parse_scraped_at("2025-03-01").is_some());
    }

    #[test]
    fn test_parse_scraped_at_rejects_garbage() {
        assert!(parse_scraped_at("").is_none());
        assert!(parse_scraped_at("yesterday").is_none());
        assert!(parse_scraped_at("03/01/2025").is_none());
    }
}
