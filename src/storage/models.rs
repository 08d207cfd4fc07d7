use chrono::{DateTime, Utc};

/// 已入库的文章行
#[derive(Debug, sqlx::FromRow)]
pub struct ArticleRecord {
    /// 文章主键
    pub id: i32,
    /// 标题
    pub title: String,
    /// 正文
    pub content: String,
    /// 作者
    pub author: String,
    /// 发布时间
    pub published_at: DateTime<Utc>,
    /// 头图地址
    pub image_url: String,
    /// 相关度分值
    pub relevance_score: i32,
    /// 是否付费内容
    pub is_premium: bool,
}

/// 分类行
///
/// 名称忽略大小写唯一，由 `categories_name_ci` 唯一索引保证。
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRecord {
    /// 分类主键
    pub id: i32,
    /// 展示名称
    pub name: String,
    /// 可选描述，惰性创建的分类为空
    pub description: String,
}

/// 入库结果：文章行加上最终关联的分类
#[derive(Debug)]
pub struct StoredArticle {
    pub record: ArticleRecord,
    pub categories: Vec<CategoryRecord>,
}
