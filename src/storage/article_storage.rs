use sqlx::PgExecutor;

use crate::content::ArticleDraft;

use super::{ArticleRecord, CategoryRecord};

/// 提供文章和分类的数据库操作接口
///
/// 入库流程在一个事务内调用这些方法：插入 [`ArticleRecord`]、
/// 解析 [`CategoryRecord`]、写入关联表。
pub trait ArticleStorage {
    /// 获取 SQL 执行器，用于 [`sqlx::query()`] 执行
    fn executor<'t>(&'t mut self) -> impl PgExecutor<'t>;

    /// 插入文章并返回完整行
    fn insert_article(
        &mut self,
        draft: &ArticleDraft,
    ) -> impl std::future::Future<Output = Result<ArticleRecord, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, ArticleRecord>(
                "
                INSERT INTO articles
                    (title, content, author, published_at, image_url, relevance_score, is_premium)
                VALUES ($1, $2, $3, $4, $5, $6, $7)
                RETURNING id, title, content, author, published_at, image_url,
                          relevance_score, is_premium
                ",
            )
            .bind(&draft.title)
            .bind(&draft.content)
            .bind(&draft.author)
            .bind(draft.published_at)
            .bind(&draft.image_url)
            .bind(draft.relevance_score)
            .bind(draft.is_premium)
            .fetch_one(self.executor())
            .await
        }
    }

    /// 按 id 批量查询分类，不存在的 id 被忽略
    fn categories_by_ids(
        &mut self,
        ids: &[i32],
    ) -> impl std::future::Future<Output = Result<Vec<CategoryRecord>, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, CategoryRecord>(
                "SELECT id, name, description FROM categories WHERE id = ANY($1)",
            )
            .bind(ids.to_vec())
            .fetch_all(self.executor())
            .await
        }
    }

    /// 按名称批量查询分类，忽略大小写匹配
    fn categories_by_names(
        &mut self,
        names: &[String],
    ) -> impl std::future::Future<Output = Result<Vec<CategoryRecord>, sqlx::Error>> {
        async move {
            let lowered: Vec<String> = names.iter().map(|name| name.to_lowercase()).collect();

            sqlx::query_as::<_, CategoryRecord>(
                "SELECT id, name, description FROM categories WHERE LOWER(name) = ANY($1)",
            )
            .bind(lowered)
            .fetch_all(self.executor())
            .await
        }
    }

    /// 插入分类，已存在同名分类（忽略大小写）时返回现有行
    ///
    /// 使用 [`ON CONFLICT`] 落在 `LOWER(name)` 唯一索引上，
    /// 并发插入同一个新名称时收敛到同一行。
    fn upsert_category(
        &mut self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<CategoryRecord, sqlx::Error>> {
        async move {
            sqlx::query_as::<_, CategoryRecord>(
                "
                INSERT INTO categories (name, description)
                VALUES ($1, '')
                ON CONFLICT ((LOWER(name)))
                DO UPDATE SET name = categories.name
                RETURNING id, name, description
                ",
            )
            .bind(name)
            .fetch_one(self.executor())
            .await
        }
    }

    /// 写入文章与分类的关联，重复关联被忽略
    fn attach_category(
        &mut self,
        article_id: i32,
        category_id: i32,
    ) -> impl std::future::Future<Output = Result<(), sqlx::Error>> {
        async move {
            sqlx::query(
                "
                INSERT INTO article_categories (article_id, category_id)
                VALUES ($1, $2)
                ON CONFLICT DO NOTHING
                ",
            )
            .bind(article_id)
            .bind(category_id)
            .execute(self.executor())
            .await?;
            Ok(())
        }
    }
}

/// 为 [`sqlx::PgTransaction`] 实现 [`ArticleStorage`]
impl ArticleStorage for sqlx::PgTransaction<'_> {
    fn executor<'t>(&'t mut self) -> impl PgExecutor<'t> {
        self.as_mut()
    }
}
