use std::collections::HashSet;

use chrono::Utc;
use sqlx::PgTransaction;

use crate::content::{ArticleDraft, CreateArticleRequest};
use crate::error::Result;
use crate::notifier::{ArticleSummary, Notifier};
use crate::storage::{ArticleStorage, CategoryRecord, DBPool, StoredArticle};

/// 文章入库
///
/// 流程：
/// 1. 根据请求补全默认值得到 [`ArticleDraft`]
/// 2. 在一个事务内插入文章、解析分类并写入关联，整体提交或回滚
/// 3. 提交成功后尽力推送摘要到下游，推送失败只记录日志
///
/// 返回带主键的 [`StoredArticle`]，下游推送结果不影响返回值。
pub async fn create_article(
    pool: &DBPool,
    notifier: &Notifier,
    request: CreateArticleRequest,
) -> Result<StoredArticle> {
    let draft = ArticleDraft::from_request(&request, Utc::now());

    // 开启db事务
    let mut tx = pool.begin().await?;

    let outcome = async {
        let record = tx.insert_article(&draft).await?;

        let categories =
            resolve_categories(&mut tx, &request.category_ids, &request.category_names).await?;

        for category in &categories {
            tx.attach_category(record.id, category.id).await?;
        }

        Ok::<_, sqlx::Error>((record, categories))
    }
    .await;

    let (record, categories) = match outcome {
        Ok(value) => {
            tx.commit().await?;
            value
        }

        Err(e) => {
            tx.rollback().await.ok();
            tracing::error!(%e, "文章入库失败，事务已回滚");
            return Err(e.into());
        }
    };

    let summary = ArticleSummary::new(&record, &categories);
    if let Err(e) = notifier.publish(&summary).await {
        tracing::error!(article_id = record.id, %e, "下游通知失败，文章已入库");
    }

    Ok(StoredArticle { record, categories })
}

/// 两趟解析分类候选
///
/// 第一趟按显式 id 查询；第二趟对名称做忽略大小写去重后查询现有分类，
/// 缺失的名称逐个 upsert 创建。合并结果按 id 去重，
/// 保证同一个分类不会被关联两次。
async fn resolve_categories(
    tx: &mut PgTransaction<'_>,
    ids: &[i32],
    names: &[String],
) -> core::result::Result<Vec<CategoryRecord>, sqlx::Error> {
    let mut resolved = Vec::new();

    if !ids.is_empty() {
        resolved.extend(tx.categories_by_ids(ids).await?);
    }

    let wanted = dedup_names(names);
    if !wanted.is_empty() {
        let existing = tx.categories_by_names(&wanted).await?;

        for name in missing_names(&wanted, &existing) {
            resolved.push(tx.upsert_category(name).await?);
        }

        resolved.extend(existing);
    }

    Ok(dedup_by_id(resolved))
}

/// 去除空白名称并忽略大小写去重，保留首次出现的顺序
fn dedup_names(names: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    names
        .iter()
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .filter(|name| seen.insert(name.to_lowercase()))
        .map(str::to_string)
        .collect()
}

/// 找出还没有对应分类行的名称
fn missing_names<'a>(wanted: &'a [String], existing: &[CategoryRecord]) -> Vec<&'a str> {
    wanted
        .iter()
        .filter(|name| {
            !existing
                .iter()
                .any(|category| category.name.to_lowercase() == name.to_lowercase())
        })
        .map(String::as_str)
        .collect()
}

/// 按分类 id 去重，保留首次出现的顺序
fn dedup_by_id(categories: Vec<CategoryRecord>) -> Vec<CategoryRecord> {
    let mut seen = HashSet::new();
    categories
        .into_iter()
        .filter(|category| seen.insert(category.id))
        .collect()
}
