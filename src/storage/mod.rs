mod article_storage;
mod models;
mod postgres;

pub use self::{
    article_storage::ArticleStorage,
    models::{ArticleRecord, CategoryRecord, StoredArticle},
    postgres::{DBPool, init_db_from_env, migrate},
};
