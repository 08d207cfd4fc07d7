use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, notifier::Notifier, sanitizer::Sanitizer, storage::DBPool};

/// 应用程序上下文
///
/// [`AppState`] 封装了数据库连接池、服务配置以及两个外部服务客户端，
/// 提供统一访问入口。
#[derive(Clone, FromRef)]
pub struct AppState {
    pool: DBPool,
    config: Arc<Config>,
    sanitizer: Sanitizer,
    notifier: Notifier,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    ///
    /// 清洗与通知客户端根据 [`Config`] 中的地址构建。
    pub fn new(pool: DBPool, config: Config) -> Self {
        Self {
            sanitizer: Sanitizer::new(&config.sanitizer),
            notifier: Notifier::new(&config.notifier),
            config: Arc::new(config),
            pool,
        }
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &DBPool {
        &self.pool
    }

    /// 获取服务配置
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// 获取文本清洗客户端
    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }

    /// 获取下游通知客户端
    pub fn notifier(&self) -> &Notifier {
        &self.notifier
    }
}
