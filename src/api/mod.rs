pub mod webhook;

use axum::{Router, routing::post};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// 配置抓取入库相关路由。
///
/// 路由包括：
/// - `POST /api/scraper/webhook`：接收抓取服务推送的文章
pub fn setup_route(state: AppState) -> Router {
    Router::new()
        .route("/api/scraper/webhook", post(webhook::receive_webhook))
        .with_state(state)
}

pub async fn run_server(state: AppState, listen_addr: &str) {
    let router = add_middlewares(setup_route(state));

    let listener = tokio::net::TcpListener::bind(listen_addr).await.unwrap();
    println!("Listening on {listen_addr}");
    axum::serve(listener, router).await.unwrap();
}

fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        _latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, "request failed");
    }

    router.layer(
        TraceLayer::new_for_http()
            .on_failure(log_failure)
            .on_request(|_req: &_, _span: &tracing::Span| {
                // 空实现或省略此行即可关闭请求日志
            }),
    )
}
