use axum::response::IntoResponse;
use reqwest::StatusCode;

pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Invalid signature")]
    InvalidSignature,

    #[error(transparent)]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Serde(#[from] toml::de::Error),

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        match self {
            Error::InvalidSignature => {
                (StatusCode::UNAUTHORIZED, "Invalid signature").into_response()
            }
            Error::Payload(e) => (
                StatusCode::BAD_REQUEST,
                format!("Error processing JSON: {e}"),
            )
                .into_response(),
            Error::Serde(e) => (StatusCode::BAD_REQUEST, e.message().to_string()).into_response(),
            Error::Reqwest(_) => (StatusCode::BAD_GATEWAY, "Bad Gateway").into_response(),
            Error::Sqlx(e) => {
                tracing::error!(%e, "sqlx error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error")
            }
            .into_response(),
        }
    }
}
