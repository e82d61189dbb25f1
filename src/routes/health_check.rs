use axum::http::StatusCode;

/// Liveness probe; never touches the subscription service.
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}
