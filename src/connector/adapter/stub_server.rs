use axum::http::StatusCode;
use axum::routing::post;
use axum::Router;
use tokio::net::TcpListener;

/// Serve `router` on an ephemeral loopback port and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
    format!("http://{addr}")
}

/// Answer every POST to `path` with the same status and body.
pub fn canned(path: &str, status: StatusCode, body: impl Into<String>) -> Router {
    let body = body.into();
    Router::new().route(
        path,
        post(move || {
            let body = body.clone();
            async move { (status, body) }
        }),
    )
}
