//! Local stand-in for the hosted backend
//!
//! Serves an axum router on an ephemeral port so backend adapters can be
//! exercised over real HTTP.

use axum::Router;

/// Serve `router` on 127.0.0.1 and return its base URL
pub async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind fake backend");
    let addr = listener.local_addr().expect("fake backend address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("fake backend");
    });

    format!("http://{}", addr)
}
