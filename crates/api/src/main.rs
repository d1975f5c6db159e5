#[tokio::main]
async fn main() {
    sitestock_observability::init();

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|value| value.parse().ok())
        .unwrap_or_else(|| {
            tracing::warn!("PORT not set or invalid; defaulting to 8080");
            8080
        });

    let app = sitestock_api::app::build_app();

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .unwrap_or_else(|e| panic!("failed to bind 0.0.0.0:{port}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
