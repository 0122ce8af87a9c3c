use tradelist::{
    config::Config, controller::characters::MAX_UPLOAD_BYTES, model::app::AppState, router,
    startup,
};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    let db = startup::connect_to_database(&config)
        .await
        .expect("Failed to connect to database");
    let media = startup::build_media_store(&config).expect("Failed to prepare media root");
    let session = startup::build_session_layer();

    tracing::info!("Starting server");

    let media_root = media.root().to_path_buf();
    let app = router::routes(&media_root)
        .with_state(AppState { db, media })
        .layer(session)
        .layer(axum::extract::DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(tower_http::trace::TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .expect("Failed to bind listen address");
    tracing::info!(addr = %config.listen_addr, "listening");

    axum::serve(listener, app).await.expect("Server error");
}
