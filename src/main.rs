use std::sync::Arc;

use campus_submissions::{config, routes, state, store, templates};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "campus_submissions=info,tower_http=info".into()),
        )
        .init();

    let config = Arc::new(config::Config::from_env());
    let tera = templates::load(&config.template_dir)?;

    let state = Arc::new(state::AppState {
        store: store::create_store(),
        config: config.clone(),
        tera: Arc::new(tera),
    });

    let app = routes::router(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Campus Submissions listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
