use anyhow::Context;
use tracing::info;
use tracing_subscriber::EnvFilter;

use attendant_care_engine::api::{AppState, create_router};
use attendant_care_engine::config::{ConfigLoader, ServerSettings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("attendant_care_engine=info")),
        )
        .init();

    let settings = ServerSettings::from_env()?;

    let loader = ConfigLoader::load(&settings.config_dir).with_context(|| {
        format!(
            "loading rate schedule from {}",
            settings.config_dir.display()
        )
    })?;
    info!(
        schedule = %loader.metadata().code,
        version = %loader.metadata().version,
        rate_files = loader.config().rates().len(),
        "Rate schedule loaded"
    );

    let app = create_router(AppState::new(loader));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.bind_addr))?;
    info!(addr = %settings.bind_addr, "Listening");

    axum::serve(listener, app).await?;
    Ok(())
}
