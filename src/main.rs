use anyhow::Result;
use eframe::CreationContext;
use redax::app::{RedactionSession, RedaxApp};
use redax::backend::{LocalBackend, RedactionBackend};
use redax::config::Settings;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::load().unwrap_or_else(|e| {
        tracing::warn!("Could not load settings, using defaults: {}", e);
        Settings::default()
    });
    tracing::debug!("Settings: {:?}", settings);

    let runtime = tokio::runtime::Runtime::new()?;
    let backend = Arc::new(LocalBackend::new(&settings));
    let app_backend: Arc<dyn RedactionBackend> = backend.clone();
    let session = RedactionSession::from_settings(&settings);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 720.0])
            .with_min_inner_size([480.0, 560.0]),
        ..Default::default()
    };

    let result = eframe::run_native(
        "Redax",
        options,
        Box::new(move |cc: &CreationContext| {
            Box::new(RedaxApp::new(cc, app_backend, session, runtime))
        }),
    );

    backend.cleanup();
    result.map_err(|e| anyhow::anyhow!("Window closed with an error: {}", e))
}
