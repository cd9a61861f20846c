use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use microserve::config::Config;
use microserve::routing::AssetStore;
use microserve::server::{ServerState, listener};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_level(true)
        .init();

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let cfg = Config::load(config_path.as_deref())?;

    let assets = if cfg.assets_dir.is_dir() {
        AssetStore::from_dir(&cfg.assets_dir)
            .with_context(|| format!("failed to load assets from {}", cfg.assets_dir.display()))?
    } else {
        tracing::warn!(dir = %cfg.assets_dir.display(), "Assets directory missing, serving routes only");
        AssetStore::new()
    };
    if assets.is_empty() {
        tracing::warn!(dir = %cfg.assets_dir.display(), "No static assets to serve");
    }

    let mut state = ServerState::new(assets);
    state.set_static_root(&cfg.static_root);
    for name in &cfg.seed_users {
        state.add_user(name.as_str());
    }
    microserve::app::register_routes(&mut state);

    listener::run(&cfg, Arc::new(state)).await
}
