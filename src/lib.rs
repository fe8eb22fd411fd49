//! Bookstore application library
//!
//! Wires the in-memory [`store::Store`] into the `books` and `purse` modules
//! and runs them on the kernel's module lifecycle.

pub mod modules;
pub mod store;
pub mod utils;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;
use bookstore_kernel::{settings::Settings, InitCtx, ModuleRegistry};

use store::Store;

/// Registry with every module bound to `store`.
pub fn build_registry(store: &Arc<Store>) -> ModuleRegistry {
    let mut registry = ModuleRegistry::new();
    modules::register_all(&mut registry, store);
    registry
}

/// Router over a fresh store built from `settings`, without binding a port.
pub fn build_app(settings: &Settings) -> Router {
    let store = Arc::new(Store::from_settings(&settings.store));
    bookstore_http::build_router(&build_registry(&store), settings)
}

/// Run the full lifecycle: init, start, serve until Ctrl-C, stop.
pub async fn run(settings: Settings) -> anyhow::Result<()> {
    let store = Arc::new(Store::from_settings(&settings.store));
    let registry = build_registry(&store);
    let ctx = InitCtx {
        settings: &settings,
    };

    registry
        .init_all(&ctx)
        .await
        .context("failed to initialize modules")?;
    registry
        .start_all(&ctx)
        .await
        .context("failed to start modules")?;

    let served = bookstore_http::start_server(&registry, &settings).await;

    registry
        .stop_all()
        .await
        .context("failed to stop modules")?;

    tracing::info!(balance = %store.balance(), "bookstore shut down");
    served
}
