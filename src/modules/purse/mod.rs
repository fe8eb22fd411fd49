use std::sync::Arc;

use async_trait::async_trait;
use axum::{extract::State, routing::get, Json, Router};
use bookstore_kernel::{InitCtx, Module};
use rust_decimal::Decimal;
use serde_json::json;

use crate::store::Store;

/// Purse module exposing the shared cash balance
pub struct PurseModule {
    store: Arc<Store>,
}

impl PurseModule {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for PurseModule {
    fn name(&self) -> &'static str {
        "purse"
    }

    async fn init(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            balance = %self.store.balance(),
            "purse module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        Router::new()
            .route("/balance", get(balance))
            .with_state(Arc::clone(&self.store))
    }

    fn openapi(&self) -> Option<serde_json::Value> {
        Some(json!({
            "paths": {
                "/balance": {
                    "get": {
                        "summary": "Current purse balance",
                        "tags": ["Purse"],
                        "responses": {
                            "200": {
                                "description": "Balance",
                                "content": {
                                    "application/json": {
                                        "schema": { "type": "number" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }))
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            balance = %self.store.balance(),
            "purse module stopped"
        );
        Ok(())
    }
}

async fn balance(State(store): State<Arc<Store>>) -> Json<Decimal> {
    Json(store.balance())
}

/// Create a new instance of the purse module
pub fn create_module(store: Arc<Store>) -> Arc<dyn Module> {
    Arc::new(PurseModule::new(store))
}
