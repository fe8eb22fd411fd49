pub mod models;
pub mod routes;

use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use bookstore_kernel::{InitCtx, Module};
use serde_json::{json, Value};

use crate::store::Store;

/// Books module: catalog lookup, lending, and trading endpoints
pub struct BooksModule {
    store: Arc<Store>,
}

impl BooksModule {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl Module for BooksModule {
    fn name(&self) -> &'static str {
        "books"
    }

    async fn init(&self, ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            environment = ?ctx.settings.environment,
            books = self.store.list_books().len(),
            "books module initialized"
        );
        Ok(())
    }

    fn routes(&self) -> Router {
        routes::router(Arc::clone(&self.store))
    }

    fn openapi(&self) -> Option<Value> {
        Some(json!({
            "paths": {
                "/books": {
                    "get": {
                        "summary": "List books",
                        "tags": ["Books"],
                        "responses": {
                            "200": {
                                "description": "Every book in collection order",
                                "content": {
                                    "application/json": {
                                        "schema": {
                                            "type": "array",
                                            "items": { "$ref": "#/components/schemas/Book" }
                                        }
                                    }
                                }
                            }
                        }
                    },
                    "post": {
                        "summary": "Add a book",
                        "tags": ["Books"],
                        "requestBody": {
                            "required": true,
                            "content": {
                                "application/json": {
                                    "schema": { "$ref": "#/components/schemas/Book" }
                                }
                            }
                        },
                        "responses": {
                            "201": book_response("Created book"),
                            "400": error_response("Malformed body")
                        }
                    }
                },
                "/books/{id}": {
                    "get": {
                        "summary": "Get a book by id",
                        "tags": ["Books"],
                        "parameters": [id_parameter("path")],
                        "responses": {
                            "200": book_response("Book"),
                            "400": error_response("Bad id"),
                            "404": error_response("Book not found")
                        }
                    }
                },
                "/books/buy": {
                    "post": id_operation(
                        "Buy one copy for its list price",
                        &[("404", "Book not found or not available")],
                    )
                },
                "/books/sell": {
                    "post": id_operation(
                        "Sell one copy back for 75% of its price",
                        &[("404", "Book not found"), ("409", "Not enough money")],
                    )
                },
                "/books/checkout": {
                    "patch": id_operation(
                        "Check out one copy",
                        &[("404", "Book not found or not available")],
                    )
                },
                "/books/return": {
                    "patch": id_operation("Return one copy", &[("404", "Book not found")])
                },
                "/books/burn": {
                    "delete": id_operation(
                        "Remove a book from the catalog",
                        &[("404", "Book not found")],
                    )
                }
            },
            "components": {
                "schemas": {
                    "Book": {
                        "type": "object",
                        "properties": {
                            "id": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Caller-assigned identifier"
                            },
                            "title": { "type": "string" },
                            "author": { "type": "string" },
                            "price": { "type": "number" },
                            "quantity": {
                                "type": "integer",
                                "format": "int64",
                                "description": "Copies on the shelf"
                            }
                        },
                        "required": ["id", "title", "author", "price", "quantity"]
                    }
                }
            }
        }))
    }

    async fn start(&self, _ctx: &InitCtx<'_>) -> anyhow::Result<()> {
        tracing::info!(module = self.name(), "books module started");
        Ok(())
    }

    async fn stop(&self) -> anyhow::Result<()> {
        tracing::info!(
            module = self.name(),
            books = self.store.list_books().len(),
            "books module stopped"
        );
        Ok(())
    }
}

fn id_parameter(location: &str) -> Value {
    json!({
        "name": "id",
        "in": location,
        "required": true,
        "schema": { "type": "integer", "format": "int64" }
    })
}

fn book_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/Book" }
            }
        }
    })
}

fn error_response(description: &str) -> Value {
    json!({
        "description": description,
        "content": {
            "application/json": {
                "schema": { "$ref": "#/components/schemas/ErrorResponse" }
            }
        }
    })
}

/// Operation addressed by the `id` query parameter and answering with a book.
fn id_operation(summary: &str, failures: &[(&str, &str)]) -> Value {
    let mut responses = json!({
        "200": book_response("Updated book"),
        "400": error_response("Missing or bad id")
    });
    for (status, description) in failures {
        responses[*status] = error_response(description);
    }

    json!({
        "summary": summary,
        "tags": ["Books"],
        "parameters": [id_parameter("query")],
        "responses": responses
    })
}

/// Create a new instance of the books module
pub fn create_module(store: Arc<Store>) -> Arc<dyn Module> {
    Arc::new(BooksModule::new(store))
}
