use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::store::Book;

/// Request model for adding a book. Every field is required.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateBook {
    /// Caller-assigned identifier, not checked for uniqueness
    pub id: i64,
    /// Title of the book
    pub title: String,
    /// Author of the book
    pub author: String,
    /// List price
    pub price: Decimal,
    /// Copies on the shelf
    pub quantity: i64,
}

impl From<CreateBook> for Book {
    fn from(request: CreateBook) -> Self {
        Book::new(
            request.id,
            request.title,
            request.author,
            request.price,
            request.quantity,
        )
    }
}
