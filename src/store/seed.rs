use once_cell::sync::Lazy;
use rust_decimal_macros::dec;

use super::Book;

/// Starter catalog loaded when `store.seed_catalog` is enabled.
pub static SEED_CATALOG: Lazy<Vec<Book>> = Lazy::new(|| {
    vec![
        Book::new(1, "Book 1", "Author 1", dec!(15.2), 1),
        Book::new(2, "Book 2", "Author 2", dec!(25.2), 2),
        Book::new(3, "Book 3", "Author 3", dec!(35.2), 3),
    ]
});
