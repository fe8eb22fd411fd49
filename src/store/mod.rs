//! In-memory inventory and purse.
//!
//! Books live in a `Vec` searched front to back, so identifiers are not
//! required to be unique and every lookup resolves to the first match. The
//! collection and the purse sit behind one lock: each operation observes and
//! mutates both atomically.

mod error;
mod seed;

use bookstore_kernel::settings::StoreSettings;
use parking_lot::Mutex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

pub use error::StoreError;
pub use seed::SEED_CATALOG;

/// Share of the list price paid out when the store sells a copy back.
pub const SELL_BACK_RATIO: Decimal = dec!(0.75);

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub price: Decimal,
    pub quantity: i64,
}

impl Book {
    pub fn new(
        id: i64,
        title: impl Into<String>,
        author: impl Into<String>,
        price: Decimal,
        quantity: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            author: author.into(),
            price,
            quantity,
        }
    }
}

#[derive(Debug)]
struct Inventory {
    books: Vec<Book>,
    balance: Decimal,
}

impl Inventory {
    fn position(&self, id: i64) -> Result<usize, StoreError> {
        self.books
            .iter()
            .position(|book| book.id == id)
            .ok_or(StoreError::NotFound { id })
    }

    fn find_mut(&mut self, id: i64) -> Result<&mut Book, StoreError> {
        self.books
            .iter_mut()
            .find(|book| book.id == id)
            .ok_or(StoreError::NotFound { id })
    }
}

/// Book collection plus purse balance.
#[derive(Debug)]
pub struct Store {
    inner: Mutex<Inventory>,
}

impl Store {
    pub fn new(books: Vec<Book>, opening_balance: Decimal) -> Self {
        Self {
            inner: Mutex::new(Inventory {
                books,
                balance: opening_balance,
            }),
        }
    }

    /// Store holding [`SEED_CATALOG`].
    pub fn seeded(opening_balance: Decimal) -> Self {
        Self::new(SEED_CATALOG.clone(), opening_balance)
    }

    pub fn from_settings(settings: &StoreSettings) -> Self {
        if settings.seed_catalog {
            Self::seeded(settings.opening_balance)
        } else {
            Self::new(Vec::new(), settings.opening_balance)
        }
    }

    /// Snapshot of every book in collection order.
    pub fn list_books(&self) -> Vec<Book> {
        self.inner.lock().books.clone()
    }

    /// First book whose identifier equals `id`.
    pub fn find_by_id(&self, id: i64) -> Result<Book, StoreError> {
        let inventory = self.inner.lock();
        let index = inventory.position(id)?;
        Ok(inventory.books[index].clone())
    }

    /// Append `book` verbatim; duplicates are accepted.
    pub fn add_book(&self, book: Book) -> Book {
        let mut inventory = self.inner.lock();
        inventory.books.push(book.clone());
        book
    }

    /// Lend one copy out.
    pub fn checkout(&self, id: i64) -> Result<Book, StoreError> {
        let mut inventory = self.inner.lock();
        let book = inventory.find_mut(id)?;
        if book.quantity <= 0 {
            return Err(StoreError::Unavailable { id });
        }
        book.quantity = book.quantity.checked_sub(1).ok_or(StoreError::Overflow { id })?;
        Ok(book.clone())
    }

    /// Take one copy back. No upper bound is checked.
    pub fn return_book(&self, id: i64) -> Result<Book, StoreError> {
        let mut inventory = self.inner.lock();
        let book = inventory.find_mut(id)?;
        book.quantity = book.quantity.checked_add(1).ok_or(StoreError::Overflow { id })?;
        Ok(book.clone())
    }

    /// The store sells one copy for its list price.
    ///
    /// Both new values are computed before either is written, so a failure
    /// leaves the shelf and the purse untouched.
    pub fn buy(&self, id: i64) -> Result<Book, StoreError> {
        let mut inventory = self.inner.lock();
        let balance = inventory.balance;
        let book = inventory.find_mut(id)?;
        if book.quantity <= 0 {
            return Err(StoreError::Unavailable { id });
        }
        let quantity = book.quantity.checked_sub(1).ok_or(StoreError::Overflow { id })?;
        let new_balance = balance
            .checked_add(book.price)
            .ok_or(StoreError::Overflow { id })?;

        book.quantity = quantity;
        let updated = book.clone();
        inventory.balance = new_balance;
        Ok(updated)
    }

    /// The store acquires one copy, paying [`SELL_BACK_RATIO`] of the price
    /// out of the purse.
    pub fn sell(&self, id: i64) -> Result<Book, StoreError> {
        let mut inventory = self.inner.lock();
        let balance = inventory.balance;
        let book = inventory.find_mut(id)?;
        let cost = book
            .price
            .checked_mul(SELL_BACK_RATIO)
            .ok_or(StoreError::Overflow { id })?;
        if cost > balance {
            return Err(StoreError::InsufficientFunds { cost, balance });
        }
        let quantity = book.quantity.checked_add(1).ok_or(StoreError::Overflow { id })?;
        let new_balance = balance.checked_sub(cost).ok_or(StoreError::Overflow { id })?;

        book.quantity = quantity;
        let updated = book.clone();
        inventory.balance = new_balance;
        Ok(updated)
    }

    /// Remove the first book with `id`, keeping the order of the rest.
    pub fn remove(&self, id: i64) -> Result<Book, StoreError> {
        let mut inventory = self.inner.lock();
        let index = inventory.position(id)?;
        Ok(inventory.books.remove(index))
    }

    pub fn balance(&self) -> Decimal {
        self.inner.lock().balance
    }
}
