use bookstore_http::error::AppError;
use rust_decimal::Decimal;
use thiserror::Error;

/// Failures reported by [`super::Store`] operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// No book carries the requested identifier
    #[error("book not found")]
    NotFound { id: i64 },

    /// Quantity is zero or negative
    #[error("Book not available")]
    Unavailable { id: i64 },

    /// Sell-back cost exceeds the purse balance
    #[error("Not enough money")]
    InsufficientFunds { cost: Decimal, balance: Decimal },

    /// Quantity or balance would leave its representable range
    #[error("arithmetic overflow")]
    Overflow { id: i64 },
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        let message = err.to_string();
        match err {
            StoreError::NotFound { .. } => AppError::not_found(message),
            StoreError::Unavailable { .. } => {
                AppError::not_found(message).with_code("unavailable")
            }
            StoreError::InsufficientFunds { .. } => {
                AppError::conflict(message).with_code("insufficient_funds")
            }
            StoreError::Overflow { .. } => AppError::conflict(message).with_code("overflow"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use rust_decimal_macros::dec;

    #[test]
    fn error_display_messages() {
        assert_eq!(StoreError::NotFound { id: 9 }.to_string(), "book not found");
        assert_eq!(
            StoreError::Unavailable { id: 1 }.to_string(),
            "Book not available"
        );
        assert_eq!(
            StoreError::InsufficientFunds {
                cost: dec!(26.4),
                balance: dec!(10)
            }
            .to_string(),
            "Not enough money"
        );
    }

    #[test]
    fn unavailable_shares_not_found_status() {
        let not_found = AppError::from(StoreError::NotFound { id: 1 });
        let unavailable = AppError::from(StoreError::Unavailable { id: 1 });
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);
        assert_eq!(unavailable.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn insufficient_funds_is_conflict() {
        let err = AppError::from(StoreError::InsufficientFunds {
            cost: dec!(26.4),
            balance: dec!(10),
        });
        assert_eq!(err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn overflow_is_conflict() {
        let err = AppError::from(StoreError::Overflow { id: 9 });
        assert_eq!(err.status(), StatusCode::CONFLICT);
        assert_eq!(err.to_string(), "conflict: arithmetic overflow");
    }
}
