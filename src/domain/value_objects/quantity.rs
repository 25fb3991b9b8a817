//! # Quantity Value Object
//!
//! Non-negative stock quantity with checked arithmetic.
//!
//! Quantities count whole units of stock. The invariant `quantity >= 0`
//! is enforced by the unsigned representation; arithmetic that could
//! violate it goes through the checked `safe_add` / `safe_sub` operations
//! instead of raw operators.
//!
//! # Examples
//!
//! ```
//! use stockroom::domain::value_objects::Quantity;
//!
//! let on_hand = Quantity::new(29);
//! let taken = on_hand.safe_sub(Quantity::new(3)).unwrap();
//! assert_eq!(taken, Quantity::new(26));
//! assert!(on_hand.safe_sub(Quantity::new(30)).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use thiserror::Error;

/// Error type for quantity arithmetic failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    /// Subtraction would produce a negative quantity.
    #[error("quantity underflow: {minuend} - {subtrahend}")]
    Underflow {
        /// Left-hand operand.
        minuend: u64,
        /// Right-hand operand.
        subtrahend: u64,
    },

    /// Addition overflowed the representation.
    #[error("quantity overflow: {lhs} + {rhs}")]
    Overflow {
        /// Left-hand operand.
        lhs: u64,
        /// Right-hand operand.
        rhs: u64,
    },
}

/// Result type for quantity arithmetic.
pub type ArithmeticResult<T> = Result<T, ArithmeticError>;

/// A non-negative count of whole stock units.
///
/// # Examples
///
/// ```
/// use stockroom::domain::value_objects::Quantity;
///
/// let q = Quantity::new(40);
/// assert!(q.is_positive());
/// assert_eq!(q.min(Quantity::new(11)), Quantity::new(11));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Quantity(u64);

impl Quantity {
    /// Creates a quantity from a unit count.
    #[inline]
    #[must_use]
    pub const fn new(units: u64) -> Self {
        Self(units)
    }

    /// The zero quantity.
    #[inline]
    #[must_use]
    pub const fn zero() -> Self {
        Self(0)
    }

    /// Returns the raw unit count.
    #[inline]
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Returns true if this quantity is zero.
    #[inline]
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns true if this quantity is greater than zero.
    #[inline]
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns the smaller of two quantities.
    #[inline]
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        Self(self.0.min(other.0))
    }

    /// Checked addition.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Overflow`] if the sum does not fit.
    pub fn safe_add(self, other: Self) -> ArithmeticResult<Self> {
        self.0
            .checked_add(other.0)
            .map(Self)
            .ok_or(ArithmeticError::Overflow {
                lhs: self.0,
                rhs: other.0,
            })
    }

    /// Checked subtraction.
    ///
    /// # Errors
    ///
    /// Returns [`ArithmeticError::Underflow`] if `other` exceeds `self`.
    pub fn safe_sub(self, other: Self) -> ArithmeticResult<Self> {
        self.0
            .checked_sub(other.0)
            .map(Self)
            .ok_or(ArithmeticError::Underflow {
                minuend: self.0,
                subtrahend: other.0,
            })
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for Quantity {
    fn from(units: u64) -> Self {
        Self(units)
    }
}

impl Sum for Quantity {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        // Saturating keeps the fold total-order safe; real batch sets sit
        // far below u64::MAX.
        Self(iter.fold(0u64, |acc, q| acc.saturating_add(q.0)))
    }
}
