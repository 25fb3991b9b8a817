//! # Identifier Value Objects
//!
//! Typed identifiers for products, batches, orders, and reservations.
//!
//! Product, batch, and order ids are integer-backed (assigned by the
//! owning store); reservation tokens are UUIDs minted by the caller of a
//! reservation so an ambiguous outcome can later be reconciled.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

macro_rules! numeric_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u64);

        impl $name {
            /// Creates an identifier from its raw value.
            #[inline]
            #[must_use]
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Returns the raw identifier value.
            #[inline]
            #[must_use]
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }
    };
}

numeric_id! {
    /// Identifier of a product.
    ProductId
}

numeric_id! {
    /// Identifier of a stock batch, unique within its product.
    BatchId
}

numeric_id! {
    /// Identifier of a placed order, assigned by the order store.
    OrderId
}

/// Caller-supplied idempotency token for a reservation attempt.
///
/// A reservation carried out under a token can be replayed safely: the
/// allocation engine remembers the receipt for a bounded window and a
/// duplicate token returns the recorded receipt without touching stock.
///
/// # Examples
///
/// ```
/// use stockroom::domain::value_objects::ReservationToken;
///
/// let token = ReservationToken::new_v4();
/// assert_ne!(token, ReservationToken::new_v4());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReservationToken(Uuid);

impl ReservationToken {
    /// Mints a fresh random token.
    #[must_use]
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }

    /// Wraps an existing UUID.
    #[inline]
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    #[inline]
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl fmt::Display for ReservationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
