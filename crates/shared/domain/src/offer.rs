//! Purchase offers and their prices.

use crate::identifiers::{OfferIdentifier, ProductIdentifier};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// A price in minor currency units (cents).
///
/// Stored as an integer to keep ordering exact. The total order compares the
/// amount first and the currency code second, so offer sorting stays
/// deterministic even across mixed-currency provider sets.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Price {
    /// Amount in minor units, e.g. `499` for 4.99.
    pub amount_minor: u64,
    /// ISO 4217 currency code, e.g. `"EUR"`.
    pub currency: String,
}

impl Price {
    /// Creates a price from minor units and a currency code.
    pub fn new(amount_minor: u64, currency: impl Into<String>) -> Self {
        Self { amount_minor, currency: currency.into() }
    }
}

impl PartialOrd for Price {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Price {
    fn cmp(&self, other: &Self) -> Ordering {
        self.amount_minor
            .cmp(&other.amount_minor)
            .then_with(|| self.currency.cmp(&other.currency))
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02} {}", self.amount_minor / 100, self.amount_minor % 100, self.currency)
    }
}

/// A priced purchase option covering a product (and transitively its features).
///
/// Offers are assembled fresh on every resolution pass from the active
/// providers' answers; the engine never persists them. `source` names the
/// provider that supplied the offer so presentation layers can attribute it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Offer {
    pub identifier: OfferIdentifier,
    /// The product this offer purchases.
    pub product: ProductIdentifier,
    pub price: Price,
    /// Name of the provider that supplied this offer.
    pub source: String,
}

impl Offer {
    /// Creates an offer for a product at a price, attributed to a provider.
    pub fn new(
        identifier: impl Into<OfferIdentifier>,
        product: impl Into<ProductIdentifier>,
        price: Price,
        source: impl Into<String>,
    ) -> Self {
        Self {
            identifier: identifier.into(),
            product: product.into(),
            price,
            source: source.into(),
        }
    }
}
